//! Layered noise-blended rock diffuse texture.

use glam::{Vec3, Vec4};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{Palette, TextureError, TextureImage};
use crate::noise::{
    cellular_edge_field, fractal_field, normalize_field, CellularNoiseConfig, FractalNoiseConfig,
};

/// Tunables for the rock texture synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RockTextureConfig {
    /// Full passes over the palette when painting mottling layers.
    pub iterations: u32,
    /// Frequency of the fractal field driving the base blend.
    pub fractal_frequency: f32,
    /// Frequency of the cellular fields driving the mottling layers.
    pub cellular_frequency: f32,
    /// Octave count for the base fractal field.
    pub octaves: u8,
    /// Minimum layer value that paints over the accumulator.
    pub threshold: f32,
    /// Exponent sharpening each cellular layer.
    pub falloff: f32,
}

impl Default for RockTextureConfig {
    fn default() -> Self {
        Self {
            iterations: 2,
            fractal_frequency: 0.08,
            cellular_frequency: 0.1,
            octaves: 8,
            threshold: 0.2,
            falloff: 2.0,
        }
    }
}

/// Blends `a` over `b`; `alpha` of 1 yields `a`. The weight is deliberately
/// not clamped, matching the layer-painting behavior.
fn mix_color(a: Vec3, b: Vec3, alpha: f32) -> Vec3 {
    a * alpha + b * (1.0 - alpha)
}

/// Synthesizes a square rock diffuse image from a palette.
///
/// The base layer blends the first two palette entries by a normalized
/// fractal field; with a single-entry palette the output is the base color
/// everywhere. Then, `iterations` times per palette entry, an independent
/// normalized cellular field is raised to `falloff` and painted over the
/// accumulator wherever it exceeds `threshold`, using the (unclamped) field
/// value as blend weight. Every field is min/max-normalized first so the
/// blending behaves the same regardless of raw noise amplitude.
pub fn generate_rock_texture<R: Rng>(
    size: usize,
    palette: &Palette,
    config: &RockTextureConfig,
    rng: &mut R,
) -> Result<TextureImage, TextureError> {
    if size == 0 {
        return Err(TextureError::ZeroSize);
    }
    if palette.is_empty() {
        return Err(TextureError::EmptyPalette);
    }

    let base = palette.0[0];
    let second = palette.0.get(1).copied().unwrap_or(base);

    let mut field = fractal_field(
        size,
        &FractalNoiseConfig {
            octaves: config.octaves,
            frequency: config.fractal_frequency,
            ..FractalNoiseConfig::with_seed(rng.random())
        },
    );
    normalize_field(&mut field);

    let mut image = TextureImage::filled(size, Vec4::ZERO);
    image
        .pixels
        .par_iter_mut()
        .zip(&field)
        .for_each(|(pixel, &t)| {
            *pixel = mix_color(base, second, t).extend(1.0);
        });

    for _ in 0..config.iterations {
        for &color in &palette.0 {
            let mut layer = cellular_edge_field(
                size,
                &CellularNoiseConfig {
                    frequency: config.cellular_frequency,
                    ..CellularNoiseConfig::with_seed(rng.random())
                },
            );
            normalize_field(&mut layer);

            let threshold = config.threshold;
            let falloff = config.falloff;
            image
                .pixels
                .par_iter_mut()
                .zip(&layer)
                .for_each(|(pixel, &raw)| {
                    let value = raw.powf(falloff);
                    if value > threshold {
                        *pixel = mix_color(color, pixel.truncate(), value).extend(1.0);
                    }
                });
        }
    }

    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_single_entry_palette_is_constant() {
        let base = Vec3::new(0.3, 0.5, 0.7);
        let palette = Palette(vec![base]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let image =
            generate_rock_texture(32, &palette, &RockTextureConfig::default(), &mut rng).unwrap();
        for pixel in &image.pixels {
            assert!((pixel.truncate() - base).length() < 1e-6);
            assert_eq!(pixel.w, 1.0);
        }
    }

    #[test]
    fn test_empty_palette_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            generate_rock_texture(16, &Palette(vec![]), &RockTextureConfig::default(), &mut rng),
            Err(TextureError::EmptyPalette)
        ));
    }

    #[test]
    fn test_zero_size_rejected() {
        let mut rng = ChaCha8Rng::seed_from_u64(0);
        assert!(matches!(
            generate_rock_texture(0, &Palette::rock(), &RockTextureConfig::default(), &mut rng),
            Err(TextureError::ZeroSize)
        ));
    }

    #[test]
    fn test_deterministic_for_fixed_seed() {
        let run = || {
            let mut rng = ChaCha8Rng::seed_from_u64(321);
            generate_rock_texture(24, &Palette::rock(), &RockTextureConfig::default(), &mut rng)
                .unwrap()
                .pixels
        };
        assert_eq!(run(), run());
    }

    #[test]
    fn test_multi_color_palette_produces_variation() {
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        let image =
            generate_rock_texture(48, &Palette::rock(), &RockTextureConfig::default(), &mut rng)
                .unwrap();
        let first = image.pixels[0];
        assert!(
            image.pixels.iter().any(|&p| p != first),
            "expected mottling, got a constant image"
        );
        for pixel in &image.pixels {
            assert!(pixel.x.is_finite() && pixel.y.is_finite() && pixel.z.is_finite());
        }
    }
}
