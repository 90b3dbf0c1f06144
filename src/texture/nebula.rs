//! Nebula-style alpha sprite synthesis.
//!
//! A soft circular falloff multiplied into a normalized fractal field gives
//! a wispy, centered blob; one sprite is generated per palette color and
//! blended additively by the material host.

use glam::{Vec2, Vec3, Vec4};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{TextureError, TextureImage};
use crate::noise::{fractal_field, normalize_field, FractalNoiseConfig};

/// Tunables for the nebula sprite synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NebulaConfig {
    pub octaves: u8,
    pub frequency: f32,
    /// Exponent applied to the noise field when shaping alpha.
    pub noise_falloff: f32,
    /// Exponent of the radial edge fade.
    pub edge_falloff: f32,
}

impl Default for NebulaConfig {
    fn default() -> Self {
        Self {
            octaves: 8,
            frequency: 0.04,
            noise_falloff: 4.0,
            edge_falloff: 6.0,
        }
    }
}

/// Generates one square RGBA sprite: rgb is the given color, alpha is
/// `noise^noise_falloff * (1 - distance_to_center / size)^edge_falloff`.
pub fn generate_nebula_texture<R: Rng>(
    size: usize,
    color: Vec3,
    config: &NebulaConfig,
    rng: &mut R,
) -> Result<TextureImage, TextureError> {
    if size == 0 {
        return Err(TextureError::ZeroSize);
    }

    let mut field = fractal_field(
        size,
        &FractalNoiseConfig {
            octaves: config.octaves,
            frequency: config.frequency,
            ..FractalNoiseConfig::with_seed(rng.random())
        },
    );
    normalize_field(&mut field);

    let center = Vec2::splat(size as f32 / 2.0);
    let mut image = TextureImage::filled(size, Vec4::ZERO);
    image
        .pixels
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, pixel)| {
            let x = (i / size) as f32;
            let y = (i % size) as f32;
            let dist = (Vec2::new(x, y) - center).length();
            let fade = (1.0 - dist / size as f32).max(0.0).powf(config.edge_falloff);
            let alpha = field[i].powf(config.noise_falloff) * fade;
            *pixel = color.extend(alpha);
        });

    Ok(image)
}
