//! Normal-map derivation from a height field via gradient filtering.

use glam::{Vec3, Vec4};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use super::{HeightField, TextureImage};

/// Gradient convolution kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GradientKernel {
    #[default]
    Sobel,
    Scharr,
}

/// Tunables for normal-map derivation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NormalMapConfig {
    pub kernel: GradientKernel,
    /// Scales gradient influence; higher values produce stronger normals.
    pub strength: f32,
    /// Detail level feeding the fixed z term.
    pub level: f32,
}

impl Default for NormalMapConfig {
    fn default() -> Self {
        Self {
            kernel: GradientKernel::default(),
            strength: 2.5,
            level: 7.0,
        }
    }
}

/// Derives a tangent-space normal map from a height field.
///
/// The 8-neighborhood is sampled with toroidal wraparound, horizontal and
/// vertical gradients come from the selected kernel (x positive toward
/// higher ground at lower x, y positive toward higher ground at higher y),
/// and the 3D gradient
/// vector gets a fixed z term of `(1 / strength) * (1 + 2^level)` before
/// normalization. X and Y are remapped from [-1, 1] to [0, 1] for storage;
/// Z is stored as-is. The alpha channel passes the original height through
/// unchanged.
pub fn normal_map_from_height(field: &HeightField, config: &NormalMapConfig) -> TextureImage {
    let size = field.size;
    let dz = (1.0 / config.strength) * (1.0 + 2.0f32.powf(config.level));

    let mut image = TextureImage::filled(size, Vec4::ZERO);
    image
        .pixels
        .par_iter_mut()
        .enumerate()
        .for_each(|(i, pixel)| {
            let x = (i / size) as isize;
            let y = (i % size) as isize;

            let tl = field.get_wrapped(x - 1, y - 1);
            let t = field.get_wrapped(x, y - 1);
            let tr = field.get_wrapped(x + 1, y - 1);
            let l = field.get_wrapped(x - 1, y);
            let r = field.get_wrapped(x + 1, y);
            let bl = field.get_wrapped(x - 1, y + 1);
            let b = field.get_wrapped(x, y + 1);
            let br = field.get_wrapped(x + 1, y + 1);

            let (dx, dy) = match config.kernel {
                GradientKernel::Sobel => (
                    tl + l * 2.0 + bl - tr - r * 2.0 - br,
                    bl + b * 2.0 + br - tl - t * 2.0 - tr,
                ),
                GradientKernel::Scharr => (
                    tl * 3.0 + l * 10.0 + bl * 3.0 - tr * 3.0 - r * 10.0 - br * 3.0,
                    bl * 3.0 + b * 10.0 + br * 3.0 - tl * 3.0 - t * 10.0 - tr * 3.0,
                ),
            };

            let normal = Vec3::new(dx * 255.0, dy * 255.0, dz).normalize_or_zero();
            let height = field.get(x as usize, y as usize);
            *pixel = Vec4::new(
                normal.x * 0.5 + 0.5,
                normal.y * 0.5 + 0.5,
                normal.z,
                height,
            );
        });

    image
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_field_points_straight_up() {
        let field = HeightField::filled(16, 0.5);
        let image = normal_map_from_height(&field, &NormalMapConfig::default());
        for pixel in &image.pixels {
            assert!((pixel.x - 0.5).abs() < 1e-6);
            assert!((pixel.y - 0.5).abs() < 1e-6);
            assert!((pixel.z - 1.0).abs() < 1e-6);
            assert_eq!(pixel.w, 0.5);
        }
    }

    #[test]
    fn test_alpha_passes_height_through() {
        let mut field = HeightField::filled(8, 0.25);
        field.set(3, 4, 0.875);
        let image = normal_map_from_height(&field, &NormalMapConfig::default());
        assert_eq!(image.get(3, 4).w, 0.875);
        assert_eq!(image.get(0, 0).w, 0.25);
    }

    #[test]
    fn test_step_edge_tilts_x_gradient() {
        // Left half low, right half high: the gradient along x dominates.
        let size = 16;
        let mut field = HeightField::filled(size, 0.0);
        for x in size / 2..size {
            for y in 0..size {
                field.set(x, y, 1.0);
            }
        }
        let image = normal_map_from_height(&field, &NormalMapConfig::default());
        // A pixel just left of the edge sees higher ground on the right.
        let pixel = image.get(size / 2 - 1, size / 2);
        assert!(pixel.x < 0.5, "expected negative x component, got {pixel:?}");
    }

    #[test]
    fn test_step_edge_tilts_y_gradient() {
        // Bottom half low, top half high along y: the y gradient dominates
        // and points toward the rising rows.
        let size = 16;
        let mut field = HeightField::filled(size, 0.0);
        for x in 0..size {
            for y in size / 2..size {
                field.set(x, y, 1.0);
            }
        }
        let image = normal_map_from_height(&field, &NormalMapConfig::default());
        // A pixel just before the edge sees higher ground at larger y.
        let pixel = image.get(size / 2, size / 2 - 1);
        assert!(pixel.y > 0.5, "expected positive y component, got {pixel:?}");
    }

    #[test]
    fn test_scharr_differs_from_sobel_on_slopes() {
        let mut field = HeightField::filled(8, 0.0);
        for x in 0..8 {
            for y in 0..8 {
                field.set(x, y, (x as f32 / 8.0 + y as f32 / 16.0).fract());
            }
        }
        let sobel = normal_map_from_height(
            &field,
            &NormalMapConfig {
                kernel: GradientKernel::Sobel,
                ..NormalMapConfig::default()
            },
        );
        let scharr = normal_map_from_height(
            &field,
            &NormalMapConfig {
                kernel: GradientKernel::Scharr,
                ..NormalMapConfig::default()
            },
        );
        assert_ne!(sobel.pixels, scharr.pixels);
    }

    #[test]
    fn test_output_channels_in_range() {
        let mut field = HeightField::filled(12, 0.5);
        field.set(6, 6, 1.0);
        field.set(2, 9, 0.0);
        let image = normal_map_from_height(&field, &NormalMapConfig::default());
        for pixel in &image.pixels {
            assert!((0.0..=1.0).contains(&pixel.x));
            assert!((0.0..=1.0).contains(&pixel.y));
            assert!((0.0..=1.0).contains(&pixel.z));
            assert!((0.0..=1.0).contains(&pixel.w));
        }
    }
}
