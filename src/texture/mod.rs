//! Procedural texture synthesis: rock diffuse maps, crater height fields,
//! derived normal maps, and nebula-style alpha sprites.

mod crater;
mod nebula;
mod normal_map;
mod rock;

pub use crater::{generate_crater_field, CraterConfig};
pub use nebula::{generate_nebula_texture, NebulaConfig};
pub use normal_map::{normal_map_from_height, GradientKernel, NormalMapConfig};
pub use rock::{generate_rock_texture, RockTextureConfig};

use glam::{Vec3, Vec4};
use thiserror::Error;

/// Errors produced by the texture synthesizers.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("texture size must be positive")]
    ZeroSize,
    #[error("palette needs at least one color")]
    EmptyPalette,
    #[error("crater radius range {min}..={max} is invalid")]
    InvalidRadiusRange { min: f32, max: f32 },
    #[error("minimum crater radius {radius} cannot fit a {size}x{size} field")]
    CraterTooLarge { radius: f32, size: usize },
}

/// Ordered color list; the first entry is the base/background layer.
#[derive(Debug, Clone)]
pub struct Palette(pub Vec<Vec3>);

impl Palette {
    /// A muted gray-brown rock palette.
    pub fn rock() -> Self {
        Self(vec![
            Vec3::new(0.42, 0.38, 0.34),
            Vec3::new(0.55, 0.50, 0.44),
            Vec3::new(0.30, 0.28, 0.26),
            Vec3::new(0.62, 0.58, 0.52),
        ])
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// A square RGBA image with float channels in [0, 1], stored flat with index
/// `x * size + y`.
#[derive(Debug, Clone)]
pub struct TextureImage {
    pub size: usize,
    pub pixels: Vec<Vec4>,
}

impl TextureImage {
    /// Creates an image filled with one color.
    pub fn filled(size: usize, fill: Vec4) -> Self {
        Self {
            size,
            pixels: vec![fill; size * size],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> Vec4 {
        self.pixels[x * self.size + y]
    }

    pub fn set(&mut self, x: usize, y: usize, pixel: Vec4) {
        self.pixels[x * self.size + y] = pixel;
    }
}

/// A square scalar grid in [0, 1] with toroidal boundary sampling, stored
/// flat with index `x * size + y`.
#[derive(Debug, Clone)]
pub struct HeightField {
    pub size: usize,
    pub values: Vec<f32>,
}

impl HeightField {
    /// Creates a field filled with one value.
    pub fn filled(size: usize, fill: f32) -> Self {
        Self {
            size,
            values: vec![fill; size * size],
        }
    }

    pub fn get(&self, x: usize, y: usize) -> f32 {
        self.values[x * self.size + y]
    }

    pub fn set(&mut self, x: usize, y: usize, value: f32) {
        self.values[x * self.size + y] = value;
    }

    /// Samples with wrap-around at the boundaries.
    pub fn get_wrapped(&self, x: isize, y: isize) -> f32 {
        let size = self.size as isize;
        let x = x.rem_euclid(size) as usize;
        let y = y.rem_euclid(size) as usize;
        self.values[x * self.size + y]
    }
}
