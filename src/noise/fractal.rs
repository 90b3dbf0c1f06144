//! Fractal (multi-octave gradient) noise sampling.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use simdnoise::NoiseBuilder;

/// Configuration for fractal gradient noise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FractalNoiseConfig {
    /// Number of octaves layered together.
    pub octaves: u8,
    /// Base frequency.
    pub frequency: f32,
    /// Frequency multiplier per octave.
    pub lacunarity: f32,
    /// Amplitude decay per octave.
    pub gain: f32,
    /// Seed for deterministic replay.
    pub seed: i32,
}

impl Default for FractalNoiseConfig {
    fn default() -> Self {
        Self {
            octaves: 8,
            frequency: 0.08,
            lacunarity: 2.0,
            gain: 0.5,
            seed: 0,
        }
    }
}

impl FractalNoiseConfig {
    /// Creates a configuration with the given seed and default shape.
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// Samples fractal noise at a single 3D position.
pub fn sample_fractal_3d(pos: Vec3, config: &FractalNoiseConfig) -> f32 {
    NoiseBuilder::fbm_3d_offset(pos.x, 1, pos.y, 1, pos.z, 1)
        .with_seed(config.seed)
        .with_freq(config.frequency)
        .with_octaves(config.octaves)
        .with_lacunarity(config.lacunarity)
        .with_gain(config.gain)
        .generate()
        .0[0]
}

/// Generates a `size * size` fractal noise field, flat with index
/// `x * size + y`.
pub fn fractal_field(size: usize, config: &FractalNoiseConfig) -> Vec<f32> {
    NoiseBuilder::fbm_2d(size, size)
        .with_seed(config.seed)
        .with_freq(config.frequency)
        .with_octaves(config.octaves)
        .with_lacunarity(config.lacunarity)
        .with_gain(config.gain)
        .generate()
        .0
}
