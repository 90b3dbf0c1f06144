//! Cellular (distance-to-feature-point) noise sampling.

use glam::Vec3;
use serde::{Deserialize, Serialize};
use simdnoise::{Cell2ReturnType, CellDistanceFunction, CellReturnType, NoiseBuilder};

/// Configuration for cellular distance noise.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellularNoiseConfig {
    /// Feature-point frequency.
    pub frequency: f32,
    /// Feature-point placement jitter in [0, 1].
    pub jitter: f32,
    /// Seed for deterministic replay.
    pub seed: i32,
}

impl Default for CellularNoiseConfig {
    fn default() -> Self {
        Self {
            frequency: 0.1,
            jitter: 0.45,
            seed: 0,
        }
    }
}

impl CellularNoiseConfig {
    /// Creates a configuration with the given seed and default shape.
    pub fn with_seed(seed: i32) -> Self {
        Self {
            seed,
            ..Default::default()
        }
    }
}

/// Samples distance-to-nearest-feature cellular noise at a 3D position.
pub fn sample_cellular_distance_3d(pos: Vec3, config: &CellularNoiseConfig) -> f32 {
    NoiseBuilder::cellular_3d_offset(pos.x, 1, pos.y, 1, pos.z, 1)
        .with_seed(config.seed)
        .with_freq(config.frequency)
        .with_jitter(config.jitter)
        .with_distance_function(CellDistanceFunction::Euclidean)
        .with_return_type(CellReturnType::Distance)
        .generate()
        .0[0]
}

/// Generates a `size * size` field of second-minus-first feature distances,
/// the variant that produces the vein-like cell boundaries used by the rock
/// texture layers. Flat with index `x * size + y`.
pub fn cellular_edge_field(size: usize, config: &CellularNoiseConfig) -> Vec<f32> {
    NoiseBuilder::cellular2_2d(size, size)
        .with_seed(config.seed)
        .with_freq(config.frequency)
        .with_jitter(config.jitter)
        .with_distance_function(CellDistanceFunction::Euclidean)
        .with_return_type(Cell2ReturnType::Distance2Sub)
        .generate()
        .0
}
