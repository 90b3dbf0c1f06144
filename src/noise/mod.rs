//! Deterministic coherent-noise provider.
//!
//! Thin wrappers over `simdnoise` builders: fractal gradient noise, cellular
//! distance noise, and seeded white noise, each reproducible for a fixed seed.

mod cellular;
mod fractal;

pub use cellular::{cellular_edge_field, sample_cellular_distance_3d, CellularNoiseConfig};
pub use fractal::{fractal_field, sample_fractal_3d, FractalNoiseConfig};

use rand::Rng;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// Generates a `size * size` field of uncorrelated uniform samples in [0, 1).
pub fn white_field(size: usize, seed: u64) -> Vec<f32> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    (0..size * size).map(|_| rng.random::<f32>()).collect()
}

/// Min/max-normalizes a field into [0, 1] in place.
///
/// A constant field (max == min) has no meaningful normalization; it degrades
/// to all zeros rather than dividing by zero and spreading NaN downstream.
pub fn normalize_field(field: &mut [f32]) {
    let Some(&first) = field.first() else {
        return;
    };
    let mut min = first;
    let mut max = first;
    for &value in field.iter() {
        min = min.min(value);
        max = max.max(value);
    }
    if max > min {
        let span = max - min;
        for value in field.iter_mut() {
            *value = (*value - min) / span;
        }
    } else {
        field.fill(0.0);
    }
}
