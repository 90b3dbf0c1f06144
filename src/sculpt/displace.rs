//! Coherent-noise vertex displacement along normals.
//!
//! The final shape-determining step: positions are scaled into noise space,
//! a scalar sample is taken per vertex, and the vertex moves along its
//! (already recomputed) normal. Normals and the bounding box must be
//! recomputed afterwards; [`displace`] takes care of the normals.

use serde::{Deserialize, Serialize};

use crate::mesh::{Mesh, MeshError};
use crate::noise::{
    normalize_field, sample_cellular_distance_3d, sample_fractal_3d, CellularNoiseConfig,
    FractalNoiseConfig,
};

/// Which noise field drives the displacement and how its output is scaled.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DisplacementPolicy {
    /// Raw cellular distance noise divided by a fixed constant, applied
    /// unconditionally. Produces sharp, pitted relief.
    Cellular {
        noise: CellularNoiseConfig,
        /// Position multiplier mapping mesh space into noise space.
        noise_scale: f32,
        /// Fixed divisor applied to the raw sample.
        divisor: f32,
    },
    /// Fractal noise min/max-normalized across the whole vertex set into
    /// [-0.5, 0.5], then scaled. Bounded displacement regardless of the raw
    /// noise range.
    FractalNormalized {
        noise: FractalNoiseConfig,
        /// Position multiplier mapping mesh space into noise space.
        noise_scale: f32,
        /// Scale applied to the normalized sample.
        factor: f32,
    },
}

impl DisplacementPolicy {
    /// Cellular policy with the stock asteroid parameters.
    pub fn cellular(seed: i32) -> Self {
        DisplacementPolicy::Cellular {
            noise: CellularNoiseConfig {
                frequency: 0.02,
                ..CellularNoiseConfig::with_seed(seed)
            },
            noise_scale: 200.0,
            divisor: 4.0,
        }
    }

    /// Normalized fractal policy with the stock asteroid parameters.
    pub fn fractal(seed: i32) -> Self {
        DisplacementPolicy::FractalNormalized {
            noise: FractalNoiseConfig {
                frequency: 0.02,
                ..FractalNoiseConfig::with_seed(seed)
            },
            noise_scale: 150.0,
            factor: 0.2,
        }
    }
}

/// Shifts a field sampled per vertex into the [-0.5, 0.5] band.
///
/// A constant field normalizes to all zeros, so the degenerate case displaces
/// nothing instead of producing NaN.
pub fn normalize_displacements(samples: &mut [f32]) {
    normalize_field(samples);
    for sample in samples.iter_mut() {
        *sample -= 0.5;
    }
    // The zero-range fallback leaves every sample at -0.5; recentre it.
    if samples.iter().all(|&s| s == -0.5) {
        samples.fill(0.0);
    }
}

/// Displaces every vertex along its normal and recomputes normals.
pub fn displace(mesh: &mut Mesh, policy: &DisplacementPolicy) -> Result<(), MeshError> {
    match policy {
        DisplacementPolicy::Cellular {
            noise,
            noise_scale,
            divisor,
        } => {
            for vertex in &mut mesh.vertices {
                let p = vertex.position * *noise_scale;
                let amount = sample_cellular_distance_3d(p, noise) / divisor;
                vertex.position += amount * vertex.normal;
            }
        }
        DisplacementPolicy::FractalNormalized {
            noise,
            noise_scale,
            factor,
        } => {
            let mut samples: Vec<f32> = mesh
                .vertices
                .iter()
                .map(|v| sample_fractal_3d(v.position * *noise_scale, noise))
                .collect();
            normalize_displacements(&mut samples);
            for (vertex, sample) in mesh.vertices.iter_mut().zip(&samples) {
                vertex.position += sample * factor * vertex.normal;
            }
        }
    }
    mesh.recalculate_normals()
}
