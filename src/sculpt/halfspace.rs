//! Corner-shaving half-space cuts.
//!
//! Each pass samples random planes biased toward one octant of the bounding
//! box until exactly one box corner lies behind the candidate, then flattens
//! every vertex behind it by projecting onto the plane. Topology is untouched;
//! only positions move, which is what produces the faceted silhouette.

use glam::{EulerRot, Quat, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::Plane;
use crate::mesh::{Aabb, Mesh, MeshError};

/// Configuration for the half-space sculpting passes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SculptConfig {
    /// Number of cutting passes; each pass targets a different octant.
    pub passes: u32,
    /// Maximum tilt, in degrees, applied around each axis when orienting a
    /// candidate plane.
    pub max_tilt_deg: f32,
}

impl Default for SculptConfig {
    fn default() -> Self {
        Self {
            passes: 8,
            max_tilt_deg: 30.0,
        }
    }
}

/// Axis-aligned sample region for one cutting pass, covering one octant
/// combination of the box halves.
fn octant_region(bounds: &Aabb, pass: u32) -> (Vec3, Vec3) {
    let x_positive = pass % 2 == 0;
    let z_positive = (pass / 2) % 2 == 0;
    let y_positive = pass % 8 < 4;

    let lo = Vec3::new(
        if x_positive { 0.0 } else { bounds.min.x },
        if y_positive { 0.0 } else { bounds.min.y },
        if z_positive { 0.0 } else { bounds.min.z },
    );
    let hi = Vec3::new(
        if x_positive { bounds.max.x } else { 0.0 },
        if y_positive { bounds.max.y } else { 0.0 },
        if z_positive { bounds.max.z } else { 0.0 },
    );
    (lo, hi)
}

/// Counts how many corners of a box lie behind a plane.
pub fn corners_behind_plane(bounds: &Aabb, plane: &Plane) -> u32 {
    bounds
        .corners()
        .iter()
        .filter(|&&corner| plane.distance(corner) < 0.0)
        .count() as u32
}

fn random_in_range<R: Rng>(rng: &mut R, lo: f32, hi: f32) -> f32 {
    if lo < hi {
        rng.random_range(lo..hi)
    } else if hi < lo {
        rng.random_range(hi..lo)
    } else {
        lo
    }
}

/// Samples octant-biased candidate planes until exactly one corner of
/// `bounds` lies behind, which guarantees the cut shaves a bounded corner
/// rather than bisecting or missing the mesh.
pub fn sample_cut_plane<R: Rng>(
    bounds: &Aabb,
    pass: u32,
    max_tilt_deg: f32,
    rng: &mut R,
) -> Plane {
    let (lo, hi) = octant_region(bounds, pass);
    loop {
        let tilt = Quat::from_euler(
            EulerRot::XYZ,
            random_in_range(rng, -max_tilt_deg, max_tilt_deg).to_radians(),
            random_in_range(rng, -max_tilt_deg, max_tilt_deg).to_radians(),
            random_in_range(rng, -max_tilt_deg, max_tilt_deg).to_radians(),
        );
        let point = Vec3::new(
            random_in_range(rng, lo.x, hi.x),
            random_in_range(rng, lo.y, hi.y),
            random_in_range(rng, lo.z, hi.z),
        );
        // Normal faces back toward the box interior so the sampled corner
        // region ends up behind the plane.
        let plane = Plane::from_point_normal(point, -(tilt * point));
        if plane.normal == Vec3::ZERO {
            continue;
        }
        if corners_behind_plane(bounds, &plane) == 1 {
            return plane;
        }
    }
}

/// Projects every vertex behind the plane onto it, flattening the cut region
/// while preserving the index buffer.
pub fn cut_by_plane(mesh: &mut Mesh, plane: &Plane) {
    for vertex in &mut mesh.vertices {
        if plane.distance(vertex.position) < 0.0 {
            vertex.position = plane.project(vertex.position);
        }
    }
}

/// Runs all cutting passes against a mesh and recomputes its normals.
pub fn sculpt<R: Rng>(mesh: &mut Mesh, config: &SculptConfig, rng: &mut R) -> Result<(), MeshError> {
    let bounds = mesh.bounds();
    for pass in 0..config.passes {
        let plane = sample_cut_plane(&bounds, pass, config.max_tilt_deg, rng);
        cut_by_plane(mesh, &plane);
    }
    mesh.recalculate_normals()
}
