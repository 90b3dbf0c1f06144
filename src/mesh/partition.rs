//! Plane-based triangle partitioning for multi-material draw ranges.

use crate::mesh::{Mesh, MeshError};
use crate::sculpt::Plane;

/// Two disjoint triangle index groups over one shared vertex buffer.
#[derive(Debug, Clone)]
pub struct MeshPartition {
    /// Triangles whose three vertices are all behind the plane.
    pub behind: Vec<u32>,
    /// Every other triangle.
    pub ahead: Vec<u32>,
}

/// Splits a mesh's triangles into two groups by a plane test.
///
/// A triangle joins the "behind" group only when all three of its vertices
/// are behind the plane; a triangle with one or two vertices behind still
/// goes to the "ahead" group. The tie-break is asymmetric and deliberate,
/// so callers can rely on the behind group being unanimous. No vertices are
/// duplicated; both groups index the same vertex buffer, and seam splitting
/// is left to the UV step.
pub fn partition_by_plane(mesh: &Mesh, plane: &Plane) -> Result<MeshPartition, MeshError> {
    if mesh.indices.len() % 3 != 0 {
        return Err(MeshError::IndexCountNotTriangles(mesh.indices.len()));
    }

    let mut behind = Vec::new();
    let mut ahead = Vec::new();
    for triangle in mesh.indices.chunks_exact(3) {
        let behind_count = triangle
            .iter()
            .filter(|&&i| plane.distance(mesh.vertices[i as usize].position) < 0.0)
            .count();
        if behind_count > 2 {
            behind.extend_from_slice(triangle);
        } else {
            ahead.extend_from_slice(triangle);
        }
    }

    Ok(MeshPartition { behind, ahead })
}
