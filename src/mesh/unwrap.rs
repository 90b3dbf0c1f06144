//! UV finishing through an external automatic unwrapper.
//!
//! The unwrapper is a black box: it consumes flat positions and triangle
//! indices and returns re-indexed positions with generated 2D coordinates.
//! Original vertex identity is lost, so attributes other than position must
//! be recovered afterwards.

use glam::{Vec2, Vec3};
use thiserror::Error;

use crate::mesh::{generate_tangents, Mesh, MeshError, Vertex};

/// Errors from the unwrap service or from applying its output.
#[derive(Error, Debug)]
pub enum UnwrapError {
    #[error("unwrapper returned {positions} positions but {uvs} UVs")]
    MismatchedOutput { positions: usize, uvs: usize },
    #[error("unwrapper returned index {index} for {vertices} vertices")]
    IndexOutOfRange { index: u32, vertices: usize },
    #[error("unwrap service failed: {0}")]
    Service(String),
    #[error(transparent)]
    Mesh(#[from] MeshError),
}

/// Output of an automatic unwrap: a fresh vertex list (deduplicated or
/// re-split as the unwrapper saw fit) with generated UVs, plus an index
/// buffer over it.
#[derive(Debug, Clone)]
pub struct UnwrapOutput {
    pub positions: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
    pub indices: Vec<u32>,
}

/// External automatic UV-unwrapping service.
pub trait Unwrapper {
    fn unwrap(&self, positions: &[Vec3], indices: &[u32]) -> Result<UnwrapOutput, UnwrapError>;
}

/// Runs the external unwrapper over a mesh and finishes the result: normals
/// are recovered from the input mesh and a tangent basis is computed.
///
/// The unwrapper does not preserve normals, so each output vertex's position
/// is matched against the input vertices (exact equality, first match wins)
/// and the matching normal copied over. An output vertex with no exact match
/// silently keeps a zero normal; the match is numerical equality with no
/// epsilon, which is fragile if the unwrapper re-quantizes positions. That
/// gap is inherited behavior and deliberately not papered over here.
pub fn finish_uvs(mesh: &Mesh, unwrapper: &dyn Unwrapper) -> Result<Mesh, UnwrapError> {
    if mesh.indices.len() % 3 != 0 {
        return Err(MeshError::IndexCountNotTriangles(mesh.indices.len()).into());
    }

    let positions: Vec<Vec3> = mesh.vertices.iter().map(|v| v.position).collect();
    let output = unwrapper.unwrap(&positions, &mesh.indices)?;

    if output.positions.len() != output.uvs.len() {
        return Err(UnwrapError::MismatchedOutput {
            positions: output.positions.len(),
            uvs: output.uvs.len(),
        });
    }
    if output.indices.len() % 3 != 0 {
        return Err(MeshError::IndexCountNotTriangles(output.indices.len()).into());
    }
    for &index in &output.indices {
        if index as usize >= output.positions.len() {
            return Err(UnwrapError::IndexOutOfRange {
                index,
                vertices: output.positions.len(),
            });
        }
    }
    if output.positions.len() > mesh.index_format.max_vertices() {
        return Err(MeshError::IndexOverflow {
            vertices: output.positions.len(),
            format: mesh.index_format,
            max: mesh.index_format.max_vertices(),
        }
        .into());
    }

    let mut vertices: Vec<Vertex> = output
        .positions
        .iter()
        .zip(&output.uvs)
        .map(|(&position, &uv)| {
            let normal = mesh
                .vertices
                .iter()
                .find(|v| v.position == position)
                .map(|v| v.normal)
                .unwrap_or(Vec3::ZERO);
            Vertex {
                position,
                normal,
                tangent: None,
                uv: Some(uv),
            }
        })
        .collect();

    generate_tangents(&mut vertices, &output.indices)?;

    Ok(Mesh {
        vertices,
        indices: output.indices,
        index_format: mesh.index_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::IndexFormat;

    /// Minimal stand-in for the external service: re-splits the mesh into a
    /// triangle soup and projects positions onto XY for UVs.
    struct SoupUnwrapper;

    impl Unwrapper for SoupUnwrapper {
        fn unwrap(&self, positions: &[Vec3], indices: &[u32]) -> Result<UnwrapOutput, UnwrapError> {
            let mut out_positions = Vec::new();
            let mut out_uvs = Vec::new();
            let mut out_indices = Vec::new();
            for &index in indices {
                let p = positions[index as usize];
                out_indices.push(out_positions.len() as u32);
                out_positions.push(p);
                out_uvs.push(Vec2::new(p.x, p.y));
            }
            Ok(UnwrapOutput {
                positions: out_positions,
                uvs: out_uvs,
                indices: out_indices,
            })
        }
    }

    fn quad_mesh() -> Mesh {
        let mut mesh = Mesh {
            vertices: vec![
                Vertex::at(Vec3::new(0.0, 0.0, 0.0)),
                Vertex::at(Vec3::new(1.0, 0.0, 0.0)),
                Vertex::at(Vec3::new(1.0, 1.0, 0.0)),
                Vertex::at(Vec3::new(0.0, 1.0, 0.0)),
            ],
            indices: vec![0, 1, 2, 0, 2, 3],
            index_format: IndexFormat::U16,
        };
        mesh.recalculate_normals().unwrap();
        mesh
    }

    #[test]
    fn test_normals_recovered_by_position_match() {
        let mesh = quad_mesh();
        let finished = finish_uvs(&mesh, &SoupUnwrapper).unwrap();
        assert_eq!(finished.vertices.len(), 6);
        for vertex in &finished.vertices {
            assert!((vertex.normal - Vec3::Z).length() < 1e-6);
            assert!(vertex.uv.is_some());
            assert!(vertex.tangent.is_some());
        }
    }

    #[test]
    fn test_unmatched_position_degrades_to_zero_normal() {
        struct ShiftingUnwrapper;
        impl Unwrapper for ShiftingUnwrapper {
            fn unwrap(
                &self,
                positions: &[Vec3],
                indices: &[u32],
            ) -> Result<UnwrapOutput, UnwrapError> {
                let mut output = SoupUnwrapper.unwrap(positions, indices)?;
                // Simulate re-quantization by the external service.
                for p in &mut output.positions {
                    *p += Vec3::splat(1e-3);
                }
                Ok(output)
            }
        }
        let finished = finish_uvs(&quad_mesh(), &ShiftingUnwrapper).unwrap();
        for vertex in &finished.vertices {
            assert_eq!(vertex.normal, Vec3::ZERO);
        }
    }

    #[test]
    fn test_mismatched_output_rejected() {
        struct BadUnwrapper;
        impl Unwrapper for BadUnwrapper {
            fn unwrap(
                &self,
                positions: &[Vec3],
                indices: &[u32],
            ) -> Result<UnwrapOutput, UnwrapError> {
                let mut output = SoupUnwrapper.unwrap(positions, indices)?;
                output.uvs.pop();
                Ok(output)
            }
        }
        assert!(matches!(
            finish_uvs(&quad_mesh(), &BadUnwrapper),
            Err(UnwrapError::MismatchedOutput { .. })
        ));
    }

    #[test]
    fn test_out_of_range_index_rejected() {
        struct WildIndexUnwrapper;
        impl Unwrapper for WildIndexUnwrapper {
            fn unwrap(
                &self,
                positions: &[Vec3],
                indices: &[u32],
            ) -> Result<UnwrapOutput, UnwrapError> {
                let mut output = SoupUnwrapper.unwrap(positions, indices)?;
                output.indices[0] = output.positions.len() as u32;
                Ok(output)
            }
        }
        assert!(matches!(
            finish_uvs(&quad_mesh(), &WildIndexUnwrapper),
            Err(UnwrapError::IndexOutOfRange { .. })
        ));
    }
}
