//! UV-sphere builder with no duplicated vertices.
//!
//! One pole vertex at each end, `parallels - 1` rings of `meridians` vertices
//! between them; triangle fans at the poles and quad strips between interior
//! rings, closed around the seam.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use crate::mesh::{IndexFormat, Mesh, MeshError, Vertex};

/// Closed-form vertex count for a sphere grid.
/// Returns 0 for grids the builder rejects.
pub fn sphere_vertex_count(parallels: u32, meridians: u32) -> usize {
    if parallels < 3 || meridians < 3 {
        return 0;
    }
    2 + (parallels as usize - 1) * meridians as usize
}

/// Closed-form index count for a sphere grid.
/// Returns 0 for grids the builder rejects.
pub fn sphere_index_count(parallels: u32, meridians: u32) -> usize {
    if parallels < 3 || meridians < 3 {
        return 0;
    }
    let (p, m) = (parallels as usize, meridians as usize);
    2 * m * 3 + (p - 2) * m * 6
}

/// Builds a sphere grid centered at the origin. All faces wind outward.
/// Normals are left zeroed; callers run [`Mesh::recalculate_normals`] once
/// the shape is final.
pub fn build_sphere(
    radius: f32,
    parallels: u32,
    meridians: u32,
    index_format: IndexFormat,
) -> Result<Mesh, MeshError> {
    if radius <= 0.0 {
        return Err(MeshError::InvalidRadius(radius));
    }
    if parallels < 3 || meridians < 3 {
        return Err(MeshError::InvalidSphere {
            parallels,
            meridians,
        });
    }

    let num_vertices = sphere_vertex_count(parallels, meridians);
    let num_indices = sphere_index_count(parallels, meridians);
    if num_vertices > index_format.max_vertices() {
        return Err(MeshError::IndexOverflow {
            vertices: num_vertices,
            format: index_format,
            max: index_format.max_vertices(),
        });
    }

    let mut vertices = Vec::with_capacity(num_vertices);
    let mut indices = Vec::with_capacity(num_indices);

    vertices.push(Vertex::at(Vec3::new(0.0, radius, 0.0)));
    for j in 0..parallels - 1 {
        let polar = PI * (j + 1) as f32 / parallels as f32;
        let (sp, cp) = polar.sin_cos();
        for i in 0..meridians {
            let azimuth = TAU * i as f32 / meridians as f32;
            let (sa, ca) = azimuth.sin_cos();
            vertices.push(Vertex::at(Vec3::new(
                sp * ca * radius,
                cp * radius,
                sp * sa * radius,
            )));
        }
    }
    vertices.push(Vertex::at(Vec3::new(0.0, -radius, 0.0)));

    // North fan.
    for i in 0..meridians {
        let a = i + 1;
        let b = (i + 1) % meridians + 1;
        indices.extend_from_slice(&[0, b, a]);
    }
    // Quad strips between interior rings, wrapping at the seam.
    for j in 0..parallels - 2 {
        let a_start = j * meridians + 1;
        let b_start = (j + 1) * meridians + 1;
        for i in 0..meridians {
            let a = a_start + i;
            let a1 = a_start + (i + 1) % meridians;
            let b = b_start + i;
            let b1 = b_start + (i + 1) % meridians;
            indices.extend_from_slice(&[a, a1, b1, a, b1, b]);
        }
    }
    // South fan.
    let south = vertices.len() as u32 - 1;
    for i in 0..meridians {
        let a = i + meridians * (parallels - 2) + 1;
        let b = (i + 1) % meridians + meridians * (parallels - 2) + 1;
        indices.extend_from_slice(&[south, a, b]);
    }

    assert_eq!(
        vertices.len(),
        num_vertices,
        "sphere vertex count disagrees with closed form"
    );
    assert_eq!(
        indices.len(),
        num_indices,
        "sphere index count disagrees with closed form"
    );

    Ok(Mesh {
        vertices,
        indices,
        index_format,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counts_match_closed_form() {
        for (parallels, meridians) in [(3, 3), (4, 8), (10, 20), (17, 5)] {
            let mesh = build_sphere(1.0, parallels, meridians, IndexFormat::U16).unwrap();
            assert_eq!(mesh.vertices.len(), sphere_vertex_count(parallels, meridians));
            assert_eq!(mesh.indices.len(), sphere_index_count(parallels, meridians));
        }
    }

    #[test]
    fn test_all_indices_in_range() {
        let mesh = build_sphere(0.5, 10, 20, IndexFormat::U16).unwrap();
        assert_eq!(mesh.indices.len() % 3, 0);
        for &index in &mesh.indices {
            assert!((index as usize) < mesh.vertices.len());
        }
    }

    #[test]
    fn test_vertices_lie_on_sphere() {
        let radius = 2.5;
        let mesh = build_sphere(radius, 8, 12, IndexFormat::U16).unwrap();
        for vertex in &mesh.vertices {
            assert!((vertex.position.length() - radius).abs() < 1e-5);
        }
    }

    #[test]
    fn test_faces_wind_outward() {
        let mut mesh = build_sphere(1.0, 8, 16, IndexFormat::U16).unwrap();
        mesh.recalculate_normals().unwrap();
        for vertex in &mesh.vertices {
            assert!(vertex.normal.dot(vertex.position) > 0.0);
        }
    }

    #[test]
    fn test_undersized_grid_counts_are_zero() {
        // Degenerate inputs must not wrap below zero in the closed forms.
        assert_eq!(sphere_vertex_count(0, 0), 0);
        assert_eq!(sphere_vertex_count(2, 8), 0);
        assert_eq!(sphere_index_count(0, 0), 0);
        assert_eq!(sphere_index_count(8, 2), 0);
    }

    #[test]
    fn test_minimum_grid_enforced() {
        assert!(matches!(
            build_sphere(1.0, 2, 8, IndexFormat::U16),
            Err(MeshError::InvalidSphere { .. })
        ));
        assert!(matches!(
            build_sphere(1.0, 8, 2, IndexFormat::U16),
            Err(MeshError::InvalidSphere { .. })
        ));
        assert!(matches!(
            build_sphere(0.0, 8, 8, IndexFormat::U16),
            Err(MeshError::InvalidRadius(_))
        ));
    }

    #[test]
    fn test_u16_overflow_fails_loudly() {
        let result = build_sphere(1.0, 300, 300, IndexFormat::U16);
        assert!(matches!(result, Err(MeshError::IndexOverflow { .. })));
        assert!(build_sphere(1.0, 300, 300, IndexFormat::U32).is_ok());
    }
}
