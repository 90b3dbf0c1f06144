//! Per-vertex tangent-space basis computation (Lengyel's method).

use glam::{Vec3, Vec4};

use crate::mesh::{MeshError, Vertex};

/// Computes a tangent (xyz) and handedness sign (w) for every vertex.
///
/// Per triangle, the position and UV deltas form a 2x2 linear system whose
/// solution gives the triangle's tangent and bitangent directions; these are
/// accumulated per vertex, then each accumulated tangent is Gram-Schmidt
/// orthogonalized against the finalized normal. Handedness is the sign of
/// the triple product of normal, tangent, and accumulated bitangent.
///
/// Triangles with near-zero parametric area (degenerate UVs, including
/// vertices that never received a UV) would divide by near-zero in the solve
/// and are skipped instead.
pub fn generate_tangents(vertices: &mut [Vertex], indices: &[u32]) -> Result<(), MeshError> {
    if indices.len() % 3 != 0 {
        return Err(MeshError::IndexCountNotTriangles(indices.len()));
    }

    let mut tan_accum = vec![Vec3::ZERO; vertices.len()];
    let mut bitan_accum = vec![Vec3::ZERO; vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let [i0, i1, i2] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
        let p0 = vertices[i0].position;
        let p1 = vertices[i1].position;
        let p2 = vertices[i2].position;
        let uv0 = vertices[i0].uv.unwrap_or_default();
        let uv1 = vertices[i1].uv.unwrap_or_default();
        let uv2 = vertices[i2].uv.unwrap_or_default();

        let e1 = p1 - p0;
        let e2 = p2 - p0;
        let duv1 = uv1 - uv0;
        let duv2 = uv2 - uv0;

        let det = duv1.x * duv2.y - duv2.x * duv1.y;
        if det.abs() < 1e-8 {
            // Zero parametric area; nothing meaningful to accumulate.
            continue;
        }
        let r = 1.0 / det;
        let tangent = (e1 * duv2.y - e2 * duv1.y) * r;
        let bitangent = (e2 * duv1.x - e1 * duv2.x) * r;

        for &i in &[i0, i1, i2] {
            tan_accum[i] += tangent;
            bitan_accum[i] += bitangent;
        }
    }

    for (i, vertex) in vertices.iter_mut().enumerate() {
        let n = vertex.normal;
        let t = tan_accum[i];
        let orthogonal = (t - n * n.dot(t)).normalize_or_zero();
        let handedness = if n.cross(t).dot(bitan_accum[i]) < 0.0 {
            -1.0
        } else {
            1.0
        };
        vertex.tangent = Some(Vec4::new(
            orthogonal.x,
            orthogonal.y,
            orthogonal.z,
            handedness,
        ));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;

    fn quad(uvs: [Vec2; 4]) -> (Vec<Vertex>, Vec<u32>) {
        let positions = [
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(1.0, 1.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
        ];
        let vertices = positions
            .iter()
            .zip(uvs)
            .map(|(&position, uv)| Vertex {
                position,
                normal: Vec3::Z,
                tangent: None,
                uv: Some(uv),
            })
            .collect();
        (vertices, vec![0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn test_planar_quad_tangent_follows_u_axis() {
        let (mut vertices, indices) = quad([
            Vec2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(0.0, 1.0),
        ]);
        generate_tangents(&mut vertices, &indices).unwrap();
        for vertex in &vertices {
            let tangent = vertex.tangent.unwrap();
            assert!((tangent.truncate() - Vec3::X).length() < 1e-5);
            assert_eq!(tangent.w, 1.0);
        }
    }

    #[test]
    fn test_mirrored_v_flips_handedness() {
        let (mut vertices, indices) = quad([
            Vec2::new(0.0, 1.0),
            Vec2::new(1.0, 1.0),
            Vec2::new(1.0, 0.0),
            Vec2::new(0.0, 0.0),
        ]);
        generate_tangents(&mut vertices, &indices).unwrap();
        for vertex in &vertices {
            let tangent = vertex.tangent.unwrap();
            assert!((tangent.truncate() - Vec3::X).length() < 1e-5);
            assert_eq!(tangent.w, -1.0);
        }
    }

    #[test]
    fn test_degenerate_uvs_are_skipped() {
        // All four vertices share one UV; every triangle has zero parametric
        // area, so accumulation is skipped and tangents degrade to zero.
        let (mut vertices, indices) = quad([Vec2::splat(0.5); 4]);
        generate_tangents(&mut vertices, &indices).unwrap();
        for vertex in &vertices {
            let tangent = vertex.tangent.unwrap();
            assert!(!tangent.x.is_nan() && !tangent.y.is_nan() && !tangent.z.is_nan());
            assert_eq!(tangent.truncate(), Vec3::ZERO);
        }
    }

    #[test]
    fn test_partial_triangle_rejected() {
        let (mut vertices, _) = quad([Vec2::ZERO; 4]);
        assert!(matches!(
            generate_tangents(&mut vertices, &[0, 1]),
            Err(MeshError::IndexCountNotTriangles(2))
        ));
    }
}
