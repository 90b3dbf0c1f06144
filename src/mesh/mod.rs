//! Mesh data structures shared by the sculpting pipeline.
//!
//! A [`Mesh`] is an indexed triangle list; a [`Model`] groups one or more
//! meshes ("geometries"), each intended for an independent material slot.

mod partition;
mod tangent;
mod unwrap;

pub use partition::{partition_by_plane, MeshPartition};
pub use tangent::generate_tangents;
pub use unwrap::{finish_uvs, UnwrapError, UnwrapOutput, Unwrapper};

use glam::{Vec2, Vec3, Vec4};
use thiserror::Error;

/// Errors produced while building or transforming meshes.
#[derive(Error, Debug)]
pub enum MeshError {
    #[error("cube segment counts must be positive on every axis, got ({0}, {1}, {2})")]
    InvalidSegments(u32, u32, u32),
    #[error("cube size must be positive on every axis, got ({0}, {1}, {2})")]
    InvalidSize(f32, f32, f32),
    #[error("sphere radius must be positive, got {0}")]
    InvalidRadius(f32),
    #[error("sphere needs at least 3 parallels and 3 meridians, got {parallels} and {meridians}")]
    InvalidSphere { parallels: u32, meridians: u32 },
    #[error("mesh needs {vertices} vertices but a {format:?} index buffer addresses at most {max}")]
    IndexOverflow {
        vertices: usize,
        format: IndexFormat,
        max: usize,
    },
    #[error("index buffer length {0} is not a multiple of 3")]
    IndexCountNotTriangles(usize),
}

/// Width of the index buffer elements handed to the renderer.
///
/// Generation fails with [`MeshError::IndexOverflow`] instead of silently
/// wrapping when the vertex count exceeds the chosen width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum IndexFormat {
    /// 16-bit indices, up to 65536 vertices.
    #[default]
    U16,
    /// 32-bit indices.
    U32,
}

impl IndexFormat {
    /// Maximum vertex count addressable by this format; a 16-bit index
    /// reaches 65536 vertices since index 65535 is valid.
    pub fn max_vertices(self) -> usize {
        match self {
            IndexFormat::U16 => u16::MAX as usize + 1,
            IndexFormat::U32 => u32::MAX as usize + 1,
        }
    }
}

/// A single mesh vertex. Normals and tangents are always derived from
/// positions and indices, never authored directly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    /// Tangent xyz plus handedness sign in w, populated by the UV finisher.
    pub tangent: Option<Vec4>,
    pub uv: Option<Vec2>,
}

impl Vertex {
    /// Creates a vertex at a position with a zero normal and no UV/tangent.
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            normal: Vec3::ZERO,
            tangent: None,
            uv: None,
        }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min: Vec3,
    pub max: Vec3,
}

impl Aabb {
    /// An empty box that any merge will overwrite.
    pub fn empty() -> Self {
        Self {
            min: Vec3::splat(f32::MAX),
            max: Vec3::splat(f32::MIN),
        }
    }

    /// Grows the box to contain a point.
    pub fn merge(&mut self, point: Vec3) {
        self.min = self.min.min(point);
        self.max = self.max.max(point);
    }

    /// Computes the box of a set of vertex positions.
    pub fn from_vertices(vertices: &[Vertex]) -> Self {
        let mut aabb = Self::empty();
        for vertex in vertices {
            aabb.merge(vertex.position);
        }
        aabb
    }

    /// The eight corners of the box.
    pub fn corners(&self) -> [Vec3; 8] {
        [
            self.min,
            self.max,
            Vec3::new(self.min.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.min.z),
            Vec3::new(self.max.x, self.max.y, self.min.z),
            Vec3::new(self.max.x, self.min.y, self.max.z),
            Vec3::new(self.min.x, self.max.y, self.max.z),
        ]
    }

    /// Box center.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

/// An indexed triangle mesh.
#[derive(Debug, Clone)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    /// Triangle list; length is always a multiple of 3 and every entry is a
    /// valid vertex index. Stored widened to `u32` regardless of the chosen
    /// [`IndexFormat`].
    pub indices: Vec<u32>,
    /// The index width this mesh was validated against.
    pub index_format: IndexFormat,
}

impl Mesh {
    /// Number of triangles in the index buffer.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Recomputes the bounding box from current vertex positions.
    pub fn bounds(&self) -> Aabb {
        Aabb::from_vertices(&self.vertices)
    }

    /// Recomputes every vertex normal by accumulating the face normal of each
    /// incident triangle and normalizing the sum.
    ///
    /// A vertex whose accumulated sum is degenerate (zero length) keeps a zero
    /// normal; downstream consumers tolerate this.
    pub fn recalculate_normals(&mut self) -> Result<(), MeshError> {
        if self.indices.len() % 3 != 0 {
            return Err(MeshError::IndexCountNotTriangles(self.indices.len()));
        }

        for vertex in &mut self.vertices {
            vertex.normal = Vec3::ZERO;
        }
        for triangle in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [triangle[0] as usize, triangle[1] as usize, triangle[2] as usize];
            let face_normal = (self.vertices[i1].position - self.vertices[i0].position)
                .cross(self.vertices[i2].position - self.vertices[i0].position);
            self.vertices[i0].normal += face_normal;
            self.vertices[i1].normal += face_normal;
            self.vertices[i2].normal += face_normal;
        }
        for vertex in &mut self.vertices {
            vertex.normal = vertex.normal.normalize_or_zero();
        }
        Ok(())
    }

    /// Mean of all vertex positions.
    pub fn centroid(&self) -> Vec3 {
        if self.vertices.is_empty() {
            return Vec3::ZERO;
        }
        let sum: Vec3 = self.vertices.iter().map(|v| v.position).sum();
        sum / self.vertices.len() as f32
    }
}

/// A finished model: one or more geometries, each for an independent material
/// slot, plus the union bounding box of all vertex positions.
#[derive(Debug, Clone)]
pub struct Model {
    pub geometries: Vec<Mesh>,
    pub bounds: Aabb,
}

impl Model {
    /// Wraps geometries and computes the union bounding box.
    pub fn new(geometries: Vec<Mesh>) -> Self {
        let mut bounds = Aabb::empty();
        for mesh in &geometries {
            for vertex in &mesh.vertices {
                bounds.merge(vertex.position);
            }
        }
        Self { geometries, bounds }
    }

    /// Recomputes the bounding box; must be called after any position mutation.
    pub fn recalculate_bounds(&mut self) {
        let mut bounds = Aabb::empty();
        for mesh in &self.geometries {
            for vertex in &mesh.vertices {
                bounds.merge(vertex.position);
            }
        }
        self.bounds = bounds;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_triangle() -> Mesh {
        Mesh {
            vertices: vec![
                Vertex::at(Vec3::ZERO),
                Vertex::at(Vec3::X),
                Vertex::at(Vec3::Y),
            ],
            indices: vec![0, 1, 2],
            index_format: IndexFormat::U16,
        }
    }

    #[test]
    fn test_aabb_merge() {
        let mut aabb = Aabb::empty();
        aabb.merge(Vec3::new(-1.0, 2.0, 0.5));
        aabb.merge(Vec3::new(3.0, -2.0, 0.0));
        assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, 0.0));
        assert_eq!(aabb.max, Vec3::new(3.0, 2.0, 0.5));
    }

    #[test]
    fn test_aabb_corners_cover_extremes() {
        let aabb = Aabb {
            min: Vec3::splat(-1.0),
            max: Vec3::splat(1.0),
        };
        let corners = aabb.corners();
        assert_eq!(corners.len(), 8);
        // Every corner coordinate is either min or max.
        for corner in corners {
            for axis in 0..3 {
                let c = corner[axis];
                assert!(c == -1.0 || c == 1.0);
            }
        }
        // All eight corners are distinct.
        for i in 0..8 {
            for j in (i + 1)..8 {
                assert_ne!(corners[i], corners[j]);
            }
        }
    }

    #[test]
    fn test_recalculate_normals_planar() {
        let mut mesh = unit_triangle();
        mesh.recalculate_normals().unwrap();
        for vertex in &mesh.vertices {
            assert!((vertex.normal - Vec3::Z).length() < 1e-6);
        }
    }

    #[test]
    fn test_recalculate_normals_degenerate_is_zero() {
        // A zero-area triangle accumulates a zero-length sum.
        let mut mesh = Mesh {
            vertices: vec![
                Vertex::at(Vec3::ZERO),
                Vertex::at(Vec3::ZERO),
                Vertex::at(Vec3::ZERO),
            ],
            indices: vec![0, 1, 2],
            index_format: IndexFormat::U16,
        };
        mesh.recalculate_normals().unwrap();
        for vertex in &mesh.vertices {
            assert_eq!(vertex.normal, Vec3::ZERO);
        }
    }

    #[test]
    fn test_recalculate_normals_rejects_partial_triangles() {
        let mut mesh = unit_triangle();
        mesh.indices.push(0);
        assert!(matches!(
            mesh.recalculate_normals(),
            Err(MeshError::IndexCountNotTriangles(4))
        ));
    }

    #[test]
    fn test_model_bounds_union() {
        let mut a = unit_triangle();
        a.vertices[1].position = Vec3::new(5.0, 0.0, 0.0);
        let b = unit_triangle();
        let model = Model::new(vec![a, b]);
        assert_eq!(model.bounds.max.x, 5.0);
        assert_eq!(model.bounds.min, Vec3::ZERO);
    }

    #[test]
    fn test_index_format_limits() {
        // Index 65535 is valid, so a u16 buffer addresses 65536 vertices.
        assert_eq!(IndexFormat::U16.max_vertices(), 65536);
        assert!(IndexFormat::U32.max_vertices() > IndexFormat::U16.max_vertices());
    }
}
