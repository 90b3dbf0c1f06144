//! Segmented cube builder with no duplicated vertices at shared edges.
//!
//! The cube is built as six logical layers along Y: a bottom cap grid,
//! `segments.y - 1` perimeter rings, and a top cap grid. Adjacent layers are
//! stitched into quads through a [`RingIndexer`], which maps a logical
//! position along the layer perimeter to a vertex index in closed form.

use glam::Vec3;

use crate::mesh::{IndexFormat, Mesh, MeshError, Vertex};

/// Maps a perimeter position of one cube layer to its vertex index.
///
/// Caps store a full `(sx + 1) * (sz + 1)` grid, so walking their perimeter
/// requires stride arithmetic; bands store only the perimeter loop, laid out
/// in walk order. Positions wrap at the perimeter length, closing the loop.
#[derive(Debug, Clone, Copy)]
enum RingIndexer {
    /// Top or bottom cap grid starting at `offset`.
    Cap { offset: u32, sx: u32, sz: u32 },
    /// Interior perimeter ring starting at `offset`.
    Band { offset: u32, sx: u32, sz: u32 },
}

impl RingIndexer {
    fn index(&self, i: u32) -> u32 {
        match *self {
            RingIndexer::Cap { offset, sx, sz } => {
                let i = i % (2 * sx + 2 * sz);
                if i < sz {
                    // Leg 1: x = min, z rising. Grid stride is (sz + 1) per x row.
                    offset + i
                } else if i < sz + sx {
                    // Leg 2: z = max, x rising.
                    let xx = i - sz;
                    offset + sz + xx * (sz + 1)
                } else if i < 2 * sz + sx {
                    // Leg 3: x = max, z falling.
                    let zz = 2 * sz + sx - i;
                    offset + sx * (sz + 1) + zz
                } else {
                    // Leg 4: z = min, x falling.
                    let xx = 2 * sx + 2 * sz - i;
                    offset + xx * (sz + 1)
                }
            }
            RingIndexer::Band { offset, sx, sz } => offset + i % (2 * sx + 2 * sz),
        }
    }
}

/// Emits the two triangles of a quad. Outward faces wind clockwise; the
/// bottom cap winds counter-clockwise so it also points outward (down).
///
/// Quad layout:
/// ```text
/// i0      i1
///
/// i2      i3
/// ```
fn push_quad(indices: &mut Vec<u32>, i0: u32, i1: u32, i2: u32, i3: u32, bottom: bool) {
    if !bottom {
        indices.extend_from_slice(&[i0, i1, i3, i0, i3, i2]);
    } else {
        indices.extend_from_slice(&[i0, i3, i1, i0, i2, i3]);
    }
}

/// Pushes a full cap grid and its quads; returns the cap's base vertex index.
fn push_cap(
    vertices: &mut Vec<Vertex>,
    indices: &mut Vec<u32>,
    size: Vec3,
    sx: u32,
    sz: u32,
    bottom: bool,
) -> u32 {
    let start = vertices.len() as u32;
    let half = size / 2.0;
    let y = if bottom { -half.y } else { half.y };

    for xx in 0..=sx {
        for zz in 0..=sz {
            vertices.push(Vertex::at(Vec3::new(
                -half.x + xx as f32 * size.x / sx as f32,
                y,
                -half.z + zz as f32 * size.z / sz as f32,
            )));
        }
    }

    for xx in 0..sx {
        for zz in 0..sz {
            let i0 = start + xx * (sz + 1) + 1 + zz;
            let i1 = start + (xx + 1) * (sz + 1) + 1 + zz;
            let i2 = start + xx * (sz + 1) + zz;
            let i3 = start + (xx + 1) * (sz + 1) + zz;
            push_quad(indices, i0, i1, i2, i3, bottom);
        }
    }

    start
}

/// Pushes one interior perimeter ring at height `y`, in perimeter walk order;
/// returns its base vertex index.
fn push_band(vertices: &mut Vec<Vertex>, size: Vec3, sx: u32, sz: u32, y: f32) -> u32 {
    let start = vertices.len() as u32;
    let half = size / 2.0;
    let dx = size.x / sx as f32;
    let dz = size.z / sz as f32;

    for zz in 0..=sz {
        vertices.push(Vertex::at(Vec3::new(-half.x, y, -half.z + zz as f32 * dz)));
    }
    for xx in 1..sx {
        vertices.push(Vertex::at(Vec3::new(-half.x + xx as f32 * dx, y, half.z)));
    }
    for zz in 0..=sz {
        vertices.push(Vertex::at(Vec3::new(half.x, y, half.z - zz as f32 * dz)));
    }
    for xx in 1..sx {
        vertices.push(Vertex::at(Vec3::new(half.x - xx as f32 * dx, y, -half.z)));
    }

    start
}

/// Closed-form vertex count for a segmented cube with shared edges.
/// Returns 0 for segment counts the builder rejects.
pub fn cube_vertex_count(sx: u32, sy: u32, sz: u32) -> usize {
    if sx == 0 || sy == 0 || sz == 0 {
        return 0;
    }
    let (sx, sy, sz) = (sx as usize, sy as usize, sz as usize);
    (sx + 1) * (sy + 1) * 2 + (sy + 1) * (sz + 1) * 2 + (sx + 1) * (sz + 1) * 2
        - 4 * (sx - 1)
        - 4 * (sy - 1)
        - 4 * (sz - 1)
        - 16
}

/// Closed-form index count for a segmented cube.
/// Returns 0 for segment counts the builder rejects.
pub fn cube_index_count(sx: u32, sy: u32, sz: u32) -> usize {
    if sx == 0 || sy == 0 || sz == 0 {
        return 0;
    }
    let (sx, sy, sz) = (sx as usize, sy as usize, sz as usize);
    (sx * sy + sy * sz + sx * sz) * 12
}

/// Builds a segmented cube centered at the origin with deduplicated edge and
/// corner vertices. All faces wind outward. Normals are left zeroed; callers
/// run [`Mesh::recalculate_normals`] once the shape is final.
pub fn build_cube(
    size: Vec3,
    segments: (u32, u32, u32),
    index_format: IndexFormat,
) -> Result<Mesh, MeshError> {
    let (sx, sy, sz) = segments;
    if sx == 0 || sy == 0 || sz == 0 {
        return Err(MeshError::InvalidSegments(sx, sy, sz));
    }
    if size.x <= 0.0 || size.y <= 0.0 || size.z <= 0.0 {
        return Err(MeshError::InvalidSize(size.x, size.y, size.z));
    }

    let num_vertices = cube_vertex_count(sx, sy, sz);
    let num_indices = cube_index_count(sx, sy, sz);
    if num_vertices > index_format.max_vertices() {
        return Err(MeshError::IndexOverflow {
            vertices: num_vertices,
            format: index_format,
            max: index_format.max_vertices(),
        });
    }

    let mut vertices = Vec::with_capacity(num_vertices);
    let mut indices = Vec::with_capacity(num_indices);
    let perimeter = 2 * sx + 2 * sz;

    let bottom = push_cap(&mut vertices, &mut indices, size, sx, sz, true);
    let mut last = RingIndexer::Cap {
        offset: bottom,
        sx,
        sz,
    };
    for ring in 0..sy - 1 {
        let y = -size.y / 2.0 + (ring + 1) as f32 * size.y / sy as f32;
        let offset = push_band(&mut vertices, size, sx, sz, y);
        let next = RingIndexer::Band { offset, sx, sz };
        for j in 0..perimeter {
            push_quad(
                &mut indices,
                next.index(j + 1),
                next.index(j),
                last.index(j + 1),
                last.index(j),
                false,
            );
        }
        last = next;
    }
    let top = push_cap(&mut vertices, &mut indices, size, sx, sz, false);
    let next = RingIndexer::Cap {
        offset: top,
        sx,
        sz,
    };
    for j in 0..perimeter {
        push_quad(
            &mut indices,
            next.index(j + 1),
            next.index(j),
            last.index(j + 1),
            last.index(j),
            false,
        );
    }

    assert_eq!(
        vertices.len(),
        num_vertices,
        "cube vertex count disagrees with closed form"
    );
    assert_eq!(
        indices.len(),
        num_indices,
        "cube index count disagrees with closed form"
    );

    Ok(Mesh {
        vertices,
        indices,
        index_format,
    })
}
