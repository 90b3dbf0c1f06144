//! Topology-indexed primitive builders.
//!
//! Produces deduplicated cube and sphere grid meshes with outward-facing
//! winding and closed-form vertex/index counts.

mod cube;
mod sphere;

pub use cube::{build_cube, cube_index_count, cube_vertex_count};
pub use sphere::{build_sphere, sphere_index_count, sphere_vertex_count};
