//! Shape sculpting: half-space corner cuts and noise displacement.

mod displace;
mod halfspace;
mod plane;

pub use displace::{displace, normalize_displacements, DisplacementPolicy};
pub use halfspace::{corners_behind_plane, cut_by_plane, sample_cut_plane, sculpt, SculptConfig};
pub use plane::Plane;
