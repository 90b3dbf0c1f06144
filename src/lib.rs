//! Procedural asteroid generator.
//!
//! This crate builds irregular asteroid models by sculpting subdivided cube
//! or sphere primitives with random half-space cuts and noise displacement,
//! and synthesizes matching rock textures, crater height fields, and normal
//! maps.

pub mod export;
pub mod geometry;
pub mod mesh;
pub mod noise;
pub mod pipeline;
pub mod sculpt;
pub mod texture;

pub use geometry::{build_cube, build_sphere};
pub use mesh::{IndexFormat, Mesh, Model, Unwrapper, Vertex};
pub use noise::{CellularNoiseConfig, FractalNoiseConfig};
pub use pipeline::{
    generate_asteroid, generate_nebula_sprites, Asteroid, AsteroidConfig, DisplacementKind,
    GenerationError, PrimitiveKind,
};
pub use sculpt::{DisplacementPolicy, SculptConfig};
pub use texture::{CraterConfig, NebulaConfig, NormalMapConfig, Palette, RockTextureConfig};
