//! One-shot asteroid generation pipeline.
//!
//! Builder -> sculptor -> displacement -> optional partitioner -> optional
//! UV/tangent finishing, plus the texture synthesizers. Synchronous and
//! CPU-bound; deterministic for a fixed seed because every stage draws its
//! randomness from one seeded generator in call order.

use glam::Vec3;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::{build_cube, build_sphere};
use crate::mesh::{
    finish_uvs, partition_by_plane, IndexFormat, Mesh, MeshError, Model, UnwrapError, Unwrapper,
};
use crate::noise::FractalNoiseConfig;
use crate::sculpt::{displace, sculpt, DisplacementPolicy, Plane, SculptConfig};
use crate::texture::{
    generate_crater_field, generate_nebula_texture, generate_rock_texture, normal_map_from_height,
    CraterConfig, HeightField, NebulaConfig, NormalMapConfig, Palette, RockTextureConfig,
    TextureError, TextureImage,
};

/// Errors surfaced by the generation entry points.
#[derive(Error, Debug)]
pub enum GenerationError {
    #[error(transparent)]
    Mesh(#[from] MeshError),
    #[error(transparent)]
    Texture(#[from] TextureError),
    #[error(transparent)]
    Unwrap(#[from] UnwrapError),
}

/// Which base primitive the sculptor starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PrimitiveKind {
    #[default]
    Cube,
    Sphere,
    /// Coin-flip between cube and sphere per invocation.
    Random,
}

/// Which displacement policy shapes the final surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DisplacementKind {
    /// Raw cellular distance noise over a fixed divisor.
    #[default]
    Cellular,
    /// Fractal noise normalized to [-0.5, 0.5] with randomized scale.
    Fractal,
}

/// Full configuration for one asteroid generation run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AsteroidConfig {
    pub primitive: PrimitiveKind,
    /// Edge subdivision: cube segments per axis, or sphere meridians (with
    /// half as many parallels).
    pub subdivision: u32,
    pub index_format: IndexFormat,
    /// Explicit seed for reproducible output; `None` draws a process seed.
    pub seed: Option<u64>,
    pub sculpt: SculptConfig,
    pub displacement: DisplacementKind,
    /// Split the sculpted mesh into two geometries by a random plane through
    /// its centroid, for independent material slots.
    pub split: bool,
    pub texture_size: usize,
    #[serde(skip, default = "Palette::rock")]
    pub palette: Palette,
    pub rock: RockTextureConfig,
    pub crater: CraterConfig,
    pub normal_map: NormalMapConfig,
}

impl Default for AsteroidConfig {
    fn default() -> Self {
        Self {
            primitive: PrimitiveKind::Cube,
            subdivision: 20,
            index_format: IndexFormat::U16,
            seed: None,
            sculpt: SculptConfig::default(),
            displacement: DisplacementKind::Cellular,
            split: false,
            texture_size: 256,
            palette: Palette::rock(),
            rock: RockTextureConfig::default(),
            crater: CraterConfig::default(),
            normal_map: NormalMapConfig::default(),
        }
    }
}

/// A finished asteroid: renderable geometry plus its surface images.
#[derive(Debug, Clone)]
pub struct Asteroid {
    pub model: Model,
    /// Rock diffuse color image.
    pub diffuse: TextureImage,
    /// Crater height field.
    pub height: HeightField,
    /// Normal map derived from the height field.
    pub normal: TextureImage,
    /// The seed that produced this asteroid.
    pub seed: u64,
}

fn build_primitive(config: &AsteroidConfig, rng: &mut ChaCha8Rng) -> Result<Mesh, MeshError> {
    let sphere = match config.primitive {
        PrimitiveKind::Cube => false,
        PrimitiveKind::Sphere => true,
        PrimitiveKind::Random => rng.random::<f32>() < 0.5,
    };
    if sphere {
        build_sphere(
            0.5,
            config.subdivision / 2,
            config.subdivision,
            config.index_format,
        )
    } else {
        build_cube(
            Vec3::ONE,
            (config.subdivision, config.subdivision, config.subdivision),
            config.index_format,
        )
    }
}

fn displacement_policy(kind: DisplacementKind, rng: &mut ChaCha8Rng) -> DisplacementPolicy {
    match kind {
        DisplacementKind::Cellular => DisplacementPolicy::cellular(rng.random()),
        DisplacementKind::Fractal => DisplacementPolicy::FractalNormalized {
            noise: FractalNoiseConfig {
                frequency: rng.random_range(0.01..0.03),
                ..FractalNoiseConfig::with_seed(rng.random())
            },
            noise_scale: rng.random_range(100.0..200.0),
            factor: rng.random_range(0.1..0.3),
        },
    }
}

/// Generates one asteroid: sculpted geometry and matching surface textures.
///
/// The optional unwrapper is the external UV service; without it the
/// geometries keep derived normals but no UVs or tangents (triplanar
/// materials need neither).
pub fn generate_asteroid(
    config: &AsteroidConfig,
    unwrapper: Option<&dyn Unwrapper>,
) -> Result<Asteroid, GenerationError> {
    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut mesh = build_primitive(config, &mut rng)?;

    // Random per-axis stretch keeps individual asteroids from reading as
    // obvious cubes or spheres.
    let scale = Vec3::new(
        rng.random_range(0.5..1.5),
        rng.random_range(0.5..1.5),
        rng.random_range(0.5..1.5),
    );
    for vertex in &mut mesh.vertices {
        vertex.position *= scale;
    }

    sculpt(&mut mesh, &config.sculpt, &mut rng)?;
    let policy = displacement_policy(config.displacement, &mut rng);
    displace(&mut mesh, &policy)?;

    let mut geometries = if config.split {
        let normal = Vec3::new(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        )
        .normalize_or_zero();
        let plane = Plane::from_point_normal(mesh.centroid(), normal);
        let partition = partition_by_plane(&mesh, &plane)?;
        if partition.behind.is_empty() || partition.ahead.is_empty() {
            vec![mesh]
        } else {
            // The two groups reference the same vertex positions; the UV
            // step (or the host) re-splits per-geometry as needed.
            let behind = Mesh {
                vertices: mesh.vertices.clone(),
                indices: partition.behind,
                index_format: mesh.index_format,
            };
            let ahead = Mesh {
                vertices: mesh.vertices,
                indices: partition.ahead,
                index_format: mesh.index_format,
            };
            vec![behind, ahead]
        }
    } else {
        vec![mesh]
    };

    if let Some(unwrapper) = unwrapper {
        for geometry in &mut geometries {
            *geometry = finish_uvs(geometry, unwrapper)?;
        }
    }

    let model = Model::new(geometries);

    let diffuse = generate_rock_texture(config.texture_size, &config.palette, &config.rock, &mut rng)?;
    let height = generate_crater_field(config.texture_size, &config.crater, &mut rng)?;
    let normal = normal_map_from_height(&height, &config.normal_map);

    Ok(Asteroid {
        model,
        diffuse,
        height,
        normal,
        seed,
    })
}

/// Generates one nebula sprite per palette color, all from one seed.
pub fn generate_nebula_sprites(
    size: usize,
    palette: &Palette,
    config: &NebulaConfig,
    seed: u64,
) -> Result<Vec<TextureImage>, GenerationError> {
    if palette.is_empty() {
        return Err(TextureError::EmptyPalette.into());
    }
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    palette
        .0
        .iter()
        .map(|&color| generate_nebula_texture(size, color, config, &mut rng).map_err(Into::into))
        .collect()
}
