//! Asteroidgen CLI - Procedural asteroid generator.
//!
//! Sculpt irregular asteroid models from subdivided primitives and
//! synthesize matching rock textures, crater height fields, and normal maps.

use clap::{Parser, Subcommand, ValueEnum};
use glam::Vec3;
use std::path::PathBuf;
use std::time::Instant;

use asteroidgen::export::{
    export_height_png, export_model_obj, export_texture_png, PngExportOptions,
};
use asteroidgen::geometry::{
    cube_index_count, cube_vertex_count, sphere_index_count, sphere_vertex_count,
};
use asteroidgen::mesh::IndexFormat;
use asteroidgen::pipeline::{
    generate_asteroid, generate_nebula_sprites, AsteroidConfig, DisplacementKind, PrimitiveKind,
};
use asteroidgen::texture::{GradientKernel, NebulaConfig, NormalMapConfig, Palette};

/// Procedural asteroid generator.
#[derive(Parser)]
#[command(name = "asteroidgen")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate an asteroid model with textures.
    Generate {
        /// Edge subdivision of the base primitive (e.g., 16, 32, 64).
        /// Spheres need at least 6.
        #[arg(short = 'd', long, default_value = "32")]
        subdivision: u32,

        /// Random seed for reproducible generation.
        #[arg(short, long)]
        seed: Option<u64>,

        /// Output directory for generated files.
        #[arg(short, long, default_value = "./output")]
        output: PathBuf,

        /// Base name for output files.
        #[arg(short, long, default_value = "asteroid")]
        name: String,

        /// Base primitive to sculpt.
        #[arg(short, long, default_value = "cube")]
        primitive: PrimitiveArg,

        /// Surface displacement style.
        #[arg(long, default_value = "cellular")]
        displacement: DisplacementArg,

        /// Index width of the generated mesh.
        #[arg(long, default_value = "u16")]
        index_format: IndexFormatArg,

        /// Split the model into two geometries for separate materials.
        #[arg(long)]
        split: bool,

        /// Side length of the generated textures in pixels.
        #[arg(short, long, default_value = "512")]
        texture_size: usize,

        /// Palette colors as hex RGB (e.g., 554c43). Repeatable.
        #[arg(long = "color", value_parser = parse_hex_color)]
        colors: Vec<Vec3>,

        /// Number of half-space sculpting passes.
        #[arg(long, default_value = "8")]
        passes: u32,

        /// Gradient kernel for the normal map.
        #[arg(long, default_value = "sobel")]
        kernel: KernelArg,

        /// Also generate nebula sprites, one per palette color.
        #[arg(long)]
        nebula: bool,
    },

    /// Display mesh size estimates for a subdivision level.
    Info {
        /// Edge subdivision of the base primitive.
        #[arg(short = 'd', long, default_value = "32")]
        subdivision: u32,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum PrimitiveArg {
    /// Subdivided cube.
    Cube,
    /// UV sphere.
    Sphere,
    /// Coin-flip per run.
    Random,
}

impl From<PrimitiveArg> for PrimitiveKind {
    fn from(arg: PrimitiveArg) -> Self {
        match arg {
            PrimitiveArg::Cube => PrimitiveKind::Cube,
            PrimitiveArg::Sphere => PrimitiveKind::Sphere,
            PrimitiveArg::Random => PrimitiveKind::Random,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum DisplacementArg {
    /// Cellular distance noise (craggy).
    Cellular,
    /// Normalized fractal noise (rounded).
    Fractal,
}

impl From<DisplacementArg> for DisplacementKind {
    fn from(arg: DisplacementArg) -> Self {
        match arg {
            DisplacementArg::Cellular => DisplacementKind::Cellular,
            DisplacementArg::Fractal => DisplacementKind::Fractal,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum IndexFormatArg {
    /// 16-bit indices (at most 65536 vertices).
    U16,
    /// 32-bit indices.
    U32,
}

impl From<IndexFormatArg> for IndexFormat {
    fn from(arg: IndexFormatArg) -> Self {
        match arg {
            IndexFormatArg::U16 => IndexFormat::U16,
            IndexFormatArg::U32 => IndexFormat::U32,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KernelArg {
    Sobel,
    Scharr,
}

impl From<KernelArg> for GradientKernel {
    fn from(arg: KernelArg) -> Self {
        match arg {
            KernelArg::Sobel => GradientKernel::Sobel,
            KernelArg::Scharr => GradientKernel::Scharr,
        }
    }
}

fn parse_hex_color(text: &str) -> Result<Vec3, String> {
    let hex = text.trim_start_matches('#');
    if hex.len() != 6 {
        return Err(format!("expected 6 hex digits, got {:?}", text));
    }
    let value = u32::from_str_radix(hex, 16).map_err(|e| format!("invalid hex color: {}", e))?;
    Ok(Vec3::new(
        ((value >> 16) & 0xff) as f32 / 255.0,
        ((value >> 8) & 0xff) as f32 / 255.0,
        (value & 0xff) as f32 / 255.0,
    ))
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Generate {
            subdivision,
            seed,
            output,
            name,
            primitive,
            displacement,
            index_format,
            split,
            texture_size,
            colors,
            passes,
            kernel,
            nebula,
        } => {
            run_generate(
                subdivision,
                seed,
                output,
                name,
                primitive,
                displacement,
                index_format,
                split,
                texture_size,
                colors,
                passes,
                kernel,
                nebula,
            );
        }
        Commands::Info { subdivision } => {
            run_info(subdivision);
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn run_generate(
    subdivision: u32,
    seed: Option<u64>,
    output: PathBuf,
    name: String,
    primitive: PrimitiveArg,
    displacement: DisplacementArg,
    index_format: IndexFormatArg,
    split: bool,
    texture_size: usize,
    colors: Vec<Vec3>,
    passes: u32,
    kernel: KernelArg,
    nebula: bool,
) {
    // Validate parameters
    if subdivision < 3 || subdivision > 512 {
        eprintln!("Error: Subdivision must be between 3 and 512");
        std::process::exit(1);
    }

    // A sphere grid needs at least 3 parallels, and parallels come from
    // subdivision / 2. The random primitive may pick a sphere too.
    if !matches!(primitive, PrimitiveArg::Cube) && subdivision < 6 {
        eprintln!("Error: Sphere primitives need a subdivision of at least 6");
        std::process::exit(1);
    }

    if texture_size < 16 || texture_size > 8192 {
        eprintln!("Error: Texture size must be between 16 and 8192");
        std::process::exit(1);
    }

    if passes == 0 || passes > 64 {
        eprintln!("Error: Sculpting passes must be between 1 and 64");
        std::process::exit(1);
    }

    let palette = if colors.is_empty() {
        Palette::rock()
    } else {
        Palette(colors)
    };

    // Generate seed if not provided
    let seed = seed.unwrap_or_else(|| {
        use std::time::{SystemTime, UNIX_EPOCH};
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0)
    });

    println!("Asteroidgen - Procedural Asteroid Generator");
    println!("===========================================");
    println!("Subdivision: {}", subdivision);
    println!("Seed: {}", seed);
    println!("Texture size: {}x{}", texture_size, texture_size);
    println!("Output: {}", output.display());

    let start = Instant::now();

    let config = AsteroidConfig {
        primitive: primitive.into(),
        subdivision,
        index_format: index_format.into(),
        seed: Some(seed),
        sculpt: asteroidgen::SculptConfig {
            passes,
            ..Default::default()
        },
        displacement: displacement.into(),
        split,
        texture_size,
        palette: palette.clone(),
        normal_map: NormalMapConfig {
            kernel: kernel.into(),
            ..Default::default()
        },
        ..Default::default()
    };

    println!("\nGenerating asteroid...");
    let asteroid = generate_asteroid(&config, None).unwrap_or_else(|e| {
        eprintln!("Error during generation: {}", e);
        std::process::exit(1);
    });

    let gen_time = start.elapsed();
    println!("Generation completed in {:.2?}", gen_time);

    let vertices: usize = asteroid
        .model
        .geometries
        .iter()
        .map(|g| g.vertices.len())
        .sum();
    let triangles: usize = asteroid
        .model
        .geometries
        .iter()
        .map(|g| g.triangle_count())
        .sum();
    println!(
        "Model: {} geometries, {} vertices, {} triangles",
        asteroid.model.geometries.len(),
        vertices,
        triangles
    );

    // Export
    println!("\nExporting...");
    let export_start = Instant::now();

    std::fs::create_dir_all(&output).unwrap_or_else(|e| {
        eprintln!("Error creating output directory: {}", e);
        std::process::exit(1);
    });

    let options = PngExportOptions::default();

    let model_path = output.join(format!("{}.obj", name));
    export_model_obj(&asteroid.model, &model_path, &name).unwrap_or_else(|e| {
        eprintln!("Error exporting OBJ: {}", e);
        std::process::exit(1);
    });
    println!("  Exported model: {}.obj", name);

    export_texture_png(
        &asteroid.diffuse,
        &output.join(format!("{}_diffuse.png", name)),
        &options,
    )
    .unwrap_or_else(|e| {
        eprintln!("Error exporting diffuse map: {}", e);
        std::process::exit(1);
    });
    println!("  Exported diffuse map: {}_diffuse.png", name);

    export_height_png(
        &asteroid.height,
        &output.join(format!("{}_height.png", name)),
        &options,
    )
    .unwrap_or_else(|e| {
        eprintln!("Error exporting height map: {}", e);
        std::process::exit(1);
    });
    println!("  Exported height map: {}_height.png", name);

    export_texture_png(
        &asteroid.normal,
        &output.join(format!("{}_normal.png", name)),
        &options,
    )
    .unwrap_or_else(|e| {
        eprintln!("Error exporting normal map: {}", e);
        std::process::exit(1);
    });
    println!("  Exported normal map: {}_normal.png", name);

    if nebula {
        let sprites =
            generate_nebula_sprites(texture_size, &palette, &NebulaConfig::default(), seed)
                .unwrap_or_else(|e| {
                    eprintln!("Error generating nebula sprites: {}", e);
                    std::process::exit(1);
                });
        for (i, sprite) in sprites.iter().enumerate() {
            let filename = format!("{}_nebula_{}.png", name, i);
            export_texture_png(sprite, &output.join(&filename), &options).unwrap_or_else(|e| {
                eprintln!("Error exporting nebula sprite: {}", e);
                std::process::exit(1);
            });
        }
        println!("  Exported {} nebula sprites: {}_nebula_*.png", sprites.len(), name);
    }

    let export_time = export_start.elapsed();
    let total_time = start.elapsed();

    println!("Export completed in {:.2?}", export_time);
    println!("\nTotal time: {:.2?}", total_time);
    println!("Done!");
}

fn run_info(subdivision: u32) {
    if subdivision < 3 || subdivision > 512 {
        eprintln!("Error: Subdivision must be between 3 and 512");
        std::process::exit(1);
    }

    println!("Asteroidgen - Mesh Size Info");
    println!("============================");
    println!();
    println!("Subdivision: {}", subdivision);
    println!();

    let cube_vertices = cube_vertex_count(subdivision, subdivision, subdivision);
    let cube_indices = cube_index_count(subdivision, subdivision, subdivision);
    println!("Cube primitive:");
    println!("  Vertices:  {:>10}", cube_vertices);
    println!("  Indices:   {:>10}", cube_indices);
    println!("  Triangles: {:>10}", cube_indices / 3);

    let parallels = subdivision / 2;
    let meridians = subdivision;
    println!();
    if parallels < 3 {
        println!("Sphere primitive: requires a subdivision of at least 6");
    } else {
        let sphere_vertices = sphere_vertex_count(parallels, meridians);
        let sphere_indices = sphere_index_count(parallels, meridians);
        println!("Sphere primitive ({}x{}):", parallels, meridians);
        println!("  Vertices:  {:>10}", sphere_vertices);
        println!("  Indices:   {:>10}", sphere_indices);
        println!("  Triangles: {:>10}", sphere_indices / 3);
    }

    println!();
    let u16_limit = IndexFormat::U16.max_vertices();
    if cube_vertices <= u16_limit {
        println!("Index format: u16 is sufficient");
    } else {
        println!(
            "Index format: u32 required (more than {} vertices)",
            u16_limit
        );
    }
}
