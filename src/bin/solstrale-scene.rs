use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use solstrale_scene::{DecodeOpts, ImageCache, Scene, SceneDecoder, UnknownGeometryPolicy};

#[derive(Parser, Debug)]
#[command(name = "solstrale-scene", version)]
struct Cli {
    /// Log decoder diagnostics to stderr.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode a scene file and print a summary of its contents.
    Check(CheckArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Run the schema pass first and report every structural problem at once.
    #[arg(long)]
    schema: bool,

    /// Treat unknown geometry types as `translation` nodes.
    #[arg(long)]
    fallback_translation: bool,

    /// Directory that image and model paths are relative to. Defaults to the scene's directory.
    #[arg(long)]
    asset_root: Option<PathBuf>,

    /// Print the summary as JSON.
    #[arg(long)]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_max_level(if cli.verbose {
            tracing::Level::DEBUG
        } else {
            tracing::Level::WARN
        })
        .init();

    match cli.cmd {
        Command::Check(args) => cmd_check(args),
    }
}

fn cmd_check(args: CheckArgs) -> anyhow::Result<()> {
    let asset_root = args.asset_root.clone().unwrap_or_else(|| {
        args.in_path
            .parent()
            .unwrap_or_else(|| Path::new("."))
            .to_path_buf()
    });
    let opts = DecodeOpts {
        validate_schema: args.schema,
        unknown_geometry: if args.fallback_translation {
            UnknownGeometryPolicy::FallbackToTranslation
        } else {
            UnknownGeometryPolicy::Reject
        },
        asset_root: Some(asset_root),
    };

    let images = ImageCache::new();
    let scene = SceneDecoder::new(&images)
        .with_opts(&opts)
        .decode_path(&args.in_path)
        .with_context(|| format!("decode scene '{}'", args.in_path.display()))?;

    if args.json {
        let out = serde_json::to_string_pretty(&scene.stats()).context("serialize stats")?;
        println!("{out}");
    } else {
        print_summary(&scene, images.len());
    }
    Ok(())
}

fn print_summary(scene: &Scene, decoded_images: usize) {
    let stats = scene.stats();
    let rc = &scene.render_config;
    println!(
        "ok: {}x{} px, {} spp, shader {:?}, world {}",
        rc.image_width,
        rc.image_height,
        rc.samples_per_pixel,
        rc.shader,
        scene.world.kind()
    );
    println!("geometry nodes: {}", stats.geometry_nodes());
    for (kind, n) in &stats.geometry {
        println!("  {kind}: {n}");
    }
    for (kind, n) in &stats.materials {
        println!("  material {kind}: {n}");
    }
    for (kind, n) in &stats.textures {
        println!("  texture {kind}: {n}");
    }
    if !stats.images.is_empty() {
        println!("images ({decoded_images} decoded):");
        for path in &stats.images {
            println!("  {path}");
        }
    }
}
