use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use rle2img::config;
use rle2img::paths;
use rle2img::raster;
use rle2img::rle::Rle;

/// Convert a Game of Life RLE pattern file to an image.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Path to the .rle pattern file
    source: PathBuf,

    /// Optional output image path; the extension selects the image format.
    /// Missing parts are filled in from the source path.
    target: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let target = paths::resolve_target(&args.source, args.target.as_deref());

    let lines = config::load(&args.source)
        .with_context(|| format!("Failed to read {}", args.source.display()))?;
    let mut rle = Rle::parse(&lines)
        .with_context(|| format!("Failed to parse {}", args.source.display()))?;
    let canvas = raster::rasterize(&mut rle)
        .with_context(|| format!("Failed to decode {}", args.source.display()))?;

    // Nothing is written until the whole pattern has decoded.
    canvas
        .save(&target)
        .with_context(|| format!("Failed to write {}", target.display()))?;

    info!(target = %target.display(), "wrote image");

    Ok(())
}
