//! Rasterize a run-length-encoded segmentation mask into a PNG overlay.
//!
//! Accepts the mask either inline (`--counts 1,2,1,4 --width 4`) or as a
//! JSON file matching the on-wire `RleMask` shape, renders the foreground
//! runs in a CSS color, and writes an RGBA PNG with a transparent
//! background.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;

use clap::Parser;
use kage_overlay::{OverlayConfig, RleMask, render_mask};

/// Rasterize a run-length-encoded segmentation mask into a PNG overlay.
#[derive(Parser)]
#[command(name = "kage-mask", version)]
struct Args {
    /// Inline run counts, alternating background and foreground,
    /// e.g. "1,2,1,4".
    #[arg(
        long,
        value_delimiter = ',',
        conflicts_with = "mask",
        required_unless_present = "mask"
    )]
    counts: Option<Vec<u32>>,

    /// Mask width in pixels (row length).
    #[arg(long, conflicts_with = "mask", required_unless_present = "mask")]
    width: Option<u32>,

    /// Path to a JSON mask file with "counts" and "width" fields.
    #[arg(long)]
    mask: Option<PathBuf>,

    /// CSS fill color for foreground pixels (hex, rgb()/rgba(), or named).
    #[arg(long, default_value = OverlayConfig::DEFAULT_FILL_COLOR)]
    fill: String,

    /// Output PNG path.
    #[arg(short, long, default_value = "mask.png")]
    out: PathBuf,

    /// Print mask statistics as JSON to stdout.
    #[arg(long)]
    json: bool,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let mask = match &args.mask {
        Some(path) => {
            eprintln!("Reading mask from {}", path.display());
            let json = std::fs::read_to_string(path)?;
            serde_json::from_str::<RleMask>(&json)?
        }
        None => {
            // clap enforces presence of both flags when --mask is absent.
            let counts = args.counts.unwrap_or_default();
            let width = args.width.unwrap_or_default();
            RleMask::new(counts, width)
        }
    };

    let height = mask.height();
    eprintln!(
        "Mask: {} runs, {}x{height}, area {}",
        mask.counts.len(),
        mask.width,
        mask.area(),
    );

    let config = OverlayConfig {
        fill_color: args.fill,
        ..OverlayConfig::default()
    };
    let raster = render_mask(&mask, &config);
    if raster.is_degenerate() {
        eprintln!("Degenerate mask dimensions; writing 1x1 transparent placeholder");
    }

    let png = kage_export::to_png(&raster)?;

    eprintln!("Saving to {}", args.out.display());
    std::fs::write(&args.out, &png)?;

    if args.json {
        let stats = serde_json::json!({
            "width": mask.width,
            "height": height,
            "area": mask.area(),
            "bytes": png.len(),
        });
        println!("{stats}");
    }

    eprintln!("Done.");
    Ok(())
}
