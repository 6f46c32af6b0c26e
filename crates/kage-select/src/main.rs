//! Classify an embedding point cloud against a lasso selection and
//! highlighted sample ids, emitting the selection result.
//!
//! Reads the point cloud (and optional lasso) from JSON files, runs the
//! pure classification passes, and prints either a human-readable
//! summary or the machine-readable selection result. Optionally renders
//! an anti-aliased scatter preview with the lasso outline.

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::collections::HashSet;
use std::path::PathBuf;

use clap::Parser;
use image::{Rgba, RgbaImage};
use kage_overlay::{EmbeddingPoints, Lasso, Point, PointCategory, SelectionResult, classify};
use tiny_skia::{
    Color, FillRule, LineCap, LineJoin, Paint, PathBuilder, Pixmap, Stroke, Transform,
};

/// Classify an embedding point cloud against a lasso selection and emit
/// the per-point categories plus selected sample ids.
#[derive(Parser)]
#[command(name = "kage-select", version)]
struct Args {
    /// Path to the point cloud JSON document (xs, ys, categories,
    /// sample_ids arrays).
    #[arg(long)]
    points: PathBuf,

    /// Path to a lasso JSON file: an array of {"x", "y"} vertices.
    /// Absent means no active selection.
    #[arg(long)]
    lasso: Option<PathBuf>,

    /// Comma-delimited highlighted sample ids.
    #[arg(long, value_delimiter = ',')]
    highlight: Vec<String>,

    /// Output the selection result as JSON instead of a human-readable
    /// summary.
    #[arg(long)]
    json: bool,

    /// Render an anti-aliased scatter preview PNG to this path.
    #[arg(long, value_name = "FILE")]
    preview: Option<PathBuf>,
}

// ---------------------------------------------------------------------------
// Preview rendering via tiny-skia
// ---------------------------------------------------------------------------

/// Preview canvas size in pixels (square).
const PREVIEW_SIZE: u32 = 512;
/// Margin between the data extent and the canvas edge.
const PREVIEW_MARGIN: f64 = 24.0;
/// Dot radius for scatter points.
const DOT_RADIUS: f32 = 4.0;
/// Maximum selected ids listed in the human-readable summary.
const SUMMARY_ID_LIMIT: usize = 8;

/// Per-category dot colors (RGB).
const fn category_color(category: PointCategory) -> (u8, u8, u8) {
    match category {
        PointCategory::Excluded => (158, 158, 158),
        PointCategory::Filtered => (70, 130, 180),
        PointCategory::Selected => (255, 87, 34),
    }
}

/// Maps data coordinates into canvas pixels: uniform scale, centered,
/// y flipped so the plot's y axis increases upward.
struct PreviewTransform {
    scale: f64,
    min_x: f64,
    min_y: f64,
    offset_x: f64,
    offset_y: f64,
}

impl PreviewTransform {
    /// Fit the combined extent of the point cloud and lasso vertices
    /// into the canvas. Degenerate extents (single point, empty input)
    /// fall back to the unit square.
    fn fit(points: &EmbeddingPoints, lasso: Option<&Lasso>) -> Self {
        let mut min_x = f64::INFINITY;
        let mut max_x = f64::NEG_INFINITY;
        let mut min_y = f64::INFINITY;
        let mut max_y = f64::NEG_INFINITY;

        for &x in points.xs() {
            min_x = min_x.min(x);
            max_x = max_x.max(x);
        }
        for &y in points.ys() {
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        if let Some(lasso) = lasso {
            for vertex in lasso.vertices() {
                min_x = min_x.min(vertex.x);
                max_x = max_x.max(vertex.x);
                min_y = min_y.min(vertex.y);
                max_y = max_y.max(vertex.y);
            }
        }
        if min_x > max_x || min_y > max_y {
            min_x = 0.0;
            max_x = 1.0;
            min_y = 0.0;
            max_y = 1.0;
        }

        let drawable = f64::from(PREVIEW_SIZE) - 2.0 * PREVIEW_MARGIN;
        let extent_x = max_x - min_x;
        let extent_y = max_y - min_y;
        let scale = drawable / extent_x.max(extent_y).max(f64::EPSILON);

        // Center the smaller extent within the square canvas.
        let offset_x = f64::from(PREVIEW_SIZE).mul_add(0.5, -(extent_x * scale) / 2.0);
        let offset_y = f64::from(PREVIEW_SIZE).mul_add(0.5, -(extent_y * scale) / 2.0);

        Self {
            scale,
            min_x,
            min_y,
            offset_x,
            offset_y,
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn apply(&self, x: f64, y: f64) -> (f32, f32) {
        let px = (x - self.min_x).mul_add(self.scale, self.offset_x);
        // Flip so the y axis increases upward, matching plot orientation.
        let py = f64::from(PREVIEW_SIZE) - (y - self.min_y).mul_add(self.scale, self.offset_y);
        (px as f32, py as f32)
    }
}

/// Render the classified point cloud as colored dots with the lasso
/// outline stroked on top, on a white background.
fn render_preview(
    points: &EmbeddingPoints,
    categories: &[PointCategory],
    lasso: Option<&Lasso>,
) -> RgbaImage {
    let transform = PreviewTransform::fit(points, lasso);

    let Some(mut pixmap) = Pixmap::new(PREVIEW_SIZE, PREVIEW_SIZE) else {
        return RgbaImage::from_pixel(PREVIEW_SIZE, PREVIEW_SIZE, Rgba([255, 255, 255, 255]));
    };
    pixmap.fill(Color::WHITE);

    // One fill path per category so each is a single draw call, and
    // selected dots always paint over filtered and excluded ones.
    for target in [
        PointCategory::Excluded,
        PointCategory::Filtered,
        PointCategory::Selected,
    ] {
        let mut pb = PathBuilder::new();
        for (index, &category) in categories.iter().enumerate() {
            if category != target {
                continue;
            }
            if let Some(point) = points.point(index) {
                let (cx, cy) = transform.apply(point.x, point.y);
                pb.push_circle(cx, cy, DOT_RADIUS);
            }
        }
        if let Some(path) = pb.finish() {
            let (r, g, b) = category_color(target);
            let mut paint = Paint::default();
            paint.set_color_rgba8(r, g, b, 255);
            paint.anti_alias = true;
            pixmap.fill_path(&path, &paint, FillRule::Winding, Transform::identity(), None);
        }
    }

    // Lasso outline stroked on top, closed back to the first vertex.
    if let Some(lasso) = lasso {
        let vertices = lasso.vertices();
        let mut pb = PathBuilder::new();
        if let Some(first) = vertices.first() {
            let (x, y) = transform.apply(first.x, first.y);
            pb.move_to(x, y);
            for vertex in &vertices[1..] {
                let (x, y) = transform.apply(vertex.x, vertex.y);
                pb.line_to(x, y);
            }
            pb.close();
        }
        if let Some(path) = pb.finish() {
            let stroke = Stroke {
                width: 2.0,
                line_cap: LineCap::Round,
                line_join: LineJoin::Round,
                ..Stroke::default()
            };
            let mut paint = Paint::default();
            paint.set_color_rgba8(33, 33, 33, 255);
            paint.anti_alias = true;
            pixmap.stroke_path(&path, &paint, &stroke, Transform::identity(), None);
        }
    }

    // Convert the pixmap (premultiplied RGBA) to an `RgbaImage` (straight RGBA).
    let pixmap_data = pixmap.data();
    let mut img = RgbaImage::new(PREVIEW_SIZE, PREVIEW_SIZE);
    #[allow(clippy::cast_possible_truncation)]
    for (i, pixel) in img.pixels_mut().enumerate() {
        let off = i * 4;
        let a = pixmap_data[off + 3];
        if a == 0 {
            *pixel = Rgba([0, 0, 0, 0]);
        } else {
            // Un-premultiply: channel = premultiplied * 255 / alpha.
            let r = u16::from(pixmap_data[off]) * 255 / u16::from(a);
            let g = u16::from(pixmap_data[off + 1]) * 255 / u16::from(a);
            let b = u16::from(pixmap_data[off + 2]) * 255 / u16::from(a);
            *pixel = Rgba([r as u8, g as u8, b as u8, a]);
        }
    }
    img
}

// ---------------------------------------------------------------------------
// Summary output
// ---------------------------------------------------------------------------

/// Print per-category counts and the first few selected ids.
fn print_summary(result: &SelectionResult) {
    let mut excluded = 0_usize;
    let mut filtered = 0_usize;
    let mut selected = 0_usize;
    for category in &result.categories {
        match category {
            PointCategory::Excluded => excluded += 1,
            PointCategory::Filtered => filtered += 1,
            PointCategory::Selected => selected += 1,
        }
    }

    println!("Points: {} total", result.categories.len());
    println!("  excluded: {excluded}");
    println!("  filtered: {filtered}");
    println!("  selected: {selected}");

    if !result.selected_ids.is_empty() {
        let shown: Vec<&str> = result
            .selected_ids
            .iter()
            .take(SUMMARY_ID_LIMIT)
            .map(String::as_str)
            .collect();
        let suffix = if result.selected_ids.len() > SUMMARY_ID_LIMIT {
            ", ..."
        } else {
            ""
        };
        println!("Selected ids: {}{suffix}", shown.join(", "));
    }
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    eprintln!("Reading points from {}", args.points.display());
    let points_json = std::fs::read_to_string(&args.points)?;
    let points: EmbeddingPoints = serde_json::from_str(&points_json)?;
    eprintln!("Loaded {} points", points.len());

    let lasso = match &args.lasso {
        Some(path) => {
            eprintln!("Reading lasso from {}", path.display());
            let lasso_json = std::fs::read_to_string(path)?;
            let vertices: Vec<Point> = serde_json::from_str(&lasso_json)?;
            Some(Lasso::new(vertices))
        }
        None => None,
    };

    let highlighted: HashSet<String> = args.highlight.into_iter().collect();
    if !highlighted.is_empty() {
        eprintln!("Highlighting {} sample ids", highlighted.len());
    }

    let result = classify(&points, lasso.as_ref(), &highlighted);

    if let Some(path) = &args.preview {
        let preview = render_preview(&points, &result.categories, lasso.as_ref());
        eprintln!("Saving preview to {}", path.display());
        preview.save(path)?;
    }

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_summary(&result);
    }

    Ok(())
}
