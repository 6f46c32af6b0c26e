//! kage-overlay: Pure selection and mask overlay primitives (sans-IO).
//!
//! Classifies embedding point clouds against lasso selections and
//! highlight sets, and rasterizes run-length-encoded segmentation
//! masks into RGBA overlays for the curation view:
//! lasso containment -> category promotion -> highlight overlay ->
//! selected-id projection, and RLE runs -> fill color -> RGBA raster.
//!
//! This crate has **no I/O dependencies** -- it operates on in-memory
//! point arrays and run lists and returns structured data. Filesystem
//! interaction lives in the CLI tools; PNG serialization lives in
//! `kage-export`.

use std::collections::HashSet;

pub mod color;
pub mod lasso;
pub mod raster;
pub mod rle;
pub mod selection;
pub mod types;

pub use color::{ColorResolver, ColorResolverKind, Rgba};
pub use raster::MaskRaster;
pub use types::{
    EmbeddingPoints, Lasso, OverlayConfig, OverlayError, Point, PointCategory, RleMask,
    SelectionResult,
};

/// Classify a point cloud against a lasso selection and a highlight set.
///
/// Produces a [`SelectionResult`] with the category per point and the
/// ordered ids of every `Selected` point. With no active lasso and no
/// highlighted ids, the input categories pass through unchanged.
///
/// # Passes
///
/// 1. Lasso pass: `Filtered` points inside the active lasso promote to
///    `Selected`
/// 2. Highlight pass: points still `Filtered` whose sample id is
///    highlighted promote to `Selected`
/// 3. Projection: collect ids of all `Selected` points in cloud order
#[must_use]
pub fn classify(
    points: &EmbeddingPoints,
    lasso: Option<&Lasso>,
    highlighted: &HashSet<String>,
) -> SelectionResult {
    // 1. Lasso pass.
    let mut categories = selection::apply_lasso(points, lasso);

    // 2. Highlight overlay pass.
    selection::apply_highlight(&mut categories, points.sample_ids(), highlighted);

    // 3. Selected-id projection.
    let selected_ids = selection::selected_ids(&categories, points.sample_ids());

    SelectionResult {
        categories,
        selected_ids,
    }
}

/// Rasterize a mask with the configured fill color.
///
/// Resolves `config.fill_color` through the configured resolver kind
/// (unresolvable specs fall back to opaque black per the resolver
/// contract), then rasterizes. Total like both halves: degenerate
/// masks produce the 1×1 transparent placeholder.
#[must_use]
pub fn render_mask(mask: &RleMask, config: &OverlayConfig) -> MaskRaster {
    let fill = config.color_resolver.resolve(&config.fill_color);
    raster::rasterize(mask, fill)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    /// Four-point cloud matching the interactive promotion example: the
    /// third sample fails the filter, the rest pass.
    fn cloud() -> EmbeddingPoints {
        EmbeddingPoints::try_new(
            vec![1.0, 2.0, 3.0, 4.0],
            vec![5.0, 6.0, 7.0, 8.0],
            vec![
                PointCategory::Filtered,
                PointCategory::Filtered,
                PointCategory::Excluded,
                PointCategory::Filtered,
            ],
            vec![
                "s1".to_string(),
                "s2".to_string(),
                "s3".to_string(),
                "s4".to_string(),
            ],
        )
        .unwrap()
    }

    /// Tall strip covering x in [0,3], y in [0,7].
    fn strip() -> Lasso {
        Lasso::new(vec![
            Point::new(0.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 7.0),
            Point::new(0.0, 7.0),
        ])
    }

    #[test]
    fn classify_runs_lasso_then_highlight_then_projection() {
        let highlighted = HashSet::from(["s4".to_string()]);
        let result = classify(&cloud(), Some(&strip()), &highlighted);

        assert_eq!(
            result.categories,
            vec![
                PointCategory::Selected,
                PointCategory::Selected,
                PointCategory::Excluded,
                PointCategory::Selected,
            ],
        );
        assert_eq!(result.selected_ids, vec!["s1", "s2", "s4"]);
    }

    #[test]
    fn classify_without_selection_passes_through() {
        let result = classify(&cloud(), None, &HashSet::new());
        assert_eq!(result.categories, cloud().categories());
        assert!(result.selected_ids.is_empty());
    }

    #[test]
    fn classify_projects_preexisting_selection() {
        // Points already Selected before the passes still appear in the
        // id projection.
        let points = EmbeddingPoints::try_new(
            vec![0.0, 1.0],
            vec![0.0, 1.0],
            vec![PointCategory::Filtered, PointCategory::Selected],
            vec!["a".to_string(), "b".to_string()],
        )
        .unwrap();
        let result = classify(&points, None, &HashSet::new());
        assert_eq!(result.selected_ids, vec!["b"]);
    }

    #[test]
    fn classify_empty_cloud() {
        let points = EmbeddingPoints::try_new(vec![], vec![], vec![], vec![]).unwrap();
        let result = classify(&points, Some(&strip()), &HashSet::new());
        assert!(result.categories.is_empty());
        assert!(result.selected_ids.is_empty());
    }

    #[test]
    fn render_mask_uses_default_fill() {
        let raster = render_mask(&RleMask::new(vec![8, 5], 10), &OverlayConfig::default());
        assert_eq!(raster.height, 2);
        // Default fill is the named color red.
        assert_eq!(raster.image.get_pixel(8, 0).0, [255, 0, 0, 255]);
        assert_eq!(raster.image.get_pixel(0, 0).0, [0, 0, 0, 0]);
    }

    #[test]
    fn render_mask_falls_back_to_opaque_black() {
        let config = OverlayConfig {
            fill_color: "definitely-not-a-color".to_string(),
            ..OverlayConfig::default()
        };
        let raster = render_mask(&RleMask::new(vec![0, 1], 1), &config);
        assert_eq!(raster.image.get_pixel(0, 0).0, [0, 0, 0, 255]);
    }

    #[test]
    fn render_mask_degenerate_input_yields_placeholder() {
        let raster = render_mask(&RleMask::new(vec![], 5), &OverlayConfig::default());
        assert!(raster.is_degenerate());
        assert_eq!(raster.image.dimensions(), (1, 1));
    }
}
