//! Selection-driven category passes for embedding point clouds.
//!
//! Classification runs as two ordered passes over the cloud: the lasso
//! pass promotes filtered points that fall inside the active selection
//! polygon, then the highlight pass promotes filtered points whose
//! sample ids arrive from an external highlight source (e.g., a search
//! result list). Both passes are strictly one-directional: nothing is
//! ever demoted, and `Excluded` points are untouchable.

use std::collections::HashSet;

use crate::lasso::contains_point;
use crate::types::{EmbeddingPoints, Lasso, Point, PointCategory};

/// Apply the lasso selection pass, returning a new category vector in
/// cloud order.
///
/// With no active lasso (`None`) the input categories are returned
/// unchanged. With an active lasso, including a degenerate empty one,
/// every `Filtered` point is tested for containment and promoted to
/// `Selected` when inside. `Excluded` and `Selected` points pass
/// through untouched even when geometrically inside.
#[must_use]
pub fn apply_lasso(points: &EmbeddingPoints, lasso: Option<&Lasso>) -> Vec<PointCategory> {
    let Some(lasso) = lasso else {
        return points.categories().to_vec();
    };

    points
        .categories()
        .iter()
        .zip(points.xs().iter().zip(points.ys()))
        .map(|(&category, (&x, &y))| match category {
            PointCategory::Filtered if contains_point(lasso, Point::new(x, y)) => {
                PointCategory::Selected
            }
            PointCategory::Excluded | PointCategory::Filtered | PointCategory::Selected => category,
        })
        .collect()
}

/// Apply the highlight overlay pass in place.
///
/// Runs after the lasso pass: any point still `Filtered` whose sample
/// id is in `highlighted` is promoted to `Selected`. Other categories
/// are untouched, and an empty highlight set is a no-op.
pub fn apply_highlight(
    categories: &mut [PointCategory],
    sample_ids: &[String],
    highlighted: &HashSet<String>,
) {
    debug_assert_eq!(
        categories.len(),
        sample_ids.len(),
        "category and sample id arrays must be parallel",
    );
    if highlighted.is_empty() {
        return;
    }
    for (category, sample_id) in categories.iter_mut().zip(sample_ids) {
        if *category == PointCategory::Filtered && highlighted.contains(sample_id) {
            *category = PointCategory::Selected;
        }
    }
}

/// Sample ids of all `Selected` points, in cloud order.
///
/// Ordering mirrors the point cloud, so downstream consumers (dataset
/// relabeling jobs, export manifests) receive a stable id list.
#[must_use]
pub fn selected_ids(categories: &[PointCategory], sample_ids: &[String]) -> Vec<String> {
    debug_assert_eq!(
        categories.len(),
        sample_ids.len(),
        "category and sample id arrays must be parallel",
    );
    categories
        .iter()
        .zip(sample_ids)
        .filter(|&(&category, _)| category == PointCategory::Selected)
        .map(|(_, sample_id)| sample_id.clone())
        .collect()
}
