//! Shared types for the kage overlay core.

use serde::{Deserialize, Serialize};

use crate::color::ColorResolverKind;

/// Re-export `RgbaImage` so downstream crates can reference rasterized
/// mask data without depending on `image` directly.
pub use image::RgbaImage;

/// A 2D point in embedding coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal position.
    pub x: f64,
    /// Vertical position.
    pub y: f64,
}

impl Point {
    /// Create a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// An ordered vertex list describing a lasso selection polygon.
///
/// The polygon is implicitly closed: the last vertex connects back to
/// the first. No orientation or self-intersection requirements are
/// imposed on the vertices.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lasso(Vec<Point>);

impl Lasso {
    /// Create a new lasso from a vector of vertices.
    #[must_use]
    pub const fn new(vertices: Vec<Point>) -> Self {
        Self(vertices)
    }

    /// Returns `true` if the lasso has no vertices.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the number of vertices in the lasso.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns a slice of all vertices.
    #[must_use]
    pub fn vertices(&self) -> &[Point] {
        &self.0
    }

    /// Consumes the lasso and returns the underlying vertex vector.
    #[must_use]
    pub fn into_vertices(self) -> Vec<Point> {
        self.0
    }
}

/// Classification of one embedding point against the active filter and
/// selection.
///
/// Selection passes only ever promote `Filtered` points to `Selected`;
/// `Excluded` and `Selected` are fixed points of every pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PointCategory {
    /// The sample fails the active metadata filter.
    Excluded,
    /// The sample passes the filter but is not selected.
    Filtered,
    /// The sample passes the filter and is inside the active lasso, or
    /// carries a highlighted sample id.
    Selected,
}

/// A point cloud as parallel per-sample arrays.
///
/// Construction validates that all four arrays agree in length and that
/// every coordinate is finite, so downstream passes can index across
/// the arrays without bounds or NaN churn.
///
/// Uses a custom `Deserialize` implementation so the same invariants
/// hold for point clouds loaded from JSON documents.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmbeddingPoints {
    /// Horizontal coordinate per sample.
    xs: Vec<f64>,
    /// Vertical coordinate per sample.
    ys: Vec<f64>,
    /// Current category per sample.
    categories: Vec<PointCategory>,
    /// Opaque dataset identifier per sample.
    sample_ids: Vec<String>,
}

impl EmbeddingPoints {
    /// Create a validated point cloud from parallel arrays.
    ///
    /// # Errors
    ///
    /// Returns [`OverlayError::LengthMismatch`] if the arrays disagree
    /// in length, or [`OverlayError::NonFiniteCoordinate`] if any
    /// coordinate is NaN or infinite.
    pub fn try_new(
        xs: Vec<f64>,
        ys: Vec<f64>,
        categories: Vec<PointCategory>,
        sample_ids: Vec<String>,
    ) -> Result<Self, OverlayError> {
        if xs.len() != ys.len() || xs.len() != categories.len() || xs.len() != sample_ids.len() {
            return Err(OverlayError::LengthMismatch {
                xs: xs.len(),
                ys: ys.len(),
                categories: categories.len(),
                sample_ids: sample_ids.len(),
            });
        }
        for (index, (&x, &y)) in xs.iter().zip(&ys).enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(OverlayError::NonFiniteCoordinate { index });
            }
        }
        Ok(Self {
            xs,
            ys,
            categories,
            sample_ids,
        })
    }

    /// Returns the number of points in the cloud.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.xs.len()
    }

    /// Returns `true` if the cloud has no points.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.xs.is_empty()
    }

    /// Coordinates of the point at `index`, if in bounds.
    #[must_use]
    pub fn point(&self, index: usize) -> Option<Point> {
        Some(Point::new(
            *self.xs.get(index)?,
            *self.ys.get(index)?,
        ))
    }

    /// Returns a slice of all horizontal coordinates.
    #[must_use]
    pub fn xs(&self) -> &[f64] {
        &self.xs
    }

    /// Returns a slice of all vertical coordinates.
    #[must_use]
    pub fn ys(&self) -> &[f64] {
        &self.ys
    }

    /// Returns a slice of all current categories.
    #[must_use]
    pub fn categories(&self) -> &[PointCategory] {
        &self.categories
    }

    /// Returns a slice of all sample ids.
    #[must_use]
    pub fn sample_ids(&self) -> &[String] {
        &self.sample_ids
    }
}

/// Serde-compatible proxy for `EmbeddingPoints`.
///
/// Deserialization funnels through [`EmbeddingPoints::try_new`] so that
/// length and finiteness invariants hold for loaded documents too.
#[derive(Deserialize)]
struct EmbeddingPointsProxy {
    xs: Vec<f64>,
    ys: Vec<f64>,
    categories: Vec<PointCategory>,
    sample_ids: Vec<String>,
}

impl<'de> Deserialize<'de> for EmbeddingPoints {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let proxy = EmbeddingPointsProxy::deserialize(deserializer)?;
        Self::try_new(proxy.xs, proxy.ys, proxy.categories, proxy.sample_ids)
            .map_err(serde::de::Error::custom)
    }
}

/// A run-length-encoded binary mask over a row-major pixel sequence.
///
/// Runs alternate background/foreground by **array index**: even-indexed
/// counts (0, 2, 4, …) cover background pixels, odd-indexed counts cover
/// foreground pixels. A zero-length run is a harmless no-op and does not
/// flip the alternation. Height is derived from the run sum, not stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RleMask {
    /// Alternating run lengths, starting with background.
    pub counts: Vec<u32>,
    /// Row width in pixels.
    pub width: u32,
}

impl RleMask {
    /// Create a new mask from run counts and a row width.
    #[must_use]
    pub const fn new(counts: Vec<u32>, width: u32) -> Self {
        Self { counts, width }
    }

    /// Total number of pixels covered by all runs.
    #[must_use]
    pub fn total_pixels(&self) -> u64 {
        self.counts.iter().map(|&c| u64::from(c)).sum()
    }

    /// Number of foreground pixels (sum of odd-indexed runs).
    #[must_use]
    pub fn area(&self) -> u64 {
        self.counts
            .iter()
            .skip(1)
            .step_by(2)
            .map(|&c| u64::from(c))
            .sum()
    }

    /// Derived mask height: `total_pixels / width`, rounded up.
    ///
    /// Returns 0 for a zero width, an empty run list, or a quotient too
    /// large to represent, all of which rasterize to the degenerate
    /// placeholder.
    #[must_use]
    pub fn height(&self) -> u32 {
        if self.width == 0 {
            return 0;
        }
        let rows = self.total_pixels().div_ceil(u64::from(self.width));
        u32::try_from(rows).unwrap_or(0)
    }

    /// Returns `true` if the mask covers no pixels at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total_pixels() == 0
    }
}

/// Configuration for overlay rendering.
///
/// All parameters have sensible defaults matching the interactive
/// defaults of the curation view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// CSS color specification for mask foreground pixels.
    ///
    /// Resolved through the configured [`ColorResolverKind`];
    /// unresolvable values fall back to opaque black.
    pub fill_color: String,

    /// Which color resolution strategy to use.
    pub color_resolver: ColorResolverKind,
}

impl OverlayConfig {
    /// Default CSS color for mask foreground pixels.
    pub const DEFAULT_FILL_COLOR: &'static str = "red";
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            fill_color: Self::DEFAULT_FILL_COLOR.to_string(),
            color_resolver: ColorResolverKind::default(),
        }
    }
}

/// Result of classifying a point cloud against a lasso and highlight set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionResult {
    /// Category per point, in cloud order.
    pub categories: Vec<PointCategory>,

    /// Sample ids of all `Selected` points, in cloud order.
    ///
    /// This is the list handed to downstream consumers (e.g., dataset
    /// relabeling jobs), so ordering is part of the contract.
    pub selected_ids: Vec<String>,
}

/// Errors that can occur while constructing overlay inputs.
///
/// Classification and rasterization themselves are total; only input
/// construction and deserialization can fail.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// The parallel per-sample arrays disagree in length.
    #[error(
        "parallel point arrays disagree in length: \
         xs={xs}, ys={ys}, categories={categories}, sample_ids={sample_ids}"
    )]
    LengthMismatch {
        /// Length of the horizontal coordinate array.
        xs: usize,
        /// Length of the vertical coordinate array.
        ys: usize,
        /// Length of the category array.
        categories: usize,
        /// Length of the sample id array.
        sample_ids: usize,
    },

    /// A coordinate was NaN or infinite.
    #[error("non-finite coordinate at point index {index}")]
    NonFiniteCoordinate {
        /// Index of the offending point.
        index: usize,
    },
}
