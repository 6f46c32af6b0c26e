//! Lasso containment tests for embedding points.
//!
//! Uses the even-odd ray-casting rule: a point is inside the polygon
//! when a horizontal ray cast from the point crosses the boundary an
//! odd number of times. The strict vertex comparisons make bottom and
//! left boundary edges inclusive and top and right edges exclusive.

use crate::types::{Lasso, Point};

/// Test whether `point` lies inside the lasso polygon.
///
/// Degenerate lassos (fewer than three vertices) contain no points:
/// an empty or single-vertex lasso produces no straddling edge, and a
/// two-vertex lasso walks the same segment twice, cancelling itself
/// out. Negative and fractional coordinates are fully supported.
#[must_use]
pub fn contains_point(lasso: &Lasso, point: Point) -> bool {
    // Axis-aligned pre-filter; the even-odd walk can never accept a
    // point strictly outside the vertex bounds.
    let Some((min, max)) = bounding_box(lasso) else {
        return false;
    };
    if point.x < min.x || point.x > max.x || point.y < min.y || point.y > max.y {
        return false;
    }

    even_odd_crossings(lasso.vertices(), point)
}

/// Axis-aligned bounding box of the lasso vertices as `(min, max)`
/// corners, or `None` for an empty lasso.
#[must_use]
pub fn bounding_box(lasso: &Lasso) -> Option<(Point, Point)> {
    let (&first, rest) = lasso.vertices().split_first()?;
    let mut min = first;
    let mut max = first;
    for vertex in rest {
        min.x = min.x.min(vertex.x);
        min.y = min.y.min(vertex.y);
        max.x = max.x.max(vertex.x);
        max.y = max.y.max(vertex.y);
    }
    Some((min, max))
}

/// Even-odd ray cast: each boundary edge straddling the point's
/// horizontal line toggles the inside flag when its intersection lies
/// to the right of the point.
fn even_odd_crossings(vertices: &[Point], point: Point) -> bool {
    let Some(&last) = vertices.last() else {
        return false;
    };

    let mut inside = false;
    let mut prev = last;
    for &vertex in vertices {
        let denominator = prev.y - vertex.y;
        // Horizontal edges have no single intersection; fall back to
        // the edge's own x rather than dividing by zero. Such edges
        // never straddle the ray, so the value is never decisive.
        let intersection_x = if denominator == 0.0 {
            vertex.x
        } else {
            (prev.x - vertex.x) * (point.y - vertex.y) / denominator + vertex.x
        };

        if (vertex.y > point.y) != (prev.y > point.y) && point.x < intersection_x {
            inside = !inside;
        }
        prev = vertex;
    }
    inside
}
