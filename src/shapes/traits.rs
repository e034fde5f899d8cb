//! Curve trait definition
//!
//! Parametric 2D curves are sampled into polylines before drawing.

use crate::geometry::Point2D;

/// A parametric curve in shape-local or screen space
///
/// `sample(t)` takes `t` in `[0, 1]` and returns to its start at `t = 1`.
pub trait Curve {
    /// Sample the curve at parameter t
    fn sample(&self, t: f64) -> Point2D;

    /// Approximate the curve with `segments + 1` evenly spaced samples
    ///
    /// Zero segments gives an empty polyline.
    fn polyline(&self, segments: usize) -> Vec<Point2D> {
        if segments == 0 {
            return Vec::new();
        }
        (0..=segments)
            .map(|i| self.sample(i as f64 / segments as f64))
            .collect()
    }
}
