//! Path type - sampled parametric curves
//!
//! A Path is an ordered list of screen-space points produced by one of the
//! curve generators (Lissajous figures, wave profiles). It is drawn as a
//! polyline.

use std::f64::consts::TAU;

use crate::geometry::Point2D;

/// A path defined by a sequence of points
#[derive(Clone, Debug)]
pub struct Path {
    points: Vec<Point2D>,
}

impl Path {
    pub fn new(points: Vec<Point2D>) -> Self {
        Self { points }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Create a Lissajous curve centered at `center`
    ///
    /// ```text
    /// x = cx + sin(a*t + phase) * size/2
    /// y = cy + sin(b*t + delta + phase) * size/2
    /// ```
    /// for `t` over `[0, 2π]` in `segments` steps (`segments + 1` points).
    ///
    /// With `a == b` and `delta == 0` both coordinates move together and the
    /// figure collapses to a diagonal line segment.
    pub fn lissajous(
        center: Point2D,
        size: f64,
        a: f64,
        b: f64,
        delta: f64,
        phase: f64,
        segments: usize,
    ) -> Self {
        let half = size / 2.0;
        let points: Vec<Point2D> = if segments == 0 {
            Vec::new()
        } else {
            (0..=segments)
                .map(|i| {
                    let t = (i as f64 / segments as f64) * TAU;
                    Point2D::new(
                        center.x + (a * t + phase).sin() * half,
                        center.y + (b * t + delta + phase).sin() * half,
                    )
                })
                .collect()
        };

        Self::new(points)
    }

    /// Marker positions: `count` samples at evenly spaced indices
    ///
    /// Index i is `floor(i / count * len)`.
    pub fn nodes(&self, count: usize) -> Vec<Point2D> {
        let len = self.points.len();
        (0..count)
            .map(|i| ((i as f64 / count as f64) * len as f64).floor() as usize)
            .filter(|&index| index < len)
            .map(|index| self.points[index])
            .collect()
    }

    /// A sum of two sinusoids sampled across `width`
    ///
    /// ```text
    /// y(x) = baseline + sin(x*f + time + offset) * A
    ///                 + sin(2x*f + 1.5*time + offset) * A/2
    /// ```
    #[allow(clippy::too_many_arguments)]
    pub fn wave(
        width: f64,
        baseline: f64,
        amplitude: f64,
        frequency: f64,
        time: f64,
        offset: f64,
        step: f64,
    ) -> Self {
        let mut points = Vec::new();
        if step > 0.0 {
            let mut x = 0.0;
            while x <= width {
                let y = baseline
                    + (x * frequency + time + offset).sin() * amplitude
                    + (x * frequency * 2.0 + time * 1.5 + offset).sin() * (amplitude / 2.0);
                points.push(Point2D::new(x, y));
                x += step;
            }
        }

        Self::new(points)
    }
}
