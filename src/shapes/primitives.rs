//! Primitive shapes - Circle3D, Ellipse, RegularPolygon, Square
//!
//! These are the building blocks the sketches place and animate.

use std::f64::consts::{FRAC_PI_2, TAU};

use super::traits::Curve;
use crate::geometry::{rotate_z, Point2D, Point3D};

/// A circle of given radius around the origin, tilted out of the XY plane
///
/// ## Parametric Equation
/// ```text
/// x = r * cos(a)
/// y = r * sin(a) * cos(tilt)
/// z = r * sin(a) * sin(tilt)
/// ```
/// followed by a rotation of `roll` radians about Z.
#[derive(Clone, Debug)]
pub struct Circle3D {
    pub radius: f64,
    /// Tilt about the X axis (0 = lies in the XY plane)
    pub tilt: f64,
    /// Rotation about the Z axis applied after tilting
    pub roll: f64,
}

impl Circle3D {
    pub fn new(radius: f64, tilt: f64, roll: f64) -> Self {
        Self { radius, tilt, roll }
    }

    /// Flat circle in the XY plane
    pub fn flat(radius: f64) -> Self {
        Self::new(radius, 0.0, 0.0)
    }

    /// Point at parameter t in [0, 1]
    pub fn point(&self, t: f64) -> Point3D {
        let angle = t * TAU;
        let (sin, cos) = angle.sin_cos();
        let p = Point3D::new(
            cos * self.radius,
            sin * self.radius * self.tilt.cos(),
            sin * self.radius * self.tilt.sin(),
        );
        rotate_z(&p, self.roll)
    }

    /// `segments + 1` samples; the last repeats the first to close the loop
    pub fn samples(&self, segments: usize) -> Vec<Point3D> {
        if segments == 0 {
            return Vec::new();
        }
        (0..=segments)
            .map(|i| self.point(i as f64 / segments as f64))
            .collect()
    }
}

/// An axis-aligned ellipse around the origin
///
/// Rotation and position are applied by a `Placement`.
#[derive(Clone, Debug)]
pub struct Ellipse {
    pub radius_x: f64,
    pub radius_y: f64,
}

impl Ellipse {
    pub fn new(radius_x: f64, radius_y: f64) -> Self {
        Self { radius_x, radius_y }
    }
}

impl Curve for Ellipse {
    fn sample(&self, t: f64) -> Point2D {
        let angle = t * TAU;
        Point2D::new(self.radius_x * angle.cos(), self.radius_y * angle.sin())
    }
}

/// A regular polygon around the origin with its first vertex on top
#[derive(Clone, Debug)]
pub struct RegularPolygon {
    pub sides: usize,
    pub radius: f64,
}

impl RegularPolygon {
    pub fn new(sides: usize, radius: f64) -> Self {
        Self { sides, radius }
    }

    /// Vertex i sits at angle `i / sides * 2π - π/2`
    pub fn vertices(&self) -> Vec<Point2D> {
        (0..self.sides)
            .map(|i| {
                let angle = (i as f64 / self.sides as f64) * TAU - FRAC_PI_2;
                Point2D::new(angle.cos() * self.radius, angle.sin() * self.radius)
            })
            .collect()
    }
}

/// A square of side `size` centered on the origin
#[derive(Clone, Debug)]
pub struct Square {
    pub size: f64,
}

impl Square {
    pub fn new(size: f64) -> Self {
        Self { size }
    }

    /// Corners clockwise from top-left (screen coordinates, y down)
    pub fn corners(&self) -> [Point2D; 4] {
        let h = self.size / 2.0;
        [
            Point2D::new(-h, -h),
            Point2D::new(h, -h),
            Point2D::new(h, h),
            Point2D::new(-h, h),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flat_circle() {
        let circle = Circle3D::flat(2.0);
        let p = circle.point(0.25);
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - 2.0).abs() < 1e-9);
        assert!(p.z.abs() < 1e-9);
    }

    #[test]
    fn test_tilted_circle_stays_on_sphere() {
        let circle = Circle3D::new(5.0, 1.0, 0.4);
        for p in circle.samples(40) {
            assert!((p.coords.norm() - 5.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_circle_samples_close() {
        let samples = Circle3D::new(3.0, 0.5, 0.2).samples(100);
        assert_eq!(samples.len(), 101);
        assert!((samples[0] - samples[100]).norm() < 1e-9);
        assert!(Circle3D::flat(1.0).samples(0).is_empty());
    }

    #[test]
    fn test_ellipse() {
        let ellipse = Ellipse::new(2.0, 1.0);
        let p = ellipse.sample(0.0);
        assert!((p.x - 2.0).abs() < 1e-9);
        let p = ellipse.sample(0.25);
        assert!((p.y - 1.0).abs() < 1e-9);
        assert_eq!(ellipse.polyline(64).len(), 65);
    }

    #[test]
    fn test_regular_polygon() {
        let triangle = RegularPolygon::new(3, 1.0).vertices();
        assert_eq!(triangle.len(), 3);
        // First vertex on top (negative y in screen space)
        assert!(triangle[0].x.abs() < 1e-9);
        assert!((triangle[0].y + 1.0).abs() < 1e-9);

        assert!(RegularPolygon::new(0, 1.0).vertices().is_empty());
    }

    #[test]
    fn test_square() {
        let corners = Square::new(10.0).corners();
        assert_eq!(corners[0], Point2D::new(-5.0, -5.0));
        assert_eq!(corners[2], Point2D::new(5.0, 5.0));
    }
}
