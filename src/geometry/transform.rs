//! Rotation and projection
//!
//! Points are rotated about the origin with right-handed rotation matrices,
//! always in the order X, then Y, then Z, and then projected with a simple
//! perspective divide:
//!
//! ```text
//! scale = D / (D + z)
//! screen_x = x * scale + width / 2
//! screen_y = y * scale + height / 2
//! ```

#![allow(dead_code)]

use nalgebra::{Rotation2, Vector2};

use super::{Point2D, Point3D};

/// Rotate a point about the X axis
pub fn rotate_x(p: &Point3D, angle: f64) -> Point3D {
    let (sin, cos) = angle.sin_cos();
    Point3D::new(p.x, p.y * cos - p.z * sin, p.y * sin + p.z * cos)
}

/// Rotate a point about the Y axis
pub fn rotate_y(p: &Point3D, angle: f64) -> Point3D {
    let (sin, cos) = angle.sin_cos();
    Point3D::new(p.x * cos + p.z * sin, p.y, -p.x * sin + p.z * cos)
}

/// Rotate a point about the Z axis
pub fn rotate_z(p: &Point3D, angle: f64) -> Point3D {
    let (sin, cos) = angle.sin_cos();
    Point3D::new(p.x * cos - p.y * sin, p.x * sin + p.y * cos, p.z)
}

/// Rotation angles in radians, applied X first, then Y, then Z
///
/// Angles are unbounded; they wrap through the periodicity of sin/cos.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rotation {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Rotation {
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Rotate a point by X, then Y, then Z
    pub fn apply(&self, p: &Point3D) -> Point3D {
        let p = rotate_x(p, self.x);
        let p = rotate_y(&p, self.y);
        rotate_z(&p, self.z)
    }

    /// Undo `apply`: negated angles in reverse order
    pub fn invert(&self, p: &Point3D) -> Point3D {
        let p = rotate_z(p, -self.z);
        let p = rotate_y(&p, -self.y);
        rotate_x(&p, -self.x)
    }
}

/// A projected point: screen position plus the perspective scale used
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projected {
    pub x: f64,
    pub y: f64,
    pub scale: f64,
}

impl Projected {
    pub fn point(&self) -> Point2D {
        Point2D::new(self.x, self.y)
    }
}

/// Perspective projection onto a surface of the given size
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Projection {
    /// Distance from the eye to the projection plane
    pub perspective: f64,
    pub width: f64,
    pub height: f64,
}

impl Projection {
    pub fn new(perspective: f64, width: f64, height: f64) -> Self {
        Self {
            perspective,
            width,
            height,
        }
    }

    /// Project a (rotated) point to screen space
    ///
    /// Points with `z <= -perspective` give a non-positive or infinite scale.
    /// That output is degenerate but is returned as computed, not clamped.
    pub fn project(&self, p: &Point3D) -> Projected {
        let scale = self.perspective / (self.perspective + p.z);
        Projected {
            x: p.x * scale + self.width / 2.0,
            y: p.y * scale + self.height / 2.0,
            scale,
        }
    }

    /// Rotate then project
    pub fn project_rotated(&self, rotation: &Rotation, p: &Point3D) -> Projected {
        self.project(&rotation.apply(p))
    }
}

/// Places shape-local 2D points on screen: rotate, scale, then translate
///
/// Equivalent to a canvas `translate(center); rotate(rotation); scale(scale)`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Placement {
    pub center: Point2D,
    /// Rotation in radians
    pub rotation: f64,
    pub scale: f64,
}

impl Placement {
    pub fn new(center: Point2D, rotation: f64, scale: f64) -> Self {
        Self {
            center,
            rotation,
            scale,
        }
    }

    pub fn apply(&self, p: &Point2D) -> Point2D {
        let rotated: Vector2<f64> = Rotation2::new(self.rotation) * (p.coords * self.scale);
        self.center + rotated
    }

    pub fn apply_all(&self, points: &[Point2D]) -> Vec<Point2D> {
        points.iter().map(|p| self.apply(p)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::f64::consts::FRAC_PI_2;

    const EPS: f64 = 1e-9;

    fn close(a: &Point3D, b: &Point3D, tol: f64) -> bool {
        (a - b).norm() <= tol
    }

    #[test]
    fn test_rotate_x_quarter_turn() {
        let p = rotate_x(&Point3D::new(0.0, 1.0, 0.0), FRAC_PI_2);
        assert!(close(&p, &Point3D::new(0.0, 0.0, 1.0), EPS));
    }

    #[test]
    fn test_rotate_y_quarter_turn() {
        let p = rotate_y(&Point3D::new(1.0, 0.0, 0.0), FRAC_PI_2);
        assert!(close(&p, &Point3D::new(0.0, 0.0, -1.0), EPS));
    }

    #[test]
    fn test_rotate_z_quarter_turn() {
        let p = rotate_z(&Point3D::new(1.0, 0.0, 0.0), FRAC_PI_2);
        assert!(close(&p, &Point3D::new(0.0, 1.0, 0.0), EPS));
    }

    #[test]
    fn test_rotation_order_is_x_then_y_then_z() {
        let rotation = Rotation::new(0.3, 1.1, -0.7);
        let p = Point3D::new(4.0, -2.0, 9.0);
        let expected = rotate_z(&rotate_y(&rotate_x(&p, 0.3), 1.1), -0.7);
        assert!(close(&rotation.apply(&p), &expected, EPS));
    }

    #[test]
    fn test_project_origin() {
        let projection = Projection::new(500.0, 800.0, 600.0);
        let p = projection.project(&Point3D::origin());
        assert!((p.x - 400.0).abs() < EPS);
        assert!((p.y - 300.0).abs() < EPS);
        assert!((p.scale - 1.0).abs() < EPS);
    }

    #[test]
    fn test_project_singularity_is_not_clamped() {
        let projection = Projection::new(500.0, 800.0, 600.0);
        let p = projection.project(&Point3D::new(1.0, 1.0, -500.0));
        assert!(p.scale.is_infinite());

        let behind = projection.project(&Point3D::new(1.0, 1.0, -600.0));
        assert!(behind.scale < 0.0);
    }

    #[test]
    fn test_placement() {
        let placement = Placement::new(Point2D::new(100.0, 50.0), FRAC_PI_2, 2.0);
        let p = placement.apply(&Point2D::new(1.0, 0.0));
        assert!((p.x - 100.0).abs() < EPS);
        assert!((p.y - 52.0).abs() < EPS);
    }

    proptest! {
        #[test]
        fn rotation_round_trip(
            x in -1000.0..1000.0f64,
            y in -1000.0..1000.0f64,
            z in -1000.0..1000.0f64,
            ax in -20.0..20.0f64,
            ay in -20.0..20.0f64,
            az in -20.0..20.0f64,
        ) {
            let rotation = Rotation::new(ax, ay, az);
            let p = Point3D::new(x, y, z);
            let back = rotation.invert(&rotation.apply(&p));
            prop_assert!(close(&back, &p, 1e-8));
        }

        #[test]
        fn rotation_preserves_norm(
            x in -1000.0..1000.0f64,
            y in -1000.0..1000.0f64,
            z in -1000.0..1000.0f64,
            ax in -20.0..20.0f64,
            ay in -20.0..20.0f64,
            az in -20.0..20.0f64,
        ) {
            let p = Point3D::new(x, y, z);
            let rotated = Rotation::new(ax, ay, az).apply(&p);
            prop_assert!((rotated.coords.norm() - p.coords.norm()).abs() < 1e-8);
        }

        #[test]
        fn projection_scale_decreases_with_depth(
            d in 1.0..2000.0f64,
            t in 0.0..1.0f64,
            dz in 0.001..500.0f64,
        ) {
            let projection = Projection::new(d, 800.0, 600.0);
            // z strictly above -D
            let z = -d + 0.001 + t * 2.0 * d;
            let near = projection.project(&Point3D::new(0.0, 0.0, z));
            let far = projection.project(&Point3D::new(0.0, 0.0, z + dz));
            prop_assert!(near.scale > 0.0);
            prop_assert!(far.scale < near.scale);
        }
    }
}
