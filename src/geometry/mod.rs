//! Geometry module - points and the 3D transform pipeline
//!
//! This module provides:
//! - `Point3D` / `Point2D` aliases over nalgebra points
//! - Axis rotations and the X → Y → Z `Rotation`
//! - Perspective `Projection` to screen space
//! - `Placement` for positioning 2D shapes on screen

mod transform;

pub use transform::{rotate_z, Placement, Projection, Rotation};

/// A point in object-local, unscaled 3D space
pub type Point3D = nalgebra::Point3<f64>;

/// A point in screen space (pixels, origin top-left)
pub type Point2D = nalgebra::Point2<f64>;
