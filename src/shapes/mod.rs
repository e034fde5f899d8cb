//! Shapes module - geometry generators for the sketches
//!
//! This module provides:
//! - `Curve` trait for parametric 2D curves
//! - Primitive shapes: Circle3D, Ellipse, RegularPolygon, Square
//! - `Path` for sampled curves (Lissajous figures, waves)
//! - `Mesh` for 3D wireframes

mod mesh3d;
mod path;
mod primitives;
mod traits;

pub use mesh3d::Mesh;
pub use path::Path;
pub use primitives::{Circle3D, Ellipse, RegularPolygon, Square};
pub use traits::Curve;
