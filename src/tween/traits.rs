//! Animatable trait - named numeric properties a tween can drive
//!
//! Shape state records expose their animated fields through this trait so
//! the scheduler can read start values and write interpolated values without
//! knowing the record type.

/// A numeric property of an animated shape
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Prop {
    /// Vertical offset
    Y,
    Radius,
    Scale,
    /// Rotation in degrees
    Rotation,
    Opacity,
    /// Orbit position in degrees
    OrbitAngle,
    /// Fractional side count of a morphing polygon
    Sides,
}

/// A record whose properties can be tweened
pub trait Animatable {
    /// Current value, or `None` if this record has no such property
    fn get(&self, prop: Prop) -> Option<f64>;

    /// Write a value; properties the record lacks are ignored
    fn set(&mut self, prop: Prop, value: f64);
}
