//! Tween module - time-driven property animation for shape collections
//!
//! This module provides:
//! - `Easing` curves addressed by preset name
//! - `Step` / `Timeline` builders (delay, repeat, yoyo, sequencing)
//! - `Scheduler` that plays timelines against `Animatable` records

mod easing;
mod scheduler;
mod timeline;
mod traits;

pub use easing::Easing;
pub use scheduler::Scheduler;
pub use timeline::{Repeat, Step, Timeline};
pub use traits::{Animatable, Prop};
