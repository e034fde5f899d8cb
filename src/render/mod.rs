//! Render module - drawing surface and UI components
//!
//! This module provides:
//! - `Canvas` trait and the recording `DisplayList`
//! - Motion trails for translucent clears
//! - Sketch display widget and parameter panel (egui)

mod canvas;
mod panel;
mod trail;
mod view;

pub use canvas::{Canvas, Color, DisplayList, Stroke};
pub use panel::param_controls;
pub use view::SketchView;

#[cfg(test)]
pub use canvas::DrawCommand;
