//! Sketches module - the generative-art pieces
//!
//! This module provides:
//! - `Sketch` trait implemented by every piece
//! - `SketchKind` to list and create them
//! - Parameter plumbing (`params`) shared by the control panel
//!
//! Each sketch owns its configuration and its animated state. The host
//! edits the configuration between frames, then calls `update` with the
//! elapsed time and `draw` with a fresh canvas.

mod celestial;
mod circles;
mod cube3d;
mod ellipses;
mod grid;
mod lissajous;
mod params;
mod polygons;
mod rectangles;
mod squares;
mod triangles;
mod waves;

pub use celestial::Celestial;
pub use circles::Circles;
pub use cube3d::Cube3d;
pub use ellipses::Ellipses;
pub use grid::Grid;
pub use lissajous::Lissajous;
pub use params::{ParamError, ParamKind, ParamSpec, ParamValue};
pub use polygons::Polygons;
pub use rectangles::Rectangles;
pub use squares::Squares;
pub use triangles::Triangles;
pub use waves::Waves;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::render::Canvas;

/// Frame rate that per-frame speeds are expressed in
const REFERENCE_FPS: f64 = 60.0;

/// Elapsed time expressed in reference frames
pub(crate) fn frames(dt: f64) -> f64 {
    dt * REFERENCE_FPS
}

/// A generative-art piece
pub trait Sketch {
    fn kind(&self) -> SketchKind;

    /// Parameters shown in the control panel
    fn params(&self) -> &'static [ParamSpec];

    fn param(&self, key: &str) -> Result<ParamValue, ParamError>;

    /// Change one parameter
    ///
    /// Count parameters rebuild the shape collection; animation parameters
    /// restart the animations. Everything else applies on the next frame.
    fn set_param(&mut self, key: &str, value: ParamValue) -> Result<(), ParamError>;

    /// Current configuration as JSON (for settings persistence)
    fn config(&self) -> Result<Value, ParamError>;

    /// Replace the configuration and rebuild; missing fields take defaults
    fn load_config(&mut self, config: Value) -> Result<(), ParamError>;

    /// Advance by `dt` seconds
    fn update(&mut self, dt: f64);

    /// Paint the current state
    fn draw(&self, canvas: &mut dyn Canvas);
}

/// Available sketches
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SketchKind {
    #[default]
    Celestial,
    Cube3d,
    Lissajous,
    Ellipses,
    Rectangles,
    Waves,
    Circles,
    Grid,
    Squares,
    Triangles,
    Polygons,
}

impl SketchKind {
    pub fn all() -> &'static [SketchKind] {
        &[
            SketchKind::Celestial,
            SketchKind::Cube3d,
            SketchKind::Lissajous,
            SketchKind::Ellipses,
            SketchKind::Rectangles,
            SketchKind::Waves,
            SketchKind::Circles,
            SketchKind::Grid,
            SketchKind::Squares,
            SketchKind::Triangles,
            SketchKind::Polygons,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            SketchKind::Celestial => "Celestial Sphere",
            SketchKind::Cube3d => "Cube 3D",
            SketchKind::Lissajous => "Lissajous",
            SketchKind::Ellipses => "Ellipses",
            SketchKind::Rectangles => "Rectangles",
            SketchKind::Waves => "Waves",
            SketchKind::Circles => "Circles",
            SketchKind::Grid => "Grid",
            SketchKind::Squares => "Squares",
            SketchKind::Triangles => "Triangles",
            SketchKind::Polygons => "Polygons",
        }
    }

    /// Key used for this sketch in the settings file
    pub fn key(&self) -> &'static str {
        match self {
            SketchKind::Celestial => "celestial",
            SketchKind::Cube3d => "cube3d",
            SketchKind::Lissajous => "lissajous",
            SketchKind::Ellipses => "ellipses",
            SketchKind::Rectangles => "rectangles",
            SketchKind::Waves => "waves",
            SketchKind::Circles => "circles",
            SketchKind::Grid => "grid",
            SketchKind::Squares => "squares",
            SketchKind::Triangles => "triangles",
            SketchKind::Polygons => "polygons",
        }
    }

    /// New instance with default configuration
    pub fn create(&self) -> Box<dyn Sketch> {
        match self {
            SketchKind::Celestial => Box::new(Celestial::new()),
            SketchKind::Cube3d => Box::new(Cube3d::new()),
            SketchKind::Lissajous => Box::new(Lissajous::new()),
            SketchKind::Ellipses => Box::new(Ellipses::new()),
            SketchKind::Rectangles => Box::new(Rectangles::new()),
            SketchKind::Waves => Box::new(Waves::new()),
            SketchKind::Circles => Box::new(Circles::new()),
            SketchKind::Grid => Box::new(Grid::new()),
            SketchKind::Squares => Box::new(Squares::new()),
            SketchKind::Triangles => Box::new(Triangles::new()),
            SketchKind::Polygons => Box::new(Polygons::new()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayList, DrawCommand};

    #[test]
    fn test_every_sketch_runs() {
        for kind in SketchKind::all() {
            let mut sketch = kind.create();
            assert_eq!(sketch.kind(), *kind);

            for _ in 0..10 {
                sketch.update(1.0 / 60.0);
            }
            let mut list = DisplayList::new(800.0, 600.0);
            sketch.draw(&mut list);
            assert!(!list.is_empty(), "{} drew nothing", kind.name());
        }
    }

    #[test]
    fn test_zero_counts_draw_nothing() {
        let cases = [
            (SketchKind::Ellipses, "count"),
            (SketchKind::Rectangles, "count"),
            (SketchKind::Waves, "wave_count"),
            (SketchKind::Lissajous, "rows"),
            (SketchKind::Lissajous, "cols"),
            (SketchKind::Circles, "circle_count"),
            (SketchKind::Grid, "grid_size"),
            (SketchKind::Squares, "square_count"),
            (SketchKind::Triangles, "triangle_count"),
            (SketchKind::Polygons, "sides"),
        ];

        for (kind, key) in cases {
            let mut config = serde_json::Map::new();
            config.insert(key.to_string(), Value::from(0));

            let mut sketch = kind.create();
            sketch
                .load_config(Value::Object(config))
                .unwrap_or_else(|e| panic!("{}.{}: {}", kind.name(), key, e));
            for _ in 0..30 {
                sketch.update(1.0 / 60.0);
            }

            let mut list = DisplayList::new(800.0, 600.0);
            sketch.draw(&mut list);
            assert_eq!(list.len(), 1, "{} with {} = 0 drew shapes", kind.name(), key);
            assert!(matches!(list.commands()[0], DrawCommand::Clear(_)));
        }
    }

    #[test]
    fn test_every_param_reads_back() {
        for kind in SketchKind::all() {
            let mut sketch = kind.create();
            for spec in sketch.params() {
                let value = sketch
                    .param(spec.key)
                    .unwrap_or_else(|e| panic!("{}: {}", kind.name(), e));
                sketch
                    .set_param(spec.key, value.clone())
                    .unwrap_or_else(|e| panic!("{}: {}", kind.name(), e));
                assert_eq!(sketch.param(spec.key).unwrap(), value);
            }
        }
    }

    #[test]
    fn test_choice_params_accept_every_option() {
        for kind in SketchKind::all() {
            let mut sketch = kind.create();
            for spec in sketch.params() {
                if let ParamKind::Choice(options) = spec.kind {
                    for option in options {
                        sketch
                            .set_param(spec.key, ParamValue::Choice(option.to_string()))
                            .unwrap_or_else(|e| panic!("{}.{}: {}", kind.name(), spec.key, e));
                        sketch.update(0.5);
                    }
                }
            }
        }
    }

    #[test]
    fn test_config_round_trip() {
        for kind in SketchKind::all() {
            let mut sketch = kind.create();
            let config = sketch.config().unwrap();
            sketch.load_config(config.clone()).unwrap();
            assert_eq!(sketch.config().unwrap(), config);
        }
    }

    #[test]
    fn test_kind_serde() {
        let json = serde_json::to_string(&SketchKind::Cube3d).unwrap();
        assert_eq!(json, "\"cube3d\"");
        for kind in SketchKind::all() {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json.as_str(), Some(kind.key()));
        }
    }
}
