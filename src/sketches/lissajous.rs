//! Lissajous figures
//!
//! In the grid layout each cell shows the figure for its own frequency
//! pair (`a = col + 1`, `b = row + 1`), so the table reads like a chart of
//! ratios. The single layout draws one large figure with the configured
//! `a` and `b`. Animation shifts the phase of every figure together.

use std::f64::consts::{FRAC_PI_2, TAU};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::{self, ParamError, ParamSpec, ParamValue};
use super::{frames, Sketch, SketchKind};
use crate::geometry::Point2D;
use crate::render::{Canvas, Color, Stroke};
use crate::shapes::Path;

const SEGMENTS: usize = 200;
const MARGIN: f64 = 80.0;
/// Figure size as a fraction of its cell
const FILL: f64 = 0.8;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Layout {
    Grid,
    Single,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LissajousConfig {
    pub layout: Layout,
    pub rows: u32,
    pub cols: u32,
    pub a: u32,
    pub b: u32,
    pub delta: f64,
    pub speed: f64,
    pub show_points: bool,
    pub point_size: f64,
    pub line_width: f64,
    pub color_hue: f64,
    pub animate: bool,
}

impl Default for LissajousConfig {
    fn default() -> Self {
        Self {
            layout: Layout::Grid,
            rows: 4,
            cols: 4,
            a: 3,
            b: 2,
            delta: FRAC_PI_2,
            speed: 0.02,
            show_points: true,
            point_size: 4.0,
            line_width: 2.0,
            color_hue: 200.0,
            animate: true,
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::choice("layout", "Layout", &["grid", "single"]),
    ParamSpec::int("rows", "Rows", 2, 8),
    ParamSpec::int("cols", "Columns", 2, 8),
    ParamSpec::int("a", "Frequency A", 1, 10),
    ParamSpec::int("b", "Frequency B", 1, 10),
    ParamSpec::float("delta", "Phase", 0.0, TAU, 0.01),
    ParamSpec::float("speed", "Speed", 0.001, 0.1, 0.001),
    ParamSpec::toggle("show_points", "Show points"),
    ParamSpec::float("point_size", "Point size", 0.0, 10.0, 0.5),
    ParamSpec::float("line_width", "Line width", 0.5, 5.0, 0.1),
    ParamSpec::float("color_hue", "Hue", 0.0, 360.0, 1.0),
    ParamSpec::toggle("animate", "Animate"),
];

pub struct Lissajous {
    config: LissajousConfig,
    time: f64,
}

impl Default for Lissajous {
    fn default() -> Self {
        Self::new()
    }
}

impl Lissajous {
    pub fn new() -> Self {
        Self {
            config: LissajousConfig::default(),
            time: 0.0,
        }
    }

    /// Figure center, size and frequencies for every figure on a canvas
    fn figures(&self, width: f64, height: f64) -> Vec<(Point2D, f64, f64, f64)> {
        let cfg = &self.config;
        let available_w = width - MARGIN * 2.0;
        let available_h = height - MARGIN * 2.0;

        match cfg.layout {
            Layout::Single => {
                let size = available_w.min(available_h) * FILL;
                let center = Point2D::new(width / 2.0, height / 2.0);
                vec![(center, size, cfg.a as f64, cfg.b as f64)]
            }
            Layout::Grid => {
                if cfg.rows == 0 || cfg.cols == 0 {
                    return Vec::new();
                }
                let cell_w = available_w / cfg.cols as f64;
                let cell_h = available_h / cfg.rows as f64;
                let size = cell_w.min(cell_h) * FILL;

                (0..cfg.rows)
                    .flat_map(|row| (0..cfg.cols).map(move |col| (row, col)))
                    .map(|(row, col)| {
                        let center = Point2D::new(
                            MARGIN + cell_w * (col as f64 + 0.5),
                            MARGIN + cell_h * (row as f64 + 0.5),
                        );
                        (center, size, (col + 1) as f64, (row + 1) as f64)
                    })
                    .collect()
            }
        }
    }
}

impl Sketch for Lissajous {
    fn kind(&self) -> SketchKind {
        SketchKind::Lissajous
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn param(&self, key: &str) -> Result<ParamValue, ParamError> {
        params::read(PARAMS, &self.config, key)
    }

    fn set_param(&mut self, key: &str, value: ParamValue) -> Result<(), ParamError> {
        params::write(PARAMS, &mut self.config, key, value)
    }

    fn config(&self) -> Result<Value, ParamError> {
        Ok(serde_json::to_value(&self.config)?)
    }

    fn load_config(&mut self, config: Value) -> Result<(), ParamError> {
        self.config = params::load(config)?;
        Ok(())
    }

    fn update(&mut self, dt: f64) {
        if self.config.animate {
            self.time += self.config.speed * frames(dt);
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::WHITE);

        let cfg = &self.config;
        let phase = if cfg.animate { self.time } else { 0.0 };
        let stroke = Stroke::new(cfg.line_width, Color::hsl(cfg.color_hue, 70.0, 60.0));
        let node_color = Color::rgb8(0xff, 0x44, 0x44);

        for (center, size, a, b) in self.figures(canvas.width(), canvas.height()) {
            let path = Path::lissajous(center, size, a, b, cfg.delta, phase, SEGMENTS);
            canvas.stroke_path(path.points(), false, stroke);

            if cfg.show_points && cfg.point_size > 0.0 {
                let count = (a.max(b) * 2.0) as usize;
                for node in path.nodes(count) {
                    canvas.fill_circle(node, cfg.point_size, node_color);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayList, DrawCommand};

    fn draw(sketch: &Lissajous) -> DisplayList {
        let mut list = DisplayList::new(800.0, 600.0);
        sketch.draw(&mut list);
        list
    }

    #[test]
    fn test_grid_has_one_figure_per_cell() {
        let list = draw(&Lissajous::new());
        assert_eq!(list.strokes().count(), 16);
        for (points, _) in list.strokes() {
            assert_eq!(points.len(), SEGMENTS + 1);
        }
    }

    #[test]
    fn test_node_markers() {
        let mut sketch = Lissajous::new();
        sketch.set_param("layout", ParamValue::Choice("single".into())).unwrap();
        let list = draw(&sketch);
        let markers = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
            .count();
        // max(3, 2) * 2
        assert_eq!(markers, 6);

        sketch.set_param("show_points", ParamValue::Bool(false)).unwrap();
        assert_eq!(draw(&sketch).len(), 2);
    }

    #[test]
    fn test_unit_ratio_without_phase_is_a_diagonal() {
        let mut sketch = Lissajous::new();
        sketch.config.layout = Layout::Single;
        sketch.config.a = 1;
        sketch.config.b = 1;
        sketch.config.delta = 0.0;
        sketch.config.animate = false;

        let list = draw(&sketch);
        let (points, _) = list.strokes().next().expect("figure");
        for p in points {
            assert!(((p.x - 400.0) - (p.y - 300.0)).abs() < 1e-9);
        }
    }

    #[test]
    fn test_animation_advances_phase() {
        let mut sketch = Lissajous::new();
        sketch.update(1.0);
        assert!((sketch.time - 1.2).abs() < 1e-9);

        sketch.set_param("animate", ParamValue::Bool(false)).unwrap();
        sketch.update(1.0);
        assert!((sketch.time - 1.2).abs() < 1e-9);
    }
}
