//! Squares circling on a breathing orbit
//!
//! Each square's orbit radius and size follow their own sine phase, and
//! neighbours spin in opposite directions.

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::{self, ParamError, ParamSpec, ParamValue};
use super::{frames, Sketch, SketchKind};
use crate::geometry::{Placement, Point2D};
use crate::render::{Canvas, Color, Stroke};
use crate::shapes::Square;

const ORBIT_RADIUS: f64 = 150.0;
const ORBIT_SWING: f64 = 50.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectanglesConfig {
    pub count: u32,
    pub speed: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub rotation: bool,
    pub rotation_speed: f64,
    pub stroke_width: f64,
}

impl Default for RectanglesConfig {
    fn default() -> Self {
        Self {
            count: 10,
            speed: 0.03,
            min_size: 20.0,
            max_size: 80.0,
            rotation: true,
            rotation_speed: 0.01,
            stroke_width: 2.0,
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::int("count", "Rectangles", 1, 30),
    ParamSpec::float("speed", "Speed", 0.001, 0.1, 0.001),
    ParamSpec::float("min_size", "Min size", 10.0, 50.0, 1.0),
    ParamSpec::float("max_size", "Max size", 50.0, 200.0, 1.0),
    ParamSpec::toggle("rotation", "Rotation"),
    ParamSpec::float("rotation_speed", "Rotation speed", 0.001, 0.05, 0.001),
    ParamSpec::float("stroke_width", "Stroke width", 1.0, 10.0, 0.5),
];

pub struct Rectangles {
    config: RectanglesConfig,
    time: f64,
}

impl Default for Rectangles {
    fn default() -> Self {
        Self::new()
    }
}

impl Rectangles {
    pub fn new() -> Self {
        Self {
            config: RectanglesConfig::default(),
            time: 0.0,
        }
    }

    /// Placement and side length of square `i`
    fn square(&self, index: u32, width: f64, height: f64) -> (Placement, f64) {
        let cfg = &self.config;
        let t = self.time;
        let i = index as f64;

        let angle = i / cfg.count as f64 * TAU + t * 0.5;
        let radius = ORBIT_RADIUS + (t + i * 0.5).sin() * ORBIT_SWING;
        let center = Point2D::new(
            width / 2.0 + angle.cos() * radius,
            height / 2.0 + angle.sin() * radius,
        );

        let half_range = (cfg.max_size - cfg.min_size) / 2.0;
        let size = cfg.min_size + (t * 2.0 + i).sin() * half_range + half_range;

        let rotation = if cfg.rotation {
            let direction = if index % 2 == 0 { 1.0 } else { -1.0 };
            t * cfg.rotation_speed * direction + i
        } else {
            0.0
        };

        (Placement::new(center, rotation, 1.0), size)
    }
}

impl Sketch for Rectangles {
    fn kind(&self) -> SketchKind {
        SketchKind::Rectangles
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
        self.time += self.config.speed * frames(dt);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::WHITE);

        let stroke = Stroke::new(self.config.stroke_width, Color::BLACK);
        let (width, height) = (canvas.width(), canvas.height());
        for i in 0..self.config.count {
            let (placement, size) = self.square(i, width, height);
            let corners = placement.apply_all(&Square::new(size).corners());
            canvas.stroke_path(&corners, true, stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DisplayList;

    #[test]
    fn test_one_outline_per_square() {
        let mut list = DisplayList::new(800.0, 600.0);
        Rectangles::new().draw(&mut list);
        assert_eq!(list.strokes().count(), 10);
        assert!(list.strokes().all(|(points, _)| points.len() == 4));
    }

    #[test]
    fn test_size_stays_in_range() {
        let mut sketch = Rectangles::new();
        for _ in 0..200 {
            sketch.update(1.0 / 60.0);
            for i in 0..sketch.config.count {
                let (_, size) = sketch.square(i, 800.0, 600.0);
                assert!(size >= 20.0 - 1e-9 && size <= 80.0 + 1e-9);
            }
        }
    }

    #[test]
    fn test_neighbours_spin_opposite_ways() {
        let mut sketch = Rectangles::new();
        sketch.time = 10.0;
        let (even, _) = sketch.square(0, 800.0, 600.0);
        let (odd, _) = sketch.square(1, 800.0, 600.0);
        assert!((even.rotation - 0.1).abs() < 1e-9);
        assert!((odd.rotation - 0.9).abs() < 1e-9);

        sketch.set_param("rotation", ParamValue::Bool(false)).unwrap();
        let (still, _) = sketch.square(1, 800.0, 600.0);
        assert_eq!(still.rotation, 0.0);
    }
}
