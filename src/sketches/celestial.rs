//! Celestial sphere
//!
//! A rotating wireframe globe: celestial and galactic equators, meridians,
//! parallels and pole markers, all drawn through the 3D transform pipeline.

use std::f64::consts::{FRAC_PI_2, FRAC_PI_3, PI, TAU};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::{self, ParamError, ParamSpec, ParamValue};
use super::{frames, Sketch, SketchKind};
use crate::geometry::{Point3D, Projection, Rotation};
use crate::render::{Canvas, Color, Stroke};
use crate::shapes::Circle3D;

/// Samples per great circle
const SEGMENTS: usize = 100;
const MARKER_RADIUS: f64 = 4.0;
const MERIDIANS: usize = 6;
const PARALLELS: usize = 4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CelestialConfig {
    pub auto_rotate: bool,
    pub rotation_speed: f64,
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub rotation_z: f64,
    pub perspective: f64,
    pub show_equator: bool,
    pub show_poles: bool,
    pub show_latitude: bool,
    pub show_longitude: bool,
    pub show_labels: bool,
    pub radius: f64,
    pub line_width: f64,
}

impl Default for CelestialConfig {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            rotation_speed: 0.002,
            rotation_x: 0.3,
            rotation_y: 0.5,
            rotation_z: 0.0,
            perspective: 500.0,
            show_equator: true,
            show_poles: true,
            show_latitude: true,
            show_longitude: true,
            show_labels: true,
            radius: 250.0,
            line_width: 1.5,
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::toggle("auto_rotate", "Auto rotate"),
    ParamSpec::float("rotation_speed", "Rotation speed", 0.001, 0.01, 0.0005),
    ParamSpec::float("rotation_x", "Rotation X", 0.0, TAU, 0.01),
    ParamSpec::float("rotation_y", "Rotation Y", 0.0, TAU, 0.01),
    ParamSpec::float("rotation_z", "Rotation Z", 0.0, TAU, 0.01),
    ParamSpec::float("perspective", "Perspective", 300.0, 1500.0, 10.0),
    ParamSpec::toggle("show_equator", "Equator"),
    ParamSpec::toggle("show_poles", "Poles"),
    ParamSpec::toggle("show_latitude", "Latitude"),
    ParamSpec::toggle("show_longitude", "Longitude"),
    ParamSpec::toggle("show_labels", "Stars"),
    ParamSpec::float("radius", "Radius", 100.0, 400.0, 1.0),
    ParamSpec::float("line_width", "Line width", 0.5, 5.0, 0.1),
];

pub struct Celestial {
    config: CelestialConfig,
}

impl Default for Celestial {
    fn default() -> Self {
        Self::new()
    }
}

impl Celestial {
    pub fn new() -> Self {
        Self {
            config: CelestialConfig::default(),
        }
    }

    fn rotation(&self) -> Rotation {
        Rotation::new(
            self.config.rotation_x,
            self.config.rotation_y,
            self.config.rotation_z,
        )
    }

    fn draw_circle(&self, canvas: &mut dyn Canvas, projection: &Projection, circle: Circle3D, stroke: Stroke) {
        let rotation = self.rotation();
        let points: Vec<_> = circle
            .samples(SEGMENTS)
            .iter()
            .map(|p| projection.project_rotated(&rotation, p).point())
            .collect();
        canvas.stroke_path(&points, false, stroke);
    }

    fn draw_marker(&self, canvas: &mut dyn Canvas, projection: &Projection, point: Point3D, color: Color) {
        let projected = projection.project_rotated(&self.rotation(), &point);
        canvas.fill_circle(projected.point(), MARKER_RADIUS, color);
    }
}

impl Sketch for Celestial {
    fn kind(&self) -> SketchKind {
        SketchKind::Celestial
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
        if self.config.auto_rotate {
            let step = self.config.rotation_speed * frames(dt);
            self.config.rotation_y += step;
            self.config.rotation_x += step * 0.3;
        }
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::WHITE.with_alpha(0.95));

        let cfg = &self.config;
        let r = cfg.radius;
        let width = cfg.line_width;
        let projection = Projection::new(cfg.perspective, canvas.width(), canvas.height());

        if cfg.show_equator {
            self.draw_circle(
                canvas,
                &projection,
                Circle3D::flat(r),
                Stroke::new(width, Color::rgb8(76, 175, 80)),
            );
            // Galactic equator
            self.draw_circle(
                canvas,
                &projection,
                Circle3D::new(r, FRAC_PI_3, 0.0),
                Stroke::new(width, Color::rgb8(156, 39, 176)).dashed(5.0, 5.0),
            );
        }

        if cfg.show_longitude {
            let stroke = Stroke::new(width, Color::rgba8(100, 150, 255, 0.3));
            for i in 0..MERIDIANS {
                let roll = i as f64 / MERIDIANS as f64 * PI;
                self.draw_circle(canvas, &projection, Circle3D::new(r, FRAC_PI_2, roll), stroke);
            }
        }

        if cfg.show_latitude {
            let stroke = Stroke::new(width, Color::rgba8(100, 200, 255, 0.3));
            for i in 1..PARALLELS {
                let latitude = i as f64 / PARALLELS as f64 * FRAC_PI_2;
                self.draw_circle(canvas, &projection, Circle3D::flat(r * latitude.cos()), stroke);
            }
        }

        if cfg.show_poles {
            let pole = Color::rgb8(0x66, 0xff, 0xff);
            self.draw_marker(canvas, &projection, Point3D::new(0.0, r, 0.0), pole);
            self.draw_marker(canvas, &projection, Point3D::new(0.0, -r, 0.0), pole);

            let galactic = Color::rgb8(0xff, 0x66, 0xff);
            let (y, z) = (r * FRAC_PI_3.cos(), r * FRAC_PI_3.sin());
            self.draw_marker(canvas, &projection, Point3D::new(0.0, y, z), galactic);
            self.draw_marker(canvas, &projection, Point3D::new(0.0, -y, -z), galactic);
        }

        if cfg.show_labels {
            let star = Color::rgb8(0xff, 0xaa, 0x00);
            self.draw_marker(canvas, &projection, Point3D::new(r * 0.7, r * 0.5, r * 0.3), star);
            self.draw_marker(canvas, &projection, Point3D::new(r * 0.6, -r * 0.4, -r * 0.5), star);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayList, DrawCommand};

    fn still() -> Celestial {
        let mut sketch = Celestial::new();
        sketch.config.auto_rotate = false;
        sketch.config.rotation_x = 0.0;
        sketch.config.rotation_y = 0.0;
        sketch.config.rotation_z = 0.0;
        sketch
    }

    #[test]
    fn test_flat_equator_is_a_screen_circle() {
        let mut sketch = still();
        sketch.config.show_longitude = false;
        sketch.config.show_latitude = false;

        let mut list = DisplayList::new(800.0, 600.0);
        sketch.draw(&mut list);

        let (equator, _) = list.strokes().next().expect("equator stroke");
        assert_eq!(equator.len(), SEGMENTS + 1);
        for p in equator {
            let distance = ((p.x - 400.0).powi(2) + (p.y - 300.0).powi(2)).sqrt();
            assert!((distance - 250.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_galactic_equator_is_dashed() {
        let mut list = DisplayList::new(800.0, 600.0);
        still().draw(&mut list);
        let dashed = list.strokes().filter(|(_, s)| s.dash.is_some()).count();
        assert_eq!(dashed, 1);
    }

    #[test]
    fn test_toggles() {
        let mut sketch = still();
        let mut list = DisplayList::new(800.0, 600.0);
        sketch.draw(&mut list);
        // 2 equators + 6 meridians + 3 parallels
        assert_eq!(list.strokes().count(), 11);
        let markers = |list: &DisplayList| {
            list.commands()
                .iter()
                .filter(|c| matches!(c, DrawCommand::FillCircle { .. }))
                .count()
        };
        assert_eq!(markers(&list), 6);

        sketch.set_param("show_labels", ParamValue::Bool(false)).unwrap();
        sketch.set_param("show_longitude", ParamValue::Bool(false)).unwrap();
        let mut list = DisplayList::new(800.0, 600.0);
        sketch.draw(&mut list);
        assert_eq!(list.strokes().count(), 5);
        assert_eq!(markers(&list), 4);
    }

    #[test]
    fn test_auto_rotate() {
        let mut sketch = Celestial::new();
        sketch.update(1.0 / 60.0);
        assert!((sketch.config.rotation_y - 0.502).abs() < 1e-9);
        assert!((sketch.config.rotation_x - 0.3006).abs() < 1e-9);

        sketch.set_param("auto_rotate", ParamValue::Bool(false)).unwrap();
        sketch.update(1.0);
        assert!((sketch.config.rotation_y - 0.502).abs() < 1e-9);
    }
}
