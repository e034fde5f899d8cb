//! Orbiting ellipses that deform as they turn, leaving soft trails

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::{self, ParamError, ParamSpec, ParamValue};
use super::{frames, Sketch, SketchKind};
use crate::geometry::{Placement, Point2D};
use crate::render::{Canvas, Color};
use crate::shapes::{Curve, Ellipse};

const ORBIT_RADIUS: f64 = 100.0;
const SEGMENTS: usize = 64;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EllipsesConfig {
    pub count: u32,
    pub speed: f64,
    pub base_radius: f64,
    pub deformation: f64,
    pub color_hue: f64,
    pub opacity: f64,
}

impl Default for EllipsesConfig {
    fn default() -> Self {
        Self {
            count: 5,
            speed: 0.02,
            base_radius: 50.0,
            deformation: 30.0,
            color_hue: 200.0,
            opacity: 0.7,
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::int("count", "Ellipses", 1, 20),
    ParamSpec::float("speed", "Speed", 0.001, 0.1, 0.001),
    ParamSpec::float("base_radius", "Base radius", 20.0, 150.0, 1.0),
    ParamSpec::float("deformation", "Deformation", 0.0, 100.0, 1.0),
    ParamSpec::float("color_hue", "Hue", 0.0, 360.0, 1.0),
    ParamSpec::float("opacity", "Opacity", 0.0, 1.0, 0.01),
];

pub struct Ellipses {
    config: EllipsesConfig,
    time: f64,
}

impl Default for Ellipses {
    fn default() -> Self {
        Self::new()
    }
}

impl Ellipses {
    pub fn new() -> Self {
        Self {
            config: EllipsesConfig::default(),
            time: 0.0,
        }
    }

    /// Outline of ellipse `i` on a canvas of the given size, or `None` when
    /// the deformation has pushed a radius below zero
    fn outline(&self, i: u32, width: f64, height: f64) -> Option<Vec<Point2D>> {
        let cfg = &self.config;
        let t = self.time;
        let i = i as f64;

        let angle = i / cfg.count as f64 * TAU + t;
        let center = Point2D::new(
            width / 2.0 + angle.cos() * ORBIT_RADIUS,
            height / 2.0 + angle.sin() * ORBIT_RADIUS,
        );
        let radius_x = cfg.base_radius + (t * 2.0 + i).sin() * cfg.deformation;
        let radius_y = cfg.base_radius + (t * 3.0 + i).cos() * cfg.deformation;
        if radius_x < 0.0 || radius_y < 0.0 {
            return None;
        }

        let ellipse = Ellipse::new(radius_x, radius_y);
        let placement = Placement::new(center, t + i, 1.0);
        Some(placement.apply_all(&ellipse.polyline(SEGMENTS)))
    }
}

impl Sketch for Ellipses {
    fn kind(&self) -> SketchKind {
        SketchKind::Ellipses
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
        canvas.clear(Color::WHITE.with_alpha(0.1));

        let cfg = &self.config;
        let (width, height) = (canvas.width(), canvas.height());
        for i in 0..cfg.count {
            if let Some(outline) = self.outline(i, width, height) {
                let hue = cfg.color_hue + i as f64 * 30.0;
                canvas.fill_path(&outline, Color::hsla(hue, 70.0, 50.0, cfg.opacity));
            }
        }
    }
}
