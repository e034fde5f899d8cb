//! Rotating wireframe cube with an optional inner square and diagonals

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::{self, ParamError, ParamSpec, ParamValue};
use super::{frames, Sketch, SketchKind};
use crate::geometry::{Projection, Rotation};
use crate::render::{Canvas, Color, Stroke};
use crate::shapes::Mesh;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Cube3dConfig {
    pub auto_rotate: bool,
    pub rotation_speed: f64,
    pub rotation_x: f64,
    pub rotation_y: f64,
    pub rotation_z: f64,
    pub perspective: f64,
    pub cube_size: f64,
    pub show_inner_square: bool,
    pub show_diagonals: bool,
    pub inner_square_size: f64,
    pub line_width: f64,
}

impl Default for Cube3dConfig {
    fn default() -> Self {
        Self {
            auto_rotate: true,
            rotation_speed: 0.005,
            rotation_x: 0.5,
            rotation_y: 0.5,
            rotation_z: 0.0,
            perspective: 600.0,
            cube_size: 200.0,
            show_inner_square: true,
            show_diagonals: true,
            inner_square_size: 0.5,
            line_width: 2.0,
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::toggle("auto_rotate", "Auto rotate"),
    ParamSpec::float("rotation_speed", "Speed", 0.001, 0.02, 0.001),
    ParamSpec::float("rotation_x", "Rotation X", 0.0, TAU, 0.01),
    ParamSpec::float("rotation_y", "Rotation Y", 0.0, TAU, 0.01),
    ParamSpec::float("rotation_z", "Rotation Z", 0.0, TAU, 0.01),
    ParamSpec::float("perspective", "Perspective", 300.0, 1500.0, 10.0),
    ParamSpec::float("cube_size", "Cube size", 100.0, 400.0, 1.0),
    ParamSpec::toggle("show_inner_square", "Inner square"),
    ParamSpec::toggle("show_diagonals", "Diagonals"),
    ParamSpec::float("inner_square_size", "Inner size", 0.2, 0.8, 0.01),
    ParamSpec::float("line_width", "Line width", 0.5, 5.0, 0.1),
];

pub struct Cube3d {
    config: Cube3dConfig,
}

impl Default for Cube3d {
    fn default() -> Self {
        Self::new()
    }
}

impl Cube3d {
    pub fn new() -> Self {
        Self {
            config: Cube3dConfig::default(),
        }
    }

    fn mesh(&self) -> Mesh {
        Mesh::framed_cube(
            self.config.cube_size,
            self.config.inner_square_size,
            self.config.show_inner_square,
            self.config.show_diagonals,
        )
    }
}

impl Sketch for Cube3d {
    fn kind(&self) -> SketchKind {
        SketchKind::Cube3d
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
        canvas.clear(Color::BLACK);

        let cfg = &self.config;
        let rotation = Rotation::new(cfg.rotation_x, cfg.rotation_y, cfg.rotation_z);
        let projection = Projection::new(cfg.perspective, canvas.width(), canvas.height());
        let stroke = Stroke::new(cfg.line_width, Color::WHITE);

        for (a, b) in self.mesh().project(&rotation, &projection) {
            canvas.stroke_path(&[a, b], false, stroke);
        }
    }
}
