//! Triangles arranged in a ring: spinning, orbiting, pulsing or in a flower

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::{self, ParamError, ParamSpec, ParamValue};
use super::{Sketch, SketchKind};
use crate::geometry::{Placement, Point2D};
use crate::render::{Canvas, Color, Stroke};
use crate::shapes::RegularPolygon;
use crate::tween::{Animatable, Easing, Prop, Repeat, Scheduler, Step, Timeline};

const STAGGER: f64 = 0.1;
const ORBIT_RADIUS: f64 = 100.0;
const FLOWER_RADIUS: f64 = 80.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TriangleAnimation {
    Spin,
    Orbit,
    Pulse,
    Flower,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrianglesConfig {
    pub triangle_count: u32,
    pub size: f64,
    pub stroke_width: f64,
    pub animation_type: TriangleAnimation,
    pub duration: f64,
    pub ease: Easing,
}

impl Default for TrianglesConfig {
    fn default() -> Self {
        Self {
            triangle_count: 6,
            size: 120.0,
            stroke_width: 2.0,
            animation_type: TriangleAnimation::Spin,
            duration: 2.0,
            ease: Easing::Power2InOut,
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::int("triangle_count", "Triangles", 1, 12),
    ParamSpec::float("size", "Size", 50.0, 200.0, 1.0),
    ParamSpec::float("stroke_width", "Stroke width", 1.0, 10.0, 0.5),
    ParamSpec::choice("animation_type", "Animation", &["spin", "orbit", "pulse", "flower"]),
    ParamSpec::float("duration", "Duration", 0.5, 5.0, 0.1),
    ParamSpec::choice(
        "ease",
        "Easing",
        &["power1.inOut", "power2.inOut", "elastic.inOut", "back.inOut"],
    ),
];

/// One animated triangle; angles in degrees
#[derive(Clone, Debug, PartialEq)]
pub struct TriangleState {
    pub rotation: f64,
    pub scale: f64,
    pub orbit_angle: f64,
    pub orbit_radius: f64,
}

impl Animatable for TriangleState {
    fn get(&self, prop: Prop) -> Option<f64> {
        match prop {
            Prop::Rotation => Some(self.rotation),
            Prop::Scale => Some(self.scale),
            Prop::OrbitAngle => Some(self.orbit_angle),
            _ => None,
        }
    }

    fn set(&mut self, prop: Prop, value: f64) {
        match prop {
            Prop::Rotation => self.rotation = value,
            Prop::Scale => self.scale = value,
            Prop::OrbitAngle => self.orbit_angle = value,
            _ => {}
        }
    }
}

pub struct Triangles {
    config: TrianglesConfig,
    triangles: Vec<TriangleState>,
    scheduler: Scheduler<TriangleState>,
}

impl Default for Triangles {
    fn default() -> Self {
        Self::new()
    }
}

impl Triangles {
    pub fn new() -> Self {
        let mut sketch = Self {
            config: TrianglesConfig::default(),
            triangles: Vec::new(),
            scheduler: Scheduler::new(),
        };
        sketch.rebuild();
        sketch
    }

    fn rebuild(&mut self) {
        let count = self.config.triangle_count;

        self.scheduler.kill_all();
        self.triangles = (0..count)
            .map(|i| {
                let angle = i as f64 / count as f64 * 360.0;
                TriangleState {
                    rotation: angle,
                    scale: 1.0,
                    orbit_angle: angle,
                    orbit_radius: 0.0,
                }
            })
            .collect();

        log::debug!("Rebuilt {} triangles", self.triangles.len());
        self.restart();
    }

    /// Start the configured animation
    ///
    /// Orbit and flower place the triangles on their ring directly; spin and
    /// pulse leave the ring radius wherever the last animation put it.
    fn restart(&mut self) {
        self.scheduler.kill_all();

        let cfg = &self.config;
        let spin = |duration: f64, turn: f64| {
            Timeline::single(Step::new(duration, Easing::Linear).by(Prop::Rotation, turn))
                .repeat(Repeat::Infinite)
        };

        for (i, triangle) in self.triangles.iter_mut().enumerate() {
            let delay = i as f64 * STAGGER;
            match cfg.animation_type {
                TriangleAnimation::Spin => {
                    self.scheduler.schedule(i, spin(cfg.duration, 360.0).delay(delay));
                }
                TriangleAnimation::Orbit => {
                    triangle.orbit_radius = ORBIT_RADIUS;
                    let orbit = Timeline::single(
                        Step::new(cfg.duration * 2.0, Easing::Linear).by(Prop::OrbitAngle, 360.0),
                    )
                    .repeat(Repeat::Infinite);
                    self.scheduler.schedule(i, orbit);
                    self.scheduler.schedule(i, spin(cfg.duration, -360.0));
                }
                TriangleAnimation::Pulse => {
                    let pulse = Timeline::single(Step::new(cfg.duration, cfg.ease).to(Prop::Scale, 1.5))
                        .repeat(Repeat::Infinite)
                        .yoyo(true)
                        .delay(delay);
                    self.scheduler.schedule(i, pulse);
                }
                TriangleAnimation::Flower => {
                    triangle.orbit_radius = FLOWER_RADIUS;
                    self.scheduler.schedule(i, spin(cfg.duration, 360.0));
                }
            }
        }

        log::debug!(
            "Started {:?} on {} triangles",
            cfg.animation_type,
            self.triangles.len()
        );
    }
}

impl Sketch for Triangles {
    fn kind(&self) -> SketchKind {
        SketchKind::Triangles
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn param(&self, key: &str) -> Result<ParamValue, ParamError> {
        params::read(PARAMS, &self.config, key)
    }

    fn set_param(&mut self, key: &str, value: ParamValue) -> Result<(), ParamError> {
        params::write(PARAMS, &mut self.config, key, value)?;
        match key {
            "triangle_count" => self.rebuild(),
            "animation_type" | "duration" | "ease" => self.restart(),
            _ => {}
        }
        Ok(())
    }

    fn config(&self) -> Result<Value, ParamError> {
        Ok(serde_json::to_value(&self.config)?)
    }

    fn load_config(&mut self, config: Value) -> Result<(), ParamError> {
        self.config = params::load(config)?;
        self.rebuild();
        Ok(())
    }

    fn update(&mut self, dt: f64) {
        self.scheduler.tick(dt, &mut self.triangles);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::WHITE);

        let cfg = &self.config;
        let (cx, cy) = (canvas.width() / 2.0, canvas.height() / 2.0);
        let outline = RegularPolygon::new(3, cfg.size).vertices();

        for triangle in &self.triangles {
            let orbit = triangle.orbit_angle.to_radians();
            let center = Point2D::new(
                cx + orbit.cos() * triangle.orbit_radius,
                cy + orbit.sin() * triangle.orbit_radius,
            );
            let placement = Placement::new(center, triangle.rotation.to_radians(), triangle.scale);
            let stroke = Stroke::new(cfg.stroke_width * triangle.scale.abs(), Color::BLACK);
            canvas.stroke_path(&placement.apply_all(&outline), true, stroke);
        }
    }
}
