//! Nested squares spinning, scaling and morphing around the centre
//!
//! Squares start enlarged (scale 3) and settle into the configured
//! animation, each one a tenth of a second behind the previous.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::{self, ParamError, ParamSpec, ParamValue};
use super::{Sketch, SketchKind};
use crate::geometry::{Placement, Point2D};
use crate::render::{Canvas, Color, Stroke};
use crate::shapes::Square;
use crate::tween::{Animatable, Easing, Prop, Repeat, Scheduler, Step, Timeline};

const INITIAL_SCALE: f64 = 3.0;
/// Each square is this much smaller than the previous
const SIZE_STEP: f64 = 10.0;
const STAGGER: f64 = 0.1;
/// Vertical travel of the wave animation
const WAVE_HEIGHT: f64 = -50.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SquareAnimation {
    Rotation,
    Scale,
    Pulse,
    Wave,
    Morph,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SquaresConfig {
    pub square_count: u32,
    pub base_size: f64,
    pub rotation_speed: f64,
    pub scale_amount: f64,
    pub stroke_width: f64,
    pub animation_type: SquareAnimation,
    pub duration: f64,
    pub ease: Easing,
}

impl Default for SquaresConfig {
    fn default() -> Self {
        Self {
            square_count: 5,
            base_size: 80.0,
            rotation_speed: 2.0,
            scale_amount: 1.5,
            stroke_width: 3.0,
            animation_type: SquareAnimation::Rotation,
            duration: 2.0,
            ease: Easing::Power2InOut,
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::int("square_count", "Squares", 1, 10),
    ParamSpec::float("base_size", "Base size", 30.0, 200.0, 1.0),
    ParamSpec::float("rotation_speed", "Rotation speed", 0.5, 5.0, 0.1),
    ParamSpec::float("scale_amount", "Max scale", 1.0, 3.0, 0.05),
    ParamSpec::float("stroke_width", "Stroke width", 1.0, 10.0, 0.5),
    ParamSpec::choice(
        "animation_type",
        "Animation",
        &["rotation", "scale", "pulse", "wave", "morph"],
    ),
    ParamSpec::float("duration", "Duration", 0.5, 5.0, 0.1),
    ParamSpec::choice(
        "ease",
        "Easing",
        &[
            "power1.inOut",
            "power2.inOut",
            "power3.inOut",
            "elastic.inOut",
            "bounce.inOut",
            "back.inOut",
        ],
    ),
];

/// One animated square; `x`/`y` offset it from the canvas centre
#[derive(Clone, Debug, PartialEq)]
pub struct SquareState {
    pub rotation: f64,
    pub scale: f64,
    pub opacity: f64,
    pub x: f64,
    pub y: f64,
    pub size: f64,
}

impl Animatable for SquareState {
    fn get(&self, prop: Prop) -> Option<f64> {
        match prop {
            Prop::Rotation => Some(self.rotation),
            Prop::Scale => Some(self.scale),
            Prop::Opacity => Some(self.opacity),
            Prop::Y => Some(self.y),
            _ => None,
        }
    }

    fn set(&mut self, prop: Prop, value: f64) {
        match prop {
            Prop::Rotation => self.rotation = value,
            Prop::Scale => self.scale = value,
            Prop::Opacity => self.opacity = value,
            Prop::Y => self.y = value,
            _ => {}
        }
    }
}

pub struct Squares {
    config: SquaresConfig,
    squares: Vec<SquareState>,
    scheduler: Scheduler<SquareState>,
}

impl Default for Squares {
    fn default() -> Self {
        Self::new()
    }
}

impl Squares {
    pub fn new() -> Self {
        let mut sketch = Self {
            config: SquaresConfig::default(),
            squares: Vec::new(),
            scheduler: Scheduler::new(),
        };
        sketch.rebuild();
        sketch
    }

    fn rebuild(&mut self) {
        let base = self.config.base_size;

        self.scheduler.kill_all();
        self.squares = (0..self.config.square_count)
            .map(|i| SquareState {
                rotation: 0.0,
                scale: INITIAL_SCALE,
                opacity: 1.0,
                x: 0.0,
                y: 0.0,
                size: base - i as f64 * SIZE_STEP,
            })
            .collect();

        log::debug!("Rebuilt {} squares", self.squares.len());
        self.restart();
    }

    fn restart(&mut self) {
        self.scheduler.kill_all();

        for i in 0..self.squares.len() {
            let timeline = self.timeline().delay(i as f64 * STAGGER);
            self.scheduler.schedule(i, timeline);
        }

        log::debug!(
            "Started {:?} on {} squares",
            self.config.animation_type,
            self.squares.len()
        );
    }

    fn timeline(&self) -> Timeline<SquareState> {
        let cfg = &self.config;
        let step = Step::new(cfg.duration, cfg.ease);

        let timeline = match cfg.animation_type {
            SquareAnimation::Rotation => Timeline::single(
                Step::new(cfg.duration * cfg.rotation_speed, cfg.ease).to(Prop::Rotation, 360.0),
            ),
            SquareAnimation::Scale => {
                Timeline::single(step.to(Prop::Scale, cfg.scale_amount)).yoyo(true)
            }
            SquareAnimation::Pulse => Timeline::single(
                step.to(Prop::Scale, cfg.scale_amount)
                    .to(Prop::Opacity, 0.3),
            )
            .yoyo(true),
            SquareAnimation::Wave => Timeline::single(
                Step::new(cfg.duration, Easing::SineInOut).to(Prop::Y, WAVE_HEIGHT),
            )
            .yoyo(true),
            SquareAnimation::Morph => {
                let half = cfg.duration / 2.0;
                [(45.0, cfg.scale_amount), (90.0, 1.0), (135.0, cfg.scale_amount), (180.0, 1.0)]
                    .into_iter()
                    .fold(Timeline::new(), |timeline, (rotation, scale)| {
                        timeline.then(
                            Step::new(half, cfg.ease)
                                .to(Prop::Rotation, rotation)
                                .to(Prop::Scale, scale),
                        )
                    })
            }
        };

        timeline.repeat(Repeat::Infinite)
    }
}

impl Sketch for Squares {
    fn kind(&self) -> SketchKind {
        SketchKind::Squares
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
            "square_count" | "base_size" => self.rebuild(),
            "animation_type" | "duration" | "ease" | "rotation_speed" | "scale_amount" => {
                self.restart()
            }
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
        self.scheduler.tick(dt, &mut self.squares);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::WHITE);

        let (cx, cy) = (canvas.width() / 2.0, canvas.height() / 2.0);
        for square in &self.squares {
            let placement = Placement::new(
                Point2D::new(cx + square.x, cy + square.y),
                square.rotation.to_radians(),
                square.scale,
            );
            let stroke = Stroke::new(
                self.config.stroke_width * square.scale.abs(),
                Color::BLACK.with_alpha(square.opacity as f32),
            );
            let corners = placement.apply_all(&Square::new(square.size).corners());
            canvas.stroke_path(&corners, true, stroke);
        }
    }
}
