//! Concentric circles driven by tweens
//!
//! Every ring animates its radius (and for ripples its opacity) toward a
//! target proportional to its index. Rings start one `stagger` apart.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::{self, ParamError, ParamSpec, ParamValue};
use super::{Sketch, SketchKind};
use crate::geometry::Point2D;
use crate::render::{Canvas, Color, Stroke};
use crate::tween::{Animatable, Easing, Prop, Repeat, Scheduler, Step, Timeline};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CircleAnimation {
    Breathe,
    Ripple,
    Alternate,
    Cascade,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CirclesConfig {
    pub circle_count: u32,
    pub max_radius: f64,
    pub stroke_width: f64,
    pub animation_type: CircleAnimation,
    pub duration: f64,
    pub ease: Easing,
    pub stagger: f64,
}

impl Default for CirclesConfig {
    fn default() -> Self {
        Self {
            circle_count: 8,
            max_radius: 300.0,
            stroke_width: 2.0,
            animation_type: CircleAnimation::Breathe,
            duration: 3.0,
            ease: Easing::Power2InOut,
            stagger: 0.1,
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::int("circle_count", "Circles", 3, 15),
    ParamSpec::float("max_radius", "Max radius", 100.0, 500.0, 1.0),
    ParamSpec::float("stroke_width", "Stroke width", 1.0, 10.0, 0.5),
    ParamSpec::choice(
        "animation_type",
        "Animation",
        &["breathe", "ripple", "alternate", "cascade"],
    ),
    ParamSpec::float("duration", "Duration", 0.5, 5.0, 0.1),
    ParamSpec::choice(
        "ease",
        "Easing",
        &["power1.inOut", "power2.inOut", "elastic.out", "bounce.out", "back.inOut"],
    ),
    ParamSpec::float("stagger", "Stagger", 0.0, 0.5, 0.01),
];

/// One animated ring
#[derive(Clone, Debug, PartialEq)]
pub struct Ring {
    pub radius: f64,
    pub target_radius: f64,
    pub opacity: f64,
}

impl Animatable for Ring {
    fn get(&self, prop: Prop) -> Option<f64> {
        match prop {
            Prop::Radius => Some(self.radius),
            Prop::Opacity => Some(self.opacity),
            _ => None,
        }
    }

    fn set(&mut self, prop: Prop, value: f64) {
        match prop {
            Prop::Radius => self.radius = value,
            Prop::Opacity => self.opacity = value,
            _ => {}
        }
    }
}

pub struct Circles {
    config: CirclesConfig,
    rings: Vec<Ring>,
    scheduler: Scheduler<Ring>,
}

impl Default for Circles {
    fn default() -> Self {
        Self::new()
    }
}

impl Circles {
    pub fn new() -> Self {
        let mut sketch = Self {
            config: CirclesConfig::default(),
            rings: Vec::new(),
            scheduler: Scheduler::new(),
        };
        sketch.rebuild();
        sketch
    }

    /// Discard the rings and create `circle_count` fresh ones
    fn rebuild(&mut self) {
        let count = self.config.circle_count;
        let max_radius = self.config.max_radius;

        self.scheduler.kill_all();
        self.rings = (0..count)
            .map(|i| Ring {
                radius: 0.0,
                target_radius: max_radius * (i + 1) as f64 / count as f64,
                opacity: 1.0,
            })
            .collect();

        log::debug!("Rebuilt {} circles", self.rings.len());
        self.restart();
    }

    /// Cancel every running tween and start the configured animation
    fn restart(&mut self) {
        self.scheduler.kill_all();

        for (i, ring) in self.rings.iter().enumerate() {
            let timeline = self.timeline(i, ring.target_radius);
            self.scheduler.schedule(i, timeline);
        }

        log::debug!(
            "Started {:?} on {} circles",
            self.config.animation_type,
            self.rings.len()
        );
    }

    fn timeline(&self, index: usize, target: f64) -> Timeline<Ring> {
        let cfg = &self.config;
        let delay = index as f64 * cfg.stagger;
        let yoyo = |radius: f64| {
            Timeline::single(Step::new(cfg.duration, cfg.ease).to(Prop::Radius, radius))
                .yoyo(true)
        };

        let timeline = match cfg.animation_type {
            CircleAnimation::Breathe => yoyo(target),
            CircleAnimation::Ripple => Timeline::single(
                Step::new(cfg.duration, Easing::Power1Out)
                    .from_to(Prop::Radius, 0.0, target)
                    .from_to(Prop::Opacity, 1.0, 0.3),
            ),
            CircleAnimation::Alternate if index % 2 == 0 => yoyo(target),
            CircleAnimation::Alternate => yoyo(target * 0.5),
            CircleAnimation::Cascade => {
                let half = cfg.duration / 2.0;
                Timeline::new()
                    .then(Step::new(half, cfg.ease).to(Prop::Radius, target * 1.2))
                    .then(Step::new(half, cfg.ease).to(Prop::Radius, target * 0.3))
            }
        };

        timeline.repeat(Repeat::Infinite).delay(delay)
    }
}

impl Sketch for Circles {
    fn kind(&self) -> SketchKind {
        SketchKind::Circles
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
            "circle_count" | "max_radius" => self.rebuild(),
            "animation_type" | "duration" | "ease" | "stagger" => self.restart(),
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
        self.scheduler.tick(dt, &mut self.rings);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::WHITE);

        let center = Point2D::new(canvas.width() / 2.0, canvas.height() / 2.0);
        for ring in &self.rings {
            // Overshooting easings can dip below zero
            if ring.radius < 0.0 {
                continue;
            }
            let color = Color::BLACK.with_alpha(ring.opacity as f32);
            canvas.stroke_circle(center, ring.radius, Stroke::new(self.config.stroke_width, color));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayList, DrawCommand};

    fn run(sketch: &mut Circles, seconds: f64) {
        let frames = (seconds * 60.0).round() as usize;
        for _ in 0..frames {
            sketch.update(1.0 / 60.0);
        }
    }

    #[test]
    fn test_target_radii() {
        let sketch = Circles::new();
        assert_eq!(sketch.rings.len(), 8);
        assert!((sketch.rings[0].target_radius - 37.5).abs() < 1e-9);
        assert!((sketch.rings[7].target_radius - 300.0).abs() < 1e-9);
        assert_eq!(sketch.scheduler.len(), 8);
    }

    #[test]
    fn test_count_change_rebuilds() {
        let mut sketch = Circles::new();
        run(&mut sketch, 1.0);

        sketch.set_param("circle_count", ParamValue::Int(3)).unwrap();
        assert_eq!(sketch.rings.len(), 3);
        assert_eq!(sketch.scheduler.len(), 3);
        for discarded in 3..8 {
            assert!(!sketch.scheduler.is_animating(discarded));
        }
        assert!(sketch.rings.iter().all(|r| r.radius == 0.0));
        assert!((sketch.rings[2].target_radius - 300.0).abs() < 1e-9);

        run(&mut sketch, 1.0);
        assert_eq!(sketch.scheduler.len(), 3);
    }

    #[test]
    fn test_breathe_reaches_target() {
        let mut sketch = Circles::new();
        sketch.set_param("stagger", ParamValue::Float(0.0)).unwrap();
        sketch.set_param("ease", ParamValue::Choice("power1.inOut".into())).unwrap();
        run(&mut sketch, 3.0);
        for ring in &sketch.rings {
            assert!((ring.radius - ring.target_radius).abs() < 1e-6);
        }
        // Yoyo back down
        run(&mut sketch, 1.5);
        assert!((sketch.rings[7].radius - 150.0).abs() < 1e-6);
    }

    #[test]
    fn test_ripple_fades() {
        let mut sketch = Circles::new();
        sketch.set_param("animation_type", ParamValue::Choice("ripple".into())).unwrap();
        sketch.update(0.0);
        assert_eq!(sketch.rings[0].radius, 0.0);
        assert_eq!(sketch.rings[0].opacity, 1.0);

        run(&mut sketch, 2.95);
        let last = &sketch.rings[0];
        assert!(last.opacity < 0.4);
        assert!(last.radius > 30.0);
    }

    #[test]
    fn test_alternate_halves_odd_rings() {
        let mut sketch = Circles::new();
        sketch.set_param("animation_type", ParamValue::Choice("alternate".into())).unwrap();
        sketch.set_param("stagger", ParamValue::Float(0.0)).unwrap();
        run(&mut sketch, 3.0);
        assert!((sketch.rings[0].radius - 37.5).abs() < 1e-6);
        assert!((sketch.rings[1].radius - 37.5).abs() < 1e-6);
    }

    #[test]
    fn test_cascade_overshoots_then_shrinks() {
        let mut sketch = Circles::new();
        sketch.set_param("animation_type", ParamValue::Choice("cascade".into())).unwrap();
        sketch.set_param("stagger", ParamValue::Float(0.0)).unwrap();
        run(&mut sketch, 1.5);
        assert!((sketch.rings[7].radius - 360.0).abs() < 1e-6);
        // Stop just short of the repeat, which jumps back to the start
        run(&mut sketch, 1.4);
        assert!((sketch.rings[7].radius - 90.0).abs() < 1.0);
    }

    #[test]
    fn test_draw_skips_negative_radius() {
        let mut sketch = Circles::new();
        sketch.rings[0].radius = -5.0;
        let mut list = DisplayList::new(800.0, 600.0);
        sketch.draw(&mut list);
        let rings = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::StrokeCircle { .. }))
            .count();
        assert_eq!(rings, 7);
    }
}
