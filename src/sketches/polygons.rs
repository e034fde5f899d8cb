//! A single regular polygon that morphs between side counts, spins or breathes
//!
//! The morph animation tweens a fractional side count; every update rounds
//! it and regenerates the outline, so the shape snaps from one polygon to
//! the next.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::{self, ParamError, ParamSpec, ParamValue};
use super::{Sketch, SketchKind};
use crate::geometry::{Placement, Point2D};
use crate::render::{Canvas, Color, Stroke};
use crate::shapes::RegularPolygon;
use crate::tween::{Animatable, Easing, Prop, Repeat, Scheduler, Step, Timeline};

/// Side counts visited by the morph before returning to the configured one
const MORPH_STOPS: [f64; 3] = [3.0, 8.0, 5.0];

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PolygonAnimation {
    Morph,
    Rotate,
    Breathe,
    Spiral,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolygonsConfig {
    pub sides: u32,
    pub size: f64,
    pub stroke_width: f64,
    pub animation_type: PolygonAnimation,
    pub duration: f64,
    pub ease: Easing,
}

impl Default for PolygonsConfig {
    fn default() -> Self {
        Self {
            sides: 6,
            size: 150.0,
            stroke_width: 3.0,
            animation_type: PolygonAnimation::Morph,
            duration: 3.0,
            ease: Easing::ElasticInOut,
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::int("sides", "Target sides", 3, 12),
    ParamSpec::float("size", "Size", 80.0, 300.0, 1.0),
    ParamSpec::float("stroke_width", "Stroke width", 1.0, 10.0, 0.5),
    ParamSpec::choice(
        "animation_type",
        "Animation",
        &["morph", "rotate", "breathe", "spiral"],
    ),
    ParamSpec::float("duration", "Duration", 1.0, 5.0, 0.1),
    ParamSpec::choice(
        "ease",
        "Easing",
        &["power2.inOut", "elastic.inOut", "back.inOut", "bounce.inOut"],
    ),
];

/// The animated polygon; `vertices` are on the unit circle
#[derive(Clone, Debug, PartialEq)]
pub struct PolygonState {
    pub current_sides: f64,
    /// Degrees
    pub rotation: f64,
    pub scale: f64,
    pub vertices: Vec<Point2D>,
}

impl PolygonState {
    fn new(sides: f64) -> Self {
        let mut state = Self {
            current_sides: sides,
            rotation: 0.0,
            scale: 1.0,
            vertices: Vec::new(),
        };
        state.update_vertices();
        state
    }

    /// Regenerate the outline from the rounded side count
    fn update_vertices(&mut self) {
        let sides = self.current_sides.round().max(0.0) as usize;
        self.vertices = RegularPolygon::new(sides, 1.0).vertices();
    }
}

impl Animatable for PolygonState {
    fn get(&self, prop: Prop) -> Option<f64> {
        match prop {
            Prop::Sides => Some(self.current_sides),
            Prop::Rotation => Some(self.rotation),
            Prop::Scale => Some(self.scale),
            _ => None,
        }
    }

    fn set(&mut self, prop: Prop, value: f64) {
        match prop {
            Prop::Sides => self.current_sides = value,
            Prop::Rotation => self.rotation = value,
            Prop::Scale => self.scale = value,
            _ => {}
        }
    }
}

pub struct Polygons {
    config: PolygonsConfig,
    /// Always exactly one polygon
    polygon: Vec<PolygonState>,
    scheduler: Scheduler<PolygonState>,
}

impl Default for Polygons {
    fn default() -> Self {
        Self::new()
    }
}

impl Polygons {
    pub fn new() -> Self {
        let config = PolygonsConfig::default();
        let mut sketch = Self {
            polygon: vec![PolygonState::new(config.sides as f64)],
            config,
            scheduler: Scheduler::new(),
        };
        sketch.restart();
        sketch
    }

    /// Start the configured animation from the current shape
    ///
    /// Outside the morph the outline shows the configured side count.
    fn restart(&mut self) {
        self.scheduler.kill_all();

        let cfg = &self.config;
        if cfg.animation_type != PolygonAnimation::Morph {
            for polygon in &mut self.polygon {
                polygon.current_sides = cfg.sides as f64;
                polygon.update_vertices();
            }
        }

        let timeline = match cfg.animation_type {
            PolygonAnimation::Morph => MORPH_STOPS
                .into_iter()
                .chain([cfg.sides as f64])
                .fold(Timeline::new(), |timeline, sides| {
                    timeline.then(
                        Step::new(cfg.duration, cfg.ease)
                            .to(Prop::Sides, sides)
                            .on_update(PolygonState::update_vertices),
                    )
                }),
            PolygonAnimation::Rotate => Timeline::single(
                Step::new(cfg.duration, Easing::Linear).to(Prop::Rotation, 360.0),
            ),
            PolygonAnimation::Breathe => {
                Timeline::single(Step::new(cfg.duration, cfg.ease).to(Prop::Scale, 1.5)).yoyo(true)
            }
            PolygonAnimation::Spiral => Timeline::single(
                Step::new(cfg.duration, cfg.ease)
                    .to(Prop::Rotation, 360.0)
                    .to(Prop::Scale, 1.5),
            )
            .yoyo(true),
        };

        self.scheduler.schedule(0, timeline.repeat(Repeat::Infinite));
        log::debug!("Started {:?} polygon", cfg.animation_type);
    }
}

impl Sketch for Polygons {
    fn kind(&self) -> SketchKind {
        SketchKind::Polygons
    }

    fn params(&self) -> &'static [ParamSpec] {
        PARAMS
    }

    fn param(&self, key: &str) -> Result<ParamValue, ParamError> {
        params::read(PARAMS, &self.config, key)
    }

    fn set_param(&mut self, key: &str, value: ParamValue) -> Result<(), ParamError> {
        params::write(PARAMS, &mut self.config, key, value)?;
        if matches!(key, "sides" | "animation_type" | "duration" | "ease") {
            self.restart();
        }
        Ok(())
    }

    fn config(&self) -> Result<Value, ParamError> {
        Ok(serde_json::to_value(&self.config)?)
    }

    fn load_config(&mut self, config: Value) -> Result<(), ParamError> {
        self.config = params::load(config)?;
        self.polygon = vec![PolygonState::new(self.config.sides as f64)];
        self.restart();
        Ok(())
    }

    fn update(&mut self, dt: f64) {
        self.scheduler.tick(dt, &mut self.polygon);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::WHITE);

        let center = Point2D::new(canvas.width() / 2.0, canvas.height() / 2.0);
        for polygon in &self.polygon {
            let placement = Placement::new(
                center,
                polygon.rotation.to_radians(),
                polygon.scale * self.config.size,
            );
            let stroke = Stroke::new(
                self.config.stroke_width * polygon.scale.abs(),
                Color::BLACK,
            );
            canvas.stroke_path(&placement.apply_all(&polygon.vertices), true, stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DisplayList;

    fn run(sketch: &mut Polygons, seconds: f64) {
        for _ in 0..(seconds * 60.0).round() as usize {
            sketch.update(1.0 / 60.0);
        }
    }

    #[test]
    fn test_starts_as_hexagon() {
        let sketch = Polygons::new();
        assert_eq!(sketch.polygon[0].vertices.len(), 6);
        // First vertex on top
        assert!((sketch.polygon[0].vertices[0].y + 1.0).abs() < 1e-9);
    }

    #[test]
    fn test_morph_regenerates_vertices() {
        let mut sketch = Polygons::new();
        sketch.set_param("ease", ParamValue::Choice("power2.inOut".into())).unwrap();

        run(&mut sketch, 2.9);
        assert_eq!(sketch.polygon[0].vertices.len(), 3);
        run(&mut sketch, 3.0);
        assert_eq!(sketch.polygon[0].vertices.len(), 8);
        run(&mut sketch, 3.0);
        assert_eq!(sketch.polygon[0].vertices.len(), 5);
    }

    #[test]
    fn test_sides_apply_outside_morph() {
        let mut sketch = Polygons::new();
        sketch.set_param("animation_type", ParamValue::Choice("rotate".into())).unwrap();
        sketch.set_param("sides", ParamValue::Int(9)).unwrap();
        assert_eq!(sketch.polygon[0].vertices.len(), 9);

        run(&mut sketch, 1.5);
        assert!((sketch.polygon[0].rotation - 180.0).abs() < 1e-6);
    }

    #[test]
    fn test_spiral_grows_while_turning() {
        let mut sketch = Polygons::new();
        sketch.set_param("animation_type", ParamValue::Choice("spiral".into())).unwrap();
        sketch.set_param("ease", ParamValue::Choice("power2.inOut".into())).unwrap();
        run(&mut sketch, 1.5);
        let polygon = &sketch.polygon[0];
        assert!((polygon.rotation - 180.0).abs() < 1e-6);
        assert!((polygon.scale - 1.25).abs() < 1e-6);
    }

    #[test]
    fn test_draw_uses_size() {
        let mut list = DisplayList::new(800.0, 600.0);
        Polygons::new().draw(&mut list);
        let (points, _) = list.strokes().next().expect("polygon");
        assert_eq!(points.len(), 6);
        assert!((points[0].x - 400.0).abs() < 1e-9);
        assert!((points[0].y - 150.0).abs() < 1e-9);
    }
}
