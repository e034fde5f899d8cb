//! Layered sine waves drifting across the canvas

use std::f64::consts::TAU;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::{self, ParamError, ParamSpec, ParamValue};
use super::{frames, Sketch, SketchKind};
use crate::geometry::Point2D;
use crate::render::{Canvas, Color, Stroke};
use crate::shapes::Path;

/// Horizontal sampling step in pixels
const STEP: f64 = 5.0;
/// Hue shift between consecutive waves
const HUE_STEP: f64 = 40.0;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WavesConfig {
    pub wave_count: u32,
    pub amplitude: f64,
    pub frequency: f64,
    pub speed: f64,
    pub line_width: f64,
    pub color_hue: f64,
    pub fill: bool,
    pub fill_opacity: f64,
}

impl Default for WavesConfig {
    fn default() -> Self {
        Self {
            wave_count: 3,
            amplitude: 100.0,
            frequency: 0.01,
            speed: 0.05,
            line_width: 3.0,
            color_hue: 280.0,
            fill: true,
            fill_opacity: 0.1,
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::int("wave_count", "Waves", 1, 8),
    ParamSpec::float("amplitude", "Amplitude", 20.0, 300.0, 1.0),
    ParamSpec::float("frequency", "Frequency", 0.001, 0.05, 0.001),
    ParamSpec::float("speed", "Speed", 0.01, 0.2, 0.01),
    ParamSpec::float("line_width", "Line width", 1.0, 10.0, 0.5),
    ParamSpec::float("color_hue", "Hue", 0.0, 360.0, 1.0),
    ParamSpec::toggle("fill", "Fill"),
    ParamSpec::float("fill_opacity", "Fill opacity", 0.0, 0.5, 0.01),
];

pub struct Waves {
    config: WavesConfig,
    time: f64,
}

impl Default for Waves {
    fn default() -> Self {
        Self::new()
    }
}

impl Waves {
    pub fn new() -> Self {
        Self {
            config: WavesConfig::default(),
            time: 0.0,
        }
    }
}

impl Sketch for Waves {
    fn kind(&self) -> SketchKind {
        SketchKind::Waves
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

        for w in 0..cfg.wave_count {
            let offset = w as f64 / cfg.wave_count as f64 * TAU;
            let hue = cfg.color_hue + w as f64 * HUE_STEP;
            let wave = Path::wave(
                width,
                height / 2.0,
                cfg.amplitude,
                cfg.frequency,
                self.time,
                offset,
                STEP,
            );
            let stroke = Stroke::new(cfg.line_width, Color::hsl(hue, 70.0, 50.0));

            if cfg.fill {
                canvas.fill_under(
                    wave.points(),
                    height,
                    Color::hsla(hue, 70.0, 50.0, cfg.fill_opacity),
                );
                // The outline runs down to the bottom corners and back
                let mut outline = wave.points().to_vec();
                outline.push(Point2D::new(width, height));
                outline.push(Point2D::new(0.0, height));
                canvas.stroke_path(&outline, true, stroke);
            } else {
                canvas.stroke_path(wave.points(), false, stroke);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{DisplayList, DrawCommand};

    #[test]
    fn test_filled_waves() {
        let mut list = DisplayList::new(800.0, 600.0);
        Waves::new().draw(&mut list);

        let fills = list
            .commands()
            .iter()
            .filter(|c| matches!(c, DrawCommand::FillUnder { baseline, .. } if *baseline == 600.0))
            .count();
        assert_eq!(fills, 3);

        for (points, _) in list.strokes() {
            // 161 samples plus the two bottom corners
            assert_eq!(points.len(), 163);
            assert_eq!(points[points.len() - 1], Point2D::new(0.0, 600.0));
        }
    }

    #[test]
    fn test_unfilled_waves_are_open() {
        let mut sketch = Waves::new();
        sketch.set_param("fill", ParamValue::Bool(false)).unwrap();
        let mut list = DisplayList::new(800.0, 600.0);
        sketch.draw(&mut list);

        assert_eq!(list.strokes().count(), 3);
        assert!(list.commands().iter().all(|c| !matches!(
            c,
            DrawCommand::FillUnder { .. } | DrawCommand::StrokePath { closed: true, .. }
        )));
    }

    #[test]
    fn test_wave_profile() {
        let mut sketch = Waves::new();
        sketch.config.wave_count = 1;
        let mut list = DisplayList::new(800.0, 600.0);
        sketch.draw(&mut list);

        let (points, _) = list.strokes().next().expect("wave");
        // At x = 0, t = 0, offset 0 both sines vanish
        assert!((points[0].y - 300.0).abs() < 1e-9);
        let x: f64 = 100.0;
        let expected = 300.0 + (x * 0.01).sin() * 100.0 + (x * 0.02).sin() * 50.0;
        assert!((points[20].y - expected).abs() < 1e-9);
    }
}
