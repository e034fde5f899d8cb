//! Square lattice of cells pulsing in staggered patterns

use std::f64::consts::PI;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::params::{self, ParamError, ParamSpec, ParamValue};
use super::{Sketch, SketchKind};
use crate::geometry::{Placement, Point2D};
use crate::render::{Canvas, Color, Stroke};
use crate::shapes::Square;
use crate::tween::{Animatable, Easing, Prop, Repeat, Scheduler, Step, Timeline};

/// Drawn square size as a fraction of the cell
const FILL: f64 = 0.8;
/// Upper bound of the random start delay
const MAX_RANDOM_DELAY: f64 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GridAnimation {
    Wave,
    Random,
    Spiral,
    Checkerboard,
    Explode,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub grid_size: u32,
    pub cell_size: f64,
    pub stroke_width: f64,
    pub animation_type: GridAnimation,
    pub duration: f64,
    pub ease: Easing,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            grid_size: 5,
            cell_size: 80.0,
            stroke_width: 2.0,
            animation_type: GridAnimation::Wave,
            duration: 2.0,
            ease: Easing::Power2InOut,
        }
    }
}

const PARAMS: &[ParamSpec] = &[
    ParamSpec::int("grid_size", "Grid", 3, 10),
    ParamSpec::float("cell_size", "Cell size", 40.0, 120.0, 1.0),
    ParamSpec::float("stroke_width", "Stroke width", 1.0, 8.0, 0.5),
    ParamSpec::choice(
        "animation_type",
        "Animation",
        &["wave", "random", "spiral", "checkerboard", "explode"],
    ),
    ParamSpec::float("duration", "Duration", 0.5, 4.0, 0.1),
    ParamSpec::choice(
        "ease",
        "Easing",
        &["power2.inOut", "elastic.out", "bounce.out", "back.inOut"],
    ),
];

/// One lattice cell
#[derive(Clone, Debug, PartialEq)]
pub struct Cell {
    pub row: u32,
    pub col: u32,
    pub scale: f64,
    /// Degrees
    pub rotation: f64,
    pub opacity: f64,
}

impl Cell {
    fn new(row: u32, col: u32) -> Self {
        Self {
            row,
            col,
            scale: 1.0,
            rotation: 0.0,
            opacity: 1.0,
        }
    }
}

impl Animatable for Cell {
    fn get(&self, prop: Prop) -> Option<f64> {
        match prop {
            Prop::Scale => Some(self.scale),
            Prop::Rotation => Some(self.rotation),
            Prop::Opacity => Some(self.opacity),
            _ => None,
        }
    }

    fn set(&mut self, prop: Prop, value: f64) {
        match prop {
            Prop::Scale => self.scale = value,
            Prop::Rotation => self.rotation = value,
            Prop::Opacity => self.opacity = value,
            _ => {}
        }
    }
}

pub struct Grid {
    config: GridConfig,
    cells: Vec<Cell>,
    scheduler: Scheduler<Cell>,
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}

impl Grid {
    pub fn new() -> Self {
        let mut sketch = Self {
            config: GridConfig::default(),
            cells: Vec::new(),
            scheduler: Scheduler::new(),
        };
        sketch.rebuild();
        sketch
    }

    fn rebuild(&mut self) {
        let n = self.config.grid_size;

        self.scheduler.kill_all();
        self.cells = (0..n)
            .flat_map(|row| (0..n).map(move |col| Cell::new(row, col)))
            .collect();

        log::debug!("Rebuilt {}x{} grid", n, n);
        self.restart();
    }

    fn restart(&mut self) {
        self.scheduler.kill_all();

        let mut rng = rand::thread_rng();
        for (i, cell) in self.cells.iter().enumerate() {
            let timeline = self.timeline(cell, &mut rng);
            self.scheduler.schedule(i, timeline);
        }

        log::debug!(
            "Started {:?} on {} cells",
            self.config.animation_type,
            self.cells.len()
        );
    }

    fn timeline(&self, cell: &Cell, rng: &mut impl Rng) -> Timeline<Cell> {
        let cfg = &self.config;
        let half = cfg.grid_size as f64 / 2.0;
        let dx = cell.col as f64 - half;
        let dy = cell.row as f64 - half;
        let step = Step::new(cfg.duration, cfg.ease);

        let (step, delay) = match cfg.animation_type {
            GridAnimation::Wave => (step.to(Prop::Scale, 0.3), (cell.row + cell.col) as f64 * 0.1),
            GridAnimation::Random => (
                step.to(Prop::Scale, 0.2).to(Prop::Rotation, 180.0),
                rng.gen_range(0.0..MAX_RANDOM_DELAY),
            ),
            GridAnimation::Spiral => (
                step.to(Prop::Scale, 0.1).to(Prop::Rotation, 360.0),
                (dy.atan2(dx) + PI) / (2.0 * PI),
            ),
            GridAnimation::Checkerboard => {
                let scale = if (cell.row + cell.col) % 2 == 0 { 0.5 } else { 1.3 };
                (step.to(Prop::Scale, scale), 0.0)
            }
            GridAnimation::Explode => (
                step.to(Prop::Scale, 0.1).to(Prop::Opacity, 0.3),
                dx.hypot(dy) * 0.1,
            ),
        };

        Timeline::single(step)
            .repeat(Repeat::Infinite)
            .yoyo(true)
            .delay(delay)
    }
}

impl Sketch for Grid {
    fn kind(&self) -> SketchKind {
        SketchKind::Grid
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
            "grid_size" => self.rebuild(),
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
        self.scheduler.tick(dt, &mut self.cells);
    }

    fn draw(&self, canvas: &mut dyn Canvas) {
        canvas.clear(Color::WHITE);

        let cfg = &self.config;
        let total = cfg.grid_size as f64 * cfg.cell_size;
        let start_x = (canvas.width() - total) / 2.0;
        let start_y = (canvas.height() - total) / 2.0;
        let square = Square::new(cfg.cell_size * FILL).corners();

        for cell in &self.cells {
            let center = Point2D::new(
                start_x + (cell.col as f64 + 0.5) * cfg.cell_size,
                start_y + (cell.row as f64 + 0.5) * cfg.cell_size,
            );
            let placement = Placement::new(center, cell.rotation.to_radians(), cell.scale);
            // The stroke scales with the cell
            let stroke = Stroke::new(
                cfg.stroke_width * cell.scale.abs(),
                Color::BLACK.with_alpha(cell.opacity as f32),
            );
            canvas.stroke_path(&placement.apply_all(&square), true, stroke);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::DisplayList;

    fn run(sketch: &mut Grid, seconds: f64) {
        for _ in 0..(seconds * 60.0).round() as usize {
            sketch.update(1.0 / 60.0);
        }
    }

    #[test]
    fn test_lattice() {
        let sketch = Grid::new();
        assert_eq!(sketch.cells.len(), 25);
        assert_eq!(sketch.scheduler.len(), 25);
        assert_eq!((sketch.cells[7].row, sketch.cells[7].col), (1, 2));
    }

    #[test]
    fn test_resize_rebuilds() {
        let mut sketch = Grid::new();
        run(&mut sketch, 0.5);
        sketch.set_param("grid_size", ParamValue::Int(3)).unwrap();
        assert_eq!(sketch.cells.len(), 9);
        assert_eq!(sketch.scheduler.len(), 9);
        assert!(!sketch.scheduler.is_animating(9));
        assert!(sketch.cells.iter().all(|c| c.scale == 1.0));
    }

    #[test]
    fn test_wave_delays_by_diagonal() {
        let mut sketch = Grid::new();
        run(&mut sketch, 0.05);
        // Top-left cell has started, the bottom-right one waits 0.8 s
        assert!(sketch.cells[0].scale < 1.0);
        assert_eq!(sketch.cells[24].scale, 1.0);
    }

    #[test]
    fn test_checkerboard_targets() {
        let mut sketch = Grid::new();
        sketch
            .set_param("animation_type", ParamValue::Choice("checkerboard".into()))
            .unwrap();
        run(&mut sketch, 1.9);
        assert!((sketch.cells[0].scale - 0.5).abs() < 0.01);
        assert!((sketch.cells[1].scale - 1.3).abs() < 0.01);
    }

    #[test]
    fn test_random_delays_stay_in_range() {
        let mut sketch = Grid::new();
        sketch
            .set_param("animation_type", ParamValue::Choice("random".into()))
            .unwrap();
        run(&mut sketch, 0.5);
        // Every cell is past its delay and rotating
        assert!(sketch.cells.iter().all(|c| c.rotation >= 0.0));
        run(&mut sketch, 0.1);
        assert!(sketch.cells.iter().all(|c| c.rotation > 0.0));
    }

    #[test]
    fn test_draw_centres_lattice() {
        let mut sketch = Grid::new();
        sketch.set_param("grid_size", ParamValue::Int(3)).unwrap();
        let mut list = DisplayList::new(800.0, 600.0);
        sketch.draw(&mut list);

        let (middle, _) = list.strokes().nth(4).expect("middle cell");
        let cx = middle.iter().map(|p| p.x).sum::<f64>() / 4.0;
        let cy = middle.iter().map(|p| p.y).sum::<f64>() / 4.0;
        assert!((cx - 400.0).abs() < 1e-9);
        assert!((cy - 300.0).abs() < 1e-9);
    }
}
