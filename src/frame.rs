//! Frame loop
//!
//! Drives one sketch: every step advances it by the elapsed time and
//! records what it draws. The host calls `step` once per display frame;
//! tests call `run` with a fixed timestep.

use crate::render::DisplayList;
use crate::sketches::Sketch;

/// Start/stop control around the update-then-draw cycle
#[derive(Clone, Debug)]
pub struct FrameLoop {
    running: bool,
    frames: u64,
}

impl Default for FrameLoop {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameLoop {
    /// A running loop
    pub fn new() -> Self {
        Self {
            running: true,
            frames: 0,
        }
    }

    pub fn start(&mut self) {
        self.running = true;
    }

    /// Pause; sketch state stays as it is
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Frames produced so far
    pub fn frames(&self) -> u64 {
        self.frames
    }

    /// Produce one frame of the given size, or `None` while stopped
    pub fn step(
        &mut self,
        sketch: &mut dyn Sketch,
        dt: f64,
        width: f64,
        height: f64,
    ) -> Option<DisplayList> {
        if !self.running {
            return None;
        }

        sketch.update(dt.max(0.0));
        let mut list = DisplayList::new(width, height);
        sketch.draw(&mut list);
        self.frames += 1;
        Some(list)
    }

    /// Step `count` times with a fixed `dt` and return the last frame
    #[allow(dead_code)]
    pub fn run(
        &mut self,
        sketch: &mut dyn Sketch,
        count: usize,
        dt: f64,
        width: f64,
        height: f64,
    ) -> Option<DisplayList> {
        let mut last = None;
        for _ in 0..count {
            last = self.step(sketch, dt, width, height);
        }
        last
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Canvas;
    use crate::sketches::{ParamValue, SketchKind};

    #[test]
    fn test_step_produces_frames() {
        let mut sketch = SketchKind::Cube3d.create();
        let mut frame_loop = FrameLoop::new();

        let list = frame_loop
            .step(sketch.as_mut(), 1.0 / 60.0, 640.0, 480.0)
            .expect("frame");
        assert_eq!(list.width(), 640.0);
        assert_eq!(list.height(), 480.0);
        assert_eq!(frame_loop.frames(), 1);
    }

    #[test]
    fn test_stop_freezes_sketch() {
        let mut sketch = SketchKind::Cube3d.create();
        let mut frame_loop = FrameLoop::new();
        frame_loop.stop();

        assert!(frame_loop.step(sketch.as_mut(), 1.0, 800.0, 600.0).is_none());
        assert_eq!(sketch.param("rotation_y").unwrap(), ParamValue::Float(0.5));

        frame_loop.start();
        assert!(frame_loop.is_running());
        frame_loop.step(sketch.as_mut(), 1.0 / 60.0, 800.0, 600.0);
        assert_ne!(sketch.param("rotation_y").unwrap(), ParamValue::Float(0.5));
    }

    #[test]
    fn test_run_is_deterministic() {
        let render = || {
            let mut sketch = SketchKind::Squares.create();
            FrameLoop::new()
                .run(sketch.as_mut(), 90, 1.0 / 60.0, 800.0, 600.0)
                .expect("frame")
        };
        assert_eq!(render().commands(), render().commands());
    }

    #[test]
    fn test_resize_takes_effect_next_frame() {
        let mut sketch = SketchKind::Circles.create();
        let mut frame_loop = FrameLoop::new();
        frame_loop.step(sketch.as_mut(), 0.1, 800.0, 600.0);
        let list = frame_loop
            .step(sketch.as_mut(), 0.1, 1024.0, 768.0)
            .expect("frame");
        assert_eq!(list.width(), 1024.0);
    }
}
