//! Motion trails
//!
//! A canvas that is cleared with a translucent color keeps a faded copy of
//! everything drawn before. `Trail` reproduces that with retained frames:
//! each clear multiplies the weight of older frames by `1 - alpha` and
//! tints the background, so a sketch clearing with alpha 0.1 leaves a long
//! afterglow while an opaque clear wipes everything.

use std::collections::VecDeque;

use super::canvas::{Color, DisplayList};

/// Layers fainter than this are dropped
const MIN_WEIGHT: f32 = 0.01;
/// Upper bound on retained frames, for sketches that never clear
const MAX_LAYERS: usize = 120;

/// A retained frame and how strongly it still shows
#[derive(Clone, Debug)]
pub struct Layer {
    pub list: DisplayList,
    pub weight: f32,
}

/// Retained frames with fading weights
#[derive(Clone, Debug)]
pub struct Trail {
    layers: VecDeque<Layer>,
    background: Color,
}

impl Default for Trail {
    fn default() -> Self {
        Self::new()
    }
}

impl Trail {
    pub fn new() -> Self {
        Self {
            layers: VecDeque::new(),
            background: Color::WHITE,
        }
    }

    /// Add a new frame, fading older ones by its clear color
    pub fn push(&mut self, list: DisplayList) {
        if let Some(clear) = list.clear_color() {
            let keep = 1.0 - clear.a.clamp(0.0, 1.0);
            self.layers.retain_mut(|layer| {
                layer.weight *= keep;
                layer.weight >= MIN_WEIGHT
            });
            self.background = self.background.blend(clear).with_alpha(1.0);
        }

        self.layers.push_back(Layer { list, weight: 1.0 });

        while self.layers.len() > MAX_LAYERS {
            self.layers.pop_front();
        }
    }

    /// Color under all layers
    pub fn background(&self) -> Color {
        self.background
    }

    /// Layers from oldest to newest
    pub fn layers(&self) -> impl Iterator<Item = &Layer> {
        self.layers.iter()
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Forget every retained frame (used when switching sketches)
    pub fn reset(&mut self) {
        self.layers.clear();
        self.background = Color::WHITE;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Canvas;

    fn frame(clear_alpha: f32) -> DisplayList {
        let mut list = DisplayList::new(100.0, 100.0);
        list.clear(Color::WHITE.with_alpha(clear_alpha));
        list
    }

    #[test]
    fn test_opaque_clear_wipes() {
        let mut trail = Trail::new();
        trail.push(frame(1.0));
        trail.push(frame(1.0));
        assert_eq!(trail.len(), 1);
    }

    #[test]
    fn test_translucent_clear_fades() {
        let mut trail = Trail::new();
        trail.push(frame(0.1));
        trail.push(frame(0.1));
        trail.push(frame(0.1));

        let weights: Vec<f32> = trail.layers().map(|layer| layer.weight).collect();
        assert_eq!(weights.len(), 3);
        assert!((weights[0] - 0.81).abs() < 1e-5);
        assert!((weights[1] - 0.9).abs() < 1e-5);
        assert_eq!(weights[2], 1.0);
    }

    #[test]
    fn test_faint_layers_are_dropped() {
        let mut trail = Trail::new();
        for _ in 0..200 {
            trail.push(frame(0.1));
        }
        // 0.9^n falls below 0.01 after 44 clears
        assert!(trail.len() <= 45);
        assert!(trail.layers().all(|layer| layer.weight >= MIN_WEIGHT));
    }

    #[test]
    fn test_frames_without_clear_are_capped() {
        let mut trail = Trail::new();
        for _ in 0..(MAX_LAYERS + 10) {
            trail.push(DisplayList::new(10.0, 10.0));
        }
        assert_eq!(trail.len(), MAX_LAYERS);
    }

    #[test]
    fn test_background_follows_clear_color() {
        let mut trail = Trail::new();
        let mut list = DisplayList::new(10.0, 10.0);
        list.clear(Color::BLACK);
        trail.push(list);
        assert_eq!(trail.background(), Color::BLACK);

        trail.reset();
        assert!(trail.is_empty());
        assert_eq!(trail.background(), Color::WHITE);
    }
}
