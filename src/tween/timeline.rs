//! Timelines - ordered tween steps with delay, repeat and yoyo
//!
//! A `Step` moves one or more properties to their targets over a duration.
//! A `Timeline` plays its steps back to back; a plain tween is a timeline
//! with a single step.
//!
//! ## Example
//!
//! ```ignore
//! // Breathe: grow to 120 and back forever, starting after 0.3 s
//! let breathe = Timeline::single(
//!     Step::new(3.0, Easing::Power2InOut).to(Prop::Radius, 120.0),
//! )
//! .delay(0.3)
//! .repeat(Repeat::Infinite)
//! .yoyo(true);
//! ```

use super::easing::Easing;
use super::traits::Prop;

/// Where a property ends up at the end of a step
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Target {
    /// Absolute end value
    To(f64),
    /// End value relative to the start value (`"+=360"`)
    By(f64),
}

impl Target {
    pub fn resolve(&self, start: f64) -> f64 {
        match self {
            Target::To(value) => *value,
            Target::By(delta) => start + delta,
        }
    }
}

/// One animated property within a step
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PropTween {
    pub prop: Prop,
    /// Explicit start value; otherwise the value when the timeline starts
    pub from: Option<f64>,
    pub target: Target,
}

/// How many extra times a timeline plays after the first pass
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Repeat {
    Count(u32),
    Infinite,
}

/// A single tween segment
#[derive(Clone, Debug)]
pub struct Step<T> {
    pub(super) props: Vec<PropTween>,
    pub(super) duration: f64,
    pub(super) easing: Easing,
    pub(super) on_update: Option<fn(&mut T)>,
}

impl<T> Step<T> {
    /// Create an empty step; add properties with `to`, `by` or `from_to`
    pub fn new(duration: f64, easing: Easing) -> Self {
        Self {
            props: Vec::new(),
            duration: duration.max(0.0),
            easing,
            on_update: None,
        }
    }

    /// Tween `prop` to an absolute value
    pub fn to(mut self, prop: Prop, value: f64) -> Self {
        self.props.push(PropTween {
            prop,
            from: None,
            target: Target::To(value),
        });
        self
    }

    /// Tween `prop` by a relative amount
    pub fn by(mut self, prop: Prop, delta: f64) -> Self {
        self.props.push(PropTween {
            prop,
            from: None,
            target: Target::By(delta),
        });
        self
    }

    /// Tween `prop` between explicit values
    pub fn from_to(mut self, prop: Prop, from: f64, to: f64) -> Self {
        self.props.push(PropTween {
            prop,
            from: Some(from),
            target: Target::To(to),
        });
        self
    }

    /// Run `callback` on the target every time this step writes values
    pub fn on_update(mut self, callback: fn(&mut T)) -> Self {
        self.on_update = Some(callback);
        self
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }
}

/// An ordered sequence of steps
#[derive(Clone, Debug)]
pub struct Timeline<T> {
    pub(super) steps: Vec<Step<T>>,
    pub(super) delay: f64,
    pub(super) repeat: Repeat,
    pub(super) yoyo: bool,
}

impl<T> Timeline<T> {
    /// Empty timeline that plays once with no delay
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            delay: 0.0,
            repeat: Repeat::Count(0),
            yoyo: false,
        }
    }

    /// Timeline with one step (a plain tween)
    pub fn single(step: Step<T>) -> Self {
        Self::new().then(step)
    }

    /// Append a step that starts when the previous one completes
    pub fn then(mut self, step: Step<T>) -> Self {
        self.steps.push(step);
        self
    }

    /// Wait before the first pass (not before repeats)
    pub fn delay(mut self, seconds: f64) -> Self {
        self.delay = seconds.max(0.0);
        self
    }

    pub fn repeat(mut self, repeat: Repeat) -> Self {
        self.repeat = repeat;
        self
    }

    /// Play every other pass backwards
    pub fn yoyo(mut self, yoyo: bool) -> Self {
        self.yoyo = yoyo;
        self
    }

    /// Length of one pass
    pub fn duration(&self) -> f64 {
        self.steps.iter().map(|step| step.duration).sum()
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<T> Default for Timeline<T> {
    fn default() -> Self {
        Self::new()
    }
}
