//! Tween scheduler
//!
//! The scheduler owns every running timeline for one collection of shapes.
//! Timelines address their target by index into that collection, and the
//! collection itself is passed to `tick`, so the scheduler never holds
//! references into shape state.
//!
//! Time only moves when `tick` is called, which makes playback fully
//! deterministic: tests drive it with a fixed timestep, the app drives it
//! with the frame delta.

#![allow(dead_code)]

use super::timeline::{Repeat, Step, Timeline};
use super::traits::{Animatable, Prop};

/// Identifies a scheduled timeline
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TweenHandle(u64);

/// Start and end of one property within one step
#[derive(Clone, Copy, Debug)]
struct Segment {
    prop: Prop,
    start: f64,
    end: f64,
}

/// A timeline in flight
struct Active<T> {
    handle: TweenHandle,
    target: usize,
    timeline: Timeline<T>,
    /// Seconds since scheduling, delay included
    elapsed: f64,
    /// Explicit start values written while waiting out the delay
    primed: bool,
    /// Per-step segments, fixed the first time the timeline leaves its delay
    segments: Option<Vec<Vec<Segment>>>,
}

impl<T: Animatable> Active<T> {
    /// Advance by `dt` and write values; false once the timeline has finished
    fn advance(&mut self, dt: f64, target: &mut T) -> bool {
        self.elapsed += dt.max(0.0);

        let local = self.elapsed - self.timeline.delay;
        if local < 0.0 {
            if !self.primed {
                prime(&self.timeline, target);
                self.primed = true;
            }
            return true;
        }

        if self.timeline.steps.is_empty() {
            return false;
        }

        let timeline = &self.timeline;
        let segments = self
            .segments
            .get_or_insert_with(|| resolve(timeline, target));

        let (position, finished) = playhead(timeline, local);
        render(&timeline.steps, segments, position, target);

        !finished
    }
}

/// Write the explicit `from` values of the first step
fn prime<T: Animatable>(timeline: &Timeline<T>, target: &mut T) {
    if let Some(step) = timeline.steps.first() {
        for tween in &step.props {
            if let Some(from) = tween.from {
                target.set(tween.prop, from);
            }
        }
    }
}

/// Fix start and end values for every step
///
/// Each step starts where the previous step in this timeline left the
/// property; the first step that touches a property starts from the
/// target's current value unless an explicit `from` is given.
fn resolve<T: Animatable>(timeline: &Timeline<T>, target: &T) -> Vec<Vec<Segment>> {
    let mut carried: Vec<(Prop, f64)> = Vec::new();
    let mut resolved = Vec::with_capacity(timeline.steps.len());

    for step in &timeline.steps {
        let mut segments = Vec::with_capacity(step.props.len());
        for tween in &step.props {
            let current = carried
                .iter()
                .rev()
                .find(|(prop, _)| *prop == tween.prop)
                .map(|&(_, value)| value)
                .or_else(|| target.get(tween.prop));

            let Some(start) = tween.from.or(current) else {
                continue;
            };
            let end = tween.target.resolve(start);
            carried.push((tween.prop, end));
            segments.push(Segment {
                prop: tween.prop,
                start,
                end,
            });
        }
        resolved.push(segments);
    }

    resolved
}

/// Position within one pass, and whether playback is over
fn playhead<T>(timeline: &Timeline<T>, local: f64) -> (f64, bool) {
    let pass = timeline.duration();
    if pass <= 0.0 {
        return (pass, true);
    }

    let mut cycle = (local / pass).floor();
    let mut within = local - cycle * pass;
    let mut finished = false;

    if let Repeat::Count(extra) = timeline.repeat {
        let last = f64::from(extra);
        if cycle > last {
            cycle = last;
            within = pass;
            finished = true;
        }
    }

    let reversed = timeline.yoyo && (cycle as u64) % 2 == 1;
    let position = if reversed { pass - within } else { within };
    (position, finished)
}

/// Write every step that has started by `position`, in order
fn render<T: Animatable>(steps: &[Step<T>], segments: &[Vec<Segment>], position: f64, target: &mut T) {
    let mut start = 0.0;
    for (step, step_segments) in steps.iter().zip(segments) {
        if start > position {
            break;
        }

        let progress = if step.duration <= 0.0 {
            1.0
        } else {
            ((position - start) / step.duration).clamp(0.0, 1.0)
        };
        let eased = step.easing.apply(progress);

        for segment in step_segments {
            target.set(
                segment.prop,
                segment.start + (segment.end - segment.start) * eased,
            );
        }
        if let Some(callback) = step.on_update {
            callback(target);
        }

        start += step.duration;
    }
}

/// Runs timelines against a collection of animatable records
pub struct Scheduler<T> {
    active: Vec<Active<T>>,
    next_handle: u64,
}

impl<T: Animatable> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            active: Vec::new(),
            next_handle: 0,
        }
    }

    /// Start playing `timeline` on the record at index `target`
    pub fn schedule(&mut self, target: usize, timeline: Timeline<T>) -> TweenHandle {
        let handle = TweenHandle(self.next_handle);
        self.next_handle += 1;

        self.active.push(Active {
            handle,
            target,
            timeline,
            elapsed: 0.0,
            primed: false,
            segments: None,
        });

        handle
    }

    /// Stop one timeline; values stay where they are
    pub fn kill(&mut self, handle: TweenHandle) -> bool {
        let before = self.active.len();
        self.active.retain(|active| active.handle != handle);
        self.active.len() != before
    }

    /// Stop every timeline driving `target`; returns how many were stopped
    pub fn kill_tweens_of(&mut self, target: usize) -> usize {
        let before = self.active.len();
        self.active.retain(|active| active.target != target);
        before - self.active.len()
    }

    /// Stop everything; returns how many timelines were stopped
    pub fn kill_all(&mut self) -> usize {
        let count = self.active.len();
        self.active.clear();
        count
    }

    pub fn is_active(&self, handle: TweenHandle) -> bool {
        self.active.iter().any(|active| active.handle == handle)
    }

    /// Whether any timeline drives `target`
    pub fn is_animating(&self, target: usize) -> bool {
        self.active.iter().any(|active| active.target == target)
    }

    pub fn len(&self) -> usize {
        self.active.len()
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Advance all timelines by `dt` seconds and write their values
    ///
    /// Timelines whose target index is outside `targets` are dropped
    /// without touching anything. Finished timelines are removed after
    /// writing their final values.
    pub fn tick(&mut self, dt: f64, targets: &mut [T]) {
        self.active.retain_mut(|active| match targets.get_mut(active.target) {
            Some(target) => active.advance(dt, target),
            None => false,
        });
    }
}

impl<T: Animatable> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
