//! Frame-driven numeric counter animation.
//!
//! # Responsibility
//! - Interpolate a counter display from 0 to its target over a duration.
//! - Track running animations so a host can drive them one frame at a time.
//!
//! # Invariants
//! - Displayed values are non-decreasing over time and never exceed target.
//! - Once progress reaches 1 the display is exactly the target and the
//!   animation stops asking for frames.
//! - Starting a counter on an element cancels any animation already running
//!   on that element.
//! - Animations on different elements share no state.

use crate::dom::{DomPort, DomResult};
use crate::text::format_grouped;
use log::debug;
use std::cell::Cell;
use std::rc::Rc;

/// Lifecycle of one animation as seen through its handle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationState {
    Running,
    Finished,
    Cancelled,
}

/// Caller-side handle to one running animation.
///
/// Cloning shares the same underlying state.
#[derive(Debug, Clone)]
pub struct AnimationHandle {
    state: Rc<Cell<AnimationState>>,
}

impl AnimationHandle {
    fn new() -> Self {
        Self {
            state: Rc::new(Cell::new(AnimationState::Running)),
        }
    }

    /// Stops further frames. No effect once finished.
    pub fn cancel(&self) {
        if self.state.get() == AnimationState::Running {
            self.state.set(AnimationState::Cancelled);
        }
    }

    pub fn state(&self) -> AnimationState {
        self.state.get()
    }

    pub fn is_running(&self) -> bool {
        self.state() == AnimationState::Running
    }

    pub fn is_cancelled(&self) -> bool {
        self.state() == AnimationState::Cancelled
    }

    pub fn is_finished(&self) -> bool {
        self.state() == AnimationState::Finished
    }

    fn finish(&self) {
        self.state.set(AnimationState::Finished);
    }
}

/// Outcome of one sampled frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// Another frame is needed.
    Continue,
    /// Target reached; no more frames.
    Done,
    /// Cancelled before this frame; nothing was written.
    Cancelled,
}

/// Linear progress in `[0, 1]`.
///
/// Non-finite or non-positive durations complete immediately.
pub fn progress(elapsed_ms: f64, duration_ms: f64) -> f64 {
    if !duration_ms.is_finite() || duration_ms <= 0.0 {
        return 1.0;
    }
    if elapsed_ms.is_nan() {
        return 0.0;
    }
    (elapsed_ms / duration_ms).clamp(0.0, 1.0)
}

/// Value displayed after `elapsed_ms`: `floor(progress * target)`.
pub fn sample_value(target: u64, elapsed_ms: f64, duration_ms: f64) -> u64 {
    let progress = progress(elapsed_ms, duration_ms);
    if progress >= 1.0 {
        return target;
    }
    ((progress * target as f64).floor() as u64).min(target)
}

/// One counter interpolation bound to an element.
#[derive(Debug, Clone)]
pub struct CounterAnimation<N> {
    node: N,
    element_id: String,
    target: u64,
    duration_ms: f64,
    started_at_ms: f64,
    handle: AnimationHandle,
}

impl<N: Clone + PartialEq> CounterAnimation<N> {
    pub fn element_id(&self) -> &str {
        &self.element_id
    }

    pub fn target(&self) -> u64 {
        self.target
    }

    pub fn handle(&self) -> &AnimationHandle {
        &self.handle
    }

    pub fn value_at(&self, now_ms: f64) -> u64 {
        sample_value(self.target, now_ms - self.started_at_ms, self.duration_ms)
    }

    /// Samples one frame at `now_ms` and writes the display.
    pub fn step<D: DomPort<Node = N>>(&self, dom: &mut D, now_ms: f64) -> DomResult<FrameStatus> {
        if !self.handle.is_running() {
            return Ok(if self.handle.is_cancelled() {
                FrameStatus::Cancelled
            } else {
                FrameStatus::Done
            });
        }

        let value = self.value_at(now_ms);
        dom.set_text(&self.node, &format_grouped(value))?;
        if progress(now_ms - self.started_at_ms, self.duration_ms) >= 1.0 {
            self.handle.finish();
            debug!(
                "event=counter_done module=counter status=ok id={} target={}",
                self.element_id, self.target
            );
            return Ok(FrameStatus::Done);
        }
        Ok(FrameStatus::Continue)
    }
}

/// Set of running counter animations driven by host frames.
#[derive(Debug, Clone)]
pub struct CounterAnimator<N> {
    running: Vec<CounterAnimation<N>>,
}

impl<N> Default for CounterAnimator<N> {
    fn default() -> Self {
        Self {
            running: Vec::new(),
        }
    }
}

impl<N: Clone + PartialEq> CounterAnimator<N> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts animating `element_id` towards `target`, beginning at `now_ms`.
    ///
    /// Returns `None` when the element does not exist. The first value is
    /// written on the next [`CounterAnimator::frame`] call.
    pub fn animate<D: DomPort<Node = N>>(
        &mut self,
        dom: &D,
        element_id: &str,
        target: u64,
        duration_ms: f64,
        now_ms: f64,
    ) -> Option<AnimationHandle> {
        let node = dom.find_by_id(element_id)?;

        for previous in self.running.iter().filter(|anim| anim.node == node) {
            previous.handle.cancel();
        }
        self.running.retain(|anim| anim.handle.is_running());

        let handle = AnimationHandle::new();
        self.running.push(CounterAnimation {
            node,
            element_id: element_id.to_string(),
            target,
            duration_ms,
            started_at_ms: now_ms,
            handle: handle.clone(),
        });
        debug!(
            "event=counter_started module=counter status=ok id={element_id} target={target} duration_ms={duration_ms}"
        );
        Some(handle)
    }

    /// Samples every running animation once. Returns how many still need
    /// frames.
    pub fn frame<D: DomPort<Node = N>>(&mut self, dom: &mut D, now_ms: f64) -> DomResult<usize> {
        let mut still_running = Vec::with_capacity(self.running.len());
        let mut first_error = None;
        for animation in self.running.drain(..) {
            match animation.step(dom, now_ms) {
                Ok(FrameStatus::Continue) => still_running.push(animation),
                Ok(FrameStatus::Done | FrameStatus::Cancelled) => {}
                Err(err) => {
                    animation.handle.cancel();
                    first_error.get_or_insert(err);
                }
            }
        }
        self.running = still_running;
        match first_error {
            Some(err) => Err(err),
            None => Ok(self.running.len()),
        }
    }

    /// Whether any animation still wants a frame.
    pub fn has_pending(&self) -> bool {
        self.running.iter().any(|anim| anim.handle.is_running())
    }

    pub fn running(&self) -> &[CounterAnimation<N>] {
        &self.running
    }
}
