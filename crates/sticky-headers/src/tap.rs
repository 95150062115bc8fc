#![forbid(unsafe_code)]

//! Timing-based tap recognition over a single pointer stream.
//!
//! # Invariants
//!
//! 1. `SingleTapUp` is only emitted on `Up`, for a press that never left the
//!    touch slop and was released before the long-press timeout.
//! 2. `DoubleTap` is only emitted on `Down`; the matching `Up` emits nothing.
//! 3. A press that completed a double tap never starts another one, so a
//!    rapid third press begins a fresh sequence.
//! 4. `Cancel` returns the detector to its initial state.

use sticky_core::event::{PointerEvent, PointerPhase};

use crate::config::TapConfig;

/// Gesture recognized by [`TapDetector`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TapGesture {
    /// A press released in place, delivered on release.
    SingleTapUp { x: i32, y: i32 },
    /// The second press of a double tap, delivered on press.
    DoubleTap { x: i32, y: i32 },
}

/// Recognizes single and double taps; everything else is left alone.
#[derive(Debug, Clone)]
pub struct TapDetector {
    config: TapConfig,
    current_down: Option<PointerEvent>,
    previous_down: Option<PointerEvent>,
    previous_up: Option<PointerEvent>,
    /// The previous press ended as a tap and may start a double tap.
    previous_was_tap: bool,
    in_tap_region: bool,
    double_tapping: bool,
}

impl Default for TapDetector {
    fn default() -> Self {
        Self::new(TapConfig::default())
    }
}

impl TapDetector {
    #[must_use]
    pub fn new(config: TapConfig) -> Self {
        Self {
            config,
            current_down: None,
            previous_down: None,
            previous_up: None,
            previous_was_tap: false,
            in_tap_region: false,
            double_tapping: false,
        }
    }

    /// True while a press is down and has not moved beyond the touch slop.
    #[must_use]
    pub fn is_in_tap_region(&self) -> bool {
        self.current_down.is_some() && self.in_tap_region
    }

    /// Feed one event; returns the gesture it completes, if any.
    pub fn on_event(&mut self, event: &PointerEvent) -> Option<TapGesture> {
        match event.phase {
            PointerPhase::Down => self.on_down(event),
            PointerPhase::Move => {
                self.on_move(event);
                None
            }
            PointerPhase::Up => self.on_up(event),
            PointerPhase::Cancel => {
                self.reset();
                None
            }
        }
    }

    /// Forget any in-progress or remembered press.
    pub fn reset(&mut self) {
        self.current_down = None;
        self.previous_down = None;
        self.previous_up = None;
        self.previous_was_tap = false;
        self.in_tap_region = false;
        self.double_tapping = false;
    }

    fn on_down(&mut self, event: &PointerEvent) -> Option<TapGesture> {
        let is_double = self.is_considered_double_tap(event);
        self.current_down = Some(*event);
        self.in_tap_region = true;
        self.double_tapping = is_double;
        is_double.then_some(TapGesture::DoubleTap {
            x: event.x,
            y: event.y,
        })
    }

    fn on_move(&mut self, event: &PointerEvent) {
        let Some(down) = self.current_down else {
            return;
        };
        if self.in_tap_region && exceeds(&down, event, self.config.touch_slop) {
            self.in_tap_region = false;
        }
    }

    fn on_up(&mut self, event: &PointerEvent) -> Option<TapGesture> {
        let Some(down) = self.current_down else {
            return None;
        };
        let held = event.time.saturating_duration_since(down.time);
        let gesture = if self.double_tapping {
            None
        } else if self.in_tap_region && held < self.config.long_press_timeout() {
            Some(TapGesture::SingleTapUp {
                x: event.x,
                y: event.y,
            })
        } else {
            None
        };

        self.previous_was_tap = gesture.is_some();
        self.previous_up = Some(*event);
        self.previous_down = Some(down);
        self.current_down = None;
        self.in_tap_region = false;
        self.double_tapping = false;
        gesture
    }

    fn is_considered_double_tap(&self, second_down: &PointerEvent) -> bool {
        if !self.previous_was_tap {
            return false;
        }
        let (Some(first_down), Some(first_up)) = (self.previous_down, self.previous_up) else {
            return false;
        };
        let gap = second_down.time.saturating_duration_since(first_up.time);
        if gap > self.config.double_tap_timeout() || gap < self.config.double_tap_min_time() {
            return false;
        }
        !exceeds(&first_down, second_down, self.config.double_tap_slop)
    }
}

fn exceeds(a: &PointerEvent, b: &PointerEvent, slop: i32) -> bool {
    let slop = i64::from(slop);
    a.distance_sq(b) > slop * slop
}
