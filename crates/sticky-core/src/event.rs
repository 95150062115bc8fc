#![forbid(unsafe_code)]

//! Pointer input as delivered by the host's input dispatcher.
//!
//! A gesture is a single pointer stream: `Down`, zero or more `Move`, then
//! `Up` or `Cancel`. Coordinates share the list's viewport space.

use web_time::Instant;

/// Phase of a pointer event within its gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    Down,
    Move,
    Up,
    /// The host aborted the gesture (focus loss, parent stole the stream).
    Cancel,
}

/// A single pointer sample.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointerEvent {
    pub phase: PointerPhase,
    pub x: i32,
    pub y: i32,
    /// Monotonic timestamp of the sample.
    pub time: Instant,
}

impl PointerEvent {
    #[must_use]
    pub const fn new(phase: PointerPhase, x: i32, y: i32, time: Instant) -> Self {
        Self { phase, x, y, time }
    }

    #[must_use]
    pub const fn down(x: i32, y: i32, time: Instant) -> Self {
        Self::new(PointerPhase::Down, x, y, time)
    }

    #[must_use]
    pub const fn moved(x: i32, y: i32, time: Instant) -> Self {
        Self::new(PointerPhase::Move, x, y, time)
    }

    #[must_use]
    pub const fn up(x: i32, y: i32, time: Instant) -> Self {
        Self::new(PointerPhase::Up, x, y, time)
    }

    #[must_use]
    pub const fn cancel(x: i32, y: i32, time: Instant) -> Self {
        Self::new(PointerPhase::Cancel, x, y, time)
    }

    /// Same event expressed in a coordinate space shifted by `(dx, dy)`.
    #[must_use]
    pub const fn translated(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
            ..self
        }
    }

    /// Squared euclidean distance to another sample.
    #[must_use]
    pub fn distance_sq(&self, other: &Self) -> i64 {
        let dx = i64::from(self.x) - i64::from(other.x);
        let dy = i64::from(self.y) - i64::from(other.y);
        dx * dx + dy * dy
    }
}
