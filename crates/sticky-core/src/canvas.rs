#![forbid(unsafe_code)]

//! Drawing seam between the overlay and the host's rendering backend.

use crate::geometry::Rect;

/// The subset of a 2D canvas the header overlay needs.
///
/// Headers draw themselves in header-local coordinates; the overlay only
/// clips and translates. Every `save` is paired with a `restore`.
pub trait Canvas {
    /// Push the current clip and transform.
    fn save(&mut self);

    /// Pop the most recently saved clip and transform.
    fn restore(&mut self);

    /// Intersect the current clip with `rect` (in current coordinates).
    fn clip_rect(&mut self, rect: Rect);

    /// Shift the origin by `(dx, dy)`.
    fn translate(&mut self, dx: i32, dy: i32);
}
