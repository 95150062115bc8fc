#![forbid(unsafe_code)]

//! Pointer routing from the list to its sticky headers.
//!
//! The listener sits in front of the list's own input handling. It never
//! consumes a bare press or a drag, so scrolling stays with the list; only a
//! confirmed tap that lands on a header (or a double tap anywhere) is
//! consumed.
//!
//! # Invariants
//!
//! 1. `Down`, `Move`, and `Cancel` are never consumed.
//! 2. A single tap is consumed iff [`StickyHeaders::find_header_hit`] found a
//!    header, whether or not any node inside it took the click.
//! 3. At most one node receives the synthetic click: the innermost visible
//!    node that accepts the event and contains the point.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Degenerate hit rect | Zero or negative extent | Node does not match |
//! | Header unavailable | Provider returned `None` | No click, tap still consumed |
//! | Identity drift | Data changed without invalidation | No click, tap still consumed |
//! | No node matches | Tap on header padding | No click, tap still consumed |

use sticky_core::event::{PointerEvent, PointerPhase};
use sticky_core::logging::{debug, trace};

use crate::adapter::StickyHeadersAdapter;
use crate::config::TapConfig;
use crate::overlay::StickyHeaders;
use crate::tap::{TapDetector, TapGesture};
use crate::view::{HitNode, ListView};

/// Where the current pointer sequence stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GesturePhase {
    #[default]
    Idle,
    /// Pointer down and still within the touch slop.
    Pressed,
    /// Pointer moved beyond the touch slop; the list owns the sequence.
    Dragging,
}

/// What a tap resolved to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TapOutcome {
    /// No header under the tap.
    Missed,
    /// A header was hit; `clicked` tells whether a node took the click.
    Header { position: usize, clicked: bool },
}

/// Intercepts list pointer events and forwards header taps as clicks.
#[derive(Debug, Clone, Default)]
pub struct StickyHeadersTouchListener {
    detector: TapDetector,
    phase: GesturePhase,
}

impl StickyHeadersTouchListener {
    #[must_use]
    pub fn new(config: TapConfig) -> Self {
        Self {
            detector: TapDetector::new(config),
            phase: GesturePhase::Idle,
        }
    }

    #[must_use]
    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    /// Offer `event` before the list handles it. Returns `true` when the
    /// event was consumed and must not reach the list.
    pub fn on_intercept<A>(
        &mut self,
        event: &PointerEvent,
        list: &dyn ListView,
        headers: &mut StickyHeaders<A>,
    ) -> bool
    where
        A: StickyHeadersAdapter + 'static,
    {
        let gesture = self.detector.on_event(event);
        self.advance_phase(event);

        match gesture {
            Some(TapGesture::SingleTapUp { x, y }) => {
                match self.resolve_tap(event, x, y, list, headers) {
                    TapOutcome::Missed => false,
                    TapOutcome::Header { position, clicked } => {
                        debug!(position, clicked, "header tap consumed");
                        true
                    }
                }
            }
            Some(TapGesture::DoubleTap { x, y }) => {
                trace!(x, y, "double tap consumed");
                true
            }
            None => false,
        }
    }

    fn advance_phase(&mut self, event: &PointerEvent) {
        self.phase = match event.phase {
            PointerPhase::Down => GesturePhase::Pressed,
            PointerPhase::Move if self.phase == GesturePhase::Pressed
                && !self.detector.is_in_tap_region() =>
            {
                trace!(x = event.x, y = event.y, "drag left to the list");
                GesturePhase::Dragging
            }
            PointerPhase::Move => self.phase,
            PointerPhase::Up | PointerPhase::Cancel => GesturePhase::Idle,
        };
    }

    fn resolve_tap<A>(
        &self,
        event: &PointerEvent,
        x: i32,
        y: i32,
        list: &dyn ListView,
        headers: &mut StickyHeaders<A>,
    ) -> TapOutcome
    where
        A: StickyHeadersAdapter + 'static,
    {
        let Some(hit) = headers.find_header_hit(x, y) else {
            return TapOutcome::Missed;
        };
        if headers.adapter().header_id(hit.position) != Some(hit.id) {
            trace!(position = hit.position, "tapped header no longer owns its position");
            return TapOutcome::Header {
                position: hit.position,
                clicked: false,
            };
        }
        let Some(header) = headers.header_view(list, hit.position) else {
            trace!(position = hit.position, "tapped header is unavailable");
            return TapOutcome::Header {
                position: hit.position,
                clicked: false,
            };
        };

        let local = PointerEvent { x, y, ..*event }.translated(-hit.rect.left, -hit.rect.top);
        let clicked = dispatch_click(&*header, &local, hit.position);
        TapOutcome::Header {
            position: hit.position,
            clicked,
        }
    }
}

/// Post-order search for the node under `event`; clicks the first match.
///
/// `event` is in the root's local coordinates. Subtrees of invisible nodes
/// are skipped.
pub fn dispatch_click(node: &dyn HitNode, event: &PointerEvent, position: usize) -> bool {
    if !node.is_visible() {
        return false;
    }
    for index in 0..node.child_count() {
        if let Some(child) = node.child(index)
            && dispatch_click(child, event, position)
        {
            return true;
        }
    }
    let rect = node.hit_rect();
    if rect.is_well_formed() && rect.contains(event.x, event.y) && node.accepts_input(event) {
        node.perform_click(position);
        return true;
    }
    false
}
