#![forbid(unsafe_code)]

//! Host-facing view contracts.
//!
//! The overlay never owns list items or header widgets. Hosts adapt their
//! toolkit's nodes to these traits; all of them are object safe so the list
//! can be passed as `&dyn ListView` on every layout, draw, and input call.

use serde::{Deserialize, Serialize};
use sticky_core::event::PointerEvent;
use sticky_core::geometry::{LinearLayout, Orientation, Rect, Sides, Size};
use sticky_core::Canvas;

/// Stable, application-supplied identity of a header group.
///
/// Positions drift as data changes; a group keeps its `HeaderId`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct HeaderId(pub u64);

impl HeaderId {
    #[must_use]
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

/// A laid-out list child.
pub trait ItemView {
    /// Data position the child is bound to; `None` while detached or removed.
    fn position(&self) -> Option<usize>;

    /// Bounds in list coordinates, excluding margins.
    fn bounds(&self) -> Rect;

    /// Layout margins around [`ItemView::bounds`].
    fn margins(&self) -> Sides {
        Sides::ZERO
    }
}

/// The recycling list widget hosting the overlay.
pub trait ListView {
    /// Number of children currently attached (visible or overscanned).
    fn child_count(&self) -> usize;

    /// Child at `index` in enumeration order.
    fn child(&self, index: usize) -> Option<&dyn ItemView>;

    /// Size of the list viewport.
    fn size(&self) -> Size;

    fn padding(&self) -> Sides {
        Sides::ZERO
    }

    /// Whether children (and headers) are clipped to the padding box.
    fn clip_to_padding(&self) -> bool {
        true
    }

    /// Linear layout parameters, or `None` for a layout the overlay does not
    /// understand.
    fn layout(&self) -> Option<LinearLayout>;
}

/// Constraint handed to a header when it is measured.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MeasureConstraint {
    /// Scroll axis of the owning list.
    pub orientation: Orientation,
    /// Exact size on the cross axis (list width for vertical lists, list
    /// height for horizontal ones), padding already removed. The header
    /// picks its own extent along the scroll axis.
    pub cross_extent: i32,
}

/// A hit-testable node in a header's visual tree.
///
/// Hit rectangles are expressed in header-local coordinates (the header root
/// is laid out at the origin).
pub trait HitNode {
    fn hit_rect(&self) -> Rect;

    fn is_visible(&self) -> bool {
        true
    }

    /// Offer a low-level pointer event; returns whether the node takes it.
    fn accepts_input(&self, event: &PointerEvent) -> bool;

    fn child_count(&self) -> usize {
        0
    }

    fn child(&self, _index: usize) -> Option<&dyn HitNode> {
        None
    }

    /// Tag the node with `position` and run its click behavior.
    fn perform_click(&self, position: usize);
}

/// A header widget: measured, drawable, and clickable.
///
/// Headers are shared (`Rc`) between the cache, the overlay, and the touch
/// router, so state changes triggered by clicks go through `&self`.
pub trait HeaderView: HitNode {
    /// Measured size; zero until measured.
    fn size(&self) -> Size;

    fn margins(&self) -> Sides {
        Sides::ZERO
    }

    /// Measure and lay out at the origin.
    fn measure(&mut self, constraint: MeasureConstraint);

    /// Draw in header-local coordinates.
    fn draw(&self, canvas: &mut dyn Canvas);
}

/// Optional host oracle used to reject hits on positions no longer visible.
pub trait VisibilityOracle {
    fn is_position_visible(&self, position: usize) -> bool;
}

impl<F> VisibilityOracle for F
where
    F: Fn(usize) -> bool,
{
    fn is_position_visible(&self, position: usize) -> bool {
        self(position)
    }
}
