// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Sticky section headers for virtualized, recycling lists.
//!
//! # Role
//! A header belongs to the first item of a group. While the group scrolls,
//! its header stays pinned at the leading edge of the viewport, and the next
//! group's header pushes it off. Headers are drawn as an overlay after the
//! list's own children, and taps on them are routed back into the header's
//! widget tree as synthetic clicks.
//!
//! # Per-frame protocol
//! 1. Before laying out each item, the host calls
//!    [`StickyHeaders::reserve_offset`] and adds the returned leading inset.
//! 2. After drawing the items, the host calls [`StickyHeaders::paint_overlay`].
//! 3. Pointer events go through
//!    [`StickyHeadersTouchListener::on_intercept`] before the list sees them.
//! 4. When the data set changes, the host calls
//!    [`StickyHeaders::invalidate_headers`] and requests a new frame.
//!
//! # Extension points
//! The overlay's collaborators ([`OrientationProvider`], [`HeaderProvider`],
//! [`HeaderPositionCalculator`], [`VisibilityOracle`]) are traits and can be
//! swapped through [`StickyHeadersBuilder`]. [`headless`] provides in-memory
//! implementations of every host-side trait.

pub mod adapter;
pub mod config;
pub mod dimension;
pub mod header_cache;
pub mod headless;
pub mod orientation;
pub mod overlay;
pub mod position;
pub mod renderer;
pub mod tap;
pub mod touch;
pub mod view;

pub use adapter::StickyHeadersAdapter;
pub use config::{ConfigError, TapConfig};
pub use dimension::DimensionCalculator;
pub use header_cache::{HeaderProvider, HeaderViewCache};
pub use orientation::{LinearOrientationProvider, OrientationProvider};
pub use overlay::{HeaderHit, StickyHeaders, StickyHeadersBuilder};
pub use position::{DefaultPositionCalculator, HeaderPositionCalculator};
pub use renderer::HeaderRenderer;
pub use tap::{TapDetector, TapGesture};
pub use touch::{GesturePhase, StickyHeadersTouchListener, dispatch_click};
pub use view::{
    HeaderId, HeaderView, HitNode, ItemView, ListView, MeasureConstraint, VisibilityOracle,
};

pub use sticky_core::{
    Canvas, LinearLayout, Orientation, PointerEvent, PointerPhase, Rect, Sides, Size,
};
