// Forbid unsafe in production; deny in tests.
#![cfg_attr(not(test), forbid(unsafe_code))]
#![cfg_attr(test, deny(unsafe_code))]

//! Core: geometry, pointer input, and the canvas seam for sticky headers.
//!
//! # Role
//! `sticky-core` holds the toolkit-independent vocabulary shared by the
//! header overlay and its host: signed viewport rectangles, scroll
//! orientation, pointer samples, and the minimal canvas contract used to
//! position header drawing.
//!
//! # How it fits
//! `sticky-headers` consumes these types to compute header placements and
//! resolve taps. Hosts adapt their own view/list/canvas types to the traits
//! defined there, using the plain data types defined here.

pub mod canvas;
pub mod event;
pub mod geometry;
pub mod logging;

pub use canvas::Canvas;
pub use event::{PointerEvent, PointerPhase};
pub use geometry::{LinearLayout, Orientation, Rect, Sides, Size};
