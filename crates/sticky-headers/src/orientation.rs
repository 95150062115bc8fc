#![forbid(unsafe_code)]

//! Scroll axis and layout direction lookup.

use sticky_core::geometry::{LinearLayout, Orientation};
use sticky_core::logging::warn;

use crate::view::ListView;

/// Reports the list's scroll axis and whether it is laid out in reverse.
pub trait OrientationProvider {
    fn orientation(&self, list: &dyn ListView) -> Orientation;

    fn is_reverse_layout(&self, list: &dyn ListView) -> bool;
}

/// Reads [`ListView::layout`].
///
/// A list without a linear layout is treated as vertical and not reversed.
#[derive(Debug, Clone, Copy, Default)]
pub struct LinearOrientationProvider;

impl LinearOrientationProvider {
    fn layout(list: &dyn ListView) -> LinearLayout {
        list.layout().unwrap_or_else(|| {
            warn!("list has no linear layout; assuming vertical, not reversed");
            LinearLayout::default()
        })
    }
}

impl OrientationProvider for LinearOrientationProvider {
    fn orientation(&self, list: &dyn ListView) -> Orientation {
        Self::layout(list).orientation
    }

    fn is_reverse_layout(&self, list: &dyn ListView) -> bool {
        Self::layout(list).reverse
    }
}
