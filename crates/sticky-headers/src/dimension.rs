#![forbid(unsafe_code)]

//! Margin extraction and header offset reservation.

use sticky_core::geometry::{Orientation, Sides};

use crate::view::{HeaderView, ItemView};

/// Reads layout margins and turns a header into item insets.
#[derive(Debug, Clone, Copy, Default)]
pub struct DimensionCalculator;

impl DimensionCalculator {
    #[must_use]
    pub fn header_margins<H: HeaderView + ?Sized>(&self, header: &H) -> Sides {
        header.margins()
    }

    #[must_use]
    pub fn item_margins(&self, item: &dyn ItemView) -> Sides {
        item.margins()
    }

    /// Reserve room for `header` on the leading edge of `insets`.
    ///
    /// The leading inset is overwritten, not accumulated, so repeated calls
    /// for the same item yield the same insets.
    pub fn reserve_header_space<H: HeaderView + ?Sized>(
        &self,
        insets: &mut Sides,
        header: &H,
        orientation: Orientation,
    ) {
        let margins = self.header_margins(header);
        let extent = header.size().extent(orientation) + margins.along(orientation);
        match orientation {
            Orientation::Vertical => insets.top = extent,
            Orientation::Horizontal => insets.left = extent,
        }
    }
}
