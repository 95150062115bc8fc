#![forbid(unsafe_code)]

//! Data adapter contract.

use crate::view::{HeaderId, HeaderView};

/// Application data source for sticky headers.
///
/// The adapter owns the data set and the grouping logic. It is shared
/// (`Rc`) by the overlay, the header cache and the position calculator, so
/// a host that mutates its data does so through interior mutability and
/// then calls [`crate::StickyHeaders::invalidate_headers`].
pub trait StickyHeadersAdapter {
    type Header: HeaderView;

    fn item_count(&self) -> usize;

    /// Group identity of the item at `position`, or `None` when the item
    /// owns no header.
    fn header_id(&self, position: usize) -> Option<HeaderId>;

    /// Column of `position` within its visual row. Only row-leading items
    /// (index 0) are eligible to own a header.
    fn item_index_in_row(&self, _position: usize) -> usize {
        0
    }

    /// Create the header widget for `position` and bind it to that
    /// position's data. Measurement happens afterwards.
    fn create_header(&self, position: usize) -> Self::Header;
}
