#![forbid(unsafe_code)]

//! Header placement: group boundaries, stickiness, and the push transition.
//!
//! # Geometry
//!
//! Along the scroll axis a header normally sits directly before the first
//! item of its group, in the space reserved by
//! [`crate::StickyHeaders::reserve_offset`]. It is clamped so it never
//! starts before the list's leading content edge, which is what pins a
//! sticky header while its group scrolls underneath.
//!
//! When the next group's header would overlap a sticky header, the sticky
//! header is translated back by exactly the overlap. The translation is a
//! linear function of the next group's first item position, so it grows
//! monotonically while scrolling forward and undoes itself when scrolling
//! back.
//!
//! The next group is found geometrically: it is the unobscured child
//! nearest the leading edge, whatever order the list enumerates its
//! children in. In a reversed layout the first position in layout order is
//! the last data position, so position 0 can push like any other group
//! start.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | No unobscured child | Every child lies under the sticky header | No push |
//! | Next header unavailable | Provider returned `None` | No push |
//! | Detached child | Child has no data position | Skipped when looking for the next group |

use std::fmt;
use std::rc::Rc;

use sticky_core::geometry::{Orientation, Rect};
use sticky_core::logging::trace;

use crate::adapter::StickyHeadersAdapter;
use crate::dimension::DimensionCalculator;
use crate::header_cache::HeaderProvider;
use crate::orientation::OrientationProvider;
use crate::view::{HeaderView, ItemView, ListView};

/// Computes where headers belong for a given frame.
pub trait HeaderPositionCalculator<H: HeaderView> {
    /// Whether `position` is the first item of its group in layout order.
    fn has_new_header(&self, position: usize, reverse: bool) -> bool;

    /// Whether `item` is the leading visible row of its group, so its header
    /// is pinned at the viewport edge.
    fn has_sticky_header(
        &self,
        item: &dyn ItemView,
        orientation: Orientation,
        position: usize,
    ) -> bool;

    /// Write the on-screen bounds of `header`, drawn for `item`, into
    /// `bounds`. Applies the push transition when `is_sticky`.
    fn init_header_bounds(
        &self,
        bounds: &mut Rect,
        list: &dyn ListView,
        headers: &mut dyn HeaderProvider<Header = H>,
        header: &H,
        item: &dyn ItemView,
        is_sticky: bool,
    );
}

/// The stock placement algorithm for linear and row-based lists.
pub struct DefaultPositionCalculator<A: StickyHeadersAdapter> {
    adapter: Rc<A>,
    orientation: Rc<dyn OrientationProvider>,
    dimensions: DimensionCalculator,
}

impl<A: StickyHeadersAdapter> DefaultPositionCalculator<A> {
    pub fn new(adapter: Rc<A>, orientation: Rc<dyn OrientationProvider>) -> Self {
        Self {
            adapter,
            orientation,
            dimensions: DimensionCalculator,
        }
    }

    fn in_bounds(&self, position: usize) -> bool {
        position < self.adapter.item_count()
    }

    /// Leading content edge: the padding when children are clipped to it.
    fn list_leading(list: &dyn ListView, orientation: Orientation) -> i32 {
        if list.clip_to_padding() {
            list.padding().leading(orientation)
        } else {
            0
        }
    }

    fn default_header_bounds(
        &self,
        list: &dyn ListView,
        header: &A::Header,
        item: &dyn ItemView,
        orientation: Orientation,
    ) -> Rect {
        let header_margins = self.dimensions.header_margins(header);
        let item_margins = self.dimensions.item_margins(item);
        let item_bounds = item.bounds();
        let size = header.size();

        let (left, top) = match orientation {
            Orientation::Vertical => {
                let left = item_bounds.left - item_margins.left + header_margins.left;
                let top = (item_bounds.top
                    - item_margins.top
                    - size.height
                    - header_margins.bottom)
                    .max(Self::list_leading(list, orientation) + header_margins.top);
                (left, top)
            }
            Orientation::Horizontal => {
                let top = item_bounds.top - item_margins.top + header_margins.top;
                let left = (item_bounds.left
                    - item_margins.left
                    - size.width
                    - header_margins.right)
                    .max(Self::list_leading(list, orientation) + header_margins.left);
                (left, top)
            }
        };
        Rect::from_size(left, top, size)
    }

    /// An item is obscured when it belongs to the sticky header's group and
    /// starts before the header's trailing edge.
    fn is_obscured_by(
        &self,
        list: &dyn ListView,
        item: &dyn ItemView,
        header: &A::Header,
        sticky_position: usize,
        orientation: Orientation,
    ) -> bool {
        let Some(position) = item.position() else {
            return false;
        };
        if self.adapter.header_id(position) != self.adapter.header_id(sticky_position) {
            return false;
        }

        let margins = self.dimensions.header_margins(header);
        let item_leading = item.bounds().leading(orientation)
            - self.dimensions.item_margins(item).leading(orientation);
        let header_trailing = Self::list_leading(list, orientation)
            + header.size().extent(orientation)
            + margins.along(orientation);
        item_leading < header_trailing
    }

    /// The unobscured child nearest the leading edge along the scroll axis.
    /// Child enumeration order is not relied on; detached children are
    /// skipped.
    fn first_unobscured<'l>(
        &self,
        list: &'l dyn ListView,
        header: &A::Header,
        sticky_position: usize,
        orientation: Orientation,
    ) -> Option<&'l dyn ItemView> {
        (0..list.child_count())
            .filter_map(|index| list.child(index))
            .filter(|child| child.position().is_some())
            .filter(|child| !self.is_obscured_by(list, *child, header, sticky_position, orientation))
            .min_by_key(|child| child.bounds().leading(orientation))
    }

    /// The first position in layout order: the last one when reversed.
    fn first_in_layout(&self, reverse: bool) -> Option<usize> {
        let count = self.adapter.item_count();
        if count == 0 {
            None
        } else if reverse {
            Some(count - 1)
        } else {
            Some(0)
        }
    }

    /// Returns the item whose header is pushing the sticky header, together
    /// with that header.
    fn pushing_header(
        &self,
        list: &dyn ListView,
        headers: &mut dyn HeaderProvider<Header = A::Header>,
        sticky: &A::Header,
        sticky_position: usize,
        orientation: Orientation,
    ) -> Option<(i32, Rc<A::Header>)> {
        let next_item = self.first_unobscured(list, sticky, sticky_position, orientation)?;
        let next_position = next_item.position()?;
        let reverse = self.orientation.is_reverse_layout(list);
        if Some(next_position) == self.first_in_layout(reverse)
            || !self.has_new_header(next_position, reverse)
        {
            return None;
        }
        let next_header = headers.header(list, next_position)?;

        let next_margins = self.dimensions.header_margins(&*next_header);
        let sticky_margins = self.dimensions.header_margins(sticky);
        let next_item_leading = next_item.bounds().leading(orientation);
        let next_header_leading = next_item_leading
            - next_margins.trailing(orientation)
            - next_header.size().extent(orientation)
            - next_margins.leading(orientation);
        let sticky_trailing = Self::list_leading(list, orientation)
            + sticky.size().extent(orientation)
            + sticky_margins.along(orientation);

        (next_header_leading < sticky_trailing).then_some((next_item_leading, next_header))
    }
}

impl<A: StickyHeadersAdapter> HeaderPositionCalculator<A::Header> for DefaultPositionCalculator<A> {
    fn has_new_header(&self, position: usize, reverse: bool) -> bool {
        if !self.in_bounds(position) {
            return false;
        }
        let Some(id) = self.adapter.header_id(position) else {
            return false;
        };

        if Some(position) == self.first_in_layout(reverse) {
            return true;
        }

        let previous = if reverse {
            position.checked_add(1)
        } else {
            position.checked_sub(1)
        };
        let previous_id = previous
            .filter(|p| self.in_bounds(*p))
            .and_then(|p| self.adapter.header_id(p));
        previous_id != Some(id)
    }

    fn has_sticky_header(
        &self,
        item: &dyn ItemView,
        orientation: Orientation,
        position: usize,
    ) -> bool {
        let offset = item.bounds().leading(orientation);
        let margin = self.dimensions.item_margins(item).leading(orientation);
        offset <= margin && self.adapter.header_id(position).is_some()
    }

    fn init_header_bounds(
        &self,
        bounds: &mut Rect,
        list: &dyn ListView,
        headers: &mut dyn HeaderProvider<Header = A::Header>,
        header: &A::Header,
        item: &dyn ItemView,
        is_sticky: bool,
    ) {
        let orientation = self.orientation.orientation(list);
        *bounds = self.default_header_bounds(list, header, item, orientation);

        if !is_sticky {
            return;
        }
        let Some(sticky_position) = item.position() else {
            return;
        };
        let Some((next_item_leading, next_header)) =
            self.pushing_header(list, headers, header, sticky_position, orientation)
        else {
            return;
        };

        let next_margins = self.dimensions.header_margins(&*next_header);
        let sticky_margins = self.dimensions.header_margins(header);
        let sticky_leading = Self::list_leading(list, orientation) + sticky_margins.along(orientation);
        let shift = next_item_leading
            - next_header.size().extent(orientation)
            - next_margins.along(orientation)
            - header.size().extent(orientation)
            - sticky_leading;
        if shift < 0 {
            trace!(sticky_position, shift, "sticky header pushed");
            *bounds = match orientation {
                Orientation::Vertical => bounds.offset(0, shift),
                Orientation::Horizontal => bounds.offset(shift, 0),
            };
        }
    }
}

impl<A: StickyHeadersAdapter> fmt::Debug for DefaultPositionCalculator<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultPositionCalculator")
            .field("dimensions", &self.dimensions)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::header_cache::HeaderViewCache;
    use crate::headless::{HeadlessAdapter, HeadlessItem, HeadlessList};
    use crate::orientation::LinearOrientationProvider;
    use sticky_core::geometry::{LinearLayout, Sides, Size};

    fn calculator(adapter: &Rc<HeadlessAdapter>) -> DefaultPositionCalculator<HeadlessAdapter> {
        DefaultPositionCalculator::new(Rc::clone(adapter), Rc::new(LinearOrientationProvider))
    }

    fn cache(adapter: &Rc<HeadlessAdapter>) -> HeaderViewCache<HeadlessAdapter> {
        HeaderViewCache::new(Rc::clone(adapter), Rc::new(LinearOrientationProvider))
    }

    #[test]
    fn new_header_at_group_boundaries() {
        let adapter = Rc::new(HeadlessAdapter::new(
            vec![Some(1), Some(1), Some(2), Some(2), None, Some(2)],
            10,
        ));
        let calc = calculator(&adapter);
        let starts: Vec<bool> = (0..6).map(|p| calc.has_new_header(p, false)).collect();
        assert_eq!(starts, vec![true, false, true, false, false, true]);
        assert!(!calc.has_new_header(6, false));
    }

    #[test]
    fn new_header_in_reverse_layout_looks_forward() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), Some(1), Some(2), Some(2)], 10));
        let calc = calculator(&adapter);
        let starts: Vec<bool> = (0..4).map(|p| calc.has_new_header(p, true)).collect();
        assert_eq!(starts, vec![false, true, false, true]);
    }

    #[test]
    fn sticky_requires_leading_edge_and_identity() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), None], 10));
        let calc = calculator(&adapter);
        let at_top = HeadlessItem::new(Some(0), Rect::new(0, -3, 100, 17));
        let below = HeadlessItem::new(Some(0), Rect::new(0, 4, 100, 24));
        let orphan = HeadlessItem::new(Some(1), Rect::new(0, 0, 100, 20));
        assert!(calc.has_sticky_header(&at_top, Orientation::Vertical, 0));
        assert!(!calc.has_sticky_header(&below, Orientation::Vertical, 0));
        assert!(!calc.has_sticky_header(&orphan, Orientation::Vertical, 1));
    }

    #[test]
    fn inline_header_sits_before_its_item() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), Some(1), Some(2)], 10));
        let calc = calculator(&adapter);
        let mut headers = cache(&adapter);
        let list = HeadlessList::new(100, 200);
        let item = HeadlessItem::new(Some(2), Rect::new(0, 60, 100, 80));
        let header = headers.header(&list, 2).unwrap();

        let mut bounds = Rect::EMPTY;
        calc.init_header_bounds(&mut bounds, &list, &mut headers, &*header, &item, false);
        assert_eq!(bounds, Rect::new(0, 50, 100, 60));
    }

    #[test]
    fn sticky_header_clamps_to_padding() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), Some(1)], 10));
        let calc = calculator(&adapter);
        let mut headers = cache(&adapter);
        let list = HeadlessList::new(100, 200).with_padding(Sides::new(0, 6, 0, 0));
        let item = HeadlessItem::new(Some(0), Rect::new(0, -12, 100, 8));
        let header = headers.header(&list, 0).unwrap();

        let mut bounds = Rect::EMPTY;
        calc.init_header_bounds(&mut bounds, &list, &mut headers, &*header, &item, true);
        assert_eq!(bounds, Rect::new(0, 6, 100, 16));
    }

    #[test]
    fn sticky_header_is_pushed_by_next_group() {
        // Group 1 = positions 0..=1, group 2 starts at 2. Headers are 10 tall.
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), Some(1), Some(2)], 10));
        let calc = calculator(&adapter);
        let mut headers = cache(&adapter);
        let list = HeadlessList::new(100, 200).with_items(vec![
            HeadlessItem::new(Some(1), Rect::new(0, -5, 100, 5)),
            HeadlessItem::new(Some(2), Rect::new(0, 15, 100, 35)),
        ]);
        let header = headers.header(&list, 1).unwrap();

        let mut bounds = Rect::EMPTY;
        let first = list.child(0).unwrap();
        calc.init_header_bounds(&mut bounds, &list, &mut headers, &*header, first, true);
        // Next header occupies 5..15, so the sticky one ends at 5.
        assert_eq!(bounds, Rect::new(0, -5, 100, 5));
    }

    #[test]
    fn push_is_monotonic_in_scroll() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), Some(1), Some(2)], 10));
        let calc = calculator(&adapter);
        let mut headers = cache(&adapter);

        let mut last_top = i32::MAX;
        for scroll in 0..30 {
            let list = HeadlessList::new(100, 200).with_items(vec![
                HeadlessItem::new(Some(1), Rect::new(0, -scroll, 100, 20 - scroll)),
                HeadlessItem::new(Some(2), Rect::new(0, 30 - scroll, 100, 50 - scroll)),
            ]);
            let header = headers.header(&list, 1).unwrap();
            let mut bounds = Rect::EMPTY;
            calc.init_header_bounds(&mut bounds, &list, &mut headers, &*header, list.child(0).unwrap(), true);
            assert!(bounds.top <= last_top);
            assert_eq!(bounds.height(), 10);
            last_top = bounds.top;
        }
        assert!(last_top < 0);
    }

    #[test]
    fn horizontal_push_moves_left() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), Some(2)], 10));
        let calc = calculator(&adapter);
        let mut headers = cache(&adapter);
        let list = HeadlessList::new(200, 50)
            .with_layout(Some(LinearLayout::new(Orientation::Horizontal, false)))
            .with_items(vec![
                HeadlessItem::new(Some(0), Rect::new(-2, 0, 18, 50)),
                HeadlessItem::new(Some(1), Rect::new(16, 0, 36, 50)),
            ]);
        let header = headers.header(&list, 0).unwrap();
        assert_eq!(header.size(), Size::new(10, 50));

        let mut bounds = Rect::EMPTY;
        calc.init_header_bounds(&mut bounds, &list, &mut headers, &*header, list.child(0).unwrap(), true);
        assert_eq!(bounds, Rect::new(-4, 0, 6, 50));
    }

    fn reversed(height: i32) -> HeadlessList {
        HeadlessList::new(100, height).with_layout(Some(LinearLayout::new(Orientation::Vertical, true)))
    }

    #[test]
    fn reversed_sticky_header_is_pushed_by_the_group_below() {
        // Rows top to bottom: 4 (sticky, group 1), 3 (group 2), 2 (group 3).
        let adapter = Rc::new(HeadlessAdapter::new(
            vec![Some(3), Some(3), Some(3), Some(2), Some(1), Some(1), Some(1)],
            10,
        ));
        let calc = calculator(&adapter);
        let mut headers = cache(&adapter);
        let list = reversed(60).with_items(vec![
            HeadlessItem::new(Some(4), Rect::new(0, -15, 100, 5)),
            HeadlessItem::new(Some(3), Rect::new(0, 15, 100, 35)),
            HeadlessItem::new(Some(2), Rect::new(0, 45, 100, 65)),
        ]);
        let header = headers.header(&list, 4).unwrap();

        let mut bounds = Rect::EMPTY;
        calc.init_header_bounds(&mut bounds, &list, &mut headers, &*header, list.child(0).unwrap(), true);
        // Group 2's header occupies 5..15.
        assert_eq!(bounds, Rect::new(0, -5, 100, 5));
    }

    #[test]
    fn reversed_position_zero_can_push() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(2), Some(1), Some(1), Some(1)], 10));
        let calc = calculator(&adapter);
        let mut headers = cache(&adapter);
        let list = reversed(200).with_items(vec![
            HeadlessItem::new(Some(1), Rect::new(0, -15, 100, 5)),
            HeadlessItem::new(Some(0), Rect::new(0, 15, 100, 35)),
        ]);
        let header = headers.header(&list, 1).unwrap();

        let mut bounds = Rect::EMPTY;
        calc.init_header_bounds(&mut bounds, &list, &mut headers, &*header, list.child(0).unwrap(), true);
        assert_eq!(bounds, Rect::new(0, -5, 100, 5));
    }

    #[test]
    fn push_ignores_child_enumeration_order() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), Some(1), Some(2), Some(2)], 10));
        let calc = calculator(&adapter);
        let mut headers = cache(&adapter);
        // Bottom-most child first.
        let list = HeadlessList::new(100, 200).with_items(vec![
            HeadlessItem::new(Some(3), Rect::new(0, 35, 100, 55)),
            HeadlessItem::new(Some(2), Rect::new(0, 15, 100, 35)),
            HeadlessItem::new(Some(1), Rect::new(0, -5, 100, 15)),
        ]);
        let header = headers.header(&list, 1).unwrap();

        let mut bounds = Rect::EMPTY;
        calc.init_header_bounds(&mut bounds, &list, &mut headers, &*header, list.child(2).unwrap(), true);
        assert_eq!(bounds, Rect::new(0, -5, 100, 5));
    }
}
