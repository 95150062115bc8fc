#![forbid(unsafe_code)]

//! Header widget provider and its identity-keyed cache.
//!
//! # Invariants
//!
//! 1. At most one header widget exists per [`HeaderId`]; every position of a
//!    group shares it.
//! 2. A cached header has been measured against the list it was first
//!    requested for.
//! 3. `invalidate` drops every cached widget; the next request recreates it.

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use sticky_core::geometry::Orientation;
use sticky_core::logging::{debug, trace};

use crate::adapter::StickyHeadersAdapter;
use crate::orientation::OrientationProvider;
use crate::view::{HeaderId, HeaderView, ListView, MeasureConstraint};

/// Supplies measured, laid-out header widgets by position.
pub trait HeaderProvider {
    type Header: HeaderView;

    /// Header for `position`, or `None` when the position owns no header.
    fn header(&mut self, list: &dyn ListView, position: usize) -> Option<Rc<Self::Header>>;

    /// Discard every cached header.
    fn invalidate(&mut self);
}

/// Default [`HeaderProvider`]: creates headers through the adapter and
/// caches them by group identity.
pub struct HeaderViewCache<A: StickyHeadersAdapter> {
    adapter: Rc<A>,
    orientation: Rc<dyn OrientationProvider>,
    views: FxHashMap<HeaderId, Rc<A::Header>>,
}

impl<A: StickyHeadersAdapter> HeaderViewCache<A> {
    pub fn new(adapter: Rc<A>, orientation: Rc<dyn OrientationProvider>) -> Self {
        Self {
            adapter,
            orientation,
            views: FxHashMap::default(),
        }
    }

    /// Number of cached header widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.views.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.views.is_empty()
    }

    fn constraint_for(&self, list: &dyn ListView) -> MeasureConstraint {
        let orientation = self.orientation.orientation(list);
        let size = list.size();
        let padding = list.padding();
        let cross_extent = match orientation {
            Orientation::Vertical => size.width - padding.left - padding.right,
            Orientation::Horizontal => size.height - padding.top - padding.bottom,
        };
        MeasureConstraint {
            orientation,
            cross_extent: cross_extent.max(0),
        }
    }
}

impl<A: StickyHeadersAdapter> HeaderProvider for HeaderViewCache<A> {
    type Header = A::Header;

    fn header(&mut self, list: &dyn ListView, position: usize) -> Option<Rc<A::Header>> {
        let id = self.adapter.header_id(position)?;
        if let Some(view) = self.views.get(&id) {
            return Some(Rc::clone(view));
        }

        let mut view = self.adapter.create_header(position);
        let constraint = self.constraint_for(list);
        view.measure(constraint);
        trace!(
            position,
            header_id = id.0,
            width = view.size().width,
            height = view.size().height,
            "header created"
        );
        let view = Rc::new(view);
        self.views.insert(id, Rc::clone(&view));
        Some(view)
    }

    fn invalidate(&mut self) {
        debug!(cached = self.views.len(), "header cache invalidated");
        self.views.clear();
    }
}

impl<A: StickyHeadersAdapter> fmt::Debug for HeaderViewCache<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderViewCache")
            .field("cached", &self.views.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessAdapter, HeadlessList};
    use crate::orientation::LinearOrientationProvider;
    use sticky_core::geometry::{LinearLayout, Sides, Size};

    fn cache(adapter: &Rc<HeadlessAdapter>) -> HeaderViewCache<HeadlessAdapter> {
        HeaderViewCache::new(Rc::clone(adapter), Rc::new(LinearOrientationProvider))
    }

    #[test]
    fn positions_of_one_group_share_a_header() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), Some(1), Some(2)], 10));
        let list = HeadlessList::new(100, 50);
        let mut cache = cache(&adapter);

        let a = cache.header(&list, 0).unwrap();
        let b = cache.header(&list, 1).unwrap();
        let c = cache.header(&list, 2).unwrap();
        assert!(Rc::ptr_eq(&a, &b));
        assert!(!Rc::ptr_eq(&a, &c));
        assert_eq!(cache.len(), 2);
        assert_eq!(adapter.created(), 2);
    }

    #[test]
    fn positions_without_identity_have_no_header() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![None, Some(1)], 10));
        let list = HeadlessList::new(100, 50);
        let mut cache = cache(&adapter);
        assert!(cache.header(&list, 0).is_none());
        assert!(cache.header(&list, 9).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn vertical_headers_span_the_padded_width() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1)], 10));
        let list = HeadlessList::new(100, 50).with_padding(Sides::new(5, 0, 15, 0));
        let mut cache = cache(&adapter);
        assert_eq!(cache.header(&list, 0).unwrap().size(), Size::new(80, 10));
    }

    #[test]
    fn horizontal_headers_span_the_padded_height() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1)], 10));
        let list = HeadlessList::new(100, 50)
            .with_layout(Some(LinearLayout::new(Orientation::Horizontal, false)))
            .with_padding(Sides::new(0, 4, 0, 6));
        let mut cache = cache(&adapter);
        assert_eq!(cache.header(&list, 0).unwrap().size(), Size::new(10, 40));
    }

    #[test]
    fn invalidate_recreates_headers() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1)], 10));
        let list = HeadlessList::new(100, 50);
        let mut cache = cache(&adapter);
        let first = cache.header(&list, 0).unwrap();
        cache.invalidate();
        assert!(cache.is_empty());
        let second = cache.header(&list, 0).unwrap();
        assert!(!Rc::ptr_eq(&first, &second));
        assert_eq!(adapter.created(), 2);
    }
}
