#![forbid(unsafe_code)]

//! Sticky header overlay engine.
//!
//! The host list drives two calls per layout/draw cycle:
//! [`StickyHeaders::reserve_offset`] for every item before it is laid out,
//! then [`StickyHeaders::paint_overlay`] once after the items are drawn.
//! Pointer input resolves against the state left by the last completed
//! paint pass through [`StickyHeaders::find_header_at`].
//!
//! # Caches
//!
//! Two mappings with different lifetimes:
//!
//! - **position → rect**: placements of the current frame only. Rebuilt by
//!   every paint pass, so it only holds positions that got a header in the
//!   most recent frame.
//! - **identity → (rect, position)**: last known placement of each header
//!   group. Kept across frames until [`StickyHeaders::invalidate_headers`],
//!   so a header that was visible recently remains tappable. Rect and
//!   position live in one entry and are always written together.
//!
//! # Default header extent
//!
//! The scroll-axis extent of the first header ever drawn is latched and used
//! to clip stale cached rectangles during hit-testing. It is a heuristic
//! bound shared by all headers, not a per-header value; a header whose
//! intrinsic size changes later is not tracked.
//!
//! # Failure Modes
//!
//! | Failure | Cause | Fallback |
//! |---------|-------|----------|
//! | Detached item | Item has no data position | Skipped this pass |
//! | Header unavailable | Provider returned `None` | Not drawn this pass, retried next |
//! | Duplicate identity in one pass | Inconsistent adapter | Last write wins |
//! | Overlapping cached rects | Stale identity entries | Any match (scan is unordered) |

use std::fmt;
use std::rc::Rc;

use rustc_hash::FxHashMap;
use sticky_core::Canvas;
use sticky_core::geometry::{Orientation, Rect, Sides};
use sticky_core::logging::{debug, debug_span, trace};

use crate::adapter::StickyHeadersAdapter;
use crate::dimension::DimensionCalculator;
use crate::header_cache::{HeaderProvider, HeaderViewCache};
use crate::orientation::{LinearOrientationProvider, OrientationProvider};
use crate::position::{DefaultPositionCalculator, HeaderPositionCalculator};
use crate::renderer::HeaderRenderer;
use crate::view::{HeaderId, HeaderView, ItemView, ListView, VisibilityOracle};

// ---------------------------------------------------------------------------
// Placement records
// ---------------------------------------------------------------------------

/// Last known placement of a header group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Placement {
    rect: Rect,
    position: usize,
}

/// A header resolved from a viewport coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderHit {
    pub id: HeaderId,
    /// Last position the header was drawn for.
    pub position: usize,
    /// Rectangle the header was last drawn at.
    pub rect: Rect,
}

/// Scroll-axis extent latched from the first header drawn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DefaultExtent {
    extent: i32,
    orientation: Orientation,
}

// ---------------------------------------------------------------------------
// StickyHeaders
// ---------------------------------------------------------------------------

/// Sticky header overlay for one list instance.
pub struct StickyHeaders<A: StickyHeadersAdapter + 'static> {
    adapter: Rc<A>,
    headers: Box<dyn HeaderProvider<Header = A::Header>>,
    orientation: Rc<dyn OrientationProvider>,
    calculator: Box<dyn HeaderPositionCalculator<A::Header>>,
    renderer: HeaderRenderer,
    dimensions: DimensionCalculator,
    visibility: Option<Box<dyn VisibilityOracle>>,
    rects_by_position: FxHashMap<usize, Rect>,
    placements: FxHashMap<HeaderId, Placement>,
    default_extent: Option<DefaultExtent>,
}

impl<A: StickyHeadersAdapter + 'static> StickyHeaders<A> {
    /// Overlay with the stock collaborators.
    pub fn new(adapter: Rc<A>) -> Self {
        StickyHeadersBuilder::new(adapter).build()
    }

    /// Start configuring custom collaborators.
    pub fn builder(adapter: Rc<A>) -> StickyHeadersBuilder<A> {
        StickyHeadersBuilder::new(adapter)
    }

    #[must_use]
    pub fn adapter(&self) -> &Rc<A> {
        &self.adapter
    }

    /// Reserve leading space for the header of `item`, if it starts a group.
    ///
    /// Leaves `insets` untouched for detached items and for items that do not
    /// start a group. The leading inset is assigned, not accumulated, so
    /// repeated calls for the same item are idempotent.
    pub fn reserve_offset(&mut self, insets: &mut Sides, item: &dyn ItemView, list: &dyn ListView) {
        let Some(position) = item.position() else {
            return;
        };
        let reverse = self.orientation.is_reverse_layout(list);
        if !self.calculator.has_new_header(position, reverse) {
            return;
        }
        let Some(header) = self.headers.header(list, position) else {
            trace!(position, "no header available for offset");
            return;
        };
        let orientation = self.orientation.orientation(list);
        self.dimensions.reserve_header_space(insets, &*header, orientation);
    }

    /// Draw every header the visible items need and refresh the caches.
    pub fn paint_overlay(&mut self, canvas: &mut dyn Canvas, list: &dyn ListView) {
        self.rects_by_position.clear();

        let child_count = list.child_count();
        if child_count == 0 || self.adapter.item_count() == 0 {
            return;
        }

        let orientation = self.orientation.orientation(list);
        let reverse = self.orientation.is_reverse_layout(list);
        let _span = debug_span!(
            "sticky_headers_paint",
            children = child_count,
            orientation = orientation.as_str(),
            reverse
        )
        .entered();

        for index in 0..child_count {
            let Some(item) = list.child(index) else {
                continue;
            };
            let Some(position) = item.position() else {
                continue;
            };
            if self.adapter.item_index_in_row(position) > 0 {
                continue;
            }

            let is_sticky = self.calculator.has_sticky_header(item, orientation, position);
            if !is_sticky && !self.calculator.has_new_header(position, reverse) {
                continue;
            }
            let Some(id) = self.adapter.header_id(position) else {
                continue;
            };
            let Some(header) = self.headers.header(list, position) else {
                trace!(position, "no header available to draw");
                continue;
            };

            let rect = self.rects_by_position.entry(position).or_default();
            self.calculator.init_header_bounds(
                rect,
                list,
                self.headers.as_mut(),
                &*header,
                item,
                is_sticky,
            );
            let rect = *rect;
            self.renderer.draw_header(list, canvas, &*header, rect);

            if self.default_extent.is_none() {
                let extent = header.size().extent(orientation);
                if extent > 0 {
                    self.default_extent = Some(DefaultExtent {
                        extent,
                        orientation,
                    });
                }
            }

            if let Some(previous) = self.placements.insert(id, Placement { rect, position })
                && previous.position != position
            {
                trace!(header_id = id.0, from = previous.position, to = position, "header moved");
            }
        }
    }

    /// Position of the header under `(x, y)`, if any.
    #[must_use]
    pub fn find_header_at(&self, x: i32, y: i32) -> Option<usize> {
        self.find_header_hit(x, y).map(|hit| hit.position)
    }

    /// Header under `(x, y)` with the rectangle it was last drawn at.
    ///
    /// Cached rectangles taller (or wider) than the default header extent
    /// are clipped to it first. Positions the visibility oracle reports as
    /// hidden are skipped. Scan order is unspecified.
    #[must_use]
    pub fn find_header_hit(&self, x: i32, y: i32) -> Option<HeaderHit> {
        for (id, placement) in &self.placements {
            let mut rect = placement.rect;
            if let Some(default) = self.default_extent
                && rect.extent(default.orientation) > default.extent
            {
                rect = rect.with_extent(default.orientation, default.extent);
            }
            if !rect.contains(x, y) {
                continue;
            }
            if let Some(oracle) = &self.visibility
                && !oracle.is_position_visible(placement.position)
            {
                trace!(header_id = id.0, position = placement.position, "hit on hidden header");
                continue;
            }
            return Some(HeaderHit {
                id: *id,
                position: placement.position,
                rect: placement.rect,
            });
        }
        None
    }

    /// Header widget for `position`, created and measured on demand.
    pub fn header_view(&mut self, list: &dyn ListView, position: usize) -> Option<Rc<A::Header>> {
        self.headers.header(list, position)
    }

    /// Drop every cached header widget and placement.
    ///
    /// Does not redraw; the host must request a new frame.
    pub fn invalidate_headers(&mut self) {
        debug!(
            positions = self.rects_by_position.len(),
            identities = self.placements.len(),
            "invalidating sticky headers"
        );
        self.headers.invalidate();
        self.rects_by_position.clear();
        self.placements.clear();
    }

    /// Rectangle drawn for `position` in the most recent paint pass.
    #[must_use]
    pub fn header_rect(&self, position: usize) -> Option<Rect> {
        self.rects_by_position.get(&position).copied()
    }

    /// Latched default header extent along the scroll axis.
    #[must_use]
    pub fn default_header_extent(&self) -> Option<i32> {
        self.default_extent.map(|d| d.extent)
    }
}

impl<A: StickyHeadersAdapter + 'static> fmt::Debug for StickyHeaders<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickyHeaders")
            .field("frame_rects", &self.rects_by_position.len())
            .field("identities", &self.placements.len())
            .field("default_extent", &self.default_extent)
            .field("has_visibility_oracle", &self.visibility.is_some())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`StickyHeaders`] with injectable collaborators.
///
/// Unset collaborators default to the stock implementations, wired to the
/// configured orientation provider.
pub struct StickyHeadersBuilder<A: StickyHeadersAdapter + 'static> {
    adapter: Rc<A>,
    orientation: Option<Rc<dyn OrientationProvider>>,
    headers: Option<Box<dyn HeaderProvider<Header = A::Header>>>,
    calculator: Option<Box<dyn HeaderPositionCalculator<A::Header>>>,
    visibility: Option<Box<dyn VisibilityOracle>>,
}

impl<A: StickyHeadersAdapter + 'static> StickyHeadersBuilder<A> {
    pub fn new(adapter: Rc<A>) -> Self {
        Self {
            adapter,
            orientation: None,
            headers: None,
            calculator: None,
            visibility: None,
        }
    }

    #[must_use]
    pub fn with_orientation_provider(mut self, provider: impl OrientationProvider + 'static) -> Self {
        self.orientation = Some(Rc::new(provider));
        self
    }

    #[must_use]
    pub fn with_header_provider(
        mut self,
        provider: impl HeaderProvider<Header = A::Header> + 'static,
    ) -> Self {
        self.headers = Some(Box::new(provider));
        self
    }

    #[must_use]
    pub fn with_position_calculator(
        mut self,
        calculator: impl HeaderPositionCalculator<A::Header> + 'static,
    ) -> Self {
        self.calculator = Some(Box::new(calculator));
        self
    }

    /// Reject hits on positions the oracle reports as not visible.
    #[must_use]
    pub fn with_visibility(mut self, oracle: impl VisibilityOracle + 'static) -> Self {
        self.visibility = Some(Box::new(oracle));
        self
    }

    pub fn build(self) -> StickyHeaders<A> {
        let orientation: Rc<dyn OrientationProvider> = self
            .orientation
            .unwrap_or_else(|| Rc::new(LinearOrientationProvider));
        let headers = self.headers.unwrap_or_else(|| {
            Box::new(HeaderViewCache::new(
                Rc::clone(&self.adapter),
                Rc::clone(&orientation),
            ))
        });
        let calculator = self.calculator.unwrap_or_else(|| {
            Box::new(DefaultPositionCalculator::new(
                Rc::clone(&self.adapter),
                Rc::clone(&orientation),
            ))
        });
        StickyHeaders {
            renderer: HeaderRenderer::new(Rc::clone(&orientation)),
            adapter: self.adapter,
            headers,
            orientation,
            calculator,
            dimensions: DimensionCalculator,
            visibility: self.visibility,
            rects_by_position: FxHashMap::default(),
            placements: FxHashMap::default(),
            default_extent: None,
        }
    }
}

impl<A: StickyHeadersAdapter + 'static> fmt::Debug for StickyHeadersBuilder<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StickyHeadersBuilder")
            .field("custom_orientation", &self.orientation.is_some())
            .field("custom_headers", &self.headers.is_some())
            .field("custom_calculator", &self.calculator.is_some())
            .field("has_visibility_oracle", &self.visibility.is_some())
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{HeadlessAdapter, HeadlessItem, HeadlessList, RecordingCanvas};
    use sticky_core::geometry::{LinearLayout, Size};

    /// Ten items, 20 tall, header groups starting at 0 and 4, headers 10 tall.
    fn ten_items() -> (Rc<HeadlessAdapter>, StickyHeaders<HeadlessAdapter>, HeadlessList) {
        let ids = (0..10).map(|p| Some(if p < 4 { 1 } else { 2 })).collect();
        let adapter = Rc::new(HeadlessAdapter::new(ids, 10));
        let mut engine = StickyHeaders::new(Rc::clone(&adapter));
        let mut list = HeadlessList::new(100, 300);
        list.lay_out(&mut engine, 20, 0);
        (adapter, engine, list)
    }

    fn paint(engine: &mut StickyHeaders<HeadlessAdapter>, list: &HeadlessList) {
        let mut canvas = RecordingCanvas::default();
        engine.paint_overlay(&mut canvas, list);
    }

    #[test]
    fn reserve_offset_is_idempotent() {
        let (_, mut engine, list) = ten_items();
        let item = HeadlessItem::new(Some(4), Rect::EMPTY);
        let mut first = Sides::ZERO;
        engine.reserve_offset(&mut first, &item, &list);
        let mut second = first;
        engine.reserve_offset(&mut second, &item, &list);
        assert_eq!(first, Sides::new(0, 10, 0, 0));
        assert_eq!(first, second);
    }

    #[test]
    fn reserve_offset_skips_detached_and_inner_items() {
        let (_, mut engine, list) = ten_items();
        let mut insets = Sides::ZERO;
        engine.reserve_offset(&mut insets, &HeadlessItem::new(None, Rect::EMPTY), &list);
        engine.reserve_offset(&mut insets, &HeadlessItem::new(Some(2), Rect::EMPTY), &list);
        assert_eq!(insets, Sides::ZERO);
    }

    #[test]
    fn paint_records_drawn_rects() {
        let (_, mut engine, list) = ten_items();
        let mut canvas = RecordingCanvas::default();
        engine.paint_overlay(&mut canvas, &list);

        // Item 0 occupies 10..30 below its header; group 2 starts at item 4.
        assert_eq!(engine.header_rect(0), Some(Rect::new(0, 0, 100, 10)));
        assert_eq!(engine.header_rect(4), Some(Rect::new(0, 90, 100, 100)));
        assert_eq!(engine.header_rect(1), None);
        assert_eq!(canvas.translations(), vec![(0, 0), (0, 90)]);
        assert_eq!(engine.default_header_extent(), Some(10));
    }

    #[test]
    fn scenario_tap_header_body_and_invalidate() {
        let (_, mut engine, list) = ten_items();
        paint(&mut engine, &list);

        assert_eq!(engine.find_header_at(50, 5), Some(0));
        // Item 5's body: 120..140.
        assert_eq!(engine.find_header_at(50, 125), None);

        engine.invalidate_headers();
        assert_eq!(engine.find_header_at(50, 5), None);
        assert_eq!(engine.header_rect(0), None);
        assert_eq!(engine.header_rect(4), None);
    }

    #[test]
    fn identity_follows_position_drift() {
        let (adapter, mut engine, mut list) = ten_items();
        paint(&mut engine, &list);
        assert_eq!(engine.find_header_at(50, 95), Some(4));

        // Two items of group 1 removed: group 2 now starts at position 2.
        adapter.set_header_ids((0..8).map(|p| Some(if p < 2 { 1 } else { 2 })).collect());
        list.lay_out(&mut engine, 20, 0);
        paint(&mut engine, &list);

        let rect = engine.header_rect(2).unwrap();
        assert_eq!(engine.find_header_at(50, rect.top + 1), Some(2));
    }

    #[test]
    fn stale_oversized_rect_is_clipped() {
        let (_, mut engine, list) = ten_items();
        paint(&mut engine, &list);

        let id = HeaderId::new(2);
        let placement = engine.placements.get_mut(&id).unwrap();
        placement.rect.bottom = placement.rect.top + 40;

        // Within the inflated rect but below the default extent.
        assert_eq!(engine.find_header_at(50, 90 + 25), None);
        assert_eq!(engine.find_header_at(50, 90 + 5), Some(4));
    }

    #[test]
    fn hidden_positions_are_skipped() {
        let ids = (0..10).map(|p| Some(if p < 4 { 1 } else { 2 })).collect();
        let adapter = Rc::new(HeadlessAdapter::new(ids, 10));
        let mut engine = StickyHeaders::builder(Rc::clone(&adapter))
            .with_visibility(|position: usize| position != 4)
            .build();
        let mut list = HeadlessList::new(100, 300);
        list.lay_out(&mut engine, 20, 0);
        paint(&mut engine, &list);

        assert_eq!(engine.find_header_at(50, 5), Some(0));
        assert_eq!(engine.find_header_at(50, 95), None);
    }

    #[test]
    fn only_row_leading_items_get_headers() {
        // Three columns; group changes on every row.
        let ids = (0..9).map(|p| Some(p as u64 / 3)).collect();
        let adapter = Rc::new(HeadlessAdapter::new(ids, 10).with_columns(3));
        let mut engine = StickyHeaders::new(Rc::clone(&adapter));
        let mut list = HeadlessList::new(90, 300);
        list.lay_out(&mut engine, 20, 0);
        paint(&mut engine, &list);

        for position in 0..9 {
            let leading = position % 3 == 0;
            assert_eq!(engine.header_rect(position).is_some(), leading, "position {position}");
        }
    }

    #[test]
    fn empty_list_is_a_no_op() {
        let adapter = Rc::new(HeadlessAdapter::new(Vec::new(), 10));
        let mut engine = StickyHeaders::new(Rc::clone(&adapter));
        let list = HeadlessList::new(100, 300);
        let mut canvas = RecordingCanvas::default();
        engine.paint_overlay(&mut canvas, &list);
        assert!(canvas.ops().is_empty());
        assert_eq!(engine.default_header_extent(), None);
    }

    #[test]
    fn detached_children_are_skipped() {
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), Some(1)], 10));
        let mut engine = StickyHeaders::new(Rc::clone(&adapter));
        let list = HeadlessList::new(100, 300).with_items(vec![
            HeadlessItem::new(None, Rect::new(0, 0, 100, 20)),
            HeadlessItem::new(Some(1), Rect::new(0, 20, 100, 40)),
        ]);
        paint(&mut engine, &list);
        assert_eq!(engine.header_rect(1), None);
    }

    #[test]
    fn duplicate_identity_last_write_wins() {
        // Identity 7 appears twice, split by another group.
        let adapter = Rc::new(HeadlessAdapter::new(vec![Some(7), Some(8), Some(7)], 10));
        let mut engine = StickyHeaders::new(Rc::clone(&adapter));
        let mut list = HeadlessList::new(100, 300);
        list.lay_out(&mut engine, 20, 0);
        paint(&mut engine, &list);

        let second = engine.header_rect(2).unwrap();
        let first = engine.header_rect(0).unwrap();
        assert_eq!(engine.find_header_at(50, second.top + 1), Some(2));
        assert_eq!(engine.find_header_at(50, first.top + 1), None);
        assert_eq!(engine.placements.len(), 2);
    }

    #[test]
    fn sticky_header_stays_pinned_while_scrolling() {
        let (_, mut engine, mut list) = ten_items();
        list.lay_out(&mut engine, 20, 35);
        paint(&mut engine, &list);
        assert_eq!(engine.header_rect(1), Some(Rect::new(0, 0, 100, 10)));
        assert_eq!(engine.find_header_at(10, 3), Some(1));
    }

    #[test]
    fn horizontal_lists_clip_along_width() {
        let ids = (0..10).map(|p| Some(if p < 4 { 1 } else { 2 })).collect();
        let adapter = Rc::new(HeadlessAdapter::new(ids, 10));
        let mut engine = StickyHeaders::new(Rc::clone(&adapter));
        let mut list = HeadlessList::new(300, 50)
            .with_layout(Some(LinearLayout::new(Orientation::Horizontal, false)));
        list.lay_out(&mut engine, 20, 0);
        paint(&mut engine, &list);

        assert_eq!(engine.header_rect(0), Some(Rect::from_size(0, 0, Size::new(10, 50))));
        assert_eq!(engine.find_header_at(5, 40), Some(0));
        assert_eq!(engine.find_header_at(15, 40), None);
    }

    #[test]
    fn reversed_sticky_header_is_pushed_off() {
        let ids = [3, 3, 3, 2, 1, 1, 1].into_iter().map(Some).collect();
        let adapter = Rc::new(HeadlessAdapter::new(ids, 10));
        let mut engine = StickyHeaders::new(Rc::clone(&adapter));
        let mut list = HeadlessList::new(100, 60)
            .with_layout(Some(LinearLayout::new(Orientation::Vertical, true)));
        // Rows top to bottom: 4 at -15, 3 at 15, 2 at 45.
        list.lay_out(&mut engine, 20, 65);
        paint(&mut engine, &list);

        assert_eq!(engine.header_rect(4), Some(Rect::new(0, -5, 100, 5)));
        assert_eq!(engine.header_rect(3), Some(Rect::new(0, 5, 100, 15)));
        assert_eq!(engine.find_header_at(50, 2), Some(4));
        assert_eq!(engine.find_header_at(50, 8), Some(3));
    }
}
