#![forbid(unsafe_code)]

//! In-memory list, headers, adapter, and canvas for driving the overlay
//! without a UI toolkit.
//!
//! Useful for tests and benchmarks, and for hosts that want to check their
//! header wiring headlessly. [`HeadlessList::lay_out`] plays the role of the
//! list widget: it asks the overlay for header offsets, stacks rows along
//! the scroll axis, and keeps only the rows intersecting the viewport.
//!
//! # Example
//!
//! ```
//! use std::rc::Rc;
//! use sticky_headers::StickyHeaders;
//! use sticky_headers::headless::{HeadlessAdapter, HeadlessList, RecordingCanvas};
//!
//! let adapter = Rc::new(HeadlessAdapter::new(vec![Some(1), Some(1), Some(2)], 10));
//! let mut headers = StickyHeaders::new(Rc::clone(&adapter));
//! let mut list = HeadlessList::new(100, 200);
//! list.lay_out(&mut headers, 20, 0);
//!
//! let mut canvas = RecordingCanvas::default();
//! headers.paint_overlay(&mut canvas, &list);
//! assert_eq!(headers.find_header_at(50, 5), Some(0));
//! ```

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use sticky_core::Canvas;
use sticky_core::event::PointerEvent;
use sticky_core::geometry::{LinearLayout, Orientation, Rect, Sides, Size};

use crate::adapter::StickyHeadersAdapter;
use crate::overlay::StickyHeaders;
use crate::view::{HeaderId, HeaderView, HitNode, ItemView, ListView, MeasureConstraint};

// ---------------------------------------------------------------------------
// Items and list
// ---------------------------------------------------------------------------

/// A laid-out list child.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeadlessItem {
    position: Option<usize>,
    bounds: Rect,
    margins: Sides,
}

impl HeadlessItem {
    #[must_use]
    pub fn new(position: Option<usize>, bounds: Rect) -> Self {
        Self {
            position,
            bounds,
            margins: Sides::ZERO,
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Sides) -> Self {
        self.margins = margins;
        self
    }
}

impl ItemView for HeadlessItem {
    fn position(&self) -> Option<usize> {
        self.position
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }

    fn margins(&self) -> Sides {
        self.margins
    }
}

/// A list viewport holding the currently attached children.
#[derive(Debug, Clone)]
pub struct HeadlessList {
    size: Size,
    padding: Sides,
    clip_to_padding: bool,
    layout: Option<LinearLayout>,
    items: Vec<HeadlessItem>,
}

impl HeadlessList {
    /// Vertical, non-reversed list with no padding and no children.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self {
            size: Size::new(width, height),
            padding: Sides::ZERO,
            clip_to_padding: true,
            layout: Some(LinearLayout::default()),
            items: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_layout(mut self, layout: Option<LinearLayout>) -> Self {
        self.layout = layout;
        self
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Sides) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_clip_to_padding(mut self, clip: bool) -> Self {
        self.clip_to_padding = clip;
        self
    }

    #[must_use]
    pub fn with_items(mut self, items: Vec<HeadlessItem>) -> Self {
        self.items = items;
        self
    }

    #[must_use]
    pub fn items(&self) -> &[HeadlessItem] {
        &self.items
    }

    /// Position of the child under `(x, y)`, if any.
    #[must_use]
    pub fn item_at(&self, x: i32, y: i32) -> Option<usize> {
        self.items
            .iter()
            .find(|item| item.bounds.contains(x, y))
            .and_then(|item| item.position)
    }

    /// Lay out every adapter item with a fixed scroll-axis extent, scrolled
    /// by `scroll`, and attach the rows that intersect the viewport.
    ///
    /// Rows are formed from [`StickyHeadersAdapter::item_index_in_row`];
    /// each row is shifted by the largest leading inset the overlay reserves
    /// for its members.
    pub fn lay_out<A>(&mut self, headers: &mut StickyHeaders<A>, item_extent: i32, scroll: i32)
    where
        A: StickyHeadersAdapter + 'static,
    {
        let adapter = Rc::clone(headers.adapter());
        let layout = self.layout.unwrap_or_default();
        let orientation = layout.orientation;

        let mut rows: Vec<Vec<usize>> = Vec::new();
        for position in 0..adapter.item_count() {
            match rows.last_mut() {
                Some(row) if adapter.item_index_in_row(position) > 0 => row.push(position),
                _ => rows.push(vec![position]),
            }
        }
        if layout.reverse {
            rows.reverse();
        }

        let columns = rows.iter().map(Vec::len).max().unwrap_or(1).max(1);
        let (cross_start, cross_extent) = match orientation {
            Orientation::Vertical => (
                self.padding.left,
                self.size.width - self.padding.left - self.padding.right,
            ),
            Orientation::Horizontal => (
                self.padding.top,
                self.size.height - self.padding.top - self.padding.bottom,
            ),
        };
        let cell = cross_extent / i32::try_from(columns).unwrap_or(i32::MAX);
        let viewport_end = self.size.extent(orientation);

        let mut cursor = self.padding.leading(orientation) - scroll;
        let mut attached = Vec::new();
        for row in rows {
            let mut inset = 0;
            for &position in &row {
                let unplaced = HeadlessItem::new(Some(position), Rect::EMPTY);
                let mut insets = Sides::ZERO;
                headers.reserve_offset(&mut insets, &unplaced, self);
                inset = inset.max(insets.leading(orientation));
            }

            let row_start = cursor;
            let leading = cursor + inset;
            let trailing = leading + item_extent;
            cursor = trailing;
            if trailing <= 0 || row_start >= viewport_end {
                continue;
            }

            for (column, &position) in row.iter().enumerate() {
                let column = i32::try_from(column).unwrap_or(i32::MAX);
                let from = cross_start + column * cell;
                let bounds = match orientation {
                    Orientation::Vertical => Rect::new(from, leading, from + cell, trailing),
                    Orientation::Horizontal => Rect::new(leading, from, trailing, from + cell),
                };
                attached.push(HeadlessItem::new(Some(position), bounds));
            }
        }
        self.items = attached;
    }
}

impl ListView for HeadlessList {
    fn child_count(&self) -> usize {
        self.items.len()
    }

    fn child(&self, index: usize) -> Option<&dyn ItemView> {
        self.items.get(index).map(|item| item as &dyn ItemView)
    }

    fn size(&self) -> Size {
        self.size
    }

    fn padding(&self) -> Sides {
        self.padding
    }

    fn clip_to_padding(&self) -> bool {
        self.clip_to_padding
    }

    fn layout(&self) -> Option<LinearLayout> {
        self.layout
    }
}

// ---------------------------------------------------------------------------
// Header widgets
// ---------------------------------------------------------------------------

/// A recorded synthetic click.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Click {
    pub label: String,
    pub position: usize,
}

/// Shared click log written by [`HeadlessNode::perform_click`].
pub type ClickLog = Rc<RefCell<Vec<Click>>>;

/// A node of a headless header tree. Rectangles are header-local.
#[derive(Debug, Clone)]
pub struct HeadlessNode {
    label: String,
    rect: Rect,
    visible: bool,
    accepts: bool,
    children: Vec<HeadlessNode>,
    tag: Cell<Option<usize>>,
    clicks: ClickLog,
}

impl HeadlessNode {
    #[must_use]
    pub fn new(label: impl Into<String>, rect: Rect, clicks: ClickLog) -> Self {
        Self {
            label: label.into(),
            rect,
            visible: true,
            accepts: true,
            children: Vec::new(),
            tag: Cell::new(None),
            clicks,
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: HeadlessNode) -> Self {
        self.children.push(child);
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_accepts(mut self, accepts: bool) -> Self {
        self.accepts = accepts;
        self
    }

    /// Position the node was last tagged with by a click.
    #[must_use]
    pub fn tag(&self) -> Option<usize> {
        self.tag.get()
    }
}

impl HitNode for HeadlessNode {
    fn hit_rect(&self) -> Rect {
        self.rect
    }

    fn is_visible(&self) -> bool {
        self.visible
    }

    fn accepts_input(&self, _event: &PointerEvent) -> bool {
        self.accepts
    }

    fn child_count(&self) -> usize {
        self.children.len()
    }

    fn child(&self, index: usize) -> Option<&dyn HitNode> {
        self.children.get(index).map(|c| c as &dyn HitNode)
    }

    fn perform_click(&self, position: usize) {
        self.tag.set(Some(position));
        self.clicks.borrow_mut().push(Click {
            label: self.label.clone(),
            position,
        });
    }
}

/// A header widget whose root spans its measured size.
#[derive(Debug, Clone)]
pub struct HeadlessHeader {
    root: HeadlessNode,
    size: Size,
    margins: Sides,
    extent: i32,
    draws: Cell<usize>,
}

impl HeadlessHeader {
    /// Unmeasured header that takes `extent` along the scroll axis.
    #[must_use]
    pub fn new(root: HeadlessNode, extent: i32) -> Self {
        Self {
            root,
            size: Size::default(),
            margins: Sides::ZERO,
            extent,
            draws: Cell::new(0),
        }
    }

    /// Header already laid out at `size`, with a click log of its own.
    #[must_use]
    pub fn sized(label: &str, size: Size) -> Self {
        let root = HeadlessNode::new(label, Rect::from_size(0, 0, size), ClickLog::default());
        Self {
            size,
            extent: size.height,
            ..Self::new(root, size.height)
        }
    }

    #[must_use]
    pub fn with_margins(mut self, margins: Sides) -> Self {
        self.margins = margins;
        self
    }

    /// Number of times the header was drawn.
    #[must_use]
    pub fn draw_count(&self) -> usize {
        self.draws.get()
    }
}

impl HitNode for HeadlessHeader {
    fn hit_rect(&self) -> Rect {
        self.root.hit_rect()
    }

    fn is_visible(&self) -> bool {
        self.root.is_visible()
    }

    fn accepts_input(&self, event: &PointerEvent) -> bool {
        self.root.accepts_input(event)
    }

    fn child_count(&self) -> usize {
        self.root.child_count()
    }

    fn child(&self, index: usize) -> Option<&dyn HitNode> {
        self.root.child(index)
    }

    fn perform_click(&self, position: usize) {
        self.root.perform_click(position);
    }
}

impl HeaderView for HeadlessHeader {
    fn size(&self) -> Size {
        self.size
    }

    fn margins(&self) -> Sides {
        self.margins
    }

    fn measure(&mut self, constraint: MeasureConstraint) {
        self.size = match constraint.orientation {
            Orientation::Vertical => Size::new(constraint.cross_extent, self.extent),
            Orientation::Horizontal => Size::new(self.extent, constraint.cross_extent),
        };
        self.root.rect = Rect::from_size(0, 0, self.size);
    }

    fn draw(&self, _canvas: &mut dyn Canvas) {
        self.draws.set(self.draws.get() + 1);
    }
}

// ---------------------------------------------------------------------------
// Adapter
// ---------------------------------------------------------------------------

/// Adapter over a vector of optional group identities.
///
/// Every created header has a root node labelled `header-<id>` and, when
/// configured, a `button` child at a fixed header-local rectangle.
#[derive(Debug)]
pub struct HeadlessAdapter {
    ids: RefCell<Vec<Option<u64>>>,
    header_extent: i32,
    columns: usize,
    button: Option<Rect>,
    created: Cell<usize>,
    clicks: ClickLog,
}

impl HeadlessAdapter {
    #[must_use]
    pub fn new(ids: Vec<Option<u64>>, header_extent: i32) -> Self {
        Self {
            ids: RefCell::new(ids),
            header_extent,
            columns: 1,
            button: None,
            created: Cell::new(0),
            clicks: ClickLog::default(),
        }
    }

    /// Items fill rows of `columns`; `item_index_in_row` is `position % columns`.
    #[must_use]
    pub fn with_columns(mut self, columns: usize) -> Self {
        self.columns = columns.max(1);
        self
    }

    #[must_use]
    pub fn with_button(mut self, rect: Rect) -> Self {
        self.button = Some(rect);
        self
    }

    /// Replace the data set. The host is still responsible for invalidating.
    pub fn set_header_ids(&self, ids: Vec<Option<u64>>) {
        *self.ids.borrow_mut() = ids;
    }

    /// Number of headers created so far.
    #[must_use]
    pub fn created(&self) -> usize {
        self.created.get()
    }

    /// Clicks recorded by headers created from this adapter.
    #[must_use]
    pub fn clicks(&self) -> Vec<Click> {
        self.clicks.borrow().clone()
    }
}

impl StickyHeadersAdapter for HeadlessAdapter {
    type Header = HeadlessHeader;

    fn item_count(&self) -> usize {
        self.ids.borrow().len()
    }

    fn header_id(&self, position: usize) -> Option<HeaderId> {
        self.ids.borrow().get(position).copied().flatten().map(HeaderId)
    }

    fn item_index_in_row(&self, position: usize) -> usize {
        position % self.columns
    }

    fn create_header(&self, position: usize) -> HeadlessHeader {
        self.created.set(self.created.get() + 1);
        let label = match self.header_id(position) {
            Some(id) => format!("header-{}", id.0),
            None => "header".to_string(),
        };
        let mut root = HeadlessNode::new(label, Rect::EMPTY, Rc::clone(&self.clicks));
        if let Some(rect) = self.button {
            root = root.with_child(HeadlessNode::new("button", rect, Rc::clone(&self.clicks)));
        }
        HeadlessHeader::new(root, self.header_extent)
    }
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// A canvas operation recorded by [`RecordingCanvas`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CanvasOp {
    Save,
    Restore,
    Clip(Rect),
    Translate(i32, i32),
}

/// Canvas that records operations instead of drawing.
#[derive(Debug, Clone, Default)]
pub struct RecordingCanvas {
    ops: Vec<CanvasOp>,
    depth: usize,
}

impl RecordingCanvas {
    #[must_use]
    pub fn ops(&self) -> &[CanvasOp] {
        &self.ops
    }

    /// Current save depth; zero when every save was restored.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Every translation, in order.
    #[must_use]
    pub fn translations(&self) -> Vec<(i32, i32)> {
        self.ops
            .iter()
            .filter_map(|op| match op {
                CanvasOp::Translate(dx, dy) => Some((*dx, *dy)),
                _ => None,
            })
            .collect()
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.depth = 0;
    }
}

impl Canvas for RecordingCanvas {
    fn save(&mut self) {
        self.depth += 1;
        self.ops.push(CanvasOp::Save);
    }

    fn restore(&mut self) {
        self.depth = self.depth.saturating_sub(1);
        self.ops.push(CanvasOp::Restore);
    }

    fn clip_rect(&mut self, rect: Rect) {
        self.ops.push(CanvasOp::Clip(rect));
    }

    fn translate(&mut self, dx: i32, dy: i32) {
        self.ops.push(CanvasOp::Translate(dx, dy));
    }
}
