#![forbid(unsafe_code)]

//! Draws a header at its computed bounds.

use std::fmt;
use std::rc::Rc;

use sticky_core::Canvas;
use sticky_core::geometry::{Orientation, Rect};

use crate::dimension::DimensionCalculator;
use crate::orientation::OrientationProvider;
use crate::view::{HeaderView, ListView};

/// Positions and clips header drawing on the host canvas.
pub struct HeaderRenderer {
    orientation: Rc<dyn OrientationProvider>,
    dimensions: DimensionCalculator,
}

impl HeaderRenderer {
    pub fn new(orientation: Rc<dyn OrientationProvider>) -> Self {
        Self {
            orientation,
            dimensions: DimensionCalculator,
        }
    }

    /// Draw `header` with its top-left corner at `bounds`.
    ///
    /// When the list clips to its padding the header is clipped to the
    /// padding box as well, so a pushed header never paints over the padding.
    pub fn draw_header<H: HeaderView + ?Sized>(
        &self,
        list: &dyn ListView,
        canvas: &mut dyn Canvas,
        header: &H,
        bounds: Rect,
    ) {
        canvas.save();
        if list.clip_to_padding() {
            canvas.clip_rect(self.clip_rect_for_header(list, header));
        }
        canvas.translate(bounds.left, bounds.top);
        header.draw(canvas);
        canvas.restore();
    }

    /// Padding box of the list, minus the header's trailing cross-axis margin.
    #[must_use]
    pub fn clip_rect_for_header<H: HeaderView + ?Sized>(&self, list: &dyn ListView, header: &H) -> Rect {
        let margins = self.dimensions.header_margins(header);
        let padding = list.padding();
        let size = list.size();
        let mut clip = Rect::new(
            padding.left,
            padding.top,
            size.width - padding.right,
            size.height - padding.bottom,
        );
        match self.orientation.orientation(list) {
            Orientation::Vertical => clip.right -= margins.right,
            Orientation::Horizontal => clip.bottom -= margins.bottom,
        }
        clip
    }
}

impl fmt::Debug for HeaderRenderer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeaderRenderer").finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::headless::{CanvasOp, HeadlessHeader, HeadlessList, RecordingCanvas};
    use crate::orientation::LinearOrientationProvider;
    use sticky_core::geometry::{Sides, Size};

    #[test]
    fn draw_is_balanced_and_translated() {
        let renderer = HeaderRenderer::new(Rc::new(LinearOrientationProvider));
        let list = HeadlessList::new(100, 200).with_padding(Sides::new(2, 4, 6, 8));
        let header = HeadlessHeader::sized("A", Size::new(92, 10)).with_margins(Sides::new(0, 0, 3, 0));
        let mut canvas = RecordingCanvas::default();

        renderer.draw_header(&list, &mut canvas, &header, Rect::new(2, -3, 94, 7));

        assert_eq!(
            canvas.ops(),
            &[
                CanvasOp::Save,
                CanvasOp::Clip(Rect::new(2, 4, 91, 192)),
                CanvasOp::Translate(2, -3),
                CanvasOp::Restore,
            ]
        );
        assert_eq!(canvas.depth(), 0);
        assert_eq!(header.draw_count(), 1);
    }

    #[test]
    fn no_clip_without_clip_to_padding() {
        let renderer = HeaderRenderer::new(Rc::new(LinearOrientationProvider));
        let list = HeadlessList::new(100, 200).with_clip_to_padding(false);
        let header = HeadlessHeader::sized("B", Size::new(100, 10));
        let mut canvas = RecordingCanvas::default();

        renderer.draw_header(&list, &mut canvas, &header, Rect::new(0, 0, 100, 10));
        assert!(!canvas.ops().iter().any(|op| matches!(op, CanvasOp::Clip(_))));
    }
}
