#![forbid(unsafe_code)]

//! Signed viewport geometry.
//!
//! Coordinates are `i32` because a header that is being pushed off the
//! leading edge is legitimately placed above (or left of) the viewport.
//!
//! # Invariants
//!
//! 1. A [`Rect`] is *well formed* iff `left < right && top < bottom`.
//! 2. [`Rect::contains`] is half-open (`left <= x < right`) and is never true
//!    for a rectangle that is not well formed.
//! 3. [`Rect::with_extent`] keeps the leading edge fixed.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Orientation
// ---------------------------------------------------------------------------

/// Scroll axis of a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Items flow left to right; headers stick to the left edge.
    Horizontal,
    /// Items flow top to bottom; headers stick to the top edge.
    #[default]
    Vertical,
}

impl Orientation {
    /// Returns the stable string representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// Linear layout parameters reported by a list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LinearLayout {
    pub orientation: Orientation,
    /// Items are laid out from the trailing edge (last item first).
    pub reverse: bool,
}

impl LinearLayout {
    /// Create a layout description.
    #[must_use]
    pub const fn new(orientation: Orientation, reverse: bool) -> Self {
        Self {
            orientation,
            reverse,
        }
    }
}

// ---------------------------------------------------------------------------
// Size / Sides
// ---------------------------------------------------------------------------

/// Measured size of a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Extent along the given scroll axis.
    #[must_use]
    pub const fn extent(self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Vertical => self.height,
            Orientation::Horizontal => self.width,
        }
    }
}

/// Per-edge distances: margins, insets, or padding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Sides {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Sides {
    pub const ZERO: Self = Self::all(0);

    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    #[must_use]
    pub const fn all(value: i32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Sum of the leading and trailing sides along the scroll axis.
    #[must_use]
    pub const fn along(self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Vertical => self.top + self.bottom,
            Orientation::Horizontal => self.left + self.right,
        }
    }

    /// The leading side along the scroll axis.
    #[must_use]
    pub const fn leading(self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Vertical => self.top,
            Orientation::Horizontal => self.left,
        }
    }

    /// The trailing side along the scroll axis.
    #[must_use]
    pub const fn trailing(self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Vertical => self.bottom,
            Orientation::Horizontal => self.right,
        }
    }
}

// ---------------------------------------------------------------------------
// Rect
// ---------------------------------------------------------------------------

/// An axis-aligned rectangle `(left, top, right, bottom)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    pub left: i32,
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
}

impl Rect {
    pub const EMPTY: Self = Self::new(0, 0, 0, 0);

    #[must_use]
    pub const fn new(left: i32, top: i32, right: i32, bottom: i32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle of `size` anchored at `(left, top)`.
    #[must_use]
    pub const fn from_size(left: i32, top: i32, size: Size) -> Self {
        Self::new(left, top, left + size.width, top + size.height)
    }

    #[inline]
    #[must_use]
    pub const fn width(&self) -> i32 {
        self.right - self.left
    }

    #[inline]
    #[must_use]
    pub const fn height(&self) -> i32 {
        self.bottom - self.top
    }

    /// Extent along the scroll axis.
    #[inline]
    #[must_use]
    pub const fn extent(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Vertical => self.height(),
            Orientation::Horizontal => self.width(),
        }
    }

    /// Leading edge along the scroll axis.
    #[inline]
    #[must_use]
    pub const fn leading(&self, orientation: Orientation) -> i32 {
        match orientation {
            Orientation::Vertical => self.top,
            Orientation::Horizontal => self.left,
        }
    }

    /// True when both extents are strictly positive.
    #[inline]
    #[must_use]
    pub const fn is_well_formed(&self) -> bool {
        self.left < self.right && self.top < self.bottom
    }

    /// Half-open containment test. Degenerate rectangles contain nothing.
    #[inline]
    #[must_use]
    pub const fn contains(&self, x: i32, y: i32) -> bool {
        self.is_well_formed()
            && x >= self.left
            && x < self.right
            && y >= self.top
            && y < self.bottom
    }

    /// Returns the rectangle translated by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self::new(
            self.left + dx,
            self.top + dy,
            self.right + dx,
            self.bottom + dy,
        )
    }

    /// Returns the rectangle with its scroll-axis extent replaced, keeping
    /// the leading edge.
    #[must_use]
    pub const fn with_extent(self, orientation: Orientation, extent: i32) -> Self {
        match orientation {
            Orientation::Vertical => Self::new(self.left, self.top, self.right, self.top + extent),
            Orientation::Horizontal => {
                Self::new(self.left, self.top, self.left + extent, self.bottom)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
