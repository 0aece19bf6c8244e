#![forbid(unsafe_code)]

//! Geometric primitives in grid cells and pixels.

use serde::{Deserialize, Serialize};

/// A rectangle in grid cell units.
///
/// Origin at top-left, `x`/`y` zero-based. Edges are half-open: a rect with
/// `x = 2, w = 3` covers columns 2, 3, and 4.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct GridRect {
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
}

impl GridRect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: u32, y: u32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Right edge (exclusive).
    #[inline]
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.w)
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.h)
    }

    /// Same size, new origin.
    #[inline]
    pub const fn at(self, x: u32, y: u32) -> Self {
        Self { x, y, ..self }
    }

    /// Whether this rectangle overlaps `other`.
    #[inline]
    pub const fn collides(&self, other: &GridRect) -> bool {
        collides(self, other)
    }
}

/// Pairwise overlap test.
///
/// True unless the rectangles are disjoint on at least one axis. Rectangles
/// that only share an edge do not collide.
#[inline]
pub const fn collides(a: &GridRect, b: &GridRect) -> bool {
    !(a.right() <= b.x || b.right() <= a.x || a.bottom() <= b.y || b.bottom() <= a.y)
}

/// Space between cells, per axis, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Margin {
    pub horizontal: f64,
    pub vertical: f64,
}

impl Margin {
    /// Same spacing on both axes.
    pub const fn uniform(gap: f64) -> Self {
        Self {
            horizontal: gap,
            vertical: gap,
        }
    }

    pub const fn new(horizontal: f64, vertical: f64) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }
}

impl From<f64> for Margin {
    fn from(gap: f64) -> Self {
        Self::uniform(gap)
    }
}

impl From<[f64; 2]> for Margin {
    fn from([horizontal, vertical]: [f64; 2]) -> Self {
        Self::new(horizontal, vertical)
    }
}

/// A pointer or element position in container pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelPoint {
    pub x: f64,
    pub y: f64,
}

impl PixelPoint {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Component-wise `self - other`.
    #[must_use]
    pub fn offset_from(self, other: PixelPoint) -> PixelPoint {
        PixelPoint::new(self.x - other.x, self.y - other.y)
    }
}

/// Pixel box of a rendered item, relative to the container.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PixelRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl PixelRect {
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// Top-left corner.
    pub const fn origin(&self) -> PixelPoint {
        PixelPoint::new(self.left, self.top)
    }
}
