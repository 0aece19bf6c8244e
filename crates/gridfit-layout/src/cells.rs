#![forbid(unsafe_code)]

//! Pixel <-> grid cell mapping.
//!
//! [`CellGeometry`] captures everything needed to convert between container
//! pixels and cell coordinates: column count, row height, per-axis margin,
//! and the container width.
//!
//! ```text
//! col_width = (container_width - margin.h * (cols - 1)) / cols
//! left      = x * (col_width + margin.h)
//! width     = w * col_width + (w - 1) * margin.h
//! ```
//!
//! # Invariants
//!
//! 1. Grid -> pixel is exact (no rounding).
//! 2. Pixel -> grid rounds to the nearest cell and clamps at 0.
//!
//! # Failure Modes
//!
//! A non-positive container width yields a non-positive column width. The
//! value is propagated as-is; pixel -> grid then saturates (`as` casts of
//! NaN give 0, of +inf give `u32::MAX`).

use gridfit_core::{GridRect, Margin, PixelPoint, PixelRect};
use serde::{Deserialize, Serialize};

/// Cell grid dimensions in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CellGeometry {
    pub cols: u32,
    pub row_height: f64,
    pub margin: Margin,
    pub container_width: f64,
}

impl CellGeometry {
    /// Geometry with the same `gap` on both axes.
    pub fn new(cols: u32, row_height: f64, gap: f64, container_width: f64) -> Self {
        Self {
            cols,
            row_height,
            margin: Margin::uniform(gap),
            container_width,
        }
    }

    /// Override the per-axis margin (builder pattern).
    #[must_use]
    pub fn with_margin(mut self, margin: impl Into<Margin>) -> Self {
        self.margin = margin.into();
        self
    }

    /// Width of one column in pixels.
    #[must_use]
    pub fn col_width(&self) -> f64 {
        let cols = f64::from(self.cols);
        (self.container_width - self.margin.horizontal * (cols - 1.0)) / cols
    }

    /// Pixel stride of one cell, margin included, as `(x, y)`.
    #[must_use]
    pub fn cell_size(&self) -> PixelPoint {
        PixelPoint::new(
            self.col_width() + self.margin.horizontal,
            self.row_height + self.margin.vertical,
        )
    }

    /// Nearest cell to a pixel position.
    #[must_use]
    pub fn to_grid(&self, position: PixelPoint) -> (u32, u32) {
        let stride = self.cell_size();
        (
            round_cell(position.x / stride.x),
            round_cell(position.y / stride.y),
        )
    }

    /// Pixel box of a cell rectangle.
    #[must_use]
    pub fn to_pixels(&self, rect: GridRect) -> PixelRect {
        let col_width = self.col_width();
        let stride = self.cell_size();
        PixelRect::new(
            f64::from(rect.x) * stride.x,
            f64::from(rect.y) * stride.y,
            span_px(rect.w, col_width, self.margin.horizontal),
            span_px(rect.h, self.row_height, self.margin.vertical),
        )
    }

    /// Cell span for a pixel size: the inverse of the width/height formula,
    /// rounded to nearest, never below 1.
    #[must_use]
    pub fn to_grid_size(&self, width: f64, height: f64) -> (u32, u32) {
        let stride = self.cell_size();
        let w = round_cell((width + self.margin.horizontal) / stride.x).max(1);
        let h = round_cell((height + self.margin.vertical) / stride.y).max(1);
        (w, h)
    }

    /// Pixel height of a grid whose lowest occupied row boundary is `rows`.
    #[must_use]
    pub fn container_height(&self, rows: u32) -> f64 {
        if rows == 0 {
            return 0.0;
        }
        span_px(rows, self.row_height, self.margin.vertical)
    }

    /// Pointer travel converted to whole cells.
    ///
    /// Each axis moves one extra cell once the fractional part reaches
    /// `threshold` of a cell; anything below it is dropped.
    #[must_use]
    pub fn snap_delta(&self, delta: PixelPoint, threshold: f64) -> (i64, i64) {
        let stride = self.cell_size();
        (
            snap_cells(delta.x, stride.x, threshold),
            snap_cells(delta.y, stride.y, threshold),
        )
    }
}

fn span_px(cells: u32, cell: f64, margin: f64) -> f64 {
    let cells = f64::from(cells);
    cells * cell + (cells - 1.0).max(0.0) * margin
}

fn round_cell(value: f64) -> u32 {
    // Saturating cast: negatives and NaN land on 0.
    value.round().max(0.0) as u32
}

fn snap_cells(delta: f64, stride: f64, threshold: f64) -> i64 {
    if stride.is_nan() || stride <= 0.0 || !delta.is_finite() {
        return 0;
    }
    let raw = delta / stride;
    let whole = raw.trunc();
    let frac = raw - whole;
    let cells = if frac.abs() >= threshold {
        whole + frac.signum()
    } else {
        whole
    };
    cells as i64
}
