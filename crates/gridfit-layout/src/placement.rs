#![forbid(unsafe_code)]

//! Free-space search and bounds correction.
//!
//! # Invariants
//!
//! 1. [`place`] returns the candidate untouched when it is already free.
//! 2. Otherwise the scan is row-major: rows from `candidate.y` downward,
//!    columns `0..=cols - w` left to right. The first free slot wins, so the
//!    result is deterministic and the scan terminates (rows below the
//!    layout's bottom are always free).
//! 3. [`correct_bounds`] leaves every item with `x + w <= cols` and its size
//!    inside its own min/max constraints.

use gridfit_core::{GridItem, GridRect, Layout, collides, first_collision};

/// Nearest free position for `candidate`, ignoring `exclude_id`.
///
/// A candidate wider than the grid is narrowed to `cols` and shifted inside
/// the right edge before the search.
pub fn place<T: Clone>(
    layout: &Layout<T>,
    candidate: &GridItem<T>,
    cols: u32,
    exclude_id: Option<&str>,
) -> GridItem<T> {
    let rect = find_free_rect(layout, clamp_to_cols(candidate.rect(), cols), cols, exclude_id);
    let mut placed = candidate.clone();
    placed.set_rect(rect);
    placed
}

/// Rectangle form of [`place`]; `rect` must already fit inside `cols`.
pub fn find_free_rect<T>(
    layout: &Layout<T>,
    rect: GridRect,
    cols: u32,
    exclude_id: Option<&str>,
) -> GridRect {
    if first_collision(layout, &rect, exclude_id).is_none() {
        return rect;
    }
    let max_x = cols.max(1).saturating_sub(rect.w);
    for y in rect.y.. {
        for x in 0..=max_x {
            let slot = rect.at(x, y);
            if first_collision(layout, &slot, exclude_id).is_none() {
                return slot;
            }
        }
    }
    unreachable!("rows below the layout bottom are always free")
}

/// Pull every item inside the grid and inside its own size constraints.
///
/// Static items that overlap an earlier static item are pushed down until
/// they are clear; non-static overlaps are left for compaction.
pub fn correct_bounds<T: Clone>(layout: &Layout<T>, cols: u32) -> Layout<T> {
    let mut statics: Vec<GridRect> = Vec::new();
    layout
        .iter()
        .map(|item| {
            let mut item = item.clone();
            item.clamp_size();
            item.set_rect(clamp_to_cols(item.rect(), cols));
            if item.is_static {
                let mut rect = item.rect();
                while let Some(hit) = statics.iter().find(|s| collides(s, &rect)) {
                    rect.y = hit.bottom();
                }
                item.set_rect(rect);
                statics.push(rect);
            }
            item
        })
        .collect()
}

/// Narrow to `cols` and shift left until the right edge fits.
pub(crate) fn clamp_to_cols(mut rect: GridRect, cols: u32) -> GridRect {
    let cols = cols.max(1);
    rect.w = rect.w.clamp(1, cols);
    rect.h = rect.h.max(1);
    if rect.right() > cols {
        rect.x = cols - rect.w;
    }
    rect
}
