#![forbid(unsafe_code)]

//! Greedy first-fit compaction toward the origin.
//!
//! Static items are fixed and seed the placed set. The rest are visited in
//! packing order (vertical: `(y, x)`, horizontal: `(x, y)`) and each lands on
//! the first free slot along the compaction axis:
//!
//! - **Vertical**: same `x`, smallest `y >= 0` clear of everything placed.
//! - **Horizontal**: same `y`, smallest `x` in `0..=cols - w` clear of
//!   everything placed; when the row has no room the scan continues on the
//!   next row.
//!
//! # Invariants
//!
//! 1. No two non-static items overlap in the output, and no non-static item
//!    overlaps a static one.
//! 2. Static items are returned unchanged.
//! 3. Compaction is idempotent.
//! 4. Output order equals input order; only positions change.

use gridfit_core::{CompactType, GridItem, GridRect, Layout, collides, sorted_indices};
use tracing::trace;

/// Repack `layout` toward the origin along `compact`.
pub fn compact<T: Clone>(layout: &Layout<T>, cols: u32, compact: CompactType) -> Layout<T> {
    if compact == CompactType::None {
        return layout.clone();
    }

    let mut items = layout.items().to_vec();
    let mut placed: Vec<GridRect> = items
        .iter()
        .filter(|item| item.is_static)
        .map(GridItem::rect)
        .collect();

    for index in sorted_indices(&items, compact) {
        if items[index].is_static {
            continue;
        }
        let rect = match compact {
            CompactType::Horizontal => settle_horizontal(items[index].rect(), &placed, cols),
            _ => settle_vertical(items[index].rect(), &placed),
        };
        if rect != items[index].rect() {
            trace!(
                target: "gridfit.compact",
                item = %items[index].id,
                x = rect.x,
                y = rect.y,
                "compacted"
            );
        }
        items[index].set_rect(rect);
        placed.push(rect);
    }
    Layout::new(items)
}

fn first_hit<'a>(placed: &'a [GridRect], rect: &GridRect) -> Option<&'a GridRect> {
    placed.iter().find(|other| collides(other, rect))
}

fn settle_vertical(rect: GridRect, placed: &[GridRect]) -> GridRect {
    let mut candidate = rect.at(rect.x, 0);
    // Every row between a candidate rect and the bottom of what it hits also hits.
    while let Some(hit) = first_hit(placed, &candidate) {
        candidate.y = hit.bottom();
    }
    candidate
}

fn settle_horizontal(rect: GridRect, placed: &[GridRect], cols: u32) -> GridRect {
    let max_x = cols.max(1).saturating_sub(rect.w);
    let mut candidate = rect.at(0, rect.y);
    loop {
        match first_hit(placed, &candidate) {
            None => return candidate,
            Some(hit) if hit.right() <= max_x => candidate.x = hit.right(),
            Some(_) => candidate = candidate.at(0, candidate.y + 1),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rect_of<T>(layout: &Layout<T>, id: &str) -> GridRect {
        layout.get(id).map(GridItem::rect).unwrap_or_default()
    }

    #[test]
    fn none_leaves_layout_alone() {
        let layout = Layout::new(vec![GridItem::new("a", 3, 7, 1, 1)]);
        assert_eq!(compact(&layout, 12, CompactType::None), layout);
    }

    #[test]
    fn vertical_removes_gaps() {
        let layout = Layout::new(vec![
            GridItem::new("a", 0, 4, 2, 2),
            GridItem::new("b", 0, 9, 2, 1),
            GridItem::new("c", 5, 3, 1, 1),
        ]);
        let out = compact(&layout, 12, CompactType::Vertical);
        assert_eq!(rect_of(&out, "a"), GridRect::new(0, 0, 2, 2));
        assert_eq!(rect_of(&out, "b"), GridRect::new(0, 2, 2, 1));
        assert_eq!(rect_of(&out, "c"), GridRect::new(5, 0, 1, 1));
    }

    #[test]
    fn vertical_flows_around_statics() {
        let layout = Layout::new(vec![
            GridItem::new("s", 0, 0, 4, 1).pinned(),
            GridItem::new("a", 1, 5, 2, 1),
        ]);
        let out = compact(&layout, 12, CompactType::Vertical);
        assert_eq!(rect_of(&out, "s"), GridRect::new(0, 0, 4, 1));
        assert_eq!(rect_of(&out, "a"), GridRect::new(1, 1, 2, 1));
    }

    #[test]
    fn vertical_fills_gap_above_static() {
        let layout = Layout::new(vec![
            GridItem::new("s", 0, 3, 4, 1).pinned(),
            GridItem::new("a", 0, 6, 4, 2),
            GridItem::new("b", 0, 8, 4, 4),
        ]);
        let out = compact(&layout, 4, CompactType::Vertical);
        assert_eq!(rect_of(&out, "a"), GridRect::new(0, 0, 4, 2));
        assert_eq!(rect_of(&out, "b"), GridRect::new(0, 4, 4, 4));
    }

    #[test]
    fn horizontal_packs_left() {
        let layout = Layout::new(vec![
            GridItem::new("a", 3, 0, 2, 1),
            GridItem::new("b", 8, 0, 2, 1),
            GridItem::new("c", 6, 1, 1, 1),
        ]);
        let out = compact(&layout, 12, CompactType::Horizontal);
        assert_eq!(rect_of(&out, "a"), GridRect::new(0, 0, 2, 1));
        assert_eq!(rect_of(&out, "b"), GridRect::new(2, 0, 2, 1));
        assert_eq!(rect_of(&out, "c"), GridRect::new(0, 1, 1, 1));
    }

    #[test]
    fn horizontal_wraps_when_row_is_full() {
        let layout = Layout::new(vec![
            GridItem::new("a", 0, 0, 3, 1),
            GridItem::new("b", 3, 0, 2, 1),
        ]);
        let out = compact(&layout, 4, CompactType::Horizontal);
        assert_eq!(rect_of(&out, "a"), GridRect::new(0, 0, 3, 1));
        assert_eq!(rect_of(&out, "b"), GridRect::new(0, 1, 2, 1));
    }

    #[test]
    fn idempotent_on_compacted_layout() {
        let layout = Layout::new(vec![
            GridItem::new("a", 2, 5, 3, 2),
            GridItem::new("b", 0, 1, 4, 1),
            GridItem::new("s", 6, 2, 2, 2).pinned(),
            GridItem::new("c", 6, 9, 3, 3),
        ]);
        for dir in [CompactType::Vertical, CompactType::Horizontal] {
            let once = compact(&layout, 12, dir);
            assert_eq!(compact(&once, 12, dir), once, "{dir}");
        }
    }

    #[test]
    fn output_keeps_input_order() {
        let layout = Layout::new(vec![
            GridItem::new("late", 0, 8, 1, 1),
            GridItem::new("early", 0, 0, 1, 1),
        ]);
        let out = compact(&layout, 12, CompactType::Vertical);
        let ids: Vec<_> = out.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["late", "early"]);
        assert_eq!(rect_of(&out, "late"), GridRect::new(0, 1, 1, 1));
    }
}
