#![forbid(unsafe_code)]

//! Gravity cascade: push colliders straight down after one item moves.
//!
//! # Invariants
//!
//! 1. The moved item keeps the position it was given.
//! 2. Colliders only ever move down (`y` grows, `x`/`w`/`h` untouched).
//! 3. Static items are never displaced. A displaced item that would land on
//!    a static one keeps falling until it clears it.
//! 4. An item is queued again every time it is displaced, so the output has
//!    no overlap between non-static items when the input had none apart
//!    from the moved item. The walk terminates because `y` only grows and
//!    is bounded by the initial bottom plus the sum of all heights.
//!
//! # Failure Modes
//!
//! - Unknown id: the layout comes back unchanged.
//! - Static target: the layout comes back unchanged.
//! - The moved item itself may still overlap a static item; callers that
//!   do not compact afterwards resolve that with
//!   [`find_free_rect`](crate::placement::find_free_rect).

use std::collections::VecDeque;

use gridfit_core::{GridItem, GridRect, Layout, collides};
use rustc_hash::FxHashSet;
use tracing::trace;

use crate::placement::clamp_to_cols;

/// Put `moved` into `layout` and displace everything it transitively hits.
///
/// `moved` is matched by id. Its rectangle is kept inside `cols` before the
/// cascade starts.
pub fn move_items<T: Clone>(layout: &Layout<T>, moved: &GridItem<T>, cols: u32) -> Layout<T> {
    let Some(index) = layout.position(&moved.id) else {
        return layout.clone();
    };
    if layout.items()[index].is_static {
        return layout.clone();
    }

    let mut items = layout.items().to_vec();
    let mut placed = moved.clone();
    placed.set_rect(clamp_to_cols(placed.rect(), cols));
    items[index] = placed;

    let displaced = cascade_from(&mut items, index);
    trace!(
        target: "gridfit.cascade",
        item = %moved.id,
        displaced,
        "cascade settled"
    );
    Layout::new(items)
}

/// Breadth-first push-down seeded at `origin`. Returns the number of
/// displacements performed.
pub(crate) fn cascade_from<T>(items: &mut [GridItem<T>], origin: usize) -> usize {
    let statics: Vec<GridRect> = items
        .iter()
        .filter(|item| item.is_static)
        .map(GridItem::rect)
        .collect();
    let mut queue = VecDeque::from([origin]);
    let mut pending: FxHashSet<usize> = FxHashSet::default();
    pending.insert(origin);
    let mut displaced = 0;

    while let Some(current) = queue.pop_front() {
        pending.remove(&current);
        let source = items[current].rect();
        for other in 0..items.len() {
            if other == current || other == origin || items[other].is_static {
                continue;
            }
            if !collides(&items[other].rect(), &source) {
                continue;
            }
            let mut rect = items[other].rect();
            rect.y = source.bottom();
            while let Some(hit) = statics.iter().find(|s| collides(s, &rect)) {
                rect.y = hit.bottom();
            }
            items[other].y = rect.y;
            displaced += 1;
            trace!(
                target: "gridfit.cascade",
                by = %items[current].id,
                item = %items[other].id,
                y = items[other].y,
                "pushed down"
            );
            if pending.insert(other) {
                queue.push_back(other);
            }
        }
    }
    displaced
}

#[cfg(test)]
mod tests {
    use super::*;
    use gridfit_core::GridRect;

    fn rect_of(layout: &Layout, id: &str) -> GridRect {
        layout.get(id).map(GridItem::rect).unwrap_or_default()
    }

    #[test]
    fn collider_is_pushed_below_mover() {
        let layout = Layout::new(vec![
            GridItem::new("1", 0, 0, 4, 2),
            GridItem::new("2", 4, 0, 4, 2),
        ]);
        let moved = move_items(&layout, &GridItem::new("1", 4, 0, 4, 2), 12);
        assert_eq!(rect_of(&moved, "1"), GridRect::new(4, 0, 4, 2));
        assert_eq!(rect_of(&moved, "2"), GridRect::new(4, 2, 4, 2));
    }

    #[test]
    fn push_propagates_transitively() {
        let layout = Layout::new(vec![
            GridItem::new("a", 0, 0, 2, 1),
            GridItem::new("b", 2, 0, 2, 2),
            GridItem::new("c", 2, 2, 2, 1),
        ]);
        let moved = move_items(&layout, &GridItem::new("a", 2, 0, 2, 3), 6);
        assert_eq!(rect_of(&moved, "b"), GridRect::new(2, 3, 2, 2));
        assert_eq!(rect_of(&moved, "c"), GridRect::new(2, 5, 2, 1));
    }

    #[test]
    fn static_items_hold_their_ground() {
        let layout = Layout::new(vec![
            GridItem::new("m", 0, 0, 2, 1),
            GridItem::new("s", 2, 0, 2, 2).pinned(),
        ]);
        let moved = move_items(&layout, &GridItem::new("m", 2, 0, 2, 1), 6);
        assert_eq!(rect_of(&moved, "s"), GridRect::new(2, 0, 2, 2));
        assert_eq!(rect_of(&moved, "m"), GridRect::new(2, 0, 2, 1));
    }

    #[test]
    fn moving_a_static_item_is_refused() {
        let layout = Layout::new(vec![GridItem::new("s", 0, 0, 2, 2).pinned()]);
        let moved = move_items(&layout, &GridItem::new("s", 3, 3, 2, 2), 6);
        assert_eq!(moved, layout);
    }

    #[test]
    fn unknown_id_is_a_noop() {
        let layout = Layout::new(vec![GridItem::new("a", 0, 0, 2, 2)]);
        let moved = move_items(&layout, &GridItem::new("ghost", 0, 0, 2, 2), 6);
        assert_eq!(moved, layout);
    }

    #[test]
    fn mover_is_kept_inside_columns() {
        let layout = Layout::new(vec![GridItem::new("a", 0, 0, 2, 2)]);
        let moved = move_items(&layout, &GridItem::new("a", 5, 0, 2, 2), 6);
        assert_eq!(rect_of(&moved, "a"), GridRect::new(4, 0, 2, 2));
    }

    #[test]
    fn order_of_other_items_is_preserved() {
        let layout = Layout::new(vec![
            GridItem::new("x", 0, 0, 1, 1),
            GridItem::new("y", 1, 0, 1, 1),
            GridItem::new("z", 2, 0, 1, 1),
        ]);
        let moved = move_items(&layout, &GridItem::new("y", 0, 0, 1, 1), 3);
        let ids: Vec<_> = moved.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["x", "y", "z"]);
        assert_eq!(rect_of(&moved, "x"), GridRect::new(0, 1, 1, 1));
    }

    #[test]
    fn item_pushed_again_after_settling_keeps_propagating() {
        // "d" is pushed by "c" after it already pushed "a"; "a" must follow.
        let layout = Layout::new(vec![
            GridItem::new("a", 3, 6, 1, 3),
            GridItem::new("b", 2, 0, 2, 3),
            GridItem::new("c", 4, 6, 1, 2),
            GridItem::new("d", 2, 3, 3, 3),
            GridItem::new("e", 4, 0, 1, 3),
            GridItem::new("f", 0, 6, 3, 3),
        ]);
        let moved = move_items(&layout, &GridItem::new("f", 2, 2, 3, 3), 6);
        assert_eq!(rect_of(&moved, "f"), GridRect::new(2, 2, 3, 3));
        assert_eq!(rect_of(&moved, "b"), GridRect::new(2, 5, 2, 3));
        assert_eq!(rect_of(&moved, "e"), GridRect::new(4, 5, 1, 3));
        assert_eq!(rect_of(&moved, "c"), GridRect::new(4, 8, 1, 2));
        assert_eq!(rect_of(&moved, "d"), GridRect::new(2, 10, 3, 3));
        assert_eq!(rect_of(&moved, "a"), GridRect::new(3, 13, 1, 3));
        let items = moved.items();
        for (i, x) in items.iter().enumerate() {
            for y in &items[i + 1..] {
                assert!(!x.rect().collides(&y.rect()), "{} overlaps {}", x.id, y.id);
            }
        }
    }

    #[test]
    fn displaced_item_falls_past_statics() {
        let layout = Layout::new(vec![
            GridItem::new("m", 0, 4, 2, 1),
            GridItem::new("a", 0, 0, 2, 1),
            GridItem::new("s", 0, 2, 2, 2).pinned(),
        ]);
        let moved = move_items(&layout, &GridItem::new("m", 0, 0, 2, 2), 4);
        assert_eq!(rect_of(&moved, "s"), GridRect::new(0, 2, 2, 2));
        assert_eq!(rect_of(&moved, "a"), GridRect::new(0, 4, 2, 1));
    }
}
