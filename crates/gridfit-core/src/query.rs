#![forbid(unsafe_code)]

//! Read-only layout queries shared by the solvers.

use crate::geometry::{GridRect, collides};
use crate::item::{CompactType, GridItem, Layout};

/// Lowest occupied row boundary: max `y + h` over all items, 0 when empty.
pub fn bottom<T>(layout: &Layout<T>) -> u32 {
    layout
        .iter()
        .map(|item| item.rect().bottom())
        .max()
        .unwrap_or(0)
}

/// First item (in layout order) overlapping `rect`, skipping `exclude_id`.
pub fn first_collision<'a, T>(
    layout: &'a Layout<T>,
    rect: &GridRect,
    exclude_id: Option<&str>,
) -> Option<&'a GridItem<T>> {
    layout
        .iter()
        .filter(|item| Some(item.id.as_str()) != exclude_id)
        .find(|item| collides(&item.rect(), rect))
}

/// Every item overlapping `rect`, skipping `exclude_id`.
pub fn all_collisions<'a, T>(
    layout: &'a Layout<T>,
    rect: &GridRect,
    exclude_id: Option<&str>,
) -> Vec<&'a GridItem<T>> {
    layout
        .iter()
        .filter(|item| Some(item.id.as_str()) != exclude_id)
        .filter(|item| collides(&item.rect(), rect))
        .collect()
}

/// Indices of `items` in packing order.
///
/// Horizontal packing orders by `(x, y)`; everything else by `(y, x)`. The
/// sort is stable, so equal positions keep layout order.
pub fn sorted_indices<T>(items: &[GridItem<T>], compact: CompactType) -> Vec<usize> {
    let mut order: Vec<usize> = (0..items.len()).collect();
    match compact {
        CompactType::Horizontal => order.sort_by_key(|&i| (items[i].x, items[i].y)),
        CompactType::Vertical | CompactType::None => {
            order.sort_by_key(|&i| (items[i].y, items[i].x));
        }
    }
    order
}

/// A copy of `layout` in packing order.
pub fn sort_items<T: Clone>(layout: &Layout<T>, compact: CompactType) -> Layout<T> {
    let items = layout.items();
    sorted_indices(items, compact)
        .into_iter()
        .map(|i| items[i].clone())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Layout {
        Layout::new(vec![
            GridItem::new("c", 2, 1, 1, 1),
            GridItem::new("a", 0, 0, 2, 2),
            GridItem::new("b", 3, 0, 1, 4),
        ])
    }

    #[test]
    fn bottom_of_empty_is_zero() {
        assert_eq!(bottom(&Layout::<()>::default()), 0);
    }

    #[test]
    fn bottom_tracks_tallest_edge() {
        assert_eq!(bottom(&sample()), 4);
    }

    #[test]
    fn collisions_respect_exclusion() {
        let layout = sample();
        let candidate = GridRect::new(0, 0, 4, 1);
        let hits: Vec<_> = all_collisions(&layout, &candidate, None)
            .into_iter()
            .map(|i| i.id.as_str())
            .collect();
        assert_eq!(hits, vec!["a", "b"]);

        let first = first_collision(&layout, &candidate, Some("a")).map(|i| i.id.as_str());
        assert_eq!(first, Some("b"));
        assert!(first_collision(&layout, &GridRect::new(9, 9, 1, 1), None).is_none());
    }

    #[test]
    fn vertical_order_is_row_major() {
        let ids: Vec<_> = sort_items(&sample(), CompactType::Vertical)
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
    }

    #[test]
    fn horizontal_order_is_column_major() {
        let ids: Vec<_> = sort_items(&sample(), CompactType::Horizontal)
            .into_iter()
            .map(|i| i.id)
            .collect();
        assert_eq!(ids, vec!["a", "c", "b"]);
    }
}
