#![forbid(unsafe_code)]

//! Grid items and ordered layouts.
//!
//! [`GridItem`] is a closed record: the engine reads only the placement and
//! constraint fields. Anything the host needs for rendering rides along in
//! the generic `data` payload and is never interpreted.
//!
//! # Invariants
//!
//! 1. `w >= 1` and `h >= 1` after [`GridItem::clamp_size`].
//! 2. With `min_w`/`max_w` set, `min_w <= w <= max_w` after clamping
//!    (same for height). A minimum above the maximum wins.
//! 3. [`Layout`] preserves insertion order; ids are expected to be unique
//!    and lookups return the first match.

use serde::{Deserialize, Serialize};

use crate::geometry::GridRect;

/// Direction in which a layout is packed toward the origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompactType {
    /// Pack upward (decreasing `y`).
    #[default]
    Vertical,
    /// Pack leftward (decreasing `x`).
    Horizontal,
    /// Leave positions as they are.
    None,
}

impl CompactType {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
            Self::None => "none",
        }
    }
}

impl std::fmt::Display for CompactType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One positioned item on the grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct GridItem<T = ()> {
    /// Stable, unique identifier.
    pub id: String,
    pub x: u32,
    pub y: u32,
    pub w: u32,
    pub h: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_h: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_w: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_h: Option<u32>,
    /// Immovable, unresizable, never displaced.
    #[serde(default, rename = "static")]
    pub is_static: bool,
    /// Per-item override of the container drag setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_draggable: Option<bool>,
    /// Per-item override of the container resize setting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_resizable: Option<bool>,
    /// Opaque host payload.
    #[serde(default)]
    pub data: T,
}

impl GridItem<()> {
    /// Create an item without payload.
    pub fn new(id: impl Into<String>, x: u32, y: u32, w: u32, h: u32) -> Self {
        Self::with_data(id, GridRect::new(x, y, w, h), ())
    }
}

impl<T> GridItem<T> {
    /// Create an item carrying a host payload.
    pub fn with_data(id: impl Into<String>, rect: GridRect, data: T) -> Self {
        Self {
            id: id.into(),
            x: rect.x,
            y: rect.y,
            w: rect.w,
            h: rect.h,
            min_w: None,
            min_h: None,
            max_w: None,
            max_h: None,
            is_static: false,
            is_draggable: None,
            is_resizable: None,
            data,
        }
    }

    #[must_use]
    pub fn with_min_w(mut self, min_w: u32) -> Self {
        self.min_w = Some(min_w);
        self
    }

    #[must_use]
    pub fn with_max_w(mut self, max_w: u32) -> Self {
        self.max_w = Some(max_w);
        self
    }

    #[must_use]
    pub fn with_min_h(mut self, min_h: u32) -> Self {
        self.min_h = Some(min_h);
        self
    }

    #[must_use]
    pub fn with_max_h(mut self, max_h: u32) -> Self {
        self.max_h = Some(max_h);
        self
    }

    /// Mark the item static.
    #[must_use]
    pub fn pinned(mut self) -> Self {
        self.is_static = true;
        self
    }

    #[must_use]
    pub fn draggable(mut self, draggable: bool) -> Self {
        self.is_draggable = Some(draggable);
        self
    }

    #[must_use]
    pub fn resizable(mut self, resizable: bool) -> Self {
        self.is_resizable = Some(resizable);
        self
    }

    /// Placement as a cell rectangle.
    #[inline]
    pub fn rect(&self) -> GridRect {
        GridRect::new(self.x, self.y, self.w, self.h)
    }

    /// Overwrite placement.
    #[inline]
    pub fn set_rect(&mut self, rect: GridRect) {
        self.x = rect.x;
        self.y = rect.y;
        self.w = rect.w;
        self.h = rect.h;
    }

    /// Width clamped to `[max(min_w, 1), max_w]`; the minimum wins a conflict.
    #[must_use]
    pub fn clamp_w(&self, w: u32) -> u32 {
        clamp_span(w, self.min_w, self.max_w)
    }

    /// Height clamped to `[max(min_h, 1), max_h]`; the minimum wins a conflict.
    #[must_use]
    pub fn clamp_h(&self, h: u32) -> u32 {
        clamp_span(h, self.min_h, self.max_h)
    }

    /// Apply the size constraints to the current size in place.
    pub fn clamp_size(&mut self) {
        self.w = self.clamp_w(self.w);
        self.h = self.clamp_h(self.h);
    }

    /// Effective drag permission given the container default.
    #[must_use]
    pub fn can_drag(&self, container_default: bool) -> bool {
        !self.is_static && self.is_draggable.unwrap_or(container_default)
    }

    /// Effective resize permission given the container default.
    #[must_use]
    pub fn can_resize(&self, container_default: bool) -> bool {
        !self.is_static && self.is_resizable.unwrap_or(container_default)
    }
}

fn clamp_span(value: u32, min: Option<u32>, max: Option<u32>) -> u32 {
    let mut value = value;
    if let Some(max) = max {
        value = value.min(max);
    }
    if let Some(min) = min {
        value = value.max(min);
    }
    value.max(1)
}

/// Ordered collection of [`GridItem`]s keyed by id.
///
/// Order is insertion-stable and carries no placement meaning.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(deserialize = "T: Deserialize<'de> + Default"))]
pub struct Layout<T = ()> {
    items: Vec<GridItem<T>>,
}

impl<T> Default for Layout<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T> Layout<T> {
    pub fn new(items: Vec<GridItem<T>>) -> Self {
        Self { items }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GridItem<T>> {
        self.items.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, GridItem<T>> {
        self.items.iter_mut()
    }

    pub fn items(&self) -> &[GridItem<T>] {
        &self.items
    }

    pub fn into_items(self) -> Vec<GridItem<T>> {
        self.items
    }

    pub fn push(&mut self, item: GridItem<T>) {
        self.items.push(item);
    }

    /// Index of the item with `id`.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.id == id)
    }

    pub fn get(&self, id: &str) -> Option<&GridItem<T>> {
        self.items.iter().find(|item| item.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut GridItem<T>> {
        self.items.iter_mut().find(|item| item.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    /// Replace the item sharing `item.id`. Returns `false` (and drops
    /// `item`) when no such id exists.
    pub fn replace(&mut self, item: GridItem<T>) -> bool {
        match self.position(&item.id) {
            Some(idx) => {
                self.items[idx] = item;
                true
            }
            None => false,
        }
    }

    /// Static items in layout order.
    pub fn statics(&self) -> impl Iterator<Item = &GridItem<T>> {
        self.items.iter().filter(|item| item.is_static)
    }

    /// Placement rectangles in layout order.
    pub fn rects(&self) -> Vec<GridRect> {
        self.items.iter().map(GridItem::rect).collect()
    }
}

impl<T> FromIterator<GridItem<T>> for Layout<T> {
    fn from_iter<I: IntoIterator<Item = GridItem<T>>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl<T> From<Vec<GridItem<T>>> for Layout<T> {
    fn from(items: Vec<GridItem<T>>) -> Self {
        Self::new(items)
    }
}

impl<T> IntoIterator for Layout<T> {
    type Item = GridItem<T>;
    type IntoIter = std::vec::IntoIter<GridItem<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a, T> IntoIterator for &'a Layout<T> {
    type Item = &'a GridItem<T>;
    type IntoIter = std::slice::Iter<'a, GridItem<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}
