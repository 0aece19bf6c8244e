#![forbid(unsafe_code)]

//! Per-breakpoint layouts.
//!
//! [`ResponsiveLayouts`] stores one [`Layout`] per breakpoint name. When a
//! breakpoint without a stored layout becomes active, a layout is derived
//! from the nearest stored one: larger breakpoints are tried first
//! (nearest first), then smaller ones. The derived layout is pulled inside
//! the new column count, compacted, and stored.
//!
//! # Invariants
//!
//! 1. A stored layout is returned as-is; derivation happens only once per
//!    breakpoint.
//! 2. Derived layouts satisfy `x + w <= cols` for the target breakpoint.
//!
//! # Failure Modes
//!
//! - Nothing stored at all: an empty layout is derived (and stored).

use std::collections::BTreeMap;

use gridfit_core::{CompactType, Layout};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::breakpoint::{BreakpointChange, BreakpointTable};
use crate::compact::compact;
use crate::placement::correct_bounds;

/// Breakpoint name -> layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub struct ResponsiveLayouts<T = ()> {
    layouts: BTreeMap<String, Layout<T>>,
}

impl<T> Default for ResponsiveLayouts<T> {
    fn default() -> Self {
        Self {
            layouts: BTreeMap::new(),
        }
    }
}

impl<T: Clone> ResponsiveLayouts<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a layout (builder pattern).
    #[must_use]
    pub fn at(mut self, breakpoint: impl Into<String>, layout: Layout<T>) -> Self {
        self.set(breakpoint, layout);
        self
    }

    pub fn set(&mut self, breakpoint: impl Into<String>, layout: Layout<T>) {
        self.layouts.insert(breakpoint.into(), layout);
    }

    pub fn get(&self, breakpoint: &str) -> Option<&Layout<T>> {
        self.layouts.get(breakpoint)
    }

    pub fn remove(&mut self, breakpoint: &str) -> Option<Layout<T>> {
        self.layouts.remove(breakpoint)
    }

    /// Breakpoints with a stored layout.
    pub fn breakpoints(&self) -> impl Iterator<Item = &str> {
        self.layouts.keys().map(String::as_str)
    }

    /// Layout for `breakpoint`, deriving and storing one if missing.
    pub fn layout_for(
        &mut self,
        breakpoint: &str,
        cols: u32,
        table: &BreakpointTable,
        compact_type: CompactType,
    ) -> Layout<T> {
        if let Some(layout) = self.layouts.get(breakpoint) {
            return layout.clone();
        }

        let source = self.nearest_source(breakpoint, table);
        let base = source
            .and_then(|name| self.layouts.get(name))
            .cloned()
            .unwrap_or_default();
        debug!(
            target: "gridfit.responsive",
            breakpoint,
            source = source.unwrap_or("<none>"),
            cols,
            "deriving layout"
        );
        let derived = compact(&correct_bounds(&base, cols), cols, compact_type);
        self.layouts.insert(breakpoint.to_string(), derived.clone());
        derived
    }

    /// [`layout_for`](Self::layout_for) driven by a tracker notification.
    pub fn on_change(
        &mut self,
        change: &BreakpointChange,
        table: &BreakpointTable,
        compact_type: CompactType,
    ) -> Layout<T> {
        self.layout_for(&change.breakpoint, change.cols, table, compact_type)
    }

    fn nearest_source<'a>(&'a self, breakpoint: &str, table: &'a BreakpointTable) -> Option<&'a str> {
        let names: Vec<&'a str> = table.names_descending().collect();
        let position = names.iter().position(|name| *name == breakpoint);
        let ordered: Vec<&'a str> = match position {
            Some(idx) => names[..idx]
                .iter()
                .rev()
                .chain(&names[idx + 1..])
                .copied()
                .collect(),
            None => names,
        };
        ordered
            .into_iter()
            .find(|name| self.layouts.contains_key(*name))
            .or_else(|| self.layouts.keys().next().map(String::as_str))
    }
}
