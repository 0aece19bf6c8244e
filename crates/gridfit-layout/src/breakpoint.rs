#![forbid(unsafe_code)]

//! Width tiers and column counts.
//!
//! A [`BreakpointTable`] maps names to minimum container widths. The active
//! breakpoint for a width is the entry with the highest threshold not above
//! that width. Column counts come from a [`ColumnTable`], falling back to the
//! default table and finally to [`DEFAULT_COLUMNS`].
//!
//! # Usage
//!
//! ```
//! use gridfit_layout::{BreakpointTable, resolve_breakpoint};
//!
//! let table = BreakpointTable::from_iter([("lg", 1200), ("md", 996), ("sm", 768)]);
//! assert_eq!(resolve_breakpoint(900.0, &table), "sm");
//! ```
//!
//! # Invariants
//!
//! 1. Entries are ordered by threshold (descending), never by insertion
//!    order. Equal thresholds are ordered by name.
//! 2. `resolve` never fails: below every threshold it returns the smallest
//!    entry; on an empty table it returns [`DEFAULT_BREAKPOINT`].
//! 3. [`BreakpointTracker`] notifies only when the resolved name changes.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Name returned when the breakpoint table is empty.
pub const DEFAULT_BREAKPOINT: &str = "lg";

/// Column count used when no table knows the breakpoint.
pub const DEFAULT_COLUMNS: u32 = 12;

/// Default `(name, min width, columns)` tiers.
pub const DEFAULT_TIERS: [(&str, u32, u32); 5] = [
    ("lg", 1200, 12),
    ("md", 996, 10),
    ("sm", 768, 6),
    ("xs", 480, 4),
    ("xxs", 0, 2),
];

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Breakpoint name -> minimum width in pixels, kept sorted descending.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, u32>", into = "BTreeMap<String, u32>")]
pub struct BreakpointTable {
    entries: Vec<(String, u32)>,
}

impl BreakpointTable {
    /// An empty table (resolves to [`DEFAULT_BREAKPOINT`]).
    pub fn empty() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Insert or replace a threshold.
    pub fn insert(&mut self, name: impl Into<String>, min_width: u32) {
        let name = name.into();
        self.entries.retain(|(existing, _)| *existing != name);
        self.entries.push((name, min_width));
        self.entries
            .sort_by(|(an, aw), (bn, bw)| bw.cmp(aw).then_with(|| an.cmp(bn)));
    }

    pub fn threshold(&self, name: &str) -> Option<u32> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == name)
            .map(|(_, width)| *width)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Names from widest to narrowest.
    pub fn names_descending(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    /// `(name, threshold)` from widest to narrowest.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.entries.iter().map(|(name, width)| (name.as_str(), *width))
    }

    /// Active breakpoint for `width`.
    pub fn resolve(&self, width: f64) -> &str {
        self.entries
            .iter()
            .find(|(_, threshold)| f64::from(*threshold) <= width)
            .or_else(|| self.entries.last())
            .map_or(DEFAULT_BREAKPOINT, |(name, _)| name.as_str())
    }
}

impl Default for BreakpointTable {
    fn default() -> Self {
        DEFAULT_TIERS
            .iter()
            .map(|(name, width, _)| (*name, *width))
            .collect()
    }
}

impl<N: Into<String>> FromIterator<(N, u32)> for BreakpointTable {
    fn from_iter<I: IntoIterator<Item = (N, u32)>>(iter: I) -> Self {
        let mut table = Self::empty();
        for (name, width) in iter {
            table.insert(name, width);
        }
        table
    }
}

impl From<BTreeMap<String, u32>> for BreakpointTable {
    fn from(map: BTreeMap<String, u32>) -> Self {
        map.into_iter().collect()
    }
}

impl From<BreakpointTable> for BTreeMap<String, u32> {
    fn from(table: BreakpointTable) -> Self {
        table.entries.into_iter().collect()
    }
}

/// Breakpoint name -> column count.
pub type ColumnTable = BTreeMap<String, u32>;

/// The default column table.
pub fn default_columns() -> ColumnTable {
    DEFAULT_TIERS
        .iter()
        .map(|(name, _, cols)| ((*name).to_string(), *cols))
        .collect()
}

/// Active breakpoint for `width` in `table`.
pub fn resolve_breakpoint(width: f64, table: &BreakpointTable) -> &str {
    table.resolve(width)
}

/// Column count for `breakpoint`: caller table, then defaults, then
/// [`DEFAULT_COLUMNS`].
pub fn columns_for(breakpoint: &str, cols: &ColumnTable) -> u32 {
    cols.get(breakpoint)
        .copied()
        .or_else(|| {
            DEFAULT_TIERS
                .iter()
                .find(|(name, _, _)| *name == breakpoint)
                .map(|(_, _, cols)| *cols)
        })
        .unwrap_or(DEFAULT_COLUMNS)
}

// ---------------------------------------------------------------------------
// Edge-triggered tracking
// ---------------------------------------------------------------------------

/// Emitted when the active breakpoint changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakpointChange {
    /// `None` on the first resolution.
    pub previous: Option<String>,
    pub breakpoint: String,
    pub cols: u32,
    pub width: f64,
}

/// Receives breakpoint transitions.
pub trait BreakpointObserver {
    fn on_breakpoint_change(&mut self, change: &BreakpointChange);
}

impl<F: FnMut(&BreakpointChange)> BreakpointObserver for F {
    fn on_breakpoint_change(&mut self, change: &BreakpointChange) {
        self(change);
    }
}

/// Remembers the last resolved breakpoint and reports only changes.
#[derive(Debug, Clone, Default)]
pub struct BreakpointTracker {
    breakpoints: BreakpointTable,
    cols: ColumnTable,
    current: Option<String>,
}

impl BreakpointTracker {
    pub fn new(breakpoints: BreakpointTable, cols: ColumnTable) -> Self {
        Self {
            breakpoints,
            cols,
            current: None,
        }
    }

    /// Last resolved breakpoint, if any width has been seen.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    /// Column count of the current breakpoint.
    pub fn current_cols(&self) -> Option<u32> {
        self.current
            .as_deref()
            .map(|name| columns_for(name, &self.cols))
    }

    /// Resolve `width` and report the transition if the name changed.
    pub fn resolve(&mut self, width: f64) -> Option<BreakpointChange> {
        let resolved = self.breakpoints.resolve(width);
        if self.current.as_deref() == Some(resolved) {
            return None;
        }
        let change = BreakpointChange {
            previous: self.current.take(),
            breakpoint: resolved.to_string(),
            cols: columns_for(resolved, &self.cols),
            width,
        };
        debug!(
            target: "gridfit.breakpoint",
            previous = ?change.previous,
            breakpoint = %change.breakpoint,
            cols = change.cols,
            width,
            "breakpoint changed"
        );
        self.current = Some(change.breakpoint.clone());
        Some(change)
    }

    /// [`resolve`](Self::resolve), delivering any change to `observer`.
    /// Returns whether the observer was notified.
    pub fn update(&mut self, width: f64, observer: &mut impl BreakpointObserver) -> bool {
        match self.resolve(width) {
            Some(change) => {
                observer.on_breakpoint_change(&change);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn three() -> BreakpointTable {
        BreakpointTable::from_iter([("lg", 1200), ("md", 996), ("sm", 768)])
    }

    #[test]
    fn picks_highest_threshold_not_above_width() {
        let table = three();
        assert_eq!(table.resolve(900.0), "sm");
        assert_eq!(table.resolve(996.0), "md");
        assert_eq!(table.resolve(1199.9), "md");
        assert_eq!(table.resolve(5000.0), "lg");
    }

    #[test]
    fn below_all_thresholds_falls_back_to_smallest() {
        assert_eq!(three().resolve(100.0), "sm");
    }

    #[test]
    fn empty_table_uses_default_name() {
        assert_eq!(BreakpointTable::empty().resolve(800.0), DEFAULT_BREAKPOINT);
    }

    #[test]
    fn order_ignores_insertion_order() {
        let table = BreakpointTable::from_iter([("sm", 768), ("lg", 1200), ("md", 996)]);
        let names: Vec<_> = table.names_descending().collect();
        assert_eq!(names, vec!["lg", "md", "sm"]);
    }

    #[test]
    fn insert_replaces_existing_threshold() {
        let mut table = three();
        table.insert("sm", 1300);
        assert_eq!(table.len(), 3);
        assert_eq!(table.threshold("sm"), Some(1300));
        assert_eq!(table.resolve(1250.0), "lg");
        assert_eq!(table.resolve(1400.0), "sm");
    }

    #[test]
    fn default_table_matches_tiers() {
        let table = BreakpointTable::default();
        assert_eq!(table.resolve(1920.0), "lg");
        assert_eq!(table.resolve(1000.0), "md");
        assert_eq!(table.resolve(800.0), "sm");
        assert_eq!(table.resolve(500.0), "xs");
        assert_eq!(table.resolve(0.0), "xxs");
    }

    #[test]
    fn column_fallback_chain() {
        let mut cols = ColumnTable::new();
        cols.insert("md".into(), 8);
        assert_eq!(columns_for("md", &cols), 8);
        assert_eq!(columns_for("sm", &cols), 6);
        assert_eq!(columns_for("huge", &cols), DEFAULT_COLUMNS);
    }

    #[test]
    fn tracker_is_edge_triggered() {
        let mut tracker = BreakpointTracker::new(three(), default_columns());
        let mut seen = Vec::new();
        let mut observer = |change: &BreakpointChange| seen.push(change.clone());

        assert!(tracker.update(1300.0, &mut observer));
        assert!(!tracker.update(1250.0, &mut observer));
        assert!(tracker.update(1000.0, &mut observer));
        assert!(!tracker.update(1100.0, &mut observer));

        assert_eq!(seen.len(), 2);
        assert_eq!(seen[0].previous, None);
        assert_eq!(seen[0].breakpoint, "lg");
        assert_eq!(seen[0].cols, 12);
        assert_eq!(seen[1].previous.as_deref(), Some("lg"));
        assert_eq!(seen[1].breakpoint, "md");
        assert_eq!(seen[1].cols, 10);
        assert_eq!(tracker.current(), Some("md"));
        assert_eq!(tracker.current_cols(), Some(10));
    }

    #[test]
    fn table_round_trips_as_map() {
        let json = serde_json::to_string(&three()).unwrap();
        let back: BreakpointTable = serde_json::from_str(&json).unwrap();
        assert_eq!(back, three());
    }
}
