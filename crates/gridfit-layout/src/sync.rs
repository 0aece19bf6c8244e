#![forbid(unsafe_code)]

//! Merging a host-supplied item set into the current layout.
//!
//! Items present in both sets keep the current placement and take
//! everything else (constraints, flags, payload) from the incoming item.
//! New items keep the position the host gave them. Items missing from the
//! incoming set are dropped. The merged result follows the incoming order
//! and is bounds-corrected and compacted.

use gridfit_core::{CompactType, Layout};
use tracing::debug;

use crate::compact::compact;
use crate::placement::correct_bounds;

/// Merge `incoming` into `current`.
pub fn sync_layout<T: Clone>(
    current: &Layout<T>,
    incoming: &Layout<T>,
    cols: u32,
    compact_type: CompactType,
) -> Layout<T> {
    let mut kept = 0usize;
    let merged: Layout<T> = incoming
        .iter()
        .map(|item| {
            let mut item = item.clone();
            if let Some(existing) = current.get(&item.id) {
                item.set_rect(existing.rect());
                kept += 1;
            }
            item
        })
        .collect();
    debug!(
        target: "gridfit.sync",
        kept,
        added = merged.len() - kept,
        dropped = current.len().saturating_sub(kept),
        "layout synchronized"
    );
    compact(&correct_bounds(&merged, cols), cols, compact_type)
}
