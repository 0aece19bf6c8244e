#![forbid(unsafe_code)]

//! Grid layout solvers.
//!
//! # Role in gridfit
//! `gridfit-layout` keeps a set of rectangular items consistent on an
//! integer grid while a host drags, resizes, or changes viewport width.
//! Every solver is a pure function of its inputs: it takes a [`Layout`] and
//! returns a new one, holding no state between calls.
//!
//! # Primary responsibilities
//! - **cells**: pixel <-> cell coordinate mapping.
//! - **placement**: nearest free position and bounds correction.
//! - **cascade**: push-down displacement after one item moves.
//! - **compact**: gap removal toward the origin.
//! - **breakpoint** / **responsive**: width tiers, column counts, and
//!   per-tier layouts.
//! - **sync**: merging a host-supplied item set into the current layout.
//! - **interaction**: the drag/resize gesture machine that ties the above
//!   together on every pointer event.
//! - **config**: tunables, loadable from TOML or JSON.

pub mod breakpoint;
pub mod cascade;
pub mod cells;
pub mod compact;
pub mod config;
pub mod interaction;
pub mod placement;
pub mod responsive;
pub mod sync;

pub use gridfit_core::{
    CompactType, GridItem, GridRect, Layout, Margin, PixelPoint, PixelRect, bottom, collides,
};

pub use breakpoint::{
    BreakpointChange, BreakpointObserver, BreakpointTable, BreakpointTracker, ColumnTable,
    DEFAULT_BREAKPOINT, DEFAULT_COLUMNS, DEFAULT_TIERS, columns_for, default_columns,
    resolve_breakpoint,
};
pub use cascade::move_items;
pub use cells::CellGeometry;
pub use compact::compact;
pub use config::{ConfigError, GridConfig, ResponsiveConfig};
pub use interaction::{
    DragSession, Gesture, GesturePhase, GridEvent, GridInteraction, InteractionEffect,
    InteractionState, InteractionStep, NoopReason, ResizeHandle, ResizeSession,
};
pub use placement::{correct_bounds, place};
pub use responsive::ResponsiveLayouts;
pub use sync::sync_layout;
