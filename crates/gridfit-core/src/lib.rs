#![forbid(unsafe_code)]

//! Core: grid item data model, rectangles, and collision primitives.
//!
//! # Role in gridfit
//! `gridfit-core` owns the shapes every solver speaks: [`GridRect`] cell
//! rectangles, [`GridItem`] records with their size constraints and opaque
//! caller payload, and the ordered [`Layout`] collection. The collision test
//! lives here because every solver in `gridfit-layout` is built on it.
//!
//! # How it fits in the system
//! `gridfit-layout` consumes these types and returns new [`Layout`] values
//! from every operation. Nothing in this crate holds state between calls.

pub mod geometry;
pub mod item;
pub mod query;

pub use geometry::{GridRect, Margin, PixelPoint, PixelRect, collides};
pub use item::{CompactType, GridItem, Layout};
pub use query::{all_collisions, bottom, first_collision, sort_items, sorted_indices};
