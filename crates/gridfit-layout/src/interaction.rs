#![forbid(unsafe_code)]

//! Drag and resize gesture machine.
//!
//! [`GridInteraction`] turns normalized pointer events into layout updates.
//! It owns only immutable configuration: the caller threads
//! [`InteractionState`] and the current [`Layout`] through every call and
//! stores whatever comes back.
//!
//! ```text
//! Idle -> Dragging -> Idle   (DragStart, DragMove*, DragStop | Cancel)
//! Idle -> Resizing -> Idle   (ResizeStart, ResizeMove*, ResizeStop | Cancel)
//! ```
//!
//! # Invariants
//!
//! 1. At most one gesture is active; a second start is a no-op.
//! 2. Static items are never dragged, resized, or displaced.
//! 3. Drag moves cascade and compact on every step; resize moves cascade
//!    only, and compaction runs once on resize stop.
//! 4. With overlap allowed nothing cascades or compacts.
//! 5. Every step returns a transition id one above the previous one.
//!
//! # Failure Modes
//!
//! Nothing here fails. Events that cannot apply come back as
//! [`InteractionEffect::Noop`] with the layout unchanged. If the gesture's
//! item disappears mid-gesture, the gesture is abandoned (state goes back
//! to idle) and the layout is returned unchanged.

use gridfit_core::{CompactType, GridItem, GridRect, Layout, PixelPoint, first_collision};
use serde::{Deserialize, Serialize};
use tracing::{debug, debug_span, trace};

use crate::cascade::move_items;
use crate::cells::CellGeometry;
use crate::compact::compact;
use crate::config::GridConfig;
use crate::placement::{clamp_to_cols, find_free_rect};

// ---------------------------------------------------------------------------
// Handles
// ---------------------------------------------------------------------------

/// Edge or corner a resize is dragged by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResizeHandle {
    #[serde(rename = "n")]
    North,
    #[serde(rename = "s")]
    South,
    #[serde(rename = "e")]
    East,
    #[serde(rename = "w")]
    West,
    #[serde(rename = "ne")]
    NorthEast,
    #[serde(rename = "nw")]
    NorthWest,
    #[serde(rename = "se")]
    SouthEast,
    #[serde(rename = "sw")]
    SouthWest,
}

impl ResizeHandle {
    pub const ALL: [ResizeHandle; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthEast => "ne",
            Self::NorthWest => "nw",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
        }
    }

    /// `Some(true)` for the east edge, `Some(false)` for west.
    #[must_use]
    pub const fn horizontal_edge(self) -> Option<bool> {
        match self {
            Self::West | Self::NorthWest | Self::SouthWest => Some(false),
            Self::East | Self::NorthEast | Self::SouthEast => Some(true),
            Self::North | Self::South => None,
        }
    }

    /// `Some(true)` for the south edge, `Some(false)` for north.
    #[must_use]
    pub const fn vertical_edge(self) -> Option<bool> {
        match self {
            Self::North | Self::NorthEast | Self::NorthWest => Some(false),
            Self::South | Self::SouthEast | Self::SouthWest => Some(true),
            Self::East | Self::West => None,
        }
    }
}

impl std::fmt::Display for ResizeHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// State
// ---------------------------------------------------------------------------

/// Coarse gesture phase, for transition records and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GesturePhase {
    Idle,
    Dragging,
    Resizing,
}

impl GesturePhase {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Dragging => "dragging",
            Self::Resizing => "resizing",
        }
    }
}

/// Captured at drag start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub struct DragSession<T = ()> {
    pub item_id: String,
    /// Pointer position relative to the item's top-left corner.
    pub pointer_offset: PixelPoint,
    /// Item as it was when the gesture started.
    pub origin: GridItem<T>,
    /// Whole layout as it was when the gesture started.
    pub snapshot: Layout<T>,
}

/// Captured at resize start.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub struct ResizeSession<T = ()> {
    pub item_id: String,
    pub handle: ResizeHandle,
    pub pointer_origin: PixelPoint,
    pub origin: GridItem<T>,
    pub snapshot: Layout<T>,
}

/// Active gesture, if any.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub enum Gesture<T = ()> {
    #[default]
    Idle,
    Dragging(DragSession<T>),
    Resizing(ResizeSession<T>),
}

impl<T> Gesture<T> {
    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        match self {
            Self::Idle => GesturePhase::Idle,
            Self::Dragging(_) => GesturePhase::Dragging,
            Self::Resizing(_) => GesturePhase::Resizing,
        }
    }
}

/// Caller-owned machine state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub struct InteractionState<T = ()> {
    pub gesture: Gesture<T>,
    pub transition_counter: u64,
}

impl<T> Default for InteractionState<T> {
    fn default() -> Self {
        Self {
            gesture: Gesture::Idle,
            transition_counter: 0,
        }
    }
}

impl<T> InteractionState<T> {
    #[must_use]
    pub const fn phase(&self) -> GesturePhase {
        self.gesture.phase()
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self.gesture, Gesture::Idle)
    }
}

// ---------------------------------------------------------------------------
// Events and effects
// ---------------------------------------------------------------------------

/// Normalized input. Pointer positions are container-relative pixels.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum GridEvent {
    DragStart {
        item_id: String,
        pointer: PixelPoint,
    },
    DragMove {
        pointer: PixelPoint,
    },
    DragStop,
    ResizeStart {
        item_id: String,
        handle: ResizeHandle,
        pointer: PixelPoint,
    },
    ResizeMove {
        pointer: PixelPoint,
    },
    ResizeStop,
    /// Abort the active gesture and restore the layout it started from.
    Cancel,
}

impl GridEvent {
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::DragStart { .. } => "drag_start",
            Self::DragMove { .. } => "drag_move",
            Self::DragStop => "drag_stop",
            Self::ResizeStart { .. } => "resize_start",
            Self::ResizeMove { .. } => "resize_move",
            Self::ResizeStop => "resize_stop",
            Self::Cancel => "cancel",
        }
    }
}

/// Why an event left everything as it was.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoopReason {
    IdleWithoutGesture,
    GestureAlreadyActive,
    GestureMismatch,
    ItemNotFound,
    StaticItem,
    DragDisabled,
    ResizeDisabled,
    HandleDisabled,
    CollisionPrevented,
    Unchanged,
}

/// What one step did. Item pairs are `(before, after)` snapshots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "effect", rename_all = "snake_case")]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub enum InteractionEffect<T = ()> {
    DragStarted {
        item: GridItem<T>,
    },
    DragMoved {
        previous: GridItem<T>,
        current: GridItem<T>,
    },
    DragStopped {
        original: GridItem<T>,
        item: GridItem<T>,
    },
    ResizeStarted {
        item: GridItem<T>,
        handle: ResizeHandle,
    },
    Resized {
        previous: GridItem<T>,
        current: GridItem<T>,
    },
    ResizeStopped {
        original: GridItem<T>,
        item: GridItem<T>,
    },
    Canceled {
        item_id: String,
    },
    Noop {
        reason: NoopReason,
    },
}

/// One machine step: new state, new layout, and what happened.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(bound(
    serialize = "T: Serialize",
    deserialize = "T: Deserialize<'de> + Default"
))]
pub struct InteractionStep<T = ()> {
    pub transition_id: u64,
    pub from: GesturePhase,
    pub to: GesturePhase,
    pub state: InteractionState<T>,
    pub layout: Layout<T>,
    pub effect: InteractionEffect<T>,
}

impl<T> InteractionStep<T> {
    /// `(before, after)` item snapshots for move and stop effects.
    pub fn item_pair(&self) -> Option<(&GridItem<T>, &GridItem<T>)> {
        match &self.effect {
            InteractionEffect::DragMoved { previous, current }
            | InteractionEffect::Resized { previous, current } => Some((previous, current)),
            InteractionEffect::DragStopped { original, item }
            | InteractionEffect::ResizeStopped { original, item } => Some((original, item)),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_noop(&self) -> bool {
        matches!(self.effect, InteractionEffect::Noop { .. })
    }
}

type Outcome<T> = (Gesture<T>, Layout<T>, InteractionEffect<T>);

fn noop<T: Clone>(gesture: Gesture<T>, layout: &Layout<T>, reason: NoopReason) -> Outcome<T> {
    (gesture, layout.clone(), InteractionEffect::Noop { reason })
}

// ---------------------------------------------------------------------------
// Machine
// ---------------------------------------------------------------------------

/// Gesture solver for one grid container.
#[derive(Debug, Clone, PartialEq)]
pub struct GridInteraction {
    config: GridConfig,
    geometry: CellGeometry,
}

impl GridInteraction {
    /// Machine for a container `container_width` pixels wide.
    pub fn new(config: GridConfig, container_width: f64) -> Self {
        let geometry = config.geometry(container_width);
        Self { config, geometry }
    }

    #[must_use]
    pub const fn config(&self) -> &GridConfig {
        &self.config
    }

    #[must_use]
    pub const fn geometry(&self) -> &CellGeometry {
        &self.geometry
    }

    fn cols(&self) -> u32 {
        self.config.cols.max(1)
    }

    /// Apply one event.
    pub fn apply<T: Clone>(
        &self,
        state: InteractionState<T>,
        layout: &Layout<T>,
        event: &GridEvent,
    ) -> InteractionStep<T> {
        let from = state.phase();
        let _span = debug_span!(
            "grid.interaction",
            event = event.label(),
            phase = from.label()
        )
        .entered();

        let InteractionState {
            gesture,
            transition_counter,
        } = state;

        let (gesture, layout, effect) = match (gesture, event) {
            (Gesture::Idle, GridEvent::DragStart { item_id, pointer }) => {
                self.start_drag(layout, item_id, *pointer)
            }
            (
                Gesture::Idle,
                GridEvent::ResizeStart {
                    item_id,
                    handle,
                    pointer,
                },
            ) => self.start_resize(layout, item_id, *handle, *pointer),
            (Gesture::Idle, _) => noop(Gesture::Idle, layout, NoopReason::IdleWithoutGesture),
            (gesture, GridEvent::DragStart { .. } | GridEvent::ResizeStart { .. }) => {
                noop(gesture, layout, NoopReason::GestureAlreadyActive)
            }
            (Gesture::Dragging(session), GridEvent::DragMove { pointer }) => {
                self.move_drag(session, layout, *pointer)
            }
            (Gesture::Dragging(session), GridEvent::DragStop) => self.stop_drag(session, layout),
            (Gesture::Resizing(session), GridEvent::ResizeMove { pointer }) => {
                self.move_resize(session, layout, *pointer)
            }
            (Gesture::Resizing(session), GridEvent::ResizeStop) => {
                self.stop_resize(session, layout)
            }
            (
                Gesture::Dragging(DragSession {
                    item_id, snapshot, ..
                })
                | Gesture::Resizing(ResizeSession {
                    item_id, snapshot, ..
                }),
                GridEvent::Cancel,
            ) => {
                debug!(target: "gridfit.interaction", item = %item_id, "gesture canceled");
                (Gesture::Idle, snapshot, InteractionEffect::Canceled { item_id })
            }
            (gesture, _) => noop(gesture, layout, NoopReason::GestureMismatch),
        };

        if let InteractionEffect::Noop { reason } = &effect {
            debug!(target: "gridfit.interaction", reason = ?reason, "event ignored");
        }

        let transition_id = transition_counter.saturating_add(1);
        InteractionStep {
            transition_id,
            from,
            to: gesture.phase(),
            state: InteractionState {
                gesture,
                transition_counter: transition_id,
            },
            layout,
            effect,
        }
    }

    // -- drag ---------------------------------------------------------------

    fn start_drag<T: Clone>(
        &self,
        layout: &Layout<T>,
        item_id: &str,
        pointer: PixelPoint,
    ) -> Outcome<T> {
        let Some(item) = layout.get(item_id) else {
            return noop(Gesture::Idle, layout, NoopReason::ItemNotFound);
        };
        if item.is_static {
            return noop(Gesture::Idle, layout, NoopReason::StaticItem);
        }
        if !item.can_drag(self.config.is_draggable) {
            return noop(Gesture::Idle, layout, NoopReason::DragDisabled);
        }

        let origin_px = self.geometry.to_pixels(item.rect()).origin();
        debug!(target: "gridfit.interaction", item = %item.id, "drag started");
        let session = DragSession {
            item_id: item.id.clone(),
            pointer_offset: pointer.offset_from(origin_px),
            origin: item.clone(),
            snapshot: layout.clone(),
        };
        (
            Gesture::Dragging(session),
            layout.clone(),
            InteractionEffect::DragStarted { item: item.clone() },
        )
    }

    fn move_drag<T: Clone>(
        &self,
        session: DragSession<T>,
        layout: &Layout<T>,
        pointer: PixelPoint,
    ) -> Outcome<T> {
        let Some(current) = layout.get(&session.item_id) else {
            return noop(Gesture::Idle, layout, NoopReason::ItemNotFound);
        };

        let position = pointer.offset_from(session.pointer_offset);
        let (col, row) = self.geometry.to_grid(position);
        let target = self.bound_position(current.rect(), col, row);
        if target == current.rect() {
            return noop(Gesture::Dragging(session), layout, NoopReason::Unchanged);
        }

        let mut moved = current.clone();
        moved.set_rect(target);

        let next = if self.config.allow_overlap {
            let mut next = layout.clone();
            next.replace(moved.clone());
            next
        } else {
            if self.config.prevent_collision
                && first_collision(layout, &target, Some(session.item_id.as_str())).is_some()
            {
                return noop(
                    Gesture::Dragging(session),
                    layout,
                    NoopReason::CollisionPrevented,
                );
            }
            let cols = self.cols();
            compact(&self.place_moved(layout, &moved), cols, self.config.compact_type)
        };

        if same_placement(&next, layout) {
            return noop(Gesture::Dragging(session), layout, NoopReason::Unchanged);
        }

        let after = next.get(&session.item_id).cloned().unwrap_or(moved);
        trace!(
            target: "gridfit.interaction",
            item = %session.item_id,
            x = after.x,
            y = after.y,
            "drag moved"
        );
        let effect = InteractionEffect::DragMoved {
            previous: current.clone(),
            current: after,
        };
        (Gesture::Dragging(session), next, effect)
    }

    fn stop_drag<T: Clone>(&self, session: DragSession<T>, layout: &Layout<T>) -> Outcome<T> {
        let Some(next) = self.finalize(layout, &session.item_id) else {
            return noop(Gesture::Idle, layout, NoopReason::ItemNotFound);
        };
        let item = next
            .get(&session.item_id)
            .cloned()
            .unwrap_or_else(|| session.origin.clone());
        debug!(
            target: "gridfit.interaction",
            item = %session.item_id,
            x = item.x,
            y = item.y,
            "drag stopped"
        );
        let effect = InteractionEffect::DragStopped {
            original: session.origin,
            item,
        };
        (Gesture::Idle, next, effect)
    }

    /// Keep a dragged rect inside `0 <= x <= cols - w` and the row cap.
    fn bound_position(&self, rect: GridRect, col: u32, row: u32) -> GridRect {
        let x = col.min(self.cols().saturating_sub(rect.w));
        let y = match self.config.max_rows {
            Some(max_rows) => row.min(max_rows.saturating_sub(rect.h)),
            None => row,
        };
        rect.at(x, y)
    }

    // -- resize -------------------------------------------------------------

    fn start_resize<T: Clone>(
        &self,
        layout: &Layout<T>,
        item_id: &str,
        handle: ResizeHandle,
        pointer: PixelPoint,
    ) -> Outcome<T> {
        let Some(item) = layout.get(item_id) else {
            return noop(Gesture::Idle, layout, NoopReason::ItemNotFound);
        };
        if item.is_static {
            return noop(Gesture::Idle, layout, NoopReason::StaticItem);
        }
        if !item.can_resize(self.config.is_resizable) {
            return noop(Gesture::Idle, layout, NoopReason::ResizeDisabled);
        }
        if !self.config.handle_enabled(handle) {
            return noop(Gesture::Idle, layout, NoopReason::HandleDisabled);
        }

        debug!(target: "gridfit.interaction", item = %item.id, %handle, "resize started");
        let session = ResizeSession {
            item_id: item.id.clone(),
            handle,
            pointer_origin: pointer,
            origin: item.clone(),
            snapshot: layout.clone(),
        };
        (
            Gesture::Resizing(session),
            layout.clone(),
            InteractionEffect::ResizeStarted {
                item: item.clone(),
                handle,
            },
        )
    }

    fn move_resize<T: Clone>(
        &self,
        session: ResizeSession<T>,
        layout: &Layout<T>,
        pointer: PixelPoint,
    ) -> Outcome<T> {
        let Some(current) = layout.get(&session.item_id) else {
            return noop(Gesture::Idle, layout, NoopReason::ItemNotFound);
        };

        let delta = pointer.offset_from(session.pointer_origin);
        let (dx, dy) = self
            .geometry
            .snap_delta(delta, self.config.resize_snap_threshold);
        let target = self.resized_rect(current, session.origin.rect(), session.handle, dx, dy);
        if target == current.rect() {
            return noop(Gesture::Resizing(session), layout, NoopReason::Unchanged);
        }

        let mut resized = current.clone();
        resized.set_rect(target);

        let next = if self.config.allow_overlap {
            let mut next = layout.clone();
            next.replace(resized.clone());
            next
        } else {
            if self.config.prevent_collision
                && first_collision(layout, &target, Some(session.item_id.as_str())).is_some()
            {
                return noop(
                    Gesture::Resizing(session),
                    layout,
                    NoopReason::CollisionPrevented,
                );
            }
            // No compaction mid-resize; it runs once on stop.
            self.place_moved(layout, &resized)
        };

        let after = next.get(&session.item_id).cloned().unwrap_or(resized);
        trace!(
            target: "gridfit.interaction",
            item = %session.item_id,
            w = after.w,
            h = after.h,
            "resized"
        );
        let effect = InteractionEffect::Resized {
            previous: current.clone(),
            current: after,
        };
        (Gesture::Resizing(session), next, effect)
    }

    fn stop_resize<T: Clone>(&self, session: ResizeSession<T>, layout: &Layout<T>) -> Outcome<T> {
        let Some(next) = self.finalize(layout, &session.item_id) else {
            return noop(Gesture::Idle, layout, NoopReason::ItemNotFound);
        };
        let item = next
            .get(&session.item_id)
            .cloned()
            .unwrap_or_else(|| session.origin.clone());
        debug!(
            target: "gridfit.interaction",
            item = %session.item_id,
            w = item.w,
            h = item.h,
            "resize stopped"
        );
        let effect = InteractionEffect::ResizeStopped {
            original: session.origin,
            item,
        };
        (Gesture::Idle, next, effect)
    }

    /// Apply a snapped cell delta to `origin` through `handle`, then clamp to
    /// the item's constraints, the grid width, and the row cap.
    fn resized_rect<T>(
        &self,
        item: &GridItem<T>,
        origin: GridRect,
        handle: ResizeHandle,
        dx: i64,
        dy: i64,
    ) -> GridRect {
        let cols = self.cols();
        let mut rect = origin;

        match handle.horizontal_edge() {
            Some(true) => {
                let room = cols.saturating_sub(rect.x).max(1);
                rect.w = item.clamp_w(to_span(i64::from(origin.w) + dx)).min(room);
            }
            Some(false) => {
                let right = origin.right().min(cols).max(1);
                let left = (i64::from(origin.x) + dx).clamp(0, i64::from(right) - 1);
                rect.w = item.clamp_w(to_span(i64::from(right) - left)).min(right);
                rect.x = right - rect.w;
            }
            None => {}
        }

        match handle.vertical_edge() {
            Some(true) => {
                rect.h = item.clamp_h(to_span(i64::from(origin.h) + dy));
                if let Some(max_rows) = self.config.max_rows {
                    rect.h = rect.h.min(max_rows.saturating_sub(rect.y).max(1));
                }
            }
            Some(false) => {
                let mut bottom = origin.bottom().max(1);
                if let Some(max_rows) = self.config.max_rows {
                    bottom = bottom.min(max_rows.max(1));
                }
                let top = (i64::from(origin.y) + dy).clamp(0, i64::from(bottom) - 1);
                rect.h = item.clamp_h(to_span(i64::from(bottom) - top)).min(bottom);
                rect.y = bottom - rect.h;
            }
            None => {}
        }

        rect
    }

    /// Compact on gesture end unless overlap is allowed. `None` when the
    /// gesture's item is gone.
    fn finalize<T: Clone>(&self, layout: &Layout<T>, item_id: &str) -> Option<Layout<T>> {
        if !layout.contains(item_id) {
            return None;
        }
        if self.config.allow_overlap {
            return Some(layout.clone());
        }
        if self.config.compact_type == CompactType::None {
            return layout.get(item_id).map(|item| self.place_moved(layout, item));
        }
        Some(compact(layout, self.cols(), self.config.compact_type))
    }

    /// Cascade `moved` into `layout`. Without compaction nothing else would
    /// lift the item off a static one, so it first takes the nearest free
    /// slot among the statics.
    fn place_moved<T: Clone>(&self, layout: &Layout<T>, moved: &GridItem<T>) -> Layout<T> {
        let cols = self.cols();
        if self.config.compact_type != CompactType::None {
            return move_items(layout, moved, cols);
        }
        let statics: Layout<T> = layout.statics().cloned().collect();
        let mut placed = moved.clone();
        placed.set_rect(find_free_rect(&statics, clamp_to_cols(moved.rect(), cols), cols, None));
        move_items(layout, &placed, cols)
    }
}

fn to_span(value: i64) -> u32 {
    value.clamp(1, i64::from(u32::MAX)) as u32
}

fn same_placement<T>(a: &Layout<T>, b: &Layout<T>) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x.rect() == y.rect())
}
