#![no_main]

use arbitrary::Arbitrary;
use gridfit_layout::{
    CompactType, GridConfig, GridEvent, GridInteraction, GridItem, InteractionState, Layout,
    PixelPoint, ResizeHandle, compact, correct_bounds,
};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
struct Input {
    cols: u8,
    horizontal: bool,
    items: Vec<(u8, u8, u8, u8, bool)>,
    ops: Vec<Op>,
}

#[derive(Debug, Arbitrary)]
enum Op {
    DragStart { item: u8, x: i16, y: i16 },
    DragMove { x: i16, y: i16 },
    DragStop,
    ResizeStart { item: u8, handle: u8, x: i16, y: i16 },
    ResizeMove { x: i16, y: i16 },
    ResizeStop,
    Cancel,
}

fn pointer(x: i16, y: i16) -> PixelPoint {
    PixelPoint::new(f64::from(x), f64::from(y))
}

fn item_id(layout: &Layout, index: u8) -> String {
    if layout.is_empty() {
        return "missing".to_string();
    }
    layout.items()[usize::from(index) % layout.len()].id.clone()
}

fuzz_target!(|input: Input| {
    let cols = u32::from(input.cols % 24) + 1;
    let compact_type = if input.horizontal {
        CompactType::Horizontal
    } else {
        CompactType::Vertical
    };
    let raw: Layout = input
        .items
        .iter()
        .take(32)
        .enumerate()
        .map(|(i, &(x, y, w, h, pinned))| {
            let item = GridItem::new(
                format!("i{i}"),
                u32::from(x % 32),
                u32::from(y % 64),
                u32::from(w % 8),
                u32::from(h % 8),
            );
            if pinned { item.pinned() } else { item }
        })
        .collect();
    let mut layout = compact(&correct_bounds(&raw, cols), cols, compact_type);

    let machine = GridInteraction::new(
        GridConfig {
            cols,
            row_height: 30.0,
            compact_type,
            resize_handles: ResizeHandle::ALL.to_vec(),
            ..GridConfig::default()
        },
        1190.0,
    );
    let mut state = InteractionState::default();

    for op in input.ops.iter().take(128) {
        let event = match *op {
            Op::DragStart { item, x, y } => GridEvent::DragStart {
                item_id: item_id(&layout, item),
                pointer: pointer(x, y),
            },
            Op::DragMove { x, y } => GridEvent::DragMove {
                pointer: pointer(x, y),
            },
            Op::DragStop => GridEvent::DragStop,
            Op::ResizeStart { item, handle, x, y } => GridEvent::ResizeStart {
                item_id: item_id(&layout, item),
                handle: ResizeHandle::ALL[usize::from(handle) % ResizeHandle::ALL.len()],
                pointer: pointer(x, y),
            },
            Op::ResizeMove { x, y } => GridEvent::ResizeMove {
                pointer: pointer(x, y),
            },
            Op::ResizeStop => GridEvent::ResizeStop,
            Op::Cancel => GridEvent::Cancel,
        };
        let step = machine.apply(state, &layout, &event);
        state = step.state;
        layout = step.layout;

        // Post-conditions that must always hold:
        for item in layout.iter() {
            assert!(item.w >= 1 && item.h >= 1, "empty item");
            assert!(item.rect().right() <= cols, "item past right edge");
        }
        if !state.is_active() {
            let items = layout.items();
            for (i, a) in items.iter().enumerate() {
                for b in &items[i + 1..] {
                    assert!(!a.rect().collides(&b.rect()), "overlap after gesture");
                }
            }
        }
    }
});
