//! Benchmarks for the grid solvers.
//!
//! Run with: cargo bench -p gridfit-layout

use criterion::{BatchSize, BenchmarkId, Criterion, criterion_group, criterion_main};
use gridfit_layout::{
    CompactType, GridConfig, GridEvent, GridInteraction, GridItem, InteractionState, Layout,
    PixelPoint, compact, move_items, place,
};
use std::hint::black_box;

/// `n` items of mixed sizes scattered over 12 columns with gaps.
fn make_layout(n: usize) -> Layout {
    (0..n)
        .map(|i| {
            let w = (i % 4) as u32 + 1;
            let h = (i % 3) as u32 + 1;
            let x = (i * 5 % 12) as u32;
            let x = x.min(12 - w);
            let y = (i * 3) as u32;
            let item = GridItem::new(format!("i{i}"), x, y, w, h);
            if i % 11 == 10 { item.pinned() } else { item }
        })
        .collect()
}

fn bench_compact(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/compact");
    for n in [10, 50, 200] {
        let layout = make_layout(n);
        for (name, compact_type) in [
            ("vertical", CompactType::Vertical),
            ("horizontal", CompactType::Horizontal),
        ] {
            group.bench_with_input(BenchmarkId::new(name, n), &layout, |b, layout| {
                b.iter(|| black_box(compact(layout, 12, compact_type)))
            });
        }
    }
    group.finish();
}

fn bench_cascade(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/cascade");
    for n in [10, 50, 200] {
        let layout = compact(&make_layout(n), 12, CompactType::Vertical);
        let moved = GridItem::new("i0", 0, 0, 12, 2);
        group.bench_with_input(BenchmarkId::new("full_width_drop", n), &layout, |b, layout| {
            b.iter(|| black_box(move_items(layout, &moved, 12)))
        });
    }
    group.finish();
}

fn bench_place(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/place");
    for n in [10, 50, 200] {
        let layout = compact(&make_layout(n), 12, CompactType::Vertical);
        let candidate = GridItem::new("new", 0, 0, 3, 2);
        group.bench_with_input(BenchmarkId::new("first_fit", n), &layout, |b, layout| {
            b.iter(|| black_box(place(layout, &candidate, 12, None)))
        });
    }
    group.finish();
}

fn bench_drag_step(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid/drag_step");
    let machine = GridInteraction::new(GridConfig::default(), 1190.0);
    for n in [10, 50, 200] {
        let layout = compact(&make_layout(n), 12, CompactType::Vertical);
        let started = machine.apply(
            InteractionState::default(),
            &layout,
            &GridEvent::DragStart {
                item_id: "i1".into(),
                pointer: PixelPoint::new(5.0, 5.0),
            },
        );
        let event = GridEvent::DragMove {
            pointer: PixelPoint::new(605.0, 5.0),
        };
        group.bench_with_input(BenchmarkId::new("move", n), &started, |b, started| {
            b.iter_batched(
                || started.state.clone(),
                |state| black_box(machine.apply(state, &started.layout, &event)),
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_compact,
    bench_cascade,
    bench_place,
    bench_drag_step,
);

criterion_main!(benches);
