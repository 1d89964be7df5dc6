//! Scroll performance benchmarks.
//!
//! Measures scroll-driven re-binding over a 100k record dataset: every
//! scroll maps the offset to a top index and rebinds the recycled slots.
//!
//! Run with: cargo bench --bench scroll_benchmark

#![allow(missing_docs)] // criterion macros generate undocumented items

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use vlist::config::ListConfig;
use vlist::model::CopyMode;
use vlist::source::generate_records;
use vlist::state::VirtualList;
use vlist::surface::{InputEvent, ItemMetrics, MemorySurface};

const RECORDS: usize = 100_000;
const VIEWPORT_ROWS: i64 = 60;

/// Scroll position in the list.
#[derive(Debug, Clone, Copy)]
enum ScrollPosition {
    Start,
    Middle,
    End,
}

impl ScrollPosition {
    fn name(&self) -> &'static str {
        match self {
            ScrollPosition::Start => "start",
            ScrollPosition::Middle => "middle",
            ScrollPosition::End => "end",
        }
    }

    fn offset(&self) -> i64 {
        let max = RECORDS as i64 - VIEWPORT_ROWS;
        match self {
            ScrollPosition::Start => 0,
            ScrollPosition::Middle => max / 2,
            ScrollPosition::End => max - 1,
        }
    }
}

fn build_list() -> VirtualList<MemorySurface> {
    let surface = MemorySurface::new(120, VIEWPORT_ROWS, ItemMetrics::default());
    let mut list = VirtualList::new(surface, ListConfig::default());
    list.update_full_dataset(&generate_records(RECORDS), CopyMode::Shallow);
    list
}

/// One wheel notch at several depths.
fn benchmark_wheel_notch(c: &mut Criterion) {
    let mut group = c.benchmark_group("wheel_notch");
    for position in [ScrollPosition::Start, ScrollPosition::Middle, ScrollPosition::End] {
        let mut list = build_list();
        list.set_scroll_position(position.offset());
        group.bench_with_input(BenchmarkId::new("position", position.name()), &position, |b, _| {
            b.iter(|| {
                list.handle_event(black_box(&InputEvent::Wheel { notches: 1 }));
                list.handle_event(black_box(&InputEvent::Wheel { notches: -1 }));
            });
        });
    }
    group.finish();
}

/// Jumping across the whole list, a full window rebind per step.
fn benchmark_jump_scroll(c: &mut Criterion) {
    let mut list = build_list();
    let mut offset = 0i64;
    c.bench_function("jump_scroll", |b| {
        b.iter(|| {
            offset = (offset + 7_919) % (RECORDS as i64 - VIEWPORT_ROWS);
            list.set_scroll_position(black_box(offset));
        });
    });
}

/// Full dataset replacement, including reindex and the forced render.
fn benchmark_full_update(c: &mut Criterion) {
    let records = generate_records(RECORDS);
    let mut list = build_list();
    c.bench_function("full_update_100k", |b| {
        b.iter(|| list.update_full_dataset(black_box(&records), CopyMode::Shallow));
    });
}

criterion_group!(benches, benchmark_wheel_notch, benchmark_jump_scroll, benchmark_full_update);
criterion_main!(benches);
