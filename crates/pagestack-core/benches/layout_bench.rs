//! Benchmarks for layout passes and full navigation cycles.
//!
//! Run with: cargo bench -p pagestack-core --bench layout_bench

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use pagestack_core::{
    Deck, DeckConfig, ManualNotifier, Markers, PageStack, PanelStyle, SignalOrigin, Surface,
};
use std::hint::black_box;

/// Surface that discards everything it receives.
struct NullSurface;

impl Surface for NullSurface {
    fn set_panel_style(&mut self, index: usize, style: &PanelStyle) {
        black_box((index, style));
    }

    fn set_panel_inactive(&mut self, index: usize, inactive: bool) {
        black_box((index, inactive));
    }

    fn set_chrome(&mut self, markers: Markers) {
        black_box(markers);
    }
}

fn make_stack(panels: usize) -> PageStack<ManualNotifier> {
    let deck = Deck::new((0..panels).map(|i| format!("page-{i}"))).expect("valid deck");
    PageStack::new(deck, DeckConfig::default(), ManualNotifier::new())
}

fn bench_initialize_layout(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/initialize");

    for panels in [5usize, 50, 500] {
        group.throughput(Throughput::Elements(panels as u64));
        let mut stack = make_stack(panels);
        group.bench_with_input(BenchmarkId::from_parameter(panels), &(), |b, _| {
            b.iter(|| {
                stack.initialize_layout();
                black_box(stack.current_index())
            })
        });
    }

    group.finish();
}

fn bench_navigation_cycle(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout/menu_pick_present");

    for panels in [5usize, 50, 500] {
        let mut stack = make_stack(panels);
        let ids: Vec<String> = (0..panels).map(|i| format!("page-{i}")).collect();
        let mut surface = NullSurface;
        let mut next = 0usize;
        group.bench_with_input(BenchmarkId::from_parameter(panels), &(), |b, _| {
            b.iter(|| {
                next = (next + 1) % panels;
                stack.toggle_menu();
                stack.open_page(Some(ids[next].as_str()));
                stack.signal_transition_end(next, SignalOrigin::Target);
                stack.present(&mut surface);
            })
        });
    }

    group.finish();
}

criterion_group!(benches, bench_initialize_layout, bench_navigation_cycle);

criterion_main!(benches);
