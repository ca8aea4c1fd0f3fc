//! Benchmarks for the analyzer and the chain searcher.
//!
//! # Benchmarks
//!
//! - **`analyzer`**: full analysis of fixed puzzles with the built-in pool.
//! - **`analyzer_full_applying`**: the same puzzles, applying every step a
//!   searcher finds in one pass.
//! - **`chain_searcher`**: one gathering run of the alternating inference
//!   chain searcher on a mostly empty grid, with and without grouped nodes.
//!
//! # Running
//!
//! ```sh
//! cargo bench --bench analyzer
//! ```

use std::{hint, str::FromStr as _, time::Duration};

use criterion::{BenchmarkId, Criterion, PlottingBackend, criterion_group, criterion_main};
use stepwise_analytics::{
    AnalysisContext, Analyzer, LookupCache,
    searcher::{AlternatingInferenceChain, StepSearcher as _},
};
use stepwise_core::{Cell, Digit, Grid, House};

const PUZZLES: [(&str, &str); 3] = [
    (
        "singles",
        "53..7....6..195....98....6.8...6...34..8.3..17...2...6.6....28....419..5....8..79",
    ),
    (
        "xy_wing",
        "9..24.....5.69.231.2..5..9..9.7..32...29356.7.7...29...69.2..7351..79.622.7.86..9",
    ),
    (
        "hard",
        "4.....8.5.3..........7......2.....6.....8.4......1.......6.3.7.5..2.....1.4......",
    ),
];

fn chain_grid() -> Grid {
    let mut grid = Grid::new();
    for (y, keep) in [(0, [1, 6]), (4, [1, 7])] {
        for cell in (House::Row { y }).cells() {
            if !keep.contains(&cell.column()) {
                grid.eliminate(cell, Digit::D1);
            }
        }
    }
    grid.eliminate(Cell::new(8, 8), Digit::D2);
    grid
}

fn bench_analyzer(c: &mut Criterion) {
    let analyzer = Analyzer::new();
    for (name, puzzle) in PUZZLES {
        let puzzle = Grid::from_str(puzzle).unwrap();
        c.bench_with_input(BenchmarkId::new("analyzer", name), &puzzle, |b, puzzle| {
            b.iter(|| analyzer.analyze(hint::black_box(puzzle)));
        });
    }
}

fn bench_analyzer_full_applying(c: &mut Criterion) {
    let analyzer = Analyzer::new().with_full_applying(true);
    for (name, puzzle) in PUZZLES {
        let puzzle = Grid::from_str(puzzle).unwrap();
        c.bench_with_input(
            BenchmarkId::new("analyzer_full_applying", name),
            &puzzle,
            |b, puzzle| {
                b.iter(|| analyzer.analyze(hint::black_box(puzzle)));
            },
        );
    }
}

fn bench_chain_searcher(c: &mut Criterion) {
    let grid = chain_grid();
    let cache = LookupCache::new(&grid);
    for grouped in [false, true] {
        let searcher = AlternatingInferenceChain::new().with_grouped_nodes(grouped);
        let name = if grouped { "grouped" } else { "plain" };
        c.bench_function(&format!("chain_searcher/{name}"), |b| {
            b.iter(|| {
                let mut steps = vec![];
                let mut context = AnalysisContext::with_accumulator(&grid, &cache, &mut steps);
                let _ = searcher.collect(&mut context);
                steps
            });
        });
    }
}

criterion_group!(
    name = benches;
    config =
        Criterion::default()
            .plotting_backend(PlottingBackend::Plotters)
            .measurement_time(Duration::from_secs(10));
    targets =
        bench_analyzer,
        bench_analyzer_full_applying,
        bench_chain_searcher
);
criterion_main!(benches);
