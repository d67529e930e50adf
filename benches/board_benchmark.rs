//! Benchmarks for the move path and the golden-move query.
//!
//! Both are dominated by flood fills over the grid, so they scale with the
//! size of the areas touching the played cell.

#![allow(missing_docs)]
#![allow(clippy::unwrap_used)]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use gamma::Board;

/// Fill the whole board in a deterministic order that keeps merging areas.
fn fill_board(size: u32, players: u32) -> Board {
    let mut board = Board::with_params(size, size, players, size * size).unwrap();
    for y in 0..size {
        for x in 0..size {
            let player = (x / 2 + y) % players + 1;
            board.try_move(player, x, y).unwrap();
        }
    }
    board
}

fn bench_fill(c: &mut Criterion) {
    let mut group = c.benchmark_group("fill_board");
    for size in [16u32, 64, 128] {
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter(|| black_box(fill_board(black_box(size), 4)));
        });
    }
    group.finish();
}

fn bench_golden_possible(c: &mut Criterion) {
    let mut group = c.benchmark_group("golden_possible");
    for size in [16u32, 64] {
        let board = fill_board(size, 4);
        group.bench_with_input(BenchmarkId::from_parameter(size), &board, |b, board| {
            let mut board = board.clone();
            b.iter(|| black_box(board.golden_possible(black_box(1)).unwrap()));
        });
    }
    group.finish();
}

fn bench_snake_merge(c: &mut Criterion) {
    // One long area: every move floods the whole snake.
    c.bench_function("snake_merge_64", |b| {
        b.iter(|| {
            let mut board = Board::with_params(64, 64, 2, 64 * 64).unwrap();
            for y in (0..64).step_by(2) {
                for x in 0..64 {
                    board.try_move(1, x, y).unwrap();
                }
                let link = if y % 4 == 0 { 63 } else { 0 };
                if y + 1 < 64 {
                    board.try_move(1, link, y + 1).unwrap();
                }
            }
            black_box(board)
        });
    });
}

criterion_group!(benches, bench_fill, bench_golden_possible, bench_snake_merge);
criterion_main!(benches);
