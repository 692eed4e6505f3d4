use criterion::{Criterion, SamplingMode, criterion_group, criterion_main};
use std::time::Duration;
use tictactoe_engine::{Board, Mark, best_move, check_win};

fn bench_first_move_empty_board() {
    let board = Board::new();
    let _ = best_move(&board, Mark::X, Mark::O);
}

fn bench_full_optimal_game() {
    let mut board = Board::new();
    let mut mark = Mark::X;

    while check_win(&board).is_none() && !board.is_full() {
        let opponent = mark.opponent().unwrap();
        let Ok(index) = best_move(&board, mark, opponent) else {
            break;
        };
        board = board.with_move(index, mark).unwrap();
        mark = opponent;
    }
}

fn minimax_bench(c: &mut Criterion) {
    let mut group = c.benchmark_group("minimax");

    group
        .sampling_mode(SamplingMode::Flat)
        .sample_size(10)
        .measurement_time(Duration::from_secs(20));

    group.bench_function("first_move_empty", |b| b.iter(bench_first_move_empty_board));

    group.bench_function("full_optimal_game", |b| b.iter(bench_full_optimal_game));

    group.finish();
}

criterion_group!(benches, minimax_bench);
criterion_main!(benches);
