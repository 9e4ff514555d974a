use blokus_core::{Coord, PieceId, Placement};
use blokus_engine::perft::{perft, perft_parallel};
use blokus_engine::{count_legal_placements, legal_placements, GameConfig, Position};
use criterion::{black_box, criterion_group, criterion_main, Criterion};

/// A few opening moves into a four player game, so every seat has a frontier.
fn midgame() -> Position {
    let mut position = Position::from_config(&GameConfig::four_player()).unwrap();
    let opening = [
        Placement::new(PieceId(16), 0, Coord::new(0, 0)),
        Placement::new(PieceId(2), 0, Coord::new(0, 17)),
        Placement::new(PieceId(6), 0, Coord::new(18, 18)),
        Placement::new(PieceId(5), 0, Coord::new(17, 0)),
    ];
    for placement in &opening {
        if position.play(placement).is_err() {
            break;
        }
    }
    position
}

fn bench_legal_placements(c: &mut Criterion) {
    let opening = Position::from_config(&GameConfig::duo()).unwrap();
    let mid = midgame();

    for (name, position) in [("duo_opening", &opening), ("four_player_mid", &mid)] {
        let seat = &position.players()[0];
        c.bench_function(&format!("legal_placements_{name}"), |b| {
            b.iter(|| legal_placements(black_box(position.board()), black_box(seat)).count())
        });
        c.bench_function(&format!("count_legal_placements_{name}"), |b| {
            b.iter(|| count_legal_placements(black_box(position.board()), black_box(seat)))
        });
    }
}

fn bench_perft(c: &mut Criterion) {
    let position = Position::from_config(&GameConfig::duo()).unwrap();

    c.bench_function("perft_depth_1", |b| {
        b.iter(|| perft(black_box(&position), 1))
    });

    c.bench_function("perft_depth_2", |b| {
        b.iter(|| perft(black_box(&position), 2))
    });

    c.bench_function("perft_parallel_depth_2", |b| {
        b.iter(|| perft_parallel(black_box(&position), 2))
    });
}

criterion_group!(benches, bench_legal_placements, bench_perft);
criterion_main!(benches);
