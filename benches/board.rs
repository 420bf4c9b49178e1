use criterion::{black_box, criterion_group, criterion_main, Criterion};

use atomic_chess::{Board, Game, PieceType, Square};

fn sq(name: &str) -> Square {
    name.parse().unwrap()
}

fn code_to_value(code: u8) -> u64 {
    match PieceType::from(code) {
        PieceType::Pawn => 100,
        PieceType::Knight => 325,
        PieceType::Bishop => 350,
        PieceType::Rook => 500,
        PieceType::Queen => 900,
        PieceType::King => 0,
        PieceType::Invalid => 0,
        PieceType::EmptySquare => 0,
    }
}

fn raw_count(board: &Board) -> u64 {
    board.iter().map(code_to_value).sum()
}

fn piece_count(board: &Board) -> u64 {
    board
        .iter_pieces()
        .map(|piece| code_to_value(piece.type_() as u8))
        .sum()
}

/** Four captures, four explosions, both kings left standing. */
fn capture_storm() -> Game {
    let mut game = Game::default();
    for (start, end) in [("a1", "a7"), ("h8", "h2"), ("c1", "c7"), ("g8", "b2")] {
        assert!(game.make_move(sq(start), sq(end)));
    }
    game
}

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("iter raw count", |b| {
        b.iter(|| raw_count(black_box(&Board::default())))
    });
    c.bench_function("iter piece count", |b| {
        b.iter(|| piece_count(black_box(&Board::default())))
    });
    c.bench_function("explosion", |b| {
        b.iter(|| {
            let mut board = Board::default();
            board.explode(black_box(sq("d4")));
            board
        })
    });
    c.bench_function("capture storm", |b| b.iter(capture_storm));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
