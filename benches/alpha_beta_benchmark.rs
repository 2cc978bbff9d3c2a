use ludus::alpha_beta_searcher::{alpha_beta_search, GameBoard, PositionCache, SearchContext};
use ludus::board::othello::SmallOthello;
use ludus::board::side::Side;
use ludus::chess::ChessBoard;
use ludus::game::config::EngineConfig;
use ludus::game::engine::Engine;
use ludus::prelude::{GameKind, Position};

use criterion::{criterion_group, criterion_main, Criterion};

fn criterion_benchmark(c: &mut Criterion) {
    c.bench_function("alpha beta chess opening depth 4", |b| {
        b.iter(|| search(&ChessBoard::starting_position(), Side::Computer, 4))
    });
    c.bench_function("alpha beta othello 5x5 depth 7", |b| {
        b.iter(|| search(&SmallOthello::starting_position(), Side::Computer, 7))
    });
    c.bench_function("engine tictactoe self-play", |b| b.iter(play_tictactoe));
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);

fn search<B: GameBoard>(board: &B, side: Side, depth: u8) -> i32 {
    let mut context = SearchContext::new(depth);
    let mut cache = PositionCache::new();
    alpha_beta_search(&mut context, &mut cache, board, side)
        .map(|result| result.score)
        .unwrap_or_default()
}

fn play_tictactoe() {
    let config = EngineConfig::for_game(GameKind::TicTacToe);
    let mut engine = Engine::with_position(
        config,
        Position::new_game(GameKind::TicTacToe),
        Side::Computer,
    );
    while !engine.is_game_over() {
        engine.make_best_move().unwrap();
    }
}
