use std::str::FromStr;
use std::time::{Duration, Instant};

use crate::alpha_beta_searcher::{alpha_beta_search, GameBoard, PositionCache, SearchContext};
use crate::board::side::Side;
use crate::board::{GameKind, Position};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CountPositionsStrategy {
    All,
    AlphaBeta,
}

impl FromStr for CountPositionsStrategy {
    type Err = &'static str;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(CountPositionsStrategy::All),
            "alpha-beta" => Ok(CountPositionsStrategy::AlphaBeta),
            _ => Err("invalid strategy; options are: all, alpha-beta"),
        }
    }
}

/// Number of move sequences of exactly `depth` plies from `board`, with `side`
/// to move. Lines that reach a terminal position early are not counted.
pub fn count_positions<B: GameBoard>(board: &B, side: Side, depth: u8) -> usize {
    if depth == 0 {
        return 1;
    }
    if board.is_terminal() {
        return 0;
    }

    board
        .legal_moves(side)
        .iter()
        .map(|game_move| {
            let child = board.make_move(*game_move, side);
            count_positions(&child, side.opposite(), depth - 1)
        })
        .sum()
}

pub fn run_count_positions(game: GameKind, depth: u8, strategy: CountPositionsStrategy, side: Side) {
    let mut total_positions = 0;
    let mut total_duration = Duration::from_secs(0);

    for depth in 1..=depth {
        let position = Position::new_game(game);

        let starting_time = Instant::now();
        let count = match strategy {
            CountPositionsStrategy::All => count_positions(&position, side, depth),
            CountPositionsStrategy::AlphaBeta => {
                let mut search_context = SearchContext::new(depth);
                let mut cache = PositionCache::new();
                match alpha_beta_search(&mut search_context, &mut cache, &position, side) {
                    Ok(_) => search_context.searched_position_count(),
                    Err(error) => {
                        eprintln!("search failed at depth {}: {}", depth, error);
                        return;
                    }
                }
            }
        };
        let duration = starting_time.elapsed();
        let positions_per_second = count as f64 / duration.as_secs_f64();

        total_positions += count;
        total_duration += duration;

        println!(
            "depth: {}, positions: {}, positions per second: {}",
            depth, count, positions_per_second
        );
    }

    println!(
        "total positions: {}, total duration: {:?}, positions per second: {}",
        total_positions,
        total_duration,
        total_positions as f64 / total_duration.as_secs_f64()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tictactoe_counts() {
        let board = Position::new_game(GameKind::TicTacToe);
        assert_eq!(count_positions(&board, Side::Computer, 0), 1);
        assert_eq!(count_positions(&board, Side::Computer, 1), 9);
        assert_eq!(count_positions(&board, Side::Computer, 2), 72);
        assert_eq!(count_positions(&board, Side::Computer, 3), 504);
        assert_eq!(count_positions(&board, Side::Computer, 5), 15_120);
        // 1440 of those lines end with a win on the fifth ply
        assert_eq!(count_positions(&board, Side::Computer, 6), 54_720);
    }

    #[test]
    fn test_othello_counts() {
        let board = Position::new_game(GameKind::Othello8);
        assert_eq!(count_positions(&board, Side::Computer, 1), 4);
        assert_eq!(count_positions(&board, Side::Computer, 2), 12);
        assert_eq!(count_positions(&board, Side::Computer, 3), 56);
    }

    #[test]
    fn test_parse_strategy() {
        assert_eq!(
            CountPositionsStrategy::from_str("alpha-beta"),
            Ok(CountPositionsStrategy::AlphaBeta)
        );
        assert!(CountPositionsStrategy::from_str("some").is_err());
    }
}
