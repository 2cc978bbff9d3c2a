//! Domain-agnostic tests for the alpha-beta search algorithm.
//!
//! Test coverage:
//! - Basic search functionality on Nim (winning moves, losing positions)
//! - Error handling (zero depth, no moves)
//! - Repetition draws (shuffle cycles) and finished games with only passes left
//! - Alpha-beta pruning returns the same move and score as plain minimax
//! - Position cache reuse and depth monotonicity across searches

use super::*;
use crate::board::game_move::{Move, MoveList};
use crate::board::lines::{FourInARow, TicTacToe, COMPUTER_TILE, HUMAN_TILE};
use crate::board::othello::{BigOthello, SmallOthello};
use crate::board::side::Side;
use crate::chess::ChessBoard;
use crate::chess_position;

use super::search::{cached_score, score_from_cache, score_to_cache};

/// Nim: players take 1-3 objects, last to take wins.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct NimBoard {
    pile: u8,
    last_taker: Option<Side>,
}

impl NimBoard {
    fn new(pile: u8) -> Self {
        Self {
            pile,
            last_taker: None,
        }
    }
}

impl GameBoard for NimBoard {
    fn is_terminal(&self) -> bool {
        self.pile == 0
    }

    fn evaluate(&self) -> i32 {
        match (self.pile, self.last_taker) {
            (0, Some(winner)) => winner.sign() * 1000,
            _ => 0,
        }
    }

    fn legal_moves(&self, _side: Side) -> MoveList {
        (1..=self.pile.min(3))
            .map(|take| Move::place(take as usize))
            .collect()
    }

    fn make_move(&self, game_move: Move, side: Side) -> Self {
        Self {
            pile: self.pile - game_move.cell() as u8,
            last_taker: Some(side),
        }
    }
}

/// Each side has exactly one move, toggling its own flag, so four plies bring
/// the game back to where it started.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
struct ShuffleBoard {
    computer_flag: bool,
    human_flag: bool,
}

impl GameBoard for ShuffleBoard {
    fn is_terminal(&self) -> bool {
        false
    }

    fn evaluate(&self) -> i32 {
        50
    }

    fn legal_moves(&self, _side: Side) -> MoveList {
        let mut moves = MoveList::new();
        moves.push(Move::place(0));
        moves
    }

    fn make_move(&self, _game_move: Move, side: Side) -> Self {
        match side {
            Side::Computer => Self {
                computer_flag: !self.computer_flag,
                ..*self
            },
            Side::Human => Self {
                human_flag: !self.human_flag,
                ..*self
            },
        }
    }
}

fn search<B: GameBoard>(board: &B, side: Side, depth: u8) -> Result<SearchResult, SearchError> {
    let mut context = SearchContext::new(depth);
    let mut cache = PositionCache::new();
    alpha_beta_search(&mut context, &mut cache, board, side)
}

/// Unpruned, uncached minimax with the same repetition, terminal and mate rules.
fn reference_minimax<B: GameBoard>(board: &B, side: Side, depth: u8, history: &mut Vec<B>) -> i32 {
    if board.is_exhausted() {
        return board.evaluate();
    }
    if history.iter().rev().skip(1).step_by(2).any(|ancestor| ancestor == board) {
        return DRAW_SCORE;
    }
    if depth == 0 || board.is_terminal() {
        return board.evaluate();
    }
    let moves = board.legal_moves(side);
    if moves.is_empty() {
        if !board.is_in_check(side) {
            return DRAW_SCORE;
        }
        return if side.maximize_score() {
            -(MATE_SCORE + depth as i32)
        } else {
            MATE_SCORE + depth as i32
        };
    }

    history.push(board.clone());
    let mut scores = Vec::with_capacity(moves.len());
    for mv in moves.iter() {
        let child = board.make_move(*mv, side);
        scores.push(reference_minimax(&child, side.opposite(), depth - 1, history));
    }
    history.pop();

    if side.maximize_score() {
        scores.into_iter().max().unwrap()
    } else {
        scores.into_iter().min().unwrap()
    }
}

fn reference_best<B: GameBoard>(board: &B, side: Side, depth: u8) -> (Move, i32) {
    let mut history = vec![board.clone()];
    let mut best: Option<(Move, i32)> = None;
    for mv in board.legal_moves(side) {
        let child = board.make_move(mv, side);
        let score = reference_minimax(&child, side.opposite(), depth - 1, &mut history);
        let better = match best {
            None => true,
            Some((_, best_score)) if side.maximize_score() => score > best_score,
            Some((_, best_score)) => score < best_score,
        };
        if better {
            best = Some((mv, score));
        }
    }
    best.unwrap()
}

fn assert_matches_minimax<B: GameBoard>(board: &B, side: Side, depth: u8) {
    let result = search(board, side, depth).unwrap();
    let (expected_move, expected_score) = reference_best(board, side, depth);
    assert_eq!(result.score, expected_score, "score mismatch for {:?}", board);
    assert_eq!(result.best_move, expected_move, "move mismatch for {:?}", board);
}

#[test]
fn test_nim_finds_winning_moves() {
    for (pile, take) in [(5, 1), (6, 2), (7, 3)] {
        let result = search(&NimBoard::new(pile), Side::Computer, 10).unwrap();
        assert_eq!(
            result.best_move,
            Move::place(take),
            "from a pile of {}, should take {} to leave the opponent with 4",
            pile,
            take
        );
        assert_eq!(result.score, 1000);
    }
}

#[test]
fn test_nim_minimizing_side() {
    let result = search(&NimBoard::new(6), Side::Human, 10).unwrap();
    assert_eq!(result.best_move, Move::place(2));
    assert_eq!(result.score, -1000);
}

#[test]
fn test_nim_losing_position_keeps_first_move() {
    let result = search(&NimBoard::new(4), Side::Computer, 10).unwrap();
    assert_eq!(result.score, -1000);
    assert_eq!(result.best_move, Move::place(1));
}

#[test]
fn test_depth_zero_is_rejected() {
    assert_eq!(
        search(&NimBoard::new(5), Side::Computer, 0),
        Err(SearchError::DepthTooLow)
    );
}

#[test]
fn test_no_moves_is_an_error() {
    assert_eq!(
        search(&NimBoard::new(0), Side::Computer, 3),
        Err(SearchError::NoAvailableMoves)
    );
}

#[test]
fn test_four_ply_cycle_is_a_draw() {
    let board = ShuffleBoard::default();
    assert_eq!(search(&board, Side::Computer, 3).unwrap().score, 50);
    assert_eq!(search(&board, Side::Computer, 4).unwrap().score, DRAW_SCORE);
    assert_eq!(search(&board, Side::Human, 5).unwrap().score, DRAW_SCORE);
}

#[test]
fn test_repetition_is_counted() {
    let mut context = SearchContext::new(4);
    let mut cache = PositionCache::new();
    alpha_beta_search(&mut context, &mut cache, &ShuffleBoard::default(), Side::Computer).unwrap();
    assert_eq!(context.repetition_count(), 1);
    assert_eq!(context.searched_position_count(), 4);
    assert_eq!(context.last_score(), Some(DRAW_SCORE));
}

#[test]
fn test_finished_othello_is_scored_not_drawn() {
    // the computer has no disc left and the human can bracket nothing
    let lost = SmallOthello::from_cells(&[(0, HUMAN_TILE), (12, HUMAN_TILE), (24, HUMAN_TILE)]);
    assert!(lost.is_exhausted());
    assert_eq!(lost.evaluate(), -7);

    for depth in [1, 2, 3, 6] {
        let result = search(&lost, Side::Computer, depth).unwrap();
        assert_eq!(result.best_move, Move::PASS);
        assert_eq!(result.score, -7, "depth {}", depth);
    }
    assert_matches_minimax(&lost, Side::Human, 4);

    let won = SmallOthello::from_cells(&[(0, COMPUTER_TILE), (12, COMPUTER_TILE)]);
    assert!(won.is_exhausted());
    assert_eq!(search(&won, Side::Computer, 3).unwrap().score, won.evaluate());
    assert_eq!(search(&won, Side::Human, 4).unwrap().score, won.evaluate());
}

#[test]
fn test_single_pass_is_not_exhausted() {
    // the human must pass but the computer can still play 2
    let board = SmallOthello::from_cells(&[(0, COMPUTER_TILE), (1, HUMAN_TILE)]);
    assert_eq!(board.legal_moves(Side::Human).as_slice(), &[Move::PASS]);
    assert!(!board.is_exhausted());
    assert_matches_minimax(&board, Side::Human, 4);
}

#[test]
fn test_mate_scores_sit_outside_evaluations() {
    assert!(is_mate_score(MATE_SCORE));
    assert!(is_mate_score(-MATE_SCORE - 3));
    assert!(!is_mate_score(crate::chess::piece::KING_VALUE * 2));
}

#[test]
fn test_cached_mate_is_relative_to_the_node() {
    // mate two plies below a node searched at depth 5
    let found = MATE_SCORE + 3;
    let stored = score_to_cache(found, 5);
    assert_eq!(score_from_cache(stored, 5), found);
    // the same node reached with three plies left still sees a mate two plies away
    assert_eq!(score_from_cache(stored, 3), MATE_SCORE + 1);
    assert_eq!(score_from_cache(score_to_cache(-found, 5), 3), -(MATE_SCORE + 1));
    assert_eq!(score_to_cache(1234, 5), 1234);
    assert_eq!(score_from_cache(-1234, 2), -1234);
}

#[test]
fn test_cached_bounds_only_answer_outside_window() {
    let lower = CacheEntry {
        depth: 2,
        score: 50,
        bound_type: BoundType::Lower,
    };
    let upper = CacheEntry {
        depth: 2,
        score: -50,
        bound_type: BoundType::Upper,
    };
    let exact = CacheEntry {
        depth: 2,
        score: 7,
        bound_type: BoundType::Exact,
    };
    assert_eq!(cached_score(lower, 2, 0, 40), Some(40));
    assert_eq!(cached_score(lower, 2, 0, 60), None);
    assert_eq!(cached_score(upper, 2, -40, 0), Some(-40));
    assert_eq!(cached_score(upper, 2, -60, 0), None);
    assert_eq!(cached_score(exact, 1, 100, 200), Some(7));
}

#[test]
fn test_pruned_search_matches_minimax_on_line_games() {
    assert_matches_minimax(&TicTacToe::new(), Side::Computer, 4);
    assert_matches_minimax(&TicTacToe::new(), Side::Human, 3);
    let opened = TicTacToe::new()
        .make_move(Move::place(4), Side::Computer)
        .make_move(Move::place(0), Side::Human);
    assert_matches_minimax(&opened, Side::Computer, 7);
    assert_matches_minimax(&FourInARow::new(), Side::Computer, 3);
}

#[test]
fn test_pruned_search_matches_minimax_on_othello() {
    assert_matches_minimax(&SmallOthello::starting_position(), Side::Computer, 5);
    assert_matches_minimax(&SmallOthello::starting_position(), Side::Human, 4);
    assert_matches_minimax(&BigOthello::starting_position(), Side::Computer, 3);
}

#[test]
fn test_pruned_search_matches_minimax_on_chess() {
    assert_matches_minimax(&ChessBoard::starting_position(), Side::Computer, 3);
    assert_matches_minimax(&ChessBoard::starting_position(), Side::Human, 2);

    let tactical = chess_position! {
        r...k..r
        ppp..ppp
        ..n..q..
        ...pP...
        ..B..b..
        .....N..
        PPP..PPP
        R..QK..R
    };
    assert_matches_minimax(&tactical, Side::Human, 3);
    assert_matches_minimax(&tactical, Side::Computer, 2);
}

#[test]
fn test_retained_cache_answers_repeat_search() {
    let board = SmallOthello::starting_position();
    let mut context = SearchContext::new(4);
    let mut cache = PositionCache::new();

    let first = alpha_beta_search(&mut context, &mut cache, &board, Side::Computer).unwrap();
    assert!(!cache.is_empty());
    assert!(cache.is_hit(Side::Computer, &board, 4));

    context.reset_stats();
    let second = alpha_beta_search(&mut context, &mut cache, &board, Side::Computer).unwrap();
    assert_eq!(first, second);
    assert!(context.cache_hit_count() > 0);
}

#[test]
fn test_shallow_search_never_downgrades_cached_depth() {
    let board = SmallOthello::starting_position();
    let mut cache = PositionCache::new();

    let mut deep = SearchContext::new(5);
    alpha_beta_search(&mut deep, &mut cache, &board, Side::Computer).unwrap();
    assert_eq!(cache.get(Side::Computer, &board).unwrap().depth, 5);

    let mut shallow = SearchContext::new(2);
    alpha_beta_search(&mut shallow, &mut cache, &board, Side::Computer).unwrap();
    assert_eq!(cache.get(Side::Computer, &board).unwrap().depth, 5);
}

#[test]
fn test_pruning_visits_fewer_positions() {
    let board = ChessBoard::starting_position();
    let mut context = SearchContext::new(3);
    let mut cache = PositionCache::new();
    alpha_beta_search(&mut context, &mut cache, &board, Side::Computer).unwrap();
    assert!(context.termination_count() > 0);
    // 20 + 400 + 8902 nodes below the root without pruning
    assert!(context.searched_position_count() < 20 + 400 + 8902);
}
