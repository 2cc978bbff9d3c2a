//! Alpha-beta search algorithm implementation.
//!
//! A fixed-depth minimax search with alpha-beta pruning over any [`GameBoard`].
//! The computer is the maximizing side and the human the minimizing side. Moves
//! are searched in generation order and the first of several equally scored
//! moves wins, so the chosen move matches an unpruned minimax search.
//!
//! Each node, in order:
//! 1. evaluates a position where neither side can move as finished,
//! 2. scores `DRAW_SCORE` if the position repeats an ancestor with the same side to move,
//! 3. answers from the [`PositionCache`] when it holds a deep enough result,
//! 4. evaluates statically at the horizon or in a terminal position,
//! 5. scores a side without moves as mated (when in check) or drawn,
//! 6. otherwise expands every move, narrowing the window and cutting off once
//!    `alpha >= beta`, and caches the result with its bound type.

use std::cmp::{max, min};
use std::time::{Duration, Instant};

use log::debug;
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::game_move::Move;
use crate::board::side::Side;

use super::history::PositionHistory;
use super::traits::GameBoard;
use super::transposition_table::{BoundType, CacheEntry, PositionCache};

/// Base score of a checkmate. A mate found with `n` plies of search left scores
/// `MATE_SCORE + n`, so nearer mates score higher. Every evaluator stays well
/// inside this band.
pub const MATE_SCORE: i32 = 10_000_000;
pub const DRAW_SCORE: i32 = 0;

/// Lowest magnitude of any mate score: a mate found at most `u8::MAX` plies
/// from the node being scored.
const MATE_BAND: i32 = MATE_SCORE - u8::MAX as i32;

pub fn is_mate_score(score: i32) -> bool {
    score.abs() >= MATE_BAND
}

/// Converts a score found `depth` plies above the horizon into the form kept in
/// the cache. Mate scores are stored relative to the node, so the same entry
/// stays correct when it answers a query from a different depth.
pub(super) fn score_to_cache(score: i32, depth: u8) -> i32 {
    if score >= MATE_BAND {
        score - depth as i32
    } else if score <= -MATE_BAND {
        score + depth as i32
    } else {
        score
    }
}

/// Inverse of [`score_to_cache`] for a node searched at `depth`.
pub(super) fn score_from_cache(score: i32, depth: u8) -> i32 {
    if score >= MATE_BAND {
        score + depth as i32
    } else if score <= -MATE_BAND {
        score - depth as i32
    } else {
        score
    }
}

/// Score a cached entry gives a node searched at `depth` with window
/// `[alpha, beta]`: an exact score, or a bound that already falls outside the
/// window.
pub(super) fn cached_score(entry: CacheEntry, depth: u8, alpha: i32, beta: i32) -> Option<i32> {
    let score = score_from_cache(entry.score, depth);
    match entry.bound_type {
        BoundType::Exact => Some(score),
        BoundType::Lower if score >= beta => Some(beta),
        BoundType::Upper if score <= alpha => Some(alpha),
        _ => None,
    }
}

fn store<B: GameBoard>(
    cache: &mut PositionCache<B>,
    side: Side,
    board: &B,
    depth: u8,
    score: i32,
    bound_type: BoundType,
) {
    cache.update(side, board, depth, score_to_cache(score, depth), bound_type);
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SearchError {
    #[error("no available moves")]
    NoAvailableMoves,
    #[error("depth must be at least 1")]
    DepthTooLow,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SearchResult {
    pub best_move: Move,
    pub score: i32,
    pub depth: u8,
}

/// Statistics collected during search.
#[derive(Default)]
struct SearchStats {
    position_count: usize,
    cache_hits: usize,
    repetitions: usize,
    terminations: usize,
    last_score: Option<i32>,
    last_duration: Option<Duration>,
}

impl SearchStats {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn record_result(&mut self, score: i32, duration: Duration) {
        self.last_score = Some(score);
        self.last_duration = Some(duration);
    }
}

/// Per-search state: the depth to search, the path from the root to the
/// current node, and counters.
pub struct SearchContext<P> {
    depth: u8,
    history: PositionHistory<P>,
    stats: SearchStats,
}

impl<P: PartialEq> SearchContext<P> {
    pub fn new(depth: u8) -> Self {
        Self {
            depth,
            history: PositionHistory::with_capacity(depth as usize + 1),
            stats: SearchStats::default(),
        }
    }

    pub fn set_search_depth(&mut self, depth: u8) {
        self.depth = depth;
    }

    pub fn search_depth(&self) -> u8 {
        self.depth
    }

    pub fn reset_stats(&mut self) {
        self.stats.reset();
    }

    pub fn searched_position_count(&self) -> usize {
        self.stats.position_count
    }

    pub fn cache_hit_count(&self) -> usize {
        self.stats.cache_hits
    }

    pub fn repetition_count(&self) -> usize {
        self.stats.repetitions
    }

    /// Number of nodes whose remaining moves were pruned.
    pub fn termination_count(&self) -> usize {
        self.stats.terminations
    }

    pub fn last_score(&self) -> Option<i32> {
        self.stats.last_score
    }

    pub fn last_search_duration(&self) -> Option<Duration> {
        self.stats.last_duration
    }
}

/// Updates best score if new score is better for the side to move.
/// Returns true if best_score was updated.
fn update_best(score: i32, maximizing_player: bool, best_score: &mut i32) -> bool {
    let is_better = if maximizing_player {
        score > *best_score
    } else {
        score < *best_score
    };

    if is_better {
        *best_score = score;
    }
    is_better
}

/// Score of a position where `side` has no moves left while in check.
fn mated_score(side: Side, depth: u8) -> i32 {
    let magnitude = MATE_SCORE + depth as i32;
    if side.maximize_score() {
        -magnitude
    } else {
        magnitude
    }
}

/// Searches `context.search_depth()` plies ahead of `board` and returns the best
/// move for `side` together with its score.
///
/// # Returns
///
/// - `Ok(result)` - The best move found and its minimax value
/// - `Err(SearchError::DepthTooLow)` - If search depth is < 1
/// - `Err(SearchError::NoAvailableMoves)` - If `side` has no legal moves
#[must_use = "search returns the best move found"]
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn alpha_beta_search<B: GameBoard>(
    context: &mut SearchContext<B>,
    cache: &mut PositionCache<B>,
    board: &B,
    side: Side,
) -> Result<SearchResult, SearchError> {
    debug!("alpha-beta search depth: {}", context.search_depth());
    let depth = context.search_depth();

    if depth < 1 {
        return Err(SearchError::DepthTooLow);
    }

    let start = Instant::now();
    let candidates = board.legal_moves(side);
    if candidates.is_empty() {
        return Err(SearchError::NoAvailableMoves);
    }

    let maximizing_player = side.maximize_score();
    let mut best_score = if maximizing_player {
        i32::MIN
    } else {
        i32::MAX
    };
    let mut best_move = None;
    let mut alpha = i32::MIN;
    let mut beta = i32::MAX;

    context.history.clear();
    context.history.push(board.clone());

    for game_move in candidates.iter() {
        let child = board.make_move(*game_move, side);
        let score = alpha_beta_minimax(
            context,
            cache,
            &child,
            side.opposite(),
            depth - 1,
            alpha,
            beta,
        );
        debug!("root move {:?} scored {}", game_move, score);

        if update_best(score, maximizing_player, &mut best_score) || best_move.is_none() {
            best_move = Some(*game_move);
        }
        if maximizing_player {
            alpha = max(alpha, score);
        } else {
            beta = min(beta, score);
        }
    }

    context.history.clear();

    let best_move = best_move.ok_or(SearchError::NoAvailableMoves)?;
    store(cache, side, board, depth, best_score, BoundType::Exact);
    context.stats.record_result(best_score, start.elapsed());

    Ok(SearchResult {
        best_move,
        score: best_score,
        depth,
    })
}

/// Scores `board` with `side` to move, searching `depth` more plies.
///
/// Fail-soft: a score at or below `alpha` is an upper bound on the true value,
/// one at or above `beta` a lower bound, anything in between exact.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
fn alpha_beta_minimax<B: GameBoard>(
    context: &mut SearchContext<B>,
    cache: &mut PositionCache<B>,
    board: &B,
    side: Side,
    depth: u8,
    mut alpha: i32,
    mut beta: i32,
) -> i32 {
    context.stats.position_count += 1;

    // a finished game scores the same whichever path reached it
    if board.is_exhausted() {
        let score = board.evaluate();
        store(cache, side, board, depth, score, BoundType::Exact);
        return score;
    }

    // a repeated position depends on the path, so it is never cached
    if context.history.is_repetition(board) {
        context.stats.repetitions += 1;
        return DRAW_SCORE;
    }

    if let Some(score) = cache
        .lookup(side, board, depth)
        .and_then(|entry| cached_score(entry, depth, alpha, beta))
    {
        context.stats.cache_hits += 1;
        return score;
    }

    if depth == 0 || board.is_terminal() {
        let score = board.evaluate();
        store(cache, side, board, depth, score, BoundType::Exact);
        return score;
    }

    let candidates = board.legal_moves(side);
    if candidates.is_empty() {
        let score = if board.is_in_check(side) {
            mated_score(side, depth)
        } else {
            DRAW_SCORE
        };
        store(cache, side, board, depth, score, BoundType::Exact);
        return score;
    }

    let maximizing_player = side.maximize_score();
    let original_alpha = alpha;
    let original_beta = beta;
    let mut best_score = if maximizing_player {
        i32::MIN
    } else {
        i32::MAX
    };

    context.history.push(board.clone());
    for game_move in candidates.iter() {
        let child = board.make_move(*game_move, side);
        let score = alpha_beta_minimax(
            context,
            cache,
            &child,
            side.opposite(),
            depth - 1,
            alpha,
            beta,
        );
        update_best(score, maximizing_player, &mut best_score);

        if maximizing_player {
            alpha = max(alpha, score);
        } else {
            beta = min(beta, score);
        }
        if beta <= alpha {
            context.stats.terminations += 1;
            break;
        }
    }
    context.history.pop();

    let bound_type = if best_score <= original_alpha {
        BoundType::Upper
    } else if best_score >= original_beta {
        BoundType::Lower
    } else {
        BoundType::Exact
    };
    store(cache, side, board, depth, best_score, bound_type);

    best_score
}
