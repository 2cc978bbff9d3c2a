use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use thiserror::Error;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::alpha_beta_searcher::{
    alpha_beta_search, GameBoard, PositionCache, SearchContext, SearchError, SearchResult,
};
use crate::board::error::MoveError;
use crate::board::game_move::{Move, MoveList};
use crate::board::side::Side;
use crate::board::{GameKind, Position};

use super::config::{self, CachePolicy, EngineConfig};

/// Game state and runtime info
#[derive(Clone)]
pub struct GameState {
    position: Position,
    side_to_move: Side,
    move_history: Vec<(Side, Move)>,
    last_search: Option<SearchResult>,
}

impl GameState {
    fn new(position: Position, side_to_move: Side) -> Self {
        Self {
            position,
            side_to_move,
            move_history: Vec::new(),
            last_search: None,
        }
    }
}

/// How a finished game ended.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum GameOutcome {
    Won(Side),
    Draw,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("the game is already over")]
    GameOver,
    #[error("{side} has no legal moves")]
    NoLegalMoves { side: Side },
    #[error("move error: {0}")]
    Move(#[from] MoveError),
    #[error("search error: {0}")]
    Search(#[from] SearchError),
}

/// Raises the shared thinking flag for as long as it is alive.
struct ThinkingGuard {
    flag: Arc<AtomicBool>,
}

impl ThinkingGuard {
    fn engage(flag: &Arc<AtomicBool>) -> Self {
        flag.store(true, Ordering::SeqCst);
        Self {
            flag: Arc::clone(flag),
        }
    }
}

impl Drop for ThinkingGuard {
    fn drop(&mut self) {
        self.flag.store(false, Ordering::SeqCst);
    }
}

/// Plays one game: owns the current position, the position cache and the
/// search state, and picks a search depth for every computer move.
pub struct Engine {
    config: EngineConfig,
    state: GameState,
    cache: PositionCache<Position>,
    search_context: SearchContext<Position>,
    thinking: Arc<AtomicBool>,
}

impl Default for Engine {
    fn default() -> Self {
        Self::with_config(EngineConfig::default())
    }
}

impl Engine {
    pub fn new(game: GameKind) -> Self {
        Self::with_config(EngineConfig::for_game(game))
    }

    /// Starts a new game of `config.game`; the human moves first.
    pub fn with_config(config: EngineConfig) -> Self {
        let position = Position::new_game(config.game);
        Self::with_position(config, position, Side::Human)
    }

    /// Starts from an arbitrary position. `config.game` follows the position.
    pub fn with_position(mut config: EngineConfig, position: Position, side_to_move: Side) -> Self {
        config.game = position.kind();
        Self {
            config,
            state: GameState::new(position, side_to_move),
            cache: PositionCache::new(),
            search_context: SearchContext::new(1),
            thinking: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn position(&self) -> &Position {
        &self.state.position
    }

    pub fn side_to_move(&self) -> Side {
        self.state.side_to_move
    }

    /// Replaces the current position and clears the move history. The
    /// position cache is kept, subject to the cache policy.
    pub fn set_position(&mut self, position: Position, side_to_move: Side) {
        self.config.game = position.kind();
        self.state = GameState::new(position, side_to_move);
    }

    pub fn move_history(&self) -> &[(Side, Move)] {
        &self.state.move_history
    }

    pub fn last_move(&self) -> Option<(Side, Move)> {
        self.state.move_history.last().copied()
    }

    pub fn last_search(&self) -> Option<SearchResult> {
        self.state.last_search
    }

    pub fn legal_moves(&self) -> MoveList {
        self.state.position.legal_moves(self.state.side_to_move)
    }

    /// A shared handle to the flag raised while a search is running, for
    /// front ends that poll it from another thread.
    pub fn thinking_flag(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.thinking)
    }

    pub fn is_thinking(&self) -> bool {
        self.thinking.load(Ordering::SeqCst)
    }

    /// The game is over once the position is terminal, the side to move has
    /// no moves, or both sides can only pass.
    pub fn is_game_over(&self) -> bool {
        let position = &self.state.position;
        position.is_terminal()
            || position.is_exhausted()
            || position.legal_moves(self.state.side_to_move).is_empty()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        if !self.is_game_over() {
            return None;
        }
        let position = &self.state.position;
        let side = self.state.side_to_move;
        if !position.is_terminal() && position.legal_moves(side).is_empty() {
            return Some(if position.is_in_check(side) {
                GameOutcome::Won(side.opposite())
            } else {
                GameOutcome::Draw
            });
        }
        Some(match position.final_score() {
            score if score > 0 => GameOutcome::Won(Side::Computer),
            score if score < 0 => GameOutcome::Won(Side::Human),
            _ => GameOutcome::Draw,
        })
    }

    /// Applies a move for the side to move, rejecting anything outside its
    /// legal moves.
    pub fn apply_move(&mut self, game_move: Move) -> Result<(), EngineError> {
        let side = self.state.side_to_move;
        let next = self.state.position.apply_move(game_move, side)?;
        debug!("{} plays {}", side, self.state.position.describe_move(game_move));

        self.state.position = next;
        self.state.move_history.push((side, game_move));
        self.state.side_to_move = side.opposite();
        Ok(())
    }

    /// Parses and applies a move typed by a player.
    pub fn apply_input(&mut self, input: &str) -> Result<Move, EngineError> {
        let game_move = self
            .state
            .position
            .parse_move(input, self.state.side_to_move)?;
        self.apply_move(game_move)?;
        Ok(game_move)
    }

    /// Search depth for the current game and difficulty when the side to move
    /// has `branching` moves.
    pub fn choose_depth(&self, branching: usize) -> u8 {
        config::choose_depth(
            self.config.game,
            self.config.difficulty,
            branching,
            self.config.node_budget,
        )
    }

    /// Finds the best move for the side to move without playing it.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn get_best_move(&mut self) -> Result<Move, EngineError> {
        let _thinking = ThinkingGuard::engage(&self.thinking);
        self.search_context.reset_stats();
        self.state.last_search = None;

        let position = self.state.position;
        let side = self.state.side_to_move;
        if position.is_terminal() {
            return Err(EngineError::GameOver);
        }
        let moves = position.legal_moves(side);
        let first_move = *moves.first().ok_or(EngineError::NoLegalMoves { side })?;
        if moves.len() == 1 {
            info!(
                "{} has a single move: {}",
                side,
                position.describe_move(first_move)
            );
            return Ok(first_move);
        }

        let depth = self.choose_depth(moves.len());
        info!(
            "searching {} at depth {} ({} moves, difficulty {})",
            self.config.game,
            depth,
            moves.len(),
            self.config.difficulty
        );
        self.prepare_cache();
        self.search_context.set_search_depth(depth);

        match alpha_beta_search(&mut self.search_context, &mut self.cache, &position, side) {
            Ok(result) => {
                info!(
                    "best move {} scored {} after {} positions",
                    position.describe_move(result.best_move),
                    result.score,
                    self.search_context.searched_position_count()
                );
                self.state.last_search = Some(result);
                Ok(result.best_move)
            }
            Err(SearchError::DepthTooLow) => {
                warn!(
                    "depth {} too low to search, playing the first legal move",
                    depth
                );
                Ok(first_move)
            }
            Err(error) => Err(error.into()),
        }
    }

    pub fn make_best_move(&mut self) -> Result<Move, EngineError> {
        let best_move = self.get_best_move()?;
        self.apply_move(best_move)?;
        Ok(best_move)
    }

    pub fn get_search_stats(&self) -> SearchStats {
        SearchStats {
            positions_searched: self.search_context.searched_position_count(),
            cache_hits: self.search_context.cache_hit_count(),
            cache_size: self.cache.len(),
            depth: self.search_context.search_depth(),
            last_score: self.search_context.last_score(),
            last_search_duration: self.search_context.last_search_duration(),
        }
    }

    fn prepare_cache(&mut self) {
        let over_limit = self.cache.len() > self.config.max_cache_entries;
        if over_limit {
            debug!(
                "position cache holds {} entries, over the limit of {}",
                self.cache.len(),
                self.config.max_cache_entries
            );
        }
        if over_limit || self.config.cache_policy == CachePolicy::ClearEachSearch {
            self.cache.clear();
        }
    }
}

/// Search performance statistics
#[derive(Debug, Clone)]
pub struct SearchStats {
    pub positions_searched: usize,
    pub cache_hits: usize,
    pub cache_size: usize,
    pub depth: u8,
    pub last_score: Option<i32>,
    pub last_search_duration: Option<Duration>,
}
