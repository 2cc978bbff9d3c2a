//! Common types re-exported for convenience.

pub use crate::alpha_beta_searcher::{GameBoard, PositionCache, SearchContext, SearchResult};
pub use crate::board::error::MoveError;
pub use crate::board::game_move::{Move, MoveList};
pub use crate::board::side::Side;
pub use crate::board::{GameKind, Position};
pub use crate::chess::ChessBoard;
pub use crate::game::config::{Difficulty, EngineConfig};
pub use crate::game::engine::{Engine, EngineError, GameOutcome};
