use thiserror::Error;

use super::game_move::Move;
use super::side::Side;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    #[error("{mv:?} is not a legal move for the {side} player")]
    NotLegal { mv: Move, side: Side },
    #[error("cannot read `{input}` as a move for this game")]
    Unparseable { input: String },
}
