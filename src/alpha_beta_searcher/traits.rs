//! Core trait for generic alpha-beta search.

use std::fmt::Debug;
use std::hash::Hash;

use crate::board::error::MoveError;
use crate::board::game_move::{Move, MoveList};
use crate::board::side::Side;

/// An immutable game position. Applying a move yields a new position and never
/// mutates the receiver, so a position can be shared freely between the search,
/// the position cache and the repetition history.
///
/// Scores are always from the computer's point of view: positive favors the
/// computer, negative favors the human.
pub trait GameBoard: Clone + Eq + Hash + Debug {
    /// True when the game has ended and no further search is meaningful.
    fn is_terminal(&self) -> bool;

    /// Static evaluation of the position.
    fn evaluate(&self) -> i32;

    /// Every legal move for `side`. Games with a pass rule return `[Move::PASS]`
    /// rather than an empty list when `side` has no placement.
    fn legal_moves(&self, side: Side) -> MoveList;

    /// Applies `game_move` for `side` without checking legality. Only call this
    /// with a move produced by [`GameBoard::legal_moves`] for the same side.
    fn make_move(&self, game_move: Move, side: Side) -> Self;

    /// Applies a move that came from outside the engine, rejecting anything that
    /// is not in the legal move list.
    fn apply_move(&self, game_move: Move, side: Side) -> Result<Self, MoveError> {
        if !self.legal_moves(side).contains(&game_move) {
            return Err(MoveError::NotLegal {
                mv: game_move,
                side,
            });
        }
        Ok(self.make_move(game_move, side))
    }

    /// Whether `side`'s king is attacked. Only chess has a notion of check; a
    /// side with no legal moves is mated when this is true and drawn otherwise.
    fn is_in_check(&self, _side: Side) -> bool {
        false
    }

    /// Neither side has anything but a pass left, so the game has ended
    /// without reaching a terminal position.
    fn is_exhausted(&self) -> bool {
        false
    }

    /// Result of a finished game: positive when the computer won, negative when
    /// the human won, zero for a draw. Only the sign is meaningful.
    fn final_score(&self) -> i32 {
        self.evaluate()
    }
}
