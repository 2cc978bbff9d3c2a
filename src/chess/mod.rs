//! Chess on a packed 8x8 byte board.
//!
//! The computer plays black from the top of the board (a8 is square 0) and its
//! pawns advance towards higher square numbers. The human plays white from the
//! bottom.

pub mod evaluate;
pub mod move_generator;
pub mod piece;

mod display;


use common::square;
use common::PackedBytes;

use crate::alpha_beta_searcher::GameBoard;
use crate::board::error::MoveError;
use crate::board::game_move::{Move, MoveList};
use crate::board::side::Side;
use crate::chess_position;

use move_generator::CheckFilter;
use piece::{Piece, Tile};

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct ChessBoard {
    squares: PackedBytes,
}

impl ChessBoard {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn starting_position() -> Self {
        chess_position! {
            rnbqkbnr
            pppppppp
            ........
            ........
            ........
            ........
            PPPPPPPP
            RNBQKBNR
        }
    }

    #[inline(always)]
    pub fn tile(&self, square: usize) -> Tile {
        Tile::from_raw(self.squares.get(square))
    }

    #[must_use]
    pub fn with_tile(mut self, square: usize, tile: Tile) -> Self {
        self.squares.set(square, tile.raw());
        self
    }

    pub(crate) fn set_tile(&mut self, square: usize, tile: Tile) {
        self.squares.set(square, tile.raw());
    }

    pub fn king_square(&self, side: Side) -> Option<usize> {
        (0..64).find(|&square| self.tile(square).is_piece(Piece::King, side))
    }

    pub fn piece_count(&self) -> usize {
        (0..64).filter(|&square| !self.tile(square).is_empty()).count()
    }

    /// Same position with every castling right spent.
    #[must_use]
    pub fn without_castling_rights(&self) -> Self {
        let mut board = *self;
        for square in 0..64 {
            let tile = self.tile(square);
            if tile.is_unmoved() {
                board.set_tile(square, tile.moved());
            }
        }
        board
    }

    /// The position with colors swapped and the board flipped top to bottom.
    #[must_use]
    pub fn mirrored(&self) -> Self {
        let mut board = ChessBoard::new();
        for square in 0..64 {
            let tile = self.tile(square);
            let target = (7 - square / 8) * 8 + square % 8;
            let swapped = match (tile.piece(), tile.side(), tile.ghost_owner()) {
                (Some(piece), Some(side), _) if tile.is_unmoved() => {
                    Tile::unmoved(piece, side.opposite())
                }
                (Some(piece), Some(side), _) => Tile::new(piece, side.opposite()),
                (_, _, Some(owner)) => Tile::ghost(owner.opposite()),
                _ => Tile::EMPTY,
            };
            board.set_tile(target, swapped);
        }
        board
    }

    /// Reads a move in coordinate notation (`e2e4`, `e1g1`, `e7e8q`) and matches it
    /// against `side`'s legal moves, so castling moves pick up their flag.
    pub fn parse_move(&self, input: &str, side: Side) -> Result<Move, MoveError> {
        let unparseable = || MoveError::Unparseable {
            input: input.to_string(),
        };
        let trimmed = input.trim();
        let coordinates = trimmed
            .strip_suffix(['q', 'Q'])
            .unwrap_or(trimmed);
        if coordinates.len() != 4 || !coordinates.is_ascii() {
            return Err(unparseable());
        }
        let from = square::from_algebraic(&coordinates[0..2]).ok_or_else(unparseable)?;
        let to = square::from_algebraic(&coordinates[2..4]).ok_or_else(unparseable)?;

        self.legal_moves(side)
            .into_iter()
            .find(|mv| mv.origin() == from && mv.destination() == to)
            .ok_or(MoveError::NotLegal {
                mv: Move::new(from, to),
                side,
            })
    }

    pub fn describe_move(game_move: Move) -> String {
        format!(
            "{}{}",
            square::to_algebraic(game_move.origin()),
            square::to_algebraic(game_move.destination())
        )
    }
}

impl GameBoard for ChessBoard {
    /// A side has lost its king. Equivalent to the evaluation leaving the band a
    /// king's worth of material can explain, without running the evaluator.
    fn is_terminal(&self) -> bool {
        self.king_square(Side::Computer).is_none() || self.king_square(Side::Human).is_none()
    }

    fn evaluate(&self) -> i32 {
        evaluate::evaluate(self)
    }

    fn legal_moves(&self, side: Side) -> MoveList {
        self.generate_moves(side, CheckFilter::Enforce)
    }

    fn make_move(&self, game_move: Move, side: Side) -> Self {
        self.apply_unchecked(game_move, side)
    }

    fn is_in_check(&self, side: Side) -> bool {
        self.is_king_attacked(side)
    }
}
