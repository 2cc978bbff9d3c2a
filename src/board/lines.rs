//! N-in-a-row placement games on an NxN grid: TicTacToe (3x3) and FourInARow (4x4).

use common::PackedTiles;
use std::fmt;

use crate::alpha_beta_searcher::GameBoard;

use super::game_move::{Move, MoveList};
use super::side::Side;

pub const EMPTY_TILE: u8 = 0;
pub const COMPUTER_TILE: u8 = 1;
pub const HUMAN_TILE: u8 = 2;

/// Score of a completed line. Positive when the computer owns it.
pub const LINE_VALUE: i32 = 100;

/// A square grid where a side wins by filling a full row, column or diagonal.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct LineBoard<const N: usize> {
    tiles: PackedTiles,
}

pub type TicTacToe = LineBoard<3>;
pub type FourInARow = LineBoard<4>;

impl<const N: usize> LineBoard<N> {
    pub const CELLS: usize = N * N;

    pub fn new() -> Self {
        Default::default()
    }

    /// Builds a board from a row-major list of tile codes.
    pub fn from_tiles(tiles: &[u8]) -> Self {
        debug_assert_eq!(tiles.len(), Self::CELLS);
        let packed = tiles
            .iter()
            .enumerate()
            .fold(PackedTiles::EMPTY, |packed, (cell, &tile)| packed.with(cell, tile));
        Self { tiles: packed }
    }

    pub fn tile(&self, cell: usize) -> u8 {
        self.tiles.get(cell)
    }

    pub fn is_full(&self) -> bool {
        self.tiles.count(EMPTY_TILE, Self::CELLS) == 0
    }

    /// Sum of the line scores. A line is worth `LINE_VALUE` when every cell holds
    /// a computer tile, `-LINE_VALUE` when every cell holds a human tile, and
    /// nothing otherwise. The tile product is `1` or `2^N` exactly in those cases.
    pub fn score(&self) -> i32 {
        let diagonals = [(0, N + 1), (N - 1, N - 1)];
        let rows = (0..N).map(|row| (row * N, 1));
        let columns = (0..N).map(|column| (column, N));

        rows.chain(columns)
            .chain(diagonals)
            .map(|(start, step)| self.line_points(start, step))
            .sum()
    }

    fn line_points(&self, start: usize, step: usize) -> i32 {
        let product: u32 = (0..N)
            .map(|i| self.tile(start + i * step) as u32)
            .product();
        if product == 1 {
            LINE_VALUE
        } else if product == 1 << N {
            -LINE_VALUE
        } else {
            0
        }
    }
}

impl<const N: usize> GameBoard for LineBoard<N> {
    fn is_terminal(&self) -> bool {
        self.score() != 0 || self.is_full()
    }

    fn evaluate(&self) -> i32 {
        self.score()
    }

    fn legal_moves(&self, _side: Side) -> MoveList {
        (0..Self::CELLS)
            .filter(|&cell| self.tile(cell) == EMPTY_TILE)
            .map(Move::place)
            .collect()
    }

    fn make_move(&self, game_move: Move, side: Side) -> Self {
        Self {
            tiles: self.tiles.with(game_move.cell(), side.placement_tile()),
        }
    }
}

impl<const N: usize> fmt::Display for LineBoard<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..N {
            for column in 0..N {
                let symbol = match self.tile(row * N + column) {
                    COMPUTER_TILE => 'X',
                    HUMAN_TILE => 'O',
                    _ => '.',
                };
                write!(f, "{} ", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
