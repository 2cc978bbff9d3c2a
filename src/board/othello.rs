//! Othello on an NxN grid. The engine plays the 5x5 and 8x8 variants.

use common::PackedTiles;
use std::fmt;

use crate::alpha_beta_searcher::GameBoard;

use super::game_move::{Move, MoveList};
use super::lines::{COMPUTER_TILE, EMPTY_TILE, HUMAN_TILE};
use super::side::Side;

pub const CORNER_BONUS_WEIGHT: i32 = 2;

const DIRECTIONS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Othello<const N: usize> {
    tiles: PackedTiles,
}

pub type SmallOthello = Othello<5>;
pub type BigOthello = Othello<8>;

impl Othello<5> {
    pub fn starting_position() -> Self {
        Self::from_cells(&[(7, COMPUTER_TILE), (11, COMPUTER_TILE), (6, HUMAN_TILE), (12, HUMAN_TILE)])
    }
}

impl Othello<8> {
    pub fn starting_position() -> Self {
        Self::from_cells(&[(27, COMPUTER_TILE), (36, COMPUTER_TILE), (28, HUMAN_TILE), (35, HUMAN_TILE)])
    }
}

impl<const N: usize> Othello<N> {
    pub const CELLS: usize = N * N;

    /// Builds a board with the given `(cell, tile)` pairs filled in.
    pub fn from_cells(cells: &[(usize, u8)]) -> Self {
        let tiles = cells
            .iter()
            .fold(PackedTiles::EMPTY, |tiles, &(cell, tile)| tiles.with(cell, tile));
        Self { tiles }
    }

    pub fn tile(&self, cell: usize) -> u8 {
        self.tiles.get(cell)
    }

    pub fn disc_count(&self, side: Side) -> u32 {
        self.tiles.count(side.placement_tile(), Self::CELLS)
    }

    fn neighbour(cell: usize, (dx, dy): (i32, i32)) -> Option<usize> {
        let x = (cell % N) as i32 + dx;
        let y = (cell / N) as i32 + dy;
        if x < 0 || y < 0 || x >= N as i32 || y >= N as i32 {
            return None;
        }
        Some(y as usize * N + x as usize)
    }

    /// Number of opposing tiles captured by placing on `cell` when walking in
    /// `direction`. Zero unless the run is closed off by one of `side`'s tiles.
    fn bracketed_run(&self, cell: usize, direction: (i32, i32), side: Side) -> usize {
        let own = side.placement_tile();
        let opposing = side.opposite().placement_tile();
        let mut run = 0;
        let mut current = cell;
        while let Some(next) = Self::neighbour(current, direction) {
            match self.tile(next) {
                tile if tile == opposing => run += 1,
                tile if tile == own => return run,
                _ => return 0,
            }
            current = next;
        }
        0
    }

    /// Opposing tiles that a placement on `cell` would flip.
    pub fn flip_count(&self, cell: usize, side: Side) -> usize {
        DIRECTIONS
            .iter()
            .map(|&direction| self.bracketed_run(cell, direction, side))
            .sum()
    }

    pub fn is_legal_placement(&self, cell: usize, side: Side) -> bool {
        self.tile(cell) == EMPTY_TILE
            && DIRECTIONS
                .iter()
                .any(|&direction| self.bracketed_run(cell, direction, side) > 0)
    }

    fn has_placement(&self, side: Side) -> bool {
        (0..Self::CELLS).any(|cell| self.is_legal_placement(cell, side))
    }

    /// The same position seen from the other side: colors swapped and rows flipped.
    pub fn mirrored(&self) -> Self {
        let tiles = (0..Self::CELLS).fold(PackedTiles::EMPTY, |tiles, cell| {
            let swapped = match self.tile(cell) {
                COMPUTER_TILE => HUMAN_TILE,
                HUMAN_TILE => COMPUTER_TILE,
                tile => tile,
            };
            let row = cell / N;
            tiles.with((N - 1 - row) * N + cell % N, swapped)
        });
        Self { tiles }
    }

    fn corners() -> [usize; 4] {
        [0, N - 1, N * (N - 1), N * N - 1]
    }
}

impl<const N: usize> GameBoard for Othello<N> {
    /// Othello never ends on a terminal position; it ends once both sides can
    /// only pass, see [`GameBoard::is_exhausted`].
    fn is_terminal(&self) -> bool {
        false
    }

    fn is_exhausted(&self) -> bool {
        !self.has_placement(Side::Computer) && !self.has_placement(Side::Human)
    }

    /// Finished games are decided by discs alone.
    fn final_score(&self) -> i32 {
        self.disc_count(Side::Computer) as i32 - self.disc_count(Side::Human) as i32
    }

    fn evaluate(&self) -> i32 {
        let discs = self.final_score();
        let corners: i32 = Self::corners()
            .iter()
            .map(|&corner| match self.tile(corner) {
                COMPUTER_TILE => 1,
                HUMAN_TILE => -1,
                _ => 0,
            })
            .sum();
        discs + CORNER_BONUS_WEIGHT * corners
    }

    fn legal_moves(&self, side: Side) -> MoveList {
        let mut moves: MoveList = (0..Self::CELLS)
            .filter(|&cell| self.is_legal_placement(cell, side))
            .map(Move::place)
            .collect();
        if moves.is_empty() {
            moves.push(Move::PASS);
        }
        moves
    }

    fn make_move(&self, game_move: Move, side: Side) -> Self {
        if game_move.is_pass() {
            return *self;
        }
        let own = side.placement_tile();
        let cell = game_move.cell();
        let mut tiles = self.tiles.with(cell, own);
        for direction in DIRECTIONS {
            let run = self.bracketed_run(cell, direction, side);
            let mut current = cell;
            for _ in 0..run {
                // bracketed_run already walked this path, so the neighbour exists
                current = match Self::neighbour(current, direction) {
                    Some(next) => next,
                    None => break,
                };
                tiles = tiles.with(current, own);
            }
        }
        Self { tiles }
    }
}

impl<const N: usize> fmt::Display for Othello<N> {
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
