//! Move generation and application for [`ChessBoard`].

use common::square::{A1, A8, B1, B8, C1, C8, D1, D8, E1, E8, F1, F8, G1, G8, H1, H8};
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::game_move::{Move, MoveList};
use crate::board::side::Side;

use super::piece::{Piece, Tile};
use super::ChessBoard;

/// Whether generated moves must leave the mover's own king safe.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CheckFilter {
    Enforce,
    Ignore,
}

const KNIGHT_JUMPS: [(i32, i32); 8] = [
    (1, 2),
    (2, 1),
    (2, -1),
    (1, -2),
    (-1, -2),
    (-2, -1),
    (-2, 1),
    (-1, 2),
];

const KING_STEPS: [(i32, i32); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

const ORTHOGONAL_RAYS: [(i32, i32); 4] = [(0, -1), (-1, 0), (1, 0), (0, 1)];
const DIAGONAL_RAYS: [(i32, i32); 4] = [(-1, -1), (1, -1), (-1, 1), (1, 1)];
const ALL_RAYS: [(i32, i32); 8] = KING_STEPS;

/// King start, rook start, squares that must be empty, the square the king
/// passes and the square it lands on.
struct CastleRoute {
    king_from: usize,
    rook_from: usize,
    rook_to: usize,
    between: &'static [usize],
    passing: usize,
    landing: usize,
}

const COMPUTER_CASTLES: [CastleRoute; 2] = [
    CastleRoute {
        king_from: E8,
        rook_from: H8,
        rook_to: F8,
        between: &[F8, G8],
        passing: F8,
        landing: G8,
    },
    CastleRoute {
        king_from: E8,
        rook_from: A8,
        rook_to: D8,
        between: &[B8, C8, D8],
        passing: D8,
        landing: C8,
    },
];

const HUMAN_CASTLES: [CastleRoute; 2] = [
    CastleRoute {
        king_from: E1,
        rook_from: H1,
        rook_to: F1,
        between: &[F1, G1],
        passing: F1,
        landing: G1,
    },
    CastleRoute {
        king_from: E1,
        rook_from: A1,
        rook_to: D1,
        between: &[B1, C1, D1],
        passing: D1,
        landing: C1,
    },
];

fn castle_routes(side: Side) -> &'static [CastleRoute; 2] {
    match side {
        Side::Computer => &COMPUTER_CASTLES,
        Side::Human => &HUMAN_CASTLES,
    }
}

#[inline(always)]
fn offset(square: usize, (dx, dy): (i32, i32)) -> Option<usize> {
    let x = (square % 8) as i32 + dx;
    let y = (square / 8) as i32 + dy;
    if !(0..8).contains(&x) || !(0..8).contains(&y) {
        return None;
    }
    Some((y * 8 + x) as usize)
}

/// Row delta of a pawn step for `side`.
fn pawn_direction(side: Side) -> i32 {
    match side {
        Side::Computer => 1,
        Side::Human => -1,
    }
}

fn pawn_start_row(side: Side) -> usize {
    match side {
        Side::Computer => 1,
        Side::Human => 6,
    }
}

fn promotion_row(side: Side) -> usize {
    match side {
        Side::Computer => 7,
        Side::Human => 0,
    }
}

impl ChessBoard {
    /// All moves for `side`. With [`CheckFilter::Enforce`] every move that would
    /// leave `side`'s king attacked is dropped.
    #[cfg_attr(feature = "instrumentation", instrument(skip_all))]
    pub fn generate_moves(&self, side: Side, filter: CheckFilter) -> MoveList {
        let mut moves = MoveList::new();
        for square in 0..64 {
            let tile = self.tile(square);
            if tile.side() != Some(side) {
                continue;
            }
            match tile.piece() {
                Some(Piece::Pawn) => self.pawn_moves(square, side, &mut moves),
                Some(Piece::Knight) => self.step_moves(square, side, &KNIGHT_JUMPS, &mut moves),
                Some(Piece::Bishop) => self.ray_moves(square, side, &DIAGONAL_RAYS, &mut moves),
                Some(Piece::Rook) => self.ray_moves(square, side, &ORTHOGONAL_RAYS, &mut moves),
                Some(Piece::Queen) => {
                    self.ray_moves(square, side, &ORTHOGONAL_RAYS, &mut moves);
                    self.ray_moves(square, side, &DIAGONAL_RAYS, &mut moves);
                }
                Some(Piece::King) => {
                    self.step_moves(square, side, &KING_STEPS, &mut moves);
                    self.castle_moves(square, tile, side, &mut moves);
                }
                None => {}
            }
        }

        if filter == CheckFilter::Enforce {
            moves.retain(|mv| !self.apply_unchecked(*mv, side).is_king_attacked(side));
        }
        moves
    }

    fn can_land(&self, square: usize, side: Side) -> bool {
        self.tile(square).side() != Some(side)
    }

    fn step_moves(&self, from: usize, side: Side, steps: &[(i32, i32)], moves: &mut MoveList) {
        for &step in steps {
            if let Some(to) = offset(from, step) {
                if self.can_land(to, side) {
                    moves.push(Move::new(from, to));
                }
            }
        }
    }

    fn ray_moves(&self, from: usize, side: Side, rays: &[(i32, i32)], moves: &mut MoveList) {
        for &ray in rays {
            let mut current = from;
            while let Some(to) = offset(current, ray) {
                let target = self.tile(to);
                if target.is_empty() {
                    moves.push(Move::new(from, to));
                    current = to;
                    continue;
                }
                if target.side() != Some(side) {
                    moves.push(Move::new(from, to));
                }
                break;
            }
        }
    }

    fn pawn_moves(&self, from: usize, side: Side, moves: &mut MoveList) {
        let direction = pawn_direction(side);

        if let Some(one) = offset(from, (0, direction)) {
            if self.tile(one).is_empty() {
                moves.push(Move::new(from, one));
                if from / 8 == pawn_start_row(side) {
                    if let Some(two) = offset(one, (0, direction)) {
                        if self.tile(two).is_empty() {
                            moves.push(Move::new(from, two));
                        }
                    }
                }
            }
        }

        for dx in [-1, 1] {
            let Some(to) = offset(from, (dx, direction)) else {
                continue;
            };
            let target = self.tile(to);
            let captures = match target.side() {
                Some(owner) => owner != side,
                None => target.ghost_owner() == Some(side.opposite()),
            };
            if captures {
                moves.push(Move::new(from, to));
            }
        }
    }

    fn castle_moves(&self, from: usize, king: Tile, side: Side, moves: &mut MoveList) {
        if !king.is_unmoved() {
            return;
        }
        let opponent = side.opposite();
        let mut king_safe = None;
        for route in castle_routes(side) {
            if route.king_from != from {
                continue;
            }
            let rook = self.tile(route.rook_from);
            if !rook.is_piece(Piece::Rook, side) || !rook.is_unmoved() {
                continue;
            }
            if !route.between.iter().all(|&square| self.tile(square).is_empty()) {
                continue;
            }
            let safe = *king_safe.get_or_insert_with(|| !self.is_square_attacked(from, opponent));
            if !safe {
                return;
            }
            if self.is_square_attacked(route.passing, opponent)
                || self.is_square_attacked(route.landing, opponent)
            {
                continue;
            }
            moves.push(Move::castle(from, route.landing));
        }
    }

    /// Whether any piece of `attacker` attacks `square`. Castling never attacks.
    pub fn is_square_attacked(&self, square: usize, attacker: Side) -> bool {
        let attacked_by = |step: (i32, i32), piece: Piece| {
            offset(square, step).map_or(false, |from| self.tile(from).is_piece(piece, attacker))
        };

        // a pawn attacks diagonally forward, so look one row behind it
        let pawn_row = -pawn_direction(attacker);
        if attacked_by((-1, pawn_row), Piece::Pawn) || attacked_by((1, pawn_row), Piece::Pawn) {
            return true;
        }
        if KNIGHT_JUMPS.iter().any(|&jump| attacked_by(jump, Piece::Knight)) {
            return true;
        }
        if KING_STEPS.iter().any(|&step| attacked_by(step, Piece::King)) {
            return true;
        }

        let slider_hits = |rays: &[(i32, i32)], piece: Piece| {
            rays.iter().any(|&ray| {
                let mut current = square;
                while let Some(next) = offset(current, ray) {
                    let tile = self.tile(next);
                    if tile.is_empty() {
                        current = next;
                        continue;
                    }
                    return tile.side() == Some(attacker)
                        && (tile.piece() == Some(piece) || tile.piece() == Some(Piece::Queen));
                }
                false
            })
        };
        slider_hits(&ORTHOGONAL_RAYS, Piece::Rook) || slider_hits(&DIAGONAL_RAYS, Piece::Bishop)
    }

    /// Bitmask of every square `attacker` attacks. Pawns attack both forward
    /// diagonals whether or not anything stands there.
    pub fn attacked_squares(&self, attacker: Side) -> u64 {
        let mut attacked = 0u64;
        let mut mark = |square: usize| attacked |= 1u64 << square;

        for from in 0..64 {
            let tile = self.tile(from);
            if tile.side() != Some(attacker) {
                continue;
            }
            let (steps, rays): (&[(i32, i32)], &[(i32, i32)]) = match tile.piece() {
                Some(Piece::Pawn) => {
                    let direction = pawn_direction(attacker);
                    for dx in [-1, 1] {
                        if let Some(to) = offset(from, (dx, direction)) {
                            mark(to);
                        }
                    }
                    continue;
                }
                Some(Piece::Knight) => (&KNIGHT_JUMPS, &[]),
                Some(Piece::King) => (&KING_STEPS, &[]),
                Some(Piece::Bishop) => (&[], &DIAGONAL_RAYS),
                Some(Piece::Rook) => (&[], &ORTHOGONAL_RAYS),
                Some(Piece::Queen) => (&[], &ALL_RAYS),
                None => continue,
            };
            for &step in steps {
                if let Some(to) = offset(from, step) {
                    mark(to);
                }
            }
            for &ray in rays {
                let mut current = from;
                while let Some(to) = offset(current, ray) {
                    mark(to);
                    if !self.tile(to).is_empty() {
                        break;
                    }
                    current = to;
                }
            }
        }
        attacked
    }

    pub fn is_king_attacked(&self, side: Side) -> bool {
        self.king_square(side)
            .map_or(false, |king| self.is_square_attacked(king, side.opposite()))
    }

    /// Applies `game_move` for `side` without any legality check.
    ///
    /// Clears last turn's ghost pawns, strips castling rights from whatever moved,
    /// removes a pawn captured en passant, moves the rook of a castling move,
    /// promotes pawns reaching the far rank to queens and leaves a ghost behind a
    /// double push.
    #[must_use]
    pub fn apply_unchecked(&self, game_move: Move, side: Side) -> ChessBoard {
        let from = game_move.origin();
        let to = game_move.destination();
        let moving = self.tile(from);
        let target = self.tile(to);
        let mut board = *self;

        for square in 0..64 {
            if self.tile(square).is_ghost() {
                board.set_tile(square, Tile::EMPTY);
            }
        }

        let mut placed = moving.moved();
        let mut ghost = None;

        if game_move.is_castle() {
            if let Some(route) = castle_routes(side)
                .iter()
                .find(|route| route.king_from == from && route.landing == to)
            {
                board.set_tile(route.rook_from, Tile::EMPTY);
                board.set_tile(route.rook_to, Tile::new(Piece::Rook, side));
            }
        } else if moving.piece() == Some(Piece::Pawn) {
            if to / 8 == promotion_row(side) {
                placed = Tile::new(Piece::Queen, side);
            }
            if from.abs_diff(to) == 16 {
                ghost = Some((from + to) / 2);
            }
            if target.ghost_owner() == Some(side.opposite()) {
                // the captured pawn sits one row past the ghost, in its owner's direction
                if let Some(captured) = offset(to, (0, pawn_direction(side.opposite()))) {
                    board.set_tile(captured, Tile::EMPTY);
                }
            }
        }

        board.set_tile(from, Tile::EMPTY);
        board.set_tile(to, placed);
        if let Some(square) = ghost {
            board.set_tile(square, Tile::ghost(side));
        }
        board
    }
}
