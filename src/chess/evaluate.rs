//! Static evaluation of chess positions, from the computer's point of view.

use log::trace;
#[cfg(feature = "instrumentation")]
use tracing::instrument;

use crate::board::side::Side;

use super::piece::{Piece, KING_VALUE};
use super::ChessBoard;

/// Bonus per row a pawn has advanced from its starting rank.
pub const PAWN_ADVANCEMENT: [i32; 8] = [0, 10, 25, 45, 70, 120, 140, 140];
/// A king or rook that can still castle.
pub const UNMOVED_BONUS: i32 = 64;
/// A knight or bishop that has left the back rank.
pub const DEVELOPMENT_BONUS: i32 = 50;
/// A piece standing on one of the four centre squares.
pub const CENTER_BONUS: i32 = 35;
pub const KINGSIDE_CASTLE_BONUS: i32 = 135;
pub const QUEENSIDE_CASTLE_BONUS: i32 = 90;
/// Below this many pieces the positional terms give way to king mobility.
pub const ENDGAME_PIECE_COUNT: usize = 5;
pub const SAFE_SQUARE_WEIGHT: i32 = 2;
pub const KING_PROXIMITY_WEIGHT: i32 = 4;

/// Once the evaluation passes this, a king has been captured.
pub const KING_LOSS_THRESHOLD: i32 = KING_VALUE / 2;

const CENTER_SQUARES: [usize; 4] = [27, 28, 35, 36];

/// King square, rook square and bonus of each completed castle.
const CASTLED: [(Side, usize, usize, i32); 4] = [
    (Side::Computer, 6, 5, KINGSIDE_CASTLE_BONUS),
    (Side::Computer, 2, 3, QUEENSIDE_CASTLE_BONUS),
    (Side::Human, 62, 61, KINGSIDE_CASTLE_BONUS),
    (Side::Human, 58, 59, QUEENSIDE_CASTLE_BONUS),
];

fn back_row(side: Side) -> usize {
    match side {
        Side::Computer => 0,
        Side::Human => 7,
    }
}

fn rows_advanced(square: usize, side: Side) -> usize {
    match side {
        Side::Computer => square / 8 - 1,
        Side::Human => 6 - square / 8,
    }
}

/// Positive scores favor the computer. The score is antisymmetric:
/// `evaluate(board.mirrored()) == -evaluate(board)`.
#[cfg_attr(feature = "instrumentation", instrument(skip_all))]
pub fn evaluate(board: &ChessBoard) -> i32 {
    let mut material = 0;
    let mut positional = 0;
    let mut piece_count = 0;

    for square in 0..64 {
        let tile = board.tile(square);
        let (Some(piece), Some(side)) = (tile.piece(), tile.side()) else {
            continue;
        };
        let sign = side.sign();
        piece_count += 1;
        material += sign * piece.material_value();

        match piece {
            Piece::King | Piece::Rook if tile.is_unmoved() => positional += sign * UNMOVED_BONUS,
            Piece::Knight | Piece::Bishop if square / 8 != back_row(side) => {
                positional += sign * DEVELOPMENT_BONUS
            }
            // a pawn never stands on its own back rank
            Piece::Pawn if square / 8 != back_row(side) => {
                positional += sign * PAWN_ADVANCEMENT[rows_advanced(square, side).min(7)]
            }
            _ => {}
        }
    }

    let situational = if piece_count < ENDGAME_PIECE_COUNT {
        king_safety(board, material)
    } else {
        center_control(board) + castling(board)
    };

    let value = material + positional + situational;
    trace!(
        "material {} positional {} situational {}",
        material,
        positional,
        situational
    );
    value
}

fn center_control(board: &ChessBoard) -> i32 {
    CENTER_SQUARES
        .iter()
        .filter_map(|&square| board.tile(square).side())
        .map(|side| side.sign() * CENTER_BONUS)
        .sum()
}

fn castling(board: &ChessBoard) -> i32 {
    CASTLED
        .iter()
        .filter(|(side, king, rook, _)| {
            board.tile(*king).is_piece(Piece::King, *side)
                && board.tile(*rook).is_piece(Piece::Rook, *side)
        })
        .map(|(side, _, _, bonus)| side.sign() * bonus)
        .sum()
}

/// Endgame term. Each king wants room to move that the other side does not
/// attack, and the side ahead on material wants the kings close together.
fn king_safety(board: &ChessBoard, material: i32) -> i32 {
    let (Some(computer_king), Some(human_king)) = (
        board.king_square(Side::Computer),
        board.king_square(Side::Human),
    ) else {
        return 0;
    };

    let computer_room = flood_fill_size(computer_king, board.attacked_squares(Side::Human));
    let human_room = flood_fill_size(human_king, board.attacked_squares(Side::Computer));
    let room = SAFE_SQUARE_WEIGHT * (computer_room as i32 - human_room as i32);

    let distance = king_distance(computer_king, human_king);
    let proximity = material.signum() * KING_PROXIMITY_WEIGHT * (7 - distance);

    room + proximity
}

fn king_distance(a: usize, b: usize) -> i32 {
    let rows = (a / 8).abs_diff(b / 8);
    let files = (a % 8).abs_diff(b % 8);
    rows.max(files) as i32
}

/// Number of squares a king on `start` can walk to, one step at a time, without
/// ever standing on a square in `blocked`. The start square is not counted.
pub fn flood_fill_size(start: usize, blocked: u64) -> u32 {
    let mut visited = 1u64 << start;
    let mut frontier = vec![start];
    while let Some(square) = frontier.pop() {
        let (row, file) = ((square / 8) as i32, (square % 8) as i32);
        for dy in -1..=1 {
            for dx in -1..=1 {
                let (y, x) = (row + dy, file + dx);
                if !(0..8).contains(&y) || !(0..8).contains(&x) {
                    continue;
                }
                let next = (y * 8 + x) as usize;
                let bit = 1u64 << next;
                if visited & bit != 0 || blocked & bit != 0 {
                    continue;
                }
                visited |= bit;
                frontier.push(next);
            }
        }
    }
    visited.count_ones() - 1
}

/// Whether `value` can only come from a position with a captured king.
pub fn is_king_lost(value: i32) -> bool {
    value.abs() > KING_LOSS_THRESHOLD
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alpha_beta_searcher::GameBoard;
    use crate::board::game_move::Move;
    use crate::chess_position;
    use common::square::{D2, D4, E2, E4, E5, E7};

    #[test]
    fn test_starting_position_is_balanced() {
        assert_eq!(evaluate(&ChessBoard::starting_position()), 0);
    }

    #[test]
    fn test_evaluation_is_antisymmetric() {
        let boards = [
            ChessBoard::starting_position()
                .make_move(Move::new(E2, E4), Side::Human)
                .make_move(Move::new(E7, E5), Side::Computer)
                .make_move(Move::new(D2, D4), Side::Human),
            chess_position! {
                ....k...
                ........
                ........
                ........
                ....P...
                ........
                ........
                R...K...
            },
            chess_position! {
                r...k..r
                ppp..ppp
                ..n.....
                ...pP...
                ..B.....
                .....N..
                PPP..PPP
                R..QK..R
            },
        ];
        for board in boards {
            assert_eq!(evaluate(&board.mirrored()), -evaluate(&board), "{}", board);
        }
    }

    #[test]
    fn test_material_dominates() {
        let board = chess_position! {
            ....k...
            ........
            ........
            ........
            ........
            ........
            ........
            ...QK...
        };
        assert!(evaluate(&board) < -1000);
        assert!(!is_king_lost(evaluate(&board)));
    }

    #[test]
    fn test_missing_king_crosses_threshold() {
        let board = chess_position! {
            ........
            ........
            ........
            ........
            ........
            ........
            ........
            ....K...
        };
        assert!(is_king_lost(evaluate(&board)));
        assert!(board.is_terminal());
    }

    #[test]
    fn test_castled_king_scores_bonus() {
        let castled = chess_position! {
            rnbq.rk.
            pppppppp
            ........
            ........
            ........
            ........
            PPPPPPPP
            RNBQKBNR
        };
        assert_eq!(castling(&castled), KINGSIDE_CASTLE_BONUS);
        assert_eq!(castling(&castled.mirrored()), -KINGSIDE_CASTLE_BONUS);
        assert_eq!(castling(&ChessBoard::starting_position()), 0);
    }

    #[test]
    fn test_flood_fill() {
        // an unobstructed king in the corner can reach the whole board
        assert_eq!(flood_fill_size(0, 0), 63);
        // wall off the second row and second file around a8
        let wall = (1u64 << 1) | (1u64 << 8) | (1u64 << 9);
        assert_eq!(flood_fill_size(0, wall), 0);
    }
}
