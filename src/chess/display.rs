use super::ChessBoard;
use std::fmt;

impl fmt::Display for ChessBoard {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for rank in 0..8 {
            write!(f, "{} ", 8 - rank)?;
            for file in 0..8 {
                write!(f, "{} ", self.tile(rank * 8 + file).to_fen())?;
            }
            writeln!(f)?;
        }
        write!(f, "  a b c d e f g h")
    }
}

/// Builds a [`ChessBoard`] from an 8x8 grid of FEN letters, rank 8 first.
/// Uppercase letters are the human's (white) pieces, lowercase the computer's.
/// Kings and rooks standing on their home squares keep their castling rights.
#[macro_export]
macro_rules! chess_position {
    ($($piece:tt)*) => {{
        use $crate::chess::piece::{Piece, Tile};
        use $crate::board::side::Side;
        let mut board = $crate::chess::ChessBoard::new();
        // Convert all input tokens to a string and filter out whitespace characters.
        let pieces: Vec<_> = stringify!($($piece)*)
            .chars()
            .filter(|&c| !c.is_whitespace())
            .collect();
        // Ensure we have exactly 64 squares
        assert_eq!(pieces.len(), 64, "Invalid number of squares. Expected 64, got {}", pieces.len());
        for (square, &c) in pieces.iter().enumerate() {
            if c == '.' {
                continue;
            }
            let (piece, side) = Piece::from_fen(c).expect("Invalid character in chess position");
            let home = match side {
                Side::Computer => [0, 4, 7],
                Side::Human => [56, 60, 63],
            };
            let castling_piece = (piece == Piece::King && square == home[1])
                || (piece == Piece::Rook && (square == home[0] || square == home[2]));
            let tile = if castling_piece {
                Tile::unmoved(piece, side)
            } else {
                Tile::new(piece, side)
            };
            board = board.with_tile(square, tile);
        }
        board
    }};
}

#[cfg(test)]
mod tests {
    use crate::board::side::Side;
    use crate::chess::piece::{Piece, Tile};
    use crate::chess::ChessBoard;

    #[test]
    fn test_starting_position_layout() {
        let board = ChessBoard::starting_position();
        assert_eq!(board.tile(4), Tile::unmoved(Piece::King, Side::Computer));
        assert_eq!(board.tile(3), Tile::new(Piece::Queen, Side::Computer));
        assert_eq!(board.tile(60), Tile::unmoved(Piece::King, Side::Human));
        assert_eq!(board.tile(59), Tile::new(Piece::Queen, Side::Human));
        assert_eq!(board.tile(0), Tile::unmoved(Piece::Rook, Side::Computer));
        assert_eq!(board.tile(57), Tile::new(Piece::Knight, Side::Human));
        assert_eq!(board.piece_count(), 32);
    }

    #[test]
    fn test_display() {
        let rendered = ChessBoard::starting_position().to_string();
        let first = rendered.lines().next().unwrap();
        assert_eq!(first, "8 r n b q k b n r ");
        assert!(rendered.ends_with("a b c d e f g h"));
    }
}
