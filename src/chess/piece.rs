//! Byte encoding of a chess square.
//!
//! Bits 0-2 hold the piece type, bit 3 marks a computer piece, bit 4 marks a
//! king or rook that has not moved yet. An empty square with bit 4 set is a
//! "ghost" pawn left behind by a double push this turn, capturable en passant;
//! bit 5 then records that the computer made the push.

use crate::board::side::Side;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Piece {
    Pawn = 1,
    Knight = 2,
    Bishop = 3,
    Rook = 4,
    Queen = 5,
    King = 6,
}

pub const KING_VALUE: i32 = 1_000_000;
pub const QUEEN_VALUE: i32 = 1280;
pub const ROOK_VALUE: i32 = 680;
pub const BISHOP_VALUE: i32 = 440;
pub const KNIGHT_VALUE: i32 = 420;
pub const PAWN_VALUE: i32 = 70;

impl Piece {
    pub const ALL: [Piece; 6] = [
        Piece::Pawn,
        Piece::Knight,
        Piece::Bishop,
        Piece::Rook,
        Piece::Queen,
        Piece::King,
    ];

    pub fn from_code(code: u8) -> Option<Piece> {
        match code {
            1 => Some(Piece::Pawn),
            2 => Some(Piece::Knight),
            3 => Some(Piece::Bishop),
            4 => Some(Piece::Rook),
            5 => Some(Piece::Queen),
            6 => Some(Piece::King),
            _ => None,
        }
    }

    pub fn material_value(&self) -> i32 {
        match self {
            Piece::Pawn => PAWN_VALUE,
            Piece::Knight => KNIGHT_VALUE,
            Piece::Bishop => BISHOP_VALUE,
            Piece::Rook => ROOK_VALUE,
            Piece::Queen => QUEEN_VALUE,
            Piece::King => KING_VALUE,
        }
    }

    /// FEN letter, uppercase for the human (white) and lowercase for the computer.
    pub fn to_fen(&self, side: Side) -> char {
        let c = match self {
            Piece::Pawn => 'p',
            Piece::Knight => 'n',
            Piece::Bishop => 'b',
            Piece::Rook => 'r',
            Piece::Queen => 'q',
            Piece::King => 'k',
        };
        match side {
            Side::Human => c.to_ascii_uppercase(),
            Side::Computer => c,
        }
    }

    pub fn from_fen(c: char) -> Option<(Piece, Side)> {
        let side = if c.is_ascii_uppercase() {
            Side::Human
        } else {
            Side::Computer
        };
        let piece = match c.to_ascii_lowercase() {
            'p' => Piece::Pawn,
            'n' => Piece::Knight,
            'b' => Piece::Bishop,
            'r' => Piece::Rook,
            'q' => Piece::Queen,
            'k' => Piece::King,
            _ => return None,
        };
        Some((piece, side))
    }
}

/// The byte stored for one square.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub struct Tile(u8);

impl Tile {
    pub const EMPTY: Tile = Tile(0);

    const PIECE_MASK: u8 = 0b0111;
    const OCCUPANT_MASK: u8 = 0b1111;
    const COMPUTER: u8 = 1 << 3;
    const UNMOVED_OR_GHOST: u8 = 1 << 4;
    const GHOST_OWNER_COMPUTER: u8 = 1 << 5;

    pub fn new(piece: Piece, side: Side) -> Self {
        let side_bit = match side {
            Side::Computer => Self::COMPUTER,
            Side::Human => 0,
        };
        Tile(piece as u8 | side_bit)
    }

    /// A king or rook that still has its castling right.
    pub fn unmoved(piece: Piece, side: Side) -> Self {
        Tile(Self::new(piece, side).0 | Self::UNMOVED_OR_GHOST)
    }

    /// The empty square a double-pushing pawn of `owner` skipped over.
    pub fn ghost(owner: Side) -> Self {
        let owner_bit = match owner {
            Side::Computer => Self::GHOST_OWNER_COMPUTER,
            Side::Human => 0,
        };
        Tile(Self::UNMOVED_OR_GHOST | owner_bit)
    }

    pub fn from_raw(raw: u8) -> Self {
        Tile(raw)
    }

    pub fn raw(&self) -> u8 {
        self.0
    }

    /// True for empty squares, including ghost squares.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.0 & Self::OCCUPANT_MASK == 0
    }

    #[inline(always)]
    pub fn piece(&self) -> Option<Piece> {
        Piece::from_code(self.0 & Self::PIECE_MASK)
    }

    /// Owner of the piece on this square, if any.
    #[inline(always)]
    pub fn side(&self) -> Option<Side> {
        if self.piece().is_none() {
            return None;
        }
        if self.0 & Self::COMPUTER != 0 {
            Some(Side::Computer)
        } else {
            Some(Side::Human)
        }
    }

    pub fn is_piece(&self, piece: Piece, side: Side) -> bool {
        self.piece() == Some(piece) && self.side() == Some(side)
    }

    pub fn is_unmoved(&self) -> bool {
        self.piece().is_some() && self.0 & Self::UNMOVED_OR_GHOST != 0
    }

    pub fn is_ghost(&self) -> bool {
        self.is_empty() && self.0 & Self::UNMOVED_OR_GHOST != 0
    }

    /// Side whose double push left this ghost.
    pub fn ghost_owner(&self) -> Option<Side> {
        if !self.is_ghost() {
            return None;
        }
        if self.0 & Self::GHOST_OWNER_COMPUTER != 0 {
            Some(Side::Computer)
        } else {
            Some(Side::Human)
        }
    }

    /// Same piece with its castling right spent.
    #[must_use]
    pub fn moved(&self) -> Self {
        Tile(self.0 & Self::OCCUPANT_MASK)
    }

    pub fn to_fen(&self) -> char {
        match (self.piece(), self.side()) {
            (Some(piece), Some(side)) => piece.to_fen(side),
            _ => '.',
        }
    }
}
