use smallvec::SmallVec;
use std::fmt;

/// A move packed into a single integer.
///
/// Bits 0-5 hold the origin square (or the placed cell for placement games),
/// bits 6-11 the destination square, and bit 12 marks a castling move. [`Move::PASS`]
/// is a sentinel that no real move can collide with: it sets bits above the
/// castling flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Move(u32);

pub type MoveList = SmallVec<[Move; 32]>;

impl Move {
    pub const PASS: Move = Move(0x07FF_FFFF);
    const CASTLE_FLAG: u32 = 1 << 12;

    const SQUARE_MASK: u32 = 0b11_1111;
    const DESTINATION_SHIFT: u32 = 6;

    /// A move that places a tile on `cell`.
    pub fn place(cell: usize) -> Self {
        debug_assert!(cell < 64);
        Self(cell as u32)
    }

    /// A move that relocates the piece on `from` to `to`.
    pub fn new(from: usize, to: usize) -> Self {
        debug_assert!(from < 64 && to < 64);
        Self(from as u32 | (to as u32) << Self::DESTINATION_SHIFT)
    }

    /// A king move that also relocates the matching rook.
    pub fn castle(from: usize, to: usize) -> Self {
        Self(Self::new(from, to).0 | Self::CASTLE_FLAG)
    }

    #[inline(always)]
    pub fn origin(&self) -> usize {
        (self.0 & Self::SQUARE_MASK) as usize
    }

    #[inline(always)]
    pub fn destination(&self) -> usize {
        ((self.0 >> Self::DESTINATION_SHIFT) & Self::SQUARE_MASK) as usize
    }

    /// The cell a placement move fills. Same bits as [`Move::origin`].
    #[inline(always)]
    pub fn cell(&self) -> usize {
        self.origin()
    }

    pub fn is_castle(&self) -> bool {
        *self != Self::PASS && self.0 & Self::CASTLE_FLAG != 0
    }

    pub fn is_pass(&self) -> bool {
        *self == Self::PASS
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_pass() {
            return write!(f, "Move(pass)");
        }
        write!(
            f,
            "Move({} -> {}{})",
            self.origin(),
            self.destination(),
            if self.is_castle() { ", castle" } else { "" }
        )
    }
}
