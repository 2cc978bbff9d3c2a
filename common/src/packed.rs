//! Fixed-width cell storage for small game boards.
//!
//! Every board in the engine is an immutable value whose cells are packed into a
//! handful of machine integers. Equality and hashing then reduce to comparing a
//! few words, which keeps position cache lookups cheap.

use std::hash::{Hash, Hasher};

/// Two-bit cells packed into a single `u128`. Holds up to 64 cells, which covers
/// every placement game in the engine (3x3 up to 8x8).
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default, PartialOrd, Ord)]
pub struct PackedTiles(u128);

impl PackedTiles {
    pub const EMPTY: Self = Self(0);
    pub const MAX_CELLS: usize = 64;

    const CELL_MASK: u128 = 0b11;

    #[inline(always)]
    pub fn get(&self, cell: usize) -> u8 {
        debug_assert!(cell < Self::MAX_CELLS);
        ((self.0 >> (cell << 1)) & Self::CELL_MASK) as u8
    }

    /// Returns a copy with `cell` set to `tile`.
    #[inline(always)]
    #[must_use]
    pub fn with(self, cell: usize, tile: u8) -> Self {
        debug_assert!(cell < Self::MAX_CELLS);
        debug_assert!(tile <= 0b11, "tile code {} does not fit in two bits", tile);
        let shift = cell << 1;
        Self((self.0 & !(Self::CELL_MASK << shift)) | ((tile as u128) << shift))
    }

    /// Counts the cells among the first `cells` that hold `tile`.
    pub fn count(&self, tile: u8, cells: usize) -> u32 {
        (0..cells).filter(|&cell| self.get(cell) == tile).count() as u32
    }
}

/// Multiplier for the polynomial row hash.
const BIG_PRIME: u64 = 1_000_000_007;

/// Byte cells packed eight to a `u64`, one word per row of an 8x8 board.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PackedBytes([u64; 8]);

impl PackedBytes {
    pub const EMPTY: Self = Self([0; 8]);

    #[inline(always)]
    pub fn get(&self, square: usize) -> u8 {
        debug_assert!(square < 64);
        (self.0[square >> 3] >> ((square & 7) << 3)) as u8
    }

    #[inline(always)]
    pub fn set(&mut self, square: usize, byte: u8) {
        debug_assert!(square < 64);
        let shift = (square & 7) << 3;
        let row = &mut self.0[square >> 3];
        *row = (*row & !(0xFFu64 << shift)) | ((byte as u64) << shift);
    }

    #[must_use]
    pub fn with(mut self, square: usize, byte: u8) -> Self {
        self.set(square, byte);
        self
    }

    /// Polynomial hash over the row words.
    pub fn polynomial_hash(&self) -> u64 {
        self.0.iter().fold(0u64, |hash, &row| {
            hash.wrapping_add(row).wrapping_mul(BIG_PRIME)
        })
    }
}

impl Hash for PackedBytes {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.polynomial_hash());
    }
}
