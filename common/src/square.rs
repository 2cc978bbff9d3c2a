//! Chess square naming.
//!
//! Squares are numbered rank-major from the computer's back rank: `0` is a8,
//! `7` is h8 and `63` is h1. The human plays the white pieces from the bottom
//! of the board.

use once_cell::sync::Lazy;
use regex::Regex;

pub const A8: usize = 0;
pub const B8: usize = 1;
pub const C8: usize = 2;
pub const D8: usize = 3;
pub const E8: usize = 4;
pub const F8: usize = 5;
pub const G8: usize = 6;
pub const H8: usize = 7;
pub const A7: usize = 8;
pub const B7: usize = 9;
pub const C7: usize = 10;
pub const D7: usize = 11;
pub const E7: usize = 12;
pub const F7: usize = 13;
pub const G7: usize = 14;
pub const H7: usize = 15;
pub const A6: usize = 16;
pub const B6: usize = 17;
pub const C6: usize = 18;
pub const D6: usize = 19;
pub const E6: usize = 20;
pub const F6: usize = 21;
pub const G6: usize = 22;
pub const H6: usize = 23;
pub const A5: usize = 24;
pub const B5: usize = 25;
pub const C5: usize = 26;
pub const D5: usize = 27;
pub const E5: usize = 28;
pub const F5: usize = 29;
pub const G5: usize = 30;
pub const H5: usize = 31;
pub const A4: usize = 32;
pub const B4: usize = 33;
pub const C4: usize = 34;
pub const D4: usize = 35;
pub const E4: usize = 36;
pub const F4: usize = 37;
pub const G4: usize = 38;
pub const H4: usize = 39;
pub const A3: usize = 40;
pub const B3: usize = 41;
pub const C3: usize = 42;
pub const D3: usize = 43;
pub const E3: usize = 44;
pub const F3: usize = 45;
pub const G3: usize = 46;
pub const H3: usize = 47;
pub const A2: usize = 48;
pub const B2: usize = 49;
pub const C2: usize = 50;
pub const D2: usize = 51;
pub const E2: usize = 52;
pub const F2: usize = 53;
pub const G2: usize = 54;
pub const H2: usize = 55;
pub const A1: usize = 56;
pub const B1: usize = 57;
pub const C1: usize = 58;
pub const D1: usize = 59;
pub const E1: usize = 60;
pub const F1: usize = 61;
pub const G1: usize = 62;
pub const H1: usize = 63;

static ALGEBRAIC_SQUARE: Lazy<Regex> =
    Lazy::new(|| Regex::new("^([a-hA-H])([1-8])$").expect("square pattern should compile"));

pub fn from_rank_file(rank: u8, file: u8) -> usize {
    debug_assert!(rank < 8 && file < 8);
    (7 - rank as usize) * 8 + file as usize
}

/// Parses a square such as `e4` (case insensitive).
pub fn from_algebraic(algebraic_coord: &str) -> Option<usize> {
    let caps = ALGEBRAIC_SQUARE.captures(algebraic_coord.trim())?;
    let file = caps[1].chars().next()?.to_ascii_lowercase() as u8 - b'a';
    let rank = caps[2].chars().next()?.to_digit(10)? as u8 - 1;
    Some(from_rank_file(rank, file))
}

pub fn to_algebraic(square: usize) -> &'static str {
    tables::ALGEBRAIC[square]
}

#[rustfmt::skip]
mod tables {
    pub const ALGEBRAIC: [&str; 64] = [
        "a8", "b8", "c8", "d8", "e8", "f8", "g8", "h8",
        "a7", "b7", "c7", "d7", "e7", "f7", "g7", "h7",
        "a6", "b6", "c6", "d6", "e6", "f6", "g6", "h6",
        "a5", "b5", "c5", "d5", "e5", "f5", "g5", "h5",
        "a4", "b4", "c4", "d4", "e4", "f4", "g4", "h4",
        "a3", "b3", "c3", "d3", "e3", "f3", "g3", "h3",
        "a2", "b2", "c2", "d2", "e2", "f2", "g2", "h2",
        "a1", "b1", "c1", "d1", "e1", "f1", "g1", "h1",
    ];
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_rank_file() {
        assert_eq!(A1, from_rank_file(0, 0));
        assert_eq!(B2, from_rank_file(1, 1));
        assert_eq!(E4, from_rank_file(3, 4));
        assert_eq!(H8, from_rank_file(7, 7));
    }

    #[test]
    fn test_from_algebraic() {
        assert_eq!(Some(A1), from_algebraic("A1"));
        assert_eq!(Some(A1), from_algebraic("a1"));
        assert_eq!(Some(E5), from_algebraic("E5"));
        assert_eq!(None, from_algebraic("i9"));
        assert_eq!(None, from_algebraic("e44"));
    }

    #[test]
    fn test_to_algebraic() {
        assert_eq!("a1", to_algebraic(A1));
        assert_eq!("a8", to_algebraic(A8));
        assert_eq!("b8", to_algebraic(B8));
        assert_eq!("h1", to_algebraic(H1));
    }
}
