use rand::seq::SliceRandom;
use std::fmt;
use std::str::FromStr;

/// One of the two players. The computer is always the maximizing side, so
/// positive evaluations favor it.
#[derive(Clone, Copy, PartialEq, Debug, Eq, Hash, PartialOrd, Ord)]
pub enum Side {
    Computer = 0,
    Human = 1,
}

impl Side {
    pub const ALL: [Side; 2] = [Side::Computer, Side::Human];

    pub fn opposite(&self) -> Self {
        match self {
            Side::Computer => Side::Human,
            Side::Human => Side::Computer,
        }
    }

    pub fn maximize_score(&self) -> bool {
        match self {
            Side::Computer => true,
            Side::Human => false,
        }
    }

    /// `1` for the computer, `-1` for the human.
    pub fn sign(&self) -> i32 {
        match self {
            Side::Computer => 1,
            Side::Human => -1,
        }
    }

    /// Cell code used by the placement games (TicTacToe, FourInARow, Othello).
    pub fn placement_tile(&self) -> u8 {
        match self {
            Side::Computer => 1,
            Side::Human => 2,
        }
    }

    pub fn random() -> Self {
        *Self::ALL
            .choose(&mut rand::thread_rng())
            .unwrap_or(&Side::Computer)
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let side_str = match self {
            Side::Computer => "computer",
            Side::Human => "human",
        };
        write!(f, "{}", side_str)
    }
}

// used for parsing cli args
type ParseError = &'static str;
impl FromStr for Side {
    type Err = ParseError;
    fn from_str(side: &str) -> Result<Self, Self::Err> {
        match side {
            "computer" => Ok(Side::Computer),
            "human" => Ok(Side::Human),
            "random" => Ok(Side::random()),
            _ => Err("invalid side; options are: computer, human, random"),
        }
    }
}
