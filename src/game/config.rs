//! Engine configuration: difficulty levels, the per-game depth table and the
//! position cache lifecycle.

use std::fmt;
use std::str::FromStr;

use log::warn;

use crate::board::GameKind;

/// Nodes a branching-factor driven search is allowed to expand.
pub const DEFAULT_NODE_BUDGET: u64 = 20_000_000;

/// Cached positions kept between searches before the cache is dropped.
pub const DEFAULT_MAX_CACHE_ENTRIES: usize = 4_000_000;

/// Hard ceiling on any search depth the engine picks.
pub const MAX_SEARCH_DEPTH: u8 = 12;

/// Search depth per game (rows, in [`GameKind`] order) and difficulty level
/// (columns, level 1 first). For Othello and four-in-a-row the entry caps the
/// depth the node budget allows.
#[rustfmt::skip]
pub const DEPTH_TABLE: [[u8; Difficulty::LEVELS]; 5] = [
    // TicTacToe: level 4 and up search the whole game tree
    [1, 3, 5, 9, 9],
    // FourInARow
    [2, 3, 5, 6, 8],
    // Othello5
    [2, 3, 5, 7, 9],
    // Othello8
    [1, 2, 4, 5, 6],
    // Chess
    [1, 2, 3, 4, 4],
];

/// A difficulty level from 1 (weakest) to 5.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
pub struct Difficulty(u8);

impl Difficulty {
    pub const LEVELS: usize = 5;
    pub const EASIEST: Difficulty = Difficulty(1);
    pub const HARDEST: Difficulty = Difficulty(5);

    pub fn new(level: u8) -> Option<Self> {
        if (1..=Self::LEVELS as u8).contains(&level) {
            Some(Difficulty(level))
        } else {
            None
        }
    }

    pub fn level(&self) -> u8 {
        self.0
    }

    /// Column of this level in [`DEPTH_TABLE`].
    pub fn index(&self) -> usize {
        self.0 as usize - 1
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty(4)
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

// used for parsing cli args
impl FromStr for Difficulty {
    type Err = &'static str;
    fn from_str(level: &str) -> Result<Self, Self::Err> {
        level
            .parse::<u8>()
            .ok()
            .and_then(Difficulty::new)
            .ok_or("invalid difficulty; options are: 1, 2, 3, 4, 5")
    }
}

/// What happens to the position cache between searches.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum CachePolicy {
    /// Start every search with an empty cache.
    ClearEachSearch,
    /// Keep results for the whole game.
    Retain,
}

impl CachePolicy {
    pub fn default_for(game: GameKind) -> Self {
        match game {
            GameKind::TicTacToe | GameKind::FourInARow => CachePolicy::Retain,
            GameKind::Othello5 | GameKind::Othello8 | GameKind::Chess => {
                CachePolicy::ClearEachSearch
            }
        }
    }
}

#[derive(Clone, Debug)]
pub struct EngineConfig {
    pub game: GameKind,
    pub difficulty: Difficulty,
    pub node_budget: u64,
    pub cache_policy: CachePolicy,
    pub max_cache_entries: usize,
}

impl EngineConfig {
    pub fn for_game(game: GameKind) -> Self {
        Self {
            game,
            difficulty: Difficulty::default(),
            node_budget: DEFAULT_NODE_BUDGET,
            cache_policy: CachePolicy::default_for(game),
            max_cache_entries: DEFAULT_MAX_CACHE_ENTRIES,
        }
    }

    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = difficulty;
        self
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self::for_game(GameKind::Chess)
    }
}

/// Deepest search whose full tree stays within `node_budget` nodes when every
/// position has `branching` moves: `1 + ln(budget) / ln(branching + 1)`.
pub fn depth_for_branching(branching: usize, node_budget: u64) -> u8 {
    if branching <= 1 {
        return MAX_SEARCH_DEPTH;
    }
    let depth = 1.0 + (node_budget as f64).ln() / ((branching + 1) as f64).ln();
    (depth.floor() as u64).min(MAX_SEARCH_DEPTH as u64) as u8
}

/// Picks the search depth for `game` at `difficulty` given the current number
/// of legal moves.
pub fn choose_depth(game: GameKind, difficulty: Difficulty, branching: usize, node_budget: u64) -> u8 {
    let table_depth = DEPTH_TABLE[game.index()][difficulty.index()];
    let depth = match game {
        GameKind::TicTacToe | GameKind::Chess => table_depth,
        GameKind::FourInARow | GameKind::Othello5 | GameKind::Othello8 => {
            let budget_depth = depth_for_branching(branching, node_budget);
            if budget_depth < table_depth {
                warn!(
                    "clamping {} search from depth {} to {} for {} moves",
                    game, table_depth, budget_depth, branching
                );
            }
            table_depth.min(budget_depth)
        }
    };
    depth.clamp(1, MAX_SEARCH_DEPTH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_difficulty() {
        assert_eq!(Difficulty::from_str("1"), Ok(Difficulty::EASIEST));
        assert_eq!(Difficulty::from_str("5"), Ok(Difficulty::HARDEST));
        assert!(Difficulty::from_str("0").is_err());
        assert!(Difficulty::from_str("6").is_err());
        assert!(Difficulty::from_str("hard").is_err());
    }

    #[test]
    fn test_depth_for_branching() {
        // ln(20M) / ln(10) is about 7.3
        assert_eq!(depth_for_branching(9, DEFAULT_NODE_BUDGET), 8);
        // ln(20M) / ln(31) is about 4.9
        assert_eq!(depth_for_branching(30, DEFAULT_NODE_BUDGET), 5);
        assert_eq!(depth_for_branching(1, DEFAULT_NODE_BUDGET), MAX_SEARCH_DEPTH);
        assert_eq!(depth_for_branching(2, 1_000_000_000_000), MAX_SEARCH_DEPTH);
        assert_eq!(depth_for_branching(50, 1), 1);
    }

    #[test]
    fn test_tictactoe_solves_at_default_difficulty() {
        assert_eq!(
            choose_depth(GameKind::TicTacToe, Difficulty::default(), 9, DEFAULT_NODE_BUDGET),
            9
        );
    }

    #[test]
    fn test_chess_ignores_branching() {
        for branching in [1, 20, 60] {
            assert_eq!(
                choose_depth(GameKind::Chess, Difficulty::HARDEST, branching, DEFAULT_NODE_BUDGET),
                4
            );
        }
    }

    #[test]
    fn test_othello_depth_shrinks_with_branching() {
        let level = Difficulty::HARDEST;
        assert_eq!(choose_depth(GameKind::Othello8, level, 4, DEFAULT_NODE_BUDGET), 6);
        assert_eq!(choose_depth(GameKind::Othello8, level, 4, 1_000), 5);
        assert_eq!(choose_depth(GameKind::Othello5, level, 8, 1_000), 4);
        assert!(choose_depth(GameKind::FourInARow, level, 16, 10) >= 1);
    }

    #[test]
    fn test_default_cache_policy() {
        assert_eq!(CachePolicy::default_for(GameKind::TicTacToe), CachePolicy::Retain);
        assert_eq!(
            CachePolicy::default_for(GameKind::Chess),
            CachePolicy::ClearEachSearch
        );
    }
}
