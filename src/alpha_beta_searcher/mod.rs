//! Generic alpha-beta search over any game implementing [`GameBoard`].

mod history;
mod search;
mod traits;
mod transposition_table;

#[cfg(test)]
mod tests;

pub use history::PositionHistory;
pub use search::{
    alpha_beta_search, is_mate_score, SearchContext, SearchError, SearchResult, DRAW_SCORE,
    MATE_SCORE,
};
pub use traits::GameBoard;
pub use transposition_table::{BoundType, CacheEntry, PositionCache};
