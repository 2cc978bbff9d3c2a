pub mod alpha_beta_searcher;
pub mod board;
pub mod chess;
pub mod game;
#[cfg(feature = "instrumentation")]
pub mod instrumentation;
pub mod prelude;
