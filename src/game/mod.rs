//! Game orchestration: engine configuration, the engine that plays a game and
//! position counting.

pub mod config;
pub mod engine;
pub mod position_counter;
