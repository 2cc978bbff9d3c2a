pub mod packed;
pub mod square;

pub use packed::{PackedBytes, PackedTiles};
