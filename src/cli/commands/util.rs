use ludus::board::side::Side;
use ludus::board::{GameKind, Position};
use ludus::game::config::{Difficulty, EngineConfig};
use ludus::game::engine::{Engine, EngineError};

/// Starts a game and replays `moves` on it, alternating sides.
pub fn create_engine(
    game: GameKind,
    difficulty: Difficulty,
    first: Side,
    moves: &[String],
) -> Result<Engine, EngineError> {
    let config = EngineConfig::for_game(game).with_difficulty(difficulty);
    let position = Position::new_game(game);
    let mut engine = Engine::with_position(config, position, first);
    for input in moves {
        engine.apply_input(input)?;
    }
    Ok(engine)
}
