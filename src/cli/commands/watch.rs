//! Watch command - watch the computer play against itself.

use ludus::board::side::Side;
use ludus::board::GameKind;
use ludus::game::config::Difficulty;
use ludus::game::engine::GameOutcome;
use structopt::StructOpt;

use super::util::create_engine;
use super::Command;

#[derive(StructOpt)]
pub struct WatchArgs {
    #[structopt(short, long, default_value = "chess")]
    pub game: GameKind,
    #[structopt(short, long, default_value = "4")]
    pub difficulty: Difficulty,
    #[structopt(long = "moves", default_value = "200", help = "Maximum number of plies to play")]
    pub max_moves: usize,
    #[structopt(long = "first", default_value = "human", help = "computer, human or random")]
    pub first: Side,
}

impl Command for WatchArgs {
    fn execute(self) {
        let mut engine = match create_engine(self.game, self.difficulty, self.first, &[]) {
            Ok(engine) => engine,
            Err(err) => {
                eprintln!("Failed to start game: {}", err);
                std::process::exit(1);
            }
        };

        println!("{}", engine.position());
        for ply in 1..=self.max_moves {
            if engine.is_game_over() {
                break;
            }
            let side = engine.side_to_move();
            let position = *engine.position();
            match engine.make_best_move() {
                Ok(best_move) => {
                    let stats = engine.get_search_stats();
                    println!(
                        "{}. {} plays {} (depth {}, {} positions)",
                        ply,
                        side,
                        position.describe_move(best_move),
                        stats.depth,
                        stats.positions_searched
                    );
                    println!("{}", engine.position());
                }
                Err(err) => {
                    eprintln!("{} could not move: {}", side, err);
                    return;
                }
            }
        }

        match engine.outcome() {
            Some(GameOutcome::Won(side)) => println!("{} wins", side),
            Some(GameOutcome::Draw) => println!("draw"),
            None => println!("stopped after {} moves", self.max_moves),
        }
    }
}
