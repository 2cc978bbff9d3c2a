//! Best move command - print the computer's choice in a given game.

use ludus::board::side::Side;
use ludus::board::GameKind;
use ludus::game::config::Difficulty;
use structopt::StructOpt;

use super::util::create_engine;
use super::Command;

#[derive(StructOpt)]
pub struct BestMoveArgs {
    #[structopt(short, long, default_value = "chess")]
    pub game: GameKind,
    #[structopt(short, long, default_value = "4")]
    pub difficulty: Difficulty,
    #[structopt(long = "first", default_value = "human", help = "computer, human or random")]
    pub first: Side,
    #[structopt(long = "moves", help = "Moves played so far, e.g. `e2e4 e7e5` or `4 0`")]
    pub moves: Vec<String>,
}

impl Command for BestMoveArgs {
    fn execute(self) {
        let mut engine =
            match create_engine(self.game, self.difficulty, self.first, &self.moves) {
                Ok(engine) => engine,
                Err(err) => {
                    eprintln!("Failed to replay moves: {}", err);
                    std::process::exit(1);
                }
            };

        match engine.get_best_move() {
            Ok(best_move) => println!("{}", engine.position().describe_move(best_move)),
            Err(err) => eprintln!("Failed to calculate best move: {}", err),
        }
    }
}
