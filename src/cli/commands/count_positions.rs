//! Count positions command - count possible positions at a given depth.

use ludus::board::side::Side;
use ludus::board::GameKind;
use ludus::game::position_counter::{run_count_positions, CountPositionsStrategy};
use structopt::StructOpt;

use super::Command;

#[derive(StructOpt)]
pub struct CountPositionsArgs {
    #[structopt(short, long, default_value = "chess")]
    pub game: GameKind,
    #[structopt(short, long, default_value = "4")]
    pub depth: u8,
    #[structopt(short, long, default_value = "all")]
    pub strategy: CountPositionsStrategy,
    #[structopt(long = "first", default_value = "human", help = "computer, human or random")]
    pub first: Side,
}

impl Command for CountPositionsArgs {
    fn execute(self) {
        run_count_positions(self.game, self.depth, self.strategy, self.first);
    }
}
