//! CLI argument parsing using StructOpt.

use structopt::StructOpt;

use crate::cli::commands::{
    best_move::BestMoveArgs, count_positions::CountPositionsArgs, watch::WatchArgs,
};

#[derive(StructOpt)]
#[structopt(
    name = "ludus",
    about = "An alpha-beta game engine for tic-tac-toe, four-in-a-row, othello and chess"
)]
pub enum Ludus {
    #[structopt(
        name = "best-move",
        about = "Print the computer's move after replaying the given `--moves` from the start of a `--game` (default: chess). The human moves first unless `--first` says otherwise. The search depth follows `--difficulty` (1-5, default: 4)."
    )]
    BestMove(BestMoveArgs),
    #[structopt(
        name = "watch",
        about = "Watch the computer play both sides of a `--game` (default: chess) at the given `--difficulty` (default: 4), for at most `--moves` plies (default: 200)."
    )]
    Watch(WatchArgs),
    #[structopt(
        name = "count-positions",
        about = "Count the number of possible positions of a `--game` (default: chess) for each depth up to `--depth` (default: 4), and report the time it took to do so. By default, this searches all possible positions. The routine can be run with alpha-beta pruning by selecting `--strategy alpha-beta`."
    )]
    CountPositions(CountPositionsArgs),
}

impl crate::cli::commands::Command for Ludus {
    fn execute(self) {
        macro_rules! execute_command {
            ($($variant:ident($cmd:ident)),+ $(,)?) => {
                match self {
                    $(Self::$variant($cmd) => $cmd.execute(),)+
                }
            };
        }

        execute_command! {
            BestMove(cmd),
            Watch(cmd),
            CountPositions(cmd),
        }
    }
}
