mod cli;

use cli::commands::Command;
use cli::Ludus;
use structopt::StructOpt;

fn main() {
    env_logger::init();

    #[cfg(feature = "instrumentation")]
    ludus::instrumentation::init_tracing();

    Ludus::from_args().execute();

    #[cfg(feature = "instrumentation")]
    ludus::instrumentation::print_timing_statistics();
}
