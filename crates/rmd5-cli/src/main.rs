use rmd5_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible.
    logging::init_logging();

    // Parse CLI and run.
    if let Err(err) = Cli::run_from_args() {
        eprintln!("rmd5 error: {:#}", err);
        std::process::exit(1);
    }
}
