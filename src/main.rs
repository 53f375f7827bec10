//! Stereowave CLI
//!
//! Reads a WAV file from stdin (or `--input`), applies the requested
//! operations in order and writes the result to stdout (or `--output`).

use clap::Parser;
use env_logger::Env;

use stereowave::cli::{self, Cli};

fn main() {
    let cli = Cli::parse();

    env_logger::Builder::from_env(Env::default().default_filter_or(cli.log_level())).init();

    if let Err(err) = cli::run(&cli) {
        eprintln!("Error: {:#}", err);
        std::process::exit(1);
    }
}
