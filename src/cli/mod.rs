//! CLI Module
//!
//! Command-line interface for stereowave.

pub mod commands;
pub mod report;

use clap::Parser;
use std::path::PathBuf;

pub use commands::{parse_operand, parse_operations, process, run, Outcome};
pub use report::ProcessingReport;

const OPERATIONS_HELP: &str = "\
Operations (applied in the order given):
  reverse                  (-r)  Play the audio backwards
  speed-change <factor>    (-s)  Change speed (2 = twice as fast)
  flip-channels            (-f)  Swap left and right channels
  fade-out <seconds>       (-o)  Quadratic fade-out at the end
  fade-in <seconds>        (-i)  Quadratic fade-in at the start
  volume <scale>           (-v)  Scale the volume, clipping at full scale
  echo <seconds> <scale>   (-e)  Add an echo after a delay

Single-letter forms must follow `--`, e.g. `stereowave -- -r -e 0.5 0.3`.
Operands are non-negative decimals such as 2, 0.5, .25 or 3.";

/// Stereowave - transform 16-bit stereo 44.1kHz WAV files
#[derive(Parser, Debug)]
#[command(name = "stereowave")]
#[command(version, about, long_about = None, after_help = OPERATIONS_HELP)]
pub struct Cli {
    /// Input WAV file (default: stdin)
    #[arg(short = 'I', long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Output WAV file (default: stdout)
    #[arg(short = 'O', long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Read the operations from a JSON pipeline file
    #[arg(long, value_name = "FILE", conflicts_with = "operations")]
    pub pipeline: Option<PathBuf>,

    /// Print the input and output headers to stderr
    #[arg(long)]
    pub show_header: bool,

    /// Write a JSON processing report
    #[arg(long, value_name = "FILE")]
    pub report: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long)]
    pub quiet: bool,

    /// Operations and their operands
    #[arg(value_name = "OPS", trailing_var_arg = true, allow_hyphen_values = true)]
    pub operations: Vec<String>,
}

impl Cli {
    /// Default log filter for the chosen verbosity
    pub fn log_level(&self) -> &'static str {
        if self.quiet {
            "error"
        } else if self.verbose {
            "debug"
        } else {
            "info"
        }
    }
}
