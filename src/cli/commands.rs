//! CLI Command Implementations
//!
//! Turns the operation tokens into a pipeline, runs it over the input and
//! commits the output only once everything has succeeded.

use std::fs::{self, File};
use std::io::{self, BufReader, Read, Write};

use anyhow::Context;
use log::info;

use super::report::ProcessingReport;
use super::Cli;
use crate::dsp::{Operation, Pipeline};
use crate::engine::Wave;
use crate::error::{Result, WaveError};

/// Result of processing one input
#[derive(Debug)]
pub struct Outcome {
    /// Serialized output file
    pub bytes: Vec<u8>,
    pub report: ProcessingReport,
}

/// Run the command line: read, transform, write.
///
/// The pipeline is parsed and validated before any input is read. Nothing
/// is written to the output unless every step succeeds.
pub fn run(cli: &Cli) -> anyhow::Result<ProcessingReport> {
    let pipeline = match &cli.pipeline {
        Some(path) => Pipeline::load(path)
            .with_context(|| format!("Failed to load pipeline {}", path.display()))?,
        None => parse_operations(&cli.operations)?,
    };
    pipeline.validate()?;

    let outcome = match &cli.input {
        Some(path) => {
            info!("Reading {}", path.display());
            let file = File::open(path)
                .with_context(|| format!("Failed to open {}", path.display()))?;
            process(&pipeline, &mut BufReader::new(file), cli.show_header)?
        }
        None => process(&pipeline, &mut io::stdin().lock(), cli.show_header)?,
    };

    match &cli.output {
        Some(path) => fs::write(path, &outcome.bytes)
            .with_context(|| format!("Failed to write {}", path.display()))?,
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(&outcome.bytes)?;
            stdout.flush()?;
        }
    }

    info!(
        "Wrote {} samples ({:.3}s), sha256 {}",
        outcome.report.output_samples,
        outcome.report.output_duration_secs,
        outcome.report.output_sha256
    );

    if let Some(path) = &cli.report {
        outcome
            .report
            .save(path)
            .with_context(|| format!("Failed to write report {}", path.display()))?;
    }

    Ok(outcome.report)
}

/// Load a wave from `reader`, apply the pipeline and serialize the result
pub fn process<R: Read>(pipeline: &Pipeline, reader: &mut R, show_header: bool) -> Result<Outcome> {
    let mut wave = Wave::load(reader)?;
    let input_header = *wave.header();
    let input_samples = wave.num_samples();

    if show_header {
        eprintln!("\nInput Wave Header Information\n\n{}\n", input_header);
    }

    pipeline.apply(&mut wave)?;

    if show_header {
        eprintln!("\nOutput Wave Header Information\n\n{}\n", wave.header());
    }

    let bytes = wave.to_bytes()?;
    let report = ProcessingReport::new(
        input_header,
        input_samples,
        &wave,
        pipeline.operations(),
        &bytes,
    );
    Ok(Outcome { bytes, report })
}

/// Parse operation tokens into a pipeline, preserving their order
///
/// Accepts the long names (`reverse`, `speed-change 2`, ...) and the
/// single-letter forms (`-r`, `-s 2`, ...).
///
/// # Errors
/// * `Usage` - Unknown operation or missing operand
/// * `InvalidOperand` - Operand is not a non-negative decimal
pub fn parse_operations<S: AsRef<str>>(tokens: &[S]) -> Result<Pipeline> {
    let mut pipeline = Pipeline::new();
    let mut tokens = tokens.iter().map(AsRef::<str>::as_ref);

    while let Some(token) = tokens.next() {
        let mut operand = |name: &str| -> Result<f64> {
            let value = tokens
                .next()
                .ok_or_else(|| WaveError::usage(format!("{} requires a value", name)))?;
            parse_operand(name, value)
        };

        let operation = match token {
            "reverse" | "-r" => Operation::Reverse,
            "speed-change" | "-s" => Operation::SpeedChange {
                factor: operand("speed-change")?,
            },
            "flip-channels" | "-f" => Operation::FlipChannels,
            "fade-out" | "-o" => Operation::FadeOut {
                seconds: operand("fade-out")?,
            },
            "fade-in" | "-i" => Operation::FadeIn {
                seconds: operand("fade-in")?,
            },
            "volume" | "-v" => Operation::Volume {
                scale: operand("volume")?,
            },
            "echo" | "-e" => {
                let delay = operand("echo")?;
                let scale = operand("echo")?;
                Operation::Echo { delay, scale }
            }
            other => {
                return Err(WaveError::usage(format!("unknown operation '{}'", other)));
            }
        };
        pipeline.push(operation);
    }

    Ok(pipeline)
}

/// Parse a non-negative decimal operand
///
/// Accepted forms are digits with at most one decimal point and at least
/// one digit: `12`, `12.`, `.5`, `12.5`. Signs, exponents and anything else
/// are rejected.
pub fn parse_operand(operation: &str, token: &str) -> Result<f64> {
    let invalid = || WaveError::InvalidOperand {
        operation: operation.to_string(),
        token: token.to_string(),
    };

    let digits = token.bytes().filter(u8::is_ascii_digit).count();
    let dots = token.bytes().filter(|&b| b == b'.').count();
    if digits == 0 || dots > 1 || digits + dots != token.len() {
        return Err(invalid());
    }

    token.parse::<f64>().map_err(|_| invalid())
}
