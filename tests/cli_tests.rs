//! Command-line tests: argument parsing and full runs against temp files.

use std::fs;
use std::path::Path;

use clap::Parser;
use pretty_assertions::assert_eq;
use stereowave::cli::{run, Cli};
use stereowave::dsp::Operation;
use stereowave::engine::{export_wave, import_wave, SampleBuffer, Wave};
use stereowave::WaveError;
use tempfile::tempdir;

fn write_input(path: &Path) -> Wave {
    let samples =
        SampleBuffer::from_channels(vec![100, 200, 300, 400], vec![-100, -200, -300, -400])
            .unwrap();
    let wave = Wave::from_samples(samples).unwrap();
    export_wave(&wave, path).unwrap();
    wave
}

#[test]
fn test_parse_long_operations() {
    let cli = Cli::try_parse_from([
        "stereowave", "-I", "in.wav", "-O", "out.wav", "reverse", "echo", "0.5", "0.3",
    ])
    .unwrap();
    assert_eq!(cli.input.as_deref(), Some(Path::new("in.wav")));
    assert_eq!(cli.output.as_deref(), Some(Path::new("out.wav")));
    assert_eq!(cli.operations, vec!["reverse", "echo", "0.5", "0.3"]);
}

#[test]
fn test_parse_short_operations_after_separator() {
    let cli = Cli::try_parse_from(["stereowave", "--verbose", "--", "-r", "-s", "2"]).unwrap();
    assert_eq!(cli.operations, vec!["-r", "-s", "2"]);
    assert_eq!(cli.log_level(), "debug");
}

#[test]
fn test_log_levels() {
    let quiet = Cli::try_parse_from(["stereowave", "-q"]).unwrap();
    assert_eq!(quiet.log_level(), "error");
    let default = Cli::try_parse_from(["stereowave"]).unwrap();
    assert_eq!(default.log_level(), "info");
    assert!(Cli::try_parse_from(["stereowave", "--verbose", "--quiet"]).is_err());
}

#[test]
fn test_pipeline_conflicts_with_operations() {
    let result = Cli::try_parse_from(["stereowave", "--pipeline", "p.json", "reverse"]);
    assert!(result.is_err());
}

#[test]
fn test_run_file_to_file() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_input(&input);

    let cli = Cli::try_parse_from([
        "stereowave",
        "--input",
        input.to_str().unwrap(),
        "--output",
        output.to_str().unwrap(),
        "flip-channels",
        "speed-change",
        "2",
    ])
    .unwrap();

    let report = run(&cli).unwrap();
    assert_eq!(report.input_samples, 4);
    assert_eq!(report.output_samples, 2);

    let result = import_wave(&output).unwrap();
    assert_eq!(result.samples().left(), &[-100, -300]);
    assert_eq!(result.samples().right(), &[100, 300]);
    assert_eq!(result.header().data_chunk.size, 8);
    assert_eq!(result.header().size, 52);
}

#[test]
fn test_run_with_pipeline_file_and_report() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let pipeline = dir.path().join("pipeline.json");
    let report_path = dir.path().join("report.json");
    let original = write_input(&input);

    fs::write(&pipeline, r#"[{"op": "reverse"}, {"op": "volume", "scale": 2}]"#).unwrap();

    let cli = Cli {
        input: Some(input),
        output: Some(output.clone()),
        pipeline: Some(pipeline),
        show_header: false,
        report: Some(report_path.clone()),
        verbose: false,
        quiet: true,
        operations: Vec::new(),
    };
    let report = run(&cli).unwrap();
    assert_eq!(
        report.operations,
        vec![Operation::Reverse, Operation::Volume { scale: 2.0 }]
    );

    let result = import_wave(&output).unwrap();
    assert_eq!(result.samples().left(), &[800, 600, 400, 200]);
    assert_eq!(result.header(), original.header());

    let json: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    assert_eq!(json["output_samples"], 4);
    assert_eq!(json["operations"][1]["op"], "volume");
    assert_eq!(json["output_sha256"], report.output_sha256.as_str());
}

fn cli_for(input: &Path, output: &Path, operations: &[&str]) -> Cli {
    Cli {
        input: Some(input.to_path_buf()),
        output: Some(output.to_path_buf()),
        pipeline: None,
        show_header: false,
        report: None,
        verbose: false,
        quiet: true,
        operations: operations.iter().map(|s| s.to_string()).collect(),
    }
}

#[test]
fn test_failed_run_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    write_input(&input);

    let err = run(&cli_for(&input, &output, &["reverse", "fade-in", "-1"])).unwrap_err();
    match err.downcast_ref::<WaveError>() {
        Some(WaveError::InvalidOperand { operation, token }) => {
            assert_eq!(operation, "fade-in");
            assert_eq!(token, "-1");
        }
        other => panic!("Expected InvalidOperand, got: {:?}", other),
    }
    assert!(!output.exists());
}

#[test]
fn test_usage_error_reported_before_input_is_read() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.wav");
    let output = dir.path().join("out.wav");

    let err = run(&cli_for(&missing, &output, &["distort"])).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<WaveError>(),
        Some(WaveError::Usage { .. })
    ));
    assert!(!output.exists());
}

#[test]
fn test_invalid_input_writes_nothing() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.wav");
    let output = dir.path().join("out.wav");
    let mut bytes = write_input(&input).to_bytes().unwrap();
    bytes[22..24].copy_from_slice(&1u16.to_le_bytes());
    fs::write(&input, bytes).unwrap();

    let err = run(&cli_for(&input, &output, &["reverse"])).unwrap_err();
    assert_eq!(err.to_string(), "File is not stereo");
    assert!(!output.exists());
}
