//! collinear-bench: CLI tool for running collinear detectors on point files.
//!
//! Reads a point set from a text or JSON file, runs the configured detector
//! and prints the segments found along with per-stage diagnostics. Useful for:
//!
//! - Comparing the fast detector against the brute-force oracle
//! - Measuring scan durations and slope comparison counts
//! - Checking a point file for duplicates or malformed input
//!
//! # Usage
//!
//! ```text
//! cargo run --release --bin collinear-bench -- [OPTIONS] <INPUT_PATH>
//! ```

#![allow(clippy::print_stdout, clippy::print_stderr)]

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{Duration, Instant};

use clap::{Parser, ValueEnum};
use collinear_detect::diagnostics::{Clock, DetectionDiagnostics};
use collinear_detect::input::{self, InputFormat};
use collinear_detect::{DetectConfig, DetectorKind, Point};
use log::{debug, info};

/// Collinear point detection with diagnostics.
///
/// Finds every maximal line segment through four or more points of the
/// input and prints per-stage timing and count diagnostics.
#[derive(Parser)]
#[command(name = "collinear-bench", version)]
struct Cli {
    /// Path to the point file (count followed by `x y` pairs, or JSON).
    input_path: PathBuf,

    /// Detection algorithm.
    #[arg(long, value_enum, default_value_t = Detector::Fast)]
    detector: Detector,

    /// Input format. Inferred from the file extension when omitted.
    #[arg(long, value_enum)]
    format: Option<Format>,

    /// Number of runs for averaging.
    #[arg(long, default_value_t = 1, value_parser = clap::builder::RangedU64ValueParser::<usize>::new().range(1..))]
    runs: usize,

    /// Output diagnostics as JSON instead of human-readable report.
    #[arg(long)]
    json: bool,

    /// Do not list the segments found.
    #[arg(long)]
    quiet: bool,

    /// Also run the brute-force detector and compare the segment sets.
    #[arg(long)]
    cross_check: bool,

    /// Full detect config as a JSON string.
    ///
    /// When provided, `--detector` is ignored. The JSON must be a valid
    /// `DetectConfig` serialization.
    #[arg(long)]
    config_json: Option<String>,
}

/// Detector selection.
#[derive(Clone, Copy, ValueEnum)]
enum Detector {
    /// Per-pivot slope sort, O(n^2 log n).
    Fast,
    /// Every quadruple, O(n^4). Only practical for small inputs.
    Brute,
}

/// Input format selection.
#[derive(Clone, Copy, ValueEnum)]
enum Format {
    /// Point count followed by whitespace-separated coordinate pairs.
    Text,
    /// JSON array of `{"x": .., "y": ..}` objects.
    Json,
}

/// Build a [`DetectConfig`] from CLI arguments.
///
/// If `--config-json` is provided, the JSON is parsed directly and
/// `--detector` is ignored.
fn config_from_cli(cli: &Cli) -> Result<DetectConfig, String> {
    if let Some(ref json) = cli.config_json {
        return serde_json::from_str(json).map_err(|e| format!("Error parsing --config-json: {e}"));
    }

    Ok(DetectConfig {
        detector: match cli.detector {
            Detector::Fast => DetectorKind::Fast,
            Detector::Brute => DetectorKind::BruteForce,
        },
    })
}

fn input_format(cli: &Cli) -> InputFormat {
    match cli.format {
        Some(Format::Text) => InputFormat::Text,
        Some(Format::Json) => InputFormat::Json,
        None => InputFormat::from_extension(cli.input_path.extension().and_then(|e| e.to_str())),
    }
}

/// Read and parse the point file.
fn load_points(cli: &Cli) -> Result<Vec<Point>, String> {
    let text = std::fs::read_to_string(&cli.input_path)
        .map_err(|e| format!("Error reading {}: {e}", cli.input_path.display()))?;
    let format = input_format(cli);
    debug!("parsing {} as {format:?}", cli.input_path.display());
    input::parse(&text, format)
        .map_err(|e| format!("Error parsing {}: {e}", cli.input_path.display()))
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let config = match config_from_cli(&cli) {
        Ok(c) => c,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    let points = match load_points(&cli) {
        Ok(points) => points,
        Err(msg) => {
            eprintln!("{msg}");
            return ExitCode::FAILURE;
        }
    };

    eprintln!(
        "Input: {} ({} points)",
        cli.input_path.display(),
        points.len(),
    );
    eprintln!("Config: {config:?}");
    eprintln!("Runs: {}", cli.runs);
    eprintln!();

    let mut all_diagnostics = Vec::with_capacity(cli.runs);

    for run in 0..cli.runs {
        if cli.runs > 1 {
            eprintln!("--- Run {}/{} ---", run + 1, cli.runs);
        }

        match collinear_detect::detect_with_diagnostics(&points, &config, &StdClock) {
            Ok((detection, diagnostics)) => {
                // List segments on the first run only.
                if run == 0 && !cli.quiet {
                    println!("{}", detection.count());
                    for segment in detection.segments() {
                        println!("{segment}");
                    }
                    println!();
                }

                if cli.json {
                    match serde_json::to_string_pretty(&diagnostics) {
                        Ok(json) => println!("{json}"),
                        Err(e) => {
                            eprintln!("Error serializing diagnostics: {e}");
                            return ExitCode::FAILURE;
                        }
                    }
                } else {
                    println!("{}", diagnostics.report());
                }

                all_diagnostics.push(diagnostics);
            }
            Err(e) => {
                eprintln!("Detection error: {e}");
                return ExitCode::FAILURE;
            }
        }

        if cli.runs > 1 {
            eprintln!();
        }
    }

    if cli.runs > 1 {
        print_multi_run_summary(&all_diagnostics);
    }

    if cli.cross_check {
        return run_cross_check(&points);
    }

    ExitCode::SUCCESS
}

/// Compare the fast and brute-force detectors on `points`.
fn run_cross_check(points: &[Point]) -> ExitCode {
    info!("cross-checking {} points", points.len());
    let check = match collinear_detect::cross_check(points) {
        Ok(check) => check,
        Err(e) => {
            eprintln!("Detection error: {e}");
            return ExitCode::FAILURE;
        }
    };

    println!();
    if check.is_consistent() {
        println!("Cross-check: fast and brute-force detectors agree");
        return ExitCode::SUCCESS;
    }

    println!("Cross-check: detectors DISAGREE");
    for segment in &check.only_fast {
        println!("  fast only:  {segment}");
    }
    for segment in &check.only_brute {
        println!("  brute only: {segment}");
    }
    ExitCode::FAILURE
}

/// [`Clock`] implementation backed by [`std::time::Instant`].
struct StdClock;

impl Clock for StdClock {
    type Instant = Instant;

    fn now(&self) -> Instant {
        Instant::now()
    }

    fn elapsed(&self, since: &Instant) -> Duration {
        since.elapsed()
    }
}

/// Function pointer type for extracting a stage duration from diagnostics.
type StageExtractor = fn(&DetectionDiagnostics) -> Duration;

/// Print aggregated statistics across multiple runs.
#[allow(clippy::cast_precision_loss)]
fn print_multi_run_summary(all_diagnostics: &[DetectionDiagnostics]) {
    println!();
    println!(
        "Summary ({} runs)\n{}",
        all_diagnostics.len(),
        "=".repeat(60),
    );

    if all_diagnostics.is_empty() {
        println!("Warning: no diagnostics to summarize");
        return;
    }

    let durations: Vec<f64> = all_diagnostics
        .iter()
        .map(|d| d.total_duration.as_secs_f64() * 1000.0)
        .collect();

    let min = durations.iter().copied().reduce(f64::min).unwrap_or(0.0);
    let max = durations.iter().copied().reduce(f64::max).unwrap_or(0.0);
    let mean = durations.iter().sum::<f64>() / durations.len() as f64;

    println!("Total duration: min={min:.3}ms  mean={mean:.3}ms  max={max:.3}ms");

    println!();
    println!("{:<24} {:>12}", "Stage", "Mean (ms)");
    println!("{}", "-".repeat(40));

    let stage_extractors: &[(&str, StageExtractor)] = &[
        ("Validation", |d| d.validation.duration),
        ("Scan", |d| d.scan.duration),
    ];

    for (name, extractor) in stage_extractors {
        let stage_mean = all_diagnostics
            .iter()
            .map(|d| extractor(d).as_secs_f64() * 1000.0)
            .sum::<f64>()
            / all_diagnostics.len() as f64;
        println!("{name:<24} {stage_mean:>10.3}ms");
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn detector_flag_maps_to_kind() {
        let cli = Cli::parse_from(["collinear-bench", "points.txt", "--detector", "brute"]);
        let config = config_from_cli(&cli).unwrap();
        assert_eq!(config.detector, DetectorKind::BruteForce);
    }

    #[test]
    fn config_json_overrides_detector_flag() {
        let cli = Cli::parse_from([
            "collinear-bench",
            "points.txt",
            "--detector",
            "fast",
            "--config-json",
            r#"{"detector": "BruteForce"}"#,
        ]);
        assert_eq!(config_from_cli(&cli).unwrap().detector, DetectorKind::BruteForce);
    }

    #[test]
    fn bad_config_json_is_reported() {
        let cli = Cli::parse_from(["collinear-bench", "points.txt", "--config-json", "{"]);
        let err = config_from_cli(&cli).unwrap_err();
        assert!(err.starts_with("Error parsing --config-json"));
    }

    #[test]
    fn format_follows_extension_unless_given() {
        let cli = Cli::parse_from(["collinear-bench", "grid.json"]);
        assert_eq!(input_format(&cli), InputFormat::Json);

        let cli = Cli::parse_from(["collinear-bench", "grid.json", "--format", "text"]);
        assert_eq!(input_format(&cli), InputFormat::Text);

        let cli = Cli::parse_from(["collinear-bench", "input8.txt"]);
        assert_eq!(input_format(&cli), InputFormat::Text);
    }

    #[test]
    fn runs_must_be_positive() {
        assert!(Cli::try_parse_from(["collinear-bench", "p.txt", "--runs", "0"]).is_err());
    }
}
