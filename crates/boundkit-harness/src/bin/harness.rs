//! CLI entrypoint for the boundkit conformance harness.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use boundkit_harness::HarnessError;
use boundkit_harness::strategy_matrix::build_strategy_matrix;
use boundkit_harness::structured_log::{ArtifactIndex, validate_log_file};

/// Conformance tooling for boundkit.
#[derive(Debug, Parser)]
#[command(name = "boundkit-harness")]
#[command(about = "Conformance testing harness for boundkit")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the bit-ceiling strategy equivalence sweep and emit the matrix report.
    Sweep {
        /// Output report path (JSON). If omitted, prints to stdout.
        #[arg(long)]
        output: Option<PathBuf>,
        /// Optional path for an artifact index carrying the report digest.
        #[arg(long)]
        artifact_index: Option<PathBuf>,
        /// Run identifier recorded in the artifact index.
        #[arg(long, default_value = "local")]
        run_id: String,
    },
    /// Validate a structured JSONL log file against the schema.
    ValidateLog {
        /// Structured JSONL log path.
        #[arg(long)]
        log: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Sweep {
            output,
            artifact_index,
            run_id,
        } => match run_sweep(output.as_deref(), artifact_index.as_deref(), &run_id) {
            Ok(true) => ExitCode::SUCCESS,
            Ok(false) => ExitCode::FAILURE,
            Err(err) => {
                eprintln!("sweep: {err}");
                ExitCode::FAILURE
            }
        },
        Command::ValidateLog { log } => run_validate_log(&log),
    }
}

/// Runs the sweep; returns whether every case passed.
fn run_sweep(
    output: Option<&Path>,
    artifact_index: Option<&Path>,
    run_id: &str,
) -> Result<bool, HarnessError> {
    let report = build_strategy_matrix();
    let json = serde_json::to_string_pretty(&report)?;

    match output {
        Some(path) => std::fs::write(path, &json)?,
        None => println!("{json}"),
    }

    if let Some(index_path) = artifact_index {
        let mut index = ArtifactIndex::new(run_id);
        let report_path =
            output.map_or_else(|| "<stdout>".to_string(), |p| p.display().to_string());
        index.add(report_path, "strategy-matrix", json.as_bytes());
        std::fs::write(index_path, index.to_json()?)?;
    }

    if !report.all_passed() {
        eprintln!(
            "sweep: {} of {} cases diverged",
            report.summary.failed, report.summary.total_cases
        );
    }
    Ok(report.all_passed())
}

fn run_validate_log(log: &Path) -> ExitCode {
    match validate_log_file(log) {
        Ok((lines, errors)) if errors.is_empty() => {
            println!("{lines} lines valid");
            ExitCode::SUCCESS
        }
        Ok((lines, errors)) => {
            eprintln!("{} errors across {lines} lines", errors.len());
            for err in errors {
                eprintln!("  {err}");
            }
            ExitCode::FAILURE
        }
        Err(err) => {
            eprintln!("validate-log: failed to read {}: {err}", log.display());
            ExitCode::FAILURE
        }
    }
}
