//! Conformance tooling for boundkit.
//!
//! Two concerns live here:
//! - [`strategy_matrix`]: holds every compiled bit-ceiling strategy to the
//!   bit-identical-output contract over a swept input corpus and emits a
//!   machine-readable matrix report.
//! - [`structured_log`]: structured JSONL log records with an
//!   SHA-256-integrity artifact index, for test and CI workflows.

use thiserror::Error;

pub mod strategy_matrix;
pub mod structured_log;

/// Errors surfaced by harness operations.
#[derive(Debug, Error)]
pub enum HarnessError {
    #[error("i/o failure: {0}")]
    Io(#[from] std::io::Error),
    #[error("serialization failure: {0}")]
    Serialize(#[from] serde_json::Error),
}
