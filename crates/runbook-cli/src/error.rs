//! CLI error types.

use std::path::PathBuf;

use runbook_core::{RunbookError, ValidationError};
use thiserror::Error;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// The rule file failed validation.
    #[error("invalid rule file: {0}")]
    Validation(#[from] ValidationError),
    /// The conversion run aborted.
    #[error("conversion failed: {0}")]
    Runbook(#[from] RunbookError),
    /// Some artifacts could not be rendered.
    #[error("{failed} of {total} runbook(s) failed to render")]
    RenderFailures {
        /// Number of failed artifacts.
        failed: usize,
        /// Number of artifacts attempted.
        total: usize,
    },
    /// Refusing to overwrite an existing file.
    #[error("{} already exists (use --force to overwrite)", .0.display())]
    AlreadyExists(PathBuf),
    /// Invalid configuration.
    #[error("configuration error: {0}")]
    Config(String),
    /// Output formatting error.
    #[error("format error: {0}")]
    Format(String),
    /// Invalid argument.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
    /// IO error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
