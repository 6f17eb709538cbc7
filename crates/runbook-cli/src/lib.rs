//! # runbook-cli
//!
//! Command-line front end for `runbook-core`.
//!
//! Provides commands for:
//! - Generating one runbook per alert rule into an output directory
//! - Validating rule files
//! - Inspecting the runbooks a rule file would produce
//! - Cleaning previously generated runbooks
//!
//! ```text
//! rules.yaml ──► runbookgen generate ──► out/rules_DiskFull.md
//!                                        out/rules_HighCPU.md
//!                                        ...
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;

pub use cli::{Cli, Commands, DocFormat, Format};
pub use error::CliError;
pub use output::OutputFormat;
