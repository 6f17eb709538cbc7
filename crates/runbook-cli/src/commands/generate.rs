//! Generate command implementation.
//!
//! Reads a rule file, runs a conversion and writes one file per runbook into
//! the output directory. Runbooks that rendered are written even when others
//! failed; the failures are listed and turn into a non-zero exit.

use std::io::Write;
use std::path::Path;

use runbook_core::{Conversion, RenderedArtifact};
use tracing::info;

use crate::cli::GenerateArgs;
use crate::config::{base_name_for, load_style};
use crate::error::CliError;
use crate::output::{FailedRunbook, GenerateSummary, OutputFormat, WrittenRunbook};

/// Handler for the generate command.
#[derive(Debug, Default)]
pub struct GenerateCommand;

impl GenerateCommand {
    /// Creates a new generate command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Executes the generate command.
    ///
    /// # Errors
    ///
    /// Returns error if the rule file is invalid, a runbook cannot be written,
    /// or any runbook failed to render.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &GenerateArgs,
    ) -> Result<(), CliError> {
        let input = std::fs::read(&args.file)?;
        let base_name = base_name_for(&args.file, args.base_name.as_deref());

        let mut conversion = Conversion::new(&base_name).with_format(args.format.into());
        if let Some(path) = &args.style {
            conversion = conversion.with_style(load_style(path)?);
        }

        let report = if args.concurrent {
            conversion.run_concurrent(&input).await?
        } else {
            conversion.run(&input)?
        };

        let written = write_runbooks(&args.out_dir, &report.rendered, args.force)?;
        let summary = GenerateSummary {
            out_dir: args.out_dir.clone(),
            format: conversion.format().to_string(),
            written,
            failures: report
                .failures
                .iter()
                .map(|f| FailedRunbook {
                    name: f.name.clone(),
                    error: f.error.to_string(),
                })
                .collect(),
        };
        format.write(out, &summary)?;

        if report.is_complete() {
            Ok(())
        } else {
            Err(CliError::RenderFailures {
                failed: report.failures.len(),
                total: report.total(),
            })
        }
    }
}

/// Writes rendered runbooks into `out_dir`, creating it if needed.
///
/// Unless `force` is set, nothing is written if any target file exists.
///
/// # Errors
///
/// Returns `CliError::AlreadyExists` for the first existing target, or
/// `CliError::Io` if a file cannot be written.
pub fn write_runbooks(
    out_dir: &Path,
    rendered: &[RenderedArtifact],
    force: bool,
) -> Result<Vec<WrittenRunbook>, CliError> {
    std::fs::create_dir_all(out_dir)?;

    if !force {
        if let Some(existing) = rendered
            .iter()
            .map(|r| out_dir.join(&r.file_name))
            .find(|path| path.exists())
        {
            return Err(CliError::AlreadyExists(existing));
        }
    }

    rendered
        .iter()
        .map(|runbook| -> Result<WrittenRunbook, CliError> {
            let path = out_dir.join(&runbook.file_name);
            std::fs::write(&path, &runbook.content)?;
            info!(path = %path.display(), bytes = runbook.content.len(), "wrote runbook");
            Ok(WrittenRunbook {
                name: runbook.name.clone(),
                path,
                bytes: runbook.content.len(),
            })
        })
        .collect()
}
