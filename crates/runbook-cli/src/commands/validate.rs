//! Validate command implementation.

use std::io::Write;

use runbook_core::parser;

use crate::cli::ValidateArgs;
use crate::error::CliError;
use crate::output::{GroupSummary, OutputFormat, ValidationSummary};

/// Handler for the validate command.
#[derive(Debug, Default)]
pub struct ValidateCommand;

impl ValidateCommand {
    /// Creates a new validate command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Executes the validate command.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or fails validation.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &ValidateArgs,
    ) -> Result<(), CliError> {
        let input = std::fs::read(&args.file)?;
        let rule_set = parser::parse(&input)?;

        let summary = ValidationSummary {
            file: args.file.clone(),
            groups: rule_set
                .groups()
                .iter()
                .map(|g| GroupSummary {
                    name: g.name().to_string(),
                    rules: g.rules().len(),
                })
                .collect(),
            total_rules: rule_set.rule_count(),
        };
        format.write(out, &summary)?;
        Ok(())
    }
}
