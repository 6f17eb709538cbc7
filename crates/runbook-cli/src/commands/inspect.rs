//! Inspect command implementation.
//!
//! Shows the runbooks a generate run would produce, with their names and
//! section outlines, without rendering or writing anything.

use std::io::Write;

use runbook_core::{Artifact, Conversion};

use crate::cli::InspectArgs;
use crate::config::base_name_for;
use crate::error::CliError;
use crate::output::{InspectPlan, OutputFormat, PlannedRunbook, SectionOutline};

/// Handler for the inspect command.
#[derive(Debug, Default)]
pub struct InspectCommand;

impl InspectCommand {
    /// Creates a new inspect command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Executes the inspect command.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or fails validation.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &InspectArgs,
    ) -> Result<(), CliError> {
        let input = std::fs::read(&args.file)?;
        let base_name = base_name_for(&args.file, args.base_name.as_deref());
        let artifacts = Conversion::new(&base_name).plan(&input)?;

        let plan = InspectPlan {
            runbooks: artifacts.iter().map(planned).collect(),
        };
        format.write(out, &plan)?;
        Ok(())
    }
}

fn planned(artifact: &Artifact) -> PlannedRunbook {
    PlannedRunbook {
        name: artifact.name().to_string(),
        group: artifact.group().to_string(),
        alert: artifact.alert().to_string(),
        sections: artifact
            .model()
            .sections()
            .iter()
            .map(|s| SectionOutline {
                level: s.level.as_u8(),
                heading: s.heading.clone(),
                size: s.emphasis_size,
                placeholder: s.is_placeholder(),
            })
            .collect(),
    }
}
