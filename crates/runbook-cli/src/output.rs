//! Output formatting for CLI commands.
//!
//! Supports table (human-readable) and JSON output formats.

use std::io::Write;
use std::path::PathBuf;

use serde::Serialize;

use crate::cli::Format;
use crate::error::CliError;

/// Output formatter that handles both table and JSON output.
#[derive(Debug, Clone)]
pub struct OutputFormat {
    format: Format,
}

impl OutputFormat {
    /// Create a new output formatter.
    #[must_use]
    pub const fn new(format: Format) -> Self {
        Self { format }
    }

    /// Write a serializable value to the output.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or writing fails.
    pub fn write<W, T>(&self, writer: &mut W, value: &T) -> Result<(), CliError>
    where
        W: Write,
        T: Serialize + TableDisplay,
    {
        match self.format {
            Format::Json => {
                serde_json::to_writer_pretty(&mut *writer, value)
                    .map_err(|e| CliError::Format(format!("JSON serialization failed: {e}")))?;
                writeln!(writer)?;
            }
            Format::Table => {
                value.write_table(writer)?;
            }
        }
        Ok(())
    }

    /// Write a serializable value to a string.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_string<T>(&self, value: &T) -> Result<String, CliError>
    where
        T: Serialize + TableDisplay,
    {
        let mut buf = Vec::new();
        self.write(&mut buf, value)?;
        String::from_utf8(buf).map_err(|e| CliError::Format(format!("UTF-8 error: {e}")))
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::new(Format::Table)
    }
}

/// Trait for types that can be displayed as a table.
pub trait TableDisplay {
    /// Write the value as a human-readable table.
    ///
    /// # Errors
    ///
    /// Returns an error if writing fails.
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError>;
}

/// Result of a generate run.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateSummary {
    /// Directory the runbooks were written to.
    pub out_dir: PathBuf,
    /// Document format.
    pub format: String,
    /// Written runbooks.
    pub written: Vec<WrittenRunbook>,
    /// Runbooks that failed to render.
    pub failures: Vec<FailedRunbook>,
}

/// A runbook written to disk.
#[derive(Debug, Clone, Serialize)]
pub struct WrittenRunbook {
    /// Artifact name.
    pub name: String,
    /// Path of the written file.
    pub path: PathBuf,
    /// Size in bytes.
    pub bytes: usize,
}

/// A runbook that failed to render.
#[derive(Debug, Clone, Serialize)]
pub struct FailedRunbook {
    /// Artifact name.
    pub name: String,
    /// Renderer error message.
    pub error: String,
}

impl TableDisplay for GenerateSummary {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{:<48}  {:>8}  PATH", "RUNBOOK", "BYTES")?;
        writeln!(writer, "{}", "─".repeat(80))?;
        for runbook in &self.written {
            writeln!(
                writer,
                "{:<48}  {:>8}  {}",
                truncate(&runbook.name, 48),
                runbook.bytes,
                runbook.path.display()
            )?;
        }
        writeln!(writer)?;
        writeln!(
            writer,
            "Wrote {} {} runbook(s) to {}",
            self.written.len(),
            self.format,
            self.out_dir.display()
        )?;

        if !self.failures.is_empty() {
            writeln!(writer)?;
            writeln!(writer, "Failed ({}):", self.failures.len())?;
            for failure in &self.failures {
                writeln!(writer, "  {}: {}", failure.name, failure.error)?;
            }
        }
        Ok(())
    }
}

/// Result of validating a rule file.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationSummary {
    /// The rule file.
    pub file: PathBuf,
    /// Groups with their rule counts.
    pub groups: Vec<GroupSummary>,
    /// Total rules across all groups.
    pub total_rules: usize,
}

/// Rule count of one group.
#[derive(Debug, Clone, Serialize)]
pub struct GroupSummary {
    /// Group name.
    pub name: String,
    /// Number of rules.
    pub rules: usize,
}

impl TableDisplay for ValidationSummary {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        writeln!(writer, "{} is valid", self.file.display())?;
        writeln!(writer)?;
        writeln!(writer, "{:<40}  {:>6}", "GROUP", "RULES")?;
        writeln!(writer, "{}", "─".repeat(48))?;
        for group in &self.groups {
            writeln!(writer, "{:<40}  {:>6}", truncate(&group.name, 40), group.rules)?;
        }
        writeln!(writer)?;
        writeln!(
            writer,
            "Total: {} group(s), {} rule(s)",
            self.groups.len(),
            self.total_rules
        )?;
        Ok(())
    }
}

/// Runbooks that would be generated.
#[derive(Debug, Clone, Serialize)]
pub struct InspectPlan {
    /// Planned runbooks in generation order.
    pub runbooks: Vec<PlannedRunbook>,
}

/// One planned runbook.
#[derive(Debug, Clone, Serialize)]
pub struct PlannedRunbook {
    /// Artifact name.
    pub name: String,
    /// Group of the rule.
    pub group: String,
    /// Alert name of the rule.
    pub alert: String,
    /// Section outline.
    pub sections: Vec<SectionOutline>,
}

/// Outline entry of one section.
#[derive(Debug, Clone, Serialize)]
pub struct SectionOutline {
    /// Heading level.
    pub level: u8,
    /// Heading text.
    pub heading: String,
    /// Heading point size.
    pub size: u16,
    /// True for headings left to fill in manually.
    pub placeholder: bool,
}

impl TableDisplay for InspectPlan {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        for runbook in &self.runbooks {
            writeln!(writer, "{}", runbook.name)?;
            for section in &runbook.sections {
                let indent = if section.level == 1 { "  " } else { "    " };
                let marker = if section.placeholder { "  (to fill in)" } else { "" };
                writeln!(
                    writer,
                    "{indent}{} [{}pt]{marker}",
                    section.heading, section.size
                )?;
            }
            writeln!(writer)?;
        }
        writeln!(writer, "Total: {} runbook(s)", self.runbooks.len())?;
        Ok(())
    }
}

/// Result of cleaning an output directory.
#[derive(Debug, Clone, Serialize)]
pub struct CleanSummary {
    /// Files removed (or that would be removed).
    pub removed: Vec<PathBuf>,
    /// Whether this was a dry run.
    pub dry_run: bool,
}

impl TableDisplay for CleanSummary {
    fn write_table<W: Write>(&self, writer: &mut W) -> Result<(), CliError> {
        let verb = if self.dry_run { "Would remove" } else { "Removed" };
        for path in &self.removed {
            writeln!(writer, "{verb} {}", path.display())?;
        }
        writeln!(writer, "{verb} {} runbook(s)", self.removed.len())?;
        Ok(())
    }
}

/// Truncate a string to a maximum length, adding ellipsis if needed.
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{kept}...")
    }
}
