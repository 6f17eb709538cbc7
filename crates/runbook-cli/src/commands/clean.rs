//! Clean command implementation.
//!
//! Removes runbooks generated with a given base name: files named
//! `{base}_*` with a runbook extension. Nothing else in the directory is
//! touched.

use std::io::Write;
use std::path::{Path, PathBuf};

use runbook_core::OutputFormat as DocumentFormat;
use runbook_core::naming::sanitize;
use tracing::info;

use crate::cli::CleanArgs;
use crate::error::CliError;
use crate::output::{CleanSummary, OutputFormat};

/// Handler for the clean command.
#[derive(Debug, Default)]
pub struct CleanCommand;

impl CleanCommand {
    /// Creates a new clean command handler.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Executes the clean command.
    ///
    /// # Errors
    ///
    /// Returns error if the directory cannot be read or a file cannot be
    /// removed.
    pub async fn execute<W: Write>(
        &self,
        out: &mut W,
        format: &OutputFormat,
        args: &CleanArgs,
    ) -> Result<(), CliError> {
        if args.base_name.trim().is_empty() {
            return Err(CliError::InvalidArgument(
                "--base-name cannot be empty".to_string(),
            ));
        }

        let removed = generated_runbooks(&args.out_dir, &args.base_name)?;
        if !args.dry_run {
            for path in &removed {
                std::fs::remove_file(path)?;
                info!(path = %path.display(), "removed runbook");
            }
        }

        format.write(
            out,
            &CleanSummary {
                removed,
                dry_run: args.dry_run,
            },
        )?;
        Ok(())
    }
}

/// Lists runbook files in `dir` generated with `base_name`, sorted by path.
///
/// A missing directory holds no runbooks.
///
/// # Errors
///
/// Returns `CliError::Io` if the directory cannot be read.
pub fn generated_runbooks(dir: &Path, base_name: &str) -> Result<Vec<PathBuf>, CliError> {
    if !dir.exists() {
        return Ok(Vec::new());
    }

    let prefix = format!("{}_", sanitize(base_name.trim()));
    let mut found = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        let name_matches = path
            .file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.starts_with(&prefix));
        let ext_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .and_then(DocumentFormat::from_extension)
            .is_some();
        if name_matches && ext_matches {
            found.push(path);
        }
    }
    found.sort();
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_only_generated_runbooks() {
        let dir = tempfile::tempdir().unwrap();
        for name in [
            "rules_A.md",
            "rules_B.html",
            "rules_C.txt",
            "rules.yaml",
            "rules_notes.docx",
            "other_A.md",
            "README.md",
        ] {
            std::fs::write(dir.path().join(name), "x").unwrap();
        }
        std::fs::create_dir(dir.path().join("rules_dir.md")).unwrap();

        let found = generated_runbooks(dir.path(), "rules").unwrap();
        let names: Vec<_> = found
            .iter()
            .filter_map(|p| p.file_name().and_then(|n| n.to_str()))
            .collect();
        assert_eq!(names, ["rules_A.md", "rules_B.html", "rules_C.txt"]);
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let found = generated_runbooks(&dir.path().join("nope"), "rules").unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn base_name_is_sanitized_like_generation() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("prod_rules_A.md"), "x").unwrap();
        let found = generated_runbooks(dir.path(), "prod rules").unwrap();
        assert_eq!(found.len(), 1);
    }
}
