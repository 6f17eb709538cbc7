//! Loading of style files and derivation of base names.

use std::path::Path;

use runbook_core::StyleConfig;
use tracing::debug;

use crate::error::CliError;

/// Loads a style table from a JSON (`.json`) or YAML file.
///
/// Missing keys fall back to the default sizes.
///
/// # Errors
///
/// Returns `CliError::Io` if the file cannot be read and `CliError::Config`
/// if it cannot be decoded or holds out-of-range sizes.
pub fn load_style(path: &Path) -> Result<StyleConfig, CliError> {
    let text = std::fs::read_to_string(path)?;
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let style: StyleConfig = if is_json {
        serde_json::from_str(&text)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?
    } else {
        serde_yaml::from_str(&text)
            .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?
    };

    style
        .validate()
        .map_err(|e| CliError::Config(format!("{}: {e}", path.display())))?;
    debug!(path = %path.display(), ?style, "loaded style");
    Ok(style)
}

/// The base name for runbooks generated from `file`: `explicit` if given,
/// otherwise the file stem.
#[must_use]
pub fn base_name_for(file: &Path, explicit: Option<&str>) -> String {
    if let Some(name) = explicit {
        return name.to_string();
    }
    file.file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use test_case::test_case;

    #[test_case("rules/node.yaml", None, "node" ; "file stem")]
    #[test_case("alerts.rules.yml", None, "alerts.rules" ; "inner dot kept")]
    #[test_case("node.yaml", Some("prod"), "prod" ; "explicit wins")]
    fn base_names(file: &str, explicit: Option<&str>, expected: &str) {
        assert_eq!(base_name_for(&PathBuf::from(file), explicit), expected);
    }

    #[test]
    fn load_json_style() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        std::fs::write(&path, r#"{"title_size": 20, "note_size": 9}"#).unwrap();

        let style = load_style(&path).unwrap();
        assert_eq!(style.title_size, 20);
        assert_eq!(style.note_size, 9);
        assert_eq!(style.heading_size, StyleConfig::default().heading_size);
    }

    #[test]
    fn load_yaml_style() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.yaml");
        std::fs::write(&path, "heading_size: 13\nbody_size: 10\n").unwrap();

        let style = load_style(&path).unwrap();
        assert_eq!(style.heading_size, 13);
        assert_eq!(style.body_size, 10);
    }

    #[test]
    fn out_of_range_style_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("style.json");
        std::fs::write(&path, r#"{"body_size": 0}"#).unwrap();

        assert!(matches!(load_style(&path), Err(CliError::Config(_))));
    }

    #[test]
    fn missing_style_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_style(&dir.path().join("missing.json"));
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
