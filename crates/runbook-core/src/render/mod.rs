//! Document renderers.
//!
//! This module provides the [`Renderer`] trait, which turns a
//! [`DocumentModel`] into the bytes of a concrete file format, and the
//! built-in backends:
//! - [`MarkdownRenderer`]
//! - [`HtmlRenderer`]
//! - [`TextRenderer`]
//! - [`JsonRenderer`]
//!
//! The rest of the crate only depends on the trait, never on a format.

mod html;
mod json;
mod markdown;
mod text;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::document::{DocumentModel, StyleConfig};
use crate::error::RenderError;

pub use html::HtmlRenderer;
pub use json::JsonRenderer;
pub use markdown::MarkdownRenderer;
pub use text::TextRenderer;

/// Output formats of the built-in renderers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// CommonMark.
    #[default]
    Markdown,
    /// Standalone HTML page with inline font sizes.
    Html,
    /// Plain text with underlined headings.
    Text,
    /// The document model itself, as JSON.
    Json,
}

impl OutputFormat {
    /// All built-in formats.
    pub const ALL: [Self; 4] = [Self::Markdown, Self::Html, Self::Text, Self::Json];

    /// Returns the format as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Html => "html",
            Self::Text => "text",
            Self::Json => "json",
        }
    }

    /// The file extension for this format, without the dot.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Markdown => "md",
            Self::Html => "html",
            Self::Text => "txt",
            Self::Json => "json",
        }
    }

    /// Looks a format up by file extension.
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.extension().eq_ignore_ascii_case(ext))
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            "text" | "txt" => Ok(Self::Text),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}

/// Converts a document model into bytes of one output format.
///
/// Implementations must not retain the model after `render` returns.
pub trait Renderer: Send + Sync + fmt::Debug {
    /// The format this renderer produces.
    fn format(&self) -> OutputFormat;

    /// Renders `model` using the point sizes in `style`.
    ///
    /// # Errors
    ///
    /// Returns a `RenderError` if the document cannot be encoded.
    fn render(&self, model: &DocumentModel, style: &StyleConfig) -> Result<Vec<u8>, RenderError>;

    /// The file extension of rendered output.
    fn extension(&self) -> &'static str {
        self.format().extension()
    }
}

/// Returns the built-in renderer for `format`.
#[must_use]
pub fn renderer_for(format: OutputFormat) -> Box<dyn Renderer> {
    match format {
        OutputFormat::Markdown => Box::new(MarkdownRenderer),
        OutputFormat::Html => Box::new(HtmlRenderer),
        OutputFormat::Text => Box::new(TextRenderer),
        OutputFormat::Json => Box::new(JsonRenderer::default()),
    }
}
