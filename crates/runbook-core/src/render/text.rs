//! Plain-text backend.

use crate::document::{DocumentModel, HeadingLevel, StyleConfig};
use crate::error::RenderError;

use super::{OutputFormat, Renderer};

/// Renders runbooks as plain text, underlining headings with `=` (title)
/// or `-` (sections).
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer;

impl Renderer for TextRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Text
    }

    fn render(&self, model: &DocumentModel, _style: &StyleConfig) -> Result<Vec<u8>, RenderError> {
        let mut out = String::new();
        for section in model.sections() {
            let rule = match section.level {
                HeadingLevel::One => '=',
                HeadingLevel::Two => '-',
            };
            out.push_str(&section.heading);
            out.push('\n');
            out.extend(std::iter::repeat_n(rule, section.heading.chars().count()));
            out.push_str("\n\n");
            if let Some(body) = &section.body {
                out.push_str(body.trim_end());
                out.push_str("\n\n");
            }
        }
        Ok(out.into_bytes())
    }
}
