//! Markdown backend.
//!
//! Markdown has no notion of font size, so only heading levels are carried
//! over from the model; the style table is ignored. Bodies always stay
//! paragraph text, except the expression, which is a fenced code block.

use std::fmt::Write;

use crate::document::{DocumentModel, SectionRole, StyleConfig};
use crate::error::RenderError;

use super::{OutputFormat, Renderer};

/// Renders runbooks as CommonMark.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }

    fn render(&self, model: &DocumentModel, _style: &StyleConfig) -> Result<Vec<u8>, RenderError> {
        let mut out = String::new();
        for section in model.sections() {
            let marker = "#".repeat(usize::from(section.level.as_u8()));
            writeln!(out, "{marker} {}", escape(&section.heading)).map_err(fmt_error)?;
            writeln!(out).map_err(fmt_error)?;
            let Some(body) = &section.body else {
                continue;
            };
            if section.role == SectionRole::Expression {
                let fence = fence_for(body);
                writeln!(out, "{fence}promql").map_err(fmt_error)?;
                writeln!(out, "{}", body.trim_end()).map_err(fmt_error)?;
                writeln!(out, "{fence}").map_err(fmt_error)?;
            } else {
                let lines: Vec<String> = body.lines().map(escape_line).collect();
                writeln!(out, "{}", lines.join("  \n")).map_err(fmt_error)?;
            }
            writeln!(out).map_err(fmt_error)?;
        }
        Ok(out.into_bytes())
    }
}

/// A backtick fence longer than any backtick run in `body`.
fn fence_for(body: &str) -> String {
    let longest = body.split(|c| c != '`').map(str::len).max().unwrap_or(0);
    "`".repeat(longest.max(2) + 1)
}

/// Escapes one body line. Besides inline markup, a marker that would open a
/// block (list item, thematic break, setext underline, fence) is escaped.
fn escape_line(line: &str) -> String {
    let escaped = escape(line.trim_start());
    let digits = escaped.chars().take_while(char::is_ascii_digit).count();
    if escaped.starts_with(['-', '+', '=', '~']) {
        format!("\\{escaped}")
    } else if digits > 0 && escaped[digits..].starts_with(['.', ')']) {
        format!("{}\\{}", &escaped[..digits], &escaped[digits..])
    } else {
        escaped
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(c, '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

fn fmt_error(err: std::fmt::Error) -> RenderError {
    RenderError::Backend {
        reason: err.to_string(),
    }
}
