//! HTML backend.

use std::fmt::Write;

use crate::document::{DocumentModel, SectionRole, StyleConfig};
use crate::error::RenderError;

use super::{OutputFormat, Renderer};

/// Renders runbooks as a standalone HTML page.
///
/// Headings and bodies use the sizes stored on each section, as inline
/// `font-size` in points. The expression is kept verbatim in a `<pre>` block.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Html
    }

    fn render(&self, model: &DocumentModel, _style: &StyleConfig) -> Result<Vec<u8>, RenderError> {
        let title = model.title().map_or("", |s| s.heading.as_str());

        let mut out = String::new();
        writeln!(out, "<!DOCTYPE html>").map_err(fmt_error)?;
        writeln!(out, "<html>").map_err(fmt_error)?;
        writeln!(out, "<head>").map_err(fmt_error)?;
        writeln!(out, "<meta charset=\"utf-8\">").map_err(fmt_error)?;
        writeln!(out, "<title>{}</title>", escape(title)).map_err(fmt_error)?;
        writeln!(out, "</head>").map_err(fmt_error)?;
        writeln!(out, "<body>").map_err(fmt_error)?;

        for section in model.sections() {
            let level = section.level.as_u8();
            writeln!(
                out,
                "<h{level} style=\"font-size: {}pt\">{}</h{level}>",
                section.emphasis_size,
                escape(&section.heading)
            )
            .map_err(fmt_error)?;

            let Some(body) = &section.body else {
                continue;
            };
            if section.role == SectionRole::Expression {
                writeln!(
                    out,
                    "<pre style=\"font-size: {}pt\"><code>{}</code></pre>",
                    section.body_size,
                    escape(body.trim_end())
                )
                .map_err(fmt_error)?;
                continue;
            }
            let class = if section.role == SectionRole::Note {
                " class=\"note\""
            } else {
                ""
            };
            let lines: Vec<String> = body.lines().map(escape).collect();
            writeln!(
                out,
                "<p{class} style=\"font-size: {}pt\">{}</p>",
                section.body_size,
                lines.join("<br>")
            )
            .map_err(fmt_error)?;
        }

        writeln!(out, "</body>").map_err(fmt_error)?;
        writeln!(out, "</html>").map_err(fmt_error)?;
        Ok(out.into_bytes())
    }
}

fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn fmt_error(err: std::fmt::Error) -> RenderError {
    RenderError::Backend {
        reason: err.to_string(),
    }
}
