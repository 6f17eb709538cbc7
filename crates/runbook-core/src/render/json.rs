//! JSON backend: the document model and style table, serialized.

use serde::Serialize;

use crate::document::{DocumentModel, Section, StyleConfig};
use crate::error::RenderError;

use super::{OutputFormat, Renderer};

/// Renders runbooks as JSON.
#[derive(Debug, Clone, Copy)]
pub struct JsonRenderer {
    pretty: bool,
}

impl JsonRenderer {
    /// Creates a renderer; `pretty` selects indented output.
    #[must_use]
    pub const fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl Default for JsonRenderer {
    fn default() -> Self {
        Self::new(true)
    }
}

#[derive(Serialize)]
struct JsonDocument<'a> {
    style: &'a StyleConfig,
    sections: &'a [Section],
}

impl Renderer for JsonRenderer {
    fn format(&self) -> OutputFormat {
        OutputFormat::Json
    }

    fn render(&self, model: &DocumentModel, style: &StyleConfig) -> Result<Vec<u8>, RenderError> {
        let doc = JsonDocument {
            style,
            sections: model.sections(),
        };
        let bytes = if self.pretty {
            serde_json::to_vec_pretty(&doc)?
        } else {
            serde_json::to_vec(&doc)?
        };
        Ok(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::fixtures;

    #[test]
    fn document_shape() {
        let bytes = JsonRenderer::new(false)
            .render(&fixtures::runbook(), &StyleConfig::default())
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(value["style"]["title_size"], 14);
        let sections = value["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 9);
        assert_eq!(sections[0]["level"], 1);
        assert_eq!(sections[0]["role"], "title");
        assert_eq!(sections[6]["heading"], "Impact:");
        assert!(sections[6]["body"].is_null());
    }

    #[test]
    fn pretty_output_is_indented() {
        let bytes = JsonRenderer::default()
            .render(&fixtures::runbook(), &StyleConfig::default())
            .unwrap();
        assert!(String::from_utf8(bytes).unwrap().contains("\n  \"style\""));
    }

    #[test]
    fn sections_deserialize_back() {
        #[derive(serde::Deserialize)]
        struct Doc {
            sections: Vec<Section>,
        }
        let model = fixtures::runbook();
        let bytes = JsonRenderer::default()
            .render(&model, &StyleConfig::default())
            .unwrap();
        let doc: Doc = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(doc.sections, model.sections());
    }
}
