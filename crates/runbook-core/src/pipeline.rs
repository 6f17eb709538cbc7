//! One conversion run: parse, build, render every artifact.
//!
//! Parsing and building are sequential (name allocation depends on every
//! earlier allocation). Rendering is independent per artifact and can be fanned
//! out with [`Conversion::run_concurrent`]. A render failure never drops an
//! artifact silently: it is reported in [`ConversionReport::failures`].

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info, warn};

use crate::builder::{Artifact, RunbookBuilder};
use crate::document::StyleConfig;
use crate::error::{RenderError, RunbookError};
use crate::naming::sanitize;
use crate::parser;
use crate::render::{OutputFormat, Renderer, renderer_for};

/// Base name used when the caller supplies a blank one.
pub const DEFAULT_BASE_NAME: &str = "runbook";

/// A rendered artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedArtifact {
    /// The allocated artifact name.
    pub name: String,
    /// `{name}.{extension}`.
    pub file_name: String,
    /// The rendered bytes.
    #[serde(skip)]
    pub content: Vec<u8>,
}

/// An artifact that failed to render.
#[derive(Debug)]
pub struct RenderFailure {
    /// The allocated artifact name.
    pub name: String,
    /// Why rendering failed.
    pub error: RenderError,
}

/// The outcome of a conversion run.
#[derive(Debug, Default)]
pub struct ConversionReport {
    /// Successfully rendered artifacts, in rule order.
    pub rendered: Vec<RenderedArtifact>,
    /// Artifacts that failed to render, in rule order.
    pub failures: Vec<RenderFailure>,
}

impl ConversionReport {
    /// Returns true if every artifact rendered.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Total number of artifacts attempted.
    #[must_use]
    pub fn total(&self) -> usize {
        self.rendered.len() + self.failures.len()
    }

    /// Turns the report into all-or-nothing: the rendered artifacts, or the
    /// first failure.
    ///
    /// # Errors
    ///
    /// Returns `RunbookError::Render` if any artifact failed.
    pub fn into_result(self) -> Result<Vec<RenderedArtifact>, RunbookError> {
        match self.failures.into_iter().next() {
            Some(failure) => Err(RunbookError::Render {
                artifact: failure.name,
                source: failure.error,
            }),
            None => Ok(self.rendered),
        }
    }

    fn record(&mut self, outcome: Result<RenderedArtifact, RenderFailure>) {
        match outcome {
            Ok(rendered) => self.rendered.push(rendered),
            Err(failure) => {
                warn!(artifact = %failure.name, error = %failure.error, "failed to render runbook");
                self.failures.push(failure);
            }
        }
    }
}

/// Settings for converting rule files into rendered runbooks.
#[derive(Debug, Clone)]
pub struct Conversion {
    base_name: String,
    style: StyleConfig,
    renderer: Arc<dyn Renderer>,
}

impl Conversion {
    /// Creates a conversion producing Markdown named after `base_name`.
    ///
    /// The base name is made filesystem-safe; a blank one becomes
    /// [`DEFAULT_BASE_NAME`].
    #[must_use]
    pub fn new(base_name: &str) -> Self {
        let base_name = if base_name.trim().is_empty() {
            DEFAULT_BASE_NAME.to_string()
        } else {
            sanitize(base_name.trim())
        };
        Self {
            base_name,
            style: StyleConfig::default(),
            renderer: Arc::from(renderer_for(OutputFormat::default())),
        }
    }

    /// Sets the style table.
    #[must_use]
    pub fn with_style(mut self, style: StyleConfig) -> Self {
        self.style = style;
        self
    }

    /// Uses the built-in renderer for `format`.
    #[must_use]
    pub fn with_format(mut self, format: OutputFormat) -> Self {
        self.renderer = Arc::from(renderer_for(format));
        self
    }

    /// Uses a custom renderer.
    #[must_use]
    pub fn with_renderer(mut self, renderer: Arc<dyn Renderer>) -> Self {
        self.renderer = renderer;
        self
    }

    /// The sanitized base name.
    #[must_use]
    pub fn base_name(&self) -> &str {
        &self.base_name
    }

    /// The style table.
    #[must_use]
    pub const fn style(&self) -> &StyleConfig {
        &self.style
    }

    /// The output format of the configured renderer.
    #[must_use]
    pub fn format(&self) -> OutputFormat {
        self.renderer.format()
    }

    /// Parses and builds without rendering.
    ///
    /// # Errors
    ///
    /// Returns `RunbookError::InvalidStyle` or `RunbookError::Validation`.
    pub fn plan(&self, input: &[u8]) -> Result<Vec<Artifact>, RunbookError> {
        self.style.validate()?;
        let rule_set = parser::parse(input)?;
        Ok(RunbookBuilder::new(self.base_name.as_str())
            .with_style(self.style)
            .build(&rule_set))
    }

    /// Runs the conversion, rendering artifacts one after another.
    ///
    /// # Errors
    ///
    /// Fails before rendering anything if the style or the rule-set is
    /// invalid. Render failures are reported in the returned report.
    pub fn run(&self, input: &[u8]) -> Result<ConversionReport, RunbookError> {
        let artifacts = self.plan(input)?;
        let mut report = ConversionReport::default();
        for artifact in artifacts {
            report.record(render_one(self.renderer.as_ref(), &self.style, &artifact));
        }
        self.log_report(&report);
        Ok(report)
    }

    /// Runs the conversion, rendering artifacts on the blocking thread pool.
    ///
    /// Results keep rule order regardless of completion order. A task that
    /// panics or is cancelled is reported as a failure of its artifact with
    /// `RenderError::Task`; the other tasks are still awaited.
    ///
    /// # Errors
    ///
    /// As [`Conversion::run`].
    pub async fn run_concurrent(&self, input: &[u8]) -> Result<ConversionReport, RunbookError> {
        let artifacts = self.plan(input)?;

        let handles: Vec<_> = artifacts
            .into_iter()
            .map(|artifact| {
                let name = artifact.name().to_string();
                let renderer = Arc::clone(&self.renderer);
                let style = self.style;
                let handle = tokio::task::spawn_blocking(move || {
                    render_one(renderer.as_ref(), &style, &artifact)
                });
                (name, handle)
            })
            .collect();
        debug!(tasks = handles.len(), "spawned render tasks");

        let mut report = ConversionReport::default();
        for (name, handle) in handles {
            let outcome = handle.await.unwrap_or_else(|e| {
                Err(RenderFailure {
                    name,
                    error: RenderError::Task {
                        reason: e.to_string(),
                    },
                })
            });
            report.record(outcome);
        }
        self.log_report(&report);
        Ok(report)
    }

    fn log_report(&self, report: &ConversionReport) {
        info!(
            base = %self.base_name,
            format = %self.format(),
            rendered = report.rendered.len(),
            failed = report.failures.len(),
            "conversion finished"
        );
    }
}

fn render_one(
    renderer: &dyn Renderer,
    style: &StyleConfig,
    artifact: &Artifact,
) -> Result<RenderedArtifact, RenderFailure> {
    match renderer.render(artifact.model(), style) {
        Ok(content) => Ok(RenderedArtifact {
            name: artifact.name().to_string(),
            file_name: format!("{}.{}", artifact.name(), renderer.extension()),
            content,
        }),
        Err(error) => Err(RenderFailure {
            name: artifact.name().to_string(),
            error,
        }),
    }
}
