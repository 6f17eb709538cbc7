//! Runbook generation from alerting rule files.
//!
//! `runbook-core` turns a Prometheus-style alerting rule definition into one
//! human-readable runbook document per alert rule, ready for operational
//! handoff.
//!
//! # Pipeline
//!
//! ```text
//! bytes ──parse──► RuleSet ──build──► [Artifact] ──render──► [(file name, bytes)]
//!                               │
//!                               └─ NameAllocator (one per run)
//! ```
//!
//! - **Parser** ([`parser`]): validates input into a [`RuleSet`]. Missing
//!   fields are errors, never silently empty.
//! - **Name allocation** ([`naming`]): unique, filesystem-safe artifact names.
//! - **Builder** ([`builder`]): one [`DocumentModel`] per rule with a fixed
//!   section sequence, including placeholder headings for manual completion.
//! - **Renderers** ([`render`]): Markdown, HTML, plain text and JSON backends
//!   behind the [`Renderer`] trait.
//!
//! # Example
//!
//! ```rust
//! use runbook_core::{Conversion, OutputFormat};
//!
//! let rules = br#"
//! groups:
//!   - name: disk
//!     rules:
//!       - alert: DiskFull
//!         expr: disk_free < 10
//!         annotations:
//!           description: Disk nearly full
//!         labels:
//!           severity: critical
//! "#;
//!
//! let report = Conversion::new("rules")
//!     .with_format(OutputFormat::Markdown)
//!     .run(rules)
//!     .unwrap();
//!
//! assert_eq!(report.rendered[0].file_name, "rules_DiskFull.md");
//! ```
//!
//! # Building without rendering
//!
//! ```rust
//! use runbook_core::{RunbookBuilder, parser};
//!
//! let set = parser::parse_str(
//!     "groups: [{name: cpu, rules: [{alert: HighCPU, expr: cpu > 0.9, \
//!      annotations: {description: busy}, labels: {severity: warning}}]}]",
//! )
//! .unwrap();
//!
//! let artifacts = RunbookBuilder::new("rules").build(&set);
//! let title = artifacts[0].model().title().unwrap();
//! assert_eq!(title.heading, "Alert RunBook – cpu – HighCPU");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod builder;
pub mod document;
pub mod error;
pub mod naming;
pub mod parser;
pub mod pipeline;
pub mod render;
pub mod types;

// Re-export main types at crate root
pub use builder::{Artifact, RunbookBuilder, build};
pub use document::{DocumentModel, HeadingLevel, Section, SectionRole, StyleConfig};
pub use error::{RenderError, Result, RunbookError, ValidationError};
pub use naming::{NameAllocator, allocate};
pub use parser::parse;
pub use pipeline::{Conversion, ConversionReport, RenderFailure, RenderedArtifact};
pub use render::{OutputFormat, Renderer, renderer_for};
pub use types::{Group, Rule, RuleSet};
