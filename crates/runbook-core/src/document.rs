//! Renderer-agnostic document model.
//!
//! A [`DocumentModel`] is an ordered list of [`Section`]s. Each section has a
//! heading, a heading level, the point sizes of its heading and body, and an
//! optional body. A section without a body is a placeholder heading
//! meant to be completed by hand after generation.
//!
//! Point sizes come from a single [`StyleConfig`] indexed by [`SectionRole`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::RunbookError;

/// Heading level of a section.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum HeadingLevel {
    /// Document title.
    One,
    /// Section heading.
    Two,
}

impl HeadingLevel {
    /// The numeric level (1 or 2).
    #[must_use]
    pub const fn as_u8(self) -> u8 {
        match self {
            Self::One => 1,
            Self::Two => 2,
        }
    }
}

impl From<HeadingLevel> for u8 {
    fn from(level: HeadingLevel) -> Self {
        level.as_u8()
    }
}

impl TryFrom<u8> for HeadingLevel {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(Self::One),
            2 => Ok(Self::Two),
            other => Err(format!("heading level must be 1 or 2, got {other}")),
        }
    }
}

impl fmt::Display for HeadingLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u8())
    }
}

/// The role a section plays in a runbook; selects its styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SectionRole {
    /// The document title.
    Title,
    /// A heading with a body copied from the rule.
    Field,
    /// The alert expression, kept verbatim.
    Expression,
    /// A heading with no body, to be filled in manually.
    Placeholder,
    /// The severity note.
    Note,
}

impl SectionRole {
    /// Returns the role as a string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Field => "field",
            Self::Expression => "expression",
            Self::Placeholder => "placeholder",
            Self::Note => "note",
        }
    }
}

impl fmt::Display for SectionRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Point sizes per section role.
///
/// This is the only configuration surface of the core.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StyleConfig {
    /// Size of the title heading.
    pub title_size: u16,
    /// Size of section headings.
    pub heading_size: u16,
    /// Size of section bodies.
    pub body_size: u16,
    /// Size of the severity note body.
    pub note_size: u16,
}

impl StyleConfig {
    /// Largest accepted point size.
    pub const MAX_SIZE: u16 = 96;

    /// Point size used for the heading of a section with `role`.
    #[must_use]
    pub const fn heading_size_for(&self, role: SectionRole) -> u16 {
        match role {
            SectionRole::Title => self.title_size,
            SectionRole::Field
            | SectionRole::Expression
            | SectionRole::Placeholder
            | SectionRole::Note => self.heading_size,
        }
    }

    /// Point size used for the body of a section with `role`.
    #[must_use]
    pub const fn body_size_for(&self, role: SectionRole) -> u16 {
        match role {
            SectionRole::Note => self.note_size,
            SectionRole::Title
            | SectionRole::Field
            | SectionRole::Expression
            | SectionRole::Placeholder => self.body_size,
        }
    }

    /// Checks that every size is within `1..=MAX_SIZE`.
    ///
    /// # Errors
    ///
    /// Returns `RunbookError::InvalidStyle` naming the first bad size.
    pub fn validate(&self) -> Result<(), RunbookError> {
        for (name, size) in [
            ("title_size", self.title_size),
            ("heading_size", self.heading_size),
            ("body_size", self.body_size),
            ("note_size", self.note_size),
        ] {
            if size == 0 || size > Self::MAX_SIZE {
                return Err(RunbookError::InvalidStyle {
                    reason: format!("{name} must be between 1 and {}pt, got {size}", Self::MAX_SIZE),
                });
            }
        }
        Ok(())
    }
}

impl Default for StyleConfig {
    fn default() -> Self {
        Self {
            title_size: 14,
            heading_size: 12,
            body_size: 11,
            note_size: 10,
        }
    }
}

/// One section of a document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// The heading text.
    pub heading: String,
    /// The heading level.
    pub level: HeadingLevel,
    /// The role of the section.
    pub role: SectionRole,
    /// Point size the heading is emphasised with.
    pub emphasis_size: u16,
    /// Point size of the body text, including text added by hand under a
    /// placeholder.
    pub body_size: u16,
    /// Body text; `None` for placeholder and title sections.
    pub body: Option<String>,
}

impl Section {
    /// Returns true if this section is a heading without a body.
    #[must_use]
    pub fn is_placeholder(&self) -> bool {
        self.body.is_none() && self.role != SectionRole::Title
    }
}

/// An ordered sequence of sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentModel {
    sections: Vec<Section>,
}

impl DocumentModel {
    /// Creates an empty document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a section.
    pub fn push(&mut self, section: Section) {
        self.sections.push(section);
    }

    /// All sections in order.
    #[must_use]
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// The first section with role [`SectionRole::Title`].
    #[must_use]
    pub fn title(&self) -> Option<&Section> {
        self.sections.iter().find(|s| s.role == SectionRole::Title)
    }

    /// The first section whose heading is `heading`.
    #[must_use]
    pub fn section(&self, heading: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.heading == heading)
    }

    /// Number of sections.
    #[must_use]
    pub fn len(&self) -> usize {
        self.sections.len()
    }

    /// Returns true if there are no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }
}

impl FromIterator<Section> for DocumentModel {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self {
            sections: iter.into_iter().collect(),
        }
    }
}
