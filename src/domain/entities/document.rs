//! Document entity - structured content of the deployment message
//!
//! A document is an ordered list of sections. It's a pure data structure;
//! lookups and rewrites live in `domain::services::addressor`, translation
//! to the chat wire format lives in the infrastructure layer.

use serde::{Deserialize, Serialize};

/// One unit of a deployment message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Section {
    /// Free-form intro line, not addressable by step
    Banner { text: String },
    /// Starts a new environment scope
    EnvironmentHeader { name: String },
    /// Addressable step line
    StepEntry { step: String, state: String },
}

impl Section {
    pub fn banner(text: impl Into<String>) -> Self {
        Section::Banner { text: text.into() }
    }

    pub fn environment_header(name: impl Into<String>) -> Self {
        Section::EnvironmentHeader { name: name.into() }
    }

    pub fn step_entry(step: impl Into<String>, state: impl Into<String>) -> Self {
        Section::StepEntry {
            step: step.into(),
            state: state.into(),
        }
    }

    /// Step name, if this is a step entry
    pub fn step_name(&self) -> Option<&str> {
        match self {
            Section::StepEntry { step, .. } => Some(step),
            _ => None,
        }
    }

    pub fn is_environment_header(&self) -> bool {
        matches!(self, Section::EnvironmentHeader { .. })
    }
}

/// Ordered sequence of sections
///
/// Serialized as a bare JSON array.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    pub fn new(sections: Vec<Section>) -> Self {
        Self { sections }
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn len(&self) -> usize {
        self.sections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Section> {
        self.sections.get(index)
    }

    /// Text of the first banner
    pub fn banner_text(&self) -> Option<&str> {
        self.sections.iter().find_map(|section| match section {
            Section::Banner { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// All step entries as `(step, state)` pairs, in document order
    pub fn step_entries(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections.iter().filter_map(|section| match section {
            Section::StepEntry { step, state } => Some((step.as_str(), state.as_str())),
            _ => None,
        })
    }

    pub(crate) fn sections_mut(&mut self) -> &mut Vec<Section> {
        &mut self.sections
    }
}

impl FromIterator<Section> for Document {
    fn from_iter<I: IntoIterator<Item = Section>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}
