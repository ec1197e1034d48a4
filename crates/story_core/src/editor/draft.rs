//! Draft buffer: the story currently being typed.

use crate::model::story::{Story, StoryContent};
use std::str::FromStr;

/// Text field addressable by `set_field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Title,
    Byline,
    Text,
}

impl DraftField {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Byline => "byline",
            Self::Text => "text",
        }
    }
}

impl FromStr for DraftField {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "title" => Ok(Self::Title),
            "byline" => Ok(Self::Byline),
            "text" => Ok(Self::Text),
            other => Err(other.to_string()),
        }
    }
}

/// Mutable working copy of a story. Always present; empty by default.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DraftBuffer {
    content: StoryContent,
}

impl DraftBuffer {
    pub fn content(&self) -> &StoryContent {
        &self.content
    }

    /// Replaces one text field. No validation happens here.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        let value = value.into();
        match field {
            DraftField::Title => self.content.title = value,
            DraftField::Byline => self.content.byline = value,
            DraftField::Text => self.content.text = value,
        }
    }

    pub fn set_image(&mut self, data_url: String) {
        self.content.image = Some(data_url);
    }

    /// Replaces the whole draft with a copy of `story`'s content.
    pub fn load_from(&mut self, story: &Story) {
        self.content = story.content.clone();
    }

    pub fn reset(&mut self) {
        self.content = StoryContent::default();
    }

    pub fn word_count(&self) -> usize {
        self.content.word_count()
    }
}
