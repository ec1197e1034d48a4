//! Story domain model.
//!
//! # Responsibility
//! - Define the canonical saved-story record and its editable content.
//! - Own the word-count rule used to gate saves.
//!
//! # Invariants
//! - `id` is assigned once on first save and never reused for another story.
//! - `text` word count must not exceed the active limit at the moment of save.
//! - `title` and `byline` carry no constraints and may be empty.

use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Default maximum number of words in a story body.
pub const MAX_STORY_WORDS: usize = 1000;

/// Stable identifier for a saved story.
///
/// Positions shift on delete; ids do not.
pub type StoryId = Uuid;

/// Validation error for story content.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoryValidationError {
    /// Body text is longer than the allowed word budget.
    TooManyWords { words: usize, limit: usize },
}

impl Display for StoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TooManyWords { limit, .. } => {
                write!(f, "Story must be {} words or less", group_thousands(*limit))
            }
        }
    }
}

impl Error for StoryValidationError {}

/// User-editable story fields.
///
/// Doubles as the draft shape: a draft is simply content not yet bound to an id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoryContent {
    pub title: String,
    pub byline: String,
    pub text: String,
    /// `data:<mime>;base64,<payload>` when an image is attached.
    pub image: Option<String>,
}

impl StoryContent {
    /// Number of whitespace-delimited words in `text`.
    pub fn word_count(&self) -> usize {
        count_words(self.text.as_str())
    }

    /// Checks the word budget against `limit`.
    ///
    /// # Errors
    /// - Returns `TooManyWords` when the body exceeds `limit` words.
    pub fn validate(&self, limit: usize) -> Result<(), StoryValidationError> {
        let words = self.word_count();
        if words > limit {
            return Err(StoryValidationError::TooManyWords { words, limit });
        }
        Ok(())
    }

    /// Returns whether every field is at its empty default.
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// Saved story record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Story {
    pub id: StoryId,
    #[serde(flatten)]
    pub content: StoryContent,
}

impl Story {
    /// Creates a story with a freshly generated id.
    pub fn new(content: StoryContent) -> Self {
        Self::with_id(Uuid::new_v4(), content)
    }

    /// Creates a story with a caller-provided id.
    pub fn with_id(id: StoryId, content: StoryContent) -> Self {
        Self { id, content }
    }
}

/// Counts whitespace-delimited tokens after trimming.
pub fn count_words(text: &str) -> usize {
    text.split_whitespace().count()
}

fn group_thousands(value: usize) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::{count_words, group_thousands, StoryContent, StoryValidationError};

    #[test]
    fn count_words_ignores_surrounding_and_repeated_whitespace() {
        assert_eq!(count_words(""), 0);
        assert_eq!(count_words("   \n\t "), 0);
        assert_eq!(count_words("  hello   world\n\nagain "), 3);
    }

    #[test]
    fn validate_reports_word_total_and_limit() {
        let content = StoryContent {
            text: "a b c".to_string(),
            ..StoryContent::default()
        };
        assert!(content.validate(3).is_ok());
        assert_eq!(
            content.validate(2).unwrap_err(),
            StoryValidationError::TooManyWords { words: 3, limit: 2 }
        );
    }

    #[test]
    fn validation_message_groups_digits() {
        let err = StoryValidationError::TooManyWords {
            words: 1001,
            limit: 1000,
        };
        assert_eq!(err.to_string(), "Story must be 1,000 words or less");
        assert_eq!(group_thousands(12), "12");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }
}
