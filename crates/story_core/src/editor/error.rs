use crate::image::ImageError;
use crate::model::story::{StoryId, StoryValidationError};
use crate::share::ClipboardError;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type EditorResult<T> = Result<T, EditorError>;

/// Failure of a single editor action. No action is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    /// Draft failed the save rules; nothing was mutated.
    Validation(StoryValidationError),
    /// No saved story carries this id.
    StoryNotFound(StoryId),
    /// Positional address outside `0..len`.
    IndexOutOfRange { index: usize, len: usize },
    /// Field name is not one of `title|byline|text`.
    UnknownField(String),
    /// Image could not be encoded; the draft image is left untouched.
    Image(ImageError),
    /// Clipboard write failed.
    Clipboard(ClipboardError),
}

impl Display for EditorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::StoryNotFound(id) => write!(f, "story not found: {id}"),
            Self::IndexOutOfRange { index, len } => {
                write!(f, "story index {index} out of range (have {len})")
            }
            Self::UnknownField(name) => {
                write!(f, "unknown field `{name}`; expected title|byline|text")
            }
            Self::Image(err) => write!(f, "{err}"),
            Self::Clipboard(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EditorError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Image(err) => Some(err),
            Self::Clipboard(err) => Some(err),
            Self::StoryNotFound(_) | Self::IndexOutOfRange { .. } | Self::UnknownField(_) => None,
        }
    }
}

impl From<StoryValidationError> for EditorError {
    fn from(value: StoryValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<ImageError> for EditorError {
    fn from(value: ImageError) -> Self {
        Self::Image(value)
    }
}

impl From<ClipboardError> for EditorError {
    fn from(value: ClipboardError) -> Self {
        Self::Clipboard(value)
    }
}
