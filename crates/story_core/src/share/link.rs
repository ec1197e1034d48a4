//! Deep links and the clipboard contract.

use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Acknowledgment shown after a successful copy.
pub const LINK_COPIED_MESSAGE: &str = "Link copied to clipboard!";

/// Clipboard write failure. Non-fatal; the user may retry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ClipboardError {
    /// No clipboard is reachable from this host.
    Unavailable,
    /// The platform refused the write.
    Denied,
    /// Transport failure while writing.
    Io(String),
}

impl Display for ClipboardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unavailable => write!(f, "clipboard is not available"),
            Self::Denied => write!(f, "clipboard access was denied"),
            Self::Io(details) => write!(f, "clipboard write failed: {details}"),
        }
    }
}

impl Error for ClipboardError {}

/// Host hook that writes plain text to the system clipboard.
pub trait ClipboardWriter {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// `<page_url>#story-<index>`.
pub fn story_link(page_url: &str, index: usize) -> String {
    format!("{page_url}#story-{index}")
}

/// Writes the deep link for `index` and returns the user acknowledgment.
///
/// # Errors
/// - Propagates the clipboard's error unchanged; nothing is retried.
pub fn copy_story_link<C: ClipboardWriter + ?Sized>(
    clipboard: &mut C,
    page_url: &str,
    index: usize,
) -> Result<&'static str, ClipboardError> {
    let link = story_link(page_url, index);
    match clipboard.write_text(link.as_str()) {
        Ok(()) => {
            info!("event=link_copy module=share status=ok index={index}");
            Ok(LINK_COPIED_MESSAGE)
        }
        Err(err) => {
            warn!("event=link_copy module=share status=error index={index} error={err}");
            Err(err)
        }
    }
}
