//! Core domain logic for the story editor.
//! This crate is the single source of truth for story invariants.

pub mod config;
pub mod editor;
pub mod image;
pub mod logging;
pub mod model;
pub mod share;
pub mod view;

pub use config::{EditorConfig, LogSettings};
pub use editor::{
    DraftField, EditorError, EditorMode, EditorResult, SaveOutcome, StoryCollection, StoryEditor,
};
pub use image::{ImageApplied, ImageDecoded, ImageError, ImageJob};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::story::{Story, StoryContent, StoryId, StoryValidationError, MAX_STORY_WORDS};
pub use share::{ClipboardError, ClipboardWriter, IntentOpener, LINK_COPIED_MESSAGE};
pub use view::{EditorTab, EditorView, StoryCard};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
