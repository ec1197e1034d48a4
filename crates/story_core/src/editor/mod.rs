//! Editor state machine.
//!
//! # Responsibility
//! - Hold the draft buffer and the saved collection behind one owner.
//! - Keep core logic independent of any rendering surface.
//!
//! # Invariants
//! - All mutation goes through `StoryEditor` methods.
//! - Mutating operations address stories by stable `StoryId`; positional
//!   helpers resolve an index to an id first.

pub mod collection;
pub mod draft;
pub mod error;
pub mod story_editor;

pub use collection::StoryCollection;
pub use draft::{DraftBuffer, DraftField};
pub use error::{EditorError, EditorResult};
pub use story_editor::{EditorMode, SaveOutcome, StoryEditor};
