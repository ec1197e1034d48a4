//! Story domain model.
//!
//! # Responsibility
//! - Define the data shapes shared by the editor, hosts and share helpers.
//!
//! # Invariants
//! - Every saved story is identified by a stable `StoryId`.

pub mod story;
