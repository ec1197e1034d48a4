//! Outbound share helpers.
//!
//! # Responsibility
//! - Format social share intents and deep links for saved stories.
//! - Define the host-side collaborator contracts (intent opener, clipboard).
//!
//! # Invariants
//! - Core never opens URLs or touches the clipboard itself; hosts do.

pub mod intent;
pub mod link;

pub use intent::{share_intent_url, share_message, IntentOpener};
pub use link::{copy_story_link, story_link, ClipboardError, ClipboardWriter, LINK_COPIED_MESSAGE};
