//! FFI use-case API for the Flutter story editor screen.
//!
//! # Responsibility
//! - Expose one process-wide editor session to Dart via FRB.
//! - Translate core results into flat response envelopes.
//!
//! # Invariants
//! - Exported functions must not panic across the FFI boundary.
//! - The session lock is never held while an image is being encoded.
//! - Mutations address stories by id string; indices are display-only.

use log::warn;
use once_cell::sync::Lazy;
use story_core::{
    core_version as core_version_inner, init_logging as init_logging_inner, ClipboardError,
    EditorConfig, EditorError, EditorMode, EditorTab, EditorView, ImageApplied, LogSettings,
    SaveOutcome, StoryEditor, StoryId, LINK_COPIED_MESSAGE,
};
use std::sync::{Mutex, MutexGuard};

static SESSION: Lazy<Mutex<StoryEditor>> =
    Lazy::new(|| Mutex::new(StoryEditor::new(EditorConfig::default())));

/// Expose core crate version through FFI.
///
/// # FFI contract
/// - Sync call, non-blocking.
/// - Never throws; always returns a UTF-8 string.
#[flutter_rust_bridge::frb(sync)]
pub fn core_version() -> String {
    core_version_inner().to_owned()
}

/// Initializes Rust core logging once per process.
///
/// Input semantics:
/// - `level`: one of `trace|debug|info|warn|error` (case-insensitive).
/// - `log_dir`: absolute directory path where rolling logs are written.
///
/// # FFI contract
/// - Sync call; may create the log directory.
/// - Idempotent for identical inputs; reconfiguration returns an error.
/// - Returns empty string on success and error message on failure.
#[flutter_rust_bridge::frb(sync)]
pub fn init_logging(level: String, log_dir: String) -> String {
    match init_logging_inner(&LogSettings::new(level, log_dir)) {
        Ok(()) => String::new(),
        Err(err) => err,
    }
}

/// Generic action response envelope.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorActionResponse {
    /// Whether the action succeeded.
    pub ok: bool,
    /// Story touched by the action, when there is one.
    pub story_id: Option<String>,
    /// User-facing message.
    pub message: String,
}

impl EditorActionResponse {
    fn success(message: impl Into<String>, story_id: Option<StoryId>) -> Self {
        Self {
            ok: true,
            story_id: story_id.map(|id| id.to_string()),
            message: message.into(),
        }
    }

    fn failure(message: impl Into<String>) -> Self {
        Self {
            ok: false,
            story_id: None,
            message: message.into(),
        }
    }
}

/// Response carrying a generated string (share URL, deep link).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorLinkResponse {
    pub ok: bool,
    /// Generated value; empty on failure.
    pub value: String,
    pub message: String,
}

/// One story card in the list tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryCardItem {
    pub story_id: String,
    pub index: u32,
    pub title: String,
    pub byline_label: Option<String>,
    pub image: Option<String>,
    pub text: String,
}

/// Screen snapshot for one render pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorSnapshot {
    /// `compose|edit`.
    pub mode: String,
    /// `write|stories`.
    pub active_tab: String,
    pub submit_label: String,
    pub draft_title: String,
    pub draft_byline: String,
    pub draft_text: String,
    pub draft_image: Option<String>,
    pub draft_word_count: u32,
    pub max_words: u32,
    pub items: Vec<StoryCardItem>,
    pub empty_message: Option<String>,
}

/// Replaces one draft field (`title|byline|text`).
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Never panics.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_set_field(field: String, value: String) -> EditorActionResponse {
    match lock_session().set_field_named(field.as_str(), value) {
        Ok(()) => EditorActionResponse::success("", None),
        Err(err) => EditorActionResponse::failure(err.to_string()),
    }
}

/// Saves the draft as a new story or as an update of the edited one.
///
/// # FFI contract
/// - Sync call, in-memory only.
/// - Validation failures return `ok=false` with the user-facing message.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_save() -> EditorActionResponse {
    match lock_session().save() {
        Ok(SaveOutcome::Created(id)) => EditorActionResponse::success("Story saved.", Some(id)),
        Ok(SaveOutcome::Updated(id)) => EditorActionResponse::success("Story updated.", Some(id)),
        Err(err) => EditorActionResponse::failure(err.to_string()),
    }
}

/// Loads a saved story into the draft for editing.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_begin_edit(story_id: String) -> EditorActionResponse {
    let result = parse_story_id(story_id.as_str()).and_then(|id| {
        lock_session()
            .begin_edit(id)
            .map(|()| id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(id) => EditorActionResponse::success("Editing story.", Some(id)),
        Err(message) => EditorActionResponse::failure(message),
    }
}

/// Deletes a saved story.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_delete(story_id: String) -> EditorActionResponse {
    let result = parse_story_id(story_id.as_str()).and_then(|id| {
        lock_session()
            .delete(id)
            .map(|story| story.id)
            .map_err(|err| err.to_string())
    });
    match result {
        Ok(id) => EditorActionResponse::success("Story deleted.", Some(id)),
        Err(message) => EditorActionResponse::failure(message),
    }
}

/// Attaches an image file to the current draft.
///
/// # FFI contract
/// - Async from Dart's perspective; FRB runs it on a worker thread.
/// - Empty `bytes` means "no file selected" and is a no-op.
/// - If the draft was replaced while encoding, the image is dropped and the
///   response says so with `ok=true`.
pub fn editor_attach_image(bytes: Vec<u8>) -> EditorActionResponse {
    let file = if bytes.is_empty() { None } else { Some(bytes) };
    let pending = lock_session().begin_image_attach(file);
    let Some(job) = pending else {
        return EditorActionResponse::success("No image selected.", None);
    };

    let decoded = job.run();
    let applied = lock_session().apply_image(decoded);
    match applied {
        Ok(ImageApplied::Attached) => EditorActionResponse::success("Image attached.", None),
        Ok(ImageApplied::Discarded) => {
            EditorActionResponse::success("Image discarded; the draft changed.", None)
        }
        Err(err) => EditorActionResponse::failure(err.to_string()),
    }
}

/// Returns the current screen state.
///
/// `tab` is `write` or `stories`; anything else falls back to `write`.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_snapshot(tab: String) -> EditorSnapshot {
    let requested = match tab.trim().to_ascii_lowercase().as_str() {
        "stories" => EditorTab::Stories,
        _ => EditorTab::Write,
    };
    let view = EditorView::capture(&lock_session(), requested);
    to_snapshot(view)
}

/// Builds the social share URL for a story. Opening it is the caller's job.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_share_url(story_id: String) -> EditorLinkResponse {
    let result = parse_story_id(story_id.as_str())
        .and_then(|id| lock_session().share_url(id).map_err(|err| err.to_string()));
    link_response(result)
}

/// Builds the deep link `<page_url>#story-<index>` for a story.
///
/// Dart writes it to the clipboard and reports back via
/// `editor_report_clipboard`.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_story_link(page_url: String, story_id: String) -> EditorLinkResponse {
    let result = parse_story_id(story_id.as_str()).and_then(|id| {
        lock_session()
            .link_for(id, page_url.as_str())
            .map_err(|err| err.to_string())
    });
    link_response(result)
}

/// Maps the outcome of a Dart-side clipboard write to a user message.
///
/// `error_kind` is `unavailable|denied` or free-form details.
#[flutter_rust_bridge::frb(sync)]
pub fn editor_report_clipboard(success: bool, error_kind: String) -> EditorActionResponse {
    if success {
        return EditorActionResponse::success(LINK_COPIED_MESSAGE, None);
    }
    let err = match error_kind.trim() {
        "unavailable" => ClipboardError::Unavailable,
        "denied" => ClipboardError::Denied,
        other => ClipboardError::Io(other.to_string()),
    };
    warn!("event=link_copy module=ffi status=error error={err}");
    EditorActionResponse::failure(EditorError::Clipboard(err).to_string())
}

fn lock_session() -> MutexGuard<'static, StoryEditor> {
    SESSION.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

fn parse_story_id(raw: &str) -> Result<StoryId, String> {
    uuid::Uuid::parse_str(raw.trim()).map_err(|err| format!("invalid story id `{raw}`: {err}"))
}

fn link_response(result: Result<String, String>) -> EditorLinkResponse {
    match result {
        Ok(value) => EditorLinkResponse {
            ok: true,
            value,
            message: String::new(),
        },
        Err(message) => EditorLinkResponse {
            ok: false,
            value: String::new(),
            message,
        },
    }
}

fn to_snapshot(view: EditorView) -> EditorSnapshot {
    EditorSnapshot {
        mode: match view.mode {
            EditorMode::Compose => "compose",
            EditorMode::Edit => "edit",
        }
        .to_string(),
        active_tab: match view.active_tab {
            EditorTab::Write => "write",
            EditorTab::Stories => "stories",
        }
        .to_string(),
        submit_label: view.submit_label.to_string(),
        draft_title: view.draft.title,
        draft_byline: view.draft.byline,
        draft_text: view.draft.text,
        draft_image: view.draft.image,
        draft_word_count: saturating_u32(view.draft_word_count),
        max_words: saturating_u32(view.max_words),
        items: view
            .cards
            .into_iter()
            .map(|card| StoryCardItem {
                story_id: card.id.to_string(),
                index: saturating_u32(card.index),
                title: card.title,
                byline_label: card.byline_label,
                image: card.image,
                text: card.text,
            })
            .collect(),
        empty_message: view.empty_message.map(str::to_string),
    }
}

fn saturating_u32(value: usize) -> u32 {
    u32::try_from(value).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use super::{
        core_version, editor_attach_image, editor_begin_edit, editor_delete,
        editor_report_clipboard, editor_save, editor_set_field, editor_share_url,
        editor_snapshot, editor_story_link, init_logging, lock_session,
    };
    use story_core::{EditorConfig, StoryEditor};
    use std::sync::{Mutex, MutexGuard};

    static SERIAL: Mutex<()> = Mutex::new(());

    fn fresh_session() -> MutexGuard<'static, ()> {
        let guard = SERIAL.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        *lock_session() = StoryEditor::new(EditorConfig::default());
        guard
    }

    fn save(title: &str, text: &str) -> String {
        assert!(editor_set_field("title".to_string(), title.to_string()).ok);
        assert!(editor_set_field("text".to_string(), text.to_string()).ok);
        let saved = editor_save();
        assert!(saved.ok, "{}", saved.message);
        saved.story_id.expect("save should return story_id")
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }

    #[test]
    fn init_logging_rejects_empty_log_dir() {
        let error = init_logging("info".to_string(), String::new());
        assert!(!error.is_empty());
    }

    #[test]
    fn init_logging_rejects_unsupported_level() {
        let error = init_logging("verbose".to_string(), "/tmp/logs".to_string());
        assert!(!error.is_empty());
    }

    #[test]
    fn set_field_rejects_unknown_name() {
        let _guard = fresh_session();
        let response = editor_set_field("subtitle".to_string(), "x".to_string());
        assert!(!response.ok);
        assert!(response.message.contains("unknown field"));
    }

    #[test]
    fn save_edit_and_update_round_trip() {
        let _guard = fresh_session();
        let id = save("Night Bus", "It rained.");

        let snapshot = editor_snapshot("stories".to_string());
        assert_eq!(snapshot.items.len(), 1);
        assert_eq!(snapshot.items[0].story_id, id);
        assert_eq!(snapshot.empty_message, None);

        assert!(editor_begin_edit(id.clone()).ok);
        let editing = editor_snapshot("stories".to_string());
        assert_eq!(editing.mode, "edit");
        assert_eq!(editing.active_tab, "write");
        assert_eq!(editing.submit_label, "Update Story");
        assert_eq!(editing.draft_title, "Night Bus");

        editor_set_field("text".to_string(), "It rained all night.".to_string());
        let updated = editor_save();
        assert!(updated.ok);
        assert_eq!(updated.message, "Story updated.");
        assert_eq!(updated.story_id.as_deref(), Some(id.as_str()));

        let after = editor_snapshot("write".to_string());
        assert_eq!(after.mode, "compose");
        assert_eq!(after.items[0].text, "It rained all night.");
    }

    #[test]
    fn save_reports_word_limit_message() {
        let _guard = fresh_session();
        let long_text = vec!["w"; 1001].join(" ");
        editor_set_field("text".to_string(), long_text);
        let response = editor_save();
        assert!(!response.ok);
        assert_eq!(response.message, "Story must be 1,000 words or less");
        assert!(editor_snapshot("stories".to_string()).items.is_empty());
    }

    #[test]
    fn delete_and_invalid_ids_are_reported() {
        let _guard = fresh_session();
        let id = save("gone soon", "bye");

        assert!(editor_delete(id.clone()).ok);
        let snapshot = editor_snapshot("stories".to_string());
        assert_eq!(snapshot.empty_message.as_deref(), Some("No stories yet."));

        assert!(!editor_delete(id).ok);
        assert!(!editor_begin_edit("not-a-uuid".to_string()).ok);
    }

    #[test]
    fn share_and_link_helpers_return_values() {
        let _guard = fresh_session();
        save("first", "a");
        let second = save("second", "b");

        let share = editor_share_url(second.clone());
        assert!(share.ok);
        assert!(share.value.starts_with("https://twitter.com/intent/tweet?text=second"));

        let link = editor_story_link("https://example.com/".to_string(), second);
        assert!(link.ok);
        assert_eq!(link.value, "https://example.com/#story-1");

        assert_eq!(
            editor_report_clipboard(true, String::new()).message,
            "Link copied to clipboard!"
        );
        let denied = editor_report_clipboard(false, "denied".to_string());
        assert!(!denied.ok);
        assert_eq!(denied.message, "clipboard access was denied");
    }

    #[test]
    fn attach_image_updates_draft() {
        let _guard = fresh_session();
        assert!(editor_attach_image(Vec::new()).ok);
        assert_eq!(editor_snapshot("write".to_string()).draft_image, None);

        let response = editor_attach_image(b"GIF89a\x01\x00\x01\x00".to_vec());
        assert!(response.ok, "{}", response.message);
        let image = editor_snapshot("write".to_string())
            .draft_image
            .expect("image should be attached");
        assert!(image.starts_with("data:image/gif;base64,"));

        let rejected = editor_attach_image(b"plain text".to_vec());
        assert!(!rejected.ok);
    }
}
