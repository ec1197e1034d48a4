//! Render-ready snapshot of editor state.
//!
//! # Responsibility
//! - Derive every presentational fact (labels, tab, cards) in one place so
//!   all hosts render the same screen.
//!
//! # Invariants
//! - The write tab is forced while a story is being edited.
//! - `byline_label` is present only for non-empty bylines.

use crate::editor::{EditorMode, StoryEditor};
use crate::model::story::{StoryContent, StoryId};

pub const EMPTY_COLLECTION_MESSAGE: &str = "No stories yet.";

/// Top-level tabs of the editor screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum EditorTab {
    #[default]
    Write,
    Stories,
}

/// One saved story as displayed in the list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryCard {
    pub index: usize,
    pub id: StoryId,
    pub title: String,
    /// `By: <byline>`.
    pub byline_label: Option<String>,
    pub image: Option<String>,
    pub text: String,
}

/// Full screen state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditorView {
    pub mode: EditorMode,
    pub active_tab: EditorTab,
    pub submit_label: &'static str,
    pub draft: StoryContent,
    pub draft_word_count: usize,
    pub max_words: usize,
    pub cards: Vec<StoryCard>,
    pub empty_message: Option<&'static str>,
}

impl EditorView {
    /// Builds the snapshot; `requested_tab` is honoured unless editing.
    pub fn capture(editor: &StoryEditor, requested_tab: EditorTab) -> Self {
        let mode = editor.mode();
        let active_tab = match mode {
            EditorMode::Edit => EditorTab::Write,
            EditorMode::Compose => requested_tab,
        };
        let cards: Vec<StoryCard> = editor
            .stories()
            .iter()
            .enumerate()
            .map(|(index, story)| StoryCard {
                index,
                id: story.id,
                title: story.content.title.clone(),
                byline_label: byline_label(story.content.byline.as_str()),
                image: story.content.image.clone(),
                text: story.content.text.clone(),
            })
            .collect();
        let empty_message = cards.is_empty().then_some(EMPTY_COLLECTION_MESSAGE);

        Self {
            mode,
            active_tab,
            submit_label: submit_label(mode),
            draft: editor.draft().clone(),
            draft_word_count: editor.draft().word_count(),
            max_words: editor.config().max_words,
            cards,
            empty_message,
        }
    }
}

pub fn submit_label(mode: EditorMode) -> &'static str {
    match mode {
        EditorMode::Compose => "Save Story",
        EditorMode::Edit => "Update Story",
    }
}

fn byline_label(byline: &str) -> Option<String> {
    if byline.is_empty() {
        None
    } else {
        Some(format!("By: {byline}"))
    }
}
