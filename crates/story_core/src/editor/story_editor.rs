//! Story editor state container.
//!
//! # Responsibility
//! - Own the draft buffer, the saved collection and the edit pointer.
//! - Expose every user action as a controlled mutation method.
//!
//! # Invariants
//! - A failed action leaves all state untouched.
//! - The edit pointer, when set, names a story present in the collection.
//! - The draft generation increases every time the draft is replaced wholesale;
//!   image results from an older generation are dropped.

use crate::config::EditorConfig;
use crate::editor::collection::StoryCollection;
use crate::editor::draft::{DraftBuffer, DraftField};
use crate::editor::error::{EditorError, EditorResult};
use crate::image::{ImageApplied, ImageDecoded, ImageJob};
use crate::model::story::{Story, StoryContent, StoryId};
use crate::share::{copy_story_link, share_intent_url, story_link, ClipboardWriter, IntentOpener};
use log::{debug, info, warn};

/// COMPOSE while no saved story is shadowed, EDIT otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditorMode {
    Compose,
    Edit,
}

/// Result of a successful save.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveOutcome {
    /// A new story was appended.
    Created(StoryId),
    /// An existing story was overwritten in place.
    Updated(StoryId),
}

impl SaveOutcome {
    pub fn story_id(self) -> StoryId {
        match self {
            Self::Created(id) | Self::Updated(id) => id,
        }
    }
}

/// Single-session story editor.
#[derive(Debug, Clone, Default)]
pub struct StoryEditor {
    config: EditorConfig,
    draft: DraftBuffer,
    stories: StoryCollection,
    editing: Option<StoryId>,
    generation: u64,
}

impl StoryEditor {
    pub fn new(config: EditorConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn draft(&self) -> &StoryContent {
        self.draft.content()
    }

    pub fn stories(&self) -> &StoryCollection {
        &self.stories
    }

    /// Id of the story the draft is shadowing, if any.
    pub fn editing(&self) -> Option<StoryId> {
        self.editing
    }

    pub fn mode(&self) -> EditorMode {
        match self.editing {
            Some(_) => EditorMode::Edit,
            None => EditorMode::Compose,
        }
    }

    pub fn draft_generation(&self) -> u64 {
        self.generation
    }

    /// Words left before the draft would be rejected; zero once over budget.
    pub fn words_remaining(&self) -> usize {
        self.config.max_words.saturating_sub(self.draft.word_count())
    }

    /// Live keystroke update of one draft field.
    pub fn set_field(&mut self, field: DraftField, value: impl Into<String>) {
        self.draft.set_field(field, value);
    }

    /// `set_field` addressed by the form control name.
    ///
    /// # Errors
    /// - `UnknownField` for names other than `title|byline|text`.
    pub fn set_field_named(&mut self, name: &str, value: impl Into<String>) -> EditorResult<()> {
        let field = name.parse::<DraftField>().map_err(EditorError::UnknownField)?;
        self.set_field(field, value);
        Ok(())
    }

    /// Commits the draft: appends in COMPOSE mode, overwrites in EDIT mode.
    ///
    /// # Contract
    /// - On success the draft is reset and the edit pointer cleared.
    ///
    /// # Errors
    /// - `Validation` when the body exceeds the word limit.
    /// - `StoryNotFound` if the edited story vanished; state is unchanged.
    pub fn save(&mut self) -> EditorResult<SaveOutcome> {
        let content = self.draft.content();
        if let Err(err) = content.validate(self.config.max_words) {
            warn!("event=story_save module=editor status=rejected reason=validation error={err}");
            return Err(err.into());
        }

        let outcome = match self.editing {
            Some(id) => {
                if !self.stories.replace(id, content.clone()) {
                    return Err(EditorError::StoryNotFound(id));
                }
                SaveOutcome::Updated(id)
            }
            None => {
                let story = Story::new(content.clone());
                let id = story.id;
                self.stories.push(story);
                SaveOutcome::Created(id)
            }
        };

        info!(
            "event=story_save module=editor status=ok kind={} story_id={} words={} stories={}",
            match outcome {
                SaveOutcome::Created(_) => "create",
                SaveOutcome::Updated(_) => "update",
            },
            outcome.story_id(),
            content.word_count(),
            self.stories.len()
        );

        self.editing = None;
        self.replace_draft(None);
        Ok(outcome)
    }

    /// Loads a saved story into the draft and enters EDIT mode.
    ///
    /// Calling this while already editing switches to the new target and
    /// discards unsaved draft changes.
    ///
    /// # Errors
    /// - `StoryNotFound` when `id` is not in the collection.
    pub fn begin_edit(&mut self, id: StoryId) -> EditorResult<()> {
        let story = self
            .stories
            .get(id)
            .cloned()
            .ok_or(EditorError::StoryNotFound(id))?;
        self.replace_draft(Some(&story));
        self.editing = Some(id);
        info!("event=story_edit module=editor status=ok story_id={id}");
        Ok(())
    }

    /// Positional form of `begin_edit`.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len`; nothing changes.
    pub fn begin_edit_at(&mut self, index: usize) -> EditorResult<()> {
        let id = self.id_at(index)?;
        self.begin_edit(id)
    }

    /// Removes a saved story. Deleting the edited story also resets the draft.
    ///
    /// # Errors
    /// - `StoryNotFound` when `id` is not in the collection.
    pub fn delete(&mut self, id: StoryId) -> EditorResult<Story> {
        let (index, removed) = self
            .stories
            .remove(id)
            .ok_or(EditorError::StoryNotFound(id))?;
        if self.editing == Some(id) {
            self.editing = None;
            self.replace_draft(None);
        }
        info!(
            "event=story_delete module=editor status=ok story_id={id} index={index} stories={}",
            self.stories.len()
        );
        Ok(removed)
    }

    /// Positional form of `delete`.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len`; nothing changes.
    pub fn delete_at(&mut self, index: usize) -> EditorResult<Story> {
        let id = self.id_at(index)?;
        self.delete(id)
    }

    /// Starts attaching an image to the current draft.
    ///
    /// Returns `None` when no file was selected. The returned job can run on
    /// any thread; hand its result to `apply_image`.
    pub fn begin_image_attach(&self, file: Option<Vec<u8>>) -> Option<ImageJob> {
        let bytes = file?;
        debug!(
            "event=image_attach module=editor status=started generation={} bytes={}",
            self.generation,
            bytes.len()
        );
        Some(ImageJob::new(
            self.generation,
            self.config.max_image_bytes,
            bytes,
        ))
    }

    /// Applies a finished image job if its draft is still the active one.
    ///
    /// # Errors
    /// - `Image` when the encode failed for the active draft.
    pub fn apply_image(&mut self, decoded: ImageDecoded) -> EditorResult<ImageApplied> {
        if decoded.generation != self.generation {
            info!(
                "event=image_attach module=editor status=discarded job_generation={} generation={}",
                decoded.generation, self.generation
            );
            return Ok(ImageApplied::Discarded);
        }
        match decoded.result {
            Ok(data_url) => {
                self.draft.set_image(data_url);
                info!(
                    "event=image_attach module=editor status=ok generation={}",
                    self.generation
                );
                Ok(ImageApplied::Attached)
            }
            Err(err) => {
                warn!("event=image_attach module=editor status=error error={err}");
                Err(err.into())
            }
        }
    }

    /// Runs the whole attach flow inline. `Ok(None)` means no file was given.
    pub fn attach_image(&mut self, file: Option<Vec<u8>>) -> EditorResult<Option<ImageApplied>> {
        match self.begin_image_attach(file) {
            Some(job) => self.apply_image(job.run()).map(Some),
            None => Ok(None),
        }
    }

    /// Social intent URL for a saved story.
    ///
    /// # Errors
    /// - `StoryNotFound` when `id` is not in the collection.
    pub fn share_url(&self, id: StoryId) -> EditorResult<String> {
        let story = self.stories.get(id).ok_or(EditorError::StoryNotFound(id))?;
        Ok(share_intent_url(
            self.config.share_intent_base.as_str(),
            &story.content,
        ))
    }

    /// Builds the share URL and hands it to `opener`.
    pub fn share<O: IntentOpener + ?Sized>(&self, id: StoryId, opener: &mut O) -> EditorResult<()> {
        let url = self.share_url(id)?;
        opener.open(url.as_str());
        info!("event=story_share module=editor status=ok story_id={id}");
        Ok(())
    }

    /// Deep link for a saved story at its current position.
    ///
    /// # Errors
    /// - `StoryNotFound` when `id` is not in the collection.
    pub fn link_for(&self, id: StoryId, page_url: &str) -> EditorResult<String> {
        let index = self
            .stories
            .position(id)
            .ok_or(EditorError::StoryNotFound(id))?;
        Ok(story_link(page_url, index))
    }

    /// Copies the deep link for `id` and returns the acknowledgment text.
    ///
    /// # Errors
    /// - `StoryNotFound` when `id` is not in the collection.
    /// - `Clipboard` when the write fails.
    pub fn copy_link<C: ClipboardWriter + ?Sized>(
        &self,
        id: StoryId,
        page_url: &str,
        clipboard: &mut C,
    ) -> EditorResult<&'static str> {
        let index = self
            .stories
            .position(id)
            .ok_or(EditorError::StoryNotFound(id))?;
        Ok(copy_story_link(clipboard, page_url, index)?)
    }

    /// Resolves a display position to a stable id.
    ///
    /// # Errors
    /// - `IndexOutOfRange` when `index >= len`.
    pub fn id_at(&self, index: usize) -> EditorResult<StoryId> {
        match self.stories.at(index) {
            Some(story) => Ok(story.id),
            None => {
                let len = self.stories.len();
                warn!("event=story_lookup module=editor status=error index={index} len={len}");
                Err(EditorError::IndexOutOfRange { index, len })
            }
        }
    }

    fn replace_draft(&mut self, source: Option<&Story>) {
        match source {
            Some(story) => self.draft.load_from(story),
            None => self.draft.reset(),
        }
        self.generation = self.generation.wrapping_add(1);
    }
}

#[cfg(test)]
mod tests {
    use super::{EditorMode, StoryEditor};
    use crate::config::EditorConfig;
    use crate::editor::draft::DraftField;
    use crate::editor::error::EditorError;

    #[test]
    fn generation_moves_only_when_draft_is_replaced() {
        let mut editor = StoryEditor::default();
        let start = editor.draft_generation();

        editor.set_field(DraftField::Title, "typing");
        assert_eq!(editor.draft_generation(), start);

        editor.save().expect("save succeeds");
        assert_eq!(editor.draft_generation(), start + 1);

        editor.begin_edit_at(0).expect("edit succeeds");
        assert_eq!(editor.draft_generation(), start + 2);
    }

    #[test]
    fn words_remaining_saturates_at_zero() {
        let mut editor = StoryEditor::new(EditorConfig::default().with_max_words(2));
        assert_eq!(editor.words_remaining(), 2);
        editor.set_field(DraftField::Text, "one two three");
        assert_eq!(editor.words_remaining(), 0);
    }

    #[test]
    fn set_field_named_rejects_unknown_names() {
        let mut editor = StoryEditor::default();
        let err = editor.set_field_named("subtitle", "x").unwrap_err();
        assert_eq!(err, EditorError::UnknownField("subtitle".to_string()));
        assert!(editor.draft().is_blank());
        assert_eq!(editor.mode(), EditorMode::Compose);
    }
}
