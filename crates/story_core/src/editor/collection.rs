//! Ordered collection of saved stories.

use crate::model::story::{Story, StoryContent, StoryId};

/// Saved stories in insertion order.
///
/// Position is display order only; `StoryId` is the addressing key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoryCollection {
    stories: Vec<Story>,
}

impl StoryCollection {
    pub fn len(&self) -> usize {
        self.stories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Story> {
        self.stories.iter()
    }

    pub fn as_slice(&self) -> &[Story] {
        &self.stories
    }

    pub fn get(&self, id: StoryId) -> Option<&Story> {
        self.stories.iter().find(|story| story.id == id)
    }

    pub fn at(&self, index: usize) -> Option<&Story> {
        self.stories.get(index)
    }

    /// Current display position of `id`.
    pub fn position(&self, id: StoryId) -> Option<usize> {
        self.stories.iter().position(|story| story.id == id)
    }

    pub(crate) fn push(&mut self, story: Story) {
        self.stories.push(story);
    }

    /// Overwrites the content of `id` in place. Returns `false` if absent.
    pub(crate) fn replace(&mut self, id: StoryId, content: StoryContent) -> bool {
        match self.stories.iter_mut().find(|story| story.id == id) {
            Some(story) => {
                story.content = content;
                true
            }
            None => false,
        }
    }

    /// Removes `id`, shifting later stories down. Returns its former position.
    pub(crate) fn remove(&mut self, id: StoryId) -> Option<(usize, Story)> {
        let index = self.position(id)?;
        Some((index, self.stories.remove(index)))
    }
}

#[cfg(test)]
mod tests {
    use super::StoryCollection;
    use crate::model::story::{Story, StoryContent};

    fn titled(title: &str) -> Story {
        Story::new(StoryContent {
            title: title.to_string(),
            ..StoryContent::default()
        })
    }

    #[test]
    fn remove_shifts_later_entries() {
        let mut stories = StoryCollection::default();
        let (a, b, c) = (titled("a"), titled("b"), titled("c"));
        let (b_id, c_id) = (b.id, c.id);
        stories.push(a);
        stories.push(b);
        stories.push(c);

        let (index, removed) = stories.remove(b_id).expect("b exists");
        assert_eq!(index, 1);
        assert_eq!(removed.content.title, "b");
        assert_eq!(stories.position(c_id), Some(1));
        assert!(stories.remove(b_id).is_none());
    }

    #[test]
    fn replace_keeps_id_and_position() {
        let mut stories = StoryCollection::default();
        let story = titled("old");
        let id = story.id;
        stories.push(story);

        assert!(stories.replace(
            id,
            StoryContent {
                title: "new".to_string(),
                ..StoryContent::default()
            }
        ));
        let stored = stories.at(0).expect("entry remains");
        assert_eq!(stored.id, id);
        assert_eq!(stored.content.title, "new");
    }
}
