use crate::models::ids::{IdSource, TimestampIds};
use crate::models::{Prompt, PromptDraft, PromptId};

/// In-memory prompt collection.
///
/// The store is the only owner of the records. Newest records sit at the
/// front; everything else keeps insertion order. Mutations on an id that is
/// not present are silent no-ops, the returned `bool` only says whether a
/// record matched.
#[derive(Debug)]
pub struct PromptStore {
    prompts: Vec<Prompt>,
    ids: Box<dyn IdSource>,
}

impl Default for PromptStore {
    fn default() -> Self {
        Self::new(Box::new(TimestampIds::new()))
    }
}

impl PromptStore {
    pub fn new(ids: Box<dyn IdSource>) -> Self {
        Self {
            prompts: Vec::new(),
            ids,
        }
    }

    /// Starts from an existing list. Later duplicates of an id are dropped.
    pub fn with_prompts(prompts: Vec<Prompt>, ids: Box<dyn IdSource>) -> Self {
        let mut store = Self::new(ids);
        for prompt in prompts {
            if store.get(&prompt.id).is_some() {
                tracing::warn!(id = %prompt.id, "dropping prompt with duplicate id");
                continue;
            }
            store.prompts.push(prompt);
        }
        store
    }

    pub fn prompts(&self) -> &[Prompt] {
        &self.prompts
    }

    pub fn len(&self) -> usize {
        self.prompts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prompts.is_empty()
    }

    pub fn get(&self, id: &PromptId) -> Option<&Prompt> {
        self.prompts.iter().find(|p| &p.id == id)
    }

    fn get_mut(&mut self, id: &PromptId) -> Option<&mut Prompt> {
        self.prompts.iter_mut().find(|p| &p.id == id)
    }

    /// Looks a prompt up by title: exact (case-insensitive) match first,
    /// then the first title containing `name`.
    pub fn find_by_title(&self, name: &str) -> Option<&Prompt> {
        let name = name.to_lowercase();
        self.prompts
            .iter()
            .find(|p| p.title.to_lowercase() == name)
            .or_else(|| {
                self.prompts
                    .iter()
                    .find(|p| p.title.to_lowercase().contains(&name))
            })
    }

    /// Inserts a new record at the front and returns its id. Never fails.
    pub fn add(&mut self, draft: PromptDraft) -> PromptId {
        let id = loop {
            let candidate = self.ids.next_id();
            if self.get(&candidate).is_none() {
                break candidate;
            }
        };

        tracing::debug!(id = %id, title = %draft.title, "adding prompt");
        self.prompts.insert(0, Prompt::from_draft(id.clone(), draft));
        id
    }

    pub fn toggle_favorite(&mut self, id: &PromptId) -> bool {
        match self.get_mut(id) {
            Some(prompt) => {
                prompt.toggle_favorite();
                tracing::debug!(id = %id, favorite = prompt.is_favorite, "toggled favorite");
                true
            }
            None => {
                tracing::debug!(id = %id, "toggle favorite: no such prompt");
                false
            }
        }
    }

    /// Replaces the editable fields of the matching record.
    pub fn update(&mut self, id: &PromptId, draft: PromptDraft) -> bool {
        match self.get_mut(id) {
            Some(prompt) => {
                prompt.apply_draft(draft);
                tracing::debug!(id = %id, "updated prompt");
                true
            }
            None => {
                tracing::debug!(id = %id, "update: no such prompt");
                false
            }
        }
    }

    pub fn delete(&mut self, id: &PromptId) -> bool {
        let before = self.prompts.len();
        self.prompts.retain(|p| &p.id != id);
        let removed = self.prompts.len() != before;
        tracing::debug!(id = %id, removed, "delete prompt");
        removed
    }
}
