//! View coordination.
//!
//! [`ViewCoordinator`] owns the prompt store together with the transient
//! view state: the filter criteria, which record is being previewed and the
//! edit draft for that record. Presentation layers call into it and render
//! from [`ViewCoordinator::visible`].

use crate::clipboard::Clipboard;
use crate::filter::{self, Category, FilterCriteria, ModelFilter};
use crate::models::{Prompt, PromptDraft, PromptId, PromptStore};

#[derive(Debug, Default)]
pub struct ViewCoordinator {
    store: PromptStore,
    criteria: FilterCriteria,
    previewed: Option<PromptId>,
    /// Present exactly while edit mode is active.
    draft: Option<PromptDraft>,
}

impl ViewCoordinator {
    pub fn new(store: PromptStore) -> Self {
        Self {
            store,
            criteria: FilterCriteria::default(),
            previewed: None,
            draft: None,
        }
    }

    pub fn store(&self) -> &PromptStore {
        &self.store
    }

    pub fn criteria(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Records that pass the current criteria, in collection order
    pub fn visible(&self) -> Vec<&Prompt> {
        filter::apply(self.store.prompts(), &self.criteria)
    }

    pub fn tag_catalog(&self) -> Vec<String> {
        filter::tag_catalog(self.store.prompts())
    }

    // Criteria

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.criteria.query = query.into();
    }

    pub fn set_model(&mut self, model: ModelFilter) {
        self.criteria.model = model;
    }

    pub fn set_category(&mut self, category: Category) {
        self.criteria.category = category;
    }

    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        self.criteria.toggle_tag(tag)
    }

    pub fn clear_tags(&mut self) {
        self.criteria.tags.clear();
    }

    pub fn reset_filters(&mut self) {
        self.criteria = FilterCriteria::default();
    }

    // Store mutations

    pub fn add(&mut self, draft: PromptDraft) -> PromptId {
        self.store.add(draft)
    }

    pub fn toggle_favorite(&mut self, id: &PromptId) -> bool {
        self.store.toggle_favorite(id)
    }

    /// Deletes any record. Deleting the previewed one also closes the preview.
    pub fn delete(&mut self, id: &PromptId) -> bool {
        let removed = self.store.delete(id);
        if self.previewed.as_ref() == Some(id) {
            self.close_preview();
        }
        removed
    }

    // Preview and edit state

    pub fn previewed_id(&self) -> Option<&PromptId> {
        self.previewed.as_ref()
    }

    pub fn previewed(&self) -> Option<&Prompt> {
        self.previewed.as_ref().and_then(|id| self.store.get(id))
    }

    /// Opens `id` read-only. Unknown ids leave the current preview alone.
    pub fn open_preview(&mut self, id: &PromptId) -> bool {
        if self.store.get(id).is_none() {
            tracing::debug!(id = %id, "preview: no such prompt");
            return false;
        }
        self.previewed = Some(id.clone());
        self.draft = None;
        true
    }

    pub fn close_preview(&mut self) {
        self.previewed = None;
        self.draft = None;
    }

    pub fn is_editing(&self) -> bool {
        self.draft.is_some()
    }

    pub fn draft(&self) -> Option<&PromptDraft> {
        self.draft.as_ref()
    }

    pub fn draft_mut(&mut self) -> Option<&mut PromptDraft> {
        self.draft.as_mut()
    }

    /// Enters edit mode with a copy of the previewed record's fields.
    /// Does nothing without a preview.
    pub fn begin_edit(&mut self) -> bool {
        match self.previewed() {
            Some(prompt) => {
                self.draft = Some(PromptDraft::from(prompt));
                true
            }
            None => false,
        }
    }

    /// Writes the draft back to the store and returns to the read-only preview.
    pub fn save_edit(&mut self) -> bool {
        let (Some(id), Some(draft)) = (self.previewed.clone(), self.draft.take()) else {
            return false;
        };
        self.store.update(&id, draft)
    }

    pub fn cancel_edit(&mut self) {
        self.draft = None;
    }

    /// Deletes the previewed record and clears preview and edit mode,
    /// whether or not edit mode was active.
    pub fn delete_previewed(&mut self) -> bool {
        let removed = match self.previewed.clone() {
            Some(id) => self.store.delete(&id),
            None => false,
        };
        self.close_preview();
        removed
    }

    /// Hands the prompt body to `clipboard`. View state is never affected;
    /// a failed hand-off is only logged.
    pub fn copy_text(&self, id: &PromptId, clipboard: &dyn Clipboard) -> bool {
        let Some(prompt) = self.store.get(id) else {
            return false;
        };
        if let Err(e) = clipboard.copy(&prompt.full_prompt) {
            tracing::warn!(id = %id, error = %e, "failed to copy prompt");
        }
        true
    }
}
