//! Catalog filtering.
//!
//! A record is visible when it passes every predicate: text, model,
//! category and tags. Inside the tag predicate selected tags are OR-ed, so
//! picking more tags widens the result. Filtering never reorders or mutates
//! the collection.

use crate::models::{Prompt, PromptModel};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Model selector; `Any` is the "All Models" sentinel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ModelFilter {
    #[default]
    Any,
    Only(PromptModel),
}

impl ModelFilter {
    /// Selector entries in sidebar order
    pub fn options() -> Vec<ModelFilter> {
        std::iter::once(ModelFilter::Any)
            .chain(PromptModel::ALL.into_iter().map(ModelFilter::Only))
            .collect()
    }

    pub fn label(&self) -> &'static str {
        match self {
            ModelFilter::Any => "All Models",
            ModelFilter::Only(model) => model.display_name(),
        }
    }
}

impl fmt::Display for ModelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    #[default]
    All,
    Favorites,
    Personal,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::All, Category::Favorites, Category::Personal];

    pub fn label(&self) -> &'static str {
        match self {
            Category::All => "All",
            Category::Favorites => "Favorites",
            Category::Personal => "Personal",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The current search text and selector state
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub query: String,
    pub model: ModelFilter,
    pub category: Category,
    /// Selected tags in the order they were picked; never holds duplicates.
    pub tags: Vec<String>,
}

impl FilterCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_query(mut self, query: impl Into<String>) -> Self {
        self.query = query.into();
        self
    }

    pub fn with_model(mut self, model: ModelFilter) -> Self {
        self.model = model;
        self
    }

    pub fn with_category(mut self, category: Category) -> Self {
        self.category = category;
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
        self
    }

    /// Selects `tag` if it is not selected yet, otherwise deselects it.
    /// Returns whether the tag is selected afterwards.
    pub fn toggle_tag(&mut self, tag: &str) -> bool {
        if let Some(pos) = self.tags.iter().position(|t| t == tag) {
            self.tags.remove(pos);
            false
        } else {
            self.tags.push(tag.to_string());
            true
        }
    }

    pub fn is_tag_selected(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    pub fn is_unrestricted(&self) -> bool {
        self.query.is_empty()
            && self.model == ModelFilter::Any
            && self.category == Category::All
            && self.tags.is_empty()
    }

    pub fn matches(&self, prompt: &Prompt) -> bool {
        matches_query(prompt, &self.query)
            && matches_model(prompt, self.model)
            && matches_category(prompt, self.category)
            && matches_tags(prompt, &self.tags)
    }
}

/// Case-insensitive substring match on title, description or any tag
pub fn matches_query(prompt: &Prompt, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }

    let query = query.to_lowercase();
    prompt.title.to_lowercase().contains(&query)
        || prompt.description.to_lowercase().contains(&query)
        || prompt
            .tags
            .iter()
            .any(|tag| tag.to_lowercase().contains(&query))
}

pub fn matches_model(prompt: &Prompt, model: ModelFilter) -> bool {
    match model {
        ModelFilter::Any => true,
        ModelFilter::Only(model) => prompt.model == model,
    }
}

pub fn matches_category(prompt: &Prompt, category: Category) -> bool {
    match category {
        Category::All => true,
        Category::Favorites => prompt.is_favorite,
        Category::Personal => prompt.is_personal,
    }
}

/// At least one selected tag is on the record; no selection matches everything
pub fn matches_tags(prompt: &Prompt, selected: &[String]) -> bool {
    selected.is_empty() || selected.iter().any(|tag| prompt.has_tag(tag))
}

/// Returns the visible records in collection order.
pub fn apply<'a>(prompts: &'a [Prompt], criteria: &FilterCriteria) -> Vec<&'a Prompt> {
    prompts.iter().filter(|p| criteria.matches(p)).collect()
}

/// Distinct tags across the collection, in first-seen order
pub fn tag_catalog(prompts: &[Prompt]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in prompts.iter().flat_map(|p| p.tags.iter()) {
        if !tags.contains(tag) {
            tags.push(tag.clone());
        }
    }
    tags
}
