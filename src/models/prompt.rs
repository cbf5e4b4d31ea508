use crate::error::PromptBoxError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Opaque record identifier. Assigned once by the store and never changed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptId(String);

impl PromptId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PromptId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PromptId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

/// The closed set of models a prompt can target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PromptModel {
    #[serde(rename = "GPT-4")]
    Gpt4,
    Claude,
    Gemini,
}

impl PromptModel {
    pub const ALL: [PromptModel; 3] = [PromptModel::Gpt4, PromptModel::Claude, PromptModel::Gemini];

    pub fn display_name(&self) -> &'static str {
        match self {
            PromptModel::Gpt4 => "GPT-4",
            PromptModel::Claude => "Claude",
            PromptModel::Gemini => "Gemini",
        }
    }

    /// Next model in `ALL`, wrapping around. Used by the model selector.
    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|m| *m == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl Default for PromptModel {
    fn default() -> Self {
        PromptModel::Gpt4
    }
}

impl fmt::Display for PromptModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for PromptModel {
    type Err = PromptBoxError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gpt-4" | "gpt4" => Ok(PromptModel::Gpt4),
            "claude" => Ok(PromptModel::Claude),
            "gemini" => Ok(PromptModel::Gemini),
            _ => Err(PromptBoxError::UnknownModel(s.to_string())),
        }
    }
}

/// A catalog entry: a labeled block of reusable prompt text plus metadata.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prompt {
    pub id: PromptId,
    pub title: String,
    pub description: String,
    pub full_prompt: String,
    pub model: PromptModel,
    pub tags: Vec<String>,
    pub is_favorite: bool,
    pub is_personal: bool,
}

impl Prompt {
    /// Builds a record from a draft. Favorites always start unset.
    pub fn from_draft(id: PromptId, draft: PromptDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            full_prompt: draft.full_prompt,
            model: draft.model,
            tags: draft.tags,
            is_favorite: false,
            is_personal: draft.is_personal,
        }
    }

    /// Overwrites every editable field. `id` and `is_favorite` are kept.
    pub fn apply_draft(&mut self, draft: PromptDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.full_prompt = draft.full_prompt;
        self.model = draft.model;
        self.tags = draft.tags;
        self.is_personal = draft.is_personal;
    }

    pub fn toggle_favorite(&mut self) {
        self.is_favorite = !self.is_favorite;
    }

    /// Rough token count for the prompt body, four characters per token
    pub fn estimated_tokens(&self) -> usize {
        estimate_tokens(&self.full_prompt)
    }

    pub fn visibility_label(&self) -> &'static str {
        if self.is_personal { "Personal" } else { "Public" }
    }

    /// First `limit` tags, plus a "+N" marker when more are hidden.
    pub fn tag_preview(&self, limit: usize) -> Vec<String> {
        let mut shown: Vec<String> = self.tags.iter().take(limit).cloned().collect();
        if self.tags.len() > limit {
            shown.push(format!("+{}", self.tags.len() - limit));
        }
        shown
    }

    pub fn tags_display_string(&self) -> String {
        self.tags.join(", ")
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

/// Every editable field of a prompt. Used for Add and as the edit-mode copy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromptDraft {
    pub title: String,
    pub description: String,
    pub full_prompt: String,
    pub model: PromptModel,
    pub tags: Vec<String>,
    pub is_personal: bool,
}

impl PromptDraft {
    pub fn new(title: impl Into<String>, model: PromptModel) -> Self {
        Self {
            title: title.into(),
            model,
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_full_prompt(mut self, full_prompt: impl Into<String>) -> Self {
        self.full_prompt = full_prompt.into();
        self
    }

    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    pub fn personal(mut self, is_personal: bool) -> Self {
        self.is_personal = is_personal;
        self
    }
}

impl From<&Prompt> for PromptDraft {
    fn from(prompt: &Prompt) -> Self {
        Self {
            title: prompt.title.clone(),
            description: prompt.description.clone(),
            full_prompt: prompt.full_prompt.clone(),
            model: prompt.model,
            tags: prompt.tags.clone(),
            is_personal: prompt.is_personal,
        }
    }
}

pub fn estimate_tokens(text: &str) -> usize {
    text.chars().count().div_ceil(4)
}

/// Splits a comma-separated tag line, trimming pieces and dropping empty ones.
/// Duplicates are kept as typed.
pub fn parse_tags(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Prompt {
        Prompt::from_draft(
            PromptId::new("7"),
            PromptDraft::new("Reviewer", PromptModel::Claude)
                .with_full_prompt("abcdefghi")
                .with_tags(["a", "b", "c", "d", "e"])
                .personal(true),
        )
    }

    #[test]
    fn from_draft_starts_unfavorited() {
        let prompt = sample();
        assert!(!prompt.is_favorite);
        assert!(prompt.is_personal);
        assert_eq!(prompt.id.as_str(), "7");
    }

    #[test]
    fn apply_draft_keeps_id_and_favorite() {
        let mut prompt = sample();
        prompt.toggle_favorite();
        prompt.apply_draft(PromptDraft::new("Renamed", PromptModel::Gemini));
        assert_eq!(prompt.id.as_str(), "7");
        assert!(prompt.is_favorite);
        assert_eq!(prompt.title, "Renamed");
        assert_eq!(prompt.model, PromptModel::Gemini);
        assert!(prompt.tags.is_empty());
        assert!(!prompt.is_personal);
    }

    #[test]
    fn token_estimate_rounds_up() {
        assert_eq!(estimate_tokens(""), 0);
        assert_eq!(estimate_tokens("abcd"), 1);
        assert_eq!(sample().estimated_tokens(), 3);
    }

    #[test]
    fn tag_preview_marks_overflow() {
        assert_eq!(sample().tag_preview(3), vec!["a", "b", "c", "+2"]);
        assert_eq!(sample().tag_preview(10).len(), 5);
    }

    #[test]
    fn parse_tags_trims_and_drops_empty_pieces() {
        assert_eq!(
            parse_tags(" coding, review ,,debugging, coding "),
            vec!["coding", "review", "debugging", "coding"]
        );
        assert!(parse_tags("  ,  ").is_empty());
    }

    #[test]
    fn model_names_parse_case_insensitively() {
        assert_eq!("gpt-4".parse::<PromptModel>().unwrap(), PromptModel::Gpt4);
        assert_eq!("GPT4".parse::<PromptModel>().unwrap(), PromptModel::Gpt4);
        assert_eq!(" Claude ".parse::<PromptModel>().unwrap(), PromptModel::Claude);
        assert!("llama".parse::<PromptModel>().is_err());
    }

    #[test]
    fn model_cycle_wraps() {
        assert_eq!(PromptModel::Gemini.next(), PromptModel::Gpt4);
        assert_eq!(PromptModel::Gpt4.previous(), PromptModel::Gemini);
    }

    #[test]
    fn serializes_with_display_model_names() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["model"], "Claude");
        assert_eq!(json["fullPrompt"], "abcdefghi");
        assert_eq!(json["id"], "7");
        let gpt = serde_json::to_value(PromptModel::Gpt4).unwrap();
        assert_eq!(gpt, "GPT-4");
    }
}
