//! Sample catalog shown on first launch.

use crate::models::{Prompt, PromptId, PromptModel};

struct SeedEntry {
    id: &'static str,
    title: &'static str,
    description: &'static str,
    full_prompt: &'static str,
    model: PromptModel,
    tags: &'static [&'static str],
    is_favorite: bool,
    is_personal: bool,
}

const SEED: &[SeedEntry] = &[
    SeedEntry {
        id: "1",
        title: "Code Review Assistant",
        description: "Analyze code for bugs, performance issues, and best practices",
        full_prompt: "You are an expert code reviewer. Analyze the following code for bugs, performance issues, security vulnerabilities, and adherence to best practices. Provide specific suggestions for improvement.",
        model: PromptModel::Gpt4,
        tags: &["coding", "review", "debugging"],
        is_favorite: true,
        is_personal: false,
    },
    SeedEntry {
        id: "2",
        title: "Creative Writing Coach",
        description: "Help improve creative writing with detailed feedback",
        full_prompt: "You are a creative writing coach. Help me improve my writing by providing constructive feedback on style, character development, plot structure, and narrative flow.",
        model: PromptModel::Claude,
        tags: &["writing", "creative", "feedback"],
        is_favorite: false,
        is_personal: false,
    },
    SeedEntry {
        id: "3",
        title: "Data Analysis Expert",
        description: "Analyze datasets and provide insights with visualizations",
        full_prompt: "You are a data analysis expert. Help me analyze this dataset, identify patterns, trends, and anomalies. Suggest appropriate visualizations and provide actionable insights.",
        model: PromptModel::Gemini,
        tags: &["data", "analysis", "insights"],
        is_favorite: true,
        is_personal: true,
    },
    SeedEntry {
        id: "4",
        title: "UI/UX Design Consultant",
        description: "Provide design feedback and improvement suggestions",
        full_prompt: "You are a UI/UX design consultant. Review this design and provide feedback on usability, accessibility, visual hierarchy, and user experience. Suggest specific improvements.",
        model: PromptModel::Gpt4,
        tags: &["design", "ui", "ux", "feedback"],
        is_favorite: false,
        is_personal: false,
    },
    SeedEntry {
        id: "5",
        title: "Marketing Copy Generator",
        description: "Create compelling marketing copy for various platforms",
        full_prompt: "You are a marketing copywriter. Create compelling, persuasive copy that converts. Focus on benefits over features, use emotional triggers, and include clear calls-to-action.",
        model: PromptModel::Claude,
        tags: &["marketing", "copywriting", "conversion"],
        is_favorite: true,
        is_personal: false,
    },
    SeedEntry {
        id: "6",
        title: "Technical Documentation Writer",
        description: "Transform complex technical concepts into clear documentation",
        full_prompt: "You are a technical documentation specialist. Transform complex technical information into clear, concise, and user-friendly documentation. Use examples, diagrams, and step-by-step instructions.",
        model: PromptModel::Gemini,
        tags: &["documentation", "technical", "writing"],
        is_favorite: false,
        is_personal: true,
    },
];

/// The six sample prompts, in display order
pub fn sample_prompts() -> Vec<Prompt> {
    SEED.iter()
        .map(|entry| Prompt {
            id: PromptId::new(entry.id),
            title: entry.title.to_string(),
            description: entry.description.to_string(),
            full_prompt: entry.full_prompt.to_string(),
            model: entry.model,
            tags: entry.tags.iter().map(|t| t.to_string()).collect(),
            is_favorite: entry.is_favorite,
            is_personal: entry.is_personal,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn sample_ids_are_unique() {
        let prompts = sample_prompts();
        let ids: HashSet<_> = prompts.iter().map(|p| p.id.clone()).collect();
        assert_eq!(ids.len(), prompts.len());
        assert_eq!(prompts.len(), 6);
    }

    #[test]
    fn sample_covers_every_model() {
        let prompts = sample_prompts();
        for model in PromptModel::ALL {
            assert!(prompts.iter().any(|p| p.model == model));
        }
    }
}
