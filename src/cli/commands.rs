use anyhow::{Context, Result, bail};
use colored::{ColoredString, Colorize};
use promptbox::clipboard::Clipboard;
use promptbox::models::{Prompt, PromptId, PromptModel, PromptStore};
use promptbox::ViewCoordinator;

fn bar() -> ColoredString {
    "┃".bright_magenta()
}

fn model_badge(model: PromptModel) -> ColoredString {
    let name = model.display_name();
    match model {
        PromptModel::Gpt4 => name.bright_green(),
        PromptModel::Claude => name.bright_yellow(),
        PromptModel::Gemini => name.bright_blue(),
    }
}

/// Resolves a command-line target: an exact id first, then a title match.
pub fn resolve<'a>(store: &'a PromptStore, id_or_title: &str) -> Option<&'a Prompt> {
    store
        .get(&PromptId::new(id_or_title))
        .or_else(|| store.find_by_title(id_or_title))
}

/// Lists the prompts that pass the coordinator's current criteria
pub fn list_prompts(coordinator: &ViewCoordinator, json: bool) -> Result<()> {
    let visible = coordinator.visible();

    if json {
        let output =
            serde_json::to_string_pretty(&visible).context("Failed to serialize prompts")?;
        println!("{}", output);
        return Ok(());
    }

    if visible.is_empty() {
        println!("{}  No prompts match the given filters", bar());
        return Ok(());
    }

    println!(
        "{}  {} ({} of {})",
        bar(),
        "PROMPTS".bright_green().bold(),
        visible.len(),
        coordinator.store().len()
    );
    println!("{}", "─".repeat(60).bright_magenta());

    for prompt in visible {
        println!("{}", summary_line(prompt));
        println!("{}     {}", bar(), prompt.description.dimmed());
    }

    Ok(())
}

fn summary_line(prompt: &Prompt) -> String {
    let star = if prompt.is_favorite {
        "★".yellow()
    } else {
        " ".normal()
    };
    let tags = prompt
        .tag_preview(3)
        .iter()
        .map(|t| {
            if t.starts_with('+') {
                t.clone()
            } else {
                format!("#{}", t)
            }
        })
        .collect::<Vec<_>>()
        .join(" ");

    format!(
        "{}  {} {} {} [{}] {}",
        bar(),
        star,
        format!("{:>3}", prompt.id.as_str()).yellow(),
        prompt.title.bright_white().bold(),
        model_badge(prompt.model),
        tags.cyan()
    )
}

/// Shows one prompt in full
pub fn show_prompt(store: &PromptStore, id_or_title: &str) -> Result<()> {
    let Some(prompt) = resolve(store, id_or_title) else {
        print_not_found(store, id_or_title);
        bail!("no prompt found matching '{}'", id_or_title);
    };

    println!(
        "{}  {} {}",
        bar(),
        "PROMPT".bright_green().bold(),
        prompt.title.bold()
    );
    println!("{}", "─".repeat(60).bright_magenta());
    println!("{}  {}: {}", bar(), "ID".bright_blue(), prompt.id);
    println!("{}  {}: {}", bar(), "Model".bright_blue(), model_badge(prompt.model));
    println!(
        "{}  {}: {}",
        bar(),
        "Visibility".bright_blue(),
        prompt.visibility_label()
    );
    println!(
        "{}  {}: {}",
        bar(),
        "Favorite".bright_blue(),
        if prompt.is_favorite { "yes" } else { "no" }
    );
    println!(
        "{}  {}: {}",
        bar(),
        "Tags".bright_blue(),
        if prompt.tags.is_empty() {
            "none".to_string()
        } else {
            prompt.tags_display_string()
        }
    );
    println!(
        "{}  {}: ~{}",
        bar(),
        "Tokens".bright_blue(),
        prompt.estimated_tokens()
    );
    println!("{}  {}: {}", bar(), "Description".bright_blue(), prompt.description);
    println!("{}", "─".repeat(60).bright_magenta());

    for line in prompt.full_prompt.lines() {
        println!("{}  {}", bar(), line);
    }

    Ok(())
}

/// Copies a prompt's text and waits for the clipboard tool to finish.
pub fn copy_prompt(store: &PromptStore, id_or_title: &str, clipboard: &dyn Clipboard) -> Result<()> {
    let Some(prompt) = resolve(store, id_or_title) else {
        print_not_found(store, id_or_title);
        bail!("no prompt found matching '{}'", id_or_title);
    };

    if let Err(e) = clipboard.copy(&prompt.full_prompt) {
        tracing::warn!(id = %prompt.id, error = %e, "clipboard write failed");
        return Err(e).context("Failed to copy prompt to clipboard");
    }

    println!(
        "{}  Copied '{}' to clipboard ({} characters)",
        bar(),
        prompt.title.bright_white(),
        prompt.full_prompt.chars().count()
    );
    Ok(())
}

/// Prints every tag in use with how many prompts carry it
pub fn list_tags(coordinator: &ViewCoordinator) {
    let tags = coordinator.tag_catalog();
    if tags.is_empty() {
        println!("{}  No tags yet", bar());
        return;
    }

    println!("{}  {}", bar(), "TAGS".bright_green().bold());
    println!("{}", "─".repeat(60).bright_magenta());
    let prompts = coordinator.store().prompts();
    for tag in tags {
        let count = prompts.iter().filter(|p| p.has_tag(&tag)).count();
        println!("{}  {} {}", bar(), format!("{:<20}", format!("#{}", tag)).cyan(), count);
    }
}

fn print_not_found(store: &PromptStore, id_or_title: &str) {
    println!(
        "{}  No prompt found with id or title: {}",
        bar(),
        id_or_title
    );
    println!("{}  Available prompts:", bar());
    println!("{}", "─".repeat(60).bright_magenta());

    for prompt in store.prompts().iter().take(10) {
        println!(
            "{}  {}. {}",
            bar(),
            prompt.id.to_string().yellow(),
            prompt.title.bright_white()
        );
    }

    if store.len() > 10 {
        println!("{}  ... and {} more", bar(), store.len() - 10);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use promptbox::PromptBoxError;
    use promptbox::models::TimestampIds;
    use promptbox::models::seed::sample_prompts;
    use std::cell::RefCell;

    fn seed_store() -> PromptStore {
        PromptStore::with_prompts(sample_prompts(), Box::new(TimestampIds::new()))
    }

    #[derive(Default)]
    struct CapturingClipboard {
        copied: RefCell<Vec<String>>,
        fail: bool,
    }

    impl Clipboard for CapturingClipboard {
        fn copy(&self, text: &str) -> promptbox::Result<()> {
            if self.fail {
                return Err(PromptBoxError::ClipboardUnavailable {
                    tried: "test".to_string(),
                });
            }
            self.copied.borrow_mut().push(text.to_string());
            Ok(())
        }
    }

    #[test]
    fn resolve_prefers_id_then_title() {
        let store = seed_store();
        assert_eq!(resolve(&store, "4").unwrap().title, "UI/UX Design Consultant");
        assert_eq!(resolve(&store, "marketing").unwrap().id.as_str(), "5");
        assert!(resolve(&store, "nothing like this").is_none());
    }

    #[test]
    fn copy_sends_full_prompt() {
        let store = seed_store();
        let clipboard = CapturingClipboard::default();
        copy_prompt(&store, "Data Analysis Expert", &clipboard).unwrap();

        let copied = clipboard.copied.borrow();
        assert_eq!(copied.len(), 1);
        assert!(copied[0].starts_with("You are a data analysis expert."));
    }

    #[test]
    fn copy_failure_is_reported() {
        let store = seed_store();
        let clipboard = CapturingClipboard {
            fail: true,
            ..CapturingClipboard::default()
        };
        assert!(copy_prompt(&store, "1", &clipboard).is_err());
        assert!(copy_prompt(&store, "missing", &CapturingClipboard::default()).is_err());
    }

    #[test]
    fn json_listing_uses_display_model_names() {
        let store = seed_store();
        let json = serde_json::to_string(&store.prompts()[0]).unwrap();
        assert!(json.contains("\"model\":\"GPT-4\""));
        assert!(json.contains("\"fullPrompt\""));
        assert!(json.contains("\"isFavorite\":true"));
    }
}
