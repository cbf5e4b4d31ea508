//! CLI Module for PromptBox
//! This module lets users query the prompt catalog straight from the shell
//! without launching the full TUI application.

pub mod commands;

use anyhow::{Result, bail};
use colored::Colorize;
use promptbox::ViewCoordinator;
use promptbox::clipboard::SystemClipboard;
use promptbox::config::AppConfig;
use promptbox::filter::{Category, FilterCriteria, ModelFilter};
use promptbox::models::PromptModel;

/// A parsed command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    List { criteria: FilterCriteria, json: bool },
    Show(String),
    Copy(String),
    Tags,
    Help,
}

/// Parses everything after the program name.
pub fn parse_args(args: &[String]) -> Result<CliCommand> {
    let Some((command, rest)) = args.split_first() else {
        return Ok(CliCommand::Help);
    };

    match command.as_str() {
        "list" | "ls" => parse_list(rest),
        "show" | "view" | "cat" => Ok(CliCommand::Show(required_target(rest, "show")?)),
        "copy" | "cp" => Ok(CliCommand::Copy(required_target(rest, "copy")?)),
        "tags" => Ok(CliCommand::Tags),
        "help" | "--help" | "-h" => Ok(CliCommand::Help),
        other => bail!("unknown command: {}", other),
    }
}

/// Joins the remaining words so `show code review` works without quotes
fn required_target(rest: &[String], command: &str) -> Result<String> {
    if rest.is_empty() {
        bail!("missing prompt id or title (usage: promptbox {} <ID|TITLE>)", command);
    }
    Ok(rest.join(" "))
}

fn parse_list(rest: &[String]) -> Result<CliCommand> {
    let mut criteria = FilterCriteria::default();
    let mut json = false;
    let mut query: Vec<&str> = Vec::new();
    let mut iter = rest.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--json" => json = true,
            "--favorites" | "--fav" => criteria.category = Category::Favorites,
            "--personal" => criteria.category = Category::Personal,
            "--model" | "-m" => {
                let Some(name) = iter.next() else {
                    bail!("--model needs a value (GPT-4, Claude or Gemini)");
                };
                let model: PromptModel = name.parse()?;
                criteria.model = ModelFilter::Only(model);
            }
            "--tag" | "-t" => {
                let Some(tag) = iter.next() else {
                    bail!("--tag needs a value");
                };
                if !criteria.is_tag_selected(tag) {
                    criteria.toggle_tag(tag);
                }
            }
            flag if flag.starts_with("--") => bail!("unknown option: {}", flag),
            word => query.push(word),
        }
    }

    criteria.query = query.join(" ");
    Ok(CliCommand::List { criteria, json })
}

/// Executes CLI commands based on the provided arguments
pub fn execute_cli(args: &[String], config: &AppConfig) -> Result<()> {
    let command = match parse_args(args) {
        Ok(command) => command,
        Err(e) => {
            println!("{}  Error: {}", "┃".bright_magenta(), e);
            print_help();
            return Err(e);
        }
    };
    tracing::debug!(?command, "running cli command");

    let mut coordinator = ViewCoordinator::new(config.build_store());

    match command {
        CliCommand::List { criteria, json } => {
            coordinator.set_query(criteria.query);
            coordinator.set_model(criteria.model);
            coordinator.set_category(criteria.category);
            for tag in &criteria.tags {
                coordinator.toggle_tag(tag);
            }
            commands::list_prompts(&coordinator, json)?;
        }
        CliCommand::Show(target) => commands::show_prompt(coordinator.store(), &target)?,
        CliCommand::Copy(target) => {
            let clipboard = SystemClipboard::with_command(config.clipboard_command.clone());
            commands::copy_prompt(coordinator.store(), &target, &clipboard)?;
        }
        CliCommand::Tags => commands::list_tags(&coordinator),
        CliCommand::Help => print_help(),
    }

    Ok(())
}

/// Prints the help message with available commands
fn print_help() {
    println!(
        "{}  {}",
        "┃".bright_magenta(),
        "PROMPTBOX CLI - AI PROMPT LIBRARY".bold()
    );

    println!("{}  {}", "┃".bright_magenta(), "USAGE:".bright_yellow());
    println!("{}  promptbox [COMMAND] [ARGS]", "┃".bright_magenta());
    println!("{}  {}", "┃".bright_magenta(), "COMMANDS:".bright_yellow());

    let commands = [
        ("list, ls [QUERY]", "List prompts, optionally matching QUERY"),
        ("  --model <MODEL>", "Only prompts for GPT-4, Claude or Gemini"),
        ("  --favorites | --personal", "Only favorites / only personal prompts"),
        ("  --tag <TAG>", "Prompts with TAG (repeat for any of several)"),
        ("  --json", "Print the matching prompts as JSON"),
        ("show, view <ID|TITLE>", "Display a prompt (partial title works)"),
        ("copy, cp <ID|TITLE>", "Copy a prompt's text to the clipboard"),
        ("tags", "List every tag in use"),
        ("help", "Display this help message"),
    ];
    for (usage, description) in commands {
        println!(
            "{}  {:<27} {}",
            "┃".bright_magenta(),
            usage.bright_white(),
            description
        );
    }

    println!("{}  {}", "┃".bright_magenta(), "TIP:".bright_green());
    println!(
        "{}  Run with no arguments to launch the full TUI (Terminal User Interface) mode",
        "┃".bright_magenta()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(line: &str) -> Vec<String> {
        line.split_whitespace().map(String::from).collect()
    }

    #[test]
    fn no_arguments_means_help() {
        assert_eq!(parse_args(&[]).unwrap(), CliCommand::Help);
    }

    #[test]
    fn list_collects_filters() {
        let command = parse_args(&args(
            "list code review --model claude --personal --tag writing --tag ux --json",
        ))
        .unwrap();

        let CliCommand::List { criteria, json } = command else {
            panic!("expected list");
        };
        assert!(json);
        assert_eq!(criteria.query, "code review");
        assert_eq!(criteria.model, ModelFilter::Only(PromptModel::Claude));
        assert_eq!(criteria.category, Category::Personal);
        assert_eq!(criteria.tags, vec!["writing", "ux"]);
    }

    #[test]
    fn plain_list_is_unrestricted() {
        let CliCommand::List { criteria, json } = parse_args(&args("ls")).unwrap() else {
            panic!("expected list");
        };
        assert!(!json);
        assert!(criteria.is_unrestricted());
    }

    #[test]
    fn show_and_copy_take_the_rest_as_target() {
        assert_eq!(
            parse_args(&args("show data analysis")).unwrap(),
            CliCommand::Show("data analysis".to_string())
        );
        assert_eq!(
            parse_args(&args("cp 3")).unwrap(),
            CliCommand::Copy("3".to_string())
        );
    }

    #[test]
    fn bad_usage_is_an_error() {
        assert!(parse_args(&args("show")).is_err());
        assert!(parse_args(&args("list --model llama")).is_err());
        assert!(parse_args(&args("list --tag")).is_err());
        assert!(parse_args(&args("list --verbose")).is_err());
        assert!(parse_args(&args("frobnicate")).is_err());
    }
}
