//! promptbox - AI Prompt Library
//!
//! A terminal user interface for browsing, filtering and editing a library
//! of reusable AI prompts. Built with Rust and ratatui.
//!
//! With no arguments the full TUI starts; any argument runs a one-shot CLI
//! command instead (see `promptbox help`).

use crate::app::App;
use color_eyre::Result;
use color_eyre::eyre::{WrapErr, eyre};
use promptbox::ViewCoordinator;
use promptbox::clipboard::{BackgroundClipboard, SystemClipboard};
use promptbox::config::AppConfig;
use promptbox::logging::{self, LogOutput};
use ratatui::{
    Terminal,
    backend::CrosstermBackend,
    crossterm::{
        event::{self, Event},
        execute,
        terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
    },
};
use std::io::{self};
use std::time::Duration;

mod app;
mod cli;
mod handlers;
mod ui;

/// Application entry point and initialization
fn main() -> Result<()> {
    color_eyre::install()?;

    let config = AppConfig::load().wrap_err("Failed to load configuration")?;
    let args: Vec<String> = std::env::args().skip(1).collect();

    if !args.is_empty() {
        // Keep CLI output clean unless RUST_LOG asks for more
        logging::init("warn", LogOutput::Stderr)?;
        return cli::execute_cli(&args, &config).map_err(|e| eyre!("{:#}", e));
    }

    let log_file = logging::init(&config.log_level, LogOutput::File)?;
    tracing::info!(log_file = ?log_file, "starting promptbox");

    let coordinator = ViewCoordinator::new(config.build_store());
    let clipboard =
        BackgroundClipboard::spawn(SystemClipboard::with_command(config.clipboard_command.clone()));
    let mut app = App::new(coordinator, clipboard, config.default_model);

    run_tui(&mut app)?;

    tracing::info!("promptbox exited");
    Ok(())
}

/// Owns the terminal for the lifetime of the UI and restores it afterwards,
/// even when the event loop fails.
fn run_tui(app: &mut App) -> Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = event_loop(&mut terminal, app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    let mut should_quit = false;

    while !should_quit {
        terminal.draw(|frame| app.render(frame))?;

        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                should_quit = handlers::keys::handle_key_events(key, app);
            }
        }
        app.tick();
    }

    Ok(())
}
