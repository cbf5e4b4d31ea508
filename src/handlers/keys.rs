//! Keyboard Input Handling Module
//!
//! Translates terminal key events into catalog actions. Routing goes from
//! the innermost layer outwards: pending confirmation, help popup, new
//! prompt form, preview (and its edit form), search input, and finally the
//! main screen.

use crate::app::{App, Focus, FormField, InputMode, PromptForm};
use ratatui::crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

/// What a form key press asks the caller to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FormAction {
    None,
    Save,
    Cancel,
}

/// Main keyboard event handler and dispatcher.
/// Returns true when the application should quit.
pub fn handle_key_events(key: KeyEvent, app: &mut App) -> bool {
    if key.kind == KeyEventKind::Release {
        return false;
    }

    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    if app.has_pending_action() {
        handle_confirmation_keys(key, app);
        return false;
    }

    if app.show_help {
        if matches!(key.code, KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('q')) {
            app.show_help = false;
        }
        return false;
    }

    if app.new_form.is_some() {
        handle_new_form_keys(key, app);
        return false;
    }

    if app.coordinator.previewed().is_some() {
        if app.coordinator.is_editing() {
            handle_edit_form_keys(key, app);
        } else {
            handle_preview_keys(key, app);
        }
        return false;
    }

    if app.input_mode == InputMode::Search {
        handle_search_keys(key, app);
        return false;
    }

    handle_main_keys(key, app)
}

fn handle_confirmation_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
            app.confirm_pending_action();
        }
        KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
            app.cancel_pending_action();
        }
        _ => {}
    }
}

fn handle_main_keys(key: KeyEvent, app: &mut App) -> bool {
    match key.code {
        KeyCode::Char('q') | KeyCode::Char('Q') => return true,

        KeyCode::Char('?') => {
            app.clear_messages();
            app.show_help = true;
        }

        KeyCode::Up | KeyCode::Char('k') => {
            app.clear_messages();
            app.previous_item();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            app.clear_messages();
            app.next_item();
        }

        KeyCode::Tab | KeyCode::BackTab => app.toggle_focus(),
        KeyCode::Left | KeyCode::Char('h') => app.focus = Focus::Sidebar,
        KeyCode::Right | KeyCode::Char('l') => app.focus = Focus::List,

        KeyCode::Enter => match app.focus {
            Focus::List => app.open_selected_preview(),
            Focus::Sidebar => app.apply_sidebar_item(),
        },

        KeyCode::Char('/') => {
            app.clear_messages();
            app.input_mode = InputMode::Search;
        }

        KeyCode::Char('n') | KeyCode::Char('N') => {
            app.clear_messages();
            app.open_new_form();
        }

        KeyCode::Char('c') | KeyCode::Char('C') => app.reset_filters(),

        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.clear_messages();
            match app.selected_prompt_id() {
                Some(id) => app.toggle_favorite(&id),
                None => app.set_error_message("No prompt selected".to_string()),
            }
        }

        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.clear_messages();
            match app.selected_prompt_id() {
                Some(id) => app.copy_prompt(&id),
                None => app.set_error_message("No prompt selected".to_string()),
            }
        }

        KeyCode::Delete | KeyCode::Char('d') | KeyCode::Char('D') => {
            app.clear_messages();
            match app.selected_prompt_id() {
                Some(id) => app.request_delete_confirmation(id),
                None => app.set_error_message("No prompt selected to delete".to_string()),
            }
        }

        KeyCode::Esc => app.clear_messages(),

        _ => {}
    }

    false
}

/// Search edits the query live; every key narrows or widens the list.
fn handle_search_keys(key: KeyEvent, app: &mut App) {
    match key.code {
        KeyCode::Enter => app.input_mode = InputMode::Normal,
        KeyCode::Esc => {
            app.coordinator.set_query(String::new());
            app.input_mode = InputMode::Normal;
            app.clamp_selection();
        }
        KeyCode::Backspace => app.pop_search_char(),
        KeyCode::Char(c) => app.push_search_char(c),
        _ => {}
    }
}

fn handle_preview_keys(key: KeyEvent, app: &mut App) {
    let Some(id) = app.coordinator.previewed_id().cloned() else {
        return;
    };

    match key.code {
        KeyCode::Esc | KeyCode::Char('q') => app.close_preview(),
        KeyCode::Char('e') | KeyCode::Char('E') => {
            app.clear_messages();
            app.begin_edit();
        }
        KeyCode::Char('y') | KeyCode::Char('Y') => {
            app.clear_messages();
            app.copy_prompt(&id);
        }
        KeyCode::Char('f') | KeyCode::Char('F') => {
            app.clear_messages();
            app.toggle_favorite(&id);
        }
        KeyCode::Char('d') | KeyCode::Char('D') | KeyCode::Delete => {
            app.clear_messages();
            app.request_delete_confirmation(id);
        }
        _ => {}
    }
}

fn handle_edit_form_keys(key: KeyEvent, app: &mut App) {
    // Edit mode without buffers; rebuild them from the draft
    if app.edit_form.is_none() {
        app.edit_form = app.coordinator.draft().map(PromptForm::from_draft);
    }
    let Some(form) = app.edit_form.as_mut() else {
        return;
    };
    let action = handle_form_keys(key, form);

    match action {
        FormAction::Save => app.save_edit(),
        FormAction::Cancel => app.cancel_edit(),
        FormAction::None => app.sync_edit_draft(),
    }
}

fn handle_new_form_keys(key: KeyEvent, app: &mut App) {
    let action = match app.new_form.as_mut() {
        Some(form) => handle_form_keys(key, form),
        None => return,
    };

    match action {
        FormAction::Save => app.submit_new_form(),
        FormAction::Cancel => app.new_form = None,
        FormAction::None => {}
    }
}

fn handle_form_keys(key: KeyEvent, form: &mut PromptForm) -> FormAction {
    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);

    match key.code {
        KeyCode::Char('s') if ctrl => FormAction::Save,
        KeyCode::Esc => FormAction::Cancel,
        KeyCode::Tab | KeyCode::Down => {
            form.field = form.field.next();
            FormAction::None
        }
        KeyCode::BackTab | KeyCode::Up => {
            form.field = form.field.previous();
            FormAction::None
        }
        KeyCode::Left => {
            form.cycle_model(false);
            FormAction::None
        }
        KeyCode::Right => {
            form.cycle_model(true);
            FormAction::None
        }
        KeyCode::Enter if form.field == FormField::Personal => {
            form.is_personal = !form.is_personal;
            FormAction::None
        }
        KeyCode::Enter => {
            form.newline();
            FormAction::None
        }
        KeyCode::Backspace => {
            form.backspace();
            FormAction::None
        }
        KeyCode::Char(c) if !ctrl => {
            form.insert_char(c);
            FormAction::None
        }
        _ => FormAction::None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::tests::test_app;
    use promptbox::filter::Category;

    fn press(app: &mut App, code: KeyCode) -> bool {
        handle_key_events(KeyEvent::new(code, KeyModifiers::NONE), app)
    }

    fn ctrl(app: &mut App, c: char) -> bool {
        handle_key_events(KeyEvent::new(KeyCode::Char(c), KeyModifiers::CONTROL), app)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            press(app, KeyCode::Char(c));
        }
    }

    #[test]
    fn q_quits_from_main_screen_only() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        assert!(!press(&mut app, KeyCode::Char('q')));
        assert!(app.coordinator.previewed().is_none());
        assert!(press(&mut app, KeyCode::Char('q')));
    }

    #[test]
    fn search_mode_filters_live() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('/'));
        type_text(&mut app, "writ");
        assert_eq!(app.coordinator.criteria().query, "writ");
        // Two titles plus the "copywriting" tag
        assert_eq!(app.coordinator.visible().len(), 3);

        press(&mut app, KeyCode::Enter);
        assert_eq!(app.input_mode, InputMode::Normal);
        assert_eq!(app.coordinator.visible().len(), 3);

        press(&mut app, KeyCode::Char('/'));
        press(&mut app, KeyCode::Esc);
        assert_eq!(app.coordinator.visible().len(), 6);
    }

    #[test]
    fn sidebar_enter_applies_category() {
        let mut app = test_app();
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.coordinator.criteria().category, Category::Personal);
        assert_eq!(app.coordinator.visible().len(), 2);

        press(&mut app, KeyCode::Char('c'));
        assert!(app.coordinator.criteria().is_unrestricted());
    }

    #[test]
    fn preview_edit_and_save_with_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Enter);
        assert_eq!(app.coordinator.previewed_id().unwrap().as_str(), "2");

        press(&mut app, KeyCode::Char('e'));
        assert!(app.coordinator.is_editing());
        press(&mut app, KeyCode::Backspace);
        type_text(&mut app, "h!");
        assert_eq!(
            app.coordinator.draft().unwrap().title,
            "Creative Writing Coach!"
        );

        ctrl(&mut app, 's');
        assert!(!app.coordinator.is_editing());
        assert_eq!(
            app.coordinator.previewed().unwrap().title,
            "Creative Writing Coach!"
        );
    }

    #[test]
    fn escape_cancels_edit_then_closes_preview() {
        let mut app = test_app();
        press(&mut app, KeyCode::Enter);
        press(&mut app, KeyCode::Char('e'));
        type_text(&mut app, " draft");
        press(&mut app, KeyCode::Esc);

        assert!(!app.coordinator.is_editing());
        assert_eq!(
            app.coordinator.previewed().unwrap().title,
            "Code Review Assistant"
        );

        press(&mut app, KeyCode::Esc);
        assert!(app.coordinator.previewed().is_none());
    }

    #[test]
    fn delete_needs_confirmation() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('d'));
        assert!(app.has_pending_action());
        press(&mut app, KeyCode::Char('n'));
        assert_eq!(app.coordinator.store().len(), 6);

        press(&mut app, KeyCode::Char('d'));
        press(&mut app, KeyCode::Char('y'));
        assert_eq!(app.coordinator.store().len(), 5);
        assert_eq!(app.coordinator.visible()[0].id.as_str(), "2");
    }

    #[test]
    fn new_prompt_form_with_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('n'));
        type_text(&mut app, "Haiku");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Right);
        press(&mut app, KeyCode::Tab);
        type_text(&mut app, "poetry, short");
        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::Char(' '));
        ctrl(&mut app, 's');

        assert!(app.new_form.is_none());
        let first = app.coordinator.visible()[0];
        assert_eq!(first.title, "Haiku");
        assert_eq!(first.model.display_name(), "Gemini");
        assert_eq!(first.tags, vec!["poetry", "short"]);
        assert!(first.is_personal);
        assert!(!first.is_favorite);
    }

    #[test]
    fn favorite_toggle_from_list() {
        let mut app = test_app();
        press(&mut app, KeyCode::Down);
        press(&mut app, KeyCode::Char('f'));
        assert!(app.coordinator.visible()[1].is_favorite);
        press(&mut app, KeyCode::Char('f'));
        assert!(!app.coordinator.visible()[1].is_favorite);
    }

    #[test]
    fn help_popup_swallows_keys() {
        let mut app = test_app();
        press(&mut app, KeyCode::Char('?'));
        assert!(app.show_help);
        assert!(!press(&mut app, KeyCode::Char('n')));
        assert!(app.new_form.is_none());
        press(&mut app, KeyCode::Esc);
        assert!(!app.show_help);
    }
}
