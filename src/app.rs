use crate::ui::{catalog, form, help, preview};
use promptbox::clipboard::{BackgroundClipboard, CopyOutcome};
use promptbox::filter::{Category, ModelFilter};
use promptbox::models::{PromptDraft, PromptId, PromptModel, parse_tags};
use promptbox::ViewCoordinator;
use ratatui::Frame;

/// Which pane receives navigation keys on the main screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Sidebar,
    List,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// Entries of the filter sidebar, top to bottom
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SidebarItem {
    Category(Category),
    Model(ModelFilter),
    Tag(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationState {
    None,
    DeletePrompt { id: PromptId, title: String },
}

/// Fields of the new/edit prompt form, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Title,
    Description,
    Model,
    Tags,
    Personal,
    Prompt,
}

impl FormField {
    pub const ALL: [FormField; 6] = [
        FormField::Title,
        FormField::Description,
        FormField::Model,
        FormField::Tags,
        FormField::Personal,
        FormField::Prompt,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            FormField::Title => "Title",
            FormField::Description => "Description",
            FormField::Model => "Model",
            FormField::Tags => "Tags",
            FormField::Personal => "Personal",
            FormField::Prompt => "Full Prompt",
        }
    }

    pub fn next(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    pub fn previous(self) -> Self {
        let idx = Self::ALL.iter().position(|f| *f == self).unwrap_or(0);
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

/// Text buffers behind the new/edit form. Tags are edited as one
/// comma-separated line and split on save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptForm {
    pub title: String,
    pub description: String,
    pub full_prompt: String,
    pub tags: String,
    pub model: PromptModel,
    pub is_personal: bool,
    pub field: FormField,
}

impl PromptForm {
    pub fn blank(model: PromptModel) -> Self {
        Self::from_draft(&PromptDraft::new("", model))
    }

    pub fn from_draft(draft: &PromptDraft) -> Self {
        Self {
            title: draft.title.clone(),
            description: draft.description.clone(),
            full_prompt: draft.full_prompt.clone(),
            tags: draft.tags.join(", "),
            model: draft.model,
            is_personal: draft.is_personal,
            field: FormField::Title,
        }
    }

    pub fn to_draft(&self) -> PromptDraft {
        PromptDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            full_prompt: self.full_prompt.clone(),
            model: self.model,
            tags: parse_tags(&self.tags),
            is_personal: self.is_personal,
        }
    }

    fn focused_buffer(&mut self) -> Option<&mut String> {
        match self.field {
            FormField::Title => Some(&mut self.title),
            FormField::Description => Some(&mut self.description),
            FormField::Tags => Some(&mut self.tags),
            FormField::Prompt => Some(&mut self.full_prompt),
            FormField::Model | FormField::Personal => None,
        }
    }

    pub fn insert_char(&mut self, c: char) {
        match self.field {
            FormField::Model if c == ' ' => self.model = self.model.next(),
            FormField::Personal if c == ' ' => self.is_personal = !self.is_personal,
            _ => {
                if let Some(buffer) = self.focused_buffer() {
                    buffer.push(c);
                }
            }
        }
    }

    /// Only the prompt body takes line breaks; elsewhere Enter moves on.
    pub fn newline(&mut self) {
        if self.field == FormField::Prompt {
            self.full_prompt.push('\n');
        } else {
            self.field = self.field.next();
        }
    }

    pub fn backspace(&mut self) {
        if let Some(buffer) = self.focused_buffer() {
            buffer.pop();
        }
    }

    pub fn cycle_model(&mut self, forward: bool) {
        if self.field == FormField::Model {
            self.model = if forward {
                self.model.next()
            } else {
                self.model.previous()
            };
        }
    }
}

/// Terminal UI state around the catalog coordinator
#[derive(Debug)]
pub struct App {
    pub coordinator: ViewCoordinator,
    pub clipboard: BackgroundClipboard,
    pub default_model: PromptModel,
    pub focus: Focus,
    pub input_mode: InputMode,
    pub selected_prompt: usize,
    pub selected_sidebar: usize,
    pub show_help: bool,
    pub new_form: Option<PromptForm>,
    pub edit_form: Option<PromptForm>,
    pub confirmation_state: ConfirmationState,
    pub error_message: Option<String>,
    pub success_message: Option<String>,
}

impl App {
    pub fn new(
        coordinator: ViewCoordinator,
        clipboard: BackgroundClipboard,
        default_model: PromptModel,
    ) -> Self {
        Self {
            coordinator,
            clipboard,
            default_model,
            focus: Focus::List,
            input_mode: InputMode::Normal,
            selected_prompt: 0,
            selected_sidebar: 0,
            show_help: false,
            new_form: None,
            edit_form: None,
            confirmation_state: ConfirmationState::None,
            error_message: None,
            success_message: None,
        }
    }

    /// Categories, models, then tags. Selected tags that no prompt carries
    /// any more stay listed so they can still be deselected.
    pub fn sidebar_items(&self) -> Vec<SidebarItem> {
        let mut tags = self.coordinator.tag_catalog();
        for tag in &self.coordinator.criteria().tags {
            if !tags.contains(tag) {
                tags.push(tag.clone());
            }
        }

        Category::ALL
            .into_iter()
            .map(SidebarItem::Category)
            .chain(ModelFilter::options().into_iter().map(SidebarItem::Model))
            .chain(tags.into_iter().map(SidebarItem::Tag))
            .collect()
    }

    pub fn is_sidebar_item_active(&self, item: &SidebarItem) -> bool {
        let criteria = self.coordinator.criteria();
        match item {
            SidebarItem::Category(category) => criteria.category == *category,
            SidebarItem::Model(model) => criteria.model == *model,
            SidebarItem::Tag(tag) => criteria.is_tag_selected(tag),
        }
    }

    pub fn selected_prompt_id(&self) -> Option<PromptId> {
        self.coordinator
            .visible()
            .get(self.selected_prompt)
            .map(|p| p.id.clone())
    }

    /// Keeps the list cursor inside the visible range after filtering or
    /// deleting.
    pub fn clamp_selection(&mut self) {
        let visible = self.coordinator.visible().len();
        self.selected_prompt = self.selected_prompt.min(visible.saturating_sub(1));
        let sidebar = self.sidebar_items().len();
        self.selected_sidebar = self.selected_sidebar.min(sidebar.saturating_sub(1));
    }

    pub fn next_item(&mut self) {
        match self.focus {
            Focus::List => {
                let len = self.coordinator.visible().len();
                if len > 0 {
                    self.selected_prompt = (self.selected_prompt + 1) % len;
                }
            }
            Focus::Sidebar => {
                let len = self.sidebar_items().len();
                if len > 0 {
                    self.selected_sidebar = (self.selected_sidebar + 1) % len;
                }
            }
        }
    }

    pub fn previous_item(&mut self) {
        match self.focus {
            Focus::List => {
                let len = self.coordinator.visible().len();
                if len > 0 {
                    self.selected_prompt = (self.selected_prompt + len - 1) % len;
                }
            }
            Focus::Sidebar => {
                let len = self.sidebar_items().len();
                if len > 0 {
                    self.selected_sidebar = (self.selected_sidebar + len - 1) % len;
                }
            }
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::List => Focus::Sidebar,
            Focus::Sidebar => Focus::List,
        };
    }

    /// Applies the highlighted sidebar entry to the filter criteria
    pub fn apply_sidebar_item(&mut self) {
        let Some(item) = self.sidebar_items().get(self.selected_sidebar).cloned() else {
            return;
        };

        match item {
            SidebarItem::Category(category) => self.coordinator.set_category(category),
            SidebarItem::Model(model) => self.coordinator.set_model(model),
            SidebarItem::Tag(tag) => {
                self.coordinator.toggle_tag(&tag);
            }
        }
        self.selected_prompt = 0;
        self.clamp_selection();
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut query = self.coordinator.criteria().query.clone();
        query.push(c);
        self.coordinator.set_query(query);
        self.selected_prompt = 0;
    }

    pub fn pop_search_char(&mut self) {
        let mut query = self.coordinator.criteria().query.clone();
        query.pop();
        self.coordinator.set_query(query);
        self.clamp_selection();
    }

    pub fn reset_filters(&mut self) {
        self.coordinator.reset_filters();
        self.selected_prompt = 0;
        self.clamp_selection();
        self.set_success_message("Filters cleared".to_string());
    }

    pub fn open_selected_preview(&mut self) {
        if let Some(id) = self.selected_prompt_id() {
            self.coordinator.open_preview(&id);
            self.edit_form = None;
        }
    }

    pub fn close_preview(&mut self) {
        self.coordinator.close_preview();
        self.edit_form = None;
    }

    pub fn toggle_favorite(&mut self, id: &PromptId) {
        if self.coordinator.toggle_favorite(id) {
            let marked = self
                .coordinator
                .store()
                .get(id)
                .is_some_and(|p| p.is_favorite);
            self.set_success_message(format!(
                "Prompt {} as favorite",
                if marked { "marked" } else { "unmarked" }
            ));
        }
        self.clamp_selection();
    }

    /// Queues the prompt body for the clipboard. The outcome arrives later
    /// through [`App::tick`].
    pub fn copy_prompt(&mut self, id: &PromptId) {
        if !self.coordinator.copy_text(id, &self.clipboard) {
            self.set_error_message("Nothing to copy".to_string());
        }
    }

    pub fn begin_edit(&mut self) {
        if self.coordinator.begin_edit() {
            self.edit_form = self.coordinator.draft().map(PromptForm::from_draft);
        }
    }

    /// Mirrors the edit form into the coordinator's draft
    pub fn sync_edit_draft(&mut self) {
        if let (Some(form), Some(draft)) = (&self.edit_form, self.coordinator.draft_mut()) {
            *draft = form.to_draft();
        }
    }

    pub fn save_edit(&mut self) {
        self.sync_edit_draft();
        if self.coordinator.save_edit() {
            self.set_success_message("Changes saved".to_string());
        }
        self.edit_form = None;
        self.clamp_selection();
    }

    pub fn cancel_edit(&mut self) {
        self.coordinator.cancel_edit();
        self.edit_form = None;
    }

    pub fn open_new_form(&mut self) {
        self.new_form = Some(PromptForm::blank(self.default_model));
    }

    pub fn submit_new_form(&mut self) {
        if let Some(form) = self.new_form.take() {
            let id = self.coordinator.add(form.to_draft());
            tracing::info!(id = %id, "prompt added");
            self.selected_prompt = 0;
            self.clamp_selection();
            self.set_success_message("Prompt added".to_string());
        }
    }

    pub fn request_delete_confirmation(&mut self, id: PromptId) {
        if let Some(prompt) = self.coordinator.store().get(&id) {
            let title = prompt.title.clone();
            self.set_error_message(format!(
                "Delete '{}'? (y: Confirm, n/Esc: Cancel)",
                title
            ));
            self.confirmation_state = ConfirmationState::DeletePrompt { id, title };
        }
    }

    pub fn has_pending_action(&self) -> bool {
        !matches!(self.confirmation_state, ConfirmationState::None)
    }

    pub fn confirm_pending_action(&mut self) -> bool {
        let current = std::mem::replace(&mut self.confirmation_state, ConfirmationState::None);
        match current {
            ConfirmationState::DeletePrompt { id, title } => {
                if self.coordinator.previewed_id() == Some(&id) {
                    self.coordinator.delete_previewed();
                    self.edit_form = None;
                } else {
                    self.coordinator.delete(&id);
                }
                self.clamp_selection();
                self.set_success_message(format!("Prompt '{}' deleted", title));
                true
            }
            ConfirmationState::None => false,
        }
    }

    pub fn cancel_pending_action(&mut self) {
        self.confirmation_state = ConfirmationState::None;
        self.clear_messages();
    }

    pub fn set_error_message(&mut self, message: String) {
        self.error_message = Some(message);
        self.success_message = None;
    }

    pub fn set_success_message(&mut self, message: String) {
        self.success_message = Some(message);
        self.error_message = None;
    }

    pub fn clear_messages(&mut self) {
        self.error_message = None;
        self.success_message = None;
    }

    /// Called once per event-loop turn; picks up finished clipboard copies.
    pub fn tick(&mut self) {
        while let Some(outcome) = self.clipboard.poll_outcome() {
            match outcome {
                CopyOutcome::Copied { .. } => {
                    self.set_success_message("Prompt copied to clipboard".to_string())
                }
                CopyOutcome::Failed(reason) => {
                    self.set_error_message(format!("Copy failed: {}", reason))
                }
            }
        }
    }

    pub fn render(&self, frame: &mut Frame) {
        catalog::render(frame, self);

        if self.coordinator.previewed().is_some() {
            preview::render(frame, self);
        }
        if let Some(new_form) = &self.new_form {
            form::render_floating_form(frame, new_form, " ✚ Add New Prompt ");
        }
        if self.show_help {
            help::render_floating_help(frame);
        }
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use promptbox::clipboard::Clipboard;
    use promptbox::models::seed::sample_prompts;
    use promptbox::models::{PromptStore, TimestampIds};

    pub(crate) struct NullClipboard;

    impl Clipboard for NullClipboard {
        fn copy(&self, _text: &str) -> promptbox::Result<()> {
            Ok(())
        }
    }

    pub(crate) fn test_app() -> App {
        let store = PromptStore::with_prompts(sample_prompts(), Box::new(TimestampIds::new()));
        App::new(
            ViewCoordinator::new(store),
            BackgroundClipboard::spawn(NullClipboard),
            PromptModel::Claude,
        )
    }

    #[test]
    fn sidebar_lists_categories_models_then_tags() {
        let app = test_app();
        let items = app.sidebar_items();
        assert_eq!(items[0], SidebarItem::Category(Category::All));
        assert_eq!(items[3], SidebarItem::Model(ModelFilter::Any));
        assert_eq!(items[7], SidebarItem::Tag("coding".to_string()));
        assert_eq!(items.len(), 3 + 4 + 17);
    }

    #[test]
    fn applying_sidebar_entries_updates_criteria() {
        let mut app = test_app();
        app.selected_sidebar = 1;
        app.apply_sidebar_item();
        assert_eq!(app.coordinator.criteria().category, Category::Favorites);

        app.selected_sidebar = 7;
        app.apply_sidebar_item();
        assert!(app.coordinator.criteria().is_tag_selected("coding"));
        assert_eq!(app.coordinator.visible().len(), 1);

        app.apply_sidebar_item();
        assert!(!app.coordinator.criteria().is_tag_selected("coding"));
    }

    #[test]
    fn orphaned_selected_tag_stays_deselectable() {
        let mut app = test_app();
        app.selected_sidebar = 7;
        app.apply_sidebar_item();
        assert!(app.coordinator.criteria().is_tag_selected("coding"));

        app.coordinator.delete(&PromptId::new("1"));
        app.clamp_selection();
        assert!(app.coordinator.visible().is_empty());

        let items = app.sidebar_items();
        let coding = SidebarItem::Tag("coding".to_string());
        let row = items.iter().position(|item| *item == coding).unwrap();
        assert!(app.is_sidebar_item_active(&coding));

        app.selected_sidebar = row;
        app.apply_sidebar_item();
        assert!(!app.coordinator.criteria().is_tag_selected("coding"));
        assert_eq!(app.coordinator.visible().len(), 5);
        assert!(!app.sidebar_items().contains(&coding));
    }

    #[test]
    fn form_round_trips_through_draft() {
        let mut form = PromptForm::blank(PromptModel::Gemini);
        for c in "Title".chars() {
            form.insert_char(c);
        }
        form.field = FormField::Tags;
        for c in "a, b,,c".chars() {
            form.insert_char(c);
        }
        form.field = FormField::Personal;
        form.insert_char(' ');
        form.field = FormField::Model;
        form.cycle_model(true);

        let draft = form.to_draft();
        assert_eq!(draft.title, "Title");
        assert_eq!(draft.tags, vec!["a", "b", "c"]);
        assert!(draft.is_personal);
        assert_eq!(draft.model, PromptModel::Gpt4);
    }

    #[test]
    fn newline_only_breaks_lines_in_prompt_body() {
        let mut form = PromptForm::blank(PromptModel::Gpt4);
        form.newline();
        assert_eq!(form.field, FormField::Description);
        form.field = FormField::Prompt;
        form.insert_char('a');
        form.newline();
        form.insert_char('b');
        assert_eq!(form.full_prompt, "a\nb");
    }

    #[test]
    fn new_form_adds_prompt_at_top() {
        let mut app = test_app();
        app.selected_prompt = 3;
        app.open_new_form();
        assert_eq!(app.new_form.as_ref().unwrap().model, PromptModel::Claude);
        app.new_form.as_mut().unwrap().title = "Fresh".to_string();
        app.submit_new_form();

        assert!(app.new_form.is_none());
        assert_eq!(app.selected_prompt, 0);
        assert_eq!(app.coordinator.visible()[0].title, "Fresh");
        assert_eq!(app.coordinator.store().len(), 7);
    }

    #[test]
    fn edit_flow_saves_through_coordinator() {
        let mut app = test_app();
        app.selected_prompt = 1;
        app.open_selected_preview();
        app.begin_edit();
        app.edit_form.as_mut().unwrap().title = "New Title".to_string();
        app.save_edit();

        assert!(app.edit_form.is_none());
        assert!(!app.coordinator.is_editing());
        assert_eq!(app.coordinator.previewed().unwrap().title, "New Title");
    }

    #[test]
    fn confirmed_delete_of_previewed_prompt_closes_preview() {
        let mut app = test_app();
        app.open_selected_preview();
        app.begin_edit();
        let id = app.coordinator.previewed_id().cloned().unwrap();
        app.request_delete_confirmation(id);
        assert!(app.has_pending_action());

        assert!(app.confirm_pending_action());
        assert!(app.coordinator.previewed().is_none());
        assert!(app.edit_form.is_none());
        assert_eq!(app.coordinator.store().len(), 5);
    }

    #[test]
    fn selection_is_clamped_after_filtering() {
        let mut app = test_app();
        app.selected_prompt = 5;
        for c in "xyzzy".chars() {
            app.push_search_char(c);
        }
        app.clamp_selection();
        assert_eq!(app.selected_prompt, 0);
        assert!(app.selected_prompt_id().is_none());
    }

    #[test]
    fn toggle_favorite_reports_status() {
        let mut app = test_app();
        app.toggle_favorite(&PromptId::new("2"));
        assert_eq!(
            app.success_message.as_deref(),
            Some("Prompt marked as favorite")
        );
    }

    fn rendered_text(app: &App) -> String {
        use ratatui::{Terminal, backend::TestBackend};

        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect()
    }

    #[test]
    fn renders_catalog_preview_and_forms() {
        let mut app = test_app();
        let screen = rendered_text(&app);
        assert!(screen.contains("Code Review Assistant"));
        assert!(screen.contains("Prompts (6)"));

        app.open_selected_preview();
        assert!(rendered_text(&app).contains("Full Prompt"));

        app.begin_edit();
        assert!(rendered_text(&app).contains("Edit Prompt"));

        app.close_preview();
        app.open_new_form();
        app.show_help = true;
        let screen = rendered_text(&app);
        assert!(screen.contains("Add New Prompt"));
        assert!(screen.contains("Keyboard Shortcuts"));
    }

    #[test]
    fn renders_empty_state() {
        let mut app = test_app();
        for c in "xyzzy".chars() {
            app.push_search_char(c);
        }
        assert!(rendered_text(&app).contains("No prompts match"));
    }
}
