//! UI Components and Layout Module
//!
//! Reusable pieces shared by every screen: the bottom status bar with its
//! context-aware shortcuts, popup placement and width-aware truncation.

use crate::app::{App, Focus, InputMode};
use crate::ui::colors::RosePine;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Paragraph, Widget},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Renders the bottom bar: status message (or result count) on the left,
/// shortcuts for the current context on the right.
pub fn render_bottom_bar(frame: &mut Frame, area: Rect, app: &App) {
    let navbar_chunks = Layout::horizontal([Constraint::Fill(1), Constraint::Fill(1)]).split(area);

    let left_content = Paragraph::new(status_line(app))
        .alignment(Alignment::Left)
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        );

    let right_content = Paragraph::new(get_context_shortcuts(app))
        .alignment(Alignment::Right)
        .style(Style::default().fg(RosePine::MUTED))
        .block(
            Block::bordered()
                .border_type(BorderType::Rounded)
                .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        );

    left_content.render(navbar_chunks[0], frame.buffer_mut());
    right_content.render(navbar_chunks[1], frame.buffer_mut());
}

fn status_line(app: &App) -> Line<'static> {
    if let Some(error) = &app.error_message {
        return Line::from(Span::styled(
            format!(" ✗ {} ", error),
            Style::default().fg(RosePine::LOVE).bold(),
        ));
    }
    if let Some(success) = &app.success_message {
        return Line::from(Span::styled(
            format!(" ✓ {} ", success),
            Style::default().fg(RosePine::FOAM).bold(),
        ));
    }

    let visible = app.coordinator.visible().len();
    let total = app.coordinator.store().len();
    Line::from(vec![
        Span::styled(" 󰅴 PromptBox ", Style::default().fg(RosePine::BASE).bg(RosePine::IRIS)),
        Span::styled(" ❯ ", Style::default().fg(RosePine::MUTED)),
        Span::styled(
            format!("{} of {} prompts", visible, total),
            Style::default().fg(RosePine::SUBTLE),
        ),
    ])
}

fn get_context_shortcuts(app: &App) -> String {
    if app.has_pending_action() {
        return " [y] Confirm │ [n/Esc] Cancel ".to_string();
    }
    if app.show_help {
        return " [Esc/?] Close Help ".to_string();
    }
    if app.new_form.is_some() || app.coordinator.is_editing() {
        return " [Tab] Field │ [←→] Model │ [Ctrl+S] Save │ [Esc] Cancel ".to_string();
    }
    if app.coordinator.previewed().is_some() {
        return " [e] Edit │ [y] Copy │ [f] Favorite │ [d] Delete │ [Esc] Close ".to_string();
    }

    match (app.input_mode.clone(), app.focus) {
        (InputMode::Search, _) => " [⏎] Done │ [Esc] Clear ".to_string(),
        (InputMode::Normal, Focus::Sidebar) => {
            " [↑↓] Navigate │ [⏎] Apply │ [Tab] List │ [c] Clear │ [q] Quit ".to_string()
        }
        (InputMode::Normal, Focus::List) => {
            " [⏎] Open │ [/] Search │ [f] Fav │ [y] Copy │ [n] New │ [?] Help │ [q] Quit "
                .to_string()
        }
    }
}

/// Centers a `width` x `height` popup inside `area`, shrinking it to fit.
pub fn centered_rect(area: Rect, width: u16, height: u16) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}

/// Cuts `text` to at most `max_width` terminal columns, ending in '…' when
/// anything was dropped.
pub fn truncate(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > max_width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("exact", 5), "exact");
    }

    #[test]
    fn truncate_counts_columns_not_bytes() {
        assert_eq!(truncate("Code Review Assistant", 8), "Code Re…");
        // Wide glyphs take two columns each
        assert_eq!(truncate("日本語テキスト", 5), "日本…");
        assert_eq!(truncate("anything", 0), "");
    }

    #[test]
    fn centered_rect_fits_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        assert_eq!(centered_rect(area, 60, 20), Rect::new(20, 10, 60, 20));
        assert_eq!(centered_rect(area, 200, 80), area);
    }
}
