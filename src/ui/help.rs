use crate::ui::colors::RosePine;
use crate::ui::components::centered_rect;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget},
};

fn section(title: &'static str) -> [Line<'static>; 2] {
    [
        Line::from(Span::styled(
            title,
            Style::default().fg(RosePine::LOVE).bold(),
        )),
        Line::from(""),
    ]
}

fn shortcut(keys: &'static str, action: &'static str) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("  {:<10}", keys), Style::default().fg(RosePine::GOLD)),
        Span::raw(action),
    ])
}

/// Render the keyboard shortcut reference as a floating popup
pub fn render_floating_help(frame: &mut Frame) {
    let popup_area = centered_rect(frame.area(), 76, 24);
    Clear.render(popup_area, frame.buffer_mut());

    let block = Block::bordered()
        .title(" 󰘳 Keyboard Shortcuts ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::IRIS).bg(RosePine::SURFACE));

    let inner_area = block.inner(popup_area);
    block.render(popup_area, frame.buffer_mut());

    let rows = Layout::vertical([Constraint::Min(1), Constraint::Length(1)]).split(inner_area);
    let columns =
        Layout::horizontal([Constraint::Percentage(50), Constraint::Percentage(50)]).split(rows[0]);

    let mut left: Vec<Line> = Vec::new();
    left.extend(section("Browse"));
    left.extend([
        shortcut("↑/k ↓/j", "Move selection"),
        shortcut("Tab", "Switch sidebar/list"),
        shortcut("⏎", "Open preview / apply filter"),
        shortcut("/", "Search"),
        shortcut("c", "Clear filters"),
        shortcut("f", "Toggle favorite"),
        shortcut("y", "Copy prompt"),
        shortcut("n", "New prompt"),
        shortcut("d", "Delete prompt"),
        shortcut("q", "Quit"),
    ]);

    let mut right: Vec<Line> = Vec::new();
    right.extend(section("Preview"));
    right.extend([
        shortcut("e", "Edit"),
        shortcut("y", "Copy"),
        shortcut("f", "Toggle favorite"),
        shortcut("d", "Delete"),
        shortcut("Esc", "Close"),
        Line::from(""),
    ]);
    right.extend(section("Forms"));
    right.extend([
        shortcut("Tab", "Next field"),
        shortcut("←/→", "Cycle model"),
        shortcut("Space", "Toggle personal"),
        shortcut("Ctrl+S", "Save"),
        shortcut("Esc", "Cancel"),
    ]);

    Paragraph::new(left)
        .style(Style::default().fg(RosePine::TEXT))
        .render(columns[0], frame.buffer_mut());
    Paragraph::new(right)
        .style(Style::default().fg(RosePine::TEXT))
        .render(columns[1], frame.buffer_mut());

    Paragraph::new("Press Esc or ? to close")
        .alignment(Alignment::Center)
        .style(Style::default().fg(RosePine::MUTED))
        .render(rows[1], frame.buffer_mut());
}
