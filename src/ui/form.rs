//! New/edit prompt form.

use crate::app::{FormField, PromptForm};
use crate::ui::colors::{RosePine, model_color};
use crate::ui::components::centered_rect;
use promptbox::models::{PromptModel, estimate_tokens};
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

/// Renders the form as a centered popup over whatever is below it.
pub fn render_floating_form(frame: &mut Frame, form: &PromptForm, title: &str) {
    let popup_area = centered_rect(frame.area(), 90, 32);
    Clear.render(popup_area, frame.buffer_mut());
    render_form(frame, popup_area, form, title);
}

pub fn render_form(frame: &mut Frame, area: Rect, form: &PromptForm, title: &str) {
    let block = Block::bordered()
        .title(title.to_string())
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::IRIS).bg(RosePine::SURFACE));

    let inner_area = block.inner(area);
    block.render(area, frame.buffer_mut());

    let chunks = Layout::vertical([
        Constraint::Length(3), // Title
        Constraint::Length(3), // Description
        Constraint::Length(3), // Model + personal
        Constraint::Length(3), // Tags
        Constraint::Min(4),    // Full prompt
        Constraint::Length(1), // Help text
    ])
    .split(inner_area);

    let choice_row =
        Layout::horizontal([Constraint::Percentage(60), Constraint::Percentage(40)]).split(chunks[2]);

    render_text_field(frame, chunks[0], form, FormField::Title, &form.title);
    render_text_field(frame, chunks[1], form, FormField::Description, &form.description);
    render_model_selector(frame, choice_row[0], form);
    render_personal_toggle(frame, choice_row[1], form);
    render_text_field(frame, chunks[3], form, FormField::Tags, &form.tags);
    render_text_field(frame, chunks[4], form, FormField::Prompt, &form.full_prompt);

    let help = Paragraph::new(format!(
        "Tab/Shift+Tab: Field • ←/→: Model • Space: Toggle • Ctrl+S: Save • Esc: Cancel • ~{} tokens",
        estimate_tokens(&form.full_prompt)
    ))
    .alignment(Alignment::Center)
    .style(Style::default().fg(RosePine::MUTED));
    help.render(chunks[5], frame.buffer_mut());
}

fn field_block(form: &PromptForm, field: FormField) -> Block<'static> {
    let focused = form.field == field;
    let title = match field {
        FormField::Tags => " Tags (comma separated) ".to_string(),
        _ => format!(" {} ", field.label()),
    };

    Block::bordered()
        .title(title)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            RosePine::GOLD
        } else {
            RosePine::HIGHLIGHT_HIGH
        }))
}

fn render_text_field(frame: &mut Frame, area: Rect, form: &PromptForm, field: FormField, value: &str) {
    let focused = form.field == field;

    let mut lines: Vec<Line> = value
        .split('\n')
        .map(|line| Line::from(Span::styled(line.to_string(), Style::default().fg(RosePine::TEXT))))
        .collect();

    if focused {
        if let Some(last) = lines.last_mut() {
            last.spans
                .push(Span::styled("▏", Style::default().fg(RosePine::GOLD)));
        }
    }

    // Keep the cursor line in view for long bodies
    let visible_rows = area.height.saturating_sub(2) as usize;
    let scroll = lines.len().saturating_sub(visible_rows.max(1)) as u16;

    Paragraph::new(lines)
        .block(field_block(form, field))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0))
        .render(area, frame.buffer_mut());
}

fn render_model_selector(frame: &mut Frame, area: Rect, form: &PromptForm) {
    let focused = form.field == FormField::Model;

    let mut spans = Vec::new();
    if focused {
        spans.push(Span::styled("◀ ", Style::default().fg(RosePine::MUTED)));
    }
    for model in PromptModel::ALL {
        let label = format!(" {} ", model.display_name());
        let style = if model == form.model {
            Style::default().fg(RosePine::BASE).bg(model_color(model)).bold()
        } else {
            Style::default().fg(RosePine::MUTED)
        };
        spans.push(Span::styled(label, style));
        spans.push(Span::raw(" "));
    }
    if focused {
        spans.push(Span::styled("▶", Style::default().fg(RosePine::MUTED)));
    }

    Paragraph::new(Line::from(spans))
        .block(field_block(form, FormField::Model))
        .render(area, frame.buffer_mut());
}

fn render_personal_toggle(frame: &mut Frame, area: Rect, form: &PromptForm) {
    let (mark, label, color) = if form.is_personal {
        ("[x]", "Personal", RosePine::ROSE)
    } else {
        ("[ ]", "Public", RosePine::SUBTLE)
    };

    Paragraph::new(Line::from(vec![
        Span::styled(format!("{} ", mark), Style::default().fg(RosePine::IRIS)),
        Span::styled(label, Style::default().fg(color)),
    ]))
    .block(field_block(form, FormField::Personal))
    .render(area, frame.buffer_mut());
}
