//! Preview overlay for a single prompt. In edit mode the same area hosts
//! the edit form instead.

use crate::app::App;
use crate::ui::colors::{RosePine, model_color};
use crate::ui::components::centered_rect;
use crate::ui::form::render_form;
use promptbox::models::Prompt;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, Clear, Paragraph, Widget, Wrap},
};

pub fn render(frame: &mut Frame, app: &App) {
    let Some(prompt) = app.coordinator.previewed() else {
        return;
    };

    let area = frame.area();
    let popup_area = centered_rect(
        area,
        area.width.saturating_sub(10).max(60),
        area.height.saturating_sub(6).max(20),
    );
    Clear.render(popup_area, frame.buffer_mut());

    if let Some(form) = &app.edit_form {
        render_form(frame, popup_area, form, " ✎ Edit Prompt ");
        return;
    }

    render_details(frame, popup_area, prompt);
}

fn render_details(frame: &mut Frame, area: Rect, prompt: &Prompt) {
    let star = if prompt.is_favorite { "★ " } else { "" };
    let block = Block::bordered()
        .title(format!(" {}{} ", star, prompt.title))
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::IRIS).bg(RosePine::SURFACE));

    let inner_area = block.inner(area);
    block.render(area, frame.buffer_mut());

    let chunks = Layout::vertical([
        Constraint::Length(4), // Overview
        Constraint::Min(5),    // Full prompt
        Constraint::Length(1), // Help text
    ])
    .split(inner_area);

    let tags = if prompt.tags.is_empty() {
        Span::styled("none", Style::default().fg(RosePine::MUTED).italic())
    } else {
        Span::styled(prompt.tags_display_string(), Style::default().fg(RosePine::FOAM))
    };

    let overview = vec![
        Line::from(Span::styled(
            prompt.description.clone(),
            Style::default().fg(RosePine::SUBTLE),
        )),
        Line::from(""),
        Line::from(vec![
            Span::styled("Model: ", Style::default().fg(RosePine::MUTED)),
            Span::styled(
                format!(" {} ", prompt.model.display_name()),
                Style::default()
                    .fg(RosePine::BASE)
                    .bg(model_color(prompt.model))
                    .bold(),
            ),
            Span::styled("   Visibility: ", Style::default().fg(RosePine::MUTED)),
            Span::styled(
                prompt.visibility_label(),
                Style::default().fg(if prompt.is_personal {
                    RosePine::ROSE
                } else {
                    RosePine::TEXT
                }),
            ),
            Span::styled("   Tokens: ", Style::default().fg(RosePine::MUTED)),
            Span::styled(
                format!("~{}", prompt.estimated_tokens()),
                Style::default().fg(RosePine::GOLD),
            ),
        ]),
        Line::from(vec![
            Span::styled("Tags: ", Style::default().fg(RosePine::MUTED)),
            tags,
        ]),
    ];
    Paragraph::new(overview)
        .wrap(Wrap { trim: true })
        .render(chunks[0], frame.buffer_mut());

    Paragraph::new(prompt.full_prompt.clone())
        .style(Style::default().fg(RosePine::TEXT))
        .wrap(Wrap { trim: false })
        .block(
            Block::bordered()
                .title(" Full Prompt ")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(RosePine::HIGHLIGHT_HIGH)),
        )
        .render(chunks[1], frame.buffer_mut());

    Paragraph::new("e: Edit • y: Copy • f: Favorite • d: Delete • Esc: Close")
        .alignment(Alignment::Center)
        .style(Style::default().fg(RosePine::MUTED))
        .render(chunks[2], frame.buffer_mut());
}
