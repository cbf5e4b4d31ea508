//! Main catalog screen: search header, filter sidebar, prompt cards and the
//! bottom bar.

use crate::app::{App, Focus, InputMode, SidebarItem};
use crate::ui::colors::{RosePine, model_color};
use crate::ui::components::{render_bottom_bar, truncate};
use promptbox::filter::ModelFilter;
use promptbox::models::Prompt;
use ratatui::{
    Frame,
    layout::{Alignment, Constraint, Layout, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, BorderType, List, ListItem, ListState, Paragraph, Widget},
};
use unicode_width::UnicodeWidthStr;

const TAG_PREVIEW: usize = 3;

pub fn render(frame: &mut Frame, app: &App) {
    let main_area = frame.area();

    let block = Block::bordered()
        .title(" PromptBox - AI Prompt Library ")
        .title_alignment(Alignment::Center)
        .border_type(BorderType::Rounded)
        .style(Style::default().fg(RosePine::HIGHLIGHT_HIGH));

    let inner_area = block.inner(main_area);
    block.render(main_area, frame.buffer_mut());

    let chunks = Layout::vertical([
        Constraint::Length(3), // Search
        Constraint::Min(5),    // Sidebar + cards
        Constraint::Length(3), // Bottom bar
    ])
    .split(inner_area);

    let body = Layout::horizontal([Constraint::Length(28), Constraint::Min(20)]).split(chunks[1]);

    render_search(frame, chunks[0], app);
    render_sidebar(frame, body[0], app);
    render_prompt_list(frame, body[1], app);
    render_bottom_bar(frame, chunks[2], app);
}

fn render_search(frame: &mut Frame, area: Rect, app: &App) {
    let searching = app.input_mode == InputMode::Search;
    let query = &app.coordinator.criteria().query;

    let content = if query.is_empty() && !searching {
        Line::from(Span::styled(
            " Search prompts... (press /)",
            Style::default().fg(RosePine::MUTED).italic(),
        ))
    } else {
        let mut spans = vec![
            Span::styled("  ", Style::default().fg(RosePine::IRIS)),
            Span::styled(query.clone(), Style::default().fg(RosePine::TEXT)),
        ];
        if searching {
            spans.push(Span::styled("▏", Style::default().fg(RosePine::GOLD)));
        }
        Line::from(spans)
    };

    let border = if searching {
        RosePine::GOLD
    } else {
        RosePine::HIGHLIGHT_HIGH
    };

    Paragraph::new(content)
        .block(
            Block::bordered()
                .title(" Search ")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(border)),
        )
        .render(area, frame.buffer_mut());
}

fn sidebar_heading(text: &'static str) -> ListItem<'static> {
    ListItem::new(Line::from(Span::styled(
        text,
        Style::default().fg(RosePine::LOVE).bold(),
    )))
}

fn render_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::Sidebar;
    let items = app.sidebar_items();

    // Headings are interleaved with the selectable entries, so the list
    // index of each entry is tracked separately.
    let mut rows: Vec<ListItem> = Vec::new();
    let mut selected_row = None;
    let mut last_section = None;

    for (i, item) in items.iter().enumerate() {
        let section = match item {
            SidebarItem::Category(_) => "Categories",
            SidebarItem::Model(_) => "Models",
            SidebarItem::Tag(_) => "Tags",
        };
        if last_section != Some(section) {
            if last_section.is_some() {
                rows.push(ListItem::new(""));
            }
            rows.push(sidebar_heading(section));
            last_section = Some(section);
        }

        let active = app.is_sidebar_item_active(item);
        let (label, color) = match item {
            SidebarItem::Category(category) => (category.label().to_string(), RosePine::TEXT),
            SidebarItem::Model(filter) => {
                let color = match filter {
                    ModelFilter::Any => RosePine::TEXT,
                    ModelFilter::Only(model) => model_color(*model),
                };
                (filter.label().to_string(), color)
            }
            SidebarItem::Tag(tag) => (format!("#{}", tag), RosePine::SUBTLE),
        };

        let marker = match (item, active) {
            (SidebarItem::Tag(_), true) => "[x] ",
            (SidebarItem::Tag(_), false) => "[ ] ",
            (_, true) => "● ",
            (_, false) => "○ ",
        };

        let mut style = Style::default().fg(color);
        if active {
            style = style.bold();
        }

        if i == app.selected_sidebar {
            selected_row = Some(rows.len());
        }
        rows.push(ListItem::new(Line::from(vec![
            Span::styled(format!(" {}", marker), Style::default().fg(RosePine::IRIS)),
            Span::styled(truncate(&label, area.width.saturating_sub(8) as usize), style),
        ])));
    }

    let list = List::new(rows)
        .block(
            Block::bordered()
                .title(" Filters ")
                .border_type(BorderType::Rounded)
                .border_style(Style::default().fg(if focused {
                    RosePine::IRIS
                } else {
                    RosePine::HIGHLIGHT_HIGH
                })),
        )
        .highlight_style(if focused {
            Style::default().bg(RosePine::HIGHLIGHT_LOW).bold()
        } else {
            Style::default()
        })
        .highlight_symbol(if focused { "▶" } else { " " });

    let mut list_state = ListState::default();
    list_state.select(selected_row);
    frame.render_stateful_widget(list, area, &mut list_state);
}

/// Columns left for the title once the star, badge and gaps are placed
fn title_width(star: &str, badge: &str, width: usize) -> usize {
    width.saturating_sub(star.width() + badge.width() + 4)
}

/// One card: a header line, the description, the tag preview and a spacer
fn prompt_card(prompt: &Prompt, width: usize) -> ListItem<'static> {
    let star = if prompt.is_favorite { "★ " } else { "☆ " };
    let badge = format!(" {} ", prompt.model.display_name());
    let title_cols = title_width(star, &badge, width);

    let header = Line::from(vec![
        Span::styled(
            star.to_string(),
            Style::default().fg(if prompt.is_favorite {
                RosePine::GOLD
            } else {
                RosePine::MUTED
            }),
        ),
        Span::styled(
            truncate(&prompt.title, title_cols),
            Style::default().fg(RosePine::TEXT).bold(),
        ),
        Span::raw("  "),
        Span::styled(
            badge,
            Style::default().fg(RosePine::BASE).bg(model_color(prompt.model)),
        ),
    ]);

    let description = Line::from(Span::styled(
        format!("  {}", truncate(&prompt.description, width.saturating_sub(4))),
        Style::default().fg(RosePine::SUBTLE),
    ));

    let mut tag_spans = vec![Span::raw("  ")];
    for tag in prompt.tag_preview(TAG_PREVIEW) {
        let span = if tag.starts_with('+') {
            Span::styled(format!("{} ", tag), Style::default().fg(RosePine::MUTED))
        } else {
            Span::styled(format!("#{} ", tag), Style::default().fg(RosePine::FOAM))
        };
        tag_spans.push(span);
    }
    if prompt.is_personal {
        tag_spans.push(Span::styled(" Personal", Style::default().fg(RosePine::ROSE)));
    }

    ListItem::new(vec![header, description, Line::from(tag_spans), Line::from("")])
}

fn render_prompt_list(frame: &mut Frame, area: Rect, app: &App) {
    let focused = app.focus == Focus::List;
    let visible = app.coordinator.visible();

    let block = Block::bordered()
        .title(format!(" Prompts ({}) ", visible.len()))
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(if focused {
            RosePine::IRIS
        } else {
            RosePine::HIGHLIGHT_HIGH
        }));

    if visible.is_empty() {
        let inner = block.inner(area);
        block.render(area, frame.buffer_mut());

        let hint = if app.coordinator.store().is_empty() {
            "No prompts yet. Press 'n' to create one."
        } else {
            "No prompts match the current filters. Press 'c' to clear them."
        };
        let centered = Layout::vertical([
            Constraint::Fill(1),
            Constraint::Length(1),
            Constraint::Fill(1),
        ])
        .split(inner)[1];

        Paragraph::new(hint)
            .alignment(Alignment::Center)
            .style(Style::default().fg(RosePine::MUTED))
            .render(centered, frame.buffer_mut());
        return;
    }

    let width = area.width.saturating_sub(4) as usize;
    let cards: Vec<ListItem> = visible.iter().map(|p| prompt_card(p, width)).collect();

    let list = List::new(cards)
        .block(block)
        .highlight_style(if focused {
            Style::default().bg(RosePine::HIGHLIGHT_LOW)
        } else {
            Style::default()
        })
        .highlight_symbol(if focused { "▌" } else { " " });

    let mut list_state = ListState::default();
    list_state.select(Some(app.selected_prompt));
    frame.render_stateful_widget(list, area, &mut list_state);
}
