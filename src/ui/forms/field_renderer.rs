//! Field rendering utilities for forms

use crate::state::forms::FormField;
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by one field (borders included)
pub const FIELD_HEIGHT: u16 = 3;

/// Draw a form field; an inline error is shown on the bottom border
pub fn draw_field(frame: &mut Frame, area: Rect, field: &FormField, is_active: bool) {
    let has_error = field.error.is_some();

    let style = if is_active {
        Style::default().fg(Color::Cyan)
    } else {
        Style::default().fg(Color::Gray)
    };

    let border_style = match (is_active, has_error) {
        (_, true) => Style::default().fg(Color::Red),
        (true, false) => Style::default().fg(Color::Cyan),
        (false, false) => Style::default().fg(Color::DarkGray),
    };

    let display_value = field.display_value();
    let display_str = if display_value.is_empty() && !is_active {
        "(empty)".to_string()
    } else {
        display_value
    };

    // Choice fields are cycled, not typed into
    let cursor = if is_active && !field.is_choice() {
        "▌"
    } else {
        ""
    };

    let content = Paragraph::new(Line::from(vec![
        Span::styled(display_str, style),
        Span::styled(cursor, Style::default().fg(Color::Cyan)),
    ]));

    let mut block = Block::default()
        .title(format!(" {} ", field.label))
        .borders(Borders::ALL)
        .border_style(border_style);
    if let Some(error) = &field.error {
        block = block.title_bottom(Line::from(Span::styled(
            format!(" {error} "),
            Style::default().fg(Color::Red).add_modifier(Modifier::ITALIC),
        )));
    }

    frame.render_widget(content.block(block), area);
}

/// Draw a single line of key hints
pub fn draw_help_text(frame: &mut Frame, area: Rect, hints: &[(&str, &str)]) {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, action) in hints {
        spans.push(Span::styled(*key, Style::default().fg(Color::Cyan)));
        spans.push(Span::styled(
            format!(" {action}  "),
            Style::default().fg(Color::DarkGray),
        ));
    }
    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}
