//! Registration form rendering (company, employee, address)

use super::field_renderer::{draw_field, draw_help_text, FIELD_HEIGHT};
use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use crate::state::forms::{FormController, FormPhase};
use crate::state::Focus;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};
use std::ops::Range;

/// Draw the form of the current registration view
pub fn draw_registration_form(frame: &mut Frame, area: Rect, app: &App) {
    let Some(form) = app.state.form.as_ref() else {
        return;
    };
    let is_focused = app.state.focus == Focus::Content;

    let border_color = if is_focused {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let block = Block::default()
        .title(format!(" {} ", form.kind().view().title()))
        .title_bottom(phase_label(form))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border_color));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let banner: Vec<Line> = form
        .form_errors()
        .map(|e| {
            Line::from(Span::styled(
                format!("✖ {}", e.message),
                Style::default().fg(Color::Red),
            ))
        })
        .collect();
    let banner_height = if banner.is_empty() {
        0
    } else {
        banner.len() as u16 + 2
    };

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(banner_height), // Form-level errors
            Constraint::Min(FIELD_HEIGHT),     // Fields
            Constraint::Length(1),             // Help
        ])
        .split(inner);

    if !banner.is_empty() {
        let banner_block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Red));
        frame.render_widget(
            Paragraph::new(banner)
                .wrap(Wrap { trim: true })
                .block(banner_block),
            chunks[0],
        );
    }

    draw_fields(frame, chunks[1], form, is_focused);

    draw_help_text(
        frame,
        chunks[2],
        &[
            ("Tab", "next"),
            ("←/→", "choose"),
            (SAVE_SHORTCUT, "submit"),
            ("Esc", "cancel"),
        ],
    );
}

fn draw_fields(frame: &mut Frame, area: Rect, form: &FormController, is_focused: bool) {
    let capacity = (area.height / FIELD_HEIGHT).max(1) as usize;
    let range = visible_range(form.active_field_index, form.fields.len(), capacity);

    for (slot, index) in range.enumerate() {
        let field_area = Rect {
            x: area.x,
            y: area.y + slot as u16 * FIELD_HEIGHT,
            width: area.width,
            height: FIELD_HEIGHT,
        };
        let is_active = is_focused && index == form.active_field_index;
        draw_field(frame, field_area, &form.fields[index], is_active);
    }
}

/// Window of `capacity` fields that keeps `active` visible
fn visible_range(active: usize, total: usize, capacity: usize) -> Range<usize> {
    if total <= capacity {
        return 0..total;
    }
    let start = active.saturating_sub(capacity - 1).min(total - capacity);
    start..start + capacity
}

fn phase_label(form: &FormController) -> Line<'static> {
    let (text, color) = if form.is_submitting() {
        (" Submitting… ", Color::Yellow)
    } else {
        match form.phase() {
            FormPhase::Succeeded => (" Saved ", Color::Green),
            _ if form.is_dirty() => (" Unsaved changes ", Color::Yellow),
            _ => ("", Color::DarkGray),
        }
    };
    Line::from(Span::styled(
        text,
        Style::default().fg(color).add_modifier(Modifier::BOLD),
    ))
}
