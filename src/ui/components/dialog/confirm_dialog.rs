//! Confirmation dialog for leaving a dirty form or logging out

use super::base::{render_dialog, DialogConfig};
use crate::state::{ConfirmKind, PendingConfirm};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
    Frame,
};

/// Render a confirmation dialog with Cancel / confirm options
pub fn render_confirm_dialog(frame: &mut Frame, confirm: &PendingConfirm) {
    let accent = match confirm.kind {
        ConfirmKind::DiscardChanges => Color::Yellow,
        ConfirmKind::Logout => Color::Red,
    };

    // Cancel first, then the confirm action
    let options = [(false, "Cancel", Color::White), (true, confirm.kind.confirm_label(), accent)]
        .into_iter()
        .map(|(value, label, color)| {
            let is_selected = confirm.selected_option == value;
            let prefix = if is_selected { "▸ " } else { "  " };
            let style = if is_selected {
                Style::default().fg(color).add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::DarkGray)
            };
            Line::from(Span::styled(format!("{prefix}{label}"), style))
        })
        .collect();

    let hint = vec![
        Span::styled("↑↓", Style::default().fg(Color::Cyan)),
        Span::styled(" select  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Enter", Style::default().fg(Color::Cyan)),
        Span::styled(" confirm  ", Style::default().fg(Color::DarkGray)),
        Span::styled("Esc", Style::default().fg(Color::Cyan)),
        Span::styled(" cancel", Style::default().fg(Color::DarkGray)),
    ];

    render_dialog(
        frame,
        DialogConfig {
            title: confirm.kind.title(),
            title_color: accent,
            border_color: accent,
            message: confirm.kind.message(),
            options,
            hint: Some(hint),
            max_width: 56,
        },
    );
}
