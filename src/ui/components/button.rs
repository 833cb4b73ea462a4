//! Button component for TUI

use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Button height in rows (top border + content + bottom border)
pub const BUTTON_HEIGHT: u16 = 3;

/// Visual state of a button
#[derive(Debug, Clone, Copy, Default)]
pub struct ButtonState {
    /// Under the keyboard cursor
    pub is_selected: bool,
    /// Points at the page currently shown
    pub is_current: bool,
    /// The pane holding the button has focus
    pub has_focus: bool,
}

/// Render a generic button with border
pub fn render_button(frame: &mut Frame, area: Rect, content: &str, state: ButtonState) {
    let highlight = state.is_selected && state.has_focus;

    let border_style = if highlight {
        Style::default().fg(Color::Cyan)
    } else if state.is_current {
        Style::default().fg(Color::Blue)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let text_style = if highlight {
        Style::default()
            .fg(Color::Cyan)
            .add_modifier(Modifier::BOLD)
    } else if state.is_current {
        Style::default().fg(Color::Blue).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };

    let paragraph = Paragraph::new(format!(" {content} ")).style(text_style);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style);

    frame.render_widget(paragraph.block(block), area);
}

/// Render a sidebar entry; submenu children are indented
pub fn render_sidebar_button(
    frame: &mut Frame,
    area: Rect,
    label: &str,
    indent: bool,
    state: ButtonState,
) {
    let area = if indent {
        Rect {
            x: area.x + 2,
            width: area.width.saturating_sub(2),
            ..area
        }
    } else {
        area
    };
    render_button(frame, area, label, state);
}
