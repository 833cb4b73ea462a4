//! Layout components (header, sidebar, status bar)

use crate::app::App;
use crate::platform::SAVE_SHORTCUT;
use crate::state::{Focus, NotificationLevel, View};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Width of the navigation sidebar
pub const SIDEBAR_WIDTH: u16 = 24;

/// Areas of the main screen
pub struct ScreenAreas {
    pub sidebar: Rect,
    pub header: Rect,
    pub content: Rect,
    pub status: Rect,
}

/// Split the screen into sidebar, header, content and status bar
pub fn create_layout(area: Rect) -> ScreenAreas {
    // Reserve bottom line for status bar
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Length(SIDEBAR_WIDTH), // Sidebar
            Constraint::Min(0),                // Main content
        ])
        .split(rows[0]);

    let main = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Page header
            Constraint::Min(0),    // Page
        ])
        .split(columns[1]);

    ScreenAreas {
        sidebar: columns[0],
        header: main[0],
        content: main[1],
        status: rows[1],
    }
}

/// Draw the page header with the application name and page title
pub fn draw_header(frame: &mut Frame, area: Rect, app: &App) {
    let title = Line::from(vec![
        Span::styled(
            " Upoint ",
            Style::default()
                .fg(Color::Blue)
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled("│ ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            app.state.current_view.title(),
            Style::default().add_modifier(Modifier::BOLD),
        ),
    ]);
    let header = Paragraph::new(title).block(
        Block::default()
            .borders(Borders::BOTTOM)
            .border_style(Style::default().fg(Color::DarkGray)),
    );
    frame.render_widget(header, area);
}

/// Draw the status bar: key hints, then the status message or latest notification
pub fn draw_status_bar(frame: &mut Frame, area: Rect, app: &App) {
    let mut spans = vec![Span::styled(
        format!(" {} ", get_view_hints(app)),
        Style::default().fg(Color::Gray),
    )];

    if let Some(msg) = &app.status_message {
        spans.push(Span::raw("| "));
        spans.push(Span::styled(msg, Style::default().fg(Color::Yellow)));
    } else if let Some(notification) = app.state.notifications.latest() {
        let color = match notification.level {
            NotificationLevel::Success => Color::Green,
            NotificationLevel::Error => Color::Red,
            NotificationLevel::Info => Color::Cyan,
        };
        spans.push(Span::raw("| "));
        spans.push(Span::styled(
            notification.summary(),
            Style::default().fg(color),
        ));
    }

    let status = Paragraph::new(Line::from(spans)).style(Style::default().bg(Color::DarkGray));
    frame.render_widget(status, area);
}

/// Get keyboard hints for the current view and focus
fn get_view_hints(app: &App) -> String {
    let view = app.state.current_view;
    match (view, app.state.focus) {
        (View::SignedOut, _) => "q:quit".to_string(),
        (_, Focus::Sidebar) => "j/k:nav  Enter:open  Tab:content  q:quit".to_string(),
        (View::Dashboard, Focus::Content) => "r:refresh  Tab:menu  q:quit".to_string(),
        (_, Focus::Content) => format!("Tab:next  {SAVE_SHORTCUT}:submit  Esc:cancel"),
    }
}
