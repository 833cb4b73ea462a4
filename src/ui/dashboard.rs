//! Dashboard: summary counters and welcome panel

use crate::app::App;
use crate::state::{DashboardStats, Focus};
use ratatui::{
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

const TILE_HEIGHT: u16 = 5;

/// Draw the dashboard
pub fn draw(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TILE_HEIGHT), // Counters
            Constraint::Min(0),              // Welcome
        ])
        .margin(1)
        .split(area);

    let tiles = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[0]);

    let stats = &app.state.dashboard;
    draw_tile(frame, tiles[0], "Total employees", &count_text(stats, stats.employees));
    draw_tile(frame, tiles[1], "Total time records", &count_text(stats, stats.records));

    let border_color = if app.state.focus == Focus::Content {
        Color::Cyan
    } else {
        Color::DarkGray
    };
    let welcome = Paragraph::new(vec![
        Line::from(Span::styled(
            "Welcome to the management system",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Select an option in the side menu to get started.",
            Style::default().fg(Color::Gray),
        )),
    ])
    .wrap(Wrap { trim: true })
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(border_color)),
    );
    frame.render_widget(welcome, chunks[1]);
}

/// Counter text; a dash until the value is known
fn count_text(stats: &DashboardStats, value: Option<u64>) -> String {
    match value {
        Some(total) => total.to_string(),
        None if stats.loading => "…".to_string(),
        None => "—".to_string(),
    }
}

fn draw_tile(frame: &mut Frame, area: Rect, title: &str, value: &str) {
    let tile = Paragraph::new(vec![
        Line::from(""),
        Line::from(Span::styled(
            value.to_string(),
            Style::default()
                .fg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )),
    ])
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .title(format!(" {title} "))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Blue)),
    );
    frame.render_widget(tile, area);
}

/// Draw the screen shown after logging out
pub fn draw_signed_out(frame: &mut Frame, area: Rect) {
    let message = Paragraph::new(vec![
        Line::from(Span::styled(
            "You have been signed out",
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        Line::from(Span::styled(
            "Press q to quit.",
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(message, area);
}
