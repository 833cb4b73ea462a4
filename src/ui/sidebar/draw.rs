//! Sidebar drawing functions

use crate::app::App;
use crate::state::{Focus, SidebarItem};
use crate::ui::components::{render_sidebar_button, ButtonState, BUTTON_HEIGHT};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

/// Rows taken by the user section at the bottom
const USER_SECTION_HEIGHT: u16 = 4;

/// Draw the navigation entries and the signed-in user
pub fn draw_sidebar(frame: &mut Frame, area: Rect, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(0),                      // Navigation
            Constraint::Length(USER_SECTION_HEIGHT), // User
        ])
        .split(area);

    draw_items(frame, chunks[0], app);
    draw_user(frame, chunks[1], app);
}

fn draw_items(frame: &mut Frame, area: Rect, app: &App) {
    let sidebar = &app.state.sidebar;
    let has_focus = app.state.focus == Focus::Sidebar;

    for (idx, item) in sidebar.items().iter().enumerate() {
        let y = area.y + idx as u16 * BUTTON_HEIGHT;
        if y + BUTTON_HEIGHT > area.y + area.height {
            break;
        }
        let label = match item {
            SidebarItem::Registration if sidebar.registration_expanded => {
                format!("▾ {}", item.label())
            }
            SidebarItem::Registration => format!("▸ {}", item.label()),
            _ => item.label().to_string(),
        };
        let state = ButtonState {
            is_selected: idx == sidebar.selected,
            is_current: item.is_active(&app.state.current_view),
            has_focus,
        };
        let button_area = Rect {
            y,
            height: BUTTON_HEIGHT,
            ..area
        };
        render_sidebar_button(frame, button_area, &label, item.is_child(), state);
    }
}

fn draw_user(frame: &mut Frame, area: Rect, app: &App) {
    let user = &app.state.user;
    let lines = vec![
        Line::from(vec![
            Span::styled(
                format!(" {} ", user.initials()),
                Style::default()
                    .fg(Color::Black)
                    .bg(Color::Cyan)
                    .add_modifier(Modifier::BOLD),
            ),
            Span::raw(" "),
            Span::styled(user.name.as_str(), Style::default().fg(Color::White)),
        ]),
        Line::from(Span::styled(
            user.email.as_str(),
            Style::default().fg(Color::DarkGray),
        )),
    ];
    let block = Block::default()
        .borders(Borders::TOP)
        .border_style(Style::default().fg(Color::DarkGray));
    frame.render_widget(Paragraph::new(lines).block(block), area);
}
