//! UI module for rendering the TUI

mod components;
mod dashboard;
mod forms;
mod layout;
mod sidebar;

use crate::app::App;
use crate::state::View;
use components::{render_confirm_dialog, render_error_dialog};
use ratatui::Frame;

/// Main draw function
pub fn draw(frame: &mut Frame, app: &App) {
    let areas = layout::create_layout(frame.area());

    if matches!(app.state.current_view, View::SignedOut) {
        let full = areas.sidebar.union(areas.content).union(areas.header);
        dashboard::draw_signed_out(frame, full);
    } else {
        sidebar::draw_sidebar(frame, areas.sidebar, app);
        layout::draw_header(frame, areas.header, app);

        // Draw main content based on current view
        match app.state.current_view {
            View::Dashboard => dashboard::draw(frame, areas.content, app),
            View::EmployeeRegistration | View::CompanyRegistration | View::AddressRegistration => {
                forms::draw_registration_form(frame, areas.content, app)
            }
            View::SignedOut => {}
        }
    }

    layout::draw_status_bar(frame, areas.status, app);

    // Modal overlays, errors on top
    if let Some(confirm) = &app.state.pending_confirm {
        render_confirm_dialog(frame, confirm);
    }
    if let Some(error) = app.state.current_error() {
        render_error_dialog(frame, error, app.state.error_queue.len());
    }
}
