//! Application state definitions

use super::forms::{FormController, FormKind};
use super::notification::{Notification, Notifications};
use super::sidebar::SidebarState;
use crate::api::CompanySummary;
use std::collections::VecDeque;

/// Current view in the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    #[default]
    Dashboard,
    EmployeeRegistration,
    CompanyRegistration,
    AddressRegistration,
    /// Shown after logging out
    SignedOut,
}

impl View {
    /// Page title shown in the header
    pub fn title(&self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::EmployeeRegistration => "Employee Registration",
            Self::CompanyRegistration => "Company Registration",
            Self::AddressRegistration => "Address Registration",
            Self::SignedOut => "Signed out",
        }
    }

    pub fn is_form_view(&self) -> bool {
        self.form_kind().is_some()
    }

    pub fn form_kind(&self) -> Option<FormKind> {
        match self {
            Self::EmployeeRegistration => Some(FormKind::Employee),
            Self::CompanyRegistration => Some(FormKind::Company),
            Self::AddressRegistration => Some(FormKind::Address),
            Self::Dashboard | Self::SignedOut => None,
        }
    }
}

/// Which pane receives key input
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    Sidebar,
    Content,
}

/// Counters shown on the dashboard. `None` until loaded.
#[derive(Debug, Clone, Default)]
pub struct DashboardStats {
    pub employees: Option<u64>,
    pub records: Option<u64>,
    pub loading: bool,
}

/// What a pending confirmation dialog is about
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmKind {
    /// Leaving a form with unsaved changes
    DiscardChanges,
    Logout,
}

impl ConfirmKind {
    pub fn title(&self) -> &'static str {
        match self {
            Self::DiscardChanges => "Discard changes?",
            Self::Logout => "Log out?",
        }
    }

    pub fn message(&self) -> &'static str {
        match self {
            Self::DiscardChanges => "The form has unsaved changes. Leave and discard them?",
            Self::Logout => "You will need to sign in again to access the system.",
        }
    }

    pub fn confirm_label(&self) -> &'static str {
        match self {
            Self::DiscardChanges => "Discard",
            Self::Logout => "Log out",
        }
    }
}

/// Pending confirmation dialog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingConfirm {
    pub kind: ConfirmKind,
    /// Where to go once confirmed
    pub target: Option<View>,
    /// `true` when the confirm option is highlighted
    pub selected_option: bool,
}

impl PendingConfirm {
    pub fn new(kind: ConfirmKind, target: Option<View>) -> Self {
        Self {
            kind,
            target,
            selected_option: false,
        }
    }

    pub fn toggle(&mut self) {
        self.selected_option = !self.selected_option;
    }
}

/// The signed-in user as shown in the sidebar
#[derive(Debug, Clone, Default)]
pub struct UserProfile {
    pub name: String,
    pub email: String,
}

impl UserProfile {
    pub fn initials(&self) -> String {
        initials(&self.name)
    }
}

/// First letter of up to two words, uppercased
pub fn initials(name: &str) -> String {
    name.split_whitespace()
        .filter_map(|word| word.chars().next())
        .take(2)
        .flat_map(char::to_uppercase)
        .collect()
}

/// Main application state
#[derive(Debug, Default)]
pub struct AppState {
    // Navigation
    pub current_view: View,
    pub view_history: Vec<View>,
    pub focus: Focus,
    pub sidebar: SidebarState,

    // Form of the current registration view
    pub form: Option<FormController>,

    // Data
    pub companies: Vec<CompanySummary>,
    pub dashboard: DashboardStats,
    pub user: UserProfile,

    // Feedback
    pub error_queue: VecDeque<String>,
    pub notifications: Notifications,
    pub pending_confirm: Option<PendingConfirm>,
}

impl AppState {
    /// Queue an error for the modal error dialog
    pub fn push_error(&mut self, message: String) {
        self.error_queue.push_back(message);
    }

    pub fn has_errors(&self) -> bool {
        !self.error_queue.is_empty()
    }

    pub fn current_error(&self) -> Option<&str> {
        self.error_queue.front().map(String::as_str)
    }

    pub fn dismiss_error(&mut self) {
        self.error_queue.pop_front();
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Company options for the employee form, labelled by name
    pub fn company_options(&self) -> Vec<super::forms::ChoiceOption> {
        self.companies
            .iter()
            .map(|c| super::forms::ChoiceOption::new(c.id.clone(), c.display_name()))
            .collect()
    }
}
