//! Application state and core logic

use crate::api::{map_failure, ApiClient, ApiFailure, UpointApi};
use crate::config::UpointConfig;
use crate::pipeline::{self, SubmitOutcome, SubmitResponse, SubmitStart};
use crate::platform::is_save_key;
use crate::session::{Session, TOKEN_ENV};
use crate::state::forms::{CancelRequest, Form, FormController};
use crate::state::{
    AppState, ConfirmKind, Focus, Notification, PendingConfirm, SidebarItem, UserProfile, View,
};
use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::sync::Arc;
use tokio::sync::mpsc;

/// Main application struct
pub struct App {
    /// Current application state
    pub state: AppState,
    /// Backend client, shared with in-flight submissions
    api: Arc<dyn UpointApi>,
    /// Persisted session token
    session: Session,
    /// Answers of submissions running in the background
    submit_tx: mpsc::UnboundedSender<SubmitResponse>,
    submit_rx: mpsc::UnboundedReceiver<SubmitResponse>,
    /// Whether the app should quit
    quit: bool,
    /// Transient hint shown in the status bar until the next key press
    pub status_message: Option<String>,
}

impl App {
    /// Create the app from the user configuration and the stored session
    pub fn new(config: &UpointConfig) -> Result<Self> {
        let mut session = Session::load()?;
        if let Some(token) = std::env::var(TOKEN_ENV).ok().filter(|t| !t.trim().is_empty()) {
            session.store(token)?;
            tracing::info!(path = %session.path().display(), "stored session token from environment");
        }
        let api = ApiClient::new(config.base_url(), session.token().map(str::to_string));
        tracing::info!(
            base_url = api.base_url(),
            signed_in = session.is_signed_in(),
            "starting upoint-tui"
        );
        let user = UserProfile {
            name: config.user_name().to_string(),
            email: config.user_email().to_string(),
        };
        Ok(Self::with_parts(Arc::new(api), session, user))
    }

    /// Assemble an app from its collaborators
    pub fn with_parts(api: Arc<dyn UpointApi>, session: Session, user: UserProfile) -> Self {
        let state = AppState {
            user,
            ..Default::default()
        };
        let (submit_tx, submit_rx) = mpsc::unbounded_channel();
        Self {
            state,
            api,
            session,
            submit_tx,
            submit_rx,
            quit: false,
            status_message: None,
        }
    }

    /// Check if app should quit
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Push an error message to the error queue for display
    pub fn push_error(&mut self, message: impl Into<String>) {
        self.state.push_error(message.into());
    }

    /// Fetch the dashboard counters. Failures become notifications.
    pub async fn load_dashboard(&mut self) {
        self.state.dashboard.loading = true;
        tracing::info!("loading dashboard counts");

        let employees = self.api.employee_count().await;
        let records = self.api.record_count().await;
        self.state.dashboard.loading = false;

        let mut failure: Option<ApiFailure> = None;
        match employees {
            Ok(total) => self.state.dashboard.employees = Some(total),
            Err(e) => failure = Some(e),
        }
        match records {
            Ok(total) => self.state.dashboard.records = Some(total),
            Err(e) => failure = failure.or(Some(e)),
        }

        if let Some(failure) = failure {
            tracing::warn!(error = %failure, "failed to load dashboard counts");
            self.state.notify(Notification::error(
                "Could not load dashboard",
                describe(&failure),
            ));
        }
    }

    /// Fetch the companies offered by the employee form
    pub async fn load_companies(&mut self) {
        match self.api.list_companies().await {
            Ok(companies) => {
                tracing::info!(count = companies.len(), "loaded companies");
                self.state.companies = companies;
            }
            Err(failure) => {
                tracing::warn!(error = %failure, "failed to load companies");
                self.state.notify(Notification::error(
                    "Could not load companies",
                    describe(&failure),
                ));
            }
        }
        let options = self.state.company_options();
        if let Some(form) = self.state.form.as_mut() {
            form.set_choice_options("empresaId", options);
        }
    }

    /// Handle a key event
    pub async fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Handle error dialog dismissal first (modal)
        if self.state.has_errors() {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc) {
                self.state.dismiss_error();
            }
            return Ok(());
        }

        // Confirmation dialogs are modal too
        if self.state.pending_confirm.is_some() {
            self.handle_confirm_key(key).await;
            return Ok(());
        }

        // Clear any status messages on key press
        self.status_message = None;

        if matches!(self.state.current_view, View::SignedOut) {
            if matches!(key.code, KeyCode::Char('q') | KeyCode::Esc) {
                self.quit = true;
            }
            return Ok(());
        }

        match self.state.focus {
            Focus::Sidebar => self.handle_sidebar_key(key).await,
            Focus::Content if self.state.current_view.is_form_view() => {
                self.handle_form_key(key).await
            }
            Focus::Content => self.handle_dashboard_key(key).await,
        }

        Ok(())
    }

    /// Open `view`, asking first when the current form has unsaved changes
    pub async fn open_view(&mut self, view: View) {
        if view == self.state.current_view {
            self.state.focus = Focus::Content;
            return;
        }
        if let Some(form) = self.state.form.as_mut() {
            if form.request_cancel() == CancelRequest::NeedsConfirmation {
                self.state.pending_confirm =
                    Some(PendingConfirm::new(ConfirmKind::DiscardChanges, Some(view)));
                return;
            }
        }
        self.navigate(view).await;
    }

    /// Navigate to a new view
    pub async fn navigate(&mut self, view: View) {
        self.state.view_history.push(self.state.current_view);
        self.enter_view(view).await;
    }

    /// Go back to the last non-form view
    pub async fn go_back(&mut self) {
        let mut target = View::Dashboard;
        while let Some(view) = self.state.view_history.pop() {
            if view.is_form_view() {
                continue;
            }
            target = view;
            break;
        }
        self.enter_view(target).await;
    }

    async fn enter_view(&mut self, view: View) {
        tracing::debug!(?view, "entering view");
        self.state.current_view = view;
        self.state.sidebar.sync_with(&view);
        self.state.form = view.form_kind().map(FormController::new);

        match view {
            View::Dashboard => self.load_dashboard().await,
            View::EmployeeRegistration => {
                self.state.focus = Focus::Content;
                self.load_companies().await;
            }
            View::CompanyRegistration | View::AddressRegistration => {
                self.state.focus = Focus::Content;
            }
            View::SignedOut => {}
        }
    }

    async fn handle_sidebar_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('j') | KeyCode::Down => self.state.sidebar.move_down(),
            KeyCode::Char('k') | KeyCode::Up => self.state.sidebar.move_up(),
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => {
                self.state.focus = Focus::Content;
            }
            KeyCode::Enter | KeyCode::Char(' ') => {
                let Some(item) = self.state.sidebar.selected_item() else {
                    return;
                };
                match item {
                    SidebarItem::Dashboard => self.open_view(View::Dashboard).await,
                    SidebarItem::Registration => self.state.sidebar.toggle_registration(),
                    SidebarItem::Register(kind) => self.open_view(kind.view()).await,
                    SidebarItem::Logout => self.request_logout(),
                }
            }
            _ => {}
        }
    }

    async fn handle_dashboard_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('r') => self.load_dashboard().await,
            KeyCode::Char('q') => self.quit = true,
            KeyCode::Tab | KeyCode::Esc | KeyCode::Left | KeyCode::Char('h') => {
                self.state.focus = Focus::Sidebar;
            }
            _ => {}
        }
    }

    async fn handle_form_key(&mut self, key: KeyEvent) {
        if is_save_key(&key) {
            self.submit_form();
            return;
        }
        if key.code == KeyCode::Esc {
            self.cancel_form().await;
            return;
        }

        let Some(form) = self.state.form.as_mut() else {
            return;
        };

        // Values are frozen while the request is in flight
        if form.is_submitting() {
            match key.code {
                KeyCode::Tab | KeyCode::Down => form.next_field(),
                KeyCode::BackTab | KeyCode::Up => form.prev_field(),
                _ => {}
            }
            return;
        }

        match key.code {
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => form.next_field(),
            KeyCode::BackTab | KeyCode::Up => form.prev_field(),
            KeyCode::Left => form.prev_choice(),
            KeyCode::Right => form.next_choice(),
            KeyCode::Backspace => form.backspace(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                form.input_char(c)
            }
            _ => {}
        }
    }

    /// Validate the current form and send it in the background
    pub fn submit_form(&mut self) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };

        let pending = match pipeline::start(form) {
            SubmitStart::Skipped => return,
            SubmitStart::Invalid(errors) => {
                self.status_message = Some(format!(
                    "{} field(s) need attention",
                    errors.len()
                ));
                return;
            }
            SubmitStart::Ready(pending) => pending,
        };

        let api = Arc::clone(&self.api);
        let tx = self.submit_tx.clone();
        tokio::spawn(async move {
            let response = pending.send(&*api).await;
            if tx.send(response).is_err() {
                tracing::debug!("submission finished after the app closed");
            }
        });
    }

    /// Apply every submission answer that has arrived
    pub async fn drain_submissions(&mut self) {
        while let Ok(response) = self.submit_rx.try_recv() {
            self.complete_submission(response).await;
        }
    }

    async fn complete_submission(&mut self, response: SubmitResponse) {
        let Some(form) = self
            .state
            .form
            .as_mut()
            .filter(|form| form.kind() == response.kind && form.is_submitting())
        else {
            tracing::debug!(kind = ?response.kind, "dropping answer for a closed form");
            return;
        };

        match pipeline::finish(form, response) {
            SubmitOutcome::Created {
                destination,
                notification,
            } => {
                self.state.notify(notification);
                self.navigate(destination).await;
            }
            SubmitOutcome::Rejected { notification } => {
                self.state.notify(notification);
            }
        }
    }

    /// Leave the form, confirming first when there are unsaved changes
    async fn cancel_form(&mut self) {
        let Some(form) = self.state.form.as_mut() else {
            return;
        };
        if form.is_submitting() {
            self.status_message = Some("Submission in progress".to_string());
            return;
        }
        match form.request_cancel() {
            CancelRequest::Leave => self.go_back().await,
            CancelRequest::NeedsConfirmation => {
                self.state.pending_confirm =
                    Some(PendingConfirm::new(ConfirmKind::DiscardChanges, None));
            }
        }
    }

    fn request_logout(&mut self) {
        self.state.pending_confirm = Some(PendingConfirm::new(ConfirmKind::Logout, None));
    }

    async fn handle_confirm_key(&mut self, key: KeyEvent) {
        let Some(confirm) = self.state.pending_confirm.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Up
            | KeyCode::Down
            | KeyCode::Left
            | KeyCode::Right
            | KeyCode::Tab
            | KeyCode::Char('j')
            | KeyCode::Char('k') => confirm.toggle(),
            KeyCode::Enter => {
                let confirmed = confirm.selected_option;
                if confirmed {
                    self.confirm().await;
                } else {
                    self.decline();
                }
            }
            KeyCode::Char('y') => self.confirm().await,
            KeyCode::Char('n') | KeyCode::Esc => self.decline(),
            _ => {}
        }
    }

    async fn confirm(&mut self) {
        let Some(confirm) = self.state.pending_confirm.take() else {
            return;
        };
        match confirm.kind {
            ConfirmKind::DiscardChanges => {
                if let Some(form) = self.state.form.as_mut() {
                    form.confirm_cancel();
                }
                match confirm.target {
                    Some(view) => self.navigate(view).await,
                    None => self.go_back().await,
                }
            }
            ConfirmKind::Logout => self.logout(),
        }
    }

    fn decline(&mut self) {
        let Some(confirm) = self.state.pending_confirm.take() else {
            return;
        };
        if confirm.kind == ConfirmKind::DiscardChanges {
            if let Some(form) = self.state.form.as_mut() {
                form.decline_cancel();
            }
        }
    }

    /// Drop the session token and show the signed-out screen
    pub fn logout(&mut self) {
        if let Err(e) = self.session.clear() {
            tracing::warn!(error = %e, "failed to clear session");
            self.push_error(format!("Error logging out: {e}"));
            return;
        }
        self.api.set_token(None);
        self.state.form = None;
        self.state.view_history.clear();
        self.state.current_view = View::SignedOut;
        self.state.focus = Focus::Content;
        self.state.notify(Notification::success(
            "Logged out successfully",
            "You have been signed out of the system",
        ));
        tracing::info!("session cleared");
    }
}

/// User-facing text for a failed fetch
fn describe(failure: &ApiFailure) -> String {
    map_failure(failure)
        .into_iter()
        .next()
        .map(|e| e.message)
        .unwrap_or_else(|| failure.to_string())
}
