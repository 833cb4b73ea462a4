//! Form controller: values, inline errors and the submission lifecycle

use super::errors::FieldError;
use super::field::{ChoiceOption, FieldValue, FormField};
use super::format::Mask;
use super::payload::{self, Payload};
use super::schema::{Schema, ROLES, STATES};
use crate::state::View;
use std::collections::BTreeMap;

/// Trait for common form operations
pub trait Form {
    fn field_count(&self) -> usize;
    fn active_field(&self) -> usize;
    fn set_active_field(&mut self, index: usize);
    fn next_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        self.set_active_field((current + 1) % count);
    }
    fn prev_field(&mut self) {
        let count = self.field_count();
        let current = self.active_field();
        if current == 0 {
            self.set_active_field(count - 1);
        } else {
            self.set_active_field(current - 1);
        }
    }
}

/// The registration forms
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormKind {
    Company,
    Employee,
    Address,
}

impl FormKind {
    /// Human readable entity name
    pub fn entity(&self) -> &'static str {
        match self {
            Self::Company => "Company",
            Self::Employee => "Employee",
            Self::Address => "Address",
        }
    }

    /// View hosting this form
    pub fn view(&self) -> View {
        match self {
            Self::Company => View::CompanyRegistration,
            Self::Employee => View::EmployeeRegistration,
            Self::Address => View::AddressRegistration,
        }
    }

    /// Where to go after a successful registration
    pub fn success_destination(&self) -> View {
        View::Dashboard
    }

    /// Build the fields of this form with their default values
    pub fn fields(&self) -> Vec<FormField> {
        let states: Vec<ChoiceOption> = STATES.iter().map(|s| ChoiceOption::plain(s)).collect();
        match self {
            Self::Company => {
                let mut fields = vec![
                    FormField::text("razaoSocial", "Legal name (Razão Social)"),
                    FormField::text("nomeFantasia", "Trade name (Nome Fantasia)"),
                    FormField::masked("cnpj", "CNPJ", Mask::Cnpj),
                    FormField::text("email", "Email"),
                    FormField::masked("telefone", "Phone", Mask::Phone),
                ];
                fields.extend(address_fields(FormField::text("uf", "UF")));
                fields.push(FormField::text("latitude", "Latitude"));
                fields.push(FormField::text("longitude", "Longitude"));
                fields
            }
            Self::Employee => {
                let roles = ROLES.iter().map(|r| ChoiceOption::plain(r)).collect();
                let mut fields = vec![
                    FormField::text("login", "Login"),
                    FormField::secret("senha", "Password"),
                    FormField::choice("role", "Role", roles, Some(1)),
                    FormField::masked("cpf", "CPF", Mask::Cpf),
                    FormField::text("email", "Email"),
                    FormField::text("nome", "Full name"),
                    FormField::masked("telefone", "Phone", Mask::Phone),
                    FormField::text("cargo", "Position"),
                    FormField::text("departamento", "Department"),
                    FormField::choice("empresaId", "Company", Vec::new(), None),
                ];
                fields.extend(address_fields(FormField::choice(
                    "estado", "State", states, None,
                )));
                fields
            }
            Self::Address => address_fields(FormField::choice("uf", "UF", states, None)),
        }
    }
}

fn address_fields(state: FormField) -> Vec<FormField> {
    vec![
        FormField::masked("cep", "CEP", Mask::Cep),
        FormField::text("logradouro", "Street"),
        FormField::text("numero", "Number"),
        FormField::text("complemento", "Complement (optional)"),
        FormField::text("bairro", "District"),
        FormField::text("cidade", "City"),
        state,
    ]
}

/// Snapshot of a form's values keyed by field name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormValues(BTreeMap<String, String>);

impl FormValues {
    pub fn from_pairs(pairs: &[(&str, &str)]) -> Self {
        Self(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    /// Value of a field, empty when absent
    pub fn get(&self, field: &str) -> &str {
        self.0.get(field).map(String::as_str).unwrap_or("")
    }

    pub fn set(&mut self, field: &str, value: &str) {
        self.0.insert(field.to_string(), value.to_string());
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }
}

/// Lifecycle phase of a form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
    Succeeded,
    Failed,
}

/// In-flight submission status
#[derive(Debug, Clone, Default)]
pub struct SubmissionState {
    pub is_submitting: bool,
    pub backend_errors: Vec<FieldError>,
}

/// Result of asking to submit
#[derive(Debug)]
pub enum BeginSubmit {
    /// A submission is already in flight
    AlreadySubmitting,
    /// Local validation failed; errors are attached to the fields
    Invalid(Vec<FieldError>),
    /// Ready to send
    Ready(Payload),
}

/// Result of asking to leave the form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelRequest {
    Leave,
    NeedsConfirmation,
}

/// Binds a form's fields to validation and submission state
#[derive(Debug, Clone)]
pub struct FormController {
    kind: FormKind,
    pub fields: Vec<FormField>,
    pub active_field_index: usize,
    phase: FormPhase,
    submission: SubmissionState,
    dirty: bool,
    confirming_cancel: bool,
}

impl FormController {
    pub fn new(kind: FormKind) -> Self {
        Self {
            kind,
            fields: kind.fields(),
            active_field_index: 0,
            phase: FormPhase::Idle,
            submission: SubmissionState::default(),
            dirty: false,
            confirming_cancel: false,
        }
    }

    pub fn kind(&self) -> FormKind {
        self.kind
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn is_submitting(&self) -> bool {
        self.submission.is_submitting
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn is_confirming_cancel(&self) -> bool {
        self.confirming_cancel
    }

    pub fn backend_errors(&self) -> &[FieldError] {
        &self.submission.backend_errors
    }

    /// Backend errors not tied to a field, shown as a banner
    pub fn form_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.submission
            .backend_errors
            .iter()
            .filter(|e| !e.is_field_scoped())
    }

    fn schema(&self) -> &'static Schema {
        Schema::for_kind(self.kind)
    }

    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    fn field_index(&self, name: &str) -> Option<usize> {
        self.fields.iter().position(|f| f.name == name)
    }

    /// Current values of every field
    pub fn values(&self) -> FormValues {
        FormValues(
            self.fields
                .iter()
                .map(|f| (f.name.clone(), f.as_text().to_string()))
                .collect(),
        )
    }

    /// Set a field by name and revalidate it
    pub fn set_value(&mut self, name: &str, value: &str) -> bool {
        match self.field_index(name) {
            Some(index) => {
                self.fields[index].set_text(value);
                self.after_edit(index);
                true
            }
            None => false,
        }
    }

    /// Type a character into the active field
    pub fn input_char(&mut self, c: char) {
        let index = self.active_field_index;
        if let Some(field) = self.fields.get_mut(index) {
            if field.is_choice() {
                return;
            }
            field.push_char(c);
            self.after_edit(index);
        }
    }

    /// Delete the last character of the active field
    pub fn backspace(&mut self) {
        let index = self.active_field_index;
        if let Some(field) = self.fields.get_mut(index) {
            if field.is_choice() {
                return;
            }
            field.pop_char();
            self.after_edit(index);
        }
    }

    /// Cycle the active choice field forward
    pub fn next_choice(&mut self) {
        let index = self.active_field_index;
        if let Some(field) = self.fields.get_mut(index).filter(|f| f.is_choice()) {
            field.next_choice();
            self.after_edit(index);
        }
    }

    /// Cycle the active choice field backward
    pub fn prev_choice(&mut self) {
        let index = self.active_field_index;
        if let Some(field) = self.fields.get_mut(index).filter(|f| f.is_choice()) {
            field.prev_choice();
            self.after_edit(index);
        }
    }

    /// Replace the options of a choice field (e.g. the company selector)
    pub fn set_choice_options(&mut self, name: &str, options: Vec<ChoiceOption>) {
        if let Some(index) = self.field_index(name) {
            self.fields[index].set_options(options);
        }
    }

    /// Real-time validation of the edited field
    fn after_edit(&mut self, index: usize) {
        self.dirty = true;
        if self.phase == FormPhase::Submitting {
            return;
        }
        self.phase = FormPhase::Validating;
        let schema = self.schema();
        let field = &mut self.fields[index];
        field.error = schema
            .validate_field(&field.name, field.as_text())
            .map(|e| e.message);
        self.phase = FormPhase::Idle;
    }

    /// Validate every field and attach the results inline
    pub fn validate_all(&mut self) -> Result<(), Vec<FieldError>> {
        let result = self.schema().validate(&self.values());
        let errors = result.as_ref().err().cloned().unwrap_or_default();
        for field in &mut self.fields {
            field.error = errors
                .iter()
                .find(|e| e.field.as_deref() == Some(field.name.as_str()))
                .map(|e| e.message.clone());
        }
        result
    }

    /// Gate a submission: refuses while one is in flight, validates, and
    /// builds the outgoing payload
    pub fn begin_submit(&mut self) -> BeginSubmit {
        if self.submission.is_submitting {
            return BeginSubmit::AlreadySubmitting;
        }
        if let Err(errors) = self.validate_all() {
            return BeginSubmit::Invalid(errors);
        }
        match payload::build(self.kind, &self.values()) {
            Ok(payload) => {
                self.submission.is_submitting = true;
                self.submission.backend_errors.clear();
                self.phase = FormPhase::Submitting;
                BeginSubmit::Ready(payload)
            }
            Err(errors) => BeginSubmit::Invalid(errors),
        }
    }

    /// The API accepted the submission: reset to defaults
    pub fn finish_success(&mut self) {
        self.phase = FormPhase::Succeeded;
        self.reset();
    }

    /// The API rejected the submission. Field errors naming fields this form
    /// does not have are demoted to form-level errors. Values are kept.
    pub fn finish_failure(&mut self, errors: Vec<FieldError>) -> &[FieldError] {
        self.phase = FormPhase::Failed;
        self.submission.is_submitting = false;

        let errors: Vec<FieldError> = errors
            .into_iter()
            .map(|mut e| {
                if e.field.as_deref().is_some_and(|f| self.field_index(f).is_none()) {
                    e.field = None;
                }
                e
            })
            .collect();

        for error in errors.iter().filter(|e| e.is_field_scoped()) {
            if let Some(index) = error.field.as_deref().and_then(|f| self.field_index(f)) {
                self.fields[index].error = Some(error.message.clone());
            }
        }
        self.submission.backend_errors = errors;
        self.phase = FormPhase::Idle;
        &self.submission.backend_errors
    }

    /// Ask to leave the form
    pub fn request_cancel(&mut self) -> CancelRequest {
        if self.dirty {
            self.confirming_cancel = true;
            CancelRequest::NeedsConfirmation
        } else {
            CancelRequest::Leave
        }
    }

    /// Leave anyway, discarding values
    pub fn confirm_cancel(&mut self) {
        self.reset();
    }

    /// Stay on the form with values intact
    pub fn decline_cancel(&mut self) {
        self.confirming_cancel = false;
        self.phase = FormPhase::Idle;
    }

    /// Restore default values, keeping dynamically loaded choice options
    pub fn reset(&mut self) {
        let mut fresh = self.kind.fields();
        for field in fresh.iter_mut().filter(|f| f.is_choice()) {
            if let Some(old) = self.fields.iter().find(|o| o.name == field.name) {
                if let FieldValue::Choice { options, .. } = &old.value {
                    if !options.is_empty() {
                        field.set_options(options.clone());
                    }
                }
            }
        }
        self.fields = fresh;
        self.active_field_index = 0;
        self.submission = SubmissionState::default();
        self.dirty = false;
        self.confirming_cancel = false;
        if self.phase != FormPhase::Succeeded {
            self.phase = FormPhase::Idle;
        }
    }
}

impl Form for FormController {
    fn field_count(&self) -> usize {
        self.fields.len()
    }
    fn active_field(&self) -> usize {
        self.active_field_index
    }
    fn set_active_field(&mut self, index: usize) {
        self.active_field_index = index.min(self.fields.len().saturating_sub(1));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::forms::errors::ErrorKind;

    fn filled_company() -> FormController {
        let mut form = FormController::new(FormKind::Company);
        for (name, value) in [
            ("razaoSocial", "Acme Ltda"),
            ("nomeFantasia", "Acme"),
            ("cnpj", "12345678000199"),
            ("email", "a@acme.com"),
            ("telefone", "11988887777"),
            ("cep", "01000000"),
            ("logradouro", "Rua X"),
            ("numero", "10"),
            ("bairro", "Centro"),
            ("cidade", "São Paulo"),
            ("uf", "SP"),
            ("latitude", "-23.5"),
            ("longitude", "-46.6"),
        ] {
            assert!(form.set_value(name, value), "{name}");
        }
        form
    }

    mod controller {
        use super::*;

        #[test]
        fn test_new_form_is_idle_and_clean() {
            let form = FormController::new(FormKind::Company);
            assert_eq!(form.phase(), FormPhase::Idle);
            assert!(!form.is_dirty());
            assert!(!form.is_submitting());
            assert!(form.backend_errors().is_empty());
        }

        #[test]
        fn test_set_value_applies_mask() {
            let form = filled_company();
            assert_eq!(form.field("cnpj").unwrap().as_text(), "12.345.678/0001-99");
            assert_eq!(form.field("telefone").unwrap().as_text(), "(11) 98888-7777");
            assert_eq!(form.field("cep").unwrap().as_text(), "01000-000");
        }

        #[test]
        fn test_set_unknown_field_is_rejected() {
            let mut form = FormController::new(FormKind::Address);
            assert!(!form.set_value("login", "x"));
            assert!(!form.is_dirty());
        }

        #[test]
        fn test_edit_validates_in_real_time() {
            let mut form = FormController::new(FormKind::Company);
            form.set_value("uf", "sp");
            assert!(form.field("uf").unwrap().error.is_some());
            form.set_value("uf", "SP");
            assert!(form.field("uf").unwrap().error.is_none());
            assert_eq!(form.phase(), FormPhase::Idle);
        }

        #[test]
        fn test_typing_into_active_field() {
            let mut form = FormController::new(FormKind::Address);
            form.set_active_field(0);
            for c in "01000000".chars() {
                form.input_char(c);
            }
            assert_eq!(form.field("cep").unwrap().as_text(), "01000-000");
            form.backspace();
            assert_eq!(form.field("cep").unwrap().as_text(), "0100000");
        }

        #[test]
        fn test_typing_into_choice_is_ignored() {
            let mut form = FormController::new(FormKind::Address);
            let uf = form.fields.iter().position(|f| f.name == "uf").unwrap();
            form.set_active_field(uf);
            form.input_char('S');
            assert_eq!(form.field("uf").unwrap().as_text(), "");
            form.next_choice();
            assert_eq!(form.field("uf").unwrap().as_text(), "AC");
            form.prev_choice();
            assert_eq!(form.field("uf").unwrap().as_text(), "TO");
        }

        #[test]
        fn test_employee_role_defaults_to_user() {
            let form = FormController::new(FormKind::Employee);
            assert_eq!(form.values().get("role"), "USER");
        }

        #[test]
        fn test_field_navigation_wraps() {
            let mut form = FormController::new(FormKind::Address);
            form.prev_field();
            assert_eq!(form.active_field(), form.field_count() - 1);
            form.next_field();
            assert_eq!(form.active_field(), 0);
        }
    }

    mod submission {
        use super::*;

        #[test]
        fn test_invalid_form_does_not_start_submitting() {
            let mut form = FormController::new(FormKind::Company);
            match form.begin_submit() {
                BeginSubmit::Invalid(errors) => assert!(!errors.is_empty()),
                other => panic!("expected Invalid, got {other:?}"),
            }
            assert!(!form.is_submitting());
            assert!(form.field("razaoSocial").unwrap().error.is_some());
        }

        #[test]
        fn test_valid_form_enters_submitting() {
            let mut form = filled_company();
            assert!(matches!(form.begin_submit(), BeginSubmit::Ready(_)));
            assert!(form.is_submitting());
            assert_eq!(form.phase(), FormPhase::Submitting);
        }

        #[test]
        fn test_second_submit_while_in_flight_is_refused() {
            let mut form = filled_company();
            let _ = form.begin_submit();
            assert!(matches!(
                form.begin_submit(),
                BeginSubmit::AlreadySubmitting
            ));
        }

        #[test]
        fn test_success_resets_values() {
            let mut form = filled_company();
            let _ = form.begin_submit();
            form.finish_success();
            assert_eq!(form.phase(), FormPhase::Succeeded);
            assert!(!form.is_submitting());
            assert!(!form.is_dirty());
            assert_eq!(form.values().get("cnpj"), "");
        }

        #[test]
        fn test_failure_keeps_values_and_attaches_errors() {
            let mut form = filled_company();
            let _ = form.begin_submit();
            form.finish_failure(vec![
                FieldError::new(Some("email"), "taken", ErrorKind::Conflict),
                FieldError::form_level("try later", ErrorKind::Server),
            ]);
            assert_eq!(form.phase(), FormPhase::Idle);
            assert!(!form.is_submitting());
            assert_eq!(form.values().get("razaoSocial"), "Acme Ltda");
            assert_eq!(form.field("email").unwrap().error.as_deref(), Some("taken"));
            assert_eq!(form.form_errors().count(), 1);
        }

        #[test]
        fn test_failure_demotes_unknown_fields() {
            let mut form = filled_company();
            let _ = form.begin_submit();
            let stored = form.finish_failure(vec![FieldError::new(
                Some("login"),
                "login already exists",
                ErrorKind::Conflict,
            )]);
            assert_eq!(stored[0].field, None);
            let values = form.values();
            assert!(form
                .backend_errors()
                .iter()
                .filter_map(|e| e.field.as_deref())
                .all(|f| values.contains(f)));
        }

        #[test]
        fn test_new_attempt_clears_backend_errors() {
            let mut form = filled_company();
            let _ = form.begin_submit();
            form.finish_failure(vec![FieldError::form_level("down", ErrorKind::Server)]);
            assert_eq!(form.backend_errors().len(), 1);
            let _ = form.begin_submit();
            assert!(form.backend_errors().is_empty());
        }
    }

    mod cancel {
        use super::*;

        #[test]
        fn test_clean_form_leaves_immediately() {
            let mut form = FormController::new(FormKind::Company);
            assert_eq!(form.request_cancel(), CancelRequest::Leave);
            assert!(!form.is_confirming_cancel());
        }

        #[test]
        fn test_dirty_form_asks_for_confirmation() {
            let mut form = filled_company();
            assert_eq!(form.request_cancel(), CancelRequest::NeedsConfirmation);
            assert!(form.is_confirming_cancel());
        }

        #[test]
        fn test_decline_keeps_values() {
            let mut form = filled_company();
            form.request_cancel();
            form.decline_cancel();
            assert!(!form.is_confirming_cancel());
            assert_eq!(form.values().get("nomeFantasia"), "Acme");
        }

        #[test]
        fn test_confirm_discards_values() {
            let mut form = filled_company();
            form.request_cancel();
            form.confirm_cancel();
            assert!(!form.is_dirty());
            assert_eq!(form.values().get("nomeFantasia"), "");
        }

        #[test]
        fn test_reset_keeps_loaded_company_options() {
            let mut form = FormController::new(FormKind::Employee);
            form.set_choice_options("empresaId", vec![ChoiceOption::new("7", "Acme")]);
            form.set_value("empresaId", "7");
            form.reset();
            assert_eq!(form.values().get("empresaId"), "");
            form.set_value("empresaId", "7");
            assert_eq!(form.values().get("empresaId"), "7");
        }
    }
}
