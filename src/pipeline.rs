//! Submission pipeline shared by the registration forms
//!
//! validate → build payload → call the creation endpoint once → reset and
//! navigate on success, or map and attach the backend errors on failure.
//!
//! The API call runs apart from the form: [`start`] gates and validates,
//! [`PendingSubmit::send`] performs the request without touching any state,
//! and [`finish`] applies the [`SubmitResponse`] back onto the form.

use crate::api::{map_failure, ApiFailure, UpointApi};
use crate::state::forms::{
    dominant_kind, BeginSubmit, ErrorKind, FieldError, FormController, FormKind, Payload,
};
use crate::state::{Notification, View};
use serde_json::Value;

/// Result of trying to start a submission
#[derive(Debug)]
pub enum SubmitStart {
    /// A submission was already in flight; nothing was sent
    Skipped,
    /// Local validation failed; nothing was sent
    Invalid(Vec<FieldError>),
    /// The form is now submitting and the payload is ready to send
    Ready(PendingSubmit),
}

/// A validated payload waiting for its API call
#[derive(Debug)]
pub struct PendingSubmit {
    payload: Payload,
}

/// Answer of the API to one [`PendingSubmit`]
#[derive(Debug)]
pub struct SubmitResponse {
    pub kind: FormKind,
    subject: String,
    result: Result<Value, ApiFailure>,
}

/// What happened to a finished submission
#[derive(Debug)]
pub enum SubmitOutcome {
    /// The API accepted the entity
    Created {
        destination: View,
        notification: Notification,
    },
    /// The API rejected the entity; the form keeps its values
    Rejected { notification: Notification },
}

/// Gate and validate `form`, moving it to submitting when it is ready
pub fn start(form: &mut FormController) -> SubmitStart {
    match form.begin_submit() {
        BeginSubmit::AlreadySubmitting => {
            tracing::debug!(kind = ?form.kind(), "submit ignored, request in flight");
            SubmitStart::Skipped
        }
        BeginSubmit::Invalid(errors) => {
            tracing::debug!(kind = ?form.kind(), count = errors.len(), "submit blocked by validation");
            SubmitStart::Invalid(errors)
        }
        BeginSubmit::Ready(payload) => SubmitStart::Ready(PendingSubmit { payload }),
    }
}

impl PendingSubmit {
    pub fn kind(&self) -> FormKind {
        self.payload.kind()
    }

    /// Call the creation endpoint exactly once
    pub async fn send<A: UpointApi + ?Sized>(self, api: &A) -> SubmitResponse {
        let kind = self.kind();
        tracing::info!(entity = kind.entity(), "submitting registration");
        tracing::debug!(payload = ?self.payload, "outgoing payload");

        let result = match &self.payload {
            Payload::Company(body) => api.create_company(body).await,
            Payload::Employee(body) => api.create_employee(body).await,
            Payload::Address(body) => api.create_address(body).await,
        };
        SubmitResponse {
            kind,
            subject: subject_name(&self.payload),
            result,
        }
    }
}

/// Apply the API answer to the form that started the submission
pub fn finish(form: &mut FormController, response: SubmitResponse) -> SubmitOutcome {
    let kind = response.kind;
    match response.result {
        Ok(_) => {
            tracing::info!(entity = kind.entity(), "registration accepted");
            form.finish_success();
            SubmitOutcome::Created {
                destination: kind.success_destination(),
                notification: success_notification(kind, &response.subject),
            }
        }
        Err(failure) => {
            tracing::warn!(entity = kind.entity(), error = %failure, "registration rejected");
            let errors = form.finish_failure(map_failure(&failure));
            let dominant = dominant_kind(errors).unwrap_or(ErrorKind::Server);
            SubmitOutcome::Rejected {
                notification: error_notification(dominant, errors),
            }
        }
    }
}

/// Name of the registered entity, as shown to the user
fn subject_name(payload: &Payload) -> String {
    match payload {
        Payload::Company(company) => company.nome_fantasia.clone(),
        Payload::Employee(employee) => employee.nome.clone(),
        Payload::Address(address) => format!("{}, {}", address.logradouro, address.numero),
    }
}

fn success_notification(kind: FormKind, subject: &str) -> Notification {
    Notification::success(
        format!("{} registered successfully", kind.entity()),
        format!("{subject} was added to the system"),
    )
}

/// Summarize `errors` by their dominant kind
pub fn error_notification(dominant: ErrorKind, errors: &[FieldError]) -> Notification {
    let first = |kind: ErrorKind| {
        errors
            .iter()
            .find(|e| e.kind == kind)
            .map(|e| e.message.clone())
            .unwrap_or_default()
    };
    match dominant {
        ErrorKind::Conflict => {
            let messages: Vec<&str> = errors
                .iter()
                .filter(|e| e.kind == ErrorKind::Conflict)
                .map(|e| e.message.as_str())
                .collect();
            Notification::error("Data already registered", messages.join(", "))
        }
        ErrorKind::Validation => {
            Notification::error("Invalid data", "Check the highlighted fields and try again")
        }
        ErrorKind::Network => Notification::error("Connection error", first(ErrorKind::Network)),
        ErrorKind::Server => Notification::error("Server error", first(ErrorKind::Server)),
    }
}
