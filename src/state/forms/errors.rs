//! Field-level errors shared by local validation and backend responses

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a form error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorKind {
    Validation,
    Conflict,
    Server,
    Network,
}

impl ErrorKind {
    /// Notification priority, highest first
    pub const PRIORITY: [ErrorKind; 4] = [
        ErrorKind::Conflict,
        ErrorKind::Validation,
        ErrorKind::Network,
        ErrorKind::Server,
    ];
}

/// An error attached to a form field, or to the whole form when `field` is `None`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: Option<String>,
    pub message: String,
    pub kind: ErrorKind,
}

impl FieldError {
    pub fn new(field: Option<&str>, message: impl Into<String>, kind: ErrorKind) -> Self {
        Self {
            field: field.map(str::to_string),
            message: message.into(),
            kind,
        }
    }

    /// Local schema failure on a specific field
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self::new(Some(field), message, ErrorKind::Validation)
    }

    /// Error that is not tied to any field
    pub fn form_level(message: impl Into<String>, kind: ErrorKind) -> Self {
        Self::new(None, message, kind)
    }

    pub fn is_field_scoped(&self) -> bool {
        self.field.as_deref().is_some_and(|f| !f.is_empty())
    }
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.field {
            Some(field) => write!(f, "{field}: {}", self.message),
            None => f.write_str(&self.message),
        }
    }
}

/// Most significant error kind in a set of errors
pub fn dominant_kind(errors: &[FieldError]) -> Option<ErrorKind> {
    ErrorKind::PRIORITY
        .into_iter()
        .find(|kind| errors.iter().any(|e| e.kind == *kind))
}
