//! Translation of API failures into form errors
//!
//! Every failure maps to at least one [`FieldError`]. Structured bodies are
//! preferred; the substring match on plain-text 400 bodies is only a
//! fallback for endpoints that answer with bare strings.

use super::failure::{ApiFailure, ResponseBody};
use crate::state::forms::{ErrorKind, FieldError};
use serde_json::Value;

pub const DEFAULT_INVALID: &str = "Invalid data";
pub const DEFAULT_CONFLICT: &str = "Resource already exists";
pub const SERVER_ERROR: &str = "Internal server error. Please try again later.";
pub const NETWORK_ERROR: &str = "Connection error. Check your internet connection and try again.";
pub const UNEXPECTED_ERROR: &str = "Unexpected error";
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Plain-text markers and the field each one points at
const TEXT_FIELD_HINTS: &[(&str, &str)] = &[("login", "login"), ("CPF", "cpf"), ("email", "email")];

/// Map a failure to the errors shown on the form
pub fn map_failure(failure: &ApiFailure) -> Vec<FieldError> {
    match failure {
        ApiFailure::Response { status, body } => map_response(*status, body),
        ApiFailure::NoResponse(_) => vec![FieldError::form_level(NETWORK_ERROR, ErrorKind::Network)],
        ApiFailure::Local(message) => {
            let message = if message.trim().is_empty() {
                UNEXPECTED_ERROR
            } else {
                message.as_str()
            };
            vec![FieldError::form_level(message, ErrorKind::Server)]
        }
    }
}

fn map_response(status: u16, body: &ResponseBody) -> Vec<FieldError> {
    match status {
        400 => map_bad_request(body),
        409 => {
            let message = body.message().or(body.text()).unwrap_or(DEFAULT_CONFLICT);
            vec![FieldError::form_level(message, ErrorKind::Conflict)]
        }
        500 => vec![FieldError::form_level(SERVER_ERROR, ErrorKind::Server)],
        _ => {
            let detail = body.message().or(body.text()).unwrap_or(UNKNOWN_ERROR);
            vec![FieldError::form_level(
                format!("Error {status}: {detail}"),
                ErrorKind::Server,
            )]
        }
    }
}

fn map_bad_request(body: &ResponseBody) -> Vec<FieldError> {
    if let ResponseBody::Json(value) = body {
        if let Some(errors) = structured_errors(value) {
            return errors;
        }
    }

    if let Some(text) = body.text() {
        let field = TEXT_FIELD_HINTS
            .iter()
            .find(|(marker, _)| text.contains(*marker))
            .map(|(_, field)| *field);
        return match field {
            Some(field) => vec![FieldError::new(Some(field), text, ErrorKind::Conflict)],
            None => vec![FieldError::form_level(text, ErrorKind::Validation)],
        };
    }

    vec![FieldError::form_level(
        body.message().unwrap_or(DEFAULT_INVALID),
        ErrorKind::Validation,
    )]
}

/// `{"errors": [{"field", "message"}]}` or a single `{"field", "message"}`
fn structured_errors(value: &Value) -> Option<Vec<FieldError>> {
    if let Some(entries) = value.get("errors").and_then(Value::as_array) {
        let errors: Vec<FieldError> = entries.iter().filter_map(entry_error).collect();
        if !errors.is_empty() {
            return Some(errors);
        }
    }
    if value.get("field").is_some() {
        return entry_error(value).map(|e| vec![e]);
    }
    None
}

fn entry_error(entry: &Value) -> Option<FieldError> {
    let message = entry
        .get("message")
        .and_then(Value::as_str)
        .filter(|m| !m.is_empty())?;
    let field = entry
        .get("field")
        .and_then(Value::as_str)
        .filter(|f| !f.is_empty());
    Some(FieldError::new(field, message, ErrorKind::Validation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn response(status: u16, body: Value) -> ApiFailure {
        ApiFailure::Response {
            status,
            body: ResponseBody::Json(body),
        }
    }

    #[test]
    fn test_conflict_uses_body_message_without_field() {
        let errors = map_failure(&response(409, json!({"message": "CPF already registered"})));
        assert_eq!(
            errors,
            vec![FieldError::form_level("CPF already registered", ErrorKind::Conflict)]
        );
    }

    #[test]
    fn test_conflict_default_message() {
        let errors = map_failure(&ApiFailure::response(409, ""));
        assert_eq!(errors[0].message, DEFAULT_CONFLICT);
        assert_eq!(errors[0].kind, ErrorKind::Conflict);
    }

    #[test]
    fn test_conflict_plain_text() {
        let errors = map_failure(&ApiFailure::response(409, "duplicado"));
        assert_eq!(errors[0].message, "duplicado");
    }

    #[test]
    fn test_bad_request_structured_list() {
        let errors = map_failure(&response(
            400,
            json!({"errors": [{"field": "email", "message": "invalid"}]}),
        ));
        assert_eq!(errors, vec![FieldError::validation("email", "invalid")]);
    }

    #[test]
    fn test_bad_request_single_structured_entry() {
        let errors = map_failure(&response(400, json!({"field": "cnpj", "message": "bad"})));
        assert_eq!(errors, vec![FieldError::validation("cnpj", "bad")]);
    }

    #[test]
    fn test_bad_request_text_hints() {
        let cases = [
            ("login já existe", "login"),
            ("CPF já cadastrado", "cpf"),
            ("email em uso", "email"),
        ];
        for (text, field) in cases {
            let errors = map_failure(&ApiFailure::response(400, text));
            assert_eq!(
                errors,
                vec![FieldError::new(Some(field), text, ErrorKind::Conflict)]
            );
        }
    }

    #[test]
    fn test_bad_request_hint_is_case_sensitive() {
        let errors = map_failure(&ApiFailure::response(400, "cpf inválido"));
        assert_eq!(
            errors,
            vec![FieldError::form_level("cpf inválido", ErrorKind::Validation)]
        );
    }

    #[test]
    fn test_bad_request_generic_message() {
        let errors = map_failure(&response(400, json!({"message": "Nope"})));
        assert_eq!(errors, vec![FieldError::form_level("Nope", ErrorKind::Validation)]);
        let errors = map_failure(&response(400, json!({"errors": []})));
        assert_eq!(errors[0].message, DEFAULT_INVALID);
    }

    #[test]
    fn test_internal_server_error_has_fixed_message() {
        let errors = map_failure(&response(500, json!({"message": "NullPointerException"})));
        assert_eq!(errors, vec![FieldError::form_level(SERVER_ERROR, ErrorKind::Server)]);
    }

    #[test]
    fn test_other_status_combines_code_and_message() {
        let errors = map_failure(&response(403, json!({"message": "Forbidden"})));
        assert_eq!(errors[0].message, "Error 403: Forbidden");
        let errors = map_failure(&ApiFailure::response(502, ""));
        assert_eq!(errors[0].message, "Error 502: Unknown error");
        assert_eq!(errors[0].kind, ErrorKind::Server);
    }

    #[test]
    fn test_no_response_is_network() {
        let errors = map_failure(&ApiFailure::NoResponse("connection refused".into()));
        assert_eq!(errors, vec![FieldError::form_level(NETWORK_ERROR, ErrorKind::Network)]);
    }

    #[test]
    fn test_local_failure_uses_own_message_or_default() {
        let errors = map_failure(&ApiFailure::Local("bad url".into()));
        assert_eq!(errors[0].message, "bad url");
        let errors = map_failure(&ApiFailure::Local(String::new()));
        assert_eq!(errors[0].message, UNEXPECTED_ERROR);
        assert_eq!(errors[0].kind, ErrorKind::Server);
    }
}
