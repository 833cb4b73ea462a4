//! Failure shapes of an API call

use serde_json::Value;
use thiserror::Error;

/// Body of an error response, as far as it could be decoded
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Empty,
    Text(String),
    Json(Value),
}

impl ResponseBody {
    /// Decode a raw body: JSON when it parses as such, text otherwise
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return ResponseBody::Empty;
        }
        match serde_json::from_str::<Value>(trimmed) {
            Ok(Value::String(s)) => ResponseBody::Text(s),
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Text(raw.to_string()),
        }
    }

    /// The `message` property of a JSON body
    pub fn message(&self) -> Option<&str> {
        match self {
            ResponseBody::Json(value) => value
                .get("message")
                .and_then(Value::as_str)
                .filter(|m| !m.is_empty()),
            _ => None,
        }
    }

    /// The plain-text body, if not empty
    pub fn text(&self) -> Option<&str> {
        match self {
            ResponseBody::Text(s) if !s.trim().is_empty() => Some(s),
            _ => None,
        }
    }
}

/// Why an API call failed
#[derive(Debug, Clone, Error)]
pub enum ApiFailure {
    /// The server answered with a non-success status
    #[error("server responded with status {status}")]
    Response { status: u16, body: ResponseBody },
    /// The request was sent but no response arrived
    #[error("no response received: {0}")]
    NoResponse(String),
    /// The request was never sent
    #[error("{0}")]
    Local(String),
}

impl ApiFailure {
    pub fn response(status: u16, raw_body: &str) -> Self {
        ApiFailure::Response {
            status,
            body: ResponseBody::parse(raw_body),
        }
    }
}

impl From<reqwest::Error> for ApiFailure {
    fn from(err: reqwest::Error) -> Self {
        if err.is_builder() {
            ApiFailure::Local(err.to_string())
        } else if err.is_decode() {
            // A response arrived but could not be read as expected
            ApiFailure::Local(format!("invalid response: {err}"))
        } else if let Some(status) = err.status() {
            ApiFailure::Response {
                status: status.as_u16(),
                body: ResponseBody::Empty,
            }
        } else {
            ApiFailure::NoResponse(err.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_json_body() {
        let body = ResponseBody::parse(r#"{"message": "CPF already registered"}"#);
        assert_eq!(body, ResponseBody::Json(json!({"message": "CPF already registered"})));
        assert_eq!(body.message(), Some("CPF already registered"));
    }

    #[test]
    fn test_parse_text_body() {
        let body = ResponseBody::parse("login já cadastrado");
        assert_eq!(body.text(), Some("login já cadastrado"));
        assert_eq!(body.message(), None);
    }

    #[test]
    fn test_parse_json_string_is_text() {
        assert_eq!(
            ResponseBody::parse(r#""email em uso""#),
            ResponseBody::Text("email em uso".to_string())
        );
    }

    #[test]
    fn test_parse_empty_body() {
        assert_eq!(ResponseBody::parse("  "), ResponseBody::Empty);
    }

    #[test]
    fn test_failure_display() {
        assert_eq!(
            ApiFailure::response(418, "").to_string(),
            "server responded with status 418"
        );
        assert_eq!(ApiFailure::Local("boom".into()).to_string(), "boom");
    }
}
