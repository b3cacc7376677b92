//
//  upcloud-api
//  api/common/service_error.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Structured API errors and the decoder that produces them.
//!
//! The UpCloud API reports failures in two JSON shapes:
//!
//! ```json
//! {"error": {"error_code": "SERVER_NOT_FOUND", "error_message": "The server ... does not exist."}}
//! ```
//!
//! ```json
//! {"type": "https://developers.upcloud.com/1.3/errors#ERROR_INVALID_REQUEST",
//!  "title": "Validation error.", "status": 400, "correlation_id": "01H...",
//!  "invalid_params": [{"name": "hostname", "reason": "Must not be empty."}]}
//! ```
//!
//! Anything else is kept as raw text in a [`ServiceErrorKind::Unknown`] error.

use std::fmt;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::truncate_body;

/// Which wire shape a [`ServiceError`] was decoded from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceErrorKind {
    /// `{"error": {"error_code": ..., "error_message": ...}}`
    Legacy,
    /// RFC 7807 style problem document.
    Problem,
    /// Unrecognised or empty body.
    Unknown,
}

/// A single field-level violation from a problem document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvalidParam {
    /// Name of the offending request field.
    #[serde(default)]
    pub name: String,
    /// Why the value was rejected.
    #[serde(default)]
    pub reason: String,
}

/// Error returned by the UpCloud API for a non-2xx response.
///
/// # Fields
///
/// * `kind` - Wire shape the error was decoded from
/// * `code` - `error_code` (legacy) or `type` (problem)
/// * `message` - `error_message` (legacy), `title` (problem) or the raw body
/// * `status` - HTTP status; always set when an HTTP exchange completed
/// * `correlation_id` - Request correlation id (problem documents only)
/// * `invalid_params` - Field-level violations (problem documents only)
///
/// # Example
///
/// ```rust
/// use reqwest::StatusCode;
/// use upcloud_api::api::common::{decode_error_response, ServiceErrorKind};
///
/// let body = br#"{"error":{"error_code":"SERVER_NOT_FOUND","error_message":"gone"}}"#;
/// let err = decode_error_response(StatusCode::NOT_FOUND, body);
/// assert_eq!(err.kind, ServiceErrorKind::Legacy);
/// assert_eq!(err.code, "SERVER_NOT_FOUND");
/// assert!(err.is_not_found());
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub struct ServiceError {
    pub kind: ServiceErrorKind,
    pub code: String,
    pub message: String,
    pub status: Option<u16>,
    pub correlation_id: Option<String>,
    pub invalid_params: Vec<InvalidParam>,
}

impl ServiceError {
    /// Creates a legacy-shaped error without an HTTP status.
    ///
    /// Used for failures the client synthesizes from resource state, such as
    /// a storage import that ended in `failed`.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: ServiceErrorKind::Legacy,
            code: code.into(),
            message: message.into(),
            status: None,
            correlation_id: None,
            invalid_params: Vec::new(),
        }
    }

    /// Returns `true` when the API answered 404.
    pub fn is_not_found(&self) -> bool {
        self.status == Some(StatusCode::NOT_FOUND.as_u16())
    }

    /// Returns `true` when the API rejected the credentials.
    pub fn is_unauthorized(&self) -> bool {
        self.status == Some(StatusCode::UNAUTHORIZED.as_u16())
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ServiceErrorKind::Legacy => write!(f, "{} ({})", self.message, self.code)?,
            ServiceErrorKind::Problem => {
                write!(f, "{} ({})", self.message, self.code)?;
                for param in &self.invalid_params {
                    write!(f, "; {}: {}", param.name, param.reason)?;
                }
            }
            ServiceErrorKind::Unknown if self.message.is_empty() => {
                write!(f, "API error")?;
            }
            ServiceErrorKind::Unknown => write!(f, "API error: {}", self.message)?,
        }

        if let Some(status) = self.status {
            write!(f, " [HTTP {}]", status)?;
        }
        if let Some(id) = &self.correlation_id {
            write!(f, " [correlation id {}]", id)?;
        }
        Ok(())
    }
}

#[derive(Deserialize)]
struct LegacyBody {
    error: LegacyError,
}

#[derive(Deserialize)]
struct LegacyError {
    error_code: String,
    #[serde(default)]
    error_message: String,
}

#[derive(Deserialize)]
struct ProblemBody {
    #[serde(rename = "type")]
    problem_type: String,
    #[serde(default)]
    title: String,
    #[serde(default)]
    correlation_id: Option<String>,
    #[serde(default)]
    invalid_params: Vec<InvalidParam>,
}

/// Converts a non-2xx response into a [`ServiceError`].
///
/// The legacy shape is tried first, then the problem document; any other body
/// is kept (truncated) as the message of an `Unknown` error. `status` is always
/// taken from the HTTP response, never from the body.
pub fn decode_error_response(status: StatusCode, body: &[u8]) -> ServiceError {
    let status = Some(status.as_u16());

    if body.iter().all(u8::is_ascii_whitespace) {
        return ServiceError {
            kind: ServiceErrorKind::Unknown,
            code: String::new(),
            message: String::new(),
            status,
            correlation_id: None,
            invalid_params: Vec::new(),
        };
    }

    if let Ok(legacy) = serde_json::from_slice::<LegacyBody>(body) {
        return ServiceError {
            kind: ServiceErrorKind::Legacy,
            code: legacy.error.error_code,
            message: legacy.error.error_message,
            status,
            correlation_id: None,
            invalid_params: Vec::new(),
        };
    }

    if let Ok(problem) = serde_json::from_slice::<ProblemBody>(body) {
        return ServiceError {
            kind: ServiceErrorKind::Problem,
            code: problem.problem_type,
            message: problem.title,
            status,
            correlation_id: problem.correlation_id,
            invalid_params: problem.invalid_params,
        };
    }

    ServiceError {
        kind: ServiceErrorKind::Unknown,
        code: String::new(),
        message: truncate_body(body),
        status,
        correlation_id: None,
        invalid_params: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_legacy() {
        let body = br#"{"error":{"error_code":"X","error_message":"Y"}}"#;
        let err = decode_error_response(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.kind, ServiceErrorKind::Legacy);
        assert_eq!(err.code, "X");
        assert_eq!(err.message, "Y");
        assert_eq!(err.status, Some(400));
        assert_eq!(err.to_string(), "Y (X) [HTTP 400]");
    }

    #[test]
    fn test_decode_problem() {
        let body = br#"{
            "type": "https://developers.upcloud.com/1.3/errors#ERROR_INVALID_REQUEST",
            "title": "Validation error.",
            "status": 400,
            "correlation_id": "01HXYZ",
            "invalid_params": [{"name": "hostname", "reason": "Must not be empty."}]
        }"#;
        let err = decode_error_response(StatusCode::BAD_REQUEST, body);
        assert_eq!(err.kind, ServiceErrorKind::Problem);
        assert_eq!(
            err.code,
            "https://developers.upcloud.com/1.3/errors#ERROR_INVALID_REQUEST"
        );
        assert_eq!(err.message, "Validation error.");
        assert_eq!(err.correlation_id.as_deref(), Some("01HXYZ"));
        assert_eq!(
            err.invalid_params,
            vec![InvalidParam {
                name: "hostname".to_string(),
                reason: "Must not be empty.".to_string(),
            }]
        );
    }

    #[test]
    fn test_problem_status_comes_from_http() {
        let body = br#"{"type":"t","title":"conflict","status":400}"#;
        let err = decode_error_response(StatusCode::CONFLICT, body);
        assert_eq!(err.status, Some(409));
    }

    #[test]
    fn test_decode_unknown_text() {
        let err = decode_error_response(StatusCode::BAD_GATEWAY, b"<html>bad gateway</html>");
        assert_eq!(err.kind, ServiceErrorKind::Unknown);
        assert_eq!(err.message, "<html>bad gateway</html>");
        assert_eq!(err.status, Some(502));
    }

    #[test]
    fn test_decode_empty_body() {
        let err = decode_error_response(StatusCode::NOT_FOUND, b"");
        assert_eq!(err.kind, ServiceErrorKind::Unknown);
        assert!(err.message.is_empty());
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "API error [HTTP 404]");
    }

    #[test]
    fn test_unrelated_json_is_unknown() {
        let err = decode_error_response(StatusCode::INTERNAL_SERVER_ERROR, br#"{"message":"hi"}"#);
        assert_eq!(err.kind, ServiceErrorKind::Unknown);
        assert_eq!(err.message, r#"{"message":"hi"}"#);
    }
}
