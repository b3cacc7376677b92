//
//  upcloud-api
//  api/common/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/10/19.
//  Copyright (c) 2026 IAMNGONI. All rights reserved.
//

//! Common API Types for the UpCloud client
//!
//! This module provides the error taxonomy shared by every layer of the client:
//! the HTTP transport, the generic dispatcher, the wait loops and the direct
//! upload coordinator all return [`Error`].
//!
//! # Overview
//!
//! - [`Error`] - Unified error type for all API operations
//! - [`ServiceError`] - Structured error decoded from a non-2xx API response
//! - [`Result`] - Convenience alias used throughout the crate
//! - [`Boolean`], [`ServerUuids`], [`Roles`] - Small shared wire types
//!
//! # Example
//!
//! ```rust
//! use upcloud_api::api::common::{Error, ServiceErrorKind};
//!
//! fn describe(result: upcloud_api::Result<()>) -> String {
//!     match result {
//!         Ok(()) => "ok".to_string(),
//!         Err(Error::Canceled) => "canceled".to_string(),
//!         Err(Error::Timeout) => "timed out".to_string(),
//!         Err(e) => match e.service_error() {
//!             Some(se) if se.kind == ServiceErrorKind::Problem => se.message.clone(),
//!             _ => e.to_string(),
//!         },
//!     }
//! }
//! ```

use thiserror::Error;

use crate::api::storage::StorageImportDetails;

mod service_error;
mod types;

pub use service_error::*;
pub use types::*;

/// Upper bound for raw response text carried inside errors.
pub(crate) const MAX_ERROR_BODY: usize = 512;

/// Unified error type for all UpCloud API operations.
///
/// # Variants
///
/// | Variant | Description |
/// |---------|-------------|
/// | `Transport` | Network, TLS or DNS failure |
/// | `Timeout` | Per-request or per-wait deadline exceeded |
/// | `Canceled` | The cancellation token fired |
/// | `Service` | The API answered with a non-2xx status |
/// | `Decode` | A 2xx body could not be decoded |
/// | `Encode` | A request body could not be serialized |
/// | `InvalidArgument` | Caller-side precondition failure |
/// | `Protocol` | The server broke an invariant the client relies on |
/// | `SourceOpen` | The direct-upload source file could not be opened |
/// | `ImportFailed` | A storage import ended in a failure state |
///
/// # Notes
///
/// - `reqwest` timeouts are mapped to [`Error::Timeout`], never to `Transport`
/// - Use [`Error::service_error`] to inspect API-side failures uniformly
#[derive(Error, Debug)]
pub enum Error {
    /// A network-level error occurred during the request.
    ///
    /// This covers connection failures, DNS resolution errors, TLS failures
    /// and other transport-layer issues.
    #[error("transport error: {0}")]
    Transport(#[source] reqwest::Error),

    /// The request or wait loop exceeded its deadline.
    #[error("operation timed out")]
    Timeout,

    /// The operation was canceled through its cancellation token.
    #[error("operation canceled")]
    Canceled,

    /// The API returned a non-2xx response.
    #[error(transparent)]
    Service(#[from] ServiceError),

    /// A successful response body could not be decoded into the target type.
    ///
    /// `body` holds the raw response text, truncated for readability.
    #[error("unable to decode response: {source} (body: {body})")]
    Decode {
        /// The underlying JSON error.
        #[source]
        source: serde_json::Error,
        /// The (truncated) raw body.
        body: String,
    },

    /// A request value could not be serialized to JSON.
    #[error("unable to encode request: {0}")]
    Encode(#[source] serde_json::Error),

    /// The caller supplied an invalid argument.
    #[error("{0}")]
    InvalidArgument(String),

    /// The server response violated an invariant the client relies on.
    #[error("{0}")]
    Protocol(String),

    /// The direct-upload source file could not be opened.
    #[error("unable to open SourceLocation: {0}")]
    SourceOpen(#[source] std::io::Error),

    /// A storage import reached `failed`, `cancelled` or `cancelling`.
    ///
    /// Carries the last polled details alongside the synthesized error.
    #[error("storage import {}: {source}", .details.state)]
    ImportFailed {
        /// The details returned by the final poll.
        details: Box<StorageImportDetails>,
        /// Error composed from the import's error code and message.
        #[source]
        source: ServiceError,
    },
}

impl Error {
    /// Returns the API-side error, if this error carries one.
    ///
    /// Both [`Error::Service`] and [`Error::ImportFailed`] expose a
    /// [`ServiceError`]; every other variant returns `None`.
    pub fn service_error(&self) -> Option<&ServiceError> {
        match self {
            Self::Service(e) => Some(e),
            Self::ImportFailed { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns `true` for [`Error::Canceled`].
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// Returns `true` for [`Error::Timeout`].
    pub fn is_timeout(&self) -> bool {
        matches!(self, Self::Timeout)
    }

    pub(crate) fn decode(source: serde_json::Error, body: &[u8]) -> Self {
        Self::Decode {
            source,
            body: truncate_body(body),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::Timeout
        } else {
            Self::Transport(err)
        }
    }
}

/// Convenience alias for results returned by this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Renders a response body as text, cut at [`MAX_ERROR_BODY`] bytes.
pub(crate) fn truncate_body(body: &[u8]) -> String {
    let text = String::from_utf8_lossy(body);
    if text.len() <= MAX_ERROR_BODY {
        return text.into_owned();
    }

    let mut end = MAX_ERROR_BODY;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_body_short() {
        assert_eq!(truncate_body(b"oops"), "oops");
    }

    #[test]
    fn test_truncate_body_long() {
        let body = "x".repeat(MAX_ERROR_BODY + 10);
        let text = truncate_body(body.as_bytes());
        assert_eq!(text.len(), MAX_ERROR_BODY + 3);
        assert!(text.ends_with("..."));
    }

    #[test]
    fn test_truncate_body_respects_char_boundary() {
        let mut body = "a".repeat(MAX_ERROR_BODY - 1);
        body.push('é');
        body.push_str("tail");
        let text = truncate_body(body.as_bytes());
        assert!(text.ends_with("a..."));
    }

    #[test]
    fn test_source_open_message() {
        let err = Error::SourceOpen(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "No such file or directory",
        ));
        assert!(err
            .to_string()
            .starts_with("unable to open SourceLocation: "));
    }

    #[test]
    fn test_service_error_accessor() {
        let err = Error::Canceled;
        assert!(err.service_error().is_none());
        assert!(err.is_canceled());
        assert!(!err.is_timeout());
    }
}
