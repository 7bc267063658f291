//! Success and error result shapes returned by every tool.

use serde::Serialize;
use serde_json::Value;

use crate::error::ApiError;

/// Error shape: a description, the HTTP status when one exists, and the
/// parsed (or raw) response body when one was received.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorEnvelope {
    pub error: String,
    pub status_code: Option<u16>,
    pub details: Option<Value>,
}

impl ErrorEnvelope {
    /// Build the error shape for a failed operation.
    ///
    /// `failed` completes "Failed to ..." for HTTP failures and `during`
    /// completes "Unexpected error occurred while ..." for everything else.
    /// Validation messages are used verbatim.
    pub fn from_api_error(err: &ApiError, failed: &str, during: &str) -> Self {
        match err {
            ApiError::Validation(message) => ErrorEnvelope {
                error: message.clone(),
                status_code: None,
                details: None,
            },
            ApiError::NotFound { .. } => ErrorEnvelope {
                error: format!("Failed to {failed}: {err}"),
                status_code: Some(404),
                details: None,
            },
            ApiError::Remote {
                status, details, ..
            } => ErrorEnvelope {
                error: format!("Failed to {failed}: {err}"),
                status_code: Some(*status),
                details: details.clone(),
            },
            ApiError::Unexpected(message) => ErrorEnvelope {
                error: format!("Unexpected error occurred while {during}: {message}"),
                status_code: None,
                details: None,
            },
        }
    }
}

/// Tool result: either the operation's success payload or an error shape.
///
/// Serialises untagged, so callers see the payload fields (or the error
/// fields) at the top level.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Envelope<T> {
    Success(T),
    Failure(ErrorEnvelope),
}

impl<T> Envelope<T> {
    pub fn is_error(&self) -> bool {
        matches!(self, Envelope::Failure(_))
    }

    pub fn failure(err: &ApiError, failed: &str, during: &str) -> Self {
        Envelope::Failure(ErrorEnvelope::from_api_error(err, failed, during))
    }

    /// Error shape for a call refused before any request was sent.
    pub fn rejected(message: impl Into<String>) -> Self {
        Envelope::Failure(ErrorEnvelope {
            error: message.into(),
            status_code: None,
            details: None,
        })
    }

    pub fn success(self) -> Option<T> {
        match self {
            Envelope::Success(value) => Some(value),
            Envelope::Failure(_) => None,
        }
    }

    pub fn error(self) -> Option<ErrorEnvelope> {
        match self {
            Envelope::Success(_) => None,
            Envelope::Failure(err) => Some(err),
        }
    }
}
