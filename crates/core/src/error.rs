//! Error kinds shared by the resource clients and the tool facade.

use serde_json::Value;

/// Failure of a single Freshservice operation.
///
/// The variants map onto the envelope shapes returned to tool callers:
/// `Validation` never reaches the network, `NotFound` becomes a structured
/// "no such record" result for id lookups, `Remote` carries the HTTP status
/// and whatever body the API sent back, and `Unexpected` captures everything
/// else (transport failures, timeouts, malformed JSON) as text.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ApiError {
    #[error("{0}")]
    Validation(String),

    #[error("Resource not found: {url}")]
    NotFound { url: String },

    #[error("HTTP {status} error for url '{url}'")]
    Remote {
        status: u16,
        url: String,
        details: Option<Value>,
    },

    #[error("{0}")]
    Unexpected(String),
}

impl ApiError {
    /// Build a remote error from a status and a raw response body.
    ///
    /// The body is parsed as JSON when possible, kept as a string otherwise,
    /// and dropped when empty.
    pub fn remote(status: u16, url: impl Into<String>, body: &str) -> Self {
        let details = if body.trim().is_empty() {
            None
        } else {
            Some(
                serde_json::from_str::<Value>(body)
                    .unwrap_or_else(|_| Value::String(body.to_string())),
            )
        };

        ApiError::Remote {
            status,
            url: url.into(),
            details,
        }
    }

    /// Classify a non-2xx response: 404 is `NotFound`, anything else `Remote`.
    pub fn from_status(status: u16, url: impl Into<String>, body: &str) -> Self {
        if status == 404 {
            ApiError::NotFound { url: url.into() }
        } else {
            ApiError::remote(status, url, body)
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::NotFound { .. })
    }

    /// HTTP status carried by the error, if any.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            ApiError::NotFound { .. } => Some(404),
            ApiError::Remote { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_remote_parses_json_body() {
        let err = ApiError::remote(400, "https://x/api", r#"{"description":"bad"}"#);
        match err {
            ApiError::Remote {
                status, details, ..
            } => {
                assert_eq!(status, 400);
                assert_eq!(details, Some(json!({"description": "bad"})));
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_remote_keeps_raw_text_body() {
        let err = ApiError::remote(502, "https://x/api", "Bad Gateway");
        assert_eq!(err.status_code(), Some(502));
        match err {
            ApiError::Remote { details, .. } => {
                assert_eq!(details, Some(Value::String("Bad Gateway".to_string())))
            }
            other => panic!("unexpected variant: {other:?}"),
        }
    }

    #[test]
    fn test_remote_drops_empty_body() {
        let err = ApiError::remote(500, "https://x/api", "  ");
        assert_eq!(
            err,
            ApiError::Remote {
                status: 500,
                url: "https://x/api".to_string(),
                details: None
            }
        );
    }

    #[test]
    fn test_from_status_classifies_404() {
        let err = ApiError::from_status(404, "https://x/api/v2/departments/1", "");
        assert!(err.is_not_found());
        assert_eq!(err.status_code(), Some(404));

        let err = ApiError::from_status(403, "https://x/api/v2/departments/1", "");
        assert!(!err.is_not_found());
    }

    #[test]
    fn test_display_includes_status_and_url() {
        let err = ApiError::remote(401, "https://acme.freshservice.com/api/v2/requesters", "");
        assert_eq!(
            err.to_string(),
            "HTTP 401 error for url 'https://acme.freshservice.com/api/v2/requesters'"
        );
    }
}
