//! Error types for REST API operations

use coinbase_auth::AuthError;
use reqwest::StatusCode;

/// Errors that can occur during REST API operations
#[derive(Debug, thiserror::Error)]
pub enum RestError {
    /// Credentials could not be resolved or used for signing
    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    /// HTTP transport failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API answered with a 4xx or 5xx status
    #[error("{status} {message} {body}")]
    Api {
        /// HTTP status code
        status: u16,
        /// e.g. "Client Error: Bad Request"
        message: String,
        /// Raw response body
        body: String,
    },

    /// Successful response did not match the expected shape
    #[error("Failed to decode response: {source}")]
    Decode {
        /// Underlying JSON error
        source: serde_json::Error,
        /// Raw response body
        body: String,
    },

    /// Invalid request parameters
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl RestError {
    /// Build an API error from an error status and the response body
    pub fn api(status: StatusCode, body: impl Into<String>) -> Self {
        let kind = if status.is_server_error() {
            "Server Error"
        } else {
            "Client Error"
        };
        let message = match status.canonical_reason() {
            Some(reason) => format!("{}: {}", kind, reason),
            None => kind.to_string(),
        };

        Self::Api {
            status: status.as_u16(),
            message,
            body: body.into(),
        }
    }

    /// HTTP status of an API error
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Check if the API rejected the request (4xx)
    pub fn is_client_error(&self) -> bool {
        matches!(self.status(), Some(400..=499))
    }

    /// Check if the API failed to serve the request (5xx)
    pub fn is_server_error(&self) -> bool {
        matches!(self.status(), Some(500..=599))
    }

    /// Check if this error came from credential handling
    pub fn is_auth_error(&self) -> bool {
        matches!(self, Self::Auth(_))
    }
}

/// Result type for REST operations
pub type RestResult<T> = Result<T, RestError>;
