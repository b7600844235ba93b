//! Error types for credential loading and request signing

/// Errors that can occur while resolving credentials or signing a request
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    /// Explicit key material and a key file were both supplied
    #[error("Ambiguous credential source: pass either an API key pair or a key file, not both")]
    AmbiguousCredentialSource,

    /// No usable credential source was supplied
    #[error("Missing credentials: {0}")]
    MissingCredentials(String),

    /// Key file JSON lacks a required field
    #[error("Incomplete key material: key file must contain '{0}'")]
    IncompleteKeyMaterial(&'static str),

    /// Private key could not be decoded
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),

    /// Key file content is not valid JSON
    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Key file could not be read
    #[error("Failed to read key file: {0}")]
    Io(#[from] std::io::Error),

    /// Environment variable not set
    #[error("Environment variable not set: {0}")]
    EnvVarNotSet(String),
}

/// Result type for authentication operations
pub type AuthResult<T> = Result<T, AuthError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = AuthError::EnvVarNotSet("COINBASE_API_KEY".to_string());
        assert!(err.to_string().contains("COINBASE_API_KEY"));

        let err = AuthError::IncompleteKeyMaterial("privateKey");
        assert!(err.to_string().contains("privateKey"));
    }

    #[test]
    fn test_parse_error_from_serde() {
        let err: AuthError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, AuthError::Parse(_)));
    }
}
