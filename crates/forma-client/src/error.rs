//! Form backend client error types.

/// Errors from form backend API calls.
#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    /// The HTTP client itself could not be constructed.
    #[error("failed to build HTTP client: {source}")]
    Client { source: reqwest::Error },
    /// HTTP transport error.
    #[error("HTTP error calling {endpoint}: {source}")]
    Http {
        endpoint: String,
        source: reqwest::Error,
    },
    /// The backend returned a non-2xx status.
    #[error("backend {endpoint} returned {status}: {detail}")]
    Api {
        endpoint: String,
        status: u16,
        detail: String,
    },
    /// Response deserialization failed.
    #[error("failed to deserialize response from {endpoint}: {source}")]
    Deserialization {
        endpoint: String,
        source: reqwest::Error,
    },
    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(#[from] super::config::ConfigError),
}

impl BackendError {
    /// HTTP status of the failure, when the backend answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            BackendError::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_display_includes_endpoint_and_detail() {
        let err = BackendError::Api {
            endpoint: "/submit-form".to_string(),
            status: 422,
            detail: "schema_json must be an object".to_string(),
        };
        let rendered = err.to_string();
        assert!(rendered.contains("/submit-form"));
        assert!(rendered.contains("422"));
        assert!(rendered.contains("schema_json must be an object"));
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn config_error_converts_into_backend_error() {
        let source = crate::config::ConfigError::MissingVar {
            name: "FORMA_API_URL".to_string(),
        };
        let err = BackendError::from(source);
        assert!(matches!(err, BackendError::Config(_)));
        assert_eq!(err.status(), None);
    }
}
