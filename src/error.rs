use thiserror::Error;

/// Errors surfaced by every knowledge graph operation
#[derive(Debug, Error)]
pub enum DkgError {
    #[error("No service URL configured: pass one explicitly, set {env_var}, or add `rest_url` to {config_path}")]
    ConfigurationMissing {
        env_var: &'static str,
        config_path: String,
    },

    #[error("Invalid configuration from {origin}: {message}")]
    ConfigurationInvalid { origin: String, message: String },

    #[error("Invalid CURIE '{0}': expected <prefix>:<identifier>")]
    InvalidCurie(String),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Service unavailable at {url}: {message}")]
    ServiceUnavailable { url: String, message: String },

    #[error("Invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    #[error("No entity found for {0}")]
    NotFound(String),

    #[error("Request rejected by service ({status}): {message}")]
    Rejected { status: u16, message: String },
}

pub type Result<T> = std::result::Result<T, DkgError>;

impl DkgError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, DkgError::NotFound(_))
    }

    pub fn is_invalid_curie(&self) -> bool {
        matches!(self, DkgError::InvalidCurie(_))
    }

    /// True for transport failures, timeouts and 5xx responses
    pub fn is_unavailable(&self) -> bool {
        matches!(self, DkgError::ServiceUnavailable { .. })
    }

    pub fn is_invalid_response(&self) -> bool {
        matches!(self, DkgError::InvalidResponse { .. })
    }

    pub(crate) fn unavailable(url: &str, err: reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "request timed out".to_string()
        } else if err.is_connect() {
            format!("connection failed: {}", err)
        } else {
            err.to_string()
        };
        DkgError::ServiceUnavailable {
            url: url.to_string(),
            message,
        }
    }

    pub(crate) fn invalid_response(url: &str, message: impl Into<String>) -> Self {
        DkgError::InvalidResponse {
            url: url.to_string(),
            message: message.into(),
        }
    }
}
