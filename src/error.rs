use reqwest::StatusCode;
use thiserror::Error;
pub use url::ParseError as UrlParseError;

use crate::models::api_call_rc::ApiCallRc;

/// Error types for the LINSTOR API client.
#[derive(Error, Debug)]
pub enum LinstorError {
    /// The request never produced an HTTP response (connection refused,
    /// DNS failure, TLS error, timeout).
    #[error("HTTP error: {0}")]
    HttpError(#[from] reqwest::Error),

    /// Error parsing URL.
    #[error("URL parse error: {0}")]
    UrlParseError(#[from] UrlParseError),

    /// The endpoint template or its path parameters are inconsistent.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// Error serializing or deserializing JSON.
    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    /// Invalid client configuration.
    #[error("Invalid configuration: {0}")]
    ConfigurationError(String),

    /// The controller answered, but not with the data the caller asked for.
    #[error("{context} (status {status})")]
    RequestFailed {
        /// Human readable description of the failed operation.
        context: String,
        /// HTTP status of the response.
        status: StatusCode,
        /// Return codes from the response body, if it carried any.
        reports: Vec<ApiCallRc>,
    },

    /// The requested object does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A cron expression could not be parsed.
    #[error("Invalid cron expression '{expr}': {reason}")]
    InvalidCron { expr: String, reason: String },

    /// The process-wide default client was used before `initialize`.
    #[error("Default client has not been initialized")]
    NotInitialized,
}

impl LinstorError {
    /// Returns the first error message reported by the controller, if any.
    pub fn controller_message(&self) -> Option<&str> {
        match self {
            LinstorError::RequestFailed { reports, .. } => reports
                .iter()
                .find(|rc| rc.is_error())
                .or_else(|| reports.first())
                .map(|rc| rc.message.as_str()),
            _ => None,
        }
    }
}

/// Result type for LINSTOR API operations.
pub type LinstorResult<T> = Result<T, LinstorError>;
