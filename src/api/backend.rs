use std::fmt;

use async_trait::async_trait;

use super::types::{GenerateResponse, HealthCheck};

/// Errors that can occur while talking to the backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Client could not be built (bad base URL). Not retryable.
    Config(String),
    /// Connection refused, DNS failure, reset. The backend is probably down.
    Network(String),
    /// No response within the configured timeout.
    Timeout,
    /// Backend answered with a non-2xx status.
    Status { status: u16, message: String },
    /// `/health` answered but did not report "healthy".
    NonHealthyStatus(String),
    /// Response body was not the JSON we expected.
    Parse(String),
    /// `/generate` reported `success=false` or returned no text.
    GenerationFailed(String),
}

impl ApiError {
    /// Classifies a transport error from reqwest.
    pub fn from_reqwest(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout
        } else if e.is_decode() {
            ApiError::Parse(e.to_string())
        } else if let Some(status) = e.status() {
            ApiError::Status {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            ApiError::Network(e.to_string())
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Config(msg) => write!(f, "config error: {msg}"),
            ApiError::Network(msg) => write!(f, "network error: {msg}"),
            ApiError::Timeout => write!(f, "request timed out"),
            ApiError::Status { status, message } => {
                write!(f, "backend error (HTTP {status}): {message}")
            }
            ApiError::NonHealthyStatus(status) => {
                write!(f, "backend reported status '{status}'")
            }
            ApiError::Parse(msg) => write!(f, "parse error: {msg}"),
            ApiError::GenerationFailed(msg) => write!(f, "generation failed: {msg}"),
        }
    }
}

impl std::error::Error for ApiError {}

/// The backend as seen by the conversation store.
///
/// `HttpBackend` is the real implementation; tests substitute scripted fakes.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Probes the candidate ports and reports the first healthy one.
    async fn check_health(&self) -> Result<HealthCheck, ApiError>;

    /// Asks the backend on `port` to continue `prompt`.
    async fn generate_text(
        &self,
        prompt: &str,
        port: u16,
        max_length: u32,
        temperature: f32,
    ) -> Result<GenerateResponse, ApiError>;
}
