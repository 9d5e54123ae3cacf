//! Wire types for the backend's HTTP endpoints.
//!
//! ```text
//! GET  /health    → { "status": "healthy" }
//! POST /generate  { prompt, max_length, temperature }
//!                 → { "success": true, "generated_text": "..." }
//! ```

use serde::{Deserialize, Serialize};

use super::backend::ApiError;

/// The `status` value a healthy backend reports.
pub const HEALTHY: &str = "healthy";

/// Body of `GET /health`.
#[derive(Deserialize, Debug, Clone, PartialEq)]
pub struct HealthResponse {
    pub status: String,
}

impl HealthResponse {
    pub fn is_healthy(&self) -> bool {
        self.status == HEALTHY
    }
}

/// Result of probing the candidate ports.
///
/// `port` is `Some` exactly when `is_healthy` is true.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HealthCheck {
    pub is_healthy: bool,
    pub port: Option<u16>,
}

impl HealthCheck {
    pub fn online(port: u16) -> Self {
        Self {
            is_healthy: true,
            port: Some(port),
        }
    }

    pub fn offline() -> Self {
        Self {
            is_healthy: false,
            port: None,
        }
    }
}

/// Body of `POST /generate`.
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerateRequest {
    pub prompt: String,
    pub max_length: u32,
    pub temperature: f32,
}

/// Body returned by `POST /generate`.
///
/// Both fields are lenient: a backend that omits `success` is treated as
/// having failed, and `generated_text` may be absent on failure.
#[derive(Deserialize, Debug, Clone, PartialEq, Default)]
pub struct GenerateResponse {
    #[serde(default)]
    pub success: bool,
    #[serde(default)]
    pub generated_text: Option<String>,
    /// Some backends explain a failure here.
    #[serde(default)]
    pub error: Option<String>,
}

impl GenerateResponse {
    /// Collapses the response into the generated text, or
    /// `ApiError::GenerationFailed` when the backend reported failure.
    pub fn into_text(self) -> Result<String, ApiError> {
        match (self.success, self.generated_text) {
            (true, Some(text)) => Ok(text),
            (true, None) => Err(ApiError::GenerationFailed(
                "response is missing generated_text".to_string(),
            )),
            (false, _) => Err(ApiError::GenerationFailed(
                self.error
                    .unwrap_or_else(|| "backend reported success=false".to_string()),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_health_response_healthy() {
        let resp: HealthResponse = serde_json::from_str(r#"{"status":"healthy"}"#).unwrap();
        assert!(resp.is_healthy());
    }

    #[test]
    fn test_health_response_other_status_is_unhealthy() {
        let resp: HealthResponse =
            serde_json::from_str(r#"{"status":"loading","model":"gpt2"}"#).unwrap();
        assert!(!resp.is_healthy());
    }

    #[test]
    fn test_generate_request_field_names() {
        let req = GenerateRequest {
            prompt: "Hi".to_string(),
            max_length: 150,
            temperature: 0.5,
        };
        let value = serde_json::to_value(&req).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"prompt": "Hi", "max_length": 150, "temperature": 0.5})
        );
    }

    #[test]
    fn test_into_text_success() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"success":true,"generated_text":"Hello there"}"#).unwrap();
        assert_eq!(resp.into_text().unwrap(), "Hello there");
    }

    #[test]
    fn test_into_text_success_false() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"success":false,"error":"model not loaded"}"#).unwrap();
        match resp.into_text() {
            Err(ApiError::GenerationFailed(msg)) => assert_eq!(msg, "model not loaded"),
            other => panic!("expected GenerationFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_into_text_missing_text() {
        let resp: GenerateResponse = serde_json::from_str(r#"{"success":true}"#).unwrap();
        assert!(matches!(
            resp.into_text(),
            Err(ApiError::GenerationFailed(_))
        ));
    }

    #[test]
    fn test_missing_success_field_defaults_to_failure() {
        let resp: GenerateResponse =
            serde_json::from_str(r#"{"generated_text":"orphan"}"#).unwrap();
        assert!(!resp.success);
        assert!(resp.into_text().is_err());
    }

    #[test]
    fn test_health_check_constructors() {
        assert_eq!(HealthCheck::online(5050).port, Some(5050));
        assert!(HealthCheck::online(5050).is_healthy);
        assert_eq!(HealthCheck::offline(), HealthCheck { is_healthy: false, port: None });
    }
}
