//! Test utilities shared across the crate.
//!
//! This module is only compiled during tests (`#[cfg(test)]`).

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::api::{ApiError, Backend, GenerateResponse, HealthCheck};

/// One recorded `generate_text` call.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateCall {
    pub prompt: String,
    pub port: u16,
    pub max_length: u32,
    pub temperature: f32,
}

/// A backend that answers from a script instead of the network.
pub struct ScriptedBackend {
    health: Mutex<Result<HealthCheck, ApiError>>,
    replies: Mutex<VecDeque<Result<GenerateResponse, ApiError>>>,
    calls: Mutex<Vec<GenerateCall>>,
}

impl ScriptedBackend {
    pub fn with_health(health: Result<HealthCheck, ApiError>) -> Self {
        Self {
            health: Mutex::new(health),
            replies: Mutex::new(VecDeque::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn healthy_on(port: u16) -> Self {
        Self::with_health(Ok(HealthCheck::online(port)))
    }

    pub fn offline() -> Self {
        Self::with_health(Ok(HealthCheck::offline()))
    }

    /// Queues the response for the next `generate_text` call.
    pub fn reply(self, reply: Result<GenerateResponse, ApiError>) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn set_health(&self, health: Result<HealthCheck, ApiError>) {
        *self.health.lock().unwrap() = health;
    }

    pub fn generate_calls(&self) -> Vec<GenerateCall> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn check_health(&self) -> Result<HealthCheck, ApiError> {
        self.health.lock().unwrap().clone()
    }

    async fn generate_text(
        &self,
        prompt: &str,
        port: u16,
        max_length: u32,
        temperature: f32,
    ) -> Result<GenerateResponse, ApiError> {
        self.calls.lock().unwrap().push(GenerateCall {
            prompt: prompt.to_string(),
            port,
            max_length,
            temperature,
        });
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(ApiError::Network("no scripted reply".to_string())))
    }
}

/// A successful `/generate` body carrying `text`.
pub fn generated(text: &str) -> GenerateResponse {
    GenerateResponse {
        success: true,
        generated_text: Some(text.to_string()),
        error: None,
    }
}
