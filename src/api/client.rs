//! HTTP implementation of [`Backend`].
//!
//! The backend may be listening on either of two well-known ports. Health
//! checks walk the candidates in order and stop at the first healthy one;
//! generation requests go straight to the port the health check found.

use std::time::Duration;

use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::Url;

use super::backend::{ApiError, Backend};
use super::types::{GenerateRequest, GenerateResponse, HealthCheck, HealthResponse};
use crate::core::config::ResolvedConfig;

/// Ports probed by the health check, in order.
pub const CANDIDATE_PORTS: [u16; 2] = [5000, 5050];

/// A reqwest client pinned to one backend port.
pub struct PortClient {
    base_url: Url,
    http: reqwest::Client,
}

impl PortClient {
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn endpoint(&self, path: &str) -> Result<Url, ApiError> {
        self.base_url
            .join(path)
            .map_err(|e| ApiError::Config(format!("invalid endpoint '{path}': {e}")))
    }

    async fn get_health(&self) -> Result<HealthResponse, ApiError> {
        let response = self
            .http
            .get(self.endpoint("health")?)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(ApiError::from_reqwest)
    }

    async fn post_generate(&self, body: &GenerateRequest) -> Result<GenerateResponse, ApiError> {
        let response = self
            .http
            .post(self.endpoint("generate")?)
            .json(body)
            .send()
            .await
            .map_err(ApiError::from_reqwest)?;

        let status = response.status();
        debug!("Generate response status: {}", status);
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        response.json().await.map_err(ApiError::from_reqwest)
    }
}

/// Talks to the text-generation backend over HTTP.
pub struct HttpBackend {
    /// Scheme and host; the port is replaced per request.
    base_url: Url,
    ports: [u16; 2],
    timeout: Duration,
}

impl HttpBackend {
    /// Creates a backend whose host comes from `base_url`.
    ///
    /// Only the scheme and host of `base_url` are used; its port and path are
    /// ignored because the port is discovered by the health check.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)
            .map_err(|e| ApiError::Config(format!("invalid base URL '{base_url}': {e}")))?;
        if base_url.cannot_be_a_base() || base_url.host().is_none() {
            return Err(ApiError::Config(format!("base URL '{base_url}' has no host")));
        }
        base_url.set_path("/");
        base_url.set_query(None);
        base_url.set_fragment(None);

        Ok(Self {
            base_url,
            ports: CANDIDATE_PORTS,
            timeout,
        })
    }

    pub fn from_config(config: &ResolvedConfig) -> Result<Self, ApiError> {
        Ok(Self::new(&config.base_url, config.timeout)?.with_ports(config.candidate_ports))
    }

    /// Overrides the candidate ports (primary first).
    pub fn with_ports(mut self, ports: [u16; 2]) -> Self {
        self.ports = ports;
        self
    }

    pub fn ports(&self) -> [u16; 2] {
        self.ports
    }

    /// Builds a client for `http://<host>:<port>` with the configured timeout.
    pub fn build_client(&self, port: u16) -> Result<PortClient, ApiError> {
        let mut base_url = self.base_url.clone();
        base_url
            .set_port(Some(port))
            .map_err(|_| ApiError::Config(format!("cannot set port {port} on '{base_url}'")))?;

        let http = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| ApiError::Config(e.to_string()))?;

        Ok(PortClient { base_url, http })
    }

    async fn probe(&self, port: u16) -> Result<(), ApiError> {
        let client = self.build_client(port)?;
        debug!("Probing {}health", client.base_url());
        let health = client.get_health().await?;
        if health.is_healthy() {
            Ok(())
        } else {
            Err(ApiError::NonHealthyStatus(health.status))
        }
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn check_health(&self) -> Result<HealthCheck, ApiError> {
        let last = self.ports.len() - 1;
        for (attempt, &port) in self.ports.iter().enumerate() {
            match self.probe(port).await {
                Ok(()) => {
                    info!("Backend healthy on port {}", port);
                    return Ok(HealthCheck::online(port));
                }
                Err(e) if attempt < last => {
                    info!(
                        "Port {} not available ({}), trying {}...",
                        port,
                        e,
                        self.ports[attempt + 1]
                    );
                }
                Err(e) => {
                    warn!("All candidate ports failed: {}", e);
                }
            }
        }
        Ok(HealthCheck::offline())
    }

    async fn generate_text(
        &self,
        prompt: &str,
        port: u16,
        max_length: u32,
        temperature: f32,
    ) -> Result<GenerateResponse, ApiError> {
        let client = self.build_client(port)?;
        let body = GenerateRequest {
            prompt: prompt.to_string(),
            max_length,
            temperature,
        };

        info!(
            "Generate request: port={}, prompt_len={}, max_length={}, temperature={}",
            port,
            body.prompt.len(),
            max_length,
            temperature
        );

        client.post_generate(&body).await.inspect_err(|e| {
            warn!("Text generation failed: {}", e);
        })
    }
}
