//! # Backend API Client
//!
//! Everything that crosses the wire to the text-generation backend.
//!
//! - [`backend`]: the `Backend` trait and `ApiError`
//! - [`client`]: `HttpBackend`, the reqwest implementation with port fallback
//! - [`types`]: request/response bodies

pub mod backend;
pub mod client;
pub mod types;

pub use backend::{ApiError, Backend};
pub use client::{CANDIDATE_PORTS, HttpBackend, PortClient};
pub use types::{GenerateRequest, GenerateResponse, HealthCheck, HealthResponse};
