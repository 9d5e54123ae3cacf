//! # Actions
//!
//! Everything that can happen to a conversation becomes an `Action`.
//! User presses Enter? That's `Action::Submit(text)`.
//! Backend replies? That's `Action::ReplyReceived(result)`.
//!
//! The `update()` function applies an action to the state and returns an
//! `Effect`: the I/O the caller must perform next. No I/O happens here.
//!
//! ```text
//! State + Action  →  update()  →  New State + Effect
//! ```
//!
//! Both front ends drive this reducer: `Store` awaits each effect inline,
//! the TUI spawns it and feeds the result back as another action.

use log::{debug, info, warn};

use super::message::Message;
use super::state::{Connection, ConversationState};
use crate::api::{ApiError, HealthCheck};

#[derive(Debug)]
pub enum Action {
    /// A health check is about to run. Ignored while one is already in flight.
    CheckStarted,
    /// The health check finished (or the client failed outright).
    HealthChecked(Result<HealthCheck, ApiError>),
    /// The user sent a message.
    Submit(String),
    /// The backend answered a submitted message.
    ReplyReceived(Result<String, ApiError>),
    ClearMessages,
    Quit,
}

/// I/O requested by `update()`.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    None,
    /// Probe the candidate ports, then dispatch `HealthChecked`.
    CheckHealth,
    /// Call `/generate` on `port`, then dispatch `ReplyReceived`.
    SpawnRequest { prompt: String, port: u16 },
    Quit,
}

pub fn update(state: &mut ConversationState, action: Action) -> Effect {
    match action {
        Action::CheckStarted => {
            if state.health_pending {
                debug!("Health check already in flight, not starting another");
                return Effect::None;
            }
            state.health_pending = true;
            state.connection = Connection::Checking;
            Effect::CheckHealth
        }

        Action::HealthChecked(result) => {
            state.health_pending = false;
            state.connection = match result {
                Ok(HealthCheck {
                    is_healthy: true,
                    port: Some(port),
                }) => Connection::Online(port),
                Ok(_) => Connection::Offline,
                Err(e) => {
                    warn!("Health check failed: {}", e);
                    Connection::Offline
                }
            };
            info!("Backend status: {}", state.connection.label());
            Effect::None
        }

        Action::Submit(text) => {
            let Connection::Online(port) = state.connection else {
                debug!("Submit ignored: backend is {}", state.connection.label());
                return Effect::None;
            };
            let id = state.ids.next();
            state.messages.push(Message::user(id, text.clone()));
            state.is_loading = true;
            Effect::SpawnRequest { prompt: text, port }
        }

        Action::ReplyReceived(result) => {
            let id = state.ids.next();
            let message = match result {
                Ok(text) => Message::ai(id, text),
                Err(e) => {
                    warn!("Failed to send message: {}", e);
                    Message::generation_error(id)
                }
            };
            state.messages.push(message);
            state.is_loading = false;
            Effect::None
        }

        Action::ClearMessages => {
            state.messages.clear();
            Effect::None
        }

        Action::Quit => Effect::Quit,
    }
}
