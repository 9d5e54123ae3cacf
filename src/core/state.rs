//! # Conversation State
//!
//! Everything a UI needs to render one chat session. No I/O here.
//!
//! ```text
//! ConversationState
//! ├── connection: Connection     // Checking | Online(port) | Offline
//! ├── messages: Vec<Message>     // append-only, insertion order
//! ├── is_loading: bool           // a /generate request is in flight
//! ├── health_pending: bool       // a health check is in flight
//! └── ids: IdGenerator           // monotonic message IDs
//! ```
//!
//! State changes only happen through `update(state, action)` in action.rs.

use super::message::{IdGenerator, Message};

/// Backend availability. The port lives inside `Online`, so a port is
/// known exactly when the backend is online.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Connection {
    #[default]
    Checking,
    Online(u16),
    Offline,
}

impl Connection {
    pub fn label(&self) -> String {
        match self {
            Connection::Checking => "checking".to_string(),
            Connection::Online(port) => format!("online (port {port})"),
            Connection::Offline => "offline".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversationState {
    pub connection: Connection,
    pub messages: Vec<Message>,
    pub is_loading: bool,
    /// At most one health check runs at a time; see `Action::CheckStarted`.
    pub health_pending: bool,
    pub ids: IdGenerator,
}

impl ConversationState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_online(&self) -> bool {
        matches!(self.connection, Connection::Online(_))
    }

    pub fn is_offline(&self) -> bool {
        self.connection == Connection::Offline
    }

    pub fn is_checking(&self) -> bool {
        self.connection == Connection::Checking
    }

    pub fn port(&self) -> Option<u16> {
        match self.connection {
            Connection::Online(port) => Some(port),
            _ => None,
        }
    }
}
