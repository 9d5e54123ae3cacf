//! # Core Application Logic
//!
//! Conversation state and the rules for changing it.
//! It knows nothing about any specific UI technology.
//!
//! ```text
//!                    ┌─────────────────────────┐
//!                    │         CORE            │
//!                    │  (this module)          │
//!                    │                         │
//!                    │  • State (conversation) │
//!                    │  • Action (events)      │
//!                    │  • update() (reducer)   │
//!                    │  • Store (awaits I/O)   │
//!                    └───────────┬─────────────┘
//!                                │
//!            ┌───────────────────┴───────────────────┐
//!            ▼                                       ▼
//!     ┌────────────┐                          ┌────────────┐
//!     │    TUI     │                          │  Headless  │
//!     │  Adapter   │                          │  (--prompt)│
//!     │ (ratatui)  │                          │            │
//!     └────────────┘                          └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`state`]: `ConversationState` and `Connection`
//! - [`message`]: `Message`, `Sender` and the ID generator
//! - [`action`]: the `Action` enum and `update()`
//! - [`store`]: `Store`, the awaitable action interface
//! - [`config`]: layered configuration

pub mod action;
pub mod config;
pub mod message;
pub mod state;
pub mod store;

pub use action::{Action, Effect, update};
pub use message::{Message, Sender};
pub use state::{Connection, ConversationState};
pub use store::{GenerationSettings, Store};
