//! # TUI Components
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: app name, backend status, loading indicator
//! - `MessageView`: one conversation message
//! - `LandingPage`: shown while the conversation is empty
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: text input, emits `InputEvent::Submit`
//! - `MessageList`: scrollable conversation view
//!
//! Components receive external data as props (struct fields), not by
//! reaching into global state.

pub mod input_box;
pub mod landing;
pub mod message;
pub mod message_list;
pub mod title_bar;

pub use input_box::{InputBox, InputEvent, InputHint};
pub use landing::LandingPage;
pub use message::MessageView;
pub use message_list::{MessageList, MessageListState};
pub use title_bar::TitleBar;
