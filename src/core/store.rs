//! # Conversation Store
//!
//! Owns one session's [`ConversationState`] and the backend it talks to.
//! Each action awaits its HTTP call inline and commits the result through
//! [`update`], so callers see the state only between complete transitions.
//!
//! ```text
//! Store::send_message("hi")
//!   update(Submit)        → user message, is_loading = true
//!   backend.generate_text → Ok(text) | Err(e)
//!   update(ReplyReceived) → ai or error message, is_loading = false
//! ```

use std::sync::Arc;

use crate::api::{ApiError, Backend, GenerateResponse};
use crate::core::action::{Action, Effect, update};
use crate::core::config::{DEFAULT_MAX_LENGTH, DEFAULT_TEMPERATURE, ResolvedConfig};
use crate::core::message::Message;
use crate::core::state::{Connection, ConversationState};

/// Parameters sent with every `/generate` call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationSettings {
    pub max_length: u32,
    pub temperature: f32,
}

impl Default for GenerationSettings {
    fn default() -> Self {
        Self {
            max_length: DEFAULT_MAX_LENGTH,
            temperature: DEFAULT_TEMPERATURE,
        }
    }
}

impl From<&ResolvedConfig> for GenerationSettings {
    fn from(config: &ResolvedConfig) -> Self {
        Self {
            max_length: config.max_length,
            temperature: config.temperature,
        }
    }
}

/// Asks `backend` for a reply and reduces the response to its text.
pub async fn request_reply(
    backend: &dyn Backend,
    prompt: &str,
    port: u16,
    settings: GenerationSettings,
) -> Result<String, ApiError> {
    backend
        .generate_text(prompt, port, settings.max_length, settings.temperature)
        .await
        .and_then(GenerateResponse::into_text)
}

pub struct Store {
    backend: Arc<dyn Backend>,
    settings: GenerationSettings,
    state: ConversationState,
}

impl Store {
    pub fn new(backend: Arc<dyn Backend>, settings: GenerationSettings) -> Self {
        Self {
            backend,
            settings,
            state: ConversationState::new(),
        }
    }

    pub fn state(&self) -> &ConversationState {
        &self.state
    }

    pub fn messages(&self) -> &[Message] {
        &self.state.messages
    }

    pub fn connection(&self) -> Connection {
        self.state.connection
    }

    pub fn is_loading(&self) -> bool {
        self.state.is_loading
    }

    pub fn is_online(&self) -> bool {
        self.state.is_online()
    }

    pub fn is_offline(&self) -> bool {
        self.state.is_offline()
    }

    pub fn is_checking(&self) -> bool {
        self.state.is_checking()
    }

    pub fn port(&self) -> Option<u16> {
        self.state.port()
    }

    /// Probes the backend and records whether it is reachable.
    /// Returns true when it is online.
    pub async fn check_backend_status(&mut self) -> bool {
        if update(&mut self.state, Action::CheckStarted) == Effect::CheckHealth {
            let result = self.backend.check_health().await;
            update(&mut self.state, Action::HealthChecked(result));
        }
        self.state.is_online()
    }

    /// Sends `text` to the backend and appends the exchange.
    ///
    /// Returns false without touching the state when the backend isn't
    /// online. Otherwise the user message is always appended, followed by
    /// either the reply or an error notice; the return value says which.
    pub async fn send_message(&mut self, text: &str) -> bool {
        let Effect::SpawnRequest { prompt, port } =
            update(&mut self.state, Action::Submit(text.to_string()))
        else {
            return false;
        };

        let reply = request_reply(self.backend.as_ref(), &prompt, port, self.settings).await;
        let succeeded = reply.is_ok();
        update(&mut self.state, Action::ReplyReceived(reply));
        succeeded
    }

    pub fn clear_messages(&mut self) {
        update(&mut self.state, Action::ClearMessages);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::HealthCheck;
    use crate::core::message::{GENERATION_ERROR_TEXT, Sender};
    use crate::test_support::{ScriptedBackend, generated};

    fn store_with(backend: ScriptedBackend) -> (Store, Arc<ScriptedBackend>) {
        let backend = Arc::new(backend);
        let store = Store::new(backend.clone(), GenerationSettings::default());
        (store, backend)
    }

    #[tokio::test]
    async fn test_check_backend_status_online() {
        let (mut store, _) = store_with(ScriptedBackend::healthy_on(5050));
        assert!(store.is_checking());

        assert!(store.check_backend_status().await);
        assert!(store.is_online());
        assert_eq!(store.port(), Some(5050));
    }

    #[tokio::test]
    async fn test_check_backend_status_offline() {
        let (mut store, _) = store_with(ScriptedBackend::offline());
        assert!(!store.check_backend_status().await);
        assert!(store.is_offline());
        assert_eq!(store.port(), None);
    }

    #[tokio::test]
    async fn test_check_backend_status_client_error() {
        let (mut store, _) = store_with(ScriptedBackend::with_health(Err(ApiError::Config(
            "bad url".to_string(),
        ))));
        assert!(!store.check_backend_status().await);
        assert!(store.is_offline());
    }

    #[tokio::test]
    async fn test_send_message_offline_does_nothing() {
        let (mut store, backend) = store_with(ScriptedBackend::offline());
        store.check_backend_status().await;

        assert!(!store.send_message("hello").await);
        assert!(store.messages().is_empty());
        assert!(!store.is_loading());
        assert!(backend.generate_calls().is_empty());
    }

    #[tokio::test]
    async fn test_send_message_before_health_check_does_nothing() {
        let (mut store, backend) = store_with(ScriptedBackend::healthy_on(5000));
        assert!(!store.send_message("hello").await);
        assert!(store.messages().is_empty());
        assert!(backend.generate_calls().is_empty());
    }

    #[tokio::test]
    async fn test_send_message_success() {
        let backend = ScriptedBackend::healthy_on(5050).reply(Ok(generated("Hi! How can I help?")));
        let (mut store, backend) = store_with(backend);
        store.check_backend_status().await;

        assert!(store.send_message("hello").await);

        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(messages[0].text, "hello");
        assert_eq!(messages[1].sender, Sender::Ai);
        assert_eq!(messages[1].text, "Hi! How can I help?");
        assert!(messages[0].id < messages[1].id);
        assert!(!store.is_loading());

        let calls = backend.generate_calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].prompt, "hello");
        assert_eq!(calls[0].port, 5050);
        assert_eq!(calls[0].max_length, DEFAULT_MAX_LENGTH);
        assert_eq!(calls[0].temperature, DEFAULT_TEMPERATURE);
    }

    #[tokio::test]
    async fn test_send_message_uses_configured_settings() {
        let backend = Arc::new(ScriptedBackend::healthy_on(5000).reply(Ok(generated("ok"))));
        let settings = GenerationSettings {
            max_length: 42,
            temperature: 0.1,
        };
        let mut store = Store::new(backend.clone(), settings);
        store.check_backend_status().await;
        store.send_message("hi").await;

        let calls = backend.generate_calls();
        assert_eq!(calls[0].max_length, 42);
        assert_eq!(calls[0].temperature, 0.1);
    }

    #[tokio::test]
    async fn test_send_message_success_false_appends_error() {
        let unsuccessful = GenerateResponse {
            success: false,
            generated_text: None,
            error: None,
        };
        let backend = ScriptedBackend::healthy_on(5000).reply(Ok(unsuccessful));
        let (mut store, _) = store_with(backend);
        store.check_backend_status().await;

        assert!(!store.send_message("hello").await);

        let messages = store.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[1].sender, Sender::System);
        assert!(messages[1].error);
        assert_eq!(messages[1].text, GENERATION_ERROR_TEXT);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_send_message_network_error_appends_error() {
        let backend = ScriptedBackend::healthy_on(5000).reply(Err(ApiError::Timeout));
        let (mut store, _) = store_with(backend);
        store.check_backend_status().await;

        assert!(!store.send_message("hello").await);
        assert_eq!(store.messages().len(), 2);
        assert!(store.messages()[1].error);
        // A failed generation does not change the connection state
        assert!(store.is_online());
    }

    #[tokio::test]
    async fn test_clear_messages_keeps_connection() {
        let backend = ScriptedBackend::healthy_on(5050).reply(Ok(generated("ok")));
        let (mut store, _) = store_with(backend);
        store.check_backend_status().await;
        store.send_message("hi").await;

        store.clear_messages();
        assert!(store.messages().is_empty());
        assert_eq!(store.port(), Some(5050));
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn test_repeated_checks_each_reach_backend() {
        let (mut store, backend) = store_with(ScriptedBackend::offline());
        assert!(!store.check_backend_status().await);
        assert!(!store.state().health_pending);

        backend.set_health(Ok(HealthCheck::online(5050)));
        assert!(store.check_backend_status().await);
        assert_eq!(store.connection(), Connection::Online(5050));
    }

    #[tokio::test]
    async fn test_recheck_after_going_offline() {
        let (mut store, backend) = store_with(ScriptedBackend::healthy_on(5000));
        assert!(store.check_backend_status().await);

        backend.set_health(Ok(HealthCheck::offline()));
        assert!(!store.check_backend_status().await);
        assert_eq!(store.port(), None);
    }
}
