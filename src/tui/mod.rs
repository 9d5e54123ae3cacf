//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Event Loop
//!
//! Actions go through `core::update()`. Whatever `Effect` comes back is
//! spawned on tokio; the task sends its result back over an mpsc channel as
//! another `Action`, which the loop drains between frames. The render loop
//! never blocks on the network.
//!
//! While a request is pending the loop polls every ~80ms so results show up
//! promptly; otherwise it sleeps up to 500ms between input checks.

mod component;
pub mod components;
mod event;
mod ui;

use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::Duration;

use crossterm::event::{DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture};
use crossterm::execute;
use log::{debug, info, warn};
use ratatui::DefaultTerminal;
use ratatui::style::Color;

use crate::api::Backend;
use crate::core::config::ResolvedConfig;
use crate::core::store::request_reply;
use crate::core::{Action, ConversationState, Effect, GenerationSettings, update};
use crate::tui::component::EventHandler;
use crate::tui::components::title_bar::parse_theme_color;
use crate::tui::components::{InputBox, InputEvent, MessageListState};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub message_list: MessageListState,
    pub input_box: InputBox,
    pub app_name: String,
    pub app_description: String,
    pub theme: Color,
}

impl TuiState {
    pub fn new(config: &ResolvedConfig) -> Self {
        Self {
            message_list: MessageListState::new(),
            input_box: InputBox::new(),
            app_name: config.app_name.clone(),
            app_description: config.app_description.clone(),
            theme: parse_theme_color(&config.theme_color),
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(stdout(), EnableMouseCapture, EnableBracketedPaste)?;
        info!("Terminal modes enabled (mouse, bracketed paste)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), DisableMouseCapture, DisableBracketedPaste);
    }
}

/// Everything a spawned effect needs.
struct Runner {
    backend: Arc<dyn Backend>,
    settings: GenerationSettings,
    tx: mpsc::Sender<Action>,
}

impl Runner {
    /// Spawns the I/O for `effect`. Returns true if the app should quit.
    fn perform(&self, effect: Effect) -> bool {
        match effect {
            Effect::None => {}
            Effect::CheckHealth => self.spawn_health_check(),
            Effect::SpawnRequest { prompt, port } => self.spawn_request(prompt, port),
            Effect::Quit => return true,
        }
        false
    }

    fn spawn_health_check(&self) {
        info!("Spawning health check");
        let backend = self.backend.clone();
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let result = backend.check_health().await;
            if tx.send(Action::HealthChecked(result)).is_err() {
                warn!("Failed to send health result: receiver dropped");
            }
        });
    }

    fn spawn_request(&self, prompt: String, port: u16) {
        info!("Spawning generate request on port {}", port);
        let backend = self.backend.clone();
        let settings = self.settings;
        let tx = self.tx.clone();
        tokio::spawn(async move {
            let reply = request_reply(backend.as_ref(), &prompt, port, settings).await;
            if tx.send(Action::ReplyReceived(reply)).is_err() {
                warn!("Failed to send reply: receiver dropped");
            }
        });
    }
}

pub fn run(config: ResolvedConfig, backend: Arc<dyn Backend>) -> std::io::Result<()> {
    let mut terminal = ratatui::init();
    let terminal_mode_guard = TerminalModeGuard::new();
    if let Err(e) = &terminal_mode_guard {
        warn!("Could not enable terminal modes: {}", e);
    }

    let result = event_loop(&mut terminal, &config, backend);

    drop(terminal_mode_guard);
    ratatui::restore();
    result
}

fn event_loop(
    terminal: &mut DefaultTerminal,
    config: &ResolvedConfig,
    backend: Arc<dyn Backend>,
) -> std::io::Result<()> {
    let mut state = ConversationState::new();
    let mut tui = TuiState::new(config);

    let (tx, rx) = mpsc::channel();
    let runner = Runner {
        backend,
        settings: GenerationSettings::from(config),
        tx,
    };

    // Find the backend before the first frame
    runner.perform(update(&mut state, Action::CheckStarted));

    let mut needs_redraw = true;
    loop {
        if needs_redraw {
            terminal.draw(|f| ui::draw_ui(f, &state, &mut tui))?;
            needs_redraw = false;
        }

        let pending = state.is_loading || state.is_checking();
        let timeout = if pending {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            needs_redraw = true;
            let action = match event {
                TuiEvent::Resize => None,
                TuiEvent::ForceQuit => Some(Action::Quit),
                TuiEvent::ClearMessages => {
                    tui.message_list = MessageListState::new();
                    Some(Action::ClearMessages)
                }
                TuiEvent::RecheckBackend => Some(Action::CheckStarted),
                TuiEvent::ScrollUp
                | TuiEvent::ScrollDown
                | TuiEvent::ScrollPageUp
                | TuiEvent::ScrollPageDown
                | TuiEvent::ScrollToBottom => {
                    tui.message_list.handle_event(&event);
                    None
                }
                _ => {
                    // Keep the hint current so Submit is refused while offline/loading
                    tui.input_box.hint = ui::input_hint(&state);
                    match tui.input_box.handle_event(&event) {
                        Some(InputEvent::Submit(text)) => {
                            tui.message_list.stick_to_bottom = true;
                            Some(Action::Submit(text))
                        }
                        _ => None,
                    }
                }
            };

            if let Some(action) = action {
                debug!("Dispatching {:?}", action);
                if runner.perform(update(&mut state, action)) {
                    should_quit = true;
                }
            }
        }

        if should_quit {
            info!("Quitting");
            return Ok(());
        }

        // Results from spawned tasks
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            runner.perform(update(&mut state, action));
        }
    }
}
