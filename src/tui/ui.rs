use ratatui::Frame;
use ratatui::layout::{Constraint, Layout};

use crate::core::ConversationState;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{InputHint, LandingPage, MessageList, TitleBar};

/// What the input box should say given the conversation state.
pub fn input_hint(state: &ConversationState) -> InputHint {
    if state.is_loading {
        InputHint::Waiting
    } else if state.is_online() {
        InputHint::Ready
    } else {
        InputHint::Unavailable
    }
}

pub fn draw_ui(frame: &mut Frame, state: &ConversationState, tui: &mut TuiState) {
    use Constraint::{Length, Min};

    tui.input_box.hint = input_hint(state);
    let input_height = tui.input_box.calculate_height(frame.area().width);
    let [title_area, main_area, input_area] =
        Layout::vertical([Length(1), Min(0), Length(input_height)]).areas(frame.area());

    TitleBar::new(
        tui.app_name.clone(),
        state.connection,
        state.is_loading,
        tui.theme,
    )
    .render(frame, title_area);

    if state.messages.is_empty() {
        LandingPage {
            app_name: &tui.app_name,
            description: &tui.app_description,
            connection: state.connection,
            theme: tui.theme,
        }
        .render(frame, main_area);
    } else {
        MessageList::new(&mut tui.message_list, &state.messages).render(frame, main_area);
    }

    tui.input_box.render(frame, input_area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::config::ResolvedConfig;
    use crate::core::{Action, Connection, update};
    use crate::api::HealthCheck;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_input_hint() {
        let mut state = ConversationState::new();
        assert_eq!(input_hint(&state), InputHint::Unavailable);
        state.connection = Connection::Online(5000);
        assert_eq!(input_hint(&state), InputHint::Ready);
        state.is_loading = true;
        assert_eq!(input_hint(&state), InputHint::Waiting);
    }

    #[test]
    fn test_draw_landing_when_empty() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let state = ConversationState::new();
        let mut tui = TuiState::new(&ResolvedConfig::default());
        terminal.draw(|f| draw_ui(f, &state, &mut tui)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("LLM Chat Application"));
        assert!(text.contains("Looking for the backend"));
    }

    #[test]
    fn test_draw_conversation() {
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        let mut state = ConversationState::new();
        update(&mut state, Action::HealthChecked(Ok(HealthCheck::online(5050))));
        update(&mut state, Action::Submit("ping".to_string()));
        update(&mut state, Action::ReplyReceived(Ok("pong".to_string())));

        let mut tui = TuiState::new(&ResolvedConfig::default());
        terminal.draw(|f| draw_ui(f, &state, &mut tui)).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("online (port 5050)"));
        assert!(text.contains("ping"));
        assert!(text.contains("pong"));
        assert!(text.contains("Enter to send"));
    }
}
