//! # Landing Page Component
//!
//! Shown when the conversation is empty: app name, description, backend
//! status and the key bindings.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Paragraph, Wrap};

use crate::core::Connection;
use crate::tui::component::Component;
use crate::tui::components::title_bar::connection_style;

const KEY_HELP: &str = "Enter send · Ctrl+L clear · Ctrl+R recheck backend · Esc quit";
const SCROLL_HELP: &str = "↑/↓ PgUp/PgDn scroll · End jump to latest";

pub struct LandingPage<'a> {
    pub app_name: &'a str,
    pub description: &'a str,
    pub connection: Connection,
    pub theme: Color,
}

impl<'a> Component for LandingPage<'a> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let status = match self.connection {
            Connection::Checking => "Looking for the backend...".to_string(),
            Connection::Online(port) => format!("Backend online on port {port}. Say hello!"),
            Connection::Offline => "Backend offline. Start it and press Ctrl+R.".to_string(),
        };

        let lines = vec![
            Line::from(Span::styled(
                self.app_name,
                Style::default().fg(self.theme).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                self.description,
                Style::default().fg(Color::DarkGray),
            )),
            Line::raw(""),
            Line::from(Span::styled(status, connection_style(self.connection))),
            Line::raw(""),
            Line::from(Span::styled(KEY_HELP, Style::default().fg(Color::DarkGray))),
            Line::from(Span::styled(SCROLL_HELP, Style::default().fg(Color::DarkGray))),
        ];

        let height = lines.len() as u16;
        let [centered] = Layout::vertical([Constraint::Length(height)])
            .flex(Flex::Center)
            .areas(area);

        frame.render_widget(
            Paragraph::new(lines)
                .alignment(Alignment::Center)
                .wrap(Wrap { trim: true }),
            centered,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_landing_shows_name_and_status() {
        let mut terminal = Terminal::new(TestBackend::new(80, 12)).unwrap();
        let mut page = LandingPage {
            app_name: "LLM Chat Application",
            description: "A chatbot",
            connection: Connection::Offline,
            theme: Color::Blue,
        };
        terminal.draw(|f| page.render(f, f.area())).unwrap();
        let text: String = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect();
        assert!(text.contains("LLM Chat Application"));
        assert!(text.contains("Backend offline"));
        assert!(text.contains("Ctrl+R recheck backend"));
        assert!(text.contains("PgUp/PgDn scroll"));
    }
}
