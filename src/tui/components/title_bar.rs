//! # TitleBar Component
//!
//! Top status bar: application name, backend status, and a loading
//! indicator while a reply is being generated.
//!
//! Stateless: it receives all data as props and renders a single line.
//!
//! 1. **Loading**: `"LLM Chat Application | online (port 5000) | Generating..."`
//! 2. **Idle**: `"LLM Chat Application | online (port 5000)"`

use std::str::FromStr;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::core::Connection;
use crate::tui::component::Component;

/// Parses a `#RRGGBB` theme color, falling back to blue.
pub fn parse_theme_color(value: &str) -> Color {
    Color::from_str(value).unwrap_or_else(|_| {
        log::warn!("Invalid theme color {:?}, using default", value);
        Color::Blue
    })
}

pub fn connection_style(connection: Connection) -> Style {
    match connection {
        Connection::Checking => Style::default().fg(Color::Yellow),
        Connection::Online(_) => Style::default().fg(Color::Green),
        Connection::Offline => Style::default().fg(Color::Red),
    }
}

pub struct TitleBar {
    pub app_name: String,
    pub connection: Connection,
    pub is_loading: bool,
    pub theme: Color,
}

impl TitleBar {
    pub fn new(app_name: String, connection: Connection, is_loading: bool, theme: Color) -> Self {
        Self {
            app_name,
            connection,
            is_loading,
            theme,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![
            Span::styled(
                self.app_name.clone(),
                Style::default().fg(self.theme).add_modifier(Modifier::BOLD),
            ),
            Span::raw(" | "),
            Span::styled(self.connection.label(), connection_style(self.connection)),
        ];

        if self.is_loading {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                "Generating...",
                Style::default().add_modifier(Modifier::ITALIC),
            ));
        }

        frame.render_widget(Line::from(spans), area);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn render_text(title_bar: &mut TitleBar) -> String {
        let backend = TestBackend::new(80, 1);
        let mut terminal = Terminal::new(backend).unwrap();
        terminal
            .draw(|f| {
                title_bar.render(f, f.area());
            })
            .unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_online() {
        let mut title_bar = TitleBar::new(
            "LLM Chat Application".to_string(),
            Connection::Online(5050),
            false,
            Color::Blue,
        );
        let text = render_text(&mut title_bar);
        assert!(text.contains("LLM Chat Application"));
        assert!(text.contains("online (port 5050)"));
        assert!(!text.contains("Generating"));
    }

    #[test]
    fn test_title_bar_loading() {
        let mut title_bar =
            TitleBar::new("Chat".to_string(), Connection::Online(5000), true, Color::Blue);
        let text = render_text(&mut title_bar);
        assert!(text.contains("Generating..."));
    }

    #[test]
    fn test_title_bar_offline() {
        let mut title_bar =
            TitleBar::new("Chat".to_string(), Connection::Offline, false, Color::Blue);
        let text = render_text(&mut title_bar);
        assert!(text.contains("offline"));
    }

    #[test]
    fn test_parse_theme_color() {
        assert_eq!(parse_theme_color("#2563EB"), Color::Rgb(0x25, 0x63, 0xEB));
        assert_eq!(parse_theme_color("not-a-color"), Color::Blue);
    }
}
