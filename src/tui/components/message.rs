use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Padding, Paragraph, Widget, Wrap};

use crate::core::{Message, Sender};

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;

/// Renders one chat message as a bordered block titled with its sender.
///
/// Created fresh each frame; holds no state.
#[derive(Clone, Copy)]
pub struct MessageView<'a> {
    pub message: &'a Message,
}

impl<'a> MessageView<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    /// Predicts the rendered height at `width` without rendering.
    ///
    /// The wrapping options match ratatui's `Paragraph` so the prediction
    /// agrees with what is drawn.
    pub fn calculate_height(message: &Message, width: u16) -> u16 {
        let content_width = width.saturating_sub(HORIZONTAL_OVERHEAD);
        if content_width == 0 {
            return 1;
        }

        let content = message.text.trim();
        if content.is_empty() {
            return VERTICAL_OVERHEAD;
        }

        let options = textwrap::Options::new(content_width as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);

        let lines = textwrap::wrap(content, options).len();
        u16::try_from(lines)
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD)
    }
}

pub fn sender_label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "you",
        Sender::Ai => "ai",
        Sender::System => "system",
    }
}

pub fn message_style(message: &Message) -> Style {
    if message.error {
        return Style::default().fg(Color::Red);
    }
    match message.sender {
        Sender::User => Style::default().fg(Color::Green),
        Sender::Ai => Style::default().fg(Color::Blue),
        Sender::System => Style::default()
            .fg(Color::DarkGray)
            .add_modifier(Modifier::ITALIC),
    }
}

impl<'a> Widget for MessageView<'a> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = message_style(self.message);
        let border_style = style.add_modifier(Modifier::DIM);

        Paragraph::new(self.message.text.trim())
            .block(
                Block::bordered()
                    .title(sender_label(self.message.sender))
                    .border_style(border_style)
                    .padding(Padding::horizontal(CONTENT_PAD_H)),
            )
            .style(style)
            .wrap(Wrap { trim: false })
            .render(area, buf);
    }
}
