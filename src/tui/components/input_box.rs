//! # InputBox Component
//!
//! Captures the message being typed.
//!
//! The buffer is internal state; `hint` is a prop describing whether a
//! submission would be accepted right now. Editing is append-only at the
//! end of the buffer (type, paste, backspace).

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, BorderType, Paragraph};
use unicode_width::UnicodeWidthStr;

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders (top + bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// Borders (left + right).
const HORIZONTAL_OVERHEAD: u16 = 2;
/// The box grows with its content up to this many lines.
pub const MAX_VISIBLE_LINES: u16 = 6;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed)
    Submit(String),
    ContentChanged,
}

/// What the input box tells the user about sending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputHint {
    Ready,
    Waiting,
    Unavailable,
}

impl InputHint {
    fn title(&self) -> &'static str {
        match self {
            InputHint::Ready => "Message (Enter to send)",
            InputHint::Waiting => "Message (waiting for reply...)",
            InputHint::Unavailable => "Message (backend offline, Ctrl+R to retry)",
        }
    }
}

fn wrap_lines(text: &str, width: u16) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }
    let options = textwrap::Options::new(width as usize)
        .break_words(true)
        .word_separator(textwrap::WordSeparator::AsciiSpace);
    let mut lines: Vec<String> = textwrap::wrap(text, options)
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    // The cursor needs a line to sit on after a trailing '\n'
    let ends_open = text.ends_with('\n') && lines.last().is_some_and(|l| !l.is_empty());
    if lines.is_empty() || ends_open {
        lines.push(String::new());
    }
    lines
}

pub struct InputBox {
    pub buffer: String,
    pub hint: InputHint,
}

impl Default for InputBox {
    fn default() -> Self {
        Self::new()
    }
}

impl InputBox {
    pub fn new() -> Self {
        Self {
            buffer: String::new(),
            hint: InputHint::Unavailable,
        }
    }

    /// Required height for the current buffer, clamped to `MAX_VISIBLE_LINES`.
    pub fn calculate_height(&self, width: u16) -> u16 {
        let lines = wrap_lines(&self.buffer, width.saturating_sub(HORIZONTAL_OVERHEAD));
        let visible = lines.len().clamp(1, MAX_VISIBLE_LINES as usize) as u16;
        visible + VERTICAL_OVERHEAD
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let inner_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let lines = wrap_lines(&self.buffer, inner_width);
        let visible = area.height.saturating_sub(VERTICAL_OVERHEAD).max(1) as usize;
        let first = lines.len().saturating_sub(visible);
        let shown = &lines[first..];

        let style = match self.hint {
            InputHint::Ready => Style::default().fg(Color::Green),
            _ => Style::default().fg(Color::DarkGray),
        };
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .title(self.hint.title())
            .title_style(style.add_modifier(Modifier::BOLD));

        frame.render_widget(Paragraph::new(shown.join("\n")).block(block).style(style), area);

        // Cursor sits after the last visible character
        let last = shown.last().map(|l| l.width()).unwrap_or(0) as u16;
        let cursor_x = area.x + 1 + last.min(inner_width.saturating_sub(1));
        let cursor_y = area.y + 1 + (shown.len().saturating_sub(1)) as u16;
        frame.set_cursor_position((cursor_x, cursor_y));
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::InputChar(c) => {
                self.buffer.push(*c);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                // Normalize CRLF from pasted Windows text
                self.buffer.push_str(&text.replace("\r\n", "\n"));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => self.buffer.pop().map(|_| InputEvent::ContentChanged),
            TuiEvent::Submit => {
                if self.hint != InputHint::Ready || self.buffer.trim().is_empty() {
                    return None;
                }
                let text = std::mem::take(&mut self.buffer);
                Some(InputEvent::Submit(text.trim().to_string()))
            }
            _ => None,
        }
    }
}
