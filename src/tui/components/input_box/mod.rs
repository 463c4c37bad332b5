//! # InputBox Component
//!
//! Single-line text field used for both the recipe search and the chat
//! message.
//!
//! ## Responsibilities
//!
//! - Capture text input
//! - Handle editing (backspace, delete, cursor movement, paste)
//! - Handle submission (Enter): emits the text and clears the buffer
//! - Ignore everything while `disabled` (the chat box while a reply is pending)
//!
//! ## State Management
//!
//! The buffer is internal state. `disabled` and `focused` are props set by
//! the parent each frame. Pasted newlines become spaces.

mod cursor;

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Paragraph};

use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

use cursor::{CursorState, next_char_boundary, prev_char_boundary, visible_window};

/// Borders (1 left + 1 right) plus one column of padding on each side.
const HORIZONTAL_OVERHEAD: u16 = 4;
/// Height of the box: one text line plus top and bottom borders.
pub const INPUT_HEIGHT: u16 = 3;

/// High-level events emitted by the InputBox
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// User submitted the text (Enter pressed on a non-blank buffer)
    Submit(String),
    /// Text content changed
    ContentChanged,
}

pub struct InputBox {
    /// Text buffer (Internal State)
    pub buffer: String,
    /// Border title (Prop)
    pub title: String,
    /// Shown dimmed while the buffer is empty (Prop)
    pub placeholder: String,
    /// Reject all input and render greyed out (Prop)
    pub disabled: bool,
    /// Whether the terminal cursor should be placed in this box (Prop)
    pub focused: bool,
    cursor: CursorState,
}

impl InputBox {
    pub fn new(title: &str, placeholder: &str) -> Self {
        Self {
            buffer: String::new(),
            title: title.to_string(),
            placeholder: placeholder.to_string(),
            disabled: false,
            focused: false,
            cursor: CursorState::new(),
        }
    }

    fn insert_str(&mut self, text: &str) {
        self.buffer.insert_str(self.cursor.pos, text);
        self.cursor.pos += text.len();
    }
}

impl Component for InputBox {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let accent = if self.disabled {
            Style::default().fg(Color::DarkGray)
        } else if self.focused {
            Style::default().fg(Color::Green)
        } else {
            Style::default()
        };

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(accent)
            .title(self.title.as_str())
            .padding(ratatui::widgets::Padding::horizontal(1));

        let text_width = area.width.saturating_sub(HORIZONTAL_OVERHEAD);
        let (start, cursor_col) = visible_window(&self.buffer, self.cursor.pos, text_width);

        let line = if self.buffer.is_empty() {
            Line::from(Span::styled(
                self.placeholder.as_str(),
                Style::default()
                    .fg(Color::DarkGray)
                    .add_modifier(Modifier::ITALIC),
            ))
        } else {
            Line::from(Span::styled(&self.buffer[start..], accent))
        };

        let inner = block.inner(area);
        frame.render_widget(Paragraph::new(line).block(block), area);

        if self.focused && !self.disabled && inner.width > 0 && inner.height > 0 {
            frame.set_cursor_position((inner.x + cursor_col, inner.y));
        }
    }
}

impl EventHandler for InputBox {
    type Event = InputEvent;

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        if self.disabled {
            return None;
        }
        match event {
            TuiEvent::InputChar(c) => {
                let mut tmp = [0u8; 4];
                self.insert_str(c.encode_utf8(&mut tmp));
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Paste(text) => {
                let flattened = text.replace("\r\n", " ").replace(['\n', '\r'], " ");
                if flattened.is_empty() {
                    return None;
                }
                self.insert_str(&flattened);
                Some(InputEvent::ContentChanged)
            }
            TuiEvent::Backspace => {
                if self.cursor.pos > 0 {
                    let prev = prev_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(prev..self.cursor.pos);
                    self.cursor.pos = prev;
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::Delete => {
                if self.cursor.pos < self.buffer.len() {
                    let next = next_char_boundary(&self.buffer, self.cursor.pos);
                    self.buffer.drain(self.cursor.pos..next);
                    Some(InputEvent::ContentChanged)
                } else {
                    None
                }
            }
            TuiEvent::CursorLeft => {
                if self.cursor.pos > 0 {
                    self.cursor.pos = prev_char_boundary(&self.buffer, self.cursor.pos);
                }
                None
            }
            TuiEvent::CursorRight => {
                if self.cursor.pos < self.buffer.len() {
                    self.cursor.pos = next_char_boundary(&self.buffer, self.cursor.pos);
                }
                None
            }
            TuiEvent::CursorHome => {
                self.cursor.pos = 0;
                None
            }
            TuiEvent::CursorEnd => {
                self.cursor.pos = self.buffer.len();
                None
            }
            TuiEvent::Submit => {
                if !self.buffer.trim().is_empty() {
                    let text = std::mem::take(&mut self.buffer);
                    self.cursor.reset();
                    Some(InputEvent::Submit(text))
                } else {
                    None
                }
            }
            _ => None,
        }
    }
}
