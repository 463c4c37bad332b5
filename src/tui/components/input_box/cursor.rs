//! Cursor tracking for the single-line InputBox.
//!
//! `CursorState` owns the cursor byte offset. The buffer is passed in
//! explicitly; it belongs to `InputBox`.

use unicode_width::UnicodeWidthStr;

pub(super) struct CursorState {
    /// Cursor position as byte offset in buffer (0..=buffer.len())
    pub pos: usize,
}

impl CursorState {
    pub fn new() -> Self {
        Self { pos: 0 }
    }

    /// Reset cursor to start (used after Submit clears the buffer).
    pub fn reset(&mut self) {
        self.pos = 0;
    }
}

/// Find the byte offset of the previous character boundary before `pos` in `text`.
pub(super) fn prev_char_boundary(text: &str, pos: usize) -> usize {
    text[..pos]
        .char_indices()
        .next_back()
        .map(|(i, _)| i)
        .unwrap_or(0)
}

/// Find the byte offset of the next character boundary after `pos` in `text`.
pub(super) fn next_char_boundary(text: &str, pos: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(1)
        .map(|(i, _)| pos + i)
        .unwrap_or(text.len())
}

/// Horizontal window onto a single-line buffer so the cursor stays visible.
///
/// Returns `(start, cursor_col)`: the byte offset of the first visible
/// character, and the cursor's column relative to the window.
/// One column is kept free at the right edge for the cursor itself.
pub(super) fn visible_window(text: &str, cursor: usize, width: u16) -> (usize, u16) {
    if width == 0 {
        return (cursor, 0);
    }
    let limit = width.saturating_sub(1) as usize;

    let mut start = 0;
    while text[start..cursor].width() > limit {
        start = next_char_boundary(text, start);
    }
    (start, text[start..cursor].width() as u16)
}
