//! # MessageList Component
//!
//! Scrollable view of the chat transcript.
//!
//! ## Responsibilities
//!
//! - Display messages in arrival order as role-styled bubbles
//! - Append a pending bubble while a reply is outstanding
//! - Show an invitation instead of the list when the transcript is empty
//! - Stick to the bottom as new messages arrive, until the user scrolls up
//!
//! ## Architecture
//!
//! `MessageList` is a transient component (created each frame) that wraps
//! `&'a mut MessageListState` (persistent state) and `Transcript` (props).

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::Paragraph;
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};

use crate::core::transcript::Transcript;
use crate::tui::component::{Component, EventHandler};
use crate::tui::components::message::{MessageBubble, PendingBubble};
use crate::tui::event::TuiEvent;

/// Blank rows between bubbles.
const MESSAGE_GAP: u16 = 1;
/// Tallest scroll canvas the list draws. Older messages that do not fit
/// above the newest ones are left out of the view.
const MAX_CANVAS_HEIGHT: u16 = 4096;

pub const EMPTY_STATE_TEXT: &str = "Start a conversation with the AI assistant";

/// Scroll state for the message list.
/// Must be persisted in the parent TuiState.
pub struct MessageListState {
    /// Scroll offset and view state
    pub scroll_state: ScrollViewState,
    /// When true, auto-scroll to bottom on new content
    pub stick_to_bottom: bool,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Total content height from the last render
    pub content_height: u16,
}

impl Default for MessageListState {
    fn default() -> Self {
        Self::new()
    }
}

impl MessageListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            stick_to_bottom: true, // Start attached to bottom
            viewport_height: 0,
            content_height: 0,
        }
    }

    fn max_offset(&self) -> u16 {
        self.content_height.saturating_sub(self.viewport_height)
    }

    /// Clamp scroll offset so it never exceeds the content bounds.
    pub fn clamp_scroll(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }

    /// Clamp scroll and re-engage auto-scroll if the user has reached the bottom.
    pub fn repin_if_at_bottom(&mut self) {
        let max_y = self.max_offset();
        let current = self.scroll_state.offset();
        if current.y >= max_y {
            self.stick_to_bottom = true;
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

/// Total canvas height for the given bubble heights, gaps included.
/// Saturates at `u16::MAX`.
fn stacked_height(heights: &[u16], pending: bool) -> u16 {
    let bubbles = heights
        .iter()
        .enumerate()
        .fold(0u16, |total, (i, &height)| {
            let gap = if i == 0 { 0 } else { MESSAGE_GAP };
            total.saturating_add(gap).saturating_add(height)
        });
    if pending {
        bubbles
            .saturating_add(MESSAGE_GAP)
            .saturating_add(PendingBubble::HEIGHT)
    } else {
        bubbles
    }
}

/// Index of the first message to draw: the longest tail of `heights` whose
/// stack fits in `MAX_CANVAS_HEIGHT`. The newest message is always kept.
fn visible_start(heights: &[u16], pending: bool) -> usize {
    let mut start = heights.len().saturating_sub(1);
    let mut used = stacked_height(&heights[start..], pending);
    while start > 0 {
        let next = used
            .saturating_add(MESSAGE_GAP)
            .saturating_add(heights[start - 1]);
        if next > MAX_CANVAS_HEIGHT {
            break;
        }
        used = next;
        start -= 1;
    }
    start
}

/// Rows kept free at the bottom of the canvas for the pending bubble.
fn pending_reserve(pending: bool) -> u16 {
    if pending {
        MESSAGE_GAP + PendingBubble::HEIGHT
    } else {
        0
    }
}

pub struct MessageList<'a> {
    pub state: &'a mut MessageListState,
    pub transcript: &'a Transcript,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl<'a> MessageList<'a> {
    pub fn new(
        state: &'a mut MessageListState,
        transcript: &'a Transcript,
        is_loading: bool,
        spinner_frame: usize,
    ) -> Self {
        Self {
            state,
            transcript,
            is_loading,
            spinner_frame,
        }
    }

    fn render_empty(&self, frame: &mut Frame, area: Rect) {
        let [center] = Layout::vertical([Constraint::Length(2)])
            .flex(Flex::Center)
            .areas(area);
        let text = vec![
            Line::from(Span::styled(
                EMPTY_STATE_TEXT,
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                "Ask about cooking, substitutions, or request a recipe",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), center);
    }
}

impl Component for MessageList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.transcript.is_empty() {
            self.state.content_height = 0;
            self.render_empty(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar safe area
        let messages = self.transcript.messages();
        let heights: Vec<u16> = messages
            .iter()
            .map(|m| MessageBubble::calculate_height(m, content_width))
            .collect();
        let start = visible_start(&heights, self.is_loading);
        let total_height =
            stacked_height(&heights[start..], self.is_loading).min(MAX_CANVAS_HEIGHT);

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;
        if !self.state.stick_to_bottom {
            self.state.clamp_scroll();
        }

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        let bubble_limit = total_height.saturating_sub(pending_reserve(self.is_loading));
        let mut y_offset: u16 = 0;
        for (message, &height) in messages[start..].iter().zip(&heights[start..]) {
            // A single bubble taller than the canvas is cut at the bottom
            let height = height.min(bubble_limit.saturating_sub(y_offset));
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(MessageBubble::new(message), rect);
            y_offset = y_offset.saturating_add(height).saturating_add(MESSAGE_GAP);
        }

        if self.is_loading && y_offset < total_height {
            let height = PendingBubble::HEIGHT.min(total_height - y_offset);
            let rect = Rect::new(0, y_offset, content_width, height);
            scroll_view.render_widget(
                PendingBubble {
                    spinner_frame: self.spinner_frame,
                },
                rect,
            );
        }

        if self.state.stick_to_bottom {
            self.state.scroll_state.scroll_to_bottom();
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}

impl EventHandler for MessageListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => {
                self.scroll_state.scroll_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollDown => {
                self.scroll_state.scroll_down();
                self.repin_if_at_bottom();
            }
            TuiEvent::ScrollPageUp => {
                self.scroll_state.scroll_page_up();
                self.stick_to_bottom = false;
            }
            TuiEvent::ScrollPageDown => {
                self.scroll_state.scroll_page_down();
                self.repin_if_at_bottom();
            }
            _ => {}
        }
        None
    }
}
