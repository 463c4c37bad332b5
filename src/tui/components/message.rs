use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use unicode_width::UnicodeWidthStr;

use crate::core::transcript::{Message, Role};
use crate::tui::components::spinner_glyph;

/// Horizontal padding (per side) between the border and text content.
const CONTENT_PAD_H: u16 = 1;
/// Total horizontal space consumed by borders (1 left + 1 right) and padding.
const HORIZONTAL_OVERHEAD: u16 = 2 + CONTENT_PAD_H * 2;
/// Total vertical space consumed by borders (1 top + 1 bottom).
const VERTICAL_OVERHEAD: u16 = 2;
/// A bubble never takes more than this share of the row.
const MAX_WIDTH_PERCENT: u16 = 80;
/// Narrowest bubble, so the role title always fits on the border.
const MIN_BUBBLE_WIDTH: u16 = 10;

pub const PENDING_TEXT: &str = "thinking…";

fn role_title(role: Role) -> &'static str {
    match role {
        Role::User => "you",
        Role::Assistant => "chef",
    }
}

fn role_style(role: Role) -> Style {
    match role {
        Role::User => Style::default().fg(Color::LightRed),
        Role::Assistant => Style::default().fg(Color::Green),
    }
}

/// Pre-computed size and wrapped text of a bubble for a given row width.
///
/// Heights are computed from the same wrapped lines that get drawn, so the
/// list's layout and the rendered bubbles always agree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BubbleLayout {
    pub width: u16,
    pub height: u16,
    pub lines: Vec<String>,
}

impl BubbleLayout {
    pub fn compute(content: &str, row_width: u16) -> Self {
        if row_width <= HORIZONTAL_OVERHEAD {
            // Degenerate case: terminal too narrow for borders + padding.
            return Self {
                width: row_width,
                height: 1,
                lines: Vec::new(),
            };
        }

        let share = (u32::from(row_width) * u32::from(MAX_WIDTH_PERCENT) / 100) as u16;
        let max_outer = share
            .max(MIN_BUBBLE_WIDTH)
            .min(row_width);
        let max_inner = max_outer.saturating_sub(HORIZONTAL_OVERHEAD).max(1);

        let options = textwrap::Options::new(max_inner as usize)
            .break_words(true)
            .word_separator(textwrap::WordSeparator::AsciiSpace);
        let lines: Vec<String> = textwrap::wrap(content.trim(), options)
            .into_iter()
            .map(|line| line.into_owned())
            .collect();

        let longest = lines.iter().map(|l| l.width()).max().unwrap_or(0);
        let width = u16::try_from(longest)
            .unwrap_or(u16::MAX)
            .saturating_add(HORIZONTAL_OVERHEAD)
            .max(MIN_BUBBLE_WIDTH)
            .min(max_outer);
        let height = u16::try_from(lines.len())
            .unwrap_or(u16::MAX)
            .max(1)
            .saturating_add(VERTICAL_OVERHEAD);

        Self {
            width,
            height,
            lines,
        }
    }
}

/// A chat message drawn as a bordered bubble: user messages hug the right
/// edge, assistant messages the left.
pub struct MessageBubble<'a> {
    pub message: &'a Message,
}

impl<'a> MessageBubble<'a> {
    pub fn new(message: &'a Message) -> Self {
        Self { message }
    }

    pub fn calculate_height(message: &Message, row_width: u16) -> u16 {
        BubbleLayout::compute(&message.content, row_width).height
    }
}

impl Widget for MessageBubble<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let layout = BubbleLayout::compute(&self.message.content, area.width);
        let x = match self.message.role {
            Role::User => area.x + area.width.saturating_sub(layout.width),
            Role::Assistant => area.x,
        };
        let bubble_area = Rect::new(x, area.y, layout.width, layout.height.min(area.height));

        let style = role_style(self.message.role);
        let block = Block::bordered()
            .title(role_title(self.message.role))
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .title_style(style)
            .padding(Padding::horizontal(CONTENT_PAD_H));

        let inner = block.inner(bubble_area);
        block.render(bubble_area, buf);

        let text: Vec<Line> = layout.lines.into_iter().map(Line::from).collect();
        Paragraph::new(text).render(inner, buf);
    }
}

/// The transient "waiting for a reply" bubble shown after the last message.
pub struct PendingBubble {
    pub spinner_frame: usize,
}

impl PendingBubble {
    pub const HEIGHT: u16 = 1 + VERTICAL_OVERHEAD;
}

impl Widget for PendingBubble {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let style = role_style(Role::Assistant);
        let text = format!("{} {}", spinner_glyph(self.spinner_frame), PENDING_TEXT);
        let width = (text.width() as u16 + HORIZONTAL_OVERHEAD).min(area.width);
        let bubble_area = Rect::new(area.x, area.y, width, Self::HEIGHT.min(area.height));

        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(style.add_modifier(Modifier::DIM))
            .padding(Padding::horizontal(CONTENT_PAD_H));
        let inner = block.inner(bubble_area);
        block.render(bubble_area, buf);

        Paragraph::new(Line::from(Span::styled(
            text,
            Style::default().fg(Color::DarkGray).add_modifier(Modifier::ITALIC),
        )))
        .render(inner, buf);
    }
}
