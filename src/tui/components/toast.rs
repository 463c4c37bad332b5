//! # Toast Component
//!
//! Draws the current notification as a small box in the bottom-right corner,
//! on top of whatever is underneath. It never takes focus; input keeps going
//! to the active tab.

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Clear, Padding, Paragraph, Wrap};

use crate::core::notification::Notification;
use crate::tui::component::Component;

const TOAST_MAX_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;
/// Every toast reports a failure, so it is always drawn in the error color.
const TOAST_ACCENT: Color = Color::Red;

pub struct Toast<'a> {
    pub notification: &'a Notification,
}

/// Bottom-right placement inside `area`, shrunk to fit small terminals.
pub fn toast_area(area: Rect) -> Rect {
    let width = TOAST_MAX_WIDTH.min(area.width);
    let height = TOAST_HEIGHT.min(area.height);
    Rect::new(
        area.x + area.width - width,
        area.y + area.height - height,
        width,
        height,
    )
}

impl Component for Toast<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let rect = toast_area(area);
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(TOAST_ACCENT))
            .title(Span::styled(
                self.notification.title.as_str(),
                Style::default().fg(TOAST_ACCENT).add_modifier(Modifier::BOLD),
            ))
            .title_bottom(Line::from(" Esc to dismiss ").right_aligned())
            .padding(Padding::horizontal(1));

        let body = Paragraph::new(self.notification.description.as_str())
            .block(block)
            .wrap(Wrap { trim: true });

        frame.render_widget(Clear, rect);
        frame.render_widget(body, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    #[test]
    fn test_toast_area_is_bottom_right() {
        let area = Rect::new(0, 0, 100, 30);
        assert_eq!(toast_area(area), Rect::new(52, 26, 48, 4));
    }

    #[test]
    fn test_toast_area_shrinks_on_small_terminals() {
        let area = Rect::new(0, 0, 20, 3);
        assert_eq!(toast_area(area), Rect::new(0, 0, 20, 3));
    }

    #[test]
    fn test_render_shows_title_and_description() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let notification = Notification::chat_failed();
        terminal
            .draw(|f| {
                Toast {
                    notification: &notification,
                }
                .render(f, f.area())
            })
            .unwrap();

        let text = terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>();
        assert!(text.contains("Error"));
        assert!(text.contains("could not get a reply"));
    }

    #[test]
    fn test_render_uses_error_accent() {
        let backend = TestBackend::new(60, 10);
        let mut terminal = Terminal::new(backend).unwrap();
        let notification = Notification::chat_failed();
        terminal
            .draw(|f| {
                Toast {
                    notification: &notification,
                }
                .render(f, f.area())
            })
            .unwrap();

        let rect = toast_area(Rect::new(0, 0, 60, 10));
        let buffer = terminal.backend().buffer();
        let corner = &buffer[(rect.x, rect.y)];
        assert_eq!(corner.symbol(), "╭");
        assert_eq!(corner.fg, Color::Red);
    }
}
