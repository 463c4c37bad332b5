//! # TitleBar Component
//!
//! Single-line header with the app name and the current status.
//!
//! Stateless: it renders whatever props it is given. The title text
//! changes with state:
//!
//! 1. **Loading**: `"Sous · cooking assistant | ⠋ Waiting for the chef..."`
//! 2. **Status message**: `"Sous · cooking assistant | Welcome to Sous!"`
//! 3. **Default**: `"Sous · cooking assistant"`

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};

use crate::tui::component::Component;
use crate::tui::components::spinner_glyph;

pub const APP_TITLE: &str = "Sous · cooking assistant";

pub struct TitleBar {
    pub status_message: String,
    pub is_loading: bool,
    pub spinner_frame: usize,
}

impl TitleBar {
    pub fn new(status_message: String, is_loading: bool, spinner_frame: usize) -> Self {
        Self {
            status_message,
            is_loading,
            spinner_frame,
        }
    }
}

impl Component for TitleBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let mut spans = vec![Span::styled(
            APP_TITLE,
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        )];

        if self.is_loading {
            spans.push(Span::raw(" | "));
            spans.push(Span::styled(
                format!("{} ", spinner_glyph(self.spinner_frame)),
                Style::default().fg(Color::Yellow),
            ));
            spans.push(Span::raw(self.status_message.as_str()));
        } else if !self.status_message.is_empty() {
            spans.push(Span::raw(" | "));
            spans.push(Span::raw(self.status_message.as_str()));
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
        terminal.draw(|f| title_bar.render(f, f.area())).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect::<String>()
    }

    #[test]
    fn test_title_bar_default_no_status() {
        let text = render_text(&mut TitleBar::new(String::new(), false, 0));
        assert!(text.contains("cooking assistant"));
        assert!(!text.contains('|'));
    }

    #[test]
    fn test_title_bar_with_status_message() {
        let text = render_text(&mut TitleBar::new("Welcome to Sous!".to_string(), false, 0));
        assert!(text.contains("| Welcome to Sous!"));
    }

    #[test]
    fn test_title_bar_loading_shows_spinner() {
        let text = render_text(&mut TitleBar::new("Waiting".to_string(), true, 0));
        assert!(text.contains(spinner_glyph(0)));
        assert!(text.contains("Waiting"));
    }
}
