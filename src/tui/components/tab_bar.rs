//! # TabBar Component
//!
//! The two-tab switcher under the header. Tabs are not components of their
//! own; `ui.rs` picks the body to draw from [`Tab`].

use ratatui::Frame;
use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Tabs;

use crate::tui::component::Component;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Tab {
    #[default]
    Recipes,
    Chat,
}

impl Tab {
    pub const ALL: [Tab; 2] = [Tab::Recipes, Tab::Chat];

    pub fn title(self) -> &'static str {
        match self {
            Tab::Recipes => "Recipes",
            Tab::Chat => "AI chef",
        }
    }

    pub fn index(self) -> usize {
        match self {
            Tab::Recipes => 0,
            Tab::Chat => 1,
        }
    }

    pub fn from_index(index: usize) -> Option<Tab> {
        Self::ALL.get(index).copied()
    }

    pub fn next(self) -> Tab {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Tab {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

pub struct TabBar {
    pub active: Tab,
}

impl Component for TabBar {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        let titles = Tab::ALL
            .iter()
            .enumerate()
            .map(|(i, tab)| format!("F{} {}", i + 1, tab.title()));

        let tabs = Tabs::new(titles)
            .select(self.active.index())
            .style(Style::default().fg(Color::DarkGray))
            .highlight_style(
                Style::default()
                    .fg(Color::LightRed)
                    .add_modifier(Modifier::BOLD | Modifier::UNDERLINED),
            )
            .divider("│");

        frame.render_widget(tabs, area);
    }
}
