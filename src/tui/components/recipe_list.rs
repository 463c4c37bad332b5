//! # RecipeList Component
//!
//! Grid of recipe cards for the Recipes tab, or an empty-state notice when
//! the search matches nothing.
//!
//! Like `MessageList`, this is a transient component wrapping persistent
//! `&mut RecipeListState` (scroll position) and the already-filtered
//! recipes (props). It never filters anything itself.

use ratatui::Frame;
use ratatui::layout::{Alignment, Constraint, Flex, Layout, Position, Rect, Size};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph, Widget};
use tui_scrollview::{ScrollView, ScrollViewState, ScrollbarVisibility};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::core::catalog::Recipe;
use crate::tui::component::{Component, EventHandler};
use crate::tui::event::TuiEvent;

/// Borders plus two content lines.
pub const CARD_HEIGHT: u16 = 4;

pub const EMPTY_STATE_TEXT: &str = "No recipes found";

/// Number of card columns for a given width (1 on narrow terminals, up to 3).
pub fn columns_for_width(width: u16) -> u16 {
    match width {
        w if w >= 120 => 3,
        w if w >= 80 => 2,
        _ => 1,
    }
}

/// Cut `text` to at most `width` display columns, ending in `…` if cut.
pub fn truncate_to_width(text: &str, width: usize) -> String {
    if text.width() <= width {
        return text.to_string();
    }
    if width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut used = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if used + w > width - 1 {
            break;
        }
        out.push(c);
        used += w;
    }
    out.push('…');
    out
}

pub struct RecipeListState {
    pub scroll_state: ScrollViewState,
    /// Last known viewport height (for scroll clamping between frames)
    pub viewport_height: u16,
    /// Height of all cards from the last render
    pub content_height: u16,
}

impl Default for RecipeListState {
    fn default() -> Self {
        Self::new()
    }
}

impl RecipeListState {
    pub fn new() -> Self {
        Self {
            scroll_state: ScrollViewState::default(),
            viewport_height: 0,
            content_height: 0,
        }
    }

    /// Jump back to the first card (used when the result set changes).
    pub fn scroll_to_top(&mut self) {
        self.scroll_state.scroll_to_top();
    }

    fn clamp_scroll(&mut self) {
        let max_y = self.content_height.saturating_sub(self.viewport_height);
        let current = self.scroll_state.offset();
        if current.y > max_y {
            self.scroll_state.set_offset(Position {
                x: current.x,
                y: max_y,
            });
        }
    }
}

impl EventHandler for RecipeListState {
    type Event = ();

    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event> {
        match event {
            TuiEvent::ScrollUp => self.scroll_state.scroll_up(),
            TuiEvent::ScrollDown => self.scroll_state.scroll_down(),
            TuiEvent::ScrollPageUp => self.scroll_state.scroll_page_up(),
            TuiEvent::ScrollPageDown => self.scroll_state.scroll_page_down(),
            _ => return None,
        }
        self.clamp_scroll();
        None
    }
}

/// A single recipe card.
struct RecipeCard<'a> {
    recipe: &'a Recipe,
}

impl Widget for RecipeCard<'_> {
    fn render(self, area: Rect, buf: &mut ratatui::buffer::Buffer) {
        let block = Block::bordered()
            .border_type(BorderType::Rounded)
            .border_style(Style::default().fg(Color::LightRed).add_modifier(Modifier::DIM))
            .title(Span::styled(
                self.recipe.title.as_str(),
                Style::default().add_modifier(Modifier::BOLD),
            ))
            .padding(Padding::horizontal(1));

        let inner = block.inner(area);
        block.render(area, buf);

        let details = Line::from(vec![
            Span::styled(self.recipe.time.as_str(), Style::default().fg(Color::Cyan)),
            Span::raw(" · "),
            Span::styled(
                self.recipe.difficulty.as_str(),
                Style::default().fg(Color::Yellow),
            ),
            Span::raw(" · "),
            Span::styled(
                self.recipe.category.as_str(),
                Style::default().fg(Color::Magenta),
            ),
        ]);
        let image = Line::from(Span::styled(
            truncate_to_width(&self.recipe.image, inner.width as usize),
            Style::default().fg(Color::DarkGray),
        ));

        Paragraph::new(vec![details, image]).render(inner, buf);
    }
}

pub struct RecipeList<'a> {
    pub state: &'a mut RecipeListState,
    pub recipes: &'a [&'a Recipe],
}

impl<'a> RecipeList<'a> {
    pub fn new(state: &'a mut RecipeListState, recipes: &'a [&'a Recipe]) -> Self {
        Self { state, recipes }
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
                "Try another search",
                Style::default().fg(Color::DarkGray),
            )),
        ];
        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), center);
    }
}

impl Component for RecipeList<'_> {
    fn render(&mut self, frame: &mut Frame, area: Rect) {
        if self.recipes.is_empty() {
            self.state.content_height = 0;
            self.render_empty(frame, area);
            return;
        }

        let content_width = area.width.saturating_sub(1); // -1 for scrollbar
        let columns = columns_for_width(content_width);
        let card_width = content_width / columns;
        let rows = (self.recipes.len() as u16).div_ceil(columns);
        let total_height = rows * CARD_HEIGHT;

        self.state.viewport_height = area.height;
        self.state.content_height = total_height;
        self.state.clamp_scroll();

        let mut scroll_view = ScrollView::new(Size::new(content_width, total_height))
            .vertical_scrollbar_visibility(ScrollbarVisibility::Automatic)
            .horizontal_scrollbar_visibility(ScrollbarVisibility::Never);

        for (i, &recipe) in self.recipes.iter().enumerate() {
            let row = i as u16 / columns;
            let col = i as u16 % columns;
            let rect = Rect::new(col * card_width, row * CARD_HEIGHT, card_width, CARD_HEIGHT);
            scroll_view.render_widget(RecipeCard { recipe }, rect);
        }

        frame.render_stateful_widget(scroll_view, area, &mut self.state.scroll_state);
    }
}
