use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, BorderType, Padding, Paragraph};

use crate::core::state::App;
use crate::tui::TuiState;
use crate::tui::component::Component;
use crate::tui::components::{
    INPUT_HEIGHT, MessageList, RecipeList, Tab, TabBar, TitleBar, Toast,
};

pub const CHAT_HEADING: &str = "Ask the AI chef";
pub const CHAT_DESCRIPTION: &str =
    "Ask anything about cooking, ingredient substitutions, or request a recipe";

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState, spinner_frame: usize) {
    use Constraint::{Length, Min};
    let layout = Layout::vertical([Length(1), Length(1), Min(0)]);
    let [title_area, tabs_area, body_area] = layout.areas(frame.area());

    TitleBar::new(app.status_message.clone(), app.is_loading(), spinner_frame)
        .render(frame, title_area);
    TabBar {
        active: tui.active_tab,
    }
    .render(frame, tabs_area);

    match tui.active_tab {
        Tab::Recipes => draw_recipes_tab(frame, body_area, app, tui),
        Tab::Chat => draw_chat_tab(frame, body_area, app, tui, spinner_frame),
    }

    if let Some(notification) = &app.notification {
        Toast { notification }.render(frame, frame.area());
    }
}

fn draw_recipes_tab(frame: &mut Frame, area: Rect, app: &App, tui: &mut TuiState) {
    use Constraint::{Length, Min};
    let [search_area, list_area] = Layout::vertical([Length(INPUT_HEIGHT), Min(0)]).areas(area);

    tui.search_box.render(frame, search_area);

    // Recomputed every frame from (catalog, query)
    let recipes = app.filtered_recipes();
    RecipeList::new(&mut tui.recipe_list, &recipes).render(frame, list_area);
}

fn draw_chat_tab(
    frame: &mut Frame,
    area: Rect,
    app: &App,
    tui: &mut TuiState,
    spinner_frame: usize,
) {
    use Constraint::{Length, Min};

    let card = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::DarkGray))
        .title(Span::styled(
            format!("✦ {CHAT_HEADING}"),
            Style::default()
                .fg(Color::LightRed)
                .add_modifier(Modifier::BOLD),
        ))
        .padding(Padding::horizontal(1));
    let inner = card.inner(area);
    frame.render_widget(card, area);

    let [description_area, list_area, input_area] =
        Layout::vertical([Length(2), Min(0), Length(INPUT_HEIGHT)]).areas(inner);

    frame.render_widget(
        Paragraph::new(Line::from(Span::styled(
            CHAT_DESCRIPTION,
            Style::default().fg(Color::DarkGray),
        ))),
        description_area,
    );

    MessageList::new(
        &mut tui.message_list,
        &app.transcript,
        app.is_loading(),
        spinner_frame,
    )
    .render(frame, list_area);

    tui.chat_input.render(frame, input_area);
}
