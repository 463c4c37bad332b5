//! # TUI Adapter
//!
//! The ratatui-specific layer. Handles terminal I/O, renders the UI,
//! and translates keyboard events into core::Action values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Input Routing
//!
//! Global keys (Ctrl+C, Esc, tab switching) are handled first. Everything
//! else goes to the active tab: the search box on Recipes, the message box
//! on AI chef. Scroll keys go to whichever list is visible.
//!
//! ## Redraw Strategy
//!
//! - **Loading or toast visible**: draws every ~80ms so the spinner animates
//!   and the toast disappears on time.
//! - **Idle**: sleeps up to 500ms, only redraws on events, replies or resize.
//!
//! ## Request Lifetime
//!
//! Each chat send runs on its own tokio task and reports back over an
//! `mpsc` channel. A [`ReplyGuard`] inside the task makes sure exactly one
//! outcome is reported, even if the task panics, so the loading state
//! always ends.

mod component;
mod components;
mod event;
mod ui;

use log::{debug, info, warn};
use std::io::stdout;
use std::sync::{Arc, mpsc};
use std::time::{Duration, Instant};

use crossterm::cursor::{Hide, SetCursorStyle, Show};
use crossterm::event::{
    DisableBracketedPaste, DisableMouseCapture, EnableBracketedPaste, EnableMouseCapture,
};
use crossterm::execute;

use crate::core::action::{Action, Effect, update};
use crate::core::config::{ProviderSettings, ResolvedConfig};
use crate::core::state::App;
use crate::inference::{ChatProvider, ChatRequest, FunctionProvider, OpenAiProvider};
use crate::tui::component::EventHandler;
use crate::tui::components::{InputBox, InputEvent, MessageListState, RecipeListState, Tab};
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const SEARCH_TITLE: &str = "Search";
const SEARCH_PLACEHOLDER: &str = "Search recipes...";
const CHAT_TITLE: &str = "Message";
const CHAT_TITLE_WAITING: &str = "Message (waiting for a reply)";
const CHAT_PLACEHOLDER: &str = "Type a message...";

/// TUI-specific presentation state (not part of core business logic)
pub struct TuiState {
    pub active_tab: Tab,
    // Persistent component states
    pub search_box: InputBox,
    pub chat_input: InputBox,
    pub recipe_list: RecipeListState,
    pub message_list: MessageListState,
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            active_tab: Tab::default(),
            search_box: InputBox::new(SEARCH_TITLE, SEARCH_PLACEHOLDER),
            chat_input: InputBox::new(CHAT_TITLE, CHAT_PLACEHOLDER),
            recipe_list: RecipeListState::new(),
            message_list: MessageListState::new(),
        }
    }

    /// Push App-derived props into the input boxes.
    pub fn sync_props(&mut self, app: &App) {
        let loading = app.is_loading();
        self.search_box.focused = self.active_tab == Tab::Recipes;
        self.chat_input.focused = self.active_tab == Tab::Chat;
        self.chat_input.disabled = loading;
        self.chat_input.title = if loading {
            CHAT_TITLE_WAITING.to_string()
        } else {
            CHAT_TITLE.to_string()
        };
    }

    fn switch_tab(&mut self, tab: Tab) {
        if self.active_tab != tab {
            debug!("Switching to tab {:?}", tab);
            self.active_tab = tab;
        }
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> std::io::Result<Self> {
        execute!(
            stdout(),
            EnableMouseCapture,
            EnableBracketedPaste,
            Show,                        // Show cursor for input editing
            SetCursorStyle::SteadyBlock, // Non-blinking: avoids blink timer reset from continuous redraws
        )?;
        info!("Terminal modes enabled (mouse, bracketed paste, steady block cursor)");
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(
            stdout(),
            DisableMouseCapture,
            DisableBracketedPaste,
            Hide // Hide cursor on exit
        );
    }
}

/// Runs a cleanup closure when dropped, so an early `?` return from the
/// event loop still hands the terminal back.
struct RestoreGuard<F: FnMut()> {
    restore: F,
}

impl<F: FnMut()> RestoreGuard<F> {
    fn new(restore: F) -> Self {
        Self { restore }
    }
}

impl<F: FnMut()> Drop for RestoreGuard<F> {
    fn drop(&mut self) {
        (self.restore)();
    }
}

/// Build the provider selected by the resolved config.
pub fn build_provider(config: &ResolvedConfig) -> Arc<dyn ChatProvider> {
    match &config.provider {
        ProviderSettings::Function { endpoint } => {
            Arc::new(FunctionProvider::new(endpoint.clone()))
        }
        ProviderSettings::OpenAi(settings) => Arc::new(OpenAiProvider::new(settings.clone())),
    }
}

/// Route one terminal event through the TUI components and into the core.
/// Returns the effect the event loop has to carry out.
pub fn dispatch(app: &mut App, tui: &mut TuiState, event: TuiEvent) -> Effect {
    tui.sync_props(app);

    match event {
        TuiEvent::Resize => Effect::None,
        TuiEvent::ForceQuit => update(app, Action::Quit),
        TuiEvent::Escape => {
            if app.notification.is_some() {
                update(app, Action::DismissNotification)
            } else {
                update(app, Action::Quit)
            }
        }
        TuiEvent::NextTab => {
            tui.switch_tab(tui.active_tab.next());
            Effect::None
        }
        TuiEvent::PrevTab => {
            tui.switch_tab(tui.active_tab.prev());
            Effect::None
        }
        TuiEvent::SelectTab(index) => {
            if let Some(tab) = Tab::from_index(index) {
                tui.switch_tab(tab);
            }
            Effect::None
        }
        TuiEvent::ScrollUp
        | TuiEvent::ScrollDown
        | TuiEvent::ScrollPageUp
        | TuiEvent::ScrollPageDown => {
            match tui.active_tab {
                Tab::Recipes => tui.recipe_list.handle_event(&event),
                Tab::Chat => tui.message_list.handle_event(&event),
            };
            Effect::None
        }
        _ => match tui.active_tab {
            Tab::Recipes => dispatch_search(app, tui, &event),
            Tab::Chat => dispatch_chat(app, tui, &event),
        },
    }
}

fn dispatch_search(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    // Enter would clear the search box, and search has nothing to submit
    if matches!(event, TuiEvent::Submit) {
        return Effect::None;
    }
    match tui.search_box.handle_event(event) {
        Some(InputEvent::ContentChanged) => {
            tui.recipe_list.scroll_to_top();
            update(app, Action::SearchChanged(tui.search_box.buffer.clone()))
        }
        Some(InputEvent::Submit(_)) | None => Effect::None,
    }
}

fn dispatch_chat(app: &mut App, tui: &mut TuiState, event: &TuiEvent) -> Effect {
    match tui.chat_input.handle_event(event) {
        Some(InputEvent::Submit(text)) => {
            let effect = update(app, Action::Submit(text));
            if matches!(effect, Effect::SpawnRequest(_)) {
                tui.message_list.stick_to_bottom = true;
            }
            tui.sync_props(app);
            effect
        }
        Some(InputEvent::ContentChanged) | None => Effect::None,
    }
}

pub fn run(config: ResolvedConfig) -> std::io::Result<()> {
    let provider = build_provider(&config);
    info!("Using chat provider: {}", provider.name());
    let mut app = App::new(provider);
    let mut tui = TuiState::new();

    let mut terminal = ratatui::init();
    let _restore_guard = RestoreGuard::new(ratatui::restore);
    let _terminal_mode_guard = TerminalModeGuard::new()
        .inspect_err(|e| warn!("Failed to enable terminal modes: {}", e))
        .ok();

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();

    let start_time = Instant::now();
    let mut needs_redraw = true; // Force first frame

    loop {
        let animating = app.is_loading() || app.notification.is_some();
        if animating {
            needs_redraw = true;
        }

        if needs_redraw {
            tui.sync_props(&app);
            let spinner_frame = (start_time.elapsed().as_secs_f32() * 12.0) as usize;
            terminal.draw(|f| ui::draw_ui(f, &app, &mut tui, spinner_frame))?;
            needs_redraw = false;
        }

        // Dynamic poll timeout: short when animating (~12fps), long when idle
        let timeout = if animating {
            Duration::from_millis(80)
        } else {
            Duration::from_millis(500)
        };
        let first_event = poll_event_timeout(timeout);
        if first_event.is_some() {
            needs_redraw = true;
        }

        // Process first event + drain ALL pending events before next draw
        let mut should_quit = false;
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            match dispatch(&mut app, &mut tui, event) {
                Effect::Quit => {
                    should_quit = true;
                    break;
                }
                Effect::SpawnRequest(message) => {
                    spawn_request(app.provider.clone(), message, tx.clone());
                }
                Effect::None => {}
            }
        }

        if should_quit {
            info!("Quit requested");
            break;
        }

        // Handle background task actions (chat replies)
        while let Ok(action) = rx.try_recv() {
            needs_redraw = true;
            debug!("Event loop received: {:?}", action);
            if update(&mut app, action) == Effect::Quit {
                should_quit = true;
            }
        }

        if should_quit {
            break;
        }

        let had_notification = app.notification.is_some();
        update(&mut app, Action::Tick(Instant::now()));
        if had_notification && app.notification.is_none() {
            needs_redraw = true;
        }
    }

    Ok(())
}

/// Reports the outcome of one chat request back to the event loop.
///
/// Dropping the guard without calling [`ReplyGuard::resolve`] (an early
/// return or a panic inside the task) reports a failure instead, so the
/// pending turn is always settled.
pub struct ReplyGuard {
    tx: Option<mpsc::Sender<Action>>,
}

impl ReplyGuard {
    pub fn new(tx: mpsc::Sender<Action>) -> Self {
        Self { tx: Some(tx) }
    }

    pub fn resolve(mut self, action: Action) {
        if let Some(tx) = self.tx.take()
            && tx.send(action).is_err()
        {
            warn!("Failed to send chat outcome: receiver dropped");
        }
    }
}

impl Drop for ReplyGuard {
    fn drop(&mut self) {
        if let Some(tx) = self.tx.take() {
            warn!("Chat request ended without an outcome");
            if tx
                .send(Action::ReplyFailed(
                    "request ended without an outcome".to_string(),
                ))
                .is_err()
            {
                warn!("Failed to send chat failure: receiver dropped");
            }
        }
    }
}

/// Ask the provider for a reply and turn the result into the matching action.
pub async fn request_reply(provider: &dyn ChatProvider, message: &str) -> Action {
    match provider.reply(ChatRequest { message }).await {
        Ok(reply) => {
            info!("{} replied ({} bytes)", provider.name(), reply.len());
            Action::ReplyReceived(reply)
        }
        Err(e) => {
            warn!("{} failed: {}", provider.name(), e);
            Action::ReplyFailed(e.to_string())
        }
    }
}

fn spawn_request(
    provider: Arc<dyn ChatProvider>,
    message: String,
    tx: mpsc::Sender<Action>,
) -> tokio::task::JoinHandle<()> {
    info!("Spawning chat request ({} bytes)", message.len());
    tokio::spawn(async move {
        let guard = ReplyGuard::new(tx);
        let action = request_reply(provider.as_ref(), &message).await;
        guard.resolve(action);
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::transcript::Message;
    use crate::inference::ProviderError;
    use crate::test_support::{StubProvider, test_app};
    use async_trait::async_trait;
    use ratatui::layout::Position;

    fn type_str(app: &mut App, tui: &mut TuiState, text: &str) {
        for c in text.chars() {
            dispatch(app, tui, TuiEvent::InputChar(c));
        }
    }

    #[test]
    fn test_typing_on_recipes_tab_updates_query() {
        let mut app = test_app();
        let mut tui = TuiState::new();

        type_str(&mut app, &mut tui, "SAL");
        assert_eq!(app.search_query, "SAL");
        let titles: Vec<_> = app.filtered_recipes().iter().map(|r| r.title.clone()).collect();
        assert_eq!(titles, vec!["Fresh Salad"]);

        dispatch(&mut app, &mut tui, TuiEvent::Backspace);
        assert_eq!(app.search_query, "SA");
    }

    #[test]
    fn test_enter_on_recipes_tab_keeps_query() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_str(&mut app, &mut tui, "stew");

        let effect = dispatch(&mut app, &mut tui, TuiEvent::Submit);
        assert_eq!(effect, Effect::None);
        assert_eq!(app.search_query, "stew");
        assert_eq!(tui.search_box.buffer, "stew");
        assert!(app.transcript.is_empty());
    }

    #[test]
    fn test_search_change_scrolls_list_to_top() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        tui.recipe_list
            .scroll_state
            .set_offset(Position { x: 0, y: 5 });

        type_str(&mut app, &mut tui, "p");
        assert_eq!(tui.recipe_list.scroll_state.offset().y, 0);
    }

    #[test]
    fn test_tab_switching() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        assert_eq!(tui.active_tab, Tab::Recipes);

        dispatch(&mut app, &mut tui, TuiEvent::NextTab);
        assert_eq!(tui.active_tab, Tab::Chat);
        dispatch(&mut app, &mut tui, TuiEvent::NextTab);
        assert_eq!(tui.active_tab, Tab::Recipes);
        dispatch(&mut app, &mut tui, TuiEvent::PrevTab);
        assert_eq!(tui.active_tab, Tab::Chat);
        dispatch(&mut app, &mut tui, TuiEvent::SelectTab(0));
        assert_eq!(tui.active_tab, Tab::Recipes);
        dispatch(&mut app, &mut tui, TuiEvent::SelectTab(9));
        assert_eq!(tui.active_tab, Tab::Recipes);
    }

    #[test]
    fn test_search_query_survives_tab_switch() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        type_str(&mut app, &mut tui, "pasta");

        dispatch(&mut app, &mut tui, TuiEvent::SelectTab(1));
        type_str(&mut app, &mut tui, "hi");
        dispatch(&mut app, &mut tui, TuiEvent::SelectTab(0));

        assert_eq!(app.search_query, "pasta");
        assert_eq!(tui.chat_input.buffer, "hi");
    }

    #[test]
    fn test_chat_submit_spawns_request_and_clears_input() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        dispatch(&mut app, &mut tui, TuiEvent::SelectTab(1));

        type_str(&mut app, &mut tui, "Can I freeze stew?");
        let effect = dispatch(&mut app, &mut tui, TuiEvent::Submit);

        assert_eq!(effect, Effect::SpawnRequest("Can I freeze stew?".to_string()));
        assert_eq!(app.transcript.messages(), &[Message::user("Can I freeze stew?")]);
        assert!(tui.chat_input.buffer.is_empty());
        assert!(tui.chat_input.disabled);
    }

    #[test]
    fn test_chat_input_blocked_while_loading() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        dispatch(&mut app, &mut tui, TuiEvent::SelectTab(1));
        type_str(&mut app, &mut tui, "first");
        dispatch(&mut app, &mut tui, TuiEvent::Submit);

        type_str(&mut app, &mut tui, "second");
        let effect = dispatch(&mut app, &mut tui, TuiEvent::Submit);

        assert_eq!(effect, Effect::None);
        assert!(tui.chat_input.buffer.is_empty());
        assert_eq!(app.transcript.len(), 1);

        update(&mut app, Action::ReplyReceived("done".to_string()));
        type_str(&mut app, &mut tui, "second");
        assert!(matches!(
            dispatch(&mut app, &mut tui, TuiEvent::Submit),
            Effect::SpawnRequest(_)
        ));
    }

    #[test]
    fn test_blank_chat_submit_does_nothing() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        dispatch(&mut app, &mut tui, TuiEvent::SelectTab(1));
        type_str(&mut app, &mut tui, "   ");

        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Submit), Effect::None);
        assert!(app.transcript.is_empty());
        assert!(!app.is_loading());
    }

    #[test]
    fn test_escape_dismisses_toast_before_quitting() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::Submit("q".to_string()));
        update(&mut app, Action::ReplyFailed("boom".to_string()));
        assert!(app.notification.is_some());

        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Escape), Effect::None);
        assert!(app.notification.is_none());
        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::Escape), Effect::Quit);
    }

    #[test]
    fn test_ctrl_c_always_quits() {
        let mut app = test_app();
        let mut tui = TuiState::new();
        update(&mut app, Action::Submit("q".to_string()));
        assert_eq!(dispatch(&mut app, &mut tui, TuiEvent::ForceQuit), Effect::Quit);
    }

    fn failing_draw(restored: &std::cell::Cell<bool>) -> std::io::Result<()> {
        let _guard = RestoreGuard::new(|| restored.set(true));
        Err::<(), _>(std::io::Error::other("draw failed"))?;
        Ok(())
    }

    #[test]
    fn test_restore_guard_runs_on_error_return() {
        let restored = std::cell::Cell::new(false);
        assert!(failing_draw(&restored).is_err());
        assert!(restored.get());
    }

    #[test]
    fn test_restore_guard_runs_on_normal_exit() {
        let restored = std::cell::Cell::new(false);
        {
            let _guard = RestoreGuard::new(|| restored.set(true));
            assert!(!restored.get());
        }
        assert!(restored.get());
    }

    #[test]
    fn test_dropped_guard_reports_failure() {
        let (tx, rx) = mpsc::channel();
        drop(ReplyGuard::new(tx));
        assert!(matches!(rx.try_recv(), Ok(Action::ReplyFailed(_))));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_resolved_guard_reports_once() {
        let (tx, rx) = mpsc::channel();
        ReplyGuard::new(tx).resolve(Action::ReplyReceived("hi".to_string()));
        assert_eq!(rx.try_recv(), Ok(Action::ReplyReceived("hi".to_string())));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_guard_tolerates_closed_receiver() {
        let (tx, rx) = mpsc::channel();
        drop(rx);
        ReplyGuard::new(tx).resolve(Action::ReplyReceived("late".to_string()));
    }

    #[tokio::test]
    async fn test_spawn_request_reports_reply() {
        let (tx, rx) = mpsc::channel();
        let provider = Arc::new(StubProvider::replying("Use a low heat."));
        spawn_request(provider.clone(), "tips?".to_string(), tx)
            .await
            .unwrap();

        assert_eq!(
            rx.try_recv(),
            Ok(Action::ReplyReceived("Use a low heat.".to_string()))
        );
        assert_eq!(provider.calls(), 1);
    }

    #[tokio::test]
    async fn test_spawn_request_reports_failure() {
        let (tx, rx) = mpsc::channel();
        spawn_request(Arc::new(StubProvider::failing()), "tips?".to_string(), tx)
            .await
            .unwrap();
        assert!(matches!(rx.try_recv(), Ok(Action::ReplyFailed(_))));
    }

    struct PanickingProvider;

    #[async_trait]
    impl ChatProvider for PanickingProvider {
        fn name(&self) -> &str {
            "panicking"
        }

        async fn reply(&self, _request: ChatRequest<'_>) -> Result<String, ProviderError> {
            panic!("provider blew up");
        }
    }

    #[tokio::test]
    async fn test_panicking_request_still_ends_loading() {
        let mut app = test_app();
        let effect = update(&mut app, Action::Submit("hello".to_string()));
        let Effect::SpawnRequest(message) = effect else {
            panic!("expected a request, got {effect:?}");
        };

        let (tx, rx) = mpsc::channel();
        let result = spawn_request(Arc::new(PanickingProvider), message, tx).await;
        assert!(result.is_err());

        let action = rx.try_recv().unwrap();
        update(&mut app, action);
        assert!(!app.is_loading());
        assert!(app.notification.is_some());
        assert_eq!(app.transcript.len(), 1);
    }
}
