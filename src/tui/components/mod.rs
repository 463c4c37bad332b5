//! # TUI Components
//!
//! All UI components for the terminal interface.
//!
//! ### Stateless Components (Props-Based Rendering)
//!
//! - `TitleBar`: header with app name and status
//! - `TabBar`: Recipes / AI chef switcher
//! - `MessageBubble`, `PendingBubble`: a single chat entry
//! - `Toast`: the notification overlay
//!
//! ### Stateful Components (Event-Driven)
//!
//! - `InputBox`: single-line text field (search and chat)
//! - `RecipeList`: scrollable grid of recipe cards
//! - `MessageList`: scrollable transcript view
//!
//! Components receive external data as props (struct fields), not by
//! reaching into `App`:
//!
//! ```rust,ignore
//! // Good: dependencies are explicit
//! TitleBar::new(app.status_message.clone(), app.is_loading(), spinner_frame)
//!     .render(frame, area);
//!
//! // Bad: hidden dependency on global state
//! title_bar.render(frame, area); // reads from App
//! ```

pub mod input_box;
pub mod message;
pub mod message_list;
pub mod recipe_list;
pub mod tab_bar;
pub mod title_bar;
pub mod toast;

pub use input_box::{INPUT_HEIGHT, InputBox, InputEvent};
pub use message_list::{MessageList, MessageListState};
pub use recipe_list::{RecipeList, RecipeListState};
pub use tab_bar::{Tab, TabBar};
pub use title_bar::TitleBar;
pub use toast::Toast;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Braille spinner glyph for the given animation frame.
pub fn spinner_glyph(frame: usize) -> &'static str {
    SPINNER_FRAMES[frame % SPINNER_FRAMES.len()]
}
