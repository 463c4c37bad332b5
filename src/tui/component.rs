use ratatui::Frame;
use ratatui::layout::Rect;

/// A piece of the screen that knows how to draw itself.
///
/// Props are struct fields; persistent state is borrowed in as `&mut`.
/// `render` takes `&mut self` so a component can update scroll offsets or
/// cached measurements while it draws, the way ratatui's `StatefulWidget` does.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal events.
pub trait EventHandler {
    /// The type of high-level event this component emits.
    type Event;

    /// Handle a low-level `TuiEvent` and optionally return a high-level event.
    fn handle_event(&mut self, event: &super::event::TuiEvent) -> Option<Self::Event>;
}
