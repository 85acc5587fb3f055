use ratatui::Frame;
use ratatui::layout::Rect;

use crate::tui::event::TuiEvent;

/// Something that draws itself into a `Rect`.
///
/// Most vidchat components are props structs built fresh each frame (the
/// title bar, video pane, chat panel, toast). The ones that need to remember
/// things between frames (`VideoForm`, `MessageListState`) keep that state in
/// `TuiState`, so `render` takes `&mut self` to let them refresh caches while
/// drawing.
pub trait Component {
    fn render(&mut self, frame: &mut Frame, area: Rect);
}

/// A component that consumes terminal input.
pub trait EventHandler {
    /// What the component reports upward (e.g. `FormEvent::Submit`).
    type Event;

    /// Returns `None` when the event was handled locally or ignored.
    fn handle_event(&mut self, event: &TuiEvent) -> Option<Self::Event>;
}
