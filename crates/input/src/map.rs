//! Mapping from terminal events to host events.

use crossterm::event::{Event, KeyEvent, KeyEventKind};

/// What the host loop should do about a terminal event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostEvent {
    /// Leave the screensaver and restore the terminal.
    Exit,
    /// The terminal now has this many columns and rows.
    Resize(u16, u16),
    Ignore,
}

/// Any key press ends the session.
///
/// Release and repeat events are ignored so terminals that report them do
/// not double-fire.
pub fn is_exit_key(key: &KeyEvent) -> bool {
    key.kind == KeyEventKind::Press
}

pub fn classify(event: &Event) -> HostEvent {
    match event {
        Event::Key(key) if is_exit_key(key) => HostEvent::Exit,
        Event::Resize(columns, rows) => HostEvent::Resize(*columns, *rows),
        _ => HostEvent::Ignore,
    }
}
