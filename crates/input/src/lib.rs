//! Terminal input for the screensaver host.
//!
//! Screensavers have no controls: a key press ends the session and a resize
//! is passed on so the renderer can redraw. Everything else is ignored.

pub mod map;

pub use map::{classify, is_exit_key, HostEvent};
