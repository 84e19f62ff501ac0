//! Terminal output for the screensaver host.
//!
//! Simulations paint into a plain [`Grid`](types::Grid); this crate owns
//! everything that touches the real terminal plus the frame clock that paces
//! the host loop.
//!
//! - [`renderer`]: alternate screen, cursor hiding, full and diff encoding
//! - [`clock`]: fixed-rate tick scheduling

pub mod clock;
pub mod renderer;

pub use term_savers_types as types;

pub use clock::FrameClock;
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
