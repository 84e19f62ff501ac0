//! Terminal screensavers (workspace facade crate).
//!
//! Re-exports the member crates as `term_savers::{core,input,term,types}` and
//! holds the command-line surface and signal handling shared by the binary and
//! its tests.

pub mod cli;
pub mod signals;

pub use term_savers_core as core;
pub use term_savers_input as input;
pub use term_savers_term as term;
pub use term_savers_types as types;
