//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types shared by the simulations, the
//! terminal renderer and the host loop. All types are pure data structures with
//! no external dependencies.
//!
//! # Grid Contract
//!
//! Every screensaver produces a [`Grid`] of styled cells per [`Tick`]. The grid
//! always has exactly `tick.columns x tick.rows` cells; empty cells hold a space.
//!
//! # Frame Rate Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_FPS` | 15 | Frame rate when neither the module nor the user picks one |
//! | `FALLBACK_COLUMNS` | 80 | Width used when the terminal size is unavailable |
//! | `FALLBACK_ROWS` | 24 | Height used when the terminal size is unavailable |
//!
//! # Examples
//!
//! ```
//! use term_savers_types::{CellStyle, Grid, Rgb, Tick};
//!
//! let tick = Tick::new(40, 10, 0, 0);
//! let mut grid = Grid::new(tick.columns, tick.rows);
//! grid.put_char(3, 2, '*', CellStyle::fg(Rgb::CYAN));
//!
//! assert_eq!(grid.get(3, 2).unwrap().ch, '*');
//! assert_eq!(tick.usable_rows(), 9);
//! ```

pub mod grid;

pub use grid::{Cell, CellStyle, Grid, Rgb};

/// Frame rate used when neither the screensaver nor the user specifies one.
pub const DEFAULT_FPS: u32 = 15;

/// Terminal width assumed when the real size cannot be queried.
pub const FALLBACK_COLUMNS: u16 = 80;

/// Terminal height assumed when the real size cannot be queried.
pub const FALLBACK_ROWS: u16 = 24;

/// Inputs for one simulation step.
///
/// `frame` starts at 0 and increases by one per tick; `elapsed_ms` is the
/// wall-clock time since the screensaver was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Tick {
    pub columns: u16,
    pub rows: u16,
    pub frame: u64,
    pub elapsed_ms: u64,
}

impl Tick {
    pub const fn new(columns: u16, rows: u16, frame: u64, elapsed_ms: u64) -> Self {
        Self {
            columns,
            rows,
            frame,
            elapsed_ms,
        }
    }

    /// Rows available to screensavers that keep the bottom row free.
    pub const fn usable_rows(&self) -> u16 {
        self.rows.saturating_sub(1)
    }

    /// Same tick with different dimensions (used when replaying a resize).
    pub const fn with_size(self, columns: u16, rows: u16) -> Self {
        Self {
            columns,
            rows,
            ..self
        }
    }

    /// Same dimensions at another frame.
    pub const fn with_frame(self, frame: u64) -> Self {
        Self { frame, ..self }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn usable_rows_reserves_the_status_line() {
        assert_eq!(Tick::new(80, 24, 0, 0).usable_rows(), 23);
        assert_eq!(Tick::new(80, 1, 0, 0).usable_rows(), 0);
        assert_eq!(Tick::new(80, 0, 0, 0).usable_rows(), 0);
    }

    #[test]
    fn with_size_keeps_timing() {
        let t = Tick::new(80, 24, 7, 700).with_size(40, 12);
        assert_eq!(t, Tick::new(40, 12, 7, 700));
        assert_eq!(t.with_frame(9).frame, 9);
    }
}
