//! The contract every screensaver implements.

use crate::rng::SimRng;
use crate::types::{Grid, Tick};

/// A self-contained screensaver simulation.
///
/// Implementations own all of their state. The host calls [`Simulation::advance`]
/// exactly once per tick; dimensions may change between calls and must be
/// treated as ordinary input.
pub trait Simulation {
    /// Advance one tick and paint the result into `grid`.
    ///
    /// The grid is resized to `tick.columns x tick.rows` and every cell is
    /// repainted. This is the allocation-free hot path when the size is stable.
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid);

    /// Convenience helper that allocates a new grid.
    fn render(&mut self, tick: Tick, rng: &mut SimRng) -> Grid {
        let mut grid = Grid::new(tick.columns, tick.rows);
        self.advance(tick, rng, &mut grid);
        grid
    }
}
