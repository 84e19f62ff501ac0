//! Conway's Game of Life on a torus, with a stagnation kicker.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "game-of-life",
    description: "Conway's Game of Life cellular automaton",
    fps: Some(8),
};

const INITIAL_DENSITY: f32 = 0.2;
/// Generations of identical population that count as stagnation.
pub const STAGNATION_WINDOW: usize = 10;
/// Minimum ticks between two forced perturbations.
pub const PERTURB_COOLDOWN: u64 = 20;
/// Share of cells re-rolled by a perturbation.
pub const PERTURB_RATE: f32 = 0.05;

const LIVE: CellStyle = CellStyle::fg(Rgb::GREEN);

/// Double-buffered toroidal life board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LifeBoard {
    width: u16,
    height: u16,
    cells: Vec<bool>,
    scratch: Vec<bool>,
}

impl LifeBoard {
    pub fn new(width: u16, height: u16) -> Self {
        let len = width as usize * height as usize;
        Self {
            width,
            height,
            cells: vec![false; len],
            scratch: vec![false; len],
        }
    }

    pub fn random(width: u16, height: u16, density: f32, rng: &mut SimRng) -> Self {
        let mut board = Self::new(width, height);
        for c in board.cells.iter_mut() {
            *c = rng.chance(density);
        }
        board
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn get(&self, x: u16, y: u16) -> bool {
        x < self.width && y < self.height && self.cells[self.idx(x, y)]
    }

    pub fn set(&mut self, x: u16, y: u16, alive: bool) {
        if x < self.width && y < self.height {
            let i = self.idx(x, y);
            self.cells[i] = alive;
        }
    }

    pub fn population(&self) -> usize {
        self.cells.iter().filter(|&&c| c).count()
    }

    fn idx(&self, x: u16, y: u16) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Live neighbors of `(x, y)`, wrapping at every edge.
    pub fn neighbors(&self, x: u16, y: u16) -> u8 {
        let (w, h) = (self.width as i32, self.height as i32);
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = (x as i32 + dx).rem_euclid(w) as u16;
                let ny = (y as i32 + dy).rem_euclid(h) as u16;
                if self.cells[self.idx(nx, ny)] {
                    count += 1;
                }
            }
        }
        count
    }

    /// Apply one generation of B3/S23 and return the new population.
    ///
    /// Pure function of the current cells.
    pub fn step(&mut self) -> usize {
        if self.cells.is_empty() {
            return 0;
        }
        let mut population = 0;
        for y in 0..self.height {
            for x in 0..self.width {
                let n = self.neighbors(x, y);
                let alive = self.cells[self.idx(x, y)];
                let next = matches!((alive, n), (true, 2) | (_, 3));
                let i = self.idx(x, y);
                self.scratch[i] = next;
                population += next as usize;
            }
        }
        std::mem::swap(&mut self.cells, &mut self.scratch);
        population
    }

    /// Re-roll roughly [`PERTURB_RATE`] of the cells with a coin flip.
    ///
    /// Returns how many cells were re-rolled.
    pub fn perturb(&mut self, rng: &mut SimRng) -> usize {
        let mut rolled = 0;
        for c in self.cells.iter_mut() {
            if rng.chance(PERTURB_RATE) {
                *c = rng.coin();
                rolled += 1;
            }
        }
        rolled
    }
}

struct LifeState {
    board: LifeBoard,
    history: ArrayVec<usize, STAGNATION_WINDOW>,
    last_perturb: Option<u64>,
}

impl LifeState {
    fn new(width: u16, height: u16, rng: &mut SimRng) -> Self {
        Self {
            board: LifeBoard::random(width, height, INITIAL_DENSITY, rng),
            history: ArrayVec::new(),
            last_perturb: None,
        }
    }

    fn record(&mut self, population: usize) {
        if self.history.is_full() {
            self.history.remove(0);
        }
        self.history.push(population);
    }

    fn stagnant(&self) -> bool {
        self.history.is_full() && self.history.iter().all(|&p| p == self.history[0])
    }

    fn cooled_down(&self, frame: u64) -> bool {
        self.last_perturb
            .map_or(true, |last| frame.saturating_sub(last) >= PERTURB_COOLDOWN)
    }
}

pub struct GameOfLife {
    state: Option<LifeState>,
}

impl GameOfLife {
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Start from an explicit board instead of a random one.
    pub fn with_board(board: LifeBoard) -> Self {
        Self {
            state: Some(LifeState {
                board,
                history: ArrayVec::new(),
                last_perturb: None,
            }),
        }
    }

    pub fn board(&self) -> Option<&LifeBoard> {
        self.state.as_ref().map(|s| &s.board)
    }

    /// Tick at which the last stagnation perturbation fired.
    pub fn last_perturb(&self) -> Option<u64> {
        self.state.as_ref().and_then(|s| s.last_perturb)
    }
}

impl Default for GameOfLife {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for GameOfLife {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);
        let (w, h) = (tick.columns, tick.usable_rows());
        if w == 0 || h == 0 {
            return;
        }

        if !matches!(&self.state, Some(s) if s.board.width == w && s.board.height == h) {
            self.state = Some(LifeState::new(w, h, rng));
        }
        let Some(state) = self.state.as_mut() else {
            return;
        };

        let population = state.board.step();
        state.record(population);

        if state.stagnant() && state.cooled_down(tick.frame) {
            let rolled = state.board.perturb(rng);
            debug!(frame = tick.frame, population, rolled, "life stagnated, perturbing");
            state.last_perturb = Some(tick.frame);
            state.history.clear();
        }

        for y in 0..h {
            for x in 0..w {
                if state.board.get(x, y) {
                    grid.put_char(x, y, '█', LIVE);
                }
            }
        }
    }
}
