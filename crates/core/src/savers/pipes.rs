//! Pipes growing across the screen with box-drawing corners.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{Cell, CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "pipes",
    description: "Random pipe segments with box-drawing characters",
    fps: Some(15),
};

const PIPE_COUNT: usize = 3;
const STEPS_PER_TICK: usize = 3;
const TURN_CHANCE: f32 = 0.3;
/// The canvas is wiped once this fraction of cells is occupied.
const FILL_LIMIT: f32 = 0.6;

const COLORS: [Rgb; 6] = [
    Rgb::GREEN,
    Rgb::CYAN,
    Rgb::MAGENTA,
    Rgb::YELLOW,
    Rgb::RED,
    Rgb::BLUE,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Heading {
    Up,
    Right,
    Down,
    Left,
}

impl Heading {
    pub(crate) const ALL: [Heading; 4] =
        [Heading::Up, Heading::Right, Heading::Down, Heading::Left];

    pub(crate) fn delta(self) -> (i32, i32) {
        match self {
            Heading::Up => (0, -1),
            Heading::Right => (1, 0),
            Heading::Down => (0, 1),
            Heading::Left => (-1, 0),
        }
    }

    fn turn_cw(self) -> Self {
        match self {
            Heading::Up => Heading::Right,
            Heading::Right => Heading::Down,
            Heading::Down => Heading::Left,
            Heading::Left => Heading::Up,
        }
    }

    pub(crate) fn opposite(self) -> Self {
        self.turn_cw().turn_cw()
    }

    fn turn_ccw(self) -> Self {
        match self {
            Heading::Up => Heading::Left,
            Heading::Left => Heading::Down,
            Heading::Down => Heading::Right,
            Heading::Right => Heading::Up,
        }
    }
}

/// Glyph stamped when a pipe travelling `from` continues `to`.
pub fn joint(from: Heading, to: Heading) -> char {
    use Heading::*;
    match (from, to) {
        (Up, Up) | (Down, Down) => '│',
        (Right, Right) | (Left, Left) => '─',
        (Up, Right) | (Left, Down) => '┌',
        (Up, Left) | (Left, Up) => '┐',
        (Down, Right) | (Right, Down) => '└',
        (Down, Left) | (Right, Up) => '┘',
        // Reversals never happen (turns are always 90°).
        _ => '│',
    }
}

#[derive(Debug, Clone, Copy)]
struct Head {
    x: i32,
    y: i32,
    heading: Heading,
    color: Rgb,
}

struct Canvas {
    width: u16,
    height: u16,
    cells: Vec<Option<Cell>>,
    filled: usize,
    heads: ArrayVec<Head, PIPE_COUNT>,
}

impl Canvas {
    fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
            filled: 0,
            heads: ArrayVec::new(),
        }
    }

    fn capacity(&self) -> usize {
        self.cells.len()
    }

    fn wipe(&mut self) {
        self.cells.fill(None);
        self.filled = 0;
        self.heads.clear();
    }

    fn stamp(&mut self, x: i32, y: i32, cell: Cell) {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return;
        }
        let i = y as usize * self.width as usize + x as usize;
        if self.cells[i].is_none() {
            self.filled += 1;
        }
        self.cells[i] = Some(cell);
    }
}

pub struct Pipes {
    canvas: Option<Canvas>,
}

impl Pipes {
    pub fn new() -> Self {
        Self { canvas: None }
    }
}

impl Default for Pipes {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Pipes {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);
        let (w, h) = (tick.columns, tick.usable_rows());
        if w == 0 || h == 0 {
            return;
        }

        if !matches!(&self.canvas, Some(c) if c.width == w && c.height == h) {
            self.canvas = Some(Canvas::new(w, h));
        }
        let Some(canvas) = self.canvas.as_mut() else {
            return;
        };

        if canvas.filled as f32 > canvas.capacity() as f32 * FILL_LIMIT {
            debug!(filled = canvas.filled, "pipes canvas full, restarting");
            canvas.wipe();
        }

        while !canvas.heads.is_full() {
            canvas.heads.push(Head {
                x: rng.below(w as usize) as i32,
                y: rng.below(h as usize) as i32,
                heading: rng.pick(&Heading::ALL),
                color: rng.pick(&COLORS),
            });
        }

        for i in 0..canvas.heads.len() {
            let mut head = canvas.heads[i];
            for _ in 0..STEPS_PER_TICK {
                let old = head.heading;
                let new = if rng.chance(TURN_CHANCE) {
                    if rng.coin() {
                        old.turn_cw()
                    } else {
                        old.turn_ccw()
                    }
                } else {
                    old
                };

                canvas.stamp(head.x, head.y, CellStyle::fg(head.color).into_cell(joint(old, new)));

                let (dx, dy) = new.delta();
                head.heading = new;
                head.x = (head.x + dx).rem_euclid(w as i32);
                head.y = (head.y + dy).rem_euclid(h as i32);
            }
            canvas.heads[i] = head;
        }

        for (i, cell) in canvas.cells.iter().enumerate() {
            if let Some(cell) = cell {
                let x = (i % w as usize) as u16;
                let y = (i / w as usize) as u16;
                grid.set(x, y, *cell);
            }
        }
    }
}
