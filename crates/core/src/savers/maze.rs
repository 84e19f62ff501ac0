//! Maze carving by randomized depth-first search, then solving it.
//!
//! The screen is split into logical cells two columns wide. Carving and
//! solving both run a few steps per tick off explicit stacks so the viewer
//! sees them progress. A solved maze is held briefly and then regenerated.

use arrayvec::ArrayVec;
use tracing::debug;

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::savers::pipes::Heading;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "maze",
    description: "Animated maze generation and solving",
    fps: Some(15),
};

/// Ticks a solved maze stays up before it is regenerated.
pub const DONE_TICKS: u32 = 30;

const GEN_CURSOR: CellStyle = CellStyle::fg(Rgb::GREEN);
const PATH: CellStyle = CellStyle::fg(Rgb::CYAN);
const SOLVE_CURSOR: CellStyle = CellStyle::fg(Rgb::YELLOW);
const WALL: CellStyle = CellStyle::fg(Rgb::GRAY);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Generating,
    Solving,
    Done,
}

pub type Pos = (usize, usize);

fn wall_bit(h: Heading) -> u8 {
    1 << h as u8
}

const ALL_WALLS: u8 = 0b1111;

/// Wall grid plus the carving and solving state over it.
pub struct Labyrinth {
    columns: u16,
    rows: u16,
    width: usize,
    height: usize,
    walls: Vec<u8>,
    carved: Vec<bool>,
    carve_stack: Vec<Pos>,
    cursor: Option<Pos>,
    seen: Vec<bool>,
    on_path: Vec<bool>,
    solve_stack: Vec<Pos>,
    solve_cursor: Option<Pos>,
    phase: Phase,
    done_ticks: u32,
}

impl Labyrinth {
    fn new(columns: u16, rows: u16) -> Self {
        let width = columns as usize / 2;
        let height = rows.saturating_sub(1) as usize / 2;
        let cells = width * height;
        let mut carve_stack = Vec::with_capacity(cells);
        if cells > 0 {
            carve_stack.push((0, 0));
        }
        Self {
            columns,
            rows,
            width,
            height,
            walls: vec![ALL_WALLS; cells],
            carved: vec![false; cells],
            carve_stack,
            cursor: None,
            seen: vec![false; cells],
            on_path: vec![false; cells],
            solve_stack: Vec::with_capacity(cells),
            solve_cursor: None,
            phase: Phase::Generating,
            done_ticks: 0,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether the wall on side `h` of `pos` has been carved away.
    pub fn is_open(&self, pos: Pos, h: Heading) -> bool {
        self.walls[self.index(pos)] & wall_bit(h) == 0
    }

    pub fn is_carved(&self, pos: Pos) -> bool {
        self.carved[self.index(pos)]
    }

    /// Solver stack from the origin to the current solve cursor.
    pub fn path(&self) -> &[Pos] {
        &self.solve_stack
    }

    pub fn goal(&self) -> Pos {
        (self.width.saturating_sub(1), self.height.saturating_sub(1))
    }

    /// Neighbor of `pos` in direction `h`, if it lies inside the maze.
    pub fn neighbor(&self, (x, y): Pos, h: Heading) -> Option<Pos> {
        let (dx, dy) = h.delta();
        let nx = x.checked_add_signed(dx as isize)?;
        let ny = y.checked_add_signed(dy as isize)?;
        (nx < self.width && ny < self.height).then_some((nx, ny))
    }

    fn index(&self, (x, y): Pos) -> usize {
        y * self.width + x
    }

    fn carve(&mut self, from: Pos, h: Heading, to: Pos) {
        let (a, b) = (self.index(from), self.index(to));
        self.walls[a] &= !wall_bit(h);
        self.walls[b] &= !wall_bit(h.opposite());
    }

    fn generate(&mut self, steps: usize, rng: &mut SimRng) {
        for _ in 0..steps {
            let Some(&current) = self.carve_stack.last() else {
                break;
            };
            self.cursor = Some(current);
            let i = self.index(current);
            self.carved[i] = true;

            let open: ArrayVec<(Heading, Pos), 4> = Heading::ALL
                .into_iter()
                .filter_map(|h| self.neighbor(current, h).map(|n| (h, n)))
                .filter(|&(_, n)| !self.carved[self.index(n)])
                .collect();
            if open.is_empty() {
                self.carve_stack.pop();
            } else {
                let (h, next) = open[rng.below(open.len())];
                self.carve(current, h, next);
                self.carve_stack.push(next);
            }
        }

        if self.carve_stack.is_empty() {
            debug!(width = self.width, height = self.height, "maze carved, solving");
            self.phase = Phase::Solving;
            self.solve_stack.push((0, 0));
            self.seen[0] = true;
            self.on_path[0] = true;
            self.solve_cursor = Some((0, 0));
        }
    }

    fn solve(&mut self, steps: usize) {
        let goal = self.goal();
        for _ in 0..steps {
            let Some(&current) = self.solve_stack.last() else {
                break;
            };
            self.solve_cursor = Some(current);
            if current == goal {
                debug!(length = self.solve_stack.len(), "maze solved");
                self.phase = Phase::Done;
                break;
            }

            let next = Heading::ALL.into_iter().find_map(|h| {
                let n = self.neighbor(current, h)?;
                (self.is_open(current, h) && !self.seen[self.index(n)]).then_some(n)
            });
            match next {
                Some(n) => {
                    let i = self.index(n);
                    self.seen[i] = true;
                    self.on_path[i] = true;
                    self.solve_stack.push(n);
                }
                None => {
                    if let Some(dead_end) = self.solve_stack.pop() {
                        let i = self.index(dead_end);
                        self.on_path[i] = false;
                    }
                }
            }
        }
    }

    fn step(&mut self, rng: &mut SimRng) {
        let area = self.width * self.height;
        if area == 0 {
            return;
        }
        if self.phase == Phase::Generating {
            self.generate((area / 50).clamp(3, 5), rng);
        }
        if self.phase == Phase::Solving {
            self.solve((area / 100).clamp(2, 3));
        }
        if self.phase == Phase::Done {
            self.done_ticks += 1;
            if self.done_ticks > DONE_TICKS {
                debug!("regenerating maze");
                *self = Self::new(self.columns, self.rows);
            }
        }
    }

    fn paint(&self, grid: &mut Grid) {
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = (x, y);
                let i = self.index(pos);
                let (ch, style) = if self.phase == Phase::Generating && self.cursor == Some(pos)
                {
                    ('█', GEN_CURSOR)
                } else if self.on_path[i] {
                    ('·', PATH)
                } else if self.phase == Phase::Solving && self.solve_cursor == Some(pos) {
                    ('·', SOLVE_CURSOR)
                } else if self.carved[i] {
                    continue;
                } else {
                    ('█', WALL)
                };
                grid.put_char((x * 2) as u16, y as u16, ch, style);
            }
        }
    }
}

pub struct Maze {
    board: Option<Labyrinth>,
}

impl Maze {
    pub fn new() -> Self {
        Self { board: None }
    }

    pub fn board(&self) -> Option<&Labyrinth> {
        self.board.as_ref()
    }
}

impl Default for Maze {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Maze {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);

        if !matches!(&self.board, Some(b) if b.columns == tick.columns && b.rows == tick.rows) {
            self.board = Some(Labyrinth::new(tick.columns, tick.rows));
        }
        let Some(board) = self.board.as_mut() else {
            return;
        };
        board.step(rng);
        board.paint(grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn carve_fully(tick: Tick, seed: u64) -> Maze {
        let mut sim = Maze::new();
        let mut rng = SimRng::new(seed);
        let mut grid = Grid::default();
        for frame in 0..10_000 {
            sim.advance(tick.with_frame(frame), &mut rng, &mut grid);
            if sim.board().unwrap().phase() != Phase::Generating {
                return sim;
            }
        }
        panic!("maze never finished carving");
    }

    #[test]
    fn generation_uses_half_width_cells() {
        let sim = carve_fully(Tick::new(41, 22, 0, 0), 1);
        let b = sim.board().unwrap();
        assert_eq!((b.width(), b.height()), (20, 10));
    }

    #[test]
    fn step_budgets_scale_with_area() {
        // 20 x 10 = 200 cells: four carve steps, each pushing one cell.
        let mut sim = Maze::new();
        let mut rng = SimRng::new(1);
        sim.render(Tick::new(40, 21, 0, 0), &mut rng);
        assert_eq!(sim.board().unwrap().carve_stack.len(), 5);
    }

    #[test]
    fn tiny_maze_solves_immediately() {
        let mut sim = Maze::new();
        let mut rng = SimRng::new(1);
        sim.render(Tick::new(2, 3, 0, 0), &mut rng);
        let b = sim.board().unwrap();
        assert_eq!((b.width(), b.height()), (1, 1));
        assert_eq!(b.phase(), Phase::Done);
        assert_eq!(b.path(), &[(0, 0)]);
    }

    #[test]
    fn degenerate_maze_renders_blank() {
        let mut sim = Maze::new();
        let mut rng = SimRng::new(1);
        for frame in 0..5 {
            let g = sim.render(Tick::new(1, 2, frame, 0), &mut rng);
            assert_eq!((g.width(), g.height()), (1, 2));
            assert!(g.cells().iter().all(|c| c.is_blank()));
        }
    }

    #[test]
    fn render_priority_shows_cursor_over_walls() {
        let mut sim = Maze::new();
        let mut rng = SimRng::new(1);
        let g = sim.render(Tick::new(40, 21, 0, 0), &mut rng);
        let b = sim.board().unwrap();
        let (cx, cy) = b.cursor.unwrap();
        let cursor = g.get((cx * 2) as u16, cy as u16).unwrap();
        assert_eq!((cursor.ch, cursor.style), ('█', GEN_CURSOR));
        // Far corner is still uncarved.
        let wall = g.get(38, 9).unwrap();
        assert_eq!((wall.ch, wall.style), ('█', WALL));
        assert!(g.get(39, 9).unwrap().is_blank());
    }

    #[test]
    fn resize_regenerates() {
        let mut sim = Maze::new();
        let mut rng = SimRng::new(1);
        for frame in 0..10 {
            sim.render(Tick::new(80, 24, frame, 0), &mut rng);
        }
        sim.render(Tick::new(40, 12, 10, 0), &mut rng);
        let b = sim.board().unwrap();
        assert_eq!((b.width(), b.height()), (20, 5));
        assert_eq!(b.phase(), Phase::Generating);
    }
}
