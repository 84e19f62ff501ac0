//! A bonsai tree grown one step per tick on a persistent canvas.
//!
//! Growth is a work-list of nodes. Each live node steps along its direction,
//! stamps its glyph, loses one unit of life and may spawn children depending
//! on how much of the trunk's life budget it has left. Once the list empties
//! the tree is left on screen for a while and then replanted.

use tracing::debug;

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{Cell, CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "bonsai",
    description: "Procedurally growing bonsai tree",
    fps: Some(6),
};

/// Ticks a finished tree stays up before it is replanted.
pub const DONE_TICKS: u32 = 60;
const POT_WIDTH: i32 = 8;

const WOOD: Rgb = Rgb::hex(0x8b4513);
const LEAF_GREEN: Rgb = Rgb::hex(0x228b22);
const LEAF_PINK: Rgb = Rgb::hex(0xff69b4);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum NodeKind {
    Trunk,
    Branch,
    Leaves,
}

#[derive(Debug, Clone, Copy)]
struct Node {
    x: i32,
    y: i32,
    dx: i32,
    dy: i32,
    life: i32,
    kind: NodeKind,
}

impl Node {
    fn glyph(&self, rng: &mut SimRng) -> Cell {
        match self.kind {
            NodeKind::Trunk => CellStyle::fg(WOOD).into_cell('║'),
            NodeKind::Branch => {
                let ch = match self.dx.signum() {
                    1 => '╱',
                    -1 => '╲',
                    _ => '│',
                };
                CellStyle::fg(WOOD).into_cell(ch)
            }
            NodeKind::Leaves => {
                if rng.coin() {
                    CellStyle::fg(LEAF_GREEN).into_cell('&')
                } else {
                    CellStyle::fg(LEAF_PINK).into_cell('%')
                }
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Growing,
    Done,
}

struct Garden {
    columns: u16,
    rows: u16,
    /// Usable rows; the last terminal row stays blank.
    height: u16,
    canvas: Vec<Option<Cell>>,
    nodes: Vec<Node>,
    spare: Vec<Node>,
    phase: Phase,
    done_ticks: u32,
}

impl Garden {
    fn new(columns: u16, rows: u16) -> Self {
        let height = rows.saturating_sub(1);
        let trunk = Node {
            x: columns as i32 / 2,
            y: rows as i32 - 4,
            dx: 0,
            dy: -1,
            life: (rows as f32 * 0.4) as i32,
            kind: NodeKind::Trunk,
        };
        Self {
            columns,
            rows,
            height,
            canvas: vec![None; columns as usize * height as usize],
            nodes: vec![trunk],
            spare: Vec::new(),
            phase: Phase::Growing,
            done_ticks: 0,
        }
    }

    fn grow(&mut self, rng: &mut SimRng) {
        let (w, h) = (self.columns as i32, self.height as i32);
        let budget = self.rows as f32 * 0.4;
        let mut next = std::mem::take(&mut self.spare);
        next.clear();

        for node in self.nodes.drain(..) {
            if node.life <= 0 {
                continue;
            }
            let mut x = node.x + node.dx;
            let y = node.y + node.dy;
            if node.kind == NodeKind::Trunk {
                let wobble = rng.range_f32(-0.2, 0.2);
                if wobble > 0.15 {
                    x += 1;
                } else if wobble < -0.15 {
                    x -= 1;
                }
            }
            if x < 0 || x >= w || y < 0 || y >= h {
                continue;
            }

            self.canvas[(y * w + x) as usize] = Some(node.glyph(rng));

            let life = node.life - 1;
            let left = life as f32 / budget;
            next.push(Node { x, y, life, ..node });

            if node.kind == NodeKind::Trunk && left < 0.6 && rng.chance(0.15) {
                next.push(Node {
                    x,
                    y,
                    dx: rng.sign(),
                    dy: -1,
                    life: (self.rows as f32 * 0.2) as i32,
                    kind: NodeKind::Branch,
                });
            }
            if node.kind == NodeKind::Branch && left < 0.5 && rng.chance(0.1) {
                next.push(Node {
                    x,
                    y,
                    dx: rng.sign(),
                    dy: node.dy,
                    life: (self.rows as f32 * 0.15) as i32,
                    kind: NodeKind::Branch,
                });
            }
            if node.kind != NodeKind::Leaves && left < 0.3 && rng.chance(0.2) {
                next.push(Node {
                    x,
                    y,
                    dx: rng.sign(),
                    dy: if rng.coin() { -1 } else { 0 },
                    life: (self.rows as f32 * 0.1) as i32,
                    kind: NodeKind::Leaves,
                });
            }
        }

        self.spare = std::mem::replace(&mut self.nodes, next);
        if self.nodes.is_empty() {
            debug!(columns = self.columns, rows = self.rows, "bonsai finished growing");
            self.phase = Phase::Done;
            self.done_ticks = 0;
        }
    }

    fn paint(&self, grid: &mut Grid) {
        let w = self.columns as usize;
        for (i, cell) in self.canvas.iter().enumerate() {
            if let Some(cell) = cell {
                grid.set((i % w) as u16, (i / w) as u16, *cell);
            }
        }

        // The pot sits on the bottom three usable rows.
        let style = CellStyle::fg(WOOD);
        let top = self.height as i32 - 3;
        let left = self.columns as i32 / 2 - POT_WIDTH / 2;
        for i in 0..POT_WIDTH {
            let x = left + i;
            let column = match i {
                0 => ['╔', '║', '╚'],
                i if i == POT_WIDTH - 1 => ['╗', '║', '╝'],
                _ => ['═', ' ', '═'],
            };
            for (dy, ch) in column.into_iter().enumerate() {
                grid.put_char_signed(x, top + dy as i32, ch, style);
            }
        }
    }
}

pub struct Bonsai {
    garden: Option<Garden>,
}

impl Bonsai {
    pub fn new() -> Self {
        Self { garden: None }
    }

    pub fn phase(&self) -> Option<Phase> {
        self.garden.as_ref().map(|g| g.phase)
    }

    /// Nodes still growing.
    pub fn live_nodes(&self) -> usize {
        self.garden.as_ref().map_or(0, |g| g.nodes.len())
    }
}

impl Default for Bonsai {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Bonsai {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);

        if !matches!(&self.garden, Some(g) if g.columns == tick.columns && g.rows == tick.rows) {
            self.garden = Some(Garden::new(tick.columns, tick.rows));
        }
        let Some(garden) = self.garden.as_mut() else {
            return;
        };

        match garden.phase {
            Phase::Growing => garden.grow(rng),
            Phase::Done => {
                garden.done_ticks += 1;
                if garden.done_ticks > DONE_TICKS {
                    debug!("replanting bonsai");
                    *garden = Garden::new(tick.columns, tick.rows);
                }
            }
        }
        garden.paint(grid);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_until_done(sim: &mut Bonsai, rng: &mut SimRng, tick: Tick) -> u64 {
        let mut grid = Grid::default();
        for frame in 0..1000 {
            sim.advance(tick.with_frame(frame), rng, &mut grid);
            if sim.phase() == Some(Phase::Done) {
                return frame;
            }
        }
        panic!("tree never finished growing");
    }

    #[test]
    fn tree_finishes_and_is_replanted() {
        let mut sim = Bonsai::new();
        let mut rng = SimRng::new(12);
        let tick = Tick::new(80, 24, 0, 0);
        let done_at = run_until_done(&mut sim, &mut rng, tick);

        let mut grid = Grid::default();
        for i in 1..=DONE_TICKS as u64 {
            sim.advance(tick.with_frame(done_at + i), &mut rng, &mut grid);
            assert_eq!(sim.phase(), Some(Phase::Done));
        }
        sim.advance(tick.with_frame(done_at + 61), &mut rng, &mut grid);
        assert_eq!(sim.phase(), Some(Phase::Growing));
        assert_eq!(sim.live_nodes(), 1);
    }

    #[test]
    fn canvas_accumulates_growth() {
        let mut sim = Bonsai::new();
        let mut rng = SimRng::new(3);
        let tick = Tick::new(60, 30, 0, 0);
        let mut grid = Grid::default();
        let mut last = 0;
        for frame in 0..8 {
            sim.advance(tick.with_frame(frame), &mut rng, &mut grid);
            let drawn = grid.filled();
            assert!(drawn >= last);
            last = drawn;
        }
        // Pot rows start at 26; anything above is growth.
        let above_pot = &grid.cells()[..26 * 60];
        assert!(above_pot.iter().any(|c| c.ch == '║' && c.style.fg == WOOD));
    }

    #[test]
    fn pot_sits_above_the_reserved_row() {
        let mut sim = Bonsai::new();
        let mut rng = SimRng::new(3);
        let g = sim.render(Tick::new(40, 20, 0, 0), &mut rng);
        assert_eq!(g.get(16, 16).unwrap().ch, '╔');
        assert_eq!(g.get(23, 16).unwrap().ch, '╗');
        assert_eq!(g.get(16, 18).unwrap().ch, '╚');
        assert_eq!(g.get(20, 18).unwrap().ch, '═');
        assert!(g.row(19).unwrap().iter().all(|c| c.is_blank()));
    }

    #[test]
    fn resize_replants() {
        let mut sim = Bonsai::new();
        let mut rng = SimRng::new(3);
        let mut grid = Grid::default();
        for frame in 0..5 {
            sim.advance(Tick::new(80, 24, frame, 0), &mut rng, &mut grid);
        }
        sim.advance(Tick::new(40, 12, 5, 0), &mut rng, &mut grid);
        assert_eq!((grid.width(), grid.height()), (40, 12));
        assert_eq!(sim.phase(), Some(Phase::Growing));
    }

    #[test]
    fn tiny_screens_finish_immediately() {
        let mut sim = Bonsai::new();
        let mut rng = SimRng::new(3);
        let g = sim.render(Tick::new(3, 2, 0, 0), &mut rng);
        assert_eq!((g.width(), g.height()), (3, 2));
        assert_eq!(sim.phase(), Some(Phase::Done));
    }
}
