//! Fish, bubbles and seaweed over a sandy floor.

use std::f32::consts::TAU;

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "aquarium",
    description: "Fish, bubbles, and seaweed in an ASCII aquarium",
    fps: Some(6),
};

const FISH_RIGHT: [&str; 3] = ["><>", "><))'>", ">°)))><"];
const FISH_LEFT: [&str; 3] = ["<><", "<'((<>", "><((((°>"];
const FISH_COLORS: [Rgb; 5] = [Rgb::CYAN, Rgb::YELLOW, Rgb::MAGENTA, Rgb::GREEN, Rgb::RED];
const BUBBLE_GLYPHS: [char; 2] = ['°', 'o'];
const BUBBLE_COUNT: usize = 15;
/// Fish re-enter from this far past the left edge.
const OFFSCREEN_X: f32 = -10.0;

const WEED: CellStyle = CellStyle::fg(Rgb::GREEN);
const BUBBLE: CellStyle = CellStyle::fg(Rgb::CYAN);
const SAND: CellStyle = CellStyle::fg(Rgb::YELLOW);

#[derive(Debug, Clone, Copy)]
struct Fish {
    x: f32,
    y: i32,
    dx: f32,
    shape: usize,
    color: Rgb,
}

impl Fish {
    fn sprite(&self) -> &'static str {
        if self.dx > 0.0 {
            FISH_RIGHT[self.shape]
        } else {
            FISH_LEFT[self.shape]
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct Bubble {
    x: i32,
    y: f32,
    speed: f32,
}

#[derive(Debug, Clone, Copy)]
struct Seaweed {
    x: i32,
    phase: f32,
}

struct Tank {
    fish: Vec<Fish>,
    bubbles: Vec<Bubble>,
    weeds: Vec<Seaweed>,
}

/// Swimming rows are `1..=fish_rows(rows)`, clear of the weeds and floor.
fn swim_row(rows: u16, rng: &mut SimRng) -> i32 {
    rng.below((rows as usize).saturating_sub(7).max(1)) as i32 + 1
}

impl Tank {
    fn new(columns: u16, rows: u16, rng: &mut SimRng) -> Self {
        let fish_count = (8.0 + columns as f32 / 80.0 * 4.0) as usize;
        let fish = (0..fish_count)
            .map(|_| {
                let speed = rng.range_f32(0.5, 2.0);
                Fish {
                    x: rng.below(columns as usize) as f32,
                    y: swim_row(rows, rng),
                    dx: if rng.coin() { speed } else { -speed },
                    shape: rng.below(FISH_RIGHT.len()),
                    color: rng.pick(&FISH_COLORS),
                }
            })
            .collect();
        let bubbles = (0..BUBBLE_COUNT)
            .map(|_| Bubble {
                x: rng.below(columns as usize) as i32,
                y: rng.below(rows.saturating_sub(1) as usize) as f32,
                speed: rng.range_f32(0.2, 0.5),
            })
            .collect();
        let weeds = (0..rng.between(6, 10))
            .map(|_| Seaweed {
                x: rng.below(columns as usize) as i32,
                phase: rng.range_f32(0.0, TAU),
            })
            .collect();
        Self {
            fish,
            bubbles,
            weeds,
        }
    }

    /// Pull entities back inside a shrunken tank.
    fn clamp(&mut self, columns: u16, rows: u16, rng: &mut SimRng) {
        let max_row = (rows as i32 - 7).max(1);
        let right = columns as f32;
        for f in &mut self.fish {
            if f.y > max_row {
                f.y = swim_row(rows, rng);
            }
            // Stranded fish re-enter from the edge they swim in from.
            if f.x > right {
                f.x = if f.dx > 0.0 { OFFSCREEN_X } else { right - 1.0 };
            }
        }
        for w in &mut self.weeds {
            if w.x >= columns as i32 {
                w.x = rng.below(columns as usize) as i32;
            }
        }
        let bottom = rows as f32 - 2.0;
        for b in &mut self.bubbles {
            if b.x >= columns as i32 {
                b.x = rng.below(columns as usize) as i32;
            }
            b.y = b.y.min(bottom);
        }
    }

    fn swim(&mut self, columns: u16, rows: u16, rng: &mut SimRng) {
        let right = columns as f32;
        for f in &mut self.fish {
            f.x += f.dx;
            if f.dx > 0.0 && f.x >= right {
                f.x = OFFSCREEN_X;
                f.y = swim_row(rows, rng);
            } else if f.dx < 0.0 && f.x < OFFSCREEN_X {
                f.x = right;
                f.y = swim_row(rows, rng);
            }
        }
        for b in &mut self.bubbles {
            b.y -= b.speed;
            if b.y < 0.0 {
                b.y = rows as f32 - 2.0;
                b.x = rng.below(columns as usize) as i32;
            }
        }
    }
}

pub struct Aquarium {
    tank: Option<Tank>,
}

impl Aquarium {
    pub fn new() -> Self {
        Self { tank: None }
    }
}

impl Default for Aquarium {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Aquarium {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);
        let (columns, rows) = (tick.columns, tick.rows);
        if columns == 0 || rows == 0 {
            return;
        }

        let tank = self.tank.get_or_insert_with(|| Tank::new(columns, rows, rng));
        tank.clamp(columns, rows, rng);
        tank.swim(columns, rows, rng);

        // Water is everything above the floor row.
        let water = rows as i32 - 1;

        for weed in &tank.weeds {
            let height = rng.between(3, 6);
            for i in 0..height {
                let y = rows as i32 - 2 - i;
                if y < water {
                    let sway = (weed.phase + tick.frame as f32 * 0.1 + i as f32 * 0.3).sin();
                    grid.put_char_signed(weed.x, y, if sway > 0.0 { '}' } else { '{' }, WEED);
                }
            }
        }

        for b in &tank.bubbles {
            let y = b.y.floor() as i32;
            if y < water {
                grid.put_char_signed(b.x, y, rng.pick(&BUBBLE_GLYPHS), BUBBLE);
            }
        }

        for f in &tank.fish {
            if f.y >= water {
                continue;
            }
            grid.put_str(f.x.floor() as i32, f.y, f.sprite(), CellStyle::fg(f.color));
        }

        for x in 0..columns {
            grid.put_char(x, rows - 1, '~', SAND);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn floor_fills_the_last_row() {
        let mut sim = Aquarium::new();
        let mut rng = SimRng::new(4);
        let g = sim.render(Tick::new(50, 20, 0, 0), &mut rng);
        assert!(g.row(19).unwrap().iter().all(|c| c.ch == '~'));
    }

    #[test]
    fn population_is_stable_over_time() {
        let mut sim = Aquarium::new();
        let mut rng = SimRng::new(4);
        let mut grid = Grid::default();
        for frame in 0..300 {
            sim.advance(Tick::new(80, 24, frame, 0), &mut rng, &mut grid);
        }
        let tank = sim.tank.as_ref().unwrap();
        assert_eq!(tank.fish.len(), 12);
        assert_eq!(tank.bubbles.len(), BUBBLE_COUNT);
        assert!((6..=10).contains(&tank.weeds.len()));
        for f in &tank.fish {
            assert!(f.x >= OFFSCREEN_X - 2.0 && f.x <= 82.0);
            assert!((1..=17).contains(&f.y));
        }
        for b in &tank.bubbles {
            assert!(b.y >= 0.0 && b.y <= 22.0);
        }
    }

    #[test]
    fn shrinking_keeps_fish_near_the_glass() {
        let mut sim = Aquarium::new();
        let mut rng = SimRng::new(4);
        sim.render(Tick::new(200, 40, 0, 0), &mut rng);
        assert!(sim.tank.as_ref().unwrap().fish.iter().any(|f| f.x > 20.0));

        for frame in 1..50 {
            sim.render(Tick::new(20, 12, frame, 0), &mut rng);
            for f in &sim.tank.as_ref().unwrap().fish {
                assert!(
                    (OFFSCREEN_X..=20.0).contains(&f.x),
                    "fish at {} after shrink, frame {frame}",
                    f.x
                );
                assert!((1..=5).contains(&f.y));
            }
        }
    }

    #[test]
    fn tiny_tank_does_not_panic() {
        let mut sim = Aquarium::new();
        let mut rng = SimRng::new(4);
        for (frame, (w, h)) in [(80, 24), (3, 2), (1, 1), (20, 5)].into_iter().enumerate() {
            let g = sim.render(Tick::new(w, h, frame as u64, 0), &mut rng);
            assert_eq!((g.width(), g.height()), (w, h));
        }
    }
}
