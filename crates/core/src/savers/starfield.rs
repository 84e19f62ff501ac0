//! Stars projected toward the viewer.

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "starfield",
    description: "3D stars flying toward the viewer",
    fps: Some(20),
};

const STAR_COUNT: usize = 150;
const FAR_Z: f32 = 100.0;
const SPREAD: f32 = 200.0;
const SPEED: f32 = 1.5;
const SCALE_X: f32 = 40.0;
const SCALE_Y: f32 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Star {
    x: f32,
    y: f32,
    z: f32,
}

impl Star {
    fn random(rng: &mut SimRng) -> Self {
        Self {
            x: (rng.unit() - 0.5) * SPREAD,
            y: (rng.unit() - 0.5) * SPREAD,
            z: rng.unit() * FAR_Z,
        }
    }
}

/// Glyph and style for a star at the given depth (0 = far, 1 = at the viewer).
fn star_look(depth: f32) -> (char, CellStyle) {
    if depth > 0.8 {
        ('@', CellStyle::fg(Rgb::WHITE).bold())
    } else if depth > 0.5 {
        ('*', CellStyle::fg(Rgb::hex(0xcccccc)))
    } else if depth > 0.2 {
        ('+', CellStyle::fg(Rgb::hex(0x888888)))
    } else {
        ('.', CellStyle::fg(Rgb::hex(0x555555)))
    }
}

pub struct Starfield {
    stars: Option<Vec<Star>>,
}

impl Starfield {
    pub fn new() -> Self {
        Self { stars: None }
    }
}

impl Default for Starfield {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Starfield {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);
        let stars = self
            .stars
            .get_or_insert_with(|| (0..STAR_COUNT).map(|_| Star::random(rng)).collect());

        let cx = (tick.columns / 2) as f32;
        let cy = (tick.rows / 2) as f32;
        let height = tick.usable_rows() as i32;

        for star in stars.iter_mut() {
            star.z -= SPEED;
            if star.z <= 0.0 {
                *star = Star {
                    z: FAR_Z,
                    ..Star::random(rng)
                };
                continue;
            }

            let sx = (cx + star.x / star.z * SCALE_X).floor() as i32;
            let sy = (cy + star.y / star.z * SCALE_Y).floor() as i32;
            if sy >= height {
                continue;
            }

            let (ch, style) = star_look(1.0 - star.z / FAR_Z);
            grid.put_char_signed(sx, sy, ch, style);
        }
    }
}
