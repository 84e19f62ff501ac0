//! Rockets that climb and burst into falling sparks.

use std::f32::consts::TAU;

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "fireworks",
    description: "Colorful firework rockets and explosions",
    fps: Some(15),
};

/// Chance per tick to launch a rocket.
pub const LAUNCH_CHANCE: f32 = 0.03;
const GRAVITY: f32 = 0.05;

const COLORS: [Rgb; 7] = [
    Rgb::hex(0xff0000),
    Rgb::hex(0xffff00),
    Rgb::hex(0x00ff00),
    Rgb::hex(0x00ffff),
    Rgb::hex(0xff00ff),
    Rgb::hex(0xff8800),
    Rgb::hex(0xffffff),
];

#[derive(Debug, Clone, Copy)]
struct Rocket {
    x: f32,
    y: f32,
    target_y: f32,
    speed: f32,
    color: Rgb,
}

#[derive(Debug, Clone, Copy)]
struct Spark {
    x: f32,
    y: f32,
    vx: f32,
    vy: f32,
    life: u32,
    max_life: u32,
    color: Rgb,
}

impl Spark {
    /// Glyph for the remaining share of life.
    fn glyph(&self) -> char {
        let ratio = self.life as f32 / self.max_life as f32;
        if ratio > 0.75 {
            '★'
        } else if ratio > 0.5 {
            '*'
        } else if ratio > 0.25 {
            '·'
        } else {
            '.'
        }
    }
}

pub struct Fireworks {
    rockets: Vec<Rocket>,
    sparks: Vec<Spark>,
}

impl Fireworks {
    pub fn new() -> Self {
        Self {
            rockets: Vec::new(),
            sparks: Vec::new(),
        }
    }

    /// Live entity counts: `(rockets, sparks)`.
    pub fn population(&self) -> (usize, usize) {
        (self.rockets.len(), self.sparks.len())
    }

    fn burst(sparks: &mut Vec<Spark>, rocket: &Rocket, rng: &mut SimRng) {
        let count = rng.between(20, 30);
        for i in 0..count {
            let angle = TAU * i as f32 / count as f32 + rng.range_f32(0.0, 0.5);
            let speed = rng.range_f32(0.5, 2.0);
            let max_life = rng.between(15, 25) as u32;
            sparks.push(Spark {
                x: rocket.x,
                y: rocket.y,
                vx: angle.cos() * speed,
                vy: angle.sin() * speed,
                life: max_life,
                max_life,
                color: rocket.color,
            });
        }
    }
}

impl Default for Fireworks {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Fireworks {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);
        let (columns, rows) = (tick.columns, tick.rows);

        if rng.chance(LAUNCH_CHANCE) && columns > 0 && rows > 0 {
            self.rockets.push(Rocket {
                x: rng.below(columns as usize) as f32,
                y: rows as f32 - 1.0,
                target_y: rng.below((rows as f32 * 0.4) as usize) as f32 + 1.0,
                speed: rng.range_f32(0.5, 1.0),
                color: rng.pick(&COLORS),
            });
        }

        let sparks = &mut self.sparks;
        self.rockets.retain_mut(|rocket| {
            rocket.y -= rocket.speed;
            if rocket.y <= rocket.target_y {
                Self::burst(sparks, rocket, rng);
                false
            } else {
                true
            }
        });

        self.sparks.retain_mut(|s| {
            s.x += s.vx;
            s.y += s.vy;
            s.vy += GRAVITY;
            s.life -= 1;
            s.life > 0
        });

        for r in &self.rockets {
            let (x, y) = (r.x.floor() as i32, r.y.floor() as i32);
            grid.put_char_signed(x, y, '|', CellStyle::fg(r.color));
        }
        for s in &self.sparks {
            let (x, y) = (s.x.floor() as i32, s.y.floor() as i32);
            grid.put_char_signed(x, y, s.glyph(), CellStyle::fg(s.color));
        }
    }
}
