//! Falling columns of katakana and latin glyphs.

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "matrix-rain",
    description: "Falling green katakana and latin characters",
    fps: Some(12),
};

/// Half-width forms: one terminal cell each, like every other grid glyph.
const KATAKANA: &str = "ｱｲｳｴｵｶｷｸｹｺｻｼｽｾｿﾀﾁﾂﾃﾄﾅﾆﾇﾈﾉﾊﾋﾌﾍﾎﾏﾐﾑﾒﾓﾔﾕﾖﾗﾘﾙﾚﾛﾜｦﾝ";
const LATIN: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Chance per tick that a finished column starts a new drop.
const RESPAWN_CHANCE: f32 = 0.02;
/// Chance per tick that a drop swaps one of its glyphs.
const MUTATE_CHANCE: f32 = 0.1;
/// Extra glyphs kept beyond the screen height so short resizes still index in range.
const GLYPH_SLACK: usize = 30;

const HEAD: CellStyle = CellStyle::fg(Rgb::WHITE).bold();
const NECK: CellStyle = CellStyle::fg(Rgb::hex(0x00ff00));

#[derive(Debug, Clone)]
struct Drop {
    y: f32,
    speed: f32,
    length: i32,
    glyphs: Vec<char>,
}

impl Drop {
    fn head(&self) -> i32 {
        self.y.floor() as i32
    }

    fn finished(&self, rows: u16) -> bool {
        self.head() - self.length > rows as i32
    }
}

/// One optional drop per terminal column.
pub struct MatrixRain {
    alphabet: Vec<char>,
    drops: Vec<Option<Drop>>,
}

impl MatrixRain {
    pub fn new() -> Self {
        Self {
            alphabet: KATAKANA.chars().chain(LATIN.chars()).collect(),
            drops: Vec::new(),
        }
    }

    fn spawn(&self, rows: u16, rng: &mut SimRng) -> Drop {
        let glyphs = (0..rows as usize + GLYPH_SLACK)
            .map(|_| rng.pick(&self.alphabet))
            .collect();
        Drop {
            y: -(rng.below(rows.max(1) as usize) as f32),
            speed: rng.range_f32(0.3, 1.0),
            length: 5 + rng.below(20) as i32,
            glyphs,
        }
    }
}

impl Default for MatrixRain {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for MatrixRain {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);
        let height = tick.usable_rows();

        // Columns beyond the current width are forgotten on resize.
        self.drops.resize_with(tick.columns as usize, || None);

        for x in 0..self.drops.len() {
            let respawn = match &self.drops[x] {
                None => true,
                Some(drop) => drop.finished(tick.rows) && rng.chance(RESPAWN_CHANCE),
            };
            if respawn {
                self.drops[x] = Some(self.spawn(tick.rows, rng));
            }
        }

        for (x, drop) in self.drops.iter().enumerate() {
            let Some(drop) = drop else { continue };
            let head = drop.head();
            for y in 0..height {
                let dist = head - y as i32;
                if dist < 0 || dist >= drop.length {
                    continue;
                }
                let ch = drop.glyphs[y as usize % drop.glyphs.len()];
                let style = match dist {
                    0 => HEAD,
                    1 | 2 => NECK,
                    _ => {
                        let brightness = (1.0 - dist as f32 / drop.length as f32).max(0.0);
                        CellStyle::fg(Rgb::new(0, (80.0 + brightness * 175.0) as u8, 0))
                    }
                };
                grid.put_char(x as u16, y, ch, style);
            }
        }

        for drop in self.drops.iter_mut().flatten() {
            drop.y += drop.speed;
            if rng.chance(MUTATE_CHANCE) {
                let i = rng.below(drop.glyphs.len());
                drop.glyphs[i] = rng.pick(&self.alphabet);
            }
        }
    }
}
