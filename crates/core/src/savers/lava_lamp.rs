//! Metaball blobs drifting inside a lamp-shaped band.

use std::f32::consts::TAU;

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "lava-lamp",
    description: "Colorful metaball lava lamp blobs",
    fps: Some(10),
};

pub const BLOB_COUNT: usize = 7;
/// Field strength above which a cell is solid.
pub const SOLID: f32 = 1.0;
/// Field strength above which a cell glows faintly.
pub const FAINT: f32 = 0.6;

const COLORS: [Rgb; 8] = [
    Rgb::hex(0xff0066),
    Rgb::hex(0xff6600),
    Rgb::hex(0xffcc00),
    Rgb::hex(0x00ff66),
    Rgb::hex(0x0066ff),
    Rgb::hex(0xcc00ff),
    Rgb::hex(0xff0099),
    Rgb::hex(0x00ffcc),
];

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Blob {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub vy: f32,
    pub phase: f32,
    pub color: Rgb,
}

/// Horizontal extent `[left, right]` of the lamp for a screen width.
pub fn lamp_band(columns: u16) -> (f32, f32) {
    let half = (columns as f32 * 0.4) as i32 / 2;
    let center = columns as i32 / 2;
    ((center - half) as f32, (center + half) as f32)
}

/// Metaball field at `(x, y)` and the blob contributing most to it.
///
/// Vertical distance counts double to make up for tall terminal cells.
/// Blobs sitting on the sample point are skipped.
pub fn field(blobs: &[Blob], x: f32, y: f32) -> (f32, Option<&Blob>) {
    let mut total = 0.0;
    let mut best: Option<(f32, &Blob)> = None;
    for blob in blobs {
        let dx = x - blob.x;
        let dy = 2.0 * (y - blob.y);
        let dist_sq = dx * dx + dy * dy;
        if dist_sq < 0.01 {
            continue;
        }
        let contribution = blob.radius * blob.radius / dist_sq;
        total += contribution;
        if best.map_or(true, |(c, _)| contribution > c) {
            best = Some((contribution, blob));
        }
    }
    (total, best.map(|(_, b)| b))
}

pub struct LavaLamp {
    blobs: Option<[Blob; BLOB_COUNT]>,
}

impl LavaLamp {
    pub fn new() -> Self {
        Self { blobs: None }
    }

    pub fn blobs(&self) -> &[Blob] {
        self.blobs.as_ref().map(|b| b.as_slice()).unwrap_or_default()
    }
}

impl Default for LavaLamp {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for LavaLamp {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);
        let (left, right) = lamp_band(tick.columns);
        let bottom = tick.usable_rows() as f32;

        let blobs = self.blobs.get_or_insert_with(|| {
            std::array::from_fn(|i| Blob {
                x: left + rng.unit() * (right - left),
                y: rng.unit() * bottom,
                radius: rng.range_f32(2.0, 5.0),
                vy: rng.range_f32(-0.2, 0.2),
                phase: rng.range_f32(0.0, TAU),
                color: COLORS[i % COLORS.len()],
            })
        });

        for blob in blobs.iter_mut() {
            blob.y += blob.vy;
            if blob.y <= 0.0 {
                blob.y = 0.0;
                blob.vy = blob.vy.abs();
            } else if blob.y >= bottom {
                blob.y = bottom;
                blob.vy = -blob.vy.abs();
            }
            blob.x += blob.phase.sin() * 0.3;
            blob.phase += 0.05;
            blob.x = blob.x.max(left).min(right);
        }

        for y in 0..tick.usable_rows() {
            for x in 0..tick.columns {
                let (strength, dominant) = field(&blobs[..], x as f32, y as f32);
                let Some(blob) = dominant else {
                    continue;
                };
                if strength > SOLID {
                    grid.put_char(x, y, '█', CellStyle::fg(blob.color));
                } else if strength > FAINT {
                    grid.put_char(x, y, '░', CellStyle::fg(blob.color).dim());
                }
            }
        }
    }
}
