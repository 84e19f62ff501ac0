//! Two bouncing quadrilaterals with fading trails.

use arrayvec::ArrayVec;

use crate::raster;
use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "mystify",
    description: "Bouncing geometric shapes like the Windows classic",
    fps: Some(15),
};

pub const TRAIL_LENGTH: usize = 8;
const VERTICES: usize = 4;
const GLYPH: char = '*';

const CYAN_SCHEME: [Rgb; 4] = [Rgb::BRIGHT_CYAN, Rgb::CYAN, Rgb::BRIGHT_CYAN, Rgb::CYAN];
const MAGENTA_SCHEME: [Rgb; 4] = [
    Rgb::BRIGHT_MAGENTA,
    Rgb::MAGENTA,
    Rgb::BRIGHT_MAGENTA,
    Rgb::MAGENTA,
];

#[derive(Debug, Clone, Copy, PartialEq)]
struct Vertex {
    x: f32,
    y: f32,
    dx: f32,
    dy: f32,
}

impl Vertex {
    fn random(w: f32, h: f32, rng: &mut SimRng) -> Self {
        Self {
            x: rng.range_f32(0.0, w),
            y: rng.range_f32(0.0, h),
            dx: rng.range_f32(0.5, 1.5) * rng.sign() as f32,
            dy: rng.range_f32(0.5, 1.5) * rng.sign() as f32,
        }
    }

    /// Move, then reflect and clamp against `[0, w-1] x [0, h-1]`.
    fn step(&mut self, w: f32, h: f32) {
        self.x += self.dx;
        self.y += self.dy;
        if self.x <= 0.0 || self.x >= w - 1.0 {
            self.dx = -self.dx;
            self.x = self.x.clamp(0.0, w - 1.0);
        }
        if self.y <= 0.0 || self.y >= h - 1.0 {
            self.dy = -self.dy;
            self.y = self.y.clamp(0.0, h - 1.0);
        }
    }
}

type Outline = [(i32, i32); VERTICES];

#[derive(Debug, Clone)]
struct Polygon {
    vertices: [Vertex; VERTICES],
    trail: ArrayVec<Outline, TRAIL_LENGTH>,
}

impl Polygon {
    fn random(w: f32, h: f32, rng: &mut SimRng) -> Self {
        Self {
            vertices: std::array::from_fn(|_| Vertex::random(w, h, rng)),
            trail: ArrayVec::new(),
        }
    }

    fn step(&mut self, w: f32, h: f32) {
        for v in &mut self.vertices {
            v.step(w, h);
        }
        if self.trail.is_full() {
            self.trail.remove(0);
        }
        self.trail
            .push(self.vertices.map(|v| (v.x.floor() as i32, v.y.floor() as i32)));
    }

    fn draw(&self, grid: &mut Grid, height: i32, scheme: &[Rgb; 4]) {
        for (age, outline) in self.trail.iter().enumerate() {
            let style = CellStyle::fg(scheme[age % scheme.len()]);
            for i in 0..VERTICES {
                let (x0, y0) = outline[i];
                let (x1, y1) = outline[(i + 1) % VERTICES];
                raster::line(x0, y0, x1, y1, |x, y| {
                    if y < height {
                        grid.put_char_signed(x, y, GLYPH, style);
                    }
                });
            }
        }
    }
}

pub struct Mystify {
    polygons: Option<[Polygon; 2]>,
}

impl Mystify {
    pub fn new() -> Self {
        Self { polygons: None }
    }

    /// Number of snapshots currently held per polygon.
    pub fn trail_len(&self) -> usize {
        self.polygons.as_ref().map_or(0, |p| p[0].trail.len())
    }
}

impl Default for Mystify {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Mystify {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);
        let (w, h) = (tick.columns as f32, tick.usable_rows() as f32);
        if tick.columns == 0 || tick.usable_rows() == 0 {
            return;
        }

        let polygons = self
            .polygons
            .get_or_insert_with(|| [Polygon::random(w, h, rng), Polygon::random(w, h, rng)]);
        for p in polygons.iter_mut() {
            p.step(w, h);
        }

        let height = tick.usable_rows() as i32;
        polygons[0].draw(grid, height, &CYAN_SCHEME);
        polygons[1].draw(grid, height, &MAGENTA_SCHEME);
    }
}
