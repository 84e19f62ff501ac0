//! Heat-diffusion fire rising from the bottom row.

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "fire",
    description: "ASCII fire rising from the bottom of the screen",
    fps: Some(15),
};

/// Heat injected into the bottom row is uniform in `[SEED_MIN, SEED_MAX]`.
pub const SEED_MIN: u32 = 200;
pub const SEED_MAX: u32 = 255;

/// Descending threshold ladder: first band whose threshold is exceeded wins.
const LADDER: [(f32, char, Rgb); 5] = [
    (200.0, '█', Rgb::hex(0xff0000)),
    (160.0, '▓', Rgb::hex(0xff4400)),
    (120.0, '▒', Rgb::hex(0xff8800)),
    (80.0, '░', Rgb::hex(0xffaa00)),
    (40.0, '.', Rgb::hex(0xffcc00)),
];

/// Glyph and color for a heat value; `None` is blank.
pub fn flame(heat: f32) -> Option<(char, Rgb)> {
    LADDER
        .iter()
        .find(|(threshold, _, _)| heat > *threshold)
        .map(|&(_, ch, rgb)| (ch, rgb))
}

/// Row-major heat buffer the size of the usable screen.
#[derive(Debug, Clone, PartialEq)]
pub struct HeatField {
    width: u16,
    height: u16,
    heat: Vec<f32>,
}

impl HeatField {
    pub fn new(width: u16, height: u16) -> Self {
        Self {
            width,
            height,
            heat: vec![0.0; width as usize * height as usize],
        }
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    /// Heat at `(x, y)`; zero outside the field.
    pub fn get(&self, x: i32, y: i32) -> f32 {
        if x < 0 || y < 0 || x >= self.width as i32 || y >= self.height as i32 {
            return 0.0;
        }
        self.heat[y as usize * self.width as usize + x as usize]
    }

    /// One diffusion step followed by fresh heat on the bottom row.
    ///
    /// Rows are updated top-down in place, so every read from the rows below
    /// still sees the previous tick's values.
    pub fn step(&mut self, rng: &mut SimRng) {
        let (w, h) = (self.width as i32, self.height as i32);
        if w == 0 || h == 0 {
            return;
        }

        for y in 0..h - 1 {
            for x in 0..w {
                let sum = self.get(x, y + 1)
                    + self.get(x - 1, y + 1)
                    + self.get(x + 1, y + 1)
                    + self.get(x, y + 2);
                let decay = rng.between(1, 3) as f32;
                let i = (y * w + x) as usize;
                self.heat[i] = (sum / 4.0 - decay).max(0.0);
            }
        }

        let bottom = ((h - 1) * w) as usize;
        for cell in &mut self.heat[bottom..] {
            *cell = rng.between(SEED_MIN as i32, SEED_MAX as i32) as f32;
        }
    }
}

pub struct Fire {
    field: Option<HeatField>,
}

impl Fire {
    pub fn new() -> Self {
        Self { field: None }
    }

    pub fn field(&self) -> Option<&HeatField> {
        self.field.as_ref()
    }
}

impl Default for Fire {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for Fire {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);
        let (w, h) = (tick.columns, tick.usable_rows());

        if !matches!(&self.field, Some(f) if f.width == w && f.height == h) {
            self.field = Some(HeatField::new(w, h));
        }
        let Some(field) = self.field.as_mut() else {
            return;
        };
        field.step(rng);

        for y in 0..h {
            for x in 0..w {
                if let Some((ch, rgb)) = flame(field.get(x as i32, y as i32)) {
                    grid.put_char(x, y, ch, CellStyle::fg(rgb));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ladder_bands() {
        assert_eq!(flame(255.0).map(|f| f.0), Some('█'));
        assert_eq!(flame(200.0).map(|f| f.0), Some('▓'));
        assert_eq!(flame(121.0).map(|f| f.0), Some('▒'));
        assert_eq!(flame(81.0).map(|f| f.0), Some('░'));
        assert_eq!(flame(41.0).map(|f| f.0), Some('.'));
        assert_eq!(flame(40.0), None);
        assert_eq!(flame(0.0), None);
    }

    #[test]
    fn first_tick_only_heats_the_bottom_row() {
        let mut field = HeatField::new(16, 8);
        let mut rng = SimRng::new(2);
        field.step(&mut rng);
        for y in 0..7 {
            for x in 0..16 {
                assert_eq!(field.get(x, y), 0.0);
            }
        }
        for x in 0..16 {
            let v = field.get(x, 7);
            assert!((SEED_MIN as f32..=SEED_MAX as f32).contains(&v));
        }
    }

    #[test]
    fn second_tick_heat_is_bounded_by_the_row_below() {
        let mut field = HeatField::new(16, 8);
        let mut rng = SimRng::new(2);
        field.step(&mut rng);
        let before = field.clone();
        field.step(&mut rng);

        // Row 6 rose from zero, but never above the hottest neighbor it averaged.
        let mut rose = false;
        for x in 0..16 {
            let v = field.get(x, 6);
            let below_max = (-1..=1)
                .map(|dx| before.get(x + dx, 7))
                .fold(0.0f32, f32::max);
            assert!(v <= below_max, "x={x} v={v} below={below_max}");
            rose |= v > 0.0;
        }
        assert!(rose);
        for x in 0..16 {
            assert_eq!(field.get(x, 0), 0.0);
        }
    }

    #[test]
    fn resize_rebuilds_the_field() {
        let mut sim = Fire::new();
        let mut rng = SimRng::new(2);
        sim.render(Tick::new(80, 24, 0, 0), &mut rng);
        let g = sim.render(Tick::new(40, 12, 1, 0), &mut rng);
        let f = sim.field().unwrap();
        assert_eq!((f.width(), f.height()), (40, 11));
        assert_eq!((g.width(), g.height()), (40, 12));
    }
}
