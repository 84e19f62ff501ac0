//! Rotating double helix with colored base-pair rungs.

use std::f32::consts::PI;

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "dna-helix",
    description: "Rotating DNA double helix animation",
    fps: Some(12),
};

/// Phase added per tick.
pub const SPIN: f32 = 0.15;
/// Phase step between consecutive rows.
const TWIST: f32 = 0.3;

const STRAND_1_FRONT: CellStyle = CellStyle::fg(Rgb::hex(0x00ccff)).bold();
const STRAND_1_BACK: CellStyle = CellStyle::fg(Rgb::hex(0x006688));
const STRAND_2_FRONT: CellStyle = CellStyle::fg(Rgb::hex(0xff6600)).bold();
const STRAND_2_BACK: CellStyle = CellStyle::fg(Rgb::hex(0x883300));

/// A-T and G-C rung colors: first half, second half.
const BASE_PAIRS: [(Rgb, Rgb); 2] = [
    (Rgb::hex(0xff0000), Rgb::hex(0x00ff00)),
    (Rgb::hex(0x00ffff), Rgb::hex(0xffff00)),
];

pub struct DnaHelix {
    offset: f32,
}

impl DnaHelix {
    pub fn new() -> Self {
        Self { offset: 0.0 }
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }
}

impl Default for DnaHelix {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for DnaHelix {
    fn advance(&mut self, tick: Tick, _rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);
        self.offset += SPIN;

        let center = (tick.columns / 2) as f32;
        let amplitude = tick.columns as f32 * 0.15;

        for y in 0..tick.usable_rows() {
            let angle = y as f32 * TWIST + self.offset;
            let s1 = (center + angle.sin() * amplitude).round() as i32;
            let s2 = (center + (angle + PI).sin() * amplitude).round() as i32;
            let row = y as i32;

            let (lo, hi) = (s1.min(s2), s1.max(s2));
            let span = hi - lo;
            if (span as f32) < amplitude * 1.5 {
                let pair = ((y as f32 + self.offset * 2.0) / 4.0).floor() as usize % 2;
                let (first, second) = BASE_PAIRS[pair];
                for x in lo + 1..hi {
                    let progress = (x - lo) as f32 / span as f32;
                    let rgb = if progress < 0.5 { first } else { second };
                    grid.put_char_signed(x, row, '-', CellStyle::fg(rgb));
                }
            }

            // Back strand first so the front one wins where they cross.
            if angle.cos() > 0.0 {
                grid.put_char_signed(s2, row, '○', STRAND_2_BACK);
                grid.put_char_signed(s1, row, '●', STRAND_1_FRONT);
            } else {
                grid.put_char_signed(s1, row, '○', STRAND_1_BACK);
                grid.put_char_signed(s2, row, '●', STRAND_2_FRONT);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_row_after_one_tick() {
        let mut sim = DnaHelix::new();
        let mut rng = SimRng::new(1);
        let g = sim.render(Tick::new(80, 24, 0, 0), &mut rng);
        assert_eq!(sim.offset(), SPIN);

        // angle 0.15: strand 1 is in front at 42, strand 2 behind at 38.
        let front = g.get(42, 0).unwrap();
        assert_eq!((front.ch, front.style), ('●', STRAND_1_FRONT));
        let back = g.get(38, 0).unwrap();
        assert_eq!((back.ch, back.style), ('○', STRAND_2_BACK));

        // A-T rung: red up to the midpoint, green from it.
        assert_eq!(g.get(39, 0).unwrap().style.fg, Rgb::hex(0xff0000));
        assert_eq!(g.get(40, 0).unwrap().style.fg, Rgb::hex(0x00ff00));
        assert_eq!(g.get(41, 0).unwrap().style.fg, Rgb::hex(0x00ff00));
        assert_eq!(g.row_text(0).trim(), "○---●");
    }

    #[test]
    fn every_row_has_one_front_strand() {
        let mut sim = DnaHelix::new();
        let mut rng = SimRng::new(1);
        let mut grid = Grid::default();
        for frame in 0..100 {
            sim.advance(Tick::new(80, 24, frame, 0), &mut rng, &mut grid);
            for y in 0..23 {
                let text = grid.row_text(y);
                assert_eq!(text.matches('●').count(), 1, "frame {frame} row {y}");
                assert!(text.matches('○').count() <= 1);
            }
            assert!(grid.row(23).unwrap().iter().all(|c| c.is_blank()));
        }
    }

    #[test]
    fn wide_strands_have_no_rungs() {
        let mut sim = DnaHelix::new();
        let mut rng = SimRng::new(1);
        let mut grid = Grid::default();
        for frame in 0..60 {
            sim.advance(Tick::new(100, 30, frame, 0), &mut rng, &mut grid);
            for y in 0..29 {
                let text: Vec<char> = grid.row_text(y).chars().collect();
                let strands: Vec<usize> = (0..text.len())
                    .filter(|&x| text[x] == '●' || text[x] == '○')
                    .collect();
                let rungs = text.iter().filter(|&&c| c == '-').count();
                if let [a, b] = strands[..] {
                    if b - a >= 23 {
                        assert_eq!(rungs, 0);
                    }
                }
            }
        }
    }
}
