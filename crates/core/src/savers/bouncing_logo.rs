//! DVD-style bouncing text block.

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "bouncing-logo",
    description: "DVD-style bouncing text block with color changes",
    fps: Some(15),
};

pub const LOGO: [&str; 4] = [
    "╔════════════════════╗",
    "║  TERMINAL          ║",
    "║     SCREENSAVERS   ║",
    "╚════════════════════╝",
];
pub const LOGO_WIDTH: i32 = 22;
pub const LOGO_HEIGHT: i32 = LOGO.len() as i32;

pub const COLORS: [Rgb; 8] = [
    Rgb::hex(0xff0000),
    Rgb::hex(0xff8800),
    Rgb::hex(0xffff00),
    Rgb::hex(0x00ff00),
    Rgb::hex(0x0088ff),
    Rgb::hex(0x8800ff),
    Rgb::hex(0xff00ff),
    Rgb::hex(0x00ffff),
];

/// Position, unit velocity and palette index of a bouncing block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bouncer {
    pub x: i32,
    pub y: i32,
    pub dx: i32,
    pub dy: i32,
    pub color: usize,
}

impl Bouncer {
    /// Move one step and reflect off the `[0, max_x] x [0, max_y]` box.
    ///
    /// Returns true when either axis bounced. The palette index advances at
    /// most once per step, even on a corner hit.
    pub fn step(&mut self, max_x: i32, max_y: i32, palette_len: usize) -> bool {
        self.x += self.dx;
        self.y += self.dy;
        let mut bounced = false;

        if self.x <= 0 {
            self.x = 0;
            self.dx = 1;
            bounced = true;
        } else if self.x >= max_x {
            self.x = max_x;
            self.dx = -1;
            bounced = true;
        }

        if self.y <= 0 {
            self.y = 0;
            self.dy = 1;
            bounced = true;
        } else if self.y >= max_y {
            self.y = max_y;
            self.dy = -1;
            bounced = true;
        }

        if bounced {
            self.color = (self.color + 1) % palette_len;
        }
        bounced
    }
}

pub struct BouncingLogo {
    state: Option<Bouncer>,
}

impl BouncingLogo {
    pub fn new() -> Self {
        Self { state: None }
    }

    /// Current block state, if the first tick has run.
    pub fn bouncer(&self) -> Option<Bouncer> {
        self.state
    }

    /// Override the block state (used to stage edge cases).
    pub fn place(&mut self, bouncer: Bouncer) {
        self.state = Some(bouncer);
    }
}

impl Default for BouncingLogo {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for BouncingLogo {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        grid.reset(tick.columns, tick.rows);
        let height = tick.usable_rows() as i32;
        let max_x = tick.columns as i32 - LOGO_WIDTH;
        let max_y = height - LOGO_HEIGHT;

        let s = self.state.get_or_insert_with(|| Bouncer {
            x: rng.below(max_x.max(1) as usize) as i32,
            y: rng.below(max_y.max(1) as usize) as i32,
            dx: rng.sign(),
            dy: rng.sign(),
            color: 0,
        });
        s.step(max_x, max_y, COLORS.len());

        let style = CellStyle::fg(COLORS[s.color]).bold();
        for (i, line) in LOGO.iter().enumerate() {
            let y = s.y + i as i32;
            if y < height {
                grid.put_str(s.x, y, line, style);
            }
        }
    }
}
