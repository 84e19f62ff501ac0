//! Large bitmap-font clock bouncing around the screen.

use chrono::{Local, NaiveTime, Timelike};

use crate::registry::SaverInfo;
use crate::rng::SimRng;
use crate::savers::bouncing_logo::Bouncer;
use crate::sim::Simulation;
use crate::types::{CellStyle, Grid, Rgb, Tick};

pub const INFO: SaverInfo = SaverInfo {
    name: "digital-clock",
    description: "Large bouncing digital clock display",
    fps: Some(10),
};

pub const FONT_HEIGHT: usize = 5;
/// `HH:MM:SS` is eight 5-wide glyphs with single-column gaps.
pub const CLOCK_WIDTH: i32 = 47;
pub const CLOCK_HEIGHT: i32 = FONT_HEIGHT as i32;

const COLORS: [Rgb; 7] = [
    Rgb::CYAN,
    Rgb::GREEN,
    Rgb::MAGENTA,
    Rgb::YELLOW,
    Rgb::RED,
    Rgb::BLUE,
    Rgb::WHITE,
];

const BLANK: [&str; FONT_HEIGHT] = ["     "; FONT_HEIGHT];

/// Bitmap rows for a clock character; unknown characters are blank.
pub fn glyph(c: char) -> [&'static str; FONT_HEIGHT] {
    match c {
        '0' => ["█████", "█   █", "█   █", "█   █", "█████"],
        '1' => ["  █  ", "  █  ", "  █  ", "  █  ", "  █  "],
        '2' => ["█████", "    █", "█████", "█    ", "█████"],
        '3' => ["█████", "    █", "█████", "    █", "█████"],
        '4' => ["█   █", "█   █", "█████", "    █", "    █"],
        '5' => ["█████", "█    ", "█████", "    █", "█████"],
        '6' => ["█████", "█    ", "█████", "█   █", "█████"],
        '7' => ["█████", "    █", "    █", "    █", "    █"],
        '8' => ["█████", "█   █", "█████", "█   █", "█████"],
        '9' => ["█████", "█   █", "█████", "    █", "█████"],
        ':' => ["     ", "  █  ", "     ", "  █  ", "     "],
        _ => BLANK,
    }
}

/// Render `text` into `FONT_HEIGHT` strings, one per bitmap row.
pub fn banner(text: &str, out: &mut [String; FONT_HEIGHT]) {
    for (row, line) in out.iter_mut().enumerate() {
        line.clear();
        for (i, c) in text.chars().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(glyph(c)[row]);
        }
    }
}

/// Move one step; each axis that hits an edge reverses and advances the color.
fn drift(b: &mut Bouncer, columns: i32, height: i32) {
    b.x += b.dx;
    b.y += b.dy;

    if b.x <= 0 || b.x + CLOCK_WIDTH >= columns {
        b.dx = -b.dx;
        b.x = b.x.min(columns - CLOCK_WIDTH).max(0);
        b.color = (b.color + 1) % COLORS.len();
    }
    if b.y <= 0 || b.y + CLOCK_HEIGHT >= height {
        b.dy = -b.dy;
        b.y = b.y.min(height - CLOCK_HEIGHT).max(0);
        b.color = (b.color + 1) % COLORS.len();
    }
}

type TimeSource = Box<dyn Fn() -> NaiveTime + Send>;

pub struct DigitalClock {
    state: Option<Bouncer>,
    now: TimeSource,
    text: String,
    lines: [String; FONT_HEIGHT],
}

impl DigitalClock {
    /// Clock showing local wall-clock time.
    pub fn new() -> Self {
        Self::with_time_source(|| Local::now().time())
    }

    pub fn with_time_source(now: impl Fn() -> NaiveTime + Send + 'static) -> Self {
        Self {
            state: None,
            now: Box::new(now),
            text: String::with_capacity(8),
            lines: Default::default(),
        }
    }
}

impl Default for DigitalClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Simulation for DigitalClock {
    fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
        use std::fmt::Write;

        grid.reset(tick.columns, tick.rows);
        let columns = tick.columns as i32;
        let height = tick.usable_rows() as i32;

        let s = self.state.get_or_insert_with(|| Bouncer {
            x: rng.below((columns - CLOCK_WIDTH).max(1) as usize) as i32,
            y: rng.below((height - CLOCK_HEIGHT).max(1) as usize) as i32,
            dx: 1,
            dy: 1,
            color: 0,
        });
        drift(s, columns, height);

        let t = (self.now)();
        self.text.clear();
        let _ = write!(self.text, "{:02}:{:02}:{:02}", t.hour(), t.minute(), t.second());
        banner(&self.text, &mut self.lines);

        let style = CellStyle::fg(COLORS[s.color]);
        for (row, line) in self.lines.iter().enumerate() {
            let y = s.y + row as i32;
            if y < height {
                grid.put_str(s.x, y, line, style);
            }
        }
    }
}
