//! TerminalRenderer: paints screensaver grids onto a real terminal.
//!
//! The first frame (and the first after a size change or `invalidate`) is a
//! full redraw; afterwards only runs of changed cells are written.

use std::io::{self, Write};

use anyhow::Result;

use crossterm::{
    cursor,
    style::{
        Attribute, Color, Print, ResetColor, SetAttribute, SetBackgroundColor, SetForegroundColor,
    },
    terminal, QueueableCommand,
};

use crate::types::{Cell, CellStyle, Grid, Rgb};

pub struct TerminalRenderer {
    stdout: io::Stdout,
    last: Option<Grid>,
    buf: Vec<u8>,
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            last: None,
            buf: Vec::with_capacity(64 * 1024),
        }
    }

    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.buf.clear();
        self.buf.queue(terminal::EnterAlternateScreen)?;
        self.buf.queue(cursor::Hide)?;
        self.buf.queue(terminal::DisableLineWrap)?;
        self.flush_buf()?;
        Ok(())
    }

    pub fn exit(&mut self) -> Result<()> {
        self.buf.clear();
        self.buf.queue(ResetColor)?;
        self.buf.queue(SetAttribute(Attribute::Reset))?;
        self.buf.queue(terminal::EnableLineWrap)?;
        self.buf.queue(cursor::Show)?;
        self.buf.queue(terminal::LeaveAlternateScreen)?;
        self.flush_buf()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Force the next draw to be a full redraw.
    ///
    /// Useful on terminal resize events.
    pub fn invalidate(&mut self) {
        self.last = None;
    }

    /// Draw a grid, swapping it into internal state.
    ///
    /// Callers keep one `Grid` and pass it in every frame. The renderer diffs
    /// against the previous frame and then swaps buffers, so after the call
    /// `grid` holds the previous frame and can be repainted without cloning.
    pub fn draw_swap(&mut self, grid: &mut Grid) -> Result<()> {
        self.buf.clear();
        match self.last.take() {
            Some(mut prev) if prev.width() == grid.width() && prev.height() == grid.height() => {
                encode_diff_into(&prev, grid, &mut self.buf)?;
                self.flush_buf()?;
                std::mem::swap(&mut prev, grid);
                self.last = Some(prev);
            }
            stale => {
                encode_full_into(grid, &mut self.buf)?;
                self.flush_buf()?;
                let mut prev = stale.unwrap_or_default();
                prev.resize(grid.width(), grid.height());
                std::mem::swap(&mut prev, grid);
                self.last = Some(prev);
            }
        }
        Ok(())
    }

    fn flush_buf(&mut self) -> Result<()> {
        self.stdout.write_all(&self.buf)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Clear the screen and paint every row of `grid` into `out`.
pub fn encode_full_into(grid: &Grid, out: &mut Vec<u8>) -> Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;
    paint(None, grid, out)
}

/// Paint only the cells of `next` that differ from `prev` into `out`.
///
/// A size mismatch repaints every row.
pub fn encode_diff_into(prev: &Grid, next: &Grid, out: &mut Vec<u8>) -> Result<()> {
    paint(Some(prev), next, out)
}

fn paint(prev: Option<&Grid>, next: &Grid, out: &mut Vec<u8>) -> Result<()> {
    let mut painter = Painter { out, style: None };
    for run in changed_runs(prev, next) {
        if let Some(row) = next.row(run.y) {
            let start = run.x as usize;
            painter.run(run.x, run.y, &row[start..start + run.len as usize])?;
        }
    }
    painter.finish()
}

/// Horizontal span of dirty cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Run {
    x: u16,
    y: u16,
    len: u16,
}

/// Dirty spans of `next`, row by row. Without a comparable `prev` every
/// row is a single span.
fn changed_runs<'a>(prev: Option<&'a Grid>, next: &'a Grid) -> impl Iterator<Item = Run> + 'a {
    let prev = prev.filter(|p| p.width() == next.width() && p.height() == next.height());
    (0..next.height()).flat_map(move |y| {
        let old = prev.and_then(|p| p.row(y));
        let new = next.row(y).unwrap_or_default();
        row_runs(old, new).map(move |(x, len)| Run { x, y, len })
    })
}

fn row_runs<'a>(old: Option<&'a [Cell]>, new: &'a [Cell]) -> impl Iterator<Item = (u16, u16)> + 'a {
    let dirty = move |x: usize| old.map_or(true, |o| o[x] != new[x]);
    let mut x = 0;
    std::iter::from_fn(move || {
        while x < new.len() && !dirty(x) {
            x += 1;
        }
        if x == new.len() {
            return None;
        }
        let start = x;
        while x < new.len() && dirty(x) {
            x += 1;
        }
        Some((start as u16, (x - start) as u16))
    })
}

/// Queues cells, emitting style commands only when the style changes.
struct Painter<'a> {
    out: &'a mut Vec<u8>,
    style: Option<CellStyle>,
}

impl Painter<'_> {
    fn run(&mut self, x: u16, y: u16, cells: &[Cell]) -> Result<()> {
        self.out.queue(cursor::MoveTo(x, y))?;
        for cell in cells {
            if self.style != Some(cell.style) {
                self.set_style(cell.style)?;
            }
            self.out.queue(Print(cell.ch))?;
        }
        Ok(())
    }

    fn set_style(&mut self, style: CellStyle) -> Result<()> {
        self.out.queue(SetAttribute(Attribute::Reset))?;
        self.out.queue(SetForegroundColor(truecolor(style.fg)))?;
        self.out.queue(SetBackgroundColor(truecolor(style.bg)))?;
        if style.bold {
            self.out.queue(SetAttribute(Attribute::Bold))?;
        }
        if style.dim {
            self.out.queue(SetAttribute(Attribute::Dim))?;
        }
        self.style = Some(style);
        Ok(())
    }

    fn finish(self) -> Result<()> {
        self.out.queue(ResetColor)?;
        self.out.queue(SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn truecolor(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}
