//! Terminal screensaver runner (default binary).
//!
//! Picks a screensaver from the command line, takes over the terminal and
//! advances the simulation at a fixed rate until any key is pressed.

use std::fs::File;
use std::path::Path;
use std::sync::Mutex;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use crossterm::event;
use tracing::info;

use term_savers::cli::{list_table, Cli, Session};
use term_savers::core::{SimRng, Simulation};
use term_savers::input::{classify, HostEvent};
use term_savers::signals::StopFlag;
use term_savers::term::{FrameClock, TerminalRenderer};
use term_savers::types::{Grid, Tick, FALLBACK_COLUMNS, FALLBACK_ROWS};

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.list {
        print!("{}", list_table());
        return Ok(());
    }

    if let Some(path) = &cli.log_file {
        init_logging(path)?;
    }

    let mut rng = cli.rng();
    let session = cli.session(&mut rng)?;
    let stop = StopFlag::install().context("failed to install signal handlers")?;
    info!(saver = %session.kind, fps = session.fps, seed = ?cli.seed, "starting");

    let mut term = TerminalRenderer::new();
    term.enter()?;

    let result = run(&mut term, session, &mut rng, &stop);

    // Always try to restore terminal state.
    let _ = term.exit();
    info!(ok = result.is_ok(), "stopped");
    result
}

/// Log to a file; stderr would paint over the alternate screen.
fn init_logging(path: &Path) -> Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to open log file {}", path.display()))?;
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .init();

    Ok(())
}

fn terminal_size() -> (u16, u16) {
    crossterm::terminal::size().unwrap_or((FALLBACK_COLUMNS, FALLBACK_ROWS))
}

fn run(
    term: &mut TerminalRenderer,
    session: Session,
    rng: &mut SimRng,
    stop: &StopFlag,
) -> Result<()> {
    let mut saver = session.kind.create();
    let mut clock = FrameClock::new(session.fps);
    let mut grid = Grid::default();
    let started = Instant::now();

    loop {
        if stop.is_raised() {
            info!("termination signal received");
            return Ok(());
        }

        let now_ms = started.elapsed().as_millis() as u64;
        if let Some(frame) = clock.poll(now_ms) {
            let (columns, rows) = terminal_size();
            saver.advance(Tick::new(columns, rows, frame, now_ms), rng, &mut grid);
            term.draw_swap(&mut grid)?;
        }

        // Input with timeout until next tick.
        let now_ms = started.elapsed().as_millis() as u64;
        let timeout = Duration::from_millis(clock.until_next(now_ms));
        let ready = match event::poll(timeout) {
            Ok(ready) => ready,
            // Interrupted by a termination signal; the check above exits.
            Err(_) if stop.is_raised() => continue,
            Err(e) => return Err(e.into()),
        };
        if ready {
            match classify(&event::read()?) {
                HostEvent::Exit => return Ok(()),
                HostEvent::Resize(w, h) => {
                    info!(columns = w, rows = h, "terminal resized");
                    term.invalidate();
                }
                HostEvent::Ignore => {}
            }
        }
    }
}
