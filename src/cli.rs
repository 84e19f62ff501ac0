//! Command-line parsing and session resolution.

use std::fmt::Write as _;
use std::path::PathBuf;

use anyhow::{anyhow, Result};
use clap::Parser;

use crate::core::registry::{self, SaverInfo, SaverKind};
use crate::core::SimRng;
use crate::types::DEFAULT_FPS;

#[derive(Parser, Debug)]
#[command(
    name = "term-savers",
    version,
    about = "Animated screensavers for the terminal",
    after_help = "Examples:\n  term-savers\n  term-savers matrix-rain\n  term-savers --list\n  term-savers --fps 30"
)]
pub struct Cli {
    /// Screensaver to run; one is picked at random when omitted.
    pub name: Option<String>,

    /// List available screensavers and exit.
    #[arg(short, long)]
    pub list: bool,

    /// Override frames per second.
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub fps: Option<u32>,

    /// Seed the random source for a reproducible animation.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Write logs to this file (the screen itself is never logged to).
    #[arg(long, env = "TERM_SAVERS_LOG")]
    pub log_file: Option<PathBuf>,
}

/// Everything the host loop needs to start a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    pub kind: SaverKind,
    pub fps: u32,
}

impl Cli {
    /// Random source for the session: seeded when `--seed` was given.
    pub fn rng(&self) -> SimRng {
        self.seed.map_or_else(SimRng::from_entropy, SimRng::new)
    }

    /// Resolve the requested screensaver and frame rate.
    ///
    /// `rng` is only consulted when no name was given.
    pub fn session(&self, rng: &mut SimRng) -> Result<Session> {
        let kind = match &self.name {
            Some(name) => registry::find(name)
                .map_err(|e| anyhow!("{e}\nRun with --list to see available screensavers"))?,
            None => SaverKind::random(rng),
        };
        Ok(Session {
            kind,
            fps: effective_fps(kind.info(), self.fps),
        })
    }
}

/// `--fps` wins, then the screensaver's preference, then the default.
pub fn effective_fps(info: &SaverInfo, fps_override: Option<u32>) -> u32 {
    fps_override.or(info.fps).unwrap_or(DEFAULT_FPS)
}

/// The `--list` output.
pub fn list_table() -> String {
    let mut out = String::from("\nAvailable screensavers:\n\n");
    out.push_str("  Name              Description\n");
    out.push_str("  ────────────────  ──────────────────────────────────────────\n");
    for info in registry::all() {
        let _ = writeln!(out, "  {:<16}  {}", info.name, info.description);
    }
    out.push('\n');
    out
}
