//! Screensaver simulations - pure, deterministic, and testable
//!
//! Every screensaver is a [`Simulation`]: a value that owns its private state
//! and, once per tick, paints a fresh [`Grid`](types::Grid) of exactly
//! `columns x rows` cells. Nothing here touches the terminal, so the same code
//! runs in the binary, in tests and in benchmarks.
//!
//! - **Deterministic**: all randomness flows through an injected [`SimRng`],
//!   so a fixed seed replays the same animation
//! - **Resize tolerant**: dimensions are ordinary per-tick input; modules clamp
//!   or rebuild their state when they change
//! - **Allocation-free steady state**: `advance` reuses the caller's grid
//!
//! # Module Structure
//!
//! - [`sim`]: the [`Simulation`] contract
//! - [`rng`]: seedable random source shared by all simulations
//! - [`raster`]: integer line rasterization
//! - [`savers`]: the fourteen screensavers
//! - [`registry`]: name lookup, descriptors and the [`Saver`] dispatcher
//!
//! # Example
//!
//! ```
//! use term_savers_core::{registry, SimRng, Simulation};
//! use term_savers_core::types::Tick;
//!
//! let kind = registry::find("starfield").unwrap();
//! let mut saver = kind.create();
//! let mut rng = SimRng::new(7);
//!
//! let grid = saver.render(Tick::new(80, 24, 0, 0), &mut rng);
//! assert_eq!((grid.width(), grid.height()), (80, 24));
//! ```

pub mod raster;
pub mod registry;
pub mod rng;
pub mod savers;
pub mod sim;

pub use term_savers_types as types;

pub use registry::{RegistryError, Saver, SaverInfo, SaverKind};
pub use rng::SimRng;
pub use sim::Simulation;
