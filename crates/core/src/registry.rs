//! Name-to-screensaver lookup.
//!
//! The registry is a closed list: every simulation module appears exactly
//! once, in display order, and is addressed by its kebab-case name.

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

use crate::rng::SimRng;
use crate::savers::*;
use crate::sim::Simulation;
use crate::types::{Grid, Tick};

/// Static descriptor for a screensaver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaverInfo {
    /// Kebab-case name used on the command line.
    pub name: &'static str,
    pub description: &'static str,
    /// Preferred frame rate; `None` means the host default.
    pub fps: Option<u32>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("unknown screensaver \"{0}\"")]
    UnknownSaver(String),
}

macro_rules! registry {
    ($($kind:ident => $module:ident :: $ty:ident),+ $(,)?) => {
        /// Identifies one registered screensaver.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum SaverKind {
            $($kind),+
        }

        impl SaverKind {
            /// Every screensaver, in display order.
            pub const ALL: &'static [SaverKind] = &[$(SaverKind::$kind),+];

            pub fn info(self) -> &'static SaverInfo {
                match self {
                    $(SaverKind::$kind => &$module::INFO),+
                }
            }

            /// Fresh simulation with no state.
            pub fn create(self) -> Saver {
                match self {
                    $(SaverKind::$kind => Saver::$kind($ty::new())),+
                }
            }
        }

        /// A live screensaver of any registered kind.
        pub enum Saver {
            $($kind($ty)),+
        }

        impl Saver {
            pub fn kind(&self) -> SaverKind {
                match self {
                    $(Saver::$kind(_) => SaverKind::$kind),+
                }
            }
        }

        impl Simulation for Saver {
            fn advance(&mut self, tick: Tick, rng: &mut SimRng, grid: &mut Grid) {
                match self {
                    $(Saver::$kind(sim) => sim.advance(tick, rng, grid)),+
                }
            }
        }
    };
}

registry! {
    MatrixRain => matrix_rain::MatrixRain,
    Starfield => starfield::Starfield,
    Pipes => pipes::Pipes,
    BouncingLogo => bouncing_logo::BouncingLogo,
    GameOfLife => game_of_life::GameOfLife,
    Fire => fire::Fire,
    Aquarium => aquarium::Aquarium,
    Mystify => mystify::Mystify,
    Fireworks => fireworks::Fireworks,
    DigitalClock => digital_clock::DigitalClock,
    Bonsai => bonsai::Bonsai,
    Maze => maze::Maze,
    LavaLamp => lava_lamp::LavaLamp,
    DnaHelix => dna_helix::DnaHelix,
}

impl SaverKind {
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Uniform choice among all registered screensavers.
    pub fn random(rng: &mut SimRng) -> Self {
        rng.pick(Self::ALL)
    }
}

impl fmt::Display for SaverKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SaverKind {
    type Err = RegistryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        find(s)
    }
}

impl fmt::Debug for Saver {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Saver").field(&self.kind()).finish()
    }
}

/// Descriptors for every registered screensaver, in display order.
pub fn all() -> impl Iterator<Item = &'static SaverInfo> {
    SaverKind::ALL.iter().map(|k| k.info())
}

/// Resolve a screensaver by exact name.
pub fn find(name: &str) -> Result<SaverKind, RegistryError> {
    SaverKind::ALL
        .iter()
        .copied()
        .find(|k| k.name() == name)
        .ok_or_else(|| RegistryError::UnknownSaver(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn find_resolves_every_name() {
        for &kind in SaverKind::ALL {
            assert_eq!(find(kind.name()), Ok(kind));
            assert_eq!(kind.create().kind(), kind);
        }
    }

    #[test]
    fn unknown_names_are_rejected() {
        let err = find("screen-of-death").unwrap_err();
        assert_eq!(err.to_string(), "unknown screensaver \"screen-of-death\"");
        assert!("Matrix-Rain".parse::<SaverKind>().is_err());
        assert!(find("").is_err());
    }

    #[test]
    fn display_order_matches_the_catalog() {
        let names: Vec<_> = all().map(|i| i.name).collect();
        assert_eq!(
            names,
            [
                "matrix-rain",
                "starfield",
                "pipes",
                "bouncing-logo",
                "game-of-life",
                "fire",
                "aquarium",
                "mystify",
                "fireworks",
                "digital-clock",
                "bonsai",
                "maze",
                "lava-lamp",
                "dna-helix",
            ]
        );
    }

    #[test]
    fn random_choice_covers_the_registry() {
        let mut rng = SimRng::new(99);
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            seen.insert(SaverKind::random(&mut rng));
        }
        assert_eq!(seen.len(), SaverKind::ALL.len());
    }
}
