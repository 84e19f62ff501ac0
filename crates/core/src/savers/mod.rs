//! The screensaver simulations, one module each.

pub mod aquarium;
pub mod bonsai;
pub mod bouncing_logo;
pub mod digital_clock;
pub mod dna_helix;
pub mod fire;
pub mod fireworks;
pub mod game_of_life;
pub mod lava_lamp;
pub mod matrix_rain;
pub mod maze;
pub mod mystify;
pub mod pipes;
pub mod starfield;

pub use aquarium::Aquarium;
pub use bonsai::Bonsai;
pub use bouncing_logo::BouncingLogo;
pub use digital_clock::DigitalClock;
pub use dna_helix::DnaHelix;
pub use fire::Fire;
pub use fireworks::Fireworks;
pub use game_of_life::GameOfLife;
pub use lava_lamp::LavaLamp;
pub use matrix_rain::MatrixRain;
pub use maze::Maze;
pub use mystify::Mystify;
pub use pipes::Pipes;
pub use starfield::Starfield;
