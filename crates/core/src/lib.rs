//! Game engines for randomized solitaire trials. Keep this crate free of IO.

pub mod bathtub;
pub mod cards;
pub mod chutes;
pub mod deck;
pub mod engine;
pub mod rng;

pub use bathtub::*;
pub use cards::*;
pub use chutes::*;
pub use deck::*;
pub use engine::*;
pub use rng::*;
