//! Batch runner: repeats an engine's trials and reduces the outcomes.

mod config;
mod error;
mod report;
mod runner;
mod tally;

pub use config::*;
pub use error::*;
pub use report::*;
pub use runner::*;
pub use tally::*;
