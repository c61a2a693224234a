use serde::{Deserialize, Serialize};

pub const DEFAULT_SEED: u64 = 0xC0FFEE;
pub const BATHTUB_TRIALS: u64 = 100_000;
pub const CHUTES_TRIALS: u64 = 1_000_000;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BatchConfig {
    pub trials: u64,
    pub seed: u64,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            trials: BATHTUB_TRIALS,
            seed: DEFAULT_SEED,
        }
    }
}

impl BatchConfig {
    pub fn bathtub() -> Self {
        Self::default()
    }

    pub fn chutes() -> Self {
        Self {
            trials: CHUTES_TRIALS,
            ..Self::default()
        }
    }

    pub fn with_trials(mut self, trials: u64) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }
}
