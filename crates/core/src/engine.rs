use crate::RandomSource;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("internal consistency error: {0}")]
    Invariant(String),
    #[error("invalid warp {from} -> {to}: {reason}")]
    InvalidWarp {
        from: u8,
        to: u8,
        reason: &'static str,
    },
    #[error("trial did not finish within {0} rolls")]
    RollLimit(u32),
}

/// One self-contained game: consume randomness, apply rules until a
/// terminal state and hand back the outcome record.
///
/// Implementations hold only immutable configuration, so independent trials
/// never share mutable state.
pub trait TrialEngine {
    type Outcome;

    fn run_trial<R: RandomSource>(&self, rng: &mut R) -> Result<Self::Outcome, EngineError>;
}
