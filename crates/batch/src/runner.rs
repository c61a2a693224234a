use crate::{BatchConfig, BatchError, RaceSummary, RaceTally, SolitaireSummary, SolitaireTally, Tally};
use log::debug;
use parlor_core::{BathtubEngine, ChutesEngine, EngineError, RandomSource, RngState, TrialEngine};
use std::iter;

/// Endless stream of trials drawing from one randomness source.
pub fn trials<'a, E, R>(
    engine: &'a E,
    rng: &'a mut R,
) -> impl Iterator<Item = Result<E::Outcome, EngineError>> + 'a
where
    E: TrialEngine,
    R: RandomSource,
{
    iter::repeat_with(move || engine.run_trial(&mut *rng))
}

/// Runs `config.trials` trials and folds them into `T`. The first engine
/// error aborts the batch.
pub fn run_batch<E, T>(engine: &E, config: &BatchConfig) -> Result<T, BatchError>
where
    E: TrialEngine,
    T: Tally<Outcome = E::Outcome>,
{
    let count = trial_count(config.trials)?;
    debug!(
        "running {} trials with seed {:#x}",
        config.trials, config.seed
    );
    let mut rng = RngState::from_seed(config.seed);
    let tally = trials(engine, &mut rng)
        .take(count)
        .try_fold(T::default(), |mut tally, outcome| {
            tally.record(&outcome?);
            Ok::<T, BatchError>(tally)
        })?;
    debug!("batch finished: {} trials recorded", tally.trials());
    Ok(tally)
}

fn trial_count(trials: u64) -> Result<usize, BatchError> {
    if trials == 0 {
        return Err(BatchError::ZeroTrials);
    }
    usize::try_from(trials).map_err(|_| BatchError::TooManyTrials(trials))
}

pub fn run_bathtub(config: &BatchConfig) -> Result<SolitaireSummary, BatchError> {
    run_batch::<_, SolitaireTally>(&BathtubEngine::new(), config)?.summary()
}

pub fn run_chutes(engine: &ChutesEngine, config: &BatchConfig) -> Result<RaceSummary, BatchError> {
    run_batch::<_, RaceTally>(engine, config)?.summary()
}
