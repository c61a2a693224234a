use crate::BatchError;
use log::warn;
use parlor_core::{BathtubResult, RaceResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Order-free reduction of trial outcomes.
///
/// `merge` is associative: folding two halves of a trial list and merging
/// them equals folding the whole list. Ties between extrema go to `self`.
pub trait Tally: Default {
    type Outcome;

    fn record(&mut self, outcome: &Self::Outcome);

    fn merge(self, other: Self) -> Self;

    fn trials(&self) -> u64;

    fn from_outcomes<'a, I>(outcomes: I) -> Self
    where
        I: IntoIterator<Item = &'a Self::Outcome>,
        Self::Outcome: 'a,
    {
        outcomes.into_iter().fold(Self::default(), |mut tally, outcome| {
            tally.record(outcome);
            tally
        })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Odds {
    /// Roughly one win every `n` trials.
    OneIn(u64),
    /// No wins observed, so the odds cannot be stated.
    Undefined,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SolitaireTally {
    pub trials: u64,
    pub wins: u64,
    pub cards_left: BTreeMap<usize, u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SolitaireSummary {
    pub trials: u64,
    pub wins: u64,
    pub win_rate: f64,
    pub odds: Odds,
    pub cards_left_histogram: BTreeMap<usize, u64>,
}

impl Tally for SolitaireTally {
    type Outcome = BathtubResult;

    fn record(&mut self, outcome: &BathtubResult) {
        self.trials += 1;
        if outcome.is_win() {
            self.wins += 1;
        }
        *self.cards_left.entry(outcome.cards_left).or_default() += 1;
    }

    fn merge(mut self, other: Self) -> Self {
        self.trials += other.trials;
        self.wins += other.wins;
        for (cards, count) in other.cards_left {
            *self.cards_left.entry(cards).or_default() += count;
        }
        self
    }

    fn trials(&self) -> u64 {
        self.trials
    }
}

impl SolitaireTally {
    /// `floor(trials / wins)`, computed exactly in integers.
    pub fn odds(&self) -> Odds {
        if self.wins == 0 {
            Odds::Undefined
        } else {
            Odds::OneIn(self.trials / self.wins)
        }
    }

    pub fn summary(&self) -> Result<SolitaireSummary, BatchError> {
        if self.trials == 0 {
            return Err(BatchError::NoData);
        }
        let odds = self.odds();
        if odds == Odds::Undefined {
            warn!("no wins in {} trials; odds are undefined", self.trials);
        }
        Ok(SolitaireSummary {
            trials: self.trials,
            wins: self.wins,
            win_rate: self.wins as f64 / self.trials as f64,
            odds,
            cards_left_histogram: self.cards_left.clone(),
        })
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RaceTally {
    pub trials: u64,
    pub total_rolls: u64,
    pub total_chutes: u64,
    pub total_ladders: u64,
    pub max_rolls: u32,
    /// Fewest-roll trial; ties keep the earliest one.
    pub min_trial: Option<RaceResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RaceSummary {
    pub trials: u64,
    pub min_rolls: u32,
    pub min_trial: RaceResult,
    pub max_rolls: u32,
    pub mean_rolls: f64,
    pub mean_chutes: f64,
    pub mean_ladders: f64,
}

impl Tally for RaceTally {
    type Outcome = RaceResult;

    fn record(&mut self, outcome: &RaceResult) {
        self.trials += 1;
        self.total_rolls += u64::from(outcome.rolls);
        self.total_chutes += u64::from(outcome.chutes);
        self.total_ladders += u64::from(outcome.ladders);
        self.max_rolls = self.max_rolls.max(outcome.rolls);
        let better = self
            .min_trial
            .as_ref()
            .map_or(true, |best| outcome.rolls < best.rolls);
        if better {
            self.min_trial = Some(outcome.clone());
        }
    }

    fn merge(mut self, other: Self) -> Self {
        self.trials += other.trials;
        self.total_rolls += other.total_rolls;
        self.total_chutes += other.total_chutes;
        self.total_ladders += other.total_ladders;
        self.max_rolls = self.max_rolls.max(other.max_rolls);
        self.min_trial = match (self.min_trial, other.min_trial) {
            (Some(left), Some(right)) if right.rolls < left.rolls => Some(right),
            (Some(left), _) => Some(left),
            (None, right) => right,
        };
        self
    }

    fn trials(&self) -> u64 {
        self.trials
    }
}

impl RaceTally {
    pub fn summary(&self) -> Result<RaceSummary, BatchError> {
        let Some(min_trial) = self.min_trial.clone() else {
            return Err(BatchError::NoData);
        };
        let trials = self.trials as f64;
        Ok(RaceSummary {
            trials: self.trials,
            min_rolls: min_trial.rolls,
            min_trial,
            max_rolls: self.max_rolls,
            mean_rolls: self.total_rolls as f64 / trials,
            mean_chutes: self.total_chutes as f64 / trials,
            mean_ladders: self.total_ladders as f64 / trials,
        })
    }
}
