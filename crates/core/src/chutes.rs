//! Chutes & Ladders race on a 100-square board.

use crate::{EngineError, RandomSource, TrialEngine};
use log::trace;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const START: u8 = 0;
pub const FINISH: u8 = 100;
pub const DIE_FACES: u32 = 6;
pub const DEFAULT_ROLL_LIMIT: u32 = 100_000;

const CLASSIC_LADDERS: [(u8, u8); 9] = [
    (1, 38),
    (4, 14),
    (9, 31),
    (21, 42),
    (28, 84),
    (36, 44),
    (51, 67),
    (71, 91),
    (82, 100),
];

const CLASSIC_CHUTES: [(u8, u8); 10] = [
    (16, 6),
    (47, 26),
    (49, 11),
    (56, 53),
    (62, 19),
    (64, 60),
    (87, 24),
    (93, 73),
    (95, 75),
    (98, 78),
];

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Warp {
    Ladder(u8),
    Chute(u8),
}

impl Warp {
    pub fn destination(self) -> u8 {
        match self {
            Warp::Ladder(to) | Warp::Chute(to) => to,
        }
    }
}

/// Immutable square -> warp table owned by an engine.
///
/// Deserialization goes through [`WarpMap::new`], so a loaded board is
/// validated like a constructed one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(try_from = "WarpTable", into = "WarpTable")]
pub struct WarpMap {
    warps: BTreeMap<u8, Warp>,
}

/// Serialized form of a [`WarpMap`]: `(from, to)` pairs per warp kind.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WarpTable {
    pub ladders: Vec<(u8, u8)>,
    pub chutes: Vec<(u8, u8)>,
}

impl TryFrom<WarpTable> for WarpMap {
    type Error = EngineError;

    fn try_from(table: WarpTable) -> Result<Self, EngineError> {
        Self::new(&table.ladders, &table.chutes)
    }
}

impl From<WarpMap> for WarpTable {
    fn from(map: WarpMap) -> Self {
        Self {
            ladders: map.ladders().collect(),
            chutes: map.chutes().collect(),
        }
    }
}

impl WarpMap {
    pub fn new(ladders: &[(u8, u8)], chutes: &[(u8, u8)]) -> Result<Self, EngineError> {
        let mut warps = BTreeMap::new();
        for &(from, to) in ladders {
            check_squares(from, to)?;
            if to <= from {
                return Err(invalid(from, to, "ladder must lead forward"));
            }
            if warps.insert(from, Warp::Ladder(to)).is_some() {
                return Err(invalid(from, to, "square already has a warp"));
            }
        }
        for &(from, to) in chutes {
            check_squares(from, to)?;
            if to >= from {
                return Err(invalid(from, to, "chute must lead backward"));
            }
            if warps.insert(from, Warp::Chute(to)).is_some() {
                return Err(invalid(from, to, "square already has a warp"));
            }
        }
        Ok(Self { warps })
    }

    /// The fixed board: nine ladders and ten chutes.
    pub fn classic() -> Self {
        let ladders = CLASSIC_LADDERS
            .iter()
            .map(|&(from, to)| (from, Warp::Ladder(to)));
        let chutes = CLASSIC_CHUTES
            .iter()
            .map(|&(from, to)| (from, Warp::Chute(to)));
        Self {
            warps: ladders.chain(chutes).collect(),
        }
    }

    pub fn empty() -> Self {
        Self {
            warps: BTreeMap::new(),
        }
    }

    pub fn lookup(&self, square: u8) -> Option<Warp> {
        self.warps.get(&square).copied()
    }

    /// Where a token landing on `square` ends up.
    pub fn destination(&self, square: u8) -> u8 {
        self.lookup(square).map_or(square, Warp::destination)
    }

    pub fn ladders(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.warps.iter().filter_map(|(&from, warp)| match warp {
            Warp::Ladder(to) => Some((from, *to)),
            Warp::Chute(_) => None,
        })
    }

    pub fn chutes(&self) -> impl Iterator<Item = (u8, u8)> + '_ {
        self.warps.iter().filter_map(|(&from, warp)| match warp {
            Warp::Chute(to) => Some((from, *to)),
            Warp::Ladder(_) => None,
        })
    }
}

impl Default for WarpMap {
    fn default() -> Self {
        Self::classic()
    }
}

fn check_squares(from: u8, to: u8) -> Result<(), EngineError> {
    if !(1..FINISH).contains(&from) {
        return Err(invalid(from, to, "source must be on squares 1..=99"));
    }
    if !(1..=FINISH).contains(&to) {
        return Err(invalid(from, to, "destination must be on squares 1..=100"));
    }
    Ok(())
}

fn invalid(from: u8, to: u8, reason: &'static str) -> EngineError {
    EngineError::InvalidWarp { from, to, reason }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RaceResult {
    pub rolls: u32,
    pub chutes: u32,
    pub ladders: u32,
    pub positions: Vec<u8>,
    pub roll_history: Vec<u8>,
}

#[derive(Debug, Clone)]
pub struct ChutesEngine {
    pub warps: WarpMap,
    pub roll_limit: u32,
}

impl ChutesEngine {
    pub fn new(warps: WarpMap) -> Self {
        Self {
            warps,
            roll_limit: DEFAULT_ROLL_LIMIT,
        }
    }

    pub fn with_roll_limit(mut self, roll_limit: u32) -> Self {
        self.roll_limit = roll_limit;
        self
    }
}

impl Default for ChutesEngine {
    fn default() -> Self {
        Self::new(WarpMap::classic())
    }
}

impl TrialEngine for ChutesEngine {
    type Outcome = RaceResult;

    fn run_trial<R: RandomSource>(&self, rng: &mut R) -> Result<RaceResult, EngineError> {
        let mut result = RaceResult::default();
        let mut position = START;

        while position != FINISH {
            if result.rolls >= self.roll_limit {
                return Err(EngineError::RollLimit(self.roll_limit));
            }
            let roll = rng.uniform_int(1, DIE_FACES);
            result.rolls += 1;
            result.roll_history.push(roll as u8);

            let candidate = u32::from(position) + roll;
            if candidate > u32::from(FINISH) {
                continue;
            }
            let candidate = candidate as u8;
            position = match self.warps.lookup(candidate) {
                Some(Warp::Ladder(to)) => {
                    result.ladders += 1;
                    to
                }
                Some(Warp::Chute(to)) => {
                    result.chutes += 1;
                    to
                }
                None => candidate,
            };
            result.positions.push(position);
        }

        trace!(
            "chutes: finished in {} rolls ({} chutes, {} ladders)",
            result.rolls,
            result.chutes,
            result.ladders
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ScriptedSource;

    #[test]
    fn classic_board_passes_validation() {
        let validated = WarpMap::new(&CLASSIC_LADDERS, &CLASSIC_CHUTES).expect("valid board");
        assert_eq!(validated, WarpMap::classic());
        assert_eq!(validated.ladders().count(), 9);
        assert_eq!(validated.chutes().count(), 10);
    }

    #[test]
    fn overlapping_warps_are_rejected() {
        let err = WarpMap::new(&[(10, 20)], &[(10, 5)]).expect_err("overlap");
        assert_eq!(
            err,
            EngineError::InvalidWarp {
                from: 10,
                to: 5,
                reason: "square already has a warp"
            }
        );
    }

    #[test]
    fn backwards_ladder_is_rejected() {
        assert!(WarpMap::new(&[(30, 12)], &[]).is_err());
        assert!(WarpMap::new(&[], &[(12, 30)]).is_err());
        assert!(WarpMap::new(&[(0, 12)], &[]).is_err());
        assert!(WarpMap::new(&[(100, 3)], &[]).is_err());
        assert!(WarpMap::new(&[(5, 101)], &[]).is_err());
    }

    #[test]
    fn loaded_board_is_validated() {
        let json = serde_json::to_string(&WarpMap::classic()).expect("serialize");
        let loaded: WarpMap = serde_json::from_str(&json).expect("classic board loads");
        assert_eq!(loaded, WarpMap::classic());

        let backwards = r#"{"ladders":[[40,12]],"chutes":[]}"#;
        let err = serde_json::from_str::<WarpMap>(backwards).expect_err("backward ladder");
        assert!(err.to_string().contains("ladder must lead forward"));
    }

    #[test]
    fn overshooting_roll_is_void_but_counted() {
        let engine = ChutesEngine::new(WarpMap::empty());
        // 16 sixes reach 96, a 6 overshoots, then a 4 finishes.
        let mut script = vec![6; 16];
        script.extend([6, 4]);
        let result = engine
            .run_trial(&mut ScriptedSource::new(script))
            .expect("finish");
        assert_eq!(result.rolls, 18);
        assert_eq!(result.positions.len(), 17);
        assert_eq!(result.positions[15], 96);
        assert_eq!(result.positions.last(), Some(&FINISH));
    }

    #[test]
    fn unreachable_finish_hits_roll_limit() {
        // Squares 2..=7 all slide back to 1; alternating 1 and 6 never escapes.
        let chutes: Vec<(u8, u8)> = (2..=7).map(|square| (square, 1)).collect();
        let warps = WarpMap::new(&[], &chutes).expect("valid board");
        let engine = ChutesEngine::new(warps).with_roll_limit(50);
        let err = engine
            .run_trial(&mut ScriptedSource::new(vec![1, 6]))
            .expect_err("never finishes");
        assert_eq!(err, EngineError::RollLimit(50));
    }
}
