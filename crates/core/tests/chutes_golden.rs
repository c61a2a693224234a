use parlor_core::{
    ChutesEngine, RngState, ScriptedSource, TrialEngine, Warp, WarpMap, FINISH,
};

macro_rules! warp_case {
    ($name:ident, $square:expr, $expected:expr) => {
        #[test]
        fn $name() {
            assert_eq!(WarpMap::classic().destination($square), $expected);
        }
    };
}

warp_case!(ladder_from_1, 1, 38);
warp_case!(ladder_from_28, 28, 84);
warp_case!(ladder_from_82_finishes, 82, 100);
warp_case!(chute_from_16, 16, 6);
warp_case!(chute_from_87, 87, 24);
warp_case!(chute_from_98, 98, 78);
warp_case!(plain_square_2, 2, 2);
warp_case!(plain_square_99, 99, 99);

#[test]
fn scripted_race_replays_history() {
    let rolls = vec![6, 6, 6, 3, 5, 2, 6, 5, 6, 1];
    let result = ChutesEngine::default()
        .run_trial(&mut ScriptedSource::new(rolls.clone()))
        .expect("finish");
    assert_eq!(result.positions, vec![6, 12, 18, 42, 26, 84, 90, 75, 81, 100]);
    assert_eq!(
        result.roll_history,
        rolls.iter().map(|&roll| roll as u8).collect::<Vec<_>>()
    );
    assert_eq!(result.rolls, 10);
    assert_eq!(result.ladders, 3);
    assert_eq!(result.chutes, 2);
}

#[test]
fn void_roll_near_finish_keeps_position() {
    let rolls = vec![1, 6, 6, 1, 4, 6, 6, 1, 4];
    let result = ChutesEngine::default()
        .run_trial(&mut ScriptedSource::new(rolls))
        .expect("finish");
    // 97 + 6 overshoots, so the seventh roll adds no position.
    assert_eq!(result.positions, vec![38, 44, 50, 67, 91, 97, 78, 100]);
    assert_eq!(result.rolls, 9);
    assert_eq!(result.ladders, 4);
    assert_eq!(result.chutes, 1);
}

#[test]
fn positions_only_fall_through_chutes() {
    let engine = ChutesEngine::default();
    let warps = WarpMap::classic();
    for seed in 0..500u64 {
        let result = engine
            .run_trial(&mut RngState::from_seed(seed))
            .expect("finish");
        assert!(result.rolls <= 10_000);
        assert_eq!(result.roll_history.len() as u32, result.rolls);
        assert_eq!(result.positions.last(), Some(&FINISH));

        let mut previous = 0u8;
        for &position in &result.positions {
            assert!(position <= FINISH);
            if position < previous {
                let fell_through_chute = (previous + 1..=previous.saturating_add(6))
                    .any(|square| warps.lookup(square) == Some(Warp::Chute(position)));
                assert!(fell_through_chute, "{previous} -> {position}");
            }
            previous = position;
        }
    }
}
