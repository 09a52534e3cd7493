//! Property tests for the pure model: ranges, monotonicity, determinism.
//!
//! Pure logic only; nothing here touches a session.

use proptest::prelude::*;
use terrarium_logic::environment::{evaluate, Environment};
use terrarium_logic::growth::{size_for, stage_for, GrowthStage};
use terrarium_logic::needs::{catch_up, decay_step, DecayInput, Vitals};

fn stage_strategy() -> impl Strategy<Value = GrowthStage> {
    prop_oneof![
        Just(GrowthStage::Baby),
        Just(GrowthStage::Juvenile),
        Just(GrowthStage::Subadult),
        Just(GrowthStage::Adult),
    ]
}

fn vitals_strategy() -> impl Strategy<Value = Vitals> {
    (0.0f32..=100.0, 0.0f32..=100.0, 0.0f32..=100.0, 0.0f32..=100.0)
        .prop_map(|(h, u, y, p)| Vitals::new(h, u, y, p))
}

proptest! {
    #[test]
    fn decay_keeps_vitals_in_range(
        vitals in vitals_strategy(),
        stage in stage_strategy(),
        score in 0i32..=100,
        cleanliness in 0.0f32..=100.0,
        dt in 0.0f32..600.0,
    ) {
        let out = decay_step(&vitals, &DecayInput { dt, stage, environment_score: score, cleanliness });
        prop_assert!(out.vitals.in_range());
        prop_assert!((0.0..=100.0).contains(&out.cleanliness));
    }

    #[test]
    fn catch_up_keeps_vitals_in_range(vitals in vitals_strategy(), away in 0.0f32..1.0e7) {
        let after = catch_up(&vitals, away);
        prop_assert!(after.in_range());
        prop_assert!(after.hunger <= vitals.hunger);
        prop_assert_eq!(after.health, vitals.health);
    }

    #[test]
    fn size_is_monotonic(a in 0.0f32..2_000.0, b in 0.0f32..2_000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(size_for(lo) <= size_for(hi));
        prop_assert!((4.0..=24.0).contains(&size_for(lo)));
    }

    #[test]
    fn stage_is_monotonic(a in 0.0f32..2_000.0, b in 0.0f32..2_000.0) {
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(stage_for(lo) <= stage_for(hi));
        prop_assert_eq!(stage_for(a), stage_for(a));
    }

    #[test]
    fn environment_score_in_range_and_deterministic(
        basking in 50i32..150,
        cool in 50i32..120,
        humidity in 0i32..100,
        uvb_on in any::<bool>(),
        cleanliness in 0.0f32..=100.0,
    ) {
        let env = Environment { basking_temp: basking, cool_temp: cool, humidity, uvb_on };
        let first = evaluate(&env, cleanliness);
        let second = evaluate(&env, cleanliness);
        prop_assert!((0..=100).contains(&first.score));
        prop_assert_eq!(&first, &second);
        let penalty: i32 = first.issues.iter().map(|i| i.penalty()).sum();
        prop_assert_eq!(first.score, (100 - penalty).max(0));
    }
}

#[test]
fn size_continuous_just_below_each_breakpoint() {
    for breakpoint in [30.0_f32, 60.0, 180.0, 365.0] {
        let below = size_for(breakpoint - 1.0e-3);
        let at = size_for(breakpoint);
        assert!((at - below).abs() < 1.0e-2, "discontinuity at {breakpoint}");
    }
}
