//! Integration tests for a full session: lifecycle, persistence, movement
//! exclusion and the terminal state.
//!
//! All sessions run on scripted rolls and an in-memory store.

use proptest::prelude::*;
use terrarium_core::persistence::{decode, encode, SaveData, SAVE_VERSION};
use terrarium_core::prelude::*;
use terrarium_logic::rng::ScriptedRolls;

// ── Helpers ────────────────────────────────────────────────────────────

/// Rolls that never trigger any random branch.
fn quiet() -> ScriptedRolls {
    ScriptedRolls::constant(0.99)
}

fn session_with(store: MemoryStore, now_ms: u64) -> Session {
    Session::new(SimConfig::default(), store, now_ms)
        .expect("default config is valid")
        .with_random(quiet())
}

fn started(store: MemoryStore) -> Session {
    let mut session = session_with(store, 0);
    session.start("Spike", ColorMorph::Citrus);
    session
}

fn texts(reports: &[Report]) -> Vec<&str> {
    reports.iter().map(|r| r.text.as_str()).collect()
}

// ── Persistence ────────────────────────────────────────────────────────

#[test]
fn save_and_load_at_zero_elapsed_restores_state() {
    let store = MemoryStore::new();
    let mut original = started(store.clone());
    original.advance(45_000);
    original.feed(FoodKind::Collards).expect("fed");
    original.advance(2_000);
    original.set_environment(Environment {
        humidity: 45,
        ..Environment::default()
    });
    original.save().expect("saved");

    let mut restored = session_with(store, original.now_ms());
    let summary = restored.load().expect("loaded");
    assert_eq!(summary.seconds_away, 0.0);
    assert_eq!(summary.catch_up, 0.0);

    assert_eq!(restored.creature(), original.creature());
    assert_eq!(restored.habitat(), original.habitat());
    assert_eq!(restored.environment(), original.environment());
    assert_eq!(restored.state(), SessionState::Running);

    let reports = restored.drain_reports();
    assert_eq!(texts(&reports), vec!["Welcome back! Spike missed you!"]);
}

#[test]
fn load_after_absence_applies_catch_up_and_reports_minutes() {
    let store = MemoryStore::new();
    let mut original = started(store.clone());
    original.save().expect("saved");
    let before = original.creature().expect("dragon").vitals;

    // Ten minutes later.
    let mut restored = session_with(store, 600_000);
    let summary = restored.load().expect("loaded");
    assert_eq!(summary.seconds_away, 600.0);
    assert!((summary.catch_up - 6.0).abs() < 1e-4);

    let after = restored.creature().expect("dragon").vitals;
    assert!((after.hunger - (before.hunger - 6.0)).abs() < 1e-4);
    assert!((after.hydration - (before.hydration - 3.0)).abs() < 1e-4);
    assert!((after.happiness - (before.happiness - 1.8)).abs() < 1e-4);
    assert_eq!(after.health, before.health);

    let reports = restored.drain_reports();
    assert_eq!(
        texts(&reports),
        vec!["Welcome back! Spike missed you!", "You were away for 10 minutes."]
    );
}

#[test]
fn catch_up_is_capped() {
    let store = MemoryStore::new();
    let mut original = started(store.clone());
    original.save().expect("saved");

    let mut restored = session_with(store, 7 * 24 * 3_600_000);
    let summary = restored.load().expect("loaded");
    assert_eq!(summary.catch_up, 20.0);
    assert!((restored.creature().expect("dragon").vitals.hunger - 60.0).abs() < 1e-4);
}

#[test]
fn failed_load_leaves_session_untouched() {
    let mut empty = session_with(MemoryStore::new(), 0);
    assert!(matches!(empty.load(), Err(SaveError::NotFound)));
    assert_eq!(empty.state(), SessionState::NotStarted);
    assert!(empty.drain_reports().is_empty());

    let store = MemoryStore::new();
    let mut session = started(store.clone());
    session.advance(4_000);
    session.drain_reports();
    let before = session.creature().cloned();

    let mut corrupt = store.clone();
    corrupt.write(b"{\"version\": 1").expect("write");
    assert!(matches!(session.load(), Err(SaveError::Json(_))));
    assert_eq!(session.state(), SessionState::Running);
    assert_eq!(session.creature().cloned(), before);
    assert!(session.drain_reports().is_empty());
}

#[test]
fn wrong_version_is_rejected() {
    let store = MemoryStore::new();
    let mut original = started(store.clone());
    original.save().expect("saved");

    let bytes = store.read().expect("bytes");
    let mut data: SaveData = decode(&bytes, SaveFormat::Json).expect("decode");
    data.version = SAVE_VERSION + 1;
    let mut tampered = store.clone();
    tampered
        .write(&encode(&data, SaveFormat::Json).expect("encode"))
        .expect("write");

    let mut restored = session_with(store, 0);
    assert!(matches!(
        restored.load(),
        Err(SaveError::VersionMismatch { .. })
    ));
    assert_eq!(restored.state(), SessionState::NotStarted);
}

fn tamper(store: &MemoryStore, format: SaveFormat, edit: impl FnOnce(&mut SaveData)) {
    let bytes = store.read().expect("bytes");
    let mut data: SaveData = decode(&bytes, format).expect("decode");
    edit(&mut data);
    let mut writer = store.clone();
    writer
        .write(&encode(&data, format).expect("encode"))
        .expect("write");
}

#[test]
fn load_rebuilds_out_of_range_records() {
    let store = MemoryStore::new();
    let mut original = started(store.clone());
    original.save().expect("saved");

    tamper(&store, SaveFormat::Json, |data| {
        data.creature.vitals.health = 150.0;
        data.creature.vitals.hunger = -20.0;
        data.creature.age_days = 400;
        data.creature.size_inches = 99.0;
        // Sixty game days and change.
        data.creature.real_age_secs = 7_205.0;
        data.tank_cleanliness = 250.0;
    });

    let mut restored = session_with(store, 0);
    restored.load().expect("loaded");
    let creature = restored.creature().expect("dragon");
    assert!(creature.vitals.in_range());
    assert_eq!(creature.vitals.health, 100.0);
    assert_eq!(creature.vitals.hunger, 0.0);
    assert_eq!(creature.age_days, 60);
    assert_eq!(creature.counters.total_days_alive, 60);
    assert_eq!(creature.stage(), GrowthStage::Juvenile);
    assert_eq!(creature.size_inches, 12.0);
    assert_eq!(restored.habitat().cleanliness, 100.0);
}

#[test]
fn load_rejects_non_finite_records() {
    let store = MemoryStore::new();
    let config = SimConfig {
        save_format: SaveFormat::Bincode,
        ..SimConfig::default()
    };
    let mut original = Session::new(config.clone(), store.clone(), 0)
        .expect("valid")
        .with_random(quiet());
    original.start("Spike", ColorMorph::Hypo);

    tamper(&store, SaveFormat::Bincode, |data| {
        data.creature.vitals.happiness = f32::INFINITY;
    });

    let mut restored = Session::new(config, store, 0).expect("valid").with_random(quiet());
    assert!(matches!(
        restored.load(),
        Err(SaveError::InvalidRecord { field: "happiness" })
    ));
    assert_eq!(restored.state(), SessionState::NotStarted);
}

#[test]
fn bincode_sessions_round_trip() {
    let store = MemoryStore::new();
    let config = SimConfig {
        save_format: SaveFormat::Bincode,
        ..SimConfig::default()
    };
    let mut original = Session::new(config.clone(), store.clone(), 0)
        .expect("valid")
        .with_random(quiet());
    original.start("Spike", ColorMorph::Hypo);
    original.advance(12_000);
    original.save().expect("saved");

    let mut restored = Session::new(config, store, original.now_ms())
        .expect("valid")
        .with_random(quiet());
    restored.load().expect("loaded");
    assert_eq!(restored.creature(), original.creature());
}

#[test]
fn load_clears_walk_in_progress() {
    let store = MemoryStore::new();
    let mut original = started(store.clone());
    original.give_water().expect("water");
    assert!(original.creature().expect("dragon").is_moving());
    original.save().expect("saved");

    let mut restored = session_with(store, 0);
    restored.load().expect("loaded");
    let creature = restored.creature().expect("dragon");
    assert!(!creature.is_moving());
    assert_eq!(creature.position(), Position::Basking);
}

#[test]
fn autosave_every_thirty_seconds_of_age() {
    let store = MemoryStore::new();
    let mut session = started(store.clone());

    let mut slot = store.clone();
    slot.delete().expect("delete");
    session.advance(29_000);
    assert!(store.is_empty());
    session.advance(1_000);
    assert!(!store.is_empty());
}

#[test]
fn shutdown_writes_a_final_save() {
    let store = MemoryStore::new();
    let mut session = started(store.clone());
    session.advance(5_000);
    session.shutdown();

    let data = decode(&store.read().expect("bytes"), SaveFormat::Json).expect("decode");
    assert_eq!(data.saved_at_ms, 5_000);
    assert_eq!(Some(&data.creature), session.creature());
}

// ── Movement ───────────────────────────────────────────────────────────

#[test]
fn commands_while_walking_are_dropped() {
    let mut session = started(MemoryStore::new());
    session.give_water().expect("water");
    let target = session.creature().and_then(|c| c.locomotion.target());
    assert_eq!(target, Some(Position::Water));

    // Feeding still applies stats, but the walk to the dish is refused.
    session.feed(FoodKind::Crickets).expect("fed");
    assert_eq!(
        session.creature().and_then(|c| c.locomotion.target()),
        Some(Position::Water)
    );
    assert_eq!(session.play(), Err(ActionError::AlreadyMoving));

    session.advance(1_500);
    assert_eq!(session.creature().map(|c| c.position()), Some(Position::Water));
}

#[test]
fn urgent_decisions_are_announced_on_arrival() {
    let mut session = started(MemoryStore::new());
    session.set_vitals(Vitals::new(100.0, 10.0, 100.0, 100.0));
    session.drain_reports();

    // First poll at 3 s; basking -> food dish takes 800 ms.
    session.advance(3_800);
    assert_eq!(session.creature().map(|c| c.position()), Some(Position::Food));
    let reports = session.drain_reports();
    assert!(texts(&reports).contains(&"Spike moved to the food dish."));
}

// ── Terminal state ─────────────────────────────────────────────────────

#[test]
fn death_ends_session_once_and_deletes_save() {
    let store = MemoryStore::new();
    let mut session = started(store.clone());
    session.give_water().expect("water");
    session.set_vitals(Vitals::new(0.0, 5.0, 5.0, 50.0));
    session.drain_reports();

    session.advance(1_000);
    assert!(session.is_game_over());
    assert!(store.is_empty());
    let ticks = session.tick_count();

    // The walk to the water finishes but the dragon does not drink.
    session.advance(10_000);
    assert_eq!(session.tick_count(), ticks);
    let creature = session.creature().expect("dragon");
    assert_eq!(creature.position(), Position::Water);
    assert!((creature.vitals.hydration - 4.95).abs() < 1e-4);

    let reports = session.drain_reports();
    let deaths = reports.iter().filter(|r| r.topic == Topic::Death).count();
    assert_eq!(deaths, 2);
    assert!(!texts(&reports).contains(&"Spike drank some water!"));

    assert_eq!(session.feed(FoodKind::Dubia), Err(ActionError::GameOver));
    session.save().expect("saving a finished session is a no-op");
    assert!(store.is_empty());

    session.restart();
    session.start("Spike II", ColorMorph::Normal);
    assert_eq!(session.state(), SessionState::Running);
}

#[test]
fn neglect_drives_health_to_zero_once() {
    let store = MemoryStore::new();
    let mut session = started(store.clone());
    session.set_vitals(Vitals::new(1.0, 5.0, 5.0, 5.0));
    session.set_environment(Environment {
        basking_temp: 80,
        cool_temp: 70,
        humidity: 45,
        uvb_on: false,
    });
    assert_eq!(session.environment_report().score, 0);
    session.drain_reports();

    // Poor environment, starving and parched: -0.11 health per tick.
    session.advance(9_000);
    assert!(!session.is_game_over());
    session.advance(1_000);
    assert!(session.is_game_over());
    assert_eq!(session.tick_count(), 10);
    assert!(store.is_empty());

    session.advance(60_000);
    assert_eq!(session.tick_count(), 10);
    let reports = session.drain_reports();
    let deaths: Vec<_> = reports.iter().filter(|r| r.topic == Topic::Death).collect();
    assert_eq!(deaths.len(), 2);
    assert_eq!(deaths[0].kind, ReportKind::Notification);
    assert_eq!(deaths[1].text, "Spike lived for 0 days.");
}

// ── Properties ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy)]
enum Step {
    Advance(u64),
    Feed(usize),
    Water,
    Handle,
    Bath,
    Clean,
    Play,
    Pet,
    Environment(i32, i32, i32, bool),
}

fn step_strategy() -> impl Strategy<Value = Step> {
    prop_oneof![
        4 => (1u64..20_000).prop_map(Step::Advance),
        1 => (0usize..7).prop_map(Step::Feed),
        1 => Just(Step::Water),
        1 => Just(Step::Handle),
        1 => Just(Step::Bath),
        1 => Just(Step::Clean),
        1 => Just(Step::Play),
        1 => Just(Step::Pet),
        1 => (60i32..130, 60i32..100, 10i32..80, any::<bool>())
            .prop_map(|(b, c, h, u)| Step::Environment(b, c, h, u)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn vitals_stay_in_range(seed in any::<u64>(), steps in prop::collection::vec(step_strategy(), 1..40)) {
        let mut session = Session::new(SimConfig::seeded(seed), MemoryStore::new(), 0)
            .expect("valid config");
        session.start("Spike", ColorMorph::Normal);

        for step in steps {
            // Rejections are part of normal play.
            let _ = match step {
                Step::Advance(ms) => { session.advance(ms); Ok(()) }
                Step::Feed(i) => session.feed(FoodKind::ALL[i]),
                Step::Water => session.give_water(),
                Step::Handle => session.handle().map(|_| ()),
                Step::Bath => session.bathe(),
                Step::Clean => session.clean_tank(),
                Step::Play => session.play(),
                Step::Pet => session.pet(),
                Step::Environment(b, c, h, u) => {
                    session.set_environment(Environment { basking_temp: b, cool_temp: c, humidity: h, uvb_on: u });
                    Ok(())
                }
            };
            let creature = session.creature().expect("dragon");
            prop_assert!(creature.vitals.in_range());
            prop_assert!((0.0..=100.0).contains(&session.habitat().cleanliness));
            prop_assert!(session.recent_messages().count() <= 20);
        }
    }
}
