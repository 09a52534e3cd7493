//! Terrarium Headless Simulation Harness
//!
//! Validates the pure rules and full sessions without a renderer.
//! Runs entirely in-process on a virtual clock.
//!
//! Usage:
//!   cargo run -p terrarium-simtest
//!   cargo run -p terrarium-simtest -- --verbose
//!   cargo run -p terrarium-simtest -- --days 400 --seed 7 --config sim.toml

use std::path::{Path, PathBuf};

use clap::Parser;
use log::{debug, info};
use serde::Serialize;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use terrarium_core::error::ConfigError;
use terrarium_core::prelude::*;
use terrarium_logic::actions::{feed_delta, resolve_handling};
use terrarium_logic::behavior::{decide, priority, BehaviorInput};
use terrarium_logic::constants::timing;
use terrarium_logic::environment::{evaluate, EnvironmentIssue};
use terrarium_logic::growth::{size_for, stage_for};
use terrarium_logic::needs::{decay_step, DecayInput};
use terrarium_logic::rng::{create_rng, ScriptedRolls};

/// Headless harness - scripted checks plus an optional long-run simulation
#[derive(Parser, Debug)]
#[command(name = "terrarium-simtest")]
#[command(about = "Validate Terrarium rules and sessions without a renderer")]
struct Args {
    /// Print every check, not just failures
    #[arg(long, short = 'v')]
    verbose: bool,

    /// Seed for the long run (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Game days to simulate with an automated keeper (0 skips the long run)
    #[arg(long, default_value_t = 0)]
    days: u32,

    /// TOML file with session settings
    #[arg(long)]
    config: Option<PathBuf>,

    /// Save the long-run session to this file instead of memory
    #[arg(long)]
    save_path: Option<PathBuf>,

    /// Print the long-run summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Error, Debug)]
enum HarnessError {
    #[error("cannot read {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config file: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Config(#[from] ConfigError),

    #[error("save error: {0}")]
    Save(#[from] SaveError),
}

// ── Test harness ────────────────────────────────────────────────────────

struct TestResult {
    name: String,
    passed: bool,
    detail: String,
}

impl TestResult {
    fn check(name: &str, passed: bool, detail: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            passed,
            detail: detail.into(),
        }
    }
}

fn main() {
    let args = Args::parse();
    init_logging(args.verbose);
    println!("=== Terrarium Simulation Harness ===\n");

    let config = match load_config(args.config.as_deref(), args.seed) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("error: {e}");
            std::process::exit(2);
        }
    };

    let mut results = Vec::new();

    // 1. Environment scoring
    results.extend(validate_environment());

    // 2. Growth curve
    results.extend(validate_growth());

    // 3. Needs decay
    results.extend(validate_needs());

    // 4. Behavior decisions
    results.extend(validate_behavior());

    // 5. Keeper actions
    results.extend(validate_actions());

    // 6. Session lifecycle
    results.extend(validate_session());

    // 7. Long run
    if args.days > 0 {
        match long_run(&config, args.days, args.save_path.as_deref()) {
            Ok((summary, checks)) => {
                results.extend(checks);
                print_summary(&summary, args.json);
            }
            Err(e) => results.push(TestResult::check("long_run", false, e.to_string())),
        }
    }

    // ── Summary ──
    println!();
    let passed = results.iter().filter(|r| r.passed).count();
    let failed = results.iter().filter(|r| !r.passed).count();
    let total = results.len();

    for r in &results {
        let icon = if r.passed { "✓" } else { "✗" };
        if !r.passed || args.verbose {
            println!("  {} {}: {}", icon, r.name, r.detail);
        }
    }

    println!(
        "\n=== RESULT: {}/{} passed, {} failed ===",
        passed, total, failed
    );

    if failed > 0 {
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose {
        "terrarium_core=debug,terrarium_simtest=debug"
    } else {
        "terrarium_core=info,terrarium_simtest=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn load_config(path: Option<&Path>, seed: Option<u64>) -> Result<SimConfig, HarnessError> {
    let mut config = match path {
        Some(path) => {
            let text = std::fs::read_to_string(path).map_err(|source| HarnessError::Io {
                path: path.to_path_buf(),
                source,
            })?;
            toml::from_str::<SimConfig>(&text)?
        }
        None => SimConfig::default(),
    };
    if seed.is_some() {
        config.seed = seed;
    }
    config.validate()?;
    debug!("config: {:?}", config);
    Ok(config)
}

// ── 1. Environment ──────────────────────────────────────────────────────

fn validate_environment() -> Vec<TestResult> {
    println!("--- Environment ---");
    let mut results = Vec::new();

    let ideal = evaluate(&Environment::default(), 100.0);
    results.push(TestResult::check(
        "env_ideal_scores_100",
        ideal.score == 100 && ideal.issues.is_empty(),
        format!("score {} with {} issues", ideal.score, ideal.issues.len()),
    ));

    let neglected = Environment {
        basking_temp: 80,
        cool_temp: 70,
        humidity: 45,
        uvb_on: false,
    };
    let report = evaluate(&neglected, 40.0);
    let expected = [
        EnvironmentIssue::BaskingTooCold,
        EnvironmentIssue::CoolSideTooCold,
        EnvironmentIssue::HumidityTooHigh,
        EnvironmentIssue::UvbOff,
        EnvironmentIssue::TankDirty,
    ];
    results.push(TestResult::check(
        "env_neglected_floors_at_zero",
        report.score == 0 && report.issues == expected,
        format!("score {}, issues {:?}", report.score, report.issues),
    ));

    let mut in_range = true;
    for basking in (60..=140).step_by(5) {
        for humidity in (0..=100).step_by(10) {
            let env = Environment {
                basking_temp: basking,
                humidity,
                ..Environment::default()
            };
            let score = evaluate(&env, 75.0).score;
            in_range &= (0..=100).contains(&score);
        }
    }
    results.push(TestResult::check(
        "env_score_range_sweep",
        in_range,
        "all scores within 0..=100",
    ));

    results
}

// ── 2. Growth ───────────────────────────────────────────────────────────

fn validate_growth() -> Vec<TestResult> {
    println!("--- Growth ---");
    let mut results = Vec::new();

    let stages = [
        (0.0, GrowthStage::Baby),
        (59.0, GrowthStage::Baby),
        (60.0, GrowthStage::Juvenile),
        (180.0, GrowthStage::Subadult),
        (365.0, GrowthStage::Adult),
    ];
    let wrong: Vec<_> = stages
        .iter()
        .filter(|(days, stage)| stage_for(*days) != *stage)
        .collect();
    results.push(TestResult::check(
        "growth_stage_boundaries",
        wrong.is_empty(),
        format!("{} mismatches", wrong.len()),
    ));

    let mut monotonic = true;
    let mut previous = size_for(0.0);
    for day in 1..=800 {
        let size = size_for(day as f32);
        monotonic &= size >= previous;
        previous = size;
    }
    results.push(TestResult::check(
        "growth_size_monotonic",
        monotonic && (size_for(0.0) - 4.0).abs() < 1e-6,
        format!("size at day 800: {:.1} in", previous),
    ));

    results
}

// ── 3. Needs ────────────────────────────────────────────────────────────

fn validate_needs() -> Vec<TestResult> {
    println!("--- Needs ---");
    let mut results = Vec::new();

    let mut vitals = Vitals::default();
    let mut cleanliness = 100.0;
    let mut in_range = true;
    for _ in 0..3_600 {
        let out = decay_step(
            &vitals,
            &DecayInput {
                dt: 1.0,
                stage: GrowthStage::Baby,
                environment_score: 20,
                cleanliness,
            },
        );
        vitals = out.vitals;
        cleanliness = out.cleanliness;
        in_range &= vitals.in_range();
    }
    results.push(TestResult::check(
        "needs_hour_of_neglect_stays_in_range",
        in_range && vitals.is_depleted(),
        format!(
            "health {:.1}, hunger {:.1}, tank {:.1}",
            vitals.health, vitals.hunger, cleanliness
        ),
    ));

    results
}

// ── 4. Behavior ─────────────────────────────────────────────────────────

fn validate_behavior() -> Vec<TestResult> {
    println!("--- Behavior ---");
    let mut results = Vec::new();

    let base = BehaviorInput {
        hunger: 80.0,
        hydration: 80.0,
        happiness: 80.0,
        environment: Environment::default(),
        current: Position::Basking,
    };

    let hungry = decide(
        &BehaviorInput {
            hunger: 10.0,
            hydration: 10.0,
            ..base
        },
        &mut ScriptedRolls::constant(0.0),
    );
    results.push(TestResult::check(
        "behavior_hunger_beats_thirst",
        hungry.map(|d| (d.target, d.priority)) == Some((Position::Food, priority::HUNGER)),
        format!("{:?}", hungry),
    ));

    let cold = Environment {
        basking_temp: 90,
        ..Environment::default()
    };
    let cold_at_bask = decide(
        &BehaviorInput {
            environment: cold,
            ..base
        },
        &mut ScriptedRolls::constant(0.99),
    );
    let cold_at_hide = decide(
        &BehaviorInput {
            environment: cold,
            current: Position::Hide,
            ..base
        },
        &mut ScriptedRolls::constant(0.99),
    );
    results.push(TestResult::check(
        "behavior_cold_seeks_basking",
        cold_at_bask.is_none()
            && cold_at_hide.map(|d| d.target) == Some(Position::Basking),
        format!("at basking {:?}, at hide {:?}", cold_at_bask, cold_at_hide),
    ));

    // Seeded sweep: wandering never targets the current position.
    let mut rng = create_rng(42);
    let mut self_targets = 0;
    let mut moves = 0;
    for i in 0..5_000 {
        let current = Position::ALL[i % Position::ALL.len()];
        if let Some(d) = decide(&BehaviorInput { current, ..base }, &mut rng) {
            moves += 1;
            if d.target == current {
                self_targets += 1;
            }
        }
    }
    results.push(TestResult::check(
        "behavior_wander_sweep",
        self_targets == 0 && moves > 0,
        format!("{} moves, {} to current position", moves, self_targets),
    ));

    results
}

// ── 5. Actions ──────────────────────────────────────────────────────────

fn validate_actions() -> Vec<TestResult> {
    println!("--- Actions ---");
    let mut results = Vec::new();

    let d = feed_delta(FoodKind::Hornworms, GrowthStage::Baby);
    results.push(TestResult::check(
        "actions_baby_hornworms",
        (d.hunger - 30.0).abs() < 1e-4 && (d.health - 6.0).abs() < 1e-4 && d.happiness == 15.0,
        format!("hunger +{}, health +{}, happiness +{}", d.hunger, d.health, d.happiness),
    ));

    let stressed = (0..100)
        .map(|i| resolve_handling(GrowthStage::Baby, i as f64 / 100.0))
        .filter(|o| matches!(o, HandleOutcome::Stressed { .. }))
        .count();
    results.push(TestResult::check(
        "actions_baby_stress_rate",
        stressed == 30,
        format!("{stressed}/100 rolls stressed"),
    ));

    results
}

// ── 6. Session ──────────────────────────────────────────────────────────

fn quiet_session(store: MemoryStore) -> Result<Session, HarnessError> {
    Ok(Session::new(SimConfig::default(), store, 0)?.with_random(ScriptedRolls::constant(0.99)))
}

fn validate_session() -> Vec<TestResult> {
    println!("--- Session ---");
    match session_checks() {
        Ok(results) => results,
        Err(e) => vec![TestResult::check("session_setup", false, e.to_string())],
    }
}

fn session_checks() -> Result<Vec<TestResult>, HarnessError> {
    let mut results = Vec::new();

    // Handling cooldown
    let mut session = quiet_session(MemoryStore::new())?;
    session.start("Spike", ColorMorph::Normal);
    let first = session.handle();
    session.advance(5_000);
    let handled_before = session.creature().map(|c| c.counters.times_handled);
    let second = session.handle();
    let handled_after = session.creature().map(|c| c.counters.times_handled);
    results.push(TestResult::check(
        "session_handle_cooldown",
        first.is_ok()
            && matches!(second, Err(ActionError::HandlingCooldown { .. }))
            && handled_before == handled_after,
        format!("second handle: {:?}", second),
    ));

    // Movement exclusion
    let mut session = quiet_session(MemoryStore::new())?;
    session.start("Spike", ColorMorph::Normal);
    let _ = session.give_water();
    let play = session.play();
    results.push(TestResult::check(
        "session_single_walk",
        play == Err(ActionError::AlreadyMoving),
        format!("play while walking: {:?}", play),
    ));

    // Save/load round trip
    let store = MemoryStore::new();
    let mut original = quiet_session(store.clone())?;
    original.start("Spike", ColorMorph::Leatherback);
    original.advance(95_000);
    original.save()?;
    let mut restored = Session::new(SimConfig::default(), store, original.now_ms())?;
    restored.load()?;
    results.push(TestResult::check(
        "session_save_load_identity",
        restored.creature() == original.creature() && restored.habitat() == original.habitat(),
        format!("restored at {} ms", restored.now_ms()),
    ));

    // Terminal state
    let store = MemoryStore::new();
    let mut session = quiet_session(store.clone())?;
    session.start("Spike", ColorMorph::Normal);
    session.set_vitals(Vitals::new(0.0, 5.0, 5.0, 50.0));
    session.advance(1_000);
    let ticks = session.tick_count();
    session.advance(30_000);
    let deaths = session
        .drain_reports()
        .iter()
        .filter(|r| r.topic == Topic::Death)
        .count();
    results.push(TestResult::check(
        "session_game_over_once",
        session.is_game_over() && session.tick_count() == ticks && deaths == 2 && store.is_empty(),
        format!("{} ticks, {} death reports", session.tick_count(), deaths),
    ));

    Ok(results)
}

// ── 7. Long run ─────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
struct RunSummary {
    name: String,
    alive: bool,
    age_days: u32,
    stage: GrowthStage,
    size_inches: f32,
    mood: Mood,
    vitals: Vitals,
    meals_eaten: u32,
    times_handled: u32,
    ticks: u64,
    reports: usize,
}

/// Simulate `days` game days with a keeper who feeds, waters and cleans when
/// things run low.
fn long_run(
    config: &SimConfig,
    days: u32,
    save_path: Option<&Path>,
) -> Result<(RunSummary, Vec<TestResult>), HarnessError> {
    println!("--- Long run ({days} days) ---");
    let mut session = match save_path {
        Some(path) => Session::new(config.clone(), FileStore::new(path), 0)?,
        None => Session::new(config.clone(), MemoryStore::new(), 0)?,
    };
    session.start("Spike", ColorMorph::Normal);
    info!("long run: {} game days, seed {:?}", days, config.seed);

    let total_ms = u64::from(days) * (timing::SECONDS_PER_GAME_DAY as u64) * 1_000;
    let step_ms = config.tick_ms * 10;
    let mut elapsed = 0;
    let mut reports = 0;
    let mut in_range = true;

    while elapsed < total_ms && !session.is_game_over() {
        session.advance(step_ms);
        elapsed += step_ms;
        reports += session.drain_reports().len();
        session.drain_cues();

        let Some(creature) = session.creature() else {
            break;
        };
        in_range &= creature.vitals.in_range();
        let vitals = creature.vitals;
        let food = if creature.stage().prefers_insects() {
            FoodKind::Dubia
        } else {
            FoodKind::Collards
        };

        // Keeper policy. Rejections (walking, asleep) are expected.
        if vitals.hunger < 40.0 {
            let _ = session.feed(food);
        }
        if vitals.hydration < 40.0 {
            let _ = session.give_water();
        }
        if session.habitat().cleanliness < 60.0 {
            let _ = session.clean_tank();
        }
        if vitals.happiness < 50.0 {
            let _ = session.pet();
        }
    }
    session.shutdown();

    let Some(creature) = session.creature() else {
        return Err(HarnessError::Save(SaveError::NoCreature));
    };
    let summary = RunSummary {
        name: creature.name.clone(),
        alive: !session.is_game_over(),
        age_days: creature.age_days,
        stage: creature.stage(),
        size_inches: creature.size_inches,
        mood: creature.mood,
        vitals: creature.vitals,
        meals_eaten: creature.counters.meals_eaten,
        times_handled: creature.counters.times_handled,
        ticks: session.tick_count(),
        reports,
    };

    let results = vec![
        TestResult::check(
            "long_run_vitals_in_range",
            in_range,
            "vitals stayed within 0..=100",
        ),
        TestResult::check(
            "long_run_cared_for_dragon_survives",
            summary.alive && summary.age_days >= days,
            format!("reached day {} ({})", summary.age_days, summary.stage),
        ),
    ];
    Ok((summary, results))
}

fn print_summary(summary: &RunSummary, json: bool) {
    if json {
        match serde_json::to_string_pretty(summary) {
            Ok(text) => println!("{text}"),
            Err(e) => eprintln!("cannot encode summary: {e}"),
        }
        return;
    }
    println!(
        "  {} - day {}, {} ({:.1} in), mood {}",
        summary.name,
        summary.age_days,
        summary.stage,
        summary.size_inches,
        summary.mood.label()
    );
    println!(
        "  health {:.0} hunger {:.0} hydration {:.0} happiness {:.0}",
        summary.vitals.health, summary.vitals.hunger, summary.vitals.hydration, summary.vitals.happiness
    );
    println!(
        "  {} meals, {} ticks, {} reports",
        summary.meals_eaten, summary.ticks, summary.reports
    );
}
