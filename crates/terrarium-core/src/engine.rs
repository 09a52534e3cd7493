//! Session engine - main entry point for running a terrarium.
//!
//! A [`Session`] owns one dragon and everything around it. Time only moves
//! when the host calls [`Session::advance`], which replays every event due in
//! the interval (walk arrivals, delayed commands, the simulation tick, the
//! idle-animation timer) in timestamp order.

use log::{debug, info, warn};

use terrarium_logic::behavior::priority;
use terrarium_logic::clock;
use terrarium_logic::constants::timing;
use terrarium_logic::environment::{evaluate, Environment, EnvironmentReport};
use terrarium_logic::idle::{head_bob_count, pick_idle_animation, IdleAnimation, IDLE_CHANCE};
use terrarium_logic::movement::Position;
use terrarium_logic::needs::{catch_up, catch_up_amount, Vitals};
use terrarium_logic::rng::{create_rng, entropy_rng, RandomSource};

use crate::components::*;
use crate::config::SimConfig;
use crate::error::{ActionError, ActionResult, ConfigError, SaveError};
use crate::persistence::{self, SaveData, SaveStore};
use crate::systems::*;

/// Route walked during play, one leg per entry.
pub const PLAY_ROUTE: [Position; 4] = [
    Position::Center,
    Position::CoolSide,
    Position::Basking,
    Position::Center,
];

/// Where a session is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No dragon yet: call `start` or `load`.
    NotStarted,
    Running,
    /// The dragon has died. Only `restart` leaves this state.
    GameOver,
}

/// What a successful load found.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LoadSummary {
    /// Seconds between the save and the load.
    pub seconds_away: f32,
    /// Catch-up decay applied to hunger (hydration and happiness take less).
    pub catch_up: f32,
}

/// Main session engine
pub struct Session {
    config: SimConfig,
    pub(crate) creature: Option<Creature>,
    pub(crate) habitat: Habitat,
    environment: Environment,
    pub(crate) reports: ReportLog,
    pub(crate) timers: TimerQueue,
    planner: BehaviorPlanner,
    pub(crate) rng: Box<dyn RandomSource + Send>,
    store: Box<dyn SaveStore + Send>,
    state: SessionState,

    // Clock
    now_ms: u64,
    last_update_ms: u64,
    next_tick_ms: Option<u64>,
    next_idle_ms: Option<u64>,
    pub(crate) last_handled_ms: Option<u64>,
    last_autosave_slot: u64,
    ticks: u64,
}

impl Session {
    /// Create an empty session whose clock reads `now_ms`.
    pub fn new(
        config: SimConfig,
        store: impl SaveStore + Send + 'static,
        now_ms: u64,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng: Box<dyn RandomSource + Send> = match config.seed {
            Some(seed) => Box::new(create_rng(seed)),
            None => Box::new(entropy_rng()),
        };
        Ok(Self {
            planner: BehaviorPlanner::new(config.behavior_poll_ms, now_ms),
            config,
            creature: None,
            habitat: Habitat::default(),
            environment: Environment::default(),
            reports: ReportLog::new(),
            timers: TimerQueue::new(),
            rng,
            store: Box::new(store),
            state: SessionState::NotStarted,
            now_ms,
            last_update_ms: now_ms,
            next_tick_ms: None,
            next_idle_ms: None,
            last_handled_ms: None,
            last_autosave_slot: 0,
            ticks: 0,
        })
    }

    /// Replace the random source, e.g. with scripted rolls in tests.
    pub fn with_random(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Box::new(rng);
        self
    }

    // ---------------------------------------------------------------------
    // Lifecycle
    // ---------------------------------------------------------------------

    /// Hatch a new dragon and start the clock. Replaces any current dragon.
    /// A finished session ignores this until `restart` is called.
    pub fn start(&mut self, name: &str, color: ColorMorph) {
        if self.state == SessionState::GameOver {
            warn!("start ignored: session is over, restart first");
            return;
        }
        let creature = Creature::hatch(name, color);
        let name = creature.name.clone();
        info!("Hatched {} ({:?})", name, color);

        self.creature = Some(creature);
        self.habitat = Habitat::default();
        self.last_autosave_slot = 0;
        self.begin_running();

        let now = self.now_ms;
        self.reports.message(
            now,
            ReportLevel::Success,
            Topic::Lifecycle,
            format!("Welcome {name}! Your bearded dragon adventure begins!"),
        );
        self.reports
            .notify(now, ReportLevel::Success, Topic::Lifecycle, format!("{name} has hatched!"));

        self.autosave();
    }

    /// Resume from the store. On any failure the session is left untouched.
    pub fn load(&mut self) -> Result<LoadSummary, SaveError> {
        let bytes = self.store.read()?;
        let data = persistence::decode(&bytes, self.config.save_format)?;
        data.check_finite()?;

        let seconds_away = data.seconds_since(self.now_ms);
        let habitat = data.habitat();
        let mut creature = data.creature;
        creature.rederive();
        creature.vitals = catch_up(&creature.vitals, seconds_away);
        creature.locomotion.settle();
        creature.refresh_mood();
        let name = creature.name.clone();
        info!("Loaded {} after {:.0}s away", name, seconds_away);

        self.last_autosave_slot = clock::whole_seconds(creature.real_age_secs) / self.config.autosave_every_secs;
        self.creature = Some(creature);
        self.habitat = habitat;
        self.environment = data.environment;
        self.begin_running();

        let now = self.now_ms;
        self.reports.message(
            now,
            ReportLevel::Success,
            Topic::Lifecycle,
            format!("Welcome back! {name} missed you!"),
        );
        if seconds_away > timing::AWAY_NOTICE_SECS {
            let minutes = (seconds_away / 60.0).round() as u64;
            self.reports.message(
                now,
                ReportLevel::Info,
                Topic::Lifecycle,
                format!("You were away for {minutes} minutes."),
            );
        }

        Ok(LoadSummary {
            seconds_away,
            catch_up: catch_up_amount(seconds_away),
        })
    }

    /// Persist the current dragon. A finished session has nothing to save.
    pub fn save(&mut self) -> Result<(), SaveError> {
        if self.state == SessionState::GameOver {
            debug!("save skipped: session is over");
            return Ok(());
        }
        let creature = self.creature.as_ref().ok_or(SaveError::NoCreature)?;
        let data = SaveData::new(creature, &self.habitat, self.environment, self.now_ms);
        let bytes = persistence::encode(&data, self.config.save_format)?;
        self.store.write(&bytes)
    }

    /// Teardown save. Best effort.
    pub fn shutdown(&mut self) {
        if self.state != SessionState::Running {
            return;
        }
        if let Err(e) = self.save() {
            warn!("Teardown save failed: {}", e);
        }
    }

    /// Forget the dragon and return to the start screen state.
    pub fn restart(&mut self) {
        info!("Session restarted");
        self.creature = None;
        self.habitat = Habitat::default();
        self.timers.clear();
        self.reports.clear();
        self.state = SessionState::NotStarted;
        self.next_tick_ms = None;
        self.next_idle_ms = None;
        self.last_handled_ms = None;
        self.last_autosave_slot = 0;
    }

    fn begin_running(&mut self) {
        let now = self.now_ms;
        self.state = SessionState::Running;
        self.timers.clear();
        self.last_update_ms = now;
        self.next_tick_ms = Some(now + self.config.tick_ms);
        self.next_idle_ms = Some(now + self.config.idle_animation_ms);
        self.planner = BehaviorPlanner::new(self.config.behavior_poll_ms, now);
        self.last_handled_ms = None;
    }

    // ---------------------------------------------------------------------
    // Clock
    // ---------------------------------------------------------------------

    /// Advance the session clock by `ms`, firing every event due on the way.
    ///
    /// Events sharing a timestamp run as: walk completion, delayed commands,
    /// tick, idle animation.
    pub fn advance(&mut self, ms: u64) {
        let target = self.now_ms.saturating_add(ms);

        while let Some(at) = self.next_event().filter(|&at| at <= target) {
            self.now_ms = at;

            self.complete_movement();

            for timer in self.timers.pop_due(at) {
                self.run_command(timer.command);
            }

            if self.next_tick_ms == Some(at) {
                self.next_tick_ms = Some(at + self.config.tick_ms);
                self.tick();
            }

            if self.next_idle_ms == Some(at) {
                self.next_idle_ms = Some(at + self.config.idle_animation_ms);
                self.idle_animation();
            }
        }

        self.now_ms = target;
    }

    fn next_event(&self) -> Option<u64> {
        let arrival = self.creature.as_ref().and_then(next_arrival);
        [arrival, self.timers.next_due(), self.next_tick_ms, self.next_idle_ms]
            .into_iter()
            .flatten()
            .min()
    }

    // ---------------------------------------------------------------------
    // Tick
    // ---------------------------------------------------------------------

    fn tick(&mut self) {
        let now = self.now_ms;
        let dt = now.saturating_sub(self.last_update_ms) as f64 / 1000.0;
        self.last_update_ms = now;
        self.ticks += 1;

        let Some(creature) = self.creature.as_mut() else {
            return;
        };
        let name = creature.name.clone();

        // T0: age, stage, size, daily counters
        let progress = creature.advance_age(dt);
        if let Some(stage) = progress.grew_into {
            info!("{} grew into a {}", name, stage);
            self.reports.notify(
                now,
                ReportLevel::Success,
                Topic::Growth,
                format!("{name} has grown into a {stage}!"),
            );
            self.reports
                .message(now, ReportLevel::Success, Topic::Growth, format!("{name} is now a {stage}!"));
        }

        // T1: day/night cycle and UVB accounting
        let night = self.habitat.advance_cycle(dt as f32, self.environment.uvb_on);

        // T2: environment, decay, mood
        let environment = evaluate(&self.environment, self.habitat.cleanliness);
        needs_system(creature, &mut self.habitat, &environment, dt as f32);
        creature.refresh_mood();

        // T3: sleep
        let sleep_change = sleep_system(creature, night);
        if sleep_change.is_some() {
            creature.refresh_mood();
        }
        match sleep_change {
            Some(SleepChange::FellAsleep) => {
                self.reports
                    .message(now, ReportLevel::Info, Topic::Sleep, format!("{name} fell asleep."));
            }
            Some(SleepChange::WokeUp) => {
                self.reports
                    .message(now, ReportLevel::Info, Topic::Sleep, format!("{name} woke up!"));
            }
            None => {}
        }

        // T4: warnings
        warning_system(creature, &environment, &mut *self.rng, &mut self.reports, now);

        if creature.vitals.is_depleted() {
            self.game_over();
            return;
        }

        // T5: autonomous behavior
        let decision = self
            .planner
            .poll(creature, self.environment, &mut *self.rng, now);
        let whole_seconds = clock::whole_seconds(creature.real_age_secs);
        if let Some(decision) = decision {
            self.start_move(
                decision.target,
                Arrival::Wander {
                    priority: decision.priority,
                },
            );
        }

        // T6: autosave
        let slot = whole_seconds / self.config.autosave_every_secs;
        if slot > self.last_autosave_slot {
            self.last_autosave_slot = slot;
            self.autosave();
        }
    }

    fn game_over(&mut self) {
        if self.state == SessionState::GameOver {
            return;
        }
        self.state = SessionState::GameOver;
        self.next_tick_ms = None;
        self.next_idle_ms = None;
        self.timers.clear();

        let now = self.now_ms;
        if let Some(creature) = &self.creature {
            let name = &creature.name;
            info!("{} died after {} days", name, creature.age_days);
            self.reports.notify(
                now,
                ReportLevel::Danger,
                Topic::Death,
                format!("{name} has passed away..."),
            );
            self.reports.message(
                now,
                ReportLevel::Danger,
                Topic::Death,
                format!("{name} lived for {} days.", creature.age_days),
            );
        }

        if let Err(e) = self.store.delete() {
            warn!("Failed to delete save after game over: {}", e);
        }
    }

    fn autosave(&mut self) {
        match self.save() {
            Ok(()) => debug!("Autosaved at {} ms", self.now_ms),
            Err(e) => warn!("Autosave failed: {}", e),
        }
    }

    // ---------------------------------------------------------------------
    // Movement
    // ---------------------------------------------------------------------

    /// Ask the dragon to walk to `target`; `arrival` runs when it gets there.
    pub(crate) fn start_move(&mut self, target: Position, arrival: Arrival) {
        let now = self.now_ms;
        let Some(creature) = self.creature.as_mut() else {
            return;
        };
        match request_move(creature, target, now, arrival) {
            MoveRequest::Started(_) => {}
            MoveRequest::AlreadyThere(arrival) => self.run_arrival(arrival, target),
            MoveRequest::Busy | MoveRequest::Asleep => {
                debug!("walk to {:?} dropped", target);
            }
        }
    }

    fn complete_movement(&mut self) {
        let now = self.now_ms;
        let Some(creature) = self.creature.as_mut() else {
            return;
        };
        let Some(travel) = complete_move(creature, now) else {
            return;
        };
        if self.state == SessionState::Running {
            self.run_arrival(travel.arrival, travel.to);
        }
    }

    fn run_command(&mut self, command: Command) {
        match command {
            Command::MoveTo { target, arrival } => self.start_move(target, arrival),
        }
    }

    fn run_arrival(&mut self, arrival: Arrival, at: Position) {
        let now = self.now_ms;
        let Some(creature) = self.creature.as_mut() else {
            return;
        };
        let name = creature.name.clone();

        match arrival {
            Arrival::Settle => {}
            Arrival::Eat => self.reports.cue(now, CueKind::Eating),
            Arrival::Drink => {
                creature.vitals.apply(&terrarium_logic::actions::drink_delta());
                let count = head_bob_count(creature.vitals.happiness);
                self.reports.cue(now, CueKind::HeadBob { count });
                self.reports
                    .message(now, ReportLevel::Info, Topic::Water, format!("{name} drank some water!"));
            }
            Arrival::Wander { priority } => {
                if priority >= priority::ANNOUNCE {
                    self.reports.message(
                        now,
                        ReportLevel::Info,
                        Topic::Movement,
                        format!("{name} moved to the {}.", at.display_name()),
                    );
                }
            }
            Arrival::PlayLeg { leg } => match PLAY_ROUTE.get(leg + 1) {
                Some(&next) => {
                    self.timers.schedule(
                        now + timing::PLAY_STEP_PAUSE_MS,
                        Command::MoveTo {
                            target: next,
                            arrival: Arrival::PlayLeg { leg: leg + 1 },
                        },
                    );
                }
                None => {
                    creature.vitals.apply(&terrarium_logic::actions::play_delta());
                    self.reports
                        .message(now, ReportLevel::Success, Topic::Play, format!("{name} had fun playing!"));
                }
            },
        }
    }

    // ---------------------------------------------------------------------
    // Idle animation
    // ---------------------------------------------------------------------

    fn idle_animation(&mut self) {
        let now = self.now_ms;
        let Some(creature) = self.creature.as_ref() else {
            return;
        };
        if creature.asleep || !self.rng.chance(IDLE_CHANCE) || creature.is_moving() {
            return;
        }
        let kind = match pick_idle_animation(self.rng.roll()) {
            Some(IdleAnimation::HeadBob) => CueKind::HeadBob {
                count: head_bob_count(creature.vitals.happiness),
            },
            Some(IdleAnimation::ArmWave) => CueKind::ArmWave,
            Some(IdleAnimation::LookAround) => CueKind::LookAround,
            Some(IdleAnimation::TailFlick) => CueKind::TailFlick,
            Some(IdleAnimation::TongueFlick) => CueKind::TongueFlick,
            None => return,
        };
        self.reports.cue(now, kind);
    }

    // ---------------------------------------------------------------------
    // Host interface
    // ---------------------------------------------------------------------

    /// Latest enclosure settings from the keeper's controls.
    pub fn set_environment(&mut self, environment: Environment) {
        self.environment = environment;
    }

    pub fn environment(&self) -> Environment {
        self.environment
    }

    /// Current score and issues for the enclosure.
    pub fn environment_report(&self) -> EnvironmentReport {
        evaluate(&self.environment, self.habitat.cleanliness)
    }

    /// Overwrite the dragon's vitals, clamped into range. For editors and
    /// scripted scenarios.
    pub fn set_vitals(&mut self, vitals: Vitals) {
        if let Some(creature) = self.creature.as_mut() {
            creature.vitals = Vitals::new(vitals.health, vitals.hunger, vitals.hydration, vitals.happiness);
        }
    }

    pub fn creature(&self) -> Option<&Creature> {
        self.creature.as_ref()
    }

    pub fn habitat(&self) -> &Habitat {
        &self.habitat
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    /// Session clock in milliseconds.
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Simulation ticks run so far.
    pub fn tick_count(&self) -> u64 {
        self.ticks
    }

    /// Delayed commands still waiting to fire.
    pub fn pending_commands(&self) -> usize {
        self.timers.len()
    }

    pub fn drain_reports(&mut self) -> Vec<Report> {
        self.reports.drain_reports()
    }

    pub fn drain_cues(&mut self) -> Vec<Cue> {
        self.reports.drain_cues()
    }

    pub fn flush_reports(&mut self, sink: &mut dyn ReportSink) {
        self.reports.flush_to(sink);
    }

    /// The last few log messages, oldest first.
    pub fn recent_messages(&self) -> impl Iterator<Item = &Report> {
        self.reports.recent_messages()
    }

    /// Live creature in a running session, or the reason there isn't one.
    pub(crate) fn require_running(&self) -> ActionResult<&Creature> {
        match (self.state, self.creature.as_ref()) {
            (SessionState::GameOver, _) => Err(ActionError::GameOver),
            (SessionState::Running, Some(creature)) => Ok(creature),
            _ => Err(ActionError::NoCreature),
        }
    }
}
