//! Lifecycle controller
//!
//! Owns the authoritative world, the phase state machine (Idle -> Running ->
//! Over -> Running ...), score and high score bookkeeping, and the two
//! cadences that drive it. Operations are synchronous and must not be called
//! re-entrantly (the game-over listener must not call back into the engine).

use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use crate::consts::{ACTOR_HEIGHT, SPAWN_MARGIN};
use crate::harness::Scheduler;
use crate::highscores::HighScore;
use crate::settings::{BoardSize, Difficulty, Profile};
use crate::sim::{GamePhase, ObstacleKind, RngState, StepOutcome, World, spawn_obstacle, step};

/// Rejected configuration
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Width or height is NaN or infinite
    NonFiniteBoard { width: f64, height: f64 },
    /// Width or height is zero or negative
    NonPositiveBoard { width: f64, height: f64 },
    /// Board too short to place obstacles within their spawn margins
    BoardTooSmall { height: f64, required: f64 },
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::NonFiniteBoard { width, height } => {
                write!(f, "board size must be finite, got {}x{}", width, height)
            }
            ConfigError::NonPositiveBoard { width, height } => {
                write!(f, "board size must be positive, got {}x{}", width, height)
            }
            ConfigError::BoardTooSmall { height, required } => {
                write!(f, "board height {} is too small, need more than {}", height, required)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Host-supplied session configuration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    pub board: BoardSize,
    pub difficulty: Difficulty,
    /// Fixed RNG seed for reproducible obstacle streams
    #[serde(default)]
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub fn new(board: BoardSize, difficulty: Difficulty) -> Self {
        Self {
            board,
            difficulty,
            seed: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Minimum board height (exclusive) that leaves room for spawn margins
    pub fn min_board_height() -> f64 {
        (2.0 * SPAWN_MARGIN * ObstacleKind::max_height()).max(ACTOR_HEIGHT)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let BoardSize { width, height } = self.board;
        if !width.is_finite() || !height.is_finite() {
            return Err(ConfigError::NonFiniteBoard { width, height });
        }
        if width <= 0.0 || height <= 0.0 {
            return Err(ConfigError::NonPositiveBoard { width, height });
        }
        let required = Self::min_board_height();
        if height <= required {
            return Err(ConfigError::BoardTooSmall { height, required });
        }
        Ok(())
    }
}

/// Why a run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameOverCause {
    OutOfBounds,
    Collision { obstacle_id: u32 },
}

/// Termination notification delivered to the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverReport {
    pub final_score: u64,
    /// High score after this run was submitted
    pub high_score: u64,
    pub new_high_score: bool,
    pub cause: GameOverCause,
}

/// Things that happened since the host last drained events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Spawned { id: u32, kind: ObstacleKind },
    Scored { obstacle_id: u32, score: u64 },
    GameOver(GameOverReport),
}

/// Actor pose as exposed to the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ActorPose {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

/// Obstacle as exposed to the host
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleView {
    pub id: u32,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    #[serde(rename = "type")]
    pub kind: ObstacleKind,
}

/// Observable state after a tick
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub actor: ActorPose,
    pub obstacles: Vec<ObstacleView>,
    pub score: u64,
    pub high_score: u64,
    pub phase: GamePhase,
}

impl Snapshot {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Board and profile frozen at `start()`
#[derive(Debug, Clone, Copy)]
struct Session {
    board: BoardSize,
    profile: Profile,
}

type GameOverListener = Box<dyn FnMut(&GameOverReport)>;

/// The game engine instance
pub struct Engine {
    config: EngineConfig,
    session: Session,
    phase: GamePhase,
    world: World,
    high_score: HighScore,
    rng_state: RngState,
    rng: Pcg32,
    next_obstacle_id: u32,
    /// Board or difficulty changed mid-run; reset on the next tick
    reset_pending: bool,
    pub(crate) scheduler: Scheduler,
    events: Vec<GameEvent>,
    on_game_over: Option<GameOverListener>,
}

impl Engine {
    /// Create an idle engine
    pub fn new(config: EngineConfig, high_score: HighScore) -> Result<Self, ConfigError> {
        config.validate()?;
        let rng_state = RngState::new(config.seed.unwrap_or_else(rand::random));

        Ok(Self {
            session: Session {
                board: config.board,
                profile: config.difficulty.profile(),
            },
            phase: GamePhase::Idle,
            world: World::new(config.board.height),
            high_score,
            rng: rng_state.to_rng(),
            rng_state,
            next_obstacle_id: 1,
            reset_pending: false,
            scheduler: Scheduler::new(),
            events: Vec::new(),
            on_game_over: None,
            config,
        })
    }

    /// Replace board, difficulty, seed and high score holder
    ///
    /// Takes effect at the next `start()`. If a run is in progress it is
    /// reset on the next tick instead of being remapped live.
    pub fn configure(&mut self, config: EngineConfig, high_score: HighScore) -> Result<(), ConfigError> {
        config.validate()?;

        // A new seed only takes effect at the next start()
        let reseed = config.seed.is_some_and(|seed| seed != self.rng_state.seed);
        let changed = reseed
            || config.board != self.config.board
            || config.difficulty != self.config.difficulty;
        self.config = config;
        self.high_score = high_score;
        self.apply_change(changed);
        Ok(())
    }

    /// Host container resized
    pub fn resize(&mut self, board: BoardSize) -> Result<(), ConfigError> {
        let config = EngineConfig { board, ..self.config };
        config.validate()?;

        let changed = board != self.config.board;
        self.config = config;
        self.apply_change(changed);
        Ok(())
    }

    fn apply_change(&mut self, changed: bool) {
        if !changed {
            return;
        }
        match self.phase {
            GamePhase::Running => {
                log::debug!("Configuration changed mid-run, reset scheduled");
                self.reset_pending = true;
            }
            GamePhase::Idle => {
                self.session = self.next_session();
                self.world = World::new(self.session.board.height);
            }
            GamePhase::Over => {}
        }
    }

    fn next_session(&self) -> Session {
        Session {
            board: self.config.board,
            profile: self.config.difficulty.profile(),
        }
    }

    /// Begin a new run from Idle or Over (also restarts a Running one)
    pub fn start(&mut self) {
        if let Some(seed) = self.config.seed {
            if seed != self.rng_state.seed {
                self.rng_state = RngState::new(seed);
                self.rng = self.rng_state.to_rng();
            }
        }
        self.session = self.next_session();
        self.world = World::new(self.session.board.height);
        self.phase = GamePhase::Running;
        self.reset_pending = false;
        self.scheduler.restart(self.session.profile.spawn_interval_ms);

        log::info!(
            "Run started: difficulty={}, board={}x{}",
            self.config.difficulty,
            self.session.board.width,
            self.session.board.height
        );
        self.events.push(GameEvent::Started);

        // Never leave the board empty after a start
        self.spawn_now();
    }

    /// Alias for `start()`
    pub fn reset(&mut self) {
        self.start();
    }

    /// The single player action: flap, or start if not yet running
    pub fn trigger_impulse(&mut self) {
        match self.phase {
            GamePhase::Over => {}
            GamePhase::Idle => self.start(),
            GamePhase::Running => self.world.actor.impulse(self.session.profile.impulse),
        }
    }

    /// Advance physics by one frame
    pub fn tick(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }

        if self.reset_pending {
            log::debug!("Applying deferred reset");
            self.start();
            return;
        }

        match step(&self.world, &self.session.profile, &self.session.board) {
            StepOutcome::Advanced { world, passed } => {
                let mut score = self.world.score;
                for obstacle_id in passed {
                    score += 1;
                    log::trace!("Passed obstacle {}, score {}", obstacle_id, score);
                    self.events.push(GameEvent::Scored { obstacle_id, score });
                }
                self.world = world;
            }
            StepOutcome::OutOfBounds => self.game_over(GameOverCause::OutOfBounds),
            StepOutcome::Collision { obstacle_id } => {
                self.game_over(GameOverCause::Collision { obstacle_id })
            }
        }
    }

    /// Spawn cadence callback
    pub fn spawn_tick(&mut self) {
        if self.phase != GamePhase::Running {
            return;
        }
        self.spawn_now();
    }

    fn spawn_now(&mut self) {
        let id = self.next_obstacle_id;
        self.next_obstacle_id += 1;

        let obstacle = spawn_obstacle(&mut self.rng, id, &self.session.board);
        log::debug!(
            "Spawned {} #{} at y={}",
            obstacle.kind.as_str(),
            obstacle.id,
            obstacle.pos.y
        );
        self.events.push(GameEvent::Spawned {
            id,
            kind: obstacle.kind,
        });
        self.world.obstacles.push(obstacle);
    }

    /// Enter Over exactly once per run
    fn game_over(&mut self, cause: GameOverCause) {
        if self.phase == GamePhase::Over {
            return;
        }
        self.phase = GamePhase::Over;
        self.scheduler.cancel_all();

        let final_score = self.world.score;
        let new_high_score = self.high_score.submit(final_score);
        let report = GameOverReport {
            final_score,
            high_score: self.high_score.get(),
            new_high_score,
            cause,
        };

        log::info!("Game over ({:?}), score {}", cause, final_score);
        self.events.push(GameEvent::GameOver(report));
        if let Some(listener) = self.on_game_over.as_mut() {
            listener(&report);
        }
    }

    /// Stop both cadences; the engine fires nothing afterwards until `start()`
    pub fn teardown(&mut self) {
        self.scheduler.cancel_all();
    }

    /// Register the termination callback (replaces any previous one)
    pub fn set_game_over_listener<F>(&mut self, listener: F)
    where
        F: FnMut(&GameOverReport) + 'static,
    {
        self.on_game_over = Some(Box::new(listener));
    }

    /// Take all events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        let actor = &self.world.actor;
        Snapshot {
            actor: ActorPose {
                x: actor.pos.x,
                y: actor.pos.y,
                width: actor.width,
                height: actor.height,
                rotation: actor.rotation,
            },
            obstacles: self
                .world
                .obstacles
                .iter()
                .map(|o| ObstacleView {
                    id: o.id,
                    x: o.pos.x,
                    y: o.pos.y,
                    width: o.width,
                    height: o.height,
                    kind: o.kind,
                })
                .collect(),
            score: self.world.score,
            high_score: self.high_score.get(),
            phase: self.phase,
        }
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn score(&self) -> u64 {
        self.world.score
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Mutable world access for scripted setups
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Profile of the current (or next) run
    pub fn profile(&self) -> &Profile {
        &self.session.profile
    }

    pub fn board(&self) -> &BoardSize {
        &self.session.board
    }

    pub fn high_score(&self) -> &HighScore {
        &self.high_score
    }

    pub fn seed(&self) -> u64 {
        self.rng_state.seed
    }

    pub fn is_reset_pending(&self) -> bool {
        self.reset_pending
    }
}

impl Drop for Engine {
    fn drop(&mut self) {
        self.teardown();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, ObstacleKind};
    use glam::DVec2;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn engine() -> Engine {
        let config = EngineConfig::new(BoardSize::new(800.0, 400.0), Difficulty::Easy).with_seed(1);
        Engine::new(config, HighScore::default()).unwrap()
    }

    /// Fan centered on where the actor will be after its next tick
    fn fan_on_actor(engine: &Engine, id: u32) -> Obstacle {
        let center = engine.world().actor.center();
        let speed = engine.profile().obstacle_speed;
        Obstacle::new(
            id,
            ObstacleKind::Fan,
            DVec2::new(center.x - 24.0 + speed, center.y - 24.0),
        )
    }

    #[test]
    fn test_config_validation() {
        let bad = |w, h| EngineConfig::new(BoardSize::new(w, h), Difficulty::Easy).validate();
        assert!(matches!(bad(0.0, 400.0), Err(ConfigError::NonPositiveBoard { .. })));
        assert!(matches!(bad(800.0, -1.0), Err(ConfigError::NonPositiveBoard { .. })));
        assert!(matches!(bad(f64::NAN, 400.0), Err(ConfigError::NonFiniteBoard { .. })));
        assert!(matches!(bad(800.0, 100.0), Err(ConfigError::BoardTooSmall { .. })));
        assert!(bad(800.0, 400.0).is_ok());
        assert!(Engine::new(
            EngineConfig::new(BoardSize::new(-5.0, 400.0), Difficulty::Hard),
            HighScore::default()
        )
        .is_err());
    }

    #[test]
    fn test_error_display() {
        let err = ConfigError::BoardTooSmall {
            height: 100.0,
            required: 134.4,
        };
        assert_eq!(err.to_string(), "board height 100 is too small, need more than 134.4");
    }

    #[test]
    fn test_starts_idle_and_tick_is_noop() {
        let mut engine = engine();
        assert_eq!(engine.phase(), GamePhase::Idle);
        let before = engine.snapshot();
        engine.tick();
        engine.spawn_tick();
        assert_eq!(engine.snapshot(), before);
        assert!(engine.world().obstacles.is_empty());
    }

    #[test]
    fn test_impulse_from_idle_starts_with_one_obstacle() {
        let mut engine = engine();
        engine.trigger_impulse();
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.world().obstacles.len(), 1);
        assert_eq!(engine.score(), 0);
        // Starting does not flap
        assert_eq!(engine.world().actor.velocity, 0.1);
        let events = engine.drain_events();
        assert_eq!(events[0], GameEvent::Started);
        assert!(matches!(events[1], GameEvent::Spawned { id: 1, .. }));
        assert!(engine.drain_events().is_empty());
    }

    #[test]
    fn test_impulse_while_running() {
        let mut engine = engine();
        engine.start();
        for _ in 0..5 {
            engine.tick();
        }
        engine.trigger_impulse();
        assert_eq!(engine.world().actor.velocity, -6.0);
        assert_eq!(engine.world().actor.rotation, -20.0);
        engine.trigger_impulse();
        assert_eq!(engine.world().actor.velocity, -6.0);
        assert_eq!(engine.world().actor.rotation, -20.0);
    }

    #[test]
    fn test_collision_ends_run_and_submits_high_score() {
        let high = HighScore::new(0);
        let config = EngineConfig::new(BoardSize::new(800.0, 400.0), Difficulty::Easy).with_seed(3);
        let mut engine = Engine::new(config, high.clone()).unwrap();
        engine.start();
        engine.world_mut().score = 4;
        let fan = fan_on_actor(&engine, 999);
        engine.world_mut().obstacles.push(fan);

        let reports = Rc::new(RefCell::new(Vec::new()));
        let sink = reports.clone();
        engine.set_game_over_listener(move |r| sink.borrow_mut().push(*r));

        let before = engine.world().clone();
        engine.tick();
        assert_eq!(engine.phase(), GamePhase::Over);
        // Terminal tick commits nothing
        assert_eq!(engine.world(), &before);
        assert_eq!(high.get(), 4);

        let reports = reports.borrow();
        assert_eq!(reports.len(), 1);
        assert_eq!(
            reports[0],
            GameOverReport {
                final_score: 4,
                high_score: 4,
                new_high_score: true,
                cause: GameOverCause::Collision { obstacle_id: 999 },
            }
        );
        assert!(!engine.scheduler.is_running());
    }

    #[test]
    fn test_over_is_sticky() {
        let high = HighScore::new(0);
        let config = EngineConfig::new(BoardSize::new(800.0, 400.0), Difficulty::Easy).with_seed(3);
        let mut engine = Engine::new(config, high.clone()).unwrap();
        let calls = Rc::new(RefCell::new(0));
        let counter = calls.clone();
        engine.set_game_over_listener(move |_| *counter.borrow_mut() += 1);

        engine.start();
        engine.world_mut().score = 2;
        engine.world_mut().actor.velocity = 1000.0;
        engine.tick();
        assert_eq!(engine.phase(), GamePhase::Over);
        let frozen = engine.snapshot();

        // Raise the score behind the engine's back: a second termination must not resubmit
        engine.world_mut().score = 50;
        engine.game_over(GameOverCause::OutOfBounds);
        engine.tick();
        engine.trigger_impulse();
        engine.spawn_tick();

        assert_eq!(*calls.borrow(), 1);
        assert_eq!(high.get(), 2);
        engine.world_mut().score = 2;
        assert_eq!(engine.snapshot(), frozen);
    }

    #[test]
    fn test_restart_after_over() {
        let mut engine = engine();
        engine.start();
        engine.world_mut().actor.velocity = 1000.0;
        engine.tick();
        assert_eq!(engine.phase(), GamePhase::Over);

        engine.start();
        assert_eq!(engine.phase(), GamePhase::Running);
        assert_eq!(engine.score(), 0);
        assert_eq!(engine.world().obstacles.len(), 1);
        // Ids keep increasing across runs
        assert_eq!(engine.world().obstacles[0].id, 2);
        assert!(engine.scheduler.is_running());
    }

    #[test]
    fn test_resize_mid_run_resets_on_next_tick() {
        let mut engine = engine();
        engine.start();
        for _ in 0..3 {
            engine.tick();
        }
        engine.resize(BoardSize::new(1024.0, 600.0)).unwrap();
        assert!(engine.is_reset_pending());
        // Current run still uses the old board until the reset lands
        assert_eq!(engine.board().height, 400.0);

        engine.tick();
        assert!(!engine.is_reset_pending());
        assert_eq!(engine.board().height, 600.0);
        assert_eq!(engine.world().actor.pos.y, 300.0);
        assert_eq!(engine.world().time_ticks, 0);
        assert_eq!(engine.phase(), GamePhase::Running);
    }

    #[test]
    fn test_resize_rejects_invalid_without_change() {
        let mut engine = engine();
        engine.start();
        assert!(engine.resize(BoardSize::new(800.0, 0.0)).is_err());
        assert!(!engine.is_reset_pending());
        assert_eq!(engine.config().board, BoardSize::new(800.0, 400.0));
    }

    #[test]
    fn test_resize_while_idle_applies_immediately() {
        let mut engine = engine();
        engine.resize(BoardSize::new(500.0, 300.0)).unwrap();
        assert!(!engine.is_reset_pending());
        assert_eq!(engine.snapshot().actor.y, 150.0);
    }

    #[test]
    fn test_configure_changes_difficulty_for_next_run() {
        let mut engine = engine();
        engine.start();
        let high = HighScore::new(10);
        let config = EngineConfig::new(BoardSize::new(800.0, 400.0), Difficulty::Hard);
        engine.configure(config, high).unwrap();
        assert_eq!(engine.profile().gravity, 0.3);
        engine.tick();
        assert_eq!(engine.profile().gravity, 0.5);
        assert_eq!(engine.snapshot().high_score, 10);
    }

    #[test]
    fn test_configure_new_seed_waits_for_reset() {
        let mut engine = engine();
        engine.start();
        let config = EngineConfig::new(BoardSize::new(800.0, 400.0), Difficulty::Easy).with_seed(8);
        engine.configure(config, HighScore::default()).unwrap();
        assert!(engine.is_reset_pending());
        assert_eq!(engine.seed(), 1);

        engine.tick();
        assert_eq!(engine.seed(), 8);

        let mut fresh = Engine::new(config, HighScore::default()).unwrap();
        fresh.start();
        let (ours, theirs) = (&engine.world().obstacles[0], &fresh.world().obstacles[0]);
        assert_eq!((ours.kind, ours.pos), (theirs.kind, theirs.pos));
    }

    #[test]
    fn test_configure_same_seed_keeps_stream() {
        let mut engine = engine();
        engine.start();
        let config = EngineConfig::new(BoardSize::new(800.0, 400.0), Difficulty::Easy).with_seed(1);
        engine.configure(config, HighScore::default()).unwrap();
        assert!(!engine.is_reset_pending());
        assert_eq!(engine.seed(), 1);
    }

    #[test]
    fn test_snapshot_json_shape() {
        let mut engine = engine();
        engine.start();
        let json = engine.snapshot().to_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["phase"], "Running");
        assert_eq!(value["score"], 0);
        assert_eq!(value["obstacles"][0]["id"], 1);
        assert!(value["obstacles"][0]["type"].is_string());
        assert_eq!(value["actor"]["x"], 80.0);
    }

    #[test]
    fn test_spawn_tick_appends_in_order() {
        let mut engine = engine();
        engine.start();
        engine.spawn_tick();
        engine.spawn_tick();
        let ids: Vec<_> = engine.world().obstacles.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
