//! Paper Plane - physics and collision core for a side-scrolling flyer game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (geometry, hitboxes, collisions, physics, spawning)
//! - `engine`: Lifecycle controller (phases, score, high score, snapshots)
//! - `harness`: Cancelable frame/spawn cadences on a virtual clock
//! - `settings`: Difficulty profiles
//! - `highscores`: Shared in-memory high score holder

pub mod engine;
pub mod harness;
pub mod highscores;
pub mod settings;
pub mod sim;

pub use engine::{
    ConfigError, Engine, EngineConfig, GameEvent, GameOverCause, GameOverReport, Snapshot,
};
pub use highscores::HighScore;
pub use settings::{BoardSize, Difficulty, Profile};
pub use sim::GamePhase;

/// Game configuration constants
pub mod consts {
    /// Frame cadence in milliseconds (one physics tick per display frame at 60 Hz)
    pub const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Maximum frames fired by a single `advance` call to prevent spiral of death
    pub const MAX_CATCHUP_FRAMES: u32 = 8;

    /// Actor defaults
    pub const ACTOR_START_X: f64 = 80.0;
    pub const ACTOR_WIDTH: f64 = 48.0;
    pub const ACTOR_HEIGHT: f64 = 24.0;
    /// Small downward velocity so the plane starts drifting immediately
    pub const ACTOR_START_VELOCITY: f64 = 0.1;

    /// Rotation limits (degrees). Positive is nose-down.
    pub const ROTATION_MIN: f64 = -20.0;
    pub const ROTATION_MAX: f64 = 45.0;
    /// Nose-down drift per tick
    pub const ROTATION_DRIFT: f64 = 1.0;
    /// Rotation applied by an impulse
    pub const IMPULSE_ROTATION: f64 = ROTATION_MIN;

    /// Actor triangle vertex offsets as a fraction of width/height
    pub const ACTOR_HITBOX_FACTOR: f64 = 0.45;

    /// Spawned obstacles keep this many of their own heights away from both edges
    pub const SPAWN_MARGIN: f64 = 1.2;
}

/// Convert degrees to radians
#[inline]
pub fn deg_to_rad(degrees: f64) -> f64 {
    degrees * std::f64::consts::PI / 180.0
}
