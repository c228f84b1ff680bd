//! Game state and core simulation types

use glam::DVec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::geometry::Rect;
use crate::consts::*;

/// Current phase of a session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// No simulation running yet
    #[default]
    Idle,
    /// Physics and spawning active, score accumulating
    Running,
    /// Run ended; simulation frozen until the next start
    Over,
}

/// The player-controlled flyer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Top-left corner
    pub pos: DVec2,
    pub width: f64,
    pub height: f64,
    /// Degrees, positive is nose-down
    pub rotation: f64,
    /// Vertical velocity per tick (negative is upward)
    pub velocity: f64,
}

impl Actor {
    /// Initial pose for a board of the given height
    pub fn spawn(board_height: f64) -> Self {
        Self {
            pos: DVec2::new(ACTOR_START_X, board_height / 2.0),
            width: ACTOR_WIDTH,
            height: ACTOR_HEIGHT,
            rotation: 0.0,
            velocity: ACTOR_START_VELOCITY,
        }
    }

    #[inline]
    pub fn center(&self) -> DVec2 {
        self.pos + DVec2::new(self.width / 2.0, self.height / 2.0)
    }

    /// Instantaneous upward kick; overrides whatever gravity has accumulated
    pub fn impulse(&mut self, velocity: f64) {
        self.velocity = velocity;
        self.rotation = IMPULSE_ROTATION;
    }
}

/// Obstacle types, each with fixed dimensions and its own hitbox shape
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ObstacleKind {
    Drawer,
    CoffeeCup,
    PottedPlant,
    Monitor,
    Fan,
}

impl ObstacleKind {
    /// Every kind, in spawn-table order
    pub const ALL: [ObstacleKind; 5] = [
        ObstacleKind::Drawer,
        ObstacleKind::CoffeeCup,
        ObstacleKind::PottedPlant,
        ObstacleKind::Monitor,
        ObstacleKind::Fan,
    ];

    /// Fixed (width, height) of this kind
    pub fn size(&self) -> (f64, f64) {
        match self {
            ObstacleKind::Drawer => (95.0, 32.0),
            ObstacleKind::CoffeeCup => (55.0, 48.0),
            ObstacleKind::PottedPlant => (55.0, 48.0),
            ObstacleKind::Monitor => (64.0, 56.0),
            ObstacleKind::Fan => (48.0, 48.0),
        }
    }

    /// Height of the tallest kind
    pub fn max_height() -> f64 {
        Self::ALL
            .iter()
            .map(|k| k.size().1)
            .fold(0.0, f64::max)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Drawer => "drawer",
            ObstacleKind::CoffeeCup => "coffee-cup",
            ObstacleKind::PottedPlant => "potted-plant",
            ObstacleKind::Monitor => "monitor",
            ObstacleKind::Fan => "fan",
        }
    }
}

/// A moving hazard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: u32,
    pub kind: ObstacleKind,
    /// Top-left corner
    pub pos: DVec2,
    pub width: f64,
    pub height: f64,
    /// Set once the trailing edge is behind the actor; never reverts
    pub passed: bool,
}

impl Obstacle {
    /// Create an obstacle of `kind` at `pos` using the kind's fixed size
    pub fn new(id: u32, kind: ObstacleKind, pos: DVec2) -> Self {
        let (width, height) = kind.size();
        Self {
            id,
            kind,
            pos,
            width,
            height,
            passed: false,
        }
    }

    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.width, self.height)
    }

    /// x coordinate of the trailing (right) edge
    #[inline]
    pub fn trailing_edge(&self) -> f64 {
        self.pos.x + self.width
    }
}

/// RNG state wrapper
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Simulated world: everything a tick reads and writes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct World {
    pub actor: Actor,
    /// Live obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    pub score: u64,
    /// Ticks simulated this session
    pub time_ticks: u64,
}

impl World {
    /// Fresh world for a new session
    pub fn new(board_height: f64) -> Self {
        Self {
            actor: Actor::spawn(board_height),
            obstacles: Vec::new(),
            score: 0,
            time_ticks: 0,
        }
    }
}
