//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-count integration only
//! - Seeded RNG only
//! - Obstacles kept in spawn order
//! - No host, timer or rendering dependencies

pub mod collision;
pub mod geometry;
pub mod hitbox;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::check_collision;
pub use geometry::{Circle, Rect, Segment};
pub use hitbox::{Hitbox, Triangle, actor_triangle, obstacle_hitbox};
pub use spawn::spawn_obstacle;
pub use state::{Actor, GamePhase, Obstacle, ObstacleKind, RngState, World};
pub use tick::{StepOutcome, advance_obstacles, integrate_actor, step};
