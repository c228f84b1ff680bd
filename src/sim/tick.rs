//! Per-frame physics step
//!
//! Integration is frame-count based: one call advances one display frame and
//! all velocities are in board units per frame. Nothing here mutates its input;
//! `step` returns the next world and the engine decides whether to commit it.

use super::collision::check_collision;
use super::state::{Actor, Obstacle, World};
use crate::consts::*;
use crate::settings::{BoardSize, Profile};

/// Result of advancing the world by one tick
#[derive(Debug, Clone, PartialEq)]
pub enum StepOutcome {
    /// Nothing terminal happened; `passed` lists obstacles scored this tick
    Advanced { world: World, passed: Vec<u32> },
    /// The actor would have left the board
    OutOfBounds,
    /// The actor hit an unpassed obstacle
    Collision { obstacle_id: u32 },
}

/// Apply gravity and nose-down drift
///
/// Returns `None` if the new position would leave `[0, board_height - height]`.
pub fn integrate_actor(actor: &Actor, gravity: f64, board_height: f64) -> Option<Actor> {
    let velocity = actor.velocity + gravity;
    let y = actor.pos.y + velocity;

    if y < 0.0 || y > board_height - actor.height {
        return None;
    }

    let mut next = *actor;
    next.velocity = velocity;
    next.pos.y = y;
    next.rotation = (actor.rotation + ROTATION_DRIFT).min(ROTATION_MAX);
    Some(next)
}

/// Scroll obstacles left, flag newly passed ones and drop those off-board
///
/// Returns the surviving obstacles (spawn order preserved) and the ids that
/// became passed this tick.
pub fn advance_obstacles(obstacles: &[Obstacle], speed: f64, actor_x: f64) -> (Vec<Obstacle>, Vec<u32>) {
    let mut passed = Vec::new();
    let mut next = Vec::with_capacity(obstacles.len());

    for obstacle in obstacles {
        let mut moved = obstacle.clone();
        moved.pos.x -= speed;

        if !moved.passed && moved.trailing_edge() < actor_x {
            moved.passed = true;
            passed.push(moved.id);
        }

        if moved.trailing_edge() > 0.0 {
            next.push(moved);
        }
    }

    (next, passed)
}

/// Advance the whole world by one tick
pub fn step(world: &World, profile: &Profile, board: &BoardSize) -> StepOutcome {
    let Some(actor) = integrate_actor(&world.actor, profile.gravity, board.height) else {
        return StepOutcome::OutOfBounds;
    };

    let (obstacles, passed) = advance_obstacles(&world.obstacles, profile.obstacle_speed, actor.pos.x);

    if let Some(hit) = obstacles
        .iter()
        .filter(|o| !o.passed)
        .find(|o| check_collision(&actor, o))
    {
        return StepOutcome::Collision { obstacle_id: hit.id };
    }

    let score = world.score + passed.len() as u64;
    StepOutcome::Advanced {
        world: World {
            actor,
            obstacles,
            score,
            time_ticks: world.time_ticks + 1,
        },
        passed,
    }
}
