//! Obstacle spawning
//!
//! Kind is chosen uniformly from `ObstacleKind::ALL`; vertical placement is
//! uniform within a margin of 1.2 obstacle heights from both board edges.

use glam::DVec2;
use rand::Rng;

use super::state::{Obstacle, ObstacleKind};
use crate::consts::SPAWN_MARGIN;
use crate::settings::BoardSize;

/// Pick an obstacle kind uniformly at random
pub fn random_kind<R: Rng>(rng: &mut R) -> ObstacleKind {
    ObstacleKind::ALL[rng.random_range(0..ObstacleKind::ALL.len())]
}

/// Allowed range for an obstacle's top edge on a board of `board_height`
pub fn placement_range(obstacle_height: f64, board_height: f64) -> (f64, f64) {
    let min_y = obstacle_height * SPAWN_MARGIN;
    let max_y = board_height - obstacle_height * SPAWN_MARGIN;
    (min_y, max_y)
}

/// Create a new obstacle just past the right edge of the board
///
/// The board must leave room for the margins (`min_y < max_y`); the engine
/// validates this when it is configured.
pub fn spawn_obstacle<R: Rng>(rng: &mut R, id: u32, board: &BoardSize) -> Obstacle {
    let kind = random_kind(rng);
    let (width, height) = kind.size();
    let (min_y, max_y) = placement_range(height, board.height);
    let y = rng.random_range(min_y..max_y).floor();

    Obstacle::new(id, kind, DVec2::new(board.width + width, y))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;
    use std::collections::HashSet;

    #[test]
    fn test_spawn_position_and_margins() {
        let mut rng = Pcg32::seed_from_u64(7);
        let board = BoardSize::new(800.0, 400.0);
        for id in 1..=500 {
            let o = spawn_obstacle(&mut rng, id, &board);
            assert_eq!(o.id, id);
            assert!(!o.passed);
            assert_eq!(o.pos.x, board.width + o.width);
            assert_eq!((o.width, o.height), o.kind.size());
            assert!(o.pos.y >= (o.height * SPAWN_MARGIN).floor());
            assert!(o.pos.y < board.height - o.height * SPAWN_MARGIN);
            assert_eq!(o.pos.y, o.pos.y.floor());
        }
    }

    #[test]
    fn test_every_kind_appears() {
        let mut rng = Pcg32::seed_from_u64(42);
        let kinds: HashSet<_> = (0..200).map(|_| random_kind(&mut rng)).collect();
        assert_eq!(kinds.len(), ObstacleKind::ALL.len());
    }

    #[test]
    fn test_seeded_spawns_are_reproducible() {
        let board = BoardSize::new(640.0, 360.0);
        let mut a = Pcg32::seed_from_u64(99);
        let mut b = Pcg32::seed_from_u64(99);
        for id in 1..=20 {
            assert_eq!(spawn_obstacle(&mut a, id, &board), spawn_obstacle(&mut b, id, &board));
        }
    }

    #[test]
    fn test_placement_range() {
        let (min_y, max_y) = placement_range(50.0, 400.0);
        assert_eq!(min_y, 60.0);
        assert_eq!(max_y, 340.0);
    }
}
