//! Hitbox construction for the actor and each obstacle kind
//!
//! The actor is a rotated triangle slightly larger than its nominal
//! half-extents (0.45 vs 0.4), so grazes register as hits. Obstacles map to
//! a rectangle, a circle, or a rectangle+circle composite.

use glam::DVec2;

use super::geometry::{Circle, Rect, Segment};
use super::state::{Actor, Obstacle, ObstacleKind};
use crate::consts::ACTOR_HITBOX_FACTOR;
use crate::deg_to_rad;

/// The actor's rotated triangle
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    /// Nose, upper-tail, lower-tail
    pub vertices: [DVec2; 3],
}

impl Triangle {
    /// Edges in vertex order: nose->upper, upper->lower, lower->nose
    pub fn edges(&self) -> [Segment; 3] {
        let [p1, p2, p3] = self.vertices;
        [
            Segment::new(p1, p2),
            Segment::new(p2, p3),
            Segment::new(p3, p1),
        ]
    }
}

/// Build the actor triangle from its current pose
pub fn actor_triangle(actor: &Actor) -> Triangle {
    let center = actor.center();
    let (sin, cos) = deg_to_rad(actor.rotation).sin_cos();
    let hw = actor.width * ACTOR_HITBOX_FACTOR;
    let hh = actor.height * ACTOR_HITBOX_FACTOR;

    let rotate = |local: DVec2| {
        center + DVec2::new(local.x * cos - local.y * sin, local.x * sin + local.y * cos)
    };

    Triangle {
        vertices: [
            rotate(DVec2::new(hw, 0.0)),
            rotate(DVec2::new(-hw, -hh)),
            rotate(DVec2::new(-hw, hh)),
        ],
    }
}

/// Rectangle inset expressed as fractions of the obstacle's bounding box
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Insets {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Insets {
    pub const DRAWER: Insets = Insets {
        left: 0.05,
        top: 0.25,
        width: 0.9,
        height: 0.5,
    };
    pub const COFFEE_CUP: Insets = Insets {
        left: 0.2,
        top: 0.2,
        width: 0.6,
        height: 0.6,
    };
    pub const MONITOR: Insets = Insets {
        left: 0.1,
        top: 0.1,
        width: 0.8,
        height: 0.7,
    };
    /// Inset for new rectangular kinds added to `obstacle_hitbox` without a tuned one
    pub const GENERIC: Insets = Insets {
        left: 0.1,
        top: 0.1,
        width: 0.8,
        height: 0.8,
    };

    /// Apply to a bounding box
    pub fn apply(&self, bounds: &Rect) -> Rect {
        Rect::new(
            bounds.x + bounds.width * self.left,
            bounds.y + bounds.height * self.top,
            bounds.width * self.width,
            bounds.height * self.height,
        )
    }
}

/// Primitive shape(s) an obstacle collides with
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Hitbox {
    Rect(Rect),
    Circle(Circle),
    /// Potted plant: rectangular pot plus circular foliage
    Composite { pot: Rect, foliage: Circle },
}

/// Build the hitbox for an obstacle from its kind and bounding box
pub fn obstacle_hitbox(obstacle: &Obstacle) -> Hitbox {
    let bounds = obstacle.bounds();
    match obstacle.kind {
        ObstacleKind::Fan => Hitbox::Circle(Circle::new(bounds.center(), bounds.width * 0.37)),
        ObstacleKind::PottedPlant => Hitbox::Composite {
            pot: Rect::new(
                bounds.x + bounds.width * 0.25,
                bounds.y + bounds.height * 0.5,
                bounds.width * 0.5,
                bounds.height * 0.5,
            ),
            foliage: Circle::new(
                DVec2::new(
                    bounds.x + bounds.width * 0.5,
                    bounds.y + bounds.height * 0.3,
                ),
                bounds.width * 0.35,
            ),
        },
        ObstacleKind::Drawer => Hitbox::Rect(Insets::DRAWER.apply(&bounds)),
        ObstacleKind::CoffeeCup => Hitbox::Rect(Insets::COFFEE_CUP.apply(&bounds)),
        ObstacleKind::Monitor => Hitbox::Rect(Insets::MONITOR.apply(&bounds)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: DVec2, b: DVec2) -> bool {
        a.distance(b) < 1e-9
    }

    #[test]
    fn test_unrotated_triangle() {
        let mut actor = Actor::spawn(400.0);
        actor.pos = DVec2::new(0.0, 0.0);
        actor.width = 100.0;
        actor.height = 40.0;
        let tri = actor_triangle(&actor);
        // Center (50, 20), half extents 45 x 18
        assert!(approx(tri.vertices[0], DVec2::new(95.0, 20.0)));
        assert!(approx(tri.vertices[1], DVec2::new(5.0, 2.0)));
        assert!(approx(tri.vertices[2], DVec2::new(5.0, 38.0)));
    }

    #[test]
    fn test_rotated_triangle_nose_down() {
        let mut actor = Actor::spawn(400.0);
        actor.pos = DVec2::new(0.0, 0.0);
        actor.width = 100.0;
        actor.height = 40.0;
        actor.rotation = 90.0;
        let tri = actor_triangle(&actor);
        // y grows down, so +90 degrees points the nose straight down
        assert!(approx(tri.vertices[0], DVec2::new(50.0, 65.0)));
    }

    #[test]
    fn test_triangle_edges_close_the_loop() {
        let tri = actor_triangle(&Actor::spawn(300.0));
        let edges = tri.edges();
        assert_eq!(edges[0].a, tri.vertices[0]);
        assert_eq!(edges[0].b, edges[1].a);
        assert_eq!(edges[1].b, edges[2].a);
        assert_eq!(edges[2].b, edges[0].a);
    }

    #[test]
    fn test_fan_circle() {
        let fan = Obstacle::new(1, ObstacleKind::Fan, DVec2::new(76.0, 126.0));
        match obstacle_hitbox(&fan) {
            Hitbox::Circle(c) => {
                assert_eq!(c.center, DVec2::new(100.0, 150.0));
                assert!((c.radius - 17.76).abs() < 1e-9);
            }
            other => panic!("expected circle, got {:?}", other),
        }
    }

    #[test]
    fn test_plant_composite() {
        let plant = Obstacle::new(1, ObstacleKind::PottedPlant, DVec2::new(0.0, 0.0));
        match obstacle_hitbox(&plant) {
            Hitbox::Composite { pot, foliage } => {
                assert_eq!(pot, Rect::new(13.75, 24.0, 27.5, 24.0));
                assert!(approx(foliage.center, DVec2::new(27.5, 14.4)));
                assert!((foliage.radius - 19.25).abs() < 1e-9);
            }
            other => panic!("expected composite, got {:?}", other),
        }
    }

    #[test]
    fn test_rect_insets() {
        let drawer = Obstacle::new(1, ObstacleKind::Drawer, DVec2::new(100.0, 0.0));
        assert_eq!(
            obstacle_hitbox(&drawer),
            Hitbox::Rect(Rect::new(104.75, 8.0, 85.5, 16.0))
        );

        let monitor = Obstacle::new(2, ObstacleKind::Monitor, DVec2::new(0.0, 0.0));
        let Hitbox::Rect(r) = obstacle_hitbox(&monitor) else {
            panic!("monitor should be a rectangle");
        };
        assert!((r.x - 6.4).abs() < 1e-9 && (r.y - 5.6).abs() < 1e-9);
        assert!((r.width - 51.2).abs() < 1e-9 && (r.height - 39.2).abs() < 1e-9);

        let cup = Obstacle::new(3, ObstacleKind::CoffeeCup, DVec2::new(0.0, 0.0));
        let Hitbox::Rect(r) = obstacle_hitbox(&cup) else {
            panic!("coffee cup should be a rectangle");
        };
        assert!((r.x - 11.0).abs() < 1e-9 && (r.width - 33.0).abs() < 1e-9);
    }

    #[test]
    fn test_generic_inset() {
        let r = Insets::GENERIC.apply(&Rect::new(0.0, 0.0, 50.0, 50.0));
        assert_eq!(r, Rect::new(5.0, 5.0, 40.0, 40.0));
    }
}
