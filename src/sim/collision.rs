//! Collision evaluation between the actor triangle and obstacle hitboxes
//!
//! The triangle is built once per call, then tested against whichever
//! primitive(s) the obstacle kind maps to.

use super::geometry::{
    Circle, Rect, distance, point_in_rect, segment_intersects_circle, segment_intersects_rect,
};
use super::hitbox::{Hitbox, Triangle, actor_triangle, obstacle_hitbox};
use super::state::{Actor, Obstacle};

/// Check whether the actor overlaps the obstacle's hitbox
pub fn check_collision(actor: &Actor, obstacle: &Obstacle) -> bool {
    let triangle = actor_triangle(actor);

    match obstacle_hitbox(obstacle) {
        Hitbox::Circle(circle) => {
            if !rough_overlaps_circle(actor, &circle) {
                return false;
            }
            triangle_hits_circle(&triangle, &circle)
        }
        Hitbox::Composite { pot, foliage } => {
            triangle_hits_rect(&triangle, &pot) || triangle_hits_circle(&triangle, &foliage)
        }
        Hitbox::Rect(rect) => triangle_hits_rect(&triangle, &rect),
    }
}

/// Cheap reject: actor's unrotated box against the circle's enclosing square
fn rough_overlaps_circle(actor: &Actor, circle: &Circle) -> bool {
    let center = actor.center();
    let (hw, hh) = (actor.width / 2.0, actor.height / 2.0);
    let c = circle.center;
    let r = circle.radius;

    center.x - hw < c.x + r
        && center.x + hw > c.x - r
        && center.y - hh < c.y + r
        && center.y + hh > c.y - r
}

/// Any vertex inside the rectangle or any edge crossing its boundary
fn triangle_hits_rect(triangle: &Triangle, rect: &Rect) -> bool {
    triangle.vertices.iter().any(|&v| point_in_rect(v, rect))
        || triangle
            .edges()
            .iter()
            .any(|edge| segment_intersects_rect(edge, rect))
}

/// Any vertex strictly within the radius or any edge passing strictly within it
fn triangle_hits_circle(triangle: &Triangle, circle: &Circle) -> bool {
    triangle
        .vertices
        .iter()
        .any(|&v| distance(v, circle) < circle.radius)
        || triangle
            .edges()
            .iter()
            .any(|edge| segment_intersects_circle(edge, circle.center, circle.radius))
}
