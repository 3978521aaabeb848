//! Overlap tests for the headless sandbox, plus the collision data the win
//! logic consumes.
//!
//! The sandbox only needs to know *that* two bodies touch and how deep, never
//! how to push them apart, so no response is ever applied.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::layout::{Label, Shape};

/// A collision-start notification: the labels of two bodies that began touching.
///
/// Labels are plain strings because that is what a physics host reports;
/// bodies outside the known label set (the boundary, say) still show up here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollisionPair {
    pub label_a: String,
    pub label_b: String,
}

impl CollisionPair {
    pub fn new(label_a: impl Into<String>, label_b: impl Into<String>) -> Self {
        Self {
            label_a: label_a.into(),
            label_b: label_b.into(),
        }
    }

    /// Parsed labels; `None` for anything outside the known set
    pub fn labels(&self) -> (Option<Label>, Option<Label>) {
        (Label::from_str(&self.label_a), Label::from_str(&self.label_b))
    }

    /// Whether this pair is exactly `{x, y}`, in either order
    pub fn is_between(&self, x: Label, y: Label) -> bool {
        match self.labels() {
            (Some(a), Some(b)) => (a == x && b == y) || (a == y && b == x),
            _ => false,
        }
    }
}

/// Result of an overlap check
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionResult {
    /// Whether the shapes overlap
    pub hit: bool,
    /// Overlap depth along the shallowest separating axis
    pub penetration: f32,
}

impl CollisionResult {
    pub fn miss() -> Self {
        Self {
            hit: false,
            penetration: 0.0,
        }
    }

    fn hit(penetration: f32) -> Self {
        Self { hit: true, penetration }
    }
}

/// Circle vs axis-aligned rectangle (`rect_size` is full width/height)
pub fn circle_rect_collision(
    center: Vec2,
    radius: f32,
    rect_center: Vec2,
    rect_size: Vec2,
) -> CollisionResult {
    let half = rect_size / 2.0;
    let d = center - rect_center;
    let closest = d.clamp(-half, half);
    let dist_sq = (d - closest).length_squared();

    if dist_sq >= radius * radius {
        return CollisionResult::miss();
    }
    if dist_sq > 0.0 {
        return CollisionResult::hit(radius - dist_sq.sqrt());
    }

    // Center inside the rectangle: depth to the nearer edge
    let inside = half - d.abs();
    CollisionResult::hit(radius + inside.min_element())
}

/// Circle vs circle
pub fn circle_circle_collision(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> CollisionResult {
    let reach = radius_a + radius_b;
    let dist = a.distance(b);
    if dist >= reach {
        return CollisionResult::miss();
    }
    CollisionResult::hit(reach - dist)
}

/// Axis-aligned rectangle vs rectangle
pub fn rect_rect_collision(a: Vec2, size_a: Vec2, b: Vec2, size_b: Vec2) -> CollisionResult {
    let overlap = (size_a + size_b) / 2.0 - (a - b).abs();
    if overlap.x <= 0.0 || overlap.y <= 0.0 {
        return CollisionResult::miss();
    }
    CollisionResult::hit(overlap.min_element())
}

/// Overlap between any two body shapes
pub fn shapes_collide(a: Vec2, shape_a: &Shape, b: Vec2, shape_b: &Shape) -> CollisionResult {
    match (*shape_a, *shape_b) {
        (Shape::Circle { radius: ra }, Shape::Circle { radius: rb }) => circle_circle_collision(a, ra, b, rb),
        (Shape::Circle { radius }, Shape::Rectangle { size }) => circle_rect_collision(a, radius, b, size),
        (Shape::Rectangle { size }, Shape::Circle { radius }) => circle_rect_collision(b, radius, a, size),
        (Shape::Rectangle { size: sa }, Shape::Rectangle { size: sb }) => rect_rect_collision(a, sa, b, sb),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_circle_rect_edge_contact() {
        // Rect spanning x in [90, 110], circle approaching from the left
        let rect_center = Vec2::new(100.0, 0.0);
        let rect_size = Vec2::new(20.0, 100.0);

        let result = circle_rect_collision(Vec2::new(85.0, 0.0), 8.0, rect_center, rect_size);
        assert!(result.hit);
        assert!((result.penetration - 3.0).abs() < 0.001);

        let result = circle_rect_collision(Vec2::new(80.0, 0.0), 8.0, rect_center, rect_size);
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_rect_corner_miss() {
        // Diagonal to the corner, outside the radius even though the AABBs overlap
        let result = circle_rect_collision(Vec2::new(18.0, 18.0), 10.0, Vec2::ZERO, Vec2::new(20.0, 20.0));
        assert!(!result.hit);
    }

    #[test]
    fn test_circle_inside_rect() {
        let result = circle_rect_collision(Vec2::new(0.0, 8.0), 2.0, Vec2::ZERO, Vec2::new(100.0, 20.0));
        assert!(result.hit);
        assert!((result.penetration - 4.0).abs() < 0.001);
    }

    #[test]
    fn test_circle_circle() {
        let result = circle_circle_collision(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0);
        assert!(result.hit);
        assert!((result.penetration - 1.0).abs() < 0.001);
        assert!(!circle_circle_collision(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0).hit);
    }

    #[test]
    fn test_rect_rect() {
        let size = Vec2::new(10.0, 10.0);
        let result = rect_rect_collision(Vec2::ZERO, size, Vec2::new(9.0, 3.0), size);
        assert!(result.hit);
        assert_eq!(result.penetration, 1.0);
        // Touching edges do not count as overlap
        assert!(!rect_rect_collision(Vec2::ZERO, size, Vec2::new(10.0, 0.0), size).hit);
    }

    #[test]
    fn test_shapes_collide_is_symmetric() {
        let circle = Shape::Circle { radius: 8.0 };
        let rect = Shape::Rectangle {
            size: Vec2::new(20.0, 100.0),
        };
        let from_circle = shapes_collide(Vec2::new(85.0, 0.0), &circle, Vec2::new(100.0, 0.0), &rect);
        let from_rect = shapes_collide(Vec2::new(100.0, 0.0), &rect, Vec2::new(85.0, 0.0), &circle);
        assert!(from_circle.hit);
        assert_eq!(from_circle, from_rect);
    }

    #[test]
    fn test_pair_is_order_independent() {
        assert!(CollisionPair::new("player", "goal").is_between(Label::Player, Label::Goal));
        assert!(CollisionPair::new("goal", "player").is_between(Label::Player, Label::Goal));
        assert!(!CollisionPair::new("wall", "player").is_between(Label::Player, Label::Goal));
        assert!(!CollisionPair::new("player", "player").is_between(Label::Player, Label::Goal));
        assert!(!CollisionPair::new("Rectangle Body", "player").is_between(Label::Player, Label::Goal));
    }
}
