//! Physics host seam
//!
//! [`PhysicsWorld`] is the capability contract the maze needs from a rigid-body
//! engine: create bodies, read/set velocity, toggle static, set gravity, step
//! and report collision starts. [`SandboxWorld`] is a small headless
//! implementation used by tests and the CLI. It integrates motion and detects
//! contacts but never resolves them.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{CollisionPair, shapes_collide};
use super::layout::{BodySpec, Label, Shape};
use crate::consts::SIM_DT;

/// Handle to a body owned by the physics host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct BodyId(pub u32);

/// What the maze core needs from a physics engine
pub trait PhysicsWorld {
    /// Create a body from `spec` and add it to the world
    fn spawn(&mut self, spec: &BodySpec) -> BodyId;

    fn velocity(&self, body: BodyId) -> Vec2;

    fn set_velocity(&mut self, body: BodyId, velocity: Vec2);

    fn is_static(&self, body: BodyId) -> bool;

    fn set_static(&mut self, body: BodyId, is_static: bool);

    fn gravity_y(&self) -> f32;

    fn set_gravity_y(&mut self, gravity_y: f32);

    /// Every body currently carrying `label`
    fn bodies_labeled(&self, label: Label) -> Vec<BodyId>;

    /// Advance by `dt` seconds, returning pairs that started touching this step
    fn step(&mut self, dt: f32) -> Vec<CollisionPair>;
}

/// A body in the sandbox
#[derive(Debug, Clone)]
pub struct SandboxBody {
    pub id: BodyId,
    pub label: Option<Label>,
    pub center: Vec2,
    pub shape: Shape,
    pub is_static: bool,
    /// Units per 60 Hz step
    pub velocity: Vec2,
}

impl SandboxBody {
    /// Label string as a physics host would report it
    pub fn label_str(&self) -> &'static str {
        match (self.label, self.shape) {
            (Some(label), _) => label.as_str(),
            (None, Shape::Rectangle { .. }) => "Rectangle Body",
            (None, Shape::Circle { .. }) => "Circle Body",
        }
    }
}

/// Headless world: Euler integration plus collision-start detection
#[derive(Debug, Clone)]
pub struct SandboxWorld {
    bodies: Vec<SandboxBody>,
    gravity_y: f32,
    /// Pairs overlapping after the last step (lower id first) and their depth
    contacts: HashMap<(BodyId, BodyId), f32>,
    next_id: u32,
}

impl Default for SandboxWorld {
    fn default() -> Self {
        Self::new()
    }
}

impl SandboxWorld {
    pub fn new() -> Self {
        Self {
            bodies: Vec::new(),
            gravity_y: 1.0,
            contacts: HashMap::new(),
            next_id: 1,
        }
    }

    pub fn bodies(&self) -> &[SandboxBody] {
        &self.bodies
    }

    pub fn body(&self, id: BodyId) -> Option<&SandboxBody> {
        // Ids are handed out in increasing order and never removed
        self.bodies
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|i| &self.bodies[i])
    }

    fn body_mut(&mut self, id: BodyId) -> Option<&mut SandboxBody> {
        match self.bodies.binary_search_by_key(&id, |b| b.id) {
            Ok(i) => Some(&mut self.bodies[i]),
            Err(_) => {
                log::warn!("Unknown body {:?}", id);
                None
            }
        }
    }

    /// Overlap depth of `a` and `b` after the last step, if they touch
    pub fn contact_depth(&self, a: BodyId, b: BodyId) -> Option<f32> {
        let key = if a < b { (a, b) } else { (b, a) };
        self.contacts.get(&key).copied()
    }

    /// Move a body directly (host-side teleport, used by tests)
    pub fn set_position(&mut self, id: BodyId, center: Vec2) {
        if let Some(body) = self.body_mut(id) {
            body.center = center;
        }
    }
}

impl PhysicsWorld for SandboxWorld {
    fn spawn(&mut self, spec: &BodySpec) -> BodyId {
        let id = BodyId(self.next_id);
        self.next_id += 1;
        self.bodies.push(SandboxBody {
            id,
            label: spec.label,
            center: spec.center,
            shape: spec.shape,
            is_static: spec.is_static,
            velocity: Vec2::ZERO,
        });
        id
    }

    fn velocity(&self, body: BodyId) -> Vec2 {
        self.body(body).map(|b| b.velocity).unwrap_or(Vec2::ZERO)
    }

    fn set_velocity(&mut self, body: BodyId, velocity: Vec2) {
        if let Some(body) = self.body_mut(body) {
            body.velocity = velocity;
        }
    }

    fn is_static(&self, body: BodyId) -> bool {
        self.body(body).is_some_and(|b| b.is_static)
    }

    fn set_static(&mut self, body: BodyId, is_static: bool) {
        if let Some(body) = self.body_mut(body) {
            body.is_static = is_static;
            if is_static {
                body.velocity = Vec2::ZERO;
            }
        }
    }

    fn gravity_y(&self) -> f32 {
        self.gravity_y
    }

    fn set_gravity_y(&mut self, gravity_y: f32) {
        self.gravity_y = gravity_y;
    }

    fn bodies_labeled(&self, label: Label) -> Vec<BodyId> {
        self.bodies
            .iter()
            .filter(|b| b.label == Some(label))
            .map(|b| b.id)
            .collect()
    }

    fn step(&mut self, dt: f32) -> Vec<CollisionPair> {
        // Velocities are expressed per reference step
        let steps = dt / SIM_DT;
        for body in self.bodies.iter_mut().filter(|b| !b.is_static) {
            body.velocity.y += self.gravity_y * steps;
            body.center += body.velocity * steps;
        }

        let mut contacts = HashMap::new();
        let mut started = Vec::new();
        for (i, a) in self.bodies.iter().enumerate() {
            for b in &self.bodies[i + 1..] {
                // Static bodies never collide with each other
                if a.is_static && b.is_static {
                    continue;
                }
                let result = shapes_collide(a.center, &a.shape, b.center, &b.shape);
                if !result.hit {
                    continue;
                }
                let key = (a.id, b.id);
                if !self.contacts.contains_key(&key) {
                    log::trace!(
                        "Contact {} / {} started, depth {:.2}",
                        a.label_str(),
                        b.label_str(),
                        result.penetration
                    );
                    started.push(CollisionPair::new(a.label_str(), b.label_str()));
                }
                contacts.insert(key, result.penetration);
            }
        }
        self.contacts = contacts;
        started
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ball(center: Vec2) -> BodySpec {
        BodySpec::circle(Some(Label::Player), center, 5.0, false)
    }

    #[test]
    fn test_spawn_and_lookup() {
        let mut world = SandboxWorld::new();
        let wall = world.spawn(&BodySpec::rectangle(
            Some(Label::Wall),
            Vec2::ZERO,
            Vec2::new(10.0, 10.0),
        ));
        let player = world.spawn(&ball(Vec2::new(50.0, 0.0)));

        assert_ne!(wall, player);
        assert!(world.is_static(wall));
        assert!(!world.is_static(player));
        assert_eq!(world.bodies_labeled(Label::Wall), vec![wall]);
        assert!(world.bodies_labeled(Label::Goal).is_empty());
        assert_eq!(world.body(player).map(|b| b.label_str()), Some("player"));
    }

    #[test]
    fn test_gravity_moves_dynamic_bodies_only() {
        let mut world = SandboxWorld::new();
        let wall = world.spawn(&BodySpec::rectangle(None, Vec2::ZERO, Vec2::new(10.0, 10.0)));
        let player = world.spawn(&ball(Vec2::new(100.0, 100.0)));
        world.set_gravity_y(2.0);

        world.step(SIM_DT);
        assert_eq!(world.body(wall).unwrap().center, Vec2::ZERO);
        assert_eq!(world.velocity(player), Vec2::new(0.0, 2.0));
        assert_eq!(world.body(player).unwrap().center, Vec2::new(100.0, 102.0));
    }

    #[test]
    fn test_collision_start_reported_once() {
        let mut world = SandboxWorld::new();
        world.set_gravity_y(0.0);
        let goal = world.spawn(&BodySpec::rectangle(
            Some(Label::Goal),
            Vec2::new(20.0, 0.0),
            Vec2::new(10.0, 10.0),
        ));
        let player = world.spawn(&ball(Vec2::ZERO));
        world.set_velocity(player, Vec2::new(5.0, 0.0));

        // 0 -> 5: edge at 10, goal starts at 15
        assert!(world.step(SIM_DT).is_empty());
        // 5 -> 10: edge at 15, still only touching
        assert!(world.step(SIM_DT).is_empty());
        assert_eq!(world.contact_depth(goal, player), None);
        // 10 -> 15: overlapping
        assert_eq!(world.step(SIM_DT), vec![CollisionPair::new("goal", "player")]);
        assert_eq!(world.contact_depth(player, goal), Some(5.0));
        // Still overlapping and deeper, not a new start
        assert!(world.step(SIM_DT).is_empty());
        assert_eq!(world.contact_depth(goal, player), Some(10.0));
    }

    #[test]
    fn test_static_pairs_ignored() {
        let mut world = SandboxWorld::new();
        let size = Vec2::new(10.0, 10.0);
        world.spawn(&BodySpec::rectangle(Some(Label::Wall), Vec2::ZERO, size));
        let b = world.spawn(&BodySpec::rectangle(Some(Label::Wall), Vec2::new(5.0, 0.0), size));
        world.set_gravity_y(0.0);
        assert!(world.step(SIM_DT).is_empty());

        world.set_static(b, false);
        assert_eq!(world.step(SIM_DT), vec![CollisionPair::new("wall", "wall")]);
    }

    #[test]
    fn test_unlabeled_bodies_report_host_names() {
        let mut world = SandboxWorld::new();
        world.set_gravity_y(0.0);
        world.spawn(&BodySpec::rectangle(None, Vec2::ZERO, Vec2::new(40.0, 40.0)));
        world.spawn(&ball(Vec2::ZERO));
        assert_eq!(
            world.step(SIM_DT),
            vec![CollisionPair::new("Rectangle Body", "player")]
        );
    }
}
