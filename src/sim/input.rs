//! Directional keys to velocity changes
//!
//! Each press nudges exactly one velocity axis by a fixed step. No
//! acceleration curve, no clamping.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::world::{BodyId, PhysicsWorld};

/// A directional key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
}

impl Key {
    /// Parse a key name: WASD letters, arrow names or DOM `KeyboardEvent.code`s
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "w" | "keyw" | "up" | "arrowup" => Some(Key::Up),
            "s" | "keys" | "down" | "arrowdown" => Some(Key::Down),
            "a" | "keya" | "left" | "arrowleft" => Some(Key::Left),
            "d" | "keyd" | "right" | "arrowright" => Some(Key::Right),
            _ => None,
        }
    }

    /// Parse a legacy numeric key code (WASD and arrow keys)
    pub fn from_key_code(code: u32) -> Option<Self> {
        match code {
            87 | 38 => Some(Key::Up),
            83 | 40 => Some(Key::Down),
            65 | 37 => Some(Key::Left),
            68 | 39 => Some(Key::Right),
            _ => None,
        }
    }

    /// Velocity change for one press (screen coordinates, y down)
    pub fn delta(self, step: f32) -> Vec2 {
        match self {
            Key::Up => Vec2::new(0.0, -step),
            Key::Down => Vec2::new(0.0, step),
            Key::Left => Vec2::new(-step, 0.0),
            Key::Right => Vec2::new(step, 0.0),
        }
    }
}

/// Read `body`'s velocity and nudge one axis by `step`
pub fn apply_key<W: PhysicsWorld + ?Sized>(world: &mut W, body: BodyId, key: Key, step: f32) {
    let velocity = world.velocity(body) + key.delta(step);
    log::debug!("{:?} -> velocity ({:.1}, {:.1})", key, velocity.x, velocity.y);
    world.set_velocity(body, velocity);
}
