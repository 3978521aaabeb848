//! Deterministic simulation module
//!
//! Maze generation, layout and the win-state machine. This module must stay
//! pure and deterministic:
//! - Seeded RNG only
//! - Stable body order (layout order)
//! - No rendering or platform dependencies; physics goes through `PhysicsWorld`

pub mod collision;
pub mod generator;
pub mod grid;
pub mod input;
pub mod layout;
pub mod state;
pub mod tick;
pub mod world;

pub use collision::{CollisionPair, CollisionResult, shapes_collide};
pub use generator::{Direction, Maze, carve_passages};
pub use grid::{Cell, Grid};
pub use input::{Key, apply_key};
pub use layout::{BodySpec, Label, Layout, Shape, build_layout};
pub use state::{GameEvent, GamePhase, GameState, RngState};
pub use tick::{TickInput, tick};
pub use world::{BodyId, PhysicsWorld, SandboxBody, SandboxWorld};
