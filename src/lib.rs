//! Tumble Maze - a perfect maze that falls apart when you solve it
//!
//! Core modules:
//! - `sim`: Deterministic maze generation, layout and win-state machine
//! - `settings`: Play-field configuration (JSON, validated up front)
//! - `error`: Crate-wide error type
//!
//! Physics, rendering and keyboard capture belong to the host. The library
//! talks to them through [`sim::PhysicsWorld`] and plain collision data.

pub mod error;
pub mod settings;
pub mod sim;

pub use error::{MazeError, Result};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation timestep (60 Hz)
    pub const SIM_DT: f32 = 1.0 / 60.0;

    /// Play-field dimensions
    pub const FIELD_WIDTH: f32 = 600.0;
    pub const FIELD_HEIGHT: f32 = 600.0;
    pub const DEFAULT_ROWS: usize = 12;
    pub const DEFAULT_COLUMNS: usize = 12;

    /// Outer boundary thickness (centered on the field edge)
    pub const BORDER_THICKNESS: f32 = 40.0;
    /// Internal wall thickness
    pub const WALL_THICKNESS: f32 = 10.0;

    /// Goal side length as a fraction of the unit cell
    pub const GOAL_SCALE: f32 = 0.7;
    /// Player radius as a fraction of the smaller cell side
    pub const PLAYER_RADIUS_SCALE: f32 = 0.25;

    /// Velocity change per key press
    pub const VELOCITY_STEP: f32 = 5.0;
    /// Gravity while the maze is locked (player drifts freely)
    pub const LOCKED_GRAVITY_Y: f32 = 0.0;
    /// Gravity switched on once the goal is reached
    pub const RELEASE_GRAVITY_Y: f32 = 1.0;
}
