//! Game state and the locked -> solved transition
//!
//! One `GameState` per session. It owns the generated maze and the handles of
//! the bodies it spawned; the bodies themselves live in the physics host.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::CollisionPair;
use super::generator::Maze;
use super::input::{Key, apply_key};
use super::layout::{Label, Layout, build_layout};
use super::world::{BodyId, PhysicsWorld};
use crate::consts::LOCKED_GRAVITY_Y;
use crate::error::Result;
use crate::settings::Settings;

/// Current phase of the maze
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Walls are static, gravity is off
    Locked,
    /// Goal reached: walls released, gravity on. Terminal.
    Solved,
}

/// Something the host UI should react to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Show the "you win" indicator
    MazeSolved,
}

/// RNG seed wrapper
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct RngState {
    pub seed: u64,
}

impl RngState {
    pub fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed from settings, or fresh entropy when none is configured
    pub fn from_settings(settings: &Settings) -> Self {
        Self::new(settings.seed.unwrap_or_else(rand::random))
    }

    pub fn to_rng(&self) -> Pcg32 {
        Pcg32::seed_from_u64(self.seed)
    }
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the maze was generated from, when known
    pub seed: Option<u64>,
    pub maze: Maze,
    pub layout: Layout,
    pub phase: GamePhase,
    /// The controllable agent
    pub player: BodyId,
    pub goal: BodyId,
    /// Every spawned body, in layout order
    pub bodies: Vec<BodyId>,
    /// Gravity switched on by the win transition
    pub release_gravity_y: f32,
    /// Velocity change per key press
    pub velocity_step: f32,
    /// Simulation tick counter
    pub time_ticks: u64,
}

impl GameState {
    /// Build a maze into `world`, seeding from settings (or entropy)
    pub fn new<W: PhysicsWorld + ?Sized>(settings: &Settings, world: &mut W) -> Result<Self> {
        let rng_state = RngState::from_settings(settings);
        let mut state = Self::with_rng(settings, world, &mut rng_state.to_rng())?;
        state.seed = Some(rng_state.seed);
        log::info!("Maze seed: {}", rng_state.seed);
        Ok(state)
    }

    /// Build a maze into `world` using the caller's random source
    pub fn with_rng<W: PhysicsWorld + ?Sized, R: Rng + ?Sized>(
        settings: &Settings,
        world: &mut W,
        rng: &mut R,
    ) -> Result<Self> {
        settings.validate()?;
        let maze = Maze::generate(settings.rows, settings.columns, rng)?;
        Self::spawn_maze(maze, settings, world)
    }

    /// Lay out an already generated maze and spawn its bodies
    pub fn from_maze<W: PhysicsWorld + ?Sized>(maze: Maze, settings: &Settings, world: &mut W) -> Result<Self> {
        settings.validate()?;
        Self::spawn_maze(maze, settings, world)
    }

    /// Shared tail of the constructors; `settings` are already validated
    fn spawn_maze<W: PhysicsWorld + ?Sized>(maze: Maze, settings: &Settings, world: &mut W) -> Result<Self> {
        let layout = build_layout(&maze.grid, settings)?;

        let bodies: Vec<BodyId> = layout.bodies.iter().map(|spec| world.spawn(spec)).collect();
        let player = bodies[layout.player_index];
        let goal = bodies[layout.goal_index];

        // Player drifts freely until the maze is solved
        world.set_gravity_y(LOCKED_GRAVITY_Y);

        log::info!(
            "Spawned {} bodies ({} walls)",
            bodies.len(),
            layout.count(Some(Label::Wall))
        );

        Ok(Self {
            seed: None,
            maze,
            layout,
            phase: GamePhase::Locked,
            player,
            goal,
            bodies,
            release_gravity_y: settings.release_gravity_y,
            velocity_step: settings.velocity_step,
            time_ticks: 0,
        })
    }

    pub fn is_solved(&self) -> bool {
        self.phase == GamePhase::Solved
    }

    /// A pair qualifies iff its labels are exactly `{player, goal}`
    pub fn is_goal_contact(pair: &CollisionPair) -> bool {
        pair.is_between(Label::Player, Label::Goal)
    }

    /// Feed one batch of collision-start pairs into the state machine.
    ///
    /// The first qualifying pair turns gravity on and makes every wall
    /// dynamic. Everything after that is a no-op.
    pub fn on_collision<W: PhysicsWorld + ?Sized>(
        &mut self,
        world: &mut W,
        pairs: &[CollisionPair],
    ) -> Option<GameEvent> {
        let contact = pairs.iter().find(|p| Self::is_goal_contact(p));

        if self.phase == GamePhase::Solved {
            if contact.is_some() {
                log::debug!("Goal contact after solve ignored");
            }
            return None;
        }

        let Some(contact) = contact else {
            if !pairs.is_empty() {
                log::debug!("Ignored {} non-goal collision(s)", pairs.len());
            }
            return None;
        };

        world.set_gravity_y(self.release_gravity_y);
        let walls = world.bodies_labeled(Label::Wall);
        for &wall in &walls {
            world.set_static(wall, false);
        }
        self.phase = GamePhase::Solved;

        log::info!(
            "Maze solved at tick {} ({} + {}), released {} walls",
            self.time_ticks,
            contact.label_a,
            contact.label_b,
            walls.len()
        );
        Some(GameEvent::MazeSolved)
    }

    /// Apply one directional key press to the player
    pub fn handle_key<W: PhysicsWorld + ?Sized>(&self, world: &mut W, key: Key) {
        apply_key(world, self.player, key, self.velocity_step);
    }
}
