//! Fixed timestep tick
//!
//! One tick drains the queued key presses, steps the physics host and feeds
//! the resulting collision starts into the state machine. Running every
//! mutation from here keeps the solve transition at-most-once even when the
//! host collects input on another thread.

use super::input::Key;
use super::state::{GameEvent, GameState};
use super::world::PhysicsWorld;

/// Input commands for a single tick (deterministic)
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Key presses since the last tick, in arrival order
    pub keys: Vec<Key>,
}

impl TickInput {
    pub fn keys(keys: impl IntoIterator<Item = Key>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }
}

/// Advance the session by one timestep
pub fn tick<W: PhysicsWorld + ?Sized>(
    state: &mut GameState,
    world: &mut W,
    input: &TickInput,
    dt: f32,
) -> Option<GameEvent> {
    state.time_ticks += 1;

    for &key in &input.keys {
        state.handle_key(world, key);
    }

    let pairs = world.step(dt);
    state.on_collision(world, &pairs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::SIM_DT;
    use crate::settings::Settings;
    use crate::sim::layout::Label;
    use crate::sim::state::GamePhase;
    use crate::sim::world::SandboxWorld;

    fn session(rows: usize, columns: usize, seed: u64) -> (GameState, SandboxWorld) {
        let mut world = SandboxWorld::new();
        let settings = Settings {
            seed: Some(seed),
            ..Settings::with_cells(rows, columns)
        };
        let state = GameState::new(&settings, &mut world).unwrap();
        (state, world)
    }

    #[test]
    fn test_single_cell_solves_on_first_tick() {
        // Player and goal share the only cell and overlap immediately
        let (mut state, mut world) = session(1, 1, 1);
        let idle = TickInput::default();

        assert_eq!(tick(&mut state, &mut world, &idle, SIM_DT), Some(GameEvent::MazeSolved));
        assert_eq!(state.phase, GamePhase::Solved);
        assert_eq!(tick(&mut state, &mut world, &idle, SIM_DT), None);
        assert_eq!(state.time_ticks, 2);
    }

    #[test]
    fn test_idle_player_stays_locked() {
        let (mut state, mut world) = session(4, 4, 9);
        let start = world.body(state.player).unwrap().center;
        for _ in 0..120 {
            assert_eq!(tick(&mut state, &mut world, &TickInput::default(), SIM_DT), None);
        }
        // No gravity while locked
        assert_eq!(world.body(state.player).unwrap().center, start);
        assert_eq!(state.phase, GamePhase::Locked);
    }

    #[test]
    fn test_drive_into_goal() {
        let (mut state, mut world) = session(2, 2, 42);

        let push = TickInput::keys([Key::Right, Key::Down]);
        let mut solved_at = tick(&mut state, &mut world, &push, SIM_DT).map(|_| state.time_ticks);
        for _ in 0..120 {
            if solved_at.is_some() {
                break;
            }
            if tick(&mut state, &mut world, &TickInput::default(), SIM_DT).is_some() {
                solved_at = Some(state.time_ticks);
            }
        }

        assert!(solved_at.is_some(), "player never reached the goal");
        assert!(state.is_solved());
        assert!(
            world
                .bodies_labeled(Label::Wall)
                .into_iter()
                .all(|id| !world.is_static(id))
        );
    }

    #[test]
    fn test_gravity_enabled_after_solve() {
        let (mut state, mut world) = session(1, 1, 1);
        tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        let player_y = world.body(state.player).unwrap().center.y;
        for _ in 0..10 {
            tick(&mut state, &mut world, &TickInput::default(), SIM_DT);
        }
        assert!(world.body(state.player).unwrap().center.y > player_y);
    }

    #[test]
    fn test_determinism() {
        let (mut state1, mut world1) = session(6, 6, 99999);
        let (mut state2, mut world2) = session(6, 6, 99999);

        let inputs = [
            TickInput::keys([Key::Right]),
            TickInput::keys([Key::Down, Key::Down]),
            TickInput::default(),
            TickInput::keys([Key::Left]),
        ];

        for input in &inputs {
            tick(&mut state1, &mut world1, input, SIM_DT);
            tick(&mut state2, &mut world2, input, SIM_DT);
        }

        assert_eq!(state1.time_ticks, state2.time_ticks);
        assert_eq!(state1.phase, state2.phase);
        assert_eq!(
            world1.body(state1.player).unwrap().center,
            world2.body(state2.player).unwrap().center
        );
    }
}
