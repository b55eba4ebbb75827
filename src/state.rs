//! Game flow. A start screen gates play: `Confirm` in the menu switches to `Playing`, whose
//! on-enter schedule builds a fresh player and viewport. There is no way back to the menu.

use bevy::prelude::*;

use crate::grid::GridWorld;
use crate::input::{GridInput, Key};

/// High-level state machine for the game loop.
#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Hash, States)]
pub enum GameState {
    #[default]
    Menu,
    Playing,
}

/// Named system sets to structure the Update schedule.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameSet {
    Input,
    Movement,
    Render,
}

/// Starts the game on `Confirm`. Waits for the level to exist so a failed load never reaches
/// `Playing`. `NextState` is applied by Bevy at the next state-transition point.
pub fn start_game(
    mut inputs: EventReader<GridInput>,
    grid: Option<Res<GridWorld>>,
    mut next_state: ResMut<NextState<GameState>>,
) {
    let confirmed = inputs
        .read()
        .any(|input| *input == GridInput::KeyDown(Key::Confirm));

    if confirmed && grid.is_some() {
        info!("Starting game.");
        next_state.set(GameState::Playing);
    }
}
