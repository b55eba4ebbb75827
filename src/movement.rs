use bevy::prelude::*;

use crate::camera::Viewport;
use crate::grid::{GridPos, GridWorld};
use crate::input::GridInput;
use crate::player::Player;
use crate::state::GameSet;

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            move_player
                .in_set(GameSet::Movement)
                .run_if(resource_exists::<GridWorld>),
        );
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Up,
    Down,
}

impl Direction {
    /// `(d_row, d_col)` for one step.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
        }
    }
}

/// Applies one frame's inputs in arrival order and returns the new position if the player moved.
///
/// At most one move commits per batch. Until then each direction press is tried in turn, so a
/// blocked press does not swallow a later valid one. Every release re-arms the player.
pub fn apply_input_batch<'a, I>(player: &mut Player, inputs: I, grid: &GridWorld) -> Option<GridPos>
where
    I: IntoIterator<Item = &'a GridInput>,
{
    let mut moved = None;
    for input in inputs {
        match *input {
            GridInput::KeyDown(key) => {
                let Some(direction) = key.direction() else {
                    continue;
                };
                if moved.is_none() && player.try_move(direction, grid) {
                    moved = Some(player.pos);
                }
            }
            GridInput::KeyUp(_) => player.release(),
            GridInput::Quit => {}
        }
    }
    moved
}

/// Runs in every state: releases must re-arm the player even while the menu is shown, but only a
/// live player in `Playing` ever exists to receive direction presses.
fn move_player(
    mut inputs: EventReader<GridInput>,
    grid: Res<GridWorld>,
    mut viewport: ResMut<Viewport>,
    mut query: Query<&mut Player>,
) {
    let batch: Vec<GridInput> = inputs.read().copied().collect();
    if batch.is_empty() {
        return;
    }

    for mut player in &mut query {
        if let Some(pos) = apply_input_batch(&mut player, &batch, &grid) {
            viewport.update(pos, &grid);
            debug_assert!(viewport.contains(pos));
            debug!(
                "Player moved to ({}, {}); viewport offset ({}, {})",
                pos.col, pos.row, viewport.offset_x, viewport.offset_y
            );
        }
    }
}
