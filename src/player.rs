//! Player entity lifecycle and the one-step movement rules that govern it.
//!
//! A player is recreated from scratch every time a game starts: the previous entity (if any) is
//! despawned, a spawn cell is rolled from the level's free cells, and the viewport is recentred.

use bevy::prelude::*;

use crate::camera::Viewport;
use crate::grid::{GridPos, GridWorld};
use crate::movement::Direction;
use crate::spawn::{pick_spawn, SpawnRng};
use crate::state::GameState;

/// Registers the systems that create/destroy the player entity when entering or exiting gameplay.
pub struct PlayerPlugin;

impl Plugin for PlayerPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SpawnRng>()
            .add_systems(OnEnter(GameState::Playing), spawn_player)
            .add_systems(OnExit(GameState::Playing), despawn_player);
    }
}

/// The player token. `can_move` throttles movement to one cell per key press: a committed move
/// disarms it and any key release re-arms it.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Player {
    pub pos: GridPos,
    pub can_move: bool,
}

impl Player {
    pub fn new(pos: GridPos) -> Self {
        Self {
            pos,
            can_move: true,
        }
    }

    /// Attempts a single step. Blocked or out-of-bounds targets are rejected without touching any
    /// state; so is every attempt while disarmed.
    pub fn try_move(&mut self, direction: Direction, grid: &GridWorld) -> bool {
        if !self.can_move {
            return false;
        }

        let (d_row, d_col) = direction.delta();
        let target = self.pos.offset(d_row, d_col);
        if !grid.is_passable_at(target) {
            return false;
        }

        self.pos = target;
        self.can_move = false;
        true
    }

    /// Re-arms movement. Called for every key release, whichever key it was.
    pub fn release(&mut self) {
        self.can_move = true;
    }
}

fn spawn_player(
    mut commands: Commands,
    grid: Res<GridWorld>,
    mut rng: ResMut<SpawnRng>,
    mut viewport: ResMut<Viewport>,
    existing: Query<Entity, With<Player>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    let free = grid.free_cells();
    if free.is_empty() {
        warn!("Level has no passable cells; placing the player at (0, 0).");
    }

    let spawn = pick_spawn(&free, &mut rng.0);
    viewport.update(spawn, &grid);
    info!(
        "Player spawned at ({}, {}); viewport offset ({}, {})",
        spawn.col, spawn.row, viewport.offset_x, viewport.offset_y
    );

    commands.spawn((Name::new("Player"), Player::new(spawn)));
}

fn despawn_player(mut commands: Commands, query: Query<Entity, With<Player>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}
