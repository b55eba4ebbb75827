//! High-level plugin composition.
//!
//! The `GridExplorerPlugin` glues together all domain-specific plugins (level, player, camera,
//! input, movement, rendering, start screen) and sets up system ordering. Each subsystem owns its
//! own resources; this orchestrator merely registers them with the Bevy application.

use bevy::prelude::*;

use crate::camera::CameraPlugin;
use crate::input::GridInputPlugin;
use crate::level::LevelPlugin;
use crate::movement::MovementPlugin;
use crate::player::PlayerPlugin;
use crate::render::GridRenderPlugin;
use crate::state::{start_game, GameSet, GameState};
use crate::ui::UiPlugin;

/// Bundles every gameplay plugin into a single unit that can be added to the Bevy `App`. Expects a
/// `LevelConfig` resource to be inserted beforehand when the defaults are not wanted.
pub struct GridExplorerPlugin;

impl Plugin for GridExplorerPlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<GameState>()
            .add_plugins((
                LevelPlugin,       // Config + level file loading.
                CameraPlugin,      // Viewport resource and camera framing.
                PlayerPlugin,      // Player spawn on game start.
                GridInputPlugin,   // Window events -> GridInput batch.
                MovementPlugin,    // One-step moves + viewport updates.
                GridRenderPlugin,  // Sprites for the visible window.
                UiPlugin,          // Start screen.
            ))
            // Input → Movement → Render, so every input of a frame is applied before anything
            // reads the viewport.
            .configure_sets(
                Update,
                (GameSet::Input, GameSet::Movement, GameSet::Render).chain(),
            )
            .add_systems(
                Update,
                start_game
                    .in_set(GameSet::Movement)
                    .run_if(in_state(GameState::Menu)),
            );
    }
}
