//! Application entry point: composes the Bevy runtime, window configuration, and the game plugin.
//!
//! The level file comes from `grid_explorer.json` (if present) and can be overridden by passing a
//! path as the first command-line argument.

mod app;
mod camera;
mod grid;
mod input;
mod level;
mod movement;
mod player;
mod render;
mod spawn;
mod state;
mod ui;

use std::path::{Path, PathBuf};

use app::GridExplorerPlugin;
use bevy::prelude::*;
use bevy::window::{Window, WindowResolution};
use level::{LevelConfig, CONFIG_PATH};

fn main() -> AppExit {
    let primary_window = Window {
        title: "Grid Explorer".to_string(),
        resolution: WindowResolution::new(800.0, 600.0),
        ..default()
    };

    let mut app = App::new();
    app.insert_resource(ClearColor(Color::srgb(0.02, 0.02, 0.04)))
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(primary_window),
                    // Close requests become a `Quit` input; the game decides when to exit.
                    close_when_requested: false,
                    ..default()
                })
                .set(ImagePlugin::default_nearest()),
        );

    // Logging is live once `DefaultPlugins` is added, so config problems can be reported properly.
    let config = LevelConfig::load(Path::new(CONFIG_PATH))
        .unwrap_or_else(|err| {
            warn!("{err}; falling back to default settings.");
            LevelConfig::default()
        })
        .with_level_path(std::env::args_os().nth(1).map(PathBuf::from));

    info!("Using level file '{}'", config.level_path.display());

    app.insert_resource(config)
        .add_plugins(GridExplorerPlugin)
        .run()
}
