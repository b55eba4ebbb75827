//! Level orchestration: parses text maps into a [`GridWorld`], loads the configured level file at
//! startup, and owns the runtime configuration describing where levels live and how big cells are.
//!
//! The parsed grid is inserted as a Bevy resource and never mutated afterwards. A level that cannot
//! be loaded is reported once and shuts the app down; the game never retries on its own.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use bevy::prelude::*;
use serde::Deserialize;
use thiserror::Error;

use crate::grid::{GridWorld, Tile};

/// Registers the configuration resource and the startup system that loads the level file.
pub struct LevelPlugin;

impl Plugin for LevelPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelConfig>()
            .add_systems(Startup, load_level_grid);
    }
}

/// Default location of the optional JSON configuration file, relative to the working directory.
pub const CONFIG_PATH: &str = "grid_explorer.json";

/// Runtime-tweakable configuration: which level file to load, how large a cell is on screen, and
/// whether spawns should be reproducible. Every field has a default, so a partial JSON file works.
#[derive(Resource, Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LevelConfig {
    pub level_path: PathBuf,
    pub cell_size: f32,
    pub player_size: f32,
    pub spawn_seed: Option<u64>,
}

impl Default for LevelConfig {
    fn default() -> Self {
        Self {
            level_path: PathBuf::from("assets/levels/level.txt"),
            cell_size: 50.0,
            player_size: 36.0,
            spawn_seed: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed config '{path}': {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

impl LevelConfig {
    /// Reads the config file at `path`. A missing file is not an error: defaults apply.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(ConfigError::Io {
                    path: path.to_owned(),
                    source,
                })
            }
        };

        Self::from_json(&text).map_err(|source| ConfigError::Parse {
            path: path.to_owned(),
            source,
        })
    }

    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Replaces the level path, e.g. with one supplied on the command line.
    pub fn with_level_path(mut self, level_path: Option<PathBuf>) -> Self {
        if let Some(path) = level_path {
            self.level_path = path;
        }
        self
    }
}

#[derive(Debug, Error)]
pub enum LevelError {
    #[error("failed to read level '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("level file contains no lines")]
    Empty,
    #[error("level file contains only blank rows")]
    NoRows,
}

/// Turns raw text lines into a rectangular grid.
///
/// Each line is one row with surrounding whitespace stripped. Rows shorter than the longest one are
/// right-padded with the passable symbol, so jagged maps gain open floor rather than walls.
pub fn parse_level<I, S>(lines: I) -> Result<GridWorld, LevelError>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let rows: Vec<Vec<char>> = lines
        .into_iter()
        .map(|line| line.as_ref().trim().chars().collect())
        .collect();

    if rows.is_empty() {
        return Err(LevelError::Empty);
    }

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    if width == 0 {
        return Err(LevelError::NoRows);
    }

    let height = rows.len();
    let mut tiles = Vec::with_capacity(width * height);
    for row in &rows {
        tiles.extend(row.iter().copied().map(Tile::from_symbol));
        tiles.extend(std::iter::repeat(Tile::Passable).take(width - row.len()));
    }

    Ok(GridWorld::new(width, height, tiles))
}

/// Reads a level file from disk and parses it.
pub fn load_level(path: &Path) -> Result<GridWorld, LevelError> {
    let text = fs::read_to_string(path).map_err(|source| LevelError::Io {
        path: path.to_owned(),
        source,
    })?;
    parse_level(text.lines())
}

fn load_level_grid(
    mut commands: Commands,
    config: Res<LevelConfig>,
    mut exit: EventWriter<AppExit>,
) {
    match load_level(&config.level_path) {
        Ok(grid) => {
            info!(
                "Loaded level '{}' ({}x{}, {} free cells)",
                config.level_path.display(),
                grid.width(),
                grid.height(),
                grid.free_cells().len()
            );
            commands.insert_resource(grid);
        }
        Err(err) => {
            error!("{err}. Pass a different level file as the first argument.");
            exit.send(AppExit::error());
        }
    }
}
