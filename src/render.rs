//! Sprite rendering for the visible window. Reads the viewport's per-cell rects and the player's
//! rect and mirrors them as flat-coloured sprites; it never computes offsets of its own.
//!
//! Tile sprites are rebuilt only when the viewport moves, so a frame where nothing happened costs
//! nothing here.

use bevy::prelude::*;

use crate::camera::{window_rect_to_world, Viewport};
use crate::grid::{GridWorld, Tile};
use crate::level::LevelConfig;
use crate::player::Player;
use crate::state::{GameSet, GameState};

const TILE_Z: f32 = 0.0;
const PLAYER_Z: f32 = 1.0;

/// Registers the tile and player sprite systems.
pub struct GridRenderPlugin;

impl Plugin for GridRenderPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(
            Update,
            (
                redraw_visible_tiles.run_if(resource_changed::<Viewport>),
                attach_player_sprite,
                place_player_sprite,
            )
                .chain()
                .in_set(GameSet::Render)
                .run_if(in_state(GameState::Playing).and_then(resource_exists::<GridWorld>)),
        )
        .add_systems(OnExit(GameState::Playing), clear_tile_sprites);
    }
}

/// Marker on every sprite that shows one visible cell.
#[derive(Component)]
pub struct TileSprite;

pub fn tile_color(tile: Tile) -> Color {
    match tile {
        Tile::Passable => Color::srgb(0.36, 0.62, 0.28),
        Tile::Blocked => Color::srgb(0.55, 0.36, 0.18),
        Tile::Unknown => Color::srgb(0.08, 0.08, 0.1),
    }
}

fn redraw_visible_tiles(
    mut commands: Commands,
    grid: Res<GridWorld>,
    viewport: Res<Viewport>,
    config: Res<LevelConfig>,
    existing: Query<Entity, With<TileSprite>>,
) {
    for entity in &existing {
        commands.entity(entity).despawn_recursive();
    }

    for cell in viewport.visible_cells(&grid, config.cell_size) {
        commands.spawn((
            TileSprite,
            SpriteBundle {
                sprite: Sprite {
                    color: tile_color(cell.tile),
                    custom_size: Some(cell.rect.size()),
                    ..default()
                },
                transform: Transform::from_translation(window_rect_to_world(cell.rect, TILE_Z)),
                ..default()
            },
        ));
    }
}

fn attach_player_sprite(
    mut commands: Commands,
    config: Res<LevelConfig>,
    query: Query<Entity, Added<Player>>,
) {
    for entity in &query {
        commands.entity(entity).insert(SpriteBundle {
            sprite: Sprite {
                color: Color::srgb(0.85, 0.15, 0.12),
                custom_size: Some(Vec2::splat(config.player_size)),
                ..default()
            },
            ..default()
        });
    }
}

fn place_player_sprite(
    viewport: Res<Viewport>,
    config: Res<LevelConfig>,
    mut query: Query<(Ref<Player>, &mut Transform)>,
) {
    for (player, mut transform) in &mut query {
        if !player.is_changed() && !viewport.is_changed() {
            continue;
        }

        let rect = viewport.player_rect(player.pos, config.cell_size, config.player_size);
        transform.translation = window_rect_to_world(rect, PLAYER_Z);
    }
}

fn clear_tile_sprites(mut commands: Commands, query: Query<Entity, With<TileSprite>>) {
    for entity in &query {
        commands.entity(entity).despawn_recursive();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tiles_have_distinct_colors() {
        let colors = [
            tile_color(Tile::Passable),
            tile_color(Tile::Blocked),
            tile_color(Tile::Unknown),
        ];
        assert_ne!(colors[0], colors[1]);
        assert_ne!(colors[1], colors[2]);
        assert_ne!(colors[0], colors[2]);
    }
}
