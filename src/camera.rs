//! Viewport tracking. Keeps a fixed `VISIBLE_CELLS × VISIBLE_CELLS` window of the grid around the
//! player while clamping at the level edges, and frames the 2D camera on that window.
//!
//! The viewport only changes when the player actually moves (or a new game starts); it is not
//! recomputed every frame.

use bevy::math::Rect;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;

use crate::grid::{GridPos, GridWorld, Tile};
use crate::level::LevelConfig;

/// Side length of the visible window, in cells.
pub const VISIBLE_CELLS: i32 = 8;

/// Registers the camera entity and keeps its projection fitted to the visible window.
pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Viewport>()
            .add_systems(Startup, setup_camera)
            .add_systems(Update, fit_camera_to_window);
    }
}

/// Marker component for the camera that looks at the visible window.
#[derive(Component)]
pub struct ViewportCamera;

/// Top-left visible cell.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Viewport {
    pub offset_x: i32,
    pub offset_y: i32,
}

/// One cell inside the visible window, with its pixel rect relative to the window's top-left
/// corner (x to the right, y downwards).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VisibleCell {
    pub pos: GridPos,
    pub tile: Tile,
    pub rect: Rect,
}

impl Viewport {
    /// Centres the window on `pos`, clamped so it never extends past the grid. Axes where the level
    /// is smaller than the window stay at 0.
    pub fn update(&mut self, pos: GridPos, grid: &GridWorld) {
        self.offset_x = clamp_axis(pos.col, grid.width());
        self.offset_y = clamp_axis(pos.row, grid.height());
    }

    pub fn contains(&self, pos: GridPos) -> bool {
        (self.offset_x..self.offset_x + VISIBLE_CELLS).contains(&pos.col)
            && (self.offset_y..self.offset_y + VISIBLE_CELLS).contains(&pos.row)
    }

    /// Every in-bounds cell of the window. Levels smaller than the window yield fewer cells; no
    /// padding is invented.
    pub fn visible_cells<'a>(
        &self,
        grid: &'a GridWorld,
        cell_size: f32,
    ) -> impl Iterator<Item = VisibleCell> + 'a {
        let Viewport { offset_x, offset_y } = *self;
        (offset_y..offset_y + VISIBLE_CELLS).flat_map(move |row| {
            (offset_x..offset_x + VISIBLE_CELLS).filter_map(move |col| {
                let tile = grid.tile(row, col)?;
                let (x, y) = grid.cell_to_pixel(row - offset_y, col - offset_x, cell_size);
                Some(VisibleCell {
                    pos: GridPos::new(col, row),
                    tile,
                    rect: Rect::new(x, y, x + cell_size, y + cell_size),
                })
            })
        })
    }

    /// Sprite rect for the player, centred inside its cell, relative to the window's top-left.
    pub fn player_rect(&self, pos: GridPos, cell_size: f32, sprite_size: f32) -> Rect {
        let inset = (cell_size - sprite_size) * 0.5;
        let x = (pos.col - self.offset_x) as f32 * cell_size + inset;
        let y = (pos.row - self.offset_y) as f32 * cell_size + inset;
        Rect::new(x, y, x + sprite_size, y + sprite_size)
    }
}

fn clamp_axis(player: i32, extent: usize) -> i32 {
    let extent = i32::try_from(extent).unwrap_or(i32::MAX);
    let max_offset = (extent - VISIBLE_CELLS).max(0);
    (player - VISIBLE_CELLS / 2).clamp(0, max_offset)
}

/// Converts a window-relative rect (y down) into the world translation of its centre (y up).
pub fn window_rect_to_world(rect: Rect, z: f32) -> Vec3 {
    let center = rect.center();
    Vec3::new(center.x, -center.y, z)
}

fn setup_camera(mut commands: Commands, config: Res<LevelConfig>) {
    let half = VISIBLE_CELLS as f32 * config.cell_size * 0.5;
    commands.spawn((
        Name::new("ViewportCamera"),
        Camera2dBundle {
            transform: Transform::from_xyz(half, -half, 999.9),
            ..default()
        },
        ViewportCamera,
    ));
}

/// Scales the orthographic projection so the whole visible window fits inside the primary window,
/// whatever its current size.
fn fit_camera_to_window(
    config: Res<LevelConfig>,
    windows: Query<&Window, (With<PrimaryWindow>, Changed<Window>)>,
    mut camera_query: Query<&mut OrthographicProjection, With<ViewportCamera>>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };

    let Ok(mut projection) = camera_query.get_single_mut() else {
        return;
    };

    let window_size = window.resolution.size();
    if window_size.x <= 0.0 || window_size.y <= 0.0 {
        return;
    }

    let span = VISIBLE_CELLS as f32 * config.cell_size;
    let scale = (span / window_size.x).max(span / window_size.y);
    projection.scale = scale.max(0.0001);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::grid_from_rows;

    fn open_grid(width: usize, height: usize) -> GridWorld {
        let row = ".".repeat(width);
        let rows: Vec<&str> = (0..height).map(|_| row.as_str()).collect();
        grid_from_rows(&rows)
    }

    #[test]
    fn small_offsets_clamp_to_zero() {
        let grid = open_grid(10, 10);
        let mut viewport = Viewport::default();
        viewport.update(GridPos::new(2, 2), &grid);
        assert_eq!((viewport.offset_x, viewport.offset_y), (0, 0));
    }

    #[test]
    fn far_corner_clamps_to_last_window() {
        let grid = open_grid(10, 10);
        let mut viewport = Viewport::default();
        viewport.update(GridPos::new(9, 9), &grid);
        assert_eq!((viewport.offset_x, viewport.offset_y), (2, 2));
    }

    #[test]
    fn exact_fit_never_scrolls() {
        let grid = open_grid(8, 8);
        let mut viewport = Viewport::default();
        for row in 0..8 {
            for col in 0..8 {
                viewport.update(GridPos::new(col, row), &grid);
                assert_eq!(viewport, Viewport::default(), "({col}, {row})");
            }
        }
    }

    #[test]
    fn last_column_of_wide_grid_does_not_overshoot() {
        let grid = open_grid(30, 5);
        let mut viewport = Viewport::default();
        viewport.update(GridPos::new(29, 4), &grid);
        assert_eq!(viewport.offset_x, 30 - VISIBLE_CELLS);
        assert_eq!(viewport.offset_y, 0);
    }

    #[test]
    fn follows_player_in_the_middle() {
        let grid = open_grid(40, 40);
        let mut viewport = Viewport::default();
        viewport.update(GridPos::new(20, 13), &grid);
        assert_eq!((viewport.offset_x, viewport.offset_y), (16, 9));
        assert!(viewport.contains(GridPos::new(20, 13)));
    }

    #[test]
    fn update_is_idempotent() {
        let grid = open_grid(25, 17);
        let mut viewport = Viewport::default();
        viewport.update(GridPos::new(14, 11), &grid);
        let first = viewport;
        viewport.update(GridPos::new(14, 11), &grid);
        assert_eq!(viewport, first);
    }

    #[test]
    fn window_stays_inside_large_grids() {
        let grid = open_grid(12, 20);
        let mut viewport = Viewport::default();
        for row in 0..20 {
            for col in 0..12 {
                let pos = GridPos::new(col, row);
                viewport.update(pos, &grid);
                assert!(viewport.offset_x >= 0 && viewport.offset_x + VISIBLE_CELLS <= 12);
                assert!(viewport.offset_y >= 0 && viewport.offset_y + VISIBLE_CELLS <= 20);
                assert!(viewport.contains(pos));
            }
        }
    }

    #[test]
    fn visible_cells_cover_the_window() {
        let grid = open_grid(10, 10);
        let viewport = Viewport {
            offset_x: 2,
            offset_y: 1,
        };
        let cells: Vec<_> = viewport.visible_cells(&grid, 10.0).collect();
        assert_eq!(cells.len(), (VISIBLE_CELLS * VISIBLE_CELLS) as usize);

        let first = cells[0];
        assert_eq!(first.pos, GridPos::new(2, 1));
        assert_eq!(first.rect, Rect::new(0.0, 0.0, 10.0, 10.0));

        let last = cells[cells.len() - 1];
        assert_eq!(last.pos, GridPos::new(9, 8));
        assert_eq!(last.rect, Rect::new(70.0, 70.0, 80.0, 80.0));
    }

    #[test]
    fn small_levels_yield_partial_windows() {
        let grid = grid_from_rows(&["..#", "#.."]);
        let mut viewport = Viewport::default();
        viewport.update(GridPos::new(2, 1), &grid);
        assert_eq!(viewport, Viewport::default());

        let cells: Vec<_> = viewport.visible_cells(&grid, 1.0).collect();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[2].tile, Tile::Blocked);
    }

    #[test]
    fn player_rect_is_centred_in_its_cell() {
        let viewport = Viewport {
            offset_x: 3,
            offset_y: 1,
        };
        let rect = viewport.player_rect(GridPos::new(4, 2), 50.0, 30.0);
        assert_eq!(rect, Rect::new(60.0, 60.0, 90.0, 90.0));
    }

    #[test]
    fn window_rect_flips_y() {
        let world = window_rect_to_world(Rect::new(0.0, 0.0, 10.0, 10.0), 1.0);
        assert_eq!(world, Vec3::new(5.0, -5.0, 1.0));
    }
}
