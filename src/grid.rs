//! Grid world model. Holds the immutable tile matrix of the loaded level and answers every
//! question the rest of the game asks about terrain: passability, pixel placement, and which
//! cells are free for spawning.
//!
//! The grid is stored as a single row-major `Vec<Tile>` inside a Bevy resource. Nothing mutates it
//! after the level parser builds it; systems only ever borrow it through `Res<GridWorld>`.

use bevy::prelude::*;

/// Terrain classification of a single cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tile {
    Passable,
    Blocked,
    /// Any map symbol without a defined meaning. Treated as non-passable.
    Unknown,
}

impl Tile {
    pub const PASSABLE_SYMBOL: char = '.';
    pub const BLOCKED_SYMBOL: char = '#';

    pub fn from_symbol(symbol: char) -> Self {
        match symbol {
            Self::PASSABLE_SYMBOL => Tile::Passable,
            Self::BLOCKED_SYMBOL => Tile::Blocked,
            _ => Tile::Unknown,
        }
    }

    pub fn is_passable(self) -> bool {
        self == Tile::Passable
    }
}

/// (column, row) coordinate into the grid. Signed so out-of-bounds probes are representable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub col: i32,
    pub row: i32,
}

impl GridPos {
    pub const ORIGIN: GridPos = GridPos { col: 0, row: 0 };

    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    pub fn offset(self, d_row: i32, d_col: i32) -> Self {
        Self {
            col: self.col + d_col,
            row: self.row + d_row,
        }
    }
}

/// The tile matrix of one loaded level.
#[derive(Resource, Debug, Clone, PartialEq, Eq)]
pub struct GridWorld {
    width: usize,
    height: usize,
    tiles: Vec<Tile>,
}

impl GridWorld {
    /// Builds a grid from row-major tiles. Callers (the level parser) guarantee
    /// `tiles.len() == width * height`.
    pub(crate) fn new(width: usize, height: usize, tiles: Vec<Tile>) -> Self {
        debug_assert_eq!(tiles.len(), width * height);
        Self {
            width,
            height,
            tiles,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    fn index(&self, row: i32, col: i32) -> Option<usize> {
        let row = usize::try_from(row).ok()?;
        let col = usize::try_from(col).ok()?;
        (row < self.height && col < self.width).then(|| row * self.width + col)
    }

    pub fn tile(&self, row: i32, col: i32) -> Option<Tile> {
        self.index(row, col).map(|idx| self.tiles[idx])
    }

    /// False for anything outside the grid; never panics.
    pub fn is_passable(&self, row: i32, col: i32) -> bool {
        self.tile(row, col).is_some_and(Tile::is_passable)
    }

    pub fn is_passable_at(&self, pos: GridPos) -> bool {
        self.is_passable(pos.row, pos.col)
    }

    /// Top-left pixel of a cell in level space. Camera offsets are the renderer's business.
    pub fn cell_to_pixel(&self, row: i32, col: i32, cell_size: f32) -> (f32, f32) {
        (col as f32 * cell_size, row as f32 * cell_size)
    }

    /// Rows as tile slices, top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Tile]> {
        // `chunks` rejects a zero chunk size; a zero-width grid simply has no rows to show.
        self.tiles.chunks(self.width.max(1)).take(self.height)
    }

    /// Every passable position, enumerated row by row.
    pub fn free_cells(&self) -> Vec<GridPos> {
        self.rows()
            .enumerate()
            .flat_map(|(row, tiles)| {
                tiles.iter().enumerate().filter_map(move |(col, tile)| {
                    tile.is_passable()
                        .then(|| GridPos::new(col as i32, row as i32))
                })
            })
            .collect()
    }
}

#[cfg(test)]
pub(crate) fn grid_from_rows(rows: &[&str]) -> GridWorld {
    let height = rows.len();
    let width = rows.first().map(|r| r.chars().count()).unwrap_or(0);
    let tiles = rows
        .iter()
        .flat_map(|r| r.chars().map(Tile::from_symbol))
        .collect();
    GridWorld::new(width, height, tiles)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_map_to_tiles() {
        assert_eq!(Tile::from_symbol('.'), Tile::Passable);
        assert_eq!(Tile::from_symbol('#'), Tile::Blocked);
        assert_eq!(Tile::from_symbol('g'), Tile::Unknown);
        assert_eq!(Tile::from_symbol(' '), Tile::Unknown);
    }

    #[test]
    fn passability_follows_tiles() {
        let grid = grid_from_rows(&["..#", ".#.", "..."]);
        assert_eq!(grid.width(), 3);
        assert_eq!(grid.height(), 3);
        assert!(!grid.is_passable(0, 2));
        assert!(!grid.is_passable(1, 1));
        assert!(grid.is_passable(2, 2));
        assert!(grid.is_passable(0, 0));
    }

    #[test]
    fn unknown_tiles_are_not_passable() {
        let grid = grid_from_rows(&[".x."]);
        assert_eq!(grid.tile(0, 1), Some(Tile::Unknown));
        assert!(!grid.is_passable(0, 1));
    }

    #[test]
    fn out_of_bounds_queries_are_false() {
        let grid = grid_from_rows(&["...", "...", "..."]);
        for (row, col) in [
            (-1, 0),
            (0, -1),
            (3, 0),
            (0, 3),
            (i32::MIN, i32::MIN),
            (i32::MAX, i32::MAX),
            (i32::MAX, 0),
            (0, i32::MIN),
        ] {
            assert!(!grid.is_passable(row, col), "({row}, {col})");
            assert_eq!(grid.tile(row, col), None);
        }
    }

    #[test]
    fn cell_to_pixel_scales_by_cell_size() {
        let grid = grid_from_rows(&["....", "...."]);
        assert_eq!(grid.cell_to_pixel(0, 0, 50.0), (0.0, 0.0));
        assert_eq!(grid.cell_to_pixel(1, 3, 50.0), (150.0, 50.0));
    }

    #[test]
    fn free_cells_are_row_major() {
        let grid = grid_from_rows(&["#.", ".#", ".."]);
        assert_eq!(
            grid.free_cells(),
            vec![
                GridPos::new(1, 0),
                GridPos::new(0, 1),
                GridPos::new(0, 2),
                GridPos::new(1, 2),
            ]
        );
    }

    #[test]
    fn fully_blocked_grid_has_no_free_cells() {
        let grid = grid_from_rows(&["##", "#x"]);
        assert!(grid.free_cells().is_empty());
    }
}
