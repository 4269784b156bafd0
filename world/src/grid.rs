//! Dense tile and item layers that compose the playing field.

use lavawalk_core::{CellCoord, ItemKind, TileKind};
use thiserror::Error;

/// Largest number of cells a grid may hold.
pub const MAX_GRID_CELLS: u64 = 1 << 24;

/// Tile grid with an item layer of identical shape.
///
/// The grid's shape never changes after construction. Only the item layer is
/// mutated, and only by removing coins. Every accessor checks bounds, so
/// out-of-range queries read as [`TileKind::Invalid`] and [`ItemKind::Empty`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    rows: u32,
    columns: u32,
    tiles: Vec<TileKind>,
    items: Vec<ItemKind>,
}

impl Grid {
    /// Creates a grid covered by a single tile kind with no items.
    pub fn filled(rows: u32, columns: u32, tile: TileKind) -> Result<Self, GridError> {
        let capacity = cell_capacity(rows, columns)?;
        Ok(Self {
            rows,
            columns,
            tiles: vec![tile; capacity],
            items: vec![ItemKind::Empty; capacity],
        })
    }

    /// Creates a grid from row-major tile and item layers.
    ///
    /// Both layers must contain exactly `rows * columns` entries.
    pub fn from_layers(
        rows: u32,
        columns: u32,
        tiles: Vec<TileKind>,
        items: Vec<ItemKind>,
    ) -> Result<Self, GridError> {
        let capacity = cell_capacity(rows, columns)?;
        for (layer, actual) in [("tile", tiles.len()), ("item", items.len())] {
            if actual != capacity {
                return Err(GridError::LayerSize {
                    layer,
                    expected: capacity,
                    actual,
                });
            }
        }

        Ok(Self {
            rows,
            columns,
            tiles,
            items,
        })
    }

    /// Replaces the tile at `cell`, returning the modified grid.
    ///
    /// Intended for assembling grids programmatically before a session starts.
    #[must_use]
    pub fn with_tile(mut self, cell: CellCoord, tile: TileKind) -> Self {
        if let Some(index) = self.index(cell) {
            self.tiles[index] = tile;
        }
        self
    }

    /// Places `item` at `cell`, returning the modified grid.
    #[must_use]
    pub fn with_item(mut self, cell: CellCoord, item: ItemKind) -> Self {
        self.set_item(cell, item);
        self
    }

    /// Number of rows contained in the grid.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of columns contained in the grid.
    #[must_use]
    pub const fn columns(&self) -> u32 {
        self.columns
    }

    /// Reports whether the cell lies inside the grid.
    #[must_use]
    pub const fn in_bounds(&self, cell: CellCoord) -> bool {
        cell.row() < self.rows && cell.column() < self.columns
    }

    /// Terrain at the provided cell.
    #[must_use]
    pub fn tile_at(&self, cell: CellCoord) -> TileKind {
        self.index(cell)
            .and_then(|index| self.tiles.get(index).copied())
            .unwrap_or(TileKind::Invalid)
    }

    /// Item resting on the provided cell.
    #[must_use]
    pub fn item_at(&self, cell: CellCoord) -> ItemKind {
        self.index(cell)
            .and_then(|index| self.items.get(index).copied())
            .unwrap_or_default()
    }

    /// Overwrites the item at `cell`. Writes outside the grid are ignored.
    pub fn set_item(&mut self, cell: CellCoord, item: ItemKind) {
        if let Some(index) = self.index(cell) {
            if let Some(slot) = self.items.get_mut(index) {
                *slot = item;
            }
        }
    }

    /// Number of coins currently resting on the grid.
    #[must_use]
    pub fn coin_count(&self) -> u32 {
        let coins = self
            .items
            .iter()
            .filter(|item| **item == ItemKind::Coin)
            .count();
        u32::try_from(coins).unwrap_or(u32::MAX)
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        let columns = self.columns;
        (0..self.rows)
            .flat_map(move |row| (0..columns).map(move |column| CellCoord::new(row, column)))
    }

    fn index(&self, cell: CellCoord) -> Option<usize> {
        if !self.in_bounds(cell) {
            return None;
        }
        let row = usize::try_from(cell.row()).ok()?;
        let column = usize::try_from(cell.column()).ok()?;
        let width = usize::try_from(self.columns).ok()?;
        Some(row * width + column)
    }
}

/// Errors raised when a grid would violate its shape invariants.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GridError {
    /// Grids must have at least one row and one column.
    #[error("grid dimensions must be positive (received {rows}x{columns})")]
    EmptyDimensions {
        /// Requested number of rows.
        rows: u32,
        /// Requested number of columns.
        columns: u32,
    },
    /// The grid holds more than [`MAX_GRID_CELLS`] cells.
    #[error("grid of {rows}x{columns} cells exceeds the {MAX_GRID_CELLS} cell limit")]
    TooLarge {
        /// Requested number of rows.
        rows: u32,
        /// Requested number of columns.
        columns: u32,
    },
    /// A layer did not contain one entry per cell.
    #[error("{layer} layer holds {actual} cells, expected {expected}")]
    LayerSize {
        /// Name of the offending layer.
        layer: &'static str,
        /// Number of cells implied by the dimensions.
        expected: usize,
        /// Number of cells supplied.
        actual: usize,
    },
    /// A coordinate referenced a cell outside the grid.
    #[error("cell ({}, {}) lies outside the {rows}x{columns} grid", .cell.row(), .cell.column())]
    OutOfBounds {
        /// Offending coordinate.
        cell: CellCoord,
        /// Number of rows in the grid.
        rows: u32,
        /// Number of columns in the grid.
        columns: u32,
    },
}

pub(crate) fn cell_capacity(rows: u32, columns: u32) -> Result<usize, GridError> {
    if rows == 0 || columns == 0 {
        return Err(GridError::EmptyDimensions { rows, columns });
    }
    let capacity = u64::from(rows) * u64::from(columns);
    if capacity > MAX_GRID_CELLS {
        return Err(GridError::TooLarge { rows, columns });
    }
    usize::try_from(capacity).map_err(|_| GridError::TooLarge { rows, columns })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filled_grid_rejects_zero_dimensions() {
        assert_eq!(
            Grid::filled(0, 3, TileKind::Ground),
            Err(GridError::EmptyDimensions {
                rows: 0,
                columns: 3
            })
        );
    }

    #[test]
    fn grids_beyond_cell_limit_are_rejected() {
        assert_eq!(
            Grid::filled(u32::MAX, u32::MAX, TileKind::Ground),
            Err(GridError::TooLarge {
                rows: u32::MAX,
                columns: u32::MAX
            })
        );
        assert_eq!(
            cell_capacity(1 << 12, 1 << 12),
            Ok(usize::try_from(MAX_GRID_CELLS).expect("limit fits in usize"))
        );
        assert!(cell_capacity(1 << 12, (1 << 12) + 1).is_err());
    }

    #[test]
    fn layers_must_match_dimensions() {
        let error = Grid::from_layers(
            2,
            2,
            vec![TileKind::Ground; 4],
            vec![ItemKind::Empty; 3],
        )
        .expect_err("short item layer");

        assert_eq!(
            error,
            GridError::LayerSize {
                layer: "item",
                expected: 4,
                actual: 3
            }
        );
    }

    #[test]
    fn layers_are_row_major() {
        let tiles = vec![
            TileKind::Ground,
            TileKind::Lava,
            TileKind::Invalid,
            TileKind::Ground,
            TileKind::Ground,
            TileKind::Lava,
        ];
        let grid = Grid::from_layers(2, 3, tiles, vec![ItemKind::Empty; 6]).expect("valid layers");

        assert_eq!(grid.tile_at(CellCoord::new(0, 1)), TileKind::Lava);
        assert_eq!(grid.tile_at(CellCoord::new(0, 2)), TileKind::Invalid);
        assert_eq!(grid.tile_at(CellCoord::new(1, 2)), TileKind::Lava);
    }

    #[test]
    fn out_of_bounds_access_is_inert() {
        let mut grid = Grid::filled(2, 2, TileKind::Ground).expect("valid grid");
        let outside = CellCoord::new(2, 0);

        assert!(!grid.in_bounds(outside));
        assert_eq!(grid.tile_at(outside), TileKind::Invalid);
        assert_eq!(grid.item_at(outside), ItemKind::Empty);

        grid.set_item(outside, ItemKind::Coin);
        assert_eq!(grid.coin_count(), 0);
    }

    #[test]
    fn coin_count_tracks_item_layer() {
        let mut grid = Grid::filled(3, 3, TileKind::Ground)
            .expect("valid grid")
            .with_item(CellCoord::new(0, 0), ItemKind::Coin)
            .with_item(CellCoord::new(2, 1), ItemKind::Coin);
        assert_eq!(grid.coin_count(), 2);

        grid.set_item(CellCoord::new(0, 0), ItemKind::Empty);
        assert_eq!(grid.coin_count(), 1);
    }

    #[test]
    fn cells_enumerate_row_major() {
        let grid = Grid::filled(2, 3, TileKind::Ground).expect("valid grid");
        let cells: Vec<CellCoord> = grid.cells().collect();

        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], CellCoord::new(0, 0));
        assert_eq!(cells[2], CellCoord::new(0, 2));
        assert_eq!(cells[3], CellCoord::new(1, 0));
    }
}
