//! Isometric projection from grid cells to screen space.

use glam::Vec2;
use lavawalk_core::CellCoord;

/// Projects a grid cell onto the screen.
///
/// Rows and columns are rotated 45 degrees and squashed so that tile `(0, 0)`
/// sits at `origin` and each tile occupies a `tile_width` by `tile_height`
/// diamond.
#[must_use]
pub fn project(row: u32, column: u32, tile_width: f32, tile_height: f32, origin: Vec2) -> Vec2 {
    let row = row as f32;
    let column = column as f32;
    Vec2::new(
        origin.x + (column - row) * tile_width / 2.0,
        origin.y + (row + column) * tile_height / 2.0,
    )
}

/// Projection parameters shared by every tile of a map.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct IsometricProjection {
    /// Width of a tile in screen pixels.
    pub tile_width: f32,
    /// Height of a tile in screen pixels.
    pub tile_height: f32,
    /// Screen position of tile `(0, 0)`.
    pub origin: Vec2,
}

impl IsometricProjection {
    /// Creates a projection for tiles of the provided size.
    #[must_use]
    pub const fn new(tile_width: f32, tile_height: f32, origin: Vec2) -> Self {
        Self {
            tile_width,
            tile_height,
            origin,
        }
    }

    /// Screen position of a tile.
    #[must_use]
    pub fn tile_position(&self, cell: CellCoord) -> Vec2 {
        project(
            cell.row(),
            cell.column(),
            self.tile_width,
            self.tile_height,
            self.origin,
        )
    }

    /// Screen position of the player sprite standing on `cell`.
    ///
    /// The sprite is shifted half a tile to the right of the tile position.
    #[must_use]
    pub fn player_position(&self, cell: CellCoord) -> Vec2 {
        self.tile_position(cell) + Vec2::new(self.tile_width / 2.0, 0.0)
    }
}
