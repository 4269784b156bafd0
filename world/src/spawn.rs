//! Selection of the player's starting cell.

use lavawalk_core::{CellCoord, TileKind};
use log::warn;

use crate::Grid;

const SPAWN_SCAN_ATTEMPTS: u32 = 100;

/// Walks diagonally from the grid centre, wrapping at the edges, until a ground tile is found.
///
/// Falls back to the centre when the scan is exhausted.
pub(crate) fn spawn_cell(grid: &Grid) -> CellCoord {
    let rows = grid.rows().max(1);
    let columns = grid.columns().max(1);
    let center = CellCoord::new(rows / 2, columns / 2);

    let mut cell = center;
    for _ in 0..SPAWN_SCAN_ATTEMPTS {
        if grid.tile_at(cell) == TileKind::Ground {
            return cell;
        }
        cell = CellCoord::new((cell.row() + 1) % rows, (cell.column() + 1) % columns);
    }

    let tile = grid.tile_at(center);
    warn!(
        "no ground tile found after {SPAWN_SCAN_ATTEMPTS} attempts, spawning on {tile:?} at grid centre ({}, {})",
        center.row(),
        center.column()
    );
    center
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn center_ground_is_chosen_immediately() {
        let grid = Grid::filled(5, 5, TileKind::Ground).expect("valid grid");
        assert_eq!(spawn_cell(&grid), CellCoord::new(2, 2));
    }

    #[test]
    fn scan_steps_diagonally_and_wraps() {
        let grid = Grid::filled(3, 4, TileKind::Lava)
            .expect("valid grid")
            .with_tile(CellCoord::new(0, 0), TileKind::Ground);

        // (1, 2) -> (2, 3) -> (0, 0)
        assert_eq!(spawn_cell(&grid), CellCoord::new(0, 0));
    }

    #[test]
    fn unreachable_ground_falls_back_to_center() {
        // The diagonal walk on a 2x2 grid only visits (1, 1) and (0, 0).
        let grid = Grid::filled(2, 2, TileKind::Lava)
            .expect("valid grid")
            .with_tile(CellCoord::new(0, 1), TileKind::Ground);

        let spawn = spawn_cell(&grid);
        assert_eq!(spawn, CellCoord::new(1, 1));
        assert_eq!(grid.tile_at(spawn), TileKind::Lava);
    }

    #[test]
    fn fallback_centre_may_be_invalid() {
        let grid = Grid::filled(3, 3, TileKind::Invalid).expect("valid grid");

        let spawn = spawn_cell(&grid);

        assert_eq!(spawn, CellCoord::new(1, 1));
        assert_eq!(grid.tile_at(spawn), TileKind::Invalid);
    }

    #[test]
    fn invalid_tiles_are_skipped() {
        let grid = Grid::filled(4, 4, TileKind::Ground)
            .expect("valid grid")
            .with_tile(CellCoord::new(2, 2), TileKind::Invalid);

        assert_eq!(spawn_cell(&grid), CellCoord::new(3, 3));
    }
}
