//! Step validation against grid bounds and tile legality.

use lavawalk_core::{CellCoord, Direction, MoveRejection};

use crate::Grid;

/// Resolves a single step, returning the destination or the reason it failed.
///
/// Lava is enterable; the loss is applied after the player settles, not here.
pub fn resolve_step(
    grid: &Grid,
    current: CellCoord,
    direction: Direction,
) -> Result<CellCoord, MoveRejection> {
    let candidate = current
        .step(direction)
        .filter(|cell| grid.in_bounds(*cell))
        .ok_or(MoveRejection::OutOfBounds)?;

    if !grid.tile_at(candidate).is_enterable() {
        return Err(MoveRejection::Impassable);
    }

    Ok(candidate)
}

/// Returns the cell reached by stepping from `current`, or `current` when the step is illegal.
#[must_use]
pub fn try_move(grid: &Grid, current: CellCoord, direction: Direction) -> CellCoord {
    resolve_step(grid, current, direction).unwrap_or(current)
}
