#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Authoritative world state management for Lava Walk.

mod grid;
mod map;
mod movement;
mod outcome;
mod spawn;

use lavawalk_core::{CellCoord, Command, Direction, Event, MoveRejection, WELCOME_BANNER};
use log::{debug, info};

pub use self::grid::{Grid, GridError, MAX_GRID_CELLS};
pub use self::map::{MapDefinition, MapLoadError, DEFAULT_TILESET_DIR};
pub use self::movement::{resolve_step, try_move};

use self::outcome::OutcomeTracker;

/// Represents the authoritative Lava Walk world state.
#[derive(Clone, Debug)]
pub struct World {
    banner: &'static str,
    grid: Grid,
    player: CellCoord,
    outcome: OutcomeTracker,
}

impl World {
    /// Creates a world for `grid`, placing the player on the first ground tile
    /// found by scanning diagonally from the grid centre.
    #[must_use]
    pub fn new(grid: Grid) -> Self {
        let spawn = spawn::spawn_cell(&grid);
        info!("player spawned at ({}, {})", spawn.row(), spawn.column());
        Self::assemble(grid, spawn)
    }

    /// Creates a world for the grid described by a loaded map.
    #[must_use]
    pub fn from_map(map: &MapDefinition) -> Self {
        Self::new(map.grid().clone())
    }

    /// Creates a world with the player placed at an explicit cell.
    ///
    /// No collision rules run for the starting cell.
    pub fn with_spawn(grid: Grid, spawn: CellCoord) -> Result<Self, GridError> {
        if !grid.in_bounds(spawn) {
            return Err(GridError::OutOfBounds {
                cell: spawn,
                rows: grid.rows(),
                columns: grid.columns(),
            });
        }
        Ok(Self::assemble(grid, spawn))
    }

    fn assemble(grid: Grid, player: CellCoord) -> Self {
        let outcome = OutcomeTracker::new(grid.coin_count());
        Self {
            banner: WELCOME_BANNER,
            grid,
            player,
            outcome,
        }
    }

    fn step_player(&mut self, direction: Direction, out_events: &mut Vec<Event>) {
        let from = self.player;

        let destination = if self.outcome.is_terminal() {
            Err(MoveRejection::GameOver)
        } else {
            resolve_step(&self.grid, from, direction)
        };

        match destination {
            Ok(to) => {
                self.player = to;
                debug!("player moved to ({}, {})", to.row(), to.column());
                out_events.push(Event::PlayerMoved { from, to });
                self.outcome.settle(&mut self.grid, to, out_events);
            }
            Err(reason) => {
                debug!(
                    "step {direction:?} from ({}, {}) rejected: {reason:?}",
                    from.row(),
                    from.column()
                );
                out_events.push(Event::MoveRejected {
                    from,
                    direction,
                    reason,
                });
            }
        }
    }
}

/// Applies the provided command to the world, mutating state deterministically.
pub fn apply(world: &mut World, command: Command, out_events: &mut Vec<Event>) {
    match command {
        Command::StepPlayer { direction } => world.step_player(direction, out_events),
    }
}

/// Query functions that provide read-only access to the world state.
pub mod query {
    use super::{Grid, World};
    use lavawalk_core::{CellCoord, OutcomeSnapshot};

    /// Retrieves the welcome banner that adapters may display to players.
    #[must_use]
    pub fn welcome_banner(world: &World) -> &'static str {
        world.banner
    }

    /// Provides read-only access to the tile and item layers.
    #[must_use]
    pub fn grid(world: &World) -> &Grid {
        &world.grid
    }

    /// Cell currently occupied by the player.
    #[must_use]
    pub fn player_cell(world: &World) -> CellCoord {
        world.player
    }

    /// Captures the coin counters and session outcome.
    #[must_use]
    pub fn outcome(world: &World) -> OutcomeSnapshot {
        world.outcome.snapshot()
    }
}
