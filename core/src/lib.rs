#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Core contracts shared across the Lava Walk engine.
//!
//! This crate defines the message surface that connects adapters, the
//! authoritative world, and pure systems. Adapters submit [`Command`] values
//! describing desired mutations, the world executes those commands via its
//! `apply` entry point, and then broadcasts [`Event`] values for systems to
//! react to deterministically. Systems consume event streams, query immutable
//! snapshots, and respond exclusively with new command batches.

/// Canonical banner emitted when the experience boots.
pub const WELCOME_BANNER: &str = "Lava Walk";

/// Commands that express all permissible world mutations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Command {
    /// Requests that the player advance a single step in the specified direction.
    StepPlayer {
        /// Direction of travel for the attempted step.
        direction: Direction,
    },
}

/// Events broadcast by the world after processing commands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Event {
    /// Confirms that the player settled into a new cell.
    PlayerMoved {
        /// Cell the player occupied before moving.
        from: CellCoord,
        /// Cell the player occupies after completing the move.
        to: CellCoord,
    },
    /// Reports that a step request left the player where it was.
    MoveRejected {
        /// Cell the player occupied when the request arrived.
        from: CellCoord,
        /// Direction requested by the rejected step.
        direction: Direction,
        /// Specific reason the step failed.
        reason: MoveRejection,
    },
    /// Confirms that the player picked up a coin.
    CoinCollected {
        /// Cell the coin was removed from.
        cell: CellCoord,
        /// Number of coins collected after the pickup.
        collected: u32,
        /// Number of coins present when the map was loaded.
        total: u32,
    },
    /// Announces that every coin was collected.
    GameWon {
        /// Final coin count.
        collected: u32,
    },
    /// Announces that the player settled on a lethal tile.
    GameLost {
        /// Cell that ended the session.
        cell: CellCoord,
    },
}

/// Reasons a step request may be rejected by the world.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum MoveRejection {
    /// The candidate cell lies outside the grid.
    OutOfBounds,
    /// The candidate cell holds a tile that cannot be entered.
    Impassable,
    /// The session already reached a terminal outcome.
    GameOver,
}

/// Compass directions available to the player.
///
/// Offsets are expressed on the grid's native row/column axes. The isometric
/// rotation is applied at presentation time only.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Movement toward decreasing row indices.
    North,
    /// Movement toward increasing row indices.
    South,
    /// Movement toward increasing column indices.
    East,
    /// Movement toward decreasing column indices.
    West,
    /// Decreasing row and column.
    NorthWest,
    /// Decreasing row, increasing column.
    NorthEast,
    /// Increasing row, decreasing column.
    SouthWest,
    /// Increasing row and column.
    SouthEast,
}

impl Direction {
    /// Every direction in a stable order.
    pub const ALL: [Direction; 8] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// Row and column deltas applied by a single step.
    #[must_use]
    pub const fn offset(self) -> (i32, i32) {
        match self {
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
            Self::NorthWest => (-1, -1),
            Self::NorthEast => (-1, 1),
            Self::SouthWest => (1, -1),
            Self::SouthEast => (1, 1),
        }
    }
}

/// Location of a single grid cell expressed as row and column indices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    row: u32,
    column: u32,
}

impl CellCoord {
    /// Creates a new grid cell coordinate.
    #[must_use]
    pub const fn new(row: u32, column: u32) -> Self {
        Self { row, column }
    }

    /// Zero-based row index of the cell.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Zero-based column index of the cell.
    #[must_use]
    pub const fn column(&self) -> u32 {
        self.column
    }

    /// Returns the neighbouring cell one step away in `direction`.
    ///
    /// Yields `None` when the step would underflow or overflow the index
    /// range. Upper grid bounds are not known here and must be checked by the
    /// caller.
    #[must_use]
    pub fn step(self, direction: Direction) -> Option<CellCoord> {
        let (row_delta, column_delta) = direction.offset();
        let row = self.row.checked_add_signed(row_delta)?;
        let column = self.column.checked_add_signed(column_delta)?;
        Some(Self::new(row, column))
    }

    /// Computes the Chebyshev distance between two cell coordinates.
    #[must_use]
    pub fn chebyshev_distance(self, other: CellCoord) -> u32 {
        self.row.abs_diff(other.row).max(self.column.abs_diff(other.column))
    }
}

/// Kinds of terrain that compose the tile layer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileKind {
    /// Safe terrain.
    Ground,
    /// Enterable terrain that ends the session once the player settles on it.
    Lava,
    /// Placeholder for unrecognised map codes. Blocks movement.
    Invalid,
}

impl TileKind {
    /// Map code that denotes ground.
    pub const GROUND_CODE: i64 = 2;
    /// Map code that denotes lava.
    pub const LAVA_CODE: i64 = 4;

    /// Normalises a raw map code. Every unknown code maps to [`TileKind::Invalid`].
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            Self::GROUND_CODE => Self::Ground,
            Self::LAVA_CODE => Self::Lava,
            _ => Self::Invalid,
        }
    }

    /// Reports whether the player may step onto the tile.
    #[must_use]
    pub const fn is_enterable(self) -> bool {
        matches!(self, Self::Ground | Self::Lava)
    }

    /// Reports whether settling on the tile loses the game.
    #[must_use]
    pub const fn is_lethal(self) -> bool {
        matches!(self, Self::Lava)
    }
}

/// Kinds of items that may rest on a tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ItemKind {
    /// Nothing to pick up.
    #[default]
    Empty,
    /// Collectible coin.
    Coin,
}

impl ItemKind {
    /// Map code that denotes a coin.
    pub const COIN_CODE: i64 = 1;

    /// Normalises a raw map code. Every code other than a coin maps to [`ItemKind::Empty`].
    #[must_use]
    pub const fn from_code(code: i64) -> Self {
        match code {
            Self::COIN_CODE => Self::Coin,
            _ => Self::Empty,
        }
    }
}

/// High-level state of the session.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum Outcome {
    /// The player is still collecting coins.
    #[default]
    Playing,
    /// Every coin was collected.
    Won,
    /// The player settled on lava.
    Lost,
}

impl Outcome {
    /// Terminal outcomes accept no further gameplay mutation.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Playing)
    }
}

/// Immutable representation of the coin counters and outcome used for queries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct OutcomeSnapshot {
    /// Coins picked up so far.
    pub coins_collected: u32,
    /// Coins present when the map was loaded.
    pub coins_total: u32,
    /// Current session outcome.
    pub outcome: Outcome,
}
