//! Plain-text map loader.
//!
//! The first line names the tileset image relative to a tileset directory.
//! The remainder is a whitespace separated list of integers: atlas tile
//! count, tile width, tile height, map width, map height, then one tile code
//! per cell followed by one item code per cell, both in row-major order.

use std::{
    fs, io,
    path::{Path, PathBuf},
};

use lavawalk_core::{ItemKind, TileKind};
use log::{info, warn};
use thiserror::Error;

use crate::{grid::cell_capacity, Grid, GridError};

/// Directory that map tileset names are resolved against by default.
pub const DEFAULT_TILESET_DIR: &str = "assets/tilesets";

/// Fully parsed map file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MapDefinition {
    tileset: PathBuf,
    atlas_tiles: u32,
    tile_width: u32,
    tile_height: u32,
    grid: Grid,
}

impl MapDefinition {
    /// Reads and parses the map file located at `path`.
    pub fn load(
        path: impl AsRef<Path>,
        tileset_dir: impl AsRef<Path>,
    ) -> Result<Self, MapLoadError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| MapLoadError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let map = Self::parse(&contents, tileset_dir)?;
        info!(
            "loaded map {} ({}x{} cells, {} coins)",
            path.display(),
            map.grid.rows(),
            map.grid.columns(),
            map.grid.coin_count()
        );
        Ok(map)
    }

    /// Parses map contents, resolving the tileset name against `tileset_dir`.
    ///
    /// Unknown tile codes become [`TileKind::Invalid`] and unknown item codes
    /// become [`ItemKind::Empty`]. Missing or unparsable codes are treated the
    /// same way. Only a malformed header fails the parse.
    pub fn parse(contents: &str, tileset_dir: impl AsRef<Path>) -> Result<Self, MapLoadError> {
        let (first_line, body) = contents.split_once('\n').unwrap_or((contents, ""));
        let tileset_name = first_line.trim();
        if tileset_name.is_empty() {
            return Err(MapLoadError::MissingTileset);
        }

        let mut tokens = body.split_whitespace();
        let atlas_tiles = header_field(&mut tokens, "tile count")?;
        let tile_width = header_field(&mut tokens, "tile width")?;
        let tile_height = header_field(&mut tokens, "tile height")?;
        let columns = header_field(&mut tokens, "map width")?;
        let rows = header_field(&mut tokens, "map height")?;

        let cells = cell_capacity(rows, columns)?;

        let mut unreadable = 0_usize;
        let tiles: Vec<TileKind> = (0..cells)
            .map(|_| TileKind::from_code(next_code(&mut tokens, &mut unreadable)))
            .collect();
        let items: Vec<ItemKind> = (0..cells)
            .map(|_| ItemKind::from_code(next_code(&mut tokens, &mut unreadable)))
            .collect();

        if unreadable > 0 {
            warn!("{unreadable} map codes were missing or unreadable and were treated as empty");
        }
        let invalid = tiles.iter().filter(|tile| **tile == TileKind::Invalid).count();
        if invalid > 0 {
            warn!("{invalid} tiles use unrecognised codes and will block movement");
        }

        Ok(Self {
            tileset: tileset_dir.as_ref().join(tileset_name),
            atlas_tiles,
            tile_width,
            tile_height,
            grid: Grid::from_layers(rows, columns, tiles, items)?,
        })
    }

    /// Path to the tileset image.
    #[must_use]
    pub fn tileset(&self) -> &Path {
        &self.tileset
    }

    /// Number of equally sized tiles laid out horizontally in the tileset image.
    #[must_use]
    pub const fn atlas_tiles(&self) -> u32 {
        self.atlas_tiles
    }

    /// Width of a single tile in pixels.
    #[must_use]
    pub const fn tile_width(&self) -> u32 {
        self.tile_width
    }

    /// Height of a single tile in pixels.
    #[must_use]
    pub const fn tile_height(&self) -> u32 {
        self.tile_height
    }

    /// Tile and item layers described by the map.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }
}

/// Errors that abort map loading.
#[derive(Debug, Error)]
pub enum MapLoadError {
    /// The map file could not be read.
    #[error("failed to read map file {}", .path.display())]
    Io {
        /// Path that failed to open.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
    /// The first line did not name a tileset image.
    #[error("map file does not name a tileset image")]
    MissingTileset,
    /// A header field was absent or not a non-negative integer.
    #[error("map header field `{field}` is missing or not a non-negative integer")]
    InvalidHeader {
        /// Name of the offending field.
        field: &'static str,
    },
    /// The header described a grid that cannot exist.
    #[error(transparent)]
    Grid(#[from] GridError),
}

fn header_field<'a>(
    tokens: &mut impl Iterator<Item = &'a str>,
    field: &'static str,
) -> Result<u32, MapLoadError> {
    tokens
        .next()
        .and_then(|token| token.parse::<u32>().ok())
        .ok_or(MapLoadError::InvalidHeader { field })
}

fn next_code<'a>(tokens: &mut impl Iterator<Item = &'a str>, unreadable: &mut usize) -> i64 {
    match tokens.next().map(str::parse::<i64>) {
        Some(Ok(code)) => code,
        _ => {
            *unreadable += 1;
            0
        }
    }
}
