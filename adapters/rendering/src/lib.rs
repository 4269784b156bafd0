#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Shared rendering contracts for Lava Walk adapters.

pub mod animation;
pub mod projection;

use anyhow::Result as AnyResult;
use glam::Vec2;
use lavawalk_core::{CellCoord, Direction, Outcome, OutcomeSnapshot, TileKind};
use std::{path::PathBuf, time::Duration};
use thiserror::Error;

pub use self::animation::SpriteAnimation;
pub use self::projection::IsometricProjection;

/// RGBA color used when presenting frames.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Color {
    /// Red channel intensity in the range 0.0..=1.0.
    pub red: f32,
    /// Green channel intensity in the range 0.0..=1.0.
    pub green: f32,
    /// Blue channel intensity in the range 0.0..=1.0.
    pub blue: f32,
    /// Alpha channel intensity in the range 0.0..=1.0.
    pub alpha: f32,
}

impl Color {
    /// Opaque white, which leaves sprites untinted.
    pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);

    /// Creates a new color from floating point channels.
    #[must_use]
    pub const fn new(red: f32, green: f32, blue: f32, alpha: f32) -> Self {
        Self {
            red,
            green,
            blue,
            alpha,
        }
    }

    /// Creates an opaque color from byte RGB values.
    #[must_use]
    pub const fn from_rgb_u8(red: u8, green: u8, blue: u8) -> Self {
        Self {
            red: red as f32 / 255.0,
            green: green as f32 / 255.0,
            blue: blue as f32 / 255.0,
            alpha: 1.0,
        }
    }
}

/// Background color used to clear every frame.
pub const CLEAR_COLOR: Color = Color::new(0.2, 0.3, 0.3, 1.0);

/// Tint applied to the player sprite for the provided session outcome.
#[must_use]
pub const fn outcome_tint(outcome: Outcome) -> Color {
    match outcome {
        Outcome::Playing => Color::WHITE,
        Outcome::Won => Color::new(0.5, 1.0, 0.5, 1.0),
        Outcome::Lost => Color::new(1.0, 0.5, 0.5, 1.0),
    }
}

/// Input snapshot gathered by adapters before updating the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FrameInput {
    /// Direction requested by a key press on this frame, if any.
    pub step: Option<Direction>,
}

/// Describes the isometric tile grid that should be rendered.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TileGridPresentation {
    /// Number of rows in the grid.
    pub rows: u32,
    /// Number of columns in the grid.
    pub columns: u32,
    /// Width of a tile in screen pixels.
    pub tile_width: f32,
    /// Height of a tile in screen pixels.
    pub tile_height: f32,
    /// Screen position of tile `(0, 0)`.
    pub origin: Vec2,
}

impl TileGridPresentation {
    /// Creates a new tile grid descriptor.
    ///
    /// Tile dimensions must be positive and finite.
    pub fn new(
        rows: u32,
        columns: u32,
        tile_width: f32,
        tile_height: f32,
        origin: Vec2,
    ) -> Result<Self, RenderingError> {
        let valid = |extent: f32| extent.is_finite() && extent > 0.0;
        if !valid(tile_width) || !valid(tile_height) {
            return Err(RenderingError::InvalidTileSize {
                width: tile_width,
                height: tile_height,
            });
        }

        Ok(Self {
            rows,
            columns,
            tile_width,
            tile_height,
            origin,
        })
    }

    /// Projection that maps cells of this grid onto the screen.
    #[must_use]
    pub const fn projection(&self) -> IsometricProjection {
        IsometricProjection::new(self.tile_width, self.tile_height, self.origin)
    }
}

/// Terrain that has a visual representation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TileVisual {
    /// Walkable terrain.
    Ground,
    /// Lethal terrain.
    Lava,
}

impl TileVisual {
    /// Visual used for a tile kind. Invalid tiles are not drawn.
    #[must_use]
    pub const fn for_tile(kind: TileKind) -> Option<Self> {
        match kind {
            TileKind::Ground => Some(Self::Ground),
            TileKind::Lava => Some(Self::Lava),
            TileKind::Invalid => None,
        }
    }
}

/// Immutable snapshot of a drawable tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TilePresentation {
    /// Cell the tile occupies.
    pub cell: CellCoord,
    /// Terrain drawn for the tile.
    pub visual: TileVisual,
    /// Whether a coin rests on the tile.
    pub coin: bool,
}

impl TilePresentation {
    /// Creates a new tile descriptor.
    #[must_use]
    pub const fn new(cell: CellCoord, visual: TileVisual, coin: bool) -> Self {
        Self { cell, visual, coin }
    }
}

/// Snapshot of the player avatar.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PlayerPresentation {
    /// Cell currently occupied by the player.
    pub cell: CellCoord,
    /// Tint multiplied into the player sprite.
    pub tint: Color,
}

impl PlayerPresentation {
    /// Creates a player descriptor tinted for the provided outcome.
    #[must_use]
    pub const fn new(cell: CellCoord, outcome: Outcome) -> Self {
        Self {
            cell,
            tint: outcome_tint(outcome),
        }
    }
}

/// Horizontal tile atlas used to texture the terrain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TilesetPresentation {
    /// Location of the atlas image.
    pub path: PathBuf,
    /// Number of equally sized frames laid out horizontally.
    pub atlas_tiles: u32,
}

impl TilesetPresentation {
    /// Atlas frame drawn for ground tiles.
    pub const GROUND_FRAME: u32 = 2;
    /// Atlas frame drawn for lava tiles.
    pub const LAVA_FRAME: u32 = 3;

    /// Creates a new tileset descriptor. The atlas must contain at least one frame.
    pub fn new(path: impl Into<PathBuf>, atlas_tiles: u32) -> Result<Self, RenderingError> {
        if atlas_tiles == 0 {
            return Err(RenderingError::EmptyAtlas);
        }
        Ok(Self {
            path: path.into(),
            atlas_tiles,
        })
    }

    /// Atlas frame for a tile visual, clamped to the frames the atlas holds.
    #[must_use]
    pub fn frame_for(&self, visual: TileVisual) -> u32 {
        let frame = match visual {
            TileVisual::Ground => Self::GROUND_FRAME,
            TileVisual::Lava => Self::LAVA_FRAME,
        };
        frame.min(self.atlas_tiles.saturating_sub(1))
    }
}

/// Describes the complete scene that should be rendered for a frame.
#[derive(Clone, Debug, PartialEq)]
pub struct Scene {
    /// Grid geometry used for projection.
    pub tile_grid: TileGridPresentation,
    /// Drawable tiles in row-major order.
    pub tiles: Vec<TilePresentation>,
    /// Player avatar.
    pub player: PlayerPresentation,
    /// Coin counters and session outcome.
    pub outcome: OutcomeSnapshot,
    /// Status text displayed over the scene.
    pub status_line: String,
}

impl Scene {
    /// Creates a new scene descriptor.
    #[must_use]
    pub fn new(
        tile_grid: TileGridPresentation,
        tiles: Vec<TilePresentation>,
        player: PlayerPresentation,
        outcome: OutcomeSnapshot,
        status_line: impl Into<String>,
    ) -> Self {
        Self {
            tile_grid,
            tiles,
            player,
            outcome,
            status_line: status_line.into(),
        }
    }

    /// Number of coins still resting on the drawn tiles.
    #[must_use]
    pub fn coins_remaining(&self) -> usize {
        self.tiles.iter().filter(|tile| tile.coin).count()
    }
}

/// Presentation descriptor consumed by rendering backends.
#[derive(Clone, Debug, PartialEq)]
pub struct Presentation {
    /// Title used by the created window.
    pub window_title: String,
    /// Solid color used to clear each frame.
    pub clear_color: Color,
    /// Atlas used to texture the terrain, if sprites are enabled.
    pub tileset: Option<TilesetPresentation>,
    /// Scene content that should be displayed.
    pub scene: Scene,
}

impl Presentation {
    /// Constructs a new presentation descriptor.
    #[must_use]
    pub fn new<T>(
        window_title: T,
        clear_color: Color,
        tileset: Option<TilesetPresentation>,
        scene: Scene,
    ) -> Self
    where
        T: Into<String>,
    {
        Self {
            window_title: window_title.into(),
            clear_color,
            tileset,
            scene,
        }
    }
}

/// Rendering backend capable of presenting Lava Walk scenes.
pub trait RenderingBackend {
    /// Runs the rendering backend until it is requested to exit.
    ///
    /// The provided `update_scene` closure receives the frame delta, per-frame
    /// input captured by the adapter, and may mutate the scene before it is
    /// rendered.
    fn run<F>(self, presentation: Presentation, update_scene: F) -> AnyResult<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static;
}

/// Errors that can occur when constructing rendering descriptors.
#[derive(Clone, Copy, Debug, PartialEq, Error)]
pub enum RenderingError {
    /// Tiles must have a positive, finite size.
    #[error("tile size must be positive (received {width}x{height})")]
    InvalidTileSize {
        /// Provided tile width.
        width: f32,
        /// Provided tile height.
        height: f32,
    },
    /// Tile atlases must contain at least one frame.
    #[error("tile atlas must contain at least one frame")]
    EmptyAtlas,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid() -> TileGridPresentation {
        TileGridPresentation::new(3, 4, 64.0, 32.0, Vec2::new(512.0, 150.0)).expect("valid grid")
    }

    #[test]
    fn tile_grid_rejects_degenerate_tiles() {
        let error = TileGridPresentation::new(3, 3, 0.0, 32.0, Vec2::ZERO)
            .expect_err("zero width must be rejected");
        assert_eq!(
            error,
            RenderingError::InvalidTileSize {
                width: 0.0,
                height: 32.0
            }
        );

        assert!(TileGridPresentation::new(3, 3, 64.0, f32::NAN, Vec2::ZERO).is_err());
    }

    #[test]
    fn tile_grid_projection_uses_grid_geometry() {
        let projection = grid().projection();
        assert_eq!(
            projection.tile_position(CellCoord::new(1, 2)),
            Vec2::new(512.0 + 32.0, 150.0 + 48.0)
        );
    }

    #[test]
    fn invalid_tiles_have_no_visual() {
        assert_eq!(TileVisual::for_tile(TileKind::Ground), Some(TileVisual::Ground));
        assert_eq!(TileVisual::for_tile(TileKind::Lava), Some(TileVisual::Lava));
        assert_eq!(TileVisual::for_tile(TileKind::Invalid), None);
    }

    #[test]
    fn tint_reflects_outcome() {
        assert_eq!(outcome_tint(Outcome::Playing), Color::WHITE);
        assert_eq!(outcome_tint(Outcome::Won), Color::new(0.5, 1.0, 0.5, 1.0));
        assert_eq!(outcome_tint(Outcome::Lost), Color::new(1.0, 0.5, 0.5, 1.0));
    }

    #[test]
    fn tileset_frames_are_clamped_to_atlas() {
        let full = TilesetPresentation::new("tiles.png", 7).expect("non-empty atlas");
        assert_eq!(full.frame_for(TileVisual::Ground), 2);
        assert_eq!(full.frame_for(TileVisual::Lava), 3);

        let short = TilesetPresentation::new("tiles.png", 3).expect("non-empty atlas");
        assert_eq!(short.frame_for(TileVisual::Lava), 2);

        assert_eq!(
            TilesetPresentation::new("tiles.png", 0),
            Err(RenderingError::EmptyAtlas)
        );
    }

    #[test]
    fn scene_counts_remaining_coins() {
        let tiles = vec![
            TilePresentation::new(CellCoord::new(0, 0), TileVisual::Ground, true),
            TilePresentation::new(CellCoord::new(0, 1), TileVisual::Lava, false),
            TilePresentation::new(CellCoord::new(0, 2), TileVisual::Ground, true),
        ];
        let scene = Scene::new(
            grid(),
            tiles,
            PlayerPresentation::new(CellCoord::new(0, 0), Outcome::Playing),
            OutcomeSnapshot::default(),
            "Lava Walk",
        );

        assert_eq!(scene.coins_remaining(), 2);
        assert_eq!(scene.player.tint, Color::WHITE);
    }
}
