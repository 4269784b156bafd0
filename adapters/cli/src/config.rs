//! Runtime configuration loaded from an optional TOML file.

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use glam::Vec2;
use lavawalk_world::DEFAULT_TILESET_DIR;
use serde::Deserialize;

/// Settings that shape a play session. Every field falls back to its default
/// when absent from the file.
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub(crate) struct GameConfig {
    /// Map file to load.
    pub(crate) map: PathBuf,
    /// Directory that the map's tileset name is resolved against.
    pub(crate) tileset_dir: PathBuf,
    /// Sprite manifest listing coin and player textures.
    pub(crate) sprite_manifest: PathBuf,
    /// Window width in pixels.
    pub(crate) window_width: u32,
    /// Window height in pixels.
    pub(crate) window_height: u32,
    /// Vertical screen position of tile `(0, 0)`.
    pub(crate) origin_y: f32,
    /// Minimum milliseconds between status line refreshes.
    pub(crate) status_refresh_ms: u64,
    /// Player walk animation rate.
    pub(crate) animation_fps: f32,
    /// Whether terrain and actors are drawn from textures.
    pub(crate) sprites: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            map: PathBuf::from("assets/maps/map.txt"),
            tileset_dir: PathBuf::from(DEFAULT_TILESET_DIR),
            sprite_manifest: PathBuf::from("assets/manifest.toml"),
            window_width: 1024,
            window_height: 768,
            origin_y: 150.0,
            status_refresh_ms: 100,
            animation_fps: 8.0,
            sprites: false,
        }
    }
}

impl GameConfig {
    /// Reads the configuration file at `path`.
    pub(crate) fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&contents)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// Parses TOML configuration contents.
    pub(crate) fn parse(contents: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(contents)
    }

    /// Screen position of tile `(0, 0)`, centred horizontally in the window.
    pub(crate) fn origin(&self) -> Vec2 {
        Vec2::new(self.window_width as f32 / 2.0, self.origin_y)
    }

    /// Minimum time between status line refreshes.
    pub(crate) fn status_refresh(&self) -> Duration {
        Duration::from_millis(self.status_refresh_ms)
    }
}
