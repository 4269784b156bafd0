use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use glam::Vec2;
use lavawalk_rendering::{SpriteAnimation, TileVisual, TilesetPresentation};
use log::info;
use macroquad::{
    math::Rect,
    texture::{FilterMode, Texture2D},
};

const SUPPORTED_MANIFEST_VERSION: u32 = 1;
const ALL_SPRITE_KEYS: [SpriteKey; 2] = [SpriteKey::Coin, SpriteKey::Player];

/// Sprites listed in the manifest.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub(crate) enum SpriteKey {
    /// Collectible coin, drawn at a fixed size.
    Coin,
    /// Player sprite sheet.
    Player,
}

/// Textures loaded from the sprite manifest plus the map's tile atlas.
#[derive(Debug)]
pub(crate) struct SpriteAtlas {
    textures: HashMap<SpriteKey, Texture2D>,
    tileset: Texture2D,
    layout: TilesetPresentation,
}

impl SpriteAtlas {
    /// Loads the manifest at `manifest_path` and the tileset image.
    pub(crate) fn load(manifest_path: &Path, tileset: &TilesetPresentation) -> Result<Self> {
        let contents = fs::read_to_string(manifest_path).with_context(|| {
            format!(
                "failed to read sprite manifest at {}",
                manifest_path.display()
            )
        })?;
        let base = manifest_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."));
        let entries = parse_manifest(&contents, &base)?;
        let atlas = Self::from_entries(entries, tileset, &mut default_loader)?;
        info!(
            "loaded {} sprites and tileset {}",
            atlas.textures.len(),
            tileset.path.display()
        );
        Ok(atlas)
    }

    /// Texture associated with the provided key.
    pub(crate) fn texture(&self, key: SpriteKey) -> Option<Texture2D> {
        self.textures.get(&key).copied()
    }

    /// Tile atlas texture.
    pub(crate) fn tileset(&self) -> Texture2D {
        self.tileset
    }

    /// Region of the tile atlas holding the frame for `visual`.
    pub(crate) fn tile_source(&self, visual: TileVisual) -> Rect {
        atlas_frame(
            texture_size(self.tileset),
            self.layout.atlas_tiles,
            self.layout.frame_for(visual),
        )
    }

    fn from_entries(
        entries: Vec<(SpriteKey, PathBuf)>,
        tileset: &TilesetPresentation,
        loader: &mut impl FnMut(&Path) -> Result<Texture2D>,
    ) -> Result<Self> {
        let mut textures = HashMap::with_capacity(entries.len());
        for (key, path) in entries {
            let texture = loader(&path).with_context(|| {
                format!("failed to load sprite {key:?} from {}", path.display())
            })?;
            if textures.insert(key, texture).is_some() {
                bail!("duplicate sprite entry for {key:?}");
            }
        }
        let tileset_texture = loader(&tileset.path).with_context(|| {
            format!("failed to load tileset from {}", tileset.path.display())
        })?;

        Ok(Self {
            textures,
            tileset: tileset_texture,
            layout: tileset.clone(),
        })
    }
}

/// Pixel size of a texture.
pub(crate) fn texture_size(texture: Texture2D) -> Vec2 {
    Vec2::new(texture.width(), texture.height())
}

/// Region of a horizontal atlas holding `frame`.
pub(crate) fn atlas_frame(texture_size: Vec2, atlas_tiles: u32, frame: u32) -> Rect {
    let width = texture_size.x / atlas_tiles.max(1) as f32;
    Rect::new(frame as f32 * width, 0.0, width, texture_size.y)
}

/// Region of a sprite sheet holding the animation's current frame.
pub(crate) fn sheet_frame(texture_size: Vec2, animation: &SpriteAnimation) -> Rect {
    let width = texture_size.x / animation.frames() as f32;
    let height = texture_size.y / animation.rows() as f32;
    Rect::new(
        animation.frame() as f32 * width,
        animation.row() as f32 * height,
        width,
        height,
    )
}

fn default_loader(path: &Path) -> Result<Texture2D> {
    let bytes = fs::read(path)
        .with_context(|| format!("failed to read sprite asset at {}", path.display()))?;
    let texture = Texture2D::from_file_with_format(&bytes, None);
    texture.set_filter(FilterMode::Nearest);
    Ok(texture)
}

#[derive(Debug, serde::Deserialize)]
struct Manifest {
    version: u32,
    sprites: HashMap<String, String>,
}

fn parse_manifest(contents: &str, base_path: &Path) -> Result<Vec<(SpriteKey, PathBuf)>> {
    let manifest: Manifest =
        toml::from_str(contents).context("failed to parse sprite manifest toml contents")?;
    if manifest.version != SUPPORTED_MANIFEST_VERSION {
        bail!(
            "unsupported sprite manifest version {}; expected {}",
            manifest.version,
            SUPPORTED_MANIFEST_VERSION
        );
    }

    let mut resolved = HashMap::new();
    for (name, relative_path) in manifest.sprites {
        let key = parse_sprite_key(&name)?;
        if resolved.insert(key, base_path.join(relative_path)).is_some() {
            bail!("sprite manifest contains duplicate entry for {key:?}");
        }
    }

    let mut ordered = Vec::with_capacity(ALL_SPRITE_KEYS.len());
    for key in ALL_SPRITE_KEYS {
        let Some(path) = resolved.remove(&key) else {
            bail!("sprite manifest missing entry for {key:?}");
        };
        ordered.push((key, path));
    }

    Ok(ordered)
}

fn parse_sprite_key(name: &str) -> Result<SpriteKey> {
    match name {
        "Coin" => Ok(SpriteKey::Coin),
        "Player" => Ok(SpriteKey::Player),
        _ => bail!("unknown sprite key `{name}` in manifest"),
    }
}
