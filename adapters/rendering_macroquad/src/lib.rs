#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Lava Walk.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.
//!
//! Terrain, coins and the player are drawn either from textures listed in a
//! sprite manifest or, when sprites are disabled, from coloured primitives.

mod sprites;

use anyhow::{bail, Result};
use glam::Vec2;
use lavawalk_core::Direction;
use lavawalk_rendering::{
    Color, FrameInput, IsometricProjection, Presentation, RenderingBackend, Scene,
    SpriteAnimation, TileVisual,
};
use log::info;
use macroquad::{
    color::WHITE,
    input::{is_key_pressed, KeyCode},
    math::Vec2 as MacroquadVec2,
    shapes::{draw_circle, draw_triangle},
    text::draw_text,
    texture::{draw_texture_ex, DrawTextureParams},
};
use std::{collections::VecDeque, path::PathBuf, sync::mpsc, time::Duration};

use self::sprites::{sheet_frame, texture_size, SpriteAtlas, SpriteKey};

const STEP_KEYS: [(KeyCode, Direction); 8] = [
    (KeyCode::W, Direction::North),
    (KeyCode::S, Direction::South),
    (KeyCode::A, Direction::West),
    (KeyCode::D, Direction::East),
    (KeyCode::Q, Direction::NorthWest),
    (KeyCode::E, Direction::NorthEast),
    (KeyCode::Z, Direction::SouthWest),
    (KeyCode::X, Direction::SouthEast),
];

const COIN_SIZE: f32 = 32.0;
const PLAYER_SHEET_ROWS: u32 = 4;
const PLAYER_SHEET_FRAMES: u32 = 6;
const PLAYER_WALK_ROW: u32 = 1;
const PLAYER_SCALE: f32 = 2.0;
const STATUS_FONT_SIZE: f32 = 24.0;
const STATUS_POSITION: Vec2 = Vec2::new(16.0, 28.0);

const GROUND_COLOR: Color = Color::new(0.46, 0.41, 0.33, 1.0);
const LAVA_COLOR: Color = Color::new(0.89, 0.35, 0.13, 1.0);
const COIN_COLOR: Color = Color::new(0.98, 0.82, 0.25, 1.0);
const PLAYER_COLOR: Color = Color::new(0.93, 0.93, 0.96, 1.0);

/// Maps a keyboard key to the step it requests, if any.
#[must_use]
pub fn direction_for_key(key: KeyCode) -> Option<Direction> {
    STEP_KEYS
        .iter()
        .find(|(candidate, _)| *candidate == key)
        .map(|(_, direction)| *direction)
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
    window_width: i32,
    window_height: i32,
    sprite_manifest: Option<PathBuf>,
    animation_fps: f32,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
            window_width: 1024,
            window_height: 768,
            sprite_manifest: None,
            animation_fps: 8.0,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display refresh rate
    /// or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend logs frame rate averages once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }

    /// Sets the size of the created window in pixels.
    #[must_use]
    pub fn with_window_size(mut self, width: u32, height: u32) -> Self {
        self.window_width = i32::try_from(width).unwrap_or(i32::MAX);
        self.window_height = i32::try_from(height).unwrap_or(i32::MAX);
        self
    }

    /// Enables sprite rendering using the manifest at `path`.
    ///
    /// Passing `None` selects the primitive renderer.
    #[must_use]
    pub fn with_sprite_manifest(mut self, path: Option<PathBuf>) -> Self {
        self.sprite_manifest = path;
        self
    }

    /// Sets the player walk animation rate.
    #[must_use]
    pub fn with_animation_fps(mut self, frames_per_second: f32) -> Self {
        self.animation_fps = frames_per_second;
        self
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
            window_width,
            window_height,
            sprite_manifest,
            animation_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            tileset,
            scene,
        } = presentation;

        let sprite_source = match (sprite_manifest, tileset) {
            (Some(manifest), Some(tileset)) => Some((manifest, tileset)),
            (Some(_), None) => bail!("sprite rendering requires a tileset"),
            (None, _) => None,
        };

        let mut config = macroquad::window::Conf {
            window_title,
            window_width,
            window_height,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        let (atlas_init_sender, atlas_init_receiver) = mpsc::channel::<Result<()>>();

        macroquad::Window::from_config(config, async move {
            let sprite_atlas = match sprite_source {
                Some((manifest, tileset)) => match SpriteAtlas::load(&manifest, &tileset) {
                    Ok(atlas) => Some(atlas),
                    Err(error) => {
                        let _ = atlas_init_sender.send(Err(error));
                        return;
                    }
                },
                None => None,
            };
            let _ = atlas_init_sender.send(Ok(()));

            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut animation = SpriteAnimation::new(
                PLAYER_SHEET_ROWS,
                PLAYER_SHEET_FRAMES,
                PLAYER_WALK_ROW,
                animation_fps,
            );
            let mut fps_counter = FpsCounter::default();

            loop {
                if is_key_pressed(KeyCode::Escape) {
                    break;
                }

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt =
                    Duration::try_from_secs_f32(dt_seconds.max(0.0)).unwrap_or(Duration::ZERO);
                let frame_input = gather_frame_input(is_key_pressed);

                update_scene(frame_dt, frame_input, &mut scene);
                animation.advance(frame_dt);

                macroquad::window::clear_background(background);
                draw_scene(&scene, sprite_atlas.as_ref(), &animation);

                if show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                    }) = fps_counter.record_frame(frame_dt)
                    {
                        info!("FPS: {per_second:.2} (10s avg: {trailing_ten_seconds:.2})");
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        atlas_init_receiver.recv().unwrap_or_else(|_| Ok(()))?;

        Ok(())
    }
}

fn gather_frame_input(mut pressed: impl FnMut(KeyCode) -> bool) -> FrameInput {
    let step = STEP_KEYS
        .iter()
        .find(|(key, _)| pressed(*key))
        .map(|(_, direction)| *direction);
    FrameInput { step }
}

fn draw_scene(scene: &Scene, sprite_atlas: Option<&SpriteAtlas>, animation: &SpriteAnimation) {
    let projection = scene.tile_grid.projection();
    draw_tiles(scene, &projection, sprite_atlas);
    draw_coins(scene, &projection, sprite_atlas);
    draw_player(scene, &projection, sprite_atlas, animation);
    let _ = draw_text(
        &scene.status_line,
        STATUS_POSITION.x,
        STATUS_POSITION.y,
        STATUS_FONT_SIZE,
        WHITE,
    );
}

fn draw_tiles(scene: &Scene, projection: &IsometricProjection, sprite_atlas: Option<&SpriteAtlas>) {
    let tile_size = MacroquadVec2::new(projection.tile_width, projection.tile_height);
    for tile in &scene.tiles {
        let position = projection.tile_position(tile.cell);
        if let Some(atlas) = sprite_atlas {
            draw_texture_ex(
                atlas.tileset(),
                position.x,
                position.y,
                WHITE,
                DrawTextureParams {
                    dest_size: Some(tile_size),
                    source: Some(atlas.tile_source(tile.visual)),
                    ..DrawTextureParams::default()
                },
            );
        } else {
            let color = match tile.visual {
                TileVisual::Ground => GROUND_COLOR,
                TileVisual::Lava => LAVA_COLOR,
            };
            let [top, right, bottom, left] = tile_diamond(position, projection);
            let color = to_macroquad_color(color);
            draw_triangle(
                to_macroquad_vec(top),
                to_macroquad_vec(right),
                to_macroquad_vec(bottom),
                color,
            );
            draw_triangle(
                to_macroquad_vec(top),
                to_macroquad_vec(bottom),
                to_macroquad_vec(left),
                color,
            );
        }
    }
}

fn draw_coins(scene: &Scene, projection: &IsometricProjection, sprite_atlas: Option<&SpriteAtlas>) {
    let coin_texture = sprite_atlas.and_then(|atlas| atlas.texture(SpriteKey::Coin));
    for tile in scene.tiles.iter().filter(|tile| tile.coin) {
        let centre = tile_centre(projection.tile_position(tile.cell), projection);
        match coin_texture {
            Some(texture) => {
                let corner = centre - Vec2::splat(COIN_SIZE / 2.0);
                draw_texture_ex(
                    texture,
                    corner.x,
                    corner.y,
                    WHITE,
                    DrawTextureParams {
                        dest_size: Some(MacroquadVec2::splat(COIN_SIZE)),
                        ..DrawTextureParams::default()
                    },
                );
            }
            None => draw_circle(
                centre.x,
                centre.y,
                COIN_SIZE / 4.0,
                to_macroquad_color(COIN_COLOR),
            ),
        }
    }
}

fn draw_player(
    scene: &Scene,
    projection: &IsometricProjection,
    sprite_atlas: Option<&SpriteAtlas>,
    animation: &SpriteAnimation,
) {
    let anchor = projection.player_position(scene.player.cell);
    let tint = scene.player.tint;
    match sprite_atlas.and_then(|atlas| atlas.texture(SpriteKey::Player)) {
        Some(texture) => {
            let source = sheet_frame(texture_size(texture), animation);
            let size = Vec2::new(source.w, source.h) * PLAYER_SCALE;
            let corner = player_sprite_corner(anchor, projection.tile_height, size);
            draw_texture_ex(
                texture,
                corner.x,
                corner.y,
                to_macroquad_color(tint),
                DrawTextureParams {
                    dest_size: Some(to_macroquad_vec(size)),
                    source: Some(source),
                    ..DrawTextureParams::default()
                },
            );
        }
        None => {
            let radius = projection.tile_height / 3.0;
            let color = to_macroquad_color(modulate(PLAYER_COLOR, tint));
            draw_circle(
                anchor.x,
                anchor.y + projection.tile_height / 2.0 - radius,
                radius,
                color,
            );
        }
    }
}

/// Corners of the diamond drawn for a tile, clockwise from the top.
fn tile_diamond(position: Vec2, projection: &IsometricProjection) -> [Vec2; 4] {
    let half_width = projection.tile_width / 2.0;
    let half_height = projection.tile_height / 2.0;
    [
        position + Vec2::new(half_width, 0.0),
        position + Vec2::new(projection.tile_width, half_height),
        position + Vec2::new(half_width, projection.tile_height),
        position + Vec2::new(0.0, half_height),
    ]
}

fn tile_centre(position: Vec2, projection: &IsometricProjection) -> Vec2 {
    position + Vec2::new(projection.tile_width, projection.tile_height) / 2.0
}

/// Top-left corner of a player sprite whose feet rest on the tile centre.
fn player_sprite_corner(anchor: Vec2, tile_height: f32, size: Vec2) -> Vec2 {
    Vec2::new(
        anchor.x - size.x / 2.0,
        anchor.y + tile_height / 2.0 - size.y,
    )
}

fn modulate(base: Color, tint: Color) -> Color {
    Color::new(
        base.red * tint.red,
        base.green * tint.green,
        base.blue * tint.blue,
        base.alpha * tint.alpha,
    )
}

#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
}

impl FpsCounter {
    /// Records a rendered frame and returns the per-second and trailing ten-second averages once
    /// one second has elapsed.
    fn record_frame(&mut self, frame: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
        })
    }
}

fn to_macroquad_vec(vector: Vec2) -> MacroquadVec2 {
    MacroquadVec2::new(vector.x, vector.y)
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
