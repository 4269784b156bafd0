#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Command-line adapter that boots the Lava Walk experience.

mod config;
mod simulation;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use lavawalk_rendering::{
    Presentation, RenderingBackend, TileGridPresentation, TilesetPresentation, CLEAR_COLOR,
};
use lavawalk_rendering_macroquad::MacroquadBackend;
use lavawalk_system_status::Status;
use lavawalk_world::{query, MapDefinition, World};
use log::info;

use self::{config::GameConfig, simulation::Simulation};

/// Walk an isometric grid, collect every coin and stay out of the lava.
#[derive(Debug, Parser)]
#[command(name = "lavawalk", version)]
struct CliArgs {
    /// Map file to load, overriding the configured map.
    #[arg(long, value_name = "PATH")]
    map: Option<PathBuf>,
    /// TOML configuration file.
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
    /// Draw terrain, coins and the player from textures.
    #[arg(long)]
    sprites: bool,
    /// Synchronise presentation with the display refresh rate.
    #[arg(long, value_enum)]
    vsync: Option<VsyncMode>,
    /// Log frame rate averages once per second.
    #[arg(long)]
    show_fps: bool,
}

/// Presentation synchronisation requested on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum VsyncMode {
    /// Wait for the display refresh.
    On,
    /// Render as fast as possible.
    Off,
}

impl CliArgs {
    /// Folds command-line overrides into the loaded configuration.
    fn apply_overrides(&self, config: &mut GameConfig) {
        if let Some(map) = &self.map {
            config.map = map.clone();
        }
        if self.sprites {
            config.sprites = true;
        }
    }
}

/// Entry point for the Lava Walk command-line interface.
fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    let mut config = match &args.config {
        Some(path) => GameConfig::load(path)?,
        None => GameConfig::default(),
    };
    args.apply_overrides(&mut config);

    let map = MapDefinition::load(&config.map, &config.tileset_dir)
        .with_context(|| format!("failed to load map {}", config.map.display()))?;
    let world = World::from_map(&map);
    let banner = query::welcome_banner(&world);

    let tile_grid = TileGridPresentation::new(
        map.grid().rows(),
        map.grid().columns(),
        map.tile_width() as f32,
        map.tile_height() as f32,
        config.origin(),
    )
    .context("map tile size cannot be drawn")?;
    let tileset = if config.sprites {
        Some(
            TilesetPresentation::new(map.tileset(), map.atlas_tiles())
                .context("map tileset cannot be drawn")?,
        )
    } else {
        None
    };

    let mut simulation = Simulation::new(world, Status::new(banner, config.status_refresh()));
    let scene = simulation.initial_scene(tile_grid);
    let presentation = Presentation::new(banner, CLEAR_COLOR, tileset, scene);

    let mut backend = MacroquadBackend::new()
        .with_window_size(config.window_width, config.window_height)
        .with_animation_fps(config.animation_fps)
        .with_show_fps(args.show_fps)
        .with_sprite_manifest(config.sprites.then(|| config.sprite_manifest.clone()));
    if let Some(mode) = args.vsync {
        backend = backend.with_vsync(mode == VsyncMode::On);
    }

    info!(
        "starting {banner} with {} renderer",
        if config.sprites { "sprite" } else { "primitive" }
    );
    backend.run(presentation, move |dt, input, scene| {
        simulation.advance(dt, input, scene);
    })
}
