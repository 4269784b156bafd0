//! Frame loop glue between the world, the pure systems and the scene.

use std::time::Duration;

use lavawalk_core::{Command, Event, ItemKind};
use lavawalk_rendering::{
    FrameInput, PlayerPresentation, Scene, TileGridPresentation, TilePresentation, TileVisual,
};
use lavawalk_system_movement::{Movement, MovementInput};
use lavawalk_system_status::{status_line, Status};
use lavawalk_world::{self as world, query, Grid, World};

/// Owns the world and the systems driving it.
#[derive(Debug)]
pub(crate) struct Simulation {
    world: World,
    movement: Movement,
    status: Status,
    events: Vec<Event>,
    commands: Vec<Command>,
}

impl Simulation {
    pub(crate) fn new(world: World, status: Status) -> Self {
        Self {
            world,
            movement: Movement::default(),
            status,
            events: Vec::new(),
            commands: Vec::new(),
        }
    }

    /// Builds the first scene shown before any frame has run.
    pub(crate) fn initial_scene(&self, tile_grid: TileGridPresentation) -> Scene {
        let snapshot = query::outcome(&self.world);
        Scene::new(
            tile_grid,
            tile_presentations(query::grid(&self.world)),
            PlayerPresentation::new(query::player_cell(&self.world), snapshot.outcome),
            snapshot,
            status_line(query::welcome_banner(&self.world), snapshot, 0.0),
        )
    }

    /// Runs one frame of game logic and refreshes the scene from the world.
    pub(crate) fn advance(&mut self, dt: Duration, input: FrameInput, scene: &mut Scene) {
        self.movement.handle(
            &self.events,
            MovementInput { step: input.step },
            &mut self.commands,
        );

        self.events.clear();
        for command in self.commands.drain(..) {
            world::apply(&mut self.world, command, &mut self.events);
        }

        let snapshot = query::outcome(&self.world);
        if let Some(line) = self.status.handle(dt, snapshot) {
            scene.status_line = line;
        }
        scene.tiles = tile_presentations(query::grid(&self.world));
        scene.player = PlayerPresentation::new(query::player_cell(&self.world), snapshot.outcome);
        scene.outcome = snapshot;
    }
}

fn tile_presentations(grid: &Grid) -> Vec<TilePresentation> {
    grid.cells()
        .filter_map(|cell| {
            TileVisual::for_tile(grid.tile_at(cell)).map(|visual| {
                TilePresentation::new(cell, visual, grid.item_at(cell) == ItemKind::Coin)
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec2;
    use lavawalk_core::{CellCoord, Direction, Outcome, TileKind};
    use lavawalk_rendering::Color;

    const FRAME: Duration = Duration::from_millis(50);

    fn simulation(grid: Grid, start: CellCoord) -> (Simulation, Scene) {
        let world = World::with_spawn(grid, start).expect("valid spawn");
        let simulation = Simulation::new(world, Status::new("Lava Walk", FRAME));
        let tile_grid = TileGridPresentation::new(3, 3, 64.0, 32.0, Vec2::new(512.0, 150.0))
            .expect("valid grid");
        let scene = simulation.initial_scene(tile_grid);
        (simulation, scene)
    }

    fn step(direction: Direction) -> FrameInput {
        FrameInput {
            step: Some(direction),
        }
    }

    #[test]
    fn initial_scene_skips_invalid_tiles() {
        let grid = Grid::filled(3, 3, TileKind::Ground)
            .expect("valid grid")
            .with_tile(CellCoord::new(2, 2), TileKind::Invalid)
            .with_item(CellCoord::new(1, 1), ItemKind::Coin);
        let (_, scene) = simulation(grid, CellCoord::new(0, 0));

        assert_eq!(scene.tiles.len(), 8);
        assert_eq!(scene.coins_remaining(), 1);
        assert_eq!(scene.status_line, "Lava Walk - Coins: 0/1 - FPS 0.00");
        assert_eq!(scene.player.tint, Color::WHITE);
    }

    #[test]
    fn collecting_the_last_coin_wins_and_tints_player() {
        let grid = Grid::filled(3, 3, TileKind::Ground)
            .expect("valid grid")
            .with_item(CellCoord::new(1, 1), ItemKind::Coin);
        let (mut simulation, mut scene) = simulation(grid, CellCoord::new(0, 0));

        simulation.advance(FRAME, step(Direction::SouthEast), &mut scene);

        assert_eq!(scene.player.cell, CellCoord::new(1, 1));
        assert_eq!(scene.outcome.outcome, Outcome::Won);
        assert_eq!(scene.coins_remaining(), 0);
        assert_eq!(scene.player.tint, Color::new(0.5, 1.0, 0.5, 1.0));
        assert_eq!(scene.status_line, "Lava Walk - Coins: 1/1 - FPS 20.00 - YOU WON!");
    }

    #[test]
    fn input_after_loss_leaves_scene_unchanged() {
        let grid = Grid::filled(2, 2, TileKind::Ground)
            .expect("valid grid")
            .with_tile(CellCoord::new(0, 1), TileKind::Lava);
        let (mut simulation, mut scene) = simulation(grid, CellCoord::new(0, 0));

        simulation.advance(FRAME, step(Direction::East), &mut scene);
        assert_eq!(scene.outcome.outcome, Outcome::Lost);

        simulation.advance(FRAME, step(Direction::South), &mut scene);
        simulation.advance(FRAME, step(Direction::West), &mut scene);

        assert_eq!(scene.player.cell, CellCoord::new(0, 1));
        assert_eq!(scene.outcome.outcome, Outcome::Lost);
        assert!(simulation.commands.is_empty());
        assert!(simulation.events.is_empty());
    }

    #[test]
    fn idle_frames_keep_player_in_place() {
        let grid = Grid::filled(3, 3, TileKind::Ground).expect("valid grid");
        let (mut simulation, mut scene) = simulation(grid, CellCoord::new(1, 1));

        for _ in 0..5 {
            simulation.advance(FRAME, FrameInput::default(), &mut scene);
        }

        assert_eq!(scene.player.cell, CellCoord::new(1, 1));
        assert_eq!(scene.outcome.outcome, Outcome::Playing);
    }
}
