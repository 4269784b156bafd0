use std::time::Duration;

use lavawalk_core::{CellCoord, Command, Direction, ItemKind, TileKind};
use lavawalk_system_status::{Status, DEFAULT_REFRESH_INTERVAL};
use lavawalk_world::{self as world, query, Grid, World};

const FRAME: Duration = Duration::from_millis(25);

#[test]
fn refreshes_at_most_once_per_interval() {
    let world = World::new(Grid::filled(2, 2, TileKind::Ground).expect("valid grid"));
    let mut status = Status::default();

    let refreshes: Vec<bool> = (0..12)
        .map(|_| status.handle(FRAME, query::outcome(&world)).is_some())
        .collect();

    assert_eq!(
        refreshes,
        vec![false, false, false, true, false, false, false, true, false, false, false, true]
    );
}

#[test]
fn long_frame_refreshes_immediately() {
    let world = World::new(Grid::filled(2, 2, TileKind::Ground).expect("valid grid"));
    let mut status = Status::default();

    let line = status
        .handle(DEFAULT_REFRESH_INTERVAL * 2, query::outcome(&world))
        .expect("interval elapsed");

    assert_eq!(line, "Lava Walk - Coins: 0/0 - FPS 5.00");
}

#[test]
fn zero_delta_never_refreshes() {
    let world = World::new(Grid::filled(1, 1, TileKind::Ground).expect("valid grid"));
    let mut status = Status::new("Test", Duration::ZERO);

    assert!(status.handle(Duration::ZERO, query::outcome(&world)).is_none());
}

#[test]
fn line_follows_world_progress() {
    let grid = Grid::filled(1, 3, TileKind::Ground)
        .expect("valid grid")
        .with_tile(CellCoord::new(0, 2), TileKind::Lava)
        .with_item(CellCoord::new(0, 1), ItemKind::Coin)
        .with_item(CellCoord::new(0, 0), ItemKind::Coin);
    let mut world = World::with_spawn(grid, CellCoord::new(0, 0)).expect("valid spawn");
    let mut status = Status::new(query::welcome_banner(&world), Duration::from_millis(50));
    let mut events = Vec::new();
    let frame = Duration::from_millis(50);

    for _ in 0..2 {
        world::apply(
            &mut world,
            Command::StepPlayer {
                direction: Direction::East,
            },
            &mut events,
        );
    }

    let line = status
        .handle(frame, query::outcome(&world))
        .expect("interval elapsed");
    assert_eq!(line, "Lava Walk - Coins: 1/2 - FPS 20.00 - GAME OVER!");
}
