//! Coin counters and the win/loss state machine.

use lavawalk_core::{CellCoord, Event, ItemKind, Outcome, OutcomeSnapshot};
use log::info;

use crate::Grid;

#[derive(Clone, Debug)]
pub(crate) struct OutcomeTracker {
    coins_collected: u32,
    coins_total: u32,
    outcome: Outcome,
}

impl OutcomeTracker {
    pub(crate) fn new(coins_total: u32) -> Self {
        Self {
            coins_collected: 0,
            coins_total,
            outcome: Outcome::Playing,
        }
    }

    pub(crate) fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    pub(crate) fn snapshot(&self) -> OutcomeSnapshot {
        OutcomeSnapshot {
            coins_collected: self.coins_collected,
            coins_total: self.coins_total,
            outcome: self.outcome,
        }
    }

    /// Applies coin pickup and lava rules for the cell the player settled into.
    ///
    /// A pickup that completes the collection wins immediately. Won and Lost
    /// are mutually exclusive, so a winning coin on lava stays Won and no
    /// `GameLost` event is emitted. Lava only loses when the pickup on it,
    /// if any, left coins outstanding.
    pub(crate) fn settle(&mut self, grid: &mut Grid, cell: CellCoord, out_events: &mut Vec<Event>) {
        if self.is_terminal() {
            return;
        }

        if grid.item_at(cell) == ItemKind::Coin {
            grid.set_item(cell, ItemKind::Empty);
            self.coins_collected = self.coins_collected.saturating_add(1).min(self.coins_total);
            info!(
                "coin collected at ({}, {}): {}/{}",
                cell.row(),
                cell.column(),
                self.coins_collected,
                self.coins_total
            );
            out_events.push(Event::CoinCollected {
                cell,
                collected: self.coins_collected,
                total: self.coins_total,
            });

            if self.coins_collected == self.coins_total {
                self.outcome = Outcome::Won;
                info!("every coin collected, game won");
                out_events.push(Event::GameWon {
                    collected: self.coins_collected,
                });
            }
        }

        if !self.is_terminal() && grid.tile_at(cell).is_lethal() {
            self.outcome = Outcome::Lost;
            info!("stepped on lava at ({}, {}), game lost", cell.row(), cell.column());
            out_events.push(Event::GameLost { cell });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lavawalk_core::TileKind;

    fn grid_with_coins(coins: &[CellCoord]) -> Grid {
        coins.iter().fold(
            Grid::filled(3, 3, TileKind::Ground).expect("valid grid"),
            |grid, cell| grid.with_item(*cell, ItemKind::Coin),
        )
    }

    #[test]
    fn pickup_removes_coin_and_counts_it() {
        let coin = CellCoord::new(1, 1);
        let mut grid = grid_with_coins(&[coin, CellCoord::new(2, 2)]);
        let mut tracker = OutcomeTracker::new(grid.coin_count());
        let mut events = Vec::new();

        tracker.settle(&mut grid, coin, &mut events);

        assert_eq!(grid.item_at(coin), ItemKind::Empty);
        assert_eq!(tracker.snapshot().coins_collected, 1);
        assert_eq!(tracker.snapshot().outcome, Outcome::Playing);
        assert_eq!(
            events,
            vec![Event::CoinCollected {
                cell: coin,
                collected: 1,
                total: 2
            }]
        );
    }

    #[test]
    fn last_coin_wins() {
        let coin = CellCoord::new(0, 2);
        let mut grid = grid_with_coins(&[coin]);
        let mut tracker = OutcomeTracker::new(1);
        let mut events = Vec::new();

        tracker.settle(&mut grid, coin, &mut events);

        assert_eq!(tracker.snapshot().outcome, Outcome::Won);
        assert_eq!(events.last(), Some(&Event::GameWon { collected: 1 }));
    }

    #[test]
    fn lava_loses_after_non_winning_pickup() {
        let cell = CellCoord::new(1, 0);
        let mut grid =
            grid_with_coins(&[cell, CellCoord::new(2, 2)]).with_tile(cell, TileKind::Lava);
        let mut tracker = OutcomeTracker::new(2);
        let mut events = Vec::new();

        tracker.settle(&mut grid, cell, &mut events);

        assert_eq!(tracker.snapshot().coins_collected, 1);
        assert_eq!(tracker.snapshot().outcome, Outcome::Lost);
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], Event::GameLost { cell });
    }

    #[test]
    fn winning_coin_on_lava_stays_won() {
        let cell = CellCoord::new(2, 1);
        let mut grid = grid_with_coins(&[cell]).with_tile(cell, TileKind::Lava);
        let mut tracker = OutcomeTracker::new(1);
        let mut events = Vec::new();

        tracker.settle(&mut grid, cell, &mut events);

        assert_eq!(tracker.snapshot().outcome, Outcome::Won);
        assert!(!events.iter().any(|event| matches!(event, Event::GameLost { .. })));
    }

    #[test]
    fn terminal_tracker_ignores_settles() {
        let coin = CellCoord::new(0, 0);
        let mut grid = grid_with_coins(&[coin]).with_tile(CellCoord::new(1, 1), TileKind::Lava);
        let mut tracker = OutcomeTracker::new(2);
        let mut events = Vec::new();

        tracker.settle(&mut grid, CellCoord::new(1, 1), &mut events);
        events.clear();
        tracker.settle(&mut grid, coin, &mut events);

        assert!(events.is_empty());
        assert_eq!(grid.item_at(coin), ItemKind::Coin);
        assert_eq!(tracker.snapshot().coins_collected, 0);
        assert_eq!(tracker.snapshot().outcome, Outcome::Lost);
    }

    #[test]
    fn map_without_coins_is_never_won_by_walking() {
        let mut grid = grid_with_coins(&[]);
        let mut tracker = OutcomeTracker::new(0);
        let mut events = Vec::new();

        tracker.settle(&mut grid, CellCoord::new(1, 1), &mut events);

        assert!(events.is_empty());
        assert_eq!(tracker.snapshot().outcome, Outcome::Playing);
    }
}
