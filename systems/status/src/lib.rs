#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure status system that produces the throttled coin/outcome status line.

use std::time::Duration;

use lavawalk_core::{Outcome, OutcomeSnapshot, WELCOME_BANNER};

/// Default minimum time between two status line refreshes.
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_millis(100);

/// Pure system that periodically formats the session status.
#[derive(Debug)]
pub struct Status {
    banner: String,
    refresh_interval: Duration,
    countdown: Duration,
}

impl Status {
    /// Creates a status system that prefixes every line with `banner`.
    #[must_use]
    pub fn new(banner: impl Into<String>, refresh_interval: Duration) -> Self {
        Self {
            banner: banner.into(),
            refresh_interval,
            countdown: refresh_interval,
        }
    }

    /// Advances the refresh timer by `dt` and returns a new line once it elapses.
    ///
    /// Frames with a zero delta never refresh because no frame rate can be derived from them.
    pub fn handle(&mut self, dt: Duration, outcome: OutcomeSnapshot) -> Option<String> {
        self.countdown = self.countdown.saturating_sub(dt);
        if !self.countdown.is_zero() || dt.is_zero() {
            return None;
        }

        self.countdown = self.refresh_interval;
        let fps = 1.0 / dt.as_secs_f64();
        Some(status_line(&self.banner, outcome, fps))
    }
}

impl Default for Status {
    fn default() -> Self {
        Self::new(WELCOME_BANNER, DEFAULT_REFRESH_INTERVAL)
    }
}

/// Formats the status line for the provided outcome and frame rate.
#[must_use]
pub fn status_line(banner: &str, outcome: OutcomeSnapshot, fps: f64) -> String {
    let suffix = match outcome.outcome {
        Outcome::Playing => "",
        Outcome::Won => " - YOU WON!",
        Outcome::Lost => " - GAME OVER!",
    };
    format!(
        "{banner} - Coins: {}/{} - FPS {fps:.2}{suffix}",
        outcome.coins_collected, outcome.coins_total
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_line_lists_coins_and_fps() {
        let snapshot = OutcomeSnapshot {
            coins_collected: 2,
            coins_total: 5,
            outcome: Outcome::Playing,
        };

        assert_eq!(
            status_line("Lava Walk", snapshot, 59.994),
            "Lava Walk - Coins: 2/5 - FPS 59.99"
        );
    }

    #[test]
    fn status_line_announces_terminal_outcomes() {
        let won = OutcomeSnapshot {
            coins_collected: 3,
            coins_total: 3,
            outcome: Outcome::Won,
        };
        let lost = OutcomeSnapshot {
            outcome: Outcome::Lost,
            ..won
        };

        assert!(status_line("Lava Walk", won, 30.0).ends_with(" - YOU WON!"));
        assert!(status_line("Lava Walk", lost, 30.0).ends_with(" - GAME OVER!"));
    }
}
