//! Frame stepping for sprite sheet animations.

use std::time::Duration;

/// Sprite sheet laid out as `rows` animations of `frames` frames each.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpriteAnimation {
    rows: u32,
    frames: u32,
    row: u32,
    frame: u32,
    frame_duration: Duration,
    elapsed: Duration,
}

impl SpriteAnimation {
    /// Creates an animation that plays `row` at `frames_per_second`.
    ///
    /// Degenerate sheets are clamped to a single frame and a zero frame rate
    /// freezes the animation.
    #[must_use]
    pub fn new(rows: u32, frames: u32, row: u32, frames_per_second: f32) -> Self {
        let rows = rows.max(1);
        let frame_duration = if frames_per_second > 0.0 {
            Duration::try_from_secs_f32(frames_per_second.recip()).unwrap_or(Duration::MAX)
        } else {
            Duration::MAX
        };
        Self {
            rows,
            frames: frames.max(1),
            row: row.min(rows - 1),
            frame: 0,
            frame_duration,
            elapsed: Duration::ZERO,
        }
    }

    /// Advances the animation clock, moving at most one frame per call.
    pub fn advance(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
        if self.elapsed >= self.frame_duration {
            self.frame = (self.frame + 1) % self.frames;
            self.elapsed = Duration::ZERO;
        }
    }

    /// Frame currently displayed.
    #[must_use]
    pub const fn frame(&self) -> u32 {
        self.frame
    }

    /// Animation row currently displayed.
    #[must_use]
    pub const fn row(&self) -> u32 {
        self.row
    }

    /// Number of animation rows in the sheet.
    #[must_use]
    pub const fn rows(&self) -> u32 {
        self.rows
    }

    /// Number of frames per animation row.
    #[must_use]
    pub const fn frames(&self) -> u32 {
        self.frames
    }
}
