#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Pure movement system that turns directional intents into step commands.

use lavawalk_core::{Command, Direction, Event};

/// Intents gathered by adapters for a single frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct MovementInput {
    /// Direction the player asked to step in, if any.
    pub step: Option<Direction>,
}

/// Pure system that reacts to world events and emits movement commands.
///
/// Once the world announces a win or a loss the system stops emitting
/// commands, so terminal sessions never see further step requests.
#[derive(Debug, Default)]
pub struct Movement {
    halted: bool,
}

impl Movement {
    /// Consumes world events and the frame's intents to emit movement commands.
    pub fn handle(&mut self, events: &[Event], input: MovementInput, out: &mut Vec<Command>) {
        if events
            .iter()
            .any(|event| matches!(event, Event::GameWon { .. } | Event::GameLost { .. }))
        {
            self.halted = true;
        }

        if self.halted {
            return;
        }

        if let Some(direction) = input.step {
            out.push(Command::StepPlayer { direction });
        }
    }

    /// Reports whether the system stopped emitting commands.
    #[must_use]
    pub fn is_halted(&self) -> bool {
        self.halted
    }
}
