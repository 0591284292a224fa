//! Raw input events and the once-per-tick arbitration step.
//!
//! All input queued since the previous tick is classified here, before any
//! of it is dispatched. Keystrokes pass through in order. A click becomes
//! the tick's confirm only if nothing is executing or waiting to execute
//! and no earlier click already claimed the slot; every other click is
//! dropped.

use pathrunner_logic::{Direction, Vec2};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    Direction(Direction),
    Backspace,
    /// Confirm-selection click at a world cursor position.
    Confirm { cursor: Vec2 },
    /// Cursor sample in world space.
    CursorMoved(Vec2),
}

/// Buffer edit forwarded to the matcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyInput {
    Direction(Direction),
    Backspace,
}

/// What one tick's input resolves to.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArbitratedInput {
    pub keys: Vec<KeyInput>,
    /// Latest cursor sample, including the position of any click.
    pub cursor: Option<Vec2>,
    /// Cursor of the click that confirms this tick.
    pub confirm: Option<Vec2>,
    pub dropped_clicks: usize,
}

/// Classify a tick's worth of input. `busy` is true while a path is
/// executing or selected and waiting to start.
pub fn arbitrate(events: impl IntoIterator<Item = InputEvent>, busy: bool) -> ArbitratedInput {
    let mut out = ArbitratedInput::default();

    for event in events {
        match event {
            InputEvent::Direction(d) => out.keys.push(KeyInput::Direction(d)),
            InputEvent::Backspace => out.keys.push(KeyInput::Backspace),
            InputEvent::CursorMoved(p) => out.cursor = Some(p),
            InputEvent::Confirm { cursor } => {
                out.cursor = Some(cursor);
                if busy || out.confirm.is_some() {
                    out.dropped_clicks += 1;
                } else {
                    out.confirm = Some(cursor);
                }
            }
        }
    }

    out
}
