//! Component definitions for the ECS world.
//!
//! Components are plain data. `pathrunner_logic::executor::MovementExecutor`
//! is attached directly as the movement component.

use pathrunner_logic::Vec2;

pub use pathrunner_logic::executor::MovementExecutor;

/// Marker for the player-controlled entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Player;

/// World position.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Position {
    pub world: Vec2,
}

impl Position {
    pub fn new(world: Vec2) -> Self {
        Self { world }
    }
}

/// Clears fog around the entity while it moves.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Explorer {
    pub reveal_radius: f32,
}
