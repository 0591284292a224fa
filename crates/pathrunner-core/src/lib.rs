//! Pathrunner Core - frame-tick engine
//!
//! Wires the pure services from `pathrunner-logic` into a single-threaded
//! scheduler advanced once per frame.
//!
//! # Architecture
//!
//! The player lives in an ECS world via `hecs`:
//! - **Entities**: the player (and anything else that walks paths)
//! - **Components**: `Position`, `Explorer`, and the `MovementExecutor` itself
//! - **Systems**: movement stepping with fog reveal
//!
//! Everything else (library, matcher, stamina, fog, notifications) is an
//! engine-owned service passed by reference to the step that needs it.
//!
//! # Example
//!
//! ```rust,no_run
//! use pathrunner_core::prelude::*;
//! use pathrunner_logic::config::GameConfig;
//! use pathrunner_logic::library::PathLibrary;
//! use pathrunner_logic::{Direction, Vec2};
//!
//! let (library, _rejected) = PathLibrary::load("data/paths.json").unwrap();
//! let mut engine = GameEngine::new(&GameConfig::default(), library).unwrap();
//! engine.record_notifications(true);
//!
//! engine.push_input(InputEvent::Direction(Direction::Up));
//! engine.push_input(InputEvent::Confirm { cursor: Vec2::new(4.0, 3.0) });
//! loop {
//!     engine.update(1.0 / 60.0); // 60 FPS
//!     for n in engine.drain_notifications() {
//!         println!("{:?}", n);
//!     }
//! }
//! ```

pub mod components;
pub mod engine;
pub mod input;
pub mod systems;

/// Commonly used types for convenient importing
pub mod prelude {
    pub use crate::components::*;
    pub use crate::engine::GameEngine;
    pub use crate::input::InputEvent;
}
