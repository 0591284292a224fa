//! Pure path-running logic for Pathrunner.
//!
//! This crate contains all game logic that is independent of any engine,
//! renderer, or input device. Functions take plain data and return results,
//! making them unit-testable and portable across the tick engine, the
//! headless harness, and any future front end.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | Tunable parameters, JSON loading, validation |
//! | [`direction`] | The four input directions and their arrow glyphs |
//! | [`error`] | Error types for path data, library and config loading |
//! | [`events`] | Notifications and the observer registry that delivers them |
//! | [`executor`] | Constant-speed stepping of an actor along a world-space path |
//! | [`fog`] | Persistent fog-of-war opacity raster with monotonic reveal |
//! | [`geometry`] | Linear, cubic Bezier and Catmull-Rom point generation |
//! | [`library`] | Authored path definitions and their unlock state |
//! | [`matcher`] | Direction buffer, prefix matching, preview cycling, confirm |
//! | [`path`] | A single path definition with cached generated points |
//! | [`stamina`] | Stamina pool, cost function, affordability |
//! | [`transform`] | Scaling and anchoring canonical paths into world space |
//! | [`vec2`] | 2D vector math |

pub mod config;
pub mod direction;
pub mod error;
pub mod events;
pub mod executor;
pub mod fog;
pub mod geometry;
pub mod library;
pub mod matcher;
pub mod path;
pub mod stamina;
pub mod transform;
pub mod vec2;

pub use direction::Direction;
pub use library::PathId;
pub use vec2::Vec2;
