//! Error types for authored data and configuration.
//!
//! Gameplay rejections (not enough stamina, a click with nothing to confirm,
//! a second execution while moving) are not errors; they are outcome values
//! and notifications. Only malformed input data ends up here.

use thiserror::Error;

/// A path definition that cannot be used as authored.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathDataError {
    #[error("path `{name}` has {count} control points, at least {required} required")]
    TooFewControlPoints {
        name: String,
        count: usize,
        required: usize,
    },
    #[error("path `{name}` has resolution 0")]
    ZeroResolution { name: String },
    #[error("path `{name}` is missing Bezier handles for segment {segment}")]
    MissingBezierHandles { name: String, segment: usize },
    #[error("path `{name}` has an empty direction key")]
    EmptyDirectionKey { name: String },
    #[error("path `{name}` starts at ({x}, {y}) instead of the local origin")]
    StartNotAtOrigin { name: String, x: f32, y: f32 },
    #[error("path name `{name}` is already in the library")]
    DuplicateName { name: String },
}

/// Failure to load a path library file.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("failed to read path library: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse path library: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to load or validate a game config.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid config: {}", format_issues(.0))]
    Invalid(Vec<crate::config::ConfigIssue>),
}

fn format_issues(issues: &[crate::config::ConfigIssue]) -> String {
    issues
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
