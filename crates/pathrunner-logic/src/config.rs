//! Tunable game parameters.
//!
//! Every section has defaults, so a JSON file only needs the values it wants
//! to change:
//!
//! ```
//! use pathrunner_logic::config::{GameConfig, validate_config};
//!
//! let config = GameConfig::from_json(r#"{ "stamina": { "max": 50 } }"#).unwrap();
//! assert_eq!(config.stamina.max, 50);
//! assert_eq!(config.stamina.base_cost, 5);
//! assert!(validate_config(&config).is_empty());
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::vec2::Vec2;

/// Direction-input timing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct InputConfig {
    /// Seconds after a keystroke during which further keystrokes are ignored.
    pub keystroke_cooldown: f32,
    /// Seconds between preview rotations among tied matches.
    pub preview_cycle_interval: f32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            keystroke_cooldown: 0.2,
            preview_cycle_interval: 1.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StaminaConfig {
    pub max: u32,
    /// Starting stamina; `None` starts full.
    pub initial: Option<u32>,
    /// Fixed part of `cost(n) = base_cost + n`.
    pub base_cost: u32,
}

impl Default for StaminaConfig {
    fn default() -> Self {
        Self {
            max: 100,
            initial: None,
            base_cost: 5,
        }
    }
}

/// Cursor-distance scaling of previewed paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Cursor distance that maps to scale 1.0 before clamping.
    pub reference_distance: f32,
    pub min_scale: f32,
    pub max_scale: f32,
}

impl Default for TransformConfig {
    fn default() -> Self {
        Self {
            reference_distance: 5.0,
            min_scale: 1.0,
            max_scale: 2.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct MovementConfig {
    /// World units per second.
    pub speed: f32,
    /// Distance below which a path point counts as reached.
    pub arrive_epsilon: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            speed: 5.0,
            arrive_epsilon: 0.01,
        }
    }
}

/// Fog raster geometry. The raster is square and covers
/// `max(map_width, map_height)` world units centred on `center`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FogConfig {
    /// Cells per side.
    pub texture_size: usize,
    pub map_width: f32,
    pub map_height: f32,
    pub center: Vec2,
    /// Alpha of unexplored cells.
    pub full_alpha: f32,
    /// Width of the soft edge, in cells.
    pub blur_width: f32,
    /// World radius revealed around the actor.
    pub reveal_radius: f32,
}

impl Default for FogConfig {
    fn default() -> Self {
        Self {
            texture_size: 1024,
            map_width: 100.0,
            map_height: 100.0,
            center: Vec2::ZERO,
            full_alpha: 0.9,
            blur_width: 1.0,
            reveal_radius: 5.0,
        }
    }
}

impl FogConfig {
    /// World length of one raster side.
    pub fn world_size(&self) -> f32 {
        self.map_width.max(self.map_height)
    }

    /// World position of the raster's (0, 0) cell corner.
    pub fn origin(&self) -> Vec2 {
        let half = self.world_size() / 2.0;
        self.center - Vec2::new(half, half)
    }
}

/// Complete configuration for one play session.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub input: InputConfig,
    pub stamina: StaminaConfig,
    pub transform: TransformConfig,
    pub movement: MovementConfig,
    pub fog: FogConfig,
    /// Where the player entity starts.
    pub spawn: Vec2,
    /// RNG seed for path selection (None = from entropy).
    pub seed: Option<u64>,
}

impl GameConfig {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read, parse and validate a config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        let issues = validate_config(&config);
        if issues.is_empty() {
            Ok(config)
        } else {
            Err(ConfigError::Invalid(issues))
        }
    }
}

/// A single validation problem.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigIssue {
    #[error("keystroke cooldown must be >= 0 (got {0})")]
    NegativeCooldown(f32),
    #[error("preview cycle interval must be > 0 (got {0})")]
    NonPositiveCycleInterval(f32),
    #[error("max stamina must be > 0")]
    ZeroMaxStamina,
    #[error("initial stamina {initial} exceeds max {max}")]
    InitialAboveMax { initial: u32, max: u32 },
    #[error("reference distance must be > 0 (got {0})")]
    NonPositiveReferenceDistance(f32),
    #[error("scale range [{min}, {max}] is empty or non-positive")]
    InvalidScaleRange { min: f32, max: f32 },
    #[error("movement speed must be > 0 (got {0})")]
    NonPositiveSpeed(f32),
    #[error("arrival epsilon must be > 0 (got {0})")]
    NonPositiveEpsilon(f32),
    #[error("fog texture size must be > 0")]
    ZeroFogTexture,
    #[error("fog map size must be > 0 (got {width} x {height})")]
    NonPositiveMapSize { width: f32, height: f32 },
    #[error("fog full alpha must be within [0, 1] (got {0})")]
    AlphaOutOfRange(f32),
    #[error("fog blur width must be >= 0 (got {0})")]
    NegativeBlur(f32),
    #[error("reveal radius must be > 0 (got {0})")]
    NonPositiveRevealRadius(f32),
}

/// Validate a config, returning all issues found.
pub fn validate_config(config: &GameConfig) -> Vec<ConfigIssue> {
    let mut issues = Vec::new();

    let input = &config.input;
    if input.keystroke_cooldown < 0.0 {
        issues.push(ConfigIssue::NegativeCooldown(input.keystroke_cooldown));
    }
    if input.preview_cycle_interval <= 0.0 {
        issues.push(ConfigIssue::NonPositiveCycleInterval(
            input.preview_cycle_interval,
        ));
    }

    let stamina = &config.stamina;
    if stamina.max == 0 {
        issues.push(ConfigIssue::ZeroMaxStamina);
    }
    if let Some(initial) = stamina.initial {
        if initial > stamina.max {
            issues.push(ConfigIssue::InitialAboveMax {
                initial,
                max: stamina.max,
            });
        }
    }

    let transform = &config.transform;
    if transform.reference_distance <= 0.0 {
        issues.push(ConfigIssue::NonPositiveReferenceDistance(
            transform.reference_distance,
        ));
    }
    if transform.min_scale <= 0.0 || transform.min_scale > transform.max_scale {
        issues.push(ConfigIssue::InvalidScaleRange {
            min: transform.min_scale,
            max: transform.max_scale,
        });
    }

    let movement = &config.movement;
    if movement.speed <= 0.0 {
        issues.push(ConfigIssue::NonPositiveSpeed(movement.speed));
    }
    if movement.arrive_epsilon <= 0.0 {
        issues.push(ConfigIssue::NonPositiveEpsilon(movement.arrive_epsilon));
    }

    let fog = &config.fog;
    if fog.texture_size == 0 {
        issues.push(ConfigIssue::ZeroFogTexture);
    }
    if fog.map_width <= 0.0 || fog.map_height <= 0.0 {
        issues.push(ConfigIssue::NonPositiveMapSize {
            width: fog.map_width,
            height: fog.map_height,
        });
    }
    if !(0.0..=1.0).contains(&fog.full_alpha) {
        issues.push(ConfigIssue::AlphaOutOfRange(fog.full_alpha));
    }
    if fog.blur_width < 0.0 {
        issues.push(ConfigIssue::NegativeBlur(fog.blur_width));
    }
    if fog.reveal_radius <= 0.0 {
        issues.push(ConfigIssue::NonPositiveRevealRadius(fog.reveal_radius));
    }

    issues
}
