//! A single authored path: identity, direction key and curve data.
//!
//! Generated points are computed on first request and cached; the cache is
//! dropped only when the control data is reauthored.

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use crate::direction::{format_sequence, Direction};
use crate::error::PathDataError;
use crate::geometry::{self, BezierHandles, CurveKind};
use crate::vec2::Vec2;

/// Tolerance for the "starts at the local origin" check.
pub const ORIGIN_EPSILON: f32 = 1e-4;

/// Default samples per segment.
pub const DEFAULT_RESOLUTION: u32 = 10;

fn default_resolution() -> u32 {
    DEFAULT_RESOLUTION
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathDefinition {
    name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    curve: CurveKind,
    direction_key: Vec<Direction>,
    control_points: Vec<Vec2>,
    #[serde(default)]
    bezier_handles: Vec<BezierHandles>,
    #[serde(default = "default_resolution")]
    resolution: u32,
    #[serde(skip)]
    points: OnceLock<Vec<Vec2>>,
}

impl PathDefinition {
    pub fn new(
        name: impl Into<String>,
        curve: CurveKind,
        direction_key: Vec<Direction>,
        control_points: Vec<Vec2>,
    ) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            curve,
            direction_key,
            control_points,
            bezier_handles: Vec::new(),
            resolution: DEFAULT_RESOLUTION,
            points: OnceLock::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_handles(mut self, handles: Vec<BezierHandles>) -> Self {
        self.bezier_handles = handles;
        self.points = OnceLock::new();
        self
    }

    pub fn with_resolution(mut self, resolution: u32) -> Self {
        self.resolution = resolution;
        self.points = OnceLock::new();
        self
    }

    /// Replace the curve data, discarding cached points.
    pub fn reauthor(&mut self, control_points: Vec<Vec2>, bezier_handles: Vec<BezierHandles>) {
        self.control_points = control_points;
        self.bezier_handles = bezier_handles;
        self.points = OnceLock::new();
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn curve(&self) -> CurveKind {
        self.curve
    }

    pub fn direction_key(&self) -> &[Direction] {
        &self.direction_key
    }

    /// The direction key as arrow glyphs.
    pub fn direction_string(&self) -> String {
        format_sequence(&self.direction_key)
    }

    pub fn control_points(&self) -> &[Vec2] {
        &self.control_points
    }

    pub fn resolution(&self) -> u32 {
        self.resolution
    }

    /// Canonical path-local points, generated once then cached.
    pub fn points(&self) -> &[Vec2] {
        self.points.get_or_init(|| {
            geometry::generate(
                &self.name,
                self.curve,
                &self.control_points,
                &self.bezier_handles,
                self.resolution,
            )
        })
    }

    /// Check the authored data is usable: enough control points, handles for
    /// every Bezier segment, a positive resolution, a non-empty key, and a
    /// first generated point at the local origin.
    pub fn validate(&self) -> Result<(), PathDataError> {
        let name = || self.name.clone();

        if self.direction_key.is_empty() {
            return Err(PathDataError::EmptyDirectionKey { name: name() });
        }
        if self.resolution == 0 {
            return Err(PathDataError::ZeroResolution { name: name() });
        }
        let required = self.curve.min_control_points();
        if self.control_points.len() < required {
            return Err(PathDataError::TooFewControlPoints {
                name: name(),
                count: self.control_points.len(),
                required,
            });
        }
        if self.curve == CurveKind::Bezier {
            let segments = self.curve.segment_count(self.control_points.len());
            if self.bezier_handles.len() < segments {
                return Err(PathDataError::MissingBezierHandles {
                    name: name(),
                    segment: self.bezier_handles.len(),
                });
            }
        }

        let start = self.points().first().copied().unwrap_or_default();
        if !start.approx_eq(&Vec2::ZERO, ORIGIN_EPSILON) {
            return Err(PathDataError::StartNotAtOrigin {
                name: name(),
                x: start.x,
                y: start.y,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Direction::*;

    fn straight() -> PathDefinition {
        PathDefinition::new(
            "Dash",
            CurveKind::Linear,
            vec![Up, Up],
            vec![Vec2::ZERO, Vec2::new(0.0, 4.0)],
        )
        .with_resolution(4)
    }

    #[test]
    fn points_are_cached() {
        let def = straight();
        let first = def.points().as_ptr();
        let second = def.points().as_ptr();
        assert_eq!(first, second);
        assert_eq!(def.points().len(), 5);
    }

    #[test]
    fn reauthor_regenerates() {
        let mut def = straight();
        assert_eq!(def.points().len(), 5);
        def.reauthor(
            vec![Vec2::ZERO, Vec2::new(1.0, 0.0), Vec2::new(1.0, 1.0)],
            Vec::new(),
        );
        assert_eq!(def.points().len(), 10);
    }

    #[test]
    fn valid_definition() {
        assert_eq!(straight().validate(), Ok(()));
        assert_eq!(straight().direction_string(), "↑↑");
    }

    #[test]
    fn offset_start_is_rejected() {
        let def = PathDefinition::new(
            "Offset",
            CurveKind::Linear,
            vec![Up],
            vec![Vec2::new(1.0, 0.0), Vec2::new(1.0, 4.0)],
        );
        assert!(matches!(
            def.validate(),
            Err(PathDataError::StartNotAtOrigin { .. })
        ));
    }

    #[test]
    fn catmull_rom_origin_is_second_control_point() {
        let def = PathDefinition::new(
            "Swoop",
            CurveKind::CatmullRom,
            vec![Right, Up],
            vec![
                Vec2::new(-1.0, 0.0),
                Vec2::ZERO,
                Vec2::new(2.0, 1.0),
                Vec2::new(3.0, 3.0),
            ],
        );
        assert_eq!(def.validate(), Ok(()));
    }

    #[test]
    fn bezier_without_handles_is_rejected() {
        let def = PathDefinition::new(
            "Hook",
            CurveKind::Bezier,
            vec![Up, Right],
            vec![Vec2::ZERO, Vec2::new(2.0, 2.0), Vec2::new(4.0, 2.0)],
        )
        .with_handles(vec![BezierHandles::default()]);
        assert_eq!(
            def.validate(),
            Err(PathDataError::MissingBezierHandles {
                name: "Hook".into(),
                segment: 1
            })
        );
    }

    #[test]
    fn empty_key_and_zero_resolution() {
        let def = PathDefinition::new("Nothing", CurveKind::Linear, vec![], vec![]);
        assert!(matches!(
            def.validate(),
            Err(PathDataError::EmptyDirectionKey { .. })
        ));
        let def = straight().with_resolution(0);
        assert!(matches!(def.validate(), Err(PathDataError::ZeroResolution { .. })));
    }

    #[test]
    fn deserializes_authoring_format() {
        let json = r#"{
            "name": "Hook",
            "curve": "Bezier",
            "direction_key": ["Up", "Right"],
            "control_points": [{"x": 0, "y": 0}, {"x": 3, "y": 3}],
            "bezier_handles": [{"c1": {"x": 0, "y": 2}, "c2": {"x": 1, "y": 3}}]
        }"#;
        let def: PathDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(def.resolution(), DEFAULT_RESOLUTION);
        assert_eq!(def.description(), "");
        assert_eq!(def.points().len(), 11);
        assert_eq!(def.validate(), Ok(()));
    }
}
