//! Maps a path's canonical points into world space.
//!
//! `scale = clamp(|cursor - anchor| / reference_distance, min_scale, max_scale)`
//! and each point becomes `p * scale + anchor - first * scale`, so the first
//! canonical point always lands exactly on the anchor. Paths are never
//! rotated.

use crate::config::TransformConfig;
use crate::library::PathId;
use crate::path::{PathDefinition, ORIGIN_EPSILON};
use crate::vec2::Vec2;

/// World-space copy of a path, ready to preview or execute.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformedPath {
    pub path: PathId,
    pub points: Vec<Vec2>,
    pub scale: f32,
    pub anchor: Vec2,
}

impl TransformedPath {
    pub fn start(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    pub fn end(&self) -> Option<Vec2> {
        self.points.last().copied()
    }

    /// Sum of segment lengths.
    pub fn length(&self) -> f32 {
        self.points.windows(2).map(|w| w[0].distance(&w[1])).sum()
    }
}

#[derive(Debug, Clone)]
pub struct PathTransformer {
    reference_distance: f32,
    min_scale: f32,
    max_scale: f32,
}

impl Default for PathTransformer {
    fn default() -> Self {
        Self::from_config(&TransformConfig::default())
    }
}

impl PathTransformer {
    pub fn from_config(config: &TransformConfig) -> Self {
        Self {
            reference_distance: config.reference_distance,
            min_scale: config.min_scale,
            max_scale: config.max_scale,
        }
    }

    pub fn scale_for(&self, anchor: Vec2, cursor: Vec2) -> f32 {
        let raw = anchor.distance(&cursor) / self.reference_distance;
        raw.clamp(self.min_scale, self.max_scale)
    }

    /// Returns `None` if the definition has no generated points.
    pub fn transform(
        &self,
        id: PathId,
        definition: &PathDefinition,
        anchor: Vec2,
        cursor: Vec2,
    ) -> Option<TransformedPath> {
        let canonical = definition.points();
        let first = *canonical.first()?;
        if !first.approx_eq(&Vec2::ZERO, ORIGIN_EPSILON) {
            log::warn!(
                "path `{}` starts at {} instead of the origin; its world start is offset",
                definition.name(),
                first
            );
        }

        let scale = self.scale_for(anchor, cursor);
        let offset = anchor - first * scale;
        let points = canonical
            .iter()
            .enumerate()
            .map(|(i, &p)| if i == 0 { anchor } else { p * scale + offset })
            .collect();

        Some(TransformedPath {
            path: id,
            points,
            scale,
            anchor,
        })
    }
}
