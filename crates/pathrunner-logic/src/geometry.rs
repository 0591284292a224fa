//! Curve generation: sparse control points in, dense point sequence out.
//!
//! Every curve kind samples `resolution + 1` points per segment
//! (`t = j / resolution` for `j` in `0..=resolution`), so neighbouring
//! segments repeat their shared endpoint.
//!
//! | Kind | Segments | Segment `i` spans |
//! |------|----------|-------------------|
//! | Linear | `n - 1` | `p[i] → p[i+1]` |
//! | Bezier | `n - 1` | `p[i] → p[i+1]` with handles `h[i]` |
//! | CatmullRom | `n - 3` | `p[i+1] → p[i+2]`, guided by `p[i]`, `p[i+3]` |
//!
//! Catmull-Rom uses a plain sliding 4-point window, so the first and last
//! control points only steer the tangents and are never reached.

use serde::{Deserialize, Serialize};

use crate::vec2::Vec2;

/// How control points are joined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CurveKind {
    #[default]
    Linear,
    Bezier,
    CatmullRom,
}

impl CurveKind {
    /// Fewest control points that produce at least one segment.
    pub fn min_control_points(self) -> usize {
        match self {
            CurveKind::Linear | CurveKind::Bezier => 2,
            CurveKind::CatmullRom => 4,
        }
    }

    /// Number of segments `count` control points produce.
    pub fn segment_count(self, count: usize) -> usize {
        match self {
            CurveKind::Linear | CurveKind::Bezier => count.saturating_sub(1),
            CurveKind::CatmullRom => count.saturating_sub(3),
        }
    }
}

/// Inner control points of one cubic Bezier segment.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BezierHandles {
    pub c1: Vec2,
    pub c2: Vec2,
}

/// Cubic Bezier via the Bernstein blend.
pub fn cubic_bezier(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let u = 1.0 - t;
    let uu = u * u;
    let tt = t * t;
    p0 * (uu * u) + p1 * (3.0 * uu * t) + p2 * (3.0 * u * tt) + p3 * (tt * t)
}

/// Uniform Catmull-Rom between `p1` (t = 0) and `p2` (t = 1).
pub fn catmull_rom(p0: Vec2, p1: Vec2, p2: Vec2, p3: Vec2, t: f32) -> Vec2 {
    let t2 = t * t;
    let t3 = t2 * t;

    let a = p1;
    let b = (p2 - p0) * 0.5;
    let c = (p0 * 2.0 - p1 * 5.0 + p2 * 4.0 - p3) * 0.5;
    let d = (-p0 + p1 * 3.0 - p2 * 3.0 + p3) * 0.5;

    a + b * t + c * t2 + d * t3
}

fn sample_params(resolution: u32) -> impl Iterator<Item = f32> {
    (0..=resolution).map(move |j| j as f32 / resolution as f32)
}

/// Generate the dense point sequence for a curve.
///
/// Malformed input never panics: too few control points or a zero
/// resolution yields an empty sequence, and a Bezier segment without handles
/// is skipped (the rest of the curve is still produced). Problems are logged
/// under `label`.
pub fn generate(
    label: &str,
    kind: CurveKind,
    control_points: &[Vec2],
    handles: &[BezierHandles],
    resolution: u32,
) -> Vec<Vec2> {
    let required = kind.min_control_points();
    if control_points.len() < required {
        log::warn!(
            "path `{}` has {} control points, {:?} needs at least {}",
            label,
            control_points.len(),
            kind,
            required
        );
        return Vec::new();
    }
    if resolution == 0 {
        log::warn!("path `{}` has resolution 0", label);
        return Vec::new();
    }

    let segments = kind.segment_count(control_points.len());
    let mut points = Vec::with_capacity(segments * (resolution as usize + 1));

    match kind {
        CurveKind::Linear => {
            for pair in control_points.windows(2) {
                points.extend(sample_params(resolution).map(|t| pair[0].lerp(pair[1], t)));
            }
        }
        CurveKind::Bezier => {
            for (i, pair) in control_points.windows(2).enumerate() {
                let Some(h) = handles.get(i) else {
                    log::warn!("path `{}` is missing Bezier handles for segment {}", label, i);
                    continue;
                };
                points.extend(
                    sample_params(resolution).map(|t| cubic_bezier(pair[0], h.c1, h.c2, pair[1], t)),
                );
            }
        }
        CurveKind::CatmullRom => {
            for w in control_points.windows(4) {
                points.extend(
                    sample_params(resolution).map(|t| catmull_rom(w[0], w[1], w[2], w[3], t)),
                );
            }
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;

    fn v(x: f32, y: f32) -> Vec2 {
        Vec2::new(x, y)
    }

    #[test]
    fn linear_point_count_and_start() {
        for count in 2..6 {
            for resolution in [1u32, 3, 10] {
                let cps: Vec<Vec2> = (0..count).map(|i| v(i as f32, (i * i) as f32)).collect();
                let pts = generate("t", CurveKind::Linear, &cps, &[], resolution);
                assert_eq!(pts.len(), (count - 1) * (resolution as usize + 1));
                assert_eq!(pts[0], cps[0]);
            }
        }
    }

    #[test]
    fn linear_segments_share_endpoints() {
        let cps = [v(0.0, 0.0), v(2.0, 0.0), v(2.0, 2.0)];
        let pts = generate("t", CurveKind::Linear, &cps, &[], 2);
        assert_eq!(
            pts,
            vec![
                v(0.0, 0.0),
                v(1.0, 0.0),
                v(2.0, 0.0),
                v(2.0, 0.0),
                v(2.0, 1.0),
                v(2.0, 2.0)
            ]
        );
    }

    #[test]
    fn bezier_hits_endpoints() {
        let cps = [v(0.0, 0.0), v(4.0, 0.0)];
        let handles = [BezierHandles {
            c1: v(1.0, 2.0),
            c2: v(3.0, 2.0),
        }];
        let pts = generate("t", CurveKind::Bezier, &cps, &handles, 8);
        assert_eq!(pts.len(), 9);
        assert_eq!(pts[0], cps[0]);
        assert!(pts[8].approx_eq(&cps[1], 1e-5));
        // symmetric handles put the midpoint on x = 2, y = 1.5
        assert!(pts[4].approx_eq(&v(2.0, 1.5), 1e-5));
    }

    #[test]
    fn bezier_skips_only_segments_without_handles() {
        let cps = [v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)];
        let handles = [BezierHandles::default()];
        let pts = generate("t", CurveKind::Bezier, &cps, &handles, 4);
        assert_eq!(pts.len(), 5);
    }

    #[test]
    fn catmull_rom_four_points_is_one_segment() {
        let cps = [v(-1.0, 0.0), v(0.0, 0.0), v(1.0, 1.0), v(2.0, 1.0)];
        let pts = generate("t", CurveKind::CatmullRom, &cps, &[], 10);
        assert_eq!(pts.len(), 11);
        // the window runs from p1 to p2; p0 and p3 are never reached
        assert!(pts[0].approx_eq(&cps[1], 1e-6));
        assert!(pts[10].approx_eq(&cps[2], 1e-5));
    }

    #[test]
    fn catmull_rom_segment_count() {
        let cps: Vec<Vec2> = (0..7).map(|i| v(i as f32, 0.0)).collect();
        let pts = generate("t", CurveKind::CatmullRom, &cps, &[], 5);
        assert_eq!(pts.len(), 4 * 6);
    }

    #[test]
    fn too_few_points_is_empty() {
        assert!(generate("t", CurveKind::Linear, &[v(0.0, 0.0)], &[], 4).is_empty());
        let three = [v(0.0, 0.0), v(1.0, 0.0), v(2.0, 0.0)];
        assert!(generate("t", CurveKind::CatmullRom, &three, &[], 4).is_empty());
        assert!(generate("t", CurveKind::Linear, &three, &[], 0).is_empty());
    }
}
