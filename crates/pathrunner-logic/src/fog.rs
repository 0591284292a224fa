//! Fog-of-war opacity raster.
//!
//! A square grid of alpha values covering `world_size` world units from
//! `origin` (the lower-left corner). Revealing clears a disc with a soft
//! edge: cells deeper than `blur_width` inside the disc become fully clear,
//! cells in the rim ramp linearly up to `full_alpha`. A cell's alpha only
//! ever goes down; only [`FogRaster::reset`] restores the fog.

use crate::config::FogConfig;
use crate::vec2::Vec2;

#[derive(Debug, Clone)]
pub struct FogRaster {
    size: usize,
    origin: Vec2,
    world_size: f32,
    full_alpha: f32,
    blur_width: f32,
    alpha: Vec<f32>,
    explored: Vec<Vec2>,
}

impl FogRaster {
    pub fn new(size: usize, origin: Vec2, world_size: f32, full_alpha: f32, blur_width: f32) -> Self {
        Self {
            size,
            origin,
            world_size,
            full_alpha,
            blur_width,
            alpha: vec![full_alpha; size * size],
            explored: Vec::new(),
        }
    }

    pub fn from_config(config: &FogConfig) -> Self {
        Self::new(
            config.texture_size,
            config.origin(),
            config.world_size(),
            config.full_alpha,
            config.blur_width,
        )
    }

    /// Cells per side.
    pub fn size(&self) -> usize {
        self.size
    }

    pub fn full_alpha(&self) -> f32 {
        self.full_alpha
    }

    /// Row-major alpha values, `y * size + x`.
    pub fn alphas(&self) -> &[f32] {
        &self.alpha
    }

    /// Every point passed to a successful [`reveal`](Self::reveal) since the last reset.
    pub fn explored(&self) -> &[Vec2] {
        &self.explored
    }

    pub fn alpha_at(&self, x: usize, y: usize) -> Option<f32> {
        if x < self.size && y < self.size {
            Some(self.alpha[y * self.size + x])
        } else {
            None
        }
    }

    pub fn alpha_at_world(&self, point: Vec2) -> Option<f32> {
        let (x, y) = self.world_to_cell(point)?;
        self.alpha_at(x, y)
    }

    fn normalized(&self, point: Vec2) -> Option<Vec2> {
        let rel = point - self.origin;
        let n = Vec2::new(rel.x / self.world_size, rel.y / self.world_size);
        let inside = (0.0..=1.0).contains(&n.x) && (0.0..=1.0).contains(&n.y);
        inside.then_some(n)
    }

    /// Cell containing a world point, or `None` outside the raster.
    pub fn world_to_cell(&self, point: Vec2) -> Option<(usize, usize)> {
        let n = self.normalized(point)?;
        let last = self.size.checked_sub(1)?;
        let x = ((n.x * self.size as f32).round() as usize).min(last);
        let y = ((n.y * self.size as f32).round() as usize).min(last);
        Some((x, y))
    }

    /// Clear fog in a disc of world `radius` around `point`. Points outside
    /// the raster are logged and ignored. Returns whether anything was done.
    pub fn reveal(&mut self, point: Vec2, radius: f32) -> bool {
        let Some(n) = self.normalized(point) else {
            log::warn!("fog reveal at {} is outside the fog area", point);
            return false;
        };
        if self.size == 0 {
            return false;
        }

        let cells = self.size as f32;
        let cx = (n.x * cells).round() as i64;
        let cy = (n.y * cells).round() as i64;
        // twice the raster side reaches every cell from any corner
        let r = (radius / self.world_size * cells).round().min(cells * 2.0) as i64;
        let rf = r as f32;
        let last = self.size as i64 - 1;

        self.explored.push(point);

        for y in (cy - r).max(0)..=(cy + r).min(last) {
            for x in (cx - r).max(0)..=(cx + r).min(last) {
                let dx = (x - cx) as f32;
                let dy = (y - cy) as f32;
                let distance = (dx * dx + dy * dy).sqrt();
                if distance > rf {
                    continue;
                }
                let target = if distance > rf - self.blur_width {
                    (rf - distance) / self.blur_width * self.full_alpha
                } else {
                    0.0
                };
                let cell = &mut self.alpha[y as usize * self.size + x as usize];
                if target < *cell {
                    *cell = target;
                }
            }
        }
        true
    }

    /// Share of cells that are at least partly cleared.
    pub fn revealed_fraction(&self) -> f32 {
        if self.alpha.is_empty() {
            return 0.0;
        }
        let cleared = self.alpha.iter().filter(|&&a| a < self.full_alpha).count();
        cleared as f32 / self.alpha.len() as f32
    }

    /// Restore full fog and forget explored positions.
    pub fn reset(&mut self) {
        self.alpha.fill(self.full_alpha);
        self.explored.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// 100 cells over 100 world units centred on the origin: one cell per unit.
    fn raster() -> FogRaster {
        FogRaster::new(100, Vec2::new(-50.0, -50.0), 100.0, 0.9, 1.0)
    }

    #[test]
    fn world_to_cell_mapping() {
        let fog = raster();
        assert_eq!(fog.world_to_cell(Vec2::ZERO), Some((50, 50)));
        assert_eq!(fog.world_to_cell(Vec2::new(-50.0, -50.0)), Some((0, 0)));
        assert_eq!(fog.world_to_cell(Vec2::new(50.0, 50.0)), Some((99, 99)));
        assert_eq!(fog.world_to_cell(Vec2::new(50.1, 0.0)), None);
    }

    #[test]
    fn reveal_clears_centre_and_ramps_rim() {
        let mut fog = raster();
        assert!(fog.reveal(Vec2::ZERO, 5.0));
        assert_eq!(fog.alpha_at(50, 50), Some(0.0));
        assert_eq!(fog.alpha_at(54, 50), Some(0.0));
        // sqrt(18) from centre lies in the rim
        let rim = fog.alpha_at(53, 53).unwrap();
        let d = (18.0f32).sqrt();
        assert!((rim - (5.0 - d) * 0.9).abs() < 1e-5);
        assert_eq!(fog.alpha_at(55, 50), Some(0.0));
        assert_eq!(fog.alpha_at(56, 50), Some(0.9));
        assert_eq!(fog.alpha_at(54, 54), Some(0.9));
    }

    #[test]
    fn reveal_is_idempotent() {
        let mut once = raster();
        once.reveal(Vec2::new(3.2, -7.9), 6.0);
        let mut twice = raster();
        twice.reveal(Vec2::new(3.2, -7.9), 6.0);
        twice.reveal(Vec2::new(3.2, -7.9), 6.0);
        assert_eq!(once.alphas(), twice.alphas());
    }

    #[test]
    fn reveal_never_increases_alpha() {
        let mut fog = raster();
        let points = [
            (Vec2::ZERO, 5.0),
            (Vec2::new(2.0, 1.0), 3.0),
            (Vec2::new(4.0, 0.0), 8.0),
            (Vec2::new(-30.0, 20.0), 2.0),
            (Vec2::new(1.0, 1.0), 1.0),
        ];
        let mut before = fog.alphas().to_vec();
        for (p, r) in points {
            fog.reveal(p, r);
            for (old, new) in before.iter().zip(fog.alphas()) {
                assert!(new <= old);
            }
            before = fog.alphas().to_vec();
        }
    }

    #[test]
    fn out_of_range_is_a_no_op() {
        let mut fog = raster();
        assert!(!fog.reveal(Vec2::new(80.0, 0.0), 5.0));
        assert!(fog.alphas().iter().all(|&a| a == 0.9));
        assert!(fog.explored().is_empty());
    }

    #[test]
    fn disc_near_edge_is_clipped() {
        let mut fog = raster();
        assert!(fog.reveal(Vec2::new(-50.0, -50.0), 5.0));
        assert_eq!(fog.alpha_at(0, 0), Some(0.0));
        assert!(fog.revealed_fraction() > 0.0);
    }

    #[test]
    fn reset_restores_fog() {
        let mut fog = raster();
        fog.reveal(Vec2::ZERO, 10.0);
        assert!(fog.revealed_fraction() > 0.0);
        fog.reset();
        assert_eq!(fog.revealed_fraction(), 0.0);
        assert!(fog.explored().is_empty());
    }

    #[test]
    fn huge_radius_clears_everything() {
        let mut fog = raster();
        assert!(fog.reveal(Vec2::new(-50.0, -50.0), 1e30));
        assert!(fog.alphas().iter().all(|&a| a == 0.0));
        assert_eq!(fog.revealed_fraction(), 1.0);
    }
}
