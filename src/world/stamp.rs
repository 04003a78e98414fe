//! Stamping: overwriting grid regions with fresh cells.
//!
//! Stamps come from the input boundary (brush strokes, image placement).
//! They overwrite whatever is there, clip silently at the borders, and
//! leave the `updated` flags of surrounding cells alone.

use glam::IVec2;

use crate::simulation::Material;
use crate::world::{Cell, Grid, Rgba, SimRng};

impl Grid {
    /// Stamps a filled circle of fresh `material` cells around `center`.
    ///
    /// A position is covered when its distance from the center, plus a
    /// random 0 or 1, stays under `radius`. The jitter roughens the rim
    /// so repeated strokes do not leave perfectly circular plateaus.
    pub fn stamp_circle<R: SimRng>(
        &mut self,
        center: IVec2,
        radius: u32,
        material: Material,
        color: Rgba,
        rng: &mut R,
    ) {
        let r = radius as i32;
        for y in (center.y - r)..(center.y + r) {
            for x in (center.x - r)..(center.x + r) {
                let dx = (x - center.x) as f32;
                let dy = (y - center.y) as f32;
                let dist = (dx * dx + dy * dy).sqrt();
                if dist + (rng.below(2) as f32) < radius as f32 {
                    self.set(x, y, Cell::new(material, color));
                }
            }
        }
    }

    /// Stamps a `width` x `height` block of fresh cells with its top-left
    /// corner at `origin`, one cell per entry of the row-major `colors`
    /// slice.
    ///
    /// Colors come from the caller (decoded image pixels); the material
    /// is uniform and chosen by the caller's active drawing mode, not
    /// derived from the colors.
    pub fn stamp_footprint(
        &mut self,
        origin: IVec2,
        width: u32,
        height: u32,
        colors: &[Rgba],
        material: Material,
    ) {
        if width == 0 {
            return;
        }
        let width = width as usize;
        let expected = width * height as usize;
        debug_assert_eq!(colors.len(), expected);
        for (i, &color) in colors.iter().take(expected).enumerate() {
            let dx = (i % width) as i32;
            let dy = (i / width) as i32;
            self.set(origin.x + dx, origin.y + dy, Cell::new(material, color));
        }
    }
}
