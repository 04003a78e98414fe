//! The per-position cell value.

use crate::simulation::{Material, AIR_COLOR};

/// RGBA color bytes, as stored per cell and handed to the render boundary.
pub type Rgba = [u8; 4];

/// Velocity assigned to freshly created cells.
pub const INITIAL_VELOCITY: f32 = 1.0;

/// One grid position's worth of state.
///
/// Moves exchange whole `Cell` values, so every field travels together,
/// including the per-frame `updated` marker.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Substance occupying this position.
    pub material: Material,
    /// Age counter. Reserved: no current rule reads or advances it.
    pub age: u32,
    /// Accumulated gravity. Grows on every visit; no rule consumes it.
    pub velocity: f32,
    /// Render color, fixed at creation.
    pub color: Rgba,
    /// Set once a pass has processed this position this frame.
    pub updated: bool,
}

impl Cell {
    /// An untouched air cell.
    pub const AIR: Self = Self::new(Material::Air, AIR_COLOR);

    /// A fresh cell at the creation baseline.
    pub const fn new(material: Material, color: Rgba) -> Self {
        Self {
            material,
            age: 0,
            velocity: INITIAL_VELOCITY,
            color,
            updated: false,
        }
    }
}
