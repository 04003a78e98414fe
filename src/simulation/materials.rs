//! Material identities and their palette.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::world::Rgba;

/// Color of untouched air cells.
pub const AIR_COLOR: Rgba = [245, 245, 245, 255];

/// Color of the seeded bottom floor.
pub const FLOOR_COLOR: Rgba = [76, 63, 47, 255];

/// The substances a cell can hold.
///
/// The set is closed on purpose: movement rules dispatch with a `match`,
/// so adding a material means adding its rule arm in the same change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    /// Empty space. The only thing most movement rules will swap into.
    Air,
    /// Falls straight or diagonally down, sinks through water.
    Sand,
    /// Rises straight, diagonally, or drifts sideways into air.
    Water,
    /// Immovable. Never moves and never yields its position.
    Wall,
}

impl Material {
    /// Palette color used when a brush creates cells of this material.
    pub const fn base_color(self) -> Rgba {
        match self {
            Material::Air => AIR_COLOR,
            Material::Sand => [194, 178, 128, 255],
            Material::Water => [64, 164, 223, 200],
            Material::Wall => [0, 0, 0, 255],
        }
    }
}

impl fmt::Display for Material {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Material::Air => "air",
            Material::Sand => "sand",
            Material::Water => "water",
            Material::Wall => "wall",
        };
        f.write_str(name)
    }
}
