//! Engine configuration and RON preset loading.

use std::path::Path;

use anyhow::Context;
use serde::{Deserialize, Serialize};

use crate::simulation::Material;

/// Tunable simulation parameters.
///
/// Presets are RON files; fields missing from a preset fall back to the
/// defaults below, which mirror the classic 700x500 sandbox.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Grid width in cells.
    pub width: usize,
    /// Grid height in cells.
    pub height: usize,
    /// Update passes per rendered frame.
    pub passes_per_frame: u32,
    /// Radius of circle stamps, in cells.
    pub brush_radius: u32,
    /// Material selected at startup.
    pub brush_material: Material,
    /// Fixed RNG seed. `None` draws one from entropy.
    pub seed: Option<u64>,
    /// Seed a random-depth wall floor along the bottom edge.
    pub seed_floor: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            width: 700,
            height: 500,
            passes_per_frame: 2,
            brush_radius: 10,
            brush_material: Material::Sand,
            seed: None,
            seed_floor: true,
        }
    }
}

impl SimConfig {
    /// Loads a RON preset from `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Self =
            ron::from_str(&text).with_context(|| format!("parsing config {}", path.display()))?;
        config
            .validate()
            .with_context(|| format!("invalid config {}", path.display()))?;
        Ok(config)
    }

    /// Rejects parameter values the engine cannot run with.
    ///
    /// `load` calls this on every preset, so a bad file stays on the
    /// error path instead of faulting inside `Grid::new`.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!(
                "grid size must be nonzero, got {}x{}",
                self.width,
                self.height
            );
        }
        Ok(())
    }
}
