//! # Regolith - falling-sand cellular automaton engine
//!
//! A fixed-size grid of material cells, updated once per rendered frame
//! under gravity-driven rules. The crate owns the data model, the pass
//! ordering, the material rules, and the stamping API; rendering and
//! input live outside and talk to [`simulation::Simulation`] through
//! stamps, frame steps, and color snapshots.

pub mod config;
pub mod headless;
pub mod simulation;
pub mod world;

/// Common imports for embedders and tests.
pub mod prelude {
    pub use crate::config::SimConfig;
    pub use crate::simulation::{Material, Simulation};
    pub use crate::world::{Cell, Grid, GridError, PassStats, Rgba, SimRng, UpdatePass};
    pub use glam::IVec2;
}
