//! Materials and the frame-level simulation driver.

mod materials;
#[allow(clippy::module_inception)]
mod simulation;

pub use materials::{Material, AIR_COLOR, FLOOR_COLOR};
pub use simulation::Simulation;
