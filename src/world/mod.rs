//! Grid storage, stamping, and the per-pass update machinery.

mod cell;
mod grid;
mod rng;
mod stamp;
mod update;

pub use cell::{Cell, Rgba, INITIAL_VELOCITY};
pub use grid::{Grid, GridError};
pub use rng::SimRng;
pub use update::{PassStats, UpdatePass, GRAVITY};
