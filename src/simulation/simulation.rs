//! The frame-level driver owning grid, RNG, and brush state.

use glam::IVec2;
use rand::SeedableRng;
use rand_xoshiro::Xoshiro256StarStar;

use crate::config::SimConfig;
use crate::simulation::Material;
use crate::world::{Grid, PassStats, Rgba, UpdatePass};

/// A complete falling-sand simulation: the grid, a seedable RNG, and the
/// active brush mode, advanced one rendered frame at a time.
pub struct Simulation {
    grid: Grid,
    rng: Xoshiro256StarStar,
    brush_material: Material,
    config: SimConfig,
}

impl Simulation {
    /// Builds a simulation from `config`: an all-air grid, an RNG from
    /// `config.seed` or fresh entropy, and optionally a seeded floor.
    pub fn new(config: SimConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random);
        let mut simulation = Self {
            grid: Grid::new(config.width, config.height),
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            brush_material: config.brush_material,
            config,
        };
        if simulation.config.seed_floor {
            simulation.grid.seed_floor(&mut simulation.rng);
        }
        log::info!(
            "Created {}x{} simulation (seed {}, {} passes per frame)",
            simulation.config.width,
            simulation.config.height,
            seed,
            simulation.config.passes_per_frame
        );
        simulation
    }

    /// Advances one rendered frame: clears all `updated` flags once, then
    /// runs the configured number of passes back to back.
    ///
    /// Flags are not cleared between the passes, so a second pass only
    /// touches cells that moved earlier in the same frame.
    pub fn step_frame(&mut self) -> PassStats {
        self.grid.reset_updated_flags();
        let mut frame = PassStats::default();
        for _ in 0..self.config.passes_per_frame {
            frame.absorb(UpdatePass::run(&mut self.grid, &mut self.rng));
        }
        log::trace!("frame: {} visited, {} moved", frame.visited, frame.moved);
        frame
    }

    /// Selects the material used by [`Simulation::paint`] and
    /// [`Simulation::place_footprint`].
    pub fn set_brush_material(&mut self, material: Material) {
        if material != self.brush_material {
            log::debug!("Brush material switched to {material}");
            self.brush_material = material;
        }
    }

    pub fn brush_material(&self) -> Material {
        self.brush_material
    }

    /// Stamps a brush circle of the active material at `center`, in the
    /// material's palette color and the configured radius.
    pub fn paint(&mut self, center: IVec2) {
        let material = self.brush_material;
        log::debug!("Painting {material} at ({}, {})", center.x, center.y);
        self.grid.stamp_circle(
            center,
            self.config.brush_radius,
            material,
            material.base_color(),
            &mut self.rng,
        );
    }

    /// Stamps a row-major color footprint of the active material with
    /// its top-left corner at `origin`.
    pub fn place_footprint(&mut self, origin: IVec2, width: u32, height: u32, colors: &[Rgba]) {
        self.grid
            .stamp_footprint(origin, width, height, colors, self.brush_material);
    }

    /// Row-major color copy for the render boundary, once per frame.
    pub fn snapshot_colors(&self) -> Vec<Rgba> {
        self.grid.snapshot_colors()
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }
}
