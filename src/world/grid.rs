//! Fixed-size cell storage.

use thiserror::Error;

use crate::simulation::{Material, FLOOR_COLOR};
use crate::world::{Cell, Rgba, SimRng};

/// Error from bounds-checked cell access.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// The position does not address a cell.
    #[error("position ({x}, {y}) is outside the {width}x{height} grid")]
    OutOfBounds {
        x: i32,
        y: i32,
        width: usize,
        height: usize,
    },
}

/// Row-major grid of cells, the single owner of all simulation state.
///
/// The extent is fixed at construction for the lifetime of the grid.
/// Coordinates are signed so callers can ask about the neighbors of
/// border cells; out-of-range positions just fail the bounds check.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl Grid {
    /// Creates an all-air grid. Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(width > 0 && height > 0, "grid extent must be nonzero");
        Self {
            width,
            height,
            cells: vec![Cell::AIR; width * height],
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// True when (x, y) addresses a cell.
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    fn out_of_bounds(&self, x: i32, y: i32) -> GridError {
        GridError::OutOfBounds {
            x,
            y,
            width: self.width,
            height: self.height,
        }
    }

    /// Bounds-checked read. Movement rules look up neighbor candidates
    /// with this and treat an error as "candidate not eligible".
    pub fn get(&self, x: i32, y: i32) -> Result<&Cell, GridError> {
        if self.in_bounds(x, y) {
            Ok(&self.cells[self.index(x as usize, y as usize)])
        } else {
            Err(self.out_of_bounds(x, y))
        }
    }

    /// Bounds-checked mutable access.
    pub fn get_mut(&mut self, x: i32, y: i32) -> Result<&mut Cell, GridError> {
        if self.in_bounds(x, y) {
            let idx = self.index(x as usize, y as usize);
            Ok(&mut self.cells[idx])
        } else {
            Err(self.out_of_bounds(x, y))
        }
    }

    /// Unconditional overwrite. Out-of-range writes are dropped silently,
    /// which is what stamping against a border expects.
    pub fn set(&mut self, x: i32, y: i32, cell: Cell) {
        if self.in_bounds(x, y) {
            let idx = self.index(x as usize, y as usize);
            self.cells[idx] = cell;
        }
    }

    // Direct access for the scan loop, which guarantees its coordinates.
    pub(crate) fn cell(&self, x: usize, y: usize) -> &Cell {
        debug_assert!(x < self.width && y < self.height);
        &self.cells[self.index(x, y)]
    }

    pub(crate) fn cell_mut(&mut self, x: usize, y: usize) -> &mut Cell {
        debug_assert!(x < self.width && y < self.height);
        let idx = self.index(x, y);
        &mut self.cells[idx]
    }

    /// Swaps two whole cell values. Material, age, velocity, color, and
    /// the `updated` flag all travel with the swap.
    pub fn swap_cells(&mut self, x1: i32, y1: i32, x2: i32, y2: i32) {
        if !self.in_bounds(x1, y1) || !self.in_bounds(x2, y2) {
            debug_assert!(false, "swap outside grid: ({x1}, {y1}) <-> ({x2}, {y2})");
            return;
        }
        let a = self.index(x1 as usize, y1 as usize);
        let b = self.index(x2 as usize, y2 as usize);
        self.cells.swap(a, b);
    }

    /// Clears every cell's `updated` flag. Runs once per rendered frame,
    /// before that frame's group of passes, never between passes.
    pub fn reset_updated_flags(&mut self) {
        for cell in &mut self.cells {
            cell.updated = false;
        }
    }

    /// Row-major copy of every cell's color for the render boundary.
    pub fn snapshot_colors(&self) -> Vec<Rgba> {
        self.cells.iter().map(|cell| cell.color).collect()
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Number of cells currently holding `material`.
    pub fn count_material(&self, material: Material) -> usize {
        self.cells
            .iter()
            .filter(|cell| cell.material == material)
            .count()
    }

    /// Overwrites the bottom of every column with wall cells, 2 to 6 deep
    /// depending on a per-column draw.
    pub fn seed_floor<R: SimRng>(&mut self, rng: &mut R) {
        for x in 0..self.width as i32 {
            let depth = rng.below(5) as usize + 1;
            let top = self.height.saturating_sub(depth + 1);
            for y in top..self.height {
                self.set(x, y as i32, Cell::new(Material::Wall, FLOOR_COLOR));
            }
        }
        log::debug!(
            "Seeded floor: {} wall cells",
            self.count_material(Material::Wall)
        );
    }
}
