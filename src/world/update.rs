//! The per-frame update pass and the material movement rules.
//!
//! One pass scans the grid bottom-up (row `height - 1` down to row 1,
//! columns left to right), so a faller moves at most one row per pass
//! while a riser can be re-examined after it moves. Row 0 is excluded as
//! a move source on purpose; it can still receive movers, and a cell
//! that rises into it stays there.

use crate::simulation::Material;
use crate::world::{Grid, SimRng};

/// Velocity added to every visited cell, each pass.
pub const GRAVITY: f32 = 1.0;

// The two mirrored horizontal candidate orders. A coin flip per rule
// invocation picks one, keeping piles and flows unbiased over time.
const ORIENTATIONS: [[i32; 3]; 2] = [[0, -1, 1], [0, 1, -1]];

/// Counters from one pass over the grid.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PassStats {
    /// Cells processed, i.e. not skipped by their `updated` flag.
    pub visited: u32,
    /// Swaps performed.
    pub moved: u32,
}

impl PassStats {
    /// Folds another pass's counters into this one.
    pub fn absorb(&mut self, other: PassStats) {
        self.visited += other.visited;
        self.moved += other.moved;
    }
}

/// Executes update passes over a [`Grid`].
pub struct UpdatePass;

impl UpdatePass {
    /// Runs one full pass and reports what it did.
    ///
    /// Every processed position is marked `updated`, movement or not.
    /// The mark lands on the *position*: a cell that swaps away carries
    /// its own cleared flag to the destination, which is what lets a
    /// second pass in the same frame move it again.
    pub fn run<R: SimRng>(grid: &mut Grid, rng: &mut R) -> PassStats {
        let mut stats = PassStats::default();
        let width = grid.width() as i32;
        let height = grid.height() as i32;
        for y in (1..height).rev() {
            for x in 0..width {
                let cell = grid.cell_mut(x as usize, y as usize);
                if cell.updated {
                    continue;
                }
                cell.velocity += GRAVITY;
                let material = cell.material;
                stats.visited += 1;

                let moved = match material {
                    Material::Sand => Self::update_sand(grid, x, y, rng),
                    Material::Water => Self::update_water(grid, x, y, rng),
                    Material::Air | Material::Wall => false,
                };
                if moved {
                    stats.moved += 1;
                }

                grid.cell_mut(x as usize, y as usize).updated = true;
            }
        }
        stats
    }

    /// Sand falls into the row below: straight first, then the diagonals
    /// in coin-flip order. A once-per-invocation draw decides whether
    /// water counts as enterable; only a 0 draw (1 in 255) leaves the
    /// grain resting on top of water instead of sinking through it.
    fn update_sand<R: SimRng>(grid: &mut Grid, x: i32, y: i32, rng: &mut R) -> bool {
        debug_assert_eq!(grid.cell(x as usize, y as usize).material, Material::Sand);

        let order = &ORIENTATIONS[usize::from(rng.coin_flip())];
        let water_attach = rng.below(255) != 0;

        for &dx in order {
            let material = match grid.get(x + dx, y + 1) {
                Ok(cell) => cell.material,
                Err(_) => continue,
            };
            let takes = match material {
                Material::Air => true,
                Material::Water => water_attach,
                _ => false,
            };
            if takes {
                grid.swap_cells(x, y, x + dx, y + 1);
                return true;
            }
        }
        false
    }

    /// Water rises: straight up, then the coin-chosen up-diagonal, then
    /// each horizontal direction. The candidate list slides a two-wide
    /// window along the orientation table per row offset, so the cell's
    /// own position is never a candidate. Only air is entered; water
    /// displaces nothing.
    fn update_water<R: SimRng>(grid: &mut Grid, x: i32, y: i32, rng: &mut R) -> bool {
        debug_assert_eq!(grid.cell(x as usize, y as usize).material, Material::Water);

        let order = &ORIENTATIONS[usize::from(rng.coin_flip())];

        for row_offset in [1i32, 0] {
            let shift = (1 - row_offset) as usize;
            for k in 0..2 {
                let dx = order[k + shift];
                let (nx, ny) = (x + dx, y - row_offset);
                match grid.get(nx, ny) {
                    Ok(cell) if cell.material == Material::Air => {
                        grid.swap_cells(x, y, nx, ny);
                        return true;
                    }
                    _ => {}
                }
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::{Cell, INITIAL_VELOCITY};

    /// Scripted generator with fixed draws, so rule directions are
    /// deterministic. `coin: false` tries left before right.
    struct TestRng {
        coin: bool,
        draw: u32,
    }

    impl SimRng for TestRng {
        fn coin_flip(&mut self) -> bool {
            self.coin
        }

        fn below(&mut self, bound: u32) -> u32 {
            self.draw.min(bound - 1)
        }
    }

    fn rng() -> TestRng {
        TestRng {
            coin: false,
            draw: 7,
        }
    }

    fn cell_of(material: Material) -> Cell {
        Cell::new(material, material.base_color())
    }

    #[test]
    fn sand_falls_straight_down() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 1, cell_of(Material::Sand));

        let stats = UpdatePass::run(&mut grid, &mut rng());

        assert_eq!(grid.get(2, 2).unwrap().material, Material::Sand);
        assert_eq!(grid.get(2, 1).unwrap().material, Material::Air);
        assert_eq!(stats.visited, 20);
        assert_eq!(stats.moved, 1);
    }

    #[test]
    fn sand_slides_to_the_coin_chosen_diagonal_when_blocked_below() {
        let mut left = Grid::new(3, 3);
        left.set(1, 1, cell_of(Material::Sand));
        left.set(1, 2, cell_of(Material::Wall));
        UpdatePass::run(&mut left, &mut TestRng { coin: false, draw: 7 });
        assert_eq!(left.get(0, 2).unwrap().material, Material::Sand);

        let mut right = Grid::new(3, 3);
        right.set(1, 1, cell_of(Material::Sand));
        right.set(1, 2, cell_of(Material::Wall));
        UpdatePass::run(&mut right, &mut TestRng { coin: true, draw: 7 });
        assert_eq!(right.get(2, 2).unwrap().material, Material::Sand);
    }

    #[test]
    fn fully_blocked_sand_stays_put() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, cell_of(Material::Sand));
        for x in 0..3 {
            grid.set(x, 2, cell_of(Material::Wall));
        }

        let stats = UpdatePass::run(&mut grid, &mut rng());

        let sand = grid.get(1, 1).unwrap();
        assert_eq!(sand.material, Material::Sand);
        assert_eq!(sand.velocity, INITIAL_VELOCITY + GRAVITY);
        assert!(sand.updated);
        assert_eq!(stats.moved, 0);
    }

    #[test]
    fn sand_sinks_through_water_on_a_nonzero_attach_draw() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, cell_of(Material::Sand));
        grid.set(1, 2, cell_of(Material::Water));
        for (x, y) in [(0, 1), (2, 1), (0, 2), (2, 2)] {
            grid.set(x, y, cell_of(Material::Wall));
        }

        UpdatePass::run(&mut grid, &mut TestRng { coin: false, draw: 7 });

        assert_eq!(grid.get(1, 2).unwrap().material, Material::Sand);
        assert_eq!(grid.get(1, 1).unwrap().material, Material::Water);
    }

    #[test]
    fn sand_rests_on_water_on_a_zero_attach_draw() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, cell_of(Material::Sand));
        grid.set(1, 2, cell_of(Material::Water));
        for (x, y) in [(0, 1), (2, 1), (0, 2), (2, 2)] {
            grid.set(x, y, cell_of(Material::Wall));
        }

        UpdatePass::run(&mut grid, &mut TestRng { coin: false, draw: 0 });

        assert_eq!(grid.get(1, 1).unwrap().material, Material::Sand);
        assert_eq!(grid.get(1, 2).unwrap().material, Material::Water);
    }

    #[test]
    fn candidates_outside_the_grid_are_skipped() {
        let mut grid = Grid::new(3, 3);
        grid.set(0, 1, cell_of(Material::Sand));
        grid.set(0, 2, cell_of(Material::Wall));
        grid.set(1, 2, cell_of(Material::Wall));

        // Left diagonal is off-grid, the rest is walled: the grain stays.
        UpdatePass::run(&mut grid, &mut TestRng { coin: false, draw: 7 });
        assert_eq!(grid.get(0, 1).unwrap().material, Material::Sand);
    }

    #[test]
    fn sand_on_the_bottom_row_stays() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 2, cell_of(Material::Sand));

        let stats = UpdatePass::run(&mut grid, &mut rng());

        assert_eq!(grid.get(1, 2).unwrap().material, Material::Sand);
        assert_eq!(stats.moved, 0);
    }

    #[test]
    fn water_rises_up_an_open_column_within_one_pass() {
        let mut grid = Grid::new(3, 4);
        grid.set(1, 2, cell_of(Material::Water));

        let stats = UpdatePass::run(&mut grid, &mut rng());

        // Risen to row 1, re-examined there, risen again into row 0.
        let water = grid.get(1, 0).unwrap();
        assert_eq!(water.material, Material::Water);
        assert_eq!(water.velocity, INITIAL_VELOCITY + 2.0 * GRAVITY);
        assert_eq!(grid.get(1, 1).unwrap().material, Material::Air);
        assert_eq!(grid.get(1, 2).unwrap().material, Material::Air);
        assert_eq!(stats.visited, 9);
        assert_eq!(stats.moved, 2);
    }

    #[test]
    fn water_in_the_top_row_is_frozen() {
        let mut grid = Grid::new(3, 4);
        grid.set(1, 2, cell_of(Material::Water));

        UpdatePass::run(&mut grid, &mut rng());
        assert_eq!(grid.get(1, 0).unwrap().material, Material::Water);

        grid.reset_updated_flags();
        let stats = UpdatePass::run(&mut grid, &mut rng());
        assert_eq!(grid.get(1, 0).unwrap().material, Material::Water);
        assert_eq!(stats.moved, 0);
    }

    #[test]
    fn water_takes_the_up_diagonal_when_straight_up_is_blocked() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 2, cell_of(Material::Water));
        grid.set(1, 1, cell_of(Material::Wall));
        for x in 0..3 {
            grid.set(x, 0, cell_of(Material::Wall));
        }

        UpdatePass::run(&mut grid, &mut TestRng { coin: false, draw: 7 });

        assert_eq!(grid.get(0, 1).unwrap().material, Material::Water);
        assert_eq!(grid.get(1, 2).unwrap().material, Material::Air);
    }

    #[test]
    fn water_drifts_sideways_when_everything_above_is_blocked() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 2, cell_of(Material::Water));
        for x in 0..3 {
            grid.set(x, 1, cell_of(Material::Wall));
        }

        UpdatePass::run(&mut grid, &mut TestRng { coin: false, draw: 7 });

        assert_eq!(grid.get(0, 2).unwrap().material, Material::Water);
        assert_eq!(grid.get(1, 2).unwrap().material, Material::Air);
    }

    #[test]
    fn rightward_water_can_swap_back_within_one_pass() {
        // Moving right lands the water on a column the scan has not
        // reached yet, so it is processed again and drifts back through
        // the air it just left. Net zero movement, two swaps.
        let mut grid = Grid::new(3, 3);
        grid.set(1, 2, cell_of(Material::Water));
        for x in 0..3 {
            grid.set(x, 1, cell_of(Material::Wall));
        }

        let stats = UpdatePass::run(&mut grid, &mut TestRng { coin: true, draw: 7 });

        let water = grid.get(1, 2).unwrap();
        assert_eq!(water.material, Material::Water);
        assert_eq!(water.velocity, INITIAL_VELOCITY + 2.0 * GRAVITY);
        assert_eq!(grid.get(2, 2).unwrap().material, Material::Air);
        assert_eq!(stats.moved, 2);
    }

    #[test]
    fn water_stays_out_of_sand() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, cell_of(Material::Sand));
        grid.set(1, 2, cell_of(Material::Water));
        for (x, y) in [(0, 1), (2, 1), (0, 2), (2, 2)] {
            grid.set(x, y, cell_of(Material::Wall));
        }

        // Attach draw of 0 keeps the sand from sinking, and water never
        // enters sand, so the stack is stable.
        UpdatePass::run(&mut grid, &mut TestRng { coin: false, draw: 0 });

        assert_eq!(grid.get(1, 1).unwrap().material, Material::Sand);
        assert_eq!(grid.get(1, 2).unwrap().material, Material::Water);
    }

    #[test]
    fn marked_cells_are_skipped_entirely() {
        let mut grid = Grid::new(5, 5);
        grid.set(2, 1, cell_of(Material::Sand));
        grid.get_mut(2, 1).unwrap().updated = true;

        let stats = UpdatePass::run(&mut grid, &mut rng());

        let sand = grid.get(2, 1).unwrap();
        assert_eq!(sand.material, Material::Sand);
        assert_eq!(sand.velocity, INITIAL_VELOCITY);
        assert_eq!(stats.visited, 19);
        assert_eq!(stats.moved, 0);
    }

    #[test]
    fn gravity_accrues_on_every_visited_cell() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 1, cell_of(Material::Wall));

        UpdatePass::run(&mut grid, &mut rng());

        // Rows 1 and 2 were visited, walls and air alike. Row 0 was not.
        assert_eq!(grid.get(1, 1).unwrap().velocity, INITIAL_VELOCITY + GRAVITY);
        assert_eq!(grid.get(0, 2).unwrap().velocity, INITIAL_VELOCITY + GRAVITY);
        assert_eq!(grid.get(0, 0).unwrap().velocity, INITIAL_VELOCITY);
    }

    #[test]
    fn sand_in_the_top_row_never_falls() {
        let mut grid = Grid::new(3, 3);
        grid.set(1, 0, cell_of(Material::Sand));

        UpdatePass::run(&mut grid, &mut rng());

        let sand = grid.get(1, 0).unwrap();
        assert_eq!(sand.material, Material::Sand);
        assert_eq!(sand.velocity, INITIAL_VELOCITY);
        assert!(!sand.updated);
    }

    #[test]
    fn back_to_back_passes_only_touch_movers() {
        let mut grid = Grid::new(3, 5);
        grid.set(1, 1, cell_of(Material::Sand));

        UpdatePass::run(&mut grid, &mut rng());
        let second = UpdatePass::run(&mut grid, &mut rng());

        // Without a flag reset in between, the second pass finds one
        // unmarked cell: the grain that moved, which falls once more.
        let sand = grid.get(1, 3).unwrap();
        assert_eq!(sand.material, Material::Sand);
        assert_eq!(sand.velocity, INITIAL_VELOCITY + 2.0 * GRAVITY);
        assert_eq!(grid.get(0, 4).unwrap().velocity, INITIAL_VELOCITY + GRAVITY);
        assert_eq!(second.visited, 1);
        assert_eq!(second.moved, 1);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;
        use rand::SeedableRng;
        use rand_xoshiro::Xoshiro256StarStar;

        fn arb_material() -> impl Strategy<Value = Material> {
            prop_oneof![
                Just(Material::Air),
                Just(Material::Sand),
                Just(Material::Water),
                Just(Material::Wall),
            ]
        }

        fn arb_grid(width: usize, height: usize) -> impl Strategy<Value = Grid> {
            proptest::collection::vec(arb_material(), width * height).prop_map(
                move |materials| {
                    let mut grid = Grid::new(width, height);
                    for (i, material) in materials.into_iter().enumerate() {
                        let x = (i % width) as i32;
                        let y = (i / width) as i32;
                        grid.set(x, y, Cell::new(material, material.base_color()));
                    }
                    grid
                },
            )
        }

        fn material_counts(grid: &Grid) -> [usize; 4] {
            [
                grid.count_material(Material::Air),
                grid.count_material(Material::Sand),
                grid.count_material(Material::Water),
                grid.count_material(Material::Wall),
            ]
        }

        proptest! {
            #[test]
            fn passes_conserve_the_material_multiset(
                mut grid in arb_grid(8, 8),
                seed in any::<u64>(),
            ) {
                let before = material_counts(&grid);
                let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
                UpdatePass::run(&mut grid, &mut rng);
                UpdatePass::run(&mut grid, &mut rng);
                prop_assert_eq!(before, material_counts(&grid));
            }

            #[test]
            fn grids_without_movers_never_rearrange(
                seed in any::<u64>(),
                walls in proptest::collection::vec(proptest::bool::ANY, 48),
            ) {
                let mut grid = Grid::new(8, 6);
                for (i, wall) in walls.into_iter().enumerate() {
                    if wall {
                        let x = (i % 8) as i32;
                        let y = (i / 8) as i32;
                        grid.set(x, y, Cell::new(Material::Wall, Material::Wall.base_color()));
                    }
                }

                let before: Vec<Material> =
                    grid.cells().iter().map(|cell| cell.material).collect();
                let mut rng = Xoshiro256StarStar::seed_from_u64(seed);
                UpdatePass::run(&mut grid, &mut rng);
                let after: Vec<Material> =
                    grid.cells().iter().map(|cell| cell.material).collect();
                prop_assert_eq!(before, after);
            }
        }
    }
}
