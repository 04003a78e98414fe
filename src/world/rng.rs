//! RNG trait abstraction for the update rules and stamps.
//!
//! Lets the engine run on:
//! - a seeded Xoshiro256StarStar (reproducible simulations)
//! - scripted generators in rule tests

/// Random draws the engine needs.
pub trait SimRng {
    /// Fair coin flip. Picks between the two mirrored candidate orders.
    fn coin_flip(&mut self) -> bool;

    /// Uniform integer in `[0, bound)`. `bound` must be nonzero.
    fn below(&mut self, bound: u32) -> u32;
}

// Blanket implementation for any type implementing rand::Rng, so the
// simulation's own generator plugs in without a wrapper.
impl<T: ?Sized + rand::Rng> SimRng for T {
    fn coin_flip(&mut self) -> bool {
        self.random_bool(0.5)
    }

    fn below(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }
}
