//! Random choice used by the simulator

use rand::Rng;

/// Picks an index into a non-empty candidate list
pub trait Selector: Send + Sync {
    /// Returns a value in `0..len`. Never called with `len == 0`.
    fn pick(&self, len: usize) -> usize;
}

/// Uniform draw from the thread-local RNG
#[derive(Debug, Clone, Copy, Default)]
pub struct UniformSelector;

impl Selector for UniformSelector {
    fn pick(&self, len: usize) -> usize {
        rand::thread_rng().gen_range(0..len)
    }
}
