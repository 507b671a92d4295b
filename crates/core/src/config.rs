//! Run configuration and the default iteration policy.

use crate::render::RenderOptions;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// Exclusive upper bound of the random iteration count used when none is given.
pub const DEFAULT_RANDOM_LIMIT: u32 = 16;

/// Everything a single run needs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunConfig {
    /// Generations to grow; `None` picks a random count.
    pub iterations: Option<u32>,
    pub render: RenderOptions,
}

impl RunConfig {
    /// The iteration count to run, drawing from `rng` when none was requested.
    pub fn resolve_iterations<R: Rng>(&self, rng: &mut R) -> u32 {
        resolve_iterations(self.iterations, rng)
    }
}

/// `requested`, or a random count in `0..DEFAULT_RANDOM_LIMIT`.
pub fn resolve_iterations<R: Rng>(requested: Option<u32>, rng: &mut R) -> u32 {
    requested.unwrap_or_else(|| rng.random_range(0..DEFAULT_RANDOM_LIMIT))
}
