//! Error types for sizing and growth.

use thiserror::Error;

/// Failure to size or allocate the grid and frontier for a run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SizingError {
    /// The iteration count is beyond what the frontier index type can address.
    #[error("{iterations} iterations exceeds the maximum of {max}")]
    TooManyIterations { iterations: u32, max: u32 },

    /// `width * height` does not fit in `usize`.
    #[error("grid of {width}x{height} cells is not addressable")]
    CellCountOverflow { width: u32, height: u32 },

    /// The allocator refused the request.
    #[error("could not allocate {bytes} bytes")]
    AllocationFailed { bytes: usize },

    /// The frontier handed out by the allocator cannot hold the seed endpoints.
    #[error("frontier too small for the seed: {0}")]
    FrontierTooSmall(#[from] CapacityExceeded),

    /// Halving reached zero iterations and allocation still failed.
    #[error("no allocation succeeded for {requested} iterations, even after degrading to 0")]
    Exhausted {
        requested: u32,
        #[source]
        last: Box<SizingError>,
    },
}

/// The frontier was pushed while already full.
///
/// Capacity is derived so this cannot happen; observing it means the sizing
/// formula is wrong.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("frontier queue full at capacity {capacity}")]
pub struct CapacityExceeded {
    pub capacity: usize,
}

/// Failure while advancing generations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GrowthError {
    #[error("capacity invariant violated in generation {generation}: {source}")]
    CapacityInvariantViolated {
        generation: u32,
        #[source]
        source: CapacityExceeded,
    },
}

/// Any failure of a complete run.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Sizing(#[from] SizingError),
    #[error(transparent)]
    Growth(#[from] GrowthError),
}
