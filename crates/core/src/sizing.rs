//! Grid and frontier sizing with halve-and-retry degradation
//!
//! # Frontier capacity
//! A cell is pushed only when it goes from empty to non-empty, so every cell
//! enters the frontier at most once per run. Endpoints alternate between four
//! coordinate-parity classes relative to the center:
//!
//! ```text
//! seed (even, odd) -> (odd, odd) -> (odd, even) -> (even, even) -> (even, odd) -> ...
//! ```
//!
//! While a generation drains, the queue only holds unread entries of the
//! current class and fresh pushes of the next one. Consecutive classes share
//! one coordinate parity, so the outstanding entries are distinct cells within
//! half of the columns or half of the rows:
//!
//! ```text
//! capacity = max(ceil(w / 2) * h, w * ceil(h / 2))
//! ```
//!
//! # Degradation
//! When the grid or frontier cannot be obtained, the requested iteration count
//! is halved and sizing retried until it succeeds or the count is 0.

use crate::error::SizingError;
use crate::frontier::FrontierQueue;
use crate::grid::{Grid, GridDims};
use serde::Serialize;
use tracing::{debug, warn};

/// Highest iteration count the index type can address, minus a safety margin
/// of 3. Requests at or above it are refused.
pub const MAX_ITERATIONS: u32 = match 1u32.checked_shl(usize::BITS / 2) {
    Some(limit) => limit - 1 - 3,
    None => u32::MAX - 3,
};

/// Frontier capacity sufficient for any run on a grid of `dims`.
pub fn frontier_capacity(dims: GridDims) -> Result<usize, SizingError> {
    let w = dims.width as usize;
    let h = dims.height as usize;
    let by_columns = w.div_ceil(2).checked_mul(h);
    let by_rows = w.checked_mul(h.div_ceil(2));
    match (by_columns, by_rows) {
        (Some(a), Some(b)) => Ok(a.max(b)),
        _ => Err(SizingError::CellCountOverflow {
            width: dims.width,
            height: dims.height,
        }),
    }
}

/// Source of the grid and frontier storage.
///
/// Both buffers are returned together; if either cannot be obtained, neither
/// is kept.
pub trait Allocator {
    fn allocate(
        &mut self,
        dims: GridDims,
        capacity: usize,
    ) -> Result<(Grid, FrontierQueue), SizingError>;
}

/// Heap allocation through the global allocator, failing gracefully on
/// exhaustion.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemAllocator;

impl Allocator for SystemAllocator {
    fn allocate(
        &mut self,
        dims: GridDims,
        capacity: usize,
    ) -> Result<(Grid, FrontierQueue), SizingError> {
        let grid = Grid::try_new(dims)?;
        let frontier = FrontierQueue::try_with_capacity(capacity)?;
        Ok((grid, frontier))
    }
}

/// A sizing attempt that did not succeed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailedAttempt {
    pub iterations: u32,
    #[serde(serialize_with = "serialize_display")]
    pub error: SizingError,
}

fn serialize_display<S: serde::Serializer>(
    error: &SizingError,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(error)
}

/// How the requested iteration count was satisfied.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SizingReport {
    pub requested: u32,
    pub granted: u32,
    pub dims: GridDims,
    pub frontier_capacity: usize,
    pub failures: Vec<FailedAttempt>,
}

impl SizingReport {
    /// Whether the iteration count had to be reduced.
    #[must_use]
    pub fn degraded(&self) -> bool {
        self.granted != self.requested
    }
}

/// Buffers for a run, plus the report of how they were obtained.
#[derive(Debug)]
pub struct Allocation {
    pub grid: Grid,
    pub frontier: FrontierQueue,
    pub report: SizingReport,
}

/// Size and allocate for exactly `iterations`, with no retry.
pub fn size_for<A: Allocator + ?Sized>(
    iterations: u32,
    allocator: &mut A,
) -> Result<(Grid, FrontierQueue), SizingError> {
    if iterations >= MAX_ITERATIONS {
        return Err(SizingError::TooManyIterations {
            iterations,
            max: MAX_ITERATIONS,
        });
    }
    let dims = GridDims::for_iterations(iterations)?;
    let capacity = frontier_capacity(dims)?;
    debug!(
        "Sizing {} iterations: {}x{} grid, frontier capacity {}",
        iterations, dims.width, dims.height, capacity
    );
    allocator.allocate(dims, capacity)
}

/// Allocate for `requested` iterations, halving the count after each failure.
pub fn allocate<A: Allocator + ?Sized>(
    requested: u32,
    allocator: &mut A,
) -> Result<Allocation, SizingError> {
    let mut failures = Vec::new();
    let mut iterations = requested;
    loop {
        match size_for(iterations, allocator) {
            Ok((grid, frontier)) => {
                let report = SizingReport {
                    requested,
                    granted: iterations,
                    dims: grid.dims(),
                    frontier_capacity: frontier.capacity(),
                    failures,
                };
                return Ok(Allocation {
                    grid,
                    frontier,
                    report,
                });
            }
            Err(error) if iterations == 0 => {
                return Err(SizingError::Exhausted {
                    requested,
                    last: Box::new(error),
                });
            }
            Err(error) => {
                warn!(
                    "Couldn't allocate the field for {} iterations ({}), retrying for {}",
                    iterations,
                    error,
                    iterations >> 1
                );
                failures.push(FailedAttempt { iterations, error });
                iterations >>= 1;
            }
        }
    }
}
