//! Toothpick growth automaton
//!
//! The engine owns the grid and the frontier queue. It is sized for a fixed
//! number of generations, seeded with the classic starting toothpick, and then
//! advanced one generation at a time.
//!
//! # Generation step
//! 1. Snapshot the frontier write cursor as the generation boundary.
//! 2. Pick the orientation from the cell at the read cursor: a cell carrying a
//!    vertical bit grows horizontally, otherwise vertically. Every endpoint
//!    pushed in a horizontal generation carries only horizontal bits (and the
//!    reverse), so the orientation alternates without a phase counter.
//! 3. Drain up to the boundary. Saturated cells are skipped; each live
//!    endpoint gains both bits of the axis and hands one incoming bit to each
//!    in-bounds neighbor along it. Neighbors that were empty join the frontier
//!    for the next generation.
//!
//! The result of a generation does not depend on the order its entries are
//! drained in: a neighbor touched twice ends up with the same bits either way,
//! and it is pushed exactly once.

use crate::error::{Error, GrowthError, SizingError};
use crate::frontier::FrontierQueue;
use crate::grid::{Grid, GridDims};
use crate::mask::{Axis, Mask};
use crate::sizing::{self, Allocator, SizingReport, SystemAllocator};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Counters for a single generation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationStats {
    /// 1-based generation number.
    pub generation: u32,
    /// Orientation grown in, `None` if the frontier was already empty.
    pub axis: Option<Axis>,
    /// Live endpoints that grew a toothpick.
    pub processed: usize,
    /// Entries that had saturated before being drained.
    pub skipped: usize,
    /// Newly activated endpoints pushed for the next generation.
    pub activated: usize,
    /// Neighbor writes dropped at the grid border.
    pub clipped: u32,
    /// Toothpicks placed so far, including the seed.
    pub toothpicks: u64,
    /// Frontier length when the generation finished.
    pub frontier: usize,
}

/// Run-level counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrowthStats {
    pub generations: u32,
    pub toothpicks: u64,
    pub peak_frontier: usize,
    pub clipped: u64,
    pub history: Vec<GenerationStats>,
}

impl GrowthStats {
    /// Toothpick totals after generation 0, 1, 2, ...
    pub fn toothpick_totals(&self) -> impl Iterator<Item = u64> + '_ {
        std::iter::once(1).chain(self.history.iter().map(|g| g.toothpicks))
    }
}

/// Grid, frontier and generation state of one run.
#[derive(Debug)]
pub struct GrowthEngine {
    grid: Grid,
    frontier: FrontierQueue,
    iterations: u32,
    generation: u32,
    sizing: SizingReport,
    stats: GrowthStats,
}

impl GrowthEngine {
    /// Engine for `iterations` generations using the global allocator.
    ///
    /// If the buffers cannot be allocated the count is halved until they can;
    /// check [`GrowthEngine::sizing`] for the granted count.
    pub fn new(iterations: u32) -> Result<Self, SizingError> {
        Self::with_allocator(iterations, &mut SystemAllocator)
    }

    /// Engine for `iterations` generations with buffers from `allocator`.
    pub fn with_allocator<A: Allocator + ?Sized>(
        iterations: u32,
        allocator: &mut A,
    ) -> Result<Self, SizingError> {
        let allocation = sizing::allocate(iterations, allocator)?;
        let mut engine = Self {
            grid: allocation.grid,
            frontier: allocation.frontier,
            iterations: allocation.report.granted,
            generation: 0,
            sizing: allocation.report,
            stats: GrowthStats {
                toothpicks: 1,
                ..GrowthStats::default()
            },
        };
        engine.seed()?;

        let dims = engine.grid.dims();
        info!(
            "Toothpick engine ready: {} iterations, {}x{} grid, frontier capacity {}",
            engine.iterations,
            dims.width,
            dims.height,
            engine.frontier.capacity()
        );
        Ok(engine)
    }

    /// Generation 0: a vertical toothpick through the center whose two ends
    /// are the initial frontier.
    fn seed(&mut self) -> Result<(), SizingError> {
        let dims = self.grid.dims();
        let center = dims.center();
        let (col, row) = dims.coords(center);
        let above = dims.index(col, row - 1);
        let below = dims.index(col, row + 1);

        self.grid.set(center, Mask::VERTICAL);
        self.grid.set(above, Mask::DOWN);
        self.grid.set(below, Mask::UP);
        self.frontier.push(below)?;
        self.frontier.push(above)?;
        self.stats.peak_frontier = self.frontier.len();
        Ok(())
    }

    /// Advance one generation.
    ///
    /// May be called past [`GrowthEngine::iterations`]; growth that reaches the
    /// border is clipped.
    pub fn step(&mut self) -> Result<GenerationStats, GrowthError> {
        let generation = self.generation + 1;
        let boundary = self.frontier.write_cursor();
        let mut tally = GenerationStats {
            generation,
            ..GenerationStats::default()
        };

        if let Some(front) = self.frontier.peek() {
            let axis = Axis::for_endpoint(self.grid.get(front));
            tally.axis = Some(axis);

            while let Some(pos) = self.frontier.pop_before(boundary) {
                let current = self.grid.get(pos);
                if current.is_saturated() {
                    tally.skipped += 1;
                    continue;
                }
                debug_assert_eq!(
                    Axis::for_endpoint(current),
                    axis,
                    "endpoint {pos} disagrees with generation orientation"
                );

                let ext = self.grid.extend(pos, axis);
                tally.processed += 1;
                tally.clipped += ext.clipped;
                for next in ext.newly_active() {
                    self.frontier.push(next).map_err(|source| {
                        GrowthError::CapacityInvariantViolated { generation, source }
                    })?;
                    tally.activated += 1;
                }
                self.stats.peak_frontier = self.stats.peak_frontier.max(self.frontier.len());
            }
        }

        self.generation = generation;
        self.stats.generations = generation;
        self.stats.toothpicks += tally.processed as u64;
        self.stats.clipped += u64::from(tally.clipped);
        tally.toothpicks = self.stats.toothpicks;
        tally.frontier = self.frontier.len();
        self.stats.history.push(tally);

        debug!(
            "Generation {}: axis={:?}, processed={}, skipped={}, activated={}, toothpicks={}",
            generation, tally.axis, tally.processed, tally.skipped, tally.activated, tally.toothpicks
        );
        Ok(tally)
    }

    /// Run the remaining generations up to [`GrowthEngine::iterations`].
    pub fn run(&mut self) -> Result<&GrowthStats, GrowthError> {
        while self.generation < self.iterations {
            self.step()?;
        }
        info!(
            "Grew {} toothpicks in {} generations (peak frontier {})",
            self.stats.toothpicks, self.generation, self.stats.peak_frontier
        );
        Ok(&self.stats)
    }

    #[inline]
    #[must_use]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    #[must_use]
    pub fn dims(&self) -> GridDims {
        self.grid.dims()
    }

    /// Generations this engine was sized for (after any degradation).
    #[inline]
    #[must_use]
    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    /// Generations completed so far.
    #[inline]
    #[must_use]
    pub fn generation(&self) -> u32 {
        self.generation
    }

    #[inline]
    #[must_use]
    pub fn is_finished(&self) -> bool {
        self.generation >= self.iterations
    }

    /// Pending frontier entries, oldest first.
    pub fn frontier(&self) -> impl Iterator<Item = usize> + '_ {
        self.frontier.pending()
    }

    #[inline]
    #[must_use]
    pub fn frontier_capacity(&self) -> usize {
        self.frontier.capacity()
    }

    #[inline]
    #[must_use]
    pub fn sizing(&self) -> &SizingReport {
        &self.sizing
    }

    #[inline]
    #[must_use]
    pub fn stats(&self) -> &GrowthStats {
        &self.stats
    }
}

/// Build an engine for `iterations` and run it to completion.
pub fn grow(iterations: u32) -> Result<GrowthEngine, Error> {
    let mut engine = GrowthEngine::new(iterations)?;
    engine.run()?;
    Ok(engine)
}
