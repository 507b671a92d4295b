//! Halve-and-retry sizing under simulated allocation failure

use toothpick_core::sizing::{frontier_capacity, SystemAllocator};
use toothpick_core::{
    Allocator, FrontierQueue, Grid, GridDims, GrowthEngine, SizingError, MAX_ITERATIONS,
};

/// Refuses requests whose grid plus frontier exceed a byte budget.
struct Budget {
    bytes: usize,
    requests: Vec<GridDims>,
}

impl Budget {
    fn new(bytes: usize) -> Self {
        Self {
            bytes,
            requests: Vec::new(),
        }
    }
}

impl Allocator for Budget {
    fn allocate(
        &mut self,
        dims: GridDims,
        capacity: usize,
    ) -> Result<(Grid, FrontierQueue), SizingError> {
        self.requests.push(dims);
        let bytes = capacity
            .saturating_mul(std::mem::size_of::<usize>())
            .saturating_add(dims.cell_count());
        if bytes > self.bytes {
            return Err(SizingError::AllocationFailed { bytes });
        }
        SystemAllocator.allocate(dims, capacity)
    }
}

fn bytes_for(iterations: u32) -> usize {
    let dims = GridDims::for_iterations(iterations).unwrap();
    dims.cell_count() + frontier_capacity(dims).unwrap() * std::mem::size_of::<usize>()
}

#[test]
fn test_degrades_by_halving() {
    let mut budget = Budget::new(bytes_for(25));
    let mut engine = GrowthEngine::with_allocator(100, &mut budget).unwrap();

    // 100 -> 50 -> 25
    let report = engine.sizing().clone();
    assert_eq!(report.requested, 100);
    assert_eq!(report.granted, 25);
    assert!(report.degraded());
    let tried: Vec<u32> = report.failures.iter().map(|f| f.iterations).collect();
    assert_eq!(tried, vec![100, 50]);
    assert_eq!(budget.requests.len(), 3);

    assert_eq!(engine.iterations(), 25);
    engine.run().unwrap();
    assert_eq!(engine.generation(), 25);
}

#[test]
fn test_degraded_dims_match_buffer() {
    for budget_n in [0, 1, 3, 8, 13, 40] {
        let mut budget = Budget::new(bytes_for(budget_n));
        let engine = GrowthEngine::with_allocator(200, &mut budget).unwrap();
        let dims = engine.dims();
        assert_eq!(
            dims,
            GridDims::for_iterations(engine.iterations()).unwrap(),
            "budget for N={budget_n}"
        );
        assert_eq!(engine.grid().cells().len(), dims.cell_count());
        assert_eq!(engine.sizing().dims, dims);
        assert_eq!(engine.sizing().frontier_capacity, engine.frontier_capacity());
        assert!(engine.iterations() <= budget_n);
    }
}

#[test]
fn test_no_memory_at_all_is_exhausted() {
    let mut budget = Budget::new(0);
    let err = GrowthEngine::with_allocator(9, &mut budget).unwrap_err();
    // 9 -> 4 -> 2 -> 1 -> 0
    assert_eq!(budget.requests.len(), 5);
    assert!(matches!(err, SizingError::Exhausted { requested: 9, .. }));
}

#[test]
fn test_unaddressable_request_degrades_without_allocating() {
    let mut budget = Budget::new(bytes_for(4));
    let engine = GrowthEngine::with_allocator(u32::MAX, &mut budget).unwrap();
    let first = &engine.sizing().failures[0];
    assert_eq!(first.iterations, u32::MAX);
    assert!(matches!(
        first.error,
        SizingError::TooManyIterations { max: MAX_ITERATIONS, .. }
    ));
    assert!(engine.iterations() <= 4);
}

#[test]
fn test_undegraded_run_reports_clean_sizing() {
    let engine = GrowthEngine::new(12).unwrap();
    assert!(!engine.sizing().degraded());
    assert!(engine.sizing().failures.is_empty());
    assert_eq!(engine.iterations(), 12);
}
