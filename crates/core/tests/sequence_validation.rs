//! Growth validated against the published toothpick sequence
//!
//! The total number of toothpicks after N generations is OEIS A139250(N + 1):
//! <https://oeis.org/A139250>

use toothpick_core::mask::REACHABLE_MASKS;
use toothpick_core::sizing::frontier_capacity;
use toothpick_core::{grow, Axis, GridDims, GrowthEngine, Mask};

/// A139250(1..=21)
const A139250: [u64; 21] = [
    1, 3, 7, 11, 15, 23, 35, 43, 47, 55, 67, 79, 95, 123, 155, 171, 175, 183, 195, 207, 223,
];

#[test]
fn test_toothpick_totals_match_a139250() {
    let engine = grow(20).unwrap();
    let totals: Vec<u64> = engine.stats().toothpick_totals().collect();
    assert_eq!(totals, A139250);
}

#[test]
fn test_each_run_length_matches_a139250() {
    for (n, &expected) in A139250.iter().enumerate() {
        let engine = grow(n as u32).unwrap();
        assert_eq!(engine.stats().toothpicks, expected, "N={n}");
    }
}

#[test]
fn test_zero_iterations_leaves_only_the_seed() {
    let engine = grow(0).unwrap();
    let grid = engine.grid();
    assert_eq!(grid.touched(), 3);

    let center = grid.dims().center();
    let width = grid.width() as usize;
    assert_eq!(grid.get(center), Mask::VERTICAL);
    assert_eq!(grid.get(center - width), Mask::DOWN);
    assert_eq!(grid.get(center + width), Mask::UP);
    assert!(grid.get(center - width).is_endpoint());
    assert!(grid.get(center + width).is_endpoint());
}

#[test]
fn test_one_iteration_grows_crossbars() {
    let engine = grow(1).unwrap();
    let cells: Vec<u8> = engine.grid().cells().iter().map(|m| m.bits()).collect();
    #[rustfmt::skip]
    let expected = vec![
        0b1000, 0b1110, 0b0100,
        0b0000, 0b0011, 0b0000,
        0b1000, 0b1101, 0b0100,
    ];
    assert_eq!(cells, expected);

    // the four outer tips are the next frontier
    let mut frontier: Vec<usize> = engine.frontier().collect();
    frontier.sort_unstable();
    assert_eq!(frontier, vec![0, 2, 6, 8]);
}

#[test]
fn test_only_reachable_masks_appear() {
    for n in 0..=96 {
        let engine = grow(n).unwrap();
        for (i, mask) in engine.grid().cells().iter().enumerate() {
            assert!(
                REACHABLE_MASKS.contains(&mask.bits()),
                "N={n}: cell {i} holds unreachable mask {mask}"
            );
        }
    }
}

#[test]
fn test_orientation_alternates_every_generation() {
    let mut engine = GrowthEngine::new(40).unwrap();
    let mut expected_axis = Axis::Horizontal;
    while !engine.is_finished() {
        let before: Vec<(usize, Mask)> = engine
            .frontier()
            .map(|pos| (pos, engine.grid().get(pos)))
            .collect();

        let tally = engine.step().unwrap();
        assert_eq!(tally.axis, Some(expected_axis), "generation {}", tally.generation);

        for &(pos, mask) in &before {
            if mask.is_endpoint() {
                assert_eq!(
                    engine.grid().get(pos),
                    mask | expected_axis.pair(),
                    "endpoint {pos} in generation {}",
                    tally.generation
                );
            }
        }
        for pos in engine.frontier() {
            let mask = engine.grid().get(pos);
            let other = expected_axis.perpendicular().pair();
            assert!(
                mask.bits() & other.bits() == 0,
                "new tip {pos} carries bits of the other axis: {mask}"
            );
        }
        expected_axis = expected_axis.perpendicular();
    }
}

#[test]
fn test_frontier_never_exceeds_derived_capacity() {
    let engine = grow(512).unwrap();
    let mut outstanding_before = 2;
    for tally in &engine.stats().history {
        // unread entries of this generation plus everything it pushed
        let bound = outstanding_before + tally.activated;
        let dims = GridDims::for_iterations(tally.generation).unwrap();
        let capacity = frontier_capacity(dims).unwrap();
        assert!(
            bound <= capacity,
            "generation {}: {} outstanding > capacity {}",
            tally.generation,
            bound,
            capacity
        );
        outstanding_before = tally.frontier;
    }
    assert!(engine.stats().peak_frontier <= engine.frontier_capacity());
}

#[test]
fn test_sized_grid_is_never_clipped() {
    for n in 0..=128 {
        let engine = grow(n).unwrap();
        assert_eq!(engine.stats().clipped, 0, "N={n} needed cells outside the grid");
    }
}
