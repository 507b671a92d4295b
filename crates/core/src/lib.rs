//! Toothpick Sequence Core Library
//!
//! Grows the toothpick sequence (OEIS A139250) on a bounded grid and renders the
//! result as a box-drawing mosaic.
//!
//! ## Model
//!
//! - Every cell stores a 4-bit direction mask ([`mask`])
//! - A fixed-capacity ring buffer holds the endpoints still to grow ([`frontier`])
//! - The engine drains exactly one generation of endpoints per step, alternating
//!   horizontal and vertical growth ([`engine`])
//! - Grid and frontier are sized from the iteration count, halving the count
//!   when memory is short ([`sizing`])
//!
//! ```
//! use toothpick_core::{grow, render, RenderOptions};
//!
//! let engine = grow(2).unwrap();
//! assert_eq!(engine.stats().toothpicks, 7);
//! let text = render(engine.grid(), RenderOptions::plain());
//! assert_eq!(text.lines().count(), 5);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod frontier;
pub mod grid;
pub mod mask;
pub mod render;
pub mod sizing;

pub use config::{resolve_iterations, RunConfig, DEFAULT_RANDOM_LIMIT};
pub use engine::{grow, GenerationStats, GrowthEngine, GrowthStats};
pub use error::{CapacityExceeded, Error, GrowthError, SizingError};
pub use frontier::FrontierQueue;
pub use grid::{Grid, GridDims};
pub use mask::{Axis, Direction, Mask};
pub use render::{render, write_mosaic, RenderOptions};
pub use sizing::{Allocator, SizingReport, SystemAllocator, MAX_ITERATIONS};
