//! Dense row-major grid of direction masks
//!
//! The grid is sized once from the iteration count and never grows. All neighbor
//! lookups are bounds checked: a step off any edge yields `None` instead of
//! wrapping into the adjacent row.

use crate::error::SizingError;
use crate::mask::{Axis, Direction, Mask};
use serde::{Deserialize, Serialize};

/// Grid dimensions. Both are always odd so the center cell is unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridDims {
    pub width: u32,
    pub height: u32,
}

impl GridDims {
    /// Dimensions needed to grow `iterations` generations without ever
    /// touching the border:
    /// - `width = 1 + ((N + 1)` rounded down to even`)`
    /// - `height = 3 + (N` rounded down to even`)`
    pub fn for_iterations(iterations: u32) -> Result<Self, SizingError> {
        let n = u64::from(iterations);
        let width = 1 + ((n + 1) & !1);
        let height = 3 + (n & !1);
        let (Ok(width), Ok(height)) = (u32::try_from(width), u32::try_from(height)) else {
            return Err(SizingError::TooManyIterations {
                iterations,
                max: crate::sizing::MAX_ITERATIONS,
            });
        };
        let dims = GridDims { width, height };
        dims.checked_cell_count()
            .ok_or(SizingError::CellCountOverflow { width, height })?;
        Ok(dims)
    }

    /// `width * height`, or `None` if it does not fit in `usize`.
    #[must_use]
    pub fn checked_cell_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    /// Number of cells. Dimensions built by [`GridDims::for_iterations`] are
    /// known to fit.
    #[inline]
    #[must_use]
    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    #[inline]
    #[must_use]
    pub fn index(&self, col: u32, row: u32) -> usize {
        debug_assert!(col < self.width && row < self.height);
        row as usize * self.width as usize + col as usize
    }

    /// Inverse of [`GridDims::index`]: `(col, row)`.
    #[inline]
    #[must_use]
    pub fn coords(&self, index: usize) -> (u32, u32) {
        let w = self.width as usize;
        ((index % w) as u32, (index / w) as u32)
    }

    /// Linear index of the center cell.
    #[inline]
    #[must_use]
    pub fn center(&self) -> usize {
        self.index(self.width / 2, self.height / 2)
    }

    /// Neighbor one step away, or `None` when that step leaves the grid.
    #[inline]
    #[must_use]
    pub fn neighbor(&self, index: usize, dir: Direction) -> Option<usize> {
        let (col, row) = self.coords(index);
        let (col, row) = match dir {
            Direction::Up => (col, row.checked_sub(1)?),
            Direction::Down => (col, row + 1),
            Direction::Left => (col.checked_sub(1)?, row),
            Direction::Right => (col + 1, row),
        };
        (col < self.width && row < self.height).then(|| self.index(col, row))
    }
}

/// Outcome of growing one endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Extension {
    /// Previously untouched neighbors that became live endpoints.
    pub activated: [Option<usize>; 2],
    /// Neighbors that fell outside the grid and were not written.
    pub clipped: u32,
}

impl Extension {
    pub fn newly_active(&self) -> impl Iterator<Item = usize> + '_ {
        self.activated.iter().flatten().copied()
    }
}

/// Cell buffer of a single run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    dims: GridDims,
    cells: Vec<Mask>,
}

impl Grid {
    /// Zeroed grid. See [`Grid::try_new`] for the fallible path.
    #[must_use]
    pub fn new(dims: GridDims) -> Self {
        Self {
            dims,
            cells: vec![Mask::EMPTY; dims.cell_count()],
        }
    }

    /// Zeroed grid, reporting allocation failure instead of aborting.
    pub fn try_new(dims: GridDims) -> Result<Self, SizingError> {
        let len = dims
            .checked_cell_count()
            .ok_or(SizingError::CellCountOverflow {
                width: dims.width,
                height: dims.height,
            })?;
        let mut cells = Vec::new();
        cells
            .try_reserve_exact(len)
            .map_err(|_| SizingError::AllocationFailed { bytes: len })?;
        cells.resize(len, Mask::EMPTY);
        Ok(Self { dims, cells })
    }

    #[inline]
    #[must_use]
    pub fn dims(&self) -> GridDims {
        self.dims
    }

    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.dims.width
    }

    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.dims.height
    }

    #[inline]
    #[must_use]
    pub fn get(&self, index: usize) -> Mask {
        self.cells[index]
    }

    #[inline]
    #[must_use]
    pub fn get_xy(&self, col: u32, row: u32) -> Mask {
        self.cells[self.dims.index(col, row)]
    }

    /// Whole buffer in row-major order.
    #[inline]
    #[must_use]
    pub fn cells(&self) -> &[Mask] {
        &self.cells
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Mask]> {
        self.cells.chunks_exact(self.dims.width as usize)
    }

    /// Number of non-empty cells.
    #[must_use]
    pub fn touched(&self) -> usize {
        self.cells.iter().filter(|m| !m.is_empty()).count()
    }

    #[inline]
    pub(crate) fn set(&mut self, index: usize, mask: Mask) {
        self.cells[index] = mask;
    }

    /// Grow the endpoint at `index` along `axis`.
    ///
    /// The endpoint gains both bits of the axis. Each in-bounds neighbor along
    /// the axis receives the bit pointing back at it; neighbors that were empty
    /// before the write are returned as newly activated.
    pub fn extend(&mut self, index: usize, axis: Axis) -> Extension {
        self.cells[index] |= axis.pair();

        let mut ext = Extension::default();
        for (slot, (dir, incoming)) in axis.spokes().into_iter().enumerate() {
            let Some(n) = self.dims.neighbor(index, dir) else {
                ext.clipped += 1;
                continue;
            };
            let before = self.cells[n];
            self.cells[n] = before | incoming;
            if before.is_empty() {
                ext.activated[slot] = Some(n);
            }
        }
        ext
    }
}
