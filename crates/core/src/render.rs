//! Box-drawing mosaic of a finished grid
//!
//! Each cell becomes one glyph chosen by its mask. Cells can be stretched
//! horizontally and vertically so toothpicks read as long lines:
//!
//! ```text
//! h_scale = 3, v_scale = 1          h_scale = 0, v_scale = 0
//!
//! ╞═══╦═══╡                         ╞╦╡
//!     ║                              ║
//!     ║                             ╞╩╡
//!     ║
//! ╞═══╩═══╡
//! ```
//!
//! Only the mask values the growth rule can produce have a box glyph; the
//! L-shaped combinations render as [`PLACEHOLDER`].

use crate::grid::Grid;
use crate::mask::{Mask, MASK_VALUES};
use serde::{Deserialize, Serialize};
use std::io::{self, Write};

/// Glyph for masks that never occur in a valid pattern.
pub const PLACEHOLDER: &str = "!";

/// Glyph per mask value, indexed by [`Mask::index`].
pub const GLYPHS: [&str; MASK_VALUES] = [
    " ", "╨", "╥", "║", //
    "╡", PLACEHOLDER, PLACEHOLDER, "╣", //
    "╞", PLACEHOLDER, PLACEHOLDER, "╠", //
    "═", "╩", "╦", "╬",
];

const HORIZONTAL_FILL: &str = GLYPHS[Mask::HORIZONTAL.index()];
const VERTICAL_FILL: &str = GLYPHS[Mask::VERTICAL.index()];

/// Replication factors for the mosaic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOptions {
    /// Connector glyphs inserted between adjacent columns.
    pub h_scale: u32,
    /// Filler rows inserted between adjacent rows.
    pub v_scale: u32,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            h_scale: 3,
            v_scale: 1,
        }
    }
}

impl RenderOptions {
    /// One glyph per cell, no filler.
    #[must_use]
    pub const fn plain() -> Self {
        Self {
            h_scale: 0,
            v_scale: 0,
        }
    }
}

#[inline]
#[must_use]
pub fn glyph(mask: Mask) -> &'static str {
    GLYPHS[mask.index()]
}

/// Build the mosaic line for one grid row, and the filler line drawn below it.
fn fill_row(row: &[Mask], opts: RenderOptions, line: &mut String, filler: &mut String) {
    line.clear();
    filler.clear();
    let last = row.len().saturating_sub(1);
    for (col, &mask) in row.iter().enumerate() {
        line.push_str(glyph(mask));
        filler.push_str(if mask.contains(Mask::DOWN) {
            VERTICAL_FILL
        } else {
            " "
        });
        if col == last {
            continue;
        }
        let connector = if mask.contains(Mask::RIGHT) {
            HORIZONTAL_FILL
        } else {
            " "
        };
        for _ in 0..opts.h_scale {
            line.push_str(connector);
            filler.push(' ');
        }
    }
}

/// Write the mosaic to `out`, one line per row plus filler lines.
pub fn write_mosaic<W: Write>(grid: &Grid, opts: RenderOptions, mut out: W) -> io::Result<()> {
    let mut line = String::new();
    let mut filler = String::new();
    let height = grid.height() as usize;
    for (i, row) in grid.rows().enumerate() {
        fill_row(row, opts, &mut line, &mut filler);
        writeln!(out, "{line}")?;
        if i + 1 < height {
            for _ in 0..opts.v_scale {
                writeln!(out, "{filler}")?;
            }
        }
    }
    out.flush()
}

/// Render the mosaic into a string.
#[must_use]
pub fn render(grid: &Grid, opts: RenderOptions) -> String {
    let mut text = String::new();
    let mut line = String::new();
    let mut filler = String::new();
    let height = grid.height() as usize;
    for (i, row) in grid.rows().enumerate() {
        fill_row(row, opts, &mut line, &mut filler);
        text.push_str(&line);
        text.push('\n');
        if i + 1 < height {
            for _ in 0..opts.v_scale {
                text.push_str(&filler);
                text.push('\n');
            }
        }
    }
    text
}
