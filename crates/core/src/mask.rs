//! Direction masks for toothpick cells
//!
//! Every grid cell stores a 4-bit mask. Each bit marks a stick segment leaving the
//! cell toward one of its four axis-aligned neighbors:
//!
//! | bit | value    | direction |
//! |-----|----------|-----------|
//! | 0   | `0b0001` | up        |
//! | 1   | `0b0010` | down      |
//! | 2   | `0b0100` | left      |
//! | 3   | `0b1000` | right     |
//!
//! A mask of 0 is an untouched cell, a single bit is a live endpoint, and two or
//! more bits is a saturated cell that no longer grows.
//!
//! # Usage
//! ```
//! use toothpick_core::mask::{Axis, Mask};
//!
//! let tip = Mask::DOWN;
//! assert!(tip.is_endpoint());
//! assert_eq!(Axis::for_endpoint(tip), Axis::Horizontal);
//!
//! let grown = tip | Axis::Horizontal.pair();
//! assert!(grown.is_saturated());
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{BitOr, BitOrAssign};

/// Number of distinct mask values (4 bits).
pub const MASK_VALUES: usize = 16;

/// Masks the growth rule can produce. The L-shaped pairs (up+left, up+right,
/// down+left, down+right) never appear.
pub const REACHABLE_MASKS: [u8; 12] = [0, 1, 2, 3, 4, 7, 8, 11, 12, 13, 14, 15];

/// 4-bit direction set stored in every grid cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[repr(transparent)]
pub struct Mask(u8);

impl Mask {
    /// Untouched cell
    pub const EMPTY: Mask = Mask(0);
    pub const UP: Mask = Mask(0b0001);
    pub const DOWN: Mask = Mask(0b0010);
    pub const LEFT: Mask = Mask(0b0100);
    pub const RIGHT: Mask = Mask(0b1000);

    /// Both vertical bits (`║`). This is also the seed value at the grid center.
    pub const VERTICAL: Mask = Mask(0b0011);
    /// Both horizontal bits (`═`)
    pub const HORIZONTAL: Mask = Mask(0b1100);

    const ALL_BITS: u8 = 0b1111;

    /// Wrap a raw value. Bits above the low nibble are dropped.
    #[inline]
    #[must_use]
    pub const fn from_bits(bits: u8) -> Self {
        Mask(bits & Self::ALL_BITS)
    }

    #[inline]
    #[must_use]
    pub const fn bits(self) -> u8 {
        self.0
    }

    #[inline]
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Exactly one bit set: the tip of a toothpick that may still grow.
    #[inline]
    #[must_use]
    pub const fn is_endpoint(self) -> bool {
        self.0 != 0 && self.0 & (self.0 - 1) == 0
    }

    /// Two or more bits set.
    #[inline]
    #[must_use]
    pub const fn is_saturated(self) -> bool {
        self.0 & self.0.wrapping_sub(1) != 0
    }

    #[inline]
    #[must_use]
    pub const fn has_vertical(self) -> bool {
        self.0 & Self::VERTICAL.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn has_horizontal(self) -> bool {
        self.0 & Self::HORIZONTAL.0 != 0
    }

    #[inline]
    #[must_use]
    pub const fn contains(self, other: Mask) -> bool {
        self.0 & other.0 == other.0
    }

    #[inline]
    #[must_use]
    pub const fn bit_count(self) -> u32 {
        self.0.count_ones()
    }

    /// Whether the growth rule can ever leave this value in a cell.
    #[must_use]
    pub fn is_reachable(self) -> bool {
        REACHABLE_MASKS.contains(&self.0)
    }

    /// Index into a 16-entry lookup table.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl BitOr for Mask {
    type Output = Mask;

    #[inline]
    fn bitor(self, rhs: Mask) -> Mask {
        Mask(self.0 | rhs.0)
    }
}

impl BitOrAssign for Mask {
    #[inline]
    fn bitor_assign(&mut self, rhs: Mask) {
        self.0 |= rhs.0;
    }
}

impl fmt::Display for Mask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04b}", self.0)
    }
}

// ============================================================================
// AXES
// ============================================================================

/// Growth orientation of a generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl Axis {
    /// Both direction bits along this axis.
    #[inline]
    #[must_use]
    pub const fn pair(self) -> Mask {
        match self {
            Axis::Horizontal => Mask::HORIZONTAL,
            Axis::Vertical => Mask::VERTICAL,
        }
    }

    #[inline]
    #[must_use]
    pub const fn perpendicular(self) -> Axis {
        match self {
            Axis::Horizontal => Axis::Vertical,
            Axis::Vertical => Axis::Horizontal,
        }
    }

    /// The two outward directions along this axis, each with the bit the
    /// neighbor receives pointing back at the grower.
    #[inline]
    #[must_use]
    pub const fn spokes(self) -> [(Direction, Mask); 2] {
        match self {
            Axis::Horizontal => [(Direction::Right, Mask::LEFT), (Direction::Left, Mask::RIGHT)],
            Axis::Vertical => [(Direction::Down, Mask::UP), (Direction::Up, Mask::DOWN)],
        }
    }

    /// Orientation an endpoint grows in: perpendicular to the segment it already
    /// carries. Any cell with a vertical bit grows horizontally.
    #[inline]
    #[must_use]
    pub const fn for_endpoint(mask: Mask) -> Axis {
        if mask.has_vertical() {
            Axis::Horizontal
        } else {
            Axis::Vertical
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::Horizontal => write!(f, "horizontal"),
            Axis::Vertical => write!(f, "vertical"),
        }
    }
}

/// Step from a cell to one of its four neighbors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// The mask bit for a segment leaving a cell in this direction.
    #[inline]
    #[must_use]
    pub const fn bit(self) -> Mask {
        match self {
            Direction::Up => Mask::UP,
            Direction::Down => Mask::DOWN,
            Direction::Left => Mask::LEFT,
            Direction::Right => Mask::RIGHT,
        }
    }

    #[inline]
    #[must_use]
    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }
}
