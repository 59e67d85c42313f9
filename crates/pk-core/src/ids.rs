//! Strongly typed identifiers.
//!
//! `VehicleId` is `Copy + Ord + Hash` so it can key the session's ordered
//! vehicle map directly.  `Slot` is a `(row, col)` back-reference into grid
//! coordinates, never a handle into the grid itself.

use std::fmt;

/// Identity of one vehicle within a session.  Issued sequentially from 0.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleId(pub u32);

impl VehicleId {
    /// Cast to `usize`, e.g. for output rows.
    #[inline(always)]
    pub fn index(self) -> usize {
        self.0 as usize
    }

    /// The id issued after `self`.
    #[inline]
    pub fn next(self) -> VehicleId {
        VehicleId(self.0 + 1)
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "VehicleId({})", self.0)
    }
}

/// A parking slot coordinate.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Slot {
    pub row: usize,
    pub col: usize,
}

impl Slot {
    #[inline]
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Decode a flat row-major action index for a grid `cols` wide.
    ///
    /// Does not bounds-check the row; callers compare against `rows * cols`.
    #[inline]
    pub fn from_index(index: usize, cols: usize) -> Self {
        Self { row: index / cols, col: index % cols }
    }

    /// Flat row-major index `row * cols + col`.
    #[inline]
    pub fn index(self, cols: usize) -> usize {
        self.row * cols + self.col
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}
