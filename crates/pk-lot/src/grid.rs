//! The occupancy grid.

use std::fmt;

use pk_core::Slot;

/// A fixed `rows × cols` matrix of occupancy bits, stored row-major.
///
/// `Grid` deliberately performs no validation: [`occupy`](Self::occupy) on an
/// occupied slot simply sets a bit that is already set.  The session checks
/// [`is_free`](Self::is_free) first.  Out-of-range coordinates panic on the
/// underlying index.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Grid {
    rows:  usize,
    cols:  usize,
    cells: Vec<bool>,
}

impl Grid {
    /// An all-free grid.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self { rows, cols, cells: vec![false; rows * cols] }
    }

    #[inline]
    pub fn rows(&self) -> usize {
        self.rows
    }

    #[inline]
    pub fn cols(&self) -> usize {
        self.cols
    }

    #[inline]
    pub fn slot_count(&self) -> usize {
        self.cells.len()
    }

    /// `true` if `slot` lies inside the grid.
    #[inline]
    pub fn contains(&self, slot: Slot) -> bool {
        slot.row < self.rows && slot.col < self.cols
    }

    #[inline]
    pub fn is_free(&self, slot: Slot) -> bool {
        !self.cells[slot.index(self.cols)]
    }

    /// Mark `slot` occupied.  Only valid when `is_free(slot)` holds.
    #[inline]
    pub fn occupy(&mut self, slot: Slot) {
        self.cells[slot.index(self.cols)] = true;
    }

    /// Mark `slot` free.  Idempotent.
    #[inline]
    pub fn free(&mut self, slot: Slot) {
        self.cells[slot.index(self.cols)] = false;
    }

    /// Every free slot in row-major order.
    pub fn free_slots(&self) -> Vec<Slot> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, occupied)| !**occupied)
            .map(|(i, _)| Slot::from_index(i, self.cols))
            .collect()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.iter().filter(|c| **c).count()
    }

    /// Occupied slots in `row`.
    pub fn row_occupancy(&self, row: usize) -> usize {
        self.cells[row * self.cols..(row + 1) * self.cols]
            .iter()
            .filter(|c| **c)
            .count()
    }

    /// Occupied share of all slots, in `[0, 100]`.
    pub fn occupancy_percent(&self) -> f64 {
        self.occupancy_fraction() * 100.0
    }

    /// Occupied share of all slots, in `[0, 1]`.
    pub fn occupancy_fraction(&self) -> f64 {
        if self.cells.is_empty() {
            return 0.0;
        }
        self.occupied_count() as f64 / self.cells.len() as f64
    }

    /// Raw row-major occupancy bits.
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }
}

/// One line per row, `■` for occupied and `□` for free.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.chunks(self.cols.max(1)) {
            for &occupied in row {
                f.write_str(if occupied { "■" } else { "□" })?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
