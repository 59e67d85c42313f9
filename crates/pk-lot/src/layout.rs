//! Lot geometry: where slots sit and how vehicles drive to them.
//!
//! # Coordinate system
//!
//! ```text
//!   x →
//! y  entry ┃ [0,0] [0,1] [0,2] …      ← row 0 lane runs through slot centres
//! ↓  road  ┃ [1,0] [1,1] [1,2] …
//!          ┃ …
//! ```
//!
//! A vertical entry road `entry_road_width` wide runs down the left edge.
//! Vehicles enter at the top of its centre line, drive down to their row's
//! lane, then along the lane to the slot centre.  Leaving retraces the same
//! route in reverse.

use pk_core::{Point, Slot};

/// Slot sizes and spacing, in lot units.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LotLayout {
    pub slot_size:        f64,
    pub margin:           f64,
    pub entry_road_width: f64,
}

impl Default for LotLayout {
    fn default() -> Self {
        Self { slot_size: 40.0, margin: 18.0, entry_road_width: 60.0 }
    }
}

impl LotLayout {
    /// Distance between neighbouring slot centres.
    #[inline]
    fn pitch(&self) -> f64 {
        self.slot_size + self.margin
    }

    /// Centre of `slot`.
    pub fn slot_center(&self, slot: Slot) -> Point {
        let half = self.slot_size / 2.0;
        Point::new(
            self.entry_road_width + slot.col as f64 * self.pitch() + half,
            slot.row as f64 * self.pitch() + half,
        )
    }

    /// Where vehicles enter and leave the lot.
    pub fn entrance(&self) -> Point {
        Point::new(self.entry_road_width / 2.0, 0.0)
    }

    /// Entrance → down the entry road to the row lane → along the lane to
    /// the slot centre.
    pub fn inbound_route(&self, slot: Slot) -> Vec<Point> {
        let center = self.slot_center(slot);
        let entrance = self.entrance();
        vec![entrance, Point::new(entrance.x, center.y), center]
    }

    /// The exact reverse of [`inbound_route`](Self::inbound_route).
    pub fn outbound_route(&self, slot: Slot) -> Vec<Point> {
        let mut route = self.inbound_route(slot);
        route.reverse();
        route
    }

    /// Total width and height of a `rows × cols` lot.
    pub fn extent(&self, rows: usize, cols: usize) -> (f64, f64) {
        (
            self.entry_road_width + cols as f64 * self.pitch(),
            rows as f64 * self.pitch(),
        )
    }
}
