//! Read-only per-tick snapshot consumed by rendering collaborators.
//!
//! The session builds a snapshot on demand and never depends on whether
//! anyone reads it.

use pk_core::{Point, Slot, Tick, VehicleId};
use pk_lot::Grid;
use pk_vehicle::Phase;

/// One active vehicle as a renderer sees it.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleView {
    pub id:              VehicleId,
    pub phase:           Phase,
    pub position:        Point,
    pub slot:            Option<Slot>,
    /// Dwell left in simulated seconds; `Some` only while parked.
    pub remaining_dwell: Option<f64>,
}

/// Grid occupancy plus every active vehicle at one tick.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Snapshot {
    pub tick:     Tick,
    pub time:     f64,
    pub grid:     Grid,
    /// The vehicle waiting for a slot, if any.  Not placed, so not drawn.
    pub pending:  Option<VehicleId>,
    /// Active vehicles in ascending id order.
    pub vehicles: Vec<VehicleView>,
}
