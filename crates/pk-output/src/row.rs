//! Plain data row types written by output backends.

use pk_sim::{Session, Snapshot};
use pk_vehicle::Phase;

/// One active vehicle at a snapshot tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VehicleSnapshotRow {
    pub tick:            u64,
    pub vehicle:         u32,
    pub phase:           Phase,
    pub x:               f64,
    pub y:               f64,
    /// Assigned slot; `None` only for a vehicle that was never assigned.
    pub slot:            Option<(usize, usize)>,
    /// Seconds of dwell left; `Some` only while parked.
    pub remaining_dwell: Option<f64>,
}

impl VehicleSnapshotRow {
    /// One row per vehicle in `snapshot`, in vehicle-id order.
    pub fn from_snapshot(snapshot: &Snapshot) -> Vec<Self> {
        snapshot
            .vehicles
            .iter()
            .map(|v| Self {
                tick:            snapshot.tick.0,
                vehicle:         v.id.0,
                phase:           v.phase,
                x:               v.position.x,
                y:               v.position.y,
                slot:            v.slot.map(|s| (s.row, s.col)),
                remaining_dwell: v.remaining_dwell,
            })
            .collect()
    }
}

/// Summary statistics at the end of one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickSummaryRow {
    pub tick:              u64,
    /// Simulated seconds.
    pub time:              f64,
    pub occupancy_percent: f64,
    /// Assigned vehicles still in the lot.
    pub active:            u64,
    pub parked:            u64,
    pub failed:            u64,
    pub departed:          u64,
}

impl TickSummaryRow {
    pub fn from_session(session: &Session) -> Self {
        let m = session.metrics();
        Self {
            tick:              session.current_tick().0,
            time:              session.now(),
            occupancy_percent: session.grid().occupancy_percent(),
            active:            session.active_count() as u64,
            parked:            m.parked,
            failed:            m.failed,
            departed:          m.departed,
        }
    }
}
