//! The `Vehicle` state machine.

use pk_core::{Point, Slot, VehicleId};

use crate::{Phase, VehicleError, VehicleResult};

/// One vehicle's lifecycle, slot binding, and position.
///
/// All times are simulated seconds.  The assigned slot is set exactly once,
/// by [`assign`](Self::assign), and never changes afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct Vehicle {
    id:           VehicleId,
    arrival_time: f64,
    dwell:        f64,
    slot:         Option<Slot>,
    position:     Point,
    path:         Vec<Point>,
    cursor:       usize,
    phase:        Phase,
    wait_time:    f64,
    park_start:   Option<f64>,
}

impl Vehicle {
    /// A freshly arrived vehicle, `Pending` and unplaced.
    pub fn new(id: VehicleId, arrival_time: f64, dwell: f64) -> Self {
        Self {
            id,
            arrival_time,
            dwell,
            slot:       None,
            position:   Point::default(),
            path:       Vec::new(),
            cursor:     0,
            phase:      Phase::Pending,
            wait_time:  0.0,
            park_start: None,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn id(&self) -> VehicleId {
        self.id
    }

    #[inline]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    #[inline]
    pub fn slot(&self) -> Option<Slot> {
        self.slot
    }

    #[inline]
    pub fn position(&self) -> Point {
        self.position
    }

    #[inline]
    pub fn arrival_time(&self) -> f64 {
        self.arrival_time
    }

    /// Intended dwell duration.
    #[inline]
    pub fn dwell(&self) -> f64 {
        self.dwell
    }

    /// Time between arrival and slot assignment.  Zero until assigned.
    #[inline]
    pub fn wait_time(&self) -> f64 {
        self.wait_time
    }

    #[inline]
    pub fn park_start(&self) -> Option<f64> {
        self.park_start
    }

    /// The waypoints currently being followed and the index of the one last
    /// reached.
    pub fn path(&self) -> (&[Point], usize) {
        (&self.path, self.cursor)
    }

    /// Dwell left at `now`, clamped at zero.  `None` unless `Parked`.
    pub fn remaining_dwell(&self, now: f64) -> Option<f64> {
        match (self.phase, self.park_start) {
            (Phase::Parked, Some(start)) => Some((start + self.dwell - now).max(0.0)),
            _ => None,
        }
    }

    // ── Transitions ───────────────────────────────────────────────────────

    /// Install `waypoints`, reset the cursor, and snap to the first point.
    ///
    /// Does not change the phase.
    pub fn assign_path(&mut self, waypoints: Vec<Point>) -> VehicleResult<()> {
        let Some(&first) = waypoints.first() else {
            return Err(VehicleError::EmptyPath(self.id));
        };
        self.path = waypoints;
        self.cursor = 0;
        self.position = first;
        Ok(())
    }

    /// `Pending → Approaching`: bind `slot` and start following `inbound`.
    ///
    /// Records the wait time as `now - arrival_time`.
    pub fn assign(&mut self, slot: Slot, inbound: Vec<Point>, now: f64) -> VehicleResult<()> {
        self.require(Phase::Pending, "assign a slot")?;
        self.assign_path(inbound)?;
        self.slot = Some(slot);
        self.wait_time = (now - self.arrival_time).max(0.0);
        self.phase = Phase::Approaching;
        Ok(())
    }

    /// Move towards the next waypoint by at most `speed` units.
    ///
    /// A waypoint closer than `speed` is snapped to exactly and the cursor
    /// moves on, so vehicles never overshoot.  Reaching the final waypoint
    /// completes the current leg: `Approaching → Parked` (recording
    /// `park_start = now`) or `Departing → Gone`.
    ///
    /// Returns `true` while there is further motion to do.
    pub fn advance(&mut self, speed: f64, now: f64) -> bool {
        if !self.phase.is_moving() {
            return false;
        }
        let Some(&target) = self.path.get(self.cursor + 1) else {
            self.finish_leg(now);
            return false;
        };

        let remaining = self.position.distance(target);
        if remaining < speed {
            self.position = target;
            self.cursor += 1;
            if self.cursor + 1 == self.path.len() {
                self.finish_leg(now);
                return false;
            }
        } else {
            self.position = self.position.step_towards(target, speed);
        }
        true
    }

    /// `true` once `now >= park_start + dwell`.  Only legal while `Parked`.
    pub fn dwell_elapsed(&self, now: f64) -> VehicleResult<bool> {
        self.require(Phase::Parked, "check dwell")?;
        let start = self.park_start.unwrap_or(self.arrival_time);
        Ok(now >= start + self.dwell)
    }

    /// `Parked → Departing`: start following `outbound`.
    pub fn start_departure(&mut self, outbound: Vec<Point>) -> VehicleResult<()> {
        self.require(Phase::Parked, "start departure")?;
        self.assign_path(outbound)?;
        self.phase = Phase::Departing;
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    fn finish_leg(&mut self, now: f64) {
        match self.phase {
            Phase::Approaching => {
                self.phase = Phase::Parked;
                self.park_start = Some(now);
            }
            Phase::Departing => self.phase = Phase::Gone,
            _ => {}
        }
    }

    fn require(&self, expected: Phase, op: &'static str) -> VehicleResult<()> {
        if self.phase == expected {
            Ok(())
        } else {
            Err(VehicleError::IllegalTransition { vehicle: self.id, phase: self.phase, op })
        }
    }
}
