//! The `Session` struct: one grid, its vehicles, metrics, clock and RNG.

use std::collections::{BTreeMap, HashSet};

use pk_core::{Kinematics, LotConfig, Point, SimClock, SimRng, Slot, Tick, VehicleId};
use pk_lot::{Grid, LotLayout};
use pk_vehicle::{Phase, Vehicle};
use tracing::{debug, trace};

use crate::{
    ArrivalProcess, Dispatcher, Metrics, SessionObserver, SimError, SimResult, Snapshot,
    VehicleView,
};

// ── Outcomes ──────────────────────────────────────────────────────────────────

/// Why an assignment attempt was refused.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Rejection {
    /// No vehicle is waiting for a slot.
    NoPendingVehicle,
    /// The coordinate lies outside the grid.
    OutOfBounds,
    /// Another vehicle holds the slot.
    Occupied,
}

/// Result of [`Session::attempt_assign`].  Rejections are ordinary outcomes,
/// not errors: they are scored and the session carries on.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum AssignOutcome {
    Assigned { vehicle: VehicleId, slot: Slot, wait_time: f64 },
    Rejected(Rejection),
}

impl AssignOutcome {
    #[inline]
    pub fn is_assigned(&self) -> bool {
        matches!(self, AssignOutcome::Assigned { .. })
    }
}

/// What happened during one [`Session::tick`].
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TickReport {
    /// The tick the clock advanced to.
    pub tick:               Tick,
    /// Simulated seconds at `tick`.
    pub time:               f64,
    /// Vehicles that finished their dwell and started leaving.
    pub departures_started: usize,
    /// Vehicles that reached `Gone`; their slots are free again.
    pub removed:            Vec<VehicleId>,
}

// ── Session ───────────────────────────────────────────────────────────────────

/// A single parking episode.
///
/// The session exclusively owns its [`Grid`], [`Metrics`], every
/// [`Vehicle`], the clock and the RNG; nothing is shared between sessions.
/// The invariant it maintains: a slot is occupied iff exactly one live
/// vehicle holds it.
///
/// Create via [`SessionBuilder`][crate::SessionBuilder].
pub struct Session {
    pub(crate) config:   LotConfig,
    pub(crate) layout:   LotLayout,
    pub(crate) grid:     Grid,
    pub(crate) vehicles: BTreeMap<VehicleId, Vehicle>,
    /// The single vehicle awaiting a slot decision, if any.
    pub(crate) pending:  Option<Vehicle>,
    pub(crate) next_id:  VehicleId,
    pub(crate) clock:    SimClock,
    pub(crate) arrivals: ArrivalProcess,
    pub(crate) metrics:  Metrics,
    pub(crate) rng:      SimRng,
}

impl Session {
    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn config(&self) -> &LotConfig {
        &self.config
    }

    #[inline]
    pub fn layout(&self) -> &LotLayout {
        &self.layout
    }

    #[inline]
    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    #[inline]
    pub fn metrics(&self) -> &Metrics {
        &self.metrics
    }

    #[inline]
    pub fn clock(&self) -> &SimClock {
        &self.clock
    }

    /// Current simulated time in seconds.
    #[inline]
    pub fn now(&self) -> f64 {
        self.clock.now()
    }

    #[inline]
    pub fn current_tick(&self) -> Tick {
        self.clock.current_tick
    }

    /// The vehicle awaiting a slot decision.
    #[inline]
    pub fn pending(&self) -> Option<&Vehicle> {
        self.pending.as_ref()
    }

    /// Assigned, not yet gone vehicles in ascending id order.
    pub fn vehicles(&self) -> impl Iterator<Item = &Vehicle> + '_ {
        self.vehicles.values()
    }

    pub fn vehicle(&self, id: VehicleId) -> Option<&Vehicle> {
        self.vehicles.get(&id)
    }

    #[inline]
    pub fn active_count(&self) -> usize {
        self.vehicles.len()
    }

    /// Vehicles spawned so far, counted against `max_cars_per_episode`.
    #[inline]
    pub fn spawned(&self) -> u32 {
        self.arrivals.spawned()
    }

    /// `true` once the spawn cap has been reached.
    #[inline]
    pub fn is_exhausted(&self) -> bool {
        self.arrivals.is_exhausted()
    }

    /// `true` when nothing more can happen: cap reached, nobody pending and
    /// every vehicle has left.
    pub fn is_finished(&self) -> bool {
        self.is_exhausted() && self.pending.is_none() && self.vehicles.is_empty()
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Create the next pending vehicle, if the cap allows.
    ///
    /// A vehicle still pending from before is discarded (it balks).  Once
    /// the cap is reached this clears the pending slot and returns `None`.
    pub fn spawn_next(&mut self) -> Option<VehicleId> {
        if let Some(previous) = self.pending.take() {
            debug!(vehicle = %previous.id(), "pending vehicle replaced without a slot");
        }
        let dwell = self.arrivals.next_dwell(&mut self.rng)?;

        let id = self.next_id;
        self.next_id = id.next();
        let now = self.clock.now();
        debug!(vehicle = %id, time = now, dwell, "vehicle spawned");
        self.pending = Some(Vehicle::new(id, now, dwell));
        Some(id)
    }

    /// Feed one tick to the arrival timer and handle an arrival if a gap
    /// has elapsed.
    ///
    /// The timer keeps running whatever the lot's state.  An arrival that
    /// finds every slot occupied, or another vehicle already pending, is
    /// turned away: it counts against the cap and as a failure, and `None`
    /// is returned.
    pub fn poll_arrivals(&mut self) -> Option<VehicleId> {
        self.arrivals.accumulate(self.clock.tick_secs);
        if !self.arrivals.is_due() {
            return None;
        }
        self.arrivals.rearm(&mut self.rng);

        let lot_full = self.grid.occupied_count() == self.grid.slot_count();
        if lot_full || self.pending.is_some() {
            self.turn_away(if lot_full { "lot full" } else { "vehicle already pending" });
            return None;
        }
        self.spawn_next()
    }

    fn turn_away(&mut self, reason: &'static str) {
        if self.arrivals.next_dwell(&mut self.rng).is_none() {
            return;
        }
        let id = self.next_id;
        self.next_id = id.next();
        self.record_failure();
        debug!(vehicle = %id, time = self.clock.now(), reason, "arrival turned away");
    }

    // ── Assignment ────────────────────────────────────────────────────────

    /// Try to park the pending vehicle in `slot`.
    ///
    /// Rejected (and counted as a failure) when there is no pending vehicle,
    /// the slot lies outside the grid, or it is occupied; the pending vehicle
    /// is left untouched.  On success the slot is occupied, the vehicle
    /// starts approaching, and its wait time is recorded.
    pub fn attempt_assign(&mut self, slot: Slot) -> SimResult<AssignOutcome> {
        let rejection = if self.pending.is_none() {
            Some(Rejection::NoPendingVehicle)
        } else if !self.grid.contains(slot) {
            Some(Rejection::OutOfBounds)
        } else if !self.grid.is_free(slot) {
            Some(Rejection::Occupied)
        } else {
            None
        };
        if let Some(reason) = rejection {
            self.metrics.record_fail();
            debug!(%slot, ?reason, "assignment rejected");
            return Ok(AssignOutcome::Rejected(reason));
        }

        let Some(mut vehicle) = self.pending.take() else {
            return Err(SimError::Invariant("pending vehicle vanished during assignment".into()));
        };
        let now = self.clock.now();
        let inbound = inbound_route(self.config.kinematics, &self.layout, slot);
        vehicle.assign(slot, inbound, now)?;
        if matches!(self.config.kinematics, Kinematics::Instant) {
            vehicle.advance(f64::INFINITY, now);
        }
        self.grid.occupy(slot);

        let id = vehicle.id();
        let wait_time = vehicle.wait_time();
        self.metrics.record_park(wait_time);
        debug!(vehicle = %id, %slot, wait_time, "vehicle assigned");
        self.vehicles.insert(id, vehicle);

        Ok(AssignOutcome::Assigned { vehicle: id, slot, wait_time })
    }

    /// Count a failed decision that never reached the grid.
    pub fn record_failure(&mut self) {
        self.metrics.record_fail();
    }

    // ── Time ──────────────────────────────────────────────────────────────

    /// Advance one tick: departures, motion, removals.
    pub fn tick(&mut self) -> SimResult<TickReport> {
        self.clock.advance();
        let now = self.clock.now();
        let kinematics = self.config.kinematics;
        let speed = match kinematics {
            Kinematics::Instant => f64::INFINITY,
            Kinematics::Waypoints { speed } => speed,
        };

        let mut report = TickReport {
            tick: self.clock.current_tick,
            time: now,
            ..TickReport::default()
        };

        for (&id, vehicle) in self.vehicles.iter_mut() {
            if vehicle.phase() == Phase::Parked && vehicle.dwell_elapsed(now)? {
                let slot = vehicle.slot().ok_or_else(|| {
                    SimError::Invariant(format!("{id} is parked without a slot"))
                })?;
                vehicle.start_departure(outbound_route(kinematics, &self.layout, slot))?;
                report.departures_started += 1;
                debug!(vehicle = %id, %slot, time = now, "dwell elapsed, departing");
            }
            if vehicle.phase().is_moving() {
                vehicle.advance(speed, now);
            }
            if vehicle.phase() == Phase::Gone {
                report.removed.push(id);
            }
        }

        for id in &report.removed {
            let Some(vehicle) = self.vehicles.remove(id) else { continue };
            let slot = vehicle.slot().ok_or_else(|| {
                SimError::Invariant(format!("{id} left without ever holding a slot"))
            })?;
            self.grid.free(slot);
            self.metrics.record_departure();
            debug!(vehicle = %id, %slot, "vehicle removed");
        }

        #[cfg(debug_assertions)]
        self.check_invariants()?;

        trace!(
            tick = %report.tick,
            time = now,
            occupancy = self.grid.occupancy_percent(),
            active = self.vehicles.len(),
            "tick"
        );
        Ok(report)
    }

    // ── Free-running loop ─────────────────────────────────────────────────

    /// Run exactly `n` ticks of the free-running simulation.
    ///
    /// Each tick polls arrivals, lets `dispatcher` place the pending vehicle
    /// (only while free slots exist), advances the session, and calls the
    /// observer hooks.  A vehicle the dispatcher does not place stays
    /// pending and keeps accumulating wait time.
    pub fn run_ticks<D, O>(&mut self, n: u64, dispatcher: &mut D, observer: &mut O) -> SimResult<()>
    where
        D: Dispatcher + ?Sized,
        O: SessionObserver + ?Sized,
    {
        for _ in 0..n {
            self.run_one(dispatcher, observer)?;
        }
        Ok(())
    }

    /// Run until [`is_finished`](Self::is_finished) or `max_ticks` ticks have
    /// elapsed, then call `on_session_end`.  Returns the final tick.
    pub fn run<D, O>(&mut self, max_ticks: u64, dispatcher: &mut D, observer: &mut O) -> SimResult<Tick>
    where
        D: Dispatcher + ?Sized,
        O: SessionObserver + ?Sized,
    {
        let mut ran = 0;
        while ran < max_ticks && !self.is_finished() {
            self.run_one(dispatcher, observer)?;
            ran += 1;
        }
        observer.on_session_end(self.clock.current_tick, &self.metrics);
        Ok(self.clock.current_tick)
    }

    fn run_one<D, O>(&mut self, dispatcher: &mut D, observer: &mut O) -> SimResult<()>
    where
        D: Dispatcher + ?Sized,
        O: SessionObserver + ?Sized,
    {
        observer.on_tick_start(self.clock.current_tick);

        self.poll_arrivals();
        if self.pending.is_some() && self.grid.occupied_count() < self.grid.slot_count() {
            if let Some(slot) = dispatcher.choose(self) {
                self.attempt_assign(slot)?;
            }
        }

        let report = self.tick()?;
        observer.on_tick_end(&report, self);

        let interval = self.config.snapshot_interval_ticks;
        if interval > 0 && report.tick.0 % interval == 0 {
            observer.on_snapshot(&self.snapshot());
        }
        Ok(())
    }

    // ── Rendering contract ────────────────────────────────────────────────

    /// Read-only view of the grid and every active vehicle.
    pub fn snapshot(&self) -> Snapshot {
        let now = self.clock.now();
        Snapshot {
            tick:     self.clock.current_tick,
            time:     now,
            grid:     self.grid.clone(),
            pending:  self.pending.as_ref().map(Vehicle::id),
            vehicles: self
                .vehicles
                .values()
                .map(|v| VehicleView {
                    id:              v.id(),
                    phase:           v.phase(),
                    position:        v.position(),
                    slot:            v.slot(),
                    remaining_dwell: v.remaining_dwell(now),
                })
                .collect(),
        }
    }

    // ── Invariants ────────────────────────────────────────────────────────

    /// Verify that grid occupancy and vehicle slot bindings agree exactly.
    ///
    /// Runs after every tick in debug builds.  An `Err` here is a kernel
    /// defect.
    pub fn check_invariants(&self) -> SimResult<()> {
        let mut held = HashSet::with_capacity(self.vehicles.len());
        for vehicle in self.vehicles.values() {
            if !vehicle.phase().holds_slot() {
                return Err(SimError::Invariant(format!(
                    "{} is active while {}",
                    vehicle.id(),
                    vehicle.phase()
                )));
            }
            let Some(slot) = vehicle.slot() else {
                return Err(SimError::Invariant(format!("{} has no slot", vehicle.id())));
            };
            if !held.insert(slot) {
                return Err(SimError::Invariant(format!("slot {slot} is held twice")));
            }
            if self.grid.is_free(slot) {
                return Err(SimError::Invariant(format!(
                    "{} holds {slot} but the grid shows it free",
                    vehicle.id()
                )));
            }
        }
        if held.len() != self.grid.occupied_count() {
            return Err(SimError::Invariant(format!(
                "{} slots occupied but {} held by vehicles",
                self.grid.occupied_count(),
                held.len()
            )));
        }
        if let Some(p) = &self.pending {
            if p.phase() != Phase::Pending {
                return Err(SimError::Invariant(format!(
                    "pending {} is {}",
                    p.id(),
                    p.phase()
                )));
            }
        }
        Ok(())
    }
}

// ── Route helpers ─────────────────────────────────────────────────────────────

fn inbound_route(kinematics: Kinematics, layout: &LotLayout, slot: Slot) -> Vec<Point> {
    match kinematics {
        Kinematics::Instant => vec![layout.slot_center(slot)],
        Kinematics::Waypoints { .. } => layout.inbound_route(slot),
    }
}

fn outbound_route(kinematics: Kinematics, layout: &LotLayout, slot: Slot) -> Vec<Point> {
    match kinematics {
        Kinematics::Instant => vec![layout.entrance()],
        Kinematics::Waypoints { .. } => layout.outbound_route(slot),
    }
}
