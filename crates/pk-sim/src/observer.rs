//! Session observer trait for progress reporting and data collection.

use pk_core::Tick;

use crate::{Metrics, Session, Snapshot, TickReport};

/// Callbacks invoked by [`Session::run_ticks`] and [`Session::run`] at key
/// points in the tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SessionObserver {
    /// Called at the very start of each tick, before arrivals are polled.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the tick has been applied.  `session` reflects the state
    /// at the end of the tick.
    fn on_tick_end(&mut self, _report: &TickReport, _session: &Session) {}

    /// Called every `snapshot_interval_ticks` ticks with the rendering
    /// snapshot.
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    /// Called once when [`Session::run`] returns.
    fn on_session_end(&mut self, _final_tick: Tick, _metrics: &Metrics) {}
}

/// A [`SessionObserver`] that does nothing.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {}
