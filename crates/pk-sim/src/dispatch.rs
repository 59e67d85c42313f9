//! The slot-choice seam used by the free-running loop.

use pk_core::Slot;

use crate::Session;

/// Chooses a slot for the session's pending vehicle.
///
/// Called by [`Session::run_ticks`] once per tick while a vehicle is pending
/// and at least one slot is free.  Returning `None` leaves the vehicle
/// pending.  Returning an occupied slot is allowed; the session rejects it
/// and counts a failure.
///
/// # Example: first free slot
///
/// ```rust,ignore
/// struct FirstFree;
///
/// impl Dispatcher for FirstFree {
///     fn choose(&mut self, session: &Session) -> Option<Slot> {
///         session.grid().free_slots().first().copied()
///     }
/// }
/// ```
pub trait Dispatcher {
    fn choose(&mut self, session: &Session) -> Option<Slot>;
}

/// A [`Dispatcher`] that never places anyone.  Arrivals pile up as one
/// pending vehicle; useful in tests of the arrival process.
pub struct IdleDispatcher;

impl Dispatcher for IdleDispatcher {
    fn choose(&mut self, _session: &Session) -> Option<Slot> {
        None
    }
}
