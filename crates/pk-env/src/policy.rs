//! Decision-maker contract and baseline policies.

use pk_core::{PkError, PkResult, SimRng, Slot};
use pk_sim::{Dispatcher, Session};

use crate::encode::encode_state;
use crate::env::DEFAULT_TIME_WINDOW;

/// Chooses an action given the current state and the actions available.
///
/// Returning `None` declines to act; drivers treat that as the end of the
/// episode.  Implementations that need randomness draw from `rng`, never
/// from global state.
pub trait Policy {
    fn choose(&mut self, state: &[f32], available: &[usize], rng: &mut SimRng) -> Option<usize>;
}

/// Uniform over the available actions.
#[derive(Copy, Clone, Debug, Default)]
pub struct RandomPolicy;

impl Policy for RandomPolicy {
    fn choose(&mut self, _state: &[f32], available: &[usize], rng: &mut SimRng) -> Option<usize> {
        rng.choose(available).copied()
    }
}

/// The available slot closest to the entrance: lowest column, then lowest
/// row.
#[derive(Copy, Clone, Debug)]
pub struct NearestPolicy {
    cols: usize,
}

impl NearestPolicy {
    /// For a lot `cols` slots wide.  Zero columns is rejected.
    pub fn new(cols: usize) -> PkResult<Self> {
        if cols == 0 {
            return Err(PkError::Config("nearest policy needs at least one column".into()));
        }
        Ok(Self { cols })
    }
}

impl Policy for NearestPolicy {
    fn choose(&mut self, _state: &[f32], available: &[usize], _rng: &mut SimRng) -> Option<usize> {
        available.iter().copied().min_by_key(|&a| (a % self.cols, a / self.cols))
    }
}

/// Never acts.
#[derive(Copy, Clone, Debug, Default)]
pub struct DeclinePolicy;

impl Policy for DeclinePolicy {
    fn choose(&mut self, _state: &[f32], _available: &[usize], _rng: &mut SimRng) -> Option<usize> {
        None
    }
}

// ── PolicyDispatcher ──────────────────────────────────────────────────────────

/// Lets a [`Policy`] place vehicles in the free-running simulation.
///
/// The session is encoded exactly as [`ParkingEnv`](crate::ParkingEnv)
/// encodes it, and the policy draws from its own `SimRng`.
pub struct PolicyDispatcher<P> {
    policy:      P,
    rng:         SimRng,
    time_window: f64,
}

impl<P: Policy> PolicyDispatcher<P> {
    pub fn new(policy: P, rng: SimRng) -> Self {
        Self { policy, rng, time_window: DEFAULT_TIME_WINDOW }
    }

    pub fn with_time_window(mut self, time_window: f64) -> Self {
        self.time_window = time_window;
        self
    }

    pub fn policy(&self) -> &P {
        &self.policy
    }

    pub fn into_inner(self) -> P {
        self.policy
    }
}

impl<P: Policy> Dispatcher for PolicyDispatcher<P> {
    fn choose(&mut self, session: &Session) -> Option<Slot> {
        let cols = session.grid().cols();
        let state = encode_state(session, self.time_window);
        let available: Vec<usize> =
            session.grid().free_slots().into_iter().map(|s| s.index(cols)).collect();
        self.policy
            .choose(&state, &available, &mut self.rng)
            .map(|action| Slot::from_index(action, cols))
    }
}
