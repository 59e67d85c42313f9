//! Single-episode driver.

use pk_core::SimRng;

use crate::env::{Env, ParkingEnv};
use crate::policy::Policy;

/// Totals for one episode run by [`run_episode`].
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct EpisodeSummary {
    /// Sum of shaped step rewards.
    pub total_reward:      f64,
    pub steps:             u64,
    pub parked:            u64,
    pub failed:            u64,
    /// Occupancy percentage when the episode stopped.
    pub final_occupancy:   f64,
    pub success_rate:      f64,
}

/// Reset `env` and let `policy` act until the episode ends.
///
/// Stops when no slot is free, no vehicle is pending, the policy declines,
/// or a step reports `done`.  Every step either spawns the next vehicle or
/// ends the episode, so this terminates within `max_cars_per_episode` steps.
pub fn run_episode<P>(env: &mut ParkingEnv, policy: &mut P, rng: &mut SimRng) -> EpisodeSummary
where
    P: Policy + ?Sized,
{
    let mut state = env.reset();
    let mut summary = EpisodeSummary::default();

    loop {
        let available = env.available_actions();
        if available.is_empty() || !env.has_pending() {
            break;
        }
        let Some(action) = policy.choose(&state, &available, rng) else { break };

        let step = env.step(action);
        summary.total_reward += step.reward;
        summary.steps += 1;
        state = step.state;
        if step.done {
            break;
        }
    }

    if let Some(session) = env.session() {
        let m = session.metrics();
        summary.parked = m.parked;
        summary.failed = m.failed;
        summary.success_rate = m.success_rate();
        summary.final_occupancy = session.grid().occupancy_percent();
    }
    summary
}
