//! `pk-env` — the parking session exposed as a step/reset decision process.
//!
//! An external decision-maker drives [`ParkingEnv`] one assignment at a
//! time:
//!
//! ```text
//! state = env.reset()
//! loop:
//!   actions = env.available_actions()      // flat indices of free slots
//!   action  = policy.choose(state, actions)
//!   step    = env.step(action)             // assign, tick, spawn next
//!   if step.done: break
//! ```
//!
//! Each step is one simulated time unit.  Invalid actions are scored, never
//! fatal; stepping with no pending vehicle is a terminal no-op.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`env`]     | `Env` trait, `ParkingEnv`, `EnvConfig`, `Step`, `StepInfo` |
//! | [`encode`]  | state-vector encoding                                    |
//! | [`reward`]  | shaped reward for a successful assignment                |
//! | [`policy`]  | `Policy` trait, baseline policies, `PolicyDispatcher`    |
//! | [`episode`] | `run_episode`, `EpisodeSummary`                          |

pub mod encode;
pub mod env;
pub mod episode;
pub mod policy;
pub mod reward;

#[cfg(test)]
mod tests;

pub use encode::{encode_state, state_size};
pub use env::{Env, EnvConfig, ParkingEnv, Step, StepInfo};
pub use episode::{EpisodeSummary, run_episode};
pub use policy::{DeclinePolicy, NearestPolicy, Policy, PolicyDispatcher, RandomPolicy};
pub use reward::{INVALID_ACTION_PENALTY, shaped_reward};
