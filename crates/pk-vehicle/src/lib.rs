//! `pk-vehicle` — per-vehicle lifecycle and motion.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`phase`]   | `Phase` — the closed lifecycle enumeration                |
//! | [`vehicle`] | `Vehicle` — state machine + waypoint-following position   |
//! | [`error`]   | `VehicleError`, `VehicleResult<T>`                        |
//!
//! # Lifecycle
//!
//! ```text
//! Pending ──assign──▶ Approaching ──last inbound waypoint──▶ Parked
//!                                                             │ dwell elapsed
//!                                                             ▼
//!                      Gone ◀──last outbound waypoint── Departing
//! ```
//!
//! Every other transition is rejected with
//! [`VehicleError::IllegalTransition`].  Motion is straight-line
//! interpolation at constant speed; vehicles never see each other.

pub mod error;
pub mod phase;
pub mod vehicle;


pub use error::{VehicleError, VehicleResult};
pub use phase::Phase;
pub use vehicle::Vehicle;
