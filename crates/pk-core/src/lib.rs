//! `pk-core` — foundational types for the parking lot simulator.
//!
//! This crate is a dependency of every other `pk-*` crate.  It has no `pk-*`
//! dependencies and only `rand` and `thiserror` externally (plus optional
//! `serde`).
//!
//! # What lives here
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`ids`]      | `VehicleId`, `Slot`                                   |
//! | [`geo`]      | `Point` — planar lot coordinates                      |
//! | [`time`]     | `Tick`, `SimClock`                                    |
//! | [`rng`]      | `SimRng` — the single seedable randomness source      |
//! | [`config`]   | `LotConfig`, `DwellMean`, `Kinematics`                |
//! | [`error`]    | `PkError`, `PkResult`                                 |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{DwellMean, Kinematics, LotConfig};
pub use error::{PkError, PkResult};
pub use geo::Point;
pub use ids::{Slot, VehicleId};
pub use rng::SimRng;
pub use time::{SimClock, Tick};
