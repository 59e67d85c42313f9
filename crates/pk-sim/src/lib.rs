//! `pk-sim` — the parking session orchestrator.
//!
//! # Tick loop
//!
//! ```text
//! for each tick:
//!   ① Arrivals  — feed the tick to the arrival timer; if a gap has elapsed,
//!                 spawn a pending vehicle (up to the cap), or turn the
//!                 arrival away as a failure if the lot is full or another
//!                 vehicle is already pending.
//!   ② Dispatch  — a Dispatcher picks a slot for the pending vehicle;
//!                 Session::attempt_assign validates it against the Grid.
//!   ③ Tick      — advance the clock; parked vehicles whose dwell elapsed
//!                 start departing; every moving vehicle advances; vehicles
//!                 that reach Gone free their slot and are removed.
//!   ④ Observe   — observer hooks and, at the snapshot interval, a
//!                 read-only Snapshot for rendering collaborators.
//! ```
//!
//! The decision-process wrapper in `pk-env` drives ② and ③ itself (one
//! assignment per step) and spawns directly instead of through ①.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                  |
//! |--------------|-----------------------------------------------------------|
//! | [`session`]  | `Session`, `AssignOutcome`, `Rejection`, `TickReport`     |
//! | [`builder`]  | `SessionBuilder`                                          |
//! | [`arrivals`] | `ArrivalProcess` — exponential gaps, dwell draws, cap     |
//! | [`metrics`]  | `Metrics` — running counters                              |
//! | [`snapshot`] | `Snapshot`, `VehicleView` — the rendering contract        |
//! | [`dispatch`] | `Dispatcher` trait, `IdleDispatcher`                      |
//! | [`observer`] | `SessionObserver` trait, `NoopObserver`                   |
//! | [`error`]    | `SimError`, `SimResult<T>`                                |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use pk_core::LotConfig;
//! use pk_sim::{IdleDispatcher, NoopObserver, SessionBuilder};
//!
//! let mut session = SessionBuilder::new(LotConfig::default()).build()?;
//! session.run_ticks(300, &mut IdleDispatcher, &mut NoopObserver)?;
//! ```

pub mod arrivals;
pub mod builder;
pub mod dispatch;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod session;
pub mod snapshot;


pub use arrivals::ArrivalProcess;
pub use builder::SessionBuilder;
pub use dispatch::{Dispatcher, IdleDispatcher};
pub use error::{SimError, SimResult};
pub use metrics::Metrics;
pub use observer::{NoopObserver, SessionObserver};
pub use session::{AssignOutcome, Rejection, Session, TickReport};
pub use snapshot::{Snapshot, VehicleView};
