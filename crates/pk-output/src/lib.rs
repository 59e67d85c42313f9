//! `pk-output` — session output writers for the parking lot simulator.
//!
//! | Backend | Files created                                   |
//! |---------|-------------------------------------------------|
//! | CSV     | `vehicle_snapshots.csv`, `tick_summaries.csv`   |
//!
//! Backends implement [`OutputWriter`] and are driven by
//! [`SessionOutputObserver`], which implements `pk_sim::SessionObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pk_output::{CsvWriter, SessionOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SessionOutputObserver::new(writer);
//! session.run(10_000, &mut dispatcher, &mut obs)?;
//! if let Some(e) = obs.take_error() {
//!     eprintln!("output error: {e}");
//! }
//! ```

pub mod csv;
pub mod error;
pub mod observer;
pub mod row;
pub mod writer;

#[cfg(test)]
mod tests;

pub use csv::CsvWriter;
pub use error::{OutputError, OutputResult};
pub use observer::SessionOutputObserver;
pub use row::{TickSummaryRow, VehicleSnapshotRow};
pub use writer::OutputWriter;
