//! The `OutputWriter` trait implemented by backend writers.

use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};

/// A sink for session output rows.
///
/// Errors are surfaced to the observer, which stores the first one for
/// [`SessionOutputObserver::take_error`](crate::SessionOutputObserver::take_error).
pub trait OutputWriter {
    /// Write a batch of vehicle snapshot rows.
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()>;

    /// Write one tick summary row.
    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()>;

    /// Flush all underlying file handles.
    ///
    /// Idempotent.
    fn finish(&mut self) -> OutputResult<()>;
}
