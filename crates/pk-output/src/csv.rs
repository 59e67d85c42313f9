//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `vehicle_snapshots.csv`
//! - `tick_summaries.csv`
//!
//! Absent optional values are written as empty fields.

use std::fs::File;
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{OutputResult, TickSummaryRow, VehicleSnapshotRow};

pub const SNAPSHOT_HEADERS: [&str; 8] =
    ["tick", "vehicle", "phase", "x", "y", "row", "col", "remaining_dwell"];

pub const SUMMARY_HEADERS: [&str; 7] =
    ["tick", "time", "occupancy_percent", "active", "parked", "failed", "departed"];

/// Writes session output to two CSV files.
pub struct CsvWriter {
    snapshots: Writer<File>,
    summaries: Writer<File>,
    finished:  bool,
}

impl CsvWriter {
    /// Create (or truncate) the two CSV files in `dir` and write the header
    /// rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        let mut snapshots = Writer::from_path(dir.join("vehicle_snapshots.csv"))?;
        snapshots.write_record(SNAPSHOT_HEADERS)?;

        let mut summaries = Writer::from_path(dir.join("tick_summaries.csv"))?;
        summaries.write_record(SUMMARY_HEADERS)?;

        Ok(Self { snapshots, summaries, finished: false })
    }
}

fn opt<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

impl OutputWriter for CsvWriter {
    fn write_snapshots(&mut self, rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
        for row in rows {
            self.snapshots.write_record(&[
                row.tick.to_string(),
                row.vehicle.to_string(),
                row.phase.as_str().to_owned(),
                row.x.to_string(),
                row.y.to_string(),
                opt(row.slot.map(|(r, _)| r)),
                opt(row.slot.map(|(_, c)| c)),
                opt(row.remaining_dwell),
            ])?;
        }
        Ok(())
    }

    fn write_tick_summary(&mut self, row: &TickSummaryRow) -> OutputResult<()> {
        self.summaries.write_record(&[
            row.tick.to_string(),
            row.time.to_string(),
            row.occupancy_percent.to_string(),
            row.active.to_string(),
            row.parked.to_string(),
            row.failed.to_string(),
            row.departed.to_string(),
        ])?;
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.snapshots.flush()?;
        self.summaries.flush()?;
        Ok(())
    }
}
