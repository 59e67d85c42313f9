//! `SessionOutputObserver<W>` — bridges `SessionObserver` to an `OutputWriter`.

use pk_core::Tick;
use pk_sim::{Metrics, Session, SessionObserver, Snapshot, TickReport};

use crate::row::{TickSummaryRow, VehicleSnapshotRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SessionObserver`] that writes one summary row per tick and one row
/// per active vehicle at every snapshot.
///
/// Observer hooks have no return value, so write errors are stored.  After
/// `session.run()` returns, check with [`take_error`](Self::take_error).
/// Sessions driven with `run_ticks` never reach `on_session_end`; call
/// [`finish`](Self::finish) yourself.
pub struct SessionOutputObserver<W: OutputWriter> {
    writer:     W,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SessionOutputObserver<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, last_error: None }
    }

    /// Take the stored write error, if any.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Flush the writer, returning a stored error first if there is one.
    pub fn finish(&mut self) -> OutputResult<()> {
        if let Some(e) = self.last_error.take() {
            return Err(e);
        }
        self.writer.finish()
    }

    /// Unwrap the inner writer.
    pub fn into_writer(self) -> W {
        self.writer
    }

    fn store_err(&mut self, result: OutputResult<()>) {
        if let Err(e) = result {
            // Keep only the first error.
            if self.last_error.is_none() {
                self.last_error = Some(e);
            }
        }
    }
}

impl<W: OutputWriter> SessionObserver for SessionOutputObserver<W> {
    fn on_tick_end(&mut self, _report: &TickReport, session: &Session) {
        let result = self.writer.write_tick_summary(&TickSummaryRow::from_session(session));
        self.store_err(result);
    }

    fn on_snapshot(&mut self, snapshot: &Snapshot) {
        let rows = VehicleSnapshotRow::from_snapshot(snapshot);
        if !rows.is_empty() {
            let result = self.writer.write_snapshots(&rows);
            self.store_err(result);
        }
    }

    fn on_session_end(&mut self, _final_tick: Tick, _metrics: &Metrics) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
