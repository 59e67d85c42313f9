//! Tests for pk-output.

#[cfg(test)]
mod csv_tests {
    use pk_vehicle::Phase;
    use tempfile::TempDir;

    use crate::csv::{CsvWriter, SNAPSHOT_HEADERS, SUMMARY_HEADERS};
    use crate::row::{TickSummaryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn parked_row(vehicle: u32, tick: u64) -> VehicleSnapshotRow {
        VehicleSnapshotRow {
            tick,
            vehicle,
            phase:           Phase::Parked,
            x:               80.0,
            y:               20.0,
            slot:            Some((0, vehicle as usize)),
            remaining_dwell: Some(3.5),
        }
    }

    fn headers(path: std::path::PathBuf) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created_with_headers() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        assert_eq!(headers(dir.path().join("vehicle_snapshots.csv")), SNAPSHOT_HEADERS);
        assert_eq!(headers(dir.path().join("tick_summaries.csv")), SUMMARY_HEADERS);
    }

    #[test]
    fn snapshot_rows_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let departing = VehicleSnapshotRow {
            phase: Phase::Departing,
            remaining_dwell: None,
            ..parked_row(2, 5)
        };
        w.write_snapshots(&[parked_row(0, 5), parked_row(1, 5), departing]).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 3);
        assert_eq!(&rows[0][0], "5"); // tick
        assert_eq!(&rows[1][1], "1"); // vehicle
        assert_eq!(&rows[0][2], "parked");
        assert_eq!(&rows[0][3], "80");
        assert_eq!(&rows[1][6], "1"); // col
        assert_eq!(&rows[0][7], "3.5");
        assert_eq!(&rows[2][2], "departing");
        assert_eq!(&rows[2][7], "", "no dwell shown once departing");
    }

    #[test]
    fn tick_summary_written() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_tick_summary(&TickSummaryRow {
            tick:              30,
            time:              1.0,
            occupancy_percent: 50.0,
            active:            2,
            parked:            3,
            failed:            1,
            departed:          1,
        })
        .unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(
            rows[0].iter().collect::<Vec<_>>(),
            ["30", "1", "50", "2", "3", "1", "1"]
        );
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn missing_directory_errors() {
        let dir = tmp();
        assert!(CsvWriter::new(&dir.path().join("absent")).is_err());
    }
}

#[cfg(test)]
mod observer_tests {
    use pk_core::{DwellMean, Kinematics, LotConfig, Slot};
    use pk_sim::{Dispatcher, Session, SessionBuilder};
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::observer::SessionOutputObserver;
    use crate::row::{TickSummaryRow, VehicleSnapshotRow};
    use crate::writer::OutputWriter;
    use crate::{OutputError, OutputResult};

    struct FirstFree;

    impl Dispatcher for FirstFree {
        fn choose(&mut self, session: &Session) -> Option<Slot> {
            session.grid().free_slots().first().copied()
        }
    }

    fn instant_session(cap: u32) -> Session {
        let config = LotConfig {
            rows: 2,
            cols: 2,
            max_cars_per_episode: cap,
            mean_interarrival: 1.0,
            dwell: DwellMean::Fixed(4),
            kinematics: Kinematics::Instant,
            tick_secs: 1.0,
            seed: 3,
            snapshot_interval_ticks: 1,
        };
        SessionBuilder::new(config).build().unwrap()
    }

    /// Fails every write.
    struct BrokenWriter {
        finished: bool,
    }

    impl OutputWriter for BrokenWriter {
        fn write_snapshots(&mut self, _rows: &[VehicleSnapshotRow]) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("snapshots unavailable")))
        }

        fn write_tick_summary(&mut self, _row: &TickSummaryRow) -> OutputResult<()> {
            Err(OutputError::Io(std::io::Error::other("summaries unavailable")))
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finished = true;
            Ok(())
        }
    }

    #[test]
    fn integration_csv() {
        let mut session = instant_session(4);
        let dir = TempDir::new().unwrap();
        let mut obs = SessionOutputObserver::new(CsvWriter::new(dir.path()).unwrap());
        let end = session.run(10_000, &mut FirstFree, &mut obs).unwrap();
        assert!(obs.take_error().is_none(), "no write errors expected");
        assert!(session.is_finished());

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_summaries.csv")).unwrap();
        let summaries: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(summaries.len() as u64, end.0, "one summary per tick");
        let last = summaries.last().unwrap();
        let count = |i: usize| last[i].parse::<u64>().unwrap();
        // parked, failed, departed: everyone who parked has left, and
        // arrivals to a full lot were turned away.
        assert_eq!(count(4) + count(5), 4);
        assert_eq!(count(6), count(4));

        let mut rdr = csv::Reader::from_path(dir.path().join("vehicle_snapshots.csv")).unwrap();
        let snapshots: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert!(!snapshots.is_empty());
        // Between ticks an instantly parked vehicle is always parked.
        assert!(snapshots.iter().all(|r| &r[2] == "parked" && !r[7].is_empty()));
    }

    #[test]
    fn first_error_kept() {
        let mut session = instant_session(2);
        let mut obs = SessionOutputObserver::new(BrokenWriter { finished: false });
        session.run(50, &mut FirstFree, &mut obs).unwrap();

        let err = obs.take_error().expect("write error stored");
        assert!(err.to_string().contains("summaries unavailable"), "{err}");
        assert!(obs.take_error().is_none());
        assert!(obs.into_writer().finished, "finish still runs at session end");
    }

    #[test]
    fn finish_reports_stored_error() {
        let mut session = instant_session(2);
        let mut obs = SessionOutputObserver::new(BrokenWriter { finished: false });
        session
            .run_ticks(5, &mut FirstFree, &mut obs)
            .unwrap();
        assert!(obs.finish().is_err());
        assert!(obs.finish().is_ok());
    }
}
