//! Integration tests for abm-output.

#[cfg(test)]
mod csv_tests {
    use tempfile::TempDir;

    use crate::csv::CsvWriter;
    use crate::row::{CountsRow, GroupRow};
    use crate::writer::OutputWriter;

    fn tmp() -> TempDir {
        tempfile::tempdir().expect("create temp dir")
    }

    fn headers(path: &std::path::Path) -> Vec<String> {
        let mut rdr = csv::Reader::from_path(path).unwrap();
        rdr.headers().unwrap().iter().map(str::to_owned).collect()
    }

    #[test]
    fn csv_files_created() {
        let dir = tmp();
        let _w = CsvWriter::new(dir.path()).unwrap();
        assert!(dir.path().join("tick_counts.csv").exists());
        assert!(dir.path().join("group_counts.csv").exists());
    }

    #[test]
    fn csv_creates_missing_directory() {
        let dir = tmp();
        let nested = dir.path().join("runs").join("closed");
        let _w = CsvWriter::new(&nested).unwrap();
        assert!(nested.join("tick_counts.csv").exists());
    }

    #[test]
    fn csv_headers_correct() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();

        assert_eq!(
            headers(&dir.path().join("tick_counts.csv")),
            ["tick", "susceptible", "infected", "recovered"]
        );
        assert_eq!(
            headers(&dir.path().join("group_counts.csv")),
            ["tick", "group", "infected", "total", "beta_star"]
        );
    }

    #[test]
    fn csv_counts_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_counts(&CountsRow { tick: 3, susceptible: 90, infected: 7, recovered: 3 }).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_counts.csv")).unwrap();
        let rows: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 1);
        assert_eq!(&rows[0][0], "3");
        assert_eq!(&rows[0][1], "90");
        assert_eq!(&rows[0][2], "7");
        assert_eq!(&rows[0][3], "3");
    }

    #[test]
    fn csv_group_rows_round_trip() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        let rows = [
            GroupRow { tick: 0, group: "A", infected: 4, total: 10, beta_star: 0.48 },
            GroupRow { tick: 0, group: "B", infected: 0, total: 20, beta_star: 0.3 },
        ];
        w.write_groups(&rows).unwrap();
        w.finish().unwrap();

        let mut rdr = csv::Reader::from_path(dir.path().join("group_counts.csv")).unwrap();
        let read: Vec<_> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(read.len(), 2);
        assert_eq!(&read[0][1], "A");
        assert_eq!(&read[0][2], "4");
        assert_eq!(read[0][4].parse::<f64>().unwrap(), 0.48);
        assert_eq!(&read[1][1], "B");
        assert_eq!(&read[1][3], "20");
    }

    #[test]
    fn csv_finish_idempotent() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.finish().unwrap();
        w.finish().unwrap();
    }

    #[test]
    fn csv_empty_group_batch_ok() {
        let dir = tmp();
        let mut w = CsvWriter::new(dir.path()).unwrap();
        w.write_groups(&[]).unwrap();
        w.finish().unwrap();
    }
}

#[cfg(test)]
mod observer_tests {
    use abm_sir::{Parameters, SirBuilder};

    use crate::{
        CountsRow, CsvWriter, GroupRow, OutputError, OutputResult, OutputWriter, SimOutputObserver,
    };

    /// Collects rows in memory; optionally fails every counts write.
    #[derive(Default)]
    struct MemWriter {
        counts:   Vec<CountsRow>,
        groups:   Vec<(u64, String, u32)>,
        finishes: usize,
        fail:     bool,
    }

    impl OutputWriter for MemWriter {
        fn write_counts(&mut self, row: &CountsRow) -> OutputResult<()> {
            if self.fail {
                let msg = format!("tick {}", row.tick);
                return Err(OutputError::Io(std::io::Error::other(msg)));
            }
            self.counts.push(*row);
            Ok(())
        }

        fn write_groups(&mut self, rows: &[GroupRow<'_>]) -> OutputResult<()> {
            self.groups.extend(rows.iter().map(|r| (r.tick, r.group.to_owned(), r.infected)));
            Ok(())
        }

        fn finish(&mut self) -> OutputResult<()> {
            self.finishes += 1;
            Ok(())
        }
    }

    fn model() -> abm_sir::SirModel {
        SirBuilder::new(Parameters::single_cohort(0.10, 0.24, 2, 190, 10))
            .seed(3)
            .build()
            .unwrap()
    }

    #[test]
    fn one_counts_row_and_one_group_row_per_tick() {
        let mut model = model();
        let mut obs = SimOutputObserver::new(MemWriter::default(), model.group_names());
        model.run_ticks(20, &mut obs);
        assert!(obs.take_error().is_none());

        let w = obs.into_writer();
        assert_eq!(w.counts.len(), 20);
        assert_eq!(w.groups.len(), 20);
        assert_eq!(w.finishes, 1);
        for (i, row) in w.counts.iter().enumerate() {
            assert_eq!(row.tick, i as u64);
            assert_eq!(row.susceptible + row.infected + row.recovered, 200);
        }
        // Single cohort: its infected count is the population's.
        for (row, (tick, name, infected)) in w.counts.iter().zip(&w.groups) {
            assert_eq!(*tick, row.tick);
            assert_eq!(name, "A");
            assert_eq!(u64::from(*infected), row.infected);
        }
    }

    #[test]
    fn first_error_is_kept() {
        let mut model = model();
        let writer = MemWriter { fail: true, ..MemWriter::default() };
        let mut obs = SimOutputObserver::new(writer, model.group_names());
        model.run_ticks(5, &mut obs);

        match obs.take_error() {
            Some(OutputError::Io(e)) => assert_eq!(e.to_string(), "tick 0"),
            other => panic!("unexpected {other:?}"),
        }
        assert!(obs.take_error().is_none());
    }

    #[test]
    fn integration_csv() {
        let dir = tempfile::tempdir().unwrap();
        let mut model = model();
        let writer = CsvWriter::new(dir.path()).unwrap();
        let mut obs = SimOutputObserver::new(writer, model.group_names());
        model.run_ticks(30, &mut obs);
        assert!(obs.take_error().is_none());

        let mut rdr = csv::Reader::from_path(dir.path().join("tick_counts.csv")).unwrap();
        assert_eq!(rdr.records().count(), 30);
        let mut rdr = csv::Reader::from_path(dir.path().join("group_counts.csv")).unwrap();
        assert_eq!(rdr.records().count(), 30);
    }
}
