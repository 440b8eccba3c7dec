//! CSV output backend.
//!
//! Creates two files in the configured output directory:
//! - `tick_counts.csv`
//! - `group_counts.csv`

use std::fs::{self, File};
use std::path::Path;

use csv::Writer;

use crate::writer::OutputWriter;
use crate::{CountsRow, GroupRow, OutputResult};

/// Writes simulation output to two CSV files.
pub struct CsvWriter {
    counts:   Writer<File>,
    groups:   Writer<File>,
    finished: bool,
}

impl CsvWriter {
    /// Create `dir` if needed, open (or truncate) the two CSV files in it and
    /// write the header rows.
    pub fn new(dir: &Path) -> OutputResult<Self> {
        fs::create_dir_all(dir)?;

        let mut counts = Writer::from_path(dir.join("tick_counts.csv"))?;
        counts.write_record(["tick", "susceptible", "infected", "recovered"])?;

        let mut groups = Writer::from_path(dir.join("group_counts.csv"))?;
        groups.write_record(["tick", "group", "infected", "total", "beta_star"])?;

        Ok(Self { counts, groups, finished: false })
    }
}

impl OutputWriter for CsvWriter {
    fn write_counts(&mut self, row: &CountsRow) -> OutputResult<()> {
        self.counts.write_record(&[
            row.tick.to_string(),
            row.susceptible.to_string(),
            row.infected.to_string(),
            row.recovered.to_string(),
        ])?;
        Ok(())
    }

    fn write_groups(&mut self, rows: &[GroupRow<'_>]) -> OutputResult<()> {
        for row in rows {
            self.groups.write_record(&[
                row.tick.to_string(),
                row.group.to_owned(),
                row.infected.to_string(),
                row.total.to_string(),
                row.beta_star.to_string(),
            ])?;
        }
        Ok(())
    }

    fn finish(&mut self) -> OutputResult<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;
        self.counts.flush()?;
        self.groups.flush()?;
        Ok(())
    }
}
