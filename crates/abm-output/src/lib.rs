//! `abm-output` — CSV output for epidemic runs.
//!
//! | Backend | Files created                               |
//! |---------|---------------------------------------------|
//! | CSV     | `tick_counts.csv`, `group_counts.csv`       |
//!
//! [`CsvWriter`] implements [`OutputWriter`] and is driven by
//! [`SimOutputObserver`], which implements `abm_sir::SirObserver`.
//!
//! # Usage
//!
//! ```rust,ignore
//! use abm_output::{CsvWriter, SimOutputObserver};
//!
//! let writer = CsvWriter::new(Path::new("./output"))?;
//! let mut obs = SimOutputObserver::new(writer, model.group_names());
//! model.run(&config, &mut obs);
//! obs.take_error().map(|e| eprintln!("output error: {e}"));
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
pub use observer::SimOutputObserver;
pub use row::{CountsRow, GroupRow};
pub use writer::OutputWriter;
