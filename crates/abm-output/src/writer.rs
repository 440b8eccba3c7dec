//! The `OutputWriter` trait implemented by backend writers.

use crate::{CountsRow, GroupRow, OutputResult};

/// Sink for per-tick epidemic rows.
///
/// All methods are infallible from the observer's perspective — errors are
/// stored internally and retrieved with
/// [`SimOutputObserver::take_error`][crate::SimOutputObserver::take_error].
pub trait OutputWriter {
    /// Write one population-wide counts row.
    fn write_counts(&mut self, row: &CountsRow) -> OutputResult<()>;

    /// Write a batch of per-cohort rows for one tick.
    fn write_groups(&mut self, rows: &[GroupRow<'_>]) -> OutputResult<()>;

    /// Flush and close all underlying file handles.
    ///
    /// Idempotent — safe to call more than once.
    fn finish(&mut self) -> OutputResult<()>;
}
