//! `SimOutputObserver<W>` — bridges `SirObserver` to an `OutputWriter`.

use abm_cohort::GroupState;
use abm_core::Tick;
use abm_sir::{Counts, SirObserver};

use crate::row::{CountsRow, GroupRow};
use crate::writer::OutputWriter;
use crate::{OutputError, OutputResult};

/// A [`SirObserver`] that writes population counts and per-cohort counters to
/// any [`OutputWriter`] backend.
///
/// Errors from the writer are stored internally because `SirObserver` methods
/// have no return value.  After `model.run()` returns, check for errors with
/// [`take_error`][Self::take_error].
pub struct SimOutputObserver<W: OutputWriter> {
    writer:     W,
    names:      Vec<String>,
    last_error: Option<OutputError>,
}

impl<W: OutputWriter> SimOutputObserver<W> {
    /// Create an observer backed by `writer`.
    ///
    /// `group_names` must be in the model's registration order, e.g.
    /// `model.group_names()`.
    pub fn new<'a>(writer: W, group_names: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            writer,
            names:      group_names.into_iter().map(str::to_owned).collect(),
            last_error: None,
        }
    }

    /// Take the stored write error (if any) after `model.run()` returns.
    ///
    /// Returns `None` if all writes succeeded.
    pub fn take_error(&mut self) -> Option<OutputError> {
        self.last_error.take()
    }

    /// Unwrap the inner writer (e.g. to inspect files after the run).
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

impl<W: OutputWriter> SirObserver for SimOutputObserver<W> {
    fn on_tick_end(&mut self, tick: Tick, counts: Counts, groups: &[GroupState]) {
        let row = CountsRow {
            tick:        tick.0,
            susceptible: counts.susceptible as u64,
            infected:    counts.infected as u64,
            recovered:   counts.recovered as u64,
        };
        let result = self.writer.write_counts(&row);
        self.store_err(result);

        let rows: Vec<GroupRow<'_>> = self
            .names
            .iter()
            .zip(groups)
            .map(|(name, state)| GroupRow {
                tick:      tick.0,
                group:     name,
                infected:  state.infected,
                total:     state.total,
                beta_star: state.beta_star,
            })
            .collect();

        if !rows.is_empty() {
            let result = self.writer.write_groups(&rows);
            self.store_err(result);
        }
    }

    fn on_sim_end(&mut self, _final_tick: Tick) {
        let result = self.writer.finish();
        self.store_err(result);
    }
}
