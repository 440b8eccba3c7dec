//! Simulation observer trait for progress reporting and data collection.

use abm_cohort::GroupState;
use abm_core::Tick;

use crate::Counts;

/// Callbacks invoked by [`SirModel::run`][crate::SirModel::run] at key points
/// in the tick loop.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example — progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter { interval: u64 }
///
/// impl SirObserver for ProgressPrinter {
///     fn on_tick_end(&mut self, tick: Tick, counts: Counts, _groups: &[GroupState]) {
///         if tick.0 % self.interval == 0 {
///             println!("{tick}: {} infected", counts.infected);
///         }
///     }
/// }
/// ```
pub trait SirObserver {
    /// Called at the very start of each tick, before any processing.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called after the S → I → R pass of `tick` completes.
    ///
    /// `groups` is aligned with [`SirModel::group_names`][crate::SirModel::group_names].
    fn on_tick_end(&mut self, _tick: Tick, _counts: Counts, _groups: &[GroupState]) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick) {}
}

/// A [`SirObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SirObserver for NoopObserver {}

/// Records the population counts after every tick.
#[derive(Clone, Debug, Default)]
pub struct CountsRecorder {
    pub counts: Vec<Counts>,
}

impl CountsRecorder {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SirObserver for CountsRecorder {
    fn on_tick_end(&mut self, _tick: Tick, counts: Counts, _groups: &[GroupState]) {
        self.counts.push(counts);
    }
}
