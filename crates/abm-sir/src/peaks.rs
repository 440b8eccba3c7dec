//! Per-cohort epidemic peak detection.

use abm_cohort::GroupState;
use abm_core::Tick;

use crate::{Counts, SirObserver};

/// Largest infected count seen and the first tick it was reached.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Peak {
    pub infected: u32,
    pub tick:     Tick,
}

impl Peak {
    /// Keep the earlier peak on ties.
    #[inline]
    fn update(&mut self, infected: u32, tick: Tick) {
        if infected > self.infected {
            self.infected = infected;
            self.tick = tick;
        }
    }
}

/// Observer that tracks the infection peak of every cohort and of the whole
/// population.
///
/// A cohort that never sees an infection keeps `Peak::default()` (zero
/// infected at `Tick::ZERO`).
#[derive(Clone, Debug, Default)]
pub struct PeakTracker {
    groups: Vec<Peak>,
    total:  Peak,
}

impl PeakTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Peaks aligned with [`SirModel::group_names`][crate::SirModel::group_names].
    #[inline]
    pub fn groups(&self) -> &[Peak] {
        &self.groups
    }

    /// Peak of cohort `index`, if that many cohorts were observed.
    #[inline]
    pub fn group(&self, index: usize) -> Option<Peak> {
        self.groups.get(index).copied()
    }

    /// Peak of the population-wide infected count.
    #[inline]
    pub fn total(&self) -> Peak {
        self.total
    }
}

impl SirObserver for PeakTracker {
    fn on_tick_end(&mut self, tick: Tick, counts: Counts, groups: &[GroupState]) {
        if self.groups.len() < groups.len() {
            self.groups.resize(groups.len(), Peak::default());
        }
        for (peak, state) in self.groups.iter_mut().zip(groups) {
            peak.update(state.infected, tick);
        }
        let total = u32::try_from(counts.infected).unwrap_or(u32::MAX);
        self.total.update(total, tick);
    }
}
