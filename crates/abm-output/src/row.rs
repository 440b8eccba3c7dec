//! Plain data row types written by output backends.

/// Population-wide counts after one tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CountsRow {
    pub tick:        u64,
    pub susceptible: u64,
    pub infected:    u64,
    pub recovered:   u64,
}

/// One cohort's counters after one tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GroupRow<'a> {
    pub tick:      u64,
    pub group:     &'a str,
    pub infected:  u32,
    pub total:     u32,
    pub beta_star: f64,
}
