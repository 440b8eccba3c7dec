//! Per-group aggregate counters.

/// Live statistics of one cohort.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct GroupState {
    /// Members currently infected.
    pub infected: u32,
    /// All members, regardless of disease state.
    pub total: u32,
    /// Force-of-infection coefficient, `beta * contact_factor`.
    pub beta_star: f64,
}

impl GroupState {
    pub fn new(beta_star: f64) -> Self {
        Self { infected: 0, total: 0, beta_star }
    }

    /// `infected / total`, or 0 for an empty cohort.
    #[inline]
    pub fn prevalence(&self) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            f64::from(self.infected) / f64::from(self.total)
        }
    }
}
