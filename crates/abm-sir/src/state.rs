//! Disease-state payloads and aggregate count types.

/// Payload of the Susceptible store.
///
/// `timer == 0` means "not yet exposed".  A positive timer means the agent is
/// already committed to infection: it counts down once per tick and the agent
/// becomes Infected on the tick it reads 1.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Susceptible {
    pub timer: u32,
}

/// Payload of the Infected store: ticks left until recovery.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Infected {
    pub timer: u32,
}

/// Zero-sized marker for the terminal Recovered state.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Recovered;

/// Which of the three stores an agent is in.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum DiseaseState {
    Susceptible,
    Infected,
    Recovered,
}

/// Population-wide S/I/R counts after a tick.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Counts {
    pub susceptible: usize,
    pub infected:    usize,
    pub recovered:   usize,
}

impl Counts {
    #[inline]
    pub fn total(&self) -> usize {
        self.susceptible + self.infected + self.recovered
    }
}
