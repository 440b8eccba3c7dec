//! Epidemic parameters supplied by drivers.
//!
//! All types derive `serde` so drivers can load them from TOML or JSON:
//!
//! ```toml
//! gamma = 0.10
//!
//! [[groups]]
//! name = "A"
//! beta = 0.24
//! contact_factor = 2
//!
//! [[connections]]
//! groups = ["A"]
//! members = 9990
//! seed_infected = 10
//! ```
//!
//! A connection spec admits `members` susceptible agents followed by
//! `seed_infected` infected agents, each belonging to every listed cohort.
//! Total population is the sum of both counts over all connections.

use abm_core::error::check_rate;
use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::{SirError, SirResult};

/// Largest number of cohorts one connection spec may name.
pub const MAX_GROUPS_PER_CONNECTION: usize = 8;

fn default_contact_factor() -> u32 {
    1
}

/// One named social group.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GroupParams {
    pub name: String,
    /// Transmission rate.
    pub beta: f64,
    #[serde(default = "default_contact_factor")]
    pub contact_factor: u32,
}

impl GroupParams {
    pub fn new(name: impl Into<String>, beta: f64, contact_factor: u32) -> Self {
        Self { name: name.into(), beta, contact_factor }
    }

    /// Force-of-infection coefficient `beta * contact_factor`.
    #[inline]
    pub fn beta_star(&self) -> f64 {
        self.beta * f64::from(self.contact_factor)
    }
}

/// A block of agents sharing the same cohort memberships.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectionSpec {
    /// Cohort names every agent of this block belongs to (may be empty).
    #[serde(default)]
    pub groups: Vec<String>,
    /// Agents admitted as Susceptible.
    pub members: u32,
    /// Agents admitted as Infected, in addition to `members`.
    #[serde(default)]
    pub seed_infected: u32,
}

impl ConnectionSpec {
    pub fn new(groups: &[&str], members: u32, seed_infected: u32) -> Self {
        Self {
            groups: groups.iter().map(|g| (*g).to_owned()).collect(),
            members,
            seed_infected,
        }
    }

    /// Agents this spec contributes.
    #[inline]
    pub fn size(&self) -> u64 {
        u64::from(self.members) + u64::from(self.seed_infected)
    }
}

/// Complete parameter set for one simulation instance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parameters {
    /// Recovery rate.
    pub gamma: f64,
    #[serde(default)]
    pub groups: Vec<GroupParams>,
    #[serde(default)]
    pub connections: Vec<ConnectionSpec>,
}

impl Parameters {
    /// A single closed cohort named `"A"`: `members` susceptible agents plus
    /// `seed_infected` infected ones.
    pub fn single_cohort(
        gamma:          f64,
        beta:           f64,
        contact_factor: u32,
        members:        u32,
        seed_infected:  u32,
    ) -> Self {
        Self {
            gamma,
            groups:      vec![GroupParams::new("A", beta, contact_factor)],
            connections: vec![ConnectionSpec::new(&["A"], members, seed_infected)],
        }
    }

    /// Total number of agents the connection specs admit.
    pub fn population_size(&self) -> u64 {
        self.connections.iter().map(ConnectionSpec::size).sum()
    }

    /// Reject configurations that could not run or would corrupt counts.
    pub fn validate(&self) -> SirResult<()> {
        check_rate("gamma", self.gamma)?;

        let mut names = FxHashSet::default();
        for group in &self.groups {
            if group.name.is_empty() {
                return Err(SirError::Config("cohort name must not be empty".into()));
            }
            if !names.insert(group.name.as_str()) {
                return Err(SirError::DuplicateCohort(group.name.clone()));
            }
            check_rate("beta * contact_factor", group.beta_star())?;
        }

        for (index, conn) in self.connections.iter().enumerate() {
            if conn.groups.len() > MAX_GROUPS_PER_CONNECTION {
                return Err(SirError::TooManyCohorts {
                    index,
                    got: conn.groups.len(),
                    max: MAX_GROUPS_PER_CONNECTION,
                });
            }
            let mut seen = FxHashSet::default();
            for name in &conn.groups {
                if !names.contains(name.as_str()) {
                    return Err(SirError::UnknownCohort { index, name: name.clone() });
                }
                if !seen.insert(name.as_str()) {
                    return Err(SirError::RepeatedCohort { index, name: name.clone() });
                }
            }
        }

        match self.population_size() {
            0 => Err(SirError::EmptyPopulation),
            n if n > u64::from(u32::MAX) => Err(SirError::PopulationTooLarge(n)),
            _ => Ok(()),
        }
    }
}
