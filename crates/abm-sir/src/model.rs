//! The `SirModel` struct and its per-tick transition kernel.

use abm_agent::{ComponentStore, Cursor, MarkerStore, Population};
use abm_cohort::{CohortLedger, GroupState};
use abm_core::{GroupId, Handle, PersonId, RunConfig, SimRng, Tick};
use rand_distr::Exp;
use tracing::{debug, trace};

use crate::state::{Counts, DiseaseState, Infected, Recovered, Susceptible};
use crate::{Parameters, SirError, SirObserver, SirResult};

// ── SirModel ──────────────────────────────────────────────────────────────────

/// One self-contained simulation instance.
///
/// Owns its population, the three disease-state stores, the cohort ledger and
/// its random stream exclusively; nothing is shared between instances, so a
/// driver may run many of them on separate threads.
///
/// Each call to [`advance`](Self::advance) performs one tick, updating the
/// stores strictly in the order Susceptible → Infected → Recovered.  Every
/// agent is in exactly one of the three stores at all times.
///
/// Create via [`SirBuilder`][crate::SirBuilder] or [`SirModel::new`].
pub struct SirModel {
    params: Parameters,

    /// Recovery-timer distribution, rate `gamma`.
    recovery: Exp<f64>,

    /// Incubation-timer distribution per cohort, rate `beta_star`, indexed by
    /// `GroupId::slot()`.
    incubation: Vec<Exp<f64>>,

    people: Population<PersonId>,
    rng:    SimRng,

    susceptible: ComponentStore<PersonId, Susceptible>,
    infected:    ComponentStore<PersonId, Infected>,
    recovered:   MarkerStore<PersonId, Recovered>,

    ledger: CohortLedger,
    tick:   Tick,
}

impl SirModel {
    /// Validate `params`, then build the population and cohorts.
    pub fn new(params: Parameters, seed: u64) -> SirResult<Self> {
        let (recovery, incubation) = distributions(&params)?;
        let capacity = params.population_size() as usize;

        let mut model = Self {
            params,
            recovery,
            incubation,
            people:      Population::empty(),
            rng:         SimRng::new(seed),
            susceptible: ComponentStore::with_capacity(capacity),
            infected:    ComponentStore::with_capacity(capacity),
            recovered:   MarkerStore::with_capacity(capacity),
            ledger:      CohortLedger::new(),
            tick:        Tick::ZERO,
        };
        model.populate();
        Ok(model)
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run exactly one S → I → R pass.
    pub fn advance(&mut self) {
        self.update_susceptible();
        self.update_infected();
        self.update_recovered();
        self.tick.advance();

        trace!(
            tick = self.tick.0,
            s = self.susceptible.len(),
            i = self.infected.len(),
            r = self.recovered.len(),
            "tick complete"
        );
    }

    /// Run from the current tick up to `config.end_tick()`.
    ///
    /// `config.seed` is ignored here; it is consumed when the model is built.
    pub fn run<O: SirObserver>(&mut self, config: &RunConfig, observer: &mut O) {
        let remaining = config.end_tick().0.saturating_sub(self.tick.0);
        self.run_ticks(remaining, observer);
    }

    /// Run exactly `n` ticks, then call `on_sim_end`.
    pub fn run_ticks<O: SirObserver>(&mut self, n: u64, observer: &mut O) {
        for _ in 0..n {
            let now = self.tick;
            observer.on_tick_start(now);
            self.advance();
            observer.on_tick_end(now, self.counts(), self.ledger.group_states());
        }
        observer.on_sim_end(self.tick);
    }

    /// Run `n` ticks and collect the counts after each one.
    pub fn trajectory(&mut self, n: u64) -> Vec<Counts> {
        (0..n)
            .map(|_| {
                self.advance();
                self.counts()
            })
            .collect()
    }

    /// Rebuild with `seed_infected` replacing the seed count of the first
    /// connection spec.  All S/I/R state is discarded and handles restart at
    /// 1; the random stream continues.
    pub fn reset(&mut self, seed_infected: u32) -> SirResult<()> {
        let mut params = self.params.clone();
        match params.connections.first_mut() {
            Some(first) => first.seed_infected = seed_infected,
            None => return Err(SirError::EmptyPopulation),
        }
        self.rebuild(params)
    }

    /// Rebuild from a new parameter set, discarding all S/I/R state.
    ///
    /// On error the model is left unchanged.
    pub fn rebuild(&mut self, params: Parameters) -> SirResult<()> {
        let (recovery, incubation) = distributions(&params)?;
        self.params = params;
        self.recovery = recovery;
        self.incubation = incubation;
        self.populate();
        Ok(())
    }

    // ── Queries ───────────────────────────────────────────────────────────

    pub fn counts(&self) -> Counts {
        Counts {
            susceptible: self.susceptible.len(),
            infected:    self.infected.len(),
            recovered:   self.recovered.len(),
        }
    }

    /// Cohort names in registration order.
    pub fn group_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.ledger.group_names()
    }

    /// Cohort counters aligned with [`group_names`](Self::group_names).
    pub fn group_states(&self) -> &[GroupState] {
        self.ledger.group_states()
    }

    /// Counters of the cohort called `name`, if it exists.
    pub fn group_state_by_name(&self, name: &str) -> Option<&GroupState> {
        let group = self.ledger.lookup_by_name(name);
        group.is_valid().then(|| self.ledger.group_state(group))
    }

    /// Which store `person` is in, or `None` for a handle this model never
    /// minted.
    pub fn state_of(&self, person: PersonId) -> Option<DiseaseState> {
        if self.susceptible.contains(person) {
            Some(DiseaseState::Susceptible)
        } else if self.infected.contains(person) {
            Some(DiseaseState::Infected)
        } else if self.recovered.contains(person) {
            Some(DiseaseState::Recovered)
        } else {
            None
        }
    }

    /// `true` if S + I + R equals the population size.
    pub fn is_consistent(&self) -> bool {
        self.counts().total() == self.people.len()
    }

    /// Ticks run since the last build or reset.
    #[inline]
    pub fn tick(&self) -> Tick {
        self.tick
    }

    #[inline]
    pub fn parameters(&self) -> &Parameters {
        &self.params
    }

    #[inline]
    pub fn population(&self) -> &Population<PersonId> {
        &self.people
    }

    #[inline]
    pub fn ledger(&self) -> &CohortLedger {
        &self.ledger
    }

    #[inline]
    pub fn susceptible(&self) -> &ComponentStore<PersonId, Susceptible> {
        &self.susceptible
    }

    #[inline]
    pub fn infected(&self) -> &ComponentStore<PersonId, Infected> {
        &self.infected
    }

    #[inline]
    pub fn recovered(&self) -> &MarkerStore<PersonId, Recovered> {
        &self.recovered
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// (Re)build people, cohorts and memberships from `self.params`.
    fn populate(&mut self) {
        self.susceptible.clear();
        self.infected.clear();
        self.recovered.clear();
        self.ledger.clear();
        self.people = Population::empty();
        self.tick = Tick::ZERO;

        for group in &self.params.groups {
            self.ledger.register_cohort(&group.name, group.beta, group.contact_factor);
        }

        for conn in &self.params.connections {
            let cohorts: Vec<GroupId> = conn
                .groups
                .iter()
                .map(|name| self.ledger.lookup_by_name(name))
                .collect();

            for _ in 0..conn.members {
                let person = self.people.push_back();
                self.susceptible.create(person, Susceptible::default());
                for &group in &cohorts {
                    self.ledger.add_membership(person, group, false);
                }
            }

            for _ in 0..conn.seed_infected {
                let person = self.people.push_back();
                for &group in &cohorts {
                    self.ledger.add_membership(person, group, false);
                }
                infect(person, &mut self.infected, &mut self.ledger, &mut self.rng, &self.recovery);
            }
        }

        debug!(
            population = self.people.len(),
            cohorts = self.ledger.len(),
            edges = self.ledger.edge_count(),
            seeded = self.infected.len(),
            "population built"
        );
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn update_susceptible(&mut self) {
        let Self { susceptible, infected, ledger, rng, recovery, incubation, .. } = self;

        let mut at = Cursor::START;
        while let Some((state, person)) = susceptible.get_mut(at) {
            let becomes_infected = match state.timer {
                0 => expose(person, state, ledger, rng, incubation),
                1 => true,
                _ => {
                    state.timer -= 1;
                    false
                }
            };

            if becomes_infected {
                // The erased slot now holds an unvisited entry; the new
                // Infected entry lands in another store and is not revisited.
                at = susceptible.erase(at);
                infect(person, infected, ledger, rng, recovery);
            } else {
                at = at.next();
            }
        }
    }

    fn update_infected(&mut self) {
        let Self { infected, recovered, ledger, .. } = self;

        let mut at = Cursor::START;
        while let Some((state, person)) = infected.get_mut(at) {
            if state.timer == 0 {
                at = infected.erase(at);
                recovered.mark(person);
                ledger.on_state_change(person, false);
            } else {
                state.timer -= 1;
                at = at.next();
            }
        }
    }

    /// Recovered is terminal.
    fn update_recovered(&mut self) {}
}

// ── Kernel helpers ────────────────────────────────────────────────────────────

/// One independent Bernoulli trial per cohort of `person`, in membership
/// order; the first success draws the incubation timer.
///
/// Returns `true` if the drawn timer rounds to zero (infected this tick).
/// Otherwise a positive timer is stored and the agent stays Susceptible.
fn expose(
    person:     PersonId,
    state:      &mut Susceptible,
    ledger:     &CohortLedger,
    rng:        &mut SimRng,
    incubation: &[Exp<f64>],
) -> bool {
    for &group in ledger.cohorts_of(person) {
        let prevalence = ledger.group_state(group).prevalence();
        if rng.uniform() < prevalence {
            let timer = rng.sample_ticks(&incubation[group.slot()]);
            if timer == 0 {
                return true;
            }
            state.timer = timer;
            return false;
        }
    }
    false
}

/// Insert `person` into the Infected store with a fresh recovery timer and
/// notify the ledger.  The caller has already removed them from their
/// previous store.
fn infect(
    person:   PersonId,
    infected: &mut ComponentStore<PersonId, Infected>,
    ledger:   &mut CohortLedger,
    rng:      &mut SimRng,
    recovery: &Exp<f64>,
) {
    let timer = rng.sample_ticks(recovery);
    infected.create(person, Infected { timer });
    ledger.on_state_change(person, true);
}

/// Validate `params` and build the recovery and per-cohort incubation
/// distributions.
fn distributions(params: &Parameters) -> SirResult<(Exp<f64>, Vec<Exp<f64>>)> {
    params.validate()?;
    let recovery = exp(params.gamma)?;
    let incubation = params
        .groups
        .iter()
        .map(|g| exp(g.beta_star()))
        .collect::<SirResult<Vec<_>>>()?;
    Ok((recovery, incubation))
}

fn exp(rate: f64) -> SirResult<Exp<f64>> {
    Exp::new(rate).map_err(|e| SirError::Config(format!("exponential rate {rate}: {e}")))
}
