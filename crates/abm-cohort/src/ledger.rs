//! `CohortLedger` — membership edges plus live per-group counters.
//!
//! # Layout
//!
//! | Field         | Shape                                    | Used by                 |
//! |---------------|------------------------------------------|-------------------------|
//! | `groups`      | `ComponentStore<GroupId, GroupState>`    | O(1) counter reads      |
//! | `names`       | `ComponentStore<GroupId, String>`        | reporting               |
//! | `name_lookup` | `FxHashMap<String, GroupId>`             | name → handle           |
//! | `edges`       | `FxHashSet<(GroupId, PersonId)>`         | duplicate-edge checks   |
//! | `memberships` | `Vec<Vec<GroupId>>` indexed by person    | per-person cohort scan  |
//!
//! Groups are registered once and never removed, so the dense order of
//! `groups` and `names` is registration order and the two stay aligned.
//!
//! Membership edges are fixed after construction; only the infected counters
//! move as people change disease state.

use abm_agent::{ComponentStore, Population};
use abm_core::{GroupId, Handle, PersonId};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;

use crate::GroupState;

/// Many-to-many person ↔ group relation with aggregate infection counts.
#[derive(Clone, Debug, Default)]
pub struct CohortLedger {
    handles:     Population<GroupId>,
    groups:      ComponentStore<GroupId, GroupState>,
    names:       ComponentStore<GroupId, String>,
    name_lookup: FxHashMap<String, GroupId>,
    edges:       FxHashSet<(GroupId, PersonId)>,
    memberships: Vec<Vec<GroupId>>,
}

impl CohortLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered groups.
    #[inline]
    pub fn len(&self) -> usize {
        self.groups.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    // ── Construction ──────────────────────────────────────────────────────

    /// Register a new group, returning its freshly minted handle.
    ///
    /// Stores `beta_star = beta * contact_factor` and zeroes both counters.
    ///
    /// # Panics
    /// Panics if `name` is already registered.
    pub fn register_cohort(&mut self, name: &str, beta: f64, contact_factor: u32) -> GroupId {
        assert!(
            !self.name_lookup.contains_key(name),
            "cohort {name:?} registered twice"
        );
        let group = self.handles.push_back();
        let beta_star = beta * f64::from(contact_factor);
        self.groups.create(group, GroupState::new(beta_star));
        self.names.create(group, name.to_owned());
        self.name_lookup.insert(name.to_owned(), group);
        debug!(%group, name, beta_star, "registered cohort");
        group
    }

    /// Resolve a cohort name.  Returns [`GroupId::INVALID`] if unknown.
    pub fn lookup_by_name(&self, name: &str) -> GroupId {
        self.name_lookup.get(name).copied().unwrap_or(GroupId::INVALID)
    }

    /// Record that `person` belongs to `group`.
    ///
    /// Increments the group's total count, and its infected count when
    /// `is_infected`.
    ///
    /// # Panics
    /// Panics if `group` is not registered, `person` is invalid, or the edge
    /// already exists.
    pub fn add_membership(&mut self, person: PersonId, group: GroupId, is_infected: bool) {
        assert!(person.is_valid(), "membership for an invalid person handle");
        let Some(state) = self.groups.find_mut(group) else {
            panic!("membership references unregistered cohort {group}");
        };
        assert!(
            self.edges.insert((group, person)),
            "membership {person} -> {group} added twice"
        );

        state.total += 1;
        if is_infected {
            state.infected += 1;
        }

        let slot = person.slot();
        if slot >= self.memberships.len() {
            self.memberships.resize_with(slot + 1, Vec::new);
        }
        self.memberships[slot].push(group);
    }

    /// Adjust the infected counter of every cohort `person` belongs to:
    /// +1 when they became infected, −1 when they stopped being infected.
    ///
    /// The caller guarantees `became_infected` differs from the person's
    /// previous infection status.  O(k) for k memberships.
    ///
    /// # Panics
    /// Panics if a decrement would take a counter below zero.
    pub fn on_state_change(&mut self, person: PersonId, became_infected: bool) {
        let Some(cohorts) = self.memberships.get(person.slot()) else {
            return;
        };
        for &group in cohorts {
            let Some(state) = self.groups.find_mut(group) else {
                unreachable!("membership edge to unregistered cohort {group}");
            };
            if became_infected {
                state.infected += 1;
            } else {
                state.infected = state
                    .infected
                    .checked_sub(1)
                    .unwrap_or_else(|| panic!("infected count of {group} would drop below zero"));
            }
        }
    }

    /// Drop every group and membership; handles restart at 1.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    // ── Queries ───────────────────────────────────────────────────────────

    /// O(1) read of one group's counters.
    ///
    /// # Panics
    /// Panics if `group` is not registered.
    #[inline]
    pub fn group_state(&self, group: GroupId) -> &GroupState {
        match self.groups.find(group) {
            Some(state) => state,
            None => panic!("unregistered cohort {group}"),
        }
    }

    /// All group states in registration order (aligned with
    /// [`group_names`](Self::group_names) and [`groups`](Self::groups)).
    #[inline]
    pub fn group_states(&self) -> &[GroupState] {
        self.groups.values()
    }

    /// All group names in registration order.
    pub fn group_names(&self) -> impl ExactSizeIterator<Item = &str> {
        self.names.values().iter().map(String::as_str)
    }

    /// All group handles in registration order.
    #[inline]
    pub fn groups(&self) -> &[GroupId] {
        self.groups.agents()
    }

    pub fn group_name(&self, group: GroupId) -> Option<&str> {
        self.names.find(group).map(String::as_str)
    }

    /// `true` if the (group, person) edge exists.
    #[inline]
    pub fn contains(&self, group: GroupId, person: PersonId) -> bool {
        self.edges.contains(&(group, person))
    }

    /// Every cohort `person` belongs to, in the order memberships were added.
    #[inline]
    pub fn cohorts_of(&self, person: PersonId) -> &[GroupId] {
        if !person.is_valid() {
            return &[];
        }
        self.memberships
            .get(person.slot())
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Total number of membership edges.
    #[inline]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }
}
