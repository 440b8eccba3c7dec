//! `abm-cohort` — the cohort connectivity ledger.
//!
//! People belong to zero or more named social groups (cohorts).  The ledger
//! records every (person, group) membership edge and keeps, per group, live
//! counts of total and infected members.  The transition kernel reads those
//! counts in O(1), so the infection probability of a person in k cohorts
//! costs O(k) instead of a population rescan.
//!
//! | Module     | Contents                          |
//! |------------|-----------------------------------|
//! | [`ledger`] | `CohortLedger`                    |
//! | [`group`]  | `GroupState` aggregate counters   |

pub mod group;
pub mod ledger;


pub use group::GroupState;
pub use ledger::CohortLedger;
