//! `abm-core` — foundational types for the `abm` epidemic simulator.
//!
//! This crate is a dependency of every other `abm-*` crate.  It has no
//! `abm-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module    | Contents                                               |
//! |-----------|--------------------------------------------------------|
//! | [`ids`]   | `Handle` trait, `PersonId`, `GroupId`                  |
//! | [`time`]  | `Tick`, `RunConfig`                                    |
//! | [`rng`]   | `SimRng` (one stream per simulation instance)          |
//! | [`error`] | `AbmError`, `AbmResult`                                |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to handles, `Tick`, and     |
//! |         | `RunConfig`.                                               |

pub mod error;
pub mod ids;
pub mod rng;
pub mod time;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{AbmError, AbmResult};
pub use ids::{GroupId, Handle, PersonId};
pub use rng::SimRng;
pub use time::{RunConfig, Tick};
