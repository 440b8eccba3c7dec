//! `abm-sir` — stochastic SIR transition kernel.
//!
//! # Tick
//!
//! ```text
//! for each tick:
//!   ① Susceptible — timer 1      → Infected (already committed)
//!                   timer > 1    → count down
//!                   timer 0      → one Bernoulli trial per cohort with
//!                                  p = infected / total; first success draws
//!                                  an Exp(beta_star) incubation timer, and a
//!                                  timer rounding to 0 infects immediately
//!   ② Infected    — timer 0      → Recovered, else count down
//!   ③ Recovered   — terminal
//! ```
//!
//! Every transition erases the agent from its old store with swap-and-pop
//! before inserting it into the new one, then notifies the
//! [`CohortLedger`][abm_cohort::CohortLedger] so cohort prevalence is current
//! for the very next agent visited.
//!
//! # Modules
//!
//! | Module       | Contents                                              |
//! |--------------|-------------------------------------------------------|
//! | [`params`]   | `Parameters`, `GroupParams`, `ConnectionSpec`         |
//! | [`builder`]  | `SirBuilder`                                          |
//! | [`model`]    | `SirModel` and the tick kernel                        |
//! | [`observer`] | `SirObserver`, `NoopObserver`, `CountsRecorder`       |
//! | [`peaks`]    | `PeakTracker`                                         |
//! | [`batch`]    | `run_batch`, `seeds_from`                             |
//! | [`state`]    | S/I/R payloads, `DiseaseState`, `Counts`              |
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | `run_batch` distributes runs over Rayon's thread pool. |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use abm_core::RunConfig;
//! use abm_sir::{NoopObserver, Parameters, SirBuilder};
//!
//! let params = Parameters::single_cohort(0.10, 0.24, 2, 9_990, 10);
//! let mut model = SirBuilder::new(params).seed(42).build()?;
//! model.run(&RunConfig::default(), &mut NoopObserver);
//! println!("{:?}", model.counts());
//! ```

pub mod batch;
pub mod builder;
pub mod error;
pub mod model;
pub mod observer;
pub mod params;
pub mod peaks;
pub mod state;


pub use batch::{run_batch, seeds_from};
pub use builder::SirBuilder;
pub use error::{SirError, SirResult};
pub use model::SirModel;
pub use observer::{CountsRecorder, NoopObserver, SirObserver};
pub use params::{ConnectionSpec, GroupParams, MAX_GROUPS_PER_CONNECTION, Parameters};
pub use peaks::{Peak, PeakTracker};
pub use state::{Counts, DiseaseState, Infected, Recovered, Susceptible};
