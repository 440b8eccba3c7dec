//! `abm-ode` — deterministic reference model for the stochastic SIR kernel.
//!
//! | Module    | Contents                                         |
//! |-----------|--------------------------------------------------|
//! | [`rk4`]   | `OdeSystem` trait, `rk4_step`, `integrate`       |
//! | [`sir`]   | `SirOde`, `SirOdeState`                          |
//! | [`error`] | `OdeError`, `OdeResult`                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use abm_ode::{integrate, SirOde};
//!
//! let ode = SirOde::new(10_000.0, 0.24, 0.10)?;
//! integrate(&ode, ode.initial(10.0), 0.01, 36_400, |t, x| {
//!     println!("{t:.2},{:.1},{:.1},{:.1}", x.s, x.i, x.r);
//! })?;
//! ```

pub mod error;
pub mod rk4;
pub mod sir;

#[cfg(test)]
mod tests;

pub use error::{OdeError, OdeResult};
pub use rk4::{OdeSystem, integrate, rk4_step};
pub use sir::{SirOde, SirOdeState};
