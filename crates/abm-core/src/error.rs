//! Framework error type.
//!
//! Sub-crates define their own error enums (`SirError`, `OdeError`,
//! `OutputError`) and may wrap `AbmError` as one variant.

use thiserror::Error;

/// The top-level error type for `abm-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum AbmError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("invalid rate for {what}: {value} (must be finite and > 0)")]
    InvalidRate { what: &'static str, value: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Shorthand result type for all `abm-*` crates.
pub type AbmResult<T> = Result<T, AbmError>;

/// Check that `value` is usable as the rate of an exponential distribution.
pub fn check_rate(what: &'static str, value: f64) -> AbmResult<f64> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(AbmError::InvalidRate { what, value })
    }
}
