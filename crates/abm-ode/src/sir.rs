//! Mean-field SIR equations.
//!
//! ```text
//! dS/dt = -β·I·S/N
//! dI/dt =  β·I·S/N − γ·I
//! dR/dt =  γ·I
//! ```

use std::ops::{Add, Mul};

use crate::{OdeError, OdeResult, OdeSystem};

/// Compartment sizes as real numbers.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct SirOdeState {
    pub s: f64,
    pub i: f64,
    pub r: f64,
}

impl SirOdeState {
    pub fn new(s: f64, i: f64, r: f64) -> Self {
        Self { s, i, r }
    }

    #[inline]
    pub fn total(&self) -> f64 {
        self.s + self.i + self.r
    }
}

impl Add for SirOdeState {
    type Output = SirOdeState;
    #[inline]
    fn add(self, rhs: SirOdeState) -> SirOdeState {
        SirOdeState { s: self.s + rhs.s, i: self.i + rhs.i, r: self.r + rhs.r }
    }
}

impl Mul<f64> for SirOdeState {
    type Output = SirOdeState;
    #[inline]
    fn mul(self, k: f64) -> SirOdeState {
        SirOdeState { s: self.s * k, i: self.i * k, r: self.r * k }
    }
}

impl Mul<SirOdeState> for f64 {
    type Output = SirOdeState;
    #[inline]
    fn mul(self, x: SirOdeState) -> SirOdeState {
        x * self
    }
}

/// Closed, well-mixed population of size `n`.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SirOde {
    pub n:     f64,
    pub beta:  f64,
    pub gamma: f64,
}

impl SirOde {
    /// Rejects non-positive `n` and negative or non-finite rates.
    pub fn new(n: f64, beta: f64, gamma: f64) -> OdeResult<Self> {
        if !(n.is_finite() && n > 0.0) {
            return Err(OdeError::InvalidParameter { what: "n", value: n });
        }
        for (what, value) in [("beta", beta), ("gamma", gamma)] {
            if !(value.is_finite() && value >= 0.0) {
                return Err(OdeError::InvalidParameter { what, value });
            }
        }
        Ok(Self { n, beta, gamma })
    }

    /// `S = n - infected`, `I = infected`, `R = 0`.
    pub fn initial(&self, infected: f64) -> SirOdeState {
        SirOdeState::new(self.n - infected, infected, 0.0)
    }

    /// Basic reproduction number `β/γ`.
    pub fn r0(&self) -> f64 {
        self.beta / self.gamma
    }
}

impl OdeSystem for SirOde {
    type State = SirOdeState;

    #[inline]
    fn derivative(&self, _t: f64, x: SirOdeState) -> SirOdeState {
        let infection = self.beta * x.i * x.s / self.n;
        let recovery = self.gamma * x.i;
        SirOdeState {
            s: -infection,
            i: infection - recovery,
            r: recovery,
        }
    }
}
