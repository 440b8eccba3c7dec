//! Fixed-step fourth-order Runge–Kutta integration.

use std::ops::{Add, Mul};

use crate::{OdeError, OdeResult};

/// An autonomous or time-dependent system `dx/dt = f(t, x)`.
pub trait OdeSystem {
    /// State vector.  Only addition and scaling are needed by RK4.
    type State: Copy + Add<Output = Self::State> + Mul<f64, Output = Self::State>;

    fn derivative(&self, t: f64, x: Self::State) -> Self::State;
}

/// Advance `x` by one RK4 step of size `dt` starting at time `t`.
#[inline]
pub fn rk4_step<S: OdeSystem>(system: &S, t: f64, x: S::State, dt: f64) -> S::State {
    let half = dt / 2.0;
    let k1 = system.derivative(t, x);
    let k2 = system.derivative(t + half, x + k1 * half);
    let k3 = system.derivative(t + half, x + k2 * half);
    let k4 = system.derivative(t + dt, x + k3 * dt);
    x + (k1 + k2 * 2.0 + k3 * 2.0 + k4) * (dt / 6.0)
}

/// Integrate `steps` steps of size `dt` from `t = 0`.
///
/// `visit(t, x)` sees each state *before* it is advanced, so it is called
/// exactly `steps` times, first with `(0.0, initial)`.  Returns the state
/// after the final step (`initial` when `steps == 0`).
pub fn integrate<S, V>(
    system:  &S,
    initial: S::State,
    dt:      f64,
    steps:   usize,
    mut visit: V,
) -> OdeResult<S::State>
where
    S: OdeSystem,
    V: FnMut(f64, S::State),
{
    if !(dt.is_finite() && dt > 0.0) {
        return Err(OdeError::InvalidStep(dt));
    }

    let mut x = initial;
    for step in 0..steps {
        // Recompute from the index so round-off does not accumulate in `t`.
        let t = step as f64 * dt;
        visit(t, x);
        x = rk4_step(system, t, x, dt);
    }
    Ok(x)
}
