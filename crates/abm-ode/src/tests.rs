//! Unit tests for abm-ode.

#[cfg(test)]
mod rk4 {
    use crate::{OdeError, OdeSystem, integrate, rk4_step};

    /// dx/dt = -k·x, exact solution x₀·e^(−kt).
    struct Decay(f64);

    impl OdeSystem for Decay {
        type State = f64;
        fn derivative(&self, _t: f64, x: f64) -> f64 {
            -self.0 * x
        }
    }

    /// dx/dt = t, exact solution t²/2.
    struct Ramp;

    impl OdeSystem for Ramp {
        type State = f64;
        fn derivative(&self, t: f64, _x: f64) -> f64 {
            t
        }
    }

    #[test]
    fn exponential_decay_is_accurate() {
        let end = integrate(&Decay(0.5), 1.0, 0.01, 400, |_, _| {}).unwrap();
        assert!((end - (-2.0_f64).exp()).abs() < 1e-9);
    }

    #[test]
    fn time_dependent_system_is_exact_for_polynomials() {
        let end = integrate(&Ramp, 0.0, 0.1, 30, |_, _| {}).unwrap();
        assert!((end - 4.5).abs() < 1e-9);
    }

    #[test]
    fn single_step_matches_integrate() {
        let x = rk4_step(&Decay(1.0), 0.0, 2.0, 0.1);
        let y = integrate(&Decay(1.0), 2.0, 0.1, 1, |_, _| {}).unwrap();
        assert_eq!(x, y);
    }

    #[test]
    fn visitor_sees_states_before_each_step() {
        let mut seen = Vec::new();
        let end = integrate(&Decay(1.0), 1.0, 0.5, 3, |t, x| seen.push((t, x))).unwrap();
        assert_eq!(seen.len(), 3);
        assert_eq!(seen[0], (0.0, 1.0));
        assert_eq!(seen[2].0, 1.0);
        // The final state is returned, not visited.
        assert!(seen.iter().all(|&(_, x)| x > end));
    }

    #[test]
    fn zero_steps_returns_initial_without_visiting() {
        let mut calls = 0;
        let end = integrate(&Decay(1.0), 3.0, 0.1, 0, |_, _| calls += 1).unwrap();
        assert_eq!((end, calls), (3.0, 0));
    }

    #[test]
    fn bad_step_rejected() {
        for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                integrate(&Decay(1.0), 1.0, dt, 10, |_, _| {}),
                Err(OdeError::InvalidStep(_))
            ));
        }
    }
}

#[cfg(test)]
mod sir {
    use crate::{OdeError, SirOde, SirOdeState, integrate};

    #[test]
    fn state_arithmetic() {
        let a = SirOdeState::new(1.0, 2.0, 3.0);
        assert_eq!(a + a, SirOdeState::new(2.0, 4.0, 6.0));
        assert_eq!(a * 0.5, 0.5 * a);
        assert_eq!(a.total(), 6.0);
    }

    #[test]
    fn rejects_bad_parameters() {
        assert!(matches!(SirOde::new(0.0, 0.2, 0.1), Err(OdeError::InvalidParameter { what: "n", .. })));
        assert!(matches!(SirOde::new(10.0, -0.2, 0.1), Err(OdeError::InvalidParameter { what: "beta", .. })));
        assert!(matches!(SirOde::new(10.0, 0.2, f64::NAN), Err(OdeError::InvalidParameter { what: "gamma", .. })));
    }

    #[test]
    fn no_infected_is_an_equilibrium() {
        let ode = SirOde::new(1_000.0, 0.5, 0.1).unwrap();
        let end = integrate(&ode, ode.initial(0.0), 0.01, 1_000, |_, _| {}).unwrap();
        assert_eq!(end, SirOdeState::new(1_000.0, 0.0, 0.0));
    }

    #[test]
    fn population_is_conserved_and_epidemic_burns_out() {
        let ode = SirOde::new(10_000.0, 0.48, 0.10).unwrap();
        let mut peak = 0.0_f64;
        let end = integrate(&ode, ode.initial(10.0), 0.01, 36_400, |_, x| {
            assert!((x.total() - 10_000.0).abs() < 1e-6);
            assert!(x.s >= 0.0 && x.i >= 0.0 && x.r >= 0.0);
            peak = peak.max(x.i);
        })
        .unwrap();

        assert!(end.i < 1.0);
        assert!(end.r > 9_500.0);
        assert!(peak > 1_000.0);
    }

    #[test]
    fn subcritical_epidemic_dies_out() {
        let ode = SirOde::new(10_000.0, 0.05, 0.10).unwrap();
        assert!(ode.r0() < 1.0);
        let end = integrate(&ode, ode.initial(10.0), 0.01, 36_400, |_, _| {}).unwrap();
        assert!(end.r < 100.0);
        assert!(end.i < 0.01);
    }
}
