//! Unit tests for abm-core primitives.

#[cfg(test)]
mod ids {
    use crate::{GroupId, Handle, PersonId};

    #[test]
    fn slot_roundtrip() {
        let id = PersonId::from_raw(42);
        assert_eq!(id.slot(), 41);
        assert_eq!(PersonId::from_slot(41), id);
    }

    #[test]
    fn default_is_invalid() {
        assert_eq!(PersonId::default(), PersonId::INVALID);
        assert!(!GroupId::default().is_valid());
        assert_eq!(GroupId::INVALID.raw(), 0);
    }

    #[test]
    fn ordering() {
        assert!(PersonId::from_raw(1) < PersonId::from_raw(2));
        assert!(GroupId::from_raw(100) > GroupId::from_raw(99));
    }

    #[test]
    fn display() {
        assert_eq!(PersonId::from_raw(7).to_string(), "PersonId(7)");
        assert_eq!(GroupId::from_raw(3).to_string(), "GroupId(3)");
    }
}

#[cfg(test)]
mod time {
    use crate::{RunConfig, Tick};

    #[test]
    fn tick_arithmetic() {
        let mut t = Tick(10);
        t.advance();
        assert_eq!(t, Tick(11));
        assert_eq!(t + 4, Tick(15));
        assert_eq!(t.offset(1), Tick(12));
        assert_eq!(Tick(3).to_string(), "T3");
    }

    #[test]
    fn run_config_end_tick() {
        let cfg = RunConfig { total_ticks: 364, seed: 1 };
        assert_eq!(cfg.end_tick(), Tick(364));
    }
}

#[cfg(test)]
mod rng {
    use rand_distr::Exp;

    use crate::SimRng;
    use crate::rng::mix_seed;

    #[test]
    fn same_seed_same_stream() {
        let mut a = SimRng::new(99);
        let mut b = SimRng::new(99);
        for _ in 0..16 {
            assert_eq!(a.uniform(), b.uniform());
        }
    }

    #[test]
    fn different_seeds_differ() {
        let mut a = SimRng::new(1);
        let mut b = SimRng::new(2);
        let x: u64 = a.random();
        let y: u64 = b.random();
        assert_ne!(x, y);
    }

    #[test]
    fn uniform_in_unit_interval() {
        let mut rng = SimRng::new(7);
        for _ in 0..10_000 {
            let u = rng.uniform();
            assert!((0.0..1.0).contains(&u));
        }
    }

    #[test]
    fn sample_ticks_mean_tracks_rate() {
        let mut rng = SimRng::new(3);
        let exp = Exp::new(0.1).unwrap();
        let n = 20_000;
        let total: u64 = (0..n).map(|_| rng.sample_ticks(&exp) as u64).sum();
        let mean = total as f64 / n as f64;
        // Rounded Exp(0.1) has mean ≈ 10.
        assert!((9.0..11.0).contains(&mean), "mean = {mean}");
    }

    #[test]
    fn gen_bool_clamps() {
        let mut rng = SimRng::new(0);
        assert!(rng.gen_bool(2.0));
        assert!(!rng.gen_bool(-1.0));
    }

    #[test]
    fn child_streams_are_deterministic() {
        let mut root_a = SimRng::new(5);
        let mut root_b = SimRng::new(5);
        let x: u64 = root_a.child(3).random();
        let y: u64 = root_b.child(3).random();
        assert_eq!(x, y);
    }

    #[test]
    fn mixed_seeds_are_distinct() {
        assert_ne!(mix_seed(0, 0), mix_seed(0, 1));
        assert_ne!(mix_seed(0, 0), 0);
    }
}
