//! Independent repeated runs over a list of seeds.
//!
//! Every run builds its own [`SirModel`], so runs share nothing and can be
//! distributed freely.  With the `parallel` feature the runs execute on
//! Rayon's global pool; results are returned in seed order either way.

use abm_core::rng::mix_seed;
use tracing::debug;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::{Parameters, SirModel, SirObserver, SirResult};

/// `n` well-spread seeds derived from `base`.
pub fn seeds_from(base: u64, n: usize) -> Vec<u64> {
    (0..n as u64).map(|i| mix_seed(base, i)).collect()
}

/// Build one model per seed, run it for `ticks` ticks with the observer
/// returned by `make_observer(seed)`, and collect the observers.
///
/// Parameters are validated once up front; an invalid set fails the whole
/// batch before any run starts.
pub fn run_batch<O, F>(
    params:        &Parameters,
    seeds:         &[u64],
    ticks:         u64,
    make_observer: F,
) -> SirResult<Vec<O>>
where
    O: SirObserver + Send,
    F: Fn(u64) -> O + Sync,
{
    params.validate()?;
    debug!(runs = seeds.len(), ticks, "starting batch");

    let run_one = |&seed: &u64| -> SirResult<O> {
        let mut model = SirModel::new(params.clone(), seed)?;
        let mut observer = make_observer(seed);
        model.run_ticks(ticks, &mut observer);
        Ok(observer)
    };

    #[cfg(feature = "parallel")]
    let results = seeds.par_iter().map(run_one).collect();

    #[cfg(not(feature = "parallel"))]
    let results = seeds.iter().map(run_one).collect();

    results
}
