//! Fluent builder for constructing a [`SirModel`].

use abm_core::RunConfig;

use crate::{Parameters, SirModel, SirResult};

/// Fluent builder for [`SirModel`].
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default                     |
/// |--------------|-----------------------------|
/// | `.seed(s)`   | `RunConfig::default().seed` |
///
/// # Example
///
/// ```rust,ignore
/// let params = Parameters::single_cohort(0.10, 0.24, 2, 9_990, 10);
/// let mut model = SirBuilder::new(params).seed(42).build()?;
/// model.run(&RunConfig::default(), &mut NoopObserver);
/// ```
pub struct SirBuilder {
    params: Parameters,
    seed:   u64,
}

impl SirBuilder {
    pub fn new(params: Parameters) -> Self {
        Self { params, seed: RunConfig::default().seed }
    }

    /// Seed of the model's random stream.
    pub fn seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Take the seed from a run configuration.
    pub fn config(self, config: &RunConfig) -> Self {
        self.seed(config.seed)
    }

    /// Validate the parameters and build the population.
    pub fn build(self) -> SirResult<SirModel> {
        SirModel::new(self.params, self.seed)
    }
}
