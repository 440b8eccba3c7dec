use abm_core::AbmError;
use thiserror::Error;

/// Configuration errors, reported before a run starts.
///
/// Once a model is built every tick is total; there are no runtime errors.
#[derive(Debug, Error)]
pub enum SirError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Core(#[from] AbmError),

    #[error("cohort {0:?} is defined more than once")]
    DuplicateCohort(String),

    #[error("connection {index} names unknown cohort {name:?}")]
    UnknownCohort { index: usize, name: String },

    #[error("connection {index} names cohort {name:?} more than once")]
    RepeatedCohort { index: usize, name: String },

    #[error("connection {index} names {got} cohorts; at most {max} are supported")]
    TooManyCohorts { index: usize, got: usize, max: usize },

    #[error("population is empty: no connection defines any agents")]
    EmptyPopulation,

    #[error("population of {0} agents exceeds the u32 handle space")]
    PopulationTooLarge(u64),
}

pub type SirResult<T> = Result<T, SirError>;
