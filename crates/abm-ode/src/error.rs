use thiserror::Error;

#[derive(Debug, Error)]
pub enum OdeError {
    #[error("time step must be finite and > 0, got {0}")]
    InvalidStep(f64),

    #[error("invalid model parameter {what}: {value}")]
    InvalidParameter { what: &'static str, value: f64 },
}

pub type OdeResult<T> = Result<T, OdeError>;
