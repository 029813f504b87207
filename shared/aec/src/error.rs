use thiserror::Error;

pub type AecResult<T> = Result<T, AecError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AecError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("step size is not applicable to NLMS (it derives its own from signal power)")]
    StepSizeNotApplicable,
}
