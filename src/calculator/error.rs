//! Faults raised while evaluating expressions or applying functions.

use thiserror::Error;

/// Coarse classification of a [`CalcError`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FaultKind {
    /// The expression could not be parsed or evaluated.
    Evaluation,
    /// Evaluation produced infinity or NaN.
    NonFiniteResult,
    /// A function was applied outside its domain.
    Domain,
}

#[derive(Clone, Debug, Error, PartialEq)]
pub enum CalcError {
    #[error("cannot evaluate expression: {0}")]
    Evaluation(String),

    #[error("unknown function '{0}'")]
    UnknownFunction(String),

    #[error("result is not a finite number ({0})")]
    NonFiniteResult(f64),

    #[error("{function} is not defined for {value}")]
    Domain { function: &'static str, value: f64 },
}

impl CalcError {
    pub fn evaluation(message: impl Into<String>) -> Self {
        Self::Evaluation(message.into())
    }

    pub fn kind(&self) -> FaultKind {
        match self {
            Self::Evaluation(_) | Self::UnknownFunction(_) => FaultKind::Evaluation,
            Self::NonFiniteResult(_) => FaultKind::NonFiniteResult,
            Self::Domain { .. } => FaultKind::Domain,
        }
    }
}

pub type CalcResult<T> = Result<T, CalcError>;
