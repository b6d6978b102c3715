use thiserror::Error;

use crate::domain::GreeningType;

/// Engine error types shared across catalog, optimizer and scenario code.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The catalog has no coefficients for the requested type. This is a
    /// configuration bug on the caller's side, never a user-input problem.
    #[error("unknown greening type: {0}")]
    UnknownType(GreeningType),

    #[error("coefficient catalog must contain at least one greening type")]
    EmptyCatalog,

    #[error("invalid scenario: {0}")]
    InvalidScenario(String),
}
