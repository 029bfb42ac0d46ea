use yao_circuits::ParseError;
use yao_core::utils::ConversionError;
use yao_garble_core::{EvaluatorError, GeneratorError, IntegrityError, SerializationError};
use yao_ot_core::OtError;

use crate::config::Role;

/// Errors that can occur during a session.
///
/// Every error is terminal: the session that returned it discards its secrets
/// and rejects any further call. Start a new session instead.
#[derive(Debug, thiserror::Error)]
#[allow(missing_docs)]
pub enum SessionError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error("{operation} can only be performed by the {expected}, session role is {actual}")]
    Role {
        operation: &'static str,
        expected: Role,
        actual: Role,
    },
    #[error("invalid {what} length: expected {expected}, got {actual}")]
    LengthMismatch {
        what: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error(transparent)]
    Integrity(#[from] IntegrityError),
    #[error("oblivious transfer failed: {0}")]
    Ot(#[from] OtError),
    #[error("invalid input: {0}")]
    InvalidInput(#[from] ConversionError),
    #[error("invalid state: {0}")]
    State(&'static str),
    #[error(transparent)]
    Serialization(#[from] SerializationError),
}

impl From<GeneratorError> for SessionError {
    fn from(err: GeneratorError) -> Self {
        match err {
            GeneratorError::InputLength { expected, actual } => Self::LengthMismatch {
                what: "garbler input",
                expected,
                actual,
            },
            GeneratorError::NotFinished => Self::State("garbling not finished"),
        }
    }
}

impl From<EvaluatorError> for SessionError {
    fn from(err: EvaluatorError) -> Self {
        match err {
            EvaluatorError::AssignmentLength { expected, actual } => Self::LengthMismatch {
                what: "assignment",
                expected,
                actual,
            },
            EvaluatorError::Integrity(err) => Self::Integrity(err),
            EvaluatorError::NotFinished => Self::State("evaluation not finished"),
        }
    }
}
