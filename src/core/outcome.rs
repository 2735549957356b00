use crate::{ProprentError, Result};

/// Settled result of an authenticator operation.
///
/// Collaborator failures never escape as errors; they are converted to a
/// human readable message carried by `Failure`.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum Outcome {
    Success,
    Failure(String),
}

impl Outcome {
    pub fn failure(message: impl Into<String>) -> Self {
        Outcome::Failure(message.into())
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            Outcome::Success => None,
            Outcome::Failure(message) => Some(message),
        }
    }

    pub fn into_result(self) -> Result<()> {
        match self {
            Outcome::Success => Ok(()),
            Outcome::Failure(message) => Err(ProprentError::Failed { message }),
        }
    }
}
