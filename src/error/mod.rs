pub(crate) mod internal;

use std::fmt;
use std::io;

use crate::identity::IdentityError;

#[derive(Debug)]
pub enum ProprentError {
    // No authenticated principal is available for the requested operation.
    Unauthenticated,
    // An authenticator operation resolved to a failure outcome.
    Failed { message: String },
    Identity(IdentityError),
    Internal(internal::Error),
}

impl fmt::Display for ProprentError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ProprentError::Unauthenticated => write!(f, "unauthenticated"),
            ProprentError::Failed { message } => write!(f, "{}", message),
            ProprentError::Identity(err) => err.fmt(f),
            ProprentError::Internal(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for ProprentError {}

impl ProprentError {
    /// Backtrace captured where an internal error was raised.
    pub fn backtrace(&self) -> Option<&backtrace::Backtrace> {
        match self {
            ProprentError::Internal(err) => err.backtrace(),
            _ => None,
        }
    }
}

impl From<internal::Error> for ProprentError {
    fn from(err: internal::Error) -> Self {
        ProprentError::Internal(err)
    }
}

impl From<internal::ErrorKind> for ProprentError {
    fn from(kind: internal::ErrorKind) -> Self {
        ProprentError::Internal(internal::Error::from(kind))
    }
}

impl From<io::Error> for ProprentError {
    fn from(err: io::Error) -> Self {
        ProprentError::Internal(internal::Error::from(err))
    }
}

impl From<IdentityError> for ProprentError {
    fn from(err: IdentityError) -> Self {
        ProprentError::Identity(err)
    }
}
