use std::fmt;

use crate::core::{Credential, Principal};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Resolving,
    Authenticated,
    Anonymous,
}

/// Why the session ended up anonymous.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionError {
    // Persisted credential was rejected by the identity service.
    Expired,
    // Identity service could not be reached while resolving the session.
    Unreachable,
    TimedOut,
    Cancelled,
    // Login or registration failed with the given message.
    Rejected(String),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            SessionError::Expired => f.write_str("Session expired"),
            SessionError::Unreachable => f.write_str("Session expired (identity service unreachable)"),
            SessionError::TimedOut => f.write_str("Session expired (resolution timed out)"),
            SessionError::Cancelled => f.write_str("Session resolution cancelled"),
            SessionError::Rejected(message) => f.write_str(message),
        }
    }
}

/// Process wide authentication state.
///
/// Fields are private and every constructor yields a consistent triple of
/// principal, credential and loading flag: a principal never exists
/// without its credential.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    phase: Phase,
    principal: Option<Principal>,
    credential: Option<Credential>,
    loading: bool,
    error: Option<SessionError>,
}

impl SessionState {
    /// State before the startup resolution ran. Loading so that guards never
    /// redirect before the persisted credential was checked.
    pub fn uninitialized() -> Self {
        Self {
            phase: Phase::Uninitialized,
            principal: None,
            credential: None,
            loading: true,
            error: None,
        }
    }

    pub(crate) fn resolving(credential: Credential) -> Self {
        Self {
            phase: Phase::Resolving,
            principal: None,
            credential: Some(credential),
            loading: true,
            error: None,
        }
    }

    pub fn authenticated(principal: Principal, credential: Credential) -> Self {
        Self {
            phase: Phase::Authenticated,
            principal: Some(principal),
            credential: Some(credential),
            loading: false,
            error: None,
        }
    }

    pub fn anonymous(error: Option<SessionError>) -> Self {
        Self {
            phase: Phase::Anonymous,
            principal: None,
            credential: None,
            loading: false,
            error,
        }
    }

    /// Same state with an operation in flight.
    pub(crate) fn pending(&self) -> Self {
        Self {
            loading: true,
            error: None,
            ..self.clone()
        }
    }

    pub(crate) fn with_principal(&self, principal: Principal) -> Self {
        Self {
            principal: Some(principal),
            ..self.clone()
        }
    }

    pub(crate) fn without_error(&self) -> Self {
        Self {
            error: None,
            ..self.clone()
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn principal(&self) -> Option<&Principal> {
        self.principal.as_ref()
    }

    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn is_authenticated(&self) -> bool {
        self.principal.is_some()
    }

    pub fn error(&self) -> Option<&SessionError> {
        self.error.as_ref()
    }
}

impl Default for SessionState {
    fn default() -> Self {
        SessionState::uninitialized()
    }
}
