use std::fmt;

pub(crate) const GENERIC_FAILURE: &str = "An error occurred";

/// Failure talking to the identity service.
///
/// Authorization failures, backend rejections and transport problems are
/// kept apart so callers can react differently (only `Unauthorized`
/// expires a session).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IdentityError {
    // 401. The credential is missing, invalid or expired.
    Unauthorized { message: Option<String> },
    // Any other non success answer.
    Rejected { status: u16, message: Option<String> },
    Timeout,
    Network { description: String },
    Decode { description: String },
    LocalFile { path: String, description: String },
}

impl IdentityError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, IdentityError::Unauthorized { .. })
    }

    /// Message shown to the user. The backend's own message wins, then the
    /// operation specific `fallback`; transport and decode failures get a
    /// generic message.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            IdentityError::Unauthorized { message } | IdentityError::Rejected { message, .. } => {
                message.clone().unwrap_or_else(|| fallback.to_owned())
            }
            IdentityError::LocalFile { description, .. } => description.clone(),
            IdentityError::Timeout
            | IdentityError::Network { .. }
            | IdentityError::Decode { .. } => GENERIC_FAILURE.to_owned(),
        }
    }
}

impl fmt::Display for IdentityError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            IdentityError::Unauthorized { message } => {
                write!(f, "unauthorized")?;
                if let Some(message) = message {
                    write!(f, ": {}", message)?;
                }
                Ok(())
            }
            IdentityError::Rejected { status, message } => {
                write!(f, "rejected with status {}", status)?;
                if let Some(message) = message {
                    write!(f, ": {}", message)?;
                }
                Ok(())
            }
            IdentityError::Timeout => write!(f, "identity request timed out"),
            IdentityError::Network { description } => write!(f, "network error. {}", description),
            IdentityError::Decode { description } => {
                write!(f, "response decode error. {}", description)
            }
            IdentityError::LocalFile { path, description } => {
                write!(f, "read {}: {}", path, description)
            }
        }
    }
}

impl std::error::Error for IdentityError {}

impl From<reqwest::Error> for IdentityError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            IdentityError::Timeout
        } else if err.is_decode() {
            IdentityError::Decode {
                description: err.to_string(),
            }
        } else {
            IdentityError::Network {
                description: err.to_string(),
            }
        }
    }
}
