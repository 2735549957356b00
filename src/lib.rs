#![allow(clippy::module_inception)]

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod identity;
pub mod nav;
pub mod route;

pub use crate::error::ProprentError;
pub type Result<T, E = crate::error::ProprentError> = std::result::Result<T, E>;

pub use crate::core::{Credential, Outcome, Principal, Role};

pub(crate) mod common {
    pub(crate) type Result<T, E = crate::error::internal::Error> = std::result::Result<T, E>;

    pub(crate) type ErrorKind = crate::error::internal::ErrorKind;

    pub(crate) type Time = chrono::DateTime<chrono::Utc>;

    pub use tracing::{debug, error, info, trace, warn};
}
