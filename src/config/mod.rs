mod initialize;
pub use initialize::{Initializer, SessionAuthenticator};

mod config;
pub use config::{ApiConfig, Config, SessionConfig};

pub mod env {
    pub const LOG_DIRECTIVE: &str = "PROPRENT_LOG";
}
