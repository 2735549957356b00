use std::path::PathBuf;
use std::time::Duration;

use serde::Deserialize;

#[derive(Debug, Deserialize, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

impl Config {
    pub(crate) fn override_merge(&mut self, other: &mut Config) {
        self.api.override_merge(&mut other.api);
        self.session.override_merge(&mut other.session);
    }
}

// Identity service configuration.
#[derive(Debug, Deserialize, Default)]
pub struct ApiConfig {
    // Base url every endpoint is relative to.
    base_url: Option<String>,
    // Timeout applied to each request.
    request_timeout_milliseconds: Option<u64>,
}

impl ApiConfig {
    const DEFAULT_BASE_URL: &'static str = "http://localhost:5000/api";
    const DEFAULT_REQUEST_TIMEOUT_MILLISECONDS: u64 = 10_000;
    const MIN_REQUEST_TIMEOUT_MILLISECONDS: u64 = 1;

    pub fn set_base_url(&mut self, val: &mut Option<String>) {
        if let Some(val) = val.take() {
            self.base_url = Some(val)
        }
    }
    pub fn set_request_timeout_milliseconds(&mut self, val: Option<u64>) {
        if let Some(val) = val {
            self.request_timeout_milliseconds = Some(val);
        }
    }
    fn override_merge(&mut self, other: &mut ApiConfig) {
        self.set_base_url(&mut other.base_url);
        self.set_request_timeout_milliseconds(other.request_timeout_milliseconds);
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_deref().unwrap_or(ApiConfig::DEFAULT_BASE_URL)
    }

    /// Configured timeout, never below the minimum wherever it came from.
    pub fn request_timeout(&self) -> Duration {
        let millis = self
            .request_timeout_milliseconds
            .unwrap_or(ApiConfig::DEFAULT_REQUEST_TIMEOUT_MILLISECONDS);
        Duration::from_millis(std::cmp::max(
            millis,
            ApiConfig::MIN_REQUEST_TIMEOUT_MILLISECONDS,
        ))
    }
}

// Session persistence configuration.
#[derive(Debug, Deserialize, Default)]
pub struct SessionConfig {
    // File holding the credential.
    path: Option<PathBuf>,
    // How long startup resolution may take before falling back to anonymous.
    resolve_timeout_milliseconds: Option<u64>,
}

impl SessionConfig {
    const DEFAULT_PATH: &'static str = ".proprent/session";
    const DEFAULT_RESOLVE_TIMEOUT_MILLISECONDS: u64 = 5_000;
    const MIN_RESOLVE_TIMEOUT_MILLISECONDS: u64 = 10;

    pub fn set_path(&mut self, val: &mut Option<PathBuf>) {
        if let Some(val) = val.take() {
            self.path = Some(val)
        }
    }
    pub fn set_resolve_timeout_milliseconds(&mut self, val: Option<u64>) {
        if let Some(val) = val {
            self.resolve_timeout_milliseconds = Some(val);
        }
    }
    fn override_merge(&mut self, other: &mut SessionConfig) {
        self.set_path(&mut other.path);
        self.set_resolve_timeout_milliseconds(other.resolve_timeout_milliseconds);
    }

    pub fn path(&self) -> PathBuf {
        self.path
            .clone()
            .unwrap_or_else(|| PathBuf::from(SessionConfig::DEFAULT_PATH))
    }

    /// Configured timeout, never below the minimum wherever it came from.
    pub fn resolve_timeout(&self) -> Duration {
        let millis = self
            .resolve_timeout_milliseconds
            .unwrap_or(SessionConfig::DEFAULT_RESOLVE_TIMEOUT_MILLISECONDS);
        Duration::from_millis(std::cmp::max(
            millis,
            SessionConfig::MIN_RESOLVE_TIMEOUT_MILLISECONDS,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::default();
        assert_eq!(config.api.base_url(), "http://localhost:5000/api");
        assert_eq!(config.api.request_timeout(), Duration::from_secs(10));
        assert_eq!(config.session.path(), PathBuf::from(".proprent/session"));
        assert_eq!(config.session.resolve_timeout(), Duration::from_secs(5));
    }

    #[test]
    fn yaml_then_override() {
        let yaml = r#"
api:
  base_url: "https://rent.example.com/api"
  request_timeout_milliseconds: 0
session:
  resolve_timeout_milliseconds: 1
"#;
        let mut config: Config = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.api.base_url(), "https://rent.example.com/api");
        // File values are clamped like command line values.
        assert_eq!(config.api.request_timeout(), Duration::from_millis(1));
        assert_eq!(config.session.resolve_timeout(), Duration::from_millis(10));

        let mut overrides = Config::default();
        overrides.api.set_base_url(&mut Some("http://127.0.0.1:9000/api".to_owned()));
        overrides.session.set_resolve_timeout_milliseconds(Some(2_000));
        config.override_merge(&mut overrides);

        assert_eq!(config.api.base_url(), "http://127.0.0.1:9000/api");
        assert_eq!(config.api.request_timeout(), Duration::from_millis(1));
        assert_eq!(config.session.resolve_timeout(), Duration::from_secs(2));
        assert_eq!(config.session.path(), PathBuf::from(".proprent/session"));
    }

    #[test]
    fn override_is_clamped() {
        let mut config = Config::default();
        let mut overrides = Config::default();
        overrides.session.set_resolve_timeout_milliseconds(Some(0));
        config.override_merge(&mut overrides);

        assert_eq!(config.session.resolve_timeout(), Duration::from_millis(10));
    }
}
