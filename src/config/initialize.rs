use std::path::Path;

use tokio::fs;

use crate::common::{debug, Result};
use crate::config::Config;
use crate::core::{Authenticator, FileStore, TracingNotifier};
use crate::identity::HttpIdentity;

/// Authenticator wired to the real identity service and the session file.
pub type SessionAuthenticator = Authenticator<HttpIdentity, FileStore, TracingNotifier>;

#[derive(Debug, Default)]
pub struct Initializer {
    pub config: Config,
}

impl Initializer {
    /// Read the yaml config file. A missing file yields the defaults.
    pub async fn load_config_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let f = match fs::File::open(path).await {
            Ok(f) => f,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "Config file not found, using defaults");
                return Ok(Self::default());
            }
            Err(err) => return Err(err.into()),
        };
        let config = serde_yaml::from_reader::<_, Config>(f.into_std().await)?;

        Ok(Self { config })
    }

    pub fn build_authenticator(&self) -> crate::Result<SessionAuthenticator> {
        let api = HttpIdentity::new(self.config.api.base_url(), self.config.api.request_timeout())?;
        let store = FileStore::new(self.config.session.path());

        Ok(Authenticator::new(api, store, TracingNotifier)
            .with_resolve_timeout(self.config.session.resolve_timeout()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_falls_back_to_defaults() {
        tokio_test::block_on(async move {
            let dir = tempfile::tempdir().unwrap();
            let initializer = Initializer::load_config_file(dir.path().join("absent.yaml"))
                .await
                .unwrap();

            assert_eq!(initializer.config.api.base_url(), "http://localhost:5000/api");
        });
    }

    #[tokio::test]
    async fn load_yaml_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        tokio::fs::write(
            &path,
            "api:\n  base_url: http://127.0.0.1:8080/api\nsession:\n  path: /tmp/proprent/session\n",
        )
        .await
        .unwrap();

        let initializer = Initializer::load_config_file(&path).await.unwrap();

        assert_eq!(initializer.config.api.base_url(), "http://127.0.0.1:8080/api");
        assert_eq!(
            initializer.config.session.path(),
            std::path::PathBuf::from("/tmp/proprent/session")
        );
        assert!(initializer.build_authenticator().is_ok());
    }
}
