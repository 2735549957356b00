use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

use crate::common::{self, debug, trace, ErrorKind};
use crate::core::{
    Credential, LoginForm, PasswordChange, Principal, PrincipalUpdate, ProfilePatch,
    RegistrationForm,
};
use crate::identity::message::error_message;
use crate::identity::{AuthGrant, Envelope, IdentityApi, IdentityError};

/// Paths relative to the api base url.
pub mod endpoint {
    pub const LOGIN: &str = "auth/login";
    pub const REGISTER: &str = "auth/register";
    pub const ME: &str = "auth/me";
    pub const UPDATE_PROFILE: &str = "auth/updateprofile";
    pub const UPDATE_PASSWORD: &str = "auth/updatepassword";
    pub const LOGOUT: &str = "auth/logout";
}

/// Identity service reached over its REST api.
#[derive(Debug, Clone)]
pub struct HttpIdentity {
    base: Url,
    client: reqwest::Client,
}

impl HttpIdentity {
    pub fn new(base_url: &str, request_timeout: Duration) -> crate::Result<Self> {
        Ok(Self::build(base_url, request_timeout)?)
    }

    fn build(base_url: &str, request_timeout: Duration) -> common::Result<Self> {
        // Relative joins replace the last segment unless the base ends with '/'.
        let normalized = if base_url.ends_with('/') {
            base_url.to_owned()
        } else {
            format!("{}/", base_url)
        };
        let base = Url::parse(&normalized).map_err(|err| ErrorKind::InvalidUrl {
            url: base_url.to_owned(),
            description: err.to_string(),
        })?;
        if base.cannot_be_a_base() {
            return Err(ErrorKind::InvalidUrl {
                url: base_url.to_owned(),
                description: "not usable as a base url".to_owned(),
            }
            .into());
        }

        let client = reqwest::Client::builder()
            .timeout(request_timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self { base, client })
    }

    pub fn base_url(&self) -> &Url {
        &self.base
    }

    fn url(&self, path: &str) -> Result<Url, IdentityError> {
        self.base.join(path).map_err(|err| IdentityError::Network {
            description: format!("join {}: {}", path, err),
        })
    }

    async fn call<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<Envelope<T>, IdentityError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        debug!(path, status = status.as_u16(), bytes = body.len(), "Identity response");

        if status == StatusCode::UNAUTHORIZED {
            return Err(IdentityError::Unauthorized {
                message: error_message(&body),
            });
        }
        if !status.is_success() {
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let envelope: Envelope<T> =
            serde_json::from_slice(&body).map_err(|err| IdentityError::Decode {
                description: format!("{}: {}", path, err),
            })?;
        if !envelope.success {
            return Err(IdentityError::Rejected {
                status: status.as_u16(),
                message: envelope.error,
            });
        }

        Ok(envelope)
    }

    fn grant(path: &str, envelope: Envelope<Principal>) -> Result<AuthGrant, IdentityError> {
        match (envelope.token, envelope.data) {
            (Some(token), Some(principal)) => Ok(AuthGrant {
                credential: Credential::new(token),
                principal,
            }),
            _ => Err(IdentityError::Decode {
                description: format!("{}: response without token or user", path),
            }),
        }
    }

    fn data<T>(path: &str, envelope: Envelope<T>) -> Result<T, IdentityError> {
        envelope.data.ok_or_else(|| IdentityError::Decode {
            description: format!("{}: response without data", path),
        })
    }

    async fn profile_form(patch: &ProfilePatch) -> Result<Form, IdentityError> {
        let mut form = Form::new();
        if let Some(name) = &patch.name {
            form = form.text("name", name.clone());
        }
        if let Some(email) = &patch.email {
            form = form.text("email", email.clone());
        }
        if let Some(contact_number) = &patch.contact_number {
            form = form.text("contactNumber", contact_number.clone());
        }
        // Nested objects travel as json encoded text fields.
        if let Some(address) = &patch.address {
            let encoded = serde_json::to_string(address).map_err(|err| IdentityError::Decode {
                description: err.to_string(),
            })?;
            form = form.text("address", encoded);
        }
        if let Some(image) = &patch.profile_image {
            form = form.part("profileImage", Self::image_part(image).await?);
        }
        Ok(form)
    }

    async fn image_part(path: &Path) -> Result<Part, IdentityError> {
        let local_error = |description: String| IdentityError::LocalFile {
            path: path.display().to_string(),
            description,
        };

        let metadata = tokio::fs::metadata(path)
            .await
            .map_err(|err| local_error(err.to_string()))?;
        if metadata.len() > crate::core::MAX_IMAGE_BYTES {
            return Err(local_error(
                "File size too large. Maximum size is 5MB".to_owned(),
            ));
        }
        let buf = tokio::fs::read(path)
            .await
            .map_err(|err| local_error(err.to_string()))?;

        let file_name = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "profile".to_owned());
        let mime = match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.to_ascii_lowercase())
            .as_deref()
        {
            Some("png") => "image/png",
            Some("gif") => "image/gif",
            Some("webp") => "image/webp",
            _ => "image/jpeg",
        };

        Part::bytes(buf)
            .file_name(file_name)
            .mime_str(mime)
            .map_err(IdentityError::from)
    }
}

#[async_trait]
impl IdentityApi for HttpIdentity {
    async fn login(&self, form: &LoginForm) -> Result<AuthGrant, IdentityError> {
        trace!(?form, "Login");
        let request = self.client.post(self.url(endpoint::LOGIN)?).json(form);
        let envelope = self.call(endpoint::LOGIN, request).await?;
        Self::grant(endpoint::LOGIN, envelope)
    }

    async fn register(&self, form: &RegistrationForm) -> Result<AuthGrant, IdentityError> {
        trace!(?form, "Register");
        let request = self.client.post(self.url(endpoint::REGISTER)?).json(form);
        let envelope = self.call(endpoint::REGISTER, request).await?;
        Self::grant(endpoint::REGISTER, envelope)
    }

    async fn me(&self, credential: &Credential) -> Result<Principal, IdentityError> {
        let request = self
            .client
            .get(self.url(endpoint::ME)?)
            .bearer_auth(credential.expose());
        let envelope = self.call(endpoint::ME, request).await?;
        Self::data(endpoint::ME, envelope)
    }

    async fn update_profile(
        &self,
        credential: &Credential,
        patch: &ProfilePatch,
    ) -> Result<PrincipalUpdate, IdentityError> {
        let form = Self::profile_form(patch).await?;
        let request = self
            .client
            .put(self.url(endpoint::UPDATE_PROFILE)?)
            .bearer_auth(credential.expose())
            .multipart(form);
        let envelope = self.call(endpoint::UPDATE_PROFILE, request).await?;
        Self::data(endpoint::UPDATE_PROFILE, envelope)
    }

    async fn update_password(
        &self,
        credential: &Credential,
        change: &PasswordChange,
    ) -> Result<(), IdentityError> {
        let request = self
            .client
            .put(self.url(endpoint::UPDATE_PASSWORD)?)
            .bearer_auth(credential.expose())
            .json(change);
        self.call::<serde_json::Value>(endpoint::UPDATE_PASSWORD, request)
            .await
            .map(|_| ())
    }

    async fn logout(&self, credential: Option<&Credential>) -> Result<(), IdentityError> {
        let mut request = self.client.get(self.url(endpoint::LOGOUT)?);
        if let Some(credential) = credential {
            request = request.bearer_auth(credential.expose());
        }
        self.call::<serde_json::Value>(endpoint::LOGOUT, request)
            .await
            .map(|_| ())
    }
}
