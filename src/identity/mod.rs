//! The identity service the session core talks to. The backend itself is
//! external; this module only owns its contract.

mod error;
pub use self::error::IdentityError;

mod message;
pub(crate) use self::message::Envelope;

pub mod http;
pub use self::http::HttpIdentity;

use async_trait::async_trait;

use crate::core::{
    Credential, LoginForm, PasswordChange, Principal, PrincipalUpdate, ProfilePatch,
    RegistrationForm,
};

/// Credential and principal handed out by login and registration.
#[derive(Debug, Clone, PartialEq)]
pub struct AuthGrant {
    pub credential: Credential,
    pub principal: Principal,
}

#[async_trait]
pub trait IdentityApi: Send + Sync {
    async fn login(&self, form: &LoginForm) -> Result<AuthGrant, IdentityError>;
    async fn register(&self, form: &RegistrationForm) -> Result<AuthGrant, IdentityError>;
    /// Resolve the principal owning `credential`.
    async fn me(&self, credential: &Credential) -> Result<Principal, IdentityError>;
    async fn update_profile(
        &self,
        credential: &Credential,
        patch: &ProfilePatch,
    ) -> Result<PrincipalUpdate, IdentityError>;
    async fn update_password(
        &self,
        credential: &Credential,
        change: &PasswordChange,
    ) -> Result<(), IdentityError>;
    /// Best effort server side invalidation.
    async fn logout(&self, credential: Option<&Credential>) -> Result<(), IdentityError>;
}

#[async_trait]
impl<T: IdentityApi + ?Sized> IdentityApi for std::sync::Arc<T> {
    async fn login(&self, form: &LoginForm) -> Result<AuthGrant, IdentityError> {
        (**self).login(form).await
    }
    async fn register(&self, form: &RegistrationForm) -> Result<AuthGrant, IdentityError> {
        (**self).register(form).await
    }
    async fn me(&self, credential: &Credential) -> Result<Principal, IdentityError> {
        (**self).me(credential).await
    }
    async fn update_profile(
        &self,
        credential: &Credential,
        patch: &ProfilePatch,
    ) -> Result<PrincipalUpdate, IdentityError> {
        (**self).update_profile(credential, patch).await
    }
    async fn update_password(
        &self,
        credential: &Credential,
        change: &PasswordChange,
    ) -> Result<(), IdentityError> {
        (**self).update_password(credential, change).await
    }
    async fn logout(&self, credential: Option<&Credential>) -> Result<(), IdentityError> {
        (**self).logout(credential).await
    }
}
