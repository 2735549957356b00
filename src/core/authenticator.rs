use std::future::Future;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use tokio::sync::watch;
use tracing::info_span;
use tracing_futures::Instrument;

use crate::common::{debug, info, warn};
use crate::core::{
    Credential, LoginForm, Notification, Notifier, Outcome, PasswordChange, Phase, Principal,
    ProfilePatch, RegistrationForm, SessionError, SessionReader, SessionState, SessionStore,
};
use crate::identity::{AuthGrant, IdentityApi, IdentityError};

const SESSION_EXPIRED: &str = "Session expired. Please login again.";
const NOT_AUTHENTICATED: &str = "Please login to continue";

/// Owns the session state and every transition of it.
///
/// The authenticator holds the only sender of the state channel, so it is
/// the single writer; guards and navigation read through [`SessionReader`]s.
/// Each transition swaps the whole [`SessionState`] at once.
pub struct Authenticator<A, S, N> {
    api: A,
    store: S,
    notifier: N,
    state: watch::Sender<SessionState>,
    // Bumped on every applied transition, only while the state is locked.
    generation: AtomicU64,
    resolve_timeout: Duration,
}

impl<A, S, N> Authenticator<A, S, N>
where
    A: IdentityApi,
    S: SessionStore,
    N: Notifier,
{
    pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(5);

    pub fn new(api: A, store: S, notifier: N) -> Self {
        let (state, _) = watch::channel(SessionState::uninitialized());
        Self {
            api,
            store,
            notifier,
            state,
            generation: AtomicU64::new(0),
            resolve_timeout: Self::DEFAULT_RESOLVE_TIMEOUT,
        }
    }

    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    pub fn reader(&self) -> SessionReader {
        SessionReader::new(self.state.subscribe())
    }

    pub fn state(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Resolve the persisted credential into a principal.
    ///
    /// Runs once; later calls return immediately. The state stays loading
    /// until resolution settles. Resolution gives up after the configured
    /// timeout or when `cancel` completes, falling back to anonymous.
    /// No notification is emitted: an expired session recovers silently.
    /// When another operation (login, logout, ...) transitions the session
    /// while resolution is in flight, its result is discarded.
    pub async fn initialize(&self, cancel: impl Future) -> Outcome {
        let started = self.generation();
        let phase = self.state().phase();
        if phase != Phase::Uninitialized {
            debug!(?phase, "Session already initialized");
            return Outcome::Success;
        }

        let credential = match self.store.read().await {
            Ok(Some(credential)) => credential,
            Ok(None) => {
                info!("No persisted session");
                self.transition_from(started, SessionState::anonymous(None));
                return Outcome::Success;
            }
            Err(err) => {
                warn!(%err, "Persisted session unreadable, discarding");
                self.clear_store().await;
                let reason = SessionError::Expired;
                let outcome = Outcome::failure(reason.to_string());
                self.transition_from(started, SessionState::anonymous(Some(reason)));
                return outcome;
            }
        };

        let resolving =
            match self.transition_from(started, SessionState::resolving(credential.clone())) {
                Some(generation) => generation,
                None => {
                    debug!("Session changed before resolution started");
                    return Outcome::Success;
                }
            };

        let resolve = tokio::time::timeout(self.resolve_timeout, self.api.me(&credential))
            .instrument(info_span!("resolve_session"));
        let resolved = tokio::select! {
            result = resolve => match result {
                Ok(Ok(principal)) => Ok(principal),
                Ok(Err(err)) => {
                    warn!(%err, "Resolve session failed");
                    Err(Self::resolve_error(&err))
                }
                Err(_) => {
                    warn!(timeout=?self.resolve_timeout, "Resolve session timed out");
                    Err(SessionError::TimedOut)
                }
            },
            _ = cancel => {
                info!("Resolve session cancelled");
                Err(SessionError::Cancelled)
            }
        };

        match resolved {
            Ok(principal) => {
                let (id, role) = (principal.id.clone(), principal.role());
                let next = SessionState::authenticated(principal, credential);
                if self.transition_from(resolving, next).is_none() {
                    info!("Session changed while resolving, result discarded");
                    return Outcome::Success;
                }
                info!(%id, %role, "Session resolved");
                Outcome::Success
            }
            Err(reason) => {
                if self.generation() != resolving {
                    info!(%reason, "Session changed while resolving, result discarded");
                    return Outcome::Success;
                }
                self.clear_store().await;
                let outcome = Outcome::failure(reason.to_string());
                if self
                    .transition_from(resolving, SessionState::anonymous(Some(reason)))
                    .is_none()
                {
                    info!("Session changed while resolving, result discarded");
                    return Outcome::Success;
                }
                outcome
            }
        }
    }

    pub async fn login(&self, email: &str, password: &str) -> Outcome {
        let form = LoginForm::new(email, password);
        if let Err(errors) = form.validate() {
            return self.fail(errors.to_string());
        }

        self.begin();
        match self.api.login(&form).instrument(info_span!("login")).await {
            Ok(grant) => {
                let message = format!("Welcome back, {}!", grant.principal.name);
                self.establish(grant).await;
                self.succeed(message)
            }
            Err(err) => {
                warn!(%err, "Login failed");
                self.reject(err.user_message("Login failed")).await
            }
        }
    }

    /// Create an account. A successful registration is immediately authenticated.
    pub async fn register(&self, form: &RegistrationForm) -> Outcome {
        if let Err(errors) = form.validate() {
            return self.fail(errors.to_string());
        }

        self.begin();
        match self.api.register(form).instrument(info_span!("register")).await {
            Ok(grant) => {
                let message = format!("Welcome to PropertyRent, {}!", grant.principal.name);
                self.establish(grant).await;
                self.succeed(message)
            }
            Err(err) => {
                warn!(%err, "Registration failed");
                self.reject(err.user_message("Registration failed")).await
            }
        }
    }

    /// Drop the session. The local transition happens before any I/O and
    /// the server side invalidation is best effort.
    pub async fn logout(&self) -> Outcome {
        let credential = self.state().credential().cloned();
        self.transition(SessionState::anonymous(None));
        self.clear_store().await;

        if let Some(credential) = credential {
            if let Err(err) = self.api.logout(Some(&credential)).await {
                debug!(%err, "Server side logout failed, ignored");
            }
        }

        self.succeed("Logged out successfully")
    }

    /// Persist profile changes and merge the returned fields into the
    /// current principal. The role is never changed this way.
    pub async fn update_principal(&self, patch: &ProfilePatch) -> Outcome {
        const FALLBACK: &str = "Update failed";

        let credential = match self.state().credential().cloned() {
            Some(credential) => credential,
            None => return self.fail(NOT_AUTHENTICATED),
        };
        if patch.is_empty() {
            return self.fail("Nothing to update");
        }
        if let Err(errors) = patch.validate() {
            return self.fail(errors.to_string());
        }

        match self
            .api
            .update_profile(&credential, patch)
            .instrument(info_span!("update_profile"))
            .await
        {
            Ok(update) => {
                let current = self.state();
                let principal = match current.principal() {
                    Some(principal) if current.credential() == Some(&credential) => principal,
                    _ => {
                        warn!("Session changed while updating profile");
                        return self.fail(FALLBACK);
                    }
                };
                let mut principal = principal.clone();
                principal.merge(update);
                self.transition(current.with_principal(principal));
                self.succeed("Profile updated successfully")
            }
            Err(err) if err.is_unauthorized() => {
                warn!(%err, "Profile update unauthorized, expiring session");
                self.expire().await;
                self.fail(SESSION_EXPIRED)
            }
            Err(err) => {
                warn!(%err, "Profile update failed");
                self.fail(err.user_message(FALLBACK))
            }
        }
    }

    /// Change the password. The principal is left untouched.
    pub async fn update_secret(&self, current_password: &str, new_password: &str) -> Outcome {
        let credential = match self.state().credential().cloned() {
            Some(credential) => credential,
            None => return self.fail(NOT_AUTHENTICATED),
        };
        let change = PasswordChange::new(current_password, new_password);
        if let Err(errors) = change.validate() {
            return self.fail(errors.to_string());
        }

        // A 401 reports a wrong current password and keeps the session.
        match self
            .api
            .update_password(&credential, &change)
            .instrument(info_span!("update_password"))
            .await
        {
            Ok(()) => self.succeed("Password updated successfully"),
            Err(err) => {
                warn!(%err, "Password update failed");
                self.fail(err.user_message("Password update failed"))
            }
        }
    }

    pub fn clear_error(&self) {
        let next = self.state().without_error();
        self.transition(next);
    }

    /// The backend reported the credential as expired outside of startup.
    pub async fn expire(&self) {
        self.clear_store().await;
        self.transition(SessionState::anonymous(Some(SessionError::Expired)));
    }

    fn resolve_error(err: &IdentityError) -> SessionError {
        match err {
            IdentityError::Timeout => SessionError::TimedOut,
            IdentityError::Network { .. } => SessionError::Unreachable,
            IdentityError::Unauthorized { .. }
            | IdentityError::Rejected { .. }
            | IdentityError::Decode { .. }
            | IdentityError::LocalFile { .. } => SessionError::Expired,
        }
    }

    fn begin(&self) {
        let pending = self.state().pending();
        self.transition(pending);
    }

    async fn establish(&self, grant: AuthGrant) {
        let AuthGrant {
            credential,
            principal,
        } = grant;
        self.persist(&credential).await;
        info!(id=%principal.id, role=%principal.role(), "Authenticated");
        self.transition(SessionState::authenticated(principal, credential));
    }

    async fn reject(&self, message: String) -> Outcome {
        self.clear_store().await;
        self.transition(SessionState::anonymous(Some(SessionError::Rejected(
            message.clone(),
        ))));
        self.fail(message)
    }

    async fn persist(&self, credential: &Credential) {
        // The in memory session stays valid even if it can not be persisted.
        if let Err(err) = self.store.write(credential).await {
            warn!(%err, "Persist session failed");
        }
    }

    async fn clear_store(&self) {
        if let Err(err) = self.store.clear().await {
            warn!(%err, "Clear persisted session failed");
        }
    }

    fn succeed(&self, message: impl Into<String>) -> Outcome {
        self.notifier.notify(Notification::success(message));
        Outcome::Success
    }

    fn fail(&self, message: impl Into<String>) -> Outcome {
        let message = message.into();
        self.notifier.notify(Notification::error(message.clone()));
        Outcome::Failure(message)
    }

    fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    fn transition(&self, next: SessionState) {
        self.commit(next, None);
    }

    /// Apply `next` only if no transition happened since `expected`.
    /// Returns the new generation when applied.
    fn transition_from(&self, expected: u64, next: SessionState) -> Option<u64> {
        self.commit(next, Some(expected))
    }

    fn commit(&self, next: SessionState, expected: Option<u64>) -> Option<u64> {
        let to = next.phase();
        let loading = next.is_loading();
        let mut next = Some(next);
        let mut applied = None;

        // The closure runs under the channel's write lock, which serializes
        // the generation check with every other transition.
        self.state.send_if_modified(|state| {
            let current = self.generation.load(Ordering::SeqCst);
            if expected.is_some_and(|expected| expected != current) {
                return false;
            }
            match next.take() {
                Some(next) => {
                    let from = std::mem::replace(state, next).phase();
                    applied = Some((from, current + 1));
                    self.generation.store(current + 1, Ordering::SeqCst);
                    true
                }
                None => false,
            }
        });

        match applied {
            Some((from, generation)) => {
                debug!(?from, ?to, loading, generation, "Session transition");
                Some(generation)
            }
            None => {
                debug!(?to, "Session transition superseded");
                None
            }
        }
    }
}

impl<A, S, N> Authenticator<A, S, N> {
    /// Principal of the current state, if any.
    pub fn principal(&self) -> Option<Principal> {
        self.state.borrow().principal().cloned()
    }
}
