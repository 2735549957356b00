mod principal;
pub use self::principal::{Address, ParseRoleError, Principal, PrincipalId, PrincipalUpdate, Role};

mod credential;
pub use self::credential::Credential;

mod session;
pub use self::session::{
    FileStore, MemoryStore, Phase, SessionError, SessionReader, SessionState, SessionStore,
};

mod form;
pub use self::form::{
    LoginForm, PasswordChange, ProfilePatch, RegistrationForm, ValidationErrors,
    IMAGE_EXTENSIONS, MAX_IMAGE_BYTES, NAME_MAX_LENGTH, NAME_MIN_LENGTH, PASSWORD_MIN_LENGTH,
};

mod outcome;
pub use self::outcome::Outcome;

mod notify;
pub use self::notify::{Level, MemoryNotifier, Notification, Notifier, TracingNotifier};

mod authenticator;
pub use self::authenticator::Authenticator;
