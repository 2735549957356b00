//! Deciding what a path renders for the current session.

mod guard;
pub use self::guard::{guard, GuardPolicy, RenderDecision, ACCESS_DENIED_MESSAGE, ACCESS_DENIED_TITLE};

mod pattern;
pub use self::pattern::{Params, Pattern};

mod router;
pub use self::router::{Resolution, Route, Router, Target, View};

pub const LOGIN_PATH: &str = "/login";
pub const HOME_PATH: &str = "/";
