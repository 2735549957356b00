use crate::core::{Principal, Role};
use crate::route::HOME_PATH;

pub const ACCESS_DENIED_TITLE: &str = "Access Denied";
pub const ACCESS_DENIED_MESSAGE: &str = "You don't have permission to access this page.";

/// Authorization requirement of a protected route. An empty role set
/// admits any authenticated principal.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuardPolicy {
    allowed_roles: Vec<Role>,
}

impl GuardPolicy {
    pub fn authenticated() -> Self {
        Self::default()
    }

    pub fn roles(roles: impl IntoIterator<Item = Role>) -> Self {
        let mut allowed_roles: Vec<Role> = Vec::new();
        for role in roles {
            if !allowed_roles.contains(&role) {
                allowed_roles.push(role);
            }
        }
        Self { allowed_roles }
    }

    pub fn only(role: Role) -> Self {
        Self::roles([role])
    }

    pub fn allowed_roles(&self) -> &[Role] {
        &self.allowed_roles
    }

    pub fn permits(&self, role: Role) -> bool {
        self.allowed_roles.is_empty() || self.allowed_roles.contains(&role)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderDecision<V> {
    /// Session is still resolving. Re-evaluate on the next transition.
    Loading,
    /// Send the user to the login view; `from` is where to return afterwards.
    RedirectToLogin { from: String },
    /// Principal lacks the role. The denial screen (with a back action) is
    /// rendered and a redirect to `redirect_to` is dispatched right after.
    AccessDenied { redirect_to: &'static str },
    Render(V),
}

impl<V> RenderDecision<V> {
    pub fn is_render(&self) -> bool {
        matches!(self, RenderDecision::Render(_))
    }

    /// Where the host should navigate, if anywhere.
    pub fn redirect(&self) -> Option<&str> {
        match self {
            RenderDecision::RedirectToLogin { .. } => Some(crate::route::LOGIN_PATH),
            RenderDecision::AccessDenied { redirect_to } => Some(*redirect_to),
            RenderDecision::Loading | RenderDecision::Render(_) => None,
        }
    }
}

/// Decide what a protected view renders. First matching rule wins:
/// loading, then missing principal, then role membership.
///
/// Inactive principals are not treated specially.
pub fn guard<V>(
    principal: Option<&Principal>,
    loading: bool,
    policy: &GuardPolicy,
    requested_path: &str,
    view: V,
) -> RenderDecision<V> {
    if loading {
        return RenderDecision::Loading;
    }
    let principal = match principal {
        Some(principal) => principal,
        None => {
            return RenderDecision::RedirectToLogin {
                from: requested_path.to_owned(),
            }
        }
    };
    if !policy.permits(principal.role()) {
        return RenderDecision::AccessDenied {
            redirect_to: HOME_PATH,
        };
    }
    RenderDecision::Render(view)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principal(role: Role) -> Principal {
        Principal::new("1", "p", "p@example.com", role)
    }

    #[test]
    fn loading_wins_over_everything() {
        for principal in [None, Some(principal(Role::Admin)), Some(principal(Role::Tenant))] {
            for policy in [GuardPolicy::authenticated(), GuardPolicy::only(Role::Owner)] {
                assert_eq!(
                    guard(principal.as_ref(), true, &policy, "/owner/bookings", ()),
                    RenderDecision::Loading
                );
            }
        }
    }

    #[test]
    fn anonymous_redirects_with_return_path() {
        let decision = guard(None, false, &GuardPolicy::authenticated(), "/profile/edit", ());
        assert_eq!(
            decision,
            RenderDecision::RedirectToLogin {
                from: "/profile/edit".into()
            }
        );
        assert_eq!(decision.redirect(), Some("/login"));
    }

    #[test]
    fn role_gate() {
        let policy = GuardPolicy::only(Role::Owner);
        let tenant = principal(Role::Tenant);
        let owner = principal(Role::Owner);

        assert_eq!(
            guard(Some(&tenant), false, &policy, "/owner/properties", "view"),
            RenderDecision::AccessDenied { redirect_to: "/" }
        );
        assert_eq!(
            guard(Some(&owner), false, &policy, "/owner/properties", "view"),
            RenderDecision::Render("view")
        );
    }

    #[test]
    fn empty_policy_admits_every_role() {
        let policy = GuardPolicy::authenticated();
        for role in Role::ALL {
            assert!(guard(Some(&principal(role)), false, &policy, "/profile", ()).is_render());
        }
    }

    #[test]
    fn inactive_principal_still_passes() {
        let mut inactive = principal(Role::Tenant);
        inactive.is_active = false;
        assert!(guard(Some(&inactive), false, &GuardPolicy::only(Role::Tenant), "/tenant/dashboard", ())
            .is_render());
    }

    #[test]
    fn policy_deduplicates_roles() {
        let policy = GuardPolicy::roles([Role::Admin, Role::Owner, Role::Admin]);
        assert_eq!(policy.allowed_roles(), &[Role::Admin, Role::Owner]);
        assert!(!policy.permits(Role::Tenant));
    }
}
