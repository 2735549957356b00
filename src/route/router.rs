use std::fmt;

use crate::core::{Role, SessionState};
use crate::route::{guard, GuardPolicy, Params, Pattern, RenderDecision};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    Login,
    Register,
    Home,
    BrowseProperties,
    PropertyDetails,
    Profile,
    EditProfile,
    AdminDashboard,
    ManageUsers,
    ManageProperties,
    ManageBookings,
    AdminReports,
    OwnerDashboard,
    MyProperties,
    AddProperty,
    EditProperty,
    OwnerBookings,
    OwnerPayments,
    TenantDashboard,
    MyBookings,
    CreateBooking,
    MyPayments,
    MyFeedback,
    NotFound,
}

impl View {
    pub fn title(&self) -> &'static str {
        match self {
            View::Login => "Login",
            View::Register => "Register",
            View::Home => "Home",
            View::BrowseProperties => "Browse Properties",
            View::PropertyDetails => "Property Details",
            View::Profile => "Profile",
            View::EditProfile => "Edit Profile",
            View::AdminDashboard => "Admin Dashboard",
            View::ManageUsers => "Manage Users",
            View::ManageProperties => "Manage Properties",
            View::ManageBookings => "Manage Bookings",
            View::AdminReports => "Reports",
            View::OwnerDashboard => "Owner Dashboard",
            View::MyProperties => "My Properties",
            View::AddProperty => "Add Property",
            View::EditProperty => "Edit Property",
            View::OwnerBookings => "Bookings",
            View::OwnerPayments => "Payments",
            View::TenantDashboard => "Tenant Dashboard",
            View::MyBookings => "My Bookings",
            View::CreateBooking => "Create Booking",
            View::MyPayments => "My Payments",
            View::MyFeedback => "My Reviews",
            View::NotFound => "Page not found",
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.title())
    }
}

/// What a matched route produces once the guard lets it through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Target {
    View(View),
    /// Replace the location without rendering anything first.
    Redirect(&'static str),
}

#[derive(Debug, Clone)]
pub struct Route {
    pattern: Pattern,
    target: Target,
    policy: Option<GuardPolicy>,
    // Rendered inside the application chrome (top bar, side menu, footer).
    layout: bool,
}

impl Route {
    pub fn pattern(&self) -> &Pattern {
        &self.pattern
    }

    pub fn policy(&self) -> Option<&GuardPolicy> {
        self.policy.as_ref()
    }
}

/// Outcome of routing one path against the current session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    pub path: String,
    pub params: Params,
    pub layout: bool,
    pub decision: RenderDecision<Target>,
}

/// Ordered route table; the first matching route wins and unmatched paths
/// render [`View::NotFound`]. There is no server side status for a missing
/// page, a not found view is an ordinary render.
#[derive(Debug, Clone, Default)]
pub struct Router {
    routes: Vec<Route>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(mut self, path: &str, target: Target, policy: Option<GuardPolicy>, layout: bool) -> Self {
        self.routes.push(Route {
            pattern: Pattern::parse(path),
            target,
            policy,
            layout,
        });
        self
    }

    /// Public view rendered inside the application chrome.
    pub fn route(self, path: &str, view: View) -> Self {
        self.push(path, Target::View(view), None, true)
    }

    /// Public view rendered without chrome.
    pub fn standalone(self, path: &str, view: View) -> Self {
        self.push(path, Target::View(view), None, false)
    }

    pub fn protect(self, path: &str, view: View, policy: GuardPolicy) -> Self {
        self.push(path, Target::View(view), Some(policy), true)
    }

    pub fn redirect(self, path: &str, to: &'static str, policy: Option<GuardPolicy>) -> Self {
        self.push(path, Target::Redirect(to), policy, true)
    }

    /// Role namespace index (`/owner`) sending the role to its dashboard.
    fn namespace(self, role: Role) -> Self {
        self.redirect(
            role.namespace(),
            role.dashboard_path(),
            Some(GuardPolicy::only(role)),
        )
    }

    /// The PropertyRent route table.
    pub fn application() -> Self {
        let admin = || GuardPolicy::only(Role::Admin);
        let owner = || GuardPolicy::only(Role::Owner);
        let tenant = || GuardPolicy::only(Role::Tenant);

        Router::new()
            .standalone("/login", View::Login)
            .standalone("/register", View::Register)
            .route("/", View::Home)
            .route("/properties", View::BrowseProperties)
            .route("/properties/:id", View::PropertyDetails)
            .protect("/profile", View::Profile, GuardPolicy::authenticated())
            .protect("/profile/edit", View::EditProfile, GuardPolicy::authenticated())
            .namespace(Role::Admin)
            .protect("/admin/dashboard", View::AdminDashboard, admin())
            .protect("/admin/users", View::ManageUsers, admin())
            .protect("/admin/properties", View::ManageProperties, admin())
            .protect("/admin/bookings", View::ManageBookings, admin())
            .protect("/admin/reports", View::AdminReports, admin())
            .namespace(Role::Owner)
            .protect("/owner/dashboard", View::OwnerDashboard, owner())
            .protect("/owner/properties", View::MyProperties, owner())
            .protect("/owner/properties/add", View::AddProperty, owner())
            .protect("/owner/properties/:id/edit", View::EditProperty, owner())
            .protect("/owner/bookings", View::OwnerBookings, owner())
            .protect("/owner/payments", View::OwnerPayments, owner())
            .namespace(Role::Tenant)
            .protect("/tenant/dashboard", View::TenantDashboard, tenant())
            .protect("/tenant/bookings", View::MyBookings, tenant())
            .protect("/tenant/bookings/create/:propertyId", View::CreateBooking, tenant())
            .protect("/tenant/payments", View::MyPayments, tenant())
            .protect("/tenant/feedback", View::MyFeedback, tenant())
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    pub fn find(&self, path: &str) -> Option<(&Route, Params)> {
        self.routes
            .iter()
            .find_map(|route| route.pattern.matches(path).map(|params| (route, params)))
    }

    pub fn resolve(&self, path: &str, state: &SessionState) -> Resolution {
        let (route, params) = match self.find(path) {
            Some(found) => found,
            None => {
                return Resolution {
                    path: path.to_owned(),
                    params: Params::default(),
                    layout: true,
                    decision: RenderDecision::Render(Target::View(View::NotFound)),
                }
            }
        };

        let decision = match &route.policy {
            None => RenderDecision::Render(route.target),
            Some(policy) => guard(
                state.principal(),
                state.is_loading(),
                policy,
                path,
                route.target,
            ),
        };

        Resolution {
            path: path.to_owned(),
            params,
            layout: route.layout,
            decision,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Credential, Principal};

    fn signed_in(role: Role) -> SessionState {
        SessionState::authenticated(
            Principal::new("1", "p", "p@example.com", role),
            Credential::new("t"),
        )
    }

    #[test]
    fn public_routes_render_without_session() {
        let router = Router::application();
        let anonymous = SessionState::anonymous(None);

        let resolution = router.resolve("/properties", &anonymous);
        assert_eq!(
            resolution.decision,
            RenderDecision::Render(Target::View(View::BrowseProperties))
        );

        // Public views never wait for the session.
        let resolution = router.resolve("/properties/p-1", &SessionState::uninitialized());
        assert_eq!(
            resolution.decision,
            RenderDecision::Render(Target::View(View::PropertyDetails))
        );
        assert_eq!(resolution.params.get("id"), Some("p-1"));
    }

    #[test]
    fn protected_routes_wait_for_resolution() {
        let router = Router::application();
        for route in router.routes().iter().filter(|r| r.policy().is_some()) {
            let path = route.pattern().as_str().replace(":id", "1").replace(":propertyId", "1");
            assert_eq!(
                router.resolve(&path, &SessionState::uninitialized()).decision,
                RenderDecision::Loading,
                "{}",
                path
            );
        }
    }

    #[test]
    fn anonymous_is_sent_to_login() {
        let resolution =
            Router::application().resolve("/owner/properties/7/edit", &SessionState::anonymous(None));
        assert_eq!(
            resolution.decision,
            RenderDecision::RedirectToLogin {
                from: "/owner/properties/7/edit".into()
            }
        );
    }

    #[test]
    fn tenant_denied_admin_area() {
        let resolution = Router::application().resolve("/admin/users", &signed_in(Role::Tenant));
        assert_eq!(
            resolution.decision,
            RenderDecision::AccessDenied { redirect_to: "/" }
        );
        assert_eq!(resolution.decision.redirect(), Some("/"));
    }

    #[test]
    fn namespace_index_redirects_to_dashboard() {
        let router = Router::application();
        for role in Role::ALL {
            let resolution = router.resolve(role.namespace(), &signed_in(role));
            assert_eq!(
                resolution.decision,
                RenderDecision::Render(Target::Redirect(role.dashboard_path()))
            );
        }
        // The index is still guarded.
        assert_eq!(
            router.resolve("/admin", &signed_in(Role::Owner)).decision,
            RenderDecision::AccessDenied { redirect_to: "/" }
        );
    }

    #[test]
    fn literal_route_beats_param_route() {
        let router = Router::application();
        let resolution = router.resolve("/owner/properties/add", &signed_in(Role::Owner));
        assert_eq!(
            resolution.decision,
            RenderDecision::Render(Target::View(View::AddProperty))
        );
    }

    #[test]
    fn unknown_path_is_not_found() {
        let resolution = Router::application().resolve("/nowhere/at/all", &signed_in(Role::Admin));
        assert_eq!(
            resolution.decision,
            RenderDecision::Render(Target::View(View::NotFound))
        );
        assert!(resolution.layout);
    }

    #[test]
    fn auth_views_have_no_layout() {
        let router = Router::application();
        assert!(!router.resolve("/login", &SessionState::anonymous(None)).layout);
        assert!(router.resolve("/", &SessionState::anonymous(None)).layout);
    }
}
