use crate::core::Principal;
use crate::nav::{profile_image_url, Icon, MenuEntry};
use crate::route::LOGIN_PATH;

pub const BRAND: &str = "PropertyRent";

const ANONYMOUS_LINKS: [MenuEntry; 2] = [
    MenuEntry {
        icon: Icon::UserCircle,
        label: "Login",
        path: "/login",
    },
    MenuEntry {
        icon: Icon::Plus,
        label: "Sign Up",
        path: "/register",
    },
];

const ACCOUNT_LINKS: [MenuEntry; 2] = [
    MenuEntry {
        icon: Icon::UserCircle,
        label: "Profile",
        path: "/profile",
    },
    MenuEntry {
        icon: Icon::Cog,
        label: "Settings",
        path: "/profile/edit",
    },
];

/// Top bar highlighting is a prefix match, unlike the side menu.
pub fn prefix_active(current_path: &str, prefix: &str) -> bool {
    current_path.starts_with(prefix)
}

/// Where the "Dashboard" link points.
pub fn dashboard_link(principal: Option<&Principal>) -> &'static str {
    match principal {
        Some(principal) => principal.role().dashboard_path(),
        None => LOGIN_PATH,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopBarItem {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Account {
    Anonymous,
    SignedIn { name: String, image: String },
}

impl Account {
    /// Entries of the account area; the signed in variant ends with logout.
    pub fn links(&self) -> &'static [MenuEntry] {
        match self {
            Account::Anonymous => &ANONYMOUS_LINKS,
            Account::SignedIn { .. } => &ACCOUNT_LINKS,
        }
    }

    pub fn has_logout(&self) -> bool {
        matches!(self, Account::SignedIn { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopBar {
    pub brand: &'static str,
    pub links: Vec<TopBarItem>,
    pub account: Account,
}

pub fn top_bar(principal: Option<&Principal>, current_path: &str) -> TopBar {
    let mut links = vec![
        TopBarItem {
            label: "Home",
            path: "/",
            active: current_path == "/",
        },
        TopBarItem {
            label: "Properties",
            path: "/properties",
            active: prefix_active(current_path, "/properties"),
        },
    ];

    let account = match principal {
        Some(principal) => {
            links.push(TopBarItem {
                label: "Dashboard",
                path: dashboard_link(Some(principal)),
                active: prefix_active(current_path, principal.role().namespace()),
            });
            Account::SignedIn {
                name: principal.name.clone(),
                image: profile_image_url(principal.profile_image.as_deref(), 32),
            }
        }
        None => Account::Anonymous,
    };

    TopBar {
        brand: BRAND,
        links,
        account,
    }
}
