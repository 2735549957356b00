use crate::core::{Principal, Role};
use crate::nav::profile_image_url;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Home,
    UserGroup,
    BuildingOffice,
    Calendar,
    Plus,
    Eye,
    Star,
    Cog,
    UserCircle,
    Logout,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuEntry {
    pub icon: Icon,
    pub label: &'static str,
    pub path: &'static str,
}

impl MenuEntry {
    const fn new(icon: Icon, label: &'static str, path: &'static str) -> Self {
        Self { icon, label, path }
    }

    /// Side menu highlighting is an exact match: `/owner/properties` is not
    /// active on `/owner/properties/add`.
    pub fn is_active(&self, current_path: &str) -> bool {
        current_path == self.path
    }
}

pub const SETTINGS_ENTRY: MenuEntry = MenuEntry::new(Icon::Cog, "Settings", "/profile");

/// Role specific side menu entries, in display order.
pub fn menu_for(role: Option<Role>) -> Vec<MenuEntry> {
    let role = match role {
        Some(role) => role,
        None => return Vec::new(),
    };
    match role {
        Role::Admin => vec![
            MenuEntry::new(Icon::Home, "Dashboard", "/admin/dashboard"),
            MenuEntry::new(Icon::UserGroup, "Manage Users", "/admin/users"),
            MenuEntry::new(Icon::BuildingOffice, "Manage Properties", "/admin/properties"),
            MenuEntry::new(Icon::Calendar, "Manage Bookings", "/admin/bookings"),
        ],
        Role::Owner => vec![
            MenuEntry::new(Icon::Home, "Dashboard", "/owner/dashboard"),
            MenuEntry::new(Icon::BuildingOffice, "My Properties", "/owner/properties"),
            MenuEntry::new(Icon::Plus, "Add Property", "/owner/properties/add"),
            MenuEntry::new(Icon::Calendar, "Bookings", "/owner/bookings"),
        ],
        Role::Tenant => vec![
            MenuEntry::new(Icon::Home, "Dashboard", "/tenant/dashboard"),
            MenuEntry::new(Icon::Eye, "Browse Properties", "/properties"),
            MenuEntry::new(Icon::Calendar, "My Bookings", "/tenant/bookings"),
            MenuEntry::new(Icon::Star, "My Reviews", "/tenant/feedback"),
        ],
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuItem {
    pub entry: MenuEntry,
    pub active: bool,
}

impl MenuItem {
    fn new(entry: MenuEntry, current_path: &str) -> Self {
        Self {
            entry,
            active: entry.is_active(current_path),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SideMenu {
    pub name: String,
    pub role: Role,
    pub image: String,
    pub items: Vec<MenuItem>,
    pub settings: MenuItem,
}

pub fn side_menu(principal: &Principal, current_path: &str) -> SideMenu {
    SideMenu {
        name: principal.name.clone(),
        role: principal.role(),
        image: profile_image_url(principal.profile_image.as_deref(), 40),
        items: menu_for(Some(principal.role()))
            .into_iter()
            .map(|entry| MenuItem::new(entry, current_path))
            .collect(),
        settings: MenuItem::new(SETTINGS_ENTRY, current_path),
    }
}
