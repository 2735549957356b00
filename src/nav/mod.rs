//! Which chrome surrounds a page and what its menus contain.

mod chrome;
pub use self::chrome::{chrome, Chrome, ROLE_NAMESPACE_PREFIXES};

mod menu;
pub use self::menu::{menu_for, side_menu, Icon, MenuEntry, MenuItem, SideMenu, SETTINGS_ENTRY};

mod top_bar;
pub use self::top_bar::{dashboard_link, prefix_active, top_bar, Account, TopBar, TopBarItem, BRAND};

mod avatar;
pub use self::avatar::{profile_image_url, PLACEHOLDER_IMAGE, PROFILE_UPLOADS};

use crate::core::SessionState;

/// Everything the shell needs to draw around the current page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    pub chrome: Chrome,
    pub top_bar: TopBar,
    pub side_menu: Option<SideMenu>,
}

pub fn compose(state: &SessionState, current_path: &str) -> Navigation {
    let principal = state.principal();
    let chrome = chrome(principal, current_path);
    let side_menu = match principal {
        Some(principal) if chrome.side_menu => Some(side_menu(principal, current_path)),
        _ => None,
    };

    Navigation {
        chrome,
        top_bar: top_bar(principal, current_path),
        side_menu,
    }
}
