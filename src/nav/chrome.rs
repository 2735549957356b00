use crate::core::Principal;

pub const ROLE_NAMESPACE_PREFIXES: [&str; 3] = ["/admin/", "/owner/", "/tenant/"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Chrome {
    pub top_bar: bool,
    pub side_menu: bool,
    pub footer: bool,
}

/// The side menu shows for a signed in principal inside any role namespace
/// (not only its own); the footer shows whenever the side menu does not.
pub fn chrome(principal: Option<&Principal>, current_path: &str) -> Chrome {
    let side_menu = principal.is_some()
        && ROLE_NAMESPACE_PREFIXES
            .iter()
            .any(|prefix| current_path.starts_with(prefix));

    Chrome {
        top_bar: true,
        side_menu,
        footer: !side_menu,
    }
}
