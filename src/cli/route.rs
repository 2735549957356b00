use clap::Args;

use crate::cli::{authenticator, ClientOptions};
use crate::nav::{self, Account, Navigation};
use crate::route::{
    RenderDecision, Resolution, Router, Target, ACCESS_DENIED_MESSAGE, ACCESS_DENIED_TITLE,
};
use crate::Result;

/// Resolve a path for the current session and print what would be rendered
#[derive(Args, Debug)]
pub struct RouteCommand {
    /// Location path(e.g. /owner/properties/add)
    #[arg()]
    path: String,
}

impl RouteCommand {
    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let RouteCommand { path } = self;

        let authenticator = authenticator(options).await?;
        let state = authenticator.state();

        let router = Router::application();
        print_route(&router, &path);

        let resolution = router.resolve(&path, &state);
        let navigates = print_resolution(&resolution);

        // Chrome only surrounds a page that is rendered in place.
        if resolution.layout && resolution.decision.is_render() && !navigates {
            print_navigation(&nav::compose(&state, &path));
        }
        Ok(())
    }
}

fn print_route(router: &Router, path: &str) {
    let route = match router.find(path) {
        Some((route, _)) => route,
        None => {
            println!("route: none");
            return;
        }
    };
    match route.policy() {
        None => println!("route: {} (public)", route.pattern().as_str()),
        Some(policy) if policy.allowed_roles().is_empty() => {
            println!("route: {} (authenticated)", route.pattern().as_str())
        }
        Some(policy) => {
            let roles: Vec<_> = policy.allowed_roles().iter().map(|r| r.as_str()).collect();
            println!("route: {} ({})", route.pattern().as_str(), roles.join(", "));
        }
    }
}

// Returns whether the host navigates elsewhere.
fn print_resolution(resolution: &Resolution) -> bool {
    match &resolution.decision {
        RenderDecision::Loading => println!("loading"),
        RenderDecision::RedirectToLogin { from } => println!("login required (return to {})", from),
        RenderDecision::AccessDenied { .. } => {
            println!("{}: {}", ACCESS_DENIED_TITLE, ACCESS_DENIED_MESSAGE)
        }
        RenderDecision::Render(Target::Redirect(_)) => {}
        RenderDecision::Render(Target::View(view)) => {
            println!("render {}", view.title());
            for (name, value) in resolution.params.iter() {
                println!("  {}: {}", name, value);
            }
        }
    }

    let redirect = match &resolution.decision {
        RenderDecision::Render(Target::Redirect(to)) => Some(*to),
        decision => decision.redirect(),
    };
    if let Some(to) = redirect {
        println!("redirect {}", to);
    }
    redirect.is_some()
}

fn print_navigation(navigation: &Navigation) {
    let Navigation {
        chrome,
        top_bar,
        side_menu,
    } = navigation;

    println!("top bar: {}", top_bar.brand);
    for link in &top_bar.links {
        println!("  {} {}{}", link.label, link.path, active_marker(link.active));
    }
    match &top_bar.account {
        Account::Anonymous => {
            for entry in top_bar.account.links() {
                println!("  {} {}", entry.label, entry.path);
            }
        }
        Account::SignedIn { name, .. } => {
            println!("  account: {}", name);
            for entry in top_bar.account.links() {
                println!("    {} {}", entry.label, entry.path);
            }
            if top_bar.account.has_logout() {
                println!("    Logout");
            }
        }
    }

    if let Some(side_menu) = side_menu {
        println!("side menu: {} ({})", side_menu.name, side_menu.role);
        for item in side_menu.items.iter().chain(Some(&side_menu.settings)) {
            println!(
                "  {} {}{}",
                item.entry.label,
                item.entry.path,
                active_marker(item.active)
            );
        }
    }

    if chrome.footer {
        println!("footer");
    }
}

fn active_marker(active: bool) -> &'static str {
    if active {
        " *"
    } else {
        ""
    }
}
