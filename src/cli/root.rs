use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::{login, logout, password, profile, register, route, whoami};
use crate::common::debug;
use crate::config::{Config, Initializer, SessionAuthenticator};
use crate::core::Outcome;

/// PropertyRent session command
#[derive(Parser, Debug)]
#[command(version, propagate_version = true, subcommand_required = true)]
pub struct ProprentCommand {
    /// Client options
    #[command(flatten)]
    pub client: ClientOptions,
    /// Subcommand
    #[command(subcommand)]
    pub command: Command,
}

/// Client options
#[derive(clap::Args, Debug)]
pub struct ClientOptions {
    /// Identity service base url
    #[arg(long, env = "PROPRENT_API_URL", global = true)]
    pub api_url: Option<String>,
    /// File the session credential is persisted to
    #[arg(long, env = "PROPRENT_SESSION_PATH", global = true)]
    pub session_path: Option<PathBuf>,
    /// Request timeout
    #[arg(long, env = "PROPRENT_REQUEST_TIMEOUT_MILLISECONDS", global = true)]
    pub request_timeout_milliseconds: Option<u64>,
    /// Configuration file path
    #[arg(
        long,
        short = 'C',
        default_value = "./proprent.yaml",
        env = "PROPRENT_CONFIG_PATH",
        global = true
    )]
    pub config: PathBuf,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sign in with email and password
    Login(login::LoginCommand),
    /// Create an account and sign in
    Register(register::RegisterCommand),
    /// Sign out and forget the stored credential
    Logout(logout::LogoutCommand),
    /// Show the signed in principal
    Whoami(whoami::WhoamiCommand),
    /// Profile operations
    Profile(profile::ProfileCommand),
    /// Change the password
    Password(password::PasswordCommand),
    /// Resolve a path against the route table
    Route(route::RouteCommand),
}

impl Command {
    pub async fn run(self, options: ClientOptions) -> crate::Result<()> {
        match self {
            Command::Login(login) => login.run(options).await,
            Command::Register(register) => register.run(options).await,
            Command::Logout(logout) => logout.run(options).await,
            Command::Whoami(whoami) => whoami.run(options).await,
            Command::Profile(profile) => profile.run(options).await,
            Command::Password(password) => password.run(options).await,
            Command::Route(route) => route.run(options).await,
        }
    }
}

/// Parse command line args
pub fn parse() -> ProprentCommand {
    ProprentCommand::parse()
}

/// Build an authenticator from the config file and command line overrides,
/// then resolve the persisted session. Ctrl-c abandons the resolution.
pub async fn authenticator(options: ClientOptions) -> crate::Result<SessionAuthenticator> {
    let ClientOptions {
        mut api_url,
        mut session_path,
        request_timeout_milliseconds,
        config,
    } = options;

    let mut initializer = Initializer::load_config_file(config).await?;

    let mut config = {
        let mut config = Config::default();

        config.api.set_base_url(&mut api_url);
        config
            .api
            .set_request_timeout_milliseconds(request_timeout_milliseconds);
        config.session.set_path(&mut session_path);
        config
    };

    initializer.config.override_merge(&mut config);

    debug!("{:?}", initializer);

    let authenticator = initializer.build_authenticator()?;

    // Initialization failures are recovered into an anonymous session.
    let _: Outcome = authenticator.initialize(tokio::signal::ctrl_c()).await;

    Ok(authenticator)
}
