use clap::Args;

use crate::cli::{authenticator, print_principal, ClientOptions};
use crate::Result;

/// Sign in
#[derive(Args, Debug)]
pub struct LoginCommand {
    /// Account email
    #[arg(long, env = "PROPRENT_EMAIL")]
    email: String,
    /// Account password
    #[arg(long, env = "PROPRENT_PASSWORD", hide_env_values = true)]
    password: String,
}

impl LoginCommand {
    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let LoginCommand { email, password } = self;

        let authenticator = authenticator(options).await?;

        authenticator.login(&email, &password).await.into_result()?;

        if let Some(principal) = authenticator.principal() {
            print_principal(&principal);
        }
        Ok(())
    }
}
