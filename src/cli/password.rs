use clap::Args;

use crate::cli::{authenticator, ClientOptions};
use crate::Result;

/// Change the password
#[derive(Args, Debug)]
pub struct PasswordCommand {
    /// Current password
    #[arg(long)]
    current: String,
    /// New password
    #[arg(long)]
    new: String,
}

impl PasswordCommand {
    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let PasswordCommand { current, new } = self;

        let authenticator = authenticator(options).await?;

        authenticator.update_secret(&current, &new).await.into_result()?;

        println!("OK");
        Ok(())
    }
}
