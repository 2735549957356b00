use clap::Args;

use crate::cli::{authenticator, ClientOptions};
use crate::Result;

/// Sign out
#[derive(Args, Debug)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let authenticator = authenticator(options).await?;

        authenticator.logout().await.into_result()?;

        println!("OK");
        Ok(())
    }
}
