use clap::Args;

use crate::cli::{authenticator, print_principal, ClientOptions};
use crate::{ProprentError, Result};

/// Show the signed in principal
#[derive(Args, Debug)]
pub struct WhoamiCommand {
    /// Print the principal as json
    #[arg(long)]
    json: bool,
}

impl WhoamiCommand {
    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let authenticator = authenticator(options).await?;

        let state = authenticator.state();
        let principal = match state.principal() {
            Some(principal) => principal,
            None => {
                if let Some(err) = state.error() {
                    eprintln!("{}", err);
                }
                return Err(ProprentError::Unauthenticated);
            }
        };

        if self.json {
            let json = serde_json::to_string_pretty(principal)
                .map_err(crate::error::internal::Error::from)?;
            println!("{}", json);
        } else {
            print_principal(principal);
        }
        Ok(())
    }
}
