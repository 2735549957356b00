use clap::Args;

use crate::cli::{authenticator, print_principal, ClientOptions};
use crate::core::{RegistrationForm, Role};
use crate::Result;

/// Create an account
#[derive(Args, Debug)]
pub struct RegisterCommand {
    /// Display name
    #[arg(long)]
    name: String,
    /// Account email
    #[arg(long)]
    email: String,
    /// Account password
    #[arg(long)]
    password: String,
    /// Password confirmation
    #[arg(long)]
    confirm_password: String,
    /// Account role(owner, tenant)
    #[arg(long)]
    role: Role,
    /// Ten digit mobile number
    #[arg(long)]
    contact_number: Option<String>,
}

impl RegisterCommand {
    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let RegisterCommand {
            name,
            email,
            password,
            confirm_password,
            role,
            contact_number,
        } = self;

        let form = RegistrationForm {
            name,
            email,
            password,
            confirm_password,
            role: Some(role),
            contact_number,
        };

        let authenticator = authenticator(options).await?;

        authenticator.register(&form).await.into_result()?;

        if let Some(principal) = authenticator.principal() {
            print_principal(&principal);
        }
        Ok(())
    }
}
