use std::path::PathBuf;

use clap::{Args, Subcommand};

use crate::cli::{authenticator, print_principal, ClientOptions};
use crate::core::{Address, ProfilePatch};
use crate::Result;

#[derive(Args, Debug)]
pub struct ProfileCommand {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Update profile fields. Omitted fields are left unchanged
    Update(UpdateCommand),
}

impl ProfileCommand {
    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let ProfileCommand { command } = self;

        match command {
            Command::Update(update) => update.run(options).await,
        }
    }
}

#[derive(Args, Debug)]
pub struct UpdateCommand {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long)]
    contact_number: Option<String>,
    #[arg(long)]
    street: Option<String>,
    #[arg(long)]
    city: Option<String>,
    #[arg(long)]
    state: Option<String>,
    #[arg(long)]
    zip_code: Option<String>,
    #[arg(long)]
    country: Option<String>,
    /// Profile image file(jpeg, jpg, png, gif, webp)
    #[arg(long)]
    image: Option<PathBuf>,
}

impl UpdateCommand {
    fn into_patch(self, current: Option<&Address>) -> ProfilePatch {
        let UpdateCommand {
            name,
            email,
            contact_number,
            street,
            city,
            state,
            zip_code,
            country,
            image,
        } = self;

        let touches_address = street.is_some()
            || city.is_some()
            || state.is_some()
            || zip_code.is_some()
            || country.is_some();

        // The address is sent as a whole, so unspecified parts keep their current value.
        let address = touches_address.then(|| {
            let mut address = current.cloned().unwrap_or_default();
            if let Some(street) = street {
                address.street = street;
            }
            if let Some(city) = city {
                address.city = city;
            }
            if let Some(state) = state {
                address.state = state;
            }
            if let Some(zip_code) = zip_code {
                address.zip_code = zip_code;
            }
            if let Some(country) = country {
                address.country = country;
            }
            address
        });

        ProfilePatch {
            name,
            email,
            contact_number,
            address,
            profile_image: image,
        }
    }

    pub async fn run(self, options: ClientOptions) -> Result<()> {
        let authenticator = authenticator(options).await?;

        let current = authenticator.principal().and_then(|p| p.address);
        let patch = self.into_patch(current.as_ref());

        authenticator.update_principal(&patch).await.into_result()?;

        if let Some(principal) = authenticator.principal() {
            print_principal(&principal);
        }
        Ok(())
    }
}
