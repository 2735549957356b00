mod root;
pub use root::{authenticator, parse, ClientOptions, Command, ProprentCommand};

mod login;
mod logout;
mod password;
mod profile;
mod register;
mod route;
mod whoami;

use crate::core::Principal;

fn print_principal(principal: &Principal) {
    println!("{} <{}>", principal.name, principal.email);
    println!("  id:   {}", principal.id.as_str());
    println!("  role: {}", principal.role());
    if !principal.is_active {
        println!("  inactive");
    }
    if let Some(contact_number) = &principal.contact_number {
        println!("  contact: {}", contact_number);
    }
    if let Some(address) = &principal.address {
        println!(
            "  address: {}, {}, {} {}, {}",
            address.street, address.city, address.state, address.zip_code, address.country
        );
    }
}
