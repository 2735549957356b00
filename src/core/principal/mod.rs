mod role;
pub use self::role::{ParseRoleError, Role};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::common::{warn, Time};

/// Opaque identifier the backend assigns to a user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PrincipalId(String);

impl PrincipalId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PrincipalId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Address {
    pub street: String,
    pub city: String,
    pub state: String,
    pub zip_code: String,
    pub country: String,
}

/// The authenticated user driving every authorization decision.
///
/// `role` is fixed at construction. Profile updates go through
/// [`Principal::merge`], which has no way to touch it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Principal {
    #[serde(rename = "_id", alias = "id")]
    pub id: PrincipalId,
    pub name: String,
    pub email: String,
    role: Role,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<Time>,
}

fn active_by_default() -> bool {
    true
}

impl Principal {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: Role,
    ) -> Self {
        Self {
            id: PrincipalId::new(id),
            name: name.into(),
            email: email.into(),
            role,
            is_active: true,
            contact_number: None,
            address: None,
            profile_image: None,
            created_at: None,
        }
    }

    pub fn role(&self) -> Role {
        self.role
    }

    /// Merge the fields returned by a profile update into this principal.
    pub fn merge(&mut self, update: PrincipalUpdate) {
        let PrincipalUpdate {
            id,
            name,
            email,
            role,
            is_active,
            contact_number,
            address,
            profile_image,
        } = update;

        if let Some(id) = id {
            if id != self.id {
                warn!(current=%self.id, returned=%id, "Profile update returned a different id, ignored");
            }
        }
        if let Some(role) = role {
            if role != self.role {
                warn!(current=%self.role, returned=%role, "Profile update returned a different role, ignored");
            }
        }
        if let Some(name) = name {
            self.name = name;
        }
        if let Some(email) = email {
            self.email = email;
        }
        if let Some(is_active) = is_active {
            self.is_active = is_active;
        }
        if contact_number.is_some() {
            self.contact_number = contact_number;
        }
        if address.is_some() {
            self.address = address;
        }
        if profile_image.is_some() {
            self.profile_image = profile_image;
        }
    }
}

/// Partial principal as returned by the profile update endpoint.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PrincipalUpdate {
    #[serde(rename = "_id", alias = "id")]
    pub id: Option<PrincipalId>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub role: Option<Role>,
    pub is_active: Option<bool>,
    pub contact_number: Option<String>,
    pub address: Option<Address>,
    pub profile_image: Option<String>,
}
