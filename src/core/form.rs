//! Account forms submitted to the identity service, with the same field
//! rules the web forms enforce before anything goes over the wire.

use std::fmt;
use std::path::PathBuf;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::core::{Address, Role};

pub const PASSWORD_MIN_LENGTH: usize = 6;
pub const NAME_MIN_LENGTH: usize = 2;
pub const NAME_MAX_LENGTH: usize = 50;
pub const MAX_IMAGE_BYTES: u64 = 5 * 1024 * 1024;
pub const IMAGE_EXTENSIONS: [&str; 5] = ["jpeg", "jpg", "png", "gif", "webp"];

const REQUIRED_FIELD: &str = "This field is required";
const INVALID_EMAIL: &str = "Please enter a valid email address";
const INVALID_PHONE: &str = "Please enter a valid 10-digit phone number";
const INVALID_ZIP_CODE: &str = "Please enter a valid 6-digit ZIP code";
const PASSWORDS_DONT_MATCH: &str = "Passwords do not match";

static EMAIL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static PHONE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[6-9]\d{9}$").unwrap());
static ZIP_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{6}$").unwrap());

/// Field level validation failures, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<(&'static str, String)>,
}

impl ValidationErrors {
    fn add(&mut self, field: &'static str, message: impl Into<String>) {
        self.errors.push((field, message.into()));
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.errors
            .iter()
            .find(|(name, _)| *name == field)
            .map(|(_, message)| message.as_str())
    }

    pub fn fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.errors.iter().map(|(field, _)| *field)
    }

    fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, (field, message)) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("; ")?;
            }
            write!(f, "{}: {}", field, message)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationErrors {}

fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

fn check_name(errors: &mut ValidationErrors, name: &str, enforce_max: bool) {
    let len = name.chars().count();
    if is_blank(name) {
        errors.add("name", REQUIRED_FIELD);
    } else if len < NAME_MIN_LENGTH {
        errors.add(
            "name",
            format!("Name must be at least {} characters long", NAME_MIN_LENGTH),
        );
    } else if enforce_max && len > NAME_MAX_LENGTH {
        errors.add(
            "name",
            format!("Name must be less than {} characters", NAME_MAX_LENGTH),
        );
    }
}

fn check_email(errors: &mut ValidationErrors, email: &str) {
    if is_blank(email) {
        errors.add("email", REQUIRED_FIELD);
    } else if !EMAIL.is_match(email) {
        errors.add("email", INVALID_EMAIL);
    }
}

fn check_contact_number(errors: &mut ValidationErrors, contact_number: Option<&str>) {
    match contact_number {
        Some(number) if !number.is_empty() && !PHONE.is_match(number) => {
            errors.add("contactNumber", INVALID_PHONE)
        }
        _ => {}
    }
}

fn check_password(errors: &mut ValidationErrors, field: &'static str, password: &str) {
    if password.is_empty() {
        errors.add(field, REQUIRED_FIELD);
    } else if password.chars().count() < PASSWORD_MIN_LENGTH {
        errors.add(
            field,
            format!(
                "Password must be at least {} characters long",
                PASSWORD_MIN_LENGTH
            ),
        );
    }
}

#[derive(Clone, Serialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

impl LoginForm {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_email(&mut errors, &self.email);
        if self.password.is_empty() {
            errors.add("password", REQUIRED_FIELD);
        }
        errors.into_result()
    }
}

impl fmt::Debug for LoginForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("LoginForm")
            .field("email", &self.email)
            .field("password", &"****")
            .finish()
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationForm {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip)]
    pub confirm_password: String,
    pub role: Option<Role>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
}

impl RegistrationForm {
    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        check_name(&mut errors, &self.name, true);
        check_email(&mut errors, &self.email);
        check_password(&mut errors, "password", &self.password);
        if self.confirm_password.is_empty() {
            errors.add("confirmPassword", REQUIRED_FIELD);
        } else if self.confirm_password != self.password {
            errors.add("confirmPassword", PASSWORDS_DONT_MATCH);
        }
        if self.role.is_none() {
            errors.add("role", REQUIRED_FIELD);
        }
        check_contact_number(&mut errors, self.contact_number.as_deref());
        errors.into_result()
    }
}

impl fmt::Debug for RegistrationForm {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RegistrationForm")
            .field("name", &self.name)
            .field("email", &self.email)
            .field("role", &self.role)
            .field("contact_number", &self.contact_number)
            .finish_non_exhaustive()
    }
}

/// Profile fields to change. A role is never part of it.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfilePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    // Local image file uploaded alongside the fields.
    #[serde(skip)]
    pub profile_image: Option<PathBuf>,
}

impl ProfilePatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.email.is_none()
            && self.contact_number.is_none()
            && self.address.is_none()
            && self.profile_image.is_none()
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if let Some(name) = &self.name {
            check_name(&mut errors, name, false);
        }
        if let Some(email) = &self.email {
            check_email(&mut errors, email);
        }
        check_contact_number(&mut errors, self.contact_number.as_deref());
        if let Some(address) = &self.address {
            if !address.zip_code.is_empty() && !ZIP_CODE.is_match(&address.zip_code) {
                errors.add("address.zipCode", INVALID_ZIP_CODE);
            }
        }
        if let Some(image) = &self.profile_image {
            let allowed = image
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| IMAGE_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
                .unwrap_or(false);
            if !allowed {
                errors.add(
                    "profileImage",
                    "Invalid file type. Only JPEG, PNG, GIF, and WebP images are allowed",
                );
            }
        }
        errors.into_result()
    }
}

#[derive(Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PasswordChange {
    pub current_password: String,
    pub new_password: String,
}

impl PasswordChange {
    pub fn new(current: impl Into<String>, new: impl Into<String>) -> Self {
        Self {
            current_password: current.into(),
            new_password: new.into(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationErrors> {
        let mut errors = ValidationErrors::default();
        if self.current_password.is_empty() {
            errors.add("currentPassword", REQUIRED_FIELD);
        }
        check_password(&mut errors, "newPassword", &self.new_password);
        errors.into_result()
    }
}

impl fmt::Debug for PasswordChange {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("PasswordChange(****)")
    }
}
