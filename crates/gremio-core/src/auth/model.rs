//! Login and registration forms.
//!
//! Validation runs before any network call; a form that fails it never
//! reaches the backend.

use crate::error::{GremioError, Result};
use serde::{Deserialize, Serialize};

pub const MIN_PASSWORD_LEN: usize = 6;

/// Email and password, as typed on the login screen.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

impl Credentials {
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            email: email.into().trim().to_string(),
            password: password.into(),
        }
    }

    pub fn validate(&self) -> Result<()> {
        validate_email(&self.email)?;
        if self.password.is_empty() {
            return Err(GremioError::validation("password is required"));
        }
        Ok(())
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("email", &self.email)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Client sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClientRegistration {
    pub names: String,
    pub surnames: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
}

impl ClientRegistration {
    pub fn validate(&self) -> Result<()> {
        require("names", &self.names)?;
        require("surnames", &self.surnames)?;
        validate_email(&self.email)?;
        validate_password(&self.password, &self.password_confirmation)
    }

    /// Full display name sent to the backend.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.names.trim(), self.surnames.trim())
            .trim()
            .to_string()
    }

    /// Request body for `POST /usuarios/registro`.
    pub fn to_signup(&self) -> ClientSignup {
        ClientSignup {
            name: self.full_name(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            kind: "cliente",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ClientSignup {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
    #[serde(rename = "tipo")]
    pub kind: &'static str,
}

/// Vendor sign-up form.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VendorRegistration {
    /// Company or personal trade name.
    pub company_name: String,
    pub email: String,
    pub password: String,
    pub password_confirmation: String,
    pub specialties: Vec<String>,
}

impl VendorRegistration {
    pub fn validate(&self) -> Result<()> {
        require("company name", &self.company_name)?;
        validate_email(&self.email)?;
        validate_password(&self.password, &self.password_confirmation)?;
        if self.specialties.iter().all(|s| s.trim().is_empty()) {
            return Err(GremioError::validation(
                "select at least one specialty",
            ));
        }
        Ok(())
    }

    /// Request body for `POST /vendedores/registro-vendedor`.
    pub fn to_signup(&self) -> VendorSignup {
        VendorSignup {
            company_name: self.company_name.trim().to_string(),
            email: self.email.trim().to_string(),
            password: self.password.clone(),
            specialties: self
                .specialties
                .iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct VendorSignup {
    #[serde(rename = "nombreEmpresa")]
    pub company_name: String,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
    #[serde(rename = "especialidades")]
    pub specialties: Vec<String>,
}

/// Specialty picks carried from the selection step to the vendor sign-up form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSpecialties {
    pub codes: Vec<String>,
    pub names: Vec<String>,
}

impl PendingSpecialties {
    /// Adds the specialty if absent, removes it otherwise.
    pub fn toggle(&mut self, code: &str, name: &str) {
        if let Some(index) = self.codes.iter().position(|c| c == code) {
            self.codes.remove(index);
            if index < self.names.len() {
                self.names.remove(index);
            }
        } else {
            self.codes.push(code.to_string());
            self.names.push(name.to_string());
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

fn require(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        Err(GremioError::validation(format!("{field} is required")))
    } else {
        Ok(())
    }
}

fn validate_password(password: &str, confirmation: &str) -> Result<()> {
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Err(GremioError::validation(format!(
            "password must be at least {MIN_PASSWORD_LEN} characters"
        )));
    }
    if password != confirmation {
        return Err(GremioError::validation("passwords do not match"));
    }
    Ok(())
}

/// Shape check only: `local@domain.tld`, no whitespace.
pub fn validate_email(email: &str) -> Result<()> {
    let email = email.trim();
    let invalid = || GremioError::validation(format!("invalid email address: '{email}'"));

    if email.is_empty() || email.chars().any(char::is_whitespace) {
        return Err(invalid());
    }
    let (local, domain) = email.split_once('@').ok_or_else(invalid)?;
    if local.is_empty() || domain.contains('@') {
        return Err(invalid());
    }
    let labels: Vec<&str> = domain.split('.').collect();
    if labels.len() < 2 || labels.iter().any(|label| label.is_empty()) {
        return Err(invalid());
    }
    Ok(())
}
