//! User identity domain model.
//!
//! Represents the authenticated user held in the session slot.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Which side of the marketplace a user acts on.
///
/// Serialized with the backend's names (`cliente` / `vendedor`).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
pub enum UserRole {
    /// Posts projects and accepts vendor solicitations.
    #[serde(rename = "cliente")]
    #[strum(to_string = "cliente", serialize = "client")]
    Client,
    /// Claims sub-tasks and delivers work.
    #[serde(rename = "vendedor")]
    #[strum(to_string = "vendedor", serialize = "vendor")]
    Vendor,
}

impl UserRole {
    /// The role on the other side of a conversation.
    pub fn counterpart(self) -> Self {
        match self {
            Self::Client => Self::Vendor,
            Self::Vendor => Self::Client,
        }
    }

    /// Wire name used in query strings and message payloads.
    pub fn as_wire(self) -> &'static str {
        match self {
            Self::Client => "cliente",
            Self::Vendor => "vendedor",
        }
    }
}

/// The identity stored in the session slot after login.
///
/// Trusted at face value from the login response; no token, no expiry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    /// Backend identifier (client and vendor ids live in separate tables)
    pub id: i64,
    /// Display name
    #[serde(rename = "nombre")]
    pub name: String,
    /// Login email
    #[serde(rename = "correo", default)]
    pub email: String,
    /// Client or vendor
    #[serde(rename = "tipo")]
    pub role: UserRole,
    /// Comma-separated specialties (vendors only)
    #[serde(
        rename = "especialidades",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub specialties: Option<String>,
}

impl UserIdentity {
    pub fn is_client(&self) -> bool {
        self.role == UserRole::Client
    }

    pub fn is_vendor(&self) -> bool {
        self.role == UserRole::Vendor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_identity_wire_format() {
        let json = r#"{"id":7,"nombre":"Ana","correo":"ana@x.io","tipo":"vendedor","especialidades":"Backend, QA"}"#;
        let user: UserIdentity = serde_json::from_str(json).unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.role, UserRole::Vendor);
        assert_eq!(user.specialties.as_deref(), Some("Backend, QA"));

        let back = serde_json::to_value(&user).unwrap();
        assert_eq!(back["tipo"], "vendedor");
        assert_eq!(back["nombre"], "Ana");
    }

    #[test]
    fn test_role_parsing_accepts_both_languages() {
        assert_eq!(UserRole::from_str("cliente").unwrap(), UserRole::Client);
        assert_eq!(UserRole::from_str("vendor").unwrap(), UserRole::Vendor);
        assert_eq!(UserRole::Client.to_string(), "cliente");
        assert_eq!(UserRole::Vendor.counterpart(), UserRole::Client);
    }
}
