//! Editable profile data for either role.

use serde::{Deserialize, Deserializer, Serialize};

/// Profile as returned by `GET /usuarios/perfil/{id}` or `GET /vendedores/{id}`.
///
/// Vendor-only fields stay `None` for clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "correo", default)]
    pub email: String,
    #[serde(rename = "telefono", default)]
    pub phone: Option<String>,
    #[serde(rename = "direccion", default)]
    pub address: Option<String>,
    #[serde(rename = "ciudad", default)]
    pub city: Option<String>,
    #[serde(rename = "biografia", default)]
    pub biography: Option<String>,
    #[serde(rename = "experiencia", default)]
    pub experience: Option<String>,
    #[serde(rename = "habilidades", default)]
    pub skills: Option<String>,
    #[serde(rename = "especialidades", default, deserialize_with = "one_or_many")]
    pub specialties: Vec<String>,
}

impl Profile {
    /// Up to two uppercase initials of the display name.
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(char::to_uppercase)
            .take(2)
            .collect()
    }
}

/// Body of the profile `PUT`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileUpdate {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "telefono", skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "direccion", skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(rename = "ciudad", skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(rename = "biografia", skip_serializing_if = "Option::is_none")]
    pub biography: Option<String>,
    #[serde(rename = "experiencia", skip_serializing_if = "Option::is_none")]
    pub experience: Option<String>,
    #[serde(rename = "habilidades", skip_serializing_if = "Option::is_none")]
    pub skills: Option<String>,
}

fn one_or_many<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Many(Vec<String>),
        One(String),
    }

    Ok(match Option::<Raw>::deserialize(deserializer)? {
        None => Vec::new(),
        Some(Raw::Many(list)) => list,
        Some(Raw::One(text)) => text
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vendor_profile_with_list() {
        let json = r#"{"id": 7, "nombre": "vera lópez", "correo": "v@x.pe",
                       "especialidades": ["HOSTING", "CLOUD_COMPUTING"],
                       "telefono": null, "experiencia": "5 años"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert_eq!(profile.specialties.len(), 2);
        assert_eq!(profile.initials(), "VL");
    }

    #[test]
    fn test_client_profile_without_specialties() {
        let json = r#"{"id": 2, "nombre": "Ana", "correo": "a@x.pe", "ciudad": "Lima"}"#;
        let profile: Profile = serde_json::from_str(json).unwrap();
        assert!(profile.specialties.is_empty());
        assert_eq!(profile.city.as_deref(), Some("Lima"));
    }

    #[test]
    fn test_update_skips_unset_fields() {
        let update = ProfileUpdate {
            name: "Ana".into(),
            city: Some("Cusco".into()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value, serde_json::json!({"nombre": "Ana", "ciudad": "Cusco"}));
    }
}
