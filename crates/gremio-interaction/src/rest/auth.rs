//! Login, sign-up and profile endpoints.

use crate::http::ApiClient;
use async_trait::async_trait;
use gremio_core::Result;
use gremio_core::auth::{
    AuthApi, ClientRegistration, Credentials, Profile, ProfileRepository, ProfileUpdate,
    VendorRegistration,
};
use gremio_core::user::{UserIdentity, UserRole};
use serde::Deserialize;
use serde::de::IgnoredAny;
use serde_json::Value;

#[derive(Debug, Clone)]
pub struct RestAuthApi {
    api: ApiClient,
}

impl RestAuthApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }
}

/// User record inside a login response.
#[derive(Debug, Deserialize)]
struct LoginUser {
    id: i64,
    nombre: String,
    #[serde(default)]
    correo: String,
    /// Comma-separated string on login, occasionally a list.
    #[serde(default)]
    especialidades: Option<Value>,
}

impl LoginUser {
    /// Accepts `{"usuario": {...}}`, `{"vendedor": {...}}` or a bare record.
    fn from_response(mut body: Value, wrapper: &str) -> Result<Self> {
        let wrapped = body.get(wrapper).is_some_and(Value::is_object);
        let record = if wrapped { body[wrapper].take() } else { body };
        Ok(serde_json::from_value(record)?)
    }

    fn into_identity(self, role: UserRole) -> UserIdentity {
        let specialties = match self.especialidades {
            Some(Value::String(text)) if !text.is_empty() => Some(text),
            Some(Value::Array(items)) => Some(
                items
                    .iter()
                    .filter_map(Value::as_str)
                    .collect::<Vec<_>>()
                    .join(","),
            )
            .filter(|joined| !joined.is_empty()),
            _ => None,
        };
        UserIdentity {
            id: self.id,
            name: self.nombre,
            email: self.correo,
            role,
            specialties,
        }
    }
}

#[async_trait]
impl AuthApi for RestAuthApi {
    async fn login_client(&self, credentials: &Credentials) -> Result<UserIdentity> {
        let body: Value = self.api.post_json("/usuarios/login", credentials).await?;
        Ok(LoginUser::from_response(body, "usuario")?.into_identity(UserRole::Client))
    }

    async fn login_vendor(&self, credentials: &Credentials) -> Result<UserIdentity> {
        let body: Value = self
            .api
            .post_json("/vendedores/login-vendedor", credentials)
            .await?;
        Ok(LoginUser::from_response(body, "vendedor")?.into_identity(UserRole::Vendor))
    }

    async fn register_client(&self, registration: &ClientRegistration) -> Result<()> {
        let _: IgnoredAny = self
            .api
            .post_json("/usuarios/registro", &registration.to_signup())
            .await?;
        Ok(())
    }

    async fn register_vendor(&self, registration: &VendorRegistration) -> Result<()> {
        let _: IgnoredAny = self
            .api
            .post_json("/vendedores/registro-vendedor", &registration.to_signup())
            .await?;
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct RestProfileApi {
    api: ApiClient,
}

impl RestProfileApi {
    pub fn new(api: ApiClient) -> Self {
        Self { api }
    }

    fn path(user: &UserIdentity) -> String {
        match user.role {
            UserRole::Client => format!("/usuarios/perfil/{}", user.id),
            UserRole::Vendor => format!("/vendedores/{}", user.id),
        }
    }
}

#[async_trait]
impl ProfileRepository for RestProfileApi {
    async fn fetch(&self, user: &UserIdentity) -> Result<Profile> {
        self.api.get_json(&Self::path(user), &[]).await
    }

    async fn update(&self, user: &UserIdentity, update: &ProfileUpdate) -> Result<()> {
        let _: IgnoredAny = self.api.put_json(&Self::path(user), update).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_vendor_login_body() {
        let body = json!({
            "mensaje": "Login exitoso",
            "vendedor": {"id": 7, "nombre": "Vera", "correo": "v@x.pe",
                         "especialidades": "HOSTING,CIBERSEGURIDAD", "tipo": "vendedor"}
        });
        let user = LoginUser::from_response(body, "vendedor")
            .unwrap()
            .into_identity(UserRole::Vendor);
        assert_eq!(user.role, UserRole::Vendor);
        assert_eq!(user.specialties.as_deref(), Some("HOSTING,CIBERSEGURIDAD"));
    }

    #[test]
    fn test_bare_client_record_and_list_specialties() {
        let body = json!({"id": 2, "nombre": "Ana", "especialidades": ["A", "B"]});
        let user = LoginUser::from_response(body, "usuario")
            .unwrap()
            .into_identity(UserRole::Client);
        assert_eq!(user.email, "");
        assert_eq!(user.specialties.as_deref(), Some("A,B"));
    }
}
