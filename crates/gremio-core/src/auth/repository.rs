use super::model::{ClientRegistration, Credentials, VendorRegistration};
use super::profile::{Profile, ProfileUpdate};
use crate::error::Result;
use crate::user::UserIdentity;
use async_trait::async_trait;

/// Login and sign-up endpoints.
///
/// Client and vendor accounts live in separate backend tables, each with its
/// own login endpoint.
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Returns the identity with its role set to client.
    async fn login_client(&self, credentials: &Credentials) -> Result<UserIdentity>;

    /// Returns the identity with its role set to vendor.
    async fn login_vendor(&self, credentials: &Credentials) -> Result<UserIdentity>;

    async fn register_client(&self, registration: &ClientRegistration) -> Result<()>;

    async fn register_vendor(&self, registration: &VendorRegistration) -> Result<()>;
}

/// Profile endpoints, dispatched on the user's role.
#[async_trait]
pub trait ProfileRepository: Send + Sync {
    async fn fetch(&self, user: &UserIdentity) -> Result<Profile>;

    async fn update(&self, user: &UserIdentity, update: &ProfileUpdate) -> Result<()>;
}
