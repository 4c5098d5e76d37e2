//! Login, logout and sign-up.

use anyhow::Result;
use gremio_core::GremioError;
use gremio_core::auth::{AuthApi, ClientRegistration, Credentials, VendorRegistration};
use gremio_core::user::{SessionStore, UserIdentity};
use std::sync::Arc;

/// Authenticates against the backend and owns the session slot's lifecycle.
///
/// There is a single login form for both roles: the client endpoint is tried
/// first and the vendor endpoint only when the backend rejects the client
/// attempt. A network failure on the first attempt is returned as-is.
pub struct AuthUseCase {
    auth: Arc<dyn AuthApi>,
    session: Arc<dyn SessionStore>,
}

impl AuthUseCase {
    pub fn new(auth: Arc<dyn AuthApi>, session: Arc<dyn SessionStore>) -> Self {
        Self { auth, session }
    }

    /// Validates the form, logs in, and stores the identity.
    ///
    /// # Errors
    ///
    /// - [`GremioError::Validation`] when the form is incomplete (no request is made)
    /// - The vendor endpoint's error when both endpoints reject the credentials
    pub async fn login(&self, credentials: &Credentials) -> Result<UserIdentity> {
        credentials.validate()?;

        let user = match self.auth.login_client(credentials).await {
            Ok(user) => user,
            Err(err @ GremioError::Transport(_)) => return Err(err.into()),
            Err(err) => {
                tracing::debug!("Client login rejected ({}), trying vendor login", err);
                self.auth.login_vendor(credentials).await?
            }
        };

        self.session.set_current_user(Some(user.clone()))?;
        tracing::info!("Logged in as {} ({})", user.name, user.role);
        Ok(user)
    }

    pub fn logout(&self) -> Result<()> {
        if let Some(user) = self.session.current_user() {
            tracing::info!("Logging out {}", user.name);
        }
        self.session.clear()?;
        Ok(())
    }

    pub async fn register_client(&self, registration: &ClientRegistration) -> Result<()> {
        registration.validate()?;
        self.auth.register_client(registration).await?;
        tracing::info!("Registered client {}", registration.email);
        Ok(())
    }

    pub async fn register_vendor(&self, registration: &VendorRegistration) -> Result<()> {
        registration.validate()?;
        self.auth.register_vendor(registration).await?;
        tracing::info!("Registered vendor {}", registration.email);
        Ok(())
    }
}
