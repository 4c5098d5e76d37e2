//! Application layer for gremio.
//!
//! Use cases and view controllers that coordinate the session store, the
//! REST ports and the realtime chat channel. The [`AppShell`] plays the role
//! of the router: it resolves paths, runs the role guard, and activates or
//! tears down views.

pub mod auth_usecase;
pub mod profile_usecase;
pub mod services;
pub mod shell;
pub mod views;

#[cfg(test)]
mod fakes;

pub use auth_usecase::AuthUseCase;
pub use profile_usecase::ProfileUseCase;
pub use services::Services;
pub use shell::{ActiveView, AppShell, Navigation};
