//! Authentication and profile module.
//!
//! # Module Structure
//!
//! - `model`: Login and sign-up forms with client-side validation
//! - `profile`: Editable profile data
//! - `repository`: Backend ports (`AuthApi`, `ProfileRepository`)

mod model;
mod profile;
mod repository;

pub use model::{
    ClientRegistration, ClientSignup, Credentials, MIN_PASSWORD_LEN, PendingSpecialties,
    VendorRegistration, VendorSignup, validate_email,
};
pub use profile::{Profile, ProfileUpdate};
pub use repository::{AuthApi, ProfileRepository};
