//! Core data model definitions shared across Keel crates.
#![allow(missing_docs)]

pub mod credential;
pub mod error;
pub mod ids;
pub mod profile;
pub mod route;

pub use credential::SecureCredential;
pub use error::ModelError;
pub use ids::UserId;
pub use profile::{
    PROFILE_COLUMNS, PasswordField, ProfileField, ProfileFields, ProfileRecord,
};
pub use route::Route;
