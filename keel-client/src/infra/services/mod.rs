//! Backend adapters implementing the `keel-contracts` traits over [`ApiClient`].
//!
//! [`ApiClient`]: crate::infra::api_client::ApiClient

pub mod auth;
pub mod profile_store;

pub use auth::GoTrueAuthClient;
pub use profile_store::RestProfileStore;
