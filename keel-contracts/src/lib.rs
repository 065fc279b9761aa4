//! Trait surfaces for the services the account screen talks to.
//!
//! The view-model only ever sees these traits. Concrete HTTP adapters live in
//! `keel-client::infra`; tests supply in-memory fakes.

pub mod auth;
pub mod error;
pub mod profile_store;
pub mod router;
pub mod session;

pub use auth::AuthClient;
pub use error::{RemoteError, RemoteResult};
pub use profile_store::ProfileStore;
pub use router::Router;
pub use session::{IdentityReceiver, SessionAccessor};
