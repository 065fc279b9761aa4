use async_trait::async_trait;
use keel_model::SecureCredential;

use crate::error::RemoteResult;

/// Credential and session operations against the auth backend.
#[async_trait]
pub trait AuthClient: Send + Sync {
    /// Replace the current user's password.
    async fn update_password(
        &self,
        new_password: &SecureCredential,
    ) -> RemoteResult<()>;

    /// Terminate the current session.
    async fn sign_out(&self) -> RemoteResult<()>;
}
