use async_trait::async_trait;
use keel_model::{ProfileFields, ProfileRecord, UserId};

use crate::error::RemoteResult;

/// Remote read/write access to the single profile row of a user.
#[async_trait]
pub trait ProfileStore: Send + Sync {
    /// Read the name columns of the row keyed by `identity`.
    ///
    /// Exactly one row is expected; zero or many is an error.
    async fn read_profile(&self, identity: UserId)
    -> RemoteResult<ProfileRecord>;

    /// Overwrite all three name columns of the row keyed by `identity`.
    async fn write_profile(
        &self,
        identity: UserId,
        fields: &ProfileFields,
    ) -> RemoteResult<()>;
}
