use async_trait::async_trait;
use keel_contracts::{ProfileStore, RemoteResult};
use keel_model::{PROFILE_COLUMNS, ProfileFields, ProfileRecord, UserId};
use std::sync::Arc;

use crate::infra::api_client::ApiClient;

/// Ask the REST layer for a single object instead of an array; zero or
/// several matching rows then come back as an error.
const SINGLE_OBJECT: &str = "application/vnd.pgrst.object+json";

/// Profile rows served by a PostgREST-style endpoint under `/rest/v1`
#[derive(Debug, Clone)]
pub struct RestProfileStore {
    client: Arc<ApiClient>,
    table: String,
}

impl RestProfileStore {
    pub fn new(client: Arc<ApiClient>, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }

    fn path(&self) -> String {
        format!("/rest/v1/{}", self.table)
    }

    fn id_filter(identity: UserId) -> String {
        format!("eq.{}", identity)
    }
}

#[async_trait]
impl ProfileStore for RestProfileStore {
    async fn read_profile(
        &self,
        identity: UserId,
    ) -> RemoteResult<ProfileRecord> {
        let id = Self::id_filter(identity);
        self.client
            .get_json(
                &self.path(),
                &[("select", PROFILE_COLUMNS), ("id", id.as_str())],
                Some(SINGLE_OBJECT),
            )
            .await
    }

    async fn write_profile(
        &self,
        identity: UserId,
        fields: &ProfileFields,
    ) -> RemoteResult<()> {
        let id = Self::id_filter(identity);
        self.client
            .patch_no_content(&self.path(), &[("id", id.as_str())], fields)
            .await
    }
}
