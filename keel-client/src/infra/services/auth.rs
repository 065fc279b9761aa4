//! Session and credential operations against a GoTrue-style auth API
//! mounted under `/auth/v1`.

use async_trait::async_trait;
use keel_contracts::{
    AuthClient, IdentityReceiver, RemoteResult, SessionAccessor,
};
use keel_model::{SecureCredential, UserId};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::watch;

use crate::infra::api_client::ApiClient;

const USER_PATH: &str = "/auth/v1/user";
const LOGOUT_PATH: &str = "/auth/v1/logout";

#[derive(Debug, Deserialize)]
struct AuthUser {
    id: UserId,
}

#[derive(Serialize)]
struct PasswordUpdate<'a> {
    password: &'a str,
}

/// Auth backend client that also owns the session's identity channel.
#[derive(Debug)]
pub struct GoTrueAuthClient {
    client: Arc<ApiClient>,
    identity: watch::Sender<Option<UserId>>,
}

impl GoTrueAuthClient {
    pub fn new(client: Arc<ApiClient>) -> Self {
        let (identity, _) = watch::channel(None);
        Self { client, identity }
    }

    /// Resolve who the stored access token belongs to and publish it.
    ///
    /// No token, or a token the backend rejects, publishes no identity.
    /// Transport failures are returned and leave the identity untouched.
    pub async fn restore(&self) -> RemoteResult<Option<UserId>> {
        if !self.client.has_token().await {
            log::debug!("[Auth] No stored session");
            self.identity.send_replace(None);
            return Ok(None);
        }

        match self.client.get_json::<AuthUser>(USER_PATH, &[], None).await {
            Ok(user) => {
                log::info!("[Auth] Session restored for user {}", user.id);
                self.identity.send_replace(Some(user.id));
                Ok(Some(user.id))
            }
            Err(e) if e.is_unauthorized() => {
                log::warn!("[Auth] Stored session rejected: {}", e);
                self.client.set_token(None).await;
                self.identity.send_replace(None);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }
}

impl SessionAccessor for GoTrueAuthClient {
    fn subscribe(&self) -> IdentityReceiver {
        self.identity.subscribe()
    }
}

#[async_trait]
impl AuthClient for GoTrueAuthClient {
    async fn update_password(
        &self,
        new_password: &SecureCredential,
    ) -> RemoteResult<()> {
        let body = PasswordUpdate {
            password: new_password.expose(),
        };
        self.client.put_no_content(USER_PATH, &body).await
    }

    /// The local session ends whether or not the backend acknowledged.
    async fn sign_out(&self) -> RemoteResult<()> {
        let result = self.client.post_no_content(LOGOUT_PATH).await;
        self.client.set_token(None).await;
        self.identity.send_replace(None);
        result
    }
}
