use keel_contracts::{RemoteError, RemoteResult};
use keel_model::SecureCredential;
use log::{info, warn};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Serialize, de::DeserializeOwned};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::infra::config::Config;

/// HTTP client for the backend's REST and auth endpoints
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    api_key: String,
    token_store: Arc<RwLock<Option<SecureCredential>>>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field(
                "has_token",
                &self
                    .token_store
                    .try_read()
                    .map(|t| t.is_some())
                    .unwrap_or(false),
            )
            .finish()
    }
}

/// Many users will type "localhost:54321", which reqwest rejects. Add a
/// scheme when missing and drop trailing slashes so paths join cleanly.
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    let normalized = if trimmed.starts_with("http://")
        || trimmed.starts_with("https://")
    {
        trimmed.to_string()
    } else {
        format!("http://{}", trimmed)
    };
    if normalized != raw {
        warn!(
            "[ApiClient] Normalized base URL from '{}' to '{}'",
            raw, normalized
        );
    }
    normalized
}

/// Pull a human-readable message out of an error body.
///
/// REST errors carry `message`, auth errors use `msg` or
/// `error_description`. Falls back to the raw body, then the status reason.
pub fn extract_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        for key in ["message", "msg", "error_description", "error"] {
            if let Some(text) = value.get(key).and_then(|v| v.as_str())
                && !text.trim().is_empty()
            {
                return text.to_string();
            }
        }
    }
    let body = body.trim();
    if !body.is_empty() {
        return body.to_string();
    }
    status
        .canonical_reason()
        .map(str::to_string)
        .unwrap_or_else(|| format!("Request failed with status {}", status))
}

impl ApiClient {
    pub fn new(
        base_url: &str,
        api_key: impl Into<String>,
        timeout: Duration,
    ) -> RemoteResult<Self> {
        let base_url = normalize_base_url(base_url);
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        info!("[ApiClient] Creating API client with base URL: {}", base_url);

        Ok(Self {
            client,
            base_url,
            api_key: api_key.into(),
            token_store: Arc::new(RwLock::new(None)),
        })
    }

    pub fn from_config(config: &Config) -> RemoteResult<Self> {
        let client = Self::new(
            &config.backend_url,
            config.api_key.clone(),
            Duration::from_secs(config.request_timeout_secs),
        )?;
        if let Some(token) = config.access_token() {
            // Fresh client, so the lock is uncontended.
            if let Ok(mut store) = client.token_store.try_write() {
                *store = Some(token);
            }
        }
        Ok(client)
    }

    pub fn build_url(&self, path: impl AsRef<str>) -> String {
        let p = path.as_ref();
        if p.starts_with("http://") || p.starts_with("https://") {
            return p.to_string();
        }
        format!("{}/{}", self.base_url, p.trim_start_matches('/'))
    }

    pub async fn set_token(&self, token: Option<SecureCredential>) {
        *self.token_store.write().await = token;
    }

    pub async fn has_token(&self) -> bool {
        self.token_store.read().await.is_some()
    }

    /// Attach the project key and, when signed in, the session bearer token.
    async fn build_request(&self, builder: RequestBuilder) -> RequestBuilder {
        let builder = builder.header("apikey", &self.api_key);
        match self.token_store.read().await.as_ref() {
            Some(token) => builder.bearer_auth(token.expose()),
            None => builder.bearer_auth(&self.api_key),
        }
    }

    /// Send and turn any non-success status into a [`RemoteError`].
    async fn execute(&self, request: RequestBuilder) -> RemoteResult<Response> {
        let response = request
            .send()
            .await
            .map_err(|e| RemoteError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_error_message(status, &body);
        if status == StatusCode::UNAUTHORIZED {
            warn!("[ApiClient] Unauthorized, dropping session token");
            self.set_token(None).await;
        }
        Err(RemoteError::status(status.as_u16(), message))
    }

    /// GET returning a JSON body. `accept` overrides the Accept header.
    pub async fn get_json<R: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        accept: Option<&str>,
    ) -> RemoteResult<R> {
        let url = self.build_url(path);
        log::debug!("GET {}", url);

        let mut request = self.client.get(&url).query(query);
        if let Some(accept) = accept {
            request = request.header("Accept", accept);
        }
        let request = self.build_request(request).await;
        let response = self.execute(request).await?;
        response
            .json::<R>()
            .await
            .map_err(|e| RemoteError::Decode(e.to_string()))
    }

    /// PATCH with a JSON body, discarding any response body
    pub async fn patch_no_content<T: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&str, &str)],
        body: &T,
    ) -> RemoteResult<()> {
        let url = self.build_url(path);
        log::debug!("PATCH {}", url);

        let request = self
            .client
            .patch(&url)
            .query(query)
            .header("Prefer", "return=minimal")
            .json(body);
        let request = self.build_request(request).await;
        self.execute(request).await.map(|_| ())
    }

    /// PUT with a JSON body, discarding any response body
    pub async fn put_no_content<T: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &T,
    ) -> RemoteResult<()> {
        let url = self.build_url(path);
        log::debug!("PUT {}", url);

        let request = self.client.put(&url).json(body);
        let request = self.build_request(request).await;
        self.execute(request).await.map(|_| ())
    }

    /// POST without a body, for endpoints that answer 204 No Content
    pub async fn post_no_content(&self, path: &str) -> RemoteResult<()> {
        let url = self.build_url(path);
        log::debug!("POST {}", url);

        let request = self.client.post(&url);
        let request = self.build_request(request).await;
        self.execute(request).await.map(|_| ())
    }
}
