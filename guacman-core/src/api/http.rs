//! `reqwest` implementation of the administration API
//!
//! Endpoints follow the Guacamole REST layout:
//!
//! | Operation   | Request                                             |
//! |-------------|-----------------------------------------------------|
//! | tree        | `GET api/connectionGroup/{root}/tree?permission=P`  |
//! | users       | `GET api/user?permission=P`                         |
//! | create user | `POST api/user` with the user as JSON body          |
//! | protocols   | `GET api/protocol`                                  |
//!
//! The auth token travels as the `token` query parameter.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE};
use reqwest::{Client, Method, RequestBuilder, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::{ApiError, ApiResult};
use crate::models::{ConnectionGroup, ObjectPermissionType, ProtocolMap, User};

use super::{ConnectionGroupService, ProtocolService, UserService};

/// Default request timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const JSON: &str = "application/json";

/// Error body returned by the server on failures
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// HTTP client for the administration REST API
#[derive(Clone)]
pub struct HttpAdminClient {
    client: Client,
    base_url: Url,
    token: Option<SecretString>,
}

impl HttpAdminClient {
    /// Creates a client for the web application rooted at `base_url`
    ///
    /// `base_url` is the application root (e.g.
    /// `https://example.org/guacamole`), not the `api/` path.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::InvalidUrl` if `base_url` is not an absolute
    /// http(s) URL, or `ApiError::Transport` if the HTTP client cannot be
    /// built.
    pub fn new(base_url: &str, token: Option<SecretString>, timeout: Duration) -> ApiResult<Self> {
        let base_url = parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    /// Returns the application root URL
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds the URL for `api/{segments..}` with the given query pairs
    ///
    /// The token is appended last and only if one is configured.
    fn endpoint(&self, segments: &[&str], query: &[(&str, &str)]) -> ApiResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .push("api")
            .extend(segments);

        if !query.is_empty() || self.token.is_some() {
            let mut pairs = url.query_pairs_mut();
            for (key, value) in query {
                pairs.append_pair(key, value);
            }
            if let Some(ref token) = self.token {
                pairs.append_pair("token", token.expose_secret());
            }
        }

        Ok(url)
    }

    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client.request(method, url).header(ACCEPT, JSON)
    }

    /// Sends a request and returns the raw body of a successful response
    #[instrument(name = "api.request", level = "debug", skip(self, builder))]
    async fn send(&self, builder: RequestBuilder, path: &str) -> ApiResult<Vec<u8>> {
        let started = Instant::now();
        let response = builder.send().await.map_err(|e| {
            let e = e.without_url();
            warn!(path, error = %e, "API request failed");
            ApiError::Transport(e.to_string())
        })?;

        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Transport(e.without_url().to_string()))?;

        debug!(
            path,
            status = status.as_u16(),
            duration_ms = u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
            "API request completed"
        );

        if !status.is_success() {
            let message = serde_json::from_slice::<ErrorBody>(&body)
                .ok()
                .and_then(|b| b.message)
                .unwrap_or_else(|| {
                    status
                        .canonical_reason()
                        .unwrap_or("Unknown error")
                        .to_string()
                });
            return Err(ApiError::Status {
                status: status.as_u16(),
                message,
            });
        }

        Ok(body.to_vec())
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        segments: &[&str],
        query: &[(&str, &str)],
    ) -> ApiResult<T> {
        let url = self.endpoint(segments, query)?;
        let path = url.path().to_string();
        let body = self.send(self.request(Method::GET, url), &path).await?;
        serde_json::from_slice(&body).map_err(|e| ApiError::Decode(e.to_string()))
    }
}

impl std::fmt::Debug for HttpAdminClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpAdminClient")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[async_trait]
impl ConnectionGroupService for HttpAdminClient {
    async fn connection_group_tree(
        &self,
        root_id: &str,
        permission: ObjectPermissionType,
    ) -> ApiResult<ConnectionGroup> {
        self.get_json(
            &["connectionGroup", root_id, "tree"],
            &[("permission", permission.as_str())],
        )
        .await
    }
}

#[async_trait]
impl UserService for HttpAdminClient {
    async fn users(&self, permission: ObjectPermissionType) -> ApiResult<Vec<User>> {
        self.get_json(&["user"], &[("permission", permission.as_str())])
            .await
    }

    async fn create_user(&self, user: &User) -> ApiResult<()> {
        let url = self.endpoint(&["user"], &[])?;
        let path = url.path().to_string();
        let body = serde_json::to_vec(user).map_err(|e| ApiError::Decode(e.to_string()))?;
        let builder = self
            .request(Method::POST, url)
            .header(CONTENT_TYPE, JSON)
            .body(body);
        self.send(builder, &path).await?;
        Ok(())
    }
}

#[async_trait]
impl ProtocolService for HttpAdminClient {
    async fn protocols(&self) -> ApiResult<ProtocolMap> {
        self.get_json(&["protocol"], &[]).await
    }
}

fn parse_base_url(base_url: &str) -> ApiResult<Url> {
    let url = Url::parse(base_url.trim())
        .map_err(|e| ApiError::InvalidUrl(format!("{base_url}: {e}")))?;
    match url.scheme() {
        "http" | "https" if !url.cannot_be_a_base() => Ok(url),
        _ => Err(ApiError::InvalidUrl(format!(
            "{base_url}: expected an http or https URL"
        ))),
    }
}
