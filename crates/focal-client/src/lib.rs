pub mod auth;
pub mod comments;
pub mod config;
pub mod feed;
pub mod follows;
pub mod likes;
pub mod me;
pub mod pagers;
pub mod posts;
pub mod saves;
pub mod social;
pub mod users;

use std::sync::RwLock;
use std::time::Duration;

use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use focal_types::api::ApiEnvelope;
use focal_types::error::ApiError;

pub use config::Config;

/// Fallback shape for error bodies that don't decode as a full envelope.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: String,
}

/// Typed client for the Focal REST API.
///
/// Holds a connection-pooled `reqwest::Client` and the current bearer token.
/// The token is updatable at runtime (login/logout) so one client instance
/// can live for the whole process; share it behind an `Arc`.
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: RwLock<Option<String>>,
}

impl ApiClient {
    pub fn new(config: Config) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token: RwLock::new(config.token),
        })
    }

    /// Store the bearer token attached to every subsequent request.
    pub fn set_token(&self, token: impl Into<String>) {
        *self.token.write().expect("token lock poisoned") = Some(token.into());
    }

    /// Drop the stored token (logout).
    pub fn clear_token(&self) {
        *self.token.write().expect("token lock poisoned") = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.read().expect("token lock poisoned").is_some()
    }

    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);
        if let Some(token) = self.token.read().expect("token lock poisoned").as_deref() {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    /// Send a request and unwrap the `{ success, message, data }` envelope.
    ///
    /// Status mapping: 401 → `Unauthorized` (caller routes to login), other
    /// non-2xx → `Api { status, message }` with the server's message when the
    /// body carries one.
    pub(crate) async fn send<T: DeserializeOwned>(
        &self,
        builder: RequestBuilder,
    ) -> Result<T, ApiError> {
        let request = builder
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        debug!(method = %request.method(), url = %request.url(), "api request");

        let response = self
            .http
            .execute(request)
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            warn!("api request rejected: unauthorized");
            return Err(ApiError::Unauthorized);
        }
        if !status.is_success() {
            let message = response
                .json::<ErrorBody>()
                .await
                .map(|b| b.message)
                .unwrap_or_default();
            warn!(status = status.as_u16(), %message, "api request failed");
            return Err(ApiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let envelope = response
            .json::<ApiEnvelope<T>>()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))?;
        Ok(envelope.data)
    }
}
