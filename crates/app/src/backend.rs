//! Hosted-backend REST client.
//!
//! The storefront's data lives in a hosted database/auth service exposed as
//! a PostgREST-style API plus a token auth endpoint. This module holds the
//! shared HTTP plumbing; the typed row operations live in [`crate::domain`].

use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use thiserror::Error;

/// Connection settings for the hosted backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Backend project base URL, e.g. `"https://xyz.supabase.co"`.
    pub base_url: String,

    /// Project API key, sent with every request.
    pub api_key: String,
}

/// Errors from backend row or auth operations.
#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport-level failure (connection, TLS, body decode).
    #[error("backend request failed")]
    Http(#[from] reqwest::Error),

    /// The backend answered with a non-success status.
    #[error("backend responded with status {status}: {body}")]
    UnexpectedResponse {
        /// HTTP status returned by the backend.
        status: StatusCode,
        /// Response body, for the surfaced notification.
        body: String,
    },

    /// A row that was expected to exist was absent.
    #[error("expected row not found")]
    MissingRow,

    /// The caller is not signed in, or the session token was rejected.
    #[error("not authenticated")]
    Unauthenticated,
}

/// HTTP client for the hosted backend's REST and auth surfaces.
#[derive(Debug, Clone)]
pub struct BackendClient {
    config: BackendConfig,
    http: Client,
}

impl BackendClient {
    /// Creates a client from the given configuration.
    #[must_use]
    pub fn new(config: BackendConfig) -> Self {
        Self {
            config,
            http: Client::new(),
        }
    }

    /// Builds a request against a `/rest/v1/...` row endpoint, with the
    /// project key attached.
    pub(crate) fn rest(&self, method: reqwest::Method, path: &str) -> RequestBuilder {
        let url = format!("{}/rest/v1/{path}", self.config.base_url);

        self.authorized(self.http.request(method, url), None)
    }

    /// Builds a request against an `/auth/v1/...` endpoint. A bearer token
    /// overrides the project key when a user session is active.
    pub(crate) fn auth(
        &self,
        method: reqwest::Method,
        path: &str,
        bearer: Option<&str>,
    ) -> RequestBuilder {
        let url = format!("{}/auth/v1/{path}", self.config.base_url);

        self.authorized(self.http.request(method, url), bearer)
    }

    fn authorized(&self, builder: RequestBuilder, bearer: Option<&str>) -> RequestBuilder {
        let token = bearer.unwrap_or(&self.config.api_key);

        builder
            .header("apikey", &self.config.api_key)
            .bearer_auth(token)
    }
}

/// Checks the response status and decodes a JSON body.
pub(crate) async fn decode_json<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, BackendError> {
    let response = check_status(response).await?;

    Ok(response.json().await?)
}

/// Checks the response status, discarding the body on success.
pub(crate) async fn check_status(
    response: reqwest::Response,
) -> Result<reqwest::Response, BackendError> {
    let status = response.status();

    if status == StatusCode::UNAUTHORIZED {
        return Err(BackendError::Unauthenticated);
    }

    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();

        return Err(BackendError::UnexpectedResponse { status, body });
    }

    Ok(response)
}
