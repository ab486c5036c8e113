//! Trinity API client
//!
//! Thin reqwest wrapper carrying the session-aware request pipeline:
//!
//! - **Outbound**: every call except the auth-bootstrap endpoints gets the
//!   stored access credential attached as a bearer header. No credential
//!   means the request simply goes out unauthenticated.
//! - **Inbound**: a 401 on a non-bootstrap call triggers one token refresh
//!   and one retry of the original request with the new credential. A second
//!   401 on the retried call is surfaced to the caller unchanged. If the
//!   refresh itself fails (or no refresh credential is stored) the whole
//!   session is cleared and the caller sees [`ApiError::SessionExpired`].
//!
//! Concurrent 401s each run their own refresh; the server-side refresh is
//! idempotent and the last writer wins on the stored access credential, so
//! no single-flight coalescing is done.

use crate::error::ApiError;
use crate::session::SessionStore;
use reqwest::{header, Method, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Token issuance endpoint
pub const TOKEN_PATH: &str = "/auth/token/";
/// Token refresh endpoint
pub const TOKEN_REFRESH_PATH: &str = "/auth/token/refresh/";
/// Account registration endpoint
pub const REGISTER_PATH: &str = "/auth/register/";

/// Endpoints that must never carry a bearer header and never enter the
/// refresh path, to avoid refresh recursion
const AUTH_SKIP_PATHS: &[&str] = &[TOKEN_PATH, TOKEN_REFRESH_PATH, REGISTER_PATH];

fn is_auth_bootstrap(path: &str) -> bool {
    AUTH_SKIP_PATHS.iter().any(|p| path.contains(p))
}

#[derive(Debug, Serialize)]
struct RefreshRequest<'a> {
    refresh: &'a str,
}

#[derive(Debug, Deserialize)]
struct RefreshResponse {
    access: String,
}

/// Session-aware HTTP client for the Trinity API
#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    session: Arc<dyn SessionStore>,
}

impl ApiClient {
    /// Create a client against `base_url` with the default transport timeout
    pub fn new(base_url: &str, session: Arc<dyn SessionStore>) -> Result<Self, ApiError> {
        Self::with_timeout(base_url, session, Duration::from_secs(30))
    }

    /// Create a client from loaded configuration
    pub fn from_config(
        config: &crate::config::Config,
        session: Arc<dyn SessionStore>,
    ) -> Result<Self, ApiError> {
        Self::with_timeout(&config.api_url, session, config.timeout)
    }

    fn with_timeout(
        base_url: &str,
        session: Arc<dyn SessionStore>,
        timeout: Duration,
    ) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
            session,
        })
    }

    /// The injected session store
    pub fn session(&self) -> &Arc<dyn SessionStore> {
        &self.session
    }

    /// Base URL this client talks to
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path, None).await?;
        Ok(response.json().await?)
    }

    pub async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let response = self.request(Method::POST, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    pub async fn put<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let response = self.request(Method::PUT, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    pub async fn patch<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let body = serde_json::to_value(body)?;
        let response = self.request(Method::PATCH, path, Some(body)).await?;
        Ok(response.json().await?)
    }

    pub async fn delete(&self, path: &str) -> Result<(), ApiError> {
        self.request(Method::DELETE, path, None).await?;
        Ok(())
    }

    /// Issue a request through the session pipeline
    ///
    /// The retry flag guarantees at most one refresh attempt per original
    /// request; it is set before the refresh runs and checked before the
    /// refresh path is entered.
    async fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Response, ApiError> {
        let bootstrap = is_auth_bootstrap(path);
        let mut retried = false;

        loop {
            let response = self.send(method.clone(), path, body.as_ref(), bootstrap).await?;

            if response.status() == StatusCode::UNAUTHORIZED && !retried && !bootstrap {
                retried = true;
                debug!("401 on {} {} - attempting token refresh", method, path);
                self.refresh_access().await?;
                // The store now holds the fresh credential; re-issue once
                continue;
            }

            return Self::check_status(response).await;
        }
    }

    async fn send(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        bootstrap: bool,
    ) -> Result<Response, ApiError> {
        let url = format!("{}{}", self.base_url, path);
        let mut builder = self.http.request(method, url);

        if !bootstrap {
            // Re-read the store on every send so a refresh that landed
            // between calls is picked up immediately
            if let Some(token) = self.session.access_token() {
                builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
            }
        }

        if let Some(body) = body {
            builder = builder.json(body);
        }

        Ok(builder.send().await?)
    }

    /// Exchange the refresh credential for a new access credential
    ///
    /// Any failure here is fatal for the session: the store is cleared and
    /// the original caller observes [`ApiError::SessionExpired`].
    async fn refresh_access(&self) -> Result<(), ApiError> {
        let Some(refresh) = self.session.refresh_token() else {
            warn!("No refresh credential stored - clearing session");
            self.session.clear();
            return Err(ApiError::SessionExpired);
        };

        let url = format!("{}{}", self.base_url, TOKEN_REFRESH_PATH);
        let result: Result<RefreshResponse, ApiError> = async {
            let response = self
                .http
                .post(&url)
                .json(&RefreshRequest { refresh: &refresh })
                .send()
                .await?;
            let response = Self::check_status(response).await?;
            Ok(response.json().await?)
        }
        .await;

        match result {
            Ok(body) => {
                self.session.set_access_token(&body.access);
                info!("Access credential refreshed");
                Ok(())
            }
            Err(e) => {
                warn!("Token refresh failed ({}), clearing session", e);
                self.session.clear();
                Err(ApiError::SessionExpired)
            }
        }
    }

    async fn check_status(response: Response) -> Result<Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response.text().await.unwrap_or_default();
        Err(ApiError::Status { status, message })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bootstrap_paths_are_skipped() {
        assert!(is_auth_bootstrap("/auth/token/"));
        assert!(is_auth_bootstrap("/auth/token/refresh/"));
        assert!(is_auth_bootstrap("/auth/register/"));
        assert!(is_auth_bootstrap("/api/auth/token/refresh/"));
    }

    #[test]
    fn test_regular_paths_are_decorated() {
        assert!(!is_auth_bootstrap("/auth/me/"));
        assert!(!is_auth_bootstrap("/products/"));
        assert!(!is_auth_bootstrap("/invoices/42/"));
    }
}
