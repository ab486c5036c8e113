//! Authentication endpoints
//!
//! Typed surface over the auth API: credential issuance, registration,
//! identity lookup and profile updates. Login persists the issued credential
//! pair in the session store; the role is resolved lazily by the route guard
//! on the first protected navigation.

use crate::client::{ApiClient, REGISTER_PATH, TOKEN_PATH};
use crate::error::ApiError;
use crate::models::{Customer, CustomerPatch};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Identity endpoint ("who am I")
pub const ME_PATH: &str = "/auth/me/";

/// Credential pair issued at login
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    username: &'a str,
    password: &'a str,
}

/// Account registration payload
#[derive(Debug, Clone, Default, Serialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub zip_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

/// Account portion of the identity response
#[derive(Debug, Clone, Deserialize)]
pub struct AccountUser {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub is_staff: bool,
}

/// Response of `GET /auth/me/`
#[derive(Debug, Clone, Deserialize)]
pub struct CurrentUser {
    pub user: AccountUser,
    #[serde(default)]
    pub customer: Option<Customer>,
}

/// Authentication operations bound to a client
pub struct AuthService<'a> {
    client: &'a ApiClient,
}

impl<'a> AuthService<'a> {
    pub fn new(client: &'a ApiClient) -> Self {
        Self { client }
    }

    /// Exchange username/password for a credential pair and persist it
    pub async fn login(&self, username: &str, password: &str) -> Result<TokenPair, ApiError> {
        let pair: TokenPair = self
            .client
            .post(TOKEN_PATH, &LoginRequest { username, password })
            .await?;

        self.client.session().set_tokens(&pair.access, &pair.refresh);
        info!("Logged in as {}", username);
        Ok(pair)
    }

    /// Create a customer account; does not log in
    pub async fn register(&self, request: &RegisterRequest) -> Result<Customer, ApiError> {
        self.client.post(REGISTER_PATH, request).await
    }

    /// Fetch the authenticated identity
    pub async fn me(&self) -> Result<CurrentUser, ApiError> {
        self.client.get(ME_PATH).await
    }

    /// Partially update the authenticated customer's profile
    pub async fn update_me(&self, patch: &CustomerPatch) -> Result<Customer, ApiError> {
        self.client.patch(ME_PATH, patch).await
    }

    /// Drop credentials and the cached role together
    pub fn logout(&self) {
        self.client.session().clear();
        info!("Logged out");
    }

    /// True when an access credential is stored
    pub fn is_authenticated(&self) -> bool {
        self.client.session().access_token().is_some()
    }
}
