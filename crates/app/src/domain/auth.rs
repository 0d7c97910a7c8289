//! Auth service.

use std::sync::Mutex;

use async_trait::async_trait;
use mockall::automock;
use serde::Deserialize;

use crate::backend::{BackendClient, BackendError, check_status, decode_json};

/// The one account allowed to manage every order.
pub const ADMIN_EMAIL: &str = "admin@benabazar.com";

/// A signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct AuthUser {
    /// Account email.
    pub email: String,
}

impl AuthUser {
    /// Whether this account is the hard-coded admin.
    #[must_use]
    pub fn is_admin(&self) -> bool {
        self.email == ADMIN_EMAIL
    }
}

/// Sign-in/sign-up/sign-out and current-user lookup.
#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Signs in with email and password, starting a session.
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError>;

    /// Registers a new account.
    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, BackendError>;

    /// Ends the current session, if any.
    async fn sign_out(&self) -> Result<(), BackendError>;

    /// The currently signed-in user, or `None` when anonymous.
    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError>;
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    user: AuthUser,
}

/// Auth against the hosted backend's token endpoints.
///
/// Holds the session access token for the life of the process; one session
/// per client, matching the one-browsing-session model.
#[derive(Debug)]
pub struct RestAuthService {
    client: BackendClient,
    access_token: Mutex<Option<String>>,
}

impl RestAuthService {
    #[must_use]
    pub fn new(client: BackendClient) -> Self {
        Self {
            client,
            access_token: Mutex::new(None),
        }
    }

    fn store_token(&self, token: Option<String>) {
        if let Ok(mut guard) = self.access_token.lock() {
            *guard = token;
        }
    }

    fn token(&self) -> Option<String> {
        self.access_token.lock().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl AuthService for RestAuthService {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let response = self
            .client
            .auth(reqwest::Method::POST, "token?grant_type=password", None)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let token: TokenResponse = decode_json(response).await?;

        self.store_token(Some(token.access_token));

        Ok(token.user)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, BackendError> {
        let response = self
            .client
            .auth(reqwest::Method::POST, "signup", None)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()
            .await?;

        let token: TokenResponse = decode_json(response).await?;

        self.store_token(Some(token.access_token));

        Ok(token.user)
    }

    async fn sign_out(&self) -> Result<(), BackendError> {
        let Some(token) = self.token() else {
            return Ok(());
        };

        let response = self
            .client
            .auth(reqwest::Method::POST, "logout", Some(&token))
            .send()
            .await?;

        check_status(response).await?;

        self.store_token(None);

        Ok(())
    }

    async fn current_user(&self) -> Result<Option<AuthUser>, BackendError> {
        let Some(token) = self.token() else {
            return Ok(None);
        };

        let response = self
            .client
            .auth(reqwest::Method::GET, "user", Some(&token))
            .send()
            .await?;

        match decode_json(response).await {
            Ok(user) => Ok(Some(user)),
            Err(BackendError::Unauthenticated) => {
                // Stale token; drop it and report anonymous.
                self.store_token(None);
                Ok(None)
            }
            Err(error) => Err(error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admin_account_is_recognised() {
        let admin = AuthUser {
            email: ADMIN_EMAIL.to_string(),
        };
        let customer = AuthUser {
            email: "someone@example.com".to_string(),
        };

        assert!(admin.is_admin());
        assert!(!customer.is_admin());
    }
}
