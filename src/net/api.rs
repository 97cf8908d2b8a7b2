//! Identity API client.
//!
//! Thin HTTP wrapper over the `/users/*` endpoints. Pure response
//! classification in `parse_body` for testability.
//!
//! ERROR HANDLING
//! ==============
//! Non-2xx statuses become [`ApiError::Status`] carrying the `detail` text
//! the server puts in its error bodies; transport and deserialization
//! failures get their own variants. Nothing here retries, and the HTTP
//! client is built without request timeouts, so a hung call suspends its
//! caller until the server answers.

use super::types::{ApiError, TokenResponse, User};

// =============================================================================
// TRAIT
// =============================================================================

/// Async seam over the identity endpoints. Enables scripted mocks in tests.
#[async_trait::async_trait]
pub trait IdentityApi: Send + Sync {
    /// `POST /users/` — create an anonymous account and grant its token.
    ///
    /// # Errors
    ///
    /// Returns an [`ApiError`] if the request fails or the response is
    /// malformed.
    async fn create_anonymous(&self) -> Result<TokenResponse, ApiError>;

    /// `POST /users/login` — authenticate with email + password.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with status 401 on bad credentials.
    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError>;

    /// `POST /users/register` — upgrade the anonymous account behind
    /// `anon_token` into a registered account with the given credentials.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with status 409 when the email is taken,
    /// 401 when `anon_token` is not accepted, or 422 on validation failures.
    async fn register(&self, email: &str, password: &str, anon_token: &str) -> Result<TokenResponse, ApiError>;

    /// `GET /users/me` — fetch the profile behind `token`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Status`] with status 401 when the token is
    /// missing, invalid, or expired.
    async fn fetch_me(&self, token: &str) -> Result<User, ApiError>;
}

// =============================================================================
// CLIENT
// =============================================================================

/// Reqwest-backed [`IdentityApi`] implementation.
///
/// `base_url` is the API root the `/users/*` paths are joined onto, e.g.
/// `http://127.0.0.1:8000/api`.
pub struct IdentityClient {
    http: reqwest::Client,
    base_url: String,
}

impl IdentityClient {
    #[must_use]
    pub fn new(base_url: &str) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.trim_end_matches('/').to_owned(),
        }
    }

    async fn request_grant(
        &self,
        path: &str,
        credentials: Option<&CredentialsRequest<'_>>,
        bearer: Option<&str>,
    ) -> Result<TokenResponse, ApiError> {
        let mut request = self.http.post(join_url(&self.base_url, path));
        if let Some(credentials) = credentials {
            request = request.json(credentials);
        }
        if let Some(token) = bearer {
            request = request.bearer_auth(token);
        }

        let response = request.send().await.map_err(|e| ApiError::Request(e.to_string()))?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
        parse_body(status, &text)
    }
}

#[async_trait::async_trait]
impl IdentityApi for IdentityClient {
    async fn create_anonymous(&self) -> Result<TokenResponse, ApiError> {
        self.request_grant("/users/", None, None).await
    }

    async fn login(&self, email: &str, password: &str) -> Result<TokenResponse, ApiError> {
        let credentials = CredentialsRequest { email, password };
        self.request_grant("/users/login", Some(&credentials), None).await
    }

    async fn register(&self, email: &str, password: &str, anon_token: &str) -> Result<TokenResponse, ApiError> {
        let credentials = CredentialsRequest { email, password };
        self.request_grant("/users/register", Some(&credentials), Some(anon_token))
            .await
    }

    async fn fetch_me(&self, token: &str) -> Result<User, ApiError> {
        let response = self
            .http
            .get(join_url(&self.base_url, "/users/me"))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| ApiError::Request(e.to_string()))?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(|e| ApiError::Request(e.to_string()))?;
        parse_body(status, &text)
    }
}

// =============================================================================
// WIRE TYPES
// =============================================================================

#[derive(serde::Serialize)]
struct CredentialsRequest<'a> {
    email: &'a str,
    password: &'a str,
}

// =============================================================================
// PARSING
// =============================================================================

/// Join the API root and an endpoint path without doubling slashes. A
/// trailing slash on `path` is preserved; the server routes distinguish
/// `/users/` from `/users`.
fn join_url(base_url: &str, path: &str) -> String {
    format!("{}/{}", base_url.trim_end_matches('/'), path.trim_start_matches('/'))
}

/// Classify a response: non-2xx becomes [`ApiError::Status`] with the
/// `detail` text pulled out of the error body, 2xx deserializes into `T`.
fn parse_body<T: serde::de::DeserializeOwned>(status: u16, text: &str) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status { status, detail: error_detail(text) });
    }
    serde_json::from_str(text).map_err(|e| ApiError::Parse(e.to_string()))
}

/// Pull the human-readable `detail` out of an error body, falling back to
/// the raw body when it is not the expected JSON shape. Validation errors
/// arrive with a structured `detail`; those are rendered as compact JSON.
fn error_detail(text: &str) -> String {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(value) => match value.get("detail") {
            Some(serde_json::Value::String(detail)) => detail.clone(),
            Some(other) => other.to_string(),
            None => text.to_owned(),
        },
        Err(_) => text.to_owned(),
    }
}

#[cfg(test)]
#[path = "api_test.rs"]
mod tests;
