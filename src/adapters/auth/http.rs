//! HTTP adapter for the authentication service.
//!
//! Implements the `SessionBoundary` port against the service's REST API:
//!
//! - `GET  /api/auth/me` - current user
//! - `POST /api/auth/logout`
//! - `POST /api/auth/login` - `{ email, password }`
//! - `POST /api/auth/register` - `{ name, email, password, role }`
//! - `POST /api/auth/google` - `{ credential }`
//!
//! Requests are credentialed: the client keeps a cookie store, so the session
//! cookie set by a successful sign-in is sent on every later call. A cookie
//! from an earlier browser session can be seeded through the config.
//!
//! # Example
//!
//! ```ignore
//! use dashboard_prefs::adapters::auth::{HttpSessionBoundary, HttpSessionConfig};
//!
//! let boundary = HttpSessionBoundary::new(HttpSessionConfig::new("http://localhost:5000"))?;
//! let user = boundary.current_user().await?;
//! ```

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::cookie::Jar;
use reqwest::{StatusCode, Url};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use crate::domain::foundation::{AuthError, SessionUser};
use crate::ports::{Registration, SessionBoundary};

/// Configuration for the HTTP session boundary.
#[derive(Debug, Clone)]
pub struct HttpSessionConfig {
    /// Base URL of the authentication service (e.g., "http://localhost:5000")
    pub base_url: String,

    /// Per-request timeout. Defaults to 10 seconds.
    pub timeout: Duration,

    /// Optional `name=value` session cookie to send from the first request.
    pub session_cookie: Option<SecretString>,
}

impl HttpSessionConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Duration::from_secs(10),
            session_cookie: None,
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_session_cookie(mut self, cookie: SecretString) -> Self {
        self.session_cookie = Some(cookie);
        self
    }
}

/// Body shape shared by the service's sign-in/sign-up responses and errors.
#[derive(Debug, Default, Deserialize)]
struct MessageBody {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[derive(Debug, Serialize)]
struct GoogleRequest<'a> {
    credential: &'a str,
}

/// Session boundary backed by the authentication service's REST API.
pub struct HttpSessionBoundary {
    base_url: Url,
    http_client: reqwest::Client,
}

impl HttpSessionBoundary {
    /// Build the client.
    ///
    /// # Errors
    ///
    /// `AuthError::ServiceUnavailable` if the base URL does not parse or the
    /// HTTP client cannot be constructed.
    pub fn new(config: HttpSessionConfig) -> Result<Self, AuthError> {
        let mut base_url = Url::parse(&config.base_url).map_err(|e| {
            AuthError::service_unavailable(format!("Invalid auth base URL: {}", e))
        })?;
        // Endpoints join onto the base as a directory, keeping any path prefix
        if !base_url.path().ends_with('/') {
            let directory = format!("{}/", base_url.path());
            base_url.set_path(&directory);
        }

        let jar = Arc::new(Jar::default());
        if let Some(cookie) = &config.session_cookie {
            jar.add_cookie_str(cookie.expose_secret(), &base_url);
        }

        let http_client = reqwest::Client::builder()
            .timeout(config.timeout)
            .cookie_provider(jar)
            .build()
            .map_err(|e| {
                AuthError::service_unavailable(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            base_url,
            http_client,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, AuthError> {
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| AuthError::service_unavailable(format!("Invalid endpoint {}: {}", path, e)))
    }

    /// POST a JSON body and return the service's `message`.
    async fn post_for_message<B: Serialize + Sync>(
        &self,
        path: &str,
        body: &B,
        success_default: &str,
        failure_default: &str,
    ) -> Result<String, AuthError> {
        let url = self.endpoint(path)?;
        tracing::debug!("POST {}", url);

        let response = self
            .http_client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!("Auth request to {} failed: {}", path, e);
                AuthError::service_unavailable(e.to_string())
            })?;

        let status = response.status();
        let message = response
            .json::<MessageBody>()
            .await
            .unwrap_or_default()
            .message
            .filter(|m| !m.trim().is_empty());

        if status.is_success() {
            Ok(message.unwrap_or_else(|| success_default.to_string()))
        } else if status.is_server_error() && message.is_none() {
            tracing::warn!("{} returned {}", path, status);
            Err(AuthError::service_unavailable(format!("{} returned {}", path, status)))
        } else {
            tracing::debug!("{} rejected with {}", path, status);
            Err(AuthError::Rejected(
                message.unwrap_or_else(|| failure_default.to_string()),
            ))
        }
    }
}

#[async_trait]
impl SessionBoundary for HttpSessionBoundary {
    async fn current_user(&self) -> Result<SessionUser, AuthError> {
        let url = self.endpoint("/api/auth/me")?;

        let response = self.http_client.get(url).send().await.map_err(|e| {
            tracing::warn!("Failed to reach auth service: {}", e);
            AuthError::service_unavailable(e.to_string())
        })?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                tracing::debug!("No authenticated session");
                return Err(AuthError::InvalidToken);
            }
            status => {
                tracing::warn!("/api/auth/me returned {}", status);
                return Err(AuthError::service_unavailable(format!(
                    "/api/auth/me returned {}",
                    status
                )));
            }
        }

        response.json::<SessionUser>().await.map_err(|e| {
            tracing::warn!("Unreadable user profile: {}", e);
            AuthError::InvalidToken
        })
    }

    async fn logout(&self) -> Result<(), AuthError> {
        let url = self.endpoint("/api/auth/logout")?;

        let response = self
            .http_client
            .post(url)
            .send()
            .await
            .map_err(|e| AuthError::service_unavailable(e.to_string()))?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(AuthError::service_unavailable(format!(
                "/api/auth/logout returned {}",
                response.status()
            )))
        }
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        self.post_for_message(
            "/api/auth/login",
            &LoginRequest { email, password },
            "Login successful!",
            "An error occurred",
        )
        .await
    }

    async fn register(&self, registration: &Registration) -> Result<String, AuthError> {
        self.post_for_message(
            "/api/auth/register",
            registration,
            "Registration successful!",
            "An error occurred",
        )
        .await
    }

    async fn sign_in_with_google(&self, credential: &str) -> Result<String, AuthError> {
        self.post_for_message(
            "/api/auth/google",
            &GoogleRequest { credential },
            "Google login successful!",
            "Google login failed",
        )
        .await
    }
}
