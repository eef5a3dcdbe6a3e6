//! Authentication types for the domain layer.
//!
//! These types describe the user returned by the authentication service.
//! They have **no transport dependencies** - any `SessionBoundary` adapter
//! (HTTP, mock) populates them.
//!
//! # Design Decisions
//!
//! - The service reports the identifier as either `id` or `_id`, as a string
//!   or a number. [`SessionUser::user_id`] is the only place that resolves it.
//! - `AuthError` is domain-centric, not transport-specific.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use super::UserId;

/// Identifier as reported on the wire: text or number.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawUserId {
    Text(String),
    Number(serde_json::Number),
}

impl RawUserId {
    fn to_user_id(&self) -> Option<UserId> {
        match self {
            RawUserId::Text(text) => UserId::new(text.as_str()).ok(),
            RawUserId::Number(number) => UserId::new(number.to_string()).ok(),
        }
    }
}

/// Role granted by the authentication service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
}

impl UserRole {
    /// Parses a role code; anything other than `admin` is a plain user.
    pub fn from_code(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("admin") {
            UserRole::Admin
        } else {
            UserRole::User
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, UserRole::Admin)
    }

    pub fn code(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
        }
    }
}

impl<'de> Deserialize<'de> for UserRole {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let code = Option::<String>::deserialize(deserializer)?;
        Ok(code.as_deref().map(UserRole::from_code).unwrap_or_default())
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// User profile returned by `GET /api/auth/me`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RawUserId>,

    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub legacy_id: Option<RawUserId>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub email: String,

    #[serde(default)]
    pub role: UserRole,
}

impl SessionUser {
    /// Creates a user with a textual `id`.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        role: UserRole,
    ) -> Self {
        Self {
            id: Some(RawUserId::Text(id.into())),
            legacy_id: None,
            name: name.into(),
            email: email.into(),
            role,
        }
    }

    /// Canonical identity accessor.
    ///
    /// Prefers `id`, falls back to `_id`. Returns `None` when neither yields
    /// a non-empty identifier; callers must then treat the session as
    /// unauthenticated.
    pub fn user_id(&self) -> Option<UserId> {
        self.id
            .as_ref()
            .and_then(RawUserId::to_user_id)
            .or_else(|| self.legacy_id.as_ref().and_then(RawUserId::to_user_id))
    }

    pub fn is_admin(&self) -> bool {
        self.role.is_admin()
    }
}

/// Authentication errors reported by the session boundary.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    /// No valid session: missing, expired, or rejected credentials.
    #[error("Not authenticated")]
    InvalidToken,

    /// The service answered but the user carries no usable identifier.
    #[error("Authenticated user has no identifier")]
    MissingIdentity,

    /// The service refused a login, registration or sign-in request.
    #[error("{0}")]
    Rejected(String),

    /// The authentication service is unreachable or misbehaving.
    #[error("Auth service unavailable: {0}")]
    ServiceUnavailable(String),
}

impl AuthError {
    /// Creates a service unavailable error with a message.
    pub fn service_unavailable(message: impl Into<String>) -> Self {
        Self::ServiceUnavailable(message.into())
    }

    /// Returns true if this error indicates the user should sign in again.
    pub fn requires_reauthentication(&self) -> bool {
        matches!(self, AuthError::InvalidToken | AuthError::MissingIdentity)
    }
}
