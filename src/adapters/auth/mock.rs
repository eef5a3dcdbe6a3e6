//! Mock session boundary for testing.
//!
//! Implements the `SessionBoundary` port without a running authentication
//! service. Accounts, the signed-in user and forced errors are configured
//! with builder methods.
//!
//! # Example
//!
//! ```ignore
//! use dashboard_prefs::adapters::auth::MockSessionBoundary;
//! use dashboard_prefs::domain::foundation::{SessionUser, UserRole};
//!
//! let boundary = MockSessionBoundary::new()
//!     .with_user(SessionUser::new("u1", "Ada", "ada@example.com", UserRole::User));
//!
//! let user = boundary.current_user().await?;
//! assert_eq!(user.user_id().unwrap().as_str(), "u1");
//! ```

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::domain::foundation::{AuthError, SessionUser};
use crate::ports::{Registration, SessionBoundary};

struct Account {
    password: String,
    user: SessionUser,
}

/// Mock session boundary.
///
/// `current_user` returns the signed-in user, or `InvalidToken` when nobody
/// is signed in. `logout` signs the user out and is counted.
#[derive(Default)]
pub struct MockSessionBoundary {
    /// The signed-in user, if any
    signed_in: RwLock<Option<SessionUser>>,
    /// Known accounts by email
    accounts: RwLock<HashMap<String, Account>>,
    /// Google credentials accepted by `sign_in_with_google`
    google_credentials: RwLock<HashMap<String, SessionUser>>,
    /// Registrations received, in order
    registrations: RwLock<Vec<Registration>>,
    /// Optional error returned by every call (for error testing)
    force_error: RwLock<Option<AuthError>>,
    logout_calls: AtomicUsize,
}

impl MockSessionBoundary {
    /// Creates a boundary with nobody signed in.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `user` signed in.
    pub fn with_user(mut self, user: SessionUser) -> Self {
        *self.signed_in.get_mut() = Some(user);
        self
    }

    /// Adds an account that `login` accepts.
    pub fn with_account(mut self, password: impl Into<String>, user: SessionUser) -> Self {
        self.accounts.get_mut().insert(
            user.email.clone(),
            Account {
                password: password.into(),
                user,
            },
        );
        self
    }

    /// Adds a Google credential that signs in as `user`.
    pub fn with_google_credential(
        mut self,
        credential: impl Into<String>,
        user: SessionUser,
    ) -> Self {
        self.google_credentials
            .get_mut()
            .insert(credential.into(), user);
        self
    }

    /// Forces every call to return the specified error.
    pub fn with_error(mut self, error: AuthError) -> Self {
        *self.force_error.get_mut() = Some(error);
        self
    }

    /// Clears the forced error and returns to normal operation.
    pub async fn clear_error(&self) {
        *self.force_error.write().await = None;
    }

    /// Signs `user` in at runtime.
    pub async fn sign_in(&self, user: SessionUser) {
        *self.signed_in.write().await = Some(user);
    }

    /// Returns the number of `logout` calls received.
    pub fn logout_count(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    /// Returns the registrations received so far.
    pub async fn registrations(&self) -> Vec<Registration> {
        self.registrations.read().await.clone()
    }

    async fn check_forced_error(&self) -> Result<(), AuthError> {
        match self.force_error.read().await.clone() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl SessionBoundary for MockSessionBoundary {
    async fn current_user(&self) -> Result<SessionUser, AuthError> {
        self.check_forced_error().await?;

        self.signed_in
            .read()
            .await
            .clone()
            .ok_or(AuthError::InvalidToken)
    }

    async fn logout(&self) -> Result<(), AuthError> {
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        self.check_forced_error().await?;

        *self.signed_in.write().await = None;
        Ok(())
    }

    async fn login(&self, email: &str, password: &str) -> Result<String, AuthError> {
        self.check_forced_error().await?;

        let user = {
            let accounts = self.accounts.read().await;
            match accounts.get(email) {
                Some(account) if account.password == password => account.user.clone(),
                _ => return Err(AuthError::Rejected("Invalid credentials".to_string())),
            }
        };

        self.sign_in(user).await;
        Ok("Login successful!".to_string())
    }

    async fn register(&self, registration: &Registration) -> Result<String, AuthError> {
        self.check_forced_error().await?;

        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&registration.email) {
            return Err(AuthError::Rejected("User already exists".to_string()));
        }

        let user = SessionUser::new(
            format!("user-{}", accounts.len() + 1),
            registration.name.clone(),
            registration.email.clone(),
            registration.role,
        );
        accounts.insert(
            registration.email.clone(),
            Account {
                password: registration.password.clone(),
                user,
            },
        );
        self.registrations.write().await.push(registration.clone());

        Ok("Registration successful!".to_string())
    }

    async fn sign_in_with_google(&self, credential: &str) -> Result<String, AuthError> {
        self.check_forced_error().await?;

        let user = self
            .google_credentials
            .read()
            .await
            .get(credential)
            .cloned()
            .ok_or_else(|| AuthError::Rejected("Google login failed".to_string()))?;

        self.sign_in(user).await;
        Ok("Google login successful!".to_string())
    }
}
