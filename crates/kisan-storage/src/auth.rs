//! Account registry and the signed-in user session.
//!
//! Accounts live in the users collection with their password in plain text.
//! The session key holds the signed-in [`User`] without the password, and is
//! the only place the rest of the application reads the current user from.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use kisan_core::config::AuthConfig;
use kisan_core::error::KisanError;
use kisan_core::types::User;

use crate::collection::{Collection, Document, Query};
use crate::database::{KisanDb, CURRENT_USER_KEY};
use crate::kv::KeyValueStore;

/// Errors from account operations.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("User already exists")]
    UserExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Missing required field: {0}")]
    MissingField(&'static str),
    #[error("Storage error: {0}")]
    Storage(#[from] KisanError),
}

impl From<serde_json::Error> for AuthError {
    fn from(err: serde_json::Error) -> Self {
        AuthError::Storage(err.into())
    }
}

/// A persisted account record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub email: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    pub password: String,
}

impl Account {
    /// The account without its password.
    pub fn to_user(&self) -> User {
        User {
            id: self.id.clone(),
            email: self.email.clone(),
            name: self.name.clone(),
            location: self.location.clone(),
        }
    }
}

impl Document for Account {
    fn id(&self) -> Option<&str> {
        self.id.as_deref().filter(|id| !id.is_empty())
    }

    fn set_id(&mut self, id: String) {
        self.id = Some(id);
    }
}

/// Signup, login and session management over the users collection.
pub struct AuthService<S: KeyValueStore + ?Sized> {
    users: Collection<Account, S>,
    store: Arc<S>,
    login_delay: Duration,
    reset_delay: Duration,
}

impl<S: KeyValueStore + ?Sized> AuthService<S> {
    pub fn new(db: &KisanDb<S>, config: &AuthConfig) -> Self {
        Self::with_delays(
            db,
            Duration::from_millis(config.login_delay_ms),
            Duration::from_millis(config.reset_delay_ms),
        )
    }

    /// Build a service with explicit simulated latencies. Tests pass zero.
    pub fn with_delays(db: &KisanDb<S>, login_delay: Duration, reset_delay: Duration) -> Self {
        Self {
            users: db.users.clone(),
            store: Arc::clone(db.store()),
            login_delay,
            reset_delay,
        }
    }

    /// Register a new account and sign it in.
    pub async fn signup(
        &self,
        name: &str,
        email: &str,
        password: &str,
        location: &str,
    ) -> Result<User, AuthError> {
        pause(self.login_delay).await;

        if name.trim().is_empty() {
            return Err(AuthError::MissingField("name"));
        }
        if email.trim().is_empty() {
            return Err(AuthError::MissingField("email"));
        }
        if password.is_empty() {
            return Err(AuthError::MissingField("password"));
        }

        if self.find_account(email)?.is_some() {
            debug!(email, "Signup rejected: email already registered");
            return Err(AuthError::UserExists);
        }

        let account = self.users.insert_one(Account {
            id: None,
            email: email.to_string(),
            name: name.to_string(),
            location: Some(location.to_string()).filter(|l| !l.is_empty()),
            password: password.to_string(),
        })?;

        let user = account.to_user();
        self.write_session(&user)?;
        info!(email, "Account created");
        Ok(user)
    }

    /// Sign in with an exact email and password match.
    pub async fn login(&self, email: &str, password: &str) -> Result<User, AuthError> {
        pause(self.login_delay).await;

        match self.find_account(email)? {
            Some(account) if account.password == password => {
                let user = account.to_user();
                self.write_session(&user)?;
                info!(email, "Signed in");
                Ok(user)
            }
            _ => {
                debug!(email, "Login rejected");
                Err(AuthError::InvalidCredentials)
            }
        }
    }

    /// Clear the signed-in user.
    pub fn logout(&self) -> Result<(), AuthError> {
        self.store.remove(CURRENT_USER_KEY)?;
        Ok(())
    }

    /// The signed-in user, if any. An unreadable session reads as signed out.
    pub fn current_user(&self) -> Result<Option<User>, AuthError> {
        let Some(raw) = self.store.get(CURRENT_USER_KEY)? else {
            return Ok(None);
        };

        match serde_json::from_str(&raw) {
            Ok(user) => Ok(Some(user)),
            Err(e) => {
                warn!(error = %e, "Stored session is unreadable; treating as signed out");
                Ok(None)
            }
        }
    }

    /// Check that a reset can be sent for `email`. No message is sent.
    pub async fn reset_password(&self, email: &str) -> Result<(), AuthError> {
        pause(self.reset_delay).await;

        if self.find_account(email)?.is_none() {
            return Err(AuthError::UserNotFound);
        }
        Ok(())
    }

    fn find_account(&self, email: &str) -> Result<Option<Account>, AuthError> {
        Ok(self.users.find_one(&Query::new().eq("email", email))?)
    }

    fn write_session(&self, user: &User) -> Result<(), AuthError> {
        let raw = serde_json::to_string(user)?;
        self.store.set(CURRENT_USER_KEY, &raw)?;
        Ok(())
    }
}

async fn pause(delay: Duration) {
    if !delay.is_zero() {
        tokio::time::sleep(delay).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kv::MemoryStore;

    fn service() -> (Arc<MemoryStore>, AuthService<MemoryStore>) {
        let store = Arc::new(MemoryStore::new());
        let db = KisanDb::new(Arc::clone(&store));
        let auth = AuthService::with_delays(&db, Duration::ZERO, Duration::ZERO);
        (store, auth)
    }

    #[tokio::test]
    async fn test_signup_then_login_round_trip() {
        let (_, auth) = service();
        let created = auth
            .signup("Asha", "a@x.com", "secret", "Nashik")
            .await
            .unwrap();
        assert_eq!(created.email, "a@x.com");
        assert_eq!(created.location.as_deref(), Some("Nashik"));
        assert!(created.id.is_some());

        auth.logout().unwrap();
        let user = auth.login("a@x.com", "secret").await.unwrap();
        assert_eq!(user, created);
        assert_eq!(auth.current_user().unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_signup_signs_in() {
        let (_, auth) = service();
        assert_eq!(auth.current_user().unwrap(), None);
        let user = auth.signup("Asha", "a@x.com", "pw", "").await.unwrap();
        assert_eq!(auth.current_user().unwrap(), Some(user));
    }

    #[tokio::test]
    async fn test_duplicate_signup_rejected() {
        let (_, auth) = service();
        auth.signup("Asha", "a@x.com", "pw", "Pune").await.unwrap();
        let err = auth
            .signup("Other", "a@x.com", "pw2", "Pune")
            .await
            .unwrap_err();
        assert!(matches!(err, AuthError::UserExists));
        assert_eq!(err.to_string(), "User already exists");
    }

    #[tokio::test]
    async fn test_wrong_password_rejected() {
        let (_, auth) = service();
        auth.signup("Asha", "a@x.com", "pw", "Pune").await.unwrap();
        auth.logout().unwrap();

        let err = auth.login("a@x.com", "PW").await.unwrap_err();
        assert!(matches!(err, AuthError::InvalidCredentials));
        assert_eq!(auth.current_user().unwrap(), None);
    }

    #[tokio::test]
    async fn test_unknown_email_rejected() {
        let (_, auth) = service();
        let err = auth.login("nobody@x.com", "pw").await.unwrap_err();
        assert_eq!(err.to_string(), "Invalid credentials");
    }

    #[tokio::test]
    async fn test_missing_fields_rejected() {
        let (_, auth) = service();
        let err = auth.signup("  ", "a@x.com", "pw", "").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingField("name")));
        let err = auth.signup("Asha", "", "pw", "").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingField("email")));
        let err = auth.signup("Asha", "a@x.com", "", "").await.unwrap_err();
        assert!(matches!(err, AuthError::MissingField("password")));
    }

    #[tokio::test]
    async fn test_logout_clears_current_user() {
        let (store, auth) = service();
        auth.signup("Asha", "a@x.com", "pw", "Pune").await.unwrap();
        auth.logout().unwrap();
        assert_eq!(auth.current_user().unwrap(), None);
        assert_eq!(store.get(CURRENT_USER_KEY).unwrap(), None);
    }

    #[tokio::test]
    async fn test_session_never_holds_password() {
        let (store, auth) = service();
        auth.signup("Asha", "a@x.com", "hunter2", "Pune").await.unwrap();
        let raw = store.get(CURRENT_USER_KEY).unwrap().unwrap();
        assert!(!raw.contains("hunter2"));
        assert!(!raw.contains("password"));
    }

    #[test]
    fn test_corrupt_session_reads_as_none() {
        let (store, auth) = service();
        store.set(CURRENT_USER_KEY, "{\"email\":").unwrap();
        assert_eq!(auth.current_user().unwrap(), None);
    }

    #[tokio::test]
    async fn test_reset_password() {
        let (_, auth) = service();
        auth.signup("Asha", "a@x.com", "pw", "Pune").await.unwrap();
        auth.reset_password("a@x.com").await.unwrap();

        let err = auth.reset_password("b@x.com").await.unwrap_err();
        assert!(matches!(err, AuthError::UserNotFound));
        assert_eq!(err.to_string(), "User not found");
    }

    #[tokio::test]
    async fn test_login_waits_for_configured_delay() {
        let store = Arc::new(MemoryStore::new());
        let db = KisanDb::new(store);
        let auth = AuthService::with_delays(&db, Duration::from_millis(20), Duration::ZERO);

        let started = std::time::Instant::now();
        let _ = auth.login("a@x.com", "pw").await;
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[test]
    fn test_account_to_user_drops_password() {
        let account = Account {
            id: Some("1".to_string()),
            email: "a@x.com".to_string(),
            name: "Asha".to_string(),
            location: None,
            password: "pw".to_string(),
        };
        let value = serde_json::to_value(account.to_user()).unwrap();
        assert!(value.get("password").is_none());
        assert_eq!(value["id"], "1");
    }

    #[test]
    fn test_storage_error_converts() {
        let err: AuthError = KisanError::Storage("disk full".to_string()).into();
        assert_eq!(err.to_string(), "Storage error: Storage error: disk full");
    }
}
