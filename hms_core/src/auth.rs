//! Username/password gate in front of the main menu.
//!
//! Credentials are compared verbatim against the users store. There is no
//! lockout and no session beyond the running process.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::{Credential, RecordRepo, Result};

/// How passwords are written to the users store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordStorage {
    /// As typed. Readable by older tooling sharing the same file.
    #[default]
    Plain,
    /// Hex SHA-256 of `username:password`.
    Sha256,
}

impl PasswordStorage {
    #[must_use]
    pub fn encode(self, username: &str, password: &str) -> String {
        match self {
            Self::Plain => password.to_string(),
            Self::Sha256 => password_digest(username, password),
        }
    }
}

/// Hex SHA-256 of `username:password`.
#[must_use]
pub fn password_digest(username: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(username.as_bytes());
    hasher.update(b":");
    hasher.update(password.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignupOutcome {
    Created,
    UsernameTaken,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginOutcome {
    Granted,
    Denied,
    /// Nobody has signed up yet.
    NoUsers,
}

/// Signup and login over a users store.
///
/// # Design
/// - Usernames are unique and compared case-sensitively
/// - Passwords are encoded with the configured [`PasswordStorage`] before
///   they are written or compared, so plaintext never reaches the store in
///   `sha256` mode
///
/// # Example
/// ```rust
/// # use std::sync::Arc;
/// # use hms_core::{Credential, CredentialGate, LoginOutcome, MemoryRepo, SignupOutcome};
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() -> hms_core::Result<()> {
/// let gate = CredentialGate::new(Arc::new(MemoryRepo::<Credential>::new()));
/// assert_eq!(gate.signup("amna", "pw").await?, SignupOutcome::Created);
/// assert_eq!(gate.login("amna", "pw").await?, LoginOutcome::Granted);
/// # Ok(())
/// # }
/// ```
pub struct CredentialGate {
    users: Arc<dyn RecordRepo<Credential>>,
    storage: PasswordStorage,
}

impl CredentialGate {
    pub fn new(users: Arc<dyn RecordRepo<Credential>>) -> Self {
        Self {
            users,
            storage: PasswordStorage::default(),
        }
    }

    #[must_use]
    pub const fn with_password_storage(mut self, storage: PasswordStorage) -> Self {
        self.storage = storage;
        self
    }

    /// # Errors
    /// Returns an error if the users store cannot be read.
    pub async fn is_username_taken(&self, username: &str) -> Result<bool> {
        let users = self.users.load_all().await?;
        Ok(users.iter().any(|u| u.username == username))
    }

    /// Register `username` unless it is already taken. A taken name leaves
    /// the store unchanged.
    ///
    /// # Errors
    /// Returns an error if the users store cannot be read or appended to.
    pub async fn signup(&self, username: &str, password: &str) -> Result<SignupOutcome> {
        if self.is_username_taken(username).await? {
            warn!("Signup refused, username {username:?} already exists");
            return Ok(SignupOutcome::UsernameTaken);
        }

        self.users
            .append(&Credential {
                username: username.to_string(),
                password: self.storage.encode(username, password),
            })
            .await?;
        info!("Signed up user {username:?}");
        Ok(SignupOutcome::Created)
    }

    /// Check a username/password pair against every stored credential.
    ///
    /// # Errors
    /// Returns an error if the users store cannot be read.
    pub async fn login(&self, username: &str, password: &str) -> Result<LoginOutcome> {
        let users = self.users.load_all().await?;
        if users.is_empty() {
            return Ok(LoginOutcome::NoUsers);
        }

        let stored = self.storage.encode(username, password);
        if users
            .iter()
            .any(|u| u.username == username && u.password == stored)
        {
            info!("User {username:?} logged in");
            Ok(LoginOutcome::Granted)
        } else {
            warn!("Failed login for {username:?}");
            Ok(LoginOutcome::Denied)
        }
    }
}
