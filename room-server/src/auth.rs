//! Staff login
//!
//! Accounts are configured in process with argon2 password hashes; the
//! signed-in user is kept under the `current-user` store key so a restarted
//! terminal stays signed in.

use crate::sessions::{ManagerError, ManagerResult};
use crate::store::{KvStore, get_record, keys, put_record};
use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use shared::models::{User, UserRole};
use std::sync::Arc;

/// Hash password using argon2
pub fn hash_password(password: &str) -> ManagerResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ManagerError::PasswordHash(e.to_string()))?;
    Ok(password_hash.to_string())
}

/// Verify password using argon2
pub fn verify_password(password: &str, hash: &str) -> ManagerResult<bool> {
    let parsed_hash =
        PasswordHash::new(hash).map_err(|e| ManagerError::PasswordHash(e.to_string()))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .is_ok())
}

#[derive(Debug, Clone)]
struct Account {
    user: User,
    hash_pass: String,
}

pub struct AuthService {
    store: Arc<dyn KvStore>,
    accounts: Vec<Account>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AuthService")
            .field("accounts", &self.accounts.len())
            .finish()
    }
}

impl AuthService {
    /// Build from `(user, plain password)` pairs
    pub fn new(store: Arc<dyn KvStore>, accounts: Vec<(User, String)>) -> ManagerResult<Self> {
        let accounts = accounts
            .into_iter()
            .map(|(user, password)| {
                Ok(Account {
                    user,
                    hash_pass: hash_password(&password)?,
                })
            })
            .collect::<ManagerResult<Vec<_>>>()?;
        Ok(Self { store, accounts })
    }

    /// `admin/admin123` and `staff/staff123`
    pub fn with_default_accounts(store: Arc<dyn KvStore>) -> ManagerResult<Self> {
        Self::new(store, default_accounts())
    }

    /// Check credentials; on success the user becomes the current user
    pub fn login(&self, username: &str, password: &str) -> ManagerResult<Option<User>> {
        let Some(account) = self.accounts.iter().find(|a| a.user.username == username) else {
            tracing::info!(username = %username, "Login failed: unknown user");
            return Ok(None);
        };

        if !verify_password(password, &account.hash_pass)? {
            tracing::info!(username = %username, "Login failed: wrong password");
            return Ok(None);
        }

        put_record(self.store.as_ref(), keys::CURRENT_USER, &account.user)?;
        tracing::info!(
            user_id = %account.user.id,
            username = %account.user.username,
            role = ?account.user.role,
            "User logged in successfully"
        );
        Ok(Some(account.user.clone()))
    }

    pub fn logout(&self) -> ManagerResult<()> {
        self.store.remove(keys::CURRENT_USER)?;
        tracing::info!("User logged out");
        Ok(())
    }

    pub fn current_user(&self) -> ManagerResult<Option<User>> {
        Ok(get_record(self.store.as_ref(), keys::CURRENT_USER)?)
    }
}

fn default_accounts() -> Vec<(User, String)> {
    vec![
        (
            User {
                id: "1".to_string(),
                username: "admin".to_string(),
                role: UserRole::Admin,
                name: "Administrator".to_string(),
            },
            "admin123".to_string(),
        ),
        (
            User {
                id: "2".to_string(),
                username: "staff".to_string(),
                role: UserRole::Staff,
                name: "Staff Member".to_string(),
            },
            "staff123".to_string(),
        ),
    ]
}
