use chrono::{DateTime, Utc};
use secrecy::Secret;
use uuid::Uuid;

use crate::domain::{email::Email, password::Password, username::Username};

/// Persisted account record. The password hash never leaves the store, so
/// there is no credential field here.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub username: Username,
    pub email: Email,
    pub is_authorized: bool,
    pub is_admin: bool,
    pub refresh_token: Option<Secret<String>>,
    pub refresh_token_expiry: Option<DateTime<Utc>>,
    pub reset_password_token: Option<String>,
    pub reset_password_expiry: Option<DateTime<Utc>>,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// A refresh token is usable while its expiry lies in the future. The
    /// token value itself was already matched by the store lookup.
    pub fn refresh_token_valid(&self, now: DateTime<Utc>) -> bool {
        match (&self.refresh_token, self.refresh_token_expiry) {
            (Some(_), Some(expiry)) => now < expiry,
            _ => false,
        }
    }
}

/// Registration input handed to the user store. The store hashes the
/// password exactly once before persisting it.
pub struct NewUser {
    pub username: Username,
    pub email: Email,
    pub password: Password,
    pub is_admin: bool,
}

/// Identity proven by a validated access token.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub email: Email,
    pub username: Username,
}
