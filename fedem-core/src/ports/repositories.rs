use async_trait::async_trait;
use chrono::{DateTime, Utc};
use secrecy::Secret;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{
    email::Email,
    password::Password,
    tracking::{NewTracking, Tracking, TrackingStage},
    user::{NewUser, User},
};

// UserStore port trait and errors
#[derive(Debug, Error)]
pub enum UserStoreError {
    #[error("User already exists")]
    UserAlreadyExists,
    #[error("User not found")]
    UserNotFound,
    #[error("Incorrect password")]
    IncorrectPassword,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for UserStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::UserAlreadyExists, Self::UserAlreadyExists) => true,
            (Self::UserNotFound, Self::UserNotFound) => true,
            (Self::IncorrectPassword, Self::IncorrectPassword) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Persist a new account. The implementation hashes the password before
    /// it is written anywhere.
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError>;

    /// Verify credentials against the stored hash. Fails with
    /// `UserNotFound` or `IncorrectPassword`; callers decide whether those
    /// two are distinguishable in their responses.
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError>;

    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError>;
    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError>;
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError>;

    /// Overwrite the single refresh-token slot for this account.
    async fn set_refresh_token(
        &self,
        id: Uuid,
        token: Secret<String>,
        expiry: DateTime<Utc>,
    ) -> Result<(), UserStoreError>;

    /// Clear the refresh-token slot. Clearing an already-empty slot is not
    /// an error.
    async fn clear_refresh_token(&self, id: Uuid) -> Result<(), UserStoreError>;

    async fn find_by_refresh_token(&self, token: &str) -> Result<User, UserStoreError>;

    async fn set_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), UserStoreError>;

    async fn set_authorization(
        &self,
        email: &Email,
        is_authorized: bool,
    ) -> Result<User, UserStoreError>;

    async fn set_reset_token(
        &self,
        id: Uuid,
        token: String,
        expiry: DateTime<Utc>,
    ) -> Result<(), UserStoreError>;

    /// Look up the account holding this reset token with an expiry still in
    /// the future. Expired and unknown tokens are indistinguishable.
    async fn find_by_valid_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError>;

    /// Re-hash and store the new password, clearing any reset-token state
    /// in the same write.
    async fn set_new_password(&self, id: Uuid, password: Password) -> Result<(), UserStoreError>;

    async fn delete_user(&self, id: Uuid) -> Result<(), UserStoreError>;
}

// TrackingStore port trait and errors
#[derive(Debug, Error)]
pub enum TrackingStoreError {
    #[error("Tracking id already exists")]
    TrackingAlreadyExists,
    #[error("Tracking not found")]
    TrackingNotFound,
    #[error("Unexpected error {0}")]
    UnexpectedError(String),
}

impl PartialEq for TrackingStoreError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::TrackingAlreadyExists, Self::TrackingAlreadyExists) => true,
            (Self::TrackingNotFound, Self::TrackingNotFound) => true,
            (Self::UnexpectedError(_), Self::UnexpectedError(_)) => true,
            _ => false,
        }
    }
}

#[async_trait]
pub trait TrackingStore: Send + Sync {
    async fn add_tracking(&self, new_tracking: NewTracking) -> Result<Tracking, TrackingStoreError>;

    /// Append a stage event and move `current_stage` to the event's stage
    /// number in one atomic record write. Returns the updated record.
    async fn append_stage(
        &self,
        tracking_id: &str,
        event: TrackingStage,
    ) -> Result<Tracking, TrackingStoreError>;

    async fn get_tracking(&self, tracking_id: &str) -> Result<Tracking, TrackingStoreError>;
}
