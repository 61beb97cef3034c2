//! In-memory collaborators shared by the use-case unit tests.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use fedem_core::{
    Email, EmailClient, NewTracking, NewUser, Password, Tracking, TrackingStage, TrackingStore,
    TrackingStoreError, User, UserStore, UserStoreError, Username,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use uuid::Uuid;

pub fn email(raw: &str) -> Email {
    Email::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn password(raw: &str) -> Password {
    Password::try_from(Secret::from(raw.to_string())).unwrap()
}

pub fn username(raw: &str) -> Username {
    Username::parse(raw.to_string()).unwrap()
}

pub fn new_user(name: &str, address: &str, pw: &str) -> NewUser {
    NewUser {
        username: username(name),
        email: email(address),
        password: password(pw),
        is_admin: false,
    }
}

#[derive(Default)]
struct InnerUsers {
    users: Vec<User>,
    // Plaintext credentials; real hashing lives in the adapters.
    passwords: HashMap<Uuid, String>,
}

#[derive(Clone, Default)]
pub struct InMemoryUserStore {
    inner: Arc<RwLock<InnerUsers>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn stored_refresh_token(&self, id: Uuid) -> Option<String> {
        let inner = self.inner.read().await;
        inner
            .users
            .iter()
            .find(|u| u.id == id)
            .and_then(|u| u.refresh_token.as_ref())
            .map(|t| t.expose_secret().clone())
    }

    pub async fn stored_password(&self, id: Uuid) -> Option<String> {
        self.inner.read().await.passwords.get(&id).cloned()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut inner = self.inner.write().await;
        if inner.users.iter().any(|u| u.email == new_user.email) {
            return Err(UserStoreError::UserAlreadyExists);
        }
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            is_authorized: false,
            is_admin: new_user.is_admin,
            refresh_token: None,
            refresh_token_expiry: None,
            reset_password_token: None,
            reset_password_expiry: None,
            last_login: None,
            created_at: Utc::now(),
        };
        inner
            .passwords
            .insert(user.id, new_user.password.as_ref().expose_secret().clone());
        inner.users.push(user.clone());
        Ok(user)
    }

    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let inner = self.inner.read().await;
        let user = inner
            .users
            .iter()
            .find(|u| &u.email == email)
            .ok_or(UserStoreError::UserNotFound)?;
        let stored = inner
            .passwords
            .get(&user.id)
            .ok_or(UserStoreError::UserNotFound)?;
        if stored != password.as_ref().expose_secret() {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(user.clone())
    }

    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| u.id == id)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| &u.email == email)
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        Ok(self.inner.read().await.users.clone())
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        token: Secret<String>,
        expiry: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.refresh_token = Some(token);
        user.refresh_token_expiry = Some(expiry);
        Ok(())
    }

    async fn clear_refresh_token(&self, id: Uuid) -> Result<(), UserStoreError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.refresh_token = None;
        user.refresh_token_expiry = None;
        Ok(())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<User, UserStoreError> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| {
                u.refresh_token
                    .as_ref()
                    .is_some_and(|t| t.expose_secret() == token)
            })
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn set_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), UserStoreError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.last_login = Some(at);
        Ok(())
    }

    async fn set_authorization(
        &self,
        email: &Email,
        is_authorized: bool,
    ) -> Result<User, UserStoreError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| &u.email == email)
            .ok_or(UserStoreError::UserNotFound)?;
        user.is_authorized = is_authorized;
        Ok(user.clone())
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token: String,
        expiry: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.reset_password_token = Some(token);
        user.reset_password_expiry = Some(expiry);
        Ok(())
    }

    async fn find_by_valid_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        self.inner
            .read()
            .await
            .users
            .iter()
            .find(|u| {
                u.reset_password_token.as_deref() == Some(token)
                    && u.reset_password_expiry.is_some_and(|expiry| expiry > now)
            })
            .cloned()
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn set_new_password(&self, id: Uuid, password: Password) -> Result<(), UserStoreError> {
        let mut inner = self.inner.write().await;
        let user = inner
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserStoreError::UserNotFound)?;
        user.reset_password_token = None;
        user.reset_password_expiry = None;
        inner
            .passwords
            .insert(id, password.as_ref().expose_secret().clone());
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), UserStoreError> {
        let mut inner = self.inner.write().await;
        let before = inner.users.len();
        inner.users.retain(|u| u.id != id);
        if inner.users.len() == before {
            return Err(UserStoreError::UserNotFound);
        }
        inner.passwords.remove(&id);
        Ok(())
    }
}

#[derive(Clone, Default)]
pub struct InMemoryTrackingStore {
    trackings: Arc<RwLock<Vec<Tracking>>>,
}

impl InMemoryTrackingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn insert_raw(&self, tracking: Tracking) {
        self.trackings.write().await.push(tracking);
    }
}

#[async_trait]
impl TrackingStore for InMemoryTrackingStore {
    async fn add_tracking(
        &self,
        new_tracking: NewTracking,
    ) -> Result<Tracking, TrackingStoreError> {
        let mut trackings = self.trackings.write().await;
        if trackings
            .iter()
            .any(|t| t.tracking_id == new_tracking.tracking_id)
        {
            return Err(TrackingStoreError::TrackingAlreadyExists);
        }
        let tracking = Tracking {
            id: Uuid::new_v4(),
            tracking_id: new_tracking.tracking_id,
            user_id: new_tracking.user_id,
            email: new_tracking.email,
            details: new_tracking.details,
            current_stage: new_tracking.initial_stage.stage,
            stages: vec![new_tracking.initial_stage],
            created_at: Utc::now(),
        };
        trackings.push(tracking.clone());
        Ok(tracking)
    }

    async fn append_stage(
        &self,
        tracking_id: &str,
        event: TrackingStage,
    ) -> Result<Tracking, TrackingStoreError> {
        let mut trackings = self.trackings.write().await;
        let tracking = trackings
            .iter_mut()
            .find(|t| t.tracking_id == tracking_id)
            .ok_or(TrackingStoreError::TrackingNotFound)?;
        tracking.current_stage = event.stage;
        tracking.stages.push(event);
        Ok(tracking.clone())
    }

    async fn get_tracking(&self, tracking_id: &str) -> Result<Tracking, TrackingStoreError> {
        self.trackings
            .read()
            .await
            .iter()
            .find(|t| t.tracking_id == tracking_id)
            .cloned()
            .ok_or(TrackingStoreError::TrackingNotFound)
    }
}

#[derive(Debug, Clone)]
pub struct SentEmail {
    pub recipient: String,
    pub subject: String,
    pub content: String,
}

/// Email client that records every send and always succeeds.
#[derive(Clone, Default)]
pub struct RecordingEmailClient {
    sent: Arc<RwLock<Vec<SentEmail>>>,
}

impl RecordingEmailClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn sent(&self) -> Vec<SentEmail> {
        self.sent.read().await.clone()
    }
}

#[async_trait]
impl EmailClient for RecordingEmailClient {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String> {
        self.sent.write().await.push(SentEmail {
            recipient: recipient.as_ref().expose_secret().clone(),
            subject: subject.to_string(),
            content: content.to_string(),
        });
        Ok(())
    }
}

/// Email client that always fails, for exercising best-effort semantics.
#[derive(Clone, Default)]
pub struct FailingEmailClient;

#[async_trait]
impl EmailClient for FailingEmailClient {
    async fn send_email(&self, _: &Email, _: &str, _: &str) -> Result<(), String> {
        Err("smtp relay unavailable".to_string())
    }
}
