use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use fedem_core::{
    Email, NewUser, Password, User, UserStore, UserStoreError,
};
use secrecy::{ExposeSecret, Secret};
use tokio::sync::RwLock;
use uuid::Uuid;

struct StoredUser {
    user: User,
    // Plaintext credential; this store exists for tests and local runs,
    // real hashing lives in the Postgres store.
    password: Secret<String>,
}

/// In-memory [`UserStore`] backed by a shared map.
#[derive(Clone, Default)]
pub struct HashMapUserStore {
    users: Arc<RwLock<HashMap<Uuid, StoredUser>>>,
}

impl HashMapUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl UserStore for HashMapUserStore {
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        if users.values().any(|s| s.user.email == new_user.email) {
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
        users.insert(
            user.id,
            StoredUser {
                user: user.clone(),
                password: new_user.password.as_ref().clone(),
            },
        );
        Ok(user)
    }

    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let users = self.users.read().await;
        let stored = users
            .values()
            .find(|s| &s.user.email == email)
            .ok_or(UserStoreError::UserNotFound)?;
        if stored.password.expose_secret() != password.as_ref().expose_secret() {
            return Err(UserStoreError::IncorrectPassword);
        }
        Ok(stored.user.clone())
    }

    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .get(&id)
            .map(|s| s.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|s| &s.user.email == email)
            .map(|s| s.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let users = self.users.read().await;
        let mut all: Vec<User> = users.values().map(|s| s.user.clone()).collect();
        all.sort_by_key(|u| u.created_at);
        Ok(all)
    }

    async fn set_refresh_token(
        &self,
        id: Uuid,
        token: Secret<String>,
        expiry: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.user.refresh_token = Some(token);
        stored.user.refresh_token_expiry = Some(expiry);
        Ok(())
    }

    async fn clear_refresh_token(&self, id: Uuid) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.user.refresh_token = None;
        stored.user.refresh_token_expiry = None;
        Ok(())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|s| {
                s.user
                    .refresh_token
                    .as_ref()
                    .is_some_and(|t| t.expose_secret() == token)
            })
            .map(|s| s.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn set_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.user.last_login = Some(at);
        Ok(())
    }

    async fn set_authorization(
        &self,
        email: &Email,
        is_authorized: bool,
    ) -> Result<User, UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users
            .values_mut()
            .find(|s| &s.user.email == email)
            .ok_or(UserStoreError::UserNotFound)?;
        stored.user.is_authorized = is_authorized;
        Ok(stored.user.clone())
    }

    async fn set_reset_token(
        &self,
        id: Uuid,
        token: String,
        expiry: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.user.reset_password_token = Some(token);
        stored.user.reset_password_expiry = Some(expiry);
        Ok(())
    }

    async fn find_by_valid_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        self.users
            .read()
            .await
            .values()
            .find(|s| {
                s.user.reset_password_token.as_deref() == Some(token)
                    && s.user
                        .reset_password_expiry
                        .is_some_and(|expiry| expiry > now)
            })
            .map(|s| s.user.clone())
            .ok_or(UserStoreError::UserNotFound)
    }

    async fn set_new_password(&self, id: Uuid, password: Password) -> Result<(), UserStoreError> {
        let mut users = self.users.write().await;
        let stored = users.get_mut(&id).ok_or(UserStoreError::UserNotFound)?;
        stored.password = password.as_ref().clone();
        stored.user.reset_password_token = None;
        stored.user.reset_password_expiry = None;
        Ok(())
    }

    async fn delete_user(&self, id: Uuid) -> Result<(), UserStoreError> {
        self.users
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(UserStoreError::UserNotFound)
    }
}
