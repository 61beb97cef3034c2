use chrono::{DateTime, Utc};
use fedem_core::{
    Email, NewUser, Password, User, UserStore, UserStoreError, Username,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

use super::password::{compute_password_hash, verify_password_hash};

const USER_COLUMNS: &str = "id, username, email, is_authorized, is_admin, refresh_token, \
     refresh_token_expiry, reset_password_token, reset_password_expiry, last_login, created_at";

#[derive(Clone)]
pub struct PostgresUserStore {
    pool: PgPool,
}

impl PostgresUserStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresUserStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct UserRow {
    id: Uuid,
    username: String,
    email: String,
    is_authorized: bool,
    is_admin: bool,
    refresh_token: Option<String>,
    refresh_token_expiry: Option<DateTime<Utc>>,
    reset_password_token: Option<String>,
    reset_password_expiry: Option<DateTime<Utc>>,
    last_login: Option<DateTime<Utc>>,
    created_at: DateTime<Utc>,
}

impl TryFrom<UserRow> for User {
    type Error = UserStoreError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::from(row.email))
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        let username = Username::parse(row.username)
            .map_err(|e| UserStoreError::UnexpectedError(e.to_string()))?;
        Ok(User {
            id: row.id,
            username,
            email,
            is_authorized: row.is_authorized,
            is_admin: row.is_admin,
            refresh_token: row.refresh_token.map(Secret::from),
            refresh_token_expiry: row.refresh_token_expiry,
            reset_password_token: row.reset_password_token,
            reset_password_expiry: row.reset_password_expiry,
            last_login: row.last_login,
            created_at: row.created_at,
        })
    }
}

fn unexpected(e: sqlx::Error) -> UserStoreError {
    UserStoreError::UnexpectedError(e.to_string())
}

impl PostgresUserStore {
    async fn fetch_one_where(
        &self,
        clause: &str,
        bind: &str,
    ) -> Result<User, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE {clause}");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(bind)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }
}

#[async_trait::async_trait]
impl UserStore for PostgresUserStore {
    #[tracing::instrument(name = "Adding user to PostgreSQL", skip_all)]
    async fn add_user(&self, new_user: NewUser) -> Result<User, UserStoreError> {
        let password_hash = compute_password_hash(new_user.password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        let id = Uuid::new_v4();
        let created_at = Utc::now();

        sqlx::query(
            "INSERT INTO users (id, username, email, password_hash, is_authorized, is_admin, created_at) \
             VALUES ($1, $2, $3, $4, FALSE, $5, $6)",
        )
        .bind(id)
        .bind(new_user.username.as_ref())
        .bind(new_user.email.as_ref().expose_secret())
        .bind(password_hash.expose_secret())
        .bind(new_user.is_admin)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return UserStoreError::UserAlreadyExists;
                }
            }
            unexpected(e)
        })?;

        Ok(User {
            id,
            username: new_user.username,
            email: new_user.email,
            is_authorized: false,
            is_admin: new_user.is_admin,
            refresh_token: None,
            refresh_token_expiry: None,
            reset_password_token: None,
            reset_password_expiry: None,
            last_login: None,
            created_at,
        })
    }

    #[tracing::instrument(name = "Validating user credentials in PostgreSQL", skip_all)]
    async fn authenticate_user(
        &self,
        email: &Email,
        password: &Password,
    ) -> Result<User, UserStoreError> {
        let stored_hash: Option<(String,)> =
            sqlx::query_as("SELECT password_hash FROM users WHERE email = $1")
                .bind(email.as_ref().expose_secret())
                .fetch_optional(&self.pool)
                .await
                .map_err(unexpected)?;

        let (stored_hash,) = stored_hash.ok_or(UserStoreError::UserNotFound)?;

        verify_password_hash(Secret::from(stored_hash), password.clone())
            .await
            .map_err(|_| UserStoreError::IncorrectPassword)?;

        self.get_user_by_email(email).await
    }

    #[tracing::instrument(name = "Retrieving user from PostgreSQL", skip_all)]
    async fn get_user(&self, id: Uuid) -> Result<User, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1");
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    async fn get_user_by_email(&self, email: &Email) -> Result<User, UserStoreError> {
        self.fetch_one_where("email = $1", email.as_ref().expose_secret())
            .await
    }

    #[tracing::instrument(name = "Listing users from PostgreSQL", skip_all)]
    async fn list_users(&self) -> Result<Vec<User>, UserStoreError> {
        let query = format!("SELECT {USER_COLUMNS} FROM users ORDER BY created_at");
        let rows = sqlx::query_as::<_, UserRow>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(unexpected)?;

        rows.into_iter().map(User::try_from).collect()
    }

    #[tracing::instrument(name = "Storing refresh token", skip_all)]
    async fn set_refresh_token(
        &self,
        id: Uuid,
        token: Secret<String>,
        expiry: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token = $1, refresh_token_expiry = $2 WHERE id = $3",
        )
        .bind(token.expose_secret())
        .bind(expiry)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Clearing refresh token", skip_all)]
    async fn clear_refresh_token(&self, id: Uuid) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            "UPDATE users SET refresh_token = NULL, refresh_token_expiry = NULL WHERE id = $1",
        )
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    async fn find_by_refresh_token(&self, token: &str) -> Result<User, UserStoreError> {
        self.fetch_one_where("refresh_token = $1", token).await
    }

    async fn set_last_login(&self, id: Uuid, at: DateTime<Utc>) -> Result<(), UserStoreError> {
        let result = sqlx::query("UPDATE users SET last_login = $1 WHERE id = $2")
            .bind(at)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Setting authorization flag", skip_all)]
    async fn set_authorization(
        &self,
        email: &Email,
        is_authorized: bool,
    ) -> Result<User, UserStoreError> {
        let query = format!(
            "UPDATE users SET is_authorized = $1 WHERE email = $2 RETURNING {USER_COLUMNS}"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(is_authorized)
            .bind(email.as_ref().expose_secret())
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Storing reset token", skip_all)]
    async fn set_reset_token(
        &self,
        id: Uuid,
        token: String,
        expiry: DateTime<Utc>,
    ) -> Result<(), UserStoreError> {
        let result = sqlx::query(
            "UPDATE users SET reset_password_token = $1, reset_password_expiry = $2 WHERE id = $3",
        )
        .bind(token)
        .bind(expiry)
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    async fn find_by_valid_reset_token(
        &self,
        token: &str,
        now: DateTime<Utc>,
    ) -> Result<User, UserStoreError> {
        let query = format!(
            "SELECT {USER_COLUMNS} FROM users \
             WHERE reset_password_token = $1 AND reset_password_expiry > $2"
        );
        let row = sqlx::query_as::<_, UserRow>(&query)
            .bind(token)
            .bind(now)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.ok_or(UserStoreError::UserNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Set new password", skip_all)]
    async fn set_new_password(&self, id: Uuid, password: Password) -> Result<(), UserStoreError> {
        let password_hash = compute_password_hash(password)
            .await
            .map_err(UserStoreError::UnexpectedError)?;

        // Clearing the reset token in the same statement keeps it
        // single-use even if the process dies right after.
        let result = sqlx::query(
            "UPDATE users SET password_hash = $1, reset_password_token = NULL, \
             reset_password_expiry = NULL WHERE id = $2",
        )
        .bind(password_hash.expose_secret())
        .bind(id)
        .execute(&self.pool)
        .await
        .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }

    #[tracing::instrument(name = "Delete user from user store", skip_all)]
    async fn delete_user(&self, id: Uuid) -> Result<(), UserStoreError> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(unexpected)?;

        if result.rows_affected() == 0 {
            return Err(UserStoreError::UserNotFound);
        }
        Ok(())
    }
}
