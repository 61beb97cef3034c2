use chrono::{Duration, Utc};
use fedem_core::{
    REFRESH_TOKEN_TTL_DAYS, User, UserStore, UserStoreError, generate_refresh_token,
};
use secrecy::{ExposeSecret, Secret};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RefreshTokenError {
    #[error("Invalid or expired refresh token")]
    InvalidToken,
    #[error("{0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for RefreshTokenError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => RefreshTokenError::InvalidToken,
            other => RefreshTokenError::UserStoreError(other),
        }
    }
}

pub struct RefreshTokenOutcome {
    pub user: User,
    pub refresh_token: Secret<String>,
}

/// Refresh-token exchange. The presented token is single-use: a successful
/// exchange rotates the stored value, so replaying the old token fails.
pub struct RefreshTokenUseCase<U> {
    user_store: U,
}

impl<U> RefreshTokenUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "RefreshTokenUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: Secret<String>,
    ) -> Result<RefreshTokenOutcome, RefreshTokenError> {
        let user = self
            .user_store
            .find_by_refresh_token(token.expose_secret())
            .await?;

        let now = Utc::now();
        if !user.refresh_token_valid(now) {
            return Err(RefreshTokenError::InvalidToken);
        }

        let refresh_token = generate_refresh_token();
        self.user_store
            .set_refresh_token(
                user.id,
                refresh_token.clone(),
                now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            )
            .await?;

        Ok(RefreshTokenOutcome {
            user,
            refresh_token,
        })
    }
}
