use chrono::Utc;
use fedem_core::{Password, UserStore, UserStoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ResetPasswordError {
    // Unknown and expired tokens collapse into the same variant on purpose.
    #[error("Invalid or expired reset token")]
    InvalidToken,
    #[error("{0}")]
    UserStoreError(UserStoreError),
}

impl From<UserStoreError> for ResetPasswordError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserNotFound => ResetPasswordError::InvalidToken,
            other => ResetPasswordError::UserStoreError(other),
        }
    }
}

/// Completes the reset flow: the token must match and be unexpired, and the
/// store clears it alongside the password write, making it single-use.
pub struct ResetPasswordUseCase<U> {
    user_store: U,
}

impl<U> ResetPasswordUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ResetPasswordUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        token: String,
        new_password: Password,
    ) -> Result<(), ResetPasswordError> {
        let user = self
            .user_store
            .find_by_valid_reset_token(&token, Utc::now())
            .await?;

        self.user_store
            .set_new_password(user.id, new_password)
            .await?;

        Ok(())
    }
}
