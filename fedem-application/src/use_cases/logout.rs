use fedem_core::{UserStore, UserStoreError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum LogoutError {
    #[error("{0}")]
    UserStoreError(UserStoreError),
}

/// Clears the caller's refresh-token slot. Idempotent: logging out twice,
/// or after the account vanished, still succeeds.
pub struct LogoutUseCase<U> {
    user_store: U,
}

impl<U> LogoutUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "LogoutUseCase::execute", skip_all)]
    pub async fn execute(&self, user_id: Uuid) -> Result<(), LogoutError> {
        match self.user_store.clear_refresh_token(user_id).await {
            Ok(()) | Err(UserStoreError::UserNotFound) => Ok(()),
            Err(other) => Err(LogoutError::UserStoreError(other)),
        }
    }
}
