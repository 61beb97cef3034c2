use fedem_core::{Email, User, UserStore, UserStoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ToggleAuthorizationError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Administrative flip of the `is_authorized` flag.
pub struct ToggleAuthorizationUseCase<U> {
    user_store: U,
}

impl<U> ToggleAuthorizationUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ToggleAuthorizationUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        is_authorized: bool,
    ) -> Result<User, ToggleAuthorizationError> {
        let user = self
            .user_store
            .set_authorization(&email, is_authorized)
            .await?;
        Ok(user)
    }
}
