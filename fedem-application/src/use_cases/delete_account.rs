use fedem_core::{UserStore, UserStoreError};
use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum DeleteAccountError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Hard-deletes the account record. Tracking records owned by the user are
/// left in place; nothing cascades.
pub struct DeleteAccountUseCase<U> {
    user_store: U,
}

impl<U> DeleteAccountUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "DeleteAccountUseCase::execute", skip_all)]
    pub async fn execute(&self, user_id: Uuid) -> Result<(), DeleteAccountError> {
        self.user_store.delete_user(user_id).await?;
        Ok(())
    }
}
