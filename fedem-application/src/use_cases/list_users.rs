use fedem_core::{User, UserStore, UserStoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ListUsersError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
}

pub struct ListUsersUseCase<U> {
    user_store: U,
}

impl<U> ListUsersUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "ListUsersUseCase::execute", skip_all)]
    pub async fn execute(&self) -> Result<Vec<User>, ListUsersError> {
        Ok(self.user_store.list_users().await?)
    }
}
