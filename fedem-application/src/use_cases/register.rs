use chrono::{Duration, Utc};
use fedem_core::{
    EmailClient, NewUser, REFRESH_TOKEN_TTL_DAYS, User, UserStore, UserStoreError,
    generate_refresh_token,
};
use secrecy::Secret;
use thiserror::Error;

use crate::notifications;

#[derive(Debug, Error)]
pub enum RegisterError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
}

pub struct RegisterOutcome {
    pub user: User,
    pub refresh_token: Secret<String>,
}

/// Registration: persist the account, fire the welcome email
/// (best-effort), then open the refresh-token slot.
pub struct RegisterUseCase<U, E> {
    user_store: U,
    email_client: E,
}

impl<U, E> RegisterUseCase<U, E>
where
    U: UserStore,
    E: EmailClient,
{
    pub fn new(user_store: U, email_client: E) -> Self {
        Self {
            user_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "RegisterUseCase::execute", skip_all)]
    pub async fn execute(&self, new_user: NewUser) -> Result<RegisterOutcome, RegisterError> {
        let user = self.user_store.add_user(new_user).await?;

        notifications::send_welcome_email(&self.email_client, &user.email, &user.username).await;

        let refresh_token = generate_refresh_token();
        let expiry = Utc::now() + Duration::days(REFRESH_TOKEN_TTL_DAYS);
        self.user_store
            .set_refresh_token(user.id, refresh_token.clone(), expiry)
            .await?;

        Ok(RegisterOutcome {
            user,
            refresh_token,
        })
    }
}
