use chrono::{Duration, Utc};
use fedem_core::{
    Email, EmailClient, RESET_TOKEN_TTL_HOURS, UserStore, UserStoreError, generate_reset_token,
};
use thiserror::Error;

use crate::notifications;

#[derive(Debug, Error)]
pub enum ResetPasswordRequestError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Issues a one-hour reset token and mails the reset link (best-effort).
pub struct ResetPasswordRequestUseCase<U, E> {
    user_store: U,
    email_client: E,
    reset_link_base: String,
}

impl<U, E> ResetPasswordRequestUseCase<U, E>
where
    U: UserStore,
    E: EmailClient,
{
    pub fn new(user_store: U, email_client: E, reset_link_base: String) -> Self {
        Self {
            user_store,
            email_client,
            reset_link_base,
        }
    }

    #[tracing::instrument(name = "ResetPasswordRequestUseCase::execute", skip_all)]
    pub async fn execute(&self, email: Email) -> Result<(), ResetPasswordRequestError> {
        let user = self.user_store.get_user_by_email(&email).await?;

        let token = generate_reset_token();
        let expiry = Utc::now() + Duration::hours(RESET_TOKEN_TTL_HOURS);
        self.user_store
            .set_reset_token(user.id, token.clone(), expiry)
            .await?;

        let reset_url = format!("{}/authentication/reset/{token}", self.reset_link_base);
        notifications::send_reset_email(&self.email_client, &user.email, &user.username, &reset_url)
            .await;

        Ok(())
    }
}
