use chrono::{Duration, Utc};
use fedem_core::{
    Email, Password, REFRESH_TOKEN_TTL_DAYS, User, UserStore, UserStoreError,
    generate_refresh_token,
};
use secrecy::Secret;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum LoginError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
}

pub struct LoginOutcome {
    pub user: User,
    pub refresh_token: Secret<String>,
}

/// Credential verification plus session bookkeeping: on success the
/// refresh token rotates and `last_login` moves to now.
pub struct LoginUseCase<U> {
    user_store: U,
}

impl<U> LoginUseCase<U>
where
    U: UserStore,
{
    pub fn new(user_store: U) -> Self {
        Self { user_store }
    }

    #[tracing::instrument(name = "LoginUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        password: Password,
    ) -> Result<LoginOutcome, LoginError> {
        let mut user = self.user_store.authenticate_user(&email, &password).await?;

        let now = Utc::now();
        let refresh_token = generate_refresh_token();
        self.user_store
            .set_refresh_token(
                user.id,
                refresh_token.clone(),
                now + Duration::days(REFRESH_TOKEN_TTL_DAYS),
            )
            .await?;
        self.user_store.set_last_login(user.id, now).await?;
        user.last_login = Some(now);

        Ok(LoginOutcome {
            user,
            refresh_token,
        })
    }
}
