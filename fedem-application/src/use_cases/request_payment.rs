use fedem_core::{Email, EmailClient, ShipmentDetails, UserStore, UserStoreError};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::notifications;

#[derive(Debug, Error)]
pub enum RequestPaymentError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
}

/// Forwards shipment and price details to the operator inbox. Persists
/// nothing; this is purely a notification trigger.
pub struct RequestPaymentUseCase<U, E> {
    user_store: U,
    email_client: E,
    operator: Email,
}

impl<U, E> RequestPaymentUseCase<U, E>
where
    U: UserStore,
    E: EmailClient,
{
    pub fn new(user_store: U, email_client: E, operator: Email) -> Self {
        Self {
            user_store,
            email_client,
            operator,
        }
    }

    #[tracing::instrument(name = "RequestPaymentUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        email: Email,
        details: ShipmentDetails,
    ) -> Result<(), RequestPaymentError> {
        let user = self.user_store.get_user_by_email(&email).await?;

        notifications::send_payment_email(
            &self.email_client,
            &self.operator,
            &user.username,
            user.email.as_ref().expose_secret(),
            &details,
        )
        .await;

        Ok(())
    }
}
