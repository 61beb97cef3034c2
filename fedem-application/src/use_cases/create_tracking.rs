use fedem_core::{
    Email, EmailClient, NewTracking, ShipmentDetails, Tracking, TrackingStage, TrackingStore,
    TrackingStoreError, UserStore, UserStoreError, generate_tracking_id,
};
use thiserror::Error;
use uuid::Uuid;

use crate::notifications;

// Store-level uniqueness is the backstop; a fresh id is drawn this many
// times before giving up on a collision streak.
const MAX_ID_ATTEMPTS: u32 = 3;

#[derive(Debug, Error)]
pub enum CreateTrackingError {
    #[error("{0}")]
    UserStoreError(#[from] UserStoreError),
    #[error("{0}")]
    TrackingStoreError(#[from] TrackingStoreError),
}

/// Creates a shipment record with its initial "Order Placed" stage event
/// and mails the tracking id to the contact address (best-effort).
pub struct CreateTrackingUseCase<U, T, E> {
    user_store: U,
    tracking_store: T,
    email_client: E,
}

impl<U, T, E> CreateTrackingUseCase<U, T, E>
where
    U: UserStore,
    T: TrackingStore,
    E: EmailClient,
{
    pub fn new(user_store: U, tracking_store: T, email_client: E) -> Self {
        Self {
            user_store,
            tracking_store,
            email_client,
        }
    }

    #[tracing::instrument(name = "CreateTrackingUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        user_id: Uuid,
        email: Email,
        details: ShipmentDetails,
    ) -> Result<Tracking, CreateTrackingError> {
        // The bearer token may outlive the account; re-check existence.
        let user = self.user_store.get_user(user_id).await?;

        let tracking = self.insert_with_fresh_id(user_id, &email, &details).await?;

        notifications::send_tracking_email(
            &self.email_client,
            &email,
            &user.username,
            &tracking.tracking_id,
            &details,
        )
        .await;

        Ok(tracking)
    }

    async fn insert_with_fresh_id(
        &self,
        user_id: Uuid,
        email: &Email,
        details: &ShipmentDetails,
    ) -> Result<Tracking, CreateTrackingError> {
        let mut attempt = 0;
        loop {
            attempt += 1;
            let new_tracking = NewTracking {
                tracking_id: generate_tracking_id(),
                user_id,
                email: email.clone(),
                details: details.clone(),
                initial_stage: TrackingStage::initial(),
            };
            match self.tracking_store.add_tracking(new_tracking).await {
                Ok(tracking) => return Ok(tracking),
                Err(TrackingStoreError::TrackingAlreadyExists) if attempt < MAX_ID_ATTEMPTS => {
                    tracing::warn!(attempt, "tracking id collision, regenerating");
                }
                Err(error) => return Err(error.into()),
            }
        }
    }
}
