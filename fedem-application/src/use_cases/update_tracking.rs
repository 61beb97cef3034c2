use fedem_core::{Tracking, TrackingStage, TrackingStore, TrackingStoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum UpdateTrackingError {
    #[error("{0}")]
    TrackingStoreError(#[from] TrackingStoreError),
}

/// Appends a stage event and moves `current_stage` along with it. Stage
/// numbers are taken as given: the log records whatever the operator
/// submits, in submission order.
pub struct UpdateTrackingUseCase<T> {
    tracking_store: T,
}

impl<T> UpdateTrackingUseCase<T>
where
    T: TrackingStore,
{
    pub fn new(tracking_store: T) -> Self {
        Self { tracking_store }
    }

    #[tracing::instrument(name = "UpdateTrackingUseCase::execute", skip_all)]
    pub async fn execute(
        &self,
        tracking_id: &str,
        stage: i32,
        location: String,
        status: String,
    ) -> Result<Tracking, UpdateTrackingError> {
        let event = TrackingStage::new(stage, location, status);
        let tracking = self.tracking_store.append_stage(tracking_id, event).await?;
        Ok(tracking)
    }
}
