use fedem_core::{Tracking, TrackingStore, TrackingStoreError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GetTrackingError {
    #[error("{0}")]
    TrackingStoreError(#[from] TrackingStoreError),
}

pub struct GetTrackingUseCase<T> {
    tracking_store: T,
}

impl<T> GetTrackingUseCase<T>
where
    T: TrackingStore,
{
    pub fn new(tracking_store: T) -> Self {
        Self { tracking_store }
    }

    #[tracing::instrument(name = "GetTrackingUseCase::execute", skip_all)]
    pub async fn execute(&self, tracking_id: &str) -> Result<Tracking, GetTrackingError> {
        Ok(self.tracking_store.get_tracking(tracking_id).await?)
    }
}
