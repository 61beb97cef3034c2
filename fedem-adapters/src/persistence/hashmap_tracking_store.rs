use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use fedem_core::{NewTracking, Tracking, TrackingStage, TrackingStore, TrackingStoreError};
use tokio::sync::RwLock;
use uuid::Uuid;

/// In-memory [`TrackingStore`] keyed by tracking id.
#[derive(Clone, Default)]
pub struct HashMapTrackingStore {
    trackings: Arc<RwLock<HashMap<String, Tracking>>>,
}

impl HashMapTrackingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl TrackingStore for HashMapTrackingStore {
    async fn add_tracking(
        &self,
        new_tracking: NewTracking,
    ) -> Result<Tracking, TrackingStoreError> {
        let mut trackings = self.trackings.write().await;
        if trackings.contains_key(&new_tracking.tracking_id) {
            return Err(TrackingStoreError::TrackingAlreadyExists);
        }
        let tracking = Tracking {
            id: Uuid::new_v4(),
            tracking_id: new_tracking.tracking_id.clone(),
            user_id: new_tracking.user_id,
            email: new_tracking.email,
            details: new_tracking.details,
            current_stage: new_tracking.initial_stage.stage,
            stages: vec![new_tracking.initial_stage],
            created_at: Utc::now(),
        };
        trackings.insert(new_tracking.tracking_id, tracking.clone());
        Ok(tracking)
    }

    async fn append_stage(
        &self,
        tracking_id: &str,
        event: TrackingStage,
    ) -> Result<Tracking, TrackingStoreError> {
        let mut trackings = self.trackings.write().await;
        let tracking = trackings
            .get_mut(tracking_id)
            .ok_or(TrackingStoreError::TrackingNotFound)?;
        tracking.current_stage = event.stage;
        tracking.stages.push(event);
        Ok(tracking.clone())
    }

    async fn get_tracking(&self, tracking_id: &str) -> Result<Tracking, TrackingStoreError> {
        self.trackings
            .read()
            .await
            .get(tracking_id)
            .cloned()
            .ok_or(TrackingStoreError::TrackingNotFound)
    }
}
