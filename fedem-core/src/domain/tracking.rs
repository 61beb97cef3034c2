use chrono::{DateTime, Duration, Utc};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::email::Email;

pub const DELIVERY_ESTIMATE_DAYS: i64 = 7;

const TRACKING_ID_PREFIX: &str = "FEDEM";

pub const INITIAL_STAGE: i32 = 1;
pub const INITIAL_STAGE_LOCATION: &str = "Processing Center";
pub const INITIAL_STAGE_STATUS: &str = "Order Placed";

/// Shipment attributes supplied by the customer. All opaque strings at
/// this layer; pricing and weight semantics live upstream.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ShipmentDetails {
    pub country: String,
    pub weight: String,
    pub shipment_type: String,
    pub total_price: String,
}

/// One point-in-time status update. Stage events are append-only; nothing
/// ever edits or removes an entry once pushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingStage {
    pub stage: i32,
    pub location: String,
    pub status: String,
    pub estimated_delivery: DateTime<Utc>,
    pub timestamp: DateTime<Utc>,
}

impl TrackingStage {
    /// Build a stage event timestamped now, with the delivery estimate
    /// recomputed from now rather than carried over from earlier stages.
    pub fn new(stage: i32, location: String, status: String) -> Self {
        let now = Utc::now();
        Self {
            stage,
            location,
            status,
            estimated_delivery: now + Duration::days(DELIVERY_ESTIMATE_DAYS),
            timestamp: now,
        }
    }

    pub fn initial() -> Self {
        Self::new(
            INITIAL_STAGE,
            INITIAL_STAGE_LOCATION.to_string(),
            INITIAL_STAGE_STATUS.to_string(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct Tracking {
    pub id: Uuid,
    pub tracking_id: String,
    pub user_id: Uuid,
    pub email: Email,
    pub details: ShipmentDetails,
    pub current_stage: i32,
    pub stages: Vec<TrackingStage>,
    pub created_at: DateTime<Utc>,
}

pub struct NewTracking {
    pub tracking_id: String,
    pub user_id: Uuid,
    pub email: Email,
    pub details: ShipmentDetails,
    pub initial_stage: TrackingStage,
}

/// Human-readable tracking id: `FEDEM-YYYYMMDD-XXXXXXXX` with an uppercase
/// hex suffix. Uniqueness is enforced by the store; callers regenerate on
/// collision.
pub fn generate_tracking_id() -> String {
    let date = Utc::now().format("%Y%m%d");
    let mut bytes = [0u8; 4];
    rand::rng().fill_bytes(&mut bytes);
    let suffix: String = bytes.iter().map(|b| format!("{b:02X}")).collect();
    format!("{TRACKING_ID_PREFIX}-{date}-{suffix}")
}
