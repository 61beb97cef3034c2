pub mod error;

pub mod delete_account;
pub mod list_users;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;
pub mod request_payment;
pub mod reset_password;
pub mod reset_password_request;
pub mod toggle_authorization;
pub mod tracking_create;
pub mod tracking_get;
pub mod tracking_update;

pub use delete_account::delete_account;
pub use list_users::list_users;
pub use login::login;
pub use logout::logout;
pub use refresh_token::refresh_token;
pub use register::register;
pub use request_payment::request_payment;
pub use reset_password::reset_password;
pub use reset_password_request::reset_password_request;
pub use toggle_authorization::toggle_authorization;
pub use tracking_create::create_tracking;
pub use tracking_get::get_tracking;
pub use tracking_update::update_tracking;

use chrono::{DateTime, Utc};
use fedem_core::{Tracking, TrackingStage, User};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User summary as exposed on the wire. The password hash and refresh
/// token never leave the store.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub user_id: Uuid,
    pub username: String,
    pub email: String,
    pub is_admin: bool,
    pub is_authorized: bool,
    pub last_login: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserResponse {
    fn from(user: &User) -> Self {
        UserResponse {
            user_id: user.id,
            username: user.username.as_ref().to_string(),
            email: user.email.as_ref().expose_secret().clone(),
            is_admin: user.is_admin,
            is_authorized: user.is_authorized,
            last_login: user.last_login,
            created_at: user.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub tracking_id: String,
    pub user_id: Uuid,
    pub email: String,
    pub country: String,
    pub weight: String,
    pub shipment_type: String,
    pub total_price: String,
    pub current_stage: i32,
    pub tracking_stages: Vec<TrackingStage>,
    pub created_at: DateTime<Utc>,
}

impl From<Tracking> for TrackingResponse {
    fn from(tracking: Tracking) -> Self {
        TrackingResponse {
            tracking_id: tracking.tracking_id,
            user_id: tracking.user_id,
            email: tracking.email.as_ref().expose_secret().clone(),
            country: tracking.details.country,
            weight: tracking.details.weight,
            shipment_type: tracking.details.shipment_type,
            total_price: tracking.details.total_price,
            current_stage: tracking.current_stage,
            tracking_stages: tracking.stages,
            created_at: tracking.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        MessageResponse {
            message: message.into(),
        }
    }
}
