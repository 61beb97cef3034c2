pub mod domain;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    email::{Email, EmailError},
    password::{Password, PasswordError},
    tokens::{
        REFRESH_TOKEN_TTL_DAYS, RESET_TOKEN_TTL_HOURS, generate_refresh_token,
        generate_reset_token,
    },
    tracking::{
        DELIVERY_ESTIMATE_DAYS, NewTracking, ShipmentDetails, Tracking, TrackingStage,
        generate_tracking_id,
    },
    user::{AuthenticatedUser, NewUser, User},
    username::{Username, UsernameError},
};

pub use ports::{
    repositories::{TrackingStore, TrackingStoreError, UserStore, UserStoreError},
    services::EmailClient,
};
