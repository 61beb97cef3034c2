pub mod auth;
pub mod config;
pub mod email;
pub mod persistence;

pub use auth::jwt::{
    AccessTokenClaims, JwtConfig, TokenAuthError, authenticate_request, extract_bearer_token,
    generate_access_token, validate_access_token,
};
pub use config::{AllowedOrigins, Settings};
pub use email::{MockEmailClient, PostmarkEmailClient};
pub use persistence::{
    hashmap_tracking_store::HashMapTrackingStore, hashmap_user_store::HashMapUserStore,
    postgres_tracking_store::PostgresTrackingStore, postgres_user_store::PostgresUserStore,
};
