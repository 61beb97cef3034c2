pub mod hashmap_tracking_store;
pub mod hashmap_user_store;
mod password;
pub mod postgres_tracking_store;
pub mod postgres_user_store;
