pub mod email;
pub mod password;
pub mod tokens;
pub mod tracking;
pub mod user;
pub mod username;
