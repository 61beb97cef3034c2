pub mod create_tracking;
pub mod delete_account;
pub mod get_tracking;
pub mod list_users;
pub mod login;
pub mod logout;
pub mod refresh_token;
pub mod register;
pub mod request_payment;
pub mod reset_password;
pub mod reset_password_request;
pub mod toggle_authorization;
pub mod update_tracking;
