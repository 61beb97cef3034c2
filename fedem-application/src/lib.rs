pub mod notifications;
pub mod use_cases;

pub use use_cases::{
    create_tracking::{CreateTrackingError, CreateTrackingUseCase},
    delete_account::{DeleteAccountError, DeleteAccountUseCase},
    get_tracking::{GetTrackingError, GetTrackingUseCase},
    list_users::{ListUsersError, ListUsersUseCase},
    login::{LoginError, LoginOutcome, LoginUseCase},
    logout::{LogoutError, LogoutUseCase},
    refresh_token::{RefreshTokenError, RefreshTokenOutcome, RefreshTokenUseCase},
    register::{RegisterError, RegisterOutcome, RegisterUseCase},
    request_payment::{RequestPaymentError, RequestPaymentUseCase},
    reset_password::{ResetPasswordError, ResetPasswordUseCase},
    reset_password_request::{ResetPasswordRequestError, ResetPasswordRequestUseCase},
    toggle_authorization::{ToggleAuthorizationError, ToggleAuthorizationUseCase},
    update_tracking::{UpdateTrackingError, UpdateTrackingUseCase},
};

#[cfg(test)]
pub(crate) mod test_support;
