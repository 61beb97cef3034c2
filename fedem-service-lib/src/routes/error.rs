use axum::{
    Json,
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use fedem_adapters::TokenAuthError;
use fedem_application::{
    CreateTrackingError, DeleteAccountError, GetTrackingError, ListUsersError, LoginError,
    LogoutError, RefreshTokenError, RegisterError, RequestPaymentError, ResetPasswordError,
    ResetPasswordRequestError, ToggleAuthorizationError, UpdateTrackingError,
};
use fedem_core::{
    EmailError, PasswordError, TrackingStoreError, UserStoreError, UsernameError,
};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Missing token")]
    MissingToken,

    // Unknown email and wrong password share one message on purpose.
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid or expired reset token")]
    InvalidResetToken,

    #[error("Authentication failed: {0}")]
    AuthenticationError(String),

    #[error("User not found")]
    UserNotFound,

    #[error("Tracking not found")]
    TrackingNotFound,

    #[error("User already exists")]
    UserAlreadyExists,

    #[error("Unexpected error: {0}")]
    UnexpectedError(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status_code, error_message) = match self {
            ApiError::InvalidInput(_)
            | ApiError::MissingToken
            | ApiError::InvalidCredentials
            | ApiError::InvalidResetToken => (StatusCode::BAD_REQUEST, self.to_string()),

            ApiError::AuthenticationError(_) => (StatusCode::UNAUTHORIZED, self.to_string()),

            ApiError::UserNotFound | ApiError::TrackingNotFound => {
                (StatusCode::NOT_FOUND, self.to_string())
            }

            ApiError::UserAlreadyExists => (StatusCode::CONFLICT, self.to_string()),

            ApiError::UnexpectedError(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string())
            }
        };

        let body = Json(ErrorResponse {
            error: error_message,
        });

        (status_code, body).into_response()
    }
}

// Bodies that fail to deserialize (missing field, malformed JSON, wrong
// content type) count as invalid input, not an unprocessable entity.
impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::InvalidInput(rejection.body_text())
    }
}

impl From<EmailError> for ApiError {
    fn from(error: EmailError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<PasswordError> for ApiError {
    fn from(error: PasswordError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<UsernameError> for ApiError {
    fn from(error: UsernameError) -> Self {
        ApiError::InvalidInput(error.to_string())
    }
}

impl From<TokenAuthError> for ApiError {
    fn from(error: TokenAuthError) -> Self {
        match error {
            TokenAuthError::MissingToken => ApiError::MissingToken,
            TokenAuthError::InvalidToken | TokenAuthError::TokenError(_) => {
                ApiError::AuthenticationError(error.to_string())
            }
            TokenAuthError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<UserStoreError> for ApiError {
    fn from(error: UserStoreError) -> Self {
        match error {
            UserStoreError::UserAlreadyExists => ApiError::UserAlreadyExists,
            UserStoreError::UserNotFound => ApiError::UserNotFound,
            UserStoreError::IncorrectPassword => ApiError::InvalidCredentials,
            UserStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<TrackingStoreError> for ApiError {
    fn from(error: TrackingStoreError) -> Self {
        match error {
            TrackingStoreError::TrackingNotFound => ApiError::TrackingNotFound,
            // Exhausted id regeneration surfaces as a server fault.
            TrackingStoreError::TrackingAlreadyExists => {
                ApiError::UnexpectedError(error.to_string())
            }
            TrackingStoreError::UnexpectedError(e) => ApiError::UnexpectedError(e),
        }
    }
}

impl From<RegisterError> for ApiError {
    fn from(error: RegisterError) -> Self {
        match error {
            RegisterError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<LoginError> for ApiError {
    fn from(error: LoginError) -> Self {
        match error {
            LoginError::UserStoreError(
                UserStoreError::UserNotFound | UserStoreError::IncorrectPassword,
            ) => ApiError::InvalidCredentials,
            LoginError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<RefreshTokenError> for ApiError {
    fn from(error: RefreshTokenError) -> Self {
        match error {
            RefreshTokenError::InvalidToken => ApiError::AuthenticationError(error.to_string()),
            RefreshTokenError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<LogoutError> for ApiError {
    fn from(error: LogoutError) -> Self {
        match error {
            LogoutError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ToggleAuthorizationError> for ApiError {
    fn from(error: ToggleAuthorizationError) -> Self {
        match error {
            ToggleAuthorizationError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ListUsersError> for ApiError {
    fn from(error: ListUsersError) -> Self {
        match error {
            ListUsersError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ResetPasswordRequestError> for ApiError {
    fn from(error: ResetPasswordRequestError) -> Self {
        match error {
            ResetPasswordRequestError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<ResetPasswordError> for ApiError {
    fn from(error: ResetPasswordError) -> Self {
        match error {
            ResetPasswordError::InvalidToken => ApiError::InvalidResetToken,
            ResetPasswordError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<DeleteAccountError> for ApiError {
    fn from(error: DeleteAccountError) -> Self {
        match error {
            DeleteAccountError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<RequestPaymentError> for ApiError {
    fn from(error: RequestPaymentError) -> Self {
        match error {
            RequestPaymentError::UserStoreError(e) => e.into(),
        }
    }
}

impl From<CreateTrackingError> for ApiError {
    fn from(error: CreateTrackingError) -> Self {
        match error {
            CreateTrackingError::UserStoreError(e) => e.into(),
            CreateTrackingError::TrackingStoreError(e) => e.into(),
        }
    }
}

impl From<UpdateTrackingError> for ApiError {
    fn from(error: UpdateTrackingError) -> Self {
        match error {
            UpdateTrackingError::TrackingStoreError(e) => e.into(),
        }
    }
}

impl From<GetTrackingError> for ApiError {
    fn from(error: GetTrackingError) -> Self {
        match error {
            GetTrackingError::TrackingStoreError(e) => e.into(),
        }
    }
}
