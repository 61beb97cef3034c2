use axum::{Json, extract::{State, rejection::JsonRejection}, response::IntoResponse};
use fedem_application::ResetPasswordUseCase;
use fedem_core::{Password, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use super::{MessageResponse, error::ApiError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResetPasswordRequest {
    pub token: String,
    pub new_password: Secret<String>,
}

#[tracing::instrument(name = "Reset password", skip_all)]
pub async fn reset_password<U>(
    State(user_store): State<U>,
    body: Result<Json<ResetPasswordRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let Json(request) = body?;

    let new_password = Password::try_from(request.new_password)?;

    let use_case = ResetPasswordUseCase::new(user_store);
    use_case.execute(request.token, new_password).await?;

    Ok(Json(MessageResponse::new("Password updated successfully")))
}
