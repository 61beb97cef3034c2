use std::sync::Arc;

use axum::{Json, extract::{State, rejection::JsonRejection}, response::IntoResponse};
use fedem_adapters::generate_access_token;
use fedem_application::LoginUseCase;
use fedem_core::{Email, Password, UserStore};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::service::ServiceConfig;

use super::{UserResponse, error::ApiError};

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

#[tracing::instrument(name = "Login", skip_all)]
pub async fn login<U>(
    State((user_store, config)): State<(U, Arc<ServiceConfig>)>,
    body: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let Json(request) = body?;

    // Malformed credentials get the same generic rejection as wrong ones.
    let email = Email::try_from(request.email).map_err(|_| ApiError::InvalidCredentials)?;
    let password =
        Password::try_from(request.password).map_err(|_| ApiError::InvalidCredentials)?;

    let use_case = LoginUseCase::new(user_store);
    let outcome = use_case.execute(email, password).await?;

    let access_token = generate_access_token(&outcome.user, &config.jwt)?;

    Ok(Json(LoginResponse {
        user: UserResponse::from(&outcome.user),
        access_token,
        refresh_token: outcome.refresh_token.expose_secret().clone(),
    }))
}
