use std::sync::Arc;

use axum::{Json, extract::{State, rejection::JsonRejection}, http::StatusCode, response::IntoResponse};
use fedem_adapters::generate_access_token;
use fedem_application::RegisterUseCase;
use fedem_core::{Email, EmailClient, NewUser, Password, UserStore, Username};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::service::ServiceConfig;

use super::{UserResponse, error::ApiError};

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: Secret<String>,
    pub password: Secret<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    #[serde(flatten)]
    pub user: UserResponse,
    pub access_token: String,
    pub refresh_token: String,
}

#[tracing::instrument(name = "Register", skip_all)]
pub async fn register<U, E>(
    State((user_store, email_client, config)): State<(U, E, Arc<ServiceConfig>)>,
    body: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Json(request) = body?;

    let username = Username::parse(request.username)?;
    let email = Email::try_from(request.email)?;
    let password = Password::try_from(request.password)?;

    // Admin status is decided once, at registration, by the configured
    // admin address.
    let is_admin = email.matches_ignore_case(&config.admin_email);

    let use_case = RegisterUseCase::new(user_store, email_client);
    let outcome = use_case
        .execute(NewUser {
            username,
            email,
            password,
            is_admin,
        })
        .await?;

    let access_token = generate_access_token(&outcome.user, &config.jwt)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            user: UserResponse::from(&outcome.user),
            access_token,
            refresh_token: outcome.refresh_token.expose_secret().clone(),
        }),
    ))
}
