use std::sync::Arc;

use axum::{Json, extract::{State, rejection::JsonRejection}, response::IntoResponse};
use fedem_adapters::generate_access_token;
use fedem_application::RefreshTokenUseCase;
use fedem_core::UserStore;
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

use crate::service::ServiceConfig;

use super::error::ApiError;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: Secret<String>,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenResponse {
    pub access_token: String,
    pub refresh_token: String,
}

#[tracing::instrument(name = "Refresh token", skip_all)]
pub async fn refresh_token<U>(
    State((user_store, config)): State<(U, Arc<ServiceConfig>)>,
    body: Result<Json<RefreshTokenRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let Json(request) = body?;

    let use_case = RefreshTokenUseCase::new(user_store);
    let outcome = use_case.execute(request.refresh_token).await?;

    let access_token = generate_access_token(&outcome.user, &config.jwt)?;

    Ok(Json(RefreshTokenResponse {
        access_token,
        refresh_token: outcome.refresh_token.expose_secret().clone(),
    }))
}
