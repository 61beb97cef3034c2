use std::sync::Arc;

use axum::{Json, extract::{State, rejection::JsonRejection}, http::HeaderMap, response::IntoResponse};
use fedem_adapters::authenticate_request;
use fedem_application::ToggleAuthorizationUseCase;
use fedem_core::{Email, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use crate::service::ServiceConfig;

use super::{UserResponse, error::ApiError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthorizeRequest {
    pub email: Secret<String>,
    pub is_authorized: bool,
}

#[tracing::instrument(name = "Toggle authorization", skip_all)]
pub async fn toggle_authorization<U>(
    State((user_store, config)): State<(U, Arc<ServiceConfig>)>,
    headers: HeaderMap,
    body: Result<Json<AuthorizeRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let Json(request) = body?;

    authenticate_request(&headers, &config.jwt)?;

    let email = Email::try_from(request.email)?;

    let use_case = ToggleAuthorizationUseCase::new(user_store);
    let user = use_case.execute(email, request.is_authorized).await?;

    Ok(Json(UserResponse::from(&user)))
}
