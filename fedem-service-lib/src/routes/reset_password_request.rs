use std::sync::Arc;

use axum::{Json, extract::{State, rejection::JsonRejection}, response::IntoResponse};
use fedem_application::ResetPasswordRequestUseCase;
use fedem_core::{Email, EmailClient, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use crate::service::ServiceConfig;

use super::{MessageResponse, error::ApiError};

#[derive(Deserialize)]
pub struct ResetLinkRequest {
    pub email: Secret<String>,
}

#[tracing::instrument(name = "Reset password request", skip_all)]
pub async fn reset_password_request<U, E>(
    State((user_store, email_client, config)): State<(U, E, Arc<ServiceConfig>)>,
    body: Result<Json<ResetLinkRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Json(request) = body?;

    let email = Email::try_from(request.email)?;

    let use_case = ResetPasswordRequestUseCase::new(
        user_store,
        email_client,
        config.reset_link_base.clone(),
    );
    use_case.execute(email).await?;

    Ok(Json(MessageResponse::new("Reset link sent")))
}
