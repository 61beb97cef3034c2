use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use fedem_adapters::authenticate_request;
use fedem_application::LogoutUseCase;
use fedem_core::UserStore;

use crate::service::ServiceConfig;

use super::{MessageResponse, error::ApiError};

#[tracing::instrument(name = "Logout", skip_all)]
pub async fn logout<U>(
    State((user_store, config)): State<(U, Arc<ServiceConfig>)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let caller = authenticate_request(&headers, &config.jwt)?;

    let use_case = LogoutUseCase::new(user_store);
    use_case.execute(caller.user_id).await?;

    Ok(Json(MessageResponse::new("Logged out successfully")))
}
