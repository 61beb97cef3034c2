use std::sync::Arc;

use axum::{Json, extract::State, http::HeaderMap, response::IntoResponse};
use fedem_adapters::authenticate_request;
use fedem_application::{DeleteAccountError, DeleteAccountUseCase};
use fedem_core::{UserStore, UserStoreError};

use crate::service::ServiceConfig;

use super::{MessageResponse, error::ApiError};

#[tracing::instrument(name = "Delete account", skip_all)]
pub async fn delete_account<U>(
    State((user_store, config)): State<(U, Arc<ServiceConfig>)>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let caller = authenticate_request(&headers, &config.jwt)?;

    let use_case = DeleteAccountUseCase::new(user_store);
    match use_case.execute(caller.user_id).await {
        // A valid token for an already-deleted account still gets a 200.
        Ok(()) | Err(DeleteAccountError::UserStoreError(UserStoreError::UserNotFound)) => {
            Ok(Json(MessageResponse::new("Account deleted")))
        }
        Err(e) => Err(e.into()),
    }
}
