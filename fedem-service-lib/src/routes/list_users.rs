use axum::{Json, extract::State, response::IntoResponse};
use fedem_application::ListUsersUseCase;
use fedem_core::UserStore;
use serde::{Deserialize, Serialize};

use super::{UserResponse, error::ApiError};

#[derive(Serialize, Deserialize)]
pub struct UsersResponse {
    pub users: Vec<UserResponse>,
}

#[tracing::instrument(name = "List users", skip_all)]
pub async fn list_users<U>(
    State(user_store): State<U>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
{
    let use_case = ListUsersUseCase::new(user_store);
    let users = use_case.execute().await?;

    Ok(Json(UsersResponse {
        users: users.iter().map(UserResponse::from).collect(),
    }))
}
