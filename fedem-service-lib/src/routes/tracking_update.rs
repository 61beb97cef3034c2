use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::HeaderMap,
    response::IntoResponse,
};
use fedem_adapters::authenticate_request;
use fedem_application::UpdateTrackingUseCase;
use fedem_core::TrackingStore;
use serde::Deserialize;

use crate::service::ServiceConfig;

use super::{TrackingResponse, error::ApiError};

#[derive(Deserialize)]
pub struct UpdateTrackingRequest {
    pub stage: i32,
    pub location: String,
    pub status: String,
}

#[tracing::instrument(name = "Update tracking", skip_all)]
pub async fn update_tracking<T>(
    State((tracking_store, config)): State<(T, Arc<ServiceConfig>)>,
    headers: HeaderMap,
    Path(tracking_id): Path<String>,
    body: Result<Json<UpdateTrackingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    T: TrackingStore + Clone + 'static,
{
    let Json(request) = body?;

    authenticate_request(&headers, &config.jwt)?;

    let use_case = UpdateTrackingUseCase::new(tracking_store);
    let tracking = use_case
        .execute(&tracking_id, request.stage, request.location, request.status)
        .await?;

    Ok(Json(TrackingResponse::from(tracking)))
}
