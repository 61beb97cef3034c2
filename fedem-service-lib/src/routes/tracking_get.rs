use std::sync::Arc;

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
    response::IntoResponse,
};
use fedem_adapters::authenticate_request;
use fedem_application::GetTrackingUseCase;
use fedem_core::TrackingStore;

use crate::service::ServiceConfig;

use super::{TrackingResponse, error::ApiError};

#[tracing::instrument(name = "Get tracking", skip_all)]
pub async fn get_tracking<T>(
    State((tracking_store, config)): State<(T, Arc<ServiceConfig>)>,
    headers: HeaderMap,
    Path(tracking_id): Path<String>,
) -> Result<impl IntoResponse, ApiError>
where
    T: TrackingStore + Clone + 'static,
{
    authenticate_request(&headers, &config.jwt)?;

    let use_case = GetTrackingUseCase::new(tracking_store);
    let tracking = use_case.execute(&tracking_id).await?;

    Ok(Json(TrackingResponse::from(tracking)))
}
