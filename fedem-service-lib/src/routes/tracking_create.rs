use std::sync::Arc;

use axum::{Json, extract::{State, rejection::JsonRejection}, http::HeaderMap, http::StatusCode, response::IntoResponse};
use fedem_adapters::authenticate_request;
use fedem_application::CreateTrackingUseCase;
use fedem_core::{Email, EmailClient, ShipmentDetails, TrackingStore, UserStore};
use secrecy::Secret;
use serde::{Deserialize, Serialize};

use crate::service::ServiceConfig;

use super::{TrackingResponse, error::ApiError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrackingRequest {
    pub email: Secret<String>,
    pub country: String,
    pub weight: String,
    pub shipment_type: String,
    pub total_price: String,
}

#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateTrackingResponse {
    pub tracking_id: String,
    pub tracking_details: TrackingResponse,
}

#[tracing::instrument(name = "Create tracking", skip_all)]
pub async fn create_tracking<U, T, E>(
    State((user_store, tracking_store, email_client, config)): State<(
        U,
        T,
        E,
        Arc<ServiceConfig>,
    )>,
    headers: HeaderMap,
    body: Result<Json<CreateTrackingRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    T: TrackingStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Json(request) = body?;

    let caller = authenticate_request(&headers, &config.jwt)?;

    let email = Email::try_from(request.email)?;

    let use_case = CreateTrackingUseCase::new(user_store, tracking_store, email_client);
    let tracking = use_case
        .execute(
            caller.user_id,
            email,
            ShipmentDetails {
                country: request.country,
                weight: request.weight,
                shipment_type: request.shipment_type,
                total_price: request.total_price,
            },
        )
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CreateTrackingResponse {
            tracking_id: tracking.tracking_id.clone(),
            tracking_details: TrackingResponse::from(tracking),
        }),
    ))
}
