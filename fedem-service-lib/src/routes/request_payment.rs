use std::sync::Arc;

use axum::{Json, extract::{State, rejection::JsonRejection}, response::IntoResponse};
use fedem_application::RequestPaymentUseCase;
use fedem_core::{Email, EmailClient, ShipmentDetails, UserStore};
use secrecy::Secret;
use serde::Deserialize;

use crate::service::ServiceConfig;

use super::{MessageResponse, error::ApiError};

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetailsRequest {
    pub email: Secret<String>,
    pub total_price: String,
    pub country: String,
    pub weight: String,
    pub shipment_type: String,
}

#[tracing::instrument(name = "Request payment details", skip_all)]
pub async fn request_payment<U, E>(
    State((user_store, email_client, config)): State<(U, E, Arc<ServiceConfig>)>,
    body: Result<Json<PaymentDetailsRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError>
where
    U: UserStore + Clone + 'static,
    E: EmailClient + Clone + 'static,
{
    let Json(request) = body?;

    let email = Email::try_from(request.email)?;

    let use_case =
        RequestPaymentUseCase::new(user_store, email_client, config.operator.clone());
    use_case
        .execute(
            email,
            ShipmentDetails {
                country: request.country,
                weight: request.weight,
                shipment_type: request.shipment_type,
                total_price: request.total_price,
            },
        )
        .await?;

    Ok(Json(MessageResponse::new("Payment details requested")))
}
