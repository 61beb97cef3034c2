use chrono::{DateTime, Utc};
use fedem_core::{
    Email, NewTracking, Tracking, TrackingStage, TrackingStore, TrackingStoreError,
};
use secrecy::{ExposeSecret, Secret};
use sqlx::{PgPool, Pool, Postgres};
use uuid::Uuid;

const TRACKING_COLUMNS: &str = "id, tracking_id, user_id, email, country, weight, shipment_type, \
     total_price, current_stage, stages, created_at";

#[derive(Clone)]
pub struct PostgresTrackingStore {
    pool: PgPool,
}

impl PostgresTrackingStore {
    pub fn new(pool: Pool<Postgres>) -> Self {
        PostgresTrackingStore { pool }
    }
}

#[derive(sqlx::FromRow)]
struct TrackingRow {
    id: Uuid,
    tracking_id: String,
    user_id: Uuid,
    email: String,
    country: String,
    weight: String,
    shipment_type: String,
    total_price: String,
    current_stage: i32,
    // Append-only stage log, kept in one JSONB column so a stage append and
    // the current_stage move are a single row write.
    stages: serde_json::Value,
    created_at: DateTime<Utc>,
}

impl TryFrom<TrackingRow> for Tracking {
    type Error = TrackingStoreError;

    fn try_from(row: TrackingRow) -> Result<Self, Self::Error> {
        let email = Email::try_from(Secret::from(row.email))
            .map_err(|e| TrackingStoreError::UnexpectedError(e.to_string()))?;
        let stages: Vec<TrackingStage> = serde_json::from_value(row.stages)
            .map_err(|e| TrackingStoreError::UnexpectedError(e.to_string()))?;
        Ok(Tracking {
            id: row.id,
            tracking_id: row.tracking_id,
            user_id: row.user_id,
            email,
            details: fedem_core::ShipmentDetails {
                country: row.country,
                weight: row.weight,
                shipment_type: row.shipment_type,
                total_price: row.total_price,
            },
            current_stage: row.current_stage,
            stages,
            created_at: row.created_at,
        })
    }
}

fn unexpected(e: sqlx::Error) -> TrackingStoreError {
    TrackingStoreError::UnexpectedError(e.to_string())
}

#[async_trait::async_trait]
impl TrackingStore for PostgresTrackingStore {
    #[tracing::instrument(name = "Adding tracking to PostgreSQL", skip_all)]
    async fn add_tracking(
        &self,
        new_tracking: NewTracking,
    ) -> Result<Tracking, TrackingStoreError> {
        let id = Uuid::new_v4();
        let created_at = Utc::now();
        let current_stage = new_tracking.initial_stage.stage;
        let stages = serde_json::to_value([&new_tracking.initial_stage])
            .map_err(|e| TrackingStoreError::UnexpectedError(e.to_string()))?;

        sqlx::query(
            "INSERT INTO trackings (id, tracking_id, user_id, email, country, weight, \
             shipment_type, total_price, current_stage, stages, created_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
        )
        .bind(id)
        .bind(&new_tracking.tracking_id)
        .bind(new_tracking.user_id)
        .bind(new_tracking.email.as_ref().expose_secret())
        .bind(&new_tracking.details.country)
        .bind(&new_tracking.details.weight)
        .bind(&new_tracking.details.shipment_type)
        .bind(&new_tracking.details.total_price)
        .bind(current_stage)
        .bind(&stages)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.constraint().is_some() {
                    return TrackingStoreError::TrackingAlreadyExists;
                }
            }
            unexpected(e)
        })?;

        Ok(Tracking {
            id,
            tracking_id: new_tracking.tracking_id,
            user_id: new_tracking.user_id,
            email: new_tracking.email,
            details: new_tracking.details,
            current_stage,
            stages: vec![new_tracking.initial_stage],
            created_at,
        })
    }

    #[tracing::instrument(name = "Appending tracking stage in PostgreSQL", skip_all)]
    async fn append_stage(
        &self,
        tracking_id: &str,
        event: TrackingStage,
    ) -> Result<Tracking, TrackingStoreError> {
        let event_json = serde_json::to_value(&event)
            .map_err(|e| TrackingStoreError::UnexpectedError(e.to_string()))?;

        let query = format!(
            "UPDATE trackings SET current_stage = $2, stages = stages || jsonb_build_array($3::jsonb) \
             WHERE tracking_id = $1 RETURNING {TRACKING_COLUMNS}"
        );
        let row = sqlx::query_as::<_, TrackingRow>(&query)
            .bind(tracking_id)
            .bind(event.stage)
            .bind(&event_json)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.ok_or(TrackingStoreError::TrackingNotFound)?.try_into()
    }

    #[tracing::instrument(name = "Retrieving tracking from PostgreSQL", skip_all)]
    async fn get_tracking(&self, tracking_id: &str) -> Result<Tracking, TrackingStoreError> {
        let query = format!("SELECT {TRACKING_COLUMNS} FROM trackings WHERE tracking_id = $1");
        let row = sqlx::query_as::<_, TrackingRow>(&query)
            .bind(tracking_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(unexpected)?;

        row.ok_or(TrackingStoreError::TrackingNotFound)?.try_into()
    }
}
