use color_eyre::eyre::Result;
use fedem_adapters::{
    PostgresTrackingStore, PostgresUserStore, PostmarkEmailClient, Settings,
};
use fedem_core::Email;
use fedem_service_lib::{FedemService, ServiceConfig};
use reqwest::Client as HttpClient;
use secrecy::{ExposeSecret, Secret};
use sqlx::postgres::PgPoolOptions;
use tracing_error::ErrorLayer;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    color_eyre::install().expect("Failed to install color_eyre");
    init_tracing().expect("Failed to initialize tracing");

    // Load configuration
    dotenvy::dotenv().ok();
    let config = Settings::load();

    // Setup database connection pool
    let pg_pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(config.postgres.url.expose_secret())
        .await?;

    // Run migrations
    sqlx::migrate!().run(&pg_pool).await?;

    // Create stores
    let user_store = PostgresUserStore::new(pg_pool.clone());
    let tracking_store = PostgresTrackingStore::new(pg_pool);

    // Create email client
    let http_client = HttpClient::builder()
        .timeout(config.email_client.timeout())
        .build()?;

    let email_client = PostmarkEmailClient::new(
        config.email_client.base_url.clone(),
        Email::try_from(Secret::from(config.email_client.sender.clone()))?,
        config.email_client.auth_token.clone(),
        http_client,
    );

    let service = FedemService::new(
        user_store,
        tracking_store,
        email_client,
        ServiceConfig {
            jwt: config.jwt_config(),
            admin_email: config.auth.admin_email.clone(),
            reset_link_base: config.auth.reset_link_base.clone(),
            operator: Email::try_from(Secret::from(config.email_client.operator.clone()))?,
        },
    );

    let allowed_origins = config.app.allowed_origins.clone();

    let listener = tokio::net::TcpListener::bind(&config.app.address).await?;
    tracing::info!("Starting fedem service...");

    service.run_standalone(listener, allowed_origins).await?;

    Ok(())
}

pub fn init_tracing() -> Result<()> {
    let fmt_layer = fmt::layer().compact();

    let filter_layer = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .with(ErrorLayer::default())
        .init();

    Ok(())
}
