use std::sync::Arc;

use axum::{
    Router,
    http::{HeaderValue, Method, request},
    routing::{delete, get, post, put},
};
use fedem_adapters::{AllowedOrigins, JwtConfig};
use fedem_core::{Email, EmailClient, TrackingStore, UserStore};
use tokio::net::TcpListener;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

use crate::routes::{
    create_tracking, delete_account, get_tracking, list_users, login, logout, refresh_token,
    register, request_payment, reset_password, reset_password_request, toggle_authorization,
    update_tracking,
};
use crate::tracing::{make_span_with_request_id, on_request, on_response};

/// Per-deployment knobs shared by the handlers.
#[derive(Clone)]
pub struct ServiceConfig {
    pub jwt: JwtConfig,
    pub admin_email: String,
    pub reset_link_base: String,
    pub operator: Email,
}

/// The delivery backend: account routes under `/auth`, shipment routes
/// under `/tracking`.
pub struct FedemService {
    router: Router,
}

impl FedemService {
    /// Assemble the router from the provided stores and email client.
    ///
    /// Stores implement Clone via internal sharing (Arc or pool); each
    /// route is given only the state it needs.
    pub fn new<U, T, E>(
        user_store: U,
        tracking_store: T,
        email_client: E,
        config: ServiceConfig,
    ) -> Self
    where
        U: UserStore + Clone + 'static,
        T: TrackingStore + Clone + 'static,
        E: EmailClient + Clone + 'static,
    {
        let config = Arc::new(config);

        let auth_router = Router::new()
            .route("/register", post(register::<U, E>))
            .with_state((
                user_store.clone(),
                email_client.clone(),
                config.clone(),
            ))
            .route("/login", post(login::<U>))
            .with_state((user_store.clone(), config.clone()))
            .route("/refresh-token", post(refresh_token::<U>))
            .with_state((user_store.clone(), config.clone()))
            .route("/logout", post(logout::<U>))
            .with_state((user_store.clone(), config.clone()))
            .route("/authorize", post(toggle_authorization::<U>))
            .with_state((user_store.clone(), config.clone()))
            .route("/users", get(list_users::<U>))
            .with_state(user_store.clone())
            .route("/reset-link", post(reset_password_request::<U, E>))
            .with_state((
                user_store.clone(),
                email_client.clone(),
                config.clone(),
            ))
            .route("/reset", post(reset_password::<U>))
            .with_state(user_store.clone())
            .route("/payment/details", post(request_payment::<U, E>))
            .with_state((
                user_store.clone(),
                email_client.clone(),
                config.clone(),
            ))
            .route("/delete", delete(delete_account::<U>))
            .with_state((user_store.clone(), config.clone()));

        let tracking_router = Router::new()
            .route("/create", post(create_tracking::<U, T, E>))
            .with_state((
                user_store,
                tracking_store.clone(),
                email_client,
                config.clone(),
            ))
            .route("/update/{tracking_id}", put(update_tracking::<T>))
            .with_state((tracking_store.clone(), config.clone()))
            .route("/{tracking_id}", get(get_tracking::<T>))
            .with_state((tracking_store, config));

        let router = Router::new()
            .nest("/auth", auth_router)
            .nest("/tracking", tracking_router);

        Self { router }
    }

    fn with_trace_layer(mut self) -> Self {
        self.router = self.router.layer(
            TraceLayer::new_for_http()
                .make_span_with(make_span_with_request_id)
                .on_request(on_request)
                .on_response(on_response),
        );
        self
    }

    /// Turn the service into a router that can be mounted on another
    /// application, optionally restricted to the given CORS origins.
    pub fn as_nested_router(mut self, allowed_origins: Option<AllowedOrigins>) -> Router {
        if let Some(allowed_origins) = allowed_origins {
            let cors = CorsLayer::new()
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_credentials(true)
                .allow_origin(AllowOrigin::predicate(
                    move |origin: &HeaderValue, _request_parts: &request::Parts| {
                        allowed_origins.contains(origin)
                    },
                ));

            self.router = self.router.layer(cors);
        }
        self.with_trace_layer().router
    }

    /// Run as a standalone server on the given listener.
    pub async fn run_standalone(
        self,
        listener: TcpListener,
        allowed_origins: Option<AllowedOrigins>,
    ) -> Result<(), std::io::Error> {
        let router = self.as_nested_router(allowed_origins);

        tracing::info!("Fedem service listening on {}", listener.local_addr()?);

        axum::serve(listener, router).await
    }
}
