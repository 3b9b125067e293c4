use std::sync::Arc;

use axum::{
    http::{header, HeaderValue, Method},
    middleware,
    routing::{get, patch, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::config::{AppConfig, SecurityConfig};
use crate::handlers;
use crate::middleware::access_gate;
use crate::upstream::UpstreamClient;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub upstream: UpstreamClient,
}

impl AppState {
    pub fn new(config: AppConfig) -> Result<Self, reqwest::Error> {
        let config = Arc::new(config);
        let upstream = UpstreamClient::new(config.clone())?;
        Ok(Self { config, upstream })
    }
}

pub fn app(state: AppState) -> Router {
    let mut router = Router::new()
        // Public
        .route("/", get(handlers::system::root))
        .route("/health", get(handlers::system::health))
        .merge(auth_routes())
        // Resource proxies
        .merge(booking_routes())
        .merge(catalog_routes())
        .merge(provider_routes())
        .merge(promocode_routes())
        .merge(notification_routes())
        .merge(customer_routes())
        .merge(earnings_routes());

    router = match &state.config.server.dashboard_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router.fallback(handlers::system::not_found),
    };

    router = router
        .layer(middleware::from_fn_with_state(state.clone(), access_gate))
        .layer(cors_layer(&state.config.security));

    if state.config.server.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn auth_routes() -> Router<AppState> {
    use handlers::auth;

    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route("/api/auth/logout", post(auth::logout))
        .route("/api/auth/me", get(auth::me))
}

fn booking_routes() -> Router<AppState> {
    use handlers::bookings;

    Router::new()
        .route("/api/bookings", get(bookings::list))
        .route("/api/bookings/:id", get(bookings::get).patch(bookings::update))
}

fn catalog_routes() -> Router<AppState> {
    use handlers::catalog;

    Router::new()
        .route(
            "/api/categories",
            get(catalog::list_categories).post(catalog::create_category),
        )
        .route(
            "/api/categories/:id",
            patch(catalog::update_category).delete(catalog::delete_category),
        )
        .route("/api/services", get(catalog::list_services).post(catalog::create_service))
        .route(
            "/api/services/:id",
            patch(catalog::update_service).delete(catalog::delete_service),
        )
}

fn provider_routes() -> Router<AppState> {
    use handlers::providers;

    Router::new()
        .route("/api/providers", get(providers::list))
        .route("/api/providers/:id", get(providers::get).patch(providers::update))
}

fn promocode_routes() -> Router<AppState> {
    use handlers::promocodes;

    Router::new()
        .route("/api/promocodes", get(promocodes::list).post(promocodes::create))
        .route(
            "/api/promocodes/:id",
            patch(promocodes::update).delete(promocodes::delete),
        )
}

fn notification_routes() -> Router<AppState> {
    use handlers::notifications;

    Router::new()
        .route("/api/notifications", get(notifications::list))
        .route("/api/notifications/read-all", post(notifications::mark_all_read))
        .route("/api/notifications/:id/read", patch(notifications::mark_read))
        .route("/api/notifications/:id", axum::routing::delete(notifications::delete))
}

fn customer_routes() -> Router<AppState> {
    use handlers::customers;

    Router::new()
        .route("/api/customers", get(customers::list))
        .route("/api/customers/:id", get(customers::get))
}

fn earnings_routes() -> Router<AppState> {
    Router::new().route("/api/earnings", get(handlers::earnings::get))
}

/// `*` allows any origin; an empty list allows none; otherwise an explicit
/// list with credentials so the session cookie can travel.
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|o| HeaderValue::from_str(o).ok())
        .collect();

    if origins.is_empty() {
        return CorsLayer::new();
    }

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([
            Method::GET,
            Method::HEAD,
            Method::POST,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
        .allow_credentials(true)
}
