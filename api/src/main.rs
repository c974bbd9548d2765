//! 갈낭말낭 API Server
//!
//! Random place picker for Jeju Island: picks one place by region, category
//! or proximity, and serves the admin catalog behind a hosted session.
//! Uses hexagonal (ports & adapters) architecture for clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower::ServiceBuilder;
use tower_governor::governor::GovernorConfigBuilder;
use tower_governor::key_extractor::PeerIpKeyExtractor;
use tower_governor::GovernorLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    KakaoGeocoder, PostgresPlaceRepository, SupabaseAuthClient, SupabaseStorageClient,
};
use app::{PickService, PlaceService};
use config::Config;
use domain::ports::{AuthGateway, Geocoder, ObjectStore, PlaceRepository};

/// Upload limit for admin forms (image included)
const MAX_FORM_BYTES: usize = 10 * 1024 * 1024;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub pick_service: Arc<PickService<dyn PlaceRepository>>,
    pub place_service: Arc<PlaceService<dyn PlaceRepository, dyn Geocoder, dyn ObjectStore>>,
    pub auth: Arc<dyn AuthGateway>,
}

impl AppState {
    pub fn new(
        places: Arc<dyn PlaceRepository>,
        geocoder: Arc<dyn Geocoder>,
        storage: Arc<dyn ObjectStore>,
        auth: Arc<dyn AuthGateway>,
        default_radius_m: u32,
    ) -> Self {
        Self {
            pick_service: Arc::new(PickService::new(places.clone(), default_radius_m)),
            place_service: Arc::new(PlaceService::new(places, geocoder, storage)),
            auth,
        }
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router.
///
/// `pick_rate_limit` is `(per_second, burst)` per peer IP for the pick
/// routes; `None` leaves them unlimited.
pub fn router(state: AppState, pick_rate_limit: Option<(u64, u32)>) -> anyhow::Result<Router> {
    let mut pick_routes = Router::new()
        .route("/pick", post(handlers::pick))
        .route("/pick/quick", post(handlers::quick_pick));

    if let Some((per_second, burst)) = pick_rate_limit {
        // The governor takes a replenish interval, not a rate.
        // PeerIpKeyExtractor reads the socket address, so the server must be
        // started with connect info.
        let replenish_ms = (1000 / per_second.max(1)).max(1);
        let governor_config = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(PeerIpKeyExtractor)
                .per_millisecond(replenish_ms)
                .burst_size(burst)
                .finish()
                .context("Failed to build governor config")?,
        );
        pick_routes = pick_routes.layer(GovernorLayer {
            config: governor_config,
        });
    }

    let admin_routes = Router::new()
        .route("/admin/places", post(handlers::create_place))
        .route(
            "/admin/places/:id",
            patch(handlers::update_place).delete(handlers::delete_place),
        )
        .layer(DefaultBodyLimit::max(MAX_FORM_BYTES))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    let app = Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Public catalog reads
        .route("/places", get(handlers::list_places))
        .route("/places/:id", get(handlers::get_place))
        // Session state (optional auth)
        .route(
            "/auth/me",
            get(handlers::me).layer(middleware::from_fn_with_state(
                state.clone(),
                auth::optional_auth_middleware,
            )),
        )
        .merge(pick_routes)
        .merge(admin_routes)
        .layer(
            ServiceBuilder::new().layer(TraceLayer::new_for_http()).layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any),
            ),
        )
        .with_state(state);

    Ok(app)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,galnang_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting galnang API...");

    // Load configuration
    let config = Config::from_env()?;

    // Connect to PostgreSQL
    tracing::info!("Connecting to database...");
    let db = Database::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;
    tracing::info!("Database connected");

    // Create adapters
    let places: Arc<dyn PlaceRepository> = Arc::new(PostgresPlaceRepository::new(db));
    let geocoder: Arc<dyn Geocoder> = Arc::new(KakaoGeocoder::new(
        config.kakao_api_url.clone(),
        config.kakao_api_key.clone(),
    ));
    let storage: Arc<dyn ObjectStore> = Arc::new(SupabaseStorageClient::new(
        config.supabase_url.clone(),
        config.supabase_service_role_key.clone(),
        config.storage_bucket.clone(),
    ));
    let auth: Arc<dyn AuthGateway> = Arc::new(SupabaseAuthClient::new(
        config.supabase_url.clone(),
        config.supabase_anon_key.clone(),
    ));

    if config.kakao_api_key.is_empty() {
        tracing::warn!("KAKAO_API_KEY is empty; geocoding requests will be rejected");
    }

    let state = AppState::new(
        places,
        geocoder,
        storage,
        auth,
        config.pick_default_radius_m,
    );

    let app = router(state, config.pick_rate_limit())?;

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")?;

    Ok(())
}
