pub mod activity;
pub mod attendance;
pub mod error;
pub mod export;
pub mod handlers;
pub mod models;
pub mod openapi;
pub mod qr;
pub mod registry;
pub mod roster;
pub mod seed;
pub mod settings;
pub mod stats;
pub mod studio;
pub mod validation;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use handlers::{
    block_bike, book_bike, bulk_set_pending, check_in_qr, export_csv, get_activity,
    get_attendees, get_qr_payload, get_schedule, get_stats, get_summary, healthz_live,
    healthz_ready, list_bikes, reset_room, root, set_attendee_status,
};
use tokio::sync::Mutex;
use tower_http::LatencyUnit;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::{Level, info};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::error::StudioError;
use crate::openapi::ApiDoc;
use crate::seed::SeedData;
use crate::settings::Settings;
use crate::studio::Studio;

#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub studio: Arc<Mutex<Studio>>,
}

impl AppState {
    /// State seeded with the sample studio.
    pub fn sample(settings: Settings) -> Result<Self, StudioError> {
        let studio = Studio::from_seed(SeedData::sample(settings.total_bikes), &settings)?;
        Ok(Self {
            settings,
            studio: Arc::new(Mutex::new(studio)),
        })
    }
}

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let settings = Settings::from_env()?;

    let env_filter = if settings.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .without_time()
        .init();

    let state = AppState::sample(settings)?;
    let app = build_router(state.clone());

    let addr = SocketAddr::from(([0, 0, 0, 0], state.settings.port));
    info!("Starting Cycle Studio API on {addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}

pub fn build_router(state: AppState) -> Router {
    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(
            DefaultOnResponse::new()
                .level(Level::INFO)
                .latency_unit(LatencyUnit::Millis),
        );

    // The dashboard front end is served from its own origin.
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let mut router = Router::new()
        .route("/", get(root))
        .route("/healthz/live", get(healthz_live))
        .route("/healthz/ready", get(healthz_ready))
        .route("/bikes", get(list_bikes))
        .route("/bikes/reset", post(reset_room))
        .route("/bikes/{id}/book", post(book_bike))
        .route("/bikes/{id}/block", post(block_bike))
        .route("/schedule", get(get_schedule))
        .route("/classes/{key}/attendees", get(get_attendees))
        .route(
            "/classes/{key}/attendees/{id}/status",
            post(set_attendee_status),
        )
        .route("/classes/{key}/attendees/{id}/qr", get(get_qr_payload))
        .route("/classes/{key}/summary", get(get_summary))
        .route("/classes/{key}/bulk", post(bulk_set_pending))
        .route("/classes/{key}/export.csv", get(export_csv))
        .route("/checkin/qr", post(check_in_qr))
        .route("/stats", get(get_stats))
        .route("/activity", get(get_activity))
        .with_state(state.clone());

    if state.settings.enable_swagger {
        let openapi = ApiDoc::openapi();
        let swagger = SwaggerUi::new("/docs").url("/openapi.json", openapi);
        router = router.merge(swagger);
    }

    router.layer(cors).layer(trace_layer)
}
