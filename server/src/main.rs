mod config;

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    extract::State,
    http::{HeaderName, StatusCode},
    middleware::from_fn_with_state,
    response::IntoResponse,
    routing::get,
};
use events_dao::MIGRATIONS;
use events_http::{
    EventHandlers, EventServices, IdentityConfig, resolve_identity,
};
use events_remote::TicketmasterClient;
use sql_connection::{SqlConnect, SqlMigrator, connect_postgres_db};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use utoipa::OpenApi;
use utoipa_rapidoc::RapiDoc;

use crate::config::ServerConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = ServerConfig::from_env()?;

    info!("Initializing connection pool...");
    let db = connect_postgres_db(&config.database).await?;
    info!("PostgreSQL connection pool initialized");

    if config.run_migrations {
        let applied = SqlMigrator::new(db.pool().clone())
            .run_all_migrations(MIGRATIONS)
            .await?;
        info!(count = applied.len(), "Migrations applied");
    }

    let ticketmaster = TicketmasterClient::new(config.ticketmaster.clone())?;
    if !ticketmaster.has_api_key() {
        warn!("TICKETMASTER_API_KEY is not set, remote search will be empty");
    }

    let event_services = EventServices::new(db.clone(), Arc::new(ticketmaster))
        .with_login_path(&config.login_path);
    let identity = IdentityConfig {
        header: HeaderName::try_from(config.identity_header.as_str())
            .context("IDENTITY_HEADER must be a valid header name")?,
    };

    let app = Router::new()
        .route("/health", get(health_check))
        .with_state(db)
        .merge(EventHandlers::routes().with_state(event_services))
        .merge(RapiDoc::new("/api-docs/openapi.json").path("/docs"))
        .route(
            "/api-docs/openapi.json",
            get(|| async { axum::Json(ApiDoc::openapi()) }),
        )
        .layer(from_fn_with_state(identity, resolve_identity))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    info!("Event feed server starting on {}", config.bind_addr);

    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health_check,
        events_http::event_feed,
        events_http::create_event,
        events_http::get_event,
    ),
    components(
        schemas(
            events_models::Event,
            events_models::EventSource,
            events_queries::SortBy,
            events_commands::CreateEventCommand,
            events_responses::FeedResponse,
            events_responses::FeedFilters,
            events_responses::CreateEventResponse,
            common_errors::ApiErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "events", description = "Event feed and creation endpoints")
    ),
    info(
        title = "Event Feed API",
        description = "Local events merged with Ticketmaster listings",
        version = "1.0.0"
    )
)]
struct ApiDoc;

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check successful with connection pool status", body = String)
    ),
    tag = "health"
)]
async fn health_check(State(db): State<SqlConnect>) -> impl IntoResponse {
    let (available, size) = db.get_pool_status();
    (StatusCode::OK, format!("OK - Pool: {available}/{size} available"))
}
