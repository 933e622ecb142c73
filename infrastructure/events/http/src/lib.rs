mod identity;

use std::sync::Arc;

use axum::{
    Router,
    extract::{Path, Query, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Json, Redirect, Response},
    routing::{get, post},
};
use common_errors::AppError;
use events_command_handlers::CreateEventHandler;
use events_commands::CreateEventCommand;
use events_dao::{EventDao, EventStore};
use events_errors::{CreateEventError, EventError};
use events_models::Event;
use events_queries::{FeedQuery, GetEventQuery};
use events_query_handlers::{FeedQueryHandler, GetEventQueryHandler};
use events_remote::RemoteEventSource;
use events_responses::{CreateEventResponse, FeedResponse};
pub use identity::{
    CurrentUser, DEFAULT_IDENTITY_HEADER, IdentityConfig, resolve_identity,
};
use sql_connection::SqlConnect;
use tracing::instrument;

pub const DEFAULT_LOGIN_PATH: &str = "/login";

#[derive(Clone)]
pub struct EventServices {
    pub feed: FeedQueryHandler,
    pub get_event: GetEventQueryHandler,
    pub create_event: CreateEventHandler,
    pub login_path: Arc<str>,
}

impl EventServices {
    pub fn new(db: SqlConnect, remote: Arc<dyn RemoteEventSource>) -> Self {
        Self::with_store(Arc::new(EventDao::new(db)), remote)
    }

    pub fn with_store(
        store: Arc<dyn EventStore>, remote: Arc<dyn RemoteEventSource>,
    ) -> Self {
        Self {
            feed: FeedQueryHandler::new(store.clone(), remote),
            get_event: GetEventQueryHandler::new(store.clone()),
            create_event: CreateEventHandler::new(store),
            login_path: Arc::from(DEFAULT_LOGIN_PATH),
        }
    }

    pub fn with_login_path(mut self, login_path: &str) -> Self {
        self.login_path = Arc::from(login_path);
        self
    }
}

pub struct EventHandlers;

impl EventHandlers {
    pub fn routes() -> Router<EventServices> {
        Router::new()
            .route("/events", post(create_event))
            .route("/events/feed", get(event_feed))
            .route("/events/{id}", get(get_event))
    }
}

#[utoipa::path(
    get,
    path = "/events/feed",
    params(FeedQuery),
    responses(
        (status = 200, description = "Merged local and remote events", body = FeedResponse),
        (status = 303, description = "Not signed in, redirected to the login page"),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip_all, fields(user = ?user.0))]
pub async fn event_feed(
    State(services): State<EventServices>, user: CurrentUser,
    Query(query): Query<FeedQuery>,
) -> Result<Response, AppError> {
    if user.0.is_none() {
        return Ok(Redirect::to(&services.login_path).into_response());
    }

    let feed = services.feed.execute(query).await?;
    Ok(Json(feed).into_response())
}

#[utoipa::path(
    post,
    path = "/events",
    request_body = CreateEventCommand,
    responses(
        (status = 201, description = "Event created successfully", body = CreateEventResponse),
        (status = 400, description = "Missing fields, bad dates or an invalid time window", body = common_errors::ApiErrorResponse),
        (status = 401, description = "Not signed in", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip_all, fields(user = ?user.0))]
pub async fn create_event(
    State(services): State<EventServices>, user: CurrentUser,
    body: Result<Json<CreateEventCommand>, JsonRejection>,
) -> Result<(StatusCode, Json<CreateEventResponse>), AppError> {
    let identity = user.0.ok_or(CreateEventError::Unauthenticated)?;
    let Json(command) = body.map_err(|rejection| {
        AppError::bad_request("INVALID_BODY", &rejection.body_text())
    })?;

    let result = services.create_event.execute(Some(identity), command).await?;
    Ok((StatusCode::CREATED, Json(result)))
}

#[utoipa::path(
    get,
    path = "/events/{id}",
    params(
        ("id" = String, Path, description = "Local event ID")
    ),
    responses(
        (status = 200, description = "Event found", body = Event),
        (status = 303, description = "Not signed in, redirected to the login page"),
        (status = 404, description = "Event not found", body = common_errors::ApiErrorResponse),
        (status = 500, description = "Internal server error", body = common_errors::ApiErrorResponse)
    ),
    tag = "events"
)]
#[instrument(skip_all, fields(user = ?user.0))]
pub async fn get_event(
    State(services): State<EventServices>, user: CurrentUser,
    Path(id): Path<String>,
) -> Result<Response, AppError> {
    if user.0.is_none() {
        return Ok(Redirect::to(&services.login_path).into_response());
    }

    let event_id = id.parse::<i64>().map_err(|_| EventError::InvalidId(id))?;
    let event = services.get_event.execute(GetEventQuery { event_id }).await?;
    Ok(Json(event).into_response())
}
