use common_errors::AppError;
use sql_connection::{PgError, PoolError};
use thiserror::Error;

/// Failures of the local event store.
#[derive(Debug, Error)]
pub enum EventError {
    #[error("Database error: {0}")]
    Database(#[from] PgError),
    #[error("Connection error: {0}")]
    Connection(#[from] PoolError),
    #[error("Event not found: {event_id}")]
    NotFound { event_id: i64 },
    #[error("Invalid event id: {0}")]
    InvalidId(String),
}

/// Rule violations found while validating a new event.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("All fields except image are required")]
    MissingFields,
    #[error("Invalid date format")]
    InvalidDate,
    #[error("Start time must be before end time")]
    StartNotBeforeEnd,
    #[error("Event start time must be in the future")]
    StartInPast,
}

impl ValidationError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::MissingFields => "MISSING_FIELDS",
            Self::InvalidDate => "INVALID_DATE",
            Self::StartNotBeforeEnd => "INVALID_TIME_WINDOW",
            Self::StartInPast => "START_IN_PAST",
        }
    }
}

#[derive(Debug, Error)]
pub enum CreateEventError {
    #[error("You must be logged in to create an event")]
    Unauthenticated,
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Storage(#[from] EventError),
}

impl From<EventError> for AppError {
    fn from(err: EventError) -> Self {
        match err {
            EventError::NotFound { event_id } => {
                AppError::not_found(
                    "EVENT_NOT_FOUND",
                    &format!("Event with ID {event_id} not found"),
                )
            }
            EventError::InvalidId(id) => {
                AppError::not_found(
                    "EVENT_NOT_FOUND",
                    &format!("Event with ID {id} not found"),
                )
            }
            EventError::Database(db_err) => {
                tracing::error!("Database error: {db_err}");
                AppError::internal_server_error()
            }
            EventError::Connection(pool_err) => {
                tracing::error!("Database connection error: {pool_err}");
                AppError::internal_server_error()
            }
        }
    }
}

impl From<CreateEventError> for AppError {
    fn from(err: CreateEventError) -> Self {
        match err {
            CreateEventError::Unauthenticated => {
                AppError::unauthorized(
                    "UNAUTHENTICATED",
                    &CreateEventError::Unauthenticated.to_string(),
                )
            }
            CreateEventError::Validation(rule) => {
                AppError::bad_request(rule.code(), &rule.to_string())
            }
            CreateEventError::Storage(storage) => storage.into(),
        }
    }
}
