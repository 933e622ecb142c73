use chrono::{DateTime, NaiveDateTime, Utc};
use events_errors::{CreateEventError, ValidationError};
use events_models::NewEvent;
use serde::{Deserialize, Serialize};
use user_models::SessionIdentity;
use utoipa::ToSchema;

/// Formats accepted for `startDateTime` / `endDateTime` when no UTC offset
/// is given. Such values are taken as UTC.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
];

/// Body of an event creation request.
///
/// Every field is optional at the wire level so that a missing field is
/// reported as a validation failure rather than a decoding failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventCommand {
    pub title: Option<String>,
    pub description: Option<String>,
    pub location: Option<String>,
    pub start_date_time: Option<String>,
    pub end_date_time: Option<String>,
    pub image: Option<String>,
}

impl CreateEventCommand {
    /// Leave the unauthenticated state. Fails when the request carries no
    /// identity.
    pub fn authorize(
        self, identity: Option<SessionIdentity>,
    ) -> Result<AuthorizedCreateEvent, CreateEventError> {
        let organizer = identity.ok_or(CreateEventError::Unauthenticated)?;
        Ok(AuthorizedCreateEvent {
            organizer,
            command: self,
        })
    }
}

/// A creation request from a known organizer, awaiting validation.
#[derive(Debug, Clone)]
pub struct AuthorizedCreateEvent {
    organizer: SessionIdentity,
    command: CreateEventCommand,
}

impl AuthorizedCreateEvent {
    pub fn organizer(&self) -> SessionIdentity { self.organizer }

    /// Apply the creation rules in order: required fields, date parsing,
    /// start strictly before end, then start strictly after `now`.
    pub fn validate(
        self, now: DateTime<Utc>,
    ) -> Result<NewEvent, ValidationError> {
        let CreateEventCommand {
            title,
            description,
            location,
            start_date_time,
            end_date_time,
            image,
        } = self.command;

        let (
            Some(title),
            Some(description),
            Some(location),
            Some(start_raw),
            Some(end_raw),
        ) = (
            required(title),
            required(description),
            required(location),
            required(start_date_time),
            required(end_date_time),
        )
        else {
            return Err(ValidationError::MissingFields);
        };

        let start_time =
            parse_event_time(&start_raw).ok_or(ValidationError::InvalidDate)?;
        let end_time =
            parse_event_time(&end_raw).ok_or(ValidationError::InvalidDate)?;

        if start_time >= end_time {
            return Err(ValidationError::StartNotBeforeEnd);
        }

        if start_time <= now {
            return Err(ValidationError::StartInPast);
        }

        Ok(NewEvent {
            title,
            description,
            location,
            start_time,
            end_time,
            organizer_id: self.organizer.user_id,
            image_url: required(image),
        })
    }
}

fn required(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse a user supplied timestamp. RFC 3339 values keep their offset and are
/// converted to UTC; values without an offset are read as UTC.
pub fn parse_event_time(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&Utc));
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
        .map(|naive| naive.and_utc())
}
