use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use typed_builder::TypedBuilder;
use user_models::UserId;
use utoipa::ToSchema;

/// Where an event came from.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum EventSource {
    Local,
    Ticketmaster,
}

impl EventSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::Ticketmaster => "ticketmaster",
        }
    }
}

impl fmt::Display for EventSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical event shape shared by local rows and remote listings.
///
/// Local events carry their row id rendered as a string; remote events are
/// namespaced (`api_<externalId>`) so the two id spaces never collide.
#[derive(
    Clone,
    Debug,
    PartialEq,
    Eq,
    Serialize,
    Deserialize,
    TypedBuilder,
    ToSchema,
)]
pub struct Event {
    #[builder(setter(into))]
    pub id: String,
    #[builder(setter(into))]
    pub title: String,
    #[builder(setter(into))]
    pub description: String,
    #[builder(setter(into))]
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    #[builder(default)]
    pub organizer_id: Option<UserId>,
    #[builder(default = EventSource::Local)]
    pub source: EventSource,
    #[builder(default)]
    pub external_url: Option<String>,
    #[builder(default)]
    pub external_id: Option<String>,
    #[builder(default)]
    pub image_url: Option<String>,
    #[builder(default = Utc::now())]
    pub created_at: DateTime<Utc>,
}

/// A validated local event ready to be inserted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewEvent {
    pub title: String,
    pub description: String,
    pub location: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub organizer_id: UserId,
    pub image_url: Option<String>,
}
