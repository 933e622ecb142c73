use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Treat an explicit `null` list the same as a missing one.
fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Top level of a Discovery API event search
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(rename = "_embedded")]
    pub embedded: Option<SearchEmbedded>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchEmbedded {
    /// Kept undecoded so one malformed record cannot sink the page
    #[serde(default, deserialize_with = "null_as_empty")]
    pub events: Vec<Value>,
}

impl SearchResponse {
    /// Decode each record on its own, dropping the ones that do not fit.
    pub fn into_events(self) -> Vec<RawTicketmasterEvent> {
        self.embedded
            .map(|e| e.events)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|record| {
                serde_json::from_value::<RawTicketmasterEvent>(record)
                    .inspect_err(|error| {
                        debug!(%error, "Skipping undecodable event record");
                    })
                    .ok()
            })
            .collect()
    }
}

/// An event record as Ticketmaster sends it. Every field may be absent.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTicketmasterEvent {
    pub id: Option<String>,
    pub name: Option<String>,
    pub url: Option<String>,
    pub info: Option<String>,
    pub please_note: Option<String>,
    pub dates: Option<RawDates>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub classifications: Vec<RawClassification>,
    #[serde(rename = "_embedded")]
    pub embedded: Option<RawEmbeddedVenues>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDates {
    pub start: Option<RawDate>,
    pub end: Option<RawDate>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawDate {
    pub date_time: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawClassification {
    pub segment: Option<RawNamed>,
    pub genre: Option<RawNamed>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawNamed {
    pub name: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawEmbeddedVenues {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub venues: Vec<RawVenue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawVenue {
    pub name: Option<String>,
    pub city: Option<RawNamed>,
    pub state: Option<RawState>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawState {
    pub name: Option<String>,
    pub state_code: Option<String>,
}

impl RawTicketmasterEvent {
    pub fn first_venue(&self) -> Option<&RawVenue> {
        self.embedded.as_ref().and_then(|e| e.venues.first())
    }

    pub fn start_date_time(&self) -> Option<&str> {
        self.dates
            .as_ref()
            .and_then(|d| d.start.as_ref())
            .and_then(|s| s.date_time.as_deref())
    }

    pub fn end_date_time(&self) -> Option<&str> {
        self.dates
            .as_ref()
            .and_then(|d| d.end.as_ref())
            .and_then(|s| s.date_time.as_deref())
    }
}
