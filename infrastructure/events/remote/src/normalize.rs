use chrono::{DateTime, Duration, Utc};
use events_models::{Event, EventSource};

use crate::raw::{RawNamed, RawTicketmasterEvent, RawVenue};

pub const UNKNOWN_LOCATION: &str = "Location TBA";
pub const NO_DESCRIPTION: &str = "No description available";
pub const UNTITLED: &str = "Untitled Event";
pub const MAX_DESCRIPTION_CHARS: usize = 500;
pub const DEFAULT_DURATION_HOURS: i64 = 3;

const ID_PREFIX: &str = "api_";
const UNDEFINED_CLASSIFICATION: &str = "Undefined";

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn venue_label(venue: Option<&RawVenue>) -> String {
    let Some(venue) = venue
    else {
        return UNKNOWN_LOCATION.to_string();
    };

    let state = venue.state.as_ref().and_then(|s| {
        non_blank(s.name.as_deref()).or(non_blank(s.state_code.as_deref()))
    });
    let parts: Vec<&str> = [
        non_blank(venue.name.as_deref()),
        non_blank(venue.city.as_ref().and_then(|c| c.name.as_deref())),
        state,
    ]
    .into_iter()
    .flatten()
    .collect();

    if parts.is_empty() {
        UNKNOWN_LOCATION.to_string()
    }
    else {
        parts.join(", ")
    }
}

fn classification_name(named: Option<&RawNamed>) -> Option<&str> {
    non_blank(named.and_then(|n| n.name.as_deref()))
        .filter(|name| *name != UNDEFINED_CLASSIFICATION)
}

fn classification_summary(raw: &RawTicketmasterEvent) -> Option<String> {
    let classification = raw.classifications.first()?;

    match (
        classification_name(classification.segment.as_ref()),
        classification_name(classification.genre.as_ref()),
    ) {
        (Some(segment), Some(genre)) => Some(format!("{segment} - {genre}")),
        (Some(one), None) | (None, Some(one)) => Some(one.to_string()),
        (None, None) => None,
    }
}

fn description(raw: &RawTicketmasterEvent) -> String {
    let text = non_blank(raw.info.as_deref())
        .or(non_blank(raw.please_note.as_deref()))
        .map(str::to_string)
        .or_else(|| classification_summary(raw))
        .unwrap_or_else(|| NO_DESCRIPTION.to_string());

    text.chars().take(MAX_DESCRIPTION_CHARS).collect()
}

fn parse_time(value: Option<&str>) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value?.trim())
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Map a Ticketmaster record onto the canonical event shape.
///
/// Returns `None` when the record has no usable id; such records are
/// skipped rather than failing the whole batch.
pub fn normalize(
    raw: &RawTicketmasterEvent, now: DateTime<Utc>,
) -> Option<Event> {
    let external_id = non_blank(raw.id.as_deref())?.to_string();

    let start_time = parse_time(raw.start_date_time()).unwrap_or(now);
    let end_time = parse_time(raw.end_date_time())
        .unwrap_or(start_time + Duration::hours(DEFAULT_DURATION_HOURS));

    Some(
        Event::builder()
            .id(format!("{ID_PREFIX}{external_id}"))
            .title(non_blank(raw.name.as_deref()).unwrap_or(UNTITLED))
            .description(description(raw))
            .location(venue_label(raw.first_venue()))
            .start_time(start_time)
            .end_time(end_time)
            .source(EventSource::Ticketmaster)
            .external_url(raw.url.clone())
            .external_id(Some(external_id))
            .created_at(now)
            .build(),
    )
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::raw::{
        RawClassification, RawDate, RawDates, RawEmbeddedVenues, RawState,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    fn named(name: &str) -> Option<RawNamed> {
        Some(RawNamed {
            name: Some(name.to_string()),
        })
    }

    fn bare(id: &str) -> RawTicketmasterEvent {
        RawTicketmasterEvent {
            id: Some(id.to_string()),
            ..Default::default()
        }
    }

    fn with_venue(venue: RawVenue) -> RawTicketmasterEvent {
        RawTicketmasterEvent {
            embedded: Some(RawEmbeddedVenues {
                venues: vec![venue],
            }),
            ..bare("V1")
        }
    }

    #[test]
    fn test_minimal_payload_uses_placeholders() {
        let event = normalize(&bare("X1"), now()).unwrap();

        assert_eq!(event.id, "api_X1");
        assert_eq!(event.external_id.as_deref(), Some("X1"));
        assert_eq!(event.title, UNTITLED);
        assert_eq!(event.location, "Location TBA");
        assert_eq!(event.description, "No description available");
        assert_eq!(event.source, EventSource::Ticketmaster);
        assert_eq!(event.start_time, now());
        assert_eq!(event.end_time, now() + Duration::hours(3));
        assert_eq!(event.organizer_id, None);
    }

    #[test]
    fn test_missing_or_blank_id_is_skipped() {
        assert!(normalize(&RawTicketmasterEvent::default(), now()).is_none());
        assert!(normalize(&bare("  "), now()).is_none());
    }

    #[test]
    fn test_full_venue() {
        let raw = with_venue(RawVenue {
            name: Some("Moody Center".into()),
            city: named("Austin"),
            state: Some(RawState {
                name: Some("Texas".into()),
                state_code: Some("TX".into()),
            }),
        });
        assert_eq!(
            normalize(&raw, now()).unwrap().location,
            "Moody Center, Austin, Texas"
        );
    }

    #[test]
    fn test_venue_falls_back_to_state_code() {
        let raw = with_venue(RawVenue {
            name: Some("Moody Center".into()),
            city: None,
            state: Some(RawState {
                name: None,
                state_code: Some("TX".into()),
            }),
        });
        assert_eq!(normalize(&raw, now()).unwrap().location, "Moody Center, TX");
    }

    #[test]
    fn test_venue_with_only_city() {
        let raw = with_venue(RawVenue {
            name: Some("".into()),
            city: named("Austin"),
            state: None,
        });
        assert_eq!(normalize(&raw, now()).unwrap().location, "Austin");
    }

    #[test]
    fn test_empty_venue_is_tba() {
        let raw = with_venue(RawVenue::default());
        assert_eq!(normalize(&raw, now()).unwrap().location, UNKNOWN_LOCATION);
    }

    #[test]
    fn test_description_priority() {
        let mut raw = bare("D1");
        raw.classifications = vec![RawClassification {
            segment: named("Music"),
            genre: named("Rock"),
        }];
        assert_eq!(normalize(&raw, now()).unwrap().description, "Music - Rock");

        raw.please_note = Some("No re-entry".into());
        assert_eq!(normalize(&raw, now()).unwrap().description, "No re-entry");

        raw.info = Some("Doors at 7".into());
        assert_eq!(normalize(&raw, now()).unwrap().description, "Doors at 7");
    }

    #[test]
    fn test_classification_ignores_undefined() {
        let mut raw = bare("D2");
        raw.classifications = vec![RawClassification {
            segment: named("Sports"),
            genre: named("Undefined"),
        }];
        assert_eq!(normalize(&raw, now()).unwrap().description, "Sports");

        raw.classifications = vec![RawClassification {
            segment: named("Undefined"),
            genre: named("Undefined"),
        }];
        assert_eq!(normalize(&raw, now()).unwrap().description, NO_DESCRIPTION);
    }

    #[test]
    fn test_description_is_truncated() {
        let mut raw = bare("D3");
        raw.info = Some("é".repeat(800));
        let description = normalize(&raw, now()).unwrap().description;
        assert_eq!(description.chars().count(), MAX_DESCRIPTION_CHARS);
    }

    #[test]
    fn test_times_are_parsed_and_end_defaults_to_three_hours() {
        let mut raw = bare("T1");
        raw.name = Some("  Late Show ".into());
        raw.dates = Some(RawDates {
            start: Some(RawDate {
                date_time: Some("2030-06-01T23:30:00Z".into()),
            }),
            end: None,
        });
        let event = normalize(&raw, now()).unwrap();
        let start = Utc.with_ymd_and_hms(2030, 6, 1, 23, 30, 0).unwrap();

        assert_eq!(event.title, "Late Show");
        assert_eq!(event.start_time, start);
        assert_eq!(event.end_time, start + Duration::hours(3));
    }

    #[test]
    fn test_explicit_end_and_invalid_start() {
        let mut raw = bare("T2");
        raw.dates = Some(RawDates {
            start: Some(RawDate {
                date_time: Some("not a date".into()),
            }),
            end: Some(RawDate {
                date_time: Some("2030-01-01T18:00:00+02:00".into()),
            }),
        });
        let event = normalize(&raw, now()).unwrap();

        assert_eq!(event.start_time, now());
        assert_eq!(
            event.end_time,
            Utc.with_ymd_and_hms(2030, 1, 1, 16, 0, 0).unwrap()
        );
    }
}
