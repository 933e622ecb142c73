use std::cmp::Ordering;

use events_models::Event;

use crate::feed::SortBy;

/// Title comparison used for feed ordering: case-insensitive first, then
/// lowercase ahead of uppercase for titles differing only in case, matching
/// how locale collation orders them.
pub fn compare_titles(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| b.cmp(a))
}

/// Sort a merged feed in place. Stable, so equal keys keep their
/// source order.
pub fn sort_events(events: &mut [Event], sort_by: SortBy) {
    match sort_by {
        SortBy::Name => {
            events.sort_by(|a, b| compare_titles(&a.title, &b.title))
        }
        SortBy::Date => events.sort_by_key(|event| event.start_time),
    }
}
