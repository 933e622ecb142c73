use crate::feed::{FeedPlan, SortBy};

/// Filter and order for a read of locally stored events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LocalEventsQuery {
    /// Already trimmed; `None` means no filtering
    pub search: Option<String>,
    pub sort_by: SortBy,
}

impl LocalEventsQuery {
    pub fn new(search: Option<&str>, sort_by: SortBy) -> Self {
        let search = search
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);
        Self { search, sort_by }
    }
}

impl From<&FeedPlan> for LocalEventsQuery {
    fn from(plan: &FeedPlan) -> Self {
        Self::new(plan.search_query.as_deref(), plan.sort_by)
    }
}
