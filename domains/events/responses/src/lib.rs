use events_models::Event;
use events_queries::{FeedPlan, SortBy};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const EVENT_CREATED_MESSAGE: &str = "Event created successfully!";

/// Filter state echoed back with a feed so the page can re-render its form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct FeedFilters {
    pub search_query: String,
    /// Whether the remote source was actually read
    pub include_api: bool,
    /// Whether local storage was actually read
    pub include_local: bool,
    pub sort_by: SortBy,
}

impl From<&FeedPlan> for FeedFilters {
    fn from(plan: &FeedPlan) -> Self {
        Self {
            search_query: plan.search_query.clone().unwrap_or_default(),
            include_api: plan.include_api,
            include_local: plan.include_local,
            sort_by: plan.sort_by,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct FeedResponse {
    pub events: Vec<Event>,
    pub filters: FeedFilters,
}

impl FeedResponse {
    pub fn new(events: Vec<Event>, plan: &FeedPlan) -> Self {
        Self {
            events,
            filters: plan.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CreateEventResponse {
    pub success: bool,
    pub message: String,
    pub event: Event,
}

impl From<Event> for CreateEventResponse {
    fn from(event: Event) -> Self {
        Self {
            success: true,
            message: EVENT_CREATED_MESSAGE.to_string(),
            event,
        }
    }
}
