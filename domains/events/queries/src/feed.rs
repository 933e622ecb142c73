use std::fmt;

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

/// Raw feed filters as they arrive on the query string.
#[derive(Debug, Clone, Default, Deserialize, IntoParams, ToSchema)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query, rename_all = "camelCase")]
pub struct FeedQuery {
    /// Boolean-like flag (`true`, `on`, `1`, `yes`) asking for remote events
    pub include_api: Option<String>,
    /// Boolean-like flag asking for locally created events
    pub include_local: Option<String>,
    /// Free text matched against title, description and location
    pub search_query: Option<String>,
    /// `name` sorts by title; anything else sorts by start time
    pub sort_by: Option<String>,
}

#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize,
    ToSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    Name,
    #[default]
    Date,
}

impl SortBy {
    /// `"name"` selects title order. Every other value, including none,
    /// selects start time order.
    pub fn from_param(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some("name") => Self::Name,
            _ => Self::Date,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Date => "date",
        }
    }
}

impl fmt::Display for SortBy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Interpret an HTML-form style boolean.
pub fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| {
        matches!(
            v.trim().to_ascii_lowercase().as_str(),
            "true" | "on" | "1" | "yes"
        )
    })
}

/// Which sources a feed request reads, decided once per request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedPlan {
    pub include_api: bool,
    pub include_local: bool,
    pub search_query: Option<String>,
    pub sort_by: SortBy,
}

impl FeedPlan {
    /// The remote source is only read for an explicit request that also
    /// carries search text. Local is read when asked for, or by default when
    /// the caller asked for neither the remote source nor a search.
    pub fn from_query(query: &FeedQuery) -> Self {
        let search_query = query
            .search_query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_string);

        let api_requested = is_truthy(query.include_api.as_deref());
        let local_requested = is_truthy(query.include_local.as_deref());

        let include_api = api_requested && search_query.is_some();
        let include_local =
            local_requested || (!api_requested && search_query.is_none());

        Self {
            include_api,
            include_local,
            search_query,
            sort_by: SortBy::from_param(query.sort_by.as_deref()),
        }
    }
}

impl FeedQuery {
    pub fn plan(&self) -> FeedPlan { FeedPlan::from_query(self) }
}
