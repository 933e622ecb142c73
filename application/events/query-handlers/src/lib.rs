use std::sync::Arc;

use chrono::{DateTime, Utc};
use events_dao::{EventDao, EventStore};
use events_errors::EventError;
use events_models::Event;
use events_queries::{
    FeedPlan, FeedQuery, GetEventQuery, LocalEventsQuery, sort_events,
};
use events_remote::{RemoteEventSource, normalize};
use events_responses::FeedResponse;
use sql_connection::SqlConnect;
use tracing::{debug, instrument, warn};

/// Builds the merged event feed from local storage and the remote listing.
#[derive(Clone)]
pub struct FeedQueryHandler {
    store: Arc<dyn EventStore>,
    remote: Arc<dyn RemoteEventSource>,
}

impl FeedQueryHandler {
    pub fn new(
        store: Arc<dyn EventStore>, remote: Arc<dyn RemoteEventSource>,
    ) -> Self {
        Self { store, remote }
    }

    pub fn from_db(db: SqlConnect, remote: Arc<dyn RemoteEventSource>) -> Self {
        Self::new(Arc::new(EventDao::new(db)), remote)
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: FeedQuery,
    ) -> Result<FeedResponse, EventError> {
        let plan = query.plan();
        let events = self.collect(&plan, Utc::now()).await?;
        Ok(FeedResponse::new(events, &plan))
    }

    /// Remote first, then local, merged in that order and sorted once.
    pub async fn collect(
        &self, plan: &FeedPlan, now: DateTime<Utc>,
    ) -> Result<Vec<Event>, EventError> {
        let mut events = match plan.search_query.as_deref() {
            Some(keyword) if plan.include_api => {
                self.remote_events(keyword, now).await
            }
            _ => Vec::new(),
        };

        if plan.include_local {
            let local =
                self.store.find_local(&LocalEventsQuery::from(plan)).await?;
            events.extend(local);
        }

        sort_events(&mut events, plan.sort_by);
        debug!(count = events.len(), "Feed assembled");
        Ok(events)
    }

    /// Remote failures never fail the feed; they contribute nothing.
    async fn remote_events(
        &self, keyword: &str, now: DateTime<Utc>,
    ) -> Vec<Event> {
        match self.remote.search(keyword).await {
            Ok(raw) => raw.iter().filter_map(|r| normalize(r, now)).collect(),
            Err(error) => {
                warn!(%error, "Remote event search failed, using local only");
                Vec::new()
            }
        }
    }
}

#[derive(Clone)]
pub struct GetEventQueryHandler {
    store: Arc<dyn EventStore>,
}

impl GetEventQueryHandler {
    pub fn new(store: Arc<dyn EventStore>) -> Self { Self { store } }

    pub fn from_db(db: SqlConnect) -> Self {
        Self::new(Arc::new(EventDao::new(db)))
    }

    #[instrument(skip(self))]
    pub async fn execute(
        &self, query: GetEventQuery,
    ) -> Result<Event, EventError> {
        self.store.find_by_id(query.event_id).await
    }
}
