use async_trait::async_trait;
use chrono::{DateTime, Utc};
use dao_utils::query_helpers::param_refs;
use events_errors::EventError;
use events_models::{Event, EventSource, NewEvent};
use events_queries::LocalEventsQuery;
use sql_connection::SqlConnect;
use tracing::{debug, instrument};

use crate::local_query::LocalEventsSql;

/// Storage operations the feed and creation flows need from local events.
#[async_trait]
pub trait EventStore: Send + Sync {
    async fn find_local(
        &self, query: &LocalEventsQuery,
    ) -> Result<Vec<Event>, EventError>;

    async fn find_by_id(&self, id: i64) -> Result<Event, EventError>;

    async fn insert(&self, event: NewEvent) -> Result<Event, EventError>;
}

#[derive(Clone)]
pub struct EventDao {
    db: SqlConnect,
}

impl EventDao {
    pub fn new(db: SqlConnect) -> Self { Self { db } }

    fn map_row(row: &tokio_postgres::Row) -> Event {
        Event::builder()
            .id(row.get::<_, i64>(0).to_string())
            .title(row.get::<_, String>(1))
            .description(row.get::<_, String>(2))
            .location(row.get::<_, String>(3))
            .start_time(row.get(4))
            .end_time(row.get(5))
            .organizer_id(row.get(6))
            .source(EventSource::Local)
            .image_url(row.get(7))
            .created_at(row.get(8))
            .build()
    }
}

#[async_trait]
impl EventStore for EventDao {
    #[instrument(skip(self))]
    async fn find_local(
        &self, query: &LocalEventsQuery,
    ) -> Result<Vec<Event>, EventError> {
        let client = self.db.get_client().await?;
        let LocalEventsSql { sql, params } = LocalEventsSql::build(query);

        let stmt = client.prepare(&sql).await?;
        let rows = client.query(&stmt, &param_refs(&params)).await?;

        debug!(count = rows.len(), "Loaded local events");
        Ok(rows.iter().map(Self::map_row).collect())
    }

    #[instrument(skip(self))]
    async fn find_by_id(&self, id: i64) -> Result<Event, EventError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "SELECT id, title, description, location, start_time, \
                 end_time, organizer_id, image_url, created_at FROM events \
                 WHERE id = $1",
            )
            .await?;
        let rows = client.query(&stmt, &[&id]).await?;

        rows.first()
            .map(Self::map_row)
            .ok_or(EventError::NotFound { event_id: id })
    }

    #[instrument(skip(self, event), fields(title = %event.title))]
    async fn insert(&self, event: NewEvent) -> Result<Event, EventError> {
        let client = self.db.get_client().await?;
        let stmt = client
            .prepare(
                "INSERT INTO events (title, description, location, \
                 start_time, end_time, organizer_id, image_url) VALUES ($1, \
                 $2, $3, $4, $5, $6, $7) RETURNING id, created_at",
            )
            .await?;
        let row = client
            .query_one(&stmt, &[
                &event.title,
                &event.description,
                &event.location,
                &event.start_time,
                &event.end_time,
                &event.organizer_id,
                &event.image_url,
            ])
            .await?;

        let id: i64 = row.get(0);
        let created_at: DateTime<Utc> = row.get(1);

        Ok(Event::builder()
            .id(id.to_string())
            .title(event.title)
            .description(event.description)
            .location(event.location)
            .start_time(event.start_time)
            .end_time(event.end_time)
            .organizer_id(Some(event.organizer_id))
            .image_url(event.image_url)
            .created_at(created_at)
            .build())
    }
}
