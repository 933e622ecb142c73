use std::sync::Arc;

use chrono::{DateTime, Utc};
use events_commands::CreateEventCommand;
use events_dao::{EventDao, EventStore};
use events_errors::CreateEventError;
use events_responses::CreateEventResponse;
use sql_connection::SqlConnect;
use tracing::{info, instrument, warn};
use user_models::SessionIdentity;

#[derive(Clone)]
pub struct CreateEventHandler {
    store: Arc<dyn EventStore>,
}

impl CreateEventHandler {
    pub fn new(store: Arc<dyn EventStore>) -> Self { Self { store } }

    pub fn from_db(db: SqlConnect) -> Self {
        Self::new(Arc::new(EventDao::new(db)))
    }

    #[instrument(skip(self, command))]
    pub async fn execute(
        &self, identity: Option<SessionIdentity>, command: CreateEventCommand,
    ) -> Result<CreateEventResponse, CreateEventError> {
        self.execute_at(identity, command, Utc::now()).await
    }

    /// Authorize, validate against `now`, then persist. Nothing is written
    /// unless every rule passes.
    pub async fn execute_at(
        &self, identity: Option<SessionIdentity>, command: CreateEventCommand,
        now: DateTime<Utc>,
    ) -> Result<CreateEventResponse, CreateEventError> {
        let authorized = command.authorize(identity)?;
        let organizer = authorized.organizer();

        let new_event = authorized.validate(now).inspect_err(|error| {
            warn!(%organizer, %error, "Rejected event creation");
        })?;

        let event = self.store.insert(new_event).await?;
        info!(%organizer, event_id = %event.id, "Event created");

        Ok(event.into())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use events_errors::{EventError, ValidationError};
    use events_models::{Event, NewEvent};
    use events_queries::LocalEventsQuery;
    use sql_connection::PoolError;

    use super::*;

    #[derive(Default)]
    struct RecordingStore {
        inserted: Mutex<Vec<NewEvent>>,
        fail: bool,
    }

    #[async_trait]
    impl EventStore for RecordingStore {
        async fn find_local(
            &self, _query: &LocalEventsQuery,
        ) -> Result<Vec<Event>, EventError> {
            Ok(Vec::new())
        }

        async fn find_by_id(&self, id: i64) -> Result<Event, EventError> {
            Err(EventError::NotFound { event_id: id })
        }

        async fn insert(&self, event: NewEvent) -> Result<Event, EventError> {
            if self.fail {
                return Err(EventError::Connection(PoolError::Closed));
            }
            let mut inserted = self.inserted.lock().unwrap();
            inserted.push(event.clone());
            Ok(Event::builder()
                .id(inserted.len().to_string())
                .title(event.title)
                .description(event.description)
                .location(event.location)
                .start_time(event.start_time)
                .end_time(event.end_time)
                .organizer_id(Some(event.organizer_id))
                .image_url(event.image_url)
                .build())
        }
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2030, 1, 1, 12, 0, 0).unwrap()
    }

    fn command(start: &str, end: &str) -> CreateEventCommand {
        CreateEventCommand {
            title: Some("Picnic".into()),
            description: Some("Bring food".into()),
            location: Some("City Park".into()),
            start_date_time: Some(start.into()),
            end_date_time: Some(end.into()),
            image: None,
        }
    }

    fn handler() -> (CreateEventHandler, Arc<RecordingStore>) {
        let store = Arc::new(RecordingStore::default());
        (CreateEventHandler::new(store.clone()), store)
    }

    #[tokio::test]
    async fn test_valid_event_is_persisted() {
        let (handler, store) = handler();

        let response = handler
            .execute_at(
                Some(SessionIdentity::new(42)),
                command("2030-01-02T10:00", "2030-01-02T12:00"),
                now(),
            )
            .await
            .unwrap();

        assert!(response.success);
        assert_eq!(response.message, "Event created successfully!");
        assert_eq!(response.event.organizer_id, Some(42));

        let inserted = store.inserted.lock().unwrap();
        assert_eq!(inserted.len(), 1);
        assert_eq!(inserted[0].organizer_id, 42);
        assert_eq!(
            inserted[0].start_time,
            Utc.with_ymd_and_hms(2030, 1, 2, 10, 0, 0).unwrap()
        );
        assert_eq!(
            inserted[0].end_time - inserted[0].start_time,
            Duration::hours(2)
        );
    }

    #[tokio::test]
    async fn test_anonymous_caller_is_rejected_before_validation() {
        let (handler, store) = handler();

        let result = handler
            .execute_at(None, CreateEventCommand::default(), now())
            .await;

        assert!(matches!(result, Err(CreateEventError::Unauthenticated)));
        assert!(store.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_invalid_window_is_not_persisted() {
        let (handler, store) = handler();

        let result = handler
            .execute_at(
                Some(SessionIdentity::new(1)),
                command("2030-01-02T12:00", "2030-01-02T10:00"),
                now(),
            )
            .await;

        assert!(matches!(
            result,
            Err(CreateEventError::Validation(
                ValidationError::StartNotBeforeEnd
            ))
        ));
        assert!(store.inserted.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_past_start_is_rejected() {
        let (handler, _store) = handler();

        let result = handler
            .execute_at(
                Some(SessionIdentity::new(1)),
                command("2029-12-31T10:00", "2029-12-31T12:00"),
                now(),
            )
            .await;

        assert!(matches!(
            result,
            Err(CreateEventError::Validation(ValidationError::StartInPast))
        ));
    }

    #[tokio::test]
    async fn test_storage_failure_surfaces() {
        let store = Arc::new(RecordingStore {
            fail: true,
            ..Default::default()
        });
        let handler = CreateEventHandler::new(store);

        let result = handler
            .execute_at(
                Some(SessionIdentity::new(1)),
                command("2030-01-02T10:00", "2030-01-02T12:00"),
                now(),
            )
            .await;

        assert!(matches!(
            result,
            Err(CreateEventError::Storage(EventError::Connection(_)))
        ));
    }
}
