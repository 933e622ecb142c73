use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct GetEventQuery {
    pub event_id: i64,
}
