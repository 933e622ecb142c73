mod events;
mod local_query;

pub use events::{EventDao, EventStore};
pub use local_query::LocalEventsSql;
use sql_connection::Migration;

/// Schema for users and events, in the order they must be applied
pub const MIGRATIONS: &[Migration] = &[
    (
        "001_create_users",
        include_str!("../../../../domains/users/migrations/sql/001_create_users.sql"),
    ),
    (
        "002_create_events",
        include_str!(
            "../../../../domains/events/migrations/sql/002_create_events.sql"
        ),
    ),
];
