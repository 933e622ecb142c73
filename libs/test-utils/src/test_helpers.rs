use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sql_connection::SqlConnect;

use crate::postgres::TestPostgresContainer;

/// Create a test user named 'Test User' and return its id
pub async fn create_test_user(container: &TestPostgresContainer) -> Result<i64> {
    create_test_user_with_name(container, "Test User").await
}

/// Create a test user with a specific name
pub async fn create_test_user_with_name(
    container: &TestPostgresContainer, name: &str,
) -> Result<i64> {
    let client = container.pool.get().await?;
    let email = format!("{}@example.com", name.to_lowercase().replace(' ', ""));
    let row = client
        .query_one(
            "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) \
             RETURNING id",
            &[&name, &email, &"not-a-real-hash"],
        )
        .await?;
    Ok(row.get(0))
}

/// Insert a local event starting at `start` and lasting two hours
pub async fn create_test_event(
    container: &TestPostgresContainer, organizer_id: i64, title: &str,
    description: &str, location: &str, start: DateTime<Utc>,
) -> Result<i64> {
    let client = container.pool.get().await?;
    let end = start + Duration::hours(2);
    let row = client
        .query_one(
            "INSERT INTO events (title, description, location, start_time, \
             end_time, organizer_id) VALUES ($1, $2, $3, $4, $5, $6) \
             RETURNING id",
            &[&title, &description, &location, &start, &end, &organizer_id],
        )
        .await?;
    Ok(row.get(0))
}

/// Create a SQL connection from a test container for use with DAOs and
/// handlers
pub fn create_sql_connect(container: &TestPostgresContainer) -> SqlConnect {
    SqlConnect::new(container.pool.clone())
}
